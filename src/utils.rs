use chrono::Local;
use uuid::Uuid;

/// 日志用的本地时间戳
pub fn current_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// 生成会话 ID：uuid v4 的前 8 位十六进制
pub fn generate_session_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
