/// 默认最多 5 个文件
pub const MAX_FILES: usize = 5;

/// 默认 10 个数据块
pub const MAX_BLOCKS: u32 = 10;

/// 文件名最长 11 个字符
pub const MAX_NAME_LEN: usize = 11;

/// inode 表与块池的容量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub max_files: usize,
    pub max_blocks: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES,
            max_blocks: MAX_BLOCKS,
        }
    }
}
