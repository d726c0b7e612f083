/// 每个逻辑块（Block）的大小：128 字节
/// 文件系统以“块”为最小读写单位。
pub const BLOCK_SIZE: usize = 128;

/// 块编号，`0..max_blocks`
pub type BlockIndex = u32;

/// 定义一个逻辑块类型（每块 128 字节的字节数组）
/// 所有磁盘读写都以 Block 为单位进行。
pub type Block = [u8; BLOCK_SIZE];

/// 块在后备文件中的字节偏移
pub fn block_offset(index: BlockIndex) -> u64 {
    index as u64 * BLOCK_SIZE as u64
}
