use std::io::Result;

use crate::disk::types::{Block, BlockIndex, BLOCK_SIZE};

pub trait BlockDevice: Send + Sync {
    fn read_block(&self, index: BlockIndex, buf: &mut Block) -> Result<()>;
    fn write_block(&self, index: BlockIndex, buf: &Block) -> Result<()>;
    fn block_count(&self) -> u32;

    fn zero_block(&self, index: BlockIndex) -> Result<()> {
        self.write_block(index, &[0; BLOCK_SIZE])
    }
}
