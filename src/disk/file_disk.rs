use std::{
    fs::File,
    io::{Error, ErrorKind, Read, Result, Seek, SeekFrom, Write},
    sync::{Mutex, PoisonError},
};

use crate::disk::{
    block_device::BlockDevice,
    types::{block_offset, Block, BlockIndex},
};

/// 用一个普通文件模拟块设备，块 `i` 位于 `[i*BLOCK_SIZE, (i+1)*BLOCK_SIZE)`。
#[derive(Debug)]
pub struct FileDisk {
    file: Mutex<File>,
    block_count: u32,
}

impl FileDisk {
    /// 文件长度必须已经不小于 `block_count * BLOCK_SIZE`，见 [`crate::disk::open_backing_file`]。
    pub fn new(file: File, block_count: u32) -> Self {
        Self {
            file: Mutex::new(file),
            block_count,
        }
    }

    fn check_range(&self, index: BlockIndex) -> Result<()> {
        if index >= self.block_count {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("block {} out of range (0..{})", index, self.block_count),
            ));
        }
        Ok(())
    }
}

impl BlockDevice for FileDisk {
    fn read_block(&self, index: BlockIndex, buf: &mut Block) -> Result<()> {
        self.check_range(index)?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.seek(SeekFrom::Start(block_offset(index)))?;
        file.read_exact(buf)?;
        Ok(())
    }

    fn write_block(&self, index: BlockIndex, buf: &Block) -> Result<()> {
        self.check_range(index)?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.seek(SeekFrom::Start(block_offset(index)))?;
        file.write_all(buf)?;
        Ok(())
    }

    fn block_count(&self) -> u32 {
        self.block_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::BLOCK_SIZE;

    fn disk(blocks: u32) -> FileDisk {
        let file = tempfile::tempfile().unwrap();
        file.set_len(blocks as u64 * BLOCK_SIZE as u64).unwrap();
        FileDisk::new(file, blocks)
    }

    #[test]
    fn can_read_and_write_blocks() {
        let disk = disk(4);

        disk.write_block(2, &[0x55; BLOCK_SIZE]).unwrap();

        let mut buf = [0xAA; BLOCK_SIZE];
        disk.read_block(3, &mut buf).unwrap();
        assert_eq!(buf, [0; BLOCK_SIZE]);

        disk.read_block(2, &mut buf).unwrap();
        assert_eq!(buf, [0x55; BLOCK_SIZE]);
    }

    #[test]
    fn zero_block_clears_previous_content() {
        let disk = disk(2);
        disk.write_block(1, &[0x7F; BLOCK_SIZE]).unwrap();
        disk.zero_block(1).unwrap();

        let mut buf = [0xFF; BLOCK_SIZE];
        disk.read_block(1, &mut buf).unwrap();
        assert_eq!(buf, [0; BLOCK_SIZE]);
    }

    #[test]
    fn out_of_range_block_is_rejected() {
        let disk = disk(1);
        let err = disk.write_block(1, &[0; BLOCK_SIZE]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let mut buf = [0; BLOCK_SIZE];
        assert!(disk.read_block(7, &mut buf).is_err());
    }
}
