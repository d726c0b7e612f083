use log::debug;

use crate::{
    disk::{BlockDevice, BlockIndex},
    fs::error::{FileSystemError, Result},
};

/// 单个数据块的分配状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationEntry {
    pub used: bool,
    pub next: Option<BlockIndex>, // 链中的下一块，None 表示链尾
}

/// 块分配表：每块一个 used 标志加一个 next 链接，文件的数据块组成一条单向链
#[derive(Debug)]
pub struct AllocationTable {
    entries: Vec<AllocationEntry>,
    free_blocks: usize, // 当前空闲块数
}

impl AllocationTable {
    pub fn new(total_blocks: u32) -> Self {
        Self {
            entries: vec![AllocationEntry::default(); total_blocks as usize],
            free_blocks: total_blocks as usize,
        }
    }

    pub fn count_free(&self) -> usize {
        self.free_blocks
    }

    #[cfg(test)]
    fn entry(&self, index: BlockIndex) -> Option<&AllocationEntry> {
        self.entries.get(index as usize)
    }

    // 首次适配：按编号升序找第一个空闲块
    pub fn allocate(&mut self) -> Result<BlockIndex> {
        let (index, entry) = self
            .entries
            .iter_mut()
            .enumerate()
            .find(|(_, e)| !e.used)
            .ok_or(FileSystemError::NoFreeBlock)?;

        *entry = AllocationEntry {
            used: true,
            next: None,
        };
        self.free_blocks -= 1;
        debug!("allocated block {}", index);
        Ok(index as BlockIndex)
    }

    /// 分配 `count` 个块并按分配顺序链接，返回链上的块号。
    /// 中途失败时已分配的块全部归还，表保持调用前的状态。
    pub fn allocate_chain(&mut self, count: usize) -> Result<Vec<BlockIndex>> {
        let mut chain: Vec<BlockIndex> = Vec::with_capacity(count);
        for _ in 0..count {
            match self.allocate() {
                Ok(index) => {
                    if let Some(&prev) = chain.last() {
                        self.entries[prev as usize].next = Some(index);
                    }
                    chain.push(index);
                }
                Err(e) => {
                    self.release(chain.first().copied());
                    return Err(e);
                }
            }
        }
        Ok(chain)
    }

    /// 从 `head` 开始沿 next 遍历整条链。
    /// 步数以总块数为上限，表损坏成环时也能结束。
    pub fn chain(&self, head: Option<BlockIndex>) -> Vec<BlockIndex> {
        let mut blocks = Vec::new();
        let mut cursor = head;
        while let Some(index) = cursor {
            match self.entries.get(index as usize) {
                Some(entry) if entry.used && blocks.len() < self.entries.len() => {
                    blocks.push(index);
                    cursor = entry.next;
                }
                _ => break,
            }
        }
        blocks
    }

    /// 只修改表：链上每块标记为空闲并清除链接，返回被释放的块
    pub fn release(&mut self, head: Option<BlockIndex>) -> Vec<BlockIndex> {
        let blocks = self.chain(head);
        for &index in &blocks {
            self.entries[index as usize] = AllocationEntry::default();
            self.free_blocks += 1;
        }
        blocks
    }

    /// 释放整条链并把每块清零，防止后来的文件读到旧数据。
    /// 清零失败时表已经是释放后的状态。
    pub fn free_chain(
        &mut self,
        head: Option<BlockIndex>,
        disk: &dyn BlockDevice,
    ) -> Result<()> {
        let blocks = self.release(head);
        if !blocks.is_empty() {
            debug!("freeing chain {:?}", blocks);
        }
        for index in blocks {
            disk.zero_block(index)?;
        }
        Ok(())
    }
}
