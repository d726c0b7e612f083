use std::{
    io::{Error, ErrorKind},
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::{debug, info, warn};

use crate::{
    disk::{Block, BlockDevice, BlockIndex, BLOCK_SIZE},
    fs::{
        allocation_table::AllocationTable,
        config::{Geometry, MAX_NAME_LEN},
        error::{FileSystemError, Result},
        inode_table::{InodeEntry, InodeTable},
    },
};

pub mod allocation_table;
pub mod config;
pub mod error;
pub mod inode_table;

/// `list()` 返回的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: usize,
}

/// 锁内的全部状态，只能经由 [`FileSystemManager`] 的操作访问
struct FsState {
    disk: Box<dyn BlockDevice>,         // 底层磁盘抽象层
    allocation_table: AllocationTable, // 数据块分配与链接
    inode_table: InodeTable,           // 目录（仅在内存中）
}

/// 文件系统：块设备、分配表和 inode 表放在同一把锁后面，
/// 五个操作各自在整个执行期间持锁，彼此完全串行。
pub struct FileSystemManager {
    state: Mutex<FsState>,
}

impl FileSystemManager {
    pub fn new(disk: Box<dyn BlockDevice>, geometry: Geometry) -> Result<Self> {
        if geometry.max_files == 0 || geometry.max_blocks == 0 {
            return Err(
                Error::new(ErrorKind::InvalidInput, "file system geometry must be non-zero").into(),
            );
        }
        if disk.block_count() < geometry.max_blocks {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "backing store holds {} blocks, {} required",
                    disk.block_count(),
                    geometry.max_blocks
                ),
            )
            .into());
        }

        info!(
            "file system ready: {} inodes, {} blocks of {} bytes",
            geometry.max_files, geometry.max_blocks, BLOCK_SIZE
        );
        Ok(Self {
            state: Mutex::new(FsState {
                disk,
                allocation_table: AllocationTable::new(geometry.max_blocks),
                inode_table: InodeTable::new(geometry.max_files),
            }),
        })
    }

    pub fn free_blocks(&self) -> usize {
        self.lock().allocation_table.count_free()
    }

    // 每个操作在返回前都已恢复全部不变量，被毒化的锁可以直接接着用
    fn lock(&self) -> MutexGuard<'_, FsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let mut state = self.lock();

        if state.inode_table.find(name).is_some() {
            return Err(FileSystemError::DuplicateName);
        }
        let index = state
            .inode_table
            .alloc_inode(InodeEntry::new(name))
            .ok_or(FileSystemError::NoFreeInode)?;

        debug!("created {} in inode {}", name, index);
        Ok(())
    }

    pub fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        self.lock().write(name, data)
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.lock().read(name)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        let index = state.inode_table.find(name).ok_or(FileSystemError::NotFound)?;

        // 先清槽位再释放块链：清零失败时块和槽位都已归还，只上报错误
        let entry = state
            .inode_table
            .free_inode(index)
            .ok_or(FileSystemError::NotFound)?;
        let FsState {
            disk,
            allocation_table,
            ..
        } = &mut *state;
        allocation_table.free_chain(entry.first_block, disk.as_ref())?;

        debug!("deleted {} from inode {}", name, index);
        Ok(())
    }

    pub fn list(&self) -> Vec<FileInfo> {
        self.lock()
            .inode_table
            .iter()
            .map(|(_, entry)| FileInfo {
                name: entry.name.clone(),
                size: entry.size,
            })
            .collect()
    }
}

impl FsState {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let index = self.inode_table.find(name).ok_or(FileSystemError::NotFound)?;
        let old_head = self.inode_table.get(index).and_then(|e| e.first_block);

        // 自己的旧块链会被释放，算作可用空间
        let required = data.len().div_ceil(BLOCK_SIZE);
        let owned = self.allocation_table.chain(old_head).len();
        let available = self.allocation_table.count_free() + owned;
        if required > available {
            return Err(FileSystemError::NotEnoughSpace {
                required,
                available,
            });
        }

        match self.replace_chain(old_head, data, required) {
            Ok(first_block) => {
                if let Some(entry) = self.inode_table.get_mut(index) {
                    entry.size = data.len();
                    entry.first_block = first_block;
                }
                debug!(
                    "wrote {} bytes to {} ({} blocks, head {:?})",
                    data.len(),
                    name,
                    required,
                    first_block
                );
                Ok(())
            }
            Err(e) => {
                // 旧链已经释放，不能再指向它
                if let Some(entry) = self.inode_table.get_mut(index) {
                    entry.truncate();
                }
                warn!("write to {} failed, file truncated: {}", name, e);
                Err(e)
            }
        }
    }

    /// 释放旧链、分配新链并写满数据，成功时返回新链首块
    fn replace_chain(
        &mut self,
        old_head: Option<BlockIndex>,
        data: &[u8],
        required: usize,
    ) -> Result<Option<BlockIndex>> {
        self.allocation_table
            .free_chain(old_head, self.disk.as_ref())?;
        let chain = self.allocation_table.allocate_chain(required)?;

        if let Err(e) = self.write_chain(&chain, data) {
            if let Err(cleanup) = self
                .allocation_table
                .free_chain(chain.first().copied(), self.disk.as_ref())
            {
                warn!("zero-filling abandoned chain failed: {}", cleanup);
            }
            return Err(e);
        }
        Ok(chain.first().copied())
    }

    // 每块装满 BLOCK_SIZE 字节，最后一块尾部补零
    fn write_chain(&self, chain: &[BlockIndex], data: &[u8]) -> Result<()> {
        for (&index, chunk) in chain.iter().zip(data.chunks(BLOCK_SIZE)) {
            let mut block: Block = [0; BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            self.disk.write_block(index, &block)?;
        }
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let index = self.inode_table.find(name).ok_or(FileSystemError::NotFound)?;
        let entry = self
            .inode_table
            .get(index)
            .ok_or(FileSystemError::NotFound)?;

        let mut content = Vec::with_capacity(entry.size);
        let mut remaining = entry.size;
        let mut block: Block = [0; BLOCK_SIZE];
        for block_index in self.allocation_table.chain(entry.first_block) {
            if remaining == 0 {
                break;
            }
            self.disk.read_block(block_index, &mut block)?;
            let take = remaining.min(BLOCK_SIZE);
            content.extend_from_slice(&block[..take]);
            remaining -= take;
        }

        if remaining > 0 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("block chain of {} ends {} bytes short", name, remaining),
            )
            .into());
        }
        Ok(content)
    }
}

/// 文件名：1..=11 个字符，不含空白
pub fn validate_name(name: &str) -> Result<()> {
    if name.chars().count() > MAX_NAME_LEN {
        return Err(FileSystemError::NameTooLong);
    }
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(FileSystemError::InvalidName);
    }
    Ok(())
}
