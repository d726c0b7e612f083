use thiserror::Error;

use crate::fs::config::MAX_NAME_LEN;

/// 文件系统错误类型，Display 文本即协议中 "Error: " 之后的内容
#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("File already exists")]
    DuplicateName,
    #[error("File not found.")]
    NotFound,
    #[error("No free inode available")]
    NoFreeInode,
    #[error("No free disk block available.")]
    NoFreeBlock,
    #[error("Not enough free space: need {required} blocks, {available} available")]
    NotEnoughSpace { required: usize, available: usize },
    #[error("Filename too long (max {} characters)", MAX_NAME_LEN)]
    NameTooLong,
    #[error("Invalid filename")]
    InvalidName,
    #[error("Disk I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 文件系统统一结果类型
pub type Result<T> = std::result::Result<T, FileSystemError>;
