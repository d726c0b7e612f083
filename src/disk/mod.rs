pub mod block_device;
pub mod file_disk;
pub mod init;
pub mod types;

pub use block_device::BlockDevice;
pub use file_disk::FileDisk;
pub use init::open_backing_file;
pub use types::{block_offset, Block, BlockIndex, BLOCK_SIZE};
