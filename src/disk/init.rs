use std::{
    fs::OpenOptions,
    io::{BufWriter, Result, Seek, SeekFrom, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::disk::{file_disk::FileDisk, types::BLOCK_SIZE};

/// 打开（必要时创建）后备文件，长度不足时补零扩展到
/// `max(total_size, max_blocks * BLOCK_SIZE)` 字节。
///
/// 已有文件中的块内容原样保留，目录元数据不在文件里。
pub fn open_backing_file<P: AsRef<Path>>(
    path: P,
    total_size: u64,
    max_blocks: u32,
) -> Result<FileDisk> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;

    let disk_size = total_size.max(max_blocks as u64 * BLOCK_SIZE as u64);
    let current = file.metadata()?.len();

    if current < disk_size {
        info!(
            "allocating disk space: {} ({} -> {} bytes)",
            path.display(),
            current,
            disk_size
        );

        let pb = ProgressBar::new(disk_size - current);
        pb.set_style(
            ProgressStyle::with_template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        file.seek(SeekFrom::Start(current))?;
        let mut writer = BufWriter::new(&file);
        let zeros = [0u8; BLOCK_SIZE];
        let mut remaining = disk_size - current;
        while remaining > 0 {
            let chunk = remaining.min(BLOCK_SIZE as u64) as usize;
            writer.write_all(&zeros[..chunk])?;
            remaining -= chunk as u64;
            pb.inc(chunk as u64);
        }
        writer.flush()?;
        drop(writer);
        file.sync_all()?;
        pb.finish_with_message("ready");
    }

    info!(
        "backing store opened: {} ({} blocks of {} bytes)",
        path.display(),
        max_blocks,
        BLOCK_SIZE
    );
    Ok(FileDisk::new(file, max_blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::BlockDevice;

    #[test]
    fn grows_new_file_to_block_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.bin");

        let disk = open_backing_file(&path, 0, 10).unwrap();
        assert_eq!(disk.block_count(), 10);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 10 * BLOCK_SIZE as u64);
    }

    #[test]
    fn honours_larger_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.bin");

        open_backing_file(&path, 4096, 10).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 4096);
    }

    #[test]
    fn keeps_existing_block_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.bin");

        let disk = open_backing_file(&path, 0, 4).unwrap();
        disk.write_block(3, &[0x42; BLOCK_SIZE]).unwrap();
        drop(disk);

        let disk = open_backing_file(&path, 0, 4).unwrap();
        let mut buf = [0; BLOCK_SIZE];
        disk.read_block(3, &mut buf).unwrap();
        assert_eq!(buf, [0x42; BLOCK_SIZE]);
    }
}
