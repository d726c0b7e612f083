use std::io::{self, Write};

use crate::{
    fs::FileSystemManager,
    protocol::{CLOSING, END_OF_LIST, ERROR_PREFIX, LIST_HEADER, NO_FILES},
};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Create(String),
    Write(String, String),
    Read(String),
    Delete(String),
    List,
    Exit,
    Usage(&'static str),
    Unknown(String),
}

/// 执行一条命令并把回复写到 `out`。
///
/// 文件系统的错误在这里变成一行 `Error: ...`，不会向上传播；
/// 返回的错误只可能来自写回复本身。
pub fn execute_command<W: Write>(
    cmd: &Command,
    fs: &FileSystemManager,
    out: &mut W,
) -> io::Result<()> {
    let result = match cmd {
        Command::Create(name) => fs.create(name).map(|_| format!("File created: {}", name)),
        Command::Write(name, data) => fs
            .write(name, data.as_bytes())
            .map(|_| format!("Wrote data to: {}", name)),
        Command::Read(name) => fs
            .read(name)
            .map(|content| format!("File content: {}", String::from_utf8_lossy(&content))),
        Command::Delete(name) => fs.delete(name).map(|_| format!("File deleted: {}", name)),
        Command::List => {
            writeln!(out, "{}", LIST_HEADER)?;
            let files = fs.list();
            if files.is_empty() {
                writeln!(out, "{}", NO_FILES)?;
            }
            for file in files {
                writeln!(out, " - {} ({} bytes)", file.name, file.size)?;
            }
            Ok(END_OF_LIST.to_string())
        }
        Command::Exit => Ok(CLOSING.to_string()),
        Command::Usage(usage) => Ok(format!("Usage: {}", usage)),
        Command::Unknown(token) => Ok(format!("Unknown command: {}", token)),
    };

    match result {
        Ok(reply) => writeln!(out, "{}", reply),
        Err(e) => writeln!(out, "{}{}", ERROR_PREFIX, e),
    }
}
