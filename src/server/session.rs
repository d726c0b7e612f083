use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use log::{debug, info};

use crate::{
    fs::FileSystemManager,
    protocol::{COMMANDS_HELP, GREETING},
    server::{
        command::{execute_command, Command},
        parse::parse_command,
    },
    utils::generate_session_id,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    AwaitingCommand,
    Dispatching,
    Closed,
}

/// 一个客户端连接的命令/回复循环。
///
/// 锁只在单个文件系统操作期间持有；等待下一行时不占用文件系统。
pub struct Session<R, W> {
    id: String,
    reader: R,
    writer: W,
    fs: Arc<FileSystemManager>,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, fs: Arc<FileSystemManager>) -> Self {
        Self {
            id: generate_session_id(),
            reader,
            writer,
            fs,
            state: SessionState::Connected,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 跑到 EXIT、对端关闭或读写出错为止，结束时状态总是 `Closed`。
    pub fn run(&mut self) -> io::Result<()> {
        let result = self.serve();
        self.state = SessionState::Closed;
        result
    }

    fn serve(&mut self) -> io::Result<()> {
        writeln!(self.writer, "{}", GREETING)?;
        writeln!(self.writer, "{}", COMMANDS_HELP)?;
        self.writer.flush()?;

        let mut line = Vec::new();
        loop {
            self.state = SessionState::AwaitingCommand;
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                info!("[{}] end of stream", self.id);
                return Ok(());
            }

            self.state = SessionState::Dispatching;
            let cmd = parse_command(&String::from_utf8_lossy(&line));
            debug!("[{}] {:?}", self.id, cmd);
            execute_command(&cmd, &self.fs, &mut self.writer)?;
            self.writer.flush()?;

            if matches!(cmd, Command::Exit) {
                info!("[{}] client exited", self.id);
                return Ok(());
            }
        }
    }
}
