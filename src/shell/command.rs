use std::{
    io::{self, BufRead, BufReader, ErrorKind, Write},
    net::{Shutdown, TcpStream},
};

use colored::*;

use crate::{
    protocol::{END_OF_LIST, ERROR_PREFIX, GREETING_LINES},
    shell::parse::Framing,
};

/// 到服务端的一条连接
pub struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Connection {
    /// 连接并读掉问候语；服务端忙时返回其错误行
    pub fn connect(addr: &str) -> io::Result<(Self, Vec<String>)> {
        let stream = TcpStream::connect(addr)?;
        let mut conn = Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: stream,
        };

        let mut greeting = Vec::with_capacity(GREETING_LINES);
        for _ in 0..GREETING_LINES {
            let line = conn.read_line()?;
            if line.starts_with(ERROR_PREFIX) {
                return Err(io::Error::new(ErrorKind::ConnectionRefused, line));
            }
            greeting.push(line);
        }
        Ok((conn, greeting))
    }

    /// 发送一行命令并按 `framing` 收齐回复
    pub fn send(&mut self, line: &str, framing: Framing) -> io::Result<Vec<String>> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;

        let mut reply = vec![self.read_line()?];
        if framing == Framing::UntilEndOfList {
            while reply.last().map(String::as_str) != Some(END_OF_LIST)
                && !reply[0].starts_with(ERROR_PREFIX)
            {
                reply.push(self.read_line()?);
            }
        }
        if framing == Framing::Closing {
            let _ = self.writer.shutdown(Shutdown::Both);
        }
        Ok(reply)
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                "server closed the connection",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

pub fn print_reply(lines: &[String]) {
    for line in lines {
        if line.starts_with(ERROR_PREFIX) {
            println!("{}", line.red().bold());
        } else if line.starts_with("Unknown command") || line.starts_with("Usage:") {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
}

pub fn print_help() {
    println!("{}", "📘 MiniFS Commands".bright_cyan().bold());
    println!(
        "{}",
        "
  CREATE <file>         Create an empty file
  WRITE <file> <data>   Replace file content with the rest of the line
  READ <file>           Print file content
  DELETE <file>         Delete file
  LIST                  List files and sizes
  EXIT                  Close the connection
  help                  Show this help message
  clear                 Clear the screen
"
        .bright_black()
    );
}
