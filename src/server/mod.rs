pub mod command;
pub mod parse;
pub mod session;

use std::{
    io::{self, BufReader, BufWriter, Write},
    net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    sync::Arc,
    time::Duration,
};

use log::{info, warn};
use threadpool::ThreadPool;

use crate::{fs::FileSystemManager, protocol::SERVER_BUSY, server::session::Session};

/// 并发相关的上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerOptions {
    pub max_sessions: usize,            // 工作线程数，即同时服务的会话数
    pub max_pending: usize,             // 排队连接收不到问候语，默认不排队直接拒绝
    pub idle_timeout: Option<Duration>, // None 表示客户端可以无限期空闲
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            max_sessions: 16,
            max_pending: 0,
            idle_timeout: None,
        }
    }
}

/// 运行中 + 排队中的连接数未到 `max_sessions + max_pending` 时才接纳新连接
pub fn admit(active: usize, queued: usize, options: &ServerOptions) -> bool {
    active + queued < options.max_sessions + options.max_pending
}

pub struct Server {
    listener: TcpListener,
    fs: Arc<FileSystemManager>,
    pool: ThreadPool,
    options: ServerOptions,
}

impl Server {
    pub fn bind<A: ToSocketAddrs>(
        addr: A,
        fs: Arc<FileSystemManager>,
        options: ServerOptions,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        let pool = ThreadPool::with_name(
            "minifs-session".to_string(),
            options.max_sessions.max(1),
        );
        Ok(Self {
            listener,
            fs,
            pool,
            options,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// 接受连接的主循环，不会正常返回
    pub fn run(&self) -> io::Result<()> {
        info!("File server started on {}", self.local_addr()?);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => warn!("accept failed: {}", e),
            }
        }
        Ok(())
    }

    fn dispatch(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        if !admit(self.pool.active_count(), self.pool.queued_count(), &self.options) {
            warn!("rejecting {}: server busy", peer);
            reject(stream);
            return;
        }

        info!("Client connected: {}", peer);
        let fs = Arc::clone(&self.fs);
        let idle_timeout = self.options.idle_timeout;
        self.pool.execute(move || {
            if let Err(e) = handle_client(stream, fs, idle_timeout) {
                warn!("client {} error: {}", peer, e);
            }
            info!("Client disconnected: {}", peer);
        });
    }
}

fn reject(mut stream: TcpStream) {
    let _ = writeln!(stream, "{}", SERVER_BUSY);
    let _ = stream.shutdown(Shutdown::Both);
}

fn handle_client(
    stream: TcpStream,
    fs: Arc<FileSystemManager>,
    idle_timeout: Option<Duration>,
) -> io::Result<()> {
    stream.set_read_timeout(idle_timeout)?;
    let reader = BufReader::new(stream.try_clone()?);
    let writer = BufWriter::new(stream);

    let mut session = Session::new(reader, writer, fs);
    info!("[{}] session started", session.id());
    session.run()
}
