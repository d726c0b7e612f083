use std::{error::Error, process, sync::Arc};

use clap::Parser;
use log::error;

use minifs::{
    config::ServerConfig,
    disk::open_backing_file,
    fs::FileSystemManager,
    logger,
    server::Server,
};

fn main() {
    let config = ServerConfig::parse();
    logger::init(config.log_level);

    if let Err(e) = run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(config: &ServerConfig) -> Result<(), Box<dyn Error>> {
    config.validate()?;

    // 后备文件打不开就直接退出，没有降级模式
    let disk = open_backing_file(&config.disk, config.total_size, config.max_blocks)?;
    let fs = Arc::new(FileSystemManager::new(Box::new(disk), config.geometry())?);

    let server = Server::bind(config.listen_addr(), fs, config.server_options())?;
    server.run()?;
    Ok(())
}
