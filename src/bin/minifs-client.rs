use std::process;

use clap::Parser;
use colored::*;

use minifs::{config::ClientConfig, shell::start_shell};

fn main() {
    let config = ClientConfig::parse();
    if let Err(e) = start_shell(&config) {
        eprintln!("{} {}", "❌ Error:".red().bold(), e);
        process::exit(1);
    }
}
