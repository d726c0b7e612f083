//! 文本协议中服务端与客户端共用的固定行

pub const GREETING: &str = "Welcome to the File Server!";
pub const COMMANDS_HELP: &str =
    "Commands: CREATE <file>, WRITE <file> <data>, READ <file>, DELETE <file>, LIST, EXIT";

/// 连接建立后服务端先发出的两行
pub const GREETING_LINES: usize = 2;

pub const LIST_HEADER: &str = "Listing files:";
pub const NO_FILES: &str = "No files found.";
pub const END_OF_LIST: &str = "(End of list)";
pub const CLOSING: &str = "Closing connection...";
pub const SERVER_BUSY: &str = "Error: Server busy, try again later.";

pub const ERROR_PREFIX: &str = "Error: ";

/// 客户端可用的命令关键字
pub const COMMAND_WORDS: [&str; 6] = ["CREATE", "WRITE", "READ", "DELETE", "LIST", "EXIT"];
