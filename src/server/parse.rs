use crate::server::command::Command;

/// 一行一条命令：命令字、文件名，WRITE 另带行的剩余部分（原样保留空格）。
pub fn parse_command(input: &str) -> Command {
    let line = input.trim();
    let mut parts = line.splitn(3, ' ');

    let cmd = parts.next().unwrap_or_default().to_ascii_uppercase();
    // 连续空格得到空文件名，交给文件系统报错
    let name = parts.next().map(str::to_string);
    let data = parts.next();

    match cmd.as_str() {
        "CREATE" => name.map(Command::Create).unwrap_or(Command::Usage("CREATE <filename>")),
        "WRITE" => match (name, data) {
            (Some(name), Some(data)) => Command::Write(name, data.to_string()),
            _ => Command::Usage("WRITE <filename> <data>"),
        },
        "READ" => name.map(Command::Read).unwrap_or(Command::Usage("READ <filename>")),
        "DELETE" => name.map(Command::Delete).unwrap_or(Command::Usage("DELETE <filename>")),
        "LIST" => Command::List,
        "EXIT" => Command::Exit,
        _ => Command::Unknown(cmd),
    }
}
