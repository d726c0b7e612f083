/// 一条命令的回复占几行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    SingleLine,
    UntilEndOfList, // LIST：读到 "(End of list)" 为止
    Closing,        // EXIT：一行之后服务端关闭连接
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Help,
    Clear,
    Remote {
        line: String,
        framing: Framing,
        delete_target: Option<String>, // DELETE 需要先确认
    },
}

/// 本地命令（help/clear）就地处理，其余原样发给服务端
pub fn parse_input(input: &str) -> Option<Input> {
    let line = input.trim();
    if line.is_empty() {
        return None;
    }

    let mut tokens = line.split_ascii_whitespace();
    let cmd = tokens.next()?.to_ascii_uppercase();

    let input = match cmd.as_str() {
        "HELP" => Input::Help,
        "CLEAR" => Input::Clear,
        _ => Input::Remote {
            line: line.to_string(),
            framing: expected_reply(&cmd),
            delete_target: match cmd.as_str() {
                "DELETE" => tokens.next().map(str::to_string),
                _ => None,
            },
        },
    };
    Some(input)
}

pub fn expected_reply(cmd: &str) -> Framing {
    match cmd {
        "LIST" => Framing::UntilEndOfList,
        "EXIT" => Framing::Closing,
        _ => Framing::SingleLine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_per_command() {
        assert_eq!(expected_reply("LIST"), Framing::UntilEndOfList);
        assert_eq!(expected_reply("EXIT"), Framing::Closing);
        assert_eq!(expected_reply("READ"), Framing::SingleLine);
        assert_eq!(expected_reply("BOGUS"), Framing::SingleLine);
    }

    #[test]
    fn local_commands() {
        assert_eq!(parse_input("help"), Some(Input::Help));
        assert_eq!(parse_input("  Clear "), Some(Input::Clear));
        assert_eq!(parse_input("   "), None);
    }

    #[test]
    fn remote_commands_keep_original_line() {
        assert_eq!(
            parse_input("write notes a  b"),
            Some(Input::Remote {
                line: "write notes a  b".to_string(),
                framing: Framing::SingleLine,
                delete_target: None,
            })
        );
        assert_eq!(
            parse_input("list"),
            Some(Input::Remote {
                line: "list".to_string(),
                framing: Framing::UntilEndOfList,
                delete_target: None,
            })
        );
    }

    #[test]
    fn delete_carries_target_for_confirmation() {
        match parse_input("DELETE alpha") {
            Some(Input::Remote { delete_target, .. }) => {
                assert_eq!(delete_target.as_deref(), Some("alpha"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
