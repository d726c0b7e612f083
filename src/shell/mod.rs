pub mod command;
pub mod parse;

use crate::{
    config::ClientConfig,
    protocol::COMMAND_WORDS,
    shell::{
        command::{print_help, print_reply, Connection},
        parse::{parse_input, Framing, Input},
    },
};
use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use dialoguer::Confirm;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultCompleter, DefaultPrompt, DefaultPromptSegment,
    Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal,
};
use std::{error::Error, io::stdout, path::PathBuf};

pub fn start_shell(config: &ClientConfig) -> Result<(), Box<dyn Error>> {
    execute!(stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    let addr = config.server_addr();
    println!("{} {}", "🔌 Connecting to".bright_yellow(), addr.cyan());
    let (mut conn, greeting) = Connection::connect(&addr)?;
    for line in &greeting {
        println!("{}", line.bright_cyan());
    }
    println!(
        "{}",
        "Type 'help' for available commands. Use ↑↓ for history, Tab for auto-completion.\n"
            .bright_black()
    );

    let mut line_editor = build_editor()?;

    let username = whoami::username();
    let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(format!("{}@{}", username, hostname)),
        DefaultPromptSegment::Basic(format!("MiniFS {}", addr)),
    );

    loop {
        let input = line_editor.read_line(&prompt);

        match input {
            Ok(Signal::Success(buffer)) => {
                let (line, framing, delete_target) = match parse_input(&buffer) {
                    None => continue,
                    Some(Input::Help) => {
                        print_help();
                        continue;
                    }
                    Some(Input::Clear) => {
                        execute!(stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))?;
                        continue;
                    }
                    Some(Input::Remote {
                        line,
                        framing,
                        delete_target,
                    }) => (line, framing, delete_target),
                };

                if let Some(target) = delete_target {
                    if !config.no_confirm && !confirm_delete(&target) {
                        println!("{}", "Cancelled.".bright_black());
                        continue;
                    }
                }

                match conn.send(&line, framing) {
                    Ok(reply) => print_reply(&reply),
                    Err(e) => {
                        println!("{} {}", "❌ Connection error:".red().bold(), e);
                        break;
                    }
                }
                if framing == Framing::Closing {
                    break;
                }
            }
            Ok(Signal::CtrlC) => {
                println!();
                continue;
            }
            Ok(Signal::CtrlD) => {
                // 通知服务端正常退出
                if let Ok(reply) = conn.send("EXIT", Framing::Closing) {
                    print_reply(&reply);
                }
                break;
            }
            #[allow(unreachable_patterns)]
            Ok(_) => continue,
            Err(e) => {
                println!("Error reading line: {}", e);
                break;
            }
        }
    }

    println!("{}", "👋 Bye!".bright_yellow());
    Ok(())
}

fn build_editor() -> Result<Reedline, Box<dyn Error>> {
    let history_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".minifs_history");
    let history = FileBackedHistory::with_file(100, history_path)?;

    // 命令补全
    let words: Vec<String> = COMMAND_WORDS.iter().map(|w| w.to_string()).collect();
    let completer = DefaultCompleter::new_with_wordlen(words, 2);
    let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    Ok(Reedline::create()
        .with_history(Box::new(history))
        .with_completer(Box::new(completer))
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(Emacs::new(keybindings))))
}

fn confirm_delete(target: &str) -> bool {
    Confirm::new()
        .with_prompt(format!("Delete '{}'?", target))
        .default(false)
        .interact()
        .unwrap_or(false)
}
