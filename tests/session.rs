use std::{io::Cursor, sync::Arc};

use minifs::{
    disk::{FileDisk, BLOCK_SIZE},
    fs::{config::Geometry, FileSystemManager},
    server::session::{Session, SessionState},
};

fn manager() -> Arc<FileSystemManager> {
    let file = tempfile::tempfile().unwrap();
    file.set_len(10 * BLOCK_SIZE as u64).unwrap();
    let fs = FileSystemManager::new(Box::new(FileDisk::new(file, 10)), Geometry::default());
    Arc::new(fs.unwrap())
}

fn run_session(input: &str, fs: Arc<FileSystemManager>) -> (Vec<String>, SessionState) {
    let mut out = Vec::new();
    let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), &mut out, fs);
    session.run().unwrap();
    let state = session.state();
    drop(session);

    let text = String::from_utf8(out).unwrap();
    (text.lines().map(str::to_string).collect(), state)
}

#[test]
fn end_to_end_scenario() {
    let input = "CREATE alpha\nWRITE alpha hello world\nREAD alpha\nDELETE alpha\nREAD alpha\n";
    let (lines, state) = run_session(input, manager());

    assert_eq!(
        lines,
        vec![
            "Welcome to the File Server!",
            "Commands: CREATE <file>, WRITE <file> <data>, READ <file>, DELETE <file>, LIST, EXIT",
            "File created: alpha",
            "Wrote data to: alpha",
            "File content: hello world",
            "File deleted: alpha",
            "Error: File not found.",
        ]
    );
    assert_eq!(state, SessionState::Closed);
}

#[test]
fn exit_stops_reading_further_commands() {
    let (lines, state) = run_session("EXIT\nCREATE never\n", manager());
    assert_eq!(lines.last().unwrap(), "Closing connection...");
    assert_eq!(lines.len(), 3);
    assert_eq!(state, SessionState::Closed);
}

#[test]
fn errors_and_unknown_commands_keep_session_open() {
    let input = "FORMAT\nCREATE averylongname\nCREATE ok\r\nLIST\n";
    let (lines, _) = run_session(input, manager());

    assert_eq!(
        &lines[2..],
        &[
            "Unknown command: FORMAT",
            "Error: Filename too long (max 11 characters)",
            "File created: ok",
            "Listing files:",
            " - ok (0 bytes)",
            "(End of list)",
        ]
    );
}

#[test]
fn sessions_share_one_store() {
    let fs = manager();
    run_session("CREATE shared\nWRITE shared from one\n", Arc::clone(&fs));
    let (lines, _) = run_session("READ shared\n", fs);
    assert_eq!(lines[2], "File content: from one");
}

#[test]
fn usage_reply_for_missing_arguments() {
    let (lines, _) = run_session("WRITE alpha\nREAD\n", manager());
    assert_eq!(
        &lines[2..],
        &["Usage: WRITE <filename> <data>", "Usage: READ <filename>"]
    );
}

#[test]
fn empty_filename_reaches_file_system() {
    let (lines, _) = run_session("WRITE  alpha x\nCREATE  alpha\n", manager());
    assert_eq!(&lines[2..], &["Error: File not found.", "Error: Invalid filename"]);
}
