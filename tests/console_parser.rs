use qishou::console::{parse_console_command, ConsoleCommand};

#[test]
fn test_parse_moves() {
    assert_eq!(
        parse_console_command("h2e2"),
        ConsoleCommand::Move("h2e2".to_string())
    );
    assert_eq!(
        parse_console_command("move H2E2"),
        ConsoleCommand::Move("h2e2".to_string())
    );
    match parse_console_command("move") {
        ConsoleCommand::Unknown(s) => assert_eq!(s, "move"),
        other => panic!("Expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_parse_simple_commands() {
    assert_eq!(parse_console_command("undo"), ConsoleCommand::Undo);
    assert_eq!(parse_console_command("new"), ConsoleCommand::New);
    assert_eq!(parse_console_command("board"), ConsoleCommand::Board);
    assert_eq!(parse_console_command("fen"), ConsoleCommand::Fen);
    assert_eq!(parse_console_command("moves"), ConsoleCommand::Moves);
    assert_eq!(parse_console_command("go"), ConsoleCommand::Go);
    assert_eq!(parse_console_command("  quit  "), ConsoleCommand::Quit);
    assert_eq!(parse_console_command(""), ConsoleCommand::Empty);
}

#[test]
fn test_parse_settings() {
    assert_eq!(parse_console_command("depth 5"), ConsoleCommand::Depth(5));
    assert_eq!(
        parse_console_command("time 1500"),
        ConsoleCommand::TimeLimit(1500)
    );
    assert!(matches!(
        parse_console_command("depth 0"),
        ConsoleCommand::Unknown(_)
    ));
    assert!(matches!(
        parse_console_command("depth x"),
        ConsoleCommand::Unknown(_)
    ));
}

#[test]
fn test_parse_unknown() {
    match parse_console_command("castle kingside") {
        ConsoleCommand::Unknown(s) => assert_eq!(s, "castle kingside"),
        other => panic!("Expected Unknown, got {:?}", other),
    }
}
