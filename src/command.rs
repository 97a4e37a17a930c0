//! Parsing of raw input lines into typed commands.

use crate::types::TaskInput;
use chrono::NaiveDate;

/// One parsed command, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(TaskInput),
    Update { id: i64, input: TaskInput },
    Delete { id: i64 },
    List,
    Export,
    Help,
    Exit,
}

/// Why a line failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnknownCommand(String),
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    BadId(String),
    BadDate(String),
    BadQuoting(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownCommand(name) => {
                write!(f, "unknown command '{}' (try 'help')", name)
            }
            ParseError::WrongArity {
                command,
                expected,
                got,
            } => write!(f, "'{}' takes {} argument(s), got {}", command, expected, got),
            ParseError::BadId(token) => write!(f, "'{}' is not a numeric id", token),
            ParseError::BadDate(token) => write!(f, "'{}' is not a YYYY-MM-DD date", token),
            ParseError::BadQuoting(message) => write!(f, "unbalanced quotes: {}", message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  add <title> <description> <due_date> <status_id> <priority_id> <category_id>
  update <id> <title> <description> <due_date> <status_id> <priority_id> <category_id>
  delete <id>
  list
  export
  help
  exit

Quote arguments that contain spaces. Dates are YYYY-MM-DD. Pass - in the
description, date, or id positions to leave them unset.";

/// Parse one raw input line. `Ok(None)` means the line was blank.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens =
        shell_words::split(line).map_err(|e| ParseError::BadQuoting(e.to_string()))?;
    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name.as_str() {
        "add" => {
            expect_arity("add", 6, args)?;
            Command::Add(parse_input(args)?)
        }
        "update" => {
            expect_arity("update", 7, args)?;
            Command::Update {
                id: parse_id(&args[0])?,
                input: parse_input(&args[1..])?,
            }
        }
        "delete" => {
            expect_arity("delete", 1, args)?;
            Command::Delete {
                id: parse_id(&args[0])?,
            }
        }
        "list" => {
            expect_arity("list", 0, args)?;
            Command::List
        }
        "export" => {
            expect_arity("export", 0, args)?;
            Command::Export
        }
        "help" => {
            expect_arity("help", 0, args)?;
            Command::Help
        }
        "exit" => {
            expect_arity("exit", 0, args)?;
            Command::Exit
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn expect_arity(command: &'static str, expected: usize, args: &[String]) -> Result<(), ParseError> {
    if args.len() != expected {
        return Err(ParseError::WrongArity {
            command,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn parse_id(token: &str) -> Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::BadId(token.to_string()))
}

/// Parse the six positional task fields: title, description, due date, and
/// the three lookup ids.
fn parse_input(args: &[String]) -> Result<TaskInput, ParseError> {
    let due_date = match optional(&args[2]) {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ParseError::BadDate(raw.to_string()))?,
        ),
        None => None,
    };

    Ok(TaskInput {
        title: args[0].clone(),
        description: optional(&args[1]).map(str::to_string),
        due_date,
        status_id: optional_id(&args[3])?,
        priority_id: optional_id(&args[4])?,
        category_id: optional_id(&args[5])?,
    })
}

/// `-` and the empty string denote an absent value.
fn optional(token: &str) -> Option<&str> {
    match token {
        "" | "-" => None,
        other => Some(other),
    }
}

fn optional_id(token: &str) -> Result<Option<i64>, ParseError> {
    optional(token).map(parse_id).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let command = parse(r#"add "Buy milk" "2%, one gallon" 2024-12-01 1 2 1"#)
            .unwrap()
            .unwrap();

        let Command::Add(input) = command else {
            panic!("expected Add, got {:?}", command);
        };
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, Some("2%, one gallon".to_string()));
        assert_eq!(input.due_date, NaiveDate::from_ymd_opt(2024, 12, 1));
        assert_eq!(input.status_id, Some(1));
        assert_eq!(input.priority_id, Some(2));
        assert_eq!(input.category_id, Some(1));
    }

    #[test]
    fn test_parse_add_with_absent_fields() {
        let command = parse("add Title - - - - -").unwrap().unwrap();

        let Command::Add(input) = command else {
            panic!("expected Add, got {:?}", command);
        };
        assert_eq!(input.title, "Title");
        assert_eq!(input.description, None);
        assert_eq!(input.due_date, None);
        assert_eq!(input.status_id, None);
        assert_eq!(input.priority_id, None);
        assert_eq!(input.category_id, None);
    }

    #[test]
    fn test_parse_update() {
        let command = parse(r#"update 3 "New title" desc 2025-01-15 2 1 3"#)
            .unwrap()
            .unwrap();

        let Command::Update { id, input } = command else {
            panic!("expected Update, got {:?}", command);
        };
        assert_eq!(id, 3);
        assert_eq!(input.title, "New title");
        assert_eq!(input.status_id, Some(2));
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(parse("delete 7").unwrap(), Some(Command::Delete { id: 7 }));
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse("list").unwrap(), Some(Command::List));
        assert_eq!(parse("export").unwrap(), Some(Command::Export));
        assert_eq!(parse("help").unwrap(), Some(Command::Help));
        assert_eq!(parse("exit").unwrap(), Some(Command::Exit));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse("bogus"),
            Err(ParseError::UnknownCommand("bogus".to_string()))
        );
    }

    #[test]
    fn test_parse_wrong_arity() {
        assert_eq!(
            parse("add Title"),
            Err(ParseError::WrongArity {
                command: "add",
                expected: 6,
                got: 1
            })
        );
        assert_eq!(
            parse("delete"),
            Err(ParseError::WrongArity {
                command: "delete",
                expected: 1,
                got: 0
            })
        );
        assert_eq!(
            parse("list extra"),
            Err(ParseError::WrongArity {
                command: "list",
                expected: 0,
                got: 1
            })
        );
    }

    #[test]
    fn test_parse_bad_id() {
        assert_eq!(parse("delete seven"), Err(ParseError::BadId("seven".to_string())));
        assert_eq!(
            parse("add Title - - one - -"),
            Err(ParseError::BadId("one".to_string()))
        );
    }

    #[test]
    fn test_parse_bad_date() {
        assert_eq!(
            parse("add Title - tomorrow - - -"),
            Err(ParseError::BadDate("tomorrow".to_string()))
        );
    }

    #[test]
    fn test_parse_unbalanced_quotes() {
        assert!(matches!(
            parse(r#"add "Unterminated"#),
            Err(ParseError::BadQuoting(_))
        ));
    }
}
