//! Interactive session commands

use std::str::FromStr;

use thiserror::Error;

/// One line of user input in a panel session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    /// Edit the bag name field
    Name(String),
    /// Edit the output directory field
    Dir(String),
    /// Check a topic
    Check(String),
    /// Uncheck a topic
    Uncheck(String),
    /// Flip a topic's checkbox
    Toggle(String),
    Start,
    Stop,
    /// Press the start/stop button
    Record,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}

impl FromStr for PanelCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.is_empty() {
            return Err(CommandParseError::Empty);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            // Text fields may be cleared, so an empty argument is allowed
            "name" => Ok(Self::Name(rest.to_string())),
            "dir" => Ok(Self::Dir(rest.to_string())),
            "check" => topic_argument("check", rest).map(Self::Check),
            "uncheck" => topic_argument("uncheck", rest).map(Self::Uncheck),
            "toggle" => topic_argument("toggle", rest).map(Self::Toggle),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "record" => Ok(Self::Record),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

fn topic_argument(command: &'static str, rest: &str) -> Result<String, CommandParseError> {
    if rest.is_empty() {
        return Err(CommandParseError::MissingArgument {
            command,
            expected: "a topic name",
        });
    }
    Ok(rest.to_string())
}

/// Help text for the session
pub const SESSION_HELP: &str = "\
Commands:
  name <text>      Set the bag name
  dir <path>       Set the output directory
  check <topic>    Select a topic for recording
  uncheck <topic>  Deselect a topic
  toggle <topic>   Flip a topic's selection
  start            Start recording
  stop             Stop recording
  record           Start or stop, like the panel button
  show             Print the panel
  help             Show this help
  quit             Leave the session";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_edits() {
        assert_eq!(
            "name field_run".parse(),
            Ok(PanelCommand::Name("field_run".to_string()))
        );
        assert_eq!(
            "dir  /data/bags ".parse(),
            Ok(PanelCommand::Dir("/data/bags".to_string()))
        );
    }

    #[test]
    fn parse_field_edit_can_clear() {
        assert_eq!("name".parse(), Ok(PanelCommand::Name(String::new())));
    }

    #[test]
    fn parse_topic_commands() {
        assert_eq!(
            "check /imu/data".parse(),
            Ok(PanelCommand::Check("/imu/data".to_string()))
        );
        assert_eq!(
            "uncheck /tf".parse(),
            Ok(PanelCommand::Uncheck("/tf".to_string()))
        );
        assert_eq!(
            "toggle /odom".parse(),
            Ok(PanelCommand::Toggle("/odom".to_string()))
        );
    }

    #[test]
    fn parse_topic_commands_require_topic() {
        assert_eq!(
            "check".parse::<PanelCommand>(),
            Err(CommandParseError::MissingArgument {
                command: "check",
                expected: "a topic name",
            })
        );
    }

    #[test]
    fn parse_simple_commands_case_insensitive() {
        assert_eq!("START".parse(), Ok(PanelCommand::Start));
        assert_eq!("stop".parse(), Ok(PanelCommand::Stop));
        assert_eq!("record".parse(), Ok(PanelCommand::Record));
        assert_eq!("show".parse(), Ok(PanelCommand::Show));
        assert_eq!("?".parse(), Ok(PanelCommand::Help));
        assert_eq!("exit".parse(), Ok(PanelCommand::Quit));
    }

    #[test]
    fn parse_rejects_empty_and_unknown() {
        assert_eq!("   ".parse::<PanelCommand>(), Err(CommandParseError::Empty));
        assert_eq!(
            "launch".parse::<PanelCommand>(),
            Err(CommandParseError::Unknown("launch".to_string()))
        );
    }
}
