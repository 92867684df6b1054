use std::str::FromStr;

use medguide_models::reminder::{NewReminder, ReminderId};
use thiserror::Error;

pub const HELP: &str = "These commands are supported:
/add <name> | <HH:MM> | <once|daily|alternate> - add a medicine reminder
/list - show your medicine reminders
/delete <id> - remove a reminder
/lookup <medicine> - fetch reported side effects from OpenFDA
/suggest <text> - suggest medicine names
/analysis <medicine> - show a short analysis summary
/help - show this message
/quit - save and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Add(NewReminder),
    List,
    Delete(ReminderId),
    Lookup(String),
    Suggest(String),
    Analysis(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Unable to handle the message. Commands start with \"/\", type /help to see them.")]
    NotACommand,
    #[error("Unknown command /{0}. Type /help to see the supported commands.")]
    UnknownCommand(String),
    #[error("Please provide {0}.")]
    MissingArgument(&'static str),
}

impl FromStr for ConsoleCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Err(CommandParseError::NotACommand);
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "add" => Ok(ConsoleCommand::Add(parse_new_reminder(argument))),
            "list" => Ok(ConsoleCommand::List),
            "delete" if argument.is_empty() => Err(CommandParseError::MissingArgument(
                "the id of the reminder to delete",
            )),
            "delete" => Ok(ConsoleCommand::Delete(ReminderId::from(argument))),
            "lookup" => Ok(ConsoleCommand::Lookup(argument.to_owned())),
            "suggest" => Ok(ConsoleCommand::Suggest(argument.to_owned())),
            "analysis" if argument.is_empty() => {
                Err(CommandParseError::MissingArgument("a medicine name"))
            }
            "analysis" => Ok(ConsoleCommand::Analysis(argument.to_owned())),
            "help" | "start" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(CommandParseError::UnknownCommand(other.to_owned())),
        }
    }
}

/// Missing parts stay empty so the store reports which field is wrong.
fn parse_new_reminder(argument: &str) -> NewReminder {
    let mut parts = argument.splitn(3, '|').map(str::trim);
    NewReminder::new(
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    )
}
