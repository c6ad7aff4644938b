//! Console commands standing in for the page's DOM events.

use std::time::Duration;

use admin_core::Msg;

pub const HELP: &str = "\
search <text>        type into the search box (empty text clears it)
enter                press Enter in the search box
search-click         click the search button
select-all on|off    toggle the select-all checkbox
toggle <row> on|off  toggle a row checkbox (rows count from 1)
bulk-delete          click bulk delete
clear                clear the selection
delete <url> [name]  click a delete trigger
confirm | cancel     answer the confirmation dialog
lookup <field> <t>   type into a remote dropdown (fields count from 1)
dismiss <id>         close a notification
wait <ms>            let timers and requests run
view | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Page(Msg),
    Wait(Duration),
    View,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("expected on or off, got `{0}`")]
    InvalidSwitch(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_start();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line.trim_end(), ""),
    };

    let msg = match name {
        "" | "view" => return Ok(Command::View),
        "help" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "wait" => {
            let ms = number(require(rest, "wait", "milliseconds")?)?;
            return Ok(Command::Wait(Duration::from_millis(ms as u64)));
        }
        "search" => Msg::SearchInput(rest.to_string()),
        "enter" => Msg::SearchEnter,
        "search-click" => Msg::SearchButtonClicked,
        "select-all" => Msg::SelectAllToggled(switch(require(rest, "select-all", "on or off")?)?),
        "toggle" => {
            let (row, state) = require(rest, "toggle", "a row and on or off")?
                .split_once(char::is_whitespace)
                .ok_or(CommandError::MissingArgument {
                    command: "toggle",
                    argument: "on or off",
                })?;
            let row = number(row)?;
            if row == 0 {
                return Err(CommandError::InvalidNumber(row.to_string()));
            }
            Msg::RowToggled {
                index: row - 1,
                checked: switch(state.trim())?,
            }
        }
        "bulk-delete" => Msg::BulkDeleteClicked,
        "clear" => Msg::ClearSelection,
        "delete" => {
            let rest = require(rest, "delete", "a url")?;
            let (url, name) = match rest.split_once(char::is_whitespace) {
                Some((url, name)) => (url, Some(name.trim().to_string())),
                None => (rest, None),
            };
            Msg::DeleteTriggerClicked {
                url: url.to_string(),
                item_name: name,
            }
        }
        "confirm" => Msg::ConfirmClicked,
        "cancel" => Msg::CancelClicked,
        "lookup" => {
            let rest = require(rest, "lookup", "a field")?;
            let (field, term) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = number(field)?;
            if field == 0 {
                return Err(CommandError::InvalidNumber(field.to_string()));
            }
            Msg::RemoteTermTyped {
                field: field - 1,
                term: term.trim_start().to_string(),
            }
        }
        "dismiss" => Msg::NotificationClosed(number(require(rest, "dismiss", "an id")?)? as u64),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Page(msg))
}

fn require<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

fn number(text: &str) -> Result<usize, CommandError> {
    text.trim()
        .parse()
        .map_err(|_| CommandError::InvalidNumber(text.trim().to_string()))
}

fn switch(text: &str) -> Result<bool, CommandError> {
    match text {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(CommandError::InvalidSwitch(other.to_string())),
    }
}
