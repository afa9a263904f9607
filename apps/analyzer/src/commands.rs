//! Line commands accepted by `analyzer interactive`.

use anyhow::{anyhow, Result};
use shared::domain::CommitmentId;
use view_state::Selection;

pub const HELP: &str = "\
commands:
  company <name>      select a company (no name clears the selection)
  commitment <id>     select a commitment of the current company
  show                print the current view again
  help                print this help
  quit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    SelectCompany(Selection<String>),
    SelectCommitment(Selection<CommitmentId>),
    Show,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "company" => Ok(Self::SelectCompany(
                Some(rest.to_string()).filter(|name| !name.is_empty()).into(),
            )),
            "commitment" => {
                if rest.is_empty() {
                    return Ok(Self::SelectCommitment(Selection::Unselected));
                }
                let id = rest
                    .parse::<i64>()
                    .map_err(|_| anyhow!("commitment id must be a number, got '{rest}'"))?;
                Ok(Self::SelectCommitment(Selection::Selected(CommitmentId(id))))
            }
            "" | "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(anyhow!("unknown command '{other}'; type 'help'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_name_keeps_inner_spaces() {
        assert_eq!(
            ConsoleCommand::parse("  company   Tyrell Corp  ").expect("parse"),
            ConsoleCommand::SelectCompany(Selection::Selected("Tyrell Corp".to_string()))
        );
    }

    #[test]
    fn bare_verbs_clear_selection() {
        assert_eq!(
            ConsoleCommand::parse("company").expect("parse"),
            ConsoleCommand::SelectCompany(Selection::Unselected)
        );
        assert_eq!(
            ConsoleCommand::parse("commitment").expect("parse"),
            ConsoleCommand::SelectCommitment(Selection::Unselected)
        );
    }

    #[test]
    fn commitment_id_must_be_numeric() {
        assert_eq!(
            ConsoleCommand::parse("commitment 8").expect("parse"),
            ConsoleCommand::SelectCommitment(Selection::Selected(CommitmentId(8)))
        );
        let err = ConsoleCommand::parse("commitment eight").expect_err("must fail");
        assert!(err.to_string().contains("eight"));
    }

    #[test]
    fn recognizes_control_verbs() {
        assert_eq!(ConsoleCommand::parse("").expect("parse"), ConsoleCommand::Show);
        assert_eq!(ConsoleCommand::parse("SHOW").expect("parse"), ConsoleCommand::Show);
        assert_eq!(ConsoleCommand::parse("?").expect("parse"), ConsoleCommand::Help);
        assert_eq!(ConsoleCommand::parse("exit").expect("parse"), ConsoleCommand::Quit);
        assert!(ConsoleCommand::parse("refresh").is_err());
    }
}
