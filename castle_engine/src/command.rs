//! Command module
//!
//! Describes possible commands used during gameplay.
use variantly::Variantly;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    Drop(String),
    Exit,
    /// `go` alone lists the open directions.
    Go(Option<String>),
    Help,
    /// A single word that is not a command on its own.
    Incomplete,
    Interact(String),
    Look,
    Pick(String),
    Restart,
    Save,
    Status,
    Unknown,
    UseItem(String),
}

/// Parses an input string and returns a corresponding `Command` if recognized.
///
/// Matching is case-insensitive. Item and direction commands take the second word
/// as their argument and ignore anything after it.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        [] => Command::Unknown,
        ["exit"] | ["exit", "game"] => Command::Exit,
        ["restart"] | ["restart", "game"] => Command::Restart,
        ["help"] => Command::Help,
        ["save"] | ["save", "game"] | ["sv"] => Command::Save,
        ["status" | "st"] => Command::Status,
        ["look"] | ["look", "around"] | ["lk"] => Command::Look,
        ["go"] => Command::Go(None),
        ["go", dir, ..] => Command::Go(Some((*dir).to_string())),
        [_] => Command::Incomplete,
        ["pick" | "pk", thing, ..] => Command::Pick((*thing).to_string()),
        ["drop" | "dp", thing, ..] => Command::Drop((*thing).to_string()),
        ["interact" | "ic", thing, ..] => Command::Interact((*thing).to_string()),
        ["use", thing, ..] => Command::UseItem((*thing).to_string()),
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_and_their_aliases() {
        assert_eq!(parse_command("EXIT game"), Command::Exit);
        assert_eq!(parse_command("restart"), Command::Restart);
        assert_eq!(parse_command("sv"), Command::Save);
        assert_eq!(parse_command("save game"), Command::Save);
        assert_eq!(parse_command(" st "), Command::Status);
        assert_eq!(parse_command("look around"), Command::Look);
        assert_eq!(parse_command("lk"), Command::Look);
        assert_eq!(parse_command("pk Key"), Command::Pick("key".into()));
        assert_eq!(parse_command("dp sword"), Command::Drop("sword".into()));
        assert_eq!(parse_command("ic carpet"), Command::Interact("carpet".into()));
        assert_eq!(parse_command("use key"), Command::UseItem("key".into()));
    }

    #[test]
    fn go_with_and_without_direction() {
        assert_eq!(parse_command("go"), Command::Go(None));
        assert_eq!(parse_command("go North"), Command::Go(Some("north".into())));
        assert_eq!(parse_command("go back"), Command::Go(Some("back".into())));
    }

    #[test]
    fn bare_verbs_are_incomplete() {
        assert!(parse_command("pick").is_incomplete());
        assert!(parse_command("interact").is_incomplete());
        assert!(parse_command("xyzzy").is_incomplete());
    }

    #[test]
    fn anything_else_is_unknown() {
        assert!(parse_command("").is_unknown());
        assert!(parse_command("dance with the armour").is_unknown());
        assert!(parse_command("look at note").is_unknown());
    }
}
