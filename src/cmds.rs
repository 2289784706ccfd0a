use derive_more::Display;
use serde::Deserialize;

/// Navigation operations a key binding, a button or a command can trigger.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cmd {
    #[display(fmt = "prev-month")]
    PrevMonth,
    #[display(fmt = "next-month")]
    NextMonth,
    #[display(fmt = "prev-year")]
    PrevYear,
    #[display(fmt = "next-year")]
    NextYear,
    #[display(fmt = "today")]
    Today,
    #[display(fmt = "exit")]
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_name(name: &str) -> Result<Cmd, toml::de::Error> {
        Cmd::deserialize(toml::Value::String(name.to_owned()))
    }

    #[test]
    fn names_match_display() {
        for cmd in [
            Cmd::PrevMonth,
            Cmd::NextMonth,
            Cmd::PrevYear,
            Cmd::NextYear,
            Cmd::Today,
            Cmd::Exit,
        ] {
            assert_eq!(from_name(&cmd.to_string()).unwrap(), cmd);
        }
    }

    #[test]
    fn unknown_name() {
        assert!(from_name("backwards").is_err());
    }
}
