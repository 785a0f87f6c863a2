use std::fmt;
use std::str::FromStr;

/// Closed vocabulary carried on the bus, one token per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ShowDashboard,
    ConnectBrain,
    ConnectGuard,
    ShowLogs,
    ShowTimemachine,
    ShowSettings,
    Disconnect,
    Exit,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::ShowDashboard,
        Command::ConnectBrain,
        Command::ConnectGuard,
        Command::ShowLogs,
        Command::ShowTimemachine,
        Command::ShowSettings,
        Command::Disconnect,
        Command::Exit,
    ];

    /// Wire token for this command.
    pub const fn as_str(self) -> &'static str {
        match self {
            Command::ShowDashboard => "SHOW_DASHBOARD",
            Command::ConnectBrain => "CONNECT_BRAIN",
            Command::ConnectGuard => "CONNECT_GUARD",
            Command::ShowLogs => "SHOW_LOGS",
            Command::ShowTimemachine => "SHOW_TIMEMACHINE",
            Command::ShowSettings => "SHOW_SETTINGS",
            Command::Disconnect => "DISCONNECT",
            Command::Exit => "EXIT",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, UnknownCommand};

    #[test]
    fn every_token_parses_back_to_its_command() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn parsing_is_case_sensitive_and_exact() {
        assert_eq!(
            "show_logs".parse::<Command>(),
            Err(UnknownCommand("show_logs".to_string()))
        );
        assert!(" EXIT".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }
}
