use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arena-bot")]
#[command(author, version, about = "Telegram menu bot for the Gladiator Arena game", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling
    Run,

    /// Register the command list with Telegram and exit
    SetCommands,

    /// Print the effective configuration (token redacted) and exit
    CheckConfig,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["arena-bot"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["arena-bot", "run"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Run));

        let cli = Cli::try_parse_from(["arena-bot", "set-commands"]).unwrap();
        assert_eq!(cli.command, Some(Commands::SetCommands));

        let cli = Cli::try_parse_from(["arena-bot", "check-config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::CheckConfig));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["arena-bot", "download"]).is_err());
    }
}
