use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Personal task scheduler with repeating tasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve(ServeCommand),
    /// Print the next date of a repeat rule
    Next(NextCommand),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeCommand {
    /// Port to listen on
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Path of the SQLite database file
    #[clap(long)]
    pub db: Option<String>,
    /// Directory with the static front-end
    #[clap(long)]
    pub web_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// Start date (YYYYMMDD)
    #[clap(short, long)]
    pub date: String,
    /// Repeat rule, e.g. "d 7", "w 1,3", "m -1", "y"
    #[clap(short, long)]
    pub repeat: String,
    /// Reference day (YYYYMMDD), defaults to today in the configured timezone
    #[clap(short, long)]
    pub now: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["scheduler"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["scheduler", "serve", "--port", "8081", "--db", "x.db"]).unwrap();
        match cli.command {
            Some(Commands::Serve(cmd)) => {
                assert_eq!(cmd.port, Some(8081));
                assert_eq!(cmd.db.as_deref(), Some("x.db"));
                assert!(cmd.web_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_next_requires_date_and_repeat() {
        assert!(Cli::try_parse_from(["scheduler", "next", "--date", "20240101"]).is_err());
        let cli = Cli::try_parse_from([
            "scheduler", "next", "--date", "20240101", "--repeat", "d 7", "--now", "20240315",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Next(cmd)) => {
                assert_eq!(cmd.repeat, "d 7");
                assert_eq!(cmd.now.as_deref(), Some("20240315"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
