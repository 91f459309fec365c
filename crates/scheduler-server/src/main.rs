use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use scheduler_core::dates::parse_date;
use scheduler_core::error::{CoreError, RecurrenceError};
use scheduler_core::recurrence::next_date;
use scheduler_core::timezone::today_in;
use scheduler_server::cli::{Cli, Commands, NextCommand, ServeCommand};
use scheduler_server::config::Config;
use scheduler_server::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Serve(ServeCommand::default())) {
        Commands::Serve(command) => run_server(command).await,
        Commands::Next(command) => print_next_date(command),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run_server(command: ServeCommand) -> anyhow::Result<()> {
    let mut config = Config::new().context("failed to load configuration")?;
    if let Some(port) = command.port {
        config.port = port;
    }
    if let Some(db) = command.db {
        config.db_file = db;
    }
    if let Some(web_dir) = command.web_dir {
        config.web_dir = web_dir;
    }
    server::serve(config).await
}

fn print_next_date(command: NextCommand) -> anyhow::Result<()> {
    let today = match command.now.as_deref() {
        Some(now) => parse_date(now)?,
        None => {
            let config = Config::new().context("failed to load configuration")?;
            today_in(&config.tz()?)
        }
    };
    println!("{}", next_date(today, &command.date, &command.repeat)?);
    Ok(())
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(rule_error) = err.downcast_ref::<RecurrenceError>() {
        eprintln!("{} {}", "Error:".style(error_style), rule_error);
        return;
    }

    match err.downcast_ref::<CoreError>() {
        Some(e @ (CoreError::InvalidTimezone(_) | CoreError::Recurrence(_))) => {
            eprintln!("{} {}", "Error:".style(error_style), e.yellow());
        }
        Some(CoreError::Database(e)) => {
            eprintln!("{} Database error: {}", "Error:".style(error_style), e);
        }
        _ => {
            eprintln!("{} {:#}", "Error:".style(error_style), err);
        }
    }
}
