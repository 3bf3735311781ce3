//! The interactive command loop.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use adhan_core::{next_prayer, Clock};

use crate::client::ScheduleSource;
use crate::table;

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch and report the next prayer.
    Next,
    /// Fetch and render the whole day as a table.
    All,
    /// Stop reading commands.
    Quit,
    /// Anything unrecognized, the empty line included.
    Invalid,
}

impl Command {
    /// Parses one input line. Surrounding whitespace is ignored;
    /// commands are case sensitive.
    pub fn parse(line: &str) -> Command {
        match line.trim() {
            "next" => Command::Next,
            "all" => Command::All,
            "q" => Command::Quit,
            _ => Command::Invalid,
        }
    }
}

/// What dispatching one command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text for stdout.
    Print(String),
    /// Nothing to print; the failure was already logged.
    Silent,
    /// Stop the loop.
    Quit,
}

/// Executes one command against the source. Fetch failures are logged
/// here and surface as [`Reply::Silent`] so the loop just re-prompts.
pub async fn execute(command: Command, source: &dyn ScheduleSource) -> Reply {
    match command {
        Command::Next => match source.fetch().await {
            Ok(schedule) => {
                let next = next_prayer(Clock::now_local(), &schedule);
                Reply::Print(format!(
                    "Next prayer: {}, Time: {}",
                    next.prayer.name(),
                    next.time
                ))
            }
            Err(e) => {
                warn!("failed to fetch prayer times: {e}");
                Reply::Silent
            }
        },
        Command::All => match source.fetch().await {
            Ok(schedule) => {
                let rows: Vec<Vec<String>> = schedule
                    .events()
                    .iter()
                    .map(|(prayer, time)| vec![prayer.name().to_owned(), time.to_string()])
                    .collect();
                Reply::Print(table::render(&["Prayer", "Time"], &rows))
            }
            Err(e) => {
                warn!("failed to fetch prayer times: {e}");
                Reply::Silent
            }
        },
        Command::Quit => Reply::Quit,
        Command::Invalid => Reply::Print("Invalid command".to_owned()),
    }
}

/// Prompts on stdout and dispatches commands until `q` or stdin EOF.
pub async fn run_repl(source: &dyn ScheduleSource) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("Enter a command (or 'q' to quit): ");
        io::stdout().flush().context("flushing the prompt")?;

        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .context("reading a command from stdin")?;
        if bytes_read == 0 {
            info!("stdin closed; quitting");
            return Ok(());
        }

        match execute(Command::parse(&line), source).await {
            Reply::Print(text) => println!("{text}"),
            Reply::Silent => {}
            Reply::Quit => return Ok(()),
        }
    }
}
