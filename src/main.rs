//! Guppy - A Minimal In-Memory Key-Value Database
//!
//! This is the main entry point for the Guppy shell.
//! It sets up logging, builds the database and runs the read loop on
//! stdin/stdout until the input ends or Ctrl+C is pressed.

use guppy::database::Database;
use guppy::protocol::Parser;
use guppy::shell::{Shell, ShellError, ShellOptions, ShellStats, DEFAULT_MAX_LINE};
use guppy::storage::Engine;
use std::future::Future;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Shell configuration
struct Config {
    /// Log filter used when RUST_LOG is not set
    log_level: String,
    /// Prompt written before each line (None = no prompt)
    prompt: Option<String>,
    /// Skip the banner and greeting
    quiet: bool,
    /// Longest accepted input line in bytes
    max_line: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            prompt: Some(">>> ".to_string()),
            quiet: false,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--log-level" | "-l" => {
                    if i + 1 < args.len() {
                        config.log_level = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --log-level requires a value");
                        std::process::exit(1);
                    }
                }
                "--prompt" => {
                    if i + 1 < args.len() {
                        config.prompt = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        eprintln!("Error: --prompt requires a value");
                        std::process::exit(1);
                    }
                }
                "--no-prompt" => {
                    config.prompt = None;
                    i += 1;
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                    i += 1;
                }
                "--max-line" => {
                    if i + 1 < args.len() {
                        config.max_line = match args[i + 1].parse() {
                            Ok(n) if n > 0 => n,
                            _ => {
                                eprintln!("Error: invalid line length");
                                std::process::exit(1);
                            }
                        };
                        i += 2;
                    } else {
                        eprintln!("Error: --max-line requires a value");
                        std::process::exit(1);
                    }
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("Guppy version {}", guppy::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }

    /// Returns the shell options for this configuration
    fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            prompt: self.prompt.clone(),
            greeting: !self.quiet,
            max_line: self.max_line,
        }
    }
}

fn print_help() {
    println!(
        r#"
Guppy - A Minimal In-Memory Key-Value Database

USAGE:
    guppy [OPTIONS]

OPTIONS:
    -l, --log-level <LEVEL>  Log filter when RUST_LOG is unset (default: info)
        --prompt <TEXT>      Prompt written before each line (default: ">>> ")
        --no-prompt          Do not write a prompt
    -q, --quiet              Do not print the banner and greeting
        --max-line <BYTES>   Longest accepted input line (default: 65536)
    -v, --version            Print version information
    -h, --help               Print this help message

COMMANDS:
    SET <key> <value>        Store a value, replies OK
    GET <key>                Print the value of a key
    DEL <key>                Remove a key, replies OK

    Keys and values may contain ASCII letters, digits, '*', '/' and '_'.

EXAMPLE:
    $ guppy
    Enter query:
    >>> SET weather_2_pm cold
    OK
    >>> GET weather_2_pm
    cold
"#
    );
}

fn print_banner() {
    eprintln!(
        r#"
Guppy v{} - Minimal In-Memory Key-Value Database
──────────────────────────────────────────────────────────────
Logs go to stderr. Press Ctrl+D to end input, Ctrl+C to quit.
"#,
        guppy::VERSION
    );
}

/// Why the shell stopped
#[derive(Debug, PartialEq, Eq)]
enum Stop {
    /// The input stream ended
    EndOfInput,
    /// The interrupt future completed first
    Interrupted,
}

/// Runs the shell until its input ends or `interrupt` completes.
async fn run_shell<R, W, P, E, F>(
    shell: &mut Shell<R, W, P, E>,
    interrupt: F,
) -> Result<Stop, ShellError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    P: Parser,
    E: Engine,
    F: Future,
{
    tokio::select! {
        result = shell.run() => result.map(|()| Stop::EndOfInput),
        _ = interrupt => {
            warn!("Interrupt received, stopping shell...");
            Ok(Stop::Interrupted)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args();

    // Set up logging on stderr; stdout carries replies only
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    if !config.quiet {
        print_banner();
    }

    // Create the database (in-memory engine, text parser)
    let database = Database::in_memory();
    info!("Database initialized with in-memory engine");

    let stats = Arc::new(ShellStats::new());
    let mut shell = Shell::new(
        tokio::io::stdin(),
        tokio::io::stdout(),
        database,
        config.shell_options(),
        Arc::clone(&stats),
    );

    // Run until end of input or Ctrl+C
    let stop = run_shell(&mut shell, signal::ctrl_c()).await?;

    let storage = shell.database().engine().stats();
    info!(
        lines = stats.lines_read.load(Ordering::Relaxed),
        keys = storage.keys,
        sets = storage.set_ops,
        gets = storage.get_ops,
        dels = storage.del_ops,
        "Shell shutdown complete"
    );

    if stop == Stop::Interrupted {
        // A pending stdin read blocks runtime shutdown until the next line arrives
        std::process::exit(0);
    }
    Ok(())
}
