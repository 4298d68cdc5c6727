// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! CLI tool for experimenting with fixed-capacity maps

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use humansize::{SizeFormatter, BINARY};
use llmap::{Config, LongLongMap, SliceMemory};
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::LazyLock;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};

    () => {{
        eprintln!("Program terminated unexpectedly");
        std::process::exit(1);
    }};
}

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

pub fn init_tracing(quiet: bool, verbose: u8) -> (bool, LevelFilter) {
    let is_verbose = !quiet && verbose > 0;

    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Bridge log crate macros to tracing (for library code that uses log::*)
    tracing_log::LogTracer::init().expect("Failed to set log tracer");

    let registry = Registry::default();

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("LLMAP_LOG")
        .from_env_lossy()
        .add_directive(
            "rustyline=warn"
                .parse()
                .expect("Failed to parse rustyline directive"),
        );

    let subscriber = registry.with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info); // daisy-chain to old panic hook
    }));

    (is_verbose, level_filter)
}

fn parse_region_size(s: &str) -> Result<u64, String> {
    let cfg = parse_size::Config::new().with_binary();
    cfg.parse_size(s).map_err(|e| e.to_string())
}

const DEFAULT_REGION_SIZE: u64 = /* 1 MiB */ 1_024 * 1_024;

static DEFAULT_REGION_SIZE_STR: LazyLock<String> =
    LazyLock::new(|| SizeFormatter::new(DEFAULT_REGION_SIZE, BINARY).to_string());

/// CLI tool for experimenting with fixed-capacity maps
#[derive(Parser, Debug)]
#[command(name = "llmap")]
#[command(about = "CLI tool for experimenting with fixed-capacity maps")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Size of the memory region backing the map (e.g., "64KiB", "1024")
    #[arg(
        short = 's', long,
        default_value = &**DEFAULT_REGION_SIZE_STR,
        value_parser = parse_region_size,
        value_name = "SIZE",
    )]
    region_size: u64,

    /// Command to run (if omitted, starts interactive shell)
    #[command(subcommand)]
    command: Option<ToolCommand>,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Get the value for a key
    Get {
        /// The key to look up
        #[arg(allow_hyphen_values = true)]
        key: i64,
    },
    /// Store a value for a key
    #[command(visible_alias = "set")]
    Put {
        /// The key to store
        #[arg(allow_hyphen_values = true)]
        key: i64,
        /// The value to store
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Insert consecutive keys (value = key) and read them back
    Fill {
        /// Number of keys to insert
        count: u64,

        /// First key to insert
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        start: i64,
    },
    /// Show map statistics
    Info,
}

// Internal shell commands, include all external tool commands
#[derive(Parser, Debug)]
#[command(name = "")]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "
{version}

Available Commands:

{subcommands}

Use `help COMMAND` or `COMMAND --help` for more details.

")]

struct ShellArgs {
    #[command(subcommand)]
    command: ShellCommand,
}

// Shell commands (including ones not available from CLI)
#[derive(Subcommand, Debug, Clone)]
enum ShellCommand {
    #[command(flatten)]
    ToolCmd(ToolCommand),

    /// Zero the region, dropping all entries
    Clear,
    /// Exit the current shell
    #[command(visible_alias = "quit")]
    Exit,
}

struct Session {
    map: LongLongMap<SliceMemory<Vec<u8>>>,
}

impl Session {
    fn open(region_size: u64) -> llmap::Result<Self> {
        let Ok(len) = usize::try_from(region_size) else {
            die!("Region of {} bytes does not fit into memory", region_size);
        };

        // The tool plays the caller: it allocates the region and hands it to the map
        let memory = SliceMemory::new(vec![0u8; len]);
        let map = Config::new(0, region_size).open(memory)?;

        Ok(Self { map })
    }

    fn clear(&mut self) -> llmap::Result<()> {
        *self = Self::open(self.map.region_size())?;
        Ok(())
    }
}

fn print_info(session: &Session) {
    let map = &session.map;

    println!(
        "Region size: {} ({} bytes)",
        SizeFormatter::new(map.region_size(), BINARY),
        map.region_size()
    );
    println!("Capacity: {} slots", map.capacity());
    println!("Occupied slots: {}", map.occupied_slots());
    println!("Load factor: {:.2}%", map.load_factor() * 100.0);
}

fn handle_get(session: &Session, key: i64) {
    println!("{}", session.map.get(key));
}

fn handle_put(session: &mut Session, key: i64, value: i64) {
    match session.map.put(key, value) {
        Ok(prev) => println!("OK (previous: {prev})"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn handle_fill(session: &mut Session, count: u64, start: i64) {
    let before = std::time::Instant::now();

    let mut inserted = 0;
    let mut key = start;

    while inserted < count {
        if let Err(e) = session.map.put(key, key) {
            eprintln!("Error: {e} (after {inserted} inserts)");
            break;
        }
        inserted += 1;
        key = key.wrapping_add(1);
    }

    debug!("Inserted {inserted} keys in {:?}", before.elapsed());

    let mut mismatches = 0;
    let mut key = start;

    for _ in 0..inserted {
        let value = session.map.get(key);
        if value != key {
            warn!("Key {key} reads back as {value}");
            mismatches += 1;
        }
        key = key.wrapping_add(1);
    }

    println!("OK ({inserted} keys inserted, {mismatches} mismatches)");
}

/// Result of executing a command
enum CommandResult {
    Continue,
    Exit,
}

/// Execute a parsed command
fn execute_command(session: &mut Session, cmd: ToolCommand) -> CommandResult {
    match cmd {
        ToolCommand::Get { key } => handle_get(session, key),
        ToolCommand::Put { key, value } => handle_put(session, key, value),
        ToolCommand::Fill { count, start } => handle_fill(session, count, start),
        ToolCommand::Info => print_info(session),
    }
    CommandResult::Continue
}

/// Execute a shell-only command
fn execute_shell_command(session: &mut Session, cmd: ShellCommand) -> CommandResult {
    match cmd {
        ShellCommand::ToolCmd(tool_cmd) => execute_command(session, tool_cmd),
        ShellCommand::Clear => {
            match session.clear() {
                Ok(()) => println!("OK (cleared)"),
                Err(e) => eprintln!("Error: {e}"),
            }
            CommandResult::Continue
        }
        ShellCommand::Exit => CommandResult::Exit,
    }
}

/// Parse and run a shell command line
fn run_shell_command(session: &mut Session, line: &str) -> CommandResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandResult::Continue;
    }

    let tokens = match shlex::split(line) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return CommandResult::Continue,
        None => {
            eprintln!("error: unclosed quote");
            return CommandResult::Continue;
        }
    };

    match ShellArgs::try_parse_from(&tokens) {
        Ok(args) => execute_shell_command(session, args.command),
        Err(e) => {
            // Print clap's error message
            eprintln!("{}", e);
            CommandResult::Continue
        }
    }
}

fn run_shell(session: &mut Session) {
    if io::stdin().is_terminal() {
        run_shell_interactive(session);
    } else {
        run_shell_non_interactive(session);
    }
}

fn run_shell_interactive(session: &mut Session) {
    println!("Welcome to the llmap shell");
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline("llmap> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ignore Ctrl+C, just show a new prompt
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}

fn run_shell_non_interactive(session: &mut Session) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if stdout.flush().is_err() {
            die!("can't flush stdout");
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF
                break;
            }
            Ok(_) => {
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(e) => {
                die!("Error reading input: {}", e);
            }
        }
    }
}

fn main() {
    let args = ToolArgs::parse();
    let (verbose, level_filter) = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut session = match Session::open(args.region_size) {
        Ok(s) => s,
        Err(e) => {
            let note = if verbose {
                ""
            } else {
                ". Note: Use -v (one or multiple times) for more information"
            };
            die!("Error opening map: {}{}", e, note);
        }
    };

    match args.command {
        Some(cmd) => {
            execute_command(&mut session, cmd);
        }
        None => run_shell(&mut session),
    }
}
