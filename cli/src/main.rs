//! miaumon CLI — the command-line entry point for the dev monitor.
//!
//! # Usage
//!
//! ```text
//! miaumon              start the dashboard
//! miaumon check-log    print the most recent error block, if any
//! miaumon help
//! miaumon version
//! ```

use std::process;

use miaumon_core::config::MonitorConfig;
use miaumon_core::extract;
use miaumon_core::logtail;


/// Parsed CLI command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Launch the interactive dashboard (the default).
    Run,
    /// Headless extraction: read the configured log once, print the block.
    CheckLog { json: bool },
    Help,
    Version,
}


/// Parse CLI arguments into a command. Arguments are expected WITHOUT the
/// program name.
fn parse_args(args: &[&str]) -> Result<Command, String> {
    match args.first().copied() {
        None | Some("run") => Ok(Command::Run),
        Some("check-log") => Ok(Command::CheckLog {
            json: args[1..].contains(&"--json"),
        }),
        Some("help" | "--help" | "-h") => Ok(Command::Help),
        Some("version" | "--version") => Ok(Command::Version),
        Some(other) => Err(format!(
            "Unknown command: '{}'. Run 'miaumon help' for usage.",
            other
        )),
    }
}


fn main() {
    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("miaumon: {}", e);
            process::exit(2);
        }
    };

    match cmd {
        Command::Run => run_dashboard(),
        Command::CheckLog { json } => check_log(json),
        Command::Help => print_usage(),
        Command::Version => println!("miaumon {}", env!("CARGO_PKG_VERSION")),
    }
}


/// Start the TUI. A terminal that cannot enter raw mode is the one fatal
/// startup error; everything past that point degrades instead of failing.
fn run_dashboard() {
    let config = MonitorConfig::from_env();
    match miaumon_tui::runner::Monitor::new(config) {
        Ok(mut monitor) => {
            if let Err(e) = monitor.run() {
                eprintln!("miaumon: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("miaumon: failed to start: {}", e);
            process::exit(1);
        }
    }
}


/// Run the extraction engine once against the configured log and print the
/// result. "No error" is a normal outcome, not a failure exit.
fn check_log(json: bool) {
    let config = MonitorConfig::from_env();
    let content = logtail::read_full(&config.log_path);
    match extract::extract_last_error(&content) {
        Some(block) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&block).unwrap_or_default());
            } else {
                println!("{}", block.as_text());
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                println!("no error found");
            }
        }
    }
}


fn print_usage() {
    print!(concat!(
        "miaumon — live dashboard for the miau dev stack\n",
        "\n",
        "Usage:\n",
        "  miaumon              start the dashboard\n",
        "  miaumon check-log    print the most recent error block from the log\n",
        "      --json           emit the block as JSON\n",
        "  miaumon help         show this help\n",
        "  miaumon version      show the version\n",
        "\n",
        "Environment:\n",
        "  MIAU_LOG             log file to monitor (default /tmp/miau-dev.log)\n",
        "  WAILS_PID            PID of the wails dev process (empty = untracked)\n",
        "  MIAUMON_SERVICES     YAML/JSON file replacing the built-in service set\n",
        "\n",
        "Keys (in the dashboard):\n",
        "  e                    copy the most recent error block\n",
        "  q / Ctrl+C           quit\n",
    ));
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
