//! Operator console for the Muster emergency headcount toolkit.
//!
//! Reads one command per line from stdin, applies it to a single session
//! and prints the result on stdout. Logs go to stderr so stdout stays a
//! clean transcript that can be piped or diffed.
//!
//! # Startup Sequence
//!
//! 1. Resolve the config path (`MUSTER_CONFIG`, else `muster-config.yaml`)
//! 2. Load configuration, falling back to defaults if the file is missing
//! 3. Initialize structured logging (tracing)
//! 4. Build the session (taxonomy, tally, roll call, catalogs, incident desk)
//! 5. Run the command loop until `quit` or end of input

mod command;
mod console;
mod error;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use muster_core::config::{LoggingConfig, MusterConfig};
use muster_core::session::Session;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::parse;
use crate::console::{Console, Outcome};
use crate::error::ConsoleError;

/// Environment variable naming the config file.
const ENV_CONFIG_PATH: &str = "MUSTER_CONFIG";

/// Config file used when `MUSTER_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "muster-config.yaml";

/// Application entry point for the console.
///
/// # Errors
///
/// Returns an error if configuration is invalid or stdin/stdout fail.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1-2. Load configuration.
    let path = config_path();
    let config = load_config(&path)?;

    // 3. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        path = %path.display(),
        found = path.exists(),
        categories = config.taxonomy.categories.len(),
        location = config.incident.location,
        "Configuration loaded"
    );

    // 4. Build the session.
    let session = Session::from_config(&config).map_err(ConsoleError::from)?;
    let mut console = Console::new(session);

    // 5. Command loop.
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut console, stdin.lock(), stdout.lock())?;

    info!("muster-console finished");
    Ok(())
}

/// Initialize the tracing subscriber on stderr.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn config_path() -> PathBuf {
    std::env::var_os(ENV_CONFIG_PATH).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration from `path`.
///
/// If the file does not exist, defaults are used with environment
/// overrides applied.
fn load_config(path: &Path) -> Result<MusterConfig, ConsoleError> {
    if path.exists() {
        Ok(MusterConfig::from_file(path)?)
    } else {
        let mut config = MusterConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }
}

/// Read commands from `input` until `quit` or end of input.
///
/// Rejected commands are reported on `out` and the loop continues.
fn run(console: &mut Console, input: impl BufRead, mut out: impl Write) -> Result<(), ConsoleError> {
    writeln!(out, "muster console ready, type `help` for commands")?;
    for line in input.lines() {
        let line = line?;
        let result = match parse(&line) {
            Ok(Some(command)) => console.execute(command),
            Ok(None) => continue,
            Err(e) => Err(ConsoleError::from(e)),
        };
        match result {
            Ok(Outcome::Continue(text)) => writeln!(out, "{text}")?,
            Ok(Outcome::Quit(text)) => {
                writeln!(out, "{text}")?;
                break;
            }
            Err(e) => {
                warn!(error = %e, "command rejected");
                writeln!(out, "error: {e}")?;
            }
        }
        out.flush()?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn transcript(script: &str) -> String {
        let session = Session::from_config(&MusterConfig::default()).unwrap();
        let mut console = Console::new(session);
        let mut out = Vec::new();
        run(&mut console, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_drill() {
        let out = transcript(
            "# count the floor\n\
             inc Women\n\
             inc Women\n\
             inc Men|Dead\n\
             dec Women\n\
             sum\n\
             quit\n\
             inc Men\n",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines.get(5).copied(), Some("total: 2"));
        assert!(lines.last().is_some_and(|l| l.starts_with("session closed, total 2")));
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let out = transcript("fly\ninc Nobody\nset Men|Dead 3\ninc Men\nsum Men\n");
        let errors = out.lines().filter(|l| l.starts_with("error:")).count();
        assert_eq!(errors, 3);
        assert!(out.lines().any(|l| l == "Men: 1"));
    }

    #[test]
    fn malformed_lines_report_the_command_error() {
        let out = transcript("fly
inc Men||Dead
sum
");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines.get(1).copied(),
            Some("error: unknown command `fly`, type `help` for the list")
        );
        assert_eq!(lines.get(2).copied(), Some("error: `inc` cannot use `Men||Dead`"));
        assert_eq!(lines.get(3).copied(), Some("total: 0"));
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let config = load_config(Path::new("does-not-exist.yaml"));
        assert!(config.is_ok_and(|c| c.checklists.len() == 8));
    }
}
