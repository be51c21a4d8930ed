//! Error types for the console binary.
//!
//! [`ConsoleError`] is the top-level error type that wraps all possible
//! failure modes during startup and command execution.

/// Top-level error for the console binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: muster_core::config::ConfigError,
    },

    /// The session rejected an operation.
    #[error("{source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: muster_core::session::SessionError,
    },

    /// A command line could not be parsed.
    #[error("{source}")]
    Command {
        /// The underlying parse error.
        #[from]
        source: crate::command::ParseError,
    },

    /// JSON rendering failed.
    #[error("json error: {source}")]
    Json {
        /// The underlying serializer error.
        #[from]
        source: serde_json::Error,
    },

    /// Reading stdin or writing stdout failed.
    #[error("io error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
