//! Error taxonomy for secret resolution.
//!
//! [`LookupError`] is what a resolution call returns. Option problems are
//! grouped under [`ConfigurationError`] and are always raised before any
//! external command runs. [`CommandFailure`] describes why a single store
//! command did not succeed; the resolver folds it into a [`LookupError`]
//! carrying the term it was working on.

use thiserror::Error;

/// Errors returned by a resolution call.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Generation, or the show that follows it, failed for `term`.
    #[error("gopass lookup({term}) could not generate a secret: {detail}")]
    Generation { term: String, detail: String },

    /// `list` mode failed for `term`.
    #[error("gopass lookup({term}) could not list secrets: {detail}")]
    List { term: String, detail: String },
}

/// Invalid lookup options.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// One or more keys outside the recognized option set.
    #[error("unrecognized option(s) given to gopass lookup: {}{hint}", .keys.join(", "))]
    UnknownOptions { keys: Vec<String>, hint: String },

    #[error("invalid value for option `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// A store command that did not produce a usable result.
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit. Displays the tool's stderr.
    #[error("{}", exit_detail(.code, .stderr))]
    Exit { code: Option<i32>, stderr: String },

    /// Exit code 0 but the output could not be used.
    #[error("{0}")]
    Output(String),
}

fn exit_detail(code: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
