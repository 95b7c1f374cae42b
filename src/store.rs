//! The gopass command set: show, list and generate.
//!
//! Each operation is one external invocation whose exit status decides
//! success. Output interpretation lives here so the resolver only deals
//! with values and [`CommandFailure`]s.

use tracing::{debug, trace};

use crate::error::CommandFailure;
use crate::platform::{CommandOutput, CommandRunner};

/// Executable used when the configuration does not name one.
pub const DEFAULT_EXECUTABLE: &str = "gopass";

/// A password store reached through its command-line tool.
pub struct Gopass<R> {
    executable: String,
    runner: R,
}

impl<R: CommandRunner> Gopass<R> {
    pub fn new(executable: impl Into<String>, runner: R) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }

    #[cfg(test)]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Retrieve a secret: the first line of `show <path>`.
    ///
    /// Later lines (free-form metadata) are discarded. Empty or non-UTF-8
    /// output counts as a failure.
    pub fn show(&self, path: &str) -> Result<String, CommandFailure> {
        trace!("Showing {path}");
        let output = self.exec(vec!["show".to_string(), path.to_string()])?;
        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| CommandFailure::Output(format!("output of show {path} is not valid UTF-8")))?;
        stdout
            .lines()
            .next()
            .map(str::to_string)
            .ok_or_else(|| CommandFailure::Output(format!("show {path} produced no output")))
    }

    /// Enumerate secret names under a path: every line of `list --flat <path>`.
    pub fn list(&self, path: &str) -> Result<Vec<String>, CommandFailure> {
        trace!("Listing {path}");
        let output = self.exec(vec![
            "list".to_string(),
            "--flat".to_string(),
            path.to_string(),
        ])?;
        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| CommandFailure::Output(format!("output of list {path} is not valid UTF-8")))?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    /// Create (or with `force`, overwrite) a secret of `length` characters.
    pub fn generate(
        &self,
        path: &str,
        length: u32,
        symbols: bool,
        force: bool,
    ) -> Result<(), CommandFailure> {
        let args = generate_args(path, length, symbols, force);
        debug!("COMMAND: {} {}", self.executable, args.join(" "));
        self.exec(args)?;
        Ok(())
    }

    /// Run the executable and turn spawn errors and non-zero exits into
    /// failures.
    fn exec(&self, args: Vec<String>) -> Result<CommandOutput, CommandFailure> {
        let output = self
            .runner
            .run(&self.executable, &args)
            .map_err(|source| CommandFailure::Spawn {
                program: self.executable.clone(),
                source,
            })?;

        if !output.success() {
            trace!("{} {} failed with {:?}", self.executable, args[0], output.code);
            return Err(CommandFailure::Exit {
                code: output.code,
                stderr: output.stderr_lossy(),
            });
        }
        Ok(output)
    }
}

/// `generate [--symbols] [--force] <path> <length>`
fn generate_args(path: &str, length: u32, symbols: bool, force: bool) -> Vec<String> {
    let mut args = vec!["generate".to_string()];
    if symbols {
        args.push("--symbols".to_string());
    }
    if force {
        args.push("--force".to_string());
    }
    args.push(path.to_string());
    args.push(length.to_string());
    args
}
