//! Abstracted external process execution for testability.
//!
//! Every interaction with the secret manager goes through [`CommandRunner`].
//! Production code uses [`RealRunner`], which spawns the program directly
//! with an argument vector. Tests substitute [`FakeRunner`] via generics,
//! which answers from a script and records what was asked.

mod real_runner;

pub use real_runner::RealRunner;

#[cfg(test)]
mod fake_runner;

#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_runner::FakeRunner;

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Standard error decoded lossily.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs an external program to completion.
///
/// Implementations must not route arguments through a shell: each element
/// of `args` reaches the program as exactly one argument.
pub trait CommandRunner {
    /// Run `program` with `args`, wait for it to exit and capture both
    /// output streams in full.
    ///
    /// Returns `Err` only when the process could not be started or waited
    /// on; a non-zero exit is reported through [`CommandOutput::code`].
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput>;
}
