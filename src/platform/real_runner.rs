//! Real command runner built on `std::process::Command`.

use std::process::{Command, Stdio};
use tracing::trace;

use super::{CommandOutput, CommandRunner};

/// Production runner. Spawns the program directly, no shell involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealRunner;

impl CommandRunner for RealRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        trace!("Spawning {program} with {} argument(s)", args.len());
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        trace!("{program} exited with {:?}", output.status.code());
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn captures_streams_and_exit_code() {
        let output = RealRunner
            .run("sh", &args(&["-c", "echo out; echo err >&2; exit 3"]))
            .unwrap();
        assert_eq!(output.code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout, b"out\n");
        assert_eq!(output.stderr_lossy(), "err\n");
    }

    #[test]
    fn arguments_are_not_interpreted_by_a_shell() {
        let output = RealRunner
            .run("echo", &args(&["team/db; echo pwned", "$HOME"]))
            .unwrap();
        assert!(output.success());
        assert_eq!(
            String::from_utf8(output.stdout).unwrap(),
            "team/db; echo pwned $HOME\n"
        );
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let result = RealRunner.run("gopass-lookup-definitely-missing", &[]);
        assert!(result.is_err());
    }
}
