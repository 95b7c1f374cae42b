//! Fake command runner for testing.
//!
//! Scripted with `on()`: each argument vector maps to a queue of outputs.
//! Calls pop the front of the queue; the last output stays in place and
//! answers every later call. Unscripted calls exit 1 with an explanatory
//! stderr. Every call is recorded so tests can assert on the exact
//! sequence of commands issued.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{CommandOutput, CommandRunner};

/// In-memory runner. Never spawns a process.
///
/// State sits behind `Mutex` because Tera functions must be `Send + Sync`.
pub struct FakeRunner {
    script: Mutex<HashMap<Vec<String>, VecDeque<CommandOutput>>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
    spawn_fails: bool,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            spawn_fails: false,
        }
    }

    /// A runner whose every call fails to start, as if the program were
    /// not installed.
    pub fn missing_program() -> Self {
        Self {
            spawn_fails: true,
            ..Self::new()
        }
    }

    /// Queue `output` as the next answer for `args`.
    pub fn on(&self, args: &[&str], output: CommandOutput) -> &Self {
        let key = args.iter().map(|s| s.to_string()).collect();
        self.script
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push_back(output);
        self
    }

    /// Successful output with the given stdout.
    pub fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            code: Some(0),
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn fail(code: i32, stderr: &str) -> CommandOutput {
        CommandOutput {
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    /// Argument vectors of every call so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, args)| args.clone())
            .collect()
    }

    /// Program names of every call so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(program, _)| program.clone())
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        if self.spawn_fails {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }

        let mut script = self.script.lock().unwrap();
        let output = match script.get_mut(args) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(output.unwrap_or_else(|| {
            Self::fail(1, &format!("FakeRunner: no response for {program} {}", args.join(" ")))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scripted_response_is_returned() {
        let runner = FakeRunner::new();
        runner.on(&["show", "a"], FakeRunner::ok("value\n"));
        let output = runner.run("gopass", &args(&["show", "a"])).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, b"value\n");
    }

    #[test]
    fn queue_pops_then_sticks_on_last() {
        let runner = FakeRunner::new();
        runner
            .on(&["show", "a"], FakeRunner::fail(1, "missing"))
            .on(&["show", "a"], FakeRunner::ok("v\n"));
        let call = || runner.run("gopass", &args(&["show", "a"])).unwrap();
        assert!(!call().success());
        assert!(call().success());
        assert!(call().success());
    }

    #[test]
    fn unscripted_call_fails_and_is_recorded() {
        let runner = FakeRunner::new();
        let output = runner.run("gopass", &args(&["list", "--flat", "x"])).unwrap();
        assert_eq!(output.code, Some(1));
        assert!(output.stderr_lossy().contains("no response"));
        assert_eq!(runner.calls(), vec![args(&["list", "--flat", "x"])]);
        assert_eq!(runner.programs(), vec!["gopass".to_string()]);
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let runner = FakeRunner::missing_program();
        let err = runner.run("gopass", &args(&["show", "a"])).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(runner.calls().len(), 1);
    }
}
