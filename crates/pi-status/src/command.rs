// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Typed execution of external probe commands.
//!
//! Every metric is obtained by running one program and capturing its
//! standard output in memory. The [`CommandRunner`] trait is the seam
//! between the reporter and the host: [`SystemRunner`] spawns real
//! processes, [`ScriptedRunner`] replays canned output for tests.

use crate::StatusError;
use std::collections::HashMap;
use std::process::{Command, Stdio};

/// One external command: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Probe {
    /// Program name (looked up on `PATH`) or absolute path.
    pub program: String,
    /// Arguments passed verbatim.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Probe {
    /// Creates a probe from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the command line as a single string, for logging and lookup.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Runs a [`Probe`] and returns its captured standard output.
pub trait CommandRunner {
    /// Executes `probe` to completion.
    ///
    /// Fails if the program cannot be started, exits unsuccessfully, or
    /// writes non-UTF-8 output.
    fn run(&self, probe: &Probe) -> Result<String, StatusError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, probe: &Probe) -> Result<String, StatusError> {
        (**self).run(probe)
    }
}

/// Runs probes as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, probe: &Probe) -> Result<String, StatusError> {
        let output = Command::new(&probe.program)
            .args(&probe.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| StatusError::Spawn {
                program: probe.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(StatusError::ExitStatus {
                program: probe.program.clone(),
                status: output.status,
            });
        }

        String::from_utf8(output.stdout).map_err(|_| StatusError::Parse {
            probe: "command",
            detail: format!("'{}' wrote non-UTF-8 output", probe.command_line()),
        })
    }
}

/// Replays scripted output keyed by command line.
///
/// Commands with no script entry behave like a program that is not
/// installed. Used to exercise the reporter without `vcgencmd`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    outputs: HashMap<String, String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `output` as the stdout of `probe`.
    pub fn with_output(mut self, probe: &Probe, output: impl Into<String>) -> Self {
        self.outputs.insert(probe.command_line(), output.into());
        self
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, probe: &Probe) -> Result<String, StatusError> {
        self.outputs
            .get(&probe.command_line())
            .cloned()
            .ok_or_else(|| StatusError::Spawn {
                program: probe.program.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no scripted output",
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let p = Probe::new("vcgencmd", ["measure_clock", "arm"]);
        assert_eq!(p.command_line(), "vcgencmd measure_clock arm");

        let bare = Probe::new("uptime", Vec::<String>::new());
        assert_eq!(bare.command_line(), "uptime");
    }

    #[test]
    fn test_scripted_runner_hit_and_miss() {
        let temp = Probe::new("vcgencmd", ["measure_temp"]);
        let throttle = Probe::new("vcgencmd", ["get_throttled"]);
        let runner = ScriptedRunner::new().with_output(&temp, "temp=45.0'C\n");

        assert_eq!(runner.run(&temp).unwrap(), "temp=45.0'C\n");
        assert!(matches!(
            runner.run(&throttle),
            Err(StatusError::Spawn { .. })
        ));
    }

    #[test]
    fn test_runner_by_reference() {
        let p = Probe::new("free", ["-m", "-t"]);
        let runner = ScriptedRunner::new().with_output(&p, "x");
        fn run_owned<R: CommandRunner>(r: R, p: &Probe) -> String {
            r.run(p).unwrap()
        }
        assert_eq!(run_owned(&runner, &p), "x");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_stdout() {
        let out = SystemRunner.run(&Probe::new("echo", ["throttled=0x0"])).unwrap();
        assert_eq!(out.trim(), "throttled=0x0");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_nonzero_exit() {
        let result = SystemRunner.run(&Probe::new("false", Vec::<String>::new()));
        assert!(matches!(result, Err(StatusError::ExitStatus { .. })));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let result = SystemRunner.run(&Probe::new(
            "/nonexistent/bin/vcgencmd",
            ["measure_temp"],
        ));
        assert!(matches!(result, Err(StatusError::Spawn { .. })));
    }
}
