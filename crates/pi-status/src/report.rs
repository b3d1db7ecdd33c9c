// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The status reporter: run each probe, parse it, render the report.
//!
//! Each metric is independent. A probe that cannot be run, or whose
//! output does not parse, leaves its field as `None` and its line is
//! omitted from the report. Nothing else is affected.

use crate::{
    ArmClock, CommandRunner, MonitorConfig, Probe, RamSize, SocTemperature, StatusError,
    SystemRunner, ThrottleStatus,
};
use std::io::{self, Write};

/// One run's worth of readings. `None` means the metric was unavailable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusReport {
    pub memory: Option<RamSize>,
    pub clock: Option<ArmClock>,
    pub temperature: Option<SocTemperature>,
    pub throttle: Option<ThrottleStatus>,
}

impl StatusReport {
    /// Report lines in fixed order: RAM, CPU freq, CPU temp, throttle
    /// (followed by its indented flag lines).
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(4);
        lines.extend(self.memory.map(|m| m.to_string()));
        lines.extend(self.clock.map(|c| c.to_string()));
        lines.extend(self.temperature.as_ref().map(|t| t.to_string()));
        if let Some(throttle) = &self.throttle {
            lines.extend(throttle.lines());
        }
        lines
    }

    /// Writes the report, one line per entry.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }

    /// Number of metrics that produced a value.
    pub fn available(&self) -> usize {
        [
            self.memory.is_some(),
            self.clock.is_some(),
            self.temperature.is_some(),
            self.throttle.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// Queries the four health metrics through a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct StatusReporter<R> {
    runner: R,
    config: MonitorConfig,
}

impl StatusReporter<SystemRunner> {
    /// Reporter that runs the default probes on the host.
    pub fn system() -> Self {
        Self::new(SystemRunner, MonitorConfig::default())
    }
}

impl<R: CommandRunner> StatusReporter<R> {
    pub fn new(runner: R, config: MonitorConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Runs all four probes in order.
    pub fn collect(&self) -> StatusReport {
        let report = StatusReport {
            memory: self.read_memory(),
            clock: self.read_clock(),
            temperature: self.read_temperature(),
            throttle: self.read_throttle(),
        };
        tracing::info!("{} of 4 metrics available", report.available());
        report
    }

    /// Collects a report and writes it to `out`.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<StatusReport> {
        let report = self.collect();
        report.write_to(out)?;
        Ok(report)
    }

    pub fn read_memory(&self) -> Option<RamSize> {
        self.probe("memory", &self.config.memory, RamSize::parse)
    }

    pub fn read_clock(&self) -> Option<ArmClock> {
        self.probe("clock", &self.config.clock, ArmClock::parse)
    }

    pub fn read_temperature(&self) -> Option<SocTemperature> {
        self.probe("temperature", &self.config.temperature, SocTemperature::parse)
    }

    pub fn read_throttle(&self) -> Option<ThrottleStatus> {
        self.probe("throttle", &self.config.throttle, ThrottleStatus::parse)
    }

    /// Runs `probe` and parses its output, logging and discarding any failure.
    fn probe<T>(
        &self,
        metric: &str,
        probe: &Probe,
        parse: impl FnOnce(&str) -> Result<T, StatusError>,
    ) -> Option<T> {
        let result = self.runner.run(probe).and_then(|output| {
            tracing::trace!(
                metric,
                command = %probe.command_line(),
                output = %output.trim_end(),
            );
            parse(&output)
        });

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(metric, "skipping metric: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedRunner;

    fn full_runner(config: &MonitorConfig) -> ScriptedRunner {
        ScriptedRunner::new()
            .with_output(&config.memory, "Total:  4096  512  3584\n")
            .with_output(&config.clock, "frequency(48)=1800000000\n")
            .with_output(&config.temperature, "temp=52.1'C\n")
            .with_output(&config.throttle, "throttled=0x0\n")
    }

    #[test]
    fn test_collect_all() {
        let config = MonitorConfig::default();
        let reporter = StatusReporter::new(full_runner(&config), config);
        let report = reporter.collect();
        assert_eq!(report.available(), 4);
        assert_eq!(
            report.lines(),
            vec![
                "RAM size : 4.000 GB",
                "CPU freq : 1.800 GHz",
                "CPU temp : 52.1'C",
                "Throttle : 0x0",
            ]
        );
    }

    #[test]
    fn test_nothing_available() {
        let reporter = StatusReporter::new(ScriptedRunner::new(), MonitorConfig::default());
        let report = reporter.collect();
        assert_eq!(report, StatusReport::default());
        assert_eq!(report.available(), 0);
        assert!(report.lines().is_empty());
    }

    #[test]
    fn test_unparsable_output_skips_metric() {
        let config = MonitorConfig::default();
        let runner = full_runner(&config)
            .with_output(&config.clock, "error=2 error_msg=\"Command not registered\"\n");
        let reporter = StatusReporter::new(runner, config);
        assert!(reporter.read_clock().is_none());
        assert!(reporter.read_memory().is_some());
        assert_eq!(reporter.collect().available(), 3);
    }

    #[test]
    fn test_write_report() {
        let config = MonitorConfig::default();
        let runner = full_runner(&config).with_output(&config.throttle, "throttled=0x20002\n");
        let reporter = StatusReporter::new(runner, config);

        let mut out = Vec::new();
        let report = reporter.write_report(&mut out).unwrap();
        assert_eq!(report.throttle, Some(ThrottleStatus::new(0x20002)));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "RAM size : 4.000 GB\n\
             CPU freq : 1.800 GHz\n\
             CPU temp : 52.1'C\n\
             Throttle : 0x20002\n\
             \x20          Arm frequency capped\n\
             \x20          Arm frequency capping has occurred\n"
        );
    }

    #[test]
    fn test_system_reporter_uses_defaults() {
        assert_eq!(StatusReporter::system().config(), &MonitorConfig::default());
    }
}
