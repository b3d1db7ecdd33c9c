// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pi-status
//!
//! Queries basic health statistics of a Raspberry Pi by running the
//! platform utilities and parsing their textual output.
//!
//! # Reported Metrics
//! - **RAM size**: `free -m -t`, `Total:` row, printed in GB.
//! - **CPU frequency**: `vcgencmd measure_clock arm`, truncated to MHz, printed in GHz.
//! - **CPU temperature**: `vcgencmd measure_temp`, printed verbatim.
//! - **Throttle status**: `vcgencmd get_throttled`, printed in hex and
//!   decoded into under-voltage / capping / throttling flags.
//!
//! # Best-Effort Reporting
//! Each metric is independent. If a utility is missing, fails, or prints
//! something unexpected, that metric's line is left out and the others
//! are still reported.
//!
//! # Example
//! ```no_run
//! use pi_status::StatusReporter;
//!
//! let report = StatusReporter::system().collect();
//! for line in report.lines() {
//!     println!("{line}");
//! }
//! ```

mod command;
mod config;
mod cpu;
mod error;
mod memory;
mod report;
mod thermal;
mod throttle;

pub use command::{CommandRunner, Probe, ScriptedRunner, SystemRunner};
pub use config::MonitorConfig;
pub use cpu::ArmClock;
pub use error::StatusError;
pub use memory::RamSize;
pub use report::{StatusReport, StatusReporter};
pub use thermal::SocTemperature;
pub use throttle::{ThrottleFlag, ThrottleStatus, FLAG_INDENT};

/// Queries all metrics on the host with the default probes.
///
/// This is a convenience wrapper around [`StatusReporter::system()`].
pub fn report() -> StatusReport {
    StatusReporter::system().collect()
}
