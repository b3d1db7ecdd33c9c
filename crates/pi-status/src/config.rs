// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Probe configuration loaded from TOML files or constructed programmatically.
//!
//! Every field is optional; omitted probes keep their defaults.
//!
//! # TOML Format
//! ```toml
//! [clock]
//! program = "/opt/vc/bin/vcgencmd"
//! args = ["measure_clock", "arm"]
//!
//! [throttle]
//! program = "/opt/vc/bin/vcgencmd"
//! args = ["get_throttled"]
//! ```

use crate::{Probe, StatusError};
use std::path::Path;

/// Firmware status utility shipped with Raspberry Pi OS.
const VCGENCMD: &str = "vcgencmd";

/// The external commands used for each metric.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Memory summary; output must contain a `Total:` row in MiB.
    pub memory: Probe,
    /// ARM clock; output `frequency(<id>)=<hz>`.
    pub clock: Probe,
    /// SoC temperature; output `temp=<token>`.
    pub temperature: Probe,
    /// Throttle status word; output `throttled=<hex>`.
    pub throttle: Probe,
}

impl MonitorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, StatusError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StatusError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, StatusError> {
        toml::from_str(toml_str)
            .map_err(|e| StatusError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, StatusError> {
        toml::to_string_pretty(self)
            .map_err(|e| StatusError::Config(format!("TOML serialise error: {e}")))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            memory: Probe::new("free", ["-m", "-t"]),
            clock: Probe::new(VCGENCMD, ["measure_clock", "arm"]),
            temperature: Probe::new(VCGENCMD, ["measure_temp"]),
            throttle: Probe::new(VCGENCMD, ["get_throttled"]),
        }
    }
}
