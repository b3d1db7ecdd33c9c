// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! SoC temperature from `vcgencmd measure_temp`.
//!
//! The firmware already formats the reading (`temp=45.0'C`), so the
//! token after `temp=` is kept verbatim rather than converted.

use crate::StatusError;
use std::fmt;

/// SoC temperature as formatted by the firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocTemperature {
    /// Reading including its unit suffix, e.g. `45.0'C`.
    pub token: String,
}

impl SocTemperature {
    /// Parses `temp=<token>`, keeping the first whitespace-delimited word.
    ///
    /// Whitespace between `=` and the reading is skipped.
    pub fn parse(output: &str) -> Result<Self, StatusError> {
        let line = output.trim_start();
        let rest = line.strip_prefix("temp=").ok_or_else(|| {
            StatusError::parse(
                "temperature",
                format!("expected 'temp=<value>', got '{}'", line.trim_end()),
            )
        })?;

        let token = rest
            .split_whitespace()
            .next()
            .ok_or_else(|| StatusError::parse("temperature", "empty reading"))?;

        Ok(Self {
            token: token.to_string(),
        })
    }
}

impl fmt::Display for SocTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPU temp : {}", self.token)
    }
}
