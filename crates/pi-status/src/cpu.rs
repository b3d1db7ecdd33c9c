// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ARM core clock from `vcgencmd measure_clock arm`.
//!
//! The firmware answers with a single line such as
//! `frequency(48)=1500398464`, where the number in parentheses is the
//! clock id and the value is in Hz.

use crate::StatusError;
use std::fmt;

/// Hz per MHz.
const HZ_PER_MHZ: u64 = 1_000_000;

/// Measured ARM clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmClock {
    /// Clock frequency in Hz.
    pub hz: u64,
}

impl ArmClock {
    /// Parses `frequency(<id>)=<hz>`; any clock id is accepted.
    pub fn parse(output: &str) -> Result<Self, StatusError> {
        let line = output.trim();
        let rest = line.strip_prefix("frequency(").ok_or_else(|| {
            StatusError::parse("clock", format!("expected 'frequency(<id>)=<hz>', got '{line}'"))
        })?;

        let (id, value) = rest
            .split_once(")=")
            .ok_or_else(|| StatusError::parse("clock", format!("malformed line '{line}'")))?;

        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(StatusError::parse("clock", format!("bad clock id '{id}'")));
        }

        let hz = value.parse::<u64>().map_err(|_| {
            StatusError::parse("clock", format!("expected integer Hz, got '{value}'"))
        })?;

        Ok(Self { hz })
    }

    /// Whole megahertz, truncated.
    pub fn mhz(&self) -> u64 {
        self.hz / HZ_PER_MHZ
    }

    /// Gigahertz truncated to three decimals (`floor(hz / 1e6) / 1000`).
    pub fn ghz(&self) -> f64 {
        self.mhz() as f64 / 1000.0
    }
}

impl fmt::Display for ArmClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPU freq : {:.3} GHz", self.ghz())
    }
}
