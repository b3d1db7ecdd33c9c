// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Firmware throttle status from `vcgencmd get_throttled`.
//!
//! The firmware reports a status word such as `throttled=0x50005`. The
//! low nibble holds conditions that are active right now; bits 16..=19
//! latch the same conditions once they have occurred since boot.
//!
//! | Bit | Condition                           |
//! |-----|-------------------------------------|
//! | 0   | Under-voltage detected              |
//! | 1   | Arm frequency capped                |
//! | 2   | Currently throttled                 |
//! | 3   | Soft temperature limit active       |
//! | 16  | Under-voltage has occurred          |
//! | 17  | Arm frequency capping has occurred  |
//! | 18  | Throttling has occurred             |
//! | 19  | Soft temperature limit has occurred |
//!
//! All other bits are ignored.

use crate::StatusError;
use std::fmt;

/// Indentation of the per-flag detail lines under the `Throttle :` line.
pub const FLAG_INDENT: &str = "           ";

/// A decoded condition in the throttle status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrottleFlag {
    UnderVoltage,
    FrequencyCapped,
    Throttled,
    SoftTempLimit,
    UnderVoltageOccurred,
    FrequencyCappedOccurred,
    ThrottledOccurred,
    SoftTempLimitOccurred,
}

impl ThrottleFlag {
    /// All known flags, in report order.
    pub const ALL: [ThrottleFlag; 8] = [
        ThrottleFlag::UnderVoltage,
        ThrottleFlag::FrequencyCapped,
        ThrottleFlag::Throttled,
        ThrottleFlag::SoftTempLimit,
        ThrottleFlag::UnderVoltageOccurred,
        ThrottleFlag::FrequencyCappedOccurred,
        ThrottleFlag::ThrottledOccurred,
        ThrottleFlag::SoftTempLimitOccurred,
    ];

    /// Bit position in the status word.
    pub const fn bit(self) -> u32 {
        match self {
            ThrottleFlag::UnderVoltage => 0,
            ThrottleFlag::FrequencyCapped => 1,
            ThrottleFlag::Throttled => 2,
            ThrottleFlag::SoftTempLimit => 3,
            ThrottleFlag::UnderVoltageOccurred => 16,
            ThrottleFlag::FrequencyCappedOccurred => 17,
            ThrottleFlag::ThrottledOccurred => 18,
            ThrottleFlag::SoftTempLimitOccurred => 19,
        }
    }

    pub const fn mask(self) -> u32 {
        1 << self.bit()
    }

    /// Human-readable description printed in the report.
    pub const fn description(self) -> &'static str {
        match self {
            ThrottleFlag::UnderVoltage => "Under-voltage detected",
            ThrottleFlag::FrequencyCapped => "Arm frequency capped",
            ThrottleFlag::Throttled => "Currently throttled",
            ThrottleFlag::SoftTempLimit => "Soft temperature limit active",
            ThrottleFlag::UnderVoltageOccurred => "Under-voltage has occurred",
            ThrottleFlag::FrequencyCappedOccurred => "Arm frequency capping has occurred",
            ThrottleFlag::ThrottledOccurred => "Throttling has occurred",
            ThrottleFlag::SoftTempLimitOccurred => "Soft temperature limit has occurred",
        }
    }

    /// Returns `true` for the latched "has occurred" conditions.
    pub const fn is_historical(self) -> bool {
        self.bit() >= 16
    }
}

impl fmt::Display for ThrottleFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Raw throttle status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleStatus(u32);

impl ThrottleStatus {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Parses `throttled=<hex>`; a `0x` prefix on the value is optional.
    pub fn parse(output: &str) -> Result<Self, StatusError> {
        let line = output.trim();
        let value = line.strip_prefix("throttled=").ok_or_else(|| {
            StatusError::parse("throttle", format!("expected 'throttled=<hex>', got '{line}'"))
        })?;

        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StatusError::parse(
                "throttle",
                format!("expected hex value, got '{value}'"),
            ));
        }

        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| StatusError::parse("throttle", format!("'{value}': {e}")))
    }

    /// The status word as reported by the firmware.
    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub const fn is_set(&self, flag: ThrottleFlag) -> bool {
        self.0 & flag.mask() != 0
    }

    /// Known flags set in the status word, in report order.
    pub fn active_flags(&self) -> impl Iterator<Item = ThrottleFlag> + '_ {
        ThrottleFlag::ALL
            .into_iter()
            .filter(move |flag| self.is_set(*flag))
    }

    /// Returns `true` if no known condition is active or has occurred.
    pub fn is_clear(&self) -> bool {
        self.active_flags().next().is_none()
    }

    /// The `Throttle :` line followed by one indented line per set flag.
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.to_string())
            .chain(self.active_flags().map(|flag| format!("{FLAG_INDENT}{flag}")))
            .collect()
    }
}

impl fmt::Display for ThrottleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Throttle : {:#x}", self.0)
    }
}
