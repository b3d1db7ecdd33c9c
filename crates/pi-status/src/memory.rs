// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Physical memory size from `free -m -t`.
//!
//! `free -t` appends a `Total:` row (RAM + swap) to its table. With `-m`
//! the values are in mebibytes; the second column of that row is the
//! figure reported as the board's RAM size.

use crate::StatusError;
use std::fmt;

/// MiB per GiB.
const MIB_PER_GIB: f64 = 1024.0;

/// Row marker in `free -t` output.
const TOTAL_MARKER: &str = "Total:";

/// Total memory as reported by `free`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RamSize {
    /// Total memory in mebibytes.
    pub total_mib: f64,
}

impl RamSize {
    /// Parses `free -m -t` output.
    ///
    /// The first row whose leading field is `Total:` is used; its next
    /// field must be a non-negative number.
    pub fn parse(output: &str) -> Result<Self, StatusError> {
        let row = output
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .find(|fields| fields.first() == Some(&TOTAL_MARKER))
            .ok_or_else(|| StatusError::parse("memory", "no 'Total:' row"))?;

        let value = row
            .get(1)
            .ok_or_else(|| StatusError::parse("memory", "'Total:' row has no value"))?;

        let total_mib: f64 = value.parse().map_err(|_| {
            StatusError::parse("memory", format!("expected MiB value, got '{value}'"))
        })?;

        if !total_mib.is_finite() || total_mib < 0.0 {
            return Err(StatusError::parse(
                "memory",
                format!("implausible MiB value '{value}'"),
            ));
        }

        Ok(Self { total_mib })
    }

    /// Returns the size in gibibytes.
    pub fn gib(&self) -> f64 {
        self.total_mib / MIB_PER_GIB
    }
}

impl fmt::Display for RamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RAM size : {:.3} GB", self.gib())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FREE: &str = "\
               total        used        free      shared  buff/cache   available
Mem:            3794         412        2870          27         511        3284
Swap:             99           0          99
Total:          3893         412        2969
";

    #[test]
    fn test_parse_free_total_row() {
        let ram = RamSize::parse(SAMPLE_FREE).unwrap();
        assert_eq!(ram.total_mib, 3893.0);
    }

    #[test]
    fn test_display_three_decimals() {
        let ram = RamSize { total_mib: 3794.0 };
        assert_eq!(ram.to_string(), "RAM size : 3.705 GB");
    }

    #[test]
    fn test_exact_multiple_of_1024() {
        for gib in [1u32, 2, 4, 8] {
            let ram = RamSize {
                total_mib: f64::from(gib) * 1024.0,
            };
            assert_eq!(ram.to_string(), format!("RAM size : {gib}.000 GB"));
        }
        assert_eq!(RamSize { total_mib: 0.0 }.to_string(), "RAM size : 0.000 GB");
    }

    #[test]
    fn test_missing_total_row() {
        let no_total = "Mem:  3794  412  2870\nSwap:  99  0  99\n";
        assert!(matches!(
            RamSize::parse(no_total),
            Err(StatusError::Parse { .. })
        ));
    }

    #[test]
    fn test_marker_must_lead_the_row() {
        let misleading = "Grand Total: 10\n";
        assert!(RamSize::parse(misleading).is_err());
    }

    #[test]
    fn test_non_numeric_value() {
        assert!(RamSize::parse("Total:  lots\n").is_err());
        assert!(RamSize::parse("Total:\n").is_err());
        assert!(RamSize::parse("Total:  -5\n").is_err());
    }

    #[test]
    fn test_empty_output() {
        assert!(RamSize::parse("").is_err());
    }
}
