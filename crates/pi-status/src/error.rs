// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for status probes.

/// Errors that can occur when querying or parsing a health metric.
///
/// The reporter never surfaces these to the user: every variant collapses
/// to "metric unavailable" and the corresponding line is omitted.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// The probe program could not be started (e.g. `vcgencmd` not installed).
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The probe program ran but exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },

    /// The probe output did not match the expected format.
    #[error("failed to parse {probe} output: {detail}")]
    Parse { probe: &'static str, detail: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StatusError {
    pub(crate) fn parse(probe: &'static str, detail: impl Into<String>) -> Self {
        Self::Parse {
            probe,
            detail: detail.into(),
        }
    }
}
