// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading coefficient files.

use thiserror::Error;

/// Where in the read the stream ran dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EofContext {
    /// The backwards scan for the last coefficient line reached the start of
    /// the file without finding one.
    LastLine,

    /// The stream ended while leading lines were being skipped.
    Skipping,

    /// The stream ended where the header line was expected.
    Header,

    /// The stream ended before any coefficient line was found.
    FirstLine,

    /// The stream ended before the line carrying this degree and order.
    Coefficient { degree: usize, order: usize },
}

impl std::fmt::Display for EofContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EofContext::LastLine => write!(f, "while scanning for the last coefficient line"),
            EofContext::Skipping => write!(f, "while skipping lines"),
            EofContext::Header => write!(f, "while reading the header line"),
            EofContext::FirstLine => write!(f, "while locating the first coefficient line"),
            EofContext::Coefficient { degree, order } => {
                write!(f, "at degree and order ({}, {})", degree, order)
            }
        }
    }
}

/// Errors that can occur when reading a coefficient file. All of them abort
/// the read; partial grids are never handed back.
#[derive(Error, Debug)]
pub enum ShReadError {
    /// The stream ended before the read was satisfied.
    #[error("end of file encountered {0}")]
    EndOfFile(EofContext),

    /// A token that has to be numeric couldn't be read as such.
    #[error("couldn't convert '{token}' to either a real or complex number (full line: '{line}')")]
    Format { token: String, line: String },

    /// A coefficient line was out of sequence. Coefficients must be listed in
    /// degree-major, order-minor order with no gaps.
    #[error("degree and order from the file don't correspond to the expected values: read ({got_l}, {got_m}), expected ({expected_l}, {expected_m})")]
    OrderMismatch {
        expected_l: usize,
        expected_m: usize,
        got_l: usize,
        got_m: usize,
    },

    /// Errors were asked for, but a coefficient line doesn't carry them.
    #[error("when reading errors, each coefficient line must contain at least 6 fields (full line: '{line}')")]
    InsufficientFields { line: String },

    /// An error associated with file IO (including non-UTF-8 content).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
