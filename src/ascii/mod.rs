// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for reading SHTOOLS-formatted ascii files.
//!
//! Each coefficient line carries `l m c0 c1` (four whitespace-separated
//! fields), or `l m c0 c1 e0 e1` when errors are present. Any line with fewer
//! than four fields, or whose first two fields aren't plain non-negative
//! integers, is a comment, and comments may sit anywhere. A single header
//! line can live between the skipped leading lines and the first coefficient
//! line; it is only read when asked for. Files hold either real or complex
//! values; the kind is decided by the last coefficient line and applies to
//! every value in the file.

mod error;

pub use error::{EofContext, ShReadError};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use ndarray::Array3;

use crate::literal::{detect_kind, CoeffValue};
use crate::types::{CoeffKind, CoeffSet, ShCoeffs};

/// How many bytes each step of the backwards scan pulls in.
const TAIL_CHUNK: u64 = 8192;

/// Reads the coefficient file at `file` with the default options, taking
/// every degree the file has and nothing extra.
pub fn read<T: AsRef<Path>>(file: T) -> Result<ShCoeffs, ShReadError> {
    ShReader::new().read(file)
}

/// Options for reading a coefficient file.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> Result<(), shio::ShReadError> {
/// use shio::ShReader;
///
/// let sh = ShReader::new().lmax(85).errors(true).read("coeffs.sh")?;
/// println!("read a {} file up to degree {}", sh.kind(), sh.lmax());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShReader {
    lmax: Option<usize>,
    errors: bool,
    header: bool,
    skip: usize,
}

impl ShReader {
    /// Creates a reader with the default options.
    pub fn new() -> ShReader {
        ShReader::default()
    }

    /// Caps the maximum degree to read. Coefficients beyond the cap are left
    /// unread; a cap beyond the file's own maximum degree changes nothing.
    pub fn lmax(mut self, lmax: usize) -> ShReader {
        self.lmax = Some(lmax);
        self
    }

    /// Whether to also read the errors associated with the coefficients
    /// (fields 5 and 6 of every coefficient line).
    pub fn errors(mut self, read_errors: bool) -> ShReader {
        self.errors = read_errors;
        self
    }

    /// Whether to capture the single header line sitting after the skipped
    /// lines and before the first coefficient line. The line is taken
    /// verbatim, even if it looks like a comment or a coefficient line.
    pub fn header(mut self, read_header: bool) -> ShReader {
        self.header = read_header;
        self
    }

    /// Discards this many lines before anything else is read forwards.
    /// Skipped lines aren't inspected at all.
    pub fn skip(mut self, lines: usize) -> ShReader {
        self.skip = lines;
        self
    }

    /// Reads the coefficient file at `file`.
    pub fn read<T: AsRef<Path>>(&self, file: T) -> Result<ShCoeffs, ShReadError> {
        self.read_from(File::open(file)?)
    }

    /// Reads coefficients out of any seekable byte source, e.g. an
    /// [`io::Cursor`] over an in-memory table.
    pub fn read_from<R: Read + Seek>(&self, mut source: R) -> Result<ShCoeffs, ShReadError> {
        // The kind and the file's maximum degree live on the last coefficient
        // line, whatever the skip/header/cap settings say.
        let last = last_coeff_line(&mut source)?;
        let tokens: Vec<&str> = last.split_whitespace().collect();
        let lmax_file = parse_integer(tokens[0], &last)?;
        let kind = detect_kind(tokens[2]).ok_or_else(|| ShReadError::Format {
            token: tokens[2].to_string(),
            line: last.trim_end().to_string(),
        })?;
        let lmax_out = match self.lmax {
            Some(lmax) => lmax.min(lmax_file),
            None => lmax_file,
        };

        source.seek(SeekFrom::Start(0))?;
        let mut reader = BufReader::new(source);
        match kind {
            CoeffKind::Real => Ok(ShCoeffs::Real(self.read_grids(&mut reader, lmax_out)?)),
            CoeffKind::Complex => Ok(ShCoeffs::Complex(self.read_grids(&mut reader, lmax_out)?)),
        }
    }

    /// The forward pass: skips leading lines, captures the header if one was
    /// asked for, then reads every coefficient line in sequence.
    fn read_grids<T: CoeffValue, R: BufRead>(
        &self,
        reader: &mut R,
        lmax_out: usize,
    ) -> Result<CoeffSet<T>, ShReadError> {
        for _ in 0..self.skip {
            next_line(reader)?.ok_or(ShReadError::EndOfFile(EofContext::Skipping))?;
        }
        let header = if self.header {
            let line = next_line(reader)?.ok_or(ShReadError::EndOfFile(EofContext::Header))?;
            Some(line.split_whitespace().map(str::to_string).collect())
        } else {
            None
        };

        let first =
            next_coeff_line(reader)?.ok_or(ShReadError::EndOfFile(EofContext::FirstLine))?;
        let lstart = {
            let tokens: Vec<&str> = first.split_whitespace().collect();
            parse_integer(tokens[0], &first)?
        };

        let n = lmax_out + 1;
        let mut coeffs = Array3::from_elem((2, n, n), T::default());
        let mut errors = self
            .errors
            .then(|| Array3::from_elem((2, n, n), T::default()));

        // The line that supplied lstart is also the first line the loop
        // wants; hand it over rather than scanning from the top again.
        let mut pending = Some(first);
        for degree in lstart..=lmax_out {
            for order in 0..=degree {
                let line = match pending.take() {
                    Some(line) => line,
                    None => next_coeff_line(reader)?.ok_or(ShReadError::EndOfFile(
                        EofContext::Coefficient { degree, order },
                    ))?,
                };
                let tokens: Vec<&str> = line.split_whitespace().collect();
                let l = parse_integer(tokens[0], &line)?;
                let m = parse_integer(tokens[1], &line)?;
                if (l, m) != (degree, order) {
                    return Err(ShReadError::OrderMismatch {
                        expected_l: degree,
                        expected_m: order,
                        got_l: l,
                        got_m: m,
                    });
                }
                coeffs[[0, l, m]] = parse_value(tokens[2], &line)?;
                coeffs[[1, l, m]] = parse_value(tokens[3], &line)?;
                if let Some(errors) = errors.as_mut() {
                    if tokens.len() < 6 {
                        return Err(ShReadError::InsufficientFields {
                            line: line.trim_end().to_string(),
                        });
                    }
                    errors[[0, l, m]] = parse_value(tokens[4], &line)?;
                    errors[[1, l, m]] = parse_value(tokens[5], &line)?;
                }
            }
        }

        Ok(CoeffSet {
            coeffs,
            errors,
            header,
            lmax: lmax_out,
        })
    }
}

/// Decides whether a raw line is a comment: fewer than 4 whitespace-separated
/// fields, or a first or second field that isn't a plain non-negative
/// integer. Only the first two fields are ever inspected.
fn is_comment(line: &str) -> bool {
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next(), words.next()) {
        (Some(degree), Some(order), Some(_), Some(_)) => {
            !(is_decimal(degree) && is_decimal(order))
        }
        _ => true,
    }
}

/// `true` for a non-empty, all-ASCII-digit word: no sign, no decimal point.
fn is_decimal(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

/// Finds the last coefficient line by scanning chunks backwards from the end
/// of the stream, so the tail of a big file is located without reading all of
/// it. Trailing line breaks make empty pseudo-lines, which classify as
/// comments and get skipped like any others.
fn last_coeff_line<R: Read + Seek>(source: &mut R) -> Result<String, ShReadError> {
    let mut start = source.seek(SeekFrom::End(0))?;
    // Bytes of the partial line at the head of the region scanned so far; a
    // chunk boundary can land anywhere in a line.
    let mut carry: Vec<u8> = vec![];

    while start > 0 {
        let chunk_len = TAIL_CHUNK.min(start);
        start -= chunk_len;
        source.seek(SeekFrom::Start(start))?;
        let mut chunk = vec![0; chunk_len as usize];
        source.read_exact(&mut chunk)?;
        chunk.append(&mut carry);

        let mut pieces = chunk.split(|&byte| byte == b'\n');
        // Unless this chunk opens at the start of the stream, its first piece
        // may continue further back; hold it for the next round.
        let head = if start > 0 { pieces.next() } else { None };
        for piece in pieces.rev() {
            let line = decode(piece)?;
            if !is_comment(line) {
                return Ok(line.to_string());
            }
        }
        carry = head.map(<[u8]>::to_vec).unwrap_or_default();
    }

    Err(ShReadError::EndOfFile(EofContext::LastLine))
}

/// Decodes one raw line, surfacing non-UTF-8 content the same way the forward
/// line reader would.
fn decode(piece: &[u8]) -> Result<&str, ShReadError> {
    std::str::from_utf8(piece)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Reads one raw line; `None` once the stream is exhausted.
fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, ShReadError> {
    let mut line = String::new();
    match reader.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

/// Reads raw lines until a coefficient line turns up; `None` once the stream
/// is exhausted.
fn next_coeff_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, ShReadError> {
    loop {
        match next_line(reader)? {
            Some(line) if is_comment(&line) => continue,
            other => return Ok(other),
        }
    }
}

/// Parses a degree or order token.
fn parse_integer(token: &str, line: &str) -> Result<usize, ShReadError> {
    token.parse().map_err(|_| ShReadError::Format {
        token: token.to_string(),
        line: line.trim_end().to_string(),
    })
}

/// Parses a coefficient or error token with the grammar of the file's kind.
fn parse_value<T: CoeffValue>(token: &str, line: &str) -> Result<T, ShReadError> {
    T::parse_literal(token).ok_or_else(|| ShReadError::Format {
        token: token.to_string(),
        line: line.trim_end().to_string(),
    })
}
