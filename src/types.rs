// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coefficient containers and the numeric kinds they come in.

use ndarray::Array3;

#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex64;

/// The numeric kind shared by every value in a coefficient file.
///
/// A file holds either real or complex values throughout; the kind is decided
/// once, from the last coefficient line, and applies to coefficients and
/// errors alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoeffKind {
    Real,
    Complex,
}

impl std::fmt::Display for CoeffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CoeffKind::Real => "real",
                CoeffKind::Complex => "complex",
            }
        )
    }
}

/// The contents of a coefficient file with element type `T`.
///
/// Grids are indexed by `[i, l, m]`, where `i` selects the cosine (0) or sine
/// (1) component, `l` is the degree and `m` the order. Cells with `m > l` are
/// meaningless and left at zero, as are any degrees below the first degree
/// present in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct CoeffSet<T> {
    /// The spherical harmonic coefficients, shape `(2, lmax + 1, lmax + 1)`.
    pub coeffs: Array3<T>,

    /// The errors associated with each coefficient, with the same shape as
    /// `coeffs`. Only present when they were asked for.
    pub errors: Option<Array3<T>>,

    /// The whitespace-separated words of the header line. Only present when a
    /// header was asked for.
    pub header: Option<Vec<String>>,

    /// The maximum degree read, i.e. `coeffs.dim().1 - 1`.
    pub lmax: usize,
}

/// Coefficients read from a file.
///
/// Whether the values are real or complex is a property of the file itself,
/// so the two cases are distinct variants; the coefficient and error grids of
/// one file always share a kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ShCoeffs {
    Real(CoeffSet<f64>),
    Complex(CoeffSet<c64>),
}

impl ShCoeffs {
    /// The numeric kind the file was written with.
    pub fn kind(&self) -> CoeffKind {
        match self {
            ShCoeffs::Real(_) => CoeffKind::Real,
            ShCoeffs::Complex(_) => CoeffKind::Complex,
        }
    }

    /// The maximum degree that was read.
    pub fn lmax(&self) -> usize {
        match self {
            ShCoeffs::Real(set) => set.lmax,
            ShCoeffs::Complex(set) => set.lmax,
        }
    }

    /// The words of the header line, if one was asked for.
    pub fn header(&self) -> Option<&[String]> {
        match self {
            ShCoeffs::Real(set) => set.header.as_deref(),
            ShCoeffs::Complex(set) => set.header.as_deref(),
        }
    }

    /// A reference to the real-valued contents, or `None` for a complex file.
    pub fn as_real(&self) -> Option<&CoeffSet<f64>> {
        match self {
            ShCoeffs::Real(set) => Some(set),
            ShCoeffs::Complex(_) => None,
        }
    }

    /// A reference to the complex-valued contents, or `None` for a real file.
    pub fn as_complex(&self) -> Option<&CoeffSet<c64>> {
        match self {
            ShCoeffs::Real(_) => None,
            ShCoeffs::Complex(set) => Some(set),
        }
    }

    /// The real-valued contents by value, or `None` for a complex file.
    pub fn into_real(self) -> Option<CoeffSet<f64>> {
        match self {
            ShCoeffs::Real(set) => Some(set),
            ShCoeffs::Complex(_) => None,
        }
    }

    /// The complex-valued contents by value, or `None` for a real file.
    pub fn into_complex(self) -> Option<CoeffSet<c64>> {
        match self {
            ShCoeffs::Real(_) => None,
            ShCoeffs::Complex(set) => Some(set),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real_set() -> CoeffSet<f64> {
        CoeffSet {
            coeffs: Array3::from_elem((2, 3, 3), 1.5),
            errors: None,
            header: Some(vec!["made".to_string(), "up".to_string()]),
            lmax: 2,
        }
    }

    fn complex_set() -> CoeffSet<c64> {
        CoeffSet {
            coeffs: Array3::from_elem((2, 2, 2), c64::new(0.0, 1.0)),
            errors: Some(Array3::from_elem((2, 2, 2), c64::new(0.1, 0.0))),
            header: None,
            lmax: 1,
        }
    }

    #[test]
    fn real_accessors() {
        let sh = ShCoeffs::Real(real_set());
        assert_eq!(sh.kind(), CoeffKind::Real);
        assert_eq!(sh.lmax(), 2);
        assert_eq!(sh.header().unwrap(), ["made", "up"]);
        assert!(sh.as_real().is_some());
        assert!(sh.as_complex().is_none());
        assert!(sh.clone().into_complex().is_none());
        assert_eq!(sh.into_real().unwrap(), real_set());
    }

    #[test]
    fn complex_accessors() {
        let sh = ShCoeffs::Complex(complex_set());
        assert_eq!(sh.kind(), CoeffKind::Complex);
        assert_eq!(sh.lmax(), 1);
        assert!(sh.header().is_none());
        assert!(sh.as_real().is_none());
        assert!(sh.as_complex().is_some());
        assert!(sh.clone().into_real().is_none());
        assert_eq!(sh.into_complex().unwrap(), complex_set());
    }

    #[test]
    fn kind_display() {
        assert_eq!(format!("{}", CoeffKind::Real), "real");
        assert_eq!(format!("{}", CoeffKind::Complex), "complex");
    }
}
