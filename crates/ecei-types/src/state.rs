// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{EceiError, EceiResult};
use ndarray::{Array1, Array2, ArrayView1};

/// Electron density and magnetic field on a shared 2-D grid.
/// Rows index the poloidal/vertical direction, columns the radial one.
#[derive(Debug, Clone)]
pub struct Profile {
    pub ne: Array2<f64>, // Electron density [cm⁻³] [nz, nr]
    pub b: Array2<f64>,  // |B| [G] [nz, nr]
}

impl Profile {
    /// Pair density and field grids. Shapes must agree and be non-empty.
    /// Values are not range-checked: negative entries yield NaN downstream.
    pub fn new(ne: Array2<f64>, b: Array2<f64>) -> EceiResult<Self> {
        let ne_shape = [ne.nrows(), ne.ncols()];
        let b_shape = [b.nrows(), b.ncols()];
        if ne_shape != b_shape {
            return Err(EceiError::ShapeMismatch {
                ne: ne_shape,
                b: b_shape,
            });
        }
        if ne.is_empty() {
            return Err(EceiError::EmptyProfile { shape: ne_shape });
        }
        Ok(Profile { ne, b })
    }

    /// Grid shape as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        self.ne.dim()
    }
}

/// One of the five curves drawn per row, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrequencySeries {
    Plasma,         // w_p
    Cyclotron,      // w_c
    SecondHarmonic, // 2·w_c, second-harmonic ECE resonance
    UpperHybrid,    // w_uh
    LowerHybrid,    // w_lh
}

impl FrequencySeries {
    pub const ALL: [FrequencySeries; 5] = [
        FrequencySeries::Plasma,
        FrequencySeries::Cyclotron,
        FrequencySeries::SecondHarmonic,
        FrequencySeries::UpperHybrid,
        FrequencySeries::LowerHybrid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FrequencySeries::Plasma => "w_p",
            FrequencySeries::Cyclotron => "w_c",
            FrequencySeries::SecondHarmonic => "2w_c",
            FrequencySeries::UpperHybrid => "w_uh",
            FrequencySeries::LowerHybrid => "w_lh",
        }
    }
}

/// Cold-plasma characteristic angular frequencies [rad/s], one grid each.
/// Every field has the shape of the profile it was computed from.
#[derive(Debug, Clone)]
pub struct FrequencyBundle {
    pub w_p: Array2<f64>,  // Plasma frequency [rad/s] [nz, nr]
    pub w_c: Array2<f64>,  // Cyclotron frequency [rad/s] [nz, nr]
    pub w_uh: Array2<f64>, // Upper-hybrid frequency [rad/s] [nz, nr]
    pub w_lh: Array2<f64>, // Lower-hybrid frequency [rad/s] [nz, nr]
}

impl FrequencyBundle {
    pub fn shape(&self) -> (usize, usize) {
        self.w_p.dim()
    }

    pub fn nrows(&self) -> usize {
        self.w_p.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.w_p.ncols()
    }

    /// Values of `series` along row `row`.
    pub fn series_row(&self, series: FrequencySeries, row: usize) -> EceiResult<Array1<f64>> {
        let nrows = self.nrows();
        if row >= nrows {
            return Err(EceiError::RowOutOfBounds { row, nrows });
        }
        let values = match series {
            FrequencySeries::Plasma => self.w_p.row(row).to_owned(),
            FrequencySeries::Cyclotron => self.w_c.row(row).to_owned(),
            FrequencySeries::SecondHarmonic => self.w_c.row(row).mapv(|w| 2.0 * w),
            FrequencySeries::UpperHybrid => self.w_uh.row(row).to_owned(),
            FrequencySeries::LowerHybrid => self.w_lh.row(row).to_owned(),
        };
        Ok(values)
    }

    /// Number of NaN/inf entries across all four grids.
    pub fn non_finite_count(&self) -> usize {
        [&self.w_p, &self.w_c, &self.w_uh, &self.w_lh]
            .iter()
            .map(|field| field.iter().filter(|v| !v.is_finite()).count())
            .sum()
    }
}

/// Check that a radial coordinate array fits the bundle's columns.
pub fn check_radial_len(r: ArrayView1<f64>, bundle: &FrequencyBundle) -> EceiResult<()> {
    let expected = bundle.ncols();
    if r.len() != expected {
        return Err(EceiError::RadialLengthMismatch {
            expected,
            found: r.len(),
        });
    }
    Ok(())
}
