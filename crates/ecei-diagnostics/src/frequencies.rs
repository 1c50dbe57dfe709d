// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Frequencies
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Cold-plasma characteristic frequencies on a profile grid.
//!
//! All four fields are angular frequencies [rad/s] in cgs units.
//! Negative densities or fields are not rejected: the square roots
//! turn them into NaN element by element and the rest of the grid is
//! unaffected.

use ecei_types::constants::{PhysicalConstants, CGS};
use ecei_types::state::{FrequencyBundle, Profile};
use ndarray::Zip;
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Electron plasma frequency: ω_p = sqrt(4π n_e e² / m_e).
pub fn plasma_frequency(ne: f64, k: &PhysicalConstants) -> f64 {
    (4.0 * PI * ne * k.e * k.e / k.m_e).sqrt()
}

/// Electron cyclotron frequency: ω_c = e B / (m_e c).
pub fn cyclotron_frequency(b: f64, k: &PhysicalConstants) -> f64 {
    k.e * b / (k.m_e * k.c)
}

/// ω_uh = sqrt(ω_p² + ω_c²).
pub fn upper_hybrid_frequency(w_p: f64, w_c: f64) -> f64 {
    (w_p * w_p + w_c * w_c).sqrt()
}

/// ω_lh ≈ sqrt(ω_p ω_c).
pub fn lower_hybrid_frequency(w_p: f64, w_c: f64) -> f64 {
    (w_p * w_c).sqrt()
}

/// Compute the frequency bundle with the cgs constants.
pub fn calc_frequencies(profile: &Profile) -> FrequencyBundle {
    calc_frequencies_with(profile, &CGS)
}

/// Compute the frequency bundle with an explicit constants set.
pub fn calc_frequencies_with(profile: &Profile, k: &PhysicalConstants) -> FrequencyBundle {
    let (nrows, ncols) = profile.shape();
    debug!(nrows, ncols, "computing cold-plasma frequencies");

    let w_p = profile.ne.mapv(|ne| plasma_frequency(ne, k));
    let w_c = profile.b.mapv(|b| cyclotron_frequency(b, k));
    let w_uh = Zip::from(&w_p)
        .and(&w_c)
        .map_collect(|&wp, &wc| upper_hybrid_frequency(wp, wc));
    let w_lh = Zip::from(&w_p)
        .and(&w_c)
        .map_collect(|&wp, &wc| lower_hybrid_frequency(wp, wc));

    let bundle = FrequencyBundle {
        w_p,
        w_c,
        w_uh,
        w_lh,
    };

    let bad = bundle.non_finite_count();
    if bad > 0 {
        warn!(
            non_finite = bad,
            "frequency bundle has non-finite entries (negative ne or ne*B?)"
        );
    }
    bundle
}
