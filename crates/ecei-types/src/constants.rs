// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical constants in centimeter-gram-second (Gaussian) units.

/// Elementary charge (statC)
pub const E_CHARGE_CGS: f64 = 4.803_204_712_570_263_7e-10;

/// Electron mass (g)
pub const M_ELECTRON_CGS: f64 = 9.109_383_701_5e-28;

/// Speed of light (cm/s)
pub const C_LIGHT_CGS: f64 = 2.997_924_58e10;

/// The constants the cold-plasma frequency formulas need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Elementary charge.
    pub e: f64,
    /// Electron mass.
    pub m_e: f64,
    /// Speed of light.
    pub c: f64,
}

/// Gaussian cgs unit system. Densities in cm⁻³, fields in gauss.
pub const CGS: PhysicalConstants = PhysicalConstants {
    e: E_CHARGE_CGS,
    m_e: M_ELECTRON_CGS,
    c: C_LIGHT_CGS,
};
