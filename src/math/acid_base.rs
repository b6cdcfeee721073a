//! Closed-form acid-base equilibrium expressions (25 °C, concentration based).
//!
//! Conventions:
//! - concentrations in mol/L, all logarithms base 10
//! - `pH + pOH = 14` (`Kw = 1e-14`)
//!
//! None of these functions guard their log arguments; the regime tables in
//! `crate::models` only call them where the argument is known to be positive.

use crate::domain::{KW, PKW};

/// `p(x) = -log10(x)`.
pub fn p(value: f64) -> f64 {
    -value.log10()
}

/// pKa of a dissociation constant.
pub fn pka(ka: f64) -> f64 {
    p(ka)
}

/// pH of a solution with the given hydronium concentration.
pub fn ph_from_hydronium(concentration: f64) -> f64 {
    p(concentration)
}

/// pH of a solution with the given hydroxide concentration.
pub fn ph_from_hydroxide(concentration: f64) -> f64 {
    PKW - p(concentration)
}

/// Weak acid alone: `[H+] ≈ √(Ka·Ca)`.
///
/// Assumes `Ka ≪ Ca` (the dissociated fraction is neglected). Very weak or very
/// dilute acids are not corrected with the quadratic solution.
pub fn weak_acid_ph(ka: f64, concentration: f64) -> f64 {
    ph_from_hydronium((ka * concentration).sqrt())
}

/// Weak base alone: `[OH-] ≈ √(Kb·Cb)`.
pub fn weak_base_ph(kb: f64, concentration: f64) -> f64 {
    ph_from_hydroxide((kb * concentration).sqrt())
}

/// Henderson–Hasselbalch: `pH = pKa + log10([A-]/[HA])`.
///
/// Amounts may be given in moles; the shared volume cancels.
pub fn henderson_hasselbalch(pka: f64, base: f64, acid: f64) -> f64 {
    pka + (base / acid).log10()
}

/// Conjugate base alone (weak-acid equivalence point): `Kb = Kw/Ka`,
/// `pOH = ½(pKb + p(Cb))`.
pub fn conjugate_base_ph(ka: f64, concentration: f64) -> f64 {
    let kb = KW / ka;
    let poh = 0.5 * (p(kb) + p(concentration));
    PKW - poh
}

/// Conjugate acid alone (weak-base equivalence point): `pH = ½(pKa + p(Ca))`.
pub fn conjugate_acid_ph(pka: f64, concentration: f64) -> f64 {
    0.5 * (pka + p(concentration))
}

/// Amphiprotic intermediate (inner equivalence points of polyprotic acids).
pub fn amphiprotic_ph(pka_lower: f64, pka_upper: f64) -> f64 {
    0.5 * (pka_lower + pka_upper)
}
