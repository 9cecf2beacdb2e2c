//! Random blood color sampling around a caste hue.

use rand::Rng;
use rand_distr::{Distribution, Triangular};

use super::caste::Caste;
use crate::core::color::Hsv;

/// Default upper bound of the hue drift added in caste mode, in degrees.
pub const DEFAULT_HUE_JITTER: f64 = 7.5;
/// Half-width of the uniform hue window in mutant mode, in degrees.
pub const MUTANT_HUE_SPREAD: f64 = 15.0;

/// Triangular sample on `[low, high]` peaking at `mode`. An empty or
/// inverted range yields `low`.
pub fn triangular<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64, mode: f64) -> f64 {
    Triangular::new(low, high, mode).map_or(low, |d| d.sample(rng))
}

/// Wrap into `[0, 360)`. `rem_euclid` rounds tiny negatives up to 360.
pub fn wrap_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    if h >= 360.0 { 0.0 } else { h }
}

/// Sampling knobs for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generator {
    pub hue_jitter: f64,
    pub mutant: bool,
}

impl Default for Generator {
    fn default() -> Self {
        Self { hue_jitter: DEFAULT_HUE_JITTER, mutant: false }
    }
}

impl Generator {
    /// Sample an HSV triple for `caste`.
    ///
    /// Caste mode skews the hue towards the caste's base hue and keeps
    /// saturation high and value mid-dark. Mutant mode picks anything within
    /// ±15° of the nominal caste hue with uniform saturation and value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, caste: Caste) -> Hsv {
        if self.mutant {
            let h = caste.nominal_hue() + rng.gen_range(-MUTANT_HUE_SPREAD..MUTANT_HUE_SPREAD);
            Hsv { h: wrap_hue(h), s: rng.gen(), v: rng.gen() }
        } else {
            let h = caste.base_hue() + triangular(rng, 0.0, self.hue_jitter, 0.0);
            let s = triangular(rng, 0.8, 1.0, 0.98);
            let v = triangular(rng, 0.4, 0.8, 0.57);
            Hsv { h: wrap_hue(h), s, v }
        }
    }
}
