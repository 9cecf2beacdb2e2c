//! The hemospectrum: twelve castes around the hue circle.
//! Single source of truth for caste names, reference colors and base hues.

use crate::core::color::Rgba;

/// Reference color per caste, index order.
pub const HEMOSPECTRUM: [Rgba; Caste::COUNT] = [
    Rgba::from_hex(0xA10000), // Burgundy
    Rgba::from_hex(0xA15203), // Bronze
    Rgba::from_hex(0xA1A100), // Ochre
    Rgba::from_hex(0x658200), // Lime
    Rgba::from_hex(0x416600), // Olive
    Rgba::from_hex(0x078446), // Jade
    Rgba::from_hex(0x008282), // Aqua
    Rgba::from_hex(0x004182), // Cobalt
    Rgba::from_hex(0x0041CB), // Indigo
    Rgba::from_hex(0x631DB4), // Purple
    Rgba::from_hex(0x6A006A), // Violet
    Rgba::from_hex(0x99004D), // Fuchsia
];

const NAMES: [&str; Caste::COUNT] = [
    "Burgundy", "Bronze", "Ochre", "Lime", "Olive", "Jade", "Aqua", "Cobalt", "Indigo", "Purple",
    "Violet", "Fuchsia",
];

/// Index into the hemospectrum, always `< Caste::COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Caste(u8);

impl Caste {
    pub const COUNT: usize = 12;

    pub fn new(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index as u8))
    }

    pub fn all() -> impl Iterator<Item = Caste> {
        (0..Self::COUNT as u8).map(Caste)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    pub fn reference(self) -> Rgba {
        HEMOSPECTRUM[self.index()]
    }

    /// `index * 30` degrees.
    #[inline]
    pub fn nominal_hue(self) -> f64 {
        self.0 as f64 * 30.0
    }

    /// Anchor hue for narrow generation. Lime and Olive sit off the 30° grid.
    pub fn base_hue(self) -> f64 {
        match self.0 {
            3 => 73.0,
            4 => 82.0,
            _ => self.nominal_hue(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_bounds() {
        assert_eq!(Caste::new(11).map(Caste::index), Some(11));
        assert!(Caste::new(12).is_none());
        assert_eq!(Caste::all().count(), Caste::COUNT);
        assert_eq!(Caste::default().name(), "Burgundy");
    }

    #[test]
    fn base_hue_exceptions() {
        let hues: Vec<f64> = Caste::all().map(Caste::base_hue).collect();
        assert_eq!(hues[2], 60.0);
        assert_eq!(hues[3], 73.0);
        assert_eq!(hues[4], 82.0);
        assert_eq!(hues[5], 150.0);
        assert_eq!(hues[11], 330.0);
    }

    #[test]
    fn reference_colors_close_to_base_hue() {
        // Reference colors were picked around the base hues; none should be
        // further than a sector away.
        for caste in Caste::all() {
            let h = caste.reference().to_hsv().h;
            let diff = (h - caste.base_hue()).rem_euclid(360.0);
            let diff = diff.min(360.0 - diff);
            assert!(diff < 20.0, "{} hue {h} vs base {}", caste.name(), caste.base_hue());
        }
    }

    #[test]
    fn all_reference_colors_distinct() {
        for (i, c1) in HEMOSPECTRUM.iter().enumerate() {
            for (j, c2) in HEMOSPECTRUM.iter().enumerate() {
                if i != j {
                    assert_ne!(c1, c2, "duplicate colors at {i} and {j}");
                }
            }
        }
    }
}
