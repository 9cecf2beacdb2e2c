//! Fixed-capacity, most-recent-first color history.

use super::caste::Caste;
use crate::core::color::Rgba;

/// A color together with the caste it was generated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Swatch {
    pub color: Rgba,
    pub caste: Caste,
}

impl Swatch {
    pub const fn new(color: Rgba, caste: Caste) -> Self {
        Self { color, caste }
    }
}

/// Index 0 is the most recent entry. The length never changes after
/// construction; every push evicts the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    slots: Vec<Swatch>,
}

impl History {
    /// All slots start black under caste 0. `capacity` of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        Self { slots: vec![Swatch::default(); capacity.max(1)] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Swatch> {
        self.slots.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swatch> {
        self.slots.iter()
    }

    /// Shift everything one slot right and insert at 0.
    pub fn push(&mut self, swatch: Swatch) {
        self.slots.rotate_right(1);
        self.slots[0] = swatch;
    }

    /// Exchange `current` with slot `idx` in place. Returns false (and leaves
    /// both untouched) when `idx` is out of range.
    pub fn swap(&mut self, idx: usize, current: &mut Swatch) -> bool {
        match self.slots.get_mut(idx) {
            Some(slot) => {
                std::mem::swap(slot, current);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sw(hex: u32) -> Swatch {
        Swatch::new(Rgba::from_hex(hex), Caste::default())
    }

    #[test]
    fn starts_black() {
        let h = History::new(10);
        assert_eq!(h.len(), 10);
        assert!(h.iter().all(|s| s.color == Rgba::BLACK));
        assert_eq!(History::new(0).len(), 1);
    }

    #[test]
    fn push_keeps_recency_order_and_length() {
        let mut h = History::new(3);
        for hex in 1..=5 {
            h.push(sw(hex));
            assert_eq!(h.len(), 3);
        }
        let order: Vec<u32> = h.iter().map(|s| s.color.to_hex()).collect();
        assert_eq!(order, vec![5, 4, 3]);
    }

    #[test]
    fn swap_is_an_involution() {
        let mut h = History::new(4);
        h.push(sw(0x111111));
        h.push(sw(0x222222));
        let before = h.clone();
        let mut current = Swatch::new(Rgba::from_hex(0xABCDEF), Caste::new(7).unwrap());
        let cur_before = current;

        assert!(h.swap(1, &mut current));
        assert_eq!(current, sw(0x111111));
        assert_eq!(h.get(1).unwrap().caste.index(), 7);
        assert!(h.swap(1, &mut current));
        assert_eq!(current, cur_before);
        assert_eq!(h, before);
    }

    #[test]
    fn swap_out_of_range_is_noop() {
        let mut h = History::new(2);
        let mut current = sw(0x123456);
        assert!(!h.swap(2, &mut current));
        assert_eq!(current, sw(0x123456));
    }
}
