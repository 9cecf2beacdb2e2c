//! Color set: the current color, its history, the caste selector and every
//! button whose flags drive the picker's visuals.

pub mod caste;
pub mod generate;
pub mod history;
pub mod layout;

use bevy::prelude::*;
use rand::Rng;

use crate::core::color::{ExportFormat, Rgba};
use crate::interaction::button::{first_hit, Button};
use caste::Caste;
use generate::Generator;
use history::{History, Swatch};

/// What a left click on the picker landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Generate,
    GenerateAll,
    Mutant,
    Random,
    Caste(Caste),
    History(usize),
    Copy(ExportFormat),
}

#[derive(Resource, Debug, Clone)]
pub struct ColorSet {
    current: Swatch,
    base: Caste,
    history: History,
    hue_jitter: f64,
    generate_all_count: usize,
    pub castes: Vec<Button>,
    pub history_buttons: Vec<Button>,
    pub copy_buttons: Vec<Button>,
    pub generate: Button,
    pub generate_all: Button,
    pub mutant: Button,
    pub random: Button,
}

impl Default for ColorSet {
    fn default() -> Self {
        Self::new(10, generate::DEFAULT_HUE_JITTER, 11)
    }
}

impl ColorSet {
    /// Fresh set: black everywhere, caste 0 selected.
    pub fn new(history_len: usize, hue_jitter: f64, generate_all_count: usize) -> Self {
        let history = History::new(history_len);
        let mut castes: Vec<Button> = Caste::all().map(layout::caste_button).collect();
        castes[0].active = true;
        Self {
            current: Swatch::default(),
            base: Caste::default(),
            history_buttons: (0..history.len()).map(layout::history_button).collect(),
            history,
            hue_jitter,
            generate_all_count,
            castes,
            copy_buttons: (0..ExportFormat::ALL.len()).map(layout::copy_button).collect(),
            generate: layout::generate_button(),
            generate_all: layout::generate_all_button(),
            mutant: layout::mutant_button(),
            random: layout::random_button(),
        }
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.current.color
    }

    /// Caste the current color was generated under.
    #[inline]
    pub fn color_caste(&self) -> Caste {
        self.current.caste
    }

    /// Caste the next generation draws from.
    #[inline]
    pub fn base_caste(&self) -> Caste {
        self.base
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn generator(&self) -> Generator {
        Generator { hue_jitter: self.hue_jitter, mutant: self.mutant.active }
    }

    /// Replace the current color, pushing the previous one into history.
    pub fn set_color(&mut self, color: Rgba) {
        let previous = std::mem::replace(&mut self.current, Swatch::new(color, self.base));
        self.history.push(previous);
    }

    fn select(&mut self, caste: Caste) {
        self.castes[self.base.index()].active = false;
        self.base = caste;
        self.castes[caste.index()].active = true;
    }

    fn generate_once<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Rgba {
        if self.random.active {
            let pick = Caste::new(rng.gen_range(0..Caste::COUNT)).unwrap_or_default();
            self.select(pick);
        }
        let color = Rgba::from_hsv(self.generator().sample(rng, self.base));
        self.set_color(color);
        color
    }

    /// Generate one color from the base caste.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Rgba {
        self.generate.press();
        self.generate_once(rng)
    }

    /// Refill history and current with fresh shades.
    pub fn generate_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Rgba {
        self.generate_all.press();
        let mut last = self.color();
        for _ in 0..self.generate_all_count {
            last = self.generate_once(rng);
        }
        last
    }

    /// Exchange the current swatch with history slot `idx`; the caste
    /// indicator follows the swapped-in color.
    pub fn swap_color(&mut self, idx: usize) -> bool {
        if !self.history.swap(idx, &mut self.current) {
            return false;
        }
        self.history_buttons[idx].press();
        let caste = self.current.caste;
        self.select(caste);
        true
    }

    /// Make `caste` the generation anchor. Selecting the active caste only presses it.
    pub fn set_caste(&mut self, caste: Caste) {
        self.castes[caste.index()].press();
        if caste != self.base {
            self.select(caste);
        }
    }

    pub fn toggle_mutant(&mut self) -> bool {
        self.mutant.toggle();
        self.mutant.press();
        self.mutant.active
    }

    pub fn toggle_random(&mut self) -> bool {
        self.random.toggle();
        self.random.press();
        self.random.active
    }

    /// Text for the clipboard; also presses the matching copy button.
    pub fn clip_color(&mut self, format: ExportFormat) -> String {
        if let Some(idx) = ExportFormat::ALL.iter().position(|f| *f == format) {
            self.copy_buttons[idx].press();
        }
        format.export(self.color())
    }

    /// Clear every momentary press, leaving active flags alone.
    pub fn unpress(&mut self) {
        let singles = [&mut self.generate, &mut self.generate_all, &mut self.mutant, &mut self.random];
        for b in singles {
            b.release();
        }
        for b in self.castes.iter_mut().chain(&mut self.history_buttons).chain(&mut self.copy_buttons) {
            b.release();
        }
    }

    /// Resolve a cursor position: fixed buttons first, then the caste,
    /// history and copy groups, first match wins.
    pub fn hit_test(&self, p: Vec2) -> Option<Hit> {
        if self.generate.hit(p) {
            return Some(Hit::Generate);
        }
        if self.generate_all.hit(p) {
            return Some(Hit::GenerateAll);
        }
        if self.mutant.hit(p) {
            return Some(Hit::Mutant);
        }
        if self.random.hit(p) {
            return Some(Hit::Random);
        }
        if let Some(i) = first_hit(self.castes.iter().map(|b| &b.rect), p) {
            return Caste::new(i).map(Hit::Caste);
        }
        if let Some(i) = first_hit(self.history_buttons.iter().map(|b| &b.rect), p) {
            return Some(Hit::History(i));
        }
        first_hit(self.copy_buttons.iter().map(|b| &b.rect), p)
            .and_then(ExportFormat::from_index)
            .map(Hit::Copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn center(b: &Button) -> Vec2 {
        Vec2::new(b.rect.x as f32 + b.rect.w as f32 / 2.0, b.rect.y as f32 + b.rect.h as f32 / 2.0)
    }

    #[test]
    fn initial_state() {
        let set = ColorSet::default();
        assert_eq!(set.color(), Rgba::BLACK);
        assert_eq!(set.base_caste().index(), 0);
        assert!(set.castes[0].active);
        assert_eq!(set.castes.iter().filter(|b| b.active).count(), 1);
        assert!(set.history().iter().all(|s| s.color == Rgba::BLACK));
    }

    #[test]
    fn generate_shifts_previous_into_history() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut set = ColorSet::default();
        let first = set.generate(&mut rng);
        assert!(set.generate.pressed);
        assert_eq!(set.history().get(0).unwrap().color, Rgba::BLACK);
        let second = set.generate(&mut rng);
        assert_eq!(set.color(), second);
        assert_eq!(set.history().get(0).unwrap().color, first);
        assert_eq!(set.history().len(), 10);
    }

    #[test]
    fn history_keeps_most_recent_colors_in_order() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut set = ColorSet::default();
        let returned: Vec<Rgba> = (0..13).map(|_| set.generate(&mut rng)).collect();
        assert_eq!(set.color(), returned[12]);
        assert_eq!(set.history().len(), 10);
        for i in 0..10 {
            assert_eq!(set.history().get(i).unwrap().color, returned[11 - i], "slot {i}");
        }
    }

    #[test]
    fn generate_all_overwrites_whole_history() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut set = ColorSet::default();
        set.generate_all(&mut rng);
        assert!(set.generate_all.pressed);
        assert!(set.history().iter().all(|s| s.color != Rgba::BLACK));
    }

    #[test]
    fn swap_moves_caste_indicator() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut set = ColorSet::default();
        set.set_caste(Caste::new(6).unwrap());
        let aqua = set.generate(&mut rng);
        set.set_caste(Caste::new(9).unwrap());
        set.generate(&mut rng);

        assert!(set.swap_color(0));
        assert_eq!(set.color(), aqua);
        assert_eq!(set.base_caste().index(), 6);
        assert!(set.castes[6].active && !set.castes[9].active);
        assert_eq!(set.history().get(0).unwrap().caste.index(), 9);
        assert!(set.history_buttons[0].pressed);
    }

    #[test]
    fn selecting_active_caste_keeps_it_active() {
        let mut set = ColorSet::default();
        set.set_caste(Caste::default());
        assert!(set.castes[0].active && set.castes[0].pressed);
    }

    #[test]
    fn random_toggle_picks_castes() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut set = ColorSet::default();
        assert!(set.toggle_random());
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            set.generate(&mut rng);
            assert_eq!(set.castes.iter().filter(|b| b.active).count(), 1);
            assert!(set.castes[set.base_caste().index()].active);
            seen.insert(set.base_caste());
        }
        assert!(seen.len() > 6);
    }

    #[test]
    fn unpress_clears_momentary_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut set = ColorSet::default();
        set.toggle_mutant();
        set.generate(&mut rng);
        set.clip_color(ExportFormat::Rgb);
        set.unpress();
        assert!(!set.generate.pressed && !set.mutant.pressed && !set.copy_buttons[1].pressed);
        assert!(set.mutant.active);
        assert!(set.castes[0].active);
    }

    #[test]
    fn hit_test_routes_every_group() {
        let set = ColorSet::default();
        assert_eq!(set.hit_test(center(&set.generate)), Some(Hit::Generate));
        assert_eq!(set.hit_test(center(&set.generate_all)), Some(Hit::GenerateAll));
        assert_eq!(set.hit_test(center(&set.mutant)), Some(Hit::Mutant));
        assert_eq!(set.hit_test(center(&set.random)), Some(Hit::Random));
        assert_eq!(set.hit_test(center(&set.castes[5])), Some(Hit::Caste(Caste::new(5).unwrap())));
        assert_eq!(set.hit_test(center(&set.history_buttons[7])), Some(Hit::History(7)));
        assert_eq!(set.hit_test(center(&set.copy_buttons[2])), Some(Hit::Copy(ExportFormat::Hsv)));
        assert_eq!(set.hit_test(Vec2::new(700.0, 500.0)), None);
    }
}
