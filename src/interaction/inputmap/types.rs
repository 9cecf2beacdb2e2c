use bevy::prelude::*;
use smallvec::SmallVec;

/// Every keyboard-triggerable command. Screens decide what each one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action { Accept, Cancel, Generate, GenerateAll, ToggleMutant, ToggleRandom, CopyHex, CopyRgb, CopyHsv, Help }

impl Action {
    pub const ALL: [Action; 10] = [Action::Accept, Action::Cancel, Action::Generate, Action::GenerateAll, Action::ToggleMutant, Action::ToggleRandom, Action::CopyHex, Action::CopyRgb, Action::CopyHsv, Action::Help];

    pub fn name(self) -> &'static str {
        match self { Action::Accept => "Accept", Action::Cancel => "Cancel", Action::Generate => "Generate", Action::GenerateAll => "GenerateAll", Action::ToggleMutant => "ToggleMutant", Action::ToggleRandom => "ToggleRandom", Action::CopyHex => "CopyHex", Action::CopyRgb => "CopyRgb", Action::CopyHsv => "CopyHsv", Action::Help => "Help" }
    }

    pub fn from_name(name: &str) -> Option<Action> { Self::ALL.iter().copied().find(|a| a.name() == name) }
}

/// A chord of keys that must all be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding { pub action: Action, pub keys: SmallVec<[KeyCode; 2]>, pub label: String }

#[derive(Debug, Default, Clone, Copy)]
pub struct BindingRuntime {
    pub active: bool,
    /// Set while shadowed; stays set until the binding's own chord breaks.
    pub suppressed: bool,
}

/// Edges produced by one evaluation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActionEdges { pub pressed: Vec<Action>, pub released: Vec<Action> }

#[derive(Resource, Debug, Default, Clone)]
pub struct InputMap {
    pub bindings: Vec<Binding>,
    pub bindings_runtime: Vec<BindingRuntime>,
    pub frame_counter: u64,
}

impl InputMap {
    pub fn push(&mut self, binding: Binding) { self.bindings.push(binding); self.bindings_runtime.push(BindingRuntime::default()); }

    /// Human-readable chords bound to `action`, in declaration order.
    pub fn labels(&self, action: Action) -> Vec<&str> { self.bindings.iter().filter(|b| b.action == action).map(|b| b.label.as_str()).collect() }

    /// Advance every binding against the current key state. An action fires
    /// once when the first of its chords becomes fully held and releases once
    /// when the last of them breaks. Longer chords shadow the shorter chords
    /// they contain, and a shadowed binding stays inert until its own keys
    /// are released.
    pub fn evaluate(&mut self, held: impl Fn(KeyCode) -> bool) -> ActionEdges {
        self.frame_counter += 1;
        if self.bindings_runtime.len() < self.bindings.len() { self.bindings_runtime.resize(self.bindings.len(), BindingRuntime::default()); }
        let now: Vec<bool> = self.bindings.iter().map(|b| !b.keys.is_empty() && b.keys.iter().all(|k| held(*k))).collect();
        // A held chord suppresses any held binding whose keys are a strict subset of it.
        let shadowed: Vec<bool> = self.bindings.iter().enumerate().map(|(i, b)| now[i] && self.bindings.iter().enumerate().any(|(j, o)| j != i && now[j] && o.keys.len() > b.keys.len() && b.keys.iter().all(|k| o.keys.contains(k)))).collect();
        let before = self.active_actions();
        for (i, rt) in self.bindings_runtime.iter_mut().enumerate().take(now.len()) {
            rt.suppressed = now[i] && (rt.suppressed || shadowed[i]);
            rt.active = now[i] && !rt.suppressed;
        }
        let after = self.active_actions();
        ActionEdges {
            pressed: after.iter().filter(|a| !before.contains(a)).copied().collect(),
            released: before.iter().filter(|a| !after.contains(a)).copied().collect(),
        }
    }

    /// Actions with at least one active binding, deduplicated in binding order.
    fn active_actions(&self) -> Vec<Action> {
        let mut out = Vec::new();
        for (b, rt) in self.bindings.iter().zip(&self.bindings_runtime) {
            if rt.active && !out.contains(&b.action) { out.push(b.action); }
        }
        out
    }
}
