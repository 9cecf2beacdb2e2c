use super::types::*;
use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Bundled key bindings, used when no input.toml is readable.
pub const DEFAULT_INPUT_TOML: &str = include_str!("../../../assets/config/input.toml");

#[derive(Debug, Default)]
pub struct ParsedInputConfig { pub input_map: InputMap, pub errors: Vec<String> }

#[derive(Debug, serde::Deserialize)]
struct DebugToml { bindings: Option<HashMap<String, Vec<String>>> }

#[derive(Debug, serde::Deserialize)]
struct RootToml { bindings: Option<HashMap<String, Vec<String>>>, debug: Option<DebugToml> }

pub fn parse_input_toml(raw: &str, debug_layer: bool) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) { Ok(r) => r, Err(e) => { result.errors.push(format!("Top-level parse: {e}")); return result; } };

    // Merge bindings (normal + debug overlay if allowed)
    let mut all_bindings: Vec<(String, Vec<String>)> = root.bindings.unwrap_or_default().into_iter().collect();
    if debug_layer { if let Some(db) = root.debug.and_then(|d| d.bindings) { all_bindings.extend(db); } }
    // HashMap order is arbitrary; keep the map deterministic for labels and tests.
    all_bindings.sort_by_key(|(name, _)| Action::from_name(name).map(|a| a as u8).unwrap_or(u8::MAX));

    for (action_name, list) in all_bindings {
        let Some(action) = Action::from_name(&action_name) else { result.errors.push(format!("Binding references unknown action '{}'", action_name)); continue; };
        for chord in &list { match parse_binding(chord) { Ok(keys) => result.input_map.push(Binding { action, keys, label: display_label(chord) }), Err(err) => result.errors.push(format!("[binding {} '{}'] {err}", action_name, chord)) } }
    }
    result
}

/// Bindings from the bundled defaults. The bundled file is known-good; any
/// error it produces is a packaging mistake and gets logged by the caller.
pub fn default_input_map() -> ParsedInputConfig { parse_input_toml(DEFAULT_INPUT_TOML, false) }

fn display_label(chord: &str) -> String { chord.split('+').map(|p| p.trim().trim_start_matches("Key:")).collect::<Vec<_>>().join("+") }

fn parse_binding(chord: &str) -> Result<SmallVec<[KeyCode; 2]>, String> {
    let mut keys: SmallVec<[KeyCode; 2]> = SmallVec::new();
    let mut seen: HashSet<KeyCode> = HashSet::new();
    for part in chord.split('+') {
        let p = part.trim(); if p.is_empty() { continue; }
        let Some(name) = p.strip_prefix("Key:") else { return Err(format!("Unrecognized token '{}' (expected Key:<name>)", p)); };
        let key = parse_keycode(name)?;
        if !seen.insert(key) { return Err(format!("Duplicate token in chord: {:?}", key)); }
        keys.push(key);
    }
    if keys.is_empty() { return Err("Empty binding".into()); }
    Ok(keys)
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Enter", KeyCode::Enter), ("Return", KeyCode::Enter), ("NumpadEnter", KeyCode::NumpadEnter), ("Escape", KeyCode::Escape), ("Space", KeyCode::Space), ("Tab", KeyCode::Tab), ("Backspace", KeyCode::Backspace), ("Delete", KeyCode::Delete),
    ("ControlLeft", KeyCode::ControlLeft), ("ControlRight", KeyCode::ControlRight), ("ShiftLeft", KeyCode::ShiftLeft), ("ShiftRight", KeyCode::ShiftRight), ("AltLeft", KeyCode::AltLeft), ("AltRight", KeyCode::AltRight),
    ("F1", KeyCode::F1), ("F2", KeyCode::F2), ("F3", KeyCode::F3), ("F4", KeyCode::F4), ("F5", KeyCode::F5), ("F6", KeyCode::F6), ("F7", KeyCode::F7), ("F8", KeyCode::F8), ("F9", KeyCode::F9), ("F10", KeyCode::F10), ("F11", KeyCode::F11), ("F12", KeyCode::F12),
    ("Digit0", KeyCode::Digit0), ("Digit1", KeyCode::Digit1), ("Digit2", KeyCode::Digit2), ("Digit3", KeyCode::Digit3), ("Digit4", KeyCode::Digit4), ("Digit5", KeyCode::Digit5), ("Digit6", KeyCode::Digit6), ("Digit7", KeyCode::Digit7), ("Digit8", KeyCode::Digit8), ("Digit9", KeyCode::Digit9),
    ("A", KeyCode::KeyA), ("B", KeyCode::KeyB), ("C", KeyCode::KeyC), ("D", KeyCode::KeyD), ("E", KeyCode::KeyE), ("F", KeyCode::KeyF), ("G", KeyCode::KeyG), ("H", KeyCode::KeyH), ("I", KeyCode::KeyI), ("J", KeyCode::KeyJ), ("K", KeyCode::KeyK), ("L", KeyCode::KeyL), ("M", KeyCode::KeyM),
    ("N", KeyCode::KeyN), ("O", KeyCode::KeyO), ("P", KeyCode::KeyP), ("Q", KeyCode::KeyQ), ("R", KeyCode::KeyR), ("S", KeyCode::KeyS), ("T", KeyCode::KeyT), ("U", KeyCode::KeyU), ("V", KeyCode::KeyV), ("W", KeyCode::KeyW), ("X", KeyCode::KeyX), ("Y", KeyCode::KeyY), ("Z", KeyCode::KeyZ),
];

/// `A` and `KeyA` name the same key; digits accept `Digit1` only.
fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    let lookup = if name.len() == 4 && name.starts_with("Key") { &name[3..] } else { name };
    NAMED_KEYS.iter().find(|(n, _)| *n == lookup).map(|(_, k)| *k).ok_or_else(|| format!("Unsupported KeyCode '{}' (extend parser)", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse_cleanly() {
        let parsed = default_input_map();
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.input_map.labels(Action::Accept), vec!["Enter"]);
        assert_eq!(parsed.input_map.labels(Action::Cancel), vec!["Escape"]);
        assert_eq!(parsed.input_map.labels(Action::CopyHex), vec!["ControlLeft+C", "ControlRight+C"]);
    }

    #[test]
    fn bad_entries_are_collected_not_fatal() {
        let raw = r#"
            [bindings]
            Generate = ["Key:Space", "Key:Banana", "Mouse:Left"]
            Dance = ["Key:D"]
            Cancel = ["Key:Escape+Key:Escape"]
        "#;
        let parsed = parse_input_toml(raw, false);
        assert_eq!(parsed.input_map.bindings.len(), 1);
        assert_eq!(parsed.input_map.bindings[0].keys.as_slice(), &[KeyCode::Space]);
        let joined = parsed.errors.join("\n");
        assert!(joined.contains("Unsupported KeyCode 'Banana'"));
        assert!(joined.contains("Unrecognized token 'Mouse:Left'"));
        assert!(joined.contains("unknown action 'Dance'"));
        assert!(joined.contains("Duplicate token"));
    }

    #[test]
    fn debug_layer_only_when_enabled() {
        let raw = "[bindings]\nGenerate = [\"Key:G\"]\n[debug.bindings]\nGenerateAll = [\"Key:F5\"]\n";
        assert_eq!(parse_input_toml(raw, false).input_map.bindings.len(), 1);
        assert_eq!(parse_input_toml(raw, true).input_map.bindings.len(), 2);
    }

    #[test]
    fn chord_fires_once_and_shadows_subset() {
        let raw = "[bindings]\nGenerate = [\"Key:C\"]\nCopyHex = [\"Key:ControlLeft+Key:C\"]\n";
        let mut map = parse_input_toml(raw, false).input_map;
        let edges = map.evaluate(|k| k == KeyCode::ControlLeft || k == KeyCode::KeyC);
        assert_eq!(edges.pressed, vec![Action::CopyHex]);
        // holding keeps it quiet
        assert!(map.evaluate(|k| k == KeyCode::ControlLeft || k == KeyCode::KeyC).pressed.is_empty());
        let edges = map.evaluate(|_| false);
        assert_eq!(edges.released, vec![Action::CopyHex]);
        let edges = map.evaluate(|k| k == KeyCode::KeyC);
        assert_eq!(edges.pressed, vec![Action::Generate]);
    }

    #[test]
    fn releasing_modifier_first_keeps_plain_key_inert() {
        let mut map = default_input_map().input_map;
        let ctrl_r = |k: KeyCode| k == KeyCode::ControlLeft || k == KeyCode::KeyR;
        assert_eq!(map.evaluate(ctrl_r).pressed, vec![Action::CopyRgb]);
        let edges = map.evaluate(|k| k == KeyCode::KeyR);
        assert_eq!(edges, ActionEdges { pressed: vec![], released: vec![Action::CopyRgb] });
        assert!(map.evaluate(|k| k == KeyCode::KeyR).pressed.is_empty());
        assert!(map.evaluate(|_| false).released.is_empty());
        // a fresh press of R toggles again
        assert_eq!(map.evaluate(|k| k == KeyCode::KeyR).pressed, vec![Action::ToggleRandom]);
    }

    #[test]
    fn either_control_key_copies_once() {
        let mut map = default_input_map().input_map;
        let both = |k: KeyCode| matches!(k, KeyCode::ControlLeft | KeyCode::ControlRight | KeyCode::KeyC);
        assert_eq!(map.evaluate(both).pressed, vec![Action::CopyHex]);
        assert!(map.evaluate(|k| k == KeyCode::ControlRight || k == KeyCode::KeyC).released.is_empty());
        assert_eq!(map.evaluate(|_| false).released, vec![Action::CopyHex]);
        let mut map = default_input_map().input_map;
        assert_eq!(map.evaluate(|k| k == KeyCode::ControlRight || k == KeyCode::KeyH).pressed, vec![Action::CopyHsv]);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut map = default_input_map().input_map;
        let edges = map.evaluate(|k| k == KeyCode::KeyQ);
        assert!(edges.pressed.is_empty() && edges.released.is_empty());
    }
}
