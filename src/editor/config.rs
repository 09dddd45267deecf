use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub key_bindings: KeyBindings,
    /// Redraw rate while a simulation or build is animating.
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub quit: String,
    pub save: String,
    pub cancel: String,
    pub confirm: String,
    pub move_up: String,
    pub move_down: String,
    pub move_left: String,
    pub move_right: String,
    pub next_tab: String,
    pub prev_tab: String,
    pub open_menu: String,
    pub simulate: String,
    pub add_object: String,
    pub duplicate_object: String,
    pub delete_object: String,
    pub tool_select: String,
    pub tool_move: String,
    pub tool_rotate: String,
    pub tool_scale: String,
    pub transform_up: String,
    pub transform_down: String,
    pub transform_left: String,
    pub transform_right: String,
    pub toggle_physics: String,
    pub add_component: String,
    pub toggle_lock: String,
    pub toggle_grid: String,
    // Asset browser
    #[serde(default = "default_new_folder")]
    pub new_folder: String,
    #[serde(default = "default_import_asset")]
    pub import_asset: String,
    #[serde(default = "default_folder_up")]
    pub folder_up: String,
    // Tabs
    #[serde(default = "default_hot_reload")]
    pub hot_reload: String,
    #[serde(default = "default_start_build")]
    pub start_build: String,
    // Welcome screen
    #[serde(default = "default_new_project")]
    pub new_project: String,
    #[serde(default = "default_clear_recent")]
    pub clear_recent: String,
}

fn default_target_fps() -> u32 { 60 }
fn default_show_grid() -> bool { true }
fn default_new_folder() -> String { "n".into() }
fn default_import_asset() -> String { "i".into() }
fn default_folder_up() -> String { "Backspace".into() }
fn default_hot_reload() -> String { "h".into() }
fn default_start_build() -> String { "b".into() }
fn default_new_project() -> String { "n".into() }
fn default_clear_recent() -> String { "c".into() }

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            key_bindings: KeyBindings {
                quit: "q".into(),
                save: "Ctrl-s".into(),
                cancel: "Esc".into(),
                confirm: "Enter".into(),
                move_up: "Up".into(),
                move_down: "Down".into(),
                move_left: "Left".into(),
                move_right: "Right".into(),
                next_tab: "Tab".into(),
                prev_tab: "BackTab".into(),
                open_menu: "F10".into(),
                simulate: "F5".into(),
                add_object: "a".into(),
                duplicate_object: "d".into(),
                delete_object: "Delete".into(),
                tool_select: "1".into(),
                tool_move: "2".into(),
                tool_rotate: "3".into(),
                tool_scale: "4".into(),
                transform_up: "Shift-Up".into(),
                transform_down: "Shift-Down".into(),
                transform_left: "Shift-Left".into(),
                transform_right: "Shift-Right".into(),
                toggle_physics: "p".into(),
                add_component: "c".into(),
                toggle_lock: "l".into(),
                toggle_grid: "g".into(),
                new_folder: default_new_folder(),
                import_asset: default_import_asset(),
                folder_up: default_folder_up(),
                hot_reload: default_hot_reload(),
                start_build: default_start_build(),
                new_project: default_new_project(),
                clear_recent: default_clear_recent(),
            },
            target_fps: default_target_fps(),
            show_grid: default_show_grid(),
        }
    }
}

impl EditorConfig {
    pub fn load() -> Self {
        let config_path = config_dir().join("editor.json");
        match std::fs::read_to_string(&config_path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                warn!("invalid editor config ({e}), using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Poll interval for the editor loop.
    pub fn frame_ms(&self) -> u64 {
        (1000 / self.target_fps.clamp(1, 240)) as u64
    }
}

/// `~/.config/forge-studio`: config, recent projects, and the log file.
pub fn config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let mut path = PathBuf::from(home);
    path.push(".config");
    path.push("forge-studio");
    path
}

fn matches_key_name(name: &str, code: KeyCode) -> bool {
    match name {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "BackTab" => code == KeyCode::BackTab,
        "Backspace" => code == KeyCode::Backspace,
        "Delete" => code == KeyCode::Delete,
        "Home" => code == KeyCode::Home,
        "End" => code == KeyCode::End,
        "PageUp" => code == KeyCode::PageUp,
        "PageDown" => code == KeyCode::PageDown,
        s => {
            // F-key binding: "F1" through "F12" etc.
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return code == KeyCode::F(n);
                }
            }
            // Single character binding
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    let held = event.modifiers;
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return held.contains(KeyModifiers::ALT) && matches_key_name(rest, event.code);
    }
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return held.contains(KeyModifiers::CONTROL) && matches_key_name(rest, event.code);
    }
    if let Some(rest) = binding.strip_prefix("Shift-") {
        return held.contains(KeyModifiers::SHIFT)
            && !held.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            && matches_key_name(rest, event.code);
    }

    // Plain bindings must not fire on Ctrl/Alt chords.
    if held.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }
    // Shift only counts for named keys; characters already carry their case.
    if held.contains(KeyModifiers::SHIFT) && !matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
        return false;
    }
    matches_key_name(binding, event.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_and_chorded_bindings() {
        let none = KeyModifiers::NONE;
        assert!(matches_binding("a", &key(KeyCode::Char('a'), none)));
        assert!(!matches_binding("a", &key(KeyCode::Char('a'), KeyModifiers::ALT)));
        assert!(matches_binding("Ctrl-s", &key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-s", &key(KeyCode::Char('s'), none)));
        assert!(matches_binding("F5", &key(KeyCode::F(5), none)));
        assert!(matches_binding("Delete", &key(KeyCode::Delete, none)));
        assert!(!matches_binding("Up", &key(KeyCode::Down, none)));
    }

    #[test]
    fn test_shift_arrows_are_distinct() {
        let shift_up = key(KeyCode::Up, KeyModifiers::SHIFT);
        assert!(matches_binding("Shift-Up", &shift_up));
        assert!(!matches_binding("Up", &shift_up));
        assert!(!matches_binding("Shift-Up", &key(KeyCode::Up, KeyModifiers::NONE)));
        // Uppercase letters arrive with SHIFT held.
        assert!(matches_binding("L", &key(KeyCode::Char('L'), KeyModifiers::SHIFT)));
        assert!(matches_binding("BackTab", &key(KeyCode::BackTab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut value = serde_json::to_value(EditorConfig::default()).unwrap();
        let bindings = value["key_bindings"].as_object_mut().unwrap();
        bindings.remove("new_folder");
        bindings.insert("simulate".into(), "Space".into());
        value.as_object_mut().unwrap().remove("target_fps");

        let config = EditorConfig::from_json(&value.to_string()).unwrap();
        assert_eq!(config.key_bindings.new_folder, "n");
        assert_eq!(config.key_bindings.simulate, "Space");
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.frame_ms(), 16);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(EditorConfig::from_json("{\"key_bindings\": 3}").is_err());
    }
}
