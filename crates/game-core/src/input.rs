use std::collections::HashSet;
use std::path::Path;

use bracket_lib::prelude::VirtualKeyCode;
use common::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Logical in-game actions read each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Interact,
}

/// Queryable set of currently held logical keys.
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
}

/// Plain set of held actions, fed by hand.
#[derive(Clone, Debug, Default)]
pub struct KeySet {
    held: HashSet<Action>,
}

impl KeySet {
    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }
}

impl InputSource for KeySet {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

/// Physical keys currently down, resolved through the bindings.
pub struct KeyboardState<'a> {
    bindings: &'a InputConfig,
    pressed: &'a HashSet<VirtualKeyCode>,
}

impl<'a> KeyboardState<'a> {
    pub fn new(bindings: &'a InputConfig, pressed: &'a HashSet<VirtualKeyCode>) -> Self {
        Self { bindings, pressed }
    }
}

impl InputSource for KeyboardState<'_> {
    fn is_held(&self, action: Action) -> bool {
        self.bindings
            .keys_for(action)
            .iter()
            .any(|k| self.pressed.contains(k))
    }
}

/// Fires once on the transition from released to held.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeTrigger {
    was_held: bool,
}

impl EdgeTrigger {
    pub fn update(&mut self, held: bool) -> bool {
        let fired = held && !self.was_held;
        self.was_held = held;
        fired
    }

    pub fn reset(&mut self) {
        self.was_held = false;
    }
}

/// Resolved keyboard controls.
#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub left: Vec<VirtualKeyCode>,
    pub right: Vec<VirtualKeyCode>,
    pub up: Vec<VirtualKeyCode>,
    pub down: Vec<VirtualKeyCode>,
    pub interact: Vec<VirtualKeyCode>,
    pub save: VirtualKeyCode,
    pub menu: VirtualKeyCode,
    pub mute: VirtualKeyCode,
}

impl InputConfig {
    pub fn keys_for(&self, action: Action) -> &[VirtualKeyCode] {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::Interact => &self.interact,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            left: vec![Left, A],
            right: vec![Right, D],
            up: vec![Up, W],
            down: vec![Down, S],
            interact: vec![Space],
            save: F5,
            menu: Escape,
            mute: M,
        }
    }
}

/// Key bindings as written in the config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyNames {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub interact: Vec<String>,
    pub save: String,
    pub menu: String,
    pub mute: String,
}

impl Default for KeyNames {
    fn default() -> Self {
        let names = |v: &[&str]| -> Vec<String> { v.iter().map(|s| s.to_string()).collect() };
        Self {
            left: names(&["left", "a"]),
            right: names(&["right", "d"]),
            up: names(&["up", "w"]),
            down: names(&["down", "s"]),
            interact: names(&["space"]),
            save: "f5".into(),
            menu: "escape".into(),
            mute: "m".into(),
        }
    }
}

impl KeyNames {
    /// Resolves every name, failing on the first unknown one.
    pub fn resolve(&self) -> GameResult<InputConfig> {
        let list = |names: &[String]| -> GameResult<Vec<VirtualKeyCode>> {
            names.iter().map(|n| key(n)).collect()
        };
        Ok(InputConfig {
            left: list(&self.left)?,
            right: list(&self.right)?,
            up: list(&self.up)?,
            down: list(&self.down)?,
            interact: list(&self.interact)?,
            save: key(&self.save)?,
            menu: key(&self.menu)?,
            mute: key(&self.mute)?,
        })
    }
}

fn key(name: &str) -> GameResult<VirtualKeyCode> {
    parse_key(name).ok_or_else(|| GameError::Config(format!("unknown key `{name}`")))
}

/// Volume and asset settings for the audio manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub ambient_volume: f32,
    pub effect_volume: f32,
    pub muted: bool,
    pub asset_dir: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ambient_volume: 0.3,
            effect_volume: 0.5,
            muted: false,
            asset_dir: "assets".into(),
        }
    }
}

/// Everything read from `tacocat.ron`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub keys: KeyNames,
    pub audio: AudioSettings,
    pub colorblind: bool,
    pub save_dir: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            keys: KeyNames::default(),
            audio: AudioSettings::default(),
            colorblind: false,
            save_dir: "saves".into(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config_missing_using_defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let cfg = Self::parse(&data)?;
        info!(path = %path.display(), "config_loaded");
        Ok(cfg)
    }

    pub fn parse(data: &str) -> GameResult<Self> {
        ron::from_str(data).map_err(|e| GameError::Config(e.to_string()))
    }

    pub fn bindings(&self) -> GameResult<InputConfig> {
        self.keys.resolve()
    }
}

const LETTERS: [VirtualKeyCode; 26] = {
    use VirtualKeyCode::*;
    [
        A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    ]
};
const DIGITS: [VirtualKeyCode; 10] = {
    use VirtualKeyCode::*;
    [Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9]
};
const FUNCTION_KEYS: [VirtualKeyCode; 12] = {
    use VirtualKeyCode::*;
    [F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12]
};

/// Key by config name: a single letter or digit, `f1`..`f12`, or a named key.
fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    let name = name.to_ascii_lowercase();
    if let &[c] = name.as_bytes() {
        return match c {
            b'a'..=b'z' => Some(LETTERS[(c - b'a') as usize]),
            b'0'..=b'9' => Some(DIGITS[(c - b'0') as usize]),
            _ => None,
        };
    }
    if let Some(n) = name.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
        return n.checked_sub(1).and_then(|i| FUNCTION_KEYS.get(i)).copied();
    }
    match name.as_str() {
        "left" => Some(Left),
        "right" => Some(Right),
        "up" => Some(Up),
        "down" => Some(Down),
        "space" => Some(Space),
        "return" | "enter" => Some(Return),
        "escape" | "esc" => Some(Escape),
        "tab" => Some(Tab),
        "backspace" | "back" => Some(Back),
        _ => None,
    }
}

/// Letter, digit or space typed while naming a character.
pub fn typed_char(key: VirtualKeyCode, shift: bool) -> Option<char> {
    if let Some(i) = LETTERS.iter().position(|k| *k == key) {
        let c = (b'a' + i as u8) as char;
        return Some(if shift { c.to_ascii_uppercase() } else { c });
    }
    if let Some(i) = DIGITS.iter().position(|k| *k == key) {
        return Some((b'0' + i as u8) as char);
    }
    (key == VirtualKeyCode::Space).then_some(' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_nonexistent_returns_default() {
        let cfg = GameConfig::load("/no/such/tacocat.ron").unwrap();
        assert_eq!(cfg, GameConfig::default());
        let keys = cfg.bindings().unwrap();
        assert_eq!(keys.interact, vec![VirtualKeyCode::Space]);
        assert_eq!(keys.left, vec![VirtualKeyCode::Left, VirtualKeyCode::A]);
        assert_eq!(keys.save, VirtualKeyCode::F5);
        assert_eq!(keys, InputConfig::default());
    }

    #[test]
    fn load_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tacocat.ron");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"(keys: (interact: ["e", "return"]), colorblind: true, audio: (effect_volume: 0.8))"#
        )
        .unwrap();
        let cfg = GameConfig::load(&path).unwrap();
        assert!(cfg.colorblind);
        assert_eq!(cfg.audio.effect_volume, 0.8);
        assert_eq!(cfg.audio.ambient_volume, 0.3);
        assert_eq!(cfg.save_dir, "saves");
        let keys = cfg.bindings().unwrap();
        assert_eq!(keys.interact, vec![VirtualKeyCode::E, VirtualKeyCode::Return]);
        assert_eq!(keys.up, vec![VirtualKeyCode::Up, VirtualKeyCode::W]);
    }

    #[test]
    fn unknown_key_is_config_error() {
        let cfg = GameConfig::parse(r#"(keys: (save: "hyper"))"#).unwrap();
        assert!(matches!(cfg.bindings(), Err(GameError::Config(_))));
        assert!(matches!(GameConfig::parse("(keys: 3"), Err(GameError::Config(_))));
    }

    #[test]
    fn every_letter_digit_and_function_key_parses() {
        for (i, c) in ('a'..='z').enumerate() {
            assert_eq!(parse_key(&c.to_string()), Some(LETTERS[i]));
        }
        assert_eq!(parse_key("Q"), Some(VirtualKeyCode::Q));
        assert_eq!(parse_key("0"), Some(VirtualKeyCode::Key0));
        assert_eq!(parse_key("9"), Some(VirtualKeyCode::Key9));
        assert_eq!(parse_key("F12"), Some(VirtualKeyCode::F12));
        assert_eq!(parse_key("f0"), None);
        assert_eq!(parse_key("f13"), None);
        assert_eq!(parse_key("#"), None);
        let cfg = GameConfig::parse(r#"(keys: (interact: ["q", "7"], mute: "n"))"#).unwrap();
        let keys = cfg.bindings().unwrap();
        assert_eq!(keys.interact, vec![VirtualKeyCode::Q, VirtualKeyCode::Key7]);
        assert_eq!(keys.mute, VirtualKeyCode::N);
    }

    #[test]
    fn keyboard_state_maps_bindings() {
        let bindings = InputConfig::default();
        let pressed: HashSet<_> = [VirtualKeyCode::D, VirtualKeyCode::Space].into_iter().collect();
        let state = KeyboardState::new(&bindings, &pressed);
        assert!(state.is_held(Action::Right));
        assert!(state.is_held(Action::Interact));
        assert!(!state.is_held(Action::Left));
    }

    #[test]
    fn edge_trigger_fires_once_per_press() {
        let mut t = EdgeTrigger::default();
        assert!(t.update(true));
        assert!(!t.update(true));
        assert!(!t.update(false));
        assert!(t.update(true));
    }

    #[test]
    fn typed_chars() {
        assert_eq!(typed_char(VirtualKeyCode::N, false), Some('n'));
        assert_eq!(typed_char(VirtualKeyCode::N, true), Some('N'));
        assert_eq!(typed_char(VirtualKeyCode::Key7, false), Some('7'));
        assert_eq!(typed_char(VirtualKeyCode::Space, false), Some(' '));
        assert_eq!(typed_char(VirtualKeyCode::F5, false), None);
    }
}
