//! User configuration — keybindings, scroll tunables and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::reveal::DEFAULT_REVEAL_MARGIN;
use crate::core::tracker::DEFAULT_REFERENCE_OFFSET;

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config line {line}: {message}")]
    Parse { line: usize, message: String },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevSection,
    NextSection,
    Top,
    Bottom,
    NextTab,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevSection,
        Action::NextSection,
        Action::Top,
        Action::Bottom,
        Action::NextTab,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::NextTab => "next_tab",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared; platform modifiers are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Short form for the status bar (`"↓"`, `"Ctrl+d"`, `"n"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let key = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::PageUp, true) => "PgUp".into(),
            (KeyCode::PageDown, true) => "PgDn".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+d"`, `"PageDown"`, `"j"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and page tunables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Distance of the active-section reference line below the viewport top.
    pub reference_offset: f64,
    /// Inset of the reveal detection area from both viewport edges.
    pub reveal_margin: f64,
    /// Document units per terminal row.
    pub units_per_row: f64,
    /// Play entrance animations.  Off means every section shows immediately.
    pub reveal_animations: bool,
    /// Smooth scroll damping per frame.
    pub scroll_speed: f64,
    /// Redraw rate while idle or animating.
    pub fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            reference_offset: DEFAULT_REFERENCE_OFFSET,
            reveal_margin: DEFAULT_REVEAL_MARGIN,
            units_per_row: 20.0,
            reveal_animations: true,
            scroll_speed: 0.35,
            fps: 30,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(PrevSection, vec![KeyBind::new(Char('p'), n), KeyBind::new(BackTab, shift)]);
        m.insert(NextSection, vec![KeyBind::new(Char('n'), n), KeyBind::new(Tab, n)]);
        m.insert(Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Bottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), shift)]);
        m.insert(NextTab, vec![KeyBind::new(Char('t'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  When several match, the one
    /// with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: section | {}: awards tab | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::PrevSection),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::NextTab),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  Problems are
    /// logged, never surfaced.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let (config, problems) = Self::parse_config(&contents);
                for problem in problems {
                    tracing::warn!("{}: {problem}", path.display());
                }
                config
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                tracing::warn!("{}", ConfigError::Io { path, source });
                Self::default()
            }
        }
    }

    /// Persist current config to disk.  Returns the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, self.serialise()).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Parse the key-value format.  Unknown keys and bad values are
    /// reported and skipped; everything else keeps its default.
    pub fn parse_config(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut problems = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                problems.push(parse_error(line_no, format!("expected `key = value`, got `{line}`")));
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let number = || value.parse::<f64>().ok().filter(|v| v.is_finite());
            let bad = |what: &str| parse_error(line_no, format!("invalid {what} `{value}`"));

            match key {
                "reference_offset" => match number() {
                    Some(v) => config.reference_offset = v.max(0.0),
                    None => problems.push(bad(key)),
                },
                "reveal_margin" => match number() {
                    Some(v) => config.reveal_margin = v.max(0.0),
                    None => problems.push(bad(key)),
                },
                "units_per_row" => match number() {
                    Some(v) => config.units_per_row = v.clamp(1.0, 200.0),
                    None => problems.push(bad(key)),
                },
                "scroll_speed" => match number() {
                    Some(v) => config.scroll_speed = v.clamp(0.05, 0.95),
                    None => problems.push(bad(key)),
                },
                "fps" => match value.parse::<u32>() {
                    Ok(v) => config.fps = v.clamp(5, 120),
                    Err(_) => problems.push(bad(key)),
                },
                "reveal_animations" => match value {
                    "true" => config.reveal_animations = true,
                    "false" => config.reveal_animations = false,
                    _ => problems.push(bad(key)),
                },
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        problems.push(parse_error(line_no, format!("unknown key `{key}`")));
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    if parsed.is_empty() {
                        problems.push(bad("key binding"));
                    } else {
                        config.bindings.insert(action, parsed);
                    }
                }
            }
        }

        (config, problems)
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Page".to_string(),
            format!("reference_offset = {}", self.reference_offset),
            format!("reveal_margin = {}", self.reveal_margin),
            format!("units_per_row = {}", self.units_per_row),
            format!("reveal_animations = {}", self.reveal_animations),
            format!("scroll_speed = {}", self.scroll_speed),
            format!("fps = {}", self.fps),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_error(line: usize, message: String) -> ConfigError {
    ConfigError::Parse { line, message }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_default_bindings_match() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::ScrollDown));
        assert_eq!(config.match_key(key(KeyCode::Tab, KeyModifiers::NONE)), Some(Action::NextSection));
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_parse_values_and_bindings() {
        let text = "\
# comment
reference_offset = 60
reveal_margin = 40
units_per_row = 10
reveal_animations = false
fps = 500
next_section = Ctrl+n, Right
";
        let (config, problems) = AppConfig::parse_config(text);
        assert!(problems.is_empty(), "{problems:?}");
        assert_eq!(config.reference_offset, 60.0);
        assert_eq!(config.reveal_margin, 40.0);
        assert_eq!(config.units_per_row, 10.0);
        assert!(!config.reveal_animations);
        assert_eq!(config.fps, 120);
        assert_eq!(
            config.match_key(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(Action::NextSection)
        );
        assert_eq!(config.match_key(key(KeyCode::Right, KeyModifiers::NONE)), Some(Action::NextSection));
    }

    #[test]
    fn test_parse_reports_problems_and_keeps_defaults() {
        let text = "reference_offset = lots\nbogus = 1\nno equals sign\nquit = Hyper+q\n";
        let (config, problems) = AppConfig::parse_config(text);
        assert_eq!(problems.len(), 4);
        assert!(matches!(problems[0], ConfigError::Parse { line: 1, .. }));
        assert_eq!(config.reference_offset, DEFAULT_REFERENCE_OFFSET);
        assert_eq!(config.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Action::Quit));
    }

    #[test]
    fn test_serialise_parses_back() {
        let mut config = AppConfig::default();
        config.reveal_margin = 55.0;
        config.bindings.insert(Action::Top, vec![KeyBind::new(KeyCode::F(5), KeyModifiers::ALT)]);
        let (reparsed, problems) = AppConfig::parse_config(&config.serialise());
        assert!(problems.is_empty(), "{problems:?}");
        assert_eq!(reparsed.reveal_margin, 55.0);
        assert_eq!(reparsed.bindings.get(&Action::Top), config.bindings.get(&Action::Top));
        assert_eq!(reparsed.bindings.get(&Action::PageDown), config.bindings.get(&Action::PageDown));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(KeyBind::new(KeyCode::Down, KeyModifiers::NONE).display(), "↓");
        assert_eq!(KeyBind::new(KeyCode::Char('d'), KeyModifiers::CONTROL).display(), "Ctrl+d");
        assert_eq!(KeyBind::new(KeyCode::Down, KeyModifiers::NONE).to_config_string(), "Down");
    }
}
