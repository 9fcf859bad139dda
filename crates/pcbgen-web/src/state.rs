pub const STORAGE_PREFIX: &str = "PcbGen__#";

/// Rendered board images are shown at a fixed height.
pub const IMAGE_HEIGHT_PX: u32 = 650;

/// How long a notification stays up before it fades.
pub const NOTICE_TIMEOUT_MS: u32 = 5000;

/// Which control panel is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Generate,
    Suggest,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Generate => "generate",
            Mode::Suggest => "suggest",
        }
    }

    pub fn parse(s: &str) -> Option<Mode> {
        match s {
            "generate" => Some(Mode::Generate),
            "suggest" => Some(Mode::Suggest),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    pub mode: Mode,
    /// Board server base URL; empty means the page origin.
    pub api_base: String,
}

pub fn read_storage(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(&format!("{}{}", STORAGE_PREFIX, key)).ok()?
}

pub fn write_storage(key: &str, value: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(&format!("{}{}", STORAGE_PREFIX, key), value);
        }
    }
}

pub fn init_settings() -> Settings {
    settings_from(read_storage("mode"), read_storage("apiBase"))
}

fn settings_from(mode: Option<String>, api_base: Option<String>) -> Settings {
    let mut s = Settings::default();
    if let Some(m) = mode.as_deref().and_then(Mode::parse) {
        s.mode = m;
    }
    if let Some(base) = api_base {
        s.api_base = base.trim().to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        for m in [Mode::Generate, Mode::Suggest] {
            assert_eq!(Mode::parse(m.as_str()), Some(m));
        }
        assert_eq!(Mode::parse("bogus"), None);
    }

    #[test]
    fn stored_values_override_defaults() {
        let s = settings_from(Some("suggest".into()), Some(" http://boards:5000 ".into()));
        assert_eq!(s.mode, Mode::Suggest);
        assert_eq!(s.api_base, "http://boards:5000");
    }

    #[test]
    fn unknown_mode_falls_back() {
        let s = settings_from(Some("zoom".into()), None);
        assert_eq!(s, Settings::default());
    }
}
