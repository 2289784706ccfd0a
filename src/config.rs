use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use termion::event::Key;

use crate::cmds::Cmd;
use crate::error::{Error, ErrorKind, Result};
use crate::ui::layout::Geometry;
use crate::ui::theme::Theme;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "MONCAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("moncal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".moncal.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first config found in the usual
/// locations, otherwise the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            log::info!("using config file '{}'", location.display());
            return Config::from_file(&location);
        }
    }

    log::info!("no config file found, using defaults");
    Ok(Config::default())
}

pub fn default_key_map() -> KeyMap {
    let mut key_map = KeyMap::new();

    key_map.insert(Key::Left, Cmd::PrevMonth);
    key_map.insert(Key::Right, Cmd::NextMonth);
    key_map.insert(Key::Up, Cmd::NextYear);
    key_map.insert(Key::Down, Cmd::PrevYear);
    key_map.insert(Key::Char(' '), Cmd::Today);
    key_map.insert(Key::Char('q'), Cmd::Exit);

    key_map
}

/// Parses key names as written in the config file: `Left`, `Space`, `PageUp`,
/// `F5`, `C-n` (control), `A-n` (alt) or a single character.
pub fn parse_key(name: &str) -> Result<Key> {
    let mut chars = name.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };
    if let Some(c) = single {
        return Ok(Key::Char(c));
    }

    let key = match name {
        "Left" => Key::Left,
        "Right" => Key::Right,
        "Up" => Key::Up,
        "Down" => Key::Down,
        "Space" => Key::Char(' '),
        "Enter" => Key::Char('\n'),
        "Tab" => Key::Char('\t'),
        "Backspace" => Key::Backspace,
        "Delete" => Key::Delete,
        "Home" => Key::Home,
        "End" => Key::End,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        "Esc" => Key::Esc,
        _ => {
            if let Some(n) = name.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                Key::F(n)
            } else if let Some(c) = single_char(name.strip_prefix("C-")) {
                Key::Ctrl(c)
            } else if let Some(c) = single_char(name.strip_prefix("A-")) {
                Key::Alt(c)
            } else {
                return Err(Error::new(ErrorKind::UnknownKey, name));
            }
        }
    };

    Ok(key)
}

fn single_char(s: Option<&str>) -> Option<char> {
    let mut chars = s?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tick_rate_ms: Option<u64>,
    keys: HashMap<String, Cmd>,
    theme: Option<Theme>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub tick_rate: Duration,
    pub theme: Theme,
    pub geometry: Geometry,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            key_map: default_key_map(),
            tick_rate: Duration::from_millis(1000 / 60),
            theme: Theme::default(),
            geometry: Geometry::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::from(e).with_msg(&format!("{}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Values in `content` override the defaults; bindings are added to the
    /// default key map.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(ms) = file.tick_rate_ms {
            if ms == 0 {
                return Err(Error::new(
                    ErrorKind::ConfigParse,
                    "tick_rate_ms must be greater than zero",
                ));
            }
            config.tick_rate = Duration::from_millis(ms);
        }

        for (name, cmd) in file.keys {
            let key = parse_key(&name)?;
            log::debug!("binding {:?} to {}", key, cmd);
            config.key_map.insert(key, cmd);
        }

        if let Some(theme) = file.theme {
            config.theme = theme;
        }

        if let Some(geometry) = file.geometry {
            geometry.validate()?;
            config.geometry = geometry;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Rgb;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.key_map.get(&Key::Left), Some(&Cmd::PrevMonth));
        assert_eq!(config.key_map.get(&Key::Up), Some(&Cmd::NextYear));
        assert_eq!(config.key_map.get(&Key::Char(' ')), Some(&Cmd::Today));
        assert_eq!(config.tick_rate, Duration::from_millis(16));
    }

    #[test]
    fn key_names() {
        assert_eq!(parse_key("h").unwrap(), Key::Char('h'));
        assert_eq!(parse_key("Space").unwrap(), Key::Char(' '));
        assert_eq!(parse_key("PageDown").unwrap(), Key::PageDown);
        assert_eq!(parse_key("F12").unwrap(), Key::F(12));
        assert_eq!(parse_key("C-n").unwrap(), Key::Ctrl('n'));
        assert_eq!(parse_key("A-p").unwrap(), Key::Alt('p'));
        assert!(parse_key("Hyper-x").is_err());
        assert!(parse_key("").is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            tick_rate_ms = 100

            [keys]
            h = "prev-month"
            l = "next-month"
            Left = "prev-year"

            [theme]
            weekend = [200, 0, 0]

            [geometry]
            cell_width = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_rate, Duration::from_millis(100));
        assert_eq!(config.key_map.get(&Key::Char('h')), Some(&Cmd::PrevMonth));
        assert_eq!(config.key_map.get(&Key::Char('l')), Some(&Cmd::NextMonth));
        assert_eq!(config.key_map.get(&Key::Left), Some(&Cmd::PrevYear));
        assert_eq!(config.key_map.get(&Key::Right), Some(&Cmd::NextMonth));
        assert_eq!(config.theme.weekend, Rgb(200, 0, 0));
        assert_eq!(config.theme.background, Theme::default().background);
        assert_eq!(config.geometry.cell_width, 6);
        assert_eq!(config.geometry.cell_height, 3);
    }

    #[test]
    fn invalid_files_are_rejected() {
        assert!(Config::from_toml_str("[keys]\nLeft = \"sideways\"").is_err());
        assert!(Config::from_toml_str("[keys]\nHyper-x = \"today\"").is_err());
        assert!(Config::from_toml_str("tick_rate_ms = 0").is_err());
        assert!(Config::from_toml_str("colour = 1").is_err());
        assert!(Config::from_toml_str("[geometry]\ncell_width = -4").is_err());
        assert!(Config::from_toml_str("[geometry]\ncell_width = 400000000").is_err());
        assert!(Config::from_toml_str("[geometry]\nbutton_height = 0").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/moncal/config.toml");
        assert!(load_suitable_config(Some(path)).is_err());
    }
}
