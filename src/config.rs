use crate::speech::DEFAULT_SPEECH_TIMEOUT_MS;
use crate::speech::google::DEFAULT_TTS_BASE_URL;
use anyhow::{Result, anyhow, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_SPEECH_LANG: &str = "en";

const APP_DIR_NAME: &str = "college-assistant";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_FILE_NAME: &str = "dataset.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub config_is_explicit: bool,
    pub data_file: PathBuf,
    pub speech: SpeechConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub lang: String,
    pub base_url: String,
    /// Program and arguments; the clip path is appended when it runs.
    pub player: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lang: DEFAULT_SPEECH_LANG.to_string(),
            base_url: DEFAULT_TTS_BASE_URL.to_string(),
            player: Vec::new(),
            timeout_ms: DEFAULT_SPEECH_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    pub preset: ThemePreset,
    pub styles: HashMap<ThemeToken, StyleOverride>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: ThemePreset::Default,
            styles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    Default,
    Light,
    HighContrast,
}

impl FromStr for ThemePreset {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "default" => Ok(Self::Default),
            "light" => Ok(Self::Light),
            "high-contrast" => Ok(Self::HighContrast),
            _ => Err(format!("unknown preset '{value}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeToken {
    UserPrompt,
    CommandPrompt,
    UserInput,
    AssistantText,
    InfoHeading,
    TableHeader,
    TableCell,
    TablePlaceholder,
    SystemInfo,
    SystemError,
    Status,
    InputBlock,
}

impl ThemeToken {
    pub fn all() -> &'static [ThemeToken] {
        &[
            Self::UserPrompt,
            Self::CommandPrompt,
            Self::UserInput,
            Self::AssistantText,
            Self::InfoHeading,
            Self::TableHeader,
            Self::TableCell,
            Self::TablePlaceholder,
            Self::SystemInfo,
            Self::SystemError,
            Self::Status,
            Self::InputBlock,
        ]
    }
}

impl FromStr for ThemeToken {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "user_prompt" => Ok(Self::UserPrompt),
            "command_prompt" => Ok(Self::CommandPrompt),
            "user_input" => Ok(Self::UserInput),
            "assistant_text" => Ok(Self::AssistantText),
            "info_heading" => Ok(Self::InfoHeading),
            "table_header" => Ok(Self::TableHeader),
            "table_cell" => Ok(Self::TableCell),
            "table_placeholder" => Ok(Self::TablePlaceholder),
            "system_info" => Ok(Self::SystemInfo),
            "system_error" => Ok(Self::SystemError),
            "status" => Ok(Self::Status),
            "input_block" => Ok(Self::InputBlock),
            _ => Err(format!("unknown token '{value}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOverride {
    pub fg: Option<HexColor>,
    pub bg: Option<HexColor>,
    pub modifiers: Option<Vec<ThemeModifier>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = value.as_bytes();
        if !value.is_ascii() || bytes.len() != 7 || bytes[0] != b'#' {
            return Err("invalid hex color, expected #RRGGBB".to_string());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&value[range], 16)
                .map_err(|_| "invalid hex color, expected #RRGGBB".to_string())
        };

        Ok(Self {
            r: channel(1..3)?,
            g: channel(3..5)?,
            b: channel(5..7)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeModifier {
    Bold,
    Dim,
    Italic,
    Underlined,
    Reversed,
    CrossedOut,
}

impl FromStr for ThemeModifier {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "bold" => Ok(Self::Bold),
            "dim" => Ok(Self::Dim),
            "italic" => Ok(Self::Italic),
            "underlined" => Ok(Self::Underlined),
            "reversed" => Ok(Self::Reversed),
            "crossed_out" => Ok(Self::CrossedOut),
            _ => Err(format!("unknown modifier '{value}'")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFileConfig {
    data_file: Option<PathBuf>,
    speech: Option<RawSpeechConfig>,
    theme: Option<RawThemeConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSpeechConfig {
    enabled: Option<bool>,
    lang: Option<String>,
    base_url: Option<String>,
    player: Option<Vec<String>>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawThemeConfig {
    name: Option<String>,
    styles: Option<HashMap<String, RawStyleOverride>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStyleOverride {
    fg: Option<String>,
    bg: Option<String>,
    modifiers: Option<Vec<String>>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Loads from `explicit_path` when given (it must exist), otherwise from
    /// the XDG config location if a file is there.
    pub fn load_with_path(explicit_path: Option<&Path>) -> Result<Self> {
        let (config_path, config_is_explicit) = match explicit_path {
            Some(path) => {
                if !path.is_file() {
                    bail!(
                        "Failed to load config {}: file does not exist",
                        path.display()
                    );
                }
                (path.to_path_buf(), true)
            }
            None => (discover_config_path()?, false),
        };
        let file_config = load_file_config(&config_path)?;

        dotenvy::dotenv().ok();

        let file_data_file = file_config
            .as_ref()
            .and_then(|cfg| cfg.data_file.as_ref())
            .filter(|path| !path.as_os_str().is_empty())
            .map(|path| resolve_relative(&config_path, path));
        let data_file = match env_non_empty("COLLEGE_ASSISTANT_DATA_FILE") {
            Some(path) => PathBuf::from(path),
            None => match file_data_file {
                Some(path) => path,
                None => default_data_file()?,
            },
        };

        let mut speech = validate_speech(
            file_config.as_ref().and_then(|cfg| cfg.speech.as_ref()),
            &config_path,
        )?;
        if let Some(base_url) = env_non_empty("COLLEGE_ASSISTANT_TTS_BASE_URL") {
            speech.base_url = base_url;
        }

        let theme = validate_theme(
            file_config.as_ref().and_then(|cfg| cfg.theme.as_ref()),
            &config_path,
        )?;

        Ok(Self {
            config_path,
            config_is_explicit,
            data_file,
            speech,
            theme,
        })
    }
}

fn discover_config_path() -> Result<PathBuf> {
    Ok(xdg_app_dir("XDG_CONFIG_HOME", ".config", "config")?.join(CONFIG_FILE_NAME))
}

fn default_data_file() -> Result<PathBuf> {
    Ok(xdg_app_dir("XDG_DATA_HOME", ".local/share", "data")?.join(DATA_FILE_NAME))
}

fn xdg_app_dir(var: &str, home_fallback: &str, what: &str) -> Result<PathBuf> {
    if let Ok(xdg) = env::var(var) {
        let trimmed = xdg.trim();
        if trimmed.is_empty() {
            bail!("Failed to resolve {what} path: {var} is set but empty");
        }

        return Ok(PathBuf::from(trimmed).join(APP_DIR_NAME));
    }

    let home = dirs::home_dir().ok_or_else(|| {
        anyhow!("Failed to resolve {what} path: HOME directory is unavailable")
    })?;

    Ok(home.join(home_fallback).join(APP_DIR_NAME))
}

fn resolve_relative(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    config_path
        .parent()
        .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
}

fn load_file_config(config_path: &Path) -> Result<Option<RawFileConfig>> {
    if !config_path.is_file() {
        return Ok(None);
    }

    let config_text = fs::read_to_string(config_path).map_err(|err| {
        anyhow!(
            "Failed to load config {}: unable to read file: {err}",
            config_path.display()
        )
    })?;

    toml::from_str(&config_text)
        .map(Some)
        .map_err(|err| anyhow!("Failed to load config {}: {err}", config_path.display()))
}

fn validate_speech(raw: Option<&RawSpeechConfig>, config_path: &Path) -> Result<SpeechConfig> {
    let mut config = SpeechConfig::default();
    let Some(raw) = raw else {
        return Ok(config);
    };

    if let Some(enabled) = raw.enabled {
        config.enabled = enabled;
    }
    if let Some(lang) = &raw.lang {
        config.lang = non_empty(lang)
            .ok_or_else(|| config_error(config_path, "speech.lang", "must not be empty"))?
            .to_string();
    }
    if let Some(base_url) = &raw.base_url {
        let base_url = non_empty(base_url)
            .ok_or_else(|| config_error(config_path, "speech.base_url", "must not be empty"))?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(config_error(
                config_path,
                "speech.base_url",
                "expected an http:// or https:// URL",
            ));
        }
        config.base_url = base_url.to_string();
    }
    if let Some(player) = &raw.player {
        if player.first().and_then(|program| non_empty(program)).is_none() {
            return Err(config_error(
                config_path,
                "speech.player",
                "expected [program, args...]",
            ));
        }
        config.player = player.clone();
    }
    if let Some(timeout_ms) = raw.timeout_ms {
        if timeout_ms == 0 {
            return Err(config_error(
                config_path,
                "speech.timeout_ms",
                "must be greater than zero",
            ));
        }
        config.timeout_ms = timeout_ms;
    }

    Ok(config)
}

fn validate_theme(raw_theme: Option<&RawThemeConfig>, config_path: &Path) -> Result<ThemeConfig> {
    let Some(theme) = raw_theme else {
        return Ok(ThemeConfig::default());
    };

    let mut config = ThemeConfig::default();

    if let Some(name) = &theme.name {
        config.preset = ThemePreset::from_str(name)
            .map_err(|reason| config_error(config_path, "theme.name", &reason))?;
    }

    if let Some(styles) = &theme.styles {
        for (token_name, raw_style) in styles {
            let token = ThemeToken::from_str(token_name).map_err(|reason| {
                config_error(config_path, &format!("theme.styles.{token_name}"), &reason)
            })?;

            let fg = parse_color(raw_style.fg.as_deref(), config_path, token_name, "fg")?;
            let bg = parse_color(raw_style.bg.as_deref(), config_path, token_name, "bg")?;
            let modifiers =
                parse_modifiers(raw_style.modifiers.as_deref(), config_path, token_name)?;

            config.styles.insert(token, StyleOverride { fg, bg, modifiers });
        }
    }

    Ok(config)
}

fn parse_color(
    value: Option<&str>,
    config_path: &Path,
    token_name: &str,
    field_name: &str,
) -> Result<Option<HexColor>> {
    let Some(value) = value else {
        return Ok(None);
    };

    HexColor::from_str(value).map(Some).map_err(|reason| {
        config_error(
            config_path,
            &format!("theme.styles.{token_name}.{field_name}"),
            &reason,
        )
    })
}

fn parse_modifiers(
    values: Option<&[String]>,
    config_path: &Path,
    token_name: &str,
) -> Result<Option<Vec<ThemeModifier>>> {
    let Some(values) = values else {
        return Ok(None);
    };

    values
        .iter()
        .map(|value| {
            ThemeModifier::from_str(value).map_err(|reason| {
                config_error(
                    config_path,
                    &format!("theme.styles.{token_name}.modifiers"),
                    &reason,
                )
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|value| non_empty(&value).map(ToOwned::to_owned))
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn config_error(config_path: &Path, key_path: &str, reason: &str) -> anyhow::Error {
    anyhow!(
        "Failed to load config {}: {key_path}: {reason}",
        config_path.display()
    )
}
