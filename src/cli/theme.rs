use crate::config::{
    HexColor, StyleOverride, ThemeConfig as UserThemeConfig, ThemeModifier, ThemePreset, ThemeToken,
};
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// Resolved styles for every token. A theme built with colour disabled
/// ignores presets and overrides alike.
#[derive(Debug, Clone)]
pub struct Theme {
    styles: Option<HashMap<ThemeToken, Style>>,
}

impl Theme {
    pub fn new(enabled: bool) -> Self {
        Self::from_config(enabled, &UserThemeConfig::default())
    }

    pub fn from_config(enabled: bool, config: &UserThemeConfig) -> Self {
        if !enabled {
            return Self { styles: None };
        }

        let palette = Palette::for_preset(config.preset);
        let styles = ThemeToken::all()
            .iter()
            .map(|&token| {
                let base = palette.style_for(token);
                let style = config
                    .styles
                    .get(&token)
                    .map_or(base, |custom| apply_override(base, custom));
                (token, style)
            })
            .collect();

        Self {
            styles: Some(styles),
        }
    }

    pub fn style(&self, token: ThemeToken) -> Style {
        match &self.styles {
            Some(styles) => styles.get(&token).copied().unwrap_or_default(),
            None => plain_style(token),
        }
    }
}

/// The handful of colours a preset picks. Token styles are derived from
/// these, so grid cells and placeholders always agree with the reply text.
#[derive(Debug, Clone, Copy)]
struct Palette {
    prompt: Color,
    command: Color,
    input: Color,
    reply: Color,
    heading: Color,
    grid: Color,
    muted: Color,
    error: Color,
    surface: Color,
    emphasis: Modifier,
}

const NIGHT: Palette = Palette {
    prompt: Color::Rgb(152, 195, 121),
    command: Color::Rgb(97, 175, 239),
    input: Color::White,
    reply: Color::Rgb(209, 214, 224),
    heading: Color::Rgb(229, 192, 123),
    grid: Color::Rgb(86, 182, 194),
    muted: Color::Rgb(92, 99, 112),
    error: Color::Rgb(224, 108, 117),
    surface: Color::Rgb(30, 33, 39),
    emphasis: Modifier::empty(),
};

const DAYLIGHT: Palette = Palette {
    prompt: Color::Rgb(26, 127, 55),
    command: Color::Rgb(102, 57, 186),
    input: Color::Rgb(31, 35, 40),
    reply: Color::Rgb(31, 35, 40),
    heading: Color::Rgb(154, 103, 0),
    grid: Color::Rgb(9, 105, 218),
    muted: Color::Rgb(139, 148, 158),
    error: Color::Rgb(207, 34, 46),
    surface: Color::Rgb(246, 248, 250),
    emphasis: Modifier::empty(),
};

const STARK: Palette = Palette {
    prompt: Color::Rgb(0, 255, 0),
    command: Color::Rgb(0, 255, 255),
    input: Color::Rgb(255, 255, 255),
    reply: Color::Rgb(255, 255, 255),
    heading: Color::Rgb(255, 255, 0),
    grid: Color::Rgb(255, 255, 0),
    muted: Color::Rgb(190, 190, 190),
    error: Color::Rgb(255, 80, 80),
    surface: Color::Rgb(0, 0, 0),
    emphasis: Modifier::UNDERLINED,
};

impl Palette {
    fn for_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Default => NIGHT,
            ThemePreset::Light => DAYLIGHT,
            ThemePreset::HighContrast => STARK,
        }
    }

    fn style_for(&self, token: ThemeToken) -> Style {
        let bold = |color: Color| Style::new().fg(color).add_modifier(Modifier::BOLD);
        let heading = |color: Color| bold(color).add_modifier(self.emphasis);

        match token {
            ThemeToken::UserPrompt => bold(self.prompt),
            ThemeToken::CommandPrompt => bold(self.command),
            ThemeToken::UserInput => Style::new().fg(self.input),
            ThemeToken::AssistantText | ThemeToken::TableCell => Style::new().fg(self.reply),
            ThemeToken::InfoHeading => heading(self.heading),
            ThemeToken::TableHeader => heading(self.grid),
            // An empty slot sits in the grid as a faded cell.
            ThemeToken::TablePlaceholder => self
                .style_for(ThemeToken::TableCell)
                .fg(self.muted)
                .add_modifier(Modifier::DIM),
            ThemeToken::SystemInfo | ThemeToken::Status => Style::new().fg(self.muted),
            ThemeToken::SystemError => bold(self.error),
            ThemeToken::InputBlock => Style::new().fg(self.input).bg(self.surface),
        }
    }
}

fn plain_style(token: ThemeToken) -> Style {
    if matches!(
        token,
        ThemeToken::UserPrompt | ThemeToken::CommandPrompt | ThemeToken::TableHeader
    ) {
        Style::new().add_modifier(Modifier::BOLD)
    } else {
        Style::new()
    }
}

/// Colours given in the override win; a `modifiers` list replaces the
/// preset's modifiers outright.
fn apply_override(base: Style, custom: &StyleOverride) -> Style {
    let mut style = base.patch(Style {
        fg: custom.fg.map(Color::from),
        bg: custom.bg.map(Color::from),
        ..Style::default()
    });
    if let Some(modifiers) = &custom.modifiers {
        style.add_modifier = modifiers.iter().copied().map(Modifier::from).collect();
        style.sub_modifier = Modifier::empty();
    }
    style
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::Rgb(color.r, color.g, color.b)
    }
}

impl From<ThemeModifier> for Modifier {
    fn from(modifier: ThemeModifier) -> Self {
        match modifier {
            ThemeModifier::Bold => Modifier::BOLD,
            ThemeModifier::Dim => Modifier::DIM,
            ThemeModifier::Italic => Modifier::ITALIC,
            ThemeModifier::Underlined => Modifier::UNDERLINED,
            ThemeModifier::Reversed => Modifier::REVERSED,
            ThemeModifier::CrossedOut => Modifier::CROSSED_OUT,
        }
    }
}
