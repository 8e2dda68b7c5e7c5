//! Light/dark theme resolution and the colour palettes.
//!
//! Resolution order: a stored explicit preference wins; with none stored the
//! [`SystemScheme`] is used and re-sampled on every tick until the user picks
//! one. The resolved [`Palette`] is handed to every render function.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::preferences::Preferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark => Palette::DARK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
    Unset,
}

impl From<Option<ThemeMode>> for ThemePreference {
    fn from(mode: Option<ThemeMode>) -> Self {
        match mode {
            Some(ThemeMode::Light) => ThemePreference::Light,
            Some(ThemeMode::Dark) => ThemePreference::Dark,
            None => ThemePreference::Unset,
        }
    }
}

/// Source of the environment's own light/dark setting.
pub trait SystemScheme {
    fn detect(&self) -> ThemeMode;
}

impl<F: Fn() -> ThemeMode> SystemScheme for F {
    fn detect(&self) -> ThemeMode {
        self()
    }
}

/// The terminal background hint from `COLORFGBG` ("fg;bg").
///
/// The variable is inherited at launch and cannot change while the process
/// runs, so it is read once and every `detect` returns that snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TerminalScheme {
    hint: Option<ThemeMode>,
}

impl TerminalScheme {
    pub fn from_env() -> Self {
        let hint = std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| scheme_from_colorfgbg(&value));
        Self { hint }
    }

    pub fn from_colorfgbg(value: &str) -> Self {
        Self {
            hint: scheme_from_colorfgbg(value),
        }
    }
}

impl SystemScheme for TerminalScheme {
    fn detect(&self) -> ThemeMode {
        self.hint.unwrap_or(ThemeMode::Light)
    }
}

/// Background indices 0-6 and 8 are the dark ANSI colours.
pub fn scheme_from_colorfgbg(value: &str) -> Option<ThemeMode> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match background {
        0..=6 | 8 => Some(ThemeMode::Dark),
        7 | 9..=15 => Some(ThemeMode::Light),
        _ => None,
    }
}

pub struct ThemeResolver {
    preferences: Preferences,
    system: Box<dyn SystemScheme>,
    session_override: Option<ThemeMode>,
    system_default: ThemeMode,
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeResolver")
            .field("preferences", &self.preferences)
            .field("session_override", &self.session_override)
            .field("system_default", &self.system_default)
            .finish_non_exhaustive()
    }
}

impl ThemeResolver {
    pub fn new(preferences: Preferences, system: Box<dyn SystemScheme>) -> Self {
        let system_default = system.detect();
        Self {
            preferences,
            system,
            session_override: None,
            system_default,
        }
    }

    /// Force a mode for this session without writing it to disk.
    pub fn with_session_override(mut self, mode: Option<ThemeMode>) -> Self {
        self.session_override = mode;
        self
    }

    pub fn preference(&self) -> ThemePreference {
        self.preferences.theme().into()
    }

    pub fn system_default(&self) -> ThemeMode {
        self.system_default
    }

    pub fn active(&self) -> ThemeMode {
        self.session_override
            .or(self.preferences.theme())
            .unwrap_or(self.system_default)
    }

    pub fn palette(&self) -> Palette {
        self.active().palette()
    }

    /// Store an explicit choice. A failed write is logged; the choice still
    /// applies for the rest of the session.
    pub fn set_preference(&mut self, mode: ThemeMode) {
        self.session_override = None;
        if let Err(error) = self.preferences.set_theme(mode) {
            warn!(
                path = %self.preferences.path().display(),
                error = %error,
                "could not save theme preference"
            );
        }
        info!(?mode, "theme preference set");
    }

    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.active().toggle();
        self.set_preference(next);
        next
    }

    /// Re-sample the system scheme while no explicit choice exists.
    /// Returns true when the active mode changed.
    pub fn refresh(&mut self) -> bool {
        if self.session_override.is_some() || self.preferences.theme().is_some() {
            return false;
        }
        let before = self.active();
        self.system_default = self.system.detect();
        before != self.active()
    }
}

/// Colours for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub card: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub on_accent: Color,
    pub filled_label: Color,
    pub filled_price: Color,
    pub hover: Color,
    pub pressed: Color,
    pub pressed_text: Color,
    pub error: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(0xfc, 0xfc, 0xff),
        card: Color::Rgb(0xff, 0xff, 0xff),
        border: Color::Rgb(0xe9, 0xdf, 0xdf),
        text_primary: Color::Rgb(0x2f, 0x2a, 0x5f),
        text_secondary: Color::Rgb(0x6a, 0x6f, 0x73),
        text_muted: Color::Rgb(0xac, 0xa0, 0xbb),
        accent: Color::Rgb(0x88, 0x50, 0xe2),
        on_accent: Color::Rgb(0xff, 0xff, 0xff),
        filled_label: Color::Rgb(0xac, 0xa0, 0xbb),
        filled_price: Color::Rgb(0x88, 0x50, 0xe2),
        hover: Color::Rgb(243, 241, 247),
        pressed: Color::Rgb(227, 224, 235),
        pressed_text: Color::Rgb(0x53, 0x40, 0x84),
        error: Color::Rgb(0xef, 0x44, 0x44),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(0x1c, 0x1a, 0x20),
        card: Color::Rgb(0x21, 0x21, 0x24),
        border: Color::Rgb(0x30, 0x30, 0x30),
        text_primary: Color::Rgb(0xff, 0xff, 0xff),
        text_secondary: Color::Rgb(0x6a, 0x6f, 0x73),
        text_muted: Color::Rgb(0x6a, 0x6a, 0x76),
        accent: Color::Rgb(0x7f, 0x55, 0xc3),
        on_accent: Color::Rgb(0xff, 0xff, 0xff),
        filled_label: Color::Rgb(0xff, 0xff, 0xff),
        filled_price: Color::Rgb(0xe3, 0xd1, 0xff),
        hover: Color::Rgb(41, 39, 48),
        pressed: Color::Rgb(41, 38, 51),
        pressed_text: Color::Rgb(0x53, 0x40, 0x84),
        error: Color::Rgb(0xef, 0x44, 0x44),
    };

    pub fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }

    pub fn title(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.on_accent)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }
}
