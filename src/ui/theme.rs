use ratatui::style::{Color, Style};
use std::sync::OnceLock;

// --- Theme infrastructure ---

/// Which color variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

/// All configurable colors for the TUI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub variant: ThemeVariant,

    /// Conflict marker lines.
    pub conflict_marker_fg: Color,
    /// Every other line of a conflicted file.
    pub neutral_fg: Color,

    pub selected_bg: Color,
    pub selected_fg: Color,

    pub status_conflicted_fg: Color,
    pub status_resolved_fg: Color,
    pub status_staged_fg: Color,

    pub status_bar_bg: Color,
    pub status_bar_fg: Color,

    pub border_focused: Color,
    pub border_unfocused: Color,
}

impl ThemeColors {
    /// Dark theme, for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            variant: ThemeVariant::Dark,

            conflict_marker_fg: Color::Red,
            neutral_fg: Color::White,

            selected_bg: Color::Rgb(40, 40, 80),
            selected_fg: Color::White,

            status_conflicted_fg: Color::Red,
            status_resolved_fg: Color::Yellow,
            status_staged_fg: Color::Green,

            status_bar_bg: Color::Rgb(30, 30, 30),
            status_bar_fg: Color::White,

            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,
        }
    }

    /// Light theme, for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            variant: ThemeVariant::Light,

            conflict_marker_fg: Color::Rgb(180, 0, 0),
            neutral_fg: Color::Black,

            selected_bg: Color::Rgb(200, 210, 240),
            selected_fg: Color::Black,

            status_conflicted_fg: Color::Rgb(180, 0, 0),
            status_resolved_fg: Color::Rgb(180, 130, 0),
            status_staged_fg: Color::Rgb(0, 140, 0),

            status_bar_bg: Color::Rgb(225, 225, 225),
            status_bar_fg: Color::Black,

            border_focused: Color::Rgb(0, 130, 130),
            border_unfocused: Color::Gray,
        }
    }

    /// Pick a variant from the `--theme` value: "dark", "light", or
    /// anything else to auto-detect from `colorfgbg`.
    pub fn from_name(name: &str, colorfgbg: Option<&str>) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            _ => {
                // Format: "fg;bg". bg >= 8 usually means a light background.
                let bg = colorfgbg
                    .and_then(|val| val.rsplit(';').next())
                    .and_then(|s| s.parse::<u8>().ok());
                match bg {
                    Some(bg) if bg >= 8 => Self::light(),
                    _ => Self::dark(),
                }
            }
        }
    }
}

/// Global active theme, initialised once at startup.
static THEME: OnceLock<ThemeColors> = OnceLock::new();

/// Initialise the global theme. Call once from main before the TUI starts.
pub fn init(name: &str) {
    let colorfgbg = std::env::var("COLORFGBG").ok();
    let colors = ThemeColors::from_name(name, colorfgbg.as_deref());
    log::debug!("Using {:?} theme", colors.variant);
    let _ = THEME.set(colors);
}

/// Return the active theme. Falls back to dark if `init()` was not called.
pub fn current() -> &'static ThemeColors {
    THEME.get_or_init(ThemeColors::dark)
}

// --- Accessor functions ---

pub fn conflict_marker_fg() -> Color {
    current().conflict_marker_fg
}
pub fn neutral_fg() -> Color {
    current().neutral_fg
}
pub fn selected_bg() -> Color {
    current().selected_bg
}
pub fn selected_fg() -> Color {
    current().selected_fg
}
pub fn status_conflicted_fg() -> Color {
    current().status_conflicted_fg
}
pub fn status_resolved_fg() -> Color {
    current().status_resolved_fg
}
pub fn status_staged_fg() -> Color {
    current().status_staged_fg
}
pub fn status_bar_bg() -> Color {
    current().status_bar_bg
}
pub fn status_bar_fg() -> Color {
    current().status_bar_fg
}
pub fn border_focused() -> Color {
    current().border_focused
}
pub fn border_unfocused() -> Color {
    current().border_unfocused
}

// --- Style helpers ---

pub fn conflict_marker_style() -> Style {
    Style::default().fg(conflict_marker_fg())
}

pub fn neutral_style() -> Style {
    Style::default().fg(neutral_fg())
}

pub fn selected_style() -> Style {
    Style::default().fg(selected_fg()).bg(selected_bg())
}

pub fn status_bar_style() -> Style {
    Style::default().fg(status_bar_fg()).bg(status_bar_bg())
}

pub fn border_focused_style() -> Style {
    Style::default().fg(border_focused())
}

pub fn border_unfocused_style() -> Style {
    Style::default().fg(border_unfocused())
}
