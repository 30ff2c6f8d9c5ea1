//! Theme and styling for the TUI.
//!
//! Two palettes, light and dark, switched at runtime.

use ratatui::style::{Color, Modifier, Style};
use taskdeck_proto::task::{Category, Priority};

use crate::state::Theme;

/// Resolved color palette for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub fg_dim: Color,
    pub bg: Color,
    pub highlight: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub status_bg: Color,
}

impl Palette {
    /// Palette for [`Theme::Light`].
    #[must_use]
    pub const fn light() -> Self {
        Self {
            fg: Color::Black,
            fg_dim: Color::DarkGray,
            bg: Color::White,
            highlight: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            status_bg: Color::Rgb(220, 220, 230),
        }
    }

    /// Palette for [`Theme::Dark`].
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            fg: Color::White,
            fg_dim: Color::Gray,
            bg: Color::Black,
            highlight: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            status_bg: Color::Rgb(30, 30, 50),
        }
    }

    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    /// Normal text style.
    #[must_use]
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Dimmed text style (completed tasks, metadata).
    #[must_use]
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Bold text style.
    #[must_use]
    pub fn bold(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Cursor row style.
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar background style.
    #[must_use]
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.fg).bg(self.status_bg)
    }

    /// Style for overdue markers.
    #[must_use]
    pub fn overdue(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

/// Color used for a priority marker.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Color used for a category tag.
#[must_use]
pub const fn category_color(category: Category) -> Color {
    match category {
        Category::General => Color::Gray,
        Category::Work => Color::Blue,
        Category::Personal => Color::Magenta,
        Category::Study => Color::Cyan,
        Category::Home => Color::Green,
    }
}
