//! Themes for the Spindle UI

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Primary foreground color (text, borders)
    pub fg: Color,
    /// Dimmed foreground (secondary text)
    pub fg_dim: Color,
    /// Background color
    pub bg: Color,
    /// Highlight color (selected items, active elements)
    pub highlight: Color,
    /// Accent color (knob indicators, the disc rim)
    pub accent: Color,
    /// Armed-for-drag ring color
    pub armed: Color,
    /// Inserted-disc ring color
    pub inserted: Color,
    /// Warning color
    pub warning: Color,
    /// Error/danger color
    pub danger: Color,
}

impl Theme {
    /// Get style for normal text
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for dimmed text
    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Get style for active borders
    pub fn border_active(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Ring style for a case armed for dragging
    pub fn armed_ring(&self) -> Style {
        Style::default().fg(self.armed).add_modifier(Modifier::BOLD)
    }

    /// Ring style for the case whose disc sits in the tray
    pub fn inserted_ring(&self) -> Style {
        Style::default().fg(self.inserted)
    }

    /// Style for an enabled control
    pub fn control(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Style for a control with nothing to act on
    pub fn control_disabled(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Style for the spinning disc surface
    pub fn disc(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

/// Brushed-metal silver, the player's native finish
pub const BRUSHED_SILVER: Theme = Theme {
    name: "silver",
    fg: Color::Rgb(220, 224, 228),
    fg_dim: Color::Rgb(130, 136, 144),
    bg: Color::Rgb(24, 26, 30),
    highlight: Color::Rgb(255, 255, 255),
    accent: Color::Rgb(170, 190, 220),
    armed: Color::Rgb(96, 165, 250),  // blue selection ring
    inserted: Color::Rgb(74, 222, 128), // green "loaded" ring
    warning: Color::Rgb(250, 204, 21),
    danger: Color::Rgb(248, 113, 113),
};

/// Classic phosphor green CRT theme
pub const CRT_GREEN: Theme = Theme {
    name: "green",
    fg: Color::Rgb(51, 255, 51),
    fg_dim: Color::Rgb(25, 128, 25),
    bg: Color::Rgb(0, 10, 0),
    highlight: Color::Rgb(180, 255, 180),
    accent: Color::Rgb(100, 255, 100),
    armed: Color::Rgb(180, 255, 180),
    inserted: Color::Rgb(255, 255, 100),
    warning: Color::Rgb(255, 255, 100),
    danger: Color::Rgb(255, 100, 100),
};

/// Amber CRT theme (1980s monochrome)
pub const CRT_AMBER: Theme = Theme {
    name: "amber",
    fg: Color::Rgb(255, 176, 0),
    fg_dim: Color::Rgb(128, 88, 0),
    bg: Color::Rgb(10, 5, 0),
    highlight: Color::Rgb(255, 220, 128),
    accent: Color::Rgb(255, 200, 64),
    armed: Color::Rgb(255, 220, 128),
    inserted: Color::Rgb(255, 255, 160),
    warning: Color::Rgb(255, 255, 100),
    danger: Color::Rgb(255, 100, 100),
};

impl Default for Theme {
    fn default() -> Self {
        BRUSHED_SILVER
    }
}
