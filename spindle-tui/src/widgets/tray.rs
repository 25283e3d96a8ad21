//! Tray widget - the disc slot with the spinning platter
//!
//! Draws the inserted disc as a character-cell circle with an orbiting
//! marker at the motor's current angle. During the eject window the disc
//! slides toward the bottom edge and dims.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use spindle_core::PlayerSnapshot;

/// Terminal cells are roughly twice as tall as wide
const CELL_ASPECT: f32 = 2.0;

pub struct TrayWidget<'a> {
    player: &'a PlayerSnapshot,
    theme: &'a Theme,
    /// Platter angle in degrees
    angle: f32,
    /// Eject slide progress, 0.0..=1.0
    eject_progress: Option<f32>,
}

impl<'a> TrayWidget<'a> {
    pub fn new(player: &'a PlayerSnapshot, theme: &'a Theme) -> Self {
        Self {
            player,
            theme,
            angle: 0.0,
            eject_progress: None,
        }
    }

    pub fn angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn eject_progress(mut self, progress: Option<f32>) -> Self {
        self.eject_progress = progress;
        self
    }

    fn render_empty(&self, inner: Rect, buf: &mut Buffer) {
        let y = inner.y + inner.height / 2;
        let msg = "NO DISC";
        let x = inner.x + (inner.width.saturating_sub(msg.len() as u16)) / 2;
        buf.set_string(x, y, msg, self.theme.dim());

        if y + 1 < inner.y + inner.height {
            let hint = "arm a disc on the shelf, then drag it here";
            let x = inner.x + (inner.width.saturating_sub(hint.len() as u16)) / 2;
            buf.set_string(x, y + 1, hint, self.theme.dim());
        }
    }

    fn render_disc(&self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 5 {
            return;
        }

        let slide = self.eject_progress.unwrap_or(0.0);
        let surface = if self.eject_progress.is_some() {
            self.theme.dim()
        } else {
            self.theme.disc()
        };

        let cx = area.x as f32 + area.width as f32 / 2.0;
        let cy = area.y as f32 + area.height as f32 / 2.0
            + slide * (area.height as f32 / 2.0);
        let radius = (area.width as f32 / (2.0 * CELL_ASPECT))
            .min(area.height as f32 / 2.0 - 0.5)
            .max(2.0);

        for row in area.y..area.y + area.height {
            for col in area.x..area.x + area.width {
                let dx = (col as f32 - cx) / CELL_ASPECT;
                let dy = row as f32 - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                if (dist - radius).abs() < 0.5 {
                    buf.set_string(col, row, "░", surface);
                } else if dist < radius {
                    if dist < radius * 0.2 {
                        // Hub hole
                        buf.set_string(col, row, "·", self.theme.dim());
                    } else {
                        buf.set_string(col, row, "▒", surface);
                    }
                }
            }
        }

        // Orbiting markers make the spin visible: one bright, one dim,
        // opposite each other
        let theta = self.angle.to_radians();
        for (offset, style) in [(0.0f32, self.theme.title()), (std::f32::consts::PI, self.theme.dim())]
        {
            let mx = cx + radius * 0.7 * (theta + offset).cos() * CELL_ASPECT;
            let my = cy + radius * 0.7 * (theta + offset).sin();
            let (mx, my) = (mx.round() as i32, my.round() as i32);
            if mx >= area.x as i32
                && mx < (area.x + area.width) as i32
                && my >= area.y as i32
                && my < (area.y + area.height) as i32
            {
                buf.set_string(mx as u16, my as u16, "●", style);
            }
        }
    }
}

impl Widget for TrayWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.player.is_ejecting {
            " TRAY [EJECTING] ".to_string()
        } else {
            " TRAY ".to_string()
        };

        let border_style = if self.player.is_ejecting {
            self.theme.border_active()
        } else {
            self.theme.border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, self.theme.title()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 || inner.width < 12 {
            return;
        }

        let Some(disc) = self.player.inserted.as_ref() else {
            self.render_empty(inner, buf);
            return;
        };

        // Header: disc identity and transport status
        let status = if self.player.is_ejecting {
            Span::styled("▲ EJECTING", self.theme.armed_ring())
        } else if self.player.is_playing {
            Span::styled("▶ PLAYING", self.theme.inserted_ring())
        } else {
            Span::styled("∥ PAUSED", self.theme.dim())
        };

        let track = self
            .player
            .current_track()
            .map(|name| {
                format!(
                    "  {}/{}: {}",
                    self.player.selected_track + 1,
                    disc.track_count(),
                    name
                )
            })
            .unwrap_or_default();

        let header = vec![
            Line::from(vec![
                Span::styled(disc.title(), self.theme.title()),
                Span::styled(format!(" — {}", disc.artist()), self.theme.dim()),
            ]),
            Line::from(vec![status, Span::styled(track, self.theme.normal())]),
        ];
        Paragraph::new(header).render(
            Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), 2),
            buf,
        );

        // Platter area below the header
        let platter = Rect::new(
            inner.x,
            inner.y + 2,
            inner.width,
            inner.height.saturating_sub(2),
        );
        self.render_disc(platter, buf);
    }
}
