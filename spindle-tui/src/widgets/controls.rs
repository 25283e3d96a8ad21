//! Control surface widget - transport buttons, knobs, eject
//!
//! Buttons gray out when there is nothing to act on; the state machine
//! rejects the intents anyway, the styling is just the visible half of the
//! same rule. Zone rectangles come from one layout function shared by
//! render and mouse hit-testing.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use spindle_core::PlayerSnapshot;

const BUTTON_HEIGHT: u16 = 3;
const GAP: u16 = 2;

/// Which control a pointer event landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlHit {
    SkipBack,
    Play,
    SkipForward,
    Volume,
    Bass,
    Eject,
}

/// Zone rectangles for the control row
#[derive(Debug, Clone, Copy)]
struct ControlZones {
    skip_back: Rect,
    play: Rect,
    skip_forward: Rect,
    volume: Rect,
    bass: Rect,
    eject: Rect,
}

pub struct ControlsWidget<'a> {
    player: &'a PlayerSnapshot,
    theme: &'a Theme,
}

impl<'a> ControlsWidget<'a> {
    /// Widths of the six zones, left to right
    const WIDTHS: [u16; 6] = [7, 9, 7, 10, 10, 9];

    pub fn new(player: &'a PlayerSnapshot, theme: &'a Theme) -> Self {
        Self { player, theme }
    }

    fn zones(inner: Rect) -> Option<ControlZones> {
        let total: u16 = Self::WIDTHS.iter().sum::<u16>() + GAP * 5;
        if inner.width < total || inner.height < BUTTON_HEIGHT {
            return None;
        }

        let mut x = inner.x + (inner.width - total) / 2;
        let y = inner.y;
        let mut rects = [Rect::default(); 6];
        for (i, w) in Self::WIDTHS.iter().enumerate() {
            rects[i] = Rect::new(x, y, *w, BUTTON_HEIGHT);
            x += w + GAP;
        }

        Some(ControlZones {
            skip_back: rects[0],
            play: rects[1],
            skip_forward: rects[2],
            volume: rects[3],
            bass: rects[4],
            eject: rects[5],
        })
    }

    /// Control under (col, row); takes the widget's outer area
    pub fn hit(area: Rect, col: u16, row: u16) -> Option<ControlHit> {
        let inner = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        let zones = Self::zones(inner)?;
        let contains = |r: Rect| {
            col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        };

        if contains(zones.skip_back) {
            Some(ControlHit::SkipBack)
        } else if contains(zones.play) {
            Some(ControlHit::Play)
        } else if contains(zones.skip_forward) {
            Some(ControlHit::SkipForward)
        } else if contains(zones.volume) {
            Some(ControlHit::Volume)
        } else if contains(zones.bass) {
            Some(ControlHit::Bass)
        } else if contains(zones.eject) {
            Some(ControlHit::Eject)
        } else {
            None
        }
    }

    /// Knob pointer glyph for a 0..=100 value (sweep -135° to +135°)
    fn knob_glyph(value: u8) -> char {
        const STOPS: [char; 7] = ['↙', '←', '↖', '↑', '↗', '→', '↘'];
        let idx = (value as usize * (STOPS.len() - 1) + 50) / 100;
        STOPS[idx.min(STOPS.len() - 1)]
    }

    fn render_button(&self, rect: Rect, label: &str, enabled: bool, buf: &mut Buffer) {
        let style = if enabled {
            self.theme.control()
        } else {
            self.theme.control_disabled()
        };
        let block = Block::default().borders(Borders::ALL).border_style(style);
        let inner = block.inner(rect);
        block.render(rect, buf);

        let x = inner.x + (inner.width.saturating_sub(label.chars().count() as u16)) / 2;
        buf.set_string(x, inner.y, label, style);
    }

    fn render_knob(&self, rect: Rect, label: &str, value: u8, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());
        let inner = block.inner(rect);
        block.render(rect, buf);

        let text = format!("{} {:3}", Self::knob_glyph(value), value);
        let x = inner.x + (inner.width.saturating_sub(text.chars().count() as u16)) / 2;
        buf.set_string(x, inner.y, text, self.theme.control());

        // Label row under the box
        let label_y = rect.y + rect.height;
        let x = rect.x + (rect.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(x, label_y, label, self.theme.dim());
    }
}

impl Widget for ControlsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(" CONTROLS ", self.theme.title()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(zones) = Self::zones(inner) else {
            return;
        };

        let has_disc = self.player.has_disc();

        self.render_button(zones.skip_back, "|◀◀", has_disc, buf);
        let play_label = if self.player.is_playing { "▮▮" } else { "▶" };
        self.render_button(zones.play, play_label, has_disc, buf);
        self.render_button(zones.skip_forward, "▶▶|", has_disc, buf);
        self.render_knob(zones.volume, "VOLUME", self.player.volume, buf);
        self.render_knob(zones.bass, "BASS", self.player.bass, buf);
        self.render_button(zones.eject, "EJECT", has_disc && !self.player.is_ejecting, buf);

        // LED on the play button: lit while audible
        if has_disc {
            let led_style = if self.player.is_playing {
                self.theme.inserted_ring()
            } else {
                self.theme.dim()
            };
            buf.set_string(zones.play.x + zones.play.width - 2, zones.play.y, "•", led_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zones_need_space() {
        assert!(ControlsWidget::zones(Rect::new(0, 0, 30, 5)).is_none());
        assert!(ControlsWidget::zones(Rect::new(0, 0, 80, 5)).is_some());
        assert!(ControlsWidget::zones(Rect::new(0, 0, 80, 2)).is_none());
    }

    #[test]
    fn test_hit_finds_each_zone() {
        let outer = Rect::new(0, 0, 80, 7);
        let inner = Rect::new(1, 1, 78, 5);
        let zones = ControlsWidget::zones(inner).unwrap();

        let center = |r: Rect| (r.x + r.width / 2, r.y + r.height / 2);

        let (c, r) = center(zones.play);
        assert_eq!(ControlsWidget::hit(outer, c, r), Some(ControlHit::Play));
        let (c, r) = center(zones.volume);
        assert_eq!(ControlsWidget::hit(outer, c, r), Some(ControlHit::Volume));
        let (c, r) = center(zones.eject);
        assert_eq!(ControlsWidget::hit(outer, c, r), Some(ControlHit::Eject));

        // Gap between zones hits nothing
        assert_eq!(
            ControlsWidget::hit(outer, zones.skip_back.x + zones.skip_back.width, zones.play.y + 1),
            None
        );
    }

    #[test]
    fn test_knob_glyph_sweep() {
        assert_eq!(ControlsWidget::knob_glyph(0), '↙');
        assert_eq!(ControlsWidget::knob_glyph(50), '↑');
        assert_eq!(ControlsWidget::knob_glyph(100), '↘');
    }
}
