//! Track list widget for the inserted disc

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use spindle_core::PlayerSnapshot;

pub struct TrackListWidget<'a> {
    player: &'a PlayerSnapshot,
    theme: &'a Theme,
}

impl<'a> TrackListWidget<'a> {
    pub fn new(player: &'a PlayerSnapshot, theme: &'a Theme) -> Self {
        Self { player, theme }
    }

    /// Track index under (col, row); takes the widget's outer area
    ///
    /// Mirrors the row layout in render so clicks land on the printed rows.
    pub fn track_at(area: Rect, player: &PlayerSnapshot, col: u16, row: u16) -> Option<usize> {
        let disc = player.inserted.as_ref()?;
        if col <= area.x || col >= area.x + area.width.saturating_sub(1) {
            return None;
        }
        let first_row = area.y + 1;
        if row < first_row {
            return None;
        }
        let index = (row - first_row) as usize;
        let visible = area.height.saturating_sub(2) as usize;
        if index < visible && index < disc.track_count() {
            Some(index)
        } else {
            None
        }
    }
}

impl Widget for TrackListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(" TRACKS ", self.theme.title()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 8 {
            return;
        }

        let Some(disc) = self.player.inserted.as_ref() else {
            let msg = Paragraph::new(Line::from(Span::styled("--", self.theme.dim())));
            msg.render(Rect::new(inner.x + 1, inner.y, inner.width - 1, 1), buf);
            return;
        };

        let width = inner.width as usize;
        for (i, name) in disc.tracks().iter().take(inner.height as usize).enumerate() {
            let y = inner.y + i as u16;
            let is_selected = i == self.player.selected_track;

            let marker = if is_selected {
                if self.player.is_playing {
                    "▶"
                } else {
                    "∥"
                }
            } else {
                " "
            };

            let style = if is_selected {
                self.theme.highlight()
            } else {
                self.theme.normal()
            };

            let text: String = format!("{} {:2}. {}", marker, i + 1, name)
                .chars()
                .take(width)
                .collect();
            buf.set_string(inner.x, y, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle_library::Shelf;

    fn snapshot_with_disc() -> PlayerSnapshot {
        PlayerSnapshot {
            inserted: Some(Shelf::builtin().get(0).unwrap().clone()),
            is_playing: true,
            ..PlayerSnapshot::default()
        }
    }

    #[test]
    fn test_track_at_maps_rows() {
        let player = snapshot_with_disc();
        let area = Rect::new(0, 10, 30, 9);

        // First row inside the border is track 0
        assert_eq!(TrackListWidget::track_at(area, &player, 5, 11), Some(0));
        assert_eq!(TrackListWidget::track_at(area, &player, 5, 13), Some(2));
        // Border row hits nothing
        assert_eq!(TrackListWidget::track_at(area, &player, 5, 10), None);
        // Past the last track
        assert_eq!(TrackListWidget::track_at(area, &player, 5, 17), None);
    }

    #[test]
    fn test_track_at_without_disc() {
        let player = PlayerSnapshot::default();
        let area = Rect::new(0, 10, 30, 9);
        assert_eq!(TrackListWidget::track_at(area, &player, 5, 11), None);
    }
}
