//! Shelf carousel widget - disc cases fanned around a center index
//!
//! The carousel shows up to five cases (center ± 2). Clicking a case or
//! pressing Enter arms it; an armed case can then be dragged to the tray.
//! Slot rectangles come from one pure function used by both rendering and
//! mouse hit-testing, so clicks always land on what was drawn.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use spindle_library::{DiscId, Shelf};

/// Width of one disc case
const CASE_WIDTH: u16 = 22;
/// Horizontal gap between cases
const CASE_GAP: u16 = 2;
/// How many cases are visible either side of the center
const VISIBLE_SPAN: i32 = 2;
/// Width of the chevron hit areas at the carousel edges
const CHEVRON_WIDTH: u16 = 3;

/// Carousel cursor over the shelf
#[derive(Debug, Clone, Default)]
pub struct CarouselState {
    len: usize,
    center_index: usize,
    focused_index: usize,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            center_index: 0,
            focused_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn center_index(&self) -> usize {
        self.center_index
    }

    /// Index confirmed by Enter (follows the center on keyboard navigation)
    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    /// Rotate the carousel one case to the right
    pub fn next(&mut self) {
        if self.len > 0 {
            self.center_index = (self.center_index + 1) % self.len;
            self.focused_index = self.center_index;
        }
    }

    /// Rotate the carousel one case to the left
    pub fn prev(&mut self) {
        if self.len > 0 {
            self.center_index = (self.center_index + self.len - 1) % self.len;
            self.focused_index = self.center_index;
        }
    }

    /// Center and focus a specific case (mouse click)
    pub fn center_on(&mut self, index: usize) {
        if index < self.len {
            self.center_index = index;
            self.focused_index = index;
        }
    }

    /// Signed shortest distance from the center to `index`
    fn relative(&self, index: usize) -> i32 {
        let len = self.len as i32;
        if len == 0 {
            return 0;
        }
        let mut rel = (index as i32 - self.center_index as i32).rem_euclid(len);
        if rel > len / 2 {
            rel -= len;
        }
        rel
    }
}

/// Widget rendering the shelf as a carousel of disc cases
pub struct CarouselWidget<'a> {
    shelf: &'a Shelf,
    state: &'a CarouselState,
    theme: &'a Theme,
    armed: Option<DiscId>,
    inserted: Option<DiscId>,
    scanning: Option<(usize, usize)>,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(shelf: &'a Shelf, state: &'a CarouselState, theme: &'a Theme) -> Self {
        Self {
            shelf,
            state,
            theme,
            armed: None,
            inserted: None,
            scanning: None,
        }
    }

    /// Mark the case armed for dragging
    pub fn armed(mut self, armed: Option<DiscId>) -> Self {
        self.armed = armed;
        self
    }

    /// Mark the case whose disc sits in the tray
    pub fn inserted(mut self, inserted: Option<DiscId>) -> Self {
        self.inserted = inserted;
        self
    }

    /// Show scan progress in the title
    pub fn scanning(mut self, progress: Option<(usize, usize)>) -> Self {
        self.scanning = progress;
        self
    }

    /// Rectangles of the visible cases, as (shelf index, rect)
    ///
    /// Shared by render and mouse hit-testing.
    pub fn slot_rects(area: Rect, state: &CarouselState) -> Vec<(usize, Rect)> {
        let mut slots = Vec::new();
        if state.len == 0 || area.width < CASE_WIDTH + 2 * CHEVRON_WIDTH || area.height < 5 {
            return slots;
        }

        let case_height = area
            .height
            .saturating_sub(3)
            .clamp(4, 9)
            .min(area.height.saturating_sub(1));
        let cy = area.y + 1;
        let cx = area.x + area.width / 2;

        for index in 0..state.len {
            let rel = state.relative(index);
            if rel.abs() > VISIBLE_SPAN {
                continue;
            }
            let x = cx as i32 - (CASE_WIDTH as i32) / 2 + rel * (CASE_WIDTH + CASE_GAP) as i32;
            if x < (area.x + CHEVRON_WIDTH) as i32
                || x + CASE_WIDTH as i32 > (area.x + area.width - CHEVRON_WIDTH) as i32
            {
                continue;
            }
            slots.push((index, Rect::new(x as u16, cy, CASE_WIDTH, case_height)));
        }

        // Draw edge cases first so the center case overlaps them
        slots.sort_by_key(|(index, _)| std::cmp::Reverse(state.relative(*index).abs()));
        slots
    }

    /// The area inside the widget border, as used while rendering
    fn inner(area: Rect) -> Rect {
        Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        )
    }

    /// Shelf index of the case under (col, row); takes the widget's outer area
    pub fn slot_at(area: Rect, state: &CarouselState, col: u16, row: u16) -> Option<usize> {
        // Hit-test front-to-back (reverse of draw order)
        Self::slot_rects(Self::inner(area), state)
            .iter()
            .rev()
            .find(|(_, rect)| {
                col >= rect.x
                    && col < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(index, _)| *index)
    }

    /// Hit area of the "previous" chevron; takes the widget's outer area
    pub fn prev_rect(area: Rect) -> Rect {
        let inner = Self::inner(area);
        Rect::new(inner.x, inner.y, CHEVRON_WIDTH, inner.height)
    }

    /// Hit area of the "next" chevron; takes the widget's outer area
    pub fn next_rect(area: Rect) -> Rect {
        let inner = Self::inner(area);
        Rect::new(
            inner.x + inner.width.saturating_sub(CHEVRON_WIDTH),
            inner.y,
            CHEVRON_WIDTH,
            inner.height,
        )
    }

    fn render_case(&self, index: usize, rect: Rect, buf: &mut Buffer) {
        let Some(disc) = self.shelf.get(index) else {
            return;
        };
        let is_center = index == self.state.center_index;
        let is_armed = self.armed == Some(disc.id());
        let is_inserted = self.inserted == Some(disc.id());

        let border_style = if is_armed {
            self.theme.armed_ring()
        } else if is_inserted {
            self.theme.inserted_ring()
        } else if is_center {
            self.theme.border_active()
        } else {
            self.theme.border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.height < 3 || inner.width < 6 {
            return;
        }

        let width = inner.width as usize;
        let truncate = |s: &str| -> String { s.chars().take(width).collect() };

        let badge = if is_inserted {
            Span::styled("● IN TRAY", self.theme.inserted_ring())
        } else if is_armed {
            Span::styled("◆ ARMED", self.theme.armed_ring())
        } else {
            Span::styled("", self.theme.dim())
        };

        let body_style = if is_center {
            self.theme.normal()
        } else {
            self.theme.dim()
        };

        let mut lines = vec![
            Line::from(Span::styled(truncate(disc.title()), self.theme.title())),
            Line::from(Span::styled(truncate(disc.artist()), body_style)),
            Line::from(Span::styled(
                format!("{} tracks", disc.track_count()),
                self.theme.dim(),
            )),
        ];
        if inner.height >= 4 {
            lines.push(Line::from(badge));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.scanning {
            Some((current, total)) => format!(" SHELF [{}/{}] ", current, total),
            None => format!(" SHELF [{}] ", self.shelf.len()),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(title, self.theme.title()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 5 || inner.width < CASE_WIDTH + 2 * CHEVRON_WIDTH {
            return;
        }

        if self.shelf.is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Shelf is empty - :scan <folder> to add discs",
                self.theme.dim(),
            )));
            hint.render(Rect::new(inner.x + 2, inner.y + inner.height / 2, inner.width - 4, 1), buf);
            return;
        }

        // Chevrons at the edges
        let chevron_y = inner.y + inner.height / 2;
        buf.set_string(inner.x + 1, chevron_y, "◀", self.theme.control());
        buf.set_string(inner.x + inner.width - 2, chevron_y, "▶", self.theme.control());

        for (index, rect) in Self::slot_rects(inner, self.state) {
            self.render_case(index, rect, buf);
        }

        // Hint line under the cases
        if inner.height >= 7 {
            let hint = "click or Enter to arm - then drag (or press i) to insert";
            let x = inner.x + (inner.width.saturating_sub(hint.len() as u16)) / 2;
            buf.set_string(x, inner.y + inner.height - 1, hint, self.theme.dim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut state = CarouselState::new(3);
        assert_eq!(state.center_index(), 0);

        state.prev();
        assert_eq!(state.center_index(), 2);
        state.next();
        assert_eq!(state.center_index(), 0);
        state.next();
        assert_eq!(state.center_index(), 1);
        assert_eq!(state.focused_index(), 1);
    }

    #[test]
    fn test_empty_carousel_navigation_is_safe() {
        let mut state = CarouselState::new(0);
        state.next();
        state.prev();
        state.center_on(5);
        assert_eq!(state.center_index(), 0);
    }

    #[test]
    fn test_center_on_out_of_range_ignored() {
        let mut state = CarouselState::new(3);
        state.center_on(7);
        assert_eq!(state.center_index(), 0);
        state.center_on(2);
        assert_eq!(state.center_index(), 2);
    }

    #[test]
    fn test_relative_shortest_distance() {
        let mut state = CarouselState::new(5);
        state.center_on(0);
        assert_eq!(state.relative(0), 0);
        assert_eq!(state.relative(1), 1);
        assert_eq!(state.relative(4), -1);
        assert_eq!(state.relative(2), 2);
        assert_eq!(state.relative(3), -2);
    }

    #[test]
    fn test_slot_rects_center_present_and_in_bounds() {
        let state = CarouselState::new(5);
        let area = Rect::new(0, 0, 120, 12);
        let slots = CarouselWidget::slot_rects(area, &state);

        assert!(!slots.is_empty());
        // Center case is drawn last (on top)
        assert_eq!(slots.last().unwrap().0, state.center_index());
        for (_, rect) in &slots {
            assert!(rect.x + rect.width <= area.x + area.width);
        }
    }

    #[test]
    fn test_slot_at_matches_rects() {
        let state = CarouselState::new(5);
        let outer = Rect::new(0, 0, 122, 14);
        // slot_at derives the same inner area the renderer draws into
        let slots = CarouselWidget::slot_rects(CarouselWidget::inner(outer), &state);

        let (center_index, center_rect) = *slots.last().unwrap();
        let hit = CarouselWidget::slot_at(
            outer,
            &state,
            center_rect.x + 1,
            center_rect.y + 1,
        );
        assert_eq!(hit, Some(center_index));

        assert_eq!(CarouselWidget::slot_at(outer, &state, 0, 0), None);
    }

    #[test]
    fn test_narrow_area_yields_no_slots() {
        let state = CarouselState::new(5);
        let slots = CarouselWidget::slot_rects(Rect::new(0, 0, 20, 12), &state);
        assert!(slots.is_empty());
    }
}
