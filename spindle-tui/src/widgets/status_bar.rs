//! Status bar widget - mode indicator and command line

use crate::app::MessageType;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use spindle_input::Mode;

/// Widget for displaying the status bar with mode and command input
pub struct StatusBarWidget<'a> {
    mode: Mode,
    command_buffer: &'a str,
    message: Option<&'a str>,
    message_type: MessageType,
    theme: &'a Theme,
    /// Name of the track currently audible, if any
    now_playing: Option<String>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(mode: Mode, command_buffer: &'a str, theme: &'a Theme) -> Self {
        Self {
            mode,
            command_buffer,
            message: None,
            message_type: MessageType::Info,
            theme,
            now_playing: None,
        }
    }

    pub fn message(mut self, msg: Option<&'a str>, msg_type: MessageType) -> Self {
        self.message = msg;
        self.message_type = msg_type;
        self
    }

    pub fn now_playing(mut self, track: Option<String>) -> Self {
        self.now_playing = track;
        self
    }

    fn mode_string(&self) -> (&'static str, Style) {
        match self.mode {
            Mode::Normal => ("NORMAL", self.theme.highlight()),
            Mode::Command => ("COMMAND", Style::from(self.theme.accent)),
            Mode::Help => ("HELP", self.theme.highlight()),
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let chunks = Layout::horizontal([
            Constraint::Length(10), // Mode indicator
            Constraint::Min(20),    // Command/message area
            Constraint::Length(22), // Help hint
        ])
        .split(area);

        // Mode indicator
        let (mode_text, mode_style) = self.mode_string();
        let mode_line = Line::from(vec![
            Span::raw("["),
            Span::styled(mode_text, mode_style),
            Span::raw("]"),
        ]);
        Paragraph::new(mode_line).render(chunks[0], buf);

        // Command/message area
        let content = if self.mode == Mode::Command {
            Line::from(vec![
                Span::styled(":", Style::from(self.theme.accent)),
                Span::styled(self.command_buffer, self.theme.normal()),
                Span::styled("█", self.theme.highlight()), // Cursor
            ])
        } else if let Some(msg) = self.message {
            // Color message based on type
            let msg_style = match self.message_type {
                MessageType::Info => self.theme.dim(),
                MessageType::Success => Style::from(self.theme.accent),
                MessageType::Warning => Style::default().fg(self.theme.warning),
                MessageType::Error => Style::default().fg(self.theme.danger),
            };
            Line::from(Span::styled(msg, msg_style))
        } else if let Some(ref track) = self.now_playing {
            Line::from(vec![
                Span::styled("♪ ", Style::from(self.theme.accent)),
                Span::styled(track.clone(), self.theme.normal()),
            ])
        } else {
            Line::from(Span::styled(
                "Ready. Press ? for help, : for commands",
                self.theme.dim(),
            ))
        };
        Paragraph::new(content).render(chunks[1], buf);

        // Help hint
        let help = match self.mode {
            Mode::Normal => "Enter:arm  i:insert  ?",
            Mode::Command => "Enter:run  Esc:cancel",
            Mode::Help => "Esc:close help",
        };
        let help_line = Line::from(Span::styled(help, self.theme.dim()));
        Paragraph::new(help_line).render(chunks[2], buf);
    }
}

/// Help overlay widget with scrolling support
pub struct HelpWidget<'a> {
    theme: &'a Theme,
    scroll: u16,
}

impl<'a> HelpWidget<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme, scroll: 0 }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    fn help_lines() -> Vec<&'static str> {
        vec![
            "╔════════════════════════════════════════════════════════════════╗",
            "║                  SPINDLE - Virtual CD Player                   ║",
            "║                    ↑/↓ or j/k to scroll                        ║",
            "╠════════════════════════════════════════════════════════════════╣",
            "║ SHELF                                                          ║",
            "║   ← / →  or h/l   Rotate the carousel                          ║",
            "║   Enter           Arm the centered case for insertion          ║",
            "║   i               Insert the armed disc into the tray          ║",
            "║   click           Center and arm a case                        ║",
            "║   press + drag    Drag the armed case onto the tray to insert  ║",
            "║   Esc             Drop the arming / abandon a drag             ║",
            "╠────────────────────────────────────────────────────────────────╣",
            "║ TRANSPORT (needs a disc in the tray)                           ║",
            "║   Space or p      Play / pause                                 ║",
            "║   . / ,  (f / b)  Next / previous track (wraps around)         ║",
            "║   1-9             Jump straight to a track                     ║",
            "║   e               Eject (tray opens for two seconds)           ║",
            "╠────────────────────────────────────────────────────────────────╣",
            "║ KNOBS                                                          ║",
            "║   - / =           Volume down / up                             ║",
            "║   _ / +           Bass down / up                               ║",
            "║   scroll wheel    Turn the knob under the pointer              ║",
            "╠────────────────────────────────────────────────────────────────╣",
            "║ COMMANDS (:)                                                   ║",
            "║   :scan <folder>  Build the shelf from album folders           ║",
            "║   :theme <name>   silver / green / amber                       ║",
            "║   :eject          Same as e                                    ║",
            "║   :q              Quit                                         ║",
            "╠════════════════════════════════════════════════════════════════╣",
            "║                Press Esc or ? to close help                    ║",
            "║                   Ctrl-Q to quit Spindle                       ║",
            "╚════════════════════════════════════════════════════════════════╝",
        ]
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear background
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_char(' ').set_style(self.theme.normal());
            }
        }

        let help_text = Self::help_lines();
        let total_lines = help_text.len() as u16;
        let visible_lines = area.height.min(total_lines);

        // Clamp scroll to valid range
        let max_scroll = total_lines.saturating_sub(visible_lines);
        let scroll = self.scroll.min(max_scroll);

        let start_x = area.x + area.width.saturating_sub(68) / 2;

        for (i, line) in help_text
            .iter()
            .skip(scroll as usize)
            .take(visible_lines as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }

            for (j, ch) in line.chars().enumerate() {
                let x = start_x + j as u16;
                if x >= area.x + area.width {
                    break;
                }

                let style = if matches!(ch, '║' | '╔' | '╗' | '╚' | '╝' | '═' | '╠' | '╣' | '─') {
                    self.theme.border()
                } else {
                    self.theme.normal()
                };

                buf[(x, y)].set_char(ch).set_style(style);
            }
        }

        // Show scroll indicator if content is scrollable
        if total_lines > visible_lines {
            let indicator = format!(" [{}/{}] ", scroll + 1, max_scroll + 1);
            let indicator_x = area.x + area.width.saturating_sub(indicator.len() as u16 + 2);
            let indicator_y = area.y + area.height - 1;

            for (i, ch) in indicator.chars().enumerate() {
                let x = indicator_x + i as u16;
                if x < area.x + area.width {
                    buf[(x, indicator_y)]
                        .set_char(ch)
                        .set_style(self.theme.dim());
                }
            }
        }
    }
}
