//! Modal state machine for keyboard input handling

use crate::commands::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Command,
    Help,
}

impl Mode {
    /// Get display name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Command => "COMMAND",
            Mode::Help => "HELP",
        }
    }
}

/// Handles keyboard input and converts to commands
pub struct InputHandler {
    mode: Mode,
    command_buffer: String,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            command_buffer: String::new(),
        }
    }

    /// Get current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get current command buffer (for display)
    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    /// Handle a key event and return a command if applicable
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match self.mode {
            Mode::Normal => self.handle_normal_mode(key),
            Mode::Command => self.handle_command_mode(key),
            Mode::Help => self.handle_help_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            // Mode switching
            KeyCode::Char(':') => {
                self.mode = Mode::Command;
                self.command_buffer.clear();
                Some(Command::EnterCommandMode)
            }
            KeyCode::Char('?') => {
                self.mode = Mode::Help;
                Some(Command::ToggleHelp)
            }

            // Carousel navigation
            KeyCode::Left | KeyCode::Char('h') => Some(Command::CarouselPrev),
            KeyCode::Right | KeyCode::Char('l') => Some(Command::CarouselNext),

            // Arm the focused case, insert the armed one
            KeyCode::Enter => Some(Command::SelectFocused),
            KeyCode::Char('i') => Some(Command::InsertArmed),

            // Transport
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Command::TogglePlay),
            KeyCode::Char('e') => Some(Command::Eject),
            KeyCode::Char('.') | KeyCode::Char('f') => Some(Command::SkipForward),
            KeyCode::Char(',') | KeyCode::Char('b') => Some(Command::SkipBack),

            // Direct track selection
            KeyCode::Char(c @ '1'..='9') => {
                Some(Command::SelectTrack((c as u8 - b'1') as usize))
            }

            // Knobs
            KeyCode::Char('-') => Some(Command::AdjustVolume(-5)),
            KeyCode::Char('=') => Some(Command::AdjustVolume(5)),
            KeyCode::Char('_') => Some(Command::AdjustBass(-5)),
            KeyCode::Char('+') => Some(Command::AdjustBass(5)),

            // Quit
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }

            KeyCode::Esc => Some(Command::Cancel),

            _ => None,
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Enter => {
                let cmd = self.parse_command();
                self.mode = Mode::Normal;
                let buffer = std::mem::take(&mut self.command_buffer);
                cmd.or(Some(Command::ExecuteCommand(buffer)))
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.command_buffer.clear();
                Some(Command::EnterNormalMode)
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
                if self.command_buffer.is_empty() {
                    self.mode = Mode::Normal;
                    Some(Command::EnterNormalMode)
                } else {
                    None
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
                None
            }
            _ => None,
        }
    }

    fn parse_command(&self) -> Option<Command> {
        let input = self.command_buffer.trim();

        if input == "q" || input == "quit" {
            return Some(Command::Quit);
        }
        if input == "help" {
            return Some(Command::ToggleHelp);
        }
        if input == "eject" {
            return Some(Command::Eject);
        }

        // Handle scan command with potential quoted path
        if let Some(path) = input.strip_prefix("scan ") {
            let path = path.trim();
            // Remove surrounding quotes if present
            let path = if (path.starts_with('\'') && path.ends_with('\''))
                || (path.starts_with('"') && path.ends_with('"'))
            {
                &path[1..path.len() - 1]
            } else {
                path
            };

            if !path.is_empty() {
                return Some(Command::ShelfScan(path.into()));
            }
        }

        // Handle theme command
        if let Some(name) = input.strip_prefix("theme ") {
            let name = name.trim();
            if !name.is_empty() {
                return Some(Command::SetTheme(name.to_string()));
            }
        }

        None
    }

    fn handle_help_mode(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.mode = Mode::Normal;
                Some(Command::ToggleHelp)
            }
            KeyCode::Up | KeyCode::Char('k') => Some(Command::HelpScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::HelpScrollDown),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_transport_keys() {
        let mut handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char(' '))), Some(Command::TogglePlay));
        assert_eq!(handler.handle_key(key(KeyCode::Char('e'))), Some(Command::Eject));
        assert_eq!(handler.handle_key(key(KeyCode::Char('.'))), Some(Command::SkipForward));
        assert_eq!(handler.handle_key(key(KeyCode::Char(','))), Some(Command::SkipBack));
    }

    #[test]
    fn test_number_keys_select_tracks() {
        let mut handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('1'))), Some(Command::SelectTrack(0)));
        assert_eq!(handler.handle_key(key(KeyCode::Char('5'))), Some(Command::SelectTrack(4)));
        assert_eq!(handler.handle_key(key(KeyCode::Char('9'))), Some(Command::SelectTrack(8)));
    }

    #[test]
    fn test_arm_then_insert_keys() {
        let mut handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Enter)), Some(Command::SelectFocused));
        assert_eq!(handler.handle_key(key(KeyCode::Char('i'))), Some(Command::InsertArmed));
    }

    #[test]
    fn test_command_mode_entry_and_parse() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(':'))),
            Some(Command::EnterCommandMode)
        );
        assert_eq!(handler.mode(), Mode::Command);

        for c in "scan /tmp/discs".chars() {
            handler.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(handler.command_buffer(), "scan /tmp/discs");
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter)),
            Some(Command::ShelfScan("/tmp/discs".into()))
        );
        assert_eq!(handler.mode(), Mode::Normal);
    }

    #[test]
    fn test_command_mode_quoted_path() {
        let mut handler = InputHandler::new();
        handler.handle_key(key(KeyCode::Char(':')));
        for c in "scan \"/tmp/my discs\"".chars() {
            handler.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter)),
            Some(Command::ShelfScan("/tmp/my discs".into()))
        );
    }

    #[test]
    fn test_command_mode_quit_and_theme() {
        let mut handler = InputHandler::new();
        handler.handle_key(key(KeyCode::Char(':')));
        handler.handle_key(key(KeyCode::Char('q')));
        assert_eq!(handler.handle_key(key(KeyCode::Enter)), Some(Command::Quit));

        handler.handle_key(key(KeyCode::Char(':')));
        for c in "theme amber".chars() {
            handler.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter)),
            Some(Command::SetTheme("amber".to_string()))
        );
    }

    #[test]
    fn test_unknown_command_passes_buffer_through() {
        let mut handler = InputHandler::new();
        handler.handle_key(key(KeyCode::Char(':')));
        for c in "frobnicate".chars() {
            handler.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter)),
            Some(Command::ExecuteCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_help_mode_round_trip() {
        let mut handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('?'))), Some(Command::ToggleHelp));
        assert_eq!(handler.mode(), Mode::Help);

        assert_eq!(handler.handle_key(key(KeyCode::Down)), Some(Command::HelpScrollDown));
        assert_eq!(handler.handle_key(key(KeyCode::Esc)), Some(Command::ToggleHelp));
        assert_eq!(handler.mode(), Mode::Normal);
    }
}
