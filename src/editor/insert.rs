use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{absorb, is_extend, Editor, PromptPurpose};
use crate::error::FileError;
use crate::mode::{Mode, SearchSubMode};

impl Editor {
    pub(super) fn handle_insert_key(&mut self, key: KeyEvent) -> Result<(), FileError> {
        if is_extend(&key) {
            self.enter_selection();
            return self.handle_selection_key(key);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_insert_command(key);
        }

        match key.code {
            KeyCode::Esc => self.save_and_exit()?,
            KeyCode::Backspace => absorb(self.buffer.remove_char(&mut self.cursor)),
            KeyCode::Tab => absorb(self.buffer.insert_tab(&mut self.cursor)),
            KeyCode::Enter => absorb(self.buffer.insert_new_line(&mut self.cursor)),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Char(c) => absorb(self.buffer.insert_char(c, &mut self.cursor)),
            _ => {}
        }
        Ok(())
    }

    fn handle_insert_command(&mut self, key: KeyEvent) -> Result<(), FileError> {
        match key.code {
            KeyCode::Left => self.skip_left_token(),
            KeyCode::Right => self.skip_right_token(),
            KeyCode::Char('s') => {
                self.save(PromptPurpose::SaveAs)?;
            }
            KeyCode::Char('f') => self.enter_search(SearchSubMode::Search),
            KeyCode::Char('r') => self.enter_search(SearchSubMode::Replace),
            KeyCode::Char('p') => self.enter_navigation()?,
            _ => {}
        }
        Ok(())
    }

    fn save_and_exit(&mut self) -> Result<(), FileError> {
        if self.save(PromptPurpose::SaveAndExit)? {
            self.set_mode(Mode::Exit);
        }
        Ok(())
    }
}
