use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{absorb, is_directional, is_extend, Editor};
use crate::error::FileError;
use crate::location::Location;
use crate::mode::{Mode, SelectionParams};

impl Editor {
    pub(super) fn enter_selection(&mut self) {
        self.set_mode(Mode::Selection(SelectionParams::anchored_at(self.cursor)));
    }

    pub(super) fn handle_selection_key(&mut self, key: KeyEvent) -> Result<(), FileError> {
        if is_extend(&key) {
            self.extend_selection(key);
            return Ok(());
        }
        // Plain movement and commands drop the selection and act as in Insert.
        if is_directional(key.code) || key.modifiers.contains(KeyModifiers::CONTROL) {
            self.set_mode(Mode::Insert);
            return self.handle_insert_key(key);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Delete => self.delete_selection(),
            KeyCode::Enter => {
                self.delete_selection();
                absorb(self.buffer.insert_new_line(&mut self.cursor));
            }
            KeyCode::Tab => {
                self.delete_selection();
                absorb(self.buffer.insert_tab(&mut self.cursor));
            }
            KeyCode::Char(c) => {
                self.delete_selection();
                absorb(self.buffer.insert_char(c, &mut self.cursor));
            }
            _ => {}
        }
        Ok(())
    }

    fn extend_selection(&mut self, key: KeyEvent) {
        let by_token = key.modifiers.contains(KeyModifiers::CONTROL);
        match (key.code, by_token) {
            (KeyCode::Left, true) => self.skip_left_token(),
            (KeyCode::Right, true) => self.skip_right_token(),
            (KeyCode::Left, false) => self.move_left(),
            (KeyCode::Right, false) => self.move_right(),
            (KeyCode::Up, false) => self.move_up(),
            (KeyCode::Down, false) => self.move_down(),
            _ => {}
        }
        if let Mode::Selection(params) = &mut self.mode {
            params.end = self.cursor;
        }
    }

    fn delete_selection(&mut self) {
        let Mode::Selection(params) = &self.mode else {
            return;
        };
        let (lo, hi) = params.bounds();
        let count = self.selection_len(lo, hi);
        self.cursor = hi;
        absorb(self.buffer.remove_str(count, &mut self.cursor));
        self.set_mode(Mode::Insert);
    }

    // One unit per crossed line break, matching `Buffer::remove_str`.
    fn selection_len(&self, lo: Location, hi: Location) -> usize {
        if lo.row == hi.row {
            return hi.column - lo.column;
        }
        let first = self.buffer.line_len(lo.row).saturating_sub(lo.column) + 1;
        let interior: usize = (lo.row + 1..hi.row)
            .map(|row| self.buffer.line_len(row) + 1)
            .sum();
        first + interior + hi.column
    }
}
