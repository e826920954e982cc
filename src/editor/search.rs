use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Editor;
use crate::mode::{Mode, SearchField, SearchParams, SearchSubMode};

impl Editor {
    pub(super) fn enter_search(&mut self, sub_mode: SearchSubMode) {
        self.set_mode(Mode::Search(SearchParams::new(sub_mode)));
    }

    pub(super) fn handle_search_key(&mut self, key: KeyEvent) {
        let Mode::Search(params) = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                if params.sub_mode == SearchSubMode::Replace
                    && params.field == SearchField::Replacement
                {
                    params.field = SearchField::Query;
                } else {
                    self.set_mode(Mode::Insert);
                }
            }
            KeyCode::Enter => self.confirm_search(),
            KeyCode::Backspace => {
                params.active_field_mut().pop();
                self.recompute_matches(true);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                params.active_field_mut().push(c);
                self.recompute_matches(true);
            }
            _ => {}
        }
    }

    fn recompute_matches(&mut self, reposition: bool) {
        let Mode::Search(params) = &mut self.mode else {
            return;
        };
        params.matches = self.buffer.search(&params.query);
        params.current = 0;
        if reposition {
            if let Some(end) = params.match_end(0) {
                self.cursor = end;
            }
        }
    }

    fn confirm_search(&mut self) {
        let Mode::Search(params) = &mut self.mode else {
            return;
        };
        match (params.sub_mode, params.field) {
            (SearchSubMode::Search, _) => {
                if params.matches.is_empty() {
                    return;
                }
                params.current = (params.current + 1) % params.matches.len();
                if let Some(end) = params.match_end(params.current) {
                    self.cursor = end;
                }
            }
            (SearchSubMode::Replace, SearchField::Query) => {
                params.field = SearchField::Replacement;
            }
            (SearchSubMode::Replace, SearchField::Replacement) if params.has_replaced => {
                params.has_replaced = false;
                self.recompute_from_cursor(true);
            }
            (SearchSubMode::Replace, SearchField::Replacement) => {
                let Some(end) = params.match_end(params.current) else {
                    return;
                };
                self.cursor = end;
                self.cursor.column -= params.query_len();
                self.buffer
                    .find_and_replace(&params.replacement, &params.query, &mut self.cursor);
                params.has_replaced = true;
                self.recompute_from_cursor(false);
            }
        }
    }

    // Skips matches inside text that was just inserted.
    fn recompute_from_cursor(&mut self, reposition: bool) {
        let Mode::Search(params) = &mut self.mode else {
            return;
        };
        params.matches = self.buffer.search(&params.query);
        params.current = params
            .matches
            .iter()
            .position(|m| *m >= self.cursor)
            .unwrap_or(0);
        if reposition {
            if let Some(end) = params.match_end(params.current) {
                self.cursor = end;
            }
        }
    }
}
