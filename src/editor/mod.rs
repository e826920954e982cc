mod insert;
mod navigation;
mod search;
mod selection;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, info};

use crate::buffer::Buffer;
use crate::config::Config;
use crate::error::{EditError, FileError};
use crate::files;
use crate::location::Location;
use crate::mode::Mode;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    SaveAs,
    SaveAndExit,
    Browse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub label: &'static str,
    pub text: String,
    pub purpose: PromptPurpose,
}

impl Prompt {
    fn new(purpose: PromptPurpose) -> Self {
        Self {
            label: "filepath: ",
            text: String::new(),
            purpose,
        }
    }
}

pub struct Editor {
    pub buffer: Buffer,
    pub cursor: Location,
    pub viewport: Viewport,
    pub mode: Mode,
    pub prompt: Option<Prompt>,
    pub target: Option<PathBuf>,
    pub status: Option<String>,
    tab_width: usize,
}

impl Editor {
    pub fn new(config: &Config) -> Self {
        Self {
            buffer: Buffer::new(config.tab_width),
            cursor: Location::default(),
            viewport: Viewport::new(config.scroll_margin_top, config.scroll_margin_bottom),
            mode: Mode::Insert,
            prompt: None,
            target: None,
            status: None,
            tab_width: config.tab_width,
        }
    }

    pub fn is_running(&self) -> bool {
        self.mode != Mode::Exit
    }

    pub fn open(&mut self, path: PathBuf) -> Result<(), FileError> {
        if path.is_dir() {
            self.list_dir(&path)?;
        } else if path.exists() {
            self.load_file(&path)?;
            self.set_mode(Mode::Insert);
        } else {
            info!(path = %path.display(), "new file");
        }
        self.target = Some(path);
        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), FileError> {
        let text = files::read_text(path)?;
        let mut buffer = Buffer::new(self.tab_width);
        let mut cursor = Location::default();
        absorb(files::replay(&text, &mut buffer, &mut cursor));
        self.buffer = buffer;
        self.cursor = cursor;
        self.viewport.origin = Location::default();
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<(), FileError> {
        self.status = None;
        if self.prompt.is_some() {
            return self.handle_prompt_key(key);
        }
        match self.mode {
            Mode::Insert => self.handle_insert_key(key),
            Mode::Search(_) => {
                self.handle_search_key(key);
                Ok(())
            }
            Mode::Selection(_) => self.handle_selection_key(key),
            Mode::Navigation(_) => self.handle_navigation_key(key),
            Mode::Exit => Ok(()),
        }
    }

    pub fn scroll_to_cursor(&mut self, height: usize) {
        self.viewport.follow(self.cursor, height);
    }

    fn set_mode(&mut self, mode: Mode) {
        debug!(from = self.mode.label(), to = mode.label(), "mode change");
        self.mode = mode;
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Result<(), FileError> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                prompt.text.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.text.push(c);
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    return self.submit_prompt(prompt);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn submit_prompt(&mut self, prompt: Prompt) -> Result<(), FileError> {
        let text = prompt.text.trim();
        if text.is_empty() {
            if prompt.purpose == PromptPurpose::SaveAndExit {
                self.set_mode(Mode::Exit);
            }
            return Ok(());
        }
        let path = PathBuf::from(text);
        match prompt.purpose {
            PromptPurpose::SaveAs => {
                if self.write_to(&path)? {
                    self.target = Some(path);
                }
            }
            PromptPurpose::SaveAndExit => {
                if self.write_to(&path)? {
                    self.target = Some(path);
                    self.set_mode(Mode::Exit);
                }
            }
            PromptPurpose::Browse => {
                if !path.exists() {
                    self.status = Some(format!("{} does not exist", path.display()));
                    return Ok(());
                }
                self.open(path)?;
            }
        }
        Ok(())
    }

    fn save(&mut self, purpose: PromptPurpose) -> Result<bool, FileError> {
        match self.target.clone() {
            Some(path) => self.write_to(&path),
            None => {
                self.prompt = Some(Prompt::new(purpose));
                Ok(false)
            }
        }
    }

    fn write_to(&mut self, path: &Path) -> Result<bool, FileError> {
        match files::save(&self.buffer, path) {
            Ok(()) => {
                self.status = Some(format!("Saved {}", path.display()));
                Ok(true)
            }
            Err(FileError::TargetIsDirectory(dir)) => {
                self.status = Some(format!("Cannot save: {} is a directory", dir.display()));
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn char_before(&self) -> Option<char> {
        let Location { row, column } = self.cursor;
        if column == 0 {
            return if row == 0 { None } else { Some('\n') };
        }
        self.buffer.line(row)?.char_at(column - 1)
    }

    fn char_after(&self) -> Option<char> {
        let Location { row, column } = self.cursor;
        if column >= self.buffer.line_len(row) {
            return if row + 1 >= self.buffer.line_count() {
                None
            } else {
                Some('\n')
            };
        }
        self.buffer.line(row)?.char_at(column)
    }

    fn move_up(&mut self) {
        if self.cursor.row == 0 {
            self.cursor.column = 0;
            return;
        }
        self.cursor.row -= 1;
        self.cursor.column = self.cursor.column.min(self.buffer.line_len(self.cursor.row));
    }

    fn move_down(&mut self) {
        if self.cursor.row + 1 >= self.buffer.line_count() {
            self.cursor.column = self.buffer.last_line_len();
            return;
        }
        self.cursor.row += 1;
        self.cursor.column = self.cursor.column.min(self.buffer.line_len(self.cursor.row));
    }

    fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
            return;
        }
        if self.cursor.row == 0 {
            return;
        }
        self.cursor.row -= 1;
        self.cursor.column = self.buffer.line_len(self.cursor.row);
    }

    fn move_right(&mut self) {
        if self.cursor.column < self.buffer.line_len(self.cursor.row) {
            self.cursor.column += 1;
            return;
        }
        if self.cursor.row + 1 >= self.buffer.line_count() {
            return;
        }
        self.cursor.set(self.cursor.row + 1, 0);
    }

    fn skip_left_token(&mut self) {
        let Some(c) = self.char_before() else {
            return;
        };
        if c.is_whitespace() {
            let mut crossed_line = false;
            while let Some(c) = self.char_before().filter(|c| c.is_whitespace()) {
                if c == '\n' {
                    if crossed_line {
                        return;
                    }
                    crossed_line = true;
                }
                self.move_left();
            }
        }
        match self.char_before() {
            Some(c) if is_word(c) => self.retreat_while(is_word),
            Some(c) if c.is_numeric() => self.retreat_while(char::is_numeric),
            Some(_) => self.move_left(),
            None => {}
        }
    }

    fn skip_right_token(&mut self) {
        let Some(c) = self.char_after() else {
            return;
        };
        if c.is_whitespace() {
            let mut crossed_line = false;
            while let Some(c) = self.char_after().filter(|c| c.is_whitespace()) {
                if c == '\n' {
                    if crossed_line {
                        return;
                    }
                    crossed_line = true;
                }
                self.move_right();
            }
        }
        match self.char_after() {
            Some(c) if is_word(c) => self.advance_while(is_word),
            Some(c) if c.is_numeric() => self.advance_while(char::is_numeric),
            Some(_) => self.move_right(),
            None => {}
        }
    }

    fn retreat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.char_before().is_some_and(&pred) {
            self.move_left();
        }
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.char_after().is_some_and(&pred) {
            self.move_right();
        }
    }
}

fn is_word(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_directional(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
    )
}

fn is_extend(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::SHIFT) && is_directional(key.code)
}

// Edit errors mean the editor produced a bad position.
fn absorb(result: Result<(), EditError>) {
    if let Err(err) = result {
        error!(%err, "edit rejected");
        debug_assert!(false, "edit rejected: {err}");
    }
}
