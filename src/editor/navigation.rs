use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};

use super::{Editor, Prompt, PromptPurpose};
use crate::error::FileError;
use crate::mode::{Mode, NavigationParams};

impl Editor {
    pub(super) fn enter_navigation(&mut self) -> Result<(), FileError> {
        match self.browse_dir() {
            Some(dir) => self.list_dir(&dir),
            None => {
                self.prompt = Some(Prompt::new(PromptPurpose::Browse));
                Ok(())
            }
        }
    }

    pub(super) fn list_dir(&mut self, dir: &Path) -> Result<(), FileError> {
        let params = NavigationParams::list(dir)?;
        self.set_mode(Mode::Navigation(params));
        Ok(())
    }

    pub(super) fn handle_navigation_key(&mut self, key: KeyEvent) -> Result<(), FileError> {
        let Mode::Navigation(nav) = &mut self.mode else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => self.set_mode(Mode::Exit),
            KeyCode::Up => nav.select_previous(),
            KeyCode::Down => nav.select_next(),
            KeyCode::Char(c) => nav.jump_to(c),
            KeyCode::Enter => {
                let Some(entry) = nav.selected() else {
                    return Ok(());
                };
                let path = nav.dir.join(&entry.name);
                return self.open(path);
            }
            _ => {}
        }
        Ok(())
    }

    fn browse_dir(&self) -> Option<PathBuf> {
        let target = self.target.as_ref()?;
        if target.is_dir() {
            return Some(target.clone());
        }
        match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Some(parent.to_path_buf()),
            _ => Some(PathBuf::from(".")),
        }
    }
}
