use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FileError;
use crate::location::{sort_locations, Location};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Insert,
    Search(SearchParams),
    Selection(SelectionParams),
    Navigation(NavigationParams),
    Exit,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Search(params) if params.sub_mode == SearchSubMode::Replace => "REPLACE",
            Mode::Search(_) => "SEARCH",
            Mode::Selection(_) => "SELECT",
            Mode::Navigation(_) => "BROWSE",
            Mode::Exit => "EXIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSubMode {
    Search,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Query,
    Replacement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    // stale after any buffer edit until recomputed
    pub matches: Vec<Location>,
    pub current: usize,
    pub sub_mode: SearchSubMode,
    pub field: SearchField,
    pub query: String,
    pub replacement: String,
    pub has_replaced: bool,
}

impl SearchParams {
    pub fn new(sub_mode: SearchSubMode) -> Self {
        Self {
            matches: Vec::new(),
            current: 0,
            sub_mode,
            field: SearchField::Query,
            query: String::new(),
            replacement: String::new(),
            has_replaced: false,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            SearchField::Query => &mut self.query,
            SearchField::Replacement => &mut self.replacement,
        }
    }

    pub fn query_len(&self) -> usize {
        self.query.chars().count()
    }

    pub fn match_end(&self, index: usize) -> Option<Location> {
        self.matches
            .get(index)
            .map(|loc| Location::new(loc.row, loc.column + self.query_len()))
    }

    pub fn highlights(&self, loc: Location) -> bool {
        let len = self.query_len();
        self.matches
            .iter()
            .any(|m| m.row == loc.row && loc.column >= m.column && loc.column < m.column + len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParams {
    pub start: Location,
    pub end: Location,
}

impl SelectionParams {
    pub fn anchored_at(cursor: Location) -> Self {
        Self {
            start: cursor,
            end: cursor,
        }
    }

    pub fn bounds(&self) -> (Location, Location) {
        sort_locations(self.start, self.end)
    }

    pub fn contains(&self, loc: Location) -> bool {
        let (lo, hi) = self.bounds();
        if loc.row < lo.row || loc.row > hi.row {
            return false;
        }
        if loc.row > lo.row && loc.row < hi.row {
            return true;
        }
        if lo.row == hi.row {
            return loc.column >= lo.column && loc.column < hi.column;
        }
        if loc.row == lo.row {
            return loc.column >= lo.column;
        }
        loc.column < hi.column
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationParams {
    pub dir: PathBuf,
    pub entries: Vec<DirEntry>,
    pub current: usize,
}

impl NavigationParams {
    pub fn list(dir: &Path) -> Result<Self, FileError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(FileError::io(dir))? {
            let entry = entry.map_err(FileError::io(dir))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            current: 0,
        })
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.entries.len();
    }

    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or(self.entries.len() - 1);
    }

    pub fn jump_to(&mut self, c: char) {
        if let Some(index) = self.entries.iter().position(|e| e.name.starts_with(c)) {
            self.current = index;
        }
    }

    pub fn selected(&self) -> Option<&DirEntry> {
        self.entries.get(self.current)
    }
}
