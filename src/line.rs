use crate::error::EditError;
use crate::location::Location;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    content: String,
}

impl Line {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn char_at(&self, column: usize) -> Option<char> {
        self.content.chars().nth(column)
    }

    pub fn insert_str(&mut self, text: &str, cursor: &mut Location) -> Result<(), EditError> {
        let at = self.byte_index(cursor.column)?;
        self.content.insert_str(at, text);
        cursor.column += text.chars().count();
        Ok(())
    }

    pub fn remove_str(&mut self, count: usize, cursor: &mut Location) -> Result<(), EditError> {
        if count == 0 {
            return Ok(());
        }
        let end = self.byte_index(cursor.column)?;
        let first = cursor
            .column
            .checked_sub(count)
            .ok_or(EditError::InvalidRange {
                column: cursor.column,
                count,
            })?;
        let start = self.byte_index(first)?;
        self.content.replace_range(start..end, "");
        cursor.column = first;
        Ok(())
    }

    pub fn split_at(&self, column: usize) -> Result<(Line, Line), EditError> {
        let at = self.byte_index(column)?;
        let (head, tail) = self.content.split_at(at);
        Ok((Line::new(head), Line::new(tail)))
    }

    pub fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub fn search(&self, start: usize, pattern: &str) -> Vec<usize> {
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() {
            return Vec::new();
        }
        let chars: Vec<char> = self.content.chars().collect();
        chars
            .windows(pattern.len())
            .enumerate()
            .skip(start)
            .filter(|(_, window)| *window == pattern.as_slice())
            .map(|(col, _)| col)
            .collect()
    }

    pub fn replace_at(&mut self, column: usize, old: &str, new: &str, cursor: &mut Location) {
        let Ok(start) = self.byte_index(column) else {
            return;
        };
        let last = (column + old.chars().count()).min(self.len());
        let end = self.byte_index(last).unwrap_or(self.content.len());
        self.content.replace_range(start..end, new);
        cursor.column = column + new.chars().count();
    }

    fn byte_index(&self, column: usize) -> Result<usize, EditError> {
        if column == 0 {
            return Ok(0);
        }
        let mut indices = self.content.char_indices().map(|(idx, _)| idx);
        match indices.nth(column) {
            Some(idx) => Ok(idx),
            None if column == self.len() => Ok(self.content.len()),
            None => Err(EditError::InvalidPosition {
                column,
                len: self.len(),
            }),
        }
    }
}
