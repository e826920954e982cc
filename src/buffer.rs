use crate::error::EditError;
use crate::line::Line;
use crate::location::Location;

pub const DEFAULT_TAB_WIDTH: usize = 4;

pub fn complement(c: char) -> Option<char> {
    match c {
        '{' => Some('}'),
        '(' => Some(')'),
        '[' => Some(']'),
        '<' => Some('>'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Line>,
    tab_width: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

impl Buffer {
    pub fn new(tab_width: usize) -> Self {
        Self {
            lines: vec![Line::default()],
            tab_width: tab_width.max(1),
        }
    }

    #[cfg(test)]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(Line::new).collect(),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(Line::len).unwrap_or(0)
    }

    pub fn last_line_len(&self) -> usize {
        self.line_len(self.lines.len() - 1)
    }

    pub fn is_blank(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn line_mut(&mut self, row: usize) -> Result<&mut Line, EditError> {
        let count = self.lines.len();
        self.lines
            .get_mut(row)
            .ok_or(EditError::InvalidLine { row, count })
    }

    pub fn insert_str(&mut self, text: &str, cursor: &mut Location) -> Result<(), EditError> {
        self.line_mut(cursor.row)?.insert_str(text, cursor)
    }

    pub fn insert_char(&mut self, c: char, cursor: &mut Location) -> Result<(), EditError> {
        match complement(c) {
            Some(closing) => {
                let pair: String = [c, closing].iter().collect();
                self.insert_str(&pair, cursor)?;
                cursor.column -= 1;
                Ok(())
            }
            None => self.insert_char_literal(c, cursor),
        }
    }

    pub fn insert_char_literal(&mut self, c: char, cursor: &mut Location) -> Result<(), EditError> {
        let mut encoded = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut encoded), cursor)
    }

    pub fn insert_new_line(&mut self, cursor: &mut Location) -> Result<(), EditError> {
        let (head, tail) = self.line_mut(cursor.row)?.split_at(cursor.column)?;
        self.lines[cursor.row] = head;
        self.lines.insert(cursor.row + 1, tail);
        cursor.set(cursor.row + 1, 0);
        Ok(())
    }

    pub fn insert_tab(&mut self, cursor: &mut Location) -> Result<(), EditError> {
        for _ in 0..self.tab_width {
            self.insert_char(' ', cursor)?;
        }
        Ok(())
    }

    pub fn remove_line(&mut self, row: usize) -> Result<(), EditError> {
        if row >= self.lines.len() {
            return Err(EditError::InvalidLine {
                row,
                count: self.lines.len(),
            });
        }
        self.lines.remove(row);
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        Ok(())
    }

    pub fn append_line_content(&mut self, into: usize, from: usize) -> Result<(), EditError> {
        let count = self.lines.len();
        let text = self
            .lines
            .get(from)
            .ok_or(EditError::InvalidLine { row: from, count })?
            .content()
            .to_string();
        self.line_mut(into)?.push_str(&text);
        Ok(())
    }

    // A crossed line break consumes one unit of `count`.
    pub fn remove_str(&mut self, mut count: usize, cursor: &mut Location) -> Result<(), EditError> {
        loop {
            if count == 0 || cursor.is_origin() || self.is_blank() {
                return Ok(());
            }
            let row = cursor.row;
            let taken = cursor.column.min(count);
            self.line_mut(row)?.remove_str(taken, cursor)?;
            count -= taken;

            if count == 0 || self.is_blank() || row == 0 {
                return Ok(());
            }

            let previous_len = self.line_len(row - 1);
            self.append_line_content(row - 1, row)?;
            self.remove_line(row)?;
            count -= 1;
            cursor.set(row - 1, previous_len);
        }
    }

    pub fn has_matching_chars(&self, cursor: Location) -> bool {
        if cursor.column == 0 {
            return false;
        }
        let Some(line) = self.lines.get(cursor.row) else {
            return false;
        };
        match (line.char_at(cursor.column - 1), line.char_at(cursor.column)) {
            (Some(before), Some(after)) => complement(before) == Some(after),
            _ => false,
        }
    }

    pub fn remove_matching_chars(&mut self, cursor: &mut Location) -> Result<(), EditError> {
        cursor.column += 1;
        self.remove_str(2, cursor)
    }

    pub fn remove_char(&mut self, cursor: &mut Location) -> Result<(), EditError> {
        let tab = self.tab_width;
        if cursor.column < tab && self.has_matching_chars(*cursor) {
            return self.remove_matching_chars(cursor);
        }
        if cursor.column >= tab && self.spaces_before(*cursor, tab) {
            return self.remove_str(tab, cursor);
        }
        if self.has_matching_chars(*cursor) {
            return self.remove_matching_chars(cursor);
        }
        self.remove_str(1, cursor)
    }

    fn spaces_before(&self, cursor: Location, count: usize) -> bool {
        let Some(line) = self.lines.get(cursor.row) else {
            return false;
        };
        line.content()
            .chars()
            .skip(cursor.column - count)
            .take(count)
            .filter(|c| *c == ' ')
            .count()
            == count
    }

    pub fn search(&self, pattern: &str) -> Vec<Location> {
        self.lines
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.search(0, pattern)
                    .into_iter()
                    .map(move |column| Location::new(row, column))
            })
            .collect()
    }

    pub fn find_and_replace(&mut self, new: &str, old: &str, location: &mut Location) {
        if let Some(line) = self.lines.get_mut(location.row) {
            let column = location.column;
            line.replace_at(column, old, new, location);
        }
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line.content());
            text.push('\n');
        }
        text
    }
}
