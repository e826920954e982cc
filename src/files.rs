use std::fs;
use std::path::Path;

use tracing::info;

use crate::buffer::Buffer;
use crate::error::{EditError, FileError};
use crate::location::Location;

pub fn read_text(path: &Path) -> Result<String, FileError> {
    if path.is_dir() {
        return Err(FileError::TargetIsDirectory(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(FileError::io(path))?;
    info!(path = %path.display(), bytes = bytes.len(), "loaded file");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn replay(text: &str, buffer: &mut Buffer, cursor: &mut Location) -> Result<(), EditError> {
    for c in text.chars() {
        match c {
            '\n' => buffer.insert_new_line(cursor)?,
            '\t' => buffer.insert_tab(cursor)?,
            _ => buffer.insert_char_literal(c, cursor)?,
        }
    }
    Ok(())
}

pub fn save(buffer: &Buffer, path: &Path) -> Result<(), FileError> {
    if path.is_dir() {
        return Err(FileError::TargetIsDirectory(path.to_path_buf()));
    }
    let text = buffer.to_text();
    fs::write(path, &text).map_err(FileError::io(path))?;
    info!(path = %path.display(), lines = buffer.line_count(), "saved file");
    Ok(())
}
