use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub origin: Location,
    top_margin: usize,
    bottom_margin: usize,
}

impl Viewport {
    pub fn new(top_margin: usize, bottom_margin: usize) -> Self {
        Self {
            origin: Location::default(),
            top_margin,
            bottom_margin,
        }
    }

    pub fn follow(&mut self, cursor: Location, height: usize) {
        while self.origin.row > 0
            && cursor.row < self.origin.row.saturating_add(self.top_margin)
        {
            self.origin.row -= 1;
        }

        let reach = height.saturating_sub(self.bottom_margin.saturating_add(1));
        while cursor.row > self.origin.row + reach {
            self.origin.row += 1;
        }
    }

    pub fn relative_cursor(&self, cursor: Location) -> Location {
        Location::new(
            cursor.row.saturating_sub(self.origin.row),
            cursor.column.saturating_sub(self.origin.column),
        )
    }

    pub fn lines_to_render(&self, total_lines: usize, height: usize) -> usize {
        height.min(total_lines.saturating_sub(self.origin.row))
    }
}
