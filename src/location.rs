#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

impl Location {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn set(&mut self, row: usize, column: usize) {
        self.row = row;
        self.column = column;
    }

    pub fn is_origin(&self) -> bool {
        self.row == 0 && self.column == 0
    }
}

pub fn sort_locations(a: Location, b: Location) -> (Location, Location) {
    if a <= b { (a, b) } else { (b, a) }
}
