use serde::{Deserialize, Serialize};

// Bounds for the grid and cell-size controls. The UI never offers values
// outside these ranges, and the model clamps anything it is handed.
pub const DEFAULT_GRID_WIDTH: i32 = 10;
pub const DEFAULT_GRID_HEIGHT: i32 = 10;
pub const MIN_GRID_SIZE: i32 = 5;
pub const MAX_GRID_SIZE: i32 = 50;
pub const DEFAULT_CELL_SIZE: i32 = 40;
pub const MIN_CELL_SIZE: i32 = 20;
pub const MAX_CELL_SIZE: i32 = 100;

/// A zero-based grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What occupies a cell. `Empty` is the eraser: painting it removes the
/// cell record, and it is never stored in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Empty,
    Seat,
    Object,
    Wall,
    Pillar,
    Entrance,
}

impl CellType {
    /// Palette order shown in the tools panel.
    pub const PALETTE: [CellType; 6] = [
        CellType::Seat,
        CellType::Object,
        CellType::Wall,
        CellType::Pillar,
        CellType::Entrance,
        CellType::Empty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CellType::Empty => "Erase",
            CellType::Seat => "Seat",
            CellType::Object => "Object",
            CellType::Wall => "Wall",
            CellType::Pillar => "Pillar",
            CellType::Entrance => "Entrance",
        }
    }
}

/// A typed, named unit occupying one grid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub kind: CellType,
    pub name: String,
}

impl Cell {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    /// Builds a size with each dimension clamped to the configured bounds
    /// independently.
    pub fn clamped(width: i32, height: i32) -> Self {
        Self {
            width: width.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            height: height.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// The full grid definition: dimensions, rendered cell size in pixels, and
/// the sparse cell list. Invariant: at most one cell per position, and
/// every cell lies within `grid_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub grid_size: GridSize,
    pub cell_size: i32,
    pub cells: Vec<Cell>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            cell_size: DEFAULT_CELL_SIZE,
            cells: Vec::new(),
        }
    }
}

impl Layout {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            grid_size: GridSize::clamped(width, height),
            cell_size: cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE),
            cells: Vec::new(),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.grid_size.contains(pos)
    }

    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.position() == pos)
    }

    pub fn cell_at_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|cell| cell.position() == pos)
    }

    /// The name a freshly painted cell receives. Seats are labeled by grid
    /// coordinate ("A1" = top-left), everything else gets a per-type
    /// counter. Any cell already at `pos` is about to be replaced, so it is
    /// excluded from the count.
    pub fn default_name(&self, pos: Position, kind: CellType) -> String {
        match kind {
            CellType::Empty => String::new(),
            CellType::Seat => format!("{}{}", row_label(pos.y), pos.x + 1),
            other => {
                let existing = self
                    .cells
                    .iter()
                    .filter(|cell| cell.kind == other && cell.position() != pos)
                    .count();
                format!("{} {}", other.label(), existing + 1)
            }
        }
    }

    /// Inserts or replaces the cell at `pos`, with a freshly generated
    /// default name. Painting `Empty` removes the cell instead. A replaced
    /// cell loses any custom name, even when the type is unchanged.
    pub fn place_cell(&mut self, pos: Position, kind: CellType) {
        let name = self.default_name(pos, kind);
        self.cells.retain(|cell| cell.position() != pos);
        if kind != CellType::Empty {
            self.cells.push(Cell {
                x: pos.x,
                y: pos.y,
                kind,
                name,
            });
        }
    }

    /// Drops every cell outside the current grid bounds.
    pub fn prune_outside(&mut self) {
        let bounds = self.grid_size;
        self.cells.retain(|cell| bounds.contains(cell.position()));
    }
}

/// Spreadsheet-style row letters: 0 -> "A", 25 -> "Z", 26 -> "AA".
fn row_label(row: i32) -> String {
    let mut row = row.max(0);
    let mut label = String::new();
    loop {
        label.insert(0, (b'A' + (row % 26) as u8) as char);
        row = row / 26 - 1;
        if row < 0 {
            break;
        }
    }
    label
}
