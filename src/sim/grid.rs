use glam::DVec3;

/// Grid coordinates of a cell, fixed for the grid's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub x: usize,
    pub z: usize,
}

impl CellIndex {
    pub fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }
}

/// Visual emphasis state driven by the interaction controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Idle,
    Highlighted,
}

/// One animated grid element. Identity is immutable; position and scale
/// are rewritten every frame by the waveform field.
#[derive(Clone, Debug)]
pub struct Cell {
    pub index: CellIndex,
    pub position: DVec3,
    pub scale: f64,
    pub highlight: Highlight,
}

/// Square grid of cells, row-major in z. The side length never changes
/// after construction.
pub struct Grid {
    side: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of `side` x `side` cells centered on the origin.
    /// Cell (x, z) sits at world offset (x - side/2, 0, z - side/2),
    /// integer division, matching the reference layout.
    pub fn new(side: usize) -> Self {
        assert!(side > 0, "grid side must be positive");
        let half = (side / 2) as i64;
        let mut cells = Vec::with_capacity(side * side);

        for z in 0..side {
            for x in 0..side {
                cells.push(Cell {
                    index: CellIndex::new(x, z),
                    position: DVec3::new(
                        x as i64 as f64 - half as f64,
                        0.0,
                        z as i64 as f64 - half as f64,
                    ),
                    scale: 1.0,
                    highlight: Highlight::Idle,
                });
            }
        }

        Self { side, cells }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.flat(index).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        self.flat(index).map(move |i| &mut self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    fn flat(&self, index: CellIndex) -> Option<usize> {
        (index.x < self.side && index.z < self.side).then(|| index.z * self.side + index.x)
    }
}
