//! Saving and restoring the grid as a JSON document.
//!
//! The document is a nested array of 0/1 integers indexed `[x][y]`: the outer
//! array holds one column per x coordinate, each column holding `height`
//! values.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::{CellState, Grid, GridError};

/// On-disk shape of a saved grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct Snapshot {
    columns: Vec<Vec<u8>>,
}

impl From<&Grid> for Snapshot {
    fn from(grid: &Grid) -> Self {
        let mut columns = vec![vec![0u8; grid.height()]; grid.width()];
        for (x, y, cell) in grid.iter_cells() {
            columns[x][y] = u8::from(cell.is_alive());
        }
        Self { columns }
    }
}

impl Snapshot {
    fn into_grid(self) -> Result<Grid, ParseError> {
        let width = self.columns.len();
        let height = self.columns.first().map_or(0, Vec::len);

        let mut grid = Grid::new(width, height).map_err(|_| ParseError::Empty)?;
        for (x, column) in self.columns.into_iter().enumerate() {
            if column.len() != height {
                return Err(ParseError::Ragged {
                    column: x,
                    expected: height,
                    found: column.len(),
                });
            }
            for (y, value) in column.into_iter().enumerate() {
                let state = match value {
                    0 => CellState::Dead,
                    1 => CellState::Alive,
                    other => return Err(ParseError::NonBinary { x, y, value: other }),
                };
                grid.set(x, y, state)?;
            }
        }
        Ok(grid)
    }
}

/// Reasons a document cannot be turned into a grid.
#[derive(Debug)]
pub enum ParseError {
    /// Not valid JSON, or not a nested array of small integers.
    Json(serde_json::Error),
    /// The document holds no cells.
    Empty,
    /// A column differs in length from the first column.
    Ragged {
        column: usize,
        expected: usize,
        found: usize,
    },
    /// A cell value other than 0 or 1.
    NonBinary { x: usize, y: usize, value: u8 },
    /// The grid is well formed but not the size the caller requires.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Internal grid construction failed.
    Grid(GridError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed document: {e}"),
            Self::Empty => write!(f, "document contains no cells"),
            Self::Ragged { column, expected, found } => {
                write!(f, "column {column} has {found} cells, expected {expected}")
            }
            Self::NonBinary { x, y, value } => {
                write!(f, "cell ({x}, {y}) has value {value}, expected 0 or 1")
            }
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "saved grid is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ParseError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Errors from [`save`] and [`load`].
#[derive(Debug)]
pub enum PersistError {
    /// The file could not be created, written, or read.
    Io(io::Error),
    /// The file was read but its contents are not a valid grid.
    Parse(ParseError),
}

impl PersistError {
    /// True when the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseError> for PersistError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// Write the grid to `path`, replacing any existing file.
///
/// The write is not atomic: a crash part-way through leaves a truncated file,
/// which a later [`load`] reports as a parse error.
pub fn save(grid: &Grid, path: &Path) -> Result<(), PersistError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &Snapshot::from(grid)).map_err(io::Error::from)?;
    writer.flush()?;
    Ok(())
}

/// Read a grid of whatever size the document describes.
pub fn load(path: &Path) -> Result<Grid, PersistError> {
    let text = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&text).map_err(ParseError::Json)?;
    Ok(snapshot.into_grid()?)
}

/// Read a grid and require it to be `width x height`.
pub fn load_expecting(path: &Path, width: usize, height: usize) -> Result<Grid, PersistError> {
    let grid = load(path)?;
    if (grid.width(), grid.height()) != (width, height) {
        return Err(ParseError::DimensionMismatch {
            expected: (width, height),
            found: (grid.width(), grid.height()),
        }
        .into());
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn round_trip_preserves_every_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save_state.json");
        let mut rng = SmallRng::seed_from_u64(3);
        let grid = Grid::random(40, 30, 0.2, &mut rng).unwrap();

        save(&grid, &path).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored, grid);
    }

    #[test]
    fn document_is_indexed_x_then_y() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let grid = Grid::from_live_cells(3, 2, &[(2, 0)]).unwrap();

        save(&grid, &path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(v, serde_json::json!([[0, 0], [0, 0], [1, 0]]));
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "a much longer pre-existing file body that must vanish").unwrap();

        let grid = Grid::from_live_cells(2, 2, &[(0, 1)]).unwrap();
        save(&grid, &path).unwrap();

        assert_eq!(load(&path).unwrap(), grid);
    }

    #[test]
    fn missing_file_is_io_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn save_into_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("grid.json");
        let grid = Grid::new(2, 2).unwrap();
        assert!(matches!(save(&grid, &path), Err(PersistError::Io(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "[[0, 1], [1").unwrap();
        assert!(matches!(load(&path), Err(PersistError::Parse(ParseError::Json(_)))));
    }

    #[test]
    fn non_binary_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "[[0, 1], [2, 0]]").unwrap();
        assert!(matches!(
            load(&path),
            Err(PersistError::Parse(ParseError::NonBinary { x: 1, y: 0, value: 2 }))
        ));
    }

    #[test]
    fn negative_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "[[0, -1]]").unwrap();
        assert!(matches!(load(&path), Err(PersistError::Parse(ParseError::Json(_)))));
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "[[0, 1, 0], [1, 0]]").unwrap();
        assert!(matches!(
            load(&path),
            Err(PersistError::Parse(ParseError::Ragged { column: 1, expected: 3, found: 2 }))
        ));
    }

    #[test]
    fn empty_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "[]").unwrap();
        assert!(matches!(load(&path), Err(PersistError::Parse(ParseError::Empty))));
    }

    #[test]
    fn load_expecting_checks_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        save(&Grid::new(4, 3).unwrap(), &path).unwrap();

        assert!(load_expecting(&path, 4, 3).is_ok());
        let err = load_expecting(&path, 40, 30).unwrap_err();
        assert!(matches!(
            err,
            PersistError::Parse(ParseError::DimensionMismatch { expected: (40, 30), found: (4, 3) })
        ));
    }
}
