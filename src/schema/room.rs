//! Room grid: the environment a robot cleans.

use serde::{Deserialize, Serialize};

/// A `width` x `height` grid of non-negative rewards, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomRepr")]
pub struct Room {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

#[derive(Deserialize)]
struct RoomRepr {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl TryFrom<RoomRepr> for Room {
    type Error = RoomError;

    fn try_from(repr: RoomRepr) -> Result<Self, Self::Error> {
        Room::from_cells(repr.width, repr.height, repr.cells)
    }
}

impl Room {
    /// All-zero room.
    pub fn zeroed(width: usize, height: usize) -> Result<Self, RoomError> {
        Self::from_cells(width, height, vec![0.0; width * height])
    }

    /// Build a room from row-major cell values.
    pub fn from_cells(width: usize, height: usize, cells: Vec<f64>) -> Result<Self, RoomError> {
        if width == 0 || height == 0 {
            return Err(RoomError::InvalidDimensions);
        }
        if cells.len() != width * height {
            return Err(RoomError::CellCount {
                expected: width * height,
                actual: cells.len(),
            });
        }
        if let Some(index) = cells.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(RoomError::InvalidCell {
                x: index % width,
                y: index / width,
                value: cells[index],
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a room from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, RoomError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(y) = rows.iter().position(|row| row.len() != width) {
            return Err(RoomError::RaggedRow {
                row: y,
                expected: width,
                actual: rows[y].len(),
            });
        }
        Self::from_cells(width, height, rows.into_iter().flatten().collect())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Starting cell of every robot: `(width / 2, height / 2)`.
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[y * self.width + x]
    }

    /// Collect the reward at `(x, y)`, leaving the cell at zero.
    #[inline]
    pub fn take(&mut self, x: usize, y: usize) -> f64 {
        std::mem::take(&mut self.cells[y * self.width + x])
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks_exact(self.width)
    }

    /// Sum of all rewards: the most any robot can collect from this room.
    pub fn total_value(&self) -> f64 {
        self.cells.iter().sum()
    }
}

/// Room construction errors.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("Room dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Cell ({x}, {y}) has invalid value {value}")]
    InvalidCell { x: usize, y: usize, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_size() {
        assert!(matches!(
            Room::zeroed(0, 4),
            Err(RoomError::InvalidDimensions)
        ));
        assert!(matches!(
            Room::zeroed(4, 0),
            Err(RoomError::InvalidDimensions)
        ));
        assert!(matches!(
            Room::from_rows(vec![]),
            Err(RoomError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_rejects_bad_cells() {
        assert!(matches!(
            Room::from_rows(vec![vec![0.1, 0.2], vec![0.3]]),
            Err(RoomError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            Room::from_cells(2, 1, vec![0.5, -1.0]),
            Err(RoomError::InvalidCell { x: 1, y: 0, .. })
        ));
        assert!(matches!(
            Room::from_cells(2, 2, vec![0.5]),
            Err(RoomError::CellCount { expected: 4, actual: 1 })
        ));
    }

    #[test]
    fn test_layout() {
        let room = Room::from_rows(vec![vec![0.0, 0.1, 0.2], vec![1.0, 1.1, 1.2]]).unwrap();
        assert_eq!(room.width(), 3);
        assert_eq!(room.height(), 2);
        assert_eq!(room.center(), (1, 1));
        assert_eq!(room.get(2, 1), 1.2);
        assert_eq!(room.rows().count(), 2);
        assert!((room.total_value() - 3.6).abs() < 1e-12);
    }

    #[test]
    fn test_take_zeroes_cell() {
        let mut room = Room::from_rows(vec![vec![0.5, 0.25]]).unwrap();
        assert_eq!(room.take(0, 0), 0.5);
        assert_eq!(room.take(0, 0), 0.0);
        assert_eq!(room.get(1, 0), 0.25);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Room = serde_json::from_str(r#"{"width":2,"height":1,"cells":[0.1,0.2]}"#).unwrap();
        assert_eq!(ok.width(), 2);

        let bad = serde_json::from_str::<Room>(r#"{"width":0,"height":1,"cells":[]}"#);
        assert!(bad.is_err());
    }
}
