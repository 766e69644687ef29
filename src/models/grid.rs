//! Gridded pollutant field model

use super::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cell of a pollutant grid
///
/// Both values are optional: a cell may carry a satellite column, a derived
/// surface value, both, or neither (missing data).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GridCell {
    /// Latitude of the cell center
    pub latitude: f64,
    /// Longitude of the cell center
    pub longitude: f64,
    /// Vertical column density in molecules/cm²
    pub column_density: Option<f64>,
    /// Derived near-surface value
    pub surface_value: Option<f64>,
}

/// Which optional cell value an operation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridField {
    ColumnDensity,
    SurfaceValue,
}

impl GridCell {
    /// Cell with only a column density
    #[must_use]
    pub fn with_column(latitude: f64, longitude: f64, column_density: f64) -> Self {
        Self {
            latitude,
            longitude,
            column_density: Some(column_density),
            surface_value: None,
        }
    }

    /// Center of the cell
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Value of the requested field, if present
    #[must_use]
    pub fn value(&self, field: GridField) -> Option<f64> {
        match field {
            GridField::ColumnDensity => self.column_density,
            GridField::SurfaceValue => self.surface_value,
        }
    }
}

/// Geographic bounding box in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct GridBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GridBounds {
    /// Smallest box enclosing every cell, `None` for an empty slice
    #[must_use]
    pub fn enclosing(cells: &[GridCell]) -> Option<Self> {
        let first = cells.first()?;
        let start = Self {
            north: first.latitude,
            south: first.latitude,
            east: first.longitude,
            west: first.longitude,
        };
        Some(cells.iter().fold(start, |b, c| Self {
            north: b.north.max(c.latitude),
            south: b.south.min(c.latitude),
            east: b.east.max(c.longitude),
            west: b.west.min(c.longitude),
        }))
    }

    /// Whether the point lies inside the box (edges included)
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude <= self.north
            && latitude >= self.south
            && longitude <= self.east
            && longitude >= self.west
    }
}

/// Snapshot of a pollutant field over a bounded region at one instant
///
/// Advection moves the cells but leaves `bounds` untouched; call
/// [`AdvectionGrid::recompute_bounds`] when fresh bounds are needed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AdvectionGrid {
    pub cells: Vec<GridCell>,
    pub bounds: GridBounds,
    /// Cell spacing in degrees
    pub resolution: f64,
    pub timestamp: DateTime<Utc>,
}

impl AdvectionGrid {
    /// Build a grid whose bounds enclose the given cells
    #[must_use]
    pub fn from_cells(cells: Vec<GridCell>, resolution: f64, timestamp: DateTime<Utc>) -> Self {
        let bounds = GridBounds::enclosing(&cells).unwrap_or_default();
        Self {
            cells,
            bounds,
            resolution,
            timestamp,
        }
    }

    /// Refresh `bounds` from the current cell positions
    pub fn recompute_bounds(&mut self) {
        if let Some(bounds) = GridBounds::enclosing(&self.cells) {
            self.bounds = bounds;
        }
    }

    /// Whether every cell lies inside `bounds`
    #[must_use]
    pub fn cells_within_bounds(&self) -> bool {
        self.cells
            .iter()
            .all(|c| self.bounds.contains(c.latitude, c.longitude))
    }

    /// Number of cells carrying a value for `field`
    #[must_use]
    pub fn valued_cell_count(&self, field: GridField) -> usize {
        self.cells.iter().filter(|c| c.value(field).is_some()).count()
    }
}
