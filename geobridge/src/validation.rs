//! Comparison of the main geometry with the union of the position geometries.

use std::fmt::{Display, Formatter};

use geobridge_types::Geom;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeoBridgeError;
use crate::union::union;

/// Default relative area tolerance (5%).
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 0.05;

/// Message of a successful comparison.
pub const SUCCESS_MESSAGE: &str = "Validation succeeded: area and positions match the main file.";

/// Threshold used to compare the bounding rectangles of the geometries.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundsTolerance {
    /// Use the absolute area tolerance (`main area * tolerance percent`) as the maximum edge distance.
    ///
    /// Note that this compares a coordinate distance with an area quantity, so the allowed distance grows
    /// quadratically with the size of the geometry.
    #[default]
    AreaDerived,
    /// Maximum distance between the corresponding edges of the bounding rectangles in coordinate units.
    Absolute(f64),
}

/// Parameters of [`validate`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidationConfig {
    tolerance_percent: f64,
    bounds_tolerance: BoundsTolerance,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            bounds_tolerance: BoundsTolerance::default(),
        }
    }
}

impl ValidationConfig {
    /// Allowed difference between the areas as a fraction of the main geometry area.
    ///
    /// For example, the value of `0.05` means that the areas may differ by 5% of the main area.
    pub fn tolerance_percent(&self) -> f64 {
        self.tolerance_percent
    }

    /// Sets the allowed area difference as a fraction of the main geometry area.
    pub fn with_tolerance_percent(mut self, tolerance_percent: f64) -> Self {
        self.tolerance_percent = tolerance_percent;
        self
    }

    /// Sets the allowed area difference as a fraction of the main geometry area.
    pub fn set_tolerance_percent(&mut self, tolerance_percent: f64) {
        self.tolerance_percent = tolerance_percent;
    }

    /// Threshold for the bounding rectangles comparison.
    pub fn bounds_tolerance(&self) -> BoundsTolerance {
        self.bounds_tolerance
    }

    /// Sets threshold for the bounding rectangles comparison.
    pub fn with_bounds_tolerance(mut self, bounds_tolerance: BoundsTolerance) -> Self {
        self.bounds_tolerance = bounds_tolerance;
        self
    }

    /// Sets threshold for the bounding rectangles comparison.
    pub fn set_bounds_tolerance(&mut self, bounds_tolerance: BoundsTolerance) {
        self.bounds_tolerance = bounds_tolerance;
    }
}

/// Result of [`validate`].
///
/// The `Display` implementation renders the message reported to the user: [`SUCCESS_MESSAGE`] or the list of
/// failures separated by `" | "`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AreaComparison {
    /// Area of the main geometry.
    pub main_area: f64,
    /// Area of the union of the position geometries.
    pub positions_area: f64,
    /// Whether the areas differ by no more than `area_tolerance`.
    pub area_matches: bool,
    /// Whether all edges of the bounding rectangles differ by no more than `bounds_tolerance`.
    pub bounds_match: bool,
    /// Relative tolerance the comparison was done with.
    pub tolerance_used: f64,
    /// Absolute area tolerance.
    pub area_tolerance: f64,
    /// Absolute edge distance tolerance.
    pub bounds_tolerance: f64,
}

impl AreaComparison {
    /// Returns true if both areas and bounds match.
    pub fn is_success(&self) -> bool {
        self.area_matches && self.bounds_match
    }

    /// List of failure descriptions. Empty for a successful comparison.
    pub fn failures(&self) -> Vec<String> {
        let mut failures = vec![];
        if !self.area_matches {
            failures.push(format!(
                "Area mismatch: main area={}, positions area={}",
                self.main_area, self.positions_area
            ));
        }

        if !self.bounds_match {
            failures.push("Positions bounds do not match the main file".to_string());
        }

        failures
    }
}

impl Display for AreaComparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_success() {
            write!(f, "{SUCCESS_MESSAGE}")
        } else {
            write!(f, "{}", self.failures().join(" | "))
        }
    }
}

/// Compares the main geometry with the union of the position geometries.
///
/// Fails with [`GeoBridgeError::NoPositionData`] if the list of positions is empty.
pub fn validate(
    main: &Geom,
    positions: Vec<Geom>,
    config: &ValidationConfig,
) -> Result<AreaComparison, GeoBridgeError> {
    if positions.is_empty() {
        return Err(GeoBridgeError::NoPositionData);
    }

    let candidate = union(positions)?;

    let main_area = main.area();
    let positions_area = candidate.area();
    let area_tolerance = main_area * config.tolerance_percent();
    let area_matches = (main_area - positions_area).abs() <= area_tolerance;

    let bounds_tolerance = match config.bounds_tolerance() {
        BoundsTolerance::AreaDerived => area_tolerance,
        BoundsTolerance::Absolute(distance) => distance,
    };
    let bounds_match = match (main.bounding_rect(), candidate.bounding_rect()) {
        (Some(main_bounds), Some(positions_bounds)) => {
            main_bounds.max_edge_distance(&positions_bounds) <= bounds_tolerance
        }
        _ => false,
    };

    let result = AreaComparison {
        main_area,
        positions_area,
        area_matches,
        bounds_match,
        tolerance_used: config.tolerance_percent(),
        area_tolerance,
        bounds_tolerance,
    };

    log::debug!("Area comparison result: {result}");
    Ok(result)
}
