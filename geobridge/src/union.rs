//! Merging of several geometries into one.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

use geo::{BooleanOps, MultiPolygon};
use geobridge_types::Geom;

use crate::error::GeoBridgeError;

/// Builds a single geometry from the list, dissolving the overlaps between polygons.
///
/// A list of one geometry yields this geometry, longer lists are wrapped into a collection. If all the geometries
/// (including members of nested collections) are polygons, they are merged into one outline, which is a polygon or
/// a collection of polygons if the result is disjoint.
///
/// Mixed lists (e.g. points together with polygons) cannot be merged, so the unmerged collection is returned. The
/// same happens if the overlay engine fails on the given input. These cases are logged, but never fail.
///
/// Fails with [`GeoBridgeError::EmptyGeometry`] if the list is empty.
pub fn union(geometries: Vec<Geom>) -> Result<Geom, GeoBridgeError> {
    if geometries.is_empty() {
        return Err(GeoBridgeError::EmptyGeometry);
    }

    let aggregate = Geom::from_parts(geometries);
    match aggregate {
        Geom::Polygon(_) => Ok(aggregate),
        _ if !aggregate.is_polygonal() => {
            log::debug!(
                "Geometry of type {} contains non-polygonal members, skipping union",
                aggregate.kind()
            );
            Ok(aggregate)
        }
        _ => Ok(dissolve(&aggregate).unwrap_or(aggregate)),
    }
}

fn dissolve(aggregate: &Geom) -> Option<Geom> {
    let polygons: VecDeque<MultiPolygon<f64>> = aggregate
        .iter_leaves()
        .filter_map(|g| match g {
            Geom::Polygon(polygon) => Some(MultiPolygon::new(vec![polygon.into()])),
            _ => None,
        })
        .collect();

    let merged = match panic::catch_unwind(AssertUnwindSafe(|| pairwise_union(polygons))) {
        Ok(Some(merged)) if !merged.0.is_empty() => merged,
        Ok(_) => {
            log::warn!("Union produced an empty geometry, returning unmerged collection");
            return None;
        }
        Err(_) => {
            log::warn!("Overlay engine failed to merge polygons, returning unmerged collection");
            return None;
        }
    };

    match Geom::try_from(merged) {
        Ok(geom) => Some(geom),
        Err(e) => {
            log::warn!("Failed to convert union result: {e}, returning unmerged collection");
            None
        }
    }
}

fn pairwise_union(mut queue: VecDeque<MultiPolygon<f64>>) -> Option<MultiPolygon<f64>> {
    while queue.len() > 1 {
        let mut next = VecDeque::with_capacity((queue.len() + 1) / 2);
        while let Some(a) = queue.pop_front() {
            match queue.pop_front() {
                Some(b) => next.push_back(a.union(&b)),
                None => next.push_back(a),
            }
        }
        queue = next;
    }

    queue.pop_front()
}
