//! Absolute coordinates and the named reference frame they are measured in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ResolvedOffset;

/// Shared behaviour of the 2D and 3D coordinate records.
///
/// The pipeline is generic over this trait so that the 2D and 3D variants of
/// extraction, position calculation and trajectory building share one code path.
pub trait Coordinate: Copy + std::fmt::Debug + PartialEq + Serialize {
    /// Field labels read from a reference declaration, in declaration order.
    const LABELS: &'static [char];

    /// Build a coordinate from values listed in [`Coordinate::LABELS`] order.
    fn from_components(values: &[f64]) -> Option<Self>;

    /// Translate this coordinate by the matching components of an offset.
    fn displaced_by(self, offset: &ResolvedOffset) -> Self;
}

/// A point in the XY plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Coordinate for Point2D {
    const LABELS: &'static [char] = &['X', 'Y'];

    fn from_components(values: &[f64]) -> Option<Self> {
        match *values {
            [x, y] => Some(Self { x, y }),
            _ => None,
        }
    }

    fn displaced_by(self, offset: &ResolvedOffset) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

/// A point in robot base space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Coordinate for Point3D {
    const LABELS: &'static [char] = &['X', 'Y', 'Z'];

    fn from_components(values: &[f64]) -> Option<Self> {
        match *values {
            [x, y, z] => Some(Self { x, y, z }),
            _ => None,
        }
    }

    fn displaced_by(self, offset: &ResolvedOffset) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.z,
        }
    }
}

/// Named reference positions keyed by identifier (e.g. `Xdose_A_1`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReferenceFrame<P> {
    positions: BTreeMap<String, P>,
}

impl<P> ReferenceFrame<P> {
    /// Look up a reference position by its exact name.
    pub fn get(&self, name: &str) -> Option<&P> {
        self.positions.get(name)
    }

    /// Number of reference positions in the frame.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(name, position)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &P)> {
        self.positions.iter().map(|(name, p)| (name.as_str(), p))
    }
}

impl<P> FromIterator<(String, P)> for ReferenceFrame<P> {
    fn from_iter<I: IntoIterator<Item = (String, P)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Group;

    fn offset(x: f64, y: f64, z: f64) -> ResolvedOffset {
        ResolvedOffset {
            name: "dose_A_offset_010".to_string(),
            x,
            y,
            z,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            reference_name: "Xdose_A_1".to_string(),
            group: Group::A,
        }
    }

    #[test]
    fn test_point2d_from_components_requires_two_values() {
        assert_eq!(
            Point2D::from_components(&[1.0, 2.0]),
            Some(Point2D::new(1.0, 2.0))
        );
        assert_eq!(Point2D::from_components(&[1.0]), None);
        assert_eq!(Point2D::from_components(&[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_point2d_displacement_ignores_z() {
        let p = Point2D::new(17.0, 3.0).displaced_by(&offset(-2.0, -2.0, 45.0));
        assert_eq!(p, Point2D::new(15.0, 1.0));
    }

    #[test]
    fn test_point3d_displacement_adds_all_axes() {
        let p = Point3D::new(10.0, 20.0, 0.5).displaced_by(&offset(2.0, 3.0, 45.0));
        assert_eq!(p, Point3D::new(12.0, 23.0, 45.5));
    }

    #[test]
    fn test_reference_frame_lookup_is_exact() {
        let frame: ReferenceFrame<Point2D> = [
            ("Xdose_A_1".to_string(), Point2D::new(17.0, 3.0)),
            ("Xdose_B_1".to_string(), Point2D::new(40.0, 3.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.get("Xdose_A_1"), Some(&Point2D::new(17.0, 3.0)));
        assert_eq!(frame.get("xdose_a_1"), None);
        let names: Vec<_> = frame.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Xdose_A_1", "Xdose_B_1"]);
    }
}
