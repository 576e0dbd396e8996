//! Infinite lines, reference streets and polar helpers.

use crate::{Address, AddressSpace, Distance};
use euclid::{Point2D, Vector2D};

/// Below this value the sine of the angle between two lines is treated as zero.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Returns the unit vector pointing at `degrees`, measured from the x axis.
///
/// In view space (y down) positive angles sweep clockwise.
#[inline]
pub fn unit_vector<U>(degrees: f64) -> Vector2D<f64, U> {
    let (sin, cos) = crate::normalize_degrees(degrees).to_radians().sin_cos();
    Vector2D::new(cos, sin)
}

/// The point at `radius` from `center` in the direction of `degrees`.
#[inline]
pub fn polar<U>(center: Point2D<f64, U>, radius: f64, degrees: f64) -> Point2D<f64, U> {
    let direction: Vector2D<f64, U> = unit_vector(degrees);
    center + direction * radius
}

/// An infinite line defined by a point and a vector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Line<U> {
    pub point: Point2D<f64, U>,
    pub vector: Vector2D<f64, U>,
}

impl<U> Line<U> {
    /// Returns `None` if the lines are parallel or very close to parallel.
    pub fn intersection(&self, other: &Self) -> Option<Point2D<f64, U>> {
        let det = self.vector.cross(other.vector);
        let lengths = self.vector.length() * other.vector.length();
        if lengths == 0.0 || f64::abs(det / lengths) <= PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let self_p2 = self.point + self.vector;
        let other_p2 = other.point + other.vector;
        let a = self.point.to_vector().cross(self_p2.to_vector());
        let b = other.point.to_vector().cross(other_p2.to_vector());

        Some(Point2D::new(
            (b * self.vector.x - a * other.vector.x) * inv_det,
            (b * self.vector.y - a * other.vector.y) * inv_det,
        ))
    }

    pub fn signed_distance_to_point(&self, p: &Point2D<f64, U>) -> f64 {
        let v = *p - self.point;
        self.vector.cross(v) / self.vector.length()
    }

    pub fn distance_to_point(&self, p: &Point2D<f64, U>) -> f64 {
        f64::abs(self.signed_distance_to_point(p))
    }
}

/// A street used as the target of a station placement.
///
/// Exactly one of the two coordinates is fixed, the other one is free.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ReferenceLine {
    /// A north-south street at a fixed east offset.
    East(f64),
    /// An east-west street at a fixed north offset.
    North(f64),
}

impl ReferenceLine {
    pub fn to_line(&self) -> Line<AddressSpace> {
        match *self {
            ReferenceLine::East(x) => Line {
                point: Address::new(x, 0.0),
                vector: Distance::new(0.0, 1.0),
            },
            ReferenceLine::North(y) => Line {
                point: Address::new(0.0, y),
                vector: Distance::new(1.0, 0.0),
            },
        }
    }

    /// Where `line` crosses this street.
    ///
    /// The fixed coordinate of the result is exactly the street's coordinate. Returns `None`
    /// if `line` runs along the street (or nearly so).
    pub fn intersect(&self, line: &Line<AddressSpace>) -> Option<Address> {
        let p = line.intersection(&self.to_line())?;
        let p = match *self {
            ReferenceLine::East(x) => Address::new(x, p.y),
            ReferenceLine::North(y) => Address::new(p.x, y),
        };

        if p.x.is_finite() && p.y.is_finite() {
            Some(p)
        } else {
            None
        }
    }
}

/// A half-specified street coordinate as provided by callers.
///
/// Only values with exactly one coordinate set describe a street, see
/// [`Street::reference_line`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Street {
    pub east: Option<f64>,
    pub north: Option<f64>,
}

impl Street {
    pub fn new(east: Option<f64>, north: Option<f64>) -> Self {
        Street { east, north }
    }

    /// A north-south street, for example Halsted at 800 W is `Street::east(-800.0)`.
    pub fn east(x: f64) -> Self {
        Street {
            east: Some(x),
            north: None,
        }
    }

    /// An east-west street, for example Roosevelt at 1200 S is `Street::north(-1200.0)`.
    pub fn north(y: f64) -> Self {
        Street {
            east: None,
            north: Some(y),
        }
    }

    /// Returns `None` unless exactly one finite coordinate is set.
    pub fn reference_line(&self) -> Option<ReferenceLine> {
        match (self.east, self.north) {
            (Some(x), None) if x.is_finite() => Some(ReferenceLine::East(x)),
            (None, Some(y)) if y.is_finite() => Some(ReferenceLine::North(y)),
            _ => None,
        }
    }
}

impl From<ReferenceLine> for Street {
    fn from(line: ReferenceLine) -> Self {
        match line {
            ReferenceLine::East(x) => Street::east(x),
            ReferenceLine::North(y) => Street::north(y),
        }
    }
}

#[cfg(test)]
fn fuzzy_eq(a: f64, b: f64, epsilon: f64) -> bool {
    f64::abs(a - b) <= epsilon
}

#[test]
fn unit_vectors() {
    use crate::ViewSpace;

    let right: Vector2D<f64, ViewSpace> = unit_vector(0.0);
    assert_eq!(right, Vector2D::new(1.0, 0.0));

    // Clockwise in view space: 90 degrees points down.
    let down: Vector2D<f64, ViewSpace> = unit_vector(90.0);
    assert!(fuzzy_eq(down.x, 0.0, 1e-12));
    assert!(fuzzy_eq(down.y, 1.0, 1e-12));

    // Unbounded headings wrap.
    let a: Vector2D<f64, ViewSpace> = unit_vector(45.0);
    let b: Vector2D<f64, ViewSpace> = unit_vector(45.0 + 720.0);
    let c: Vector2D<f64, ViewSpace> = unit_vector(45.0 - 360.0);
    assert!(fuzzy_eq(a.x, b.x, 1e-12) && fuzzy_eq(a.y, b.y, 1e-12));
    assert!(fuzzy_eq(a.x, c.x, 1e-12) && fuzzy_eq(a.y, c.y, 1e-12));
}

#[test]
fn polar_offsets() {
    let center = crate::view_point(10.0, 20.0);
    let p = polar(center, 5.0, 180.0);
    assert!(fuzzy_eq(p.x, 5.0, 1e-12));
    assert!(fuzzy_eq(p.y, 20.0, 1e-12));

    let p = polar(center, 5.0, 270.0);
    assert!(fuzzy_eq(p.x, 10.0, 1e-12));
    assert!(fuzzy_eq(p.y, 15.0, 1e-12));
}

#[test]
fn line_intersection() {
    let l1: Line<AddressSpace> = Line {
        point: Address::new(0.0, 0.0),
        vector: Distance::new(1.0, 1.0),
    };
    let l2: Line<AddressSpace> = Line {
        point: Address::new(4.0, 0.0),
        vector: Distance::new(-1.0, 1.0),
    };
    let p = l1.intersection(&l2).unwrap();
    assert!(fuzzy_eq(p.x, 2.0, 1e-12));
    assert!(fuzzy_eq(p.y, 2.0, 1e-12));

    let parallel = Line {
        point: Address::new(0.0, 3.0),
        vector: Distance::new(2.0, 2.0),
    };
    assert_eq!(l1.intersection(&parallel), None);
    assert!(fuzzy_eq(
        l1.distance_to_point(&Address::new(0.0, 2.0)),
        f64::sqrt(2.0),
        1e-12
    ));
}

#[test]
fn reference_line_intersection_is_exact() {
    let line = Line {
        point: Address::new(-4800.0, 400.0),
        vector: Distance::new(3.0, -1.3),
    };

    let p = ReferenceLine::East(-1600.0).intersect(&line).unwrap();
    assert_eq!(p.x, -1600.0);
    assert!(line.distance_to_point(&p) < 1e-6);

    let p = ReferenceLine::North(-1200.0).intersect(&line).unwrap();
    assert_eq!(p.y, -1200.0);
    assert!(line.distance_to_point(&p) < 1e-6);
}

#[test]
fn reference_line_parallel() {
    let north_bound = Line {
        point: Address::new(100.0, 0.0),
        vector: Distance::new(0.0, 1.0),
    };
    assert_eq!(ReferenceLine::East(-800.0).intersect(&north_bound), None);
    assert!(ReferenceLine::North(50.0).intersect(&north_bound).is_some());
}

#[test]
fn street_validation() {
    assert_eq!(
        Street::east(-800.0).reference_line(),
        Some(ReferenceLine::East(-800.0))
    );
    assert_eq!(
        Street::north(400.0).reference_line(),
        Some(ReferenceLine::North(400.0))
    );
    assert_eq!(Street::new(None, None).reference_line(), None);
    assert_eq!(Street::new(Some(5.0), Some(10.0)).reference_line(), None);
    assert_eq!(Street::east(f64::NAN).reference_line(), None);
    assert_eq!(
        Street::from(ReferenceLine::North(3.0)),
        Street::north(3.0)
    );
}
