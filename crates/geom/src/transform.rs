//! Mapping between street addresses and view coordinates.

use crate::{Address, Distance, ViewPoint, ViewTransform, ViewVector};

use std::fmt;

/// The image size and the addressing range the map must fit into.
///
/// All values must be finite and strictly positive. The address bounds are magnitudes:
/// `max_west` is the largest westward (negative east) offset that has to fit in the image.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct MapBounds {
    /// Image width in pixels.
    pub width: f64,
    /// Image height in pixels.
    pub height: f64,
    pub max_west: f64,
    pub max_east: f64,
    pub max_north: f64,
    pub max_south: f64,
}

impl MapBounds {
    /// Bounds of the Chicago system map: a 1000x2000 image covering 8000 W to 400 E
    /// and 10000 S to 10800 N.
    pub const CHICAGO: MapBounds = MapBounds {
        width: 1000.0,
        height: 2000.0,
        max_west: 8000.0,
        max_east: 400.0,
        max_north: 10800.0,
        max_south: 10000.0,
    };

    fn check(&self) -> Result<(), BoundsError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("max_west", self.max_west),
            ("max_east", self.max_east),
            ("max_north", self.max_north),
            ("max_south", self.max_south),
        ];
        for &(name, value) in &fields {
            if !value.is_finite() {
                return Err(BoundsError::NotFinite(name));
            }
            if value <= 0.0 {
                return Err(BoundsError::NotPositive(name));
            }
        }

        Ok(())
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        MapBounds::CHICAGO
    }
}

/// Invalid map bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundsError {
    NotFinite(&'static str),
    NotPositive(&'static str),
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsError::NotFinite(name) => {
                write!(f, "Map bound {name} is not a finite number")
            }
            BoundsError::NotPositive(name) => {
                write!(f, "Map bound {name} must be greater than zero")
            }
        }
    }
}

impl std::error::Error for BoundsError {}

/// Maps addresses and block distances into view space and back.
///
/// The scale and the center are derived once in [`CoordinateTransform::new`] and cannot be
/// modified afterwards. The transform is a small `Copy` value so every train line can hold
/// its own copy.
///
/// ```text
/// x = center.x + east * scale
/// y = center.y - north * scale
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct CoordinateTransform {
    bounds: MapBounds,
    scale: f64,
    center: ViewPoint,
}

impl CoordinateTransform {
    /// Derives the uniform scale that fits every address in the bounds into the image, and
    /// the view position of the address origin.
    pub fn new(bounds: &MapBounds) -> Result<Self, BoundsError> {
        bounds.check()?;

        let scale = f64::min(
            bounds.width / (bounds.max_west + bounds.max_east),
            bounds.height / (bounds.max_north + bounds.max_south),
        );
        let center = ViewPoint::new(bounds.max_west * scale, bounds.max_south * scale);

        Ok(CoordinateTransform {
            bounds: *bounds,
            scale,
            center,
        })
    }

    #[inline]
    pub fn bounds(&self) -> &MapBounds {
        &self.bounds
    }

    /// Number of pixels per block.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// View position of the address `(0, 0)`.
    #[inline]
    pub fn center(&self) -> ViewPoint {
        self.center
    }

    /// Maps an absolute address into view coordinates.
    #[inline]
    pub fn address_to_view(&self, addr: Address) -> ViewPoint {
        ViewPoint::new(
            self.center.x + addr.x * self.scale,
            self.center.y - addr.y * self.scale,
        )
    }

    /// Maps absolute view coordinates back to an address.
    #[inline]
    pub fn view_to_address(&self, p: ViewPoint) -> Address {
        Address::new(
            (p.x - self.center.x) / self.scale,
            (p.y - self.center.y) / -self.scale,
        )
    }

    /// Maps a relative distance in blocks into a view space offset (no translation).
    #[inline]
    pub fn distance_to_view(&self, blocks: Distance) -> ViewVector {
        ViewVector::new(blocks.x * self.scale, -blocks.y * self.scale)
    }

    /// Maps a view space offset back to a distance in blocks.
    #[inline]
    pub fn view_to_distance(&self, v: ViewVector) -> Distance {
        Distance::new(v.x / self.scale, -v.y / self.scale)
    }

    /// Scales a magnitude (for example a turn radius) the same way as addresses.
    #[inline]
    pub fn scale_value(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// The same mapping as `address_to_view` expressed as an euclid transform.
    pub fn to_view_transform(&self) -> ViewTransform {
        ViewTransform::new(
            self.scale,
            0.0,
            0.0,
            -self.scale,
            self.center.x,
            self.center.y,
        )
    }
}

#[cfg(test)]
fn fuzzy_eq(a: f64, b: f64, epsilon: f64) -> bool {
    f64::abs(a - b) <= epsilon
}

#[test]
fn chicago_scale_and_center() {
    let t = CoordinateTransform::new(&MapBounds::CHICAGO).unwrap();

    // The height is the limiting dimension: 2000 / 20800.
    assert!(fuzzy_eq(t.scale(), 2000.0 / 20800.0, 1e-12));
    assert!(fuzzy_eq(t.center().x, 8000.0 * t.scale(), 1e-9));
    assert!(fuzzy_eq(t.center().y, 10000.0 * t.scale(), 1e-9));
}

#[test]
fn width_limited_scale() {
    let bounds = MapBounds {
        width: 100.0,
        height: 1000.0,
        max_west: 50.0,
        max_east: 50.0,
        max_north: 50.0,
        max_south: 50.0,
    };
    let t = CoordinateTransform::new(&bounds).unwrap();
    assert_eq!(t.scale(), 1.0);
    assert_eq!(t.center(), ViewPoint::new(50.0, 50.0));
}

#[test]
fn origin_maps_to_center() {
    use crate::address;

    let bounds = MapBounds::CHICAGO;
    let t = CoordinateTransform::new(&bounds).unwrap();

    assert_eq!(t.address_to_view(address(0.0, 0.0)), t.center());

    // The center is offset by the west and south bounds, which puts this address
    // in the top-left corner.
    let corner = t.address_to_view(address(-bounds.max_west, bounds.max_south));
    assert!(fuzzy_eq(corner.x, 0.0, 1e-9));
    assert!(fuzzy_eq(corner.y, 0.0, 1e-9));

    let south_east = t.address_to_view(address(bounds.max_east, -bounds.max_south));
    assert!(south_east.x <= bounds.width + 1e-9);
    assert!(south_east.y <= bounds.height + 1e-9);

    // North is up.
    let north = t.address_to_view(address(0.0, 100.0));
    assert!(north.y < t.center().y);
}

#[test]
fn address_round_trip() {
    use crate::address;

    let t = CoordinateTransform::new(&MapBounds::CHICAGO).unwrap();
    let mut east = -8000.0;
    while east <= 400.0 {
        let mut north = -10000.0;
        while north <= 10800.0 {
            let a = address(east, north);
            let b = t.view_to_address(t.address_to_view(a));
            assert!(fuzzy_eq(a.x, b.x, 1e-9), "{a:?} != {b:?}");
            assert!(fuzzy_eq(a.y, b.y, 1e-9), "{a:?} != {b:?}");
            north += 733.3;
        }
        east += 517.1;
    }

    let p = crate::view_point(123.25, 1777.5);
    let q = t.address_to_view(t.view_to_address(p));
    assert!(fuzzy_eq(p.x, q.x, 1e-9));
    assert!(fuzzy_eq(p.y, q.y, 1e-9));
}

#[test]
fn distance_round_trip() {
    use crate::{distance, view_vector};

    let t = CoordinateTransform::new(&MapBounds::CHICAGO).unwrap();
    for &(e, n) in &[(0.0, 0.0), (2500.0, 0.0), (0.0, -2400.0), (-1095.5, 2248.25)] {
        let d = distance(e, n);
        let back = t.view_to_distance(t.distance_to_view(d));
        assert!(fuzzy_eq(d.x, back.x, 1e-9));
        assert!(fuzzy_eq(d.y, back.y, 1e-9));
    }

    let v = view_vector(-17.0, 42.5);
    let back = t.distance_to_view(t.view_to_distance(v));
    assert!(fuzzy_eq(v.x, back.x, 1e-9));
    assert!(fuzzy_eq(v.y, back.y, 1e-9));

    // Moving north moves up in the image.
    assert!(t.distance_to_view(distance(0.0, 100.0)).y < 0.0);
}

#[test]
fn scale_value_matches_point_distance() {
    use crate::address;

    let t = CoordinateTransform::new(&MapBounds::CHICAGO).unwrap();
    let radius = 200.0;
    let from = address(-4800.0, 400.0);

    for &(e, n) in &[(1.0, 0.0), (0.0, 1.0), (0.6, 0.8), (-0.8, 0.6)] {
        let to = from + crate::distance(e * radius, n * radius);
        let measured = (t.address_to_view(to) - t.address_to_view(from)).length();
        assert!(fuzzy_eq(measured, t.scale_value(radius), 1e-9));
    }
}

#[test]
fn euclid_transform_agrees() {
    use crate::address;

    let t = CoordinateTransform::new(&MapBounds::CHICAGO).unwrap();
    let m = t.to_view_transform();
    for &a in &[address(0.0, 0.0), address(-7200.0, 400.0), address(250.0, -9000.0)] {
        let expected = t.address_to_view(a);
        let actual = m.transform_point(a);
        assert!(fuzzy_eq(expected.x, actual.x, 1e-9));
        assert!(fuzzy_eq(expected.y, actual.y, 1e-9));
    }
}

#[test]
fn invalid_bounds() {
    let mut bounds = MapBounds::CHICAGO;
    bounds.max_east = 0.0;
    assert_eq!(
        CoordinateTransform::new(&bounds),
        Err(BoundsError::NotPositive("max_east"))
    );

    let mut bounds = MapBounds::CHICAGO;
    bounds.height = f64::NAN;
    assert_eq!(
        CoordinateTransform::new(&bounds),
        Err(BoundsError::NotFinite("height"))
    );
}
