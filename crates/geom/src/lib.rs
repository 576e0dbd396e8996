#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Coordinate systems and line math for schematic transit maps, on top of euclid.
//!
//! This crate is reexported in `transit_map`.
//!
//! # Overview.
//!
//! Two coordinate systems are used:
//!
//! - **Address space**: city street addresses in block units. East and north offsets are
//!   positive, west and south offsets are negative.
//! - **View space**: the output image's pixel space. The origin is the top-left corner, x grows
//!   to the right and y grows downward.
//!
//! Lines are described using street addresses but all angles are measured in view space:
//! 0 degrees points to the right and positive angles sweep clockwise.
//!
//! The [`CoordinateTransform`] maps between the two spaces with a single uniform scale
//! derived from the addressing range bounds and the image size (see [`MapBounds`]).
//!
//! ```
//! use transit_geom::{address, CoordinateTransform, MapBounds};
//!
//! let transform = CoordinateTransform::new(&MapBounds::default()).unwrap();
//! let p = transform.address_to_view(address(-4800.0, 400.0));
//! let a = transform.view_to_address(p);
//! assert!((a.x + 4800.0).abs() < 1e-9);
//! ```

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod line;
pub mod transform;

#[doc(inline)]
pub use crate::line::{polar, unit_vector, Line, ReferenceLine, Street};
#[doc(inline)]
pub use crate::transform::{BoundsError, CoordinateTransform, MapBounds};

/// Unit tag for street-address coordinates (block units, north/east positive).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AddressSpace;

/// Unit tag for view coordinates (pixels, origin top-left, y down).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewSpace;

/// An absolute location in address space, `x` is the east offset and `y` the north offset.
pub type Address = euclid::Point2D<f64, AddressSpace>;

/// A relative offset in address space, measured in blocks.
pub type Distance = euclid::Vector2D<f64, AddressSpace>;

/// An absolute location in view space.
pub type ViewPoint = euclid::Point2D<f64, ViewSpace>;

/// A relative offset in view space.
pub type ViewVector = euclid::Vector2D<f64, ViewSpace>;

/// Alias for `euclid::Transform2D` mapping addresses to view points.
pub type ViewTransform = euclid::Transform2D<f64, AddressSpace, ViewSpace>;

/// Shorthand for `Address::new(east, north)`.
#[inline]
pub fn address(east: f64, north: f64) -> Address {
    Address::new(east, north)
}

/// Shorthand for `Distance::new(east, north)`.
#[inline]
pub fn distance(east: f64, north: f64) -> Distance {
    Distance::new(east, north)
}

/// Shorthand for `ViewPoint::new(x, y)`.
#[inline]
pub fn view_point(x: f64, y: f64) -> ViewPoint {
    ViewPoint::new(x, y)
}

/// Shorthand for `ViewVector::new(x, y)`.
#[inline]
pub fn view_vector(x: f64, y: f64) -> ViewVector {
    ViewVector::new(x, y)
}

/// Reduces an unbounded heading in degrees to `[0, 360)`.
///
/// Headings accumulate across turns without wrapping; this is only applied right before
/// evaluating trigonometric functions.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

#[test]
fn normalize_large_headings() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(450.0), 90.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(-720.0), 0.0);
    assert_eq!(normalize_degrees(1080.0 + 45.0), 45.0);
}
