#![deny(bare_trait_objects)]

//! Schematic transit maps drawn from street addresses.
//!
//! # Crates
//!
//! This meta-crate (`transit_map`) reexports the following sub-crates for convenience:
//!
//! * **transit_geom** - Address and view coordinate spaces, the transform between them and
//!   line math.
//! * **transit_path** - The train line cursor: segments, turns and stations.
//! * **transit_svg** - SVG output.
//! * **transit_extra** - Map scripts and the built-in Chicago Loop map.
//!
//! Each `transit_<name>` crate is reexported as a `<name>` module in `transit_map`. For example:
//!
//! ```ignore
//! extern crate transit_path;
//! use transit_path::TrainLine;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate transit_map;
//! use transit_map::path::TrainLine;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! `transit_svg` and `transit_extra` are disabled by default. They can be added with the
//! `svg` and `extra` feature flags.

pub extern crate transit_path;
#[cfg(feature = "extra")]
pub extern crate transit_extra;
#[cfg(feature = "svg")]
pub extern crate transit_svg;

#[cfg(feature = "extra")]
pub use transit_extra as extra;
pub use transit_path as path;
#[cfg(feature = "svg")]
pub use transit_svg as svg;

pub use path::geom;
pub use path::geom::euclid;
