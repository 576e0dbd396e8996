#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Build schematic transit lines out of straight segments, circular turns and stations.
//!
//! A [`TrainLine`] is a cursor that remembers where the line currently ends (as a street
//! address) and which way it is heading. Each drawing operation extends the line and
//! records the resolved view space geometry as [`DrawCommand`]s, ready to be serialized.
//!
//! This crate is reexported in `transit_map`.
//!
//! # Examples
//!
//! ```
//! use transit_path::geom::{address, distance, CoordinateTransform, MapBounds, Street};
//! use transit_path::{LineStyle, TrainLine};
//!
//! let transform = CoordinateTransform::new(&MapBounds::default()).unwrap();
//! let mut pink = TrainLine::new(transform, address(-200.0, 200.0), LineStyle::default());
//!
//! pink.draw_relative(distance(-2000.0, 0.0)).unwrap();
//! pink.draw_station_intersection(Street::east(-1600.0)).unwrap();
//! pink.draw_turn(-90.0).unwrap();
//! pink.draw_relative(distance(0.0, -2400.0)).unwrap();
//!
//! let drawing = pink.finish();
//! assert_eq!(drawing.segments.len(), 3);
//! assert_eq!(drawing.stations.len(), 1);
//! ```

pub use transit_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod primitive;
pub mod style;
mod train_line;

pub use crate::error::DrawError;
pub use crate::primitive::{ArcFlags, DrawCommand, LineDrawing, Primitive};
#[doc(inline)]
pub use crate::style::{palette, Color, ColorParseError, LineStyle, Stroke};
pub use crate::train_line::TrainLine;
