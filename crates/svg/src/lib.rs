#![deny(bare_trait_objects)]

//! # Transit SVG
//!
//! Writes the output of [`transit_path::TrainLine`] as an SVG document.
//!
//! This crate is reexported in `transit_map`.

pub extern crate transit_path as path;

pub mod serializer;

#[doc(inline)]
pub use crate::serializer::{path_data, SvgWriter};
