#![deny(bare_trait_objects)]

//! Map scripts and built-in maps.
//!
//! This crate is reexported in `transit_map` behind the `extra` feature.

extern crate transit_path as path;

pub use path::geom;

pub mod chicago_loop;
pub mod script;

pub use crate::script::{Command, LineScript, MapScript, NamedDrawing, ScriptError, Step};
