use std::fmt;
use std::io;

use transit_map::extra::{MapScript, NamedDrawing, ScriptError};
use transit_map::geom::{BoundsError, CoordinateTransform, MapBounds};
use transit_map::path::LineStyle;

/// Everything `render` and `inspect` need to draw a map.
pub struct MapCmd {
    /// Map script source.
    pub script: String,
    pub bounds: MapBounds,
    pub style: LineStyle,
}

impl MapCmd {
    pub fn draw(&self) -> Result<Vec<NamedDrawing>, CliError> {
        let transform = CoordinateTransform::new(&self.bounds)?;
        let script = MapScript::parse(&self.script)?;

        Ok(script.draw(transform, &self.style)?)
    }
}

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    Bounds(BoundsError),
    Script(ScriptError),
    Option { name: &'static str, value: f64 },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{}", e),
            CliError::Bounds(e) => write!(f, "Invalid map bounds: {}", e),
            CliError::Script(e) => write!(f, "{}", e),
            CliError::Option { name, value } => {
                write!(f, "--{} must be a positive finite number, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<BoundsError> for CliError {
    fn from(err: BoundsError) -> Self {
        CliError::Bounds(err)
    }
}

impl From<ScriptError> for CliError {
    fn from(err: ScriptError) -> Self {
        CliError::Script(err)
    }
}
