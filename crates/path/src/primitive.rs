use crate::geom::ViewPoint;
use crate::style::Stroke;

/// Flag parameters of an SVG elliptical arc command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    pub large_arc: bool,
    pub sweep: bool,
}

/// A fully resolved piece of geometry in view space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Primitive {
    Line {
        from: ViewPoint,
        to: ViewPoint,
    },
    /// A circular arc, described the way SVG's `A` command does.
    ///
    /// The center is implied by the endpoints, the radius and the flags.
    Arc {
        from: ViewPoint,
        to: ViewPoint,
        radius: f64,
        /// Rotation of the ellipse in degrees, always zero for circles.
        x_rotation: f64,
        flags: ArcFlags,
    },
    /// A station marker: a disc of the given radius.
    Station { center: ViewPoint, radius: f64 },
}

impl Primitive {
    pub fn is_segment(&self) -> bool {
        match self {
            Primitive::Line { .. } | Primitive::Arc { .. } => true,
            Primitive::Station { .. } => false,
        }
    }

    /// Start of a segment, or the center of a station.
    pub fn from(&self) -> ViewPoint {
        match *self {
            Primitive::Line { from, .. } | Primitive::Arc { from, .. } => from,
            Primitive::Station { center, .. } => center,
        }
    }

    /// End of a segment, or the center of a station.
    pub fn to(&self) -> ViewPoint {
        match *self {
            Primitive::Line { to, .. } | Primitive::Arc { to, .. } => to,
            Primitive::Station { center, .. } => center,
        }
    }
}

/// A primitive with the stroke of the line that emitted it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub stroke: Stroke,
}

/// Everything a train line emitted, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineDrawing {
    /// Straight segments and turns.
    pub segments: Vec<DrawCommand>,
    /// Station markers, drawn on top of the segments.
    pub stations: Vec<DrawCommand>,
}

impl LineDrawing {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.stations.is_empty()
    }

    /// Iterates over the segments, then the stations.
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.segments.iter().chain(self.stations.iter())
    }
}

#[test]
fn primitive_endpoints() {
    use crate::geom::view_point;

    let line = Primitive::Line {
        from: view_point(0.0, 1.0),
        to: view_point(2.0, 3.0),
    };
    assert!(line.is_segment());
    assert_eq!(line.from(), view_point(0.0, 1.0));
    assert_eq!(line.to(), view_point(2.0, 3.0));

    let station = Primitive::Station {
        center: view_point(5.0, 5.0),
        radius: 8.0,
    };
    assert!(!station.is_segment());
    assert_eq!(station.from(), station.to());
}
