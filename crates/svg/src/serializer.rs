use crate::path::{DrawCommand, LineDrawing, Primitive, Stroke};

use log::debug;
use svg::node::element::{Circle, Group, Path};
use svg::{Document, Node};

/// Returns the SVG path data (the `d` attribute) of a segment primitive.
///
/// Returns `None` for station markers, which are written as `<circle>` elements.
pub fn path_data(primitive: &Primitive) -> Option<String> {
    match *primitive {
        Primitive::Line { from, to } => Some(format!(
            "M {:.6},{:.6} L {:.6},{:.6}",
            from.x, from.y, to.x, to.y
        )),
        Primitive::Arc {
            from,
            to,
            radius,
            x_rotation,
            flags,
        } => Some(format!(
            "M {:.6},{:.6} A {:.6},{:.6} {} {},{} {:.6},{:.6}",
            from.x,
            from.y,
            radius,
            radius,
            x_rotation,
            flags.large_arc as u8,
            flags.sweep as u8,
            to.x,
            to.y
        )),
        Primitive::Station { .. } => None,
    }
}

/// Builds an SVG document out of train line drawings.
///
/// Each line becomes two groups: one with its segments and, on top of it, one with its
/// stations. Lines are stacked in the order they are added.
///
/// ```
/// use transit_svg::SvgWriter;
/// use transit_svg::path::LineDrawing;
///
/// let mut svg = SvgWriter::new(1000.0, 2000.0);
/// svg.add_line(Some("pink"), &LineDrawing::default());
/// let doc = svg.finish();
/// assert!(doc.contains(r#"viewBox="0 0 1000 2000""#));
/// ```
pub struct SvgWriter {
    width: f64,
    height: f64,
    groups: Vec<Group>,
    lines: usize,
}

impl SvgWriter {
    pub fn new(width: f64, height: f64) -> Self {
        SvgWriter {
            width,
            height,
            groups: Vec::new(),
            lines: 0,
        }
    }

    /// Number of lines added so far.
    pub fn num_lines(&self) -> usize {
        self.lines
    }

    pub fn add_line(&mut self, id: Option<&str>, drawing: &LineDrawing) {
        self.lines += 1;
        if drawing.is_empty() {
            debug!("line {:?} has nothing to draw", id);
            return;
        }

        if let Some(first) = drawing.segments.first() {
            let mut group = group(id.map(element_id), &first.stroke, "none");
            for cmd in &drawing.segments {
                if let Some(d) = path_data(&cmd.primitive) {
                    let path = with_stroke(Path::new().set("d", d), cmd, &first.stroke);
                    group = group.add(path);
                }
            }
            self.groups.push(group);
        }

        if let Some(first) = drawing.stations.first() {
            let id = id.map(|id| format!("{}-stations", element_id(id)));
            let mut group = group(id, &first.stroke, "#ffffff");
            for cmd in &drawing.stations {
                if let Primitive::Station { center, radius } = cmd.primitive {
                    let circle = Circle::new()
                        .set("cx", format!("{:.6}", center.x))
                        .set("cy", format!("{:.6}", center.y))
                        .set("r", format!("{:.6}", radius));
                    group = group.add(with_stroke(circle, cmd, &first.stroke));
                }
            }
            self.groups.push(group);
        }

        debug!(
            "line {:?}: {} segments, {} stations",
            id,
            drawing.segments.len(),
            drawing.stations.len()
        );
    }

    /// Returns the document without the XML declaration.
    pub fn into_document(self) -> Document {
        let document = Document::new()
            .set("width", self.width.to_string())
            .set("height", self.height.to_string())
            .set("viewBox", format!("0 0 {} {}", self.width, self.height));

        self.groups
            .into_iter()
            .fold(document, |document, group| document.add(group))
    }

    /// Returns the complete document.
    pub fn finish(self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n",
            self.into_document()
        )
    }
}

fn group(id: Option<String>, stroke: &Stroke, fill: &str) -> Group {
    let group = Group::new()
        .set("stroke", stroke.color.to_string())
        .set("stroke-width", stroke.thickness.to_string())
        .set("fill", fill);

    match id {
        Some(id) => group.set("id", id),
        None => group,
    }
}

// Line names can be anything, ids are restricted to name characters.
fn element_id(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect()
}

// Elements normally inherit the stroke of their group.
fn with_stroke<T: Node>(element: T, cmd: &DrawCommand, group: &Stroke) -> T {
    if cmd.stroke == *group {
        return element;
    }

    let mut element = element;
    element.assign("stroke", cmd.stroke.color.to_string());
    element.assign("stroke-width", cmd.stroke.thickness.to_string());
    element
}

#[cfg(test)]
use crate::path::geom::view_point;
#[cfg(test)]
use crate::path::{palette, ArcFlags, Color};

#[test]
fn line_path_data() {
    let line = Primitive::Line {
        from: view_point(1.0, 2.0),
        to: view_point(3.5, 4.0),
    };
    assert_eq!(
        path_data(&line).unwrap(),
        "M 1.000000,2.000000 L 3.500000,4.000000"
    );
}

#[test]
fn arc_path_data() {
    let arc = Primitive::Arc {
        from: view_point(0.0, 0.0),
        to: view_point(10.0, 10.0),
        radius: 10.0,
        x_rotation: 0.0,
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    };
    assert_eq!(
        path_data(&arc).unwrap(),
        "M 0.000000,0.000000 A 10.000000,10.000000 0 0,1 10.000000,10.000000"
    );

    let arc = Primitive::Arc {
        from: view_point(0.0, 0.0),
        to: view_point(10.0, -10.0),
        radius: 10.0,
        x_rotation: 0.0,
        flags: ArcFlags::default(),
    };
    assert_eq!(
        path_data(&arc).unwrap(),
        "M 0.000000,0.000000 A 10.000000,10.000000 0 0,0 10.000000,-10.000000"
    );

    let station = Primitive::Station {
        center: view_point(0.0, 0.0),
        radius: 8.0,
    };
    assert_eq!(path_data(&station), None);
}

#[test]
fn document() {
    let line_stroke = Stroke::new(palette::PINK, 20.0);
    let station_stroke = Stroke::new(Color::BLACK, 2.0);
    let drawing = LineDrawing {
        segments: vec![
            DrawCommand {
                primitive: Primitive::Line {
                    from: view_point(10.0, 10.0),
                    to: view_point(100.0, 10.0),
                },
                stroke: line_stroke,
            },
            DrawCommand {
                primitive: Primitive::Line {
                    from: view_point(100.0, 10.0),
                    to: view_point(100.0, 50.0),
                },
                stroke: Stroke::new(palette::GREEN, 10.0),
            },
        ],
        stations: vec![DrawCommand {
            primitive: Primitive::Station {
                center: view_point(50.0, 10.0),
                radius: 8.0,
            },
            stroke: station_stroke,
        }],
    };

    let mut svg = SvgWriter::new(1000.0, 2000.0);
    svg.add_line(Some("pink"), &drawing);
    svg.add_line(None, &LineDrawing::default());
    assert_eq!(svg.num_lines(), 2);
    let doc = svg.finish();

    assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg"));
    assert!(doc.contains(r#"width="1000""#));
    assert!(doc.contains(r#"height="2000""#));
    assert!(doc.contains(r#"viewBox="0 0 1000 2000""#));
    assert!(doc.contains(r#"id="pink""#));
    assert!(doc.contains(r#"id="pink-stations""#));
    assert!(doc.contains(r##"stroke="#e27ea6""##));
    assert!(doc.contains(r#"stroke-width="20""#));
    assert!(doc.contains(r#"fill="none""#));
    assert!(doc.contains(r#"d="M 10.000000,10.000000 L 100.000000,10.000000""#));
    assert!(doc.contains(r#"d="M 100.000000,10.000000 L 100.000000,50.000000""#));
    // Only the second segment overrides the group stroke.
    assert_eq!(doc.matches(r##"stroke="#009b3a""##).count(), 1);
    assert!(doc.contains(r#"stroke-width="10""#));
    assert!(doc.contains(r##"stroke="#000000""##));
    assert!(doc.contains(r##"fill="#ffffff""##));
    assert!(doc.contains(r#"cx="50.000000""#));
    assert!(doc.contains(r#"cy="10.000000""#));
    assert!(doc.contains(r#"r="8.000000""#));
    assert!(doc.trim_end().ends_with("</svg>"));

    // Stations are drawn on top of the segments.
    let segments = doc.find("<path").unwrap();
    let stations = doc.find("<circle").unwrap();
    assert!(segments < stations);
    assert_eq!(doc.matches("<g").count(), 2);
}

#[test]
fn element_ids() {
    let drawing = LineDrawing {
        segments: vec![DrawCommand {
            primitive: Primitive::Line {
                from: view_point(0.0, 0.0),
                to: view_point(1.0, 0.0),
            },
            stroke: Stroke::new(Color::GRAY, 20.0),
        }],
        stations: Vec::new(),
    };

    let mut svg = SvgWriter::new(10.0, 10.0);
    svg.add_line(Some("a<b & \"c\""), &drawing);
    let doc = svg.finish();

    assert!(doc.contains(r#"id="a_b____c_""#));
    assert!(!doc.contains("stations"));
    assert_eq!(doc.matches("<g").count(), 1);
}
