//! The elevated lines around Chicago's downtown Loop.

use crate::script::{MapScript, ScriptError};

/// The Loop and the Pink line branch towards 54th/Cermak, as a map script.
///
/// Streets follow the Chicago addressing grid: State and Madison are the zero lines and
/// 800 blocks make a mile.
pub const SCRIPT: &str = "\
# Pink line, around the Loop.
line pink start -200 200 color pink
blocks 2500 0
turn 90
blocks 0 -2500
turn 90
blocks -1500 0
turn 90
blocks 0 2500
turn -90

# Green line, Lake street then south on Wabash.
line green start -200 400 color green
blocks 2700 0
station east 1200
turn 90
blocks 0 -3800
station north -1200

# Orange line, coming up from the south west.
line orange start 2500 -3200 color orange
blocks 0 400
turn -61
turn 61
blocks 0 2248
turn -90
blocks -1095 0
turn -90
blocks 0 -2090
turn -90
blocks 1300 0

# Purple line express.
line purple start 400 1400 color purple
blocks 0 -600
turn -90
blocks 2100 0
turn 90
blocks 0 -3100
turn 90
blocks -2100 0
turn 90
blocks 0 3500

# Pink line branch, west along Lake then south to Cermak.
line pink_branch start -200 200 color pink
blocks -2000 0
station east -1600
turn -90
blocks 0 -2400
station north -1200
turn 90
blocks -3700 0
station east -4800
";

/// Parses [`SCRIPT`].
pub fn script() -> Result<MapScript, ScriptError> {
    MapScript::parse(SCRIPT)
}

#[cfg(test)]
use crate::geom::{address, CoordinateTransform, MapBounds};
#[cfg(test)]
use crate::path::{palette, LineStyle};

#[test]
fn built_in_script() {
    let script = script().unwrap();
    let names: Vec<&str> = script.lines().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["pink", "green", "orange", "purple", "pink_branch"]);
    assert_eq!(script.lines()[2].color, Some(palette::ORANGE));

    let transform = CoordinateTransform::new(&MapBounds::CHICAGO).unwrap();
    let drawings = script.draw(transform, &LineStyle::default()).unwrap();
    assert_eq!(drawings.len(), 5);

    let branch = &drawings[4].drawing;
    assert_eq!(branch.segments.len(), 5);
    assert_eq!(branch.stations.len(), 3);
    for station in &drawings[1].drawing.stations {
        assert!(!station.primitive.is_segment());
    }
}

#[test]
fn pink_loop_closes() {
    let script = script().unwrap();
    let transform = CoordinateTransform::new(&MapBounds::CHICAGO).unwrap();
    let pink = &script.lines()[0];

    let style = pink.style(&LineStyle::default());
    let mut line = crate::path::TrainLine::new(transform, pink.start, style);
    for step in &pink.steps {
        match step.command {
            crate::script::Command::Blocks(blocks) => line.draw_relative(blocks).unwrap(),
            crate::script::Command::Turn { degrees, .. } => line.draw_turn(degrees).unwrap(),
            ref other => panic!("unexpected command {:?}", other),
        }
    }

    // Three right turns and a left one: heading west, back on Lake street.
    assert!((line.heading().unwrap() - 180.0).abs() < 1e-9);
    let end = line.location();
    assert!((end - address(400.0, 200.0)).length() < 1e-6);
}
