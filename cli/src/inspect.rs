use crate::commands::{CliError, MapCmd};
use std::io::Write;
use transit_map::path::Primitive;
use transit_map::svg::path_data;

/// Prints every primitive of every line, segments first.
pub fn inspect(cmd: &MapCmd, output: &mut dyn Write) -> Result<(), CliError> {
    for line in cmd.draw()? {
        for command in line.drawing.iter() {
            match (path_data(&command.primitive), command.primitive) {
                (Some(d), _) => writeln!(output, "{}: {}", line.name, d)?,
                (None, Primitive::Station { center, radius }) => writeln!(
                    output,
                    "{}: station {:.6},{:.6} r={:.6}",
                    line.name, center.x, center.y, radius
                )?,
                (None, _) => {}
            }
        }
    }

    Ok(())
}

#[test]
fn inspect_lines() {
    let cmd = MapCmd {
        script: "line a start 0 0\nblocks 100 0\nturn 90\nstation 0 0".to_string(),
        bounds: transit_map::geom::MapBounds::default(),
        style: transit_map::path::LineStyle::default(),
    };
    let mut output = Vec::new();
    inspect(&cmd, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("a: M ") && lines[0].contains(" L "));
    assert!(lines[1].starts_with("a: M ") && lines[1].contains(" A "));
    assert!(lines[2].starts_with("a: station "));
    assert!(lines[2].ends_with("r=8.000000"));
}
