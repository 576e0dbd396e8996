use crate::commands::{CliError, MapCmd};
use log::info;
use std::io::Write;
use transit_map::svg::SvgWriter;

pub fn render(cmd: &MapCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let drawings = cmd.draw()?;

    let mut svg = SvgWriter::new(cmd.bounds.width, cmd.bounds.height);
    for line in &drawings {
        svg.add_line(Some(&line.name), &line.drawing);
    }
    info!("rendered {} lines", svg.num_lines());

    output.write_all(svg.finish().as_bytes())?;

    Ok(())
}

#[cfg(test)]
fn cmd(script: &str) -> MapCmd {
    MapCmd {
        script: script.to_string(),
        bounds: transit_map::geom::MapBounds::default(),
        style: transit_map::path::LineStyle::default(),
    }
}

#[test]
fn render_built_in_map() {
    let mut output = Vec::new();
    render(&cmd(transit_map::extra::chicago_loop::SCRIPT), &mut output).unwrap();
    let doc = String::from_utf8(output).unwrap();

    assert!(doc.contains(r#"viewBox="0 0 1000 2000""#));
    for name in &["pink", "green", "orange", "purple", "pink_branch"] {
        assert!(doc.contains(&format!("id=\"{}\"", name)), "{}", name);
    }
    assert!(doc.contains("<circle"));
}

#[test]
fn render_errors() {
    let mut output = Vec::new();
    let err = render(&cmd("line a start 0 0\nturn 90"), &mut output).unwrap_err();
    match err {
        CliError::Script(e) => assert_eq!(e.line(), 2),
        other => panic!("{:?}", other),
    }
    assert!(output.is_empty());

    let mut bad_bounds = cmd("");
    bad_bounds.bounds.width = 0.0;
    match render(&bad_bounds, &mut output) {
        Err(CliError::Bounds(_)) => {}
        other => panic!("{:?}", other),
    }
}
