//! A small line-oriented language describing transit maps.
//!
//! ```text
//! # Comments start with a '#' token.
//! line pink start -200 200 color #e27ea6 thickness 20
//! blocks -2000 0          # straight segment, relative
//! station east -1600      # station where the line crosses 1600 W
//! turn -90 radius 200     # radius is optional
//! to -2400 -2400          # straight segment, absolute
//! station 0 0             # station at an offset from the current location
//! station at -2400 -1200  # station at an address
//! station north -1200     # station where the line crosses 1200 S
//! ```
//!
//! Colors are `#rrggbb` values or line names from [`palette`](crate::path::palette).
//! Every error reports the 1-based line of the script it was found on.

use crate::geom::{address, distance, Address, CoordinateTransform, Distance, Street};
use crate::path::{palette, Color, DrawError, LineDrawing, LineStyle, TrainLine};

use log::{debug, info};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ScriptError {
    #[error("Line {line}: Expected a valid number, got {src:?}.")]
    Number { src: String, line: usize },
    #[error("Line {line}: Expected a color (#rrggbb or a line name), got {src:?}.")]
    Color { src: String, line: usize },
    #[error("Line {line}: Invalid command {command:?}.")]
    Command { command: String, line: usize },
    #[error("Line {line}: Missing {expected} after {command:?}.")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
        line: usize,
    },
    #[error("Line {line}: Unexpected argument {src:?}.")]
    UnexpectedArgument { src: String, line: usize },
    #[error("Line {line}: {command:?} must follow a line declaration.")]
    MissingLine { command: String, line: usize },
    #[error("Line {line}: Could not draw {name:?}: {source}")]
    Draw {
        name: String,
        line: usize,
        source: DrawError,
    },
}

impl ScriptError {
    /// The 1-based line of the script the error was found on.
    pub fn line(&self) -> usize {
        match *self {
            ScriptError::Number { line, .. }
            | ScriptError::Color { line, .. }
            | ScriptError::Command { line, .. }
            | ScriptError::MissingArgument { line, .. }
            | ScriptError::UnexpectedArgument { line, .. }
            | ScriptError::MissingLine { line, .. }
            | ScriptError::Draw { line, .. } => line,
        }
    }
}

/// A drawing operation of a train line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// `to <east> <north>`
    To(Address),
    /// `blocks <east> <north>`
    Blocks(Distance),
    /// `turn <degrees> [radius <blocks>]`
    Turn { degrees: f64, radius: Option<f64> },
    /// `station <east> <north>`
    Station(Distance),
    /// `station at <east> <north>`
    StationAt(Address),
    /// `station east <x>` or `station north <y>`
    StationIntersection(Street),
}

/// A command and the script line it was read from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

/// A `line` declaration and the commands following it.
#[derive(Clone, Debug, PartialEq)]
pub struct LineScript {
    pub name: String,
    pub start: Address,
    pub color: Option<Color>,
    pub thickness: Option<f64>,
    pub steps: Vec<Step>,
}

impl LineScript {
    /// `base` with this line's overrides.
    pub fn style(&self, base: &LineStyle) -> LineStyle {
        let mut style = *base;
        if let Some(color) = self.color {
            style.stroke_color = color;
        }
        if let Some(thickness) = self.thickness {
            style.stroke_thickness = thickness;
        }

        style
    }

    /// Runs the commands on a new train line.
    pub fn draw(
        &self,
        transform: CoordinateTransform,
        base: &LineStyle,
    ) -> Result<LineDrawing, ScriptError> {
        let mut train = TrainLine::new(transform, self.start, self.style(base));

        for step in &self.steps {
            let result = match step.command {
                Command::To(to) => train.draw_to_address(to),
                Command::Blocks(blocks) => train.draw_relative(blocks),
                Command::Turn {
                    degrees,
                    radius: Some(radius),
                } => train.draw_turn_with_radius(degrees, radius),
                Command::Turn {
                    degrees,
                    radius: None,
                } => train.draw_turn(degrees),
                Command::Station(offset) => train.draw_station(offset),
                Command::StationAt(at) => train.draw_station_abs(at),
                Command::StationIntersection(street) => {
                    train.draw_station_intersection(street).map(|_| ())
                }
            };

            result.map_err(|source| ScriptError::Draw {
                name: self.name.clone(),
                line: step.line,
                source,
            })?;
        }

        Ok(train.finish())
    }
}

/// The drawing of a line along with the name it was declared with.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedDrawing {
    pub name: String,
    pub drawing: LineDrawing,
}

/// A parsed map script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapScript {
    lines: Vec<LineScript>,
}

impl MapScript {
    pub fn parse(src: &str) -> Result<Self, ScriptError> {
        let mut lines: Vec<LineScript> = Vec::new();

        for (idx, text) in src.lines().enumerate() {
            let tokens = tokenize(text);
            let (first, rest) = match tokens.split_first() {
                Some(split) => split,
                None => continue,
            };
            let line = idx + 1;

            if *first == "line" {
                lines.push(parse_line_declaration(rest, line)?);
                continue;
            }

            let command = parse_command(first, rest, line)?;
            match lines.last_mut() {
                Some(current) => current.steps.push(Step { line, command }),
                None => {
                    return Err(ScriptError::MissingLine {
                        command: first.to_string(),
                        line,
                    });
                }
            }
        }

        debug!("parsed {} lines", lines.len());

        Ok(MapScript { lines })
    }

    pub fn lines(&self) -> &[LineScript] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Draws every line of the script, in declaration order.
    ///
    /// Stops at the first command that can't be drawn.
    pub fn draw(
        &self,
        transform: CoordinateTransform,
        style: &LineStyle,
    ) -> Result<Vec<NamedDrawing>, ScriptError> {
        let mut drawings = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let drawing = line.draw(transform, style)?;
            info!(
                "{}: {} segments, {} stations",
                line.name,
                drawing.segments.len(),
                drawing.stations.len()
            );
            drawings.push(NamedDrawing {
                name: line.name.clone(),
                drawing,
            });
        }

        Ok(drawings)
    }
}

// Splits a line into tokens, dropping the comment if any. A '#' token following `color` is
// a value, not a comment.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for token in text.split_whitespace() {
        if token.starts_with('#') && tokens.last() != Some(&"color") {
            break;
        }
        tokens.push(token);
    }

    tokens
}

struct Arguments<'l> {
    tokens: std::iter::Peekable<std::slice::Iter<'l, &'l str>>,
    command: &'static str,
    line: usize,
}

impl<'l> Arguments<'l> {
    fn new(tokens: &'l [&'l str], command: &'static str, line: usize) -> Self {
        Arguments {
            tokens: tokens.iter().peekable(),
            command,
            line,
        }
    }

    fn token(&mut self, expected: &'static str) -> Result<&'l str, ScriptError> {
        match self.tokens.next() {
            Some(token) => Ok(*token),
            None => Err(ScriptError::MissingArgument {
                command: self.command,
                expected,
                line: self.line,
            }),
        }
    }

    fn number(&mut self, expected: &'static str) -> Result<f64, ScriptError> {
        let src = self.token(expected)?;
        match src.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.bad_number(src)),
        }
    }

    fn positive(&mut self, expected: &'static str) -> Result<f64, ScriptError> {
        let src = self.token(expected)?;
        match src.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            _ => Err(self.bad_number(src)),
        }
    }

    fn bad_number(&self, src: &str) -> ScriptError {
        ScriptError::Number {
            src: src.to_string(),
            line: self.line,
        }
    }

    fn address(&mut self) -> Result<Address, ScriptError> {
        Ok(address(self.number("east")?, self.number("north")?))
    }

    fn distance(&mut self) -> Result<Distance, ScriptError> {
        Ok(distance(self.number("east")?, self.number("north")?))
    }

    fn color(&mut self) -> Result<Color, ScriptError> {
        let src = self.token("color")?;
        let color = if src.starts_with('#') {
            src.parse::<Color>().ok()
        } else {
            palette::by_name(src)
        };

        color.ok_or_else(|| ScriptError::Color {
            src: src.to_string(),
            line: self.line,
        })
    }

    fn keyword(&mut self, keyword: &str) -> bool {
        if self.tokens.peek() == Some(&&keyword) {
            self.tokens.next();
            return true;
        }

        false
    }

    fn unexpected(&mut self) -> Option<ScriptError> {
        self.tokens.next().map(|src| ScriptError::UnexpectedArgument {
            src: src.to_string(),
            line: self.line,
        })
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        match self.unexpected() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn parse_line_declaration(args: &[&str], line: usize) -> Result<LineScript, ScriptError> {
    let mut args = Arguments::new(args, "line", line);
    let name = args.token("name")?.to_string();
    if !args.keyword("start") {
        return Err(args.unexpected().unwrap_or(ScriptError::MissingArgument {
            command: "line",
            expected: "start",
            line,
        }));
    }
    let start = args.address()?;

    let mut color = None;
    let mut thickness = None;
    loop {
        if args.keyword("color") {
            color = Some(args.color()?);
        } else if args.keyword("thickness") {
            thickness = Some(args.positive("thickness")?);
        } else {
            break;
        }
    }
    args.finish()?;

    Ok(LineScript {
        name,
        start,
        color,
        thickness,
        steps: Vec::new(),
    })
}

fn parse_command(command: &str, args: &[&str], line: usize) -> Result<Command, ScriptError> {
    let command = match command {
        "to" => {
            let mut args = Arguments::new(args, "to", line);
            let to = args.address()?;
            args.finish()?;
            Command::To(to)
        }
        "blocks" => {
            let mut args = Arguments::new(args, "blocks", line);
            let blocks = args.distance()?;
            args.finish()?;
            Command::Blocks(blocks)
        }
        "turn" => {
            let mut args = Arguments::new(args, "turn", line);
            let degrees = args.number("degrees")?;
            let radius = if args.keyword("radius") {
                Some(args.positive("radius")?)
            } else {
                None
            };
            args.finish()?;
            Command::Turn { degrees, radius }
        }
        "station" => {
            let mut args = Arguments::new(args, "station", line);
            let station = if args.keyword("at") {
                Command::StationAt(args.address()?)
            } else if args.keyword("east") {
                Command::StationIntersection(Street::east(args.number("east")?))
            } else if args.keyword("north") {
                Command::StationIntersection(Street::north(args.number("north")?))
            } else {
                Command::Station(args.distance()?)
            };
            args.finish()?;
            station
        }
        other => {
            return Err(ScriptError::Command {
                command: other.to_string(),
                line,
            });
        }
    };

    Ok(command)
}

#[cfg(test)]
use crate::geom::MapBounds;

#[test]
fn parse_script() {
    let script = MapScript::parse(
        "
        # The pink line, leaving the Loop.
        line pink start -200 200 color #e27ea6 thickness 12.5 # comment
        blocks -2000 0
        station east -1600
        turn -90 radius 150
        to -2400 -2400
        station 0 0
        station at -2400 -1200
        station north -1200

        line green start -200 400 color green
        blocks 2700 0
        turn 90
        ",
    )
    .unwrap();

    let lines = script.lines();
    assert_eq!(lines.len(), 2);

    let pink = &lines[0];
    assert_eq!(pink.name, "pink");
    assert_eq!(pink.start, address(-200.0, 200.0));
    assert_eq!(pink.color, Some(palette::PINK));
    assert_eq!(pink.thickness, Some(12.5));
    let commands: Vec<Command> = pink.steps.iter().map(|s| s.command).collect();
    assert_eq!(
        commands,
        vec![
            Command::Blocks(distance(-2000.0, 0.0)),
            Command::StationIntersection(Street::east(-1600.0)),
            Command::Turn {
                degrees: -90.0,
                radius: Some(150.0)
            },
            Command::To(address(-2400.0, -2400.0)),
            Command::Station(distance(0.0, 0.0)),
            Command::StationAt(address(-2400.0, -1200.0)),
            Command::StationIntersection(Street::north(-1200.0)),
        ]
    );
    assert_eq!(pink.steps[0].line, 4);
    assert_eq!(pink.steps[6].line, 10);

    let green = &lines[1];
    assert_eq!(green.color, Some(palette::GREEN));
    assert_eq!(green.thickness, None);
    assert_eq!(
        green.steps[1].command,
        Command::Turn {
            degrees: 90.0,
            radius: None
        }
    );
}

#[test]
fn parse_errors() {
    let err = |src: &str| MapScript::parse(src).unwrap_err();

    assert_eq!(
        err("line a start 0 0\nblocks 1 x"),
        ScriptError::Number {
            src: "x".to_string(),
            line: 2
        }
    );
    assert_eq!(
        err("line a start 0 0\n\n\njump 1 2"),
        ScriptError::Command {
            command: "jump".to_string(),
            line: 4
        }
    );
    assert_eq!(
        err("line a start 0 0\nturn"),
        ScriptError::MissingArgument {
            command: "turn",
            expected: "degrees",
            line: 2
        }
    );
    assert_eq!(
        err("line a start 0 0\nto 1 2 3"),
        ScriptError::UnexpectedArgument {
            src: "3".to_string(),
            line: 2
        }
    );
    assert_eq!(
        err("# header\nblocks 1 2"),
        ScriptError::MissingLine {
            command: "blocks".to_string(),
            line: 2
        }
    );
    assert_eq!(
        err("line a start 0 0 color #12345"),
        ScriptError::Color {
            src: "#12345".to_string(),
            line: 1
        }
    );
    assert_eq!(
        err("line a start 0 0 color teal"),
        ScriptError::Color {
            src: "teal".to_string(),
            line: 1
        }
    );
    assert_eq!(
        err("line a 0 0"),
        ScriptError::UnexpectedArgument {
            src: "0".to_string(),
            line: 1
        }
    );
    assert_eq!(
        err("line a"),
        ScriptError::MissingArgument {
            command: "line",
            expected: "start",
            line: 1
        }
    );
    assert_eq!(
        err("line a start 0 0\nturn 90 radius -5"),
        ScriptError::Number {
            src: "-5".to_string(),
            line: 2
        }
    );
    assert_eq!(
        err("line a start 0 0\nblocks inf 0"),
        ScriptError::Number {
            src: "inf".to_string(),
            line: 2
        }
    );
    assert_eq!(err("line a start 0 0\nstation east").line(), 2);
}

#[test]
fn draw_script() {
    let transform = CoordinateTransform::new(&MapBounds::default()).unwrap();
    let script = MapScript::parse(
        "line pink start -200 200 color pink thickness 10
        blocks -2000 0
        station east -1600
        turn -90
        blocks 0 -2400

        line plain start 0 0",
    )
    .unwrap();

    let drawings = script.draw(transform, &LineStyle::default()).unwrap();
    assert_eq!(drawings.len(), 2);

    let pink = &drawings[0];
    assert_eq!(pink.name, "pink");
    assert_eq!(pink.drawing.segments.len(), 3);
    assert_eq!(pink.drawing.stations.len(), 1);
    for cmd in &pink.drawing.segments {
        assert_eq!(cmd.stroke.color, palette::PINK);
        assert_eq!(cmd.stroke.thickness, 10.0);
    }
    assert_eq!(pink.drawing.stations[0].stroke.color, Color::BLACK);

    assert_eq!(drawings[1].name, "plain");
    assert!(drawings[1].drawing.is_empty());
}

#[test]
fn draw_errors_report_the_line() {
    let transform = CoordinateTransform::new(&MapBounds::default()).unwrap();
    let script = MapScript::parse(
        "line ok start 0 0
        blocks 100 0
        line broken start 0 0
        station at 10 10
        turn 45",
    )
    .unwrap();

    match script.draw(transform, &LineStyle::default()) {
        Err(ScriptError::Draw { name, line, source }) => {
            assert_eq!(name, "broken");
            assert_eq!(line, 5);
            assert!(source.is_invalid_state());
        }
        other => panic!("{:?}", other),
    }

    let script = MapScript::parse("line a start 0 0\nblocks 0 100\nstation east 50").unwrap();
    let err = script
        .draw(transform, &LineStyle::default())
        .unwrap_err();
    assert_eq!(err.line(), 3);
    match err {
        ScriptError::Draw { source, .. } => assert!(source.is_degenerate_geometry()),
        other => panic!("{:?}", other),
    }
}

#[test]
fn empty_script() {
    let script = MapScript::parse("\n  # nothing to see\n\n").unwrap();
    assert!(script.is_empty());
    let transform = CoordinateTransform::new(&MapBounds::default()).unwrap();
    assert!(script
        .draw(transform, &LineStyle::default())
        .unwrap()
        .is_empty());
}
