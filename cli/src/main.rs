#[macro_use]
extern crate clap;
extern crate transit_map;

mod commands;
mod inspect;
mod render;

use clap::*;
use commands::*;
use log::error;

use std::fs::{self, File};
use std::io::{stdout, Write};
use std::process;
use std::result::Result;

use transit_map::extra::chicago_loop;
use transit_map::geom::MapBounds;
use transit_map::path::LineStyle;

fn map_args(cmd: App<'static, 'static>) -> App<'static, 'static> {
    cmd.arg(
        Arg::with_name("SCRIPT")
            .value_name("SCRIPT")
            .help("A map script file (the Chicago Loop by default)")
            .takes_value(true)
            .required(false),
    )
    .arg(
        Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false),
    )
    .arg(number_arg("WIDTH", "width", "Image width in pixels", "1000"))
    .arg(number_arg("HEIGHT", "height", "Image height in pixels", "2000"))
    .arg(number_arg(
        "MAX_WEST",
        "max-west",
        "Westmost address shown, in blocks",
        "8000",
    ))
    .arg(number_arg(
        "MAX_EAST",
        "max-east",
        "Eastmost address shown, in blocks",
        "400",
    ))
    .arg(number_arg(
        "MAX_NORTH",
        "max-north",
        "Northmost address shown, in blocks",
        "10800",
    ))
    .arg(number_arg(
        "MAX_SOUTH",
        "max-south",
        "Southmost address shown, in blocks",
        "10000",
    ))
    .arg(number_arg(
        "TURN_RADIUS",
        "turn-radius",
        "Default turn radius in blocks",
        "200",
    ))
    .arg(number_arg(
        "STATION_RADIUS",
        "station-radius",
        "Station marker radius in pixels",
        "8",
    ))
    .arg(number_arg(
        "THICKNESS",
        "thickness",
        "Line thickness in pixels",
        "20",
    ))
}

fn number_arg(
    name: &'static str,
    long: &'static str,
    help: &'static str,
    default: &'static str,
) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(long)
        .help(help)
        .value_name("NUMBER")
        .takes_value(true)
        .default_value(default)
}

fn get_number(matches: &ArgMatches, name: &str) -> f64 {
    value_t!(matches, name, f64).unwrap_or_else(|e| e.exit())
}

fn get_positive(
    matches: &ArgMatches,
    name: &'static str,
    long: &'static str,
) -> Result<f64, CliError> {
    check_positive(long, get_number(matches, name))
}

fn check_positive(long: &'static str, value: f64) -> Result<f64, CliError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(CliError::Option { name: long, value });
    }

    Ok(value)
}

fn map_cmd(matches: &ArgMatches) -> Result<MapCmd, CliError> {
    let script = match matches.value_of("SCRIPT") {
        Some(path) => fs::read_to_string(path)?,
        None => chicago_loop::SCRIPT.to_string(),
    };

    let bounds = MapBounds {
        width: get_number(matches, "WIDTH"),
        height: get_number(matches, "HEIGHT"),
        max_west: get_number(matches, "MAX_WEST"),
        max_east: get_number(matches, "MAX_EAST"),
        max_north: get_number(matches, "MAX_NORTH"),
        max_south: get_number(matches, "MAX_SOUTH"),
    };

    let style = LineStyle {
        stroke_thickness: get_positive(matches, "THICKNESS", "thickness")?,
        station_radius: get_positive(matches, "STATION_RADIUS", "station-radius")?,
        default_turn_radius: get_positive(matches, "TURN_RADIUS", "turn-radius")?,
        ..LineStyle::DEFAULT
    };

    Ok(MapCmd {
        script,
        bounds,
        style,
    })
}

fn output(matches: &ArgMatches) -> Result<Box<dyn Write>, CliError> {
    Ok(match matches.value_of("OUTPUT") {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(stdout()),
    })
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        ("render", Some(render_matches)) => {
            let cmd = map_cmd(render_matches)?;
            render::render(&cmd, &mut *output(render_matches)?)
        }
        ("inspect", Some(inspect_matches)) => {
            let cmd = map_cmd(inspect_matches)?;
            inspect::inspect(&cmd, &mut *output(inspect_matches)?)
        }
        _ => Ok(()),
    }
}

fn main() {
    env_logger::init();

    let matches = App::new("Transit map command-line interface")
        .version("0.1")
        .about("Draws schematic transit maps from street addresses")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(map_args(
            SubCommand::with_name("render").about("Renders a map script to SVG"),
        ))
        .subcommand(map_args(
            SubCommand::with_name("inspect")
                .about("Prints the path data of every line of a map script"),
        ))
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        process::exit(1);
    }
}

#[test]
fn positive_options() {
    assert_eq!(check_positive("thickness", 20.0).unwrap(), 20.0);
    for &value in &[0.0, -8.0, f64::INFINITY, f64::NAN] {
        match check_positive("station-radius", value) {
            Err(CliError::Option { name, .. }) => assert_eq!(name, "station-radius"),
            other => panic!("{:?}", other),
        }
    }
}
