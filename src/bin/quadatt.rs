extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate quadattract;

use clap::{App, Arg, ArgMatches};
use failure::{err_msg, Error};
use image::png::PNGEncoder;
use image::ColorType;
use quadattract::params;
use quadattract::{AttractorParams, CanvasSurface, Orchestrator, ParameterSet, ProgressSink, Surface};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const INDEX: &str = "index";
const EXPONENT: &str = "exponent";
const PARAMS: &str = "params";
const RANDOM: &str = "random";
const LIST: &str = "list";

fn args<'a>() -> ArgMatches<'a> {
    App::new("quadatt")
        .version("0.1.0")
        .about("Quadratic-map strange attractor renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required_unless(LIST)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of the display surface; the plot keeps a 4:3 ratio inside it"),
        )
        .arg(
            Arg::with_name(INDEX)
                .required(false)
                .long(INDEX)
                .short("i")
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        usize::max_value(),
                        "Could not parse attractor index",
                        "Attractor index out of range",
                    )
                })
                .help("Which attractor in the parameter set to render"),
        )
        .arg(
            Arg::with_name(EXPONENT)
                .required(false)
                .long(EXPONENT)
                .short("e")
                .takes_value(true)
                .default_value("6")
                .validator(|s| {
                    validate_range(
                        &s,
                        1u32,
                        9,
                        "Could not parse the iteration exponent",
                        "Iteration exponent must be between 1 and 9",
                    )
                })
                .help("Iterate the map 10^EXPONENT times"),
        )
        .arg(
            Arg::with_name(PARAMS)
                .required(false)
                .long(PARAMS)
                .short("p")
                .takes_value(true)
                .help("Parameter file, one attractor per line (x0 y0 a0..a11); defaults to the built-in set"),
        )
        .arg(
            Arg::with_name(RANDOM)
                .required(false)
                .long(RANDOM)
                .short("r")
                .help("Ignore the parameter set and search for a random bounded attractor"),
        )
        .arg(
            Arg::with_name(LIST)
                .required(false)
                .long(LIST)
                .short("l")
                .help("List the loaded attractors and exit"),
        )
        .get_matches()
}

/// Prints the status line in place on stderr, terminal-spinner style.
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn update(&mut self, _fraction: f64, status: &str) {
        eprint!("\r{}                ", status);
        let _ = io::stderr().flush();
    }
}

fn load_params(matches: &ArgMatches) -> Result<ParameterSet, Error> {
    match matches.value_of(PARAMS) {
        Some(path) => Ok(ParameterSet::from_reader(File::open(path)?)?),
        None => Ok(ParameterSet::builtin()),
    }
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), Error> {
    let output = File::create(Path::new(outfile))?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGBA(8))?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let set = load_params(matches)?;

    if matches.is_present(LIST) {
        for index in 0..set.len() {
            let params = set.get(index)?;
            println!(
                "Attractor {}: start ({}, {}), coefficients {:?}",
                index, params.start.x, params.start.y, params.coefficients.0
            );
        }
        return Ok(());
    }

    let (width, height) = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .ok_or_else(|| err_msg("Error parsing image dimensions"))?;
    let exponent = u32::from_str(matches.value_of(EXPONENT).unwrap())?;
    let iterations = 10u64.pow(exponent);

    let chosen: AttractorParams;
    let params = if matches.is_present(RANDOM) {
        chosen = params::find_bounded(10_000)
            .ok_or_else(|| err_msg("No bounded attractor found within the attempt budget"))?;
        eprintln!("Found a bounded attractor: {:?}", chosen.coefficients.0);
        &chosen
    } else {
        let index = usize::from_str(matches.value_of(INDEX).unwrap())?;
        set.get(index)?
    };

    let mut orchestrator = Orchestrator::new(CanvasSurface::new(width, height), ConsoleProgress);
    orchestrator.render(params, iterations)?;
    eprintln!();

    let surface = orchestrator.into_surface();
    let dimensions = surface.dimensions();
    write_image(matches.value_of(OUTPUT).unwrap(), surface.pixels(), dimensions)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
