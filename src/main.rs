// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate mandelbands;

use clap::{App, Arg, ArgMatches};
use mandelbands::harness;
use mandelbands::Config;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
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

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const WORKERS: &str = "workers";
const XRANGE: &str = "xrange";
const YRANGE: &str = "yrange";
const SIDE_SIZE: &str = "side-size";
const STEPS: &str = "steps";
const REPS: &str = "reps";
const SAVE_DIR: &str = "save-dir";
const COMPUTATION_TIME: &str = "computation-time";
const DRAW_FRACTALS: &str = "draw-fractals";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbands")
        .version("0.1.0")
        .about("Banded parallel Mandelbrot renderer and benchmark")
        .arg(
            Arg::with_name(WORKERS)
                .required(false)
                .long(WORKERS)
                .short("w")
                .takes_value(true)
                .default_value("0")
                .validator(|s| validate_number::<usize>(&s, "Could not parse worker count"))
                .help("Number of workers; 0 picks one per available core"),
        )
        .arg(
            Arg::with_name(XRANGE)
                .required(false)
                .long(XRANGE)
                .short("x")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,1")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse x range"))
                .help("Minimum and maximum x values, comma separated"),
        )
        .arg(
            Arg::with_name(YRANGE)
                .required(false)
                .long(YRANGE)
                .short("y")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-1.5,1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse y range"))
                .help("Minimum and maximum y values, comma separated"),
        )
        .arg(
            Arg::with_name(SIDE_SIZE)
                .required(false)
                .long(SIDE_SIZE)
                .short("s")
                .takes_value(true)
                .multiple(true)
                .default_value("512")
                .validator(|s| validate_number::<usize>(&s, "Could not parse side size"))
                .help("Pixels on each side; pass more than one to sweep resolutions"),
        )
        .arg(
            Arg::with_name(STEPS)
                .required(false)
                .long(STEPS)
                .short("i")
                .takes_value(true)
                .default_value("200")
                .validator(|s| match u32::from_str(&s) {
                    Ok(n) if n >= 1 => Ok(()),
                    Ok(_) => Err("Step count must be at least 1".to_string()),
                    Err(_) => Err("Could not parse step count".to_string()),
                })
                .help("Iteration budget per sample"),
        )
        .arg(
            Arg::with_name(REPS)
                .required(false)
                .long(REPS)
                .short("r")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_number::<usize>(&s, "Could not parse repetition count"))
                .help("Repetitions of each side size"),
        )
        .arg(
            Arg::with_name(SAVE_DIR)
                .required(false)
                .long(SAVE_DIR)
                .short("o")
                .takes_value(true)
                .default_value("outputs")
                .help("Directory where results are saved"),
        )
        .arg(
            Arg::with_name(COMPUTATION_TIME)
                .required(false)
                .long(COMPUTATION_TIME)
                .takes_value(false)
                .help("Save computation times as CSV"),
        )
        .arg(
            Arg::with_name(DRAW_FRACTALS)
                .required(false)
                .long(DRAW_FRACTALS)
                .takes_value(false)
                .help("Draw the fractals and save them in the save directory"),
        )
        .get_matches()
}

fn main() {
    let matches = args();

    let workers = harness::resolve_workers(
        usize::from_str(matches.value_of(WORKERS).unwrap()).expect("Could not parse worker count"),
    );
    let xrange =
        parse_pair::<f64>(matches.value_of(XRANGE).unwrap(), ',').expect("Error parsing x range");
    let yrange =
        parse_pair::<f64>(matches.value_of(YRANGE).unwrap(), ',').expect("Error parsing y range");
    let side_sizes: Vec<usize> = matches
        .values_of(SIDE_SIZE)
        .unwrap()
        .map(|s| usize::from_str(s).expect("Could not parse side size"))
        .collect();
    let steps = u32::from_str(matches.value_of(STEPS).unwrap()).expect("Could not parse step count");
    let reps = usize::from_str(matches.value_of(REPS).unwrap())
        .expect("Could not parse repetition count");

    let config = Config {
        workers,
        xrange,
        yrange,
        side_sizes,
        steps,
        reps,
    };

    let draw = matches.is_present(DRAW_FRACTALS);
    let log_times = matches.is_present(COMPUTATION_TIME);

    // One directory per invocation, like the timestamped directories
    // the timing logs are usually compared across.
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock is set before the epoch")
        .as_secs();
    let run_dir = PathBuf::from(matches.value_of(SAVE_DIR).unwrap()).join(format!("run-{}", stamp));
    if draw || log_times {
        if let Err(e) = fs::create_dir_all(&run_dir) {
            eprintln!("Could not create {}: {}", run_dir.display(), e);
            std::process::exit(1);
        }
    }

    println!("Used workers: {}", workers);

    let save_dir = if draw { Some(run_dir.as_path()) } else { None };
    match harness::run(&config, save_dir) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(timings) => {
            if log_times {
                let path = run_dir.join(harness::timing_file_name(workers));
                if let Err(e) = harness::write_timings(&path, &timings) {
                    eprintln!("Could not write timing log: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
