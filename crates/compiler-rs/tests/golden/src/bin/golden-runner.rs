//! Golden Runner
//!
//! Runs the scanner or parser over every `*.in` fixture in a directory and
//! compares the dump against the matching `*.out` file.

use std::path::PathBuf;
use std::process;

use golden::{run_directory, Mode, Outcome};

struct Args {
    dir: PathBuf,
    mode: Mode,
    bless: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let summary = run_directory(&args.dir, args.mode, args.bless, |case, outcome| {
        println!("{}", case.input.display());
        match outcome {
            Outcome::Passed => {}
            Outcome::Written => println!("written {}", case.expected.display()),
            Outcome::Failed(mismatch) => {
                println!("Failed Test");
                println!("{}", mismatch);
            }
        }
    })?;

    println!("{}", summary);
    if summary.failed > 0 {
        process::exit(1);
    }
    Ok(())
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let mut dir = None;
    let mut mode = Mode::Scan;
    let mut bless = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dir" => {
                dir = args.next().map(PathBuf::from);
            }
            "--mode" => {
                mode = args.next().unwrap_or_default().parse()?;
            }
            "--bless" => bless = true,
            _ => {
                eprintln!("Unknown argument: {}", arg);
                print_usage();
                process::exit(1);
            }
        }
    }

    let Some(dir) = dir else {
        print_usage();
        process::exit(1);
    };

    Ok(Args { dir, mode, bless })
}

fn print_usage() {
    println!(
        r#"Usage: golden-runner --dir DIR [OPTIONS]

Options:
    --dir DIR         Directory containing <name>.in / <name>.out pairs
    --mode MODE       'scan' (token dump, default) or 'parse' (AST dump)
    --bless           Rewrite every .out file from the current output
"#
    );
}
