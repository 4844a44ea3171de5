//! pmm - Pascal-- front end
//!
//! Usage: `pmm <file> [-s] [-p]`
//!
//! `-s` prints the token stream, `-p` prints the AST dump. With both flags
//! the scan runs first.

mod compiler;

use std::path::Path;
use std::process;

use compiler::Compiler;

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    path: String,
    scan: bool,
    parse: bool,
}

impl Options {
    /// Parse arguments, program name excluded
    fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut args = args.into_iter();
        let path = args.next().ok_or("Need to set a path to file")?;
        let mut options = Options {
            path,
            scan: false,
            parse: false,
        };

        for arg in args {
            match arg.as_str() {
                "-s" => options.scan = true,
                "-p" => options.parse = true,
                _ => return Err(format!("Unknown argument: {}", arg)),
            }
        }

        if !options.scan && !options.parse {
            return Err("Nothing to do: pass -s and/or -p".to_string());
        }
        Ok(options)
    }
}

fn print_usage() {
    eprintln!(
        r#"Usage: pmm <file> [-s] [-p]

Options:
    -s    Print the tokens of <file>, one per line
    -p    Parse <file> as a program and print its AST
"#
    );
}

fn run(options: &Options) -> Result<(), String> {
    println!("{}", options.path);
    if !Path::new(&options.path).is_file() {
        return Err("File doesn't exist".to_string());
    }

    let compiler = Compiler::new(Some(options.path.clone()));
    if options.scan {
        compiler.scan_file(&options.path)?;
    }
    if options.parse {
        compiler.parse_file(&options.path)?;
    }
    Ok(())
}

fn main() {
    let options = match Options::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_options_flags() {
        let options = Options::from_args(args(&["prog.pas", "-p", "-s"])).unwrap();
        assert_eq!(
            options,
            Options {
                path: "prog.pas".to_string(),
                scan: true,
                parse: true,
            }
        );
        let options = Options::from_args(args(&["prog.pas", "-s"])).unwrap();
        assert!(options.scan && !options.parse);
    }

    #[test]
    fn test_options_errors() {
        assert_eq!(
            Options::from_args(args(&[])).unwrap_err(),
            "Need to set a path to file"
        );
        assert!(Options::from_args(args(&["prog.pas"])).is_err());
        assert_eq!(
            Options::from_args(args(&["prog.pas", "-x"])).unwrap_err(),
            "Unknown argument: -x"
        );
    }

    #[test]
    fn test_run_rejects_missing_file() {
        let options = Options::from_args(args(&["/nonexistent/prog.pas", "-s"])).unwrap();
        assert_eq!(run(&options).unwrap_err(), "File doesn't exist");
    }
}
