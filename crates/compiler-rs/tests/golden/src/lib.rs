//! Golden-file regression runner
//!
//! Every `<name>.in` in a fixture directory is scanned or parsed and its
//! textual dump is compared line by line against `<name>.out`. A missing
//! `.out` file is written from the current output instead.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lexer::Scanner;
use thiserror::Error;

/// Errors that can occur while running golden cases
#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown mode '{0}', expected 'scan' or 'parse'")]
    UnknownMode(String),
}

pub type GoldenResult<T> = Result<T, GoldenError>;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> GoldenError + '_ {
    move |source| GoldenError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Which dump a fixture directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One token per line, Eof included
    Scan,
    /// AST dump of a whole program
    Parse,
}

impl FromStr for Mode {
    type Err = GoldenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scan" => Ok(Mode::Scan),
            "parse" => Ok(Mode::Parse),
            _ => Err(GoldenError::UnknownMode(s.to_string())),
        }
    }
}

/// A single `.in` / `.out` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenCase {
    pub name: String,
    pub input: PathBuf,
    pub expected: PathBuf,
}

/// Find every `*.in` file in `dir`, sorted by name
pub fn discover_cases<P: AsRef<Path>>(dir: P) -> GoldenResult<Vec<GoldenCase>> {
    let dir = dir.as_ref();
    let mut cases = Vec::new();

    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("in") {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            cases.push(GoldenCase {
                name,
                expected: path.with_extension("out"),
                input: path,
            });
        }
    }

    cases.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(cases)
}

/// Token lines up to and including Eof, or up to the error that stopped the scan
pub fn render_scan(source: &str) -> Vec<String> {
    let mut scanner = Scanner::new(source);
    let mut lines = Vec::new();
    loop {
        match scanner.next_token() {
            Ok(token) => {
                lines.push(token.to_string());
                if token.is_eof() {
                    return lines;
                }
            }
            Err(e) => {
                lines.push(e.to_string());
                return lines;
            }
        }
    }
}

/// AST dump lines, or the single error line
pub fn render_parse(source: &str) -> Vec<String> {
    match parser::parse_source(source) {
        Ok(ast) => ast.dump().lines().map(str::to_string).collect(),
        Err(e) => vec![e.to_string()],
    }
}

pub fn render(mode: Mode, source: &str) -> Vec<String> {
    match mode {
        Mode::Scan => render_scan(source),
        Mode::Parse => render_parse(source),
    }
}

/// First line where expected and actual output disagree (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "line {}", self.line)?;
        writeln!(f, "Out File: {}", self.expected.as_deref().unwrap_or("<missing>"))?;
        write!(f, "Actual:   {}", self.actual.as_deref().unwrap_or("<missing>"))
    }
}

/// Compare line by line; `None` when identical
pub fn compare(expected: &str, actual: &[String]) -> Option<Mismatch> {
    let expected: Vec<&str> = expected.lines().collect();
    let len = expected.len().max(actual.len());
    (0..len).find_map(|i| {
        let want = expected.get(i).copied();
        let got = actual.get(i).map(String::as_str);
        (want != got).then(|| Mismatch {
            line: i + 1,
            expected: want.map(str::to_string),
            actual: got.map(str::to_string),
        })
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// `.out` was missing or blessed, and has been written
    Written,
    Failed(Mismatch),
}

/// Run one case; writes the `.out` file when missing or when `bless` is set
pub fn run_case(case: &GoldenCase, mode: Mode, bless: bool) -> GoldenResult<Outcome> {
    let source = fs::read_to_string(&case.input).map_err(io_error(&case.input))?;
    let actual = render(mode, &source);

    if bless || !case.expected.exists() {
        let mut text = actual.join("\n");
        text.push('\n');
        fs::write(&case.expected, text).map_err(io_error(&case.expected))?;
        return Ok(Outcome::Written);
    }

    let expected = fs::read_to_string(&case.expected).map_err(io_error(&case.expected))?;
    Ok(match compare(&expected, &actual) {
        Some(mismatch) => Outcome::Failed(mismatch),
        None => Outcome::Passed,
    })
}

/// Totals over a directory; written cases are not counted as tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub tests: usize,
    pub failed: usize,
    pub written: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tests: {}, Failed: {}", self.tests, self.failed)
    }
}

/// Run every case in `dir`, reporting each outcome through `report`
pub fn run_directory<P, F>(dir: P, mode: Mode, bless: bool, mut report: F) -> GoldenResult<Summary>
where
    P: AsRef<Path>,
    F: FnMut(&GoldenCase, &Outcome),
{
    let mut summary = Summary::default();
    for case in discover_cases(dir)? {
        let outcome = run_case(&case, mode, bless)?;
        match outcome {
            Outcome::Passed => summary.tests += 1,
            Outcome::Failed(_) => {
                summary.tests += 1;
                summary.failed += 1;
            }
            Outcome::Written => summary.written += 1,
        }
        report(&case, &outcome);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures(kind: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(kind)
    }

    fn check_fixtures(kind: &str, mode: Mode) {
        let dir = fixtures(kind);
        let cases = discover_cases(&dir).unwrap();
        assert!(!cases.is_empty(), "no fixtures in {}", dir.display());
        for case in &cases {
            assert!(case.expected.exists(), "missing {}", case.expected.display());
        }

        let mut failures = Vec::new();
        let summary = run_directory(&dir, mode, false, |case, outcome| {
            if let Outcome::Failed(mismatch) = outcome {
                failures.push(format!("{}: {}", case.name, mismatch));
            }
        })
        .unwrap();
        assert!(failures.is_empty(), "golden failures:\n{}", failures.join("\n"));
        assert_eq!(summary.tests, cases.len());
        assert_eq!(summary.written, 0);
    }

    #[test]
    fn test_lexer_fixtures() {
        check_fixtures("lexer", Mode::Scan);
    }

    #[test]
    fn test_parser_fixtures() {
        check_fixtures("parser", Mode::Parse);
    }

    #[test]
    fn test_render_scan_includes_eof() {
        assert_eq!(render_scan("x"), vec!["1\t1\tIdentifier\tx\tx", "1\t2\tEof\t\t"]);
    }

    #[test]
    fn test_render_scan_stops_at_error() {
        assert_eq!(render_scan("a {"), vec!["1\t1\tIdentifier\ta\ta", "(1, 3) unterminated comment"]);
    }

    #[test]
    fn test_render_parse_error_line() {
        assert_eq!(render_parse("begin end"), vec!["(1, 10) expected '.', found end of file"]);
    }

    #[test]
    fn test_compare() {
        let actual = vec!["a".to_string(), "b".to_string()];
        assert_eq!(compare("a\nb\n", &actual), None);
        assert_eq!(
            compare("a\nc\n", &actual),
            Some(Mismatch {
                line: 2,
                expected: Some("c".to_string()),
                actual: Some("b".to_string()),
            })
        );
        assert_eq!(
            compare("a\n", &actual),
            Some(Mismatch {
                line: 2,
                expected: None,
                actual: Some("b".to_string()),
            })
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("scan".parse::<Mode>().unwrap(), Mode::Scan);
        assert_eq!("parse".parse::<Mode>().unwrap(), Mode::Parse);
        assert!(matches!("lex".parse::<Mode>(), Err(GoldenError::UnknownMode(_))));
    }

    #[test]
    fn test_missing_output_is_written_then_checked() {
        let dir = std::env::temp_dir().join(format!("golden-runner-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("one.in"), "begin end.").unwrap();

        let summary = run_directory(&dir, Mode::Parse, false, |_, _| {}).unwrap();
        assert_eq!(summary, Summary { tests: 0, failed: 0, written: 1 });
        assert_eq!(fs::read_to_string(dir.join("one.out")).unwrap(), "program\n   begin\n");

        let summary = run_directory(&dir, Mode::Parse, false, |_, _| {}).unwrap();
        assert_eq!(summary.to_string(), "Tests: 1, Failed: 0");

        fs::write(dir.join("one.out"), "program\n").unwrap();
        let summary = run_directory(&dir, Mode::Parse, false, |_, _| {}).unwrap();
        assert_eq!(summary.failed, 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
