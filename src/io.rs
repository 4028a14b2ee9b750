//! Problem files in, result files out.
//!
//! Problem files hold one problem per line (see [`Problem::parse_line`]).
//! Blank lines are skipped; any other malformed line fails the whole load.
//! Result files are written atomically: the content goes to a sibling
//! `.tmp` file that is renamed over the destination once complete.

use crate::error::{KnapsackError, Result};
use crate::problem::Problem;
use crate::record::SolveRecord;
use crate::report::render_csv;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Reads problems from any buffered reader. `origin` names the source in
/// I/O errors.
pub fn read_problems<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<Problem>> {
    let mut problems = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| KnapsackError::io(origin, e))?;
        if line.trim().is_empty() {
            continue;
        }
        problems.push(Problem::parse_line(&line, i + 1)?);
    }
    Ok(problems)
}

/// Parses problems from an in-memory string.
///
/// ```
/// let problems = u_knapsack::io::parse_problems("1,2,3,4,5\n\n5,0\n").unwrap();
/// assert_eq!(problems.len(), 2);
/// assert_eq!(problems[0].target(), 5);
/// ```
pub fn parse_problems(text: &str) -> Result<Vec<Problem>> {
    read_problems(text.as_bytes(), Path::new("<memory>"))
}

/// Loads every problem in the file at `path`.
pub fn load_problems(path: impl AsRef<Path>) -> Result<Vec<Problem>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| KnapsackError::io(path, e))?;
    read_problems(BufReader::new(file), path)
}

/// Writes problems in the input line format, atomically.
pub fn write_problems(path: impl AsRef<Path>, problems: &[Problem]) -> Result<()> {
    let mut text = String::new();
    for p in problems {
        text.push_str(&p.to_line());
        text.push('\n');
    }
    write_atomic(path.as_ref(), text.as_bytes())
}

/// Writes bare weight vectors, one comma-delimited line each, atomically.
pub fn write_vectors(path: impl AsRef<Path>, vectors: &[Vec<i64>]) -> Result<()> {
    let mut text = String::new();
    for v in vectors {
        let line: Vec<String> = v.iter().map(i64::to_string).collect();
        text.push_str(&line.join(","));
        text.push('\n');
    }
    write_atomic(path.as_ref(), text.as_bytes())
}

/// Writes a result table with its mode header, atomically.
///
/// An empty table still produces a header-only file.
pub fn write_results<T: SolveRecord>(path: impl AsRef<Path>, records: &[T]) -> Result<()> {
    write_atomic(path.as_ref(), render_csv(records).as_bytes())
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    let written = File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(content)?;
            f.sync_all()
        })
        .map_err(|e| KnapsackError::io(&tmp, e));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        KnapsackError::io(path, e)
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ExactResult;
    use std::time::Duration;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("u-knapsack-io-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let ps = parse_problems("\n 1, 2 ,3\n   \n7,8\n").unwrap();
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].weights(), &[1, 2]);
        assert_eq!(ps[1].target(), 8);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse_problems("1,2\n3,x\n").unwrap_err();
        match err {
            KnapsackError::Parse { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_value_line_is_degenerate() {
        assert!(matches!(
            parse_problems("1,2\n5\n"),
            Err(KnapsackError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_problems(scratch("does-not-exist.csv")).unwrap_err();
        assert!(matches!(err, KnapsackError::Io { .. }));
    }

    #[test]
    fn test_problem_file_round_trip() {
        let path = scratch("problems.csv");
        let ps = parse_problems("1,2,3\n-4,5,6,7\n").unwrap();
        write_problems(&path, &ps).unwrap();
        assert_eq!(load_problems(&path).unwrap(), ps);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_results_leaves_no_tmp() {
        let path = scratch("results.csv");
        let rows = [ExactResult {
            problem_number: 1,
            first_solution_time: None,
            all_solutions_time: Duration::from_millis(1),
            solutions_count: 0,
        }];
        write_results(&path, &rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(ExactResult::CSV_HEADER));
        assert!(text.contains("1,N/A,0.001000,0"));
        assert!(!tmp_path(&path).exists());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_into_missing_dir_fails_cleanly() {
        let path = scratch("no-such-dir").join("out.csv");
        assert!(write_results::<ExactResult>(&path, &[]).is_err());
        assert!(!path.exists());
    }
}
