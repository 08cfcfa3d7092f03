//! Parsers for the model artifacts.
//!
//! - movies.dat: index::movieId::title
//! - similarity.json: {"dimension": N, "scores": [[...], ...]}

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Open a file, turning "not found" into a `FileNotFound` that names the path
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.dat file
///
/// Format: index::movieId::title
///
/// The title is everything after the second separator, so titles that
/// themselves contain "::" survive intact.
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let content = std::io::read_to_string(open(path)?)?;
    parse_movie_lines(&content, &file_label(path))
}

/// Parse movie table content that is already in memory
pub fn parse_movie_lines(content: &str, file: &str) -> Result<Vec<MovieRecord>> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.splitn(3, "::");

        let index = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing index".to_string(),
        })?;

        let movie_id = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing movieId".to_string(),
        })?;

        let title = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: "Missing title".to_string(),
        })?;

        let record = MovieRecord {
            index: index.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid index: {}", e),
            })?,
            movie: Movie {
                id: movie_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("Invalid movieId: {}", e),
                })?,
                title: title.trim().to_string(),
            },
        };

        records.push(record);
    }

    Ok(records)
}

/// Parse the similarity.json file into a row-major matrix
pub fn parse_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let reader = BufReader::new(open(path)?);
    let file: MatrixFile =
        serde_json::from_reader(reader).map_err(|source| DataLoadError::MatrixFormat {
            file: file_label(path),
            source,
        })?;
    matrix_from_rows(file.dimension, file.scores)
}

/// Flatten nested rows into a `SimilarityMatrix`, checking shape and values
pub fn matrix_from_rows(dimension: usize, rows: Vec<Vec<f32>>) -> Result<SimilarityMatrix> {
    if rows.len() != dimension {
        return Err(DataLoadError::ValidationError(format!(
            "matrix declares dimension {} but has {} rows",
            dimension,
            rows.len()
        )));
    }

    let mut scores = Vec::with_capacity(dimension * dimension);
    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.len() != dimension {
            return Err(DataLoadError::RowLengthMismatch {
                row: row_idx,
                expected: dimension,
                found: row.len(),
            });
        }
        if let Some(col) = row.iter().position(|s| !s.is_finite()) {
            return Err(DataLoadError::InvalidValue {
                field: format!("similarity[{}][{}]", row_idx, col),
                value: row[col].to_string(),
            });
        }
        scores.extend(row);
    }

    Ok(SimilarityMatrix { dimension, scores })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_lines() {
        let content = "0::1::Toy Story (1995)\n\n1::2::Jumanji (1995)\n";
        let records = parse_movie_lines(content, "movies.dat").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].movie, Movie::new(1, "Toy Story (1995)"));
        assert_eq!(records[1].index, 1);
        assert_eq!(records[1].movie.id, 2);
    }

    #[test]
    fn test_title_keeps_separator() {
        let records = parse_movie_lines("0::7::Star Wars::Special Edition", "movies.dat").unwrap();
        assert_eq!(records[0].movie.title, "Star Wars::Special Edition");
    }

    #[test]
    fn test_missing_title_reports_line() {
        let err = parse_movie_lines("0::1::A\n1::2", "movies.dat").unwrap_err();
        match err {
            DataLoadError::ParseError { line, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(reason, "Missing title");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_movie_id() {
        let err = parse_movie_lines("0::abc::Title", "movies.dat").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_matrix_from_rows() {
        let matrix = matrix_from_rows(2, vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(matrix.dimension(), 2);
        assert_eq!(matrix.row(1), Some(&[0.5, 1.0][..]));
        assert_eq!(matrix.get(0, 1), Some(0.5));
        assert!(matrix.row(2).is_none());
    }

    #[test]
    fn test_matrix_rejects_ragged_rows() {
        let err = matrix_from_rows(2, vec![vec![1.0, 0.5], vec![0.5]]).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::RowLengthMismatch { row: 1, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_matrix_rejects_non_finite() {
        let err = matrix_from_rows(2, vec![vec![1.0, f32::NAN], vec![0.5, 1.0]]).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_matrix_rejects_wrong_row_count() {
        let err = matrix_from_rows(3, vec![vec![1.0, 0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movies(Path::new("/definitely/not/here/movies.dat")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
