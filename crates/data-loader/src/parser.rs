//! Parsers for the model artifacts.
//!
//! - movie_list.dat: movieId::title
//! - similarity.dat: one matrix row per line, whitespace-separated scores
//!
//! Each parser has a `_str` variant that works on in-memory content so the
//! row handling can be exercised without touching the filesystem.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole artifact, mapping a missing file to `FileNotFound`
fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movie_list.dat file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = read_artifact(path)?;
    parse_movies_str(&content, &file_label(path))
}

/// Parse catalog lines of the form `movieId::title`
///
/// The title is everything after the first `::`, so titles may themselves
/// contain `::`.
pub fn parse_movies_str(content: &str, file: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let (movie_id, title) = line_trimmed.split_once("::").ok_or_else(|| {
            DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing '::' separator".to_string(),
            }
        })?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing title".to_string(),
            });
        }

        let movie = Movie {
            id: movie_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            title: title.to_string(),
        };

        movies.push(movie);
    }

    Ok(movies)
}

/// Parse the similarity.dat file
pub fn parse_similarity(path: &Path) -> Result<Vec<Vec<f32>>> {
    let content = read_artifact(path)?;
    parse_similarity_str(&content, &file_label(path))
}

/// Parse matrix rows, one per non-empty line
///
/// Rows are independent, so they are parsed in parallel; line numbers in
/// errors still refer to the original file.
pub fn parse_similarity_str(content: &str, file: &str) -> Result<Vec<Vec<f32>>> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    lines
        .par_iter()
        .map(|&(line_no, line)| parse_score_row(line, line_no, file))
        .collect()
}

fn parse_score_row(line: &str, line_no: usize, file: &str) -> Result<Vec<f32>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f32>().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid score '{}': {}", token, e),
            })
        })
        .collect()
}
