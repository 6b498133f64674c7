// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line-oriented text format for set families.
//!
//! One edge per line, written as whitespace-separated non-negative vertex
//! indices. A blank line is an empty edge. Every line, including the last,
//! is terminated by a newline.
//!
//! ```text
//! 1 2 5
//! 2 3 4
//! 1 3
//! ```
//!
//! Vertex weights for the greedy engine use a companion format: one
//! `vertex weight` pair per line, blank lines ignored.

use super::{SetFamily, VertexSet};
use crate::error::{MhsError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

impl SetFamily {
    /// Read a family from the text format.
    ///
    /// # Errors
    ///
    /// Returns [`MhsError::Parse`] naming the first token that is not a
    /// non-negative integer, or [`MhsError::Io`] if reading fails.
    pub fn read_from<R: BufRead>(reader: R) -> Result<SetFamily> {
        let mut family = SetFamily::new();
        for (index, line) in reader.lines().enumerate() {
            family.push(parse_edge(&line?, index + 1)?);
        }
        Ok(family)
    }

    /// Write the family in the text format.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for edge in self.iter() {
            let words: Vec<String> = edge.iter().map(|v| v.to_string()).collect();
            writeln!(writer, "{}", words.join(" "))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load a family from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SetFamily> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Save the family to a file, replacing any existing content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

/// Read vertex weights as `vertex weight` lines, indexed by vertex.
///
/// Vertices that are not listed weigh 0. A vertex listed twice keeps its
/// last weight.
pub fn read_weights<R: BufRead>(reader: R) -> Result<Vec<f64>> {
    let mut weights = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let mut words = line.split_whitespace();
        let Some(vertex) = words.next() else {
            continue;
        };
        let bad = |token: &str| MhsError::Parse {
            line: line_number,
            token: token.to_string(),
        };
        let vertex: usize = vertex.parse().map_err(|_| bad(vertex))?;
        let weight = words.next().ok_or_else(|| bad(&line))?;
        let weight: f64 = weight.parse().map_err(|_| bad(weight))?;
        if let Some(extra) = words.next() {
            return Err(bad(extra));
        }
        if weights.len() <= vertex {
            weights.resize(vertex + 1, 0.0);
        }
        weights[vertex] = weight;
    }
    Ok(weights)
}

/// Load vertex weights from a file.
pub fn load_weights<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let file = File::open(path)?;
    read_weights(BufReader::new(file))
}

impl FromStr for SetFamily {
    type Err = MhsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::read_from(s.as_bytes())
    }
}

fn parse_edge(line: &str, line_number: usize) -> Result<VertexSet> {
    line.split_whitespace()
        .map(|word| {
            word.parse::<usize>().map_err(|_| MhsError::Parse {
                line: line_number,
                token: word.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let family: SetFamily = "1 2 5\n2 3 4\n1 3\n".parse().unwrap();
        assert_eq!(
            family.edges_as_lists(),
            vec![vec![1, 2, 5], vec![2, 3, 4], vec![1, 3]]
        );
        assert_eq!(family.num_verts(), 6);
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let family: SetFamily = "  4\t 0  \n7".parse().unwrap();
        assert_eq!(family.edges_as_lists(), vec![vec![0, 4], vec![7]]);
    }

    #[test]
    fn test_blank_line_is_empty_edge() {
        let family: SetFamily = "\n".parse().unwrap();
        assert_eq!(family.num_edges(), 1);
        assert!(family.edge(0).is_empty());
    }

    #[test]
    fn test_bad_token_reports_line() {
        let err = "1 2\n3 x 4\n".parse::<SetFamily>().unwrap_err();
        match err {
            MhsError::Parse { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_negative_index_rejected() {
        assert!(matches!(
            "0 -1".parse::<SetFamily>(),
            Err(MhsError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_weights() {
        let text = "2 0.5\n\n0   -1.25\n2 3\n";
        let weights = read_weights(text.as_bytes()).unwrap();
        assert_eq!(weights, vec![-1.25, 0.0, 3.0]);
    }

    #[test]
    fn test_read_weights_errors() {
        assert!(matches!(
            read_weights("1 x\n".as_bytes()),
            Err(MhsError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            read_weights("0 1.0\n4\n".as_bytes()),
            Err(MhsError::Parse { line: 2, .. })
        ));
        assert!(read_weights("0 1.0 2.0\n".as_bytes()).is_err());
    }

    #[test]
    fn test_write_format() {
        let family = SetFamily::from_lists(&[vec![5, 1, 2], vec![3]]);
        let mut out = Vec::new();
        family.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2 5\n3\n");
    }
}
