//! Line grammar helpers shared by the text readers.
//!
//! The readers either walk the file with a fixed read-ahead ([`LineCursor`]) when the
//! header gives the counts, or locate sections: maximal runs of consecutive lines that
//! match the grammar of a node or element line ([`line_runs`]). Blank lines inside a
//! section belong to it.

use nalgebra::Point3;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::mesh::Face;
use crate::mesh_error::{MeshLoadError, Result};

/// Real number that carries a decimal point, optionally with exponent. Integers do not match.
const REAL_PATTERN: &str = r"[+-]?(?:\d+\.\d*|\d*\.\d+)(?:[Ee][+-]?\d+)?";

static REAL: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{}$", REAL_PATTERN)).unwrap());

/// `id x y z` where fields may touch, as written by fixed width columns
/// (`         1 0.0000000000000E+00-1.0000000000000E+00...`).
static PACKED_NODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*(\d+)\s*({r})\s*({r})\s*({r})\s*$",
        r = REAL_PATTERN
    ))
    .unwrap()
});

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Token is a real number written with a decimal point (`1.`, `-.5`, `2.0E+03`).
pub fn is_real(token: &str) -> bool {
    REAL.is_match(token)
}

/// Token is an unsigned integer.
pub fn is_integer(token: &str) -> bool {
    INTEGER.is_match(token)
}

/// Line made of an integer id followed by exactly three reals: `id x y z`.
pub fn is_node_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() == 4 && is_integer(tokens[0]) && tokens[1..].iter().all(|t| is_real(t))
}

/// Splits a node line into its id and coordinate tokens, whether fields are separated by
/// blanks or packed in fixed width columns.
pub fn packed_node_fields(line: &str) -> Option<(&str, [&str; 3])> {
    let caps = PACKED_NODE.captures(line)?;
    Some((
        caps.get(1)?.as_str(),
        [caps.get(2)?.as_str(), caps.get(3)?.as_str(), caps.get(4)?.as_str()],
    ))
}

pub fn is_packed_node_line(line: &str) -> bool {
    PACKED_NODE.is_match(line)
}

/// Line made only of integers, between `min` and `max` of them.
pub fn is_integer_line(line: &str, min: usize, max: usize) -> bool {
    let mut count = 0;
    for token in line.split_whitespace() {
        if !is_integer(token) {
            return false;
        }
        count += 1;
    }
    count >= min && count <= max
}

/// Maximal runs of lines accepted by the grammar, in file order, as the indices of the
/// accepted lines. Blank lines do not end a run, any other line does.
pub fn line_runs<F>(lines: &[&str], grammar: F) -> Vec<Vec<usize>>
where
    F: Fn(&str) -> bool,
{
    let mut runs = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if grammar(*line) {
            current.push(i);
        } else if line.trim().is_empty() {
            continue;
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub fn parse_f64(token: &str, line: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| MeshLoadError::NumericParse {
        line,
        token: token.to_string(),
        expected: "a real number",
    })
}

pub fn parse_usize(token: &str, line: usize) -> Result<usize> {
    token.parse::<usize>().map_err(|_| MeshLoadError::NumericParse {
        line,
        token: token.to_string(),
        expected: "a non-negative integer",
    })
}

pub fn parse_ids(tokens: &[&str], line: usize) -> Result<Vec<usize>> {
    tokens.iter().map(|t| parse_usize(t, line)).collect()
}

/// Reads the first three tokens as x, y, z. Further tokens are ignored.
pub fn parse_point(tokens: &[&str], line: usize, format: &'static str) -> Result<Point3<f64>> {
    if tokens.len() < 3 {
        return Err(MeshLoadError::malformed(
            format,
            format!("line {}: expected three coordinates, found {} values", line, tokens.len()),
        ));
    }
    Ok(Point3::new(
        parse_f64(tokens[0], line)?,
        parse_f64(tokens[1], line)?,
        parse_f64(tokens[2], line)?,
    ))
}

/// Converts 3 or 4 one-based ids into a zero-based face, triangles padded with the first id.
pub fn face_from_one_based(ids: &[usize], line: usize, format: &'static str) -> Result<Face> {
    if ids.contains(&0) {
        return Err(MeshLoadError::malformed(
            format,
            format!("line {}: vertex id 0 in a one-based connectivity list", line),
        ));
    }
    match ids {
        &[a, b, c] => Ok([a - 1, b - 1, c - 1, a - 1]),
        &[a, b, c, d] => Ok([a - 1, b - 1, c - 1, d - 1]),
        _ => Err(MeshLoadError::malformed(
            format,
            format!("line {}: a face needs 3 or 4 vertices, found {}", line, ids.len()),
        )),
    }
}

/// Sequential reader for formats where the header drives how many lines follow.
/// Blank lines are skipped. Reported line numbers are one-based.
pub struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    format: &'static str,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str, format: &'static str) -> Self {
        LineCursor {
            lines: text.lines().enumerate(),
            format,
        }
    }

    /// Next physical line, blank or not, with its line number.
    pub fn next_line(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.lines
            .next()
            .map(|(idx, line)| (idx + 1, line))
            .ok_or_else(|| {
                MeshLoadError::malformed(
                    self.format,
                    format!("unexpected end of file while reading {}", what),
                )
            })
    }

    /// Consumes exactly one physical line, even if it is blank.
    pub fn skip_line(&mut self, what: &str) -> Result<()> {
        self.next_line(what).map(|_| ())
    }

    /// Next non-blank line split on whitespace, with its line number.
    pub fn next_tokens(&mut self, what: &str) -> Result<(usize, Vec<&'a str>)> {
        for (idx, line) in self.lines.by_ref() {
            let tokens: Vec<&'a str> = line.split_whitespace().collect();
            if !tokens.is_empty() {
                return Ok((idx + 1, tokens));
            }
        }
        Err(MeshLoadError::malformed(
            self.format,
            format!("unexpected end of file while reading {}", what),
        ))
    }

    /// Next line holding a single count.
    pub fn next_count(&mut self, what: &str) -> Result<usize> {
        let (line, tokens) = self.next_tokens(what)?;
        parse_usize(tokens[0], line)
    }

    pub fn next_point(&mut self, what: &str) -> Result<Point3<f64>> {
        let (line, tokens) = self.next_tokens(what)?;
        parse_point(&tokens, line, self.format)
    }

    /// Next line as a one-based face.
    pub fn next_face(&mut self, what: &str) -> Result<Face> {
        let (line, tokens) = self.next_tokens(what)?;
        let ids = parse_ids(&tokens, line)?;
        face_from_one_based(&ids, line, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_classes() {
        assert!(is_real("1.0"));
        assert!(is_real("-.5"));
        assert!(is_real("2.E+03"));
        assert!(!is_real("2"));
        assert!(!is_real("abc"));
        assert!(is_integer("42"));
        assert!(!is_integer("-1"));
        assert!(!is_integer("4.0"));
    }

    #[test]
    fn test_line_runs() {
        let lines = ["a", "1", "2", "b", "3", "c", "4", "5"];
        let runs = line_runs(&lines, |l| is_integer(l));
        assert_eq!(runs, vec![vec![1, 2], vec![4], vec![6, 7]]);
    }

    #[test]
    fn test_line_runs_across_blank_lines() {
        let lines = ["", "1", "", "  ", "2", "b", "", "3", ""];
        let runs = line_runs(&lines, |l| is_integer(l.trim()));
        assert_eq!(runs, vec![vec![1, 4], vec![7]], "Blank lines continue a run");
    }

    #[test]
    fn test_packed_node_fields() {
        let spaced = "  12   0.5  -1.0   2.E+01";
        assert_eq!(packed_node_fields(spaced), Some(("12", ["0.5", "-1.0", "2.E+01"])));

        let packed = "         7 0.0000000000000E+00-1.0000000000000E+00 2.5000000000000E-01";
        assert_eq!(
            packed_node_fields(packed),
            Some(("7", ["0.0000000000000E+00", "-1.0000000000000E+00", "2.5000000000000E-01"]))
        );
        assert!(is_packed_node_line(packed));
        assert_eq!(
            packed_node_fields("         8-1.0000000000000E+00-2.0000000000000E+00-3.0000000000000E+00")
                .map(|(id, _)| id),
            Some("8")
        );
        assert!(!is_packed_node_line("1 1 0 1 2 5 4"));
        assert!(!is_packed_node_line("/NODE"));
    }

    #[test]
    fn test_skip_line_keeps_blank_slot() {
        let mut cursor = LineCursor::new("\n1.0 9.81\n", "test");
        cursor.skip_line("title").unwrap();
        let (line, tokens) = cursor.next_tokens("values").unwrap();
        assert_eq!((line, tokens), (2, vec!["1.0", "9.81"]));
        assert!(cursor.skip_line("past the end").is_err());
    }

    #[test]
    fn test_face_padding() {
        assert_eq!(face_from_one_based(&[1, 2, 3], 1, "test").unwrap(), [0, 1, 2, 0]);
        assert_eq!(face_from_one_based(&[4, 3, 2, 1], 1, "test").unwrap(), [3, 2, 1, 0]);
        assert!(face_from_one_based(&[1, 2], 1, "test").is_err());
        assert!(face_from_one_based(&[0, 1, 2], 1, "test").is_err());
    }

    #[test]
    fn test_cursor_reports_line() {
        let mut cursor = LineCursor::new("1 2\n\n1.0 x 3.0\n", "test");
        let (line, tokens) = cursor.next_tokens("header").unwrap();
        assert_eq!((line, tokens), (1, vec!["1", "2"]));
        match cursor.next_point("vertex") {
            Err(MeshLoadError::NumericParse { line, token, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(token, "x");
            }
            other => panic!("Unexpected result {:?}", other),
        }
        assert!(matches!(
            cursor.next_tokens("anything"),
            Err(MeshLoadError::MalformedSection { .. })
        ));
    }
}
