//! Component A4: TSPLIB-style input/output.
//!
//! Reads `NODE_COORD_SECTION` coordinate files and `TOUR_SECTION` tour
//! files, and writes tours back out in the same format. TSPLIB point ids
//! are 1-based; everywhere else in this crate they are 0-based, so every
//! read/write here carries a +/-1 conversion.

use crate::exceptions::KOptError;
use crate::geometry::PointSet;
use crate::primitives::{PointId, Space};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

fn io_err(context: &'static str, error: std::io::Error) -> KOptError {
    KOptError::Io { context, message: error.to_string() }
}

fn dimension_from_header<R: BufRead>(
    reader: &mut R,
    section_marker: &str,
) -> Result<usize, KOptError> {
    let mut dimension = None;
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|e| io_err("reading header", e))?;
        if bytes == 0 {
            break;
        }
        if line.contains(section_marker) {
            break;
        }
        if let Some(rest) = line.find("DIMENSION") {
            let after_colon = line[rest..]
                .find(':')
                .map(|i| &line[rest..][i + 1..])
                .unwrap_or("");
            dimension = after_colon.trim().parse::<usize>().ok();
        }
    }
    dimension.ok_or(KOptError::MalformedHeader { expected: "a DIMENSION header" })
}

/// Reads a TSPLIB `NODE_COORD_SECTION` point file into a [`PointSet`].
pub fn read_coordinates<P: AsRef<Path>>(path: P) -> Result<PointSet, KOptError> {
    let file = File::open(path).map_err(|e| io_err("opening coordinate file", e))?;
    let mut reader = BufReader::new(file);
    let dimension = dimension_from_header(&mut reader, "NODE_COORD_SECTION")?;

    let mut xs: Vec<Space> = Vec::with_capacity(dimension);
    let mut ys: Vec<Space> = Vec::with_capacity(dimension);
    let mut line = String::new();
    while xs.len() < dimension {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|e| io_err("reading coordinate row", e))?;
        if bytes == 0 {
            break;
        }
        let mut fields = line.split_whitespace();
        let id: usize = match fields.next().and_then(|f| f.parse().ok()) {
            Some(id) => id,
            None => continue,
        };
        let expected = xs.len() + 1;
        if id != expected {
            return Err(KOptError::MismatchedPointId { found: id, expected });
        }
        let x: Space = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or(KOptError::MalformedHeader { expected: "an x coordinate" })?;
        let y: Space = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or(KOptError::MalformedHeader { expected: "a y coordinate" })?;
        xs.push(x);
        ys.push(y);
    }
    Ok(PointSet::new(xs, ys))
}

/// Reads a TSPLIB `TOUR_SECTION` tour file into a 0-based visiting order.
/// Tolerates a trailing `-1` or `EOF` sentinel line.
pub fn read_ordered_points<P: AsRef<Path>>(path: P) -> Result<Vec<PointId>, KOptError> {
    let file = File::open(path).map_err(|e| io_err("opening tour file", e))?;
    let mut reader = BufReader::new(file);
    let dimension = dimension_from_header(&mut reader, "TOUR_SECTION")?;

    let mut order = Vec::with_capacity(dimension);
    let mut line = String::new();
    while order.len() < dimension {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|e| io_err("reading tour row", e))?;
        if bytes == 0 {
            break;
        }
        let token = line.trim();
        if token.is_empty() || token == "-1" || token.eq_ignore_ascii_case("EOF") {
            continue;
        }
        let one_based: i64 = token
            .parse()
            .map_err(|_| KOptError::MalformedHeader { expected: "an integer point id" })?;
        order.push((one_based - 1) as PointId);
    }
    if order.len() != dimension {
        return Err(KOptError::MalformedHeader { expected: "DIMENSION tour rows" });
    }
    Ok(order)
}

/// Writes a 0-based visiting order out as a TSPLIB tour file.
pub fn write_ordered_points<P: AsRef<Path>>(
    order: &[PointId],
    path: P,
) -> Result<(), KOptError> {
    let mut file = File::create(path).map_err(|e| io_err("creating tour file", e))?;
    writeln!(file, "DIMENSION: {}", order.len()).map_err(|e| io_err("writing tour header", e))?;
    writeln!(file, "TOUR_SECTION").map_err(|e| io_err("writing tour header", e))?;
    for &p in order {
        writeln!(file, "{}", p + 1).map_err(|e| io_err("writing tour row", e))?;
    }
    writeln!(file, "-1").map_err(|e| io_err("writing tour trailer", e))?;
    Ok(())
}

/// The identity tour `0, 1, ..., point_count - 1`.
pub fn default_tour(point_count: usize) -> Vec<PointId> {
    (0..point_count).collect()
}

/// Reads `tour_file_path` if given, otherwise falls back to
/// [`default_tour`].
pub fn initial_tour<P: AsRef<Path>>(
    point_count: usize,
    tour_file_path: Option<P>,
) -> Result<Vec<PointId>, KOptError> {
    match tour_file_path {
        Some(path) => read_ordered_points(path),
        None => Ok(default_tour(point_count)),
    }
}
