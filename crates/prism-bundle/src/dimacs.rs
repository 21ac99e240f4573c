//! DIMACS-style parsers for fiber graphs and fiber total colorings.
//!
//! ## Graph format (`.col`)
//! - Lines starting with 'c' are comments (ignored)
//! - Line starting with 'p edge N M' declares N vertices and M edges
//! - Lines starting with 'e U V' declare an edge between vertices U and V (1-indexed)
//!
//! ## Total coloring format
//! Same conventions, one element per line:
//! - 'v U C' colors vertex U with color C
//! - 'e U V C' colors edge {U, V} with color C
//!
//! ## Example
//! ```text
//! c P_2 with a 3-color total coloring
//! v 1 1
//! v 2 2
//! e 1 2 3
//! ```
//!
//! ## Usage
//! ```no_run
//! use prism_bundle::dimacs::{parse_coloring_file, parse_dimacs_file};
//!
//! let graph = parse_dimacs_file("fibers/triangle.col")?;
//! let coloring = parse_coloring_file("fibers/triangle.tc", Some(&graph))?;
//! println!("{} vertices, {} colored elements", graph.num_vertices, coloring.len());
//! # Ok::<(), prism_bundle::BundleError>(())
//! ```

use crate::errors::{BundleError, Result};
use crate::types::{Color, Element, FiberColoring, FiberGraph, VertexId};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// Helper to create a validation error for DIMACS parsing
fn parse_error(message: impl Into<String>) -> BundleError {
    BundleError::validation(message.into())
}

fn open(path: &Path, what: &str) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        BundleError::validation(format!(
            "Failed to open {} file '{}': {}",
            what,
            path.display(),
            e
        ))
    })?;
    Ok(BufReader::new(file))
}

/// Parses a 1-indexed vertex token, checking it against `num_vertices` when known.
fn parse_vertex(token: &str, line_num: usize, num_vertices: Option<usize>) -> Result<VertexId> {
    let id = token.parse::<usize>().map_err(|_| {
        parse_error(format!(
            "Invalid vertex ID '{}' at line {}: must be a positive integer",
            token, line_num
        ))
    })?;
    let in_range = id >= 1 && num_vertices.map_or(true, |n| id <= n);
    if !in_range {
        return Err(parse_error(match num_vertices {
            Some(n) => format!("Vertex ID {} at line {} out of range [1, {}]", id, line_num, n),
            None => format!("Vertex ID {} at line {} out of range (1-indexed)", id, line_num),
        }));
    }
    Ok(id - 1)
}

fn parse_color(token: &str, line_num: usize) -> Result<Color> {
    match token.parse::<Color>() {
        Ok(color) if color > 0 => Ok(color),
        _ => Err(parse_error(format!(
            "Invalid color '{}' at line {}: must be a positive integer",
            token, line_num
        ))),
    }
}

/// Parses a DIMACS .col file into a [`FiberGraph`].
///
/// Vertices are converted from 1-indexed (DIMACS standard) to 0-indexed.
///
/// ## Errors
/// - `BundleError::ValidationError`: file cannot be opened, or invalid DIMACS
///   format (malformed problem line, invalid edge, etc.)
pub fn parse_dimacs_file<P: AsRef<Path>>(path: P) -> Result<FiberGraph> {
    parse_dimacs_reader(open(path.as_ref(), "DIMACS")?)
}

/// Parses DIMACS .col content held in memory.
pub fn parse_dimacs_str(content: &str) -> Result<FiberGraph> {
    parse_dimacs_reader(Cursor::new(content))
}

fn parse_dimacs_reader<R: BufRead>(reader: R) -> Result<FiberGraph> {
    let mut num_vertices = 0;
    let mut num_edges_declared = 0;
    let mut edges = Vec::new();
    let mut problem_line_found = false;

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts[0] {
            "p" => {
                // Problem line: p edge N M
                if parts.len() < 4 {
                    return Err(parse_error(format!(
                        "Invalid problem line format at line {}: expected 'p edge N M', got '{}'",
                        line_num, line
                    )));
                }
                if parts[1] != "edge" {
                    return Err(parse_error(format!(
                        "Unsupported problem type '{}' at line {}: only 'edge' is supported",
                        parts[1], line_num
                    )));
                }

                num_vertices = parts[2].parse::<usize>().map_err(|_| {
                    parse_error(format!(
                        "Invalid vertex count '{}' at line {}: must be a non-negative integer",
                        parts[2], line_num
                    ))
                })?;

                num_edges_declared = parts[3].parse::<usize>().map_err(|_| {
                    parse_error(format!(
                        "Invalid edge count '{}' at line {}: must be a non-negative integer",
                        parts[3], line_num
                    ))
                })?;

                problem_line_found = true;
            }
            "e" => {
                if !problem_line_found {
                    return Err(parse_error(format!(
                        "Edge definition at line {} before problem line (expected 'p edge N M' first)",
                        line_num
                    )));
                }

                if parts.len() < 3 {
                    return Err(parse_error(format!(
                        "Invalid edge line format at line {}: expected 'e U V', got '{}'",
                        line_num, line
                    )));
                }

                let u = parse_vertex(parts[1], line_num, Some(num_vertices))?;
                let v = parse_vertex(parts[2], line_num, Some(num_vertices))?;
                edges.push((u, v));
            }
            _ => {
                // Ignore unknown line types (forward compatibility)
                log::debug!(
                    "Ignoring unknown DIMACS line type '{}' at line {}",
                    parts[0],
                    line_num
                );
            }
        }
    }

    if !problem_line_found {
        return Err(parse_error(
            "No problem line found in DIMACS file (expected 'p edge N M')",
        ));
    }

    // An empty fiber is representable; the constructor rejects it.
    let mut graph = FiberGraph::new(num_vertices);
    for (u, v) in edges {
        if u == v {
            log::warn!("Skipping self-loop edge ({}, {})", u, v);
            continue;
        }
        graph.add_edge(u, v);
    }

    if graph.num_edges != num_edges_declared {
        log::warn!(
            "DIMACS file declared {} edges but actual edge count is {} (after deduplication)",
            num_edges_declared,
            graph.num_edges
        );
    }

    Ok(graph)
}

/// Parses a fiber total coloring file (`v U C` / `e U V C` lines).
///
/// When the fiber `graph` is given, vertex IDs above its vertex count and
/// edges it does not contain are rejected. Duplicate elements keep the last
/// color.
pub fn parse_coloring_file<P: AsRef<Path>>(
    path: P,
    graph: Option<&FiberGraph>,
) -> Result<FiberColoring> {
    parse_coloring_reader(open(path.as_ref(), "coloring")?, graph)
}

/// Parses total coloring content held in memory.
pub fn parse_coloring_str(content: &str, graph: Option<&FiberGraph>) -> Result<FiberColoring> {
    parse_coloring_reader(Cursor::new(content), graph)
}

fn parse_coloring_reader<R: BufRead>(
    reader: R,
    graph: Option<&FiberGraph>,
) -> Result<FiberColoring> {
    let num_vertices = graph.map(FiberGraph::num_vertices);
    let mut coloring = FiberColoring::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        let (element, color) = match parts[0] {
            "v" => {
                if parts.len() < 3 {
                    return Err(parse_error(format!(
                        "Invalid vertex color line at line {}: expected 'v U C', got '{}'",
                        line_num, line
                    )));
                }
                let v = parse_vertex(parts[1], line_num, num_vertices)?;
                (Element::Vertex(v), parse_color(parts[2], line_num)?)
            }
            "e" => {
                if parts.len() < 4 {
                    return Err(parse_error(format!(
                        "Invalid edge color line at line {}: expected 'e U V C', got '{}'",
                        line_num, line
                    )));
                }
                let u = parse_vertex(parts[1], line_num, num_vertices)?;
                let v = parse_vertex(parts[2], line_num, num_vertices)?;
                if u == v {
                    return Err(parse_error(format!(
                        "Self-loop edge ({}, {}) at line {} cannot be colored",
                        parts[1], parts[2], line_num
                    )));
                }
                if graph.map_or(false, |g| !g.has_edge(u, v)) {
                    return Err(parse_error(format!(
                        "Edge ({}, {}) at line {} is not an edge of the fiber graph",
                        parts[1], parts[2], line_num
                    )));
                }
                (Element::edge(u, v), parse_color(parts[3], line_num)?)
            }
            _ => {
                log::debug!(
                    "Ignoring unknown coloring line type '{}' at line {}",
                    parts[0],
                    line_num
                );
                continue;
            }
        };

        if let Some(previous) = coloring.insert(element, color) {
            log::warn!(
                "Element {} colored twice (line {}): {} replaced by {}",
                element,
                line_num,
                previous,
                color
            );
        }
    }

    Ok(coloring)
}
