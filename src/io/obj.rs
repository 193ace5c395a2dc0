//! Wavefront OBJ input.
//!
//! Only `v` and `f` records are read; texture coordinates, normals, groups
//! and materials are skipped. Face corners may use any of the `v`, `v/vt`,
//! `v//vn` and `v/vt/vn` forms, and negative indices count back from the
//! most recent vertex.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{Result, TopologyError};
use crate::primitives::FaceTable;

/// Load a face table from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use hullmesh::io::obj;
/// use hullmesh::shape::ConvexPolyhedron;
///
/// let table = obj::load("hull.obj").unwrap();
/// let hull: ConvexPolyhedron = ConvexPolyhedron::from_table(table).unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<FaceTable> {
    let file = File::open(path.as_ref())?;
    read(BufReader::new(file))
}

/// Read a face table from OBJ text.
pub fn read<R: BufRead>(reader: R) -> Result<FaceTable> {
    let mut points: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let mut coords = [0.0f64; 3];
                for c in coords.iter_mut() {
                    let token = tokens
                        .next()
                        .ok_or_else(|| parse_error(line_no, "vertex needs 3 coordinates"))?;
                    *c = token
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("bad coordinate '{}'", token)))?;
                }
                points.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let face = tokens
                    .map(|corner| resolve_corner(corner, points.len(), line_no))
                    .collect::<Result<Vec<usize>>>()?;
                faces.push(face);
            }
            _ => {}
        }
    }

    Ok((points, faces))
}

/// Turn a 1-based (or negative, relative) OBJ corner into a 0-based index.
fn resolve_corner(corner: &str, vertex_count: usize, line: usize) -> Result<usize> {
    let index = corner.split('/').next().unwrap_or(corner);
    let raw: i64 = index
        .parse()
        .map_err(|_| parse_error(line, format!("bad face index '{}'", corner)))?;

    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        vertex_count as i64 + raw
    } else {
        return Err(parse_error(line, "face index 0 is not valid in OBJ"));
    };

    if resolved < 0 {
        return Err(parse_error(
            line,
            format!("relative index {} precedes the first vertex", raw),
        ));
    }
    Ok(resolved as usize)
}

fn parse_error<M: Into<String>>(line: usize, message: M) -> TopologyError {
    TopologyError::Parse {
        line,
        message: message.into(),
    }
}
