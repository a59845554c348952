//! Loads the initial field file (spec.md §6 "Field file format"): a
//! header line `N K T` followed by `N` lines of exactly `K` characters,
//! outer border all `#`.

use crate::error::FieldFileError;
use std::path::Path;

/// A parsed field file: grid geometry plus the starting tick index `T`
/// from the header.
pub struct FieldFile {
    pub rows: usize,
    pub cols: usize,
    pub start_tick: i64,
    pub field: Vec<Vec<u8>>,
}

pub fn load_field_file(path: impl AsRef<Path>) -> Result<FieldFile, FieldFileError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| FieldFileError::Io {
        path: path_str.clone(),
        source,
    })?;
    parse_field_file(&path_str, &contents)
}

fn parse_field_file(path: &str, contents: &str) -> Result<FieldFile, FieldFileError> {
    let mut lines = contents.lines();

    let header = lines
        .next()
        .ok_or_else(|| FieldFileError::UnexpectedEof {
            path: path.to_string(),
            what: "header line",
        })?;
    let (rows, cols, start_tick) = parse_header(path, header)?;

    let mut field = Vec::with_capacity(rows);
    for row in 0..rows {
        let line = lines.next().ok_or_else(|| FieldFileError::UnexpectedEof {
            path: path.to_string(),
            what: "field row",
        })?;
        let chars: Vec<u8> = line.bytes().collect();
        if chars.len() != cols {
            return Err(FieldFileError::RowWidthMismatch {
                path: path.to_string(),
                row,
                expected: cols,
                found: chars.len(),
            });
        }
        field.push(chars);
    }

    let remaining = lines.count();
    if remaining != 0 {
        return Err(FieldFileError::RowCountMismatch {
            path: path.to_string(),
            expected: rows,
            found: rows + remaining,
        });
    }

    check_border(path, &field, rows, cols)?;

    Ok(FieldFile {
        rows,
        cols,
        start_tick,
        field,
    })
}

fn parse_header(path: &str, header: &str) -> Result<(usize, usize, i64), FieldFileError> {
    let mut parts = header.split_whitespace();
    let n = parts
        .next()
        .ok_or_else(|| FieldFileError::MissingHeader {
            path: path.to_string(),
            found: header.to_string(),
        })?;
    let k = parts
        .next()
        .ok_or_else(|| FieldFileError::MissingHeader {
            path: path.to_string(),
            found: header.to_string(),
        })?;
    let t = parts
        .next()
        .ok_or_else(|| FieldFileError::MissingHeader {
            path: path.to_string(),
            found: header.to_string(),
        })?;
    if parts.next().is_some() {
        return Err(FieldFileError::MissingHeader {
            path: path.to_string(),
            found: header.to_string(),
        });
    }

    let rows: usize = n.parse().map_err(|_| FieldFileError::BadHeaderInt {
        path: path.to_string(),
        field: "N",
        value: n.to_string(),
    })?;
    let cols: usize = k.parse().map_err(|_| FieldFileError::BadHeaderInt {
        path: path.to_string(),
        field: "K",
        value: k.to_string(),
    })?;
    let start_tick: i64 = t.parse().map_err(|_| FieldFileError::BadHeaderInt {
        path: path.to_string(),
        field: "T",
        value: t.to_string(),
    })?;

    Ok((rows, cols, start_tick))
}

/// spec.md §3: "The outer boundary of the grid is assumed to consist of
/// `#` cells so that neighbor access is always in-bounds." The engine
/// itself trusts this as a precondition (spec.md §9); the loader is the
/// one place that can cheaply check it before trusting unchecked
/// neighbor arithmetic downstream.
fn check_border(
    path: &str,
    field: &[Vec<u8>],
    rows: usize,
    cols: usize,
) -> Result<(), FieldFileError> {
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    for col in 0..cols {
        check_wall(path, field, 0, col)?;
        check_wall(path, field, rows - 1, col)?;
    }
    for row in 0..rows {
        check_wall(path, field, row, 0)?;
        check_wall(path, field, row, cols - 1)?;
    }
    Ok(())
}

fn check_wall(path: &str, field: &[Vec<u8>], row: usize, col: usize) -> Result<(), FieldFileError> {
    let c = field[row][col];
    if !fluid_engine::is_wall(c) {
        return Err(FieldFileError::BorderNotWall {
            path: path.to_string(),
            row,
            col,
            found: c as char,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_a_well_formed_field() {
        let f = write_temp("3 3 0\n###\n#.#\n###\n");
        let loaded = load_field_file(f.path()).unwrap();
        assert_eq!(loaded.rows, 3);
        assert_eq!(loaded.cols, 3);
        assert_eq!(loaded.start_tick, 0);
        assert_eq!(loaded.field[1], b"#.#".to_vec());
    }

    #[test]
    fn rejects_row_width_mismatch() {
        let f = write_temp("3 3 0\n###\n#.\n###\n");
        assert!(matches!(
            load_field_file(f.path()),
            Err(FieldFileError::RowWidthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_missing_rows() {
        let f = write_temp("3 3 0\n###\n#.#\n");
        assert!(matches!(
            load_field_file(f.path()),
            Err(FieldFileError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn rejects_non_wall_border() {
        let f = write_temp("3 3 0\n##.\n#.#\n###\n");
        assert!(matches!(
            load_field_file(f.path()),
            Err(FieldFileError::BorderNotWall { .. })
        ));
    }

    #[test]
    fn rejects_bad_header_int() {
        let f = write_temp("x 3 0\n###\n#.#\n###\n");
        assert!(matches!(
            load_field_file(f.path()),
            Err(FieldFileError::BadHeaderInt { .. })
        ));
    }
}
