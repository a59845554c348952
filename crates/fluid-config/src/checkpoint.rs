//! Checkpoint save/restore (spec.md §6 "Checkpoint format"): plain text,
//! `N K T UT DRAWS` then the cell characters as integers, then the
//! velocity 4-vectors as doubles, then the `p` array as doubles. The
//! trailing `DRAWS` field is this implementation's own addition: the
//! count of values drawn from the Phase C/E random stream so far, needed
//! to resume that stream exactly on reload (spec.md §8 testable property
//! 5). SPEC_FULL.md §4 notes the format only needs to be self-describing
//! and round-trip; it does not have to match any particular original
//! binary layout.

use crate::error::FieldFileError;
use fluid_engine::{Engine, FIXED_SEED};
use fluid_numeric::Numeric;
use std::fmt::Write as _;
use std::path::Path;

pub fn save_checkpoint<P: Numeric, V: Numeric, VF: Numeric>(
    engine: &Engine<P, V, VF>,
    path: impl AsRef<Path>,
) -> Result<(), FieldFileError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let rows = engine.rows();
    let cols = engine.cols();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{rows} {cols} {} {} {}",
        engine.ticks(),
        engine.ut(),
        engine.rng_draws()
    );

    for x in 0..rows {
        let mut line = String::new();
        for y in 0..cols {
            if y > 0 {
                line.push(' ');
            }
            let _ = write!(line, "{}", engine.field_char(x, y));
        }
        let _ = writeln!(out, "{line}");
    }

    for x in 0..rows {
        for y in 0..cols {
            let v = engine.velocity_all(x, y);
            let _ = writeln!(
                out,
                "{} {} {} {}",
                v[0].to_f64(),
                v[1].to_f64(),
                v[2].to_f64(),
                v[3].to_f64()
            );
        }
    }

    for x in 0..rows {
        let mut line = String::new();
        for y in 0..cols {
            if y > 0 {
                line.push(' ');
            }
            let _ = write!(line, "{}", engine.p(x, y).to_f64());
        }
        let _ = writeln!(out, "{line}");
    }

    std::fs::write(path, out).map_err(|source| FieldFileError::Io {
        path: path_str,
        source,
    })
}

pub fn load_checkpoint<P: Numeric, V: Numeric, VF: Numeric>(
    path: impl AsRef<Path>,
    p_zero: P,
    v_zero: V,
    vf_zero: VF,
) -> Result<Engine<P, V, VF>, FieldFileError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| FieldFileError::Io {
        path: path_str.clone(),
        source,
    })?;
    parse_checkpoint(&path_str, &contents, p_zero, v_zero, vf_zero)
}

fn parse_checkpoint<P: Numeric, V: Numeric, VF: Numeric>(
    path: &str,
    contents: &str,
    p_zero: P,
    v_zero: V,
    vf_zero: VF,
) -> Result<Engine<P, V, VF>, FieldFileError> {
    let mut lines = contents.lines();

    let header = lines.next().ok_or_else(|| FieldFileError::UnexpectedEof {
        path: path.to_string(),
        what: "checkpoint header",
    })?;
    let mut parts = header.split_whitespace();
    let n = next_int(path, &mut parts, "N")?;
    let k = next_int(path, &mut parts, "K")?;
    let t: i64 = next_int(path, &mut parts, "T")?;
    let ut: i64 = next_int(path, &mut parts, "UT")?;
    let draws = next_int(path, &mut parts, "DRAWS")? as u64;

    let rows = n as usize;
    let cols = k as usize;

    let mut field = Vec::with_capacity(rows);
    for row in 0..rows {
        let line = lines.next().ok_or_else(|| FieldFileError::UnexpectedEof {
            path: path.to_string(),
            what: "checkpoint field row",
        })?;
        let chars: Result<Vec<u8>, _> = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<u16>().map(|v| v as u8).map_err(|_| FieldFileError::BadValue {
                    path: path.to_string(),
                    what: "cell character",
                    value: tok.to_string(),
                })
            })
            .collect();
        let chars = chars?;
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

    let mut engine = Engine::new(field, p_zero, v_zero, vf_zero);
    engine.set_ut(ut);
    engine.set_ticks(t);
    engine.resume_rng(FIXED_SEED, draws);

    for x in 0..rows {
        for y in 0..cols {
            let line = lines.next().ok_or_else(|| FieldFileError::UnexpectedEof {
                path: path.to_string(),
                what: "checkpoint velocity row",
            })?;
            let parsed = parse_f64_row(path, line, "velocity component")?;
            if parsed.len() != 4 {
                return Err(FieldFileError::BadValue {
                    path: path.to_string(),
                    what: "velocity 4-vector",
                    value: line.to_string(),
                });
            }
            let v4 = [
                v_zero.from_f64_like(parsed[0]),
                v_zero.from_f64_like(parsed[1]),
                v_zero.from_f64_like(parsed[2]),
                v_zero.from_f64_like(parsed[3]),
            ];
            engine.set_velocity_all(x, y, v4);
        }
    }

    for x in 0..rows {
        let line = lines.next().ok_or_else(|| FieldFileError::UnexpectedEof {
            path: path.to_string(),
            what: "checkpoint pressure row",
        })?;
        let parsed = parse_f64_row(path, line, "pressure")?;
        if parsed.len() != cols {
            return Err(FieldFileError::RowWidthMismatch {
                path: path.to_string(),
                row: x,
                expected: cols,
                found: parsed.len(),
            });
        }
        for (y, value) in parsed.into_iter().enumerate() {
            engine.set_p(x, y, p_zero.from_f64_like(value));
        }
    }

    Ok(engine)
}

fn next_int<'a>(
    path: &str,
    parts: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
) -> Result<i64, FieldFileError> {
    let tok = parts.next().ok_or_else(|| FieldFileError::UnexpectedEof {
        path: path.to_string(),
        what: field,
    })?;
    tok.parse().map_err(|_| FieldFileError::BadHeaderInt {
        path: path.to_string(),
        field,
        value: tok.to_string(),
    })
}

fn parse_f64_row(path: &str, line: &str, what: &'static str) -> Result<Vec<f64>, FieldFileError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| FieldFileError::BadValue {
                path: path.to_string(),
                what,
                value: tok.to_string(),
            })
        })
        .collect()
}
