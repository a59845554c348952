//! Writes tick snapshots to a sink (spec.md §6 "Output format", §4.4
//! "Rendering trigger"): `Tick <i>:` followed by the grid, one row per
//! line, flushed after each snapshot. Runs on `fluid_workers::RenderPool`'s
//! dedicated thread so it overlaps the next tick's Phases A-D.
//!
//! spec.md §7: "The renderer failing to write is non-fatal and silently
//! dropped" — [`Renderer::render`] swallows I/O errors after logging
//! them, rather than propagating a `Result` the caller would have to
//! decide how to handle.

use std::io::Write;

/// Write one snapshot: header line plus `field.len()` grid rows.
fn write_tick<W: Write>(out: &mut W, tick: i64, field: &[Vec<u8>]) -> std::io::Result<()> {
    writeln!(out, "Tick {tick}:")?;
    for row in field {
        out.write_all(row)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Owns the output sink across ticks so repeated renders share one
/// open handle (e.g. stdout, or a file opened once at startup).
pub struct Renderer<W: Write> {
    sink: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Render one snapshot. Logs and swallows any I/O failure instead of
    /// returning it — per spec.md §7 the renderer is never allowed to
    /// fail the tick loop.
    pub fn render(&mut self, tick: i64, field: &[Vec<u8>]) {
        if let Err(err) = write_tick(&mut self.sink, tick, field) {
            tracing::error!(target: "render", tick, error = %err, "failed to write tick snapshot");
        }
    }
}

/// Convenience constructor for the common case: render to standard
/// output (spec.md §6's only specified destination).
pub fn stdout_renderer() -> Renderer<std::io::Stdout> {
    Renderer::new(std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        {
            let mut r = Renderer::new(&mut buf);
            r.render(3, &[b"###".to_vec(), b"#.#".to_vec(), b"###".to_vec()]);
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Tick 3:\n###\n#.#\n###\n");
    }

    #[test]
    fn renders_several_ticks_in_sequence() {
        let mut buf = Vec::new();
        {
            let mut r = Renderer::new(&mut buf);
            r.render(0, &[b"#".to_vec()]);
            r.render(1, &[b"#".to_vec()]);
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Tick 0:\n#\nTick 1:\n#\n");
    }

    #[test]
    fn a_write_failure_is_swallowed_not_propagated() {
        struct AlwaysFails;
        impl Write for AlwaysFails {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Err(std::io::Error::other("disk full"))
            }
        }
        let mut r = Renderer::new(AlwaysFails);
        r.render(0, &[b"#".to_vec()]);
    }
}
