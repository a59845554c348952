//! `fluid-sim` entrypoint: the "thin shell" spec.md §1 pushes argument
//! parsing, field/checkpoint I/O, and type-tag selection out of the
//! core into. Wires `fluid-config`'s dispatcher, `fluid-workers`' pools,
//! and `fluid-render`'s renderer around `fluid_engine::Engine::tick_overlapped`.

use anyhow::{Context, Result};
use clap::Parser;
use fluid_config::{
    build_engine_with_seed, load_field_file, parse_type_tag, save_checkpoint, validate_thread_count,
    TypeTriple,
};
use fluid_engine::FIXED_SEED;
use fluid_workers::{RenderPool, RowWorkerPool};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments (spec.md §6 "CLI surface").
#[derive(Parser, Debug)]
#[command(name = "fluid-sim", version, about = "Grid fluid simulator")]
struct Args {
    /// Numeric type tag for pressure, e.g. `DOUBLE`, `FIXED(32,16)`.
    #[arg(long = "p-type")]
    p_type: String,

    /// Numeric type tag for velocity.
    #[arg(long = "v-type")]
    v_type: String,

    /// Numeric type tag for velocity-flow.
    #[arg(long = "v-flow-type")]
    v_flow_type: String,

    /// Initial field file.
    #[arg(long = "field")]
    field: PathBuf,

    /// Checkpoint destination, written on SIGINT.
    #[arg(long = "save-field")]
    save_field: Option<PathBuf>,

    /// Worker pool size; falls back to `fluid-sim.toml`'s `threads_count`,
    /// then to 1, when omitted.
    #[arg(long = "threads-count")]
    threads_count: Option<i64>,

    /// Optional path to `fluid-sim.toml` (overrides discovery).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) {
        let log_dir = Path::new(".");
        let file_appender = tracing_appender::rolling::never(log_dir, "fluid-sim.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => self.log_guard = Some(guard),
            Err(_) => {
                // Global subscriber already installed (e.g. in tests); drop
                // the guard so the non-blocking writer shuts down cleanly.
            }
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging();
    AppStartup::install_panic_hook();

    if let Err(err) = run(Args::parse()) {
        error!(target: "runtime", error = %err, "fatal error");
        eprintln!("fluid-sim: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    info!(target: "runtime", "startup");

    let settings = fluid_config::load_settings(args.config.as_deref());

    let threads_count = match args.threads_count {
        Some(n) => validate_thread_count(n).context("--threads-count")?,
        None => settings.threads_count_or(1),
    };

    let p_kind = parse_type_tag(&args.p_type).context("--p-type")?;
    let v_kind = parse_type_tag(&args.v_type).context("--v-type")?;
    let vf_kind = parse_type_tag(&args.v_flow_type).context("--v-flow-type")?;
    let triple = TypeTriple {
        p: p_kind,
        v: v_kind,
        vf: vf_kind,
    };

    let loaded = load_field_file(&args.field).with_context(|| {
        format!("failed to load field file {}", args.field.display())
    })?;
    info!(
        target: "runtime.startup",
        rows = loaded.rows,
        cols = loaded.cols,
        start_tick = loaded.start_tick,
        threads_count,
        p_type = %p_kind,
        v_type = %v_kind,
        v_flow_type = %vf_kind,
        "field_loaded"
    );

    let mut engine = build_engine_with_seed(triple, loaded.field, FIXED_SEED);
    let pool = RowWorkerPool::new(threads_count);
    let render_pool = RenderPool::new();

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("failed to install SIGINT handler")?;
    }

    let mut tick_index = loaded.start_tick;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            info!(target: "runtime", tick_index, "interrupted, saving checkpoint");
            break;
        }

        let moved = engine.tick_overlapped(&pool, &render_pool);
        tick_index += 1;

        if moved {
            let snapshot = engine.snapshot_field();
            render_pool.submit(move || {
                let mut renderer = fluid_render::stdout_renderer();
                renderer.render(tick_index, &snapshot);
            });
        }
    }

    render_pool.wait_idle();

    if let Some(path) = args.save_field.as_ref() {
        save_checkpoint(&engine, path)
            .with_context(|| format!("failed to write checkpoint {}", path.display()))?;
        info!(target: "runtime", path = %path.display(), "checkpoint_written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_flags() {
        let args = Args::try_parse_from([
            "fluid-sim",
            "--p-type=DOUBLE",
            "--v-type=FIXED(32,16)",
            "--v-flow-type=FAST_FIXED(64,32)",
            "--field=field.txt",
        ])
        .unwrap();
        assert_eq!(args.p_type, "DOUBLE");
        assert_eq!(args.v_type, "FIXED(32,16)");
        assert_eq!(args.threads_count, None);
        assert_eq!(args.field, PathBuf::from("field.txt"));
    }

    #[test]
    fn rejects_missing_required_flag() {
        assert!(Args::try_parse_from(["fluid-sim", "--p-type=DOUBLE"]).is_err());
    }

    #[test]
    fn accepts_optional_flags() {
        let args = Args::try_parse_from([
            "fluid-sim",
            "--p-type=DOUBLE",
            "--v-type=DOUBLE",
            "--v-flow-type=DOUBLE",
            "--field=field.txt",
            "--save-field=out.ckpt",
            "--threads-count=8",
        ])
        .unwrap();
        assert_eq!(args.save_field, Some(PathBuf::from("out.ckpt")));
        assert_eq!(args.threads_count, Some(8));
    }
}
