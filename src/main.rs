use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use stockstatus::{annotate, annotate_with_rng, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configure paths ──────────────────────────────────────────
    let cfg = Config::from_env()?;
    info!(
        input = %cfg.input.display(),
        output = %cfg.output.display(),
        seed = ?cfg.seed,
        "startup"
    );

    // ─── 3) annotate ─────────────────────────────────────────────────
    let summary = match cfg.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            annotate_with_rng(&cfg.input, &cfg.output, &mut rng)?
        }
        None => annotate(&cfg.input, &cfg.output)?,
    };

    println!("saved CSV with stock status to {}", summary.output.display());
    info!(rows = summary.rows, ragged = summary.ragged, "all done");
    Ok(())
}
