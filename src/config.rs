use anyhow::{Context, Result};
use std::{env, path::PathBuf};

pub const DEFAULT_INPUT: &str = "data/products.csv";
pub const DEFAULT_OUTPUT: &str = "data/products_updated.csv";

pub const INPUT_VAR: &str = "STOCK_INPUT";
pub const OUTPUT_VAR: &str = "STOCK_OUTPUT";
pub const SEED_VAR: &str = "STOCK_SEED";

/// Source/destination paths and optional RNG seed for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// When set, labels are drawn from a generator seeded with this value.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
        }
    }
}

impl Config {
    /// Defaults, overridden by `STOCK_INPUT`, `STOCK_OUTPUT` and `STOCK_SEED`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(input) = lookup(INPUT_VAR).filter(|s| !s.is_empty()) {
            cfg.input = PathBuf::from(input);
        }
        if let Some(output) = lookup(OUTPUT_VAR).filter(|s| !s.is_empty()) {
            cfg.output = PathBuf::from(output);
        }
        if let Some(seed) = lookup(SEED_VAR).filter(|s| !s.is_empty()) {
            let seed = seed
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be an unsigned integer, got {:?}", SEED_VAR, seed))?;
            cfg.seed = Some(seed);
        }
        Ok(cfg)
    }
}
