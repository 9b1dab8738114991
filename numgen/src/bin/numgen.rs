// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Generates random numbers until every configured subscriber has detached.
//!
//! Usage: `numgen [CONFIG.toml]`. Log verbosity follows `RUST_LOG`
//! (default `info`).

use anyhow::Context;
use numgen::{NumGenConfig, Session};
use std::{env, fs};
use tracing_subscriber::EnvFilter;

fn load_config() -> anyhow::Result<NumGenConfig> {
    let Some(path) = env::args().nth(1) else {
        return Ok(NumGenConfig::default());
    };
    let source =
        fs::read_to_string(&path).with_context(|| format!("reading configuration {path}"))?;
    NumGenConfig::from_toml_str(&source).with_context(|| format!("parsing configuration {path}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let session = Session::from_config(&config)?;
    let rounds = session.run()?;

    tracing::info!(rounds, "all subscribers detached");
    for summary in session.summaries() {
        tracing::info!("{summary}");
    }
    Ok(())
}
