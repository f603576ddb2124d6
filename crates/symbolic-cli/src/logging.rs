// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_ENV: &str = "SYMBOLIC_LOG";

/// Installs the global subscriber. The terminal belongs to the picker UI,
/// so events go to a file.
pub fn init(config: &Config) -> Result<PathBuf> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = resolve_filter(env::var(LOG_ENV).ok().as_deref(), config.log_level())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(path)
}

fn resolve_filter(from_env: Option<&str>, configured: &str) -> Result<EnvFilter> {
    match from_env {
        Some(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid {LOG_ENV} filter {directive:?}")),
        _ => EnvFilter::try_new(configured)
            .with_context(|| format!("invalid [log].level filter {configured:?}")),
    }
}
