//! Subcommand implementations.

pub mod build;
pub mod check;
pub mod config_cmd;
pub mod order;

use crate::Inputs;
use agglomerate_config::AgglomerateConfig;
use agglomerate_core::{Error, Result, agglomerate, load_fragments};
use std::path::Path;

/// Load the config file and layer command-line flags over it.
pub fn settings(config_path: Option<&Path>, inputs: Inputs) -> Result<AgglomerateConfig> {
    let mut config = AgglomerateConfig::load(config_path)?;
    overlay(&mut config, inputs);
    config.validate()?;
    Ok(config)
}

fn overlay(config: &mut AgglomerateConfig, inputs: Inputs) {
    if let Some(guard) = inputs.guard {
        config.guard = guard;
    }
    if let Some(out) = inputs.out {
        config.out = out;
    }
    if !inputs.hdrs.is_empty() {
        config.hdrs = inputs.hdrs;
    }
}

/// Read every configured header and assemble the merged text in memory.
pub fn render(config: &AgglomerateConfig) -> Result<String> {
    if config.hdrs.is_empty() {
        return Err(Error::NoInputs);
    }
    let options = config.assemble_options()?;
    let fragments = load_fragments(&config.hdrs)?;
    agglomerate(fragments, &options)
}
