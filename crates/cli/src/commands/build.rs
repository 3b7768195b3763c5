//! `agglomerate build`: Merge headers and write the output.

use super::{render, settings};
use crate::Inputs;
use agglomerate_core::{OutputSink, Result};
use std::path::Path;
use tracing::info;

pub fn run(config_path: Option<&Path>, inputs: Inputs) -> Result<()> {
    let config = settings(config_path, inputs)?;

    // Assemble fully before touching the sink so a failure writes nothing.
    let text = render(&config)?;

    let sink = OutputSink::from_path(&config.out);
    sink.write(&text)?;
    info!(
        path = %sink.display_path().display(),
        headers = config.hdrs.len(),
        bytes = text.len(),
        "Wrote merged header"
    );
    Ok(())
}
