//! `agglomerate check`: Verify the committed output matches a fresh build.

use super::{render, settings};
use crate::Inputs;
use agglomerate_core::{Error, OutputSink, Result};
use std::path::Path;
use tracing::info;

pub fn run(config_path: Option<&Path>, inputs: Inputs) -> Result<()> {
    let config = settings(config_path, inputs)?;
    let sink = OutputSink::from_path(&config.out);
    if sink == OutputSink::Stdout {
        return Err(Error::Config {
            message: "check needs a file output, not stdout".into(),
        });
    }

    let expected = render(&config)?;
    match sink.read_existing()? {
        Some(existing) if existing == expected => {
            info!(path = %config.out.display(), "Merged header is up to date");
            Ok(())
        }
        _ => Err(Error::Stale { path: config.out }),
    }
}
