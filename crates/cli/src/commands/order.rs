//! `agglomerate order`: Show how the headers will be ordered.

use super::settings;
use crate::Inputs;
use agglomerate_core::{Error, IncludeGraph, Plan, Result, load_fragments};
use std::path::{Path, PathBuf};

pub fn run(config_path: Option<&Path>, hdrs: Vec<PathBuf>, json: bool) -> Result<()> {
    let config = settings(
        config_path,
        Inputs {
            hdrs,
            ..Inputs::default()
        },
    )?;
    if config.hdrs.is_empty() {
        return Err(Error::NoInputs);
    }

    let graph = IncludeGraph::build(load_fragments(&config.hdrs)?);
    let plan = Plan::of(&graph)?;

    if json {
        let rendered = serde_json::to_string_pretty(&plan).map_err(|e| Error::Config {
            message: format!("Failed to render plan: {e}"),
        })?;
        println!("{rendered}");
    } else {
        print!("{}", format_plan(&plan));
    }
    Ok(())
}

fn format_plan(plan: &Plan) -> String {
    let mut out = String::from("Roots:\n");
    for root in &plan.roots {
        out.push_str(&format!("   {root}\n"));
    }
    out.push_str("\nEmission order:\n");
    for (i, identity) in plan.order.iter().enumerate() {
        out.push_str(&format!("   {:>3}. {identity}\n", i + 1));
    }
    out.push_str("\nExternal includes:\n");
    for include in &plan.external_includes {
        out.push_str(&format!("   {include}\n"));
    }
    out
}
