//! # Agglomerate Core
//!
//! Merges a set of modular C headers into one dependency-ordered,
//! self-contained header. The pipeline runs strictly in one direction:
//!
//! - [`fragment`] parses each file into a [`Fragment`]
//! - [`graph`] classifies includes as internal or external
//! - [`sequence`] orders fragments so every include precedes its includers
//! - [`assemble`] renders the merged text
//!
//! Every run recomputes the output from scratch, and unchanged input always
//! produces byte-identical output.

pub mod assemble;
pub mod error;
pub mod fragment;
pub mod graph;
pub mod license;
pub mod sequence;
pub mod sink;
pub mod source;

// Re-export key types at crate root for ergonomics
pub use assemble::{AssembleOptions, BANNER_WIDTH, DEFAULT_GENERATOR, DEFAULT_GUARD, assemble};
pub use error::{Error, Result};
pub use fragment::Fragment;
pub use graph::{Include, IncludeGraph};
pub use license::License;
pub use sequence::Sequence;
pub use sink::OutputSink;
pub use source::{load_fragment, load_fragments};

use serde::Serialize;

/// Summary of how a fragment set will be ordered, without the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub roots: Vec<String>,
    /// Leaf-first emission order.
    pub order: Vec<String>,
    pub external_includes: Vec<String>,
}

impl Plan {
    pub fn of(graph: &IncludeGraph) -> Result<Self> {
        let sequence = Sequence::of(graph)?;
        Ok(Self {
            roots: graph.roots().to_vec(),
            order: sequence.leaf_first().map(str::to_string).collect(),
            external_includes: graph.external_includes().map(str::to_string).collect(),
        })
    }
}

/// Run the whole pipeline over already-parsed fragments.
pub fn agglomerate(
    fragments: impl IntoIterator<Item = Fragment>,
    options: &AssembleOptions,
) -> Result<String> {
    let graph = IncludeGraph::build(fragments);
    let sequence = Sequence::of(&graph)?;
    Ok(assemble(&sequence, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Fragment> {
        vec![
            Fragment::parse("top.h", "#include \"mid.h\"\nZ"),
            Fragment::parse("base.h", "X"),
            Fragment::parse("mid.h", "#include \"base.h\"\nY"),
        ]
    }

    #[test]
    fn plan_reports_roots_and_order() {
        let graph = IncludeGraph::build(scenario());
        let plan = Plan::of(&graph).unwrap();
        assert_eq!(plan.roots, vec!["top.h"]);
        assert_eq!(plan.order, vec!["base.h", "mid.h", "top.h"]);
        assert!(plan.external_includes.is_empty());
    }

    #[test]
    fn agglomerate_is_idempotent() {
        let options = AssembleOptions::default();
        let first = agglomerate(scenario(), &options).unwrap();
        let second = agglomerate(scenario(), &options).unwrap();
        assert_eq!(first, second);

        let x = first.find("\nX\n").unwrap();
        let y = first.find("\nY\n").unwrap();
        let z = first.find("\nZ\n").unwrap();
        assert!(x < y && y < z);
    }

    #[test]
    fn agglomerate_rejects_cycles() {
        let fragments = vec![
            Fragment::parse("a.h", "#include \"b.h\""),
            Fragment::parse("b.h", "#include \"a.h\""),
        ];
        let result = agglomerate(fragments, &AssembleOptions::default());
        assert!(matches!(result, Err(Error::CycleDetected { .. })));
    }
}
