//! Topological sequencer: orders fragments dependents-first.
//!
//! Starting from the sorted root set, each consumed fragment releases its
//! internal includes; a dependency is promoted onto the root queue once no
//! unconsumed fragment still includes it. The resulting order is root-first,
//! and the assembler walks it backwards to emit leaves first.
//!
//! Ties are broken by root identity at the start and by include order after
//! that, so unchanged input always yields the same sequence.

use crate::error::{Error, Result};
use crate::fragment::Fragment;
use crate::graph::IncludeGraph;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

/// A complete ordering of every fragment in a graph.
#[derive(Debug, Clone)]
pub struct Sequence<'g> {
    graph: &'g IncludeGraph,
    root_first: Vec<&'g str>,
}

impl<'g> Sequence<'g> {
    /// Order `graph`, failing with [`Error::CycleDetected`] if any fragment
    /// cannot be placed.
    pub fn of(graph: &'g IncludeGraph) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::NoInputs);
        }
        Sequencer::new(graph).run()
    }

    /// Identities with every includer before its includes.
    pub fn root_first(&self) -> &[&'g str] {
        &self.root_first
    }

    /// Identities in emission order: every include before its includers.
    pub fn leaf_first(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.root_first.iter().rev().copied()
    }

    /// Fragments in emission order.
    pub fn fragments(&self) -> impl Iterator<Item = &'g Fragment> + '_ {
        self.leaf_first().filter_map(|id| self.graph.fragment(id))
    }

    pub fn graph(&self) -> &'g IncludeGraph {
        self.graph
    }
}

/// Working state for a single ordering pass.
struct Sequencer<'g> {
    graph: &'g IncludeGraph,
    roots: VecDeque<&'g str>,
    /// Unconsumed includers per fragment.
    pending: BTreeMap<&'g str, usize>,
    remaining: BTreeSet<&'g str>,
    sorted: Vec<&'g str>,
}

impl<'g> Sequencer<'g> {
    fn new(graph: &'g IncludeGraph) -> Self {
        Self {
            graph,
            roots: graph.roots().iter().map(String::as_str).collect(),
            pending: graph.dependent_counts(),
            remaining: graph.fragments().map(|f| f.identity.as_str()).collect(),
            sorted: Vec::with_capacity(graph.len()),
        }
    }

    fn run(mut self) -> Result<Sequence<'g>> {
        if self.roots.is_empty() {
            debug!("No root fragment; every header is included by another");
            return Err(Error::cycle(self.remaining.iter().copied()));
        }
        debug!(roots = ?self.roots, "Sequencing from roots");

        let graph = self.graph;
        while let Some(head) = self.roots.pop_front() {
            self.sorted.push(head);
            self.remaining.remove(head);

            for dependency in graph.dependencies(head) {
                let Some(count) = self.pending.get_mut(dependency.as_str()) else {
                    continue;
                };
                *count = count.saturating_sub(1);
                if *count == 0 {
                    debug!(fragment = %dependency, after = %head, "Promoted to root");
                    self.roots.push_back(dependency.as_str());
                }
            }
        }

        if !self.remaining.is_empty() {
            debug!(unresolved = ?self.remaining, "Root queue drained with fragments left");
            return Err(Error::cycle(self.remaining.iter().copied()));
        }

        Ok(Sequence {
            graph,
            root_first: self.sorted,
        })
    }
}
