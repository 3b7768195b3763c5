//! Dependency graph builder: classifies every include directive.
//!
//! An include is *internal* when its text is byte-identical to another
//! fragment's quoted identity (`"cwisstable/base.h"`); everything else is
//! *external* and passed through untouched. There is no path normalization.

use crate::fragment::{Fragment, unquote};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// How a single include directive resolves against the fragment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include<'a> {
    /// Names another fragment; carries the target identity.
    Internal(&'a str),
    /// Anything else, verbatim.
    External(&'a str),
}

/// The inclusion relation over a full set of fragments.
#[derive(Debug, Clone)]
pub struct IncludeGraph {
    fragments: BTreeMap<String, Fragment>,
    /// Internal targets per fragment, in include order, each listed once.
    dependencies: BTreeMap<String, Vec<String>>,
    external: BTreeSet<String>,
    /// Fragments nothing includes, sorted by identity.
    roots: Vec<String>,
}

impl IncludeGraph {
    /// Build the graph. Fragments sharing an identity collapse into one,
    /// the last one given wins.
    pub fn build(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        let mut by_identity = BTreeMap::new();
        for fragment in fragments {
            if let Some(previous) = by_identity.insert(fragment.identity.clone(), fragment) {
                debug!(fragment = %previous.identity, "Duplicate input collapsed");
            }
        }

        let references: HashSet<String> = by_identity.values().map(Fragment::reference).collect();

        let mut dependencies = BTreeMap::new();
        let mut external = BTreeSet::new();
        let mut included = HashSet::new();

        for (identity, fragment) in &by_identity {
            let mut targets: Vec<String> = Vec::new();
            for include in &fragment.includes {
                match unquote(include) {
                    Some(target) if references.contains(include) => {
                        included.insert(target.to_string());
                        if !targets.iter().any(|t| t == target) {
                            targets.push(target.to_string());
                        }
                    }
                    _ => {
                        external.insert(include.clone());
                    }
                }
            }
            dependencies.insert(identity.clone(), targets);
        }

        // BTreeMap keys are already in identity order.
        let roots: Vec<String> = by_identity
            .keys()
            .filter(|identity| !included.contains(*identity))
            .cloned()
            .collect();

        debug!(
            fragments = by_identity.len(),
            external = external.len(),
            roots = ?roots,
            "Include graph built"
        );

        Self {
            fragments: by_identity,
            dependencies,
            external,
            roots,
        }
    }

    /// Classify one include directive against this fragment set.
    pub fn classify<'a>(&self, include: &'a str) -> Include<'a> {
        match unquote(include) {
            Some(target) if self.fragments.contains_key(target) => Include::Internal(target),
            _ => Include::External(include),
        }
    }

    pub fn fragment(&self, identity: &str) -> Option<&Fragment> {
        self.fragments.get(identity)
    }

    /// All fragments, ordered by identity.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.values()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Internal targets of `identity`, in its include order.
    pub fn dependencies(&self, identity: &str) -> &[String] {
        self.dependencies
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// For each fragment, how many distinct fragments include it.
    pub fn dependent_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> =
            self.fragments.keys().map(|id| (id.as_str(), 0)).collect();
        for targets in self.dependencies.values() {
            for target in targets {
                if let Some(count) = counts.get_mut(target.as_str()) {
                    *count += 1;
                }
            }
        }
        counts
    }

    /// Fragments not included by any other fragment, sorted by identity.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Unique external include strings, sorted.
    pub fn external_includes(&self) -> impl Iterator<Item = &str> {
        self.external.iter().map(String::as_str)
    }
}
