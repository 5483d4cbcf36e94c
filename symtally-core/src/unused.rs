//! Unused abstract/interface member detection.
//!
//! Computes the set difference between declared and invoked
//! abstract/interface members, projected to (declaring type, method
//! name) pairs. This is a heuristic signal, not a proof of dead code:
//! a member invoked only through a different static type, via
//! reflection, or from code outside the analyzed sources is invisible
//! here and will be flagged. That limitation is a property of the
//! analysis scope.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::registry::Registry;

/// Finds declared abstract/interface members with no observed invocation.
///
/// Returns the unused member names grouped by declaring type. Types keep
/// the order of their first unused declaration; member names keep
/// first-appearance order within each type. A type whose declared
/// members were all invoked produces no group.
pub fn find_unused(registry: &Registry) -> IndexMap<String, Vec<String>> {
    let called: HashSet<(&str, &str)> = registry
        .invocations()
        .filter(|r| r.is_abstract)
        .map(|r| (r.receiver.as_str(), r.name.as_str()))
        .collect();

    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for record in registry.declarations() {
        if !record.is_abstract {
            continue;
        }
        let pair = (record.receiver.as_str(), record.name.as_str());
        if called.contains(&pair) || !seen.insert(pair) {
            continue;
        }
        groups
            .entry(record.receiver.clone())
            .or_default()
            .push(record.name.clone());
    }

    groups
}
