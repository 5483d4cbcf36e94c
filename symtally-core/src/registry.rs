//! Symbol registry: invocation-count aggregation and declaration tracking.
//!
//! The registry is the run's single aggregation point. Invocations
//! deduplicate through an insertion-ordered cache keyed by the symbol's
//! canonical identity; declarations append to an ordered list without
//! deduplication. Both structures are created once per run, only grow,
//! and are read-only after the final emission step.
//!
//! Ordering matters for output stability: the cache is an [`IndexMap`],
//! so records with equal invocation counts keep first-seen order in the
//! histogram and the unused analysis walks types in first-declared order.

use std::collections::HashSet;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::escape::escape;
use crate::event::MethodSymbol;
use crate::render::{render_type, TypeShape};

/// Modules whose members are excluded from call-statistics output.
///
/// These are the historical standard-library module names. The list is a
/// fixed constant, not configuration.
pub const SKIP_MODULES: &[&str] = &["mscorlib", "System.Core"];

/// Aggregated state for one distinct canonical symbol.
///
/// All fields except `count` are fixed when the record is first built;
/// later sightings of the same key only increment the count, even if
/// their metadata diverges.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRecord {
    /// Canonical identity the record aggregates under.
    pub key: String,
    /// Rendered method name, including generic arguments as `name<a,b>`.
    pub name: String,
    /// Canonical rendering of the receiver/declaring type. Empty when
    /// the symbol has none.
    pub receiver: String,
    /// Escaped human-readable signature: `name() Receiver`.
    pub rendered: String,
    /// Number of invocations observed for this key.
    pub count: u64,
    /// Name of the containing module/assembly.
    pub module: String,
    /// Whether the symbol is an abstract or interface member.
    pub is_abstract: bool,
    /// Whether the symbol's module is on [`SKIP_MODULES`].
    pub skip: bool,
    /// Attribute names, deduplicated in first-appearance order.
    pub attributes: Vec<String>,
}

impl MethodRecord {
    /// Builds a record from a resolved symbol with an initial count of 1.
    ///
    /// Generic arguments join into the rendered name via their display
    /// form; only parameter and receiver types go through the recursive
    /// renderer.
    pub fn from_symbol(sym: &MethodSymbol) -> Self {
        let name = if sym.generic_args.is_empty() {
            sym.name.clone()
        } else {
            let args = sym
                .generic_args
                .iter()
                .map(TypeShape::display)
                .collect::<Vec<_>>()
                .join(",");
            format!("{}<{}>", sym.name, args)
        };

        let receiver = sym.receiver.as_ref().map(render_type).unwrap_or_default();
        let rendered = escape(&format!("{}() {}", name, receiver)).into_owned();
        let skip = SKIP_MODULES.contains(&sym.module.as_str());

        let mut seen = HashSet::new();
        let mut attributes = Vec::new();
        for attr in &sym.attributes {
            if seen.insert(attr.as_str()) {
                attributes.push(attr.clone());
            }
        }

        Self {
            key: sym.key.clone(),
            name,
            receiver,
            rendered,
            count: 1,
            module: sym.module.clone(),
            is_abstract: sym.is_abstract,
            skip,
            attributes,
        }
    }
}

/// Per-run aggregation of declarations and invocations.
#[derive(Debug, Default)]
pub struct Registry {
    /// Invocation cache, canonical key to record, insertion-ordered.
    calls: IndexMap<String, MethodRecord>,
    /// Every declaration seen, in source order. Duplicates are kept:
    /// the unused analysis only consumes the projected set downstream.
    declared: Vec<MethodRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an invocation of `sym` and returns its record.
    ///
    /// A cache hit increments the count and leaves every other field as
    /// the first sighting fixed it. A miss builds and stores a fresh
    /// record with a count of 1. The caller inspects `skip` on the
    /// returned record to decide whether to emit a call-site line.
    pub fn record_invocation(&mut self, sym: &MethodSymbol) -> &MethodRecord {
        match self.calls.entry(sym.key.clone()) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                record.count += 1;
                record
            }
            Entry::Vacant(entry) => entry.insert(MethodRecord::from_symbol(sym)),
        }
    }

    /// Records a declaration of `sym`.
    ///
    /// Declarations never consult the invocation cache: each call appends
    /// a fresh record to the declaration list, even for a key already
    /// seen, so partial declarations across locations all land here.
    pub fn record_declaration(&mut self, sym: &MethodSymbol) {
        self.declared.push(MethodRecord::from_symbol(sym));
    }

    /// Invocation records in first-seen order.
    pub fn invocations(&self) -> impl Iterator<Item = &MethodRecord> {
        self.calls.values()
    }

    /// Looks up the invocation record for a canonical key.
    pub fn invocation(&self, key: &str) -> Option<&MethodRecord> {
        self.calls.get(key)
    }

    /// Declaration records in source order, duplicates included.
    pub fn declarations(&self) -> &[MethodRecord] {
        &self.declared
    }

    /// Number of distinct invoked symbols.
    pub fn invoked_count(&self) -> usize {
        self.calls.len()
    }

    /// Number of declarations recorded (not deduplicated).
    pub fn declared_count(&self) -> usize {
        self.declared.len()
    }
}
