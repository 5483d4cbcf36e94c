//! Report emission: indentation-based block output.
//!
//! The emitter owns the output sink and the quiet flag. It is write-only
//! and order-preserving; it validates nothing, since every invariant is
//! established upstream by the registry and analyzer. Two primitives
//! carry everything: [`Emitter::line`] always writes, [`Emitter::detail`]
//! is suppressed in quiet mode. The summary sections (unused grouping,
//! call histogram) always go through `line`, so quiet runs still produce
//! a complete footer.
//!
//! Format: 2-space indent per nesting level, `- ` list items,
//! `key: value` pairs, `key: |` block scalars followed by indented raw
//! lines. Values pass through [`escape`](crate::escape::escape) at the
//! point of formatting.

use std::io::{self, Write};

use indexmap::IndexMap;

use crate::escape::escape;
use crate::registry::{MethodRecord, Registry};

/// Writes the structured report to an output sink.
pub struct Emitter<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, quiet: false }
    }

    /// Suppress per-entry detail. Summary output is unaffected.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Writes one line at the given nesting level.
    pub fn line(&mut self, nest: usize, s: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", "  ".repeat(nest), s)
    }

    /// Writes one line unless quiet mode is on.
    pub fn detail(&mut self, nest: usize, s: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(nest, s)
    }

    /// Emits a declaration entry: a `- main_key: value` line followed by
    /// sibling keys indented under it.
    ///
    /// A sibling with one value becomes `key: value`; with several, a
    /// `key:` header plus `- ` items; with none it is omitted. Siblings
    /// emit in the order given, keeping output deterministic. The whole
    /// entry counts as detail and disappears in quiet mode.
    pub fn dict(
        &mut self,
        nest: usize,
        main_key: &str,
        main_value: &str,
        entries: &[(&str, Vec<String>)],
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.line(nest, &format!("- {}: {}", main_key, escape(main_value)))?;
        for (key, values) in entries {
            match values.len() {
                0 => {}
                1 => self.line(nest, &format!("  {}: {}", key, escape(&values[0])))?,
                _ => {
                    self.line(nest, &format!("  {}:", key))?;
                    for value in values {
                        self.line(nest, &format!("    - {}", escape(value)))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Emits the front-matter block naming the analyzed inputs.
    pub fn workplan(&mut self, inputs: &[String]) -> io::Result<()> {
        self.line(0, ".workplan:")?;
        self.line(1, "inputs:")?;
        for input in inputs {
            self.line(2, &format!("- {}", input))?;
        }
        Ok(())
    }

    /// Opens the trailing summary block.
    pub fn footer(&mut self) -> io::Result<()> {
        self.line(0, ".footer:")
    }

    /// Emits the unused-member grouping as nested lists keyed by
    /// declaring type.
    pub fn unused(&mut self, groups: &IndexMap<String, Vec<String>>) -> io::Result<()> {
        self.line(1, "unused:")?;
        for (receiver, names) in groups {
            self.line(2, &format!("{}:", escape(receiver)))?;
            for name in names {
                self.line(3, &format!("- {}", escape(name)))?;
            }
        }
        Ok(())
    }

    /// Emits the call-count histogram as a block scalar.
    ///
    /// Non-skipped records sort ascending by invocation count; equal
    /// counts keep first-seen order. Each line is
    /// `count; rendered; module`, with the attribute list appended when
    /// the record carries attributes.
    pub fn callstats(&mut self, registry: &Registry) -> io::Result<()> {
        self.line(1, "callstats: |")?;

        let mut records: Vec<&MethodRecord> =
            registry.invocations().filter(|r| !r.skip).collect();
        records.sort_by_key(|r| r.count);

        for record in records {
            let mut entry = format!("{}; {}; {}", record.count, record.rendered, record.module);
            if !record.attributes.is_empty() {
                entry.push_str("; ");
                entry.push_str(&record.attributes.join(","));
            }
            self.line(2, &entry)?;
        }
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
