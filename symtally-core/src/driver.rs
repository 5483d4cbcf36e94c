//! Event dispatch: wires the discovery stream to registry and emitter.
//!
//! The driver is the run's top-level state holder. It owns the registry
//! and the emitter, consumes [`SourceEvent`]s one at a time in document
//! order, and knows which events aggregate (method declarations and
//! invocations) versus which only emit (types, constructors, properties,
//! fields, locals). After the last event, [`Driver::finish`] produces
//! the trailing summary block.
//!
//! Processing is single-threaded by design: the registry's
//! dedup-by-key invariant assumes one writer, so any future parallel
//! front end must serialize its calls into one driver.

use std::io::{self, Write};

use crate::emit::Emitter;
use crate::escape::escape;
use crate::event::{CtorDecl, FieldDecl, LocalDecl, MethodSymbol, PropertyDecl, SourceEvent, TypeDecl};
use crate::registry::Registry;
use crate::render::render_type;
use crate::unused::find_unused;

/// The base type every type implicitly derives from; omitted from type
/// declaration blocks.
const UNIVERSAL_BASE: &str = "object";

/// Which sections the trailing summary carries.
#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    /// Emit the unused abstract/interface member grouping.
    pub unused: bool,
    /// Emit the call-count histogram.
    pub callstats: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            unused: true,
            callstats: false,
        }
    }
}

/// Consumes discovery events and produces the report.
pub struct Driver<W: Write> {
    registry: Registry,
    emitter: Emitter<W>,
}

impl<W: Write> Driver<W> {
    pub fn new(emitter: Emitter<W>) -> Self {
        Self {
            registry: Registry::new(),
            emitter,
        }
    }

    /// The registry accumulated so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Emits the front-matter block naming the inputs under analysis.
    pub fn start(&mut self, inputs: &[String]) -> io::Result<()> {
        self.emitter.workplan(inputs)
    }

    /// Dispatches one event to its handler.
    pub fn handle(&mut self, event: &SourceEvent) -> io::Result<()> {
        match event {
            SourceEvent::UnitStarted { name } => self.on_unit_started(name),
            SourceEvent::TypeDeclared { symbol } => self.on_type_declared(symbol),
            SourceEvent::MethodDeclared {
                symbol,
                src_params,
                src_return,
            } => self.on_method_declared(symbol, src_params.as_deref(), src_return.as_deref()),
            SourceEvent::CtorDeclared { symbol } => self.on_ctor_declared(symbol),
            SourceEvent::PropertyDeclared { symbol } => self.on_property_declared(symbol),
            SourceEvent::FieldDeclared { symbol } => self.on_field_declared(symbol),
            SourceEvent::LocalDeclared { symbol } => self.on_local_declared(symbol),
            SourceEvent::Invocation { symbol } => self.on_invocation(symbol),
        }
    }

    /// Emits the footer with the selected summary sections and returns
    /// the final registry.
    pub fn finish(mut self, summary: &SummaryOptions) -> io::Result<Registry> {
        self.emitter.footer()?;
        if summary.unused {
            let groups = find_unused(&self.registry);
            self.emitter.unused(&groups)?;
        }
        if summary.callstats {
            self.emitter.callstats(&self.registry)?;
        }
        self.emitter.flush()?;
        Ok(self.registry)
    }

    fn on_unit_started(&mut self, name: &str) -> io::Result<()> {
        self.emitter.detail(0, &format!(".unit: {}", escape(name)))
    }

    fn on_type_declared(&mut self, decl: &TypeDecl) -> io::Result<()> {
        self.emitter.detail(0, &format!("{}:", decl.display))?;

        let mut entries: Vec<(&str, Vec<String>)> = vec![
            ("attr", decl.attributes.clone()),
            ("interfaces", decl.interfaces.clone()),
        ];
        if let Some(base) = &decl.base {
            if base != UNIVERSAL_BASE {
                entries.push(("base", vec![base.clone()]));
            }
        }
        self.emitter.dict(1, "acc", &decl.accessibility, &entries)
    }

    /// Method declarations both emit detail and feed the registry's
    /// declaration list.
    fn on_method_declared(
        &mut self,
        sym: &MethodSymbol,
        src_params: Option<&str>,
        src_return: Option<&str>,
    ) -> io::Result<()> {
        let mut entries: Vec<(&str, Vec<String>)> = vec![
            ("param", sym.params.iter().map(render_type).collect()),
            ("attr", sym.attributes.clone()),
        ];
        if let Some(sp) = src_params {
            entries.push(("srcparam", vec![sp.to_string()]));
        }
        if let Some(sr) = src_return {
            entries.push(("srcret", vec![sr.to_string()]));
        }
        self.emitter.dict(1, "m", &sym.name, &entries)?;

        if let Some(ret) = &sym.return_type {
            self.emitter.detail(2, &format!("ret: {}", render_type(ret)))?;
        }

        self.registry.record_declaration(sym);
        Ok(())
    }

    fn on_ctor_declared(&mut self, decl: &CtorDecl) -> io::Result<()> {
        let entries: Vec<(&str, Vec<String>)> = vec![
            ("param", decl.params.iter().map(render_type).collect()),
            ("attr", decl.attributes.clone()),
        ];
        self.emitter.dict(1, "ctor", &decl.type_name, &entries)
    }

    fn on_property_declared(&mut self, decl: &PropertyDecl) -> io::Result<()> {
        let entries: Vec<(&str, Vec<String>)> = vec![("attr", decl.attributes.clone())];
        let main = format!("{} {}", decl.name, render_type(&decl.ty));
        self.emitter.dict(1, "p", &main, &entries)
    }

    fn on_field_declared(&mut self, decl: &FieldDecl) -> io::Result<()> {
        let entries: Vec<(&str, Vec<String>)> = vec![("attr", decl.attributes.clone())];
        let main = format!("{} {}", decl.name, render_type(&decl.ty));
        self.emitter.dict(1, "f", &main, &entries)
    }

    fn on_local_declared(&mut self, decl: &LocalDecl) -> io::Result<()> {
        let rendered = format!("{} {}", decl.name, render_type(&decl.ty));
        self.emitter.detail(1, &format!("- v: {}", escape(&rendered)))
    }

    /// Invocations feed the cache; the call-site line is suppressed for
    /// denylisted modules.
    fn on_invocation(&mut self, sym: &MethodSymbol) -> io::Result<()> {
        let record = self.registry.record_invocation(sym);
        if !record.skip {
            let line = format!("- call: {}", record.rendered);
            self.emitter.detail(1, &line)?;
        }
        Ok(())
    }
}
