//! symtally-core: symbol inventory and call-statistics reporting library.
//!
//! This library is the aggregation and reporting engine behind the
//! `symtally` tool. A front end (parser plus semantic resolver, outside
//! this crate) walks compiled sources and records what it finds as an
//! ordered event stream; this crate folds that stream into a
//! deterministic, human-readable block report.
//!
//! # Features
//!
//! - **Canonical signature rendering**: argument-first generic form
//!   (`string List`), `arr`-suffixed arrays, unbounded nesting
//! - **Invocation aggregation**: per-symbol call counts deduplicated by
//!   canonical identity, insertion-ordered for stable output
//! - **Unused-member detection**: declared-vs-invoked set difference
//!   over abstract/interface members, grouped by declaring type
//! - **Structured report emission**: per-unit declaration blocks,
//!   call-site lines, a call-count histogram, and an unused summary
//! - **Event-stream loading**: JSON Lines discovery files gathered from
//!   directories and decoded in parallel
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use symtally_core::prelude::*;
//!
//! let files = gather_event_files(Path::new("frontend-out/"))?;
//! let events = load_all_events(&files)?;
//!
//! let emitter = Emitter::new(std::io::stdout().lock());
//! let mut driver = Driver::new(emitter);
//! for event in &events {
//!     driver.handle(event)?;
//! }
//! driver.finish(&SummaryOptions::default())?;
//! ```
//!
//! # Module Organization
//!
//! - [`render`]: canonical type rendering over the `TypeShape` variant
//! - [`escape`]: minimal block-format escaping
//! - [`event`]: the front-end discovery-stream interface
//! - [`registry`]: invocation cache and declaration list
//! - [`unused`]: unused abstract/interface member analysis
//! - [`emit`]: structured report emission
//! - [`driver`]: event dispatch and run orchestration
//! - [`load`]: event-file discovery and JSONL decoding
//! - [`config`]: symtally.toml loading
//! - [`error`]: typed error handling
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod driver;
pub mod emit;
pub mod error;
pub mod escape;
pub mod event;
pub mod load;
pub mod logging;
pub mod prelude;
pub mod registry;
pub mod render;
pub mod unused;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{IoResultExt, SymtallyError, SymtallyResult};

// Rendering and escaping
pub use escape::escape;
pub use render::{render_type, TypeShape};

// Event model
pub use event::{
    filter_units, CtorDecl, FieldDecl, LocalDecl, MethodSymbol, PropertyDecl, SourceEvent,
    TypeDecl,
};

// Aggregation
pub use registry::{MethodRecord, Registry, SKIP_MODULES};

// Analysis
pub use unused::find_unused;

// Emission and orchestration
pub use driver::{Driver, SummaryOptions};
pub use emit::Emitter;

// Event-stream loading
pub use load::{gather_event_files, load_all_events, load_events};

// Configuration
pub use config::{load_config, SummaryConfig, SymtallyConfig};

// Logging
pub use logging::init_structured_logging;
