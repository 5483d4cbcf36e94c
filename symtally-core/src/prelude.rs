//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use symtally_core::prelude::*;
//! ```

// Core error types
pub use crate::error::{SymtallyError, SymtallyResult};

// Rendering
pub use crate::escape::escape;
pub use crate::render::{render_type, TypeShape};

// Event model
pub use crate::event::{filter_units, MethodSymbol, SourceEvent, TypeDecl};

// Aggregation and analysis
pub use crate::registry::{MethodRecord, Registry};
pub use crate::unused::find_unused;

// Emission and orchestration
pub use crate::driver::{Driver, SummaryOptions};
pub use crate::emit::Emitter;

// Event-stream loading
pub use crate::load::{gather_event_files, load_all_events, load_events};

// Configuration
pub use crate::config::{load_config, SymtallyConfig};
