//! The discovery-stream interface between a front end and the core.
//!
//! A front end (parser plus semantic resolver, outside this crate) walks
//! its sources in document order and records what it finds as a sequence
//! of [`SourceEvent`]s. The core consumes that sequence as-is: it never
//! sees source text, only fully resolved symbol payloads. Events travel
//! as JSON Lines (`*.jsonl`, one event object per line), which keeps the
//! boundary inspectable and replayable.
//!
//! Every symbol payload is self-contained: declaring/receiver type,
//! containing module, declaration-kind flag, parameter types, and
//! attribute names arrive pre-resolved so the registry and renderer can
//! consume them through plain field access.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::render::TypeShape;

/// A resolved method reference, the payload of declaration and
/// invocation events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Canonical identity string, unique per logical symbol across the
    /// run. Two events with equal keys refer to the same symbol.
    pub key: String,
    /// Bare method name without generic arguments.
    pub name: String,
    /// Receiver/declaring type. Absent for free functions or malformed
    /// symbols; the renderer degrades to an empty string.
    #[serde(default)]
    pub receiver: Option<TypeShape>,
    /// Name of the containing module/assembly.
    #[serde(default)]
    pub module: String,
    /// Whether this is an abstract or interface member.
    #[serde(default)]
    pub is_abstract: bool,
    /// Generic type arguments of the invocation or declaration.
    #[serde(default)]
    pub generic_args: Vec<TypeShape>,
    /// Parameter types in declaration order.
    #[serde(default)]
    pub params: Vec<TypeShape>,
    /// Return type, when the front end resolves one.
    #[serde(default)]
    pub return_type: Option<TypeShape>,
    /// Attribute/decorator names attached to the symbol.
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// A declared type, emitted as a header block with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Display string of the original definition.
    pub display: String,
    #[serde(default)]
    pub accessibility: String,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Base type display string, if any. The universal base type is
    /// suppressed at emission.
    #[serde(default)]
    pub base: Option<String>,
}

/// A declared constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtorDecl {
    /// Metadata name of the constructed type.
    pub type_name: String,
    #[serde(default)]
    pub params: Vec<TypeShape>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// A declared property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeShape,
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// A declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeShape,
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// A declared local variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalDecl {
    pub name: String,
    pub ty: TypeShape,
}

/// One discovery event, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SourceEvent {
    /// A new compilation unit (project/module) begins. Subsequent events
    /// belong to it until the next `UnitStarted`.
    UnitStarted { name: String },
    TypeDeclared { symbol: TypeDecl },
    MethodDeclared {
        symbol: MethodSymbol,
        /// Raw source parameter list, when the front end keeps it.
        #[serde(default)]
        src_params: Option<String>,
        /// Raw source return type, when the front end keeps it.
        #[serde(default)]
        src_return: Option<String>,
    },
    CtorDeclared { symbol: CtorDecl },
    PropertyDeclared { symbol: PropertyDecl },
    FieldDeclared { symbol: FieldDecl },
    LocalDeclared { symbol: LocalDecl },
    Invocation { symbol: MethodSymbol },
}

impl SourceEvent {
    /// The unit name if this event opens a compilation unit.
    pub fn unit_name(&self) -> Option<&str> {
        match self {
            Self::UnitStarted { name } => Some(name),
            _ => None,
        }
    }
}

/// Keeps only events belonging to compilation units whose name matches
/// `pattern`.
///
/// Events preceding the first `UnitStarted` carry no unit and are
/// dropped when a filter is in force. Non-matching units are skipped
/// wholesale, so none of their declarations or invocations reach the
/// registry.
pub fn filter_units(events: Vec<SourceEvent>, pattern: &Regex) -> Vec<SourceEvent> {
    let mut keep = false;
    events
        .into_iter()
        .filter(|event| {
            if let Some(name) = event.unit_name() {
                keep = pattern.is_match(name);
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str) -> SourceEvent {
        SourceEvent::UnitStarted {
            name: name.to_string(),
        }
    }

    fn local(name: &str) -> SourceEvent {
        SourceEvent::LocalDeclared {
            symbol: LocalDecl {
                name: name.to_string(),
                ty: TypeShape::plain("int"),
            },
        }
    }

    #[test]
    fn test_filter_keeps_matching_units() {
        let events = vec![unit("Core"), local("a"), unit("Tests"), local("b")];
        let pattern = Regex::new("Core").unwrap();

        let filtered = filter_units(events, &pattern);
        assert_eq!(filtered, vec![unit("Core"), local("a")]);
    }

    #[test]
    fn test_filter_drops_events_before_first_unit() {
        let events = vec![local("stray"), unit("Core"), local("a")];
        let pattern = Regex::new(".*").unwrap();

        let filtered = filter_units(events, &pattern);
        assert_eq!(filtered, vec![unit("Core"), local("a")]);
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let event = SourceEvent::Invocation {
            symbol: MethodSymbol {
                key: "TypeA.M1()".to_string(),
                name: "M1".to_string(),
                receiver: Some(TypeShape::plain("TypeA")),
                module: "App".to_string(),
                is_abstract: true,
                generic_args: vec![],
                params: vec![],
                return_type: None,
                attributes: vec![],
            },
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: SourceEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_minimal_event_json_applies_defaults() {
        // A front end only has to supply key and name; everything else
        // defaults to absent/empty.
        let json = r#"{"event":"invocation","symbol":{"key":"k","name":"M"}}"#;
        let event: SourceEvent = serde_json::from_str(json).unwrap();

        match event {
            SourceEvent::Invocation { symbol } => {
                assert_eq!(symbol.name, "M");
                assert!(symbol.receiver.is_none());
                assert!(!symbol.is_abstract);
                assert!(symbol.attributes.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
