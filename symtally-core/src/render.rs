//! Canonical rendering of resolved type references.
//!
//! The front end hands over every type as a [`TypeShape`]: a closed
//! variant over the three structures the renderer distinguishes (named
//! types with optional generic arguments, arrays, everything else).
//! Rendering is pure and recursive with no depth limit beyond the stack.

use serde::{Deserialize, Serialize};

/// Structural shape of a resolved type, as supplied by the front end.
///
/// Every variant carries the front end's default display string so the
/// renderer can fall back to it without reaching into front-end internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// A named type. `args` is empty for non-generic types.
    Named {
        display: String,
        /// Bare type name without generic arguments.
        name: String,
        #[serde(default)]
        args: Vec<TypeShape>,
    },
    /// An array over an element type.
    Array {
        display: String,
        element: Box<TypeShape>,
    },
    /// Anything else (type parameters, pointers, unresolved types).
    Other { display: String },
}

impl TypeShape {
    /// A non-generic named or primitive type from its display string.
    pub fn plain(display: impl Into<String>) -> Self {
        Self::Other {
            display: display.into(),
        }
    }

    /// A generic instantiation: bare name plus resolved arguments.
    pub fn generic(display: impl Into<String>, name: impl Into<String>, args: Vec<TypeShape>) -> Self {
        Self::Named {
            display: display.into(),
            name: name.into(),
            args,
        }
    }

    /// An array of `element`. The display form follows the common
    /// `T[]` convention; front ends may override it in the event stream.
    pub fn array(element: TypeShape) -> Self {
        let display = format!("{}[]", element.display());
        Self::Array {
            display,
            element: Box::new(element),
        }
    }

    /// The front end's default display string for this type.
    pub fn display(&self) -> &str {
        match self {
            Self::Named { display, .. } => display,
            Self::Array { display, .. } => display,
            Self::Other { display } => display,
        }
    }
}

/// Renders a type to its canonical report form.
///
/// Generic instantiations render argument-first: each argument is rendered
/// recursively, space-joined, and followed by the bare type name, so
/// `List<string>` becomes `string List` and `Foo<Bar<string>>` becomes
/// `string Bar Foo`. Arrays append ` arr` to the rendered element type
/// and stack for nested arrays. Everything else renders as its display
/// string.
pub fn render_type(ty: &TypeShape) -> String {
    match ty {
        TypeShape::Named { display, name, args } => {
            if args.is_empty() {
                display.clone()
            } else {
                let joined = args.iter().map(render_type).collect::<Vec<_>>().join(" ");
                format!("{} {}", joined, name)
            }
        }
        TypeShape::Array { element, .. } => format!("{} arr", render_type(element)),
        TypeShape::Other { display } => display.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_type_uses_display() {
        assert_eq!(render_type(&TypeShape::plain("int")), "int");
        assert_eq!(render_type(&TypeShape::plain("System.String")), "System.String");
    }

    #[test]
    fn test_named_without_args_uses_display() {
        let ty = TypeShape::generic("MyNamespace.Widget", "Widget", vec![]);
        assert_eq!(render_type(&ty), "MyNamespace.Widget");
    }

    #[test]
    fn test_generic_renders_argument_first() {
        let ty = TypeShape::generic("List<string>", "List", vec![TypeShape::plain("string")]);
        assert_eq!(render_type(&ty), "string List");
    }

    #[test]
    fn test_nested_generic_recurses_fully() {
        let inner = TypeShape::generic("Bar<string>", "Bar", vec![TypeShape::plain("string")]);
        let ty = TypeShape::generic("Foo<Bar<string>>", "Foo", vec![inner]);
        assert_eq!(render_type(&ty), "string Bar Foo");
    }

    #[test]
    fn test_multiple_args_space_joined() {
        let ty = TypeShape::generic(
            "Dictionary<string, int>",
            "Dictionary",
            vec![TypeShape::plain("string"), TypeShape::plain("int")],
        );
        assert_eq!(render_type(&ty), "string int Dictionary");
    }

    #[test]
    fn test_array_rendering() {
        assert_eq!(render_type(&TypeShape::array(TypeShape::plain("int"))), "int arr");
    }

    #[test]
    fn test_array_of_array_stacks() {
        let ty = TypeShape::array(TypeShape::array(TypeShape::plain("int")));
        assert_eq!(render_type(&ty), "int arr arr");
    }

    #[test]
    fn test_array_of_generic() {
        let list = TypeShape::generic("List<string>", "List", vec![TypeShape::plain("string")]);
        assert_eq!(render_type(&TypeShape::array(list)), "string List arr");
    }

    #[test]
    fn test_render_is_referentially_transparent() {
        let ty = TypeShape::generic("List<int[]>", "List", vec![TypeShape::array(TypeShape::plain("int"))]);
        assert_eq!(render_type(&ty), render_type(&ty));
    }
}
