//! error types
//!
//! structured errors for schema validation, name resolution, and query
//! building. every generator-time error is fatal to the run: emitting a
//! builder module and a model module that disagree is worse than failing.

use crate::names::NameScope;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the generator and the dynamic query builder
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("non-nullable input cycle: {}", .cycle.join(" -> "))]
    CyclicInputType {
        /// input object names along the cycle, first repeated last
        cycle: Vec<String>,
    },

    #[error("name collision in {scope} scope: `{first}` and `{second}` both resolve to `{resolved}`")]
    NameCollision {
        scope: NameScope,
        first: String,
        second: String,
        resolved: String,
    },

    #[error("unknown field `{field}` on type `{type_name}`")]
    UnknownField { type_name: String, field: String },

    #[error("argument `{argument}` of `{field}` expects {expected}: {message}")]
    ArgumentType {
        field: String,
        argument: String,
        /// graphql type the argument is declared with
        expected: String,
        message: String,
    },

    #[error("invalid selection at `{context}`: {message}")]
    InvalidSelection { context: String, message: String },
}

/// schema-level validation failure
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("type `{name}` is referenced by `{referenced_by}` but never declared")]
    UnresolvedType { name: String, referenced_by: String },

    #[error("duplicate type name `{name}`")]
    DuplicateType { name: String },

    #[error("union `{union_name}` member `{member}` is not an object type")]
    NonObjectUnionMember { union_name: String, member: String },

    #[error("type `{implementor}` implements `{interface}` but omits or changes field `{field}`")]
    MissingInterfaceField {
        interface: String,
        implementor: String,
        field: String,
    },

    #[error("type `{implementor}` implements `{name}`, which is not an interface")]
    NonInterfaceImplements { implementor: String, name: String },

    #[error("argument `{argument}` of `{referenced_by}` must use an input type, found `{type_name}`")]
    NonInputArgument {
        referenced_by: String,
        argument: String,
        type_name: String,
    },

    #[error("schema has no query root")]
    MissingQueryRoot,

    #[error("root type `{name}` must be an object type")]
    NonObjectRoot { name: String },

    #[error("unsupported schema input: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let err = Error::CyclicInputType {
            cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };
        assert_eq!(err.to_string(), "non-nullable input cycle: A -> B -> A");
    }

    #[test]
    fn test_schema_error_wraps_transparently() {
        let err = Error::from(SchemaError::MissingQueryRoot);
        assert_eq!(err.to_string(), "schema has no query root");
    }

    #[test]
    fn test_name_collision_display() {
        let err = Error::NameCollision {
            scope: NameScope::Field,
            first: "fooBar".to_string(),
            second: "foo_bar".to_string(),
            resolved: "foo_bar".to_string(),
        };
        assert!(err.to_string().contains("field scope"));
        assert!(err.to_string().contains("`foo_bar`"));
    }
}
