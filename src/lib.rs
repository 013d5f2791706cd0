//! gqlgen
//!
//! this crate translates a parsed graphql schema into two generated rust
//! modules: serde data models that validate server responses, and query
//! builders that assemble operation documents. the core is pure: sdl
//! parsing comes from `graphql-parser`, file writing belongs to the
//! caller (or the `gqlgen` binary).
//!
//! ## quick start
//!
//! ```
//! use gqlgen::{generate, GeneratorConfig};
//!
//! let document = graphql_parser::schema::parse_schema::<String>(
//!     "type Query { hello: String }",
//! )?;
//! let modules = generate(&document, GeneratorConfig::default())?;
//! assert!(modules.models.contains("generated data models"));
//! assert!(modules.builders.contains("generated query builders"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## dynamic queries
//!
//! generated builders cover the common case; [`SelectionBuilder`] and
//! [`OperationBuilder`] build schema-validated documents at runtime when
//! field names are only known then.

mod config;
mod decode;
mod emit_builders;
mod emit_models;
mod error;
mod generator;
mod names;
mod query;
mod response;
mod schema;
mod typemap;

pub use config::GeneratorConfig;
pub use decode::{from_str, from_value, DecodeError};
pub use error::{Error, Result, SchemaError};
pub use generator::{generate, GeneratedModules, Generator};
pub use names::{to_pascal_case, to_snake_case, to_upper_camel, NameResolver, NameScope, NameTable};
pub use query::{
    ArgValue, BuiltOperation, FieldSelection, InlineFragment, OperationBuilder, SelectionBuilder,
    SelectionSet, VariableDef,
};
pub use response::{GraphQlError, GraphQlLocation, GraphQlResponse};
pub use schema::{
    Deprecation, EnumDef, EnumValueDef, FieldDef, InputObjectDef, InputValueDef, InterfaceDef,
    ListWrapping, ObjectDef, OperationKind, ScalarDef, SchemaModel, TypeDef, TypeRef, UnionDef,
    Wrapping, BUILTIN_SCALARS,
};
pub use typemap::TypeMapper;
