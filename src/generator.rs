//! generation pipeline
//!
//! builds the schema model, resolves every name, records the scalar
//! mapping, then runs the two emission passes. emission is pure text out
//! and byte-deterministic for an unchanged schema and configuration.

use crate::config::GeneratorConfig;
use crate::emit_builders;
use crate::emit_models;
use crate::error::Result;
use crate::names::{NameResolver, NameTable};
use crate::schema::SchemaModel;
use crate::typemap::{scalar_table, TypeMapper};
use graphql_parser::schema as ast;
use std::collections::BTreeMap;

/// the two generated source artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModules {
    /// data-model module text
    pub models: String,
    /// query-builder module text
    pub builders: String,
}

/// one generation run over a parsed schema
#[derive(Debug)]
pub struct Generator {
    model: SchemaModel,
    names: NameTable,
    resolver: NameResolver,
    scalars: BTreeMap<String, String>,
    config: GeneratorConfig,
}

impl Generator {
    /// build the model and resolve names; all schema and naming errors
    /// surface here, before any text is emitted
    pub fn new(document: &ast::Document<'_, String>, config: GeneratorConfig) -> Result<Self> {
        let model = SchemaModel::build(document)?;
        let resolver = NameResolver::new(config.reserved_word_suffix.clone());
        let names = NameTable::build(&model, &resolver)?;
        let scalars = scalar_table(&model, &config);
        Ok(Self {
            model,
            names,
            resolver,
            scalars,
            config,
        })
    }

    /// the validated schema model
    pub fn model(&self) -> &SchemaModel {
        &self.model
    }

    fn mapper(&self) -> TypeMapper<'_> {
        TypeMapper::new(&self.model, &self.names, &self.scalars)
    }

    /// emit the data-model module
    pub fn emit_data_models(&self) -> String {
        let out = emit_models::emit(&self.model, &self.names, &self.mapper(), &self.config);
        tracing::debug!(bytes = out.len(), "emitted data models");
        out
    }

    /// emit the query-builder module
    pub fn emit_query_builders(&self) -> String {
        let out = emit_builders::emit(
            &self.model,
            &self.names,
            &self.resolver,
            &self.mapper(),
            &self.config,
        );
        tracing::debug!(bytes = out.len(), "emitted query builders");
        out
    }
}

/// run a whole generation pass and return both artifacts
pub fn generate(
    document: &ast::Document<'_, String>,
    config: GeneratorConfig,
) -> Result<GeneratedModules> {
    let generator = Generator::new(document, config)?;
    Ok(GeneratedModules {
        models: generator.emit_data_models(),
        builders: generator.emit_query_builders(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::schema::parse_schema;

    #[test]
    fn test_generate_is_deterministic() {
        let doc = parse_schema::<String>(
            "type Query { user(id: ID!): User } type User { id: ID! name: String }",
        )
        .unwrap();
        let first = generate(&doc, GeneratorConfig::default()).unwrap();
        let second = generate(&doc, GeneratorConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_schema_errors_surface_before_emission() {
        let doc = parse_schema::<String>("type Query { user: Ghost }").unwrap();
        assert!(Generator::new(&doc, GeneratorConfig::default()).is_err());
    }
}
