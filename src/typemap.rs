//! type mapping
//!
//! pure mapping from schema type references to rust type expressions.
//! composition is innermost-first: the named type maps to a base
//! expression, then each nullability and list level wraps it in `Option`
//! and `Vec`, so `[String!]` and `[String]!` never conflate.

use crate::config::GeneratorConfig;
use crate::names::NameTable;
use crate::schema::{ListWrapping, SchemaModel, TypeDef, TypeRef};
use std::collections::BTreeMap;

/// effective scalar table for a run: built-ins, declared custom scalars,
/// then config overrides. computed once so both emitters share one
/// mapping for every scalar.
pub(crate) fn scalar_table(
    model: &SchemaModel,
    config: &GeneratorConfig,
) -> BTreeMap<String, String> {
    let mut table = BTreeMap::new();
    table.insert("ID".to_string(), "String".to_string());
    table.insert("String".to_string(), "String".to_string());
    table.insert("Int".to_string(), "i64".to_string());
    table.insert("Float".to_string(), "f64".to_string());
    table.insert("Boolean".to_string(), "bool".to_string());

    for def in model.types() {
        if let TypeDef::Scalar(scalar) = def {
            if scalar.builtin {
                continue;
            }
            let target = match config.custom_scalars.get(&scalar.name) {
                Some(target) => target.clone(),
                None => {
                    tracing::debug!(scalar = %scalar.name, "custom scalar mapped to opaque String");
                    "String".to_string()
                }
            };
            table.insert(scalar.name.clone(), target);
        }
    }

    for (name, target) in &config.custom_scalars {
        table.insert(name.clone(), target.clone());
    }

    table
}

/// maps type references to rust type expressions
#[derive(Debug)]
pub struct TypeMapper<'a> {
    model: &'a SchemaModel,
    names: &'a NameTable,
    scalars: &'a BTreeMap<String, String>,
}

impl<'a> TypeMapper<'a> {
    pub(crate) fn new(
        model: &'a SchemaModel,
        names: &'a NameTable,
        scalars: &'a BTreeMap<String, String>,
    ) -> Self {
        Self {
            model,
            names,
            scalars,
        }
    }

    /// target type for a scalar name, if it is a scalar
    pub fn scalar_target(&self, name: &str) -> Option<&str> {
        self.scalars.get(name).map(String::as_str)
    }

    /// rust type expression for a record field
    ///
    /// composite references with no list wrapping are boxed so
    /// self-referential record types stay representable.
    pub fn map(&self, ty: &TypeRef) -> String {
        self.compose(ty, true)
    }

    /// rust type expression for a method argument; no boxing needed
    pub fn map_argument(&self, ty: &TypeRef) -> String {
        self.compose(ty, false)
    }

    fn compose(&self, ty: &TypeRef, box_composites: bool) -> String {
        let composite = matches!(
            self.model.get(ty.name()),
            Some(
                TypeDef::Object(_)
                    | TypeDef::Interface(_)
                    | TypeDef::Union(_)
                    | TypeDef::InputObject(_)
            )
        );
        let boxed = box_composites && composite && ty.wrapping().list_depth() == 0;

        let mut expr = self.base_expr(ty.name(), boxed);
        if !ty.wrapping().inner_nonnull() {
            expr = format!("Option<{expr}>");
        }
        for level in ty.wrapping().lists() {
            expr = format!("Vec<{expr}>");
            if *level == ListWrapping::NullableList {
                expr = format!("Option<{expr}>");
            }
        }
        expr
    }

    fn base_expr(&self, name: &str, boxed: bool) -> String {
        match self.model.get(name) {
            Some(TypeDef::Scalar(scalar)) => self
                .scalars
                .get(&scalar.name)
                .cloned()
                .unwrap_or_else(|| "String".to_string()),
            Some(def) => {
                let ident = self.names.type_name(def.name());
                if boxed {
                    format!("Box<{ident}>")
                } else {
                    ident.to_string()
                }
            }
            // unresolved names cannot survive SchemaModel::build
            None => "serde_json::Value".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameResolver;
    use crate::schema::{OperationKind, Wrapping};
    use graphql_parser::schema::parse_schema;

    struct Fixture {
        model: SchemaModel,
        names: NameTable,
        scalars: BTreeMap<String, String>,
    }

    impl Fixture {
        fn new(sdl: &str, config: GeneratorConfig) -> Self {
            let doc = parse_schema::<String>(sdl).expect("parse");
            let model = SchemaModel::build(&doc).expect("build");
            let resolver = NameResolver::new(config.reserved_word_suffix.clone());
            let names = NameTable::build(&model, &resolver).expect("names");
            let scalars = scalar_table(&model, &config);
            Self {
                model,
                names,
                scalars,
            }
        }

        fn mapper(&self) -> TypeMapper<'_> {
            TypeMapper::new(&self.model, &self.names, &self.scalars)
        }

        fn map_query_fields(&self) -> Vec<String> {
            let mapper = self.mapper();
            self.model
                .root(OperationKind::Query)
                .expect("query root")
                .fields
                .iter()
                .map(|f| mapper.map(&f.ty))
                .collect()
        }
    }

    #[test]
    fn test_builtin_scalars() {
        let fixture = Fixture::new(
            "type Query { a: ID! b: String c: Int! d: Float e: Boolean! }",
            GeneratorConfig::default(),
        );
        assert_eq!(
            fixture.map_query_fields(),
            ["String", "Option<String>", "i64", "Option<f64>", "bool"]
        );
    }

    #[test]
    fn test_list_nesting_is_distinct() {
        let fixture = Fixture::new(
            "type Query { a: [[String!]]! b: [[String]!]! c: [[String!]!]! }",
            GeneratorConfig::default(),
        );
        assert_eq!(
            fixture.map_query_fields(),
            [
                "Vec<Option<Vec<String>>>",
                "Vec<Vec<Option<String>>>",
                "Vec<Vec<String>>"
            ]
        );
    }

    #[test]
    fn test_required_list_of_nullable_entries() {
        let fixture = Fixture::new(
            "type Query { nicknames: [String]! }",
            GeneratorConfig::default(),
        );
        assert_eq!(fixture.map_query_fields(), ["Vec<Option<String>>"]);
    }

    #[test]
    fn test_composite_boxing() {
        let fixture = Fixture::new(
            "type Query { me: User! friend: User friends: [User!]! } \
             type User { id: ID! }",
            GeneratorConfig::default(),
        );
        assert_eq!(
            fixture.map_query_fields(),
            ["Box<User>", "Option<Box<User>>", "Vec<User>"]
        );
    }

    #[test]
    fn test_argument_mapping_skips_box() {
        let fixture = Fixture::new(
            "type Query { search(filter: Filter): String } \
             input Filter { term: String }",
            GeneratorConfig::default(),
        );
        let field = fixture.model.field("Query", "search").unwrap();
        let mapper = fixture.mapper();
        assert_eq!(mapper.map_argument(&field.arguments[0].ty), "Option<Filter>");
        assert_eq!(mapper.map(&field.arguments[0].ty), "Option<Box<Filter>>");
    }

    #[test]
    fn test_custom_scalar_defaults_to_string() {
        let fixture = Fixture::new(
            "scalar DateTime type Query { at: DateTime! }",
            GeneratorConfig::default(),
        );
        assert_eq!(fixture.map_query_fields(), ["String"]);
        assert_eq!(fixture.mapper().scalar_target("DateTime"), Some("String"));
    }

    #[test]
    fn test_custom_scalar_override() {
        let config = GeneratorConfig::default().with_custom_scalar("DateTime", "time::OffsetDateTime");
        let fixture = Fixture::new("scalar DateTime type Query { at: DateTime! }", config);
        assert_eq!(fixture.map_query_fields(), ["time::OffsetDateTime"]);
    }

    #[test]
    fn test_builtin_table_is_overridable() {
        let config = GeneratorConfig::default().with_custom_scalar("ID", "uuid::Uuid");
        let fixture = Fixture::new("type Query { id: ID! }", config);
        assert_eq!(fixture.map_query_fields(), ["uuid::Uuid"]);
    }

    #[test]
    fn test_mapping_is_pure() {
        let fixture = Fixture::new("type Query { a: [Int] }", GeneratorConfig::default());
        let ty = TypeRef::new("Int", Wrapping::nullable().in_list(false));
        let mapper = fixture.mapper();
        assert_eq!(mapper.map(&ty), mapper.map(&ty));
        assert_eq!(mapper.map(&ty), "Option<Vec<Option<i64>>>");
    }
}
