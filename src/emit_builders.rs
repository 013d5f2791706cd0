//! query-builder emission
//!
//! emits one selection builder per selectable type reachable from the
//! operation roots, in declaration order. root builders bind operation
//! arguments as variables and produce a `BuiltOperation`; nested builders
//! compose selection sets. generated code drives the runtime selection
//! types in [`crate::query`], so emitted modules stay thin.

use crate::config::GeneratorConfig;
use crate::names::{NameResolver, NameScope, NameTable};
use crate::schema::{
    FieldDef, InterfaceDef, ObjectDef, OperationKind, SchemaModel, TypeDef, UnionDef,
};
use crate::typemap::TypeMapper;
use indexmap::IndexSet;

pub(crate) fn emit(
    model: &SchemaModel,
    names: &NameTable,
    resolver: &NameResolver,
    mapper: &TypeMapper<'_>,
    config: &GeneratorConfig,
) -> String {
    let ctx = Emitter {
        model,
        names,
        resolver,
        mapper,
        config,
    };
    let reachable = ctx.reachable();

    let mut out = String::new();
    out.push_str("//! generated query builders\n\n");
    out.push_str("#![allow(unused_imports)]\n\n");
    out.push_str(
        "use gqlgen::{BuiltOperation, FieldSelection, InlineFragment, OperationKind, SelectionSet, VariableDef};\n\n",
    );
    out.push_str("use super::models::*;\n\n");

    for def in model.types() {
        match def {
            TypeDef::Object(object) if model.is_root(&object.name) => {
                ctx.emit_root(&mut out, object);
            }
            TypeDef::Object(object) if reachable.contains(&object.name) => {
                ctx.emit_object_select(&mut out, object);
            }
            TypeDef::Interface(interface) if reachable.contains(&interface.name) => {
                ctx.emit_interface_select(&mut out, interface);
            }
            TypeDef::Union(union) if reachable.contains(&union.name) => {
                ctx.emit_union_select(&mut out, union);
            }
            _ => {}
        }
    }

    out
}

struct Emitter<'a> {
    model: &'a SchemaModel,
    names: &'a NameTable,
    resolver: &'a NameResolver,
    mapper: &'a TypeMapper<'a>,
    config: &'a GeneratorConfig,
}

impl<'a> Emitter<'a> {
    /// selectable types reachable from the operation roots, roots excluded
    fn reachable(&self) -> IndexSet<String> {
        let mut visited: IndexSet<String> = IndexSet::new();
        let mut stack: Vec<String> = Vec::new();
        for kind in [
            OperationKind::Query,
            OperationKind::Mutation,
            OperationKind::Subscription,
        ] {
            if let Some(root) = self.model.root(kind) {
                stack.push(root.name.clone());
            }
        }

        while let Some(name) = stack.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            match self.model.get(&name) {
                Some(TypeDef::Object(object)) => {
                    self.push_field_targets(&object.fields, &mut stack);
                }
                Some(TypeDef::Interface(interface)) => {
                    self.push_field_targets(&interface.fields, &mut stack);
                    for object in self.model.possible_types(&name) {
                        stack.push(object.name.clone());
                    }
                }
                Some(TypeDef::Union(_)) => {
                    for object in self.model.possible_types(&name) {
                        stack.push(object.name.clone());
                    }
                }
                _ => {}
            }
        }

        visited
            .into_iter()
            .filter(|name| !self.model.is_root(name))
            .collect()
    }

    fn push_field_targets(&self, fields: &[FieldDef], stack: &mut Vec<String>) {
        for field in fields {
            if !self.config.keeps(field.deprecation.as_ref()) {
                continue;
            }
            if let Some(target) = self.model.get(field.ty.name()) {
                if target.is_selectable() {
                    stack.push(target.name().to_string());
                }
            }
        }
    }

    fn select_ident(&self, type_name: &str) -> String {
        format!("{}Select", self.names.type_name(type_name))
    }

    fn has_required_args(&self, field: &FieldDef) -> bool {
        field.arguments.iter().any(|arg| arg.is_required())
    }

    fn emit_object_select(&self, out: &mut String, def: &ObjectDef) {
        let ident = self.select_ident(&def.name);
        out.push_str("#[derive(Debug, Clone, Default)]\n");
        out.push_str(&format!("pub struct {ident} {{\n"));
        out.push_str("    set: SelectionSet,\n");
        out.push_str("}\n\n");
        out.push_str(&format!("impl {ident} {{\n"));
        out.push_str("    pub fn new() -> Self {\n");
        out.push_str("        Self::default()\n");
        out.push_str("    }\n");
        self.emit_field_methods(out, &def.name, &def.fields);
        out.push_str("\n    pub fn into_set(self) -> SelectionSet {\n");
        out.push_str("        self.set\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");
    }

    fn emit_interface_select(&self, out: &mut String, def: &InterfaceDef) {
        let ident = self.select_ident(&def.name);
        self.emit_discriminated_header(out, &ident);
        self.emit_field_methods(out, &def.name, &def.fields);
        self.emit_fragment_methods(out, &def.name);
        out.push_str("\n    pub fn into_set(self) -> SelectionSet {\n");
        out.push_str("        self.set\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");
    }

    fn emit_union_select(&self, out: &mut String, def: &UnionDef) {
        let ident = self.select_ident(&def.name);
        self.emit_discriminated_header(out, &ident);
        self.emit_fragment_methods(out, &def.name);
        out.push_str("\n    pub fn into_set(self) -> SelectionSet {\n");
        out.push_str("        self.set\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");
    }

    /// builder struct whose selection starts with `__typename`; the data
    /// models discriminate on it
    fn emit_discriminated_header(&self, out: &mut String, ident: &str) {
        out.push_str("#[derive(Debug, Clone)]\n");
        out.push_str(&format!("pub struct {ident} {{\n"));
        out.push_str("    set: SelectionSet,\n");
        out.push_str("}\n\n");
        out.push_str(&format!("impl Default for {ident} {{\n"));
        out.push_str("    fn default() -> Self {\n");
        out.push_str("        Self::new()\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");
        out.push_str(&format!("impl {ident} {{\n"));
        out.push_str("    pub fn new() -> Self {\n");
        out.push_str("        let mut set = SelectionSet::new();\n");
        out.push_str("        set.push_field(FieldSelection::new(\"__typename\"));\n");
        out.push_str("        Self { set }\n");
        out.push_str("    }\n");
    }

    fn emit_fragment_methods(&self, out: &mut String, type_name: &str) {
        for object in self.model.possible_types(type_name) {
            let method = format!(
                "on_{}",
                self.resolver.resolve(&object.name, NameScope::Field)
            );
            let nested_ident = self.select_ident(&object.name);
            out.push_str(&format!(
                "\n    pub fn {method}(mut self, nested: {nested_ident}) -> Self {{\n"
            ));
            out.push_str(&format!(
                "        self.set.push_fragment(InlineFragment::new(\"{}\", nested.into_set()));\n",
                object.name
            ));
            out.push_str("        self\n");
            out.push_str("    }\n");
        }
    }

    fn emit_field_methods(&self, out: &mut String, type_name: &str, fields: &[FieldDef]) {
        for field in fields {
            if !self.config.keeps(field.deprecation.as_ref()) {
                continue;
            }
            // argument binding happens on operation fields; a nested field
            // with required arguments has no variable to bind them to
            if self.has_required_args(field) {
                continue;
            }
            let method = self.names.field_name(type_name, &field.name);
            let target = self.model.get(field.ty.name());
            let selectable = target.map(TypeDef::is_selectable).unwrap_or(false);
            if selectable {
                let nested_ident = self.select_ident(field.ty.name());
                out.push_str(&format!(
                    "\n    pub fn {method}(mut self, nested: {nested_ident}) -> Self {{\n"
                ));
                out.push_str(&format!(
                    "        self.set.push_field(FieldSelection::new(\"{}\").with_selection(nested.into_set()));\n",
                    field.name
                ));
            } else {
                out.push_str(&format!("\n    pub fn {method}(mut self) -> Self {{\n"));
                out.push_str(&format!(
                    "        self.set.push_field(FieldSelection::new(\"{}\"));\n",
                    field.name
                ));
            }
            out.push_str("        self\n");
            out.push_str("    }\n");
        }
    }

    fn emit_root(&self, out: &mut String, def: &ObjectDef) {
        let kind = if Some(def.name.as_str())
            == self.model.root(OperationKind::Query).map(|r| r.name.as_str())
        {
            OperationKind::Query
        } else if Some(def.name.as_str())
            == self
                .model
                .root(OperationKind::Mutation)
                .map(|r| r.name.as_str())
        {
            OperationKind::Mutation
        } else {
            OperationKind::Subscription
        };
        let kind_variant = match kind {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        };

        let ident = self.select_ident(&def.name);
        out.push_str("#[derive(Debug, Clone, Default)]\n");
        out.push_str(&format!("pub struct {ident} {{\n"));
        out.push_str("    set: SelectionSet,\n");
        out.push_str("    var_defs: Vec<VariableDef>,\n");
        out.push_str("    variables: serde_json::Map<String, serde_json::Value>,\n");
        out.push_str("}\n\n");
        out.push_str(&format!("impl {ident} {{\n"));
        out.push_str("    pub fn new() -> Self {\n");
        out.push_str("        Self::default()\n");
        out.push_str("    }\n");

        for field in &def.fields {
            if !self.config.keeps(field.deprecation.as_ref()) {
                continue;
            }
            self.emit_operation_method(out, &def.name, field);
        }

        out.push_str("\n    pub fn build(self) -> BuiltOperation {\n");
        out.push_str(&format!(
            "        BuiltOperation::new(OperationKind::{kind_variant}, self.var_defs, self.set, self.variables)\n"
        ));
        out.push_str("    }\n");
        out.push_str("}\n\n");
    }

    fn emit_operation_method(&self, out: &mut String, type_name: &str, field: &FieldDef) {
        let method = self.names.field_name(type_name, &field.name);
        let target = self.model.get(field.ty.name());
        let selectable = target.map(TypeDef::is_selectable).unwrap_or(false);

        let mut params: Vec<String> = Vec::new();
        for arg in &field.arguments {
            let param = self.resolver.resolve(&arg.name, NameScope::Field);
            let mut ty = self.mapper.map_argument(&arg.ty);
            if !arg.is_required() && !ty.starts_with("Option<") {
                // non-null arguments with a schema default still pass as Option
                ty = format!("Option<{ty}>");
            }
            params.push(format!("{param}: {ty}"));
        }
        if selectable {
            params.push(format!("nested: {}", self.select_ident(field.ty.name())));
        }

        out.push_str(&format!(
            "\n    pub fn {method}(mut self{}{}) -> Self {{\n",
            if params.is_empty() { "" } else { ", " },
            params.join(", ")
        ));

        if field.arguments.is_empty() {
            if selectable {
                out.push_str(&format!(
                    "        self.set.push_field(FieldSelection::new(\"{}\").with_selection(nested.into_set()));\n",
                    field.name
                ));
            } else {
                out.push_str(&format!(
                    "        self.set.push_field(FieldSelection::new(\"{}\"));\n",
                    field.name
                ));
            }
        } else {
            out.push_str(&format!(
                "        let mut field = FieldSelection::new(\"{}\");\n",
                field.name
            ));
            for arg in &field.arguments {
                let param = self.resolver.resolve(&arg.name, NameScope::Field);
                let gql_type = arg.ty.render_graphql();
                if arg.is_required() {
                    out.push_str(&format!(
                        "        self.var_defs.push(VariableDef::new(\"{}\", \"{gql_type}\"));\n",
                        arg.name
                    ));
                    out.push_str(&format!(
                        "        self.variables.insert(\"{}\".to_string(), serde_json::to_value(&{param}).expect(\"serialize\"));\n",
                        arg.name
                    ));
                    out.push_str(&format!(
                        "        field = field.arg_variable(\"{}\", \"{}\");\n",
                        arg.name, arg.name
                    ));
                } else {
                    out.push_str(&format!("        if let Some(value) = {param} {{\n"));
                    out.push_str(&format!(
                        "            self.var_defs.push(VariableDef::new(\"{}\", \"{gql_type}\"));\n",
                        arg.name
                    ));
                    out.push_str(&format!(
                        "            self.variables.insert(\"{}\".to_string(), serde_json::to_value(&value).expect(\"serialize\"));\n",
                        arg.name
                    ));
                    out.push_str(&format!(
                        "            field = field.arg_variable(\"{}\", \"{}\");\n",
                        arg.name, arg.name
                    ));
                    out.push_str("        }\n");
                }
            }
            if selectable {
                out.push_str(
                    "        self.set.push_field(field.with_selection(nested.into_set()));\n",
                );
            } else {
                out.push_str("        self.set.push_field(field);\n");
            }
        }
        out.push_str("        self\n");
        out.push_str("    }\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typemap::scalar_table;
    use graphql_parser::schema::parse_schema;

    fn emit_sdl(sdl: &str, config: GeneratorConfig) -> String {
        let doc = parse_schema::<String>(sdl).expect("parse");
        let model = SchemaModel::build(&doc).expect("build");
        let resolver = NameResolver::new(config.reserved_word_suffix.clone());
        let names = NameTable::build(&model, &resolver).expect("names");
        let scalars = scalar_table(&model, &config);
        let mapper = TypeMapper::new(&model, &names, &scalars);
        emit(&model, &names, &resolver, &mapper, &config)
    }

    const USER_SDL: &str = "type Query { user(id: ID!): User orphan: String } \
                            type User { id: ID! name: String bestFriend: User } \
                            type Unused { id: ID! }";

    #[test]
    fn test_object_builder_shape() {
        let out = emit_sdl(USER_SDL, GeneratorConfig::default());
        assert!(out.contains("pub struct UserSelect {\n"));
        assert!(out.contains("    pub fn id(mut self) -> Self {\n"));
        assert!(out.contains("    pub fn best_friend(mut self, nested: UserSelect) -> Self {\n"));
        assert!(out.contains("FieldSelection::new(\"bestFriend\").with_selection(nested.into_set())"));
    }

    #[test]
    fn test_unreachable_types_are_skipped() {
        let out = emit_sdl(USER_SDL, GeneratorConfig::default());
        assert!(!out.contains("UnusedSelect"));
    }

    #[test]
    fn test_root_builder_binds_variables() {
        let out = emit_sdl(USER_SDL, GeneratorConfig::default());
        assert!(out.contains("pub struct QuerySelect {\n"));
        assert!(out.contains("    pub fn user(mut self, id: String, nested: UserSelect) -> Self {\n"));
        assert!(out.contains("VariableDef::new(\"id\", \"ID!\")"));
        assert!(out.contains("field = field.arg_variable(\"id\", \"id\");"));
        assert!(out.contains("BuiltOperation::new(OperationKind::Query"));
    }

    #[test]
    fn test_optional_argument_is_conditional() {
        let out = emit_sdl(
            "type Query { search(term: String!, limit: Int): [User!]! } type User { id: ID! }",
            GeneratorConfig::default(),
        );
        assert!(out.contains("term: String, limit: Option<i64>, nested: UserSelect"));
        assert!(out.contains("        if let Some(value) = limit {\n"));
        assert!(out.contains("VariableDef::new(\"limit\", \"Int\")"));
    }

    #[test]
    fn test_interface_builder_has_fragments_and_typename() {
        let out = emit_sdl(
            "type Query { node: Node } interface Node { id: ID! } \
             type User implements Node { id: ID! name: String } \
             type Post implements Node { id: ID! title: String }",
            GeneratorConfig::default(),
        );
        assert!(out.contains("pub struct NodeSelect {\n"));
        assert!(out.contains("set.push_field(FieldSelection::new(\"__typename\"));"));
        assert!(out.contains("    pub fn on_user(mut self, nested: UserSelect) -> Self {\n"));
        assert!(out.contains("    pub fn on_post(mut self, nested: PostSelect) -> Self {\n"));
        assert!(out.contains("InlineFragment::new(\"User\", nested.into_set())"));
    }

    #[test]
    fn test_union_builder_only_fragments() {
        let out = emit_sdl(
            "type Query { s: Search } type User { id: ID! } type Post { id: ID! } \
             union Search = User | Post",
            GeneratorConfig::default(),
        );
        assert!(out.contains("pub struct SearchSelect {\n"));
        assert!(out.contains("    pub fn on_user(mut self, nested: UserSelect) -> Self {\n"));
        // no field methods besides fragments and plumbing
        assert!(!out.contains("pub fn id(mut self)"));
    }

    #[test]
    fn test_nested_field_with_required_args_is_skipped() {
        let out = emit_sdl(
            "type Query { user: User } \
             type User { id: ID! picture(size: Int!): String }",
            GeneratorConfig::default(),
        );
        assert!(!out.contains("pub fn picture"));
    }

    #[test]
    fn test_mutation_root() {
        let out = emit_sdl(
            "type Query { ok: Boolean } type Mutation { rename(id: ID!, name: String!): User } \
             type User { id: ID! }",
            GeneratorConfig::default(),
        );
        assert!(out.contains("pub struct MutationSelect {\n"));
        assert!(out.contains("BuiltOperation::new(OperationKind::Mutation"));
        assert!(out.contains("pub fn rename(mut self, id: String, name: String, nested: UserSelect) -> Self {"));
    }
}
