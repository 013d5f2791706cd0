//! data-model emission
//!
//! walks the schema in declaration order and emits one serde record per
//! named type: structs for objects and input objects, closed enums for
//! graphql enums, and `__typename`-discriminated enums for interfaces and
//! unions. operation payload wrappers come last.

use crate::config::GeneratorConfig;
use crate::names::{to_upper_camel, NameTable};
use crate::schema::{
    EnumDef, FieldDef, InputObjectDef, InterfaceDef, ObjectDef, OperationKind, SchemaModel,
    TypeDef, UnionDef,
};
use crate::typemap::TypeMapper;

pub(crate) fn emit(
    model: &SchemaModel,
    names: &NameTable,
    mapper: &TypeMapper<'_>,
    config: &GeneratorConfig,
) -> String {
    let mut out = String::new();
    out.push_str("//! generated data models\n\n");
    out.push_str("use serde::{Deserialize, Serialize};\n\n");

    for def in model.types() {
        match def {
            TypeDef::Scalar(_) => {}
            TypeDef::Enum(e) => emit_enum(&mut out, e, names, config),
            TypeDef::Object(object) if model.is_root(&object.name) => {}
            TypeDef::Object(object) => emit_object(&mut out, object, names, mapper, config),
            TypeDef::Interface(interface) => {
                emit_interface(&mut out, model, interface, names, mapper, config)
            }
            TypeDef::Union(union) => emit_union(&mut out, model, union, names),
            TypeDef::InputObject(input) => emit_input(&mut out, input, names, mapper),
        }
    }

    for kind in [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ] {
        if let Some(root) = model.root(kind) {
            emit_responses(&mut out, root, names, mapper, config);
        }
    }

    out
}

fn push_doc(out: &mut String, description: Option<&str>, indent: &str) {
    if let Some(description) = description {
        for line in description.lines() {
            if line.is_empty() {
                out.push_str(&format!("{indent}///\n"));
            } else {
                out.push_str(&format!("{indent}/// {line}\n"));
            }
        }
    }
}

fn emit_enum(out: &mut String, def: &EnumDef, names: &NameTable, config: &GeneratorConfig) {
    push_doc(out, def.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]\n");
    out.push_str(&format!("pub enum {} {{\n", names.type_name(&def.name)));
    for value in &def.values {
        if !config.keeps(value.deprecation.as_ref()) {
            continue;
        }
        push_doc(out, value.description.as_deref(), "    ");
        out.push_str(&format!("    #[serde(rename = \"{}\")]\n", value.name));
        out.push_str(&format!("    {},\n", names.enum_value(&def.name, &value.name)));
    }
    out.push_str("}\n\n");
}

fn emit_object(
    out: &mut String,
    def: &ObjectDef,
    names: &NameTable,
    mapper: &TypeMapper<'_>,
    config: &GeneratorConfig,
) {
    push_doc(out, def.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {} {{\n", names.type_name(&def.name)));
    for field in &def.fields {
        if !config.keeps(field.deprecation.as_ref()) {
            continue;
        }
        emit_struct_field(out, &def.name, field, names, mapper);
    }
    out.push_str("}\n\n");
}

fn emit_struct_field(
    out: &mut String,
    type_name: &str,
    field: &FieldDef,
    names: &NameTable,
    mapper: &TypeMapper<'_>,
) {
    push_doc(out, field.description.as_deref(), "    ");
    let ident = names.field_name(type_name, &field.name);
    if ident != field.name {
        out.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
    }
    out.push_str(&format!("    pub {ident}: {},\n", mapper.map(&field.ty)));
}

fn emit_input(out: &mut String, def: &InputObjectDef, names: &NameTable, mapper: &TypeMapper<'_>) {
    push_doc(out, def.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {} {{\n", names.type_name(&def.name)));
    for field in &def.fields {
        push_doc(out, field.description.as_deref(), "    ");
        let ident = names.field_name(&def.name, &field.name);
        if ident != field.name {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.name));
        }
        out.push_str(&format!("    pub {ident}: {},\n", mapper.map(&field.ty)));
    }
    out.push_str("}\n\n");
}

fn emit_variants(out: &mut String, model: &SchemaModel, name: &str, names: &NameTable) {
    for object in model.possible_types(name) {
        let variant = names.type_name(&object.name);
        if variant != object.name {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", object.name));
        }
        out.push_str(&format!("    {variant}({variant}),\n"));
    }
}

fn emit_interface(
    out: &mut String,
    model: &SchemaModel,
    def: &InterfaceDef,
    names: &NameTable,
    mapper: &TypeMapper<'_>,
    config: &GeneratorConfig,
) {
    let ident = names.type_name(&def.name);
    push_doc(out, def.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    out.push_str("#[serde(tag = \"__typename\")]\n");
    out.push_str(&format!("pub enum {ident} {{\n"));
    emit_variants(out, model, &def.name, names);
    out.push_str("}\n\n");

    let implementors = model.possible_types(&def.name);
    if implementors.is_empty() {
        return;
    }

    // accessors for the shared interface fields, when every implementor
    // still carries the field after deprecation filtering
    let mut accessors = String::new();
    for field in &def.fields {
        if !config.keeps(field.deprecation.as_ref()) {
            continue;
        }
        let kept_everywhere = implementors.iter().all(|object| {
            object
                .fields
                .iter()
                .any(|f| f.name == field.name && config.keeps(f.deprecation.as_ref()))
        });
        if !kept_everywhere {
            continue;
        }
        let field_ident = names.field_name(&def.name, &field.name);
        accessors.push_str(&format!(
            "    pub fn {field_ident}(&self) -> &{} {{\n",
            mapper.map(&field.ty)
        ));
        accessors.push_str("        match self {\n");
        for object in &implementors {
            accessors.push_str(&format!(
                "            {ident}::{}(value) => &value.{field_ident},\n",
                names.type_name(&object.name)
            ));
        }
        accessors.push_str("        }\n");
        accessors.push_str("    }\n");
    }

    if !accessors.is_empty() {
        out.push_str(&format!("impl {ident} {{\n"));
        out.push_str(&accessors);
        out.push_str("}\n\n");
    }
}

fn emit_union(out: &mut String, model: &SchemaModel, def: &UnionDef, names: &NameTable) {
    push_doc(out, def.description.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    out.push_str("#[serde(tag = \"__typename\")]\n");
    out.push_str(&format!("pub enum {} {{\n", names.type_name(&def.name)));
    emit_variants(out, model, &def.name, names);
    out.push_str("}\n\n");
}

fn emit_responses(
    out: &mut String,
    root: &ObjectDef,
    names: &NameTable,
    mapper: &TypeMapper<'_>,
    config: &GeneratorConfig,
) {
    for field in &root.fields {
        if !config.keeps(field.deprecation.as_ref()) {
            continue;
        }
        out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
        out.push_str(&format!(
            "pub struct {}Response {{\n",
            to_upper_camel(&field.name)
        ));
        emit_struct_field(out, &root.name, field, names, mapper);
        out.push_str("}\n\n");
    }
}
