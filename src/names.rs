//! name resolution
//!
//! deterministic mapping from graphql identifiers to rust identifiers.
//! the same input always yields the same output within a run, so
//! regenerated code is diff-stable. resolution never silently merges two
//! names: [`NameTable::build`] fails when two distinct graphql identifiers
//! in one scope resolve to the same rust identifier.

use crate::error::{Error, Result};
use crate::schema::{SchemaModel, TypeDef};
use indexmap::IndexMap;
use std::fmt;

/// naming scope a graphql identifier is resolved in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameScope {
    /// type names, one scope for the whole schema
    Type,
    /// field and argument names, one scope per declaring type
    Field,
    /// enum values, one scope per enum
    EnumValue,
}

impl fmt::Display for NameScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameScope::Type => write!(f, "type"),
            NameScope::Field => write!(f, "field"),
            NameScope::EnumValue => write!(f, "enum value"),
        }
    }
}

/// rust identifiers that would shadow prelude names when used as types
const RESERVED_TYPE_IDENTS: &[&str] = &["Self", "Box", "Option", "Result", "String", "Vec"];

/// method names every generated builder carries
const RESERVED_FIELD_IDENTS: &[&str] = &["new", "build", "typename", "into_set", "nested"];

fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "break"
            | "const"
            | "continue"
            | "crate"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
    )
}

/// convert a camelCase graphql name to snake_case
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::new();
    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '-' || ch == '_' {
            out.push('_');
            continue;
        }
        if ch.is_uppercase() {
            let prev = idx.checked_sub(1).map(|i| chars[i]);
            let next = chars.get(idx + 1);
            // boundary before an uppercase run, and inside one before its
            // last letter ("userID" -> user_id, "URLPath" -> url_path)
            let boundary = match prev {
                None | Some('_') | Some('-') => false,
                Some(p) => {
                    p.is_lowercase()
                        || p.is_ascii_digit()
                        || next.map_or(false, |n| n.is_lowercase())
                }
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// uppercase the first letter and each letter after a separator, keeping
/// interior capitals ("renameUser" -> "RenameUser")
pub fn to_upper_camel(name: &str) -> String {
    let mut out = String::new();
    let mut upper = true;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            upper = true;
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// convert a SCREAMING_SNAKE or camelCase graphql name to PascalCase
pub fn to_pascal_case(name: &str) -> String {
    let mut out = String::new();
    let mut upper = true;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            upper = true;
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// deterministic graphql-to-rust identifier policy
#[derive(Debug, Clone)]
pub struct NameResolver {
    suffix: String,
}

impl NameResolver {
    /// create a resolver appending `suffix` to reserved identifiers
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// resolve one graphql identifier within a scope
    pub fn resolve(&self, name: &str, scope: NameScope) -> String {
        let resolved = match scope {
            NameScope::Type => name.to_string(),
            NameScope::Field => to_snake_case(name),
            NameScope::EnumValue => to_pascal_case(name),
        };
        if self.is_reserved(&resolved, scope) {
            format!("{resolved}{}", self.suffix)
        } else {
            resolved
        }
    }

    fn is_reserved(&self, resolved: &str, scope: NameScope) -> bool {
        match scope {
            NameScope::Type | NameScope::EnumValue => {
                is_rust_keyword(resolved) || RESERVED_TYPE_IDENTS.contains(&resolved)
            }
            NameScope::Field => {
                is_rust_keyword(resolved) || RESERVED_FIELD_IDENTS.contains(&resolved)
            }
        }
    }
}

/// every identifier of a schema, resolved up front
///
/// both emitters read the same table, so the builder module and the model
/// module always agree on generated names.
#[derive(Debug, Clone)]
pub struct NameTable {
    types: IndexMap<String, String>,
    fields: IndexMap<String, IndexMap<String, String>>,
    enum_values: IndexMap<String, IndexMap<String, String>>,
}

impl NameTable {
    /// resolve every name in the model, failing on any per-scope collision
    pub fn build(model: &SchemaModel, resolver: &NameResolver) -> Result<Self> {
        let mut types = IndexMap::new();
        let mut fields = IndexMap::new();
        let mut enum_values = IndexMap::new();

        let mut type_seen: IndexMap<String, String> = IndexMap::new();
        for def in model.types() {
            if matches!(def, TypeDef::Scalar(_)) {
                // scalars map through the scalar table, not the resolver
                continue;
            }
            let resolved = resolver.resolve(def.name(), NameScope::Type);
            check_collision(&mut type_seen, NameScope::Type, def.name(), &resolved)?;
            types.insert(def.name().to_string(), resolved);
        }

        for def in model.types() {
            match def {
                TypeDef::Object(object) => {
                    let scope =
                        resolve_fields(resolver, object.fields.iter().map(|f| f.name.as_str()))?;
                    for field in &object.fields {
                        resolve_arguments(
                            resolver,
                            &object.name,
                            &field.name,
                            field.arguments.iter().map(|a| a.name.as_str()),
                        )?;
                    }
                    fields.insert(object.name.clone(), scope);
                }
                TypeDef::Interface(interface) => {
                    let scope =
                        resolve_fields(resolver, interface.fields.iter().map(|f| f.name.as_str()))?;
                    for field in &interface.fields {
                        resolve_arguments(
                            resolver,
                            &interface.name,
                            &field.name,
                            field.arguments.iter().map(|a| a.name.as_str()),
                        )?;
                    }
                    fields.insert(interface.name.clone(), scope);
                }
                TypeDef::InputObject(input) => {
                    let scope =
                        resolve_fields(resolver, input.fields.iter().map(|f| f.name.as_str()))?;
                    fields.insert(input.name.clone(), scope);
                }
                TypeDef::Enum(def) => {
                    let mut scope = IndexMap::new();
                    let mut seen = IndexMap::new();
                    for value in &def.values {
                        let resolved = resolver.resolve(&value.name, NameScope::EnumValue);
                        check_collision(&mut seen, NameScope::EnumValue, &value.name, &resolved)?;
                        scope.insert(value.name.clone(), resolved);
                    }
                    enum_values.insert(def.name.clone(), scope);
                }
                TypeDef::Scalar(_) | TypeDef::Union(_) => {}
            }
        }

        Ok(Self {
            types,
            fields,
            enum_values,
        })
    }

    /// rust identifier for a graphql type name
    pub fn type_name<'a>(&'a self, graphql: &'a str) -> &'a str {
        self.types.get(graphql).map(String::as_str).unwrap_or(graphql)
    }

    /// rust identifier for a field of a type
    pub fn field_name<'a>(&'a self, type_name: &str, field: &'a str) -> &'a str {
        self.fields
            .get(type_name)
            .and_then(|scope| scope.get(field))
            .map(String::as_str)
            .unwrap_or(field)
    }

    /// rust variant identifier for an enum value
    pub fn enum_value<'a>(&'a self, enum_name: &str, value: &'a str) -> &'a str {
        self.enum_values
            .get(enum_name)
            .and_then(|scope| scope.get(value))
            .map(String::as_str)
            .unwrap_or(value)
    }
}

fn resolve_fields<'a>(
    resolver: &NameResolver,
    names: impl Iterator<Item = &'a str>,
) -> Result<IndexMap<String, String>> {
    let mut scope = IndexMap::new();
    let mut seen = IndexMap::new();
    for name in names {
        let resolved = resolver.resolve(name, NameScope::Field);
        check_collision(&mut seen, NameScope::Field, name, &resolved)?;
        scope.insert(name.to_string(), resolved);
    }
    Ok(scope)
}

fn resolve_arguments<'a>(
    resolver: &NameResolver,
    type_name: &str,
    field: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<()> {
    // argument identifiers are re-derived by the emitters; only the
    // injectivity check happens here
    let _ = (type_name, field);
    let mut seen = IndexMap::new();
    for name in names {
        let resolved = resolver.resolve(name, NameScope::Field);
        check_collision(&mut seen, NameScope::Field, name, &resolved)?;
    }
    Ok(())
}

fn check_collision(
    seen: &mut IndexMap<String, String>,
    scope: NameScope,
    graphql: &str,
    resolved: &str,
) -> Result<()> {
    if let Some(first) = seen.get(resolved) {
        return Err(Error::NameCollision {
            scope,
            first: first.clone(),
            second: graphql.to_string(),
            resolved: resolved.to_string(),
        });
    }
    seen.insert(resolved.to_string(), graphql.to_string());
    Ok(())
}
