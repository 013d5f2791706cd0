//! schema model
//!
//! immutable, declaration-ordered representation of a parsed sdl document.
//! [`SchemaModel::build`] validates every reference up front, so later
//! passes dereference type names without failure paths. the registry is
//! index-based: a [`TypeRef`] stores the referent's name plus wrapper
//! metadata, never a copy of the definition, which keeps recursive and
//! mutually recursive type graphs cheap to hold and walk.

use crate::error::{Error, Result, SchemaError};
use graphql_parser::schema as ast;
use indexmap::IndexMap;

/// the five scalars every schema carries implicitly
pub const BUILTIN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

/// operation root kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// graphql keyword for this operation kind
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

/// one list nesting level of a type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListWrapping {
    NullableList,
    RequiredList,
}

/// nullability and list wrapping around a named type
///
/// list levels are stored innermost first, each independently nullable,
/// mirroring graphql's `[T!]!`-style annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapping {
    inner_nonnull: bool,
    lists: Vec<ListWrapping>,
}

impl Wrapping {
    /// a bare nullable named type
    pub fn nullable() -> Self {
        Self {
            inner_nonnull: false,
            lists: Vec::new(),
        }
    }

    /// a bare non-null named type
    pub fn required() -> Self {
        Self {
            inner_nonnull: true,
            lists: Vec::new(),
        }
    }

    /// wrap the current type in one more (outer) list level
    pub fn in_list(mut self, required: bool) -> Self {
        self.lists.push(if required {
            ListWrapping::RequiredList
        } else {
            ListWrapping::NullableList
        });
        self
    }

    /// whether the innermost named type is non-null
    pub fn inner_nonnull(&self) -> bool {
        self.inner_nonnull
    }

    /// list levels, innermost first
    pub fn lists(&self) -> &[ListWrapping] {
        &self.lists
    }

    /// number of list nesting levels
    pub fn list_depth(&self) -> usize {
        self.lists.len()
    }

    /// whether the outermost wrapper is non-null
    pub fn is_required(&self) -> bool {
        match self.lists.last() {
            Some(level) => *level == ListWrapping::RequiredList,
            None => self.inner_nonnull,
        }
    }
}

/// reference to a named type plus its nullability and list wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    name: String,
    wrapping: Wrapping,
}

impl TypeRef {
    /// reference `name` with the given wrapping
    pub fn new(name: impl Into<String>, wrapping: Wrapping) -> Self {
        Self {
            name: name.into(),
            wrapping,
        }
    }

    pub(crate) fn from_ast(ty: &ast::Type<'_, String>) -> Self {
        fn collect(
            ty: &ast::Type<'_, String>,
            nonnull: bool,
            lists: &mut Vec<ListWrapping>,
        ) -> (String, bool) {
            match ty {
                ast::Type::NonNullType(inner) => collect(inner, true, lists),
                ast::Type::ListType(inner) => {
                    let base = collect(inner, false, lists);
                    lists.push(if nonnull {
                        ListWrapping::RequiredList
                    } else {
                        ListWrapping::NullableList
                    });
                    base
                }
                ast::Type::NamedType(name) => (name.clone(), nonnull),
            }
        }

        let mut lists = Vec::new();
        let (name, inner_nonnull) = collect(ty, false, &mut lists);
        Self {
            name,
            wrapping: Wrapping {
                inner_nonnull,
                lists,
            },
        }
    }

    /// innermost named type
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrapping(&self) -> &Wrapping {
        &self.wrapping
    }

    /// whether the outermost wrapper is non-null
    pub fn is_required(&self) -> bool {
        self.wrapping.is_required()
    }

    /// non-null with no list wrapping; the edge relation for input cycles
    pub fn is_bare_required(&self) -> bool {
        self.wrapping.inner_nonnull && self.wrapping.lists.is_empty()
    }

    /// render back to graphql type syntax
    pub fn render_graphql(&self) -> String {
        let mut out = self.name.clone();
        if self.wrapping.inner_nonnull {
            out.push('!');
        }
        for level in &self.wrapping.lists {
            out = format!("[{out}]");
            if *level == ListWrapping::RequiredList {
                out.push('!');
            }
        }
        out
    }
}

/// deprecation marker from an `@deprecated` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub reason: Option<String>,
}

/// output field of an object or interface type
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValueDef>,
    pub ty: TypeRef,
    pub deprecation: Option<Deprecation>,
}

/// argument of a field, or field of an input object
#[derive(Debug, Clone)]
pub struct InputValueDef {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    /// default value as graphql literal text
    pub default_value: Option<String>,
}

impl InputValueDef {
    /// non-null with no default; must be supplied by the caller
    pub fn is_required(&self) -> bool {
        self.ty.is_required() && self.default_value.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ScalarDef {
    pub name: String,
    pub description: Option<String>,
    pub builtin: bool,
}

#[derive(Debug, Clone)]
pub struct EnumValueDef {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
}

#[derive(Debug, Clone)]
pub struct EnumDef {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone)]
pub struct ObjectDef {
    pub name: String,
    pub description: Option<String>,
    pub implements: Vec<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone)]
pub struct UnionDef {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct InputObjectDef {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<InputValueDef>,
}

/// tagged variant over the closed set of graphql named types
#[derive(Debug, Clone)]
pub enum TypeDef {
    Scalar(ScalarDef),
    Enum(EnumDef),
    Object(ObjectDef),
    Interface(InterfaceDef),
    Union(UnionDef),
    InputObject(InputObjectDef),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Scalar(def) => &def.name,
            TypeDef::Enum(def) => &def.name,
            TypeDef::Object(def) => &def.name,
            TypeDef::Interface(def) => &def.name,
            TypeDef::Union(def) => &def.name,
            TypeDef::InputObject(def) => &def.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TypeDef::Scalar(_) => "scalar",
            TypeDef::Enum(_) => "enum",
            TypeDef::Object(_) => "object",
            TypeDef::Interface(_) => "interface",
            TypeDef::Union(_) => "union",
            TypeDef::InputObject(_) => "input object",
        }
    }

    /// scalar or enum; selected without a sub-selection
    pub fn is_leaf(&self) -> bool {
        matches!(self, TypeDef::Scalar(_) | TypeDef::Enum(_))
    }

    /// object, interface, or union; carries a selection set
    pub fn is_selectable(&self) -> bool {
        matches!(
            self,
            TypeDef::Object(_) | TypeDef::Interface(_) | TypeDef::Union(_)
        )
    }

    /// legal in argument and input-field position
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            TypeDef::Scalar(_) | TypeDef::Enum(_) | TypeDef::InputObject(_)
        )
    }
}

/// fully-linked, immutable schema
#[derive(Debug, Clone)]
pub struct SchemaModel {
    types: IndexMap<String, TypeDef>,
    query_root: String,
    mutation_root: Option<String>,
    subscription_root: Option<String>,
}

impl SchemaModel {
    /// build and validate a model from a parsed sdl document
    pub fn build(doc: &ast::Document<'_, String>) -> Result<Self> {
        let mut types: IndexMap<String, TypeDef> = IndexMap::new();
        for name in BUILTIN_SCALARS {
            types.insert(
                (*name).to_string(),
                TypeDef::Scalar(ScalarDef {
                    name: (*name).to_string(),
                    description: None,
                    builtin: true,
                }),
            );
        }

        let mut declared_query = None;
        let mut declared_mutation = None;
        let mut declared_subscription = None;

        for def in &doc.definitions {
            match def {
                ast::Definition::SchemaDefinition(schema) => {
                    declared_query.clone_from(&schema.query);
                    declared_mutation.clone_from(&schema.mutation);
                    declared_subscription.clone_from(&schema.subscription);
                }
                ast::Definition::TypeDefinition(ty) => {
                    let converted = convert_type(ty);
                    if types.contains_key(converted.name()) {
                        return Err(SchemaError::DuplicateType {
                            name: converted.name().to_string(),
                        }
                        .into());
                    }
                    types.insert(converted.name().to_string(), converted);
                }
                ast::Definition::TypeExtension(_) => {
                    return Err(SchemaError::Unsupported("type extensions".to_string()).into());
                }
                ast::Definition::DirectiveDefinition(_) => {}
            }
        }

        let query_root = match declared_query {
            Some(name) => name,
            None if types.contains_key("Query") => "Query".to_string(),
            None => return Err(SchemaError::MissingQueryRoot.into()),
        };
        let mutation_root = declared_mutation
            .or_else(|| types.contains_key("Mutation").then(|| "Mutation".to_string()));
        let subscription_root = declared_subscription.or_else(|| {
            types
                .contains_key("Subscription")
                .then(|| "Subscription".to_string())
        });

        let model = Self {
            types,
            query_root,
            mutation_root,
            subscription_root,
        };
        model.validate()?;
        model.check_input_cycles()?;
        tracing::debug!(types = model.types.len(), "schema model built");
        Ok(model)
    }

    /// look up a named type
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// all named types in declaration order, built-in scalars first
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// object type serving as the given operation root
    pub fn root(&self, kind: OperationKind) -> Option<&ObjectDef> {
        let name = match kind {
            OperationKind::Query => Some(&self.query_root),
            OperationKind::Mutation => self.mutation_root.as_ref(),
            OperationKind::Subscription => self.subscription_root.as_ref(),
        }?;
        match self.types.get(name) {
            Some(TypeDef::Object(def)) => Some(def),
            _ => None,
        }
    }

    /// whether `name` is one of the operation root types
    pub fn is_root(&self, name: &str) -> bool {
        name == self.query_root
            || self.mutation_root.as_deref() == Some(name)
            || self.subscription_root.as_deref() == Some(name)
    }

    /// field of an object or interface type
    pub fn field(&self, type_name: &str, field: &str) -> Option<&FieldDef> {
        match self.types.get(type_name)? {
            TypeDef::Object(def) => def.fields.iter().find(|f| f.name == field),
            TypeDef::Interface(def) => def.fields.iter().find(|f| f.name == field),
            _ => None,
        }
    }

    /// concrete object types a union or interface can resolve to, in
    /// declaration order
    pub fn possible_types(&self, name: &str) -> Vec<&ObjectDef> {
        match self.types.get(name) {
            Some(TypeDef::Union(def)) => def
                .members
                .iter()
                .filter_map(|member| match self.types.get(member) {
                    Some(TypeDef::Object(object)) => Some(object),
                    _ => None,
                })
                .collect(),
            Some(TypeDef::Interface(def)) => self
                .types
                .values()
                .filter_map(|ty| match ty {
                    TypeDef::Object(object)
                        if object.implements.iter().any(|i| i == &def.name) =>
                    {
                        Some(object)
                    }
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        for def in self.types.values() {
            match def {
                TypeDef::Object(object) => {
                    for interface in &object.implements {
                        self.check_implements(object, interface)?;
                    }
                    for field in &object.fields {
                        self.check_field(&object.name, field)?;
                    }
                }
                TypeDef::Interface(interface) => {
                    for field in &interface.fields {
                        self.check_field(&interface.name, field)?;
                    }
                }
                TypeDef::Union(union) => {
                    for member in &union.members {
                        match self.types.get(member) {
                            None => {
                                return Err(SchemaError::UnresolvedType {
                                    name: member.clone(),
                                    referenced_by: union.name.clone(),
                                }
                                .into())
                            }
                            Some(TypeDef::Object(_)) => {}
                            Some(_) => {
                                return Err(SchemaError::NonObjectUnionMember {
                                    union_name: union.name.clone(),
                                    member: member.clone(),
                                }
                                .into())
                            }
                        }
                    }
                }
                TypeDef::InputObject(input) => {
                    for field in &input.fields {
                        self.check_input_value(&input.name, field)?;
                    }
                }
                TypeDef::Scalar(_) | TypeDef::Enum(_) => {}
            }
        }

        for (kind, name) in [
            (OperationKind::Query, Some(&self.query_root)),
            (OperationKind::Mutation, self.mutation_root.as_ref()),
            (OperationKind::Subscription, self.subscription_root.as_ref()),
        ] {
            let Some(name) = name else { continue };
            match self.types.get(name) {
                None => {
                    return Err(SchemaError::UnresolvedType {
                        name: name.clone(),
                        referenced_by: format!("schema.{}", kind.keyword()),
                    }
                    .into())
                }
                Some(TypeDef::Object(_)) => {}
                Some(_) => {
                    return Err(SchemaError::NonObjectRoot { name: name.clone() }.into());
                }
            }
        }

        Ok(())
    }

    fn check_implements(&self, object: &ObjectDef, interface_name: &str) -> Result<()> {
        let interface = match self.types.get(interface_name) {
            None => {
                return Err(SchemaError::UnresolvedType {
                    name: interface_name.to_string(),
                    referenced_by: object.name.clone(),
                }
                .into())
            }
            Some(TypeDef::Interface(def)) => def,
            Some(_) => {
                return Err(SchemaError::NonInterfaceImplements {
                    implementor: object.name.clone(),
                    name: interface_name.to_string(),
                }
                .into())
            }
        };

        for required in &interface.fields {
            let satisfied = object.fields.iter().any(|field| {
                field.name == required.name
                    && field.ty.render_graphql() == required.ty.render_graphql()
            });
            if !satisfied {
                return Err(SchemaError::MissingInterfaceField {
                    interface: interface.name.clone(),
                    implementor: object.name.clone(),
                    field: required.name.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_field(&self, type_name: &str, field: &FieldDef) -> Result<()> {
        let context = format!("{type_name}.{}", field.name);
        if self.types.get(field.ty.name()).is_none() {
            return Err(SchemaError::UnresolvedType {
                name: field.ty.name().to_string(),
                referenced_by: context,
            }
            .into());
        }
        for argument in &field.arguments {
            match self.types.get(argument.ty.name()) {
                None => {
                    return Err(SchemaError::UnresolvedType {
                        name: argument.ty.name().to_string(),
                        referenced_by: context,
                    }
                    .into())
                }
                Some(def) if !def.is_input() => {
                    return Err(SchemaError::NonInputArgument {
                        referenced_by: context,
                        argument: argument.name.clone(),
                        type_name: argument.ty.name().to_string(),
                    }
                    .into())
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_input_value(&self, input_name: &str, field: &InputValueDef) -> Result<()> {
        match self.types.get(field.ty.name()) {
            None => Err(SchemaError::UnresolvedType {
                name: field.ty.name().to_string(),
                referenced_by: format!("{input_name}.{}", field.name),
            }
            .into()),
            Some(def) if !def.is_input() => Err(SchemaError::NonInputArgument {
                referenced_by: input_name.to_string(),
                argument: field.name.clone(),
                type_name: field.ty.name().to_string(),
            }
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// reject input objects that require themselves through an unbroken
    /// non-nullable chain; nullability or a list level breaks the chain
    fn check_input_cycles(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            InStack,
            Done,
        }

        fn visit(
            model: &SchemaModel,
            name: &str,
            states: &mut IndexMap<String, State>,
            path: &mut Vec<String>,
        ) -> Result<()> {
            match states.get(name) {
                Some(State::Done) => return Ok(()),
                Some(State::InStack) => {
                    let start = path.iter().position(|n| n == name).unwrap_or(0);
                    let mut cycle: Vec<String> = path[start..].to_vec();
                    cycle.push(name.to_string());
                    return Err(Error::CyclicInputType { cycle });
                }
                None => {}
            }

            states.insert(name.to_string(), State::InStack);
            path.push(name.to_string());
            if let Some(TypeDef::InputObject(input)) = model.get(name) {
                for field in &input.fields {
                    if !field.ty.is_bare_required() {
                        continue;
                    }
                    if let Some(TypeDef::InputObject(_)) = model.get(field.ty.name()) {
                        visit(model, field.ty.name(), states, path)?;
                    }
                }
            }
            path.pop();
            states.insert(name.to_string(), State::Done);
            Ok(())
        }

        let input_names: Vec<&str> = self
            .types
            .values()
            .filter_map(|def| match def {
                TypeDef::InputObject(input) => Some(input.name.as_str()),
                _ => None,
            })
            .collect();

        let mut states = IndexMap::new();
        let mut path = Vec::new();
        for name in input_names {
            visit(self, name, &mut states, &mut path)?;
        }
        Ok(())
    }
}

fn convert_type(ty: &ast::TypeDefinition<'_, String>) -> TypeDef {
    match ty {
        ast::TypeDefinition::Scalar(def) => TypeDef::Scalar(ScalarDef {
            name: def.name.clone(),
            description: def.description.clone(),
            builtin: false,
        }),
        ast::TypeDefinition::Enum(def) => TypeDef::Enum(EnumDef {
            name: def.name.clone(),
            description: def.description.clone(),
            values: def
                .values
                .iter()
                .map(|value| EnumValueDef {
                    name: value.name.clone(),
                    description: value.description.clone(),
                    deprecation: deprecation(&value.directives),
                })
                .collect(),
        }),
        ast::TypeDefinition::Object(def) => TypeDef::Object(ObjectDef {
            name: def.name.clone(),
            description: def.description.clone(),
            implements: def.implements_interfaces.clone(),
            fields: def.fields.iter().map(convert_field).collect(),
        }),
        ast::TypeDefinition::Interface(def) => TypeDef::Interface(InterfaceDef {
            name: def.name.clone(),
            description: def.description.clone(),
            fields: def.fields.iter().map(convert_field).collect(),
        }),
        ast::TypeDefinition::Union(def) => TypeDef::Union(UnionDef {
            name: def.name.clone(),
            description: def.description.clone(),
            members: def.types.clone(),
        }),
        ast::TypeDefinition::InputObject(def) => TypeDef::InputObject(InputObjectDef {
            name: def.name.clone(),
            description: def.description.clone(),
            fields: def.fields.iter().map(convert_input_value).collect(),
        }),
    }
}

fn convert_field(field: &ast::Field<'_, String>) -> FieldDef {
    FieldDef {
        name: field.name.clone(),
        description: field.description.clone(),
        arguments: field.arguments.iter().map(convert_input_value).collect(),
        ty: TypeRef::from_ast(&field.field_type),
        deprecation: deprecation(&field.directives),
    }
}

fn convert_input_value(value: &ast::InputValue<'_, String>) -> InputValueDef {
    InputValueDef {
        name: value.name.clone(),
        description: value.description.clone(),
        ty: TypeRef::from_ast(&value.value_type),
        default_value: value.default_value.as_ref().map(render_value),
    }
}

fn deprecation(directives: &[ast::Directive<'_, String>]) -> Option<Deprecation> {
    directives
        .iter()
        .find(|directive| directive.name == "deprecated")
        .map(|directive| Deprecation {
            reason: directive
                .arguments
                .iter()
                .find(|(name, _)| name == "reason")
                .and_then(|(_, value)| match value {
                    ast::Value::String(reason) => Some(reason.clone()),
                    _ => None,
                }),
        })
}

/// render an ast value as graphql literal text
fn render_value(value: &ast::Value<'_, String>) -> String {
    match value {
        ast::Value::Variable(name) => format!("${name}"),
        ast::Value::Int(number) => number
            .as_i64()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "0".to_string()),
        ast::Value::Float(number) => number.to_string(),
        ast::Value::String(text) => serde_json::Value::String(text.clone()).to_string(),
        ast::Value::Boolean(flag) => flag.to_string(),
        ast::Value::Null => "null".to_string(),
        ast::Value::Enum(name) => name.clone(),
        ast::Value::List(items) => {
            let rendered: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        ast::Value::Object(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{key}: {}", render_value(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use graphql_parser::schema::parse_schema;

    fn build(sdl: &str) -> Result<SchemaModel> {
        let doc = parse_schema::<String>(sdl).expect("parse");
        SchemaModel::build(&doc)
    }

    #[test]
    fn test_build_minimal() {
        let model = build("type Query { hello: String }").unwrap();
        let root = model.root(OperationKind::Query).unwrap();
        assert_eq!(root.name, "Query");
        assert_eq!(root.fields.len(), 1);
        assert!(model.root(OperationKind::Mutation).is_none());
    }

    #[test]
    fn test_missing_query_root() {
        let err = build("type User { id: ID! }").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::MissingQueryRoot)
        ));
    }

    #[test]
    fn test_schema_definition_renames_root() {
        let model = build("schema { query: Root } type Root { ok: Boolean! }").unwrap();
        assert_eq!(model.root(OperationKind::Query).unwrap().name, "Root");
        assert!(model.is_root("Root"));
    }

    #[test]
    fn test_duplicate_type() {
        let err = build("type Query { a: String } type A { x: ID } type A { y: ID }").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::DuplicateType { name }) if name == "A"
        ));
    }

    #[test]
    fn test_unresolved_reference() {
        let err = build("type Query { user: User }").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::UnresolvedType { name, referenced_by })
                if name == "User" && referenced_by == "Query.user"
        ));
    }

    #[test]
    fn test_union_member_must_be_object() {
        let err = build(
            "type Query { s: S } enum Color { RED } union S = Color",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::NonObjectUnionMember { union_name, member })
                if union_name == "S" && member == "Color"
        ));
    }

    #[test]
    fn test_interface_contract() {
        let err = build(
            "type Query { n: Node } interface Node { id: ID! } type User implements Node { name: String }",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::MissingInterfaceField { interface, implementor, field })
                if interface == "Node" && implementor == "User" && field == "id"
        ));
    }

    #[test]
    fn test_interface_contract_type_shape() {
        // field present but at a different nullability is a violation
        let err = build(
            "type Query { n: Node } interface Node { id: ID! } type User implements Node { id: ID }",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::MissingInterfaceField { field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_argument_must_be_input_type() {
        let err = build(
            "type Query { user(by: User): User } type User { id: ID! }",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::NonInputArgument { argument, type_name, .. })
                if argument == "by" && type_name == "User"
        ));
    }

    #[test]
    fn test_input_cycle_detected() {
        let err = build(
            "type Query { ok: Boolean } input A { b: B! } input B { a: A! }",
        )
        .unwrap_err();
        match err {
            Error::CyclicInputType { cycle } => {
                assert_eq!(cycle.first(), cycle.last());
                assert!(cycle.contains(&"A".to_string()));
                assert!(cycle.contains(&"B".to_string()));
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_input_cycle_broken_by_nullability() {
        build("type Query { ok: Boolean } input A { b: B! } input B { a: A }").unwrap();
    }

    #[test]
    fn test_input_cycle_broken_by_list() {
        build("type Query { ok: Boolean } input A { b: B! } input B { a: [A!]! }").unwrap();
    }

    #[test]
    fn test_type_extension_rejected() {
        let err = build("type Query { ok: Boolean } extend type Query { more: Int }").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::Unsupported(_))
        ));
    }

    #[test]
    fn test_type_ref_round_trip() {
        let model = build(
            "type Query { a: [String!] b: [String]! c: [[Int!]!]! d: ID! }",
        )
        .unwrap();
        let root = model.root(OperationKind::Query).unwrap();
        let rendered: Vec<String> =
            root.fields.iter().map(|f| f.ty.render_graphql()).collect();
        assert_eq!(rendered, ["[String!]", "[String]!", "[[Int!]!]!", "ID!"]);
    }

    #[test]
    fn test_wrapping_flags() {
        let model = build("type Query { a: [String]! }").unwrap();
        let ty = &model.root(OperationKind::Query).unwrap().fields[0].ty;
        assert!(ty.is_required());
        assert!(!ty.wrapping().inner_nonnull());
        assert_eq!(ty.wrapping().list_depth(), 1);
        assert!(!ty.is_bare_required());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let model = build(
            "type Query { z: Zeta a: Alpha } type Zeta { id: ID } type Alpha { id: ID }",
        )
        .unwrap();
        let names: Vec<&str> = model
            .types()
            .filter(|def| !matches!(def, TypeDef::Scalar(_)))
            .map(TypeDef::name)
            .collect();
        assert_eq!(names, ["Query", "Zeta", "Alpha"]);
    }

    #[test]
    fn test_possible_types() {
        let model = build(
            "type Query { n: Node s: Search } interface Node { id: ID! } \
             type User implements Node { id: ID! } type Post implements Node { id: ID! } \
             union Search = Post | User",
        )
        .unwrap();
        let node: Vec<&str> = model
            .possible_types("Node")
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(node, ["User", "Post"]);
        // union members keep their declared order
        let search: Vec<&str> = model
            .possible_types("Search")
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(search, ["Post", "User"]);
    }

    #[test]
    fn test_deprecation_captured() {
        let model = build(
            "type Query { old: String @deprecated(reason: \"use new\") new: String }",
        )
        .unwrap();
        let root = model.root(OperationKind::Query).unwrap();
        let deprecated = root.fields[0].deprecation.as_ref().unwrap();
        assert_eq!(deprecated.reason.as_deref(), Some("use new"));
        assert!(root.fields[1].deprecation.is_none());
    }

    #[test]
    fn test_default_values_rendered() {
        let model = build(
            "type Query { q(limit: Int = 10, mode: Mode = FAST, tag: String = \"x\"): String } \
             enum Mode { FAST SLOW }",
        )
        .unwrap();
        let field = model.field("Query", "q").unwrap();
        let defaults: Vec<Option<&str>> = field
            .arguments
            .iter()
            .map(|a| a.default_value.as_deref())
            .collect();
        assert_eq!(defaults, [Some("10"), Some("FAST"), Some("\"x\"")]);
        assert!(!field.arguments[0].is_required());
    }
}
