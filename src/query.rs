//! query building
//!
//! selection-set machinery shared by generated builders, plus a dynamic
//! builder validated against a [`SchemaModel`]. rendering is compact
//! single-line graphql; fields appear in the order they were selected.

use crate::error::{Error, Result};
use crate::schema::{ListWrapping, OperationKind, SchemaModel, TypeDef, TypeRef};

/// argument value bound to a field selection
#[derive(Debug, Clone)]
pub enum ArgValue {
    /// inline literal, rendered into the document
    Value(serde_json::Value),
    /// reference to an operation variable, without the `$`
    Variable(String),
}

impl ArgValue {
    /// bind a literal value
    pub fn value(value: serde_json::Value) -> Self {
        ArgValue::Value(value)
    }

    /// bind a variable reference
    pub fn var(name: impl Into<String>) -> Self {
        ArgValue::Variable(name.into())
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        ArgValue::Value(value)
    }
}

/// operation variable declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDef {
    pub name: String,
    /// graphql type text, e.g. `ID!`
    pub gql_type: String,
    /// default value as graphql literal text
    pub default: Option<String>,
}

impl VariableDef {
    pub fn new(name: impl Into<String>, gql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gql_type: gql_type.into(),
            default: None,
        }
    }
}

/// one selected field, with pre-rendered argument text
#[derive(Debug, Clone)]
pub struct FieldSelection {
    name: String,
    alias: Option<String>,
    arguments: Vec<(String, String)>,
    selection: Option<SelectionSet>,
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: Vec::new(),
            selection: None,
        }
    }

    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// attach an argument with already-rendered graphql value text
    pub fn arg_text(mut self, name: impl Into<String>, rendered: impl Into<String>) -> Self {
        self.arguments.push((name.into(), rendered.into()));
        self
    }

    /// attach an argument bound to an operation variable
    pub fn arg_variable(mut self, name: impl Into<String>, variable: &str) -> Self {
        self.arg_text(name, format!("${variable}"))
    }

    /// attach an argument rendered from a json value
    ///
    /// enum values cannot be told apart from strings here; use the dynamic
    /// builder or [`FieldSelection::arg_text`] when a bare enum literal is
    /// needed.
    pub fn arg_value(self, name: impl Into<String>, value: &serde_json::Value) -> Self {
        self.arg_text(name, render_json(value))
    }

    pub fn with_selection(mut self, selection: SelectionSet) -> Self {
        self.selection = Some(selection);
        self
    }

    fn render(&self) -> String {
        let mut out = String::new();
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push_str(": ");
        }
        out.push_str(&self.name);
        if !self.arguments.is_empty() {
            let rendered: Vec<String> = self
                .arguments
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
            out.push('(');
            out.push_str(&rendered.join(", "));
            out.push(')');
        }
        if let Some(selection) = &self.selection {
            if !selection.is_empty() {
                out.push(' ');
                out.push_str(&selection.render());
            }
        }
        out
    }
}

/// `... on Type { ... }` selection for interfaces and unions
#[derive(Debug, Clone)]
pub struct InlineFragment {
    type_condition: String,
    selection: SelectionSet,
}

impl InlineFragment {
    pub fn new(type_condition: impl Into<String>, selection: SelectionSet) -> Self {
        Self {
            type_condition: type_condition.into(),
            selection,
        }
    }

    fn render(&self) -> String {
        format!("... on {} {}", self.type_condition, self.selection.render())
    }
}

#[derive(Debug, Clone)]
enum SelectionItem {
    Field(FieldSelection),
    Fragment(InlineFragment),
}

/// ordered set of selected fields and inline fragments
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    items: Vec<SelectionItem>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push_field(&mut self, field: FieldSelection) {
        self.items.push(SelectionItem::Field(field));
    }

    pub fn push_fragment(&mut self, fragment: InlineFragment) {
        self.items.push(SelectionItem::Fragment(fragment));
    }

    /// render as `{ a b { c } ... on T { d } }`, in insertion order
    pub fn render(&self) -> String {
        let rendered: Vec<String> = self
            .items
            .iter()
            .map(|item| match item {
                SelectionItem::Field(field) => field.render(),
                SelectionItem::Fragment(fragment) => fragment.render(),
            })
            .collect();
        format!("{{ {} }}", rendered.join(" "))
    }
}

/// rendered operation document plus its variables payload
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltOperation {
    pub document: String,
    pub variables: serde_json::Value,
}

impl BuiltOperation {
    pub fn new(
        kind: OperationKind,
        var_defs: Vec<VariableDef>,
        selection: SelectionSet,
        variables: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            document: render_document(kind, None, &var_defs, &selection),
            variables: serde_json::Value::Object(variables),
        }
    }
}

pub(crate) fn render_document(
    kind: OperationKind,
    name: Option<&str>,
    var_defs: &[VariableDef],
    selection: &SelectionSet,
) -> String {
    let mut head = kind.keyword().to_string();
    if let Some(name) = name {
        head.push(' ');
        head.push_str(name);
    }
    if !var_defs.is_empty() {
        let rendered: Vec<String> = var_defs
            .iter()
            .map(|def| {
                let mut out = format!("${}: {}", def.name, def.gql_type);
                if let Some(default) = &def.default {
                    out.push_str(" = ");
                    out.push_str(default);
                }
                out
            })
            .collect();
        head.push('(');
        head.push_str(&rendered.join(", "));
        head.push(')');
    }
    format!("{head} {}", selection.render())
}

/// render a json value as a graphql literal; object keys stay bare
fn render_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_json).collect();
            format!("[{}]", rendered.join(", "))
        }
        serde_json::Value::Object(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{key}: {}", render_json(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        other => other.to_string(),
    }
}

/// schema-validated selection builder for one selectable type
#[derive(Debug, Clone)]
pub struct SelectionBuilder<'a> {
    model: &'a SchemaModel,
    type_name: String,
    set: SelectionSet,
    variables: Vec<VariableDef>,
}

impl<'a> SelectionBuilder<'a> {
    /// start a selection on an object, interface, or union type
    pub fn for_type(model: &'a SchemaModel, type_name: &str) -> Result<Self> {
        match model.get(type_name) {
            Some(def) if def.is_selectable() => Ok(Self {
                model,
                type_name: type_name.to_string(),
                set: SelectionSet::new(),
                variables: Vec::new(),
            }),
            Some(def) => Err(Error::InvalidSelection {
                context: type_name.to_string(),
                message: format!("{} types have no selection set", def.kind()),
            }),
            None => Err(Error::InvalidSelection {
                context: type_name.to_string(),
                message: "unknown type".to_string(),
            }),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// select a leaf field with no arguments
    pub fn select(self, field: &str) -> Result<Self> {
        self.select_with(field, &[], None)
    }

    /// select a field, binding arguments and an optional sub-selection
    pub fn select_with(
        mut self,
        field: &str,
        args: &[(&str, ArgValue)],
        nested: Option<SelectionBuilder<'a>>,
    ) -> Result<Self> {
        let model = self.model;

        if field == "__typename" {
            if !args.is_empty() || nested.is_some() {
                return Err(Error::InvalidSelection {
                    context: format!("{}.__typename", self.type_name),
                    message: "__typename takes no arguments or sub-selection".to_string(),
                });
            }
            self.set.push_field(FieldSelection::new("__typename"));
            return Ok(self);
        }

        let Some(field_def) = model.field(&self.type_name, field) else {
            return Err(Error::UnknownField {
                type_name: self.type_name.clone(),
                field: field.to_string(),
            });
        };

        let mut selection = FieldSelection::new(field);
        for (name, value) in args {
            let Some(arg_def) = field_def.arguments.iter().find(|a| a.name == *name) else {
                return Err(Error::ArgumentType {
                    field: field.to_string(),
                    argument: (*name).to_string(),
                    expected: "a declared argument".to_string(),
                    message: format!("field `{field}` has no argument named `{name}`"),
                });
            };
            match value {
                ArgValue::Variable(variable) => {
                    merge_variable(
                        &mut self.variables,
                        VariableDef::new(variable.clone(), arg_def.ty.render_graphql()),
                        &self.type_name,
                    )?;
                    selection = selection.arg_variable(*name, variable);
                }
                ArgValue::Value(json) => {
                    let rendered = render_bound_value(
                        model,
                        json,
                        &arg_def.ty,
                        &ArgContext {
                            field,
                            argument: name,
                            expected: arg_def.ty.render_graphql(),
                        },
                    )?;
                    selection = selection.arg_text(*name, rendered);
                }
            }
        }

        for arg_def in &field_def.arguments {
            if arg_def.is_required() && !args.iter().any(|(name, _)| *name == arg_def.name) {
                return Err(Error::ArgumentType {
                    field: field.to_string(),
                    argument: arg_def.name.clone(),
                    expected: arg_def.ty.render_graphql(),
                    message: "missing required argument".to_string(),
                });
            }
        }

        let is_leaf = model
            .get(field_def.ty.name())
            .map(TypeDef::is_leaf)
            .unwrap_or(true);
        match (is_leaf, nested) {
            (true, None) => {}
            (true, Some(_)) => {
                return Err(Error::InvalidSelection {
                    context: format!("{}.{field}", self.type_name),
                    message: "leaf fields take no sub-selection".to_string(),
                })
            }
            (false, None) => {
                return Err(Error::InvalidSelection {
                    context: format!("{}.{field}", self.type_name),
                    message: "composite fields need a sub-selection".to_string(),
                })
            }
            (false, Some(inner)) => {
                if inner.type_name != field_def.ty.name() {
                    return Err(Error::InvalidSelection {
                        context: format!("{}.{field}", self.type_name),
                        message: format!(
                            "sub-selection built for `{}`, field resolves to `{}`",
                            inner.type_name,
                            field_def.ty.name()
                        ),
                    });
                }
                if inner.set.is_empty() {
                    return Err(Error::InvalidSelection {
                        context: format!("{}.{field}", self.type_name),
                        message: "empty sub-selection".to_string(),
                    });
                }
                let (set, variables) = inner.into_parts();
                for def in variables {
                    merge_variable(&mut self.variables, def, &self.type_name)?;
                }
                selection = selection.with_selection(set);
            }
        }

        self.set.push_field(selection);
        Ok(self)
    }

    /// attach an inline fragment for one possible type of an interface or
    /// union
    pub fn inline_fragment(mut self, on: &str, nested: SelectionBuilder<'a>) -> Result<Self> {
        let model = self.model;
        let possible = model.possible_types(&self.type_name);
        if possible.is_empty() {
            return Err(Error::InvalidSelection {
                context: self.type_name.clone(),
                message: "inline fragments apply to interface and union types".to_string(),
            });
        }
        if !possible.iter().any(|object| object.name == on) {
            return Err(Error::InvalidSelection {
                context: self.type_name.clone(),
                message: format!("`{on}` is not a possible type of `{}`", self.type_name),
            });
        }
        if nested.type_name != on {
            return Err(Error::InvalidSelection {
                context: self.type_name.clone(),
                message: format!(
                    "fragment selection built for `{}`, condition is `{on}`",
                    nested.type_name
                ),
            });
        }
        if nested.set.is_empty() {
            return Err(Error::InvalidSelection {
                context: format!("{}.{on}", self.type_name),
                message: "empty fragment selection".to_string(),
            });
        }
        let (set, variables) = nested.into_parts();
        for def in variables {
            merge_variable(&mut self.variables, def, &self.type_name)?;
        }
        self.set.push_fragment(InlineFragment::new(on, set));
        Ok(self)
    }

    /// render the bare selection set
    pub fn render(&self) -> String {
        self.set.render()
    }

    fn into_parts(self) -> (SelectionSet, Vec<VariableDef>) {
        (self.set, self.variables)
    }
}

/// operation document builder rooted at query, mutation, or subscription
#[derive(Debug, Clone)]
pub struct OperationBuilder<'a> {
    kind: OperationKind,
    name: Option<String>,
    inner: SelectionBuilder<'a>,
}

impl<'a> OperationBuilder<'a> {
    pub fn query(model: &'a SchemaModel) -> Result<Self> {
        Self::for_kind(model, OperationKind::Query)
    }

    pub fn mutation(model: &'a SchemaModel) -> Result<Self> {
        Self::for_kind(model, OperationKind::Mutation)
    }

    pub fn subscription(model: &'a SchemaModel) -> Result<Self> {
        Self::for_kind(model, OperationKind::Subscription)
    }

    fn for_kind(model: &'a SchemaModel, kind: OperationKind) -> Result<Self> {
        let Some(root) = model.root(kind) else {
            return Err(Error::InvalidSelection {
                context: kind.keyword().to_string(),
                message: format!("schema has no {} root", kind.keyword()),
            });
        };
        Ok(Self {
            kind,
            name: None,
            inner: SelectionBuilder::for_type(model, &root.name)?,
        })
    }

    /// set the operation name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// declare a variable explicitly; bound variables auto-declare with
    /// the argument's own type, so this is only needed for defaults or
    /// type overrides
    pub fn variable(
        mut self,
        name: impl Into<String>,
        gql_type: impl Into<String>,
        default: Option<String>,
    ) -> Self {
        let name = name.into();
        let def = VariableDef {
            name: name.clone(),
            gql_type: gql_type.into(),
            default,
        };
        match self.inner.variables.iter_mut().find(|v| v.name == name) {
            Some(existing) => *existing = def,
            None => self.inner.variables.push(def),
        }
        self
    }

    /// select an operation field with no arguments
    pub fn select(self, field: &str) -> Result<Self> {
        self.select_with(field, &[], None)
    }

    /// select an operation field, binding arguments and a sub-selection
    pub fn select_with(
        mut self,
        field: &str,
        args: &[(&str, ArgValue)],
        nested: Option<SelectionBuilder<'a>>,
    ) -> Result<Self> {
        self.inner = self.inner.select_with(field, args, nested)?;
        Ok(self)
    }

    /// render the full operation document
    pub fn render(&self) -> String {
        render_document(
            self.kind,
            self.name.as_deref(),
            &self.inner.variables,
            &self.inner.set,
        )
    }
}

fn merge_variable(
    variables: &mut Vec<VariableDef>,
    def: VariableDef,
    context: &str,
) -> Result<()> {
    match variables.iter().find(|v| v.name == def.name) {
        Some(existing) if existing.gql_type == def.gql_type => Ok(()),
        Some(existing) => Err(Error::InvalidSelection {
            context: context.to_string(),
            message: format!(
                "variable `${}` bound at both `{}` and `{}`",
                def.name, existing.gql_type, def.gql_type
            ),
        }),
        None => {
            variables.push(def);
            Ok(())
        }
    }
}

struct ArgContext<'a> {
    field: &'a str,
    argument: &'a str,
    expected: String,
}

impl ArgContext<'_> {
    fn err(&self, message: impl Into<String>) -> Error {
        Error::ArgumentType {
            field: self.field.to_string(),
            argument: self.argument.to_string(),
            expected: self.expected.clone(),
            message: message.into(),
        }
    }
}

/// validate a bound json value against a type reference and render it as
/// graphql literal text, enum values bare
fn render_bound_value(
    model: &SchemaModel,
    value: &serde_json::Value,
    ty: &TypeRef,
    ctx: &ArgContext<'_>,
) -> Result<String> {
    render_level(model, value, ty, ty.wrapping().list_depth(), ctx)
}

fn render_level(
    model: &SchemaModel,
    value: &serde_json::Value,
    ty: &TypeRef,
    level: usize,
    ctx: &ArgContext<'_>,
) -> Result<String> {
    let nullable = if level == 0 {
        !ty.wrapping().inner_nonnull()
    } else {
        ty.wrapping().lists()[level - 1] == ListWrapping::NullableList
    };

    if value.is_null() {
        return if nullable {
            Ok("null".to_string())
        } else {
            Err(ctx.err("found null at a non-null position"))
        };
    }

    if level > 0 {
        let serde_json::Value::Array(items) = value else {
            return Err(ctx.err(format!("expected a list, found {}", json_kind(value))));
        };
        let rendered: Vec<String> = items
            .iter()
            .map(|item| render_level(model, item, ty, level - 1, ctx))
            .collect::<Result<_>>()?;
        return Ok(format!("[{}]", rendered.join(", ")));
    }

    render_named(model, value, ty.name(), ctx)
}

fn render_named(
    model: &SchemaModel,
    value: &serde_json::Value,
    name: &str,
    ctx: &ArgContext<'_>,
) -> Result<String> {
    match model.get(name) {
        Some(TypeDef::Scalar(scalar)) => {
            if !scalar.builtin {
                // custom scalars are opaque; pass the literal through
                return Ok(render_json(value));
            }
            let ok = match scalar.name.as_str() {
                "Int" => value.as_i64().is_some(),
                "Float" => value.is_number(),
                "Boolean" => value.is_boolean(),
                "String" => value.is_string(),
                "ID" => value.is_string() || value.as_i64().is_some(),
                _ => true,
            };
            if ok {
                Ok(render_json(value))
            } else {
                Err(ctx.err(format!(
                    "expected {}, found {}",
                    scalar.name,
                    json_kind(value)
                )))
            }
        }
        Some(TypeDef::Enum(def)) => {
            let Some(text) = value.as_str() else {
                return Err(ctx.err(format!(
                    "expected enum {}, found {}",
                    def.name,
                    json_kind(value)
                )));
            };
            if def.values.iter().any(|v| v.name == text) {
                Ok(text.to_string())
            } else {
                Err(ctx.err(format!("unknown enum value `{text}` for {}", def.name)))
            }
        }
        Some(TypeDef::InputObject(input)) => {
            let serde_json::Value::Object(entries) = value else {
                return Err(ctx.err(format!(
                    "expected input object {}, found {}",
                    input.name,
                    json_kind(value)
                )));
            };
            for key in entries.keys() {
                if !input.fields.iter().any(|f| &f.name == key) {
                    return Err(ctx.err(format!(
                        "input object {} has no field `{key}`",
                        input.name
                    )));
                }
            }
            let mut parts = Vec::new();
            for field in &input.fields {
                match entries.get(&field.name) {
                    Some(inner) => {
                        let rendered = render_bound_value(model, inner, &field.ty, ctx)?;
                        parts.push(format!("{}: {rendered}", field.name));
                    }
                    None if field.is_required() => {
                        return Err(ctx.err(format!(
                            "missing required input field `{}` of {}",
                            field.name, input.name
                        )));
                    }
                    None => {}
                }
            }
            Ok(format!("{{{}}}", parts.join(", ")))
        }
        // argument types are validated as input kinds at build time
        _ => Err(ctx.err(format!("`{name}` is not an input type"))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}
