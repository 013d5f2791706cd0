//! generated query builders

#![allow(unused_imports)]

use gqlgen::{BuiltOperation, FieldSelection, InlineFragment, OperationKind, SelectionSet, VariableDef};

use super::models::*;

#[derive(Debug, Clone)]
pub struct NodeSelect {
    set: SelectionSet,
}

impl Default for NodeSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeSelect {
    pub fn new() -> Self {
        let mut set = SelectionSet::new();
        set.push_field(FieldSelection::new("__typename"));
        Self { set }
    }

    pub fn id(mut self) -> Self {
        self.set.push_field(FieldSelection::new("id"));
        self
    }

    pub fn on_user(mut self, nested: UserSelect) -> Self {
        self.set.push_fragment(InlineFragment::new("User", nested.into_set()));
        self
    }

    pub fn on_post(mut self, nested: PostSelect) -> Self {
        self.set.push_fragment(InlineFragment::new("Post", nested.into_set()));
        self
    }

    pub fn into_set(self) -> SelectionSet {
        self.set
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserSelect {
    set: SelectionSet,
}

impl UserSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self) -> Self {
        self.set.push_field(FieldSelection::new("id"));
        self
    }

    pub fn name(mut self) -> Self {
        self.set.push_field(FieldSelection::new("name"));
        self
    }

    pub fn nicknames(mut self) -> Self {
        self.set.push_field(FieldSelection::new("nicknames"));
        self
    }

    pub fn favorite_color(mut self) -> Self {
        self.set.push_field(FieldSelection::new("favoriteColor"));
        self
    }

    pub fn best_friend(mut self, nested: UserSelect) -> Self {
        self.set.push_field(FieldSelection::new("bestFriend").with_selection(nested.into_set()));
        self
    }

    pub fn posts(mut self, nested: PostSelect) -> Self {
        self.set.push_field(FieldSelection::new("posts").with_selection(nested.into_set()));
        self
    }

    pub fn into_set(self) -> SelectionSet {
        self.set
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostSelect {
    set: SelectionSet,
}

impl PostSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self) -> Self {
        self.set.push_field(FieldSelection::new("id"));
        self
    }

    pub fn title(mut self) -> Self {
        self.set.push_field(FieldSelection::new("title"));
        self
    }

    pub fn published_at(mut self) -> Self {
        self.set.push_field(FieldSelection::new("publishedAt"));
        self
    }

    pub fn author(mut self, nested: UserSelect) -> Self {
        self.set.push_field(FieldSelection::new("author").with_selection(nested.into_set()));
        self
    }

    pub fn into_set(self) -> SelectionSet {
        self.set
    }
}

#[derive(Debug, Clone)]
pub struct SearchResultSelect {
    set: SelectionSet,
}

impl Default for SearchResultSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchResultSelect {
    pub fn new() -> Self {
        let mut set = SelectionSet::new();
        set.push_field(FieldSelection::new("__typename"));
        Self { set }
    }

    pub fn on_user(mut self, nested: UserSelect) -> Self {
        self.set.push_fragment(InlineFragment::new("User", nested.into_set()));
        self
    }

    pub fn on_post(mut self, nested: PostSelect) -> Self {
        self.set.push_fragment(InlineFragment::new("Post", nested.into_set()));
        self
    }

    pub fn into_set(self) -> SelectionSet {
        self.set
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuerySelect {
    set: SelectionSet,
    var_defs: Vec<VariableDef>,
    variables: serde_json::Map<String, serde_json::Value>,
}

impl QuerySelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: String, nested: UserSelect) -> Self {
        let mut field = FieldSelection::new("user");
        self.var_defs.push(VariableDef::new("id", "ID!"));
        self.variables.insert("id".to_string(), serde_json::to_value(&id).expect("serialize"));
        field = field.arg_variable("id", "id");
        self.set.push_field(field.with_selection(nested.into_set()));
        self
    }

    pub fn node(mut self, id: String, nested: NodeSelect) -> Self {
        let mut field = FieldSelection::new("node");
        self.var_defs.push(VariableDef::new("id", "ID!"));
        self.variables.insert("id".to_string(), serde_json::to_value(&id).expect("serialize"));
        field = field.arg_variable("id", "id");
        self.set.push_field(field.with_selection(nested.into_set()));
        self
    }

    pub fn search(mut self, term: String, filter: Option<PostFilter>, nested: SearchResultSelect) -> Self {
        let mut field = FieldSelection::new("search");
        self.var_defs.push(VariableDef::new("term", "String!"));
        self.variables.insert("term".to_string(), serde_json::to_value(&term).expect("serialize"));
        field = field.arg_variable("term", "term");
        if let Some(value) = filter {
            self.var_defs.push(VariableDef::new("filter", "PostFilter"));
            self.variables.insert("filter".to_string(), serde_json::to_value(&value).expect("serialize"));
            field = field.arg_variable("filter", "filter");
        }
        self.set.push_field(field.with_selection(nested.into_set()));
        self
    }

    pub fn posts_since(mut self, after: String, nested: PostSelect) -> Self {
        let mut field = FieldSelection::new("postsSince");
        self.var_defs.push(VariableDef::new("after", "DateTime!"));
        self.variables.insert("after".to_string(), serde_json::to_value(&after).expect("serialize"));
        field = field.arg_variable("after", "after");
        self.set.push_field(field.with_selection(nested.into_set()));
        self
    }

    pub fn colors(mut self) -> Self {
        self.set.push_field(FieldSelection::new("colors"));
        self
    }

    pub fn build(self) -> BuiltOperation {
        BuiltOperation::new(OperationKind::Query, self.var_defs, self.set, self.variables)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MutationSelect {
    set: SelectionSet,
    var_defs: Vec<VariableDef>,
    variables: serde_json::Map<String, serde_json::Value>,
}

impl MutationSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_user(mut self, id: String, name: String, nested: UserSelect) -> Self {
        let mut field = FieldSelection::new("renameUser");
        self.var_defs.push(VariableDef::new("id", "ID!"));
        self.variables.insert("id".to_string(), serde_json::to_value(&id).expect("serialize"));
        field = field.arg_variable("id", "id");
        self.var_defs.push(VariableDef::new("name", "String!"));
        self.variables.insert("name".to_string(), serde_json::to_value(&name).expect("serialize"));
        field = field.arg_variable("name", "name");
        self.set.push_field(field.with_selection(nested.into_set()));
        self
    }

    pub fn build(self) -> BuiltOperation {
        BuiltOperation::new(OperationKind::Mutation, self.var_defs, self.set, self.variables)
    }
}
