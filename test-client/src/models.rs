//! generated data models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Color {
    #[serde(rename = "RED")]
    Red,
    #[serde(rename = "GREEN")]
    Green,
    #[serde(rename = "BLUE")]
    Blue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Node {
    User(User),
    Post(Post),
}

impl Node {
    pub fn id(&self) -> &String {
        match self {
            Node::User(value) => &value.id,
            Node::Post(value) => &value.id,
        }
    }
}

/// a registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub nicknames: Vec<Option<String>>,
    #[serde(rename = "favoriteColor")]
    pub favorite_color: Option<Color>,
    #[serde(rename = "bestFriend")]
    pub best_friend: Option<Box<User>>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// set when the post went live
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub author: Box<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum SearchResult {
    User(User),
    Post(Post),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFilter {
    #[serde(rename = "titleContains")]
    pub title_contains: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: Option<Box<User>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeResponse {
    pub node: Option<Box<Node>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search: Vec<SearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsSinceResponse {
    #[serde(rename = "postsSince")]
    pub posts_since: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorsResponse {
    pub colors: Vec<Color>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameUserResponse {
    #[serde(rename = "renameUser")]
    pub rename_user: Option<Box<User>>,
}
