//! checked-in generator output for the fixture schema in
//! `schema.graphql`, exercised end to end by this crate's tests.
//!
//! regenerate after changing the fixture:
//!
//! ```text
//! gqlgen --schema schema.graphql --out src
//! ```

pub mod builders;
pub mod models;
