//! Types and pure logic shared by the API server and the admin CLI.

pub mod api;
pub mod classifier;
pub mod schema;
