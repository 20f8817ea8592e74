pub mod contact;
pub mod health;
pub mod index;
pub mod reviews;
pub mod schema;
