pub mod categories;
pub mod manager;
pub mod models;
pub mod products;
pub mod users;

pub use manager::{Database, DatabaseError};
