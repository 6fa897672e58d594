pub mod category;
pub mod product;
pub mod user;

pub use category::Category;
pub use product::{Product, ProductRow};
pub use user::{User, UserCredentials};
