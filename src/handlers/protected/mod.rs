// Protected handlers: mounted behind `jwt_auth_middleware`, so every
// handler here can rely on an `AuthUser` extension being present.

pub mod categories;
pub mod products;
pub mod users;
