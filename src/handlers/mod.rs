// Two security tiers:
// public (login, registration) and protected (bearer token required).

pub mod protected;
pub mod public;
pub mod validation;
