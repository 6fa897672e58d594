// Public handlers: no bearer token required.
//
// Only token acquisition and self-registration live here; everything else
// is mounted behind the JWT gate in `protected`.

pub mod login;
pub mod register;

pub use login::login;
pub use register::register;
