// handlers/public/mod.rs - handlers reachable without a token
//
// Anything here must validate its own input; there is no caller identity.

pub mod auth;
pub mod home;
pub mod products;
