// handlers/protected/mod.rs - handlers behind the `auth-token` gate
//
// Each handler can rely on an `AuthUser` extension being present.

pub mod products;
