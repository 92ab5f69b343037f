// handlers/mod.rs - two security tiers
//
// public:    no token required (welcome, health, user register/login, product reads)
// protected: `auth-token` required (product create/update/delete)
pub mod protected;
pub mod public;
