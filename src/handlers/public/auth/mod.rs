// handlers/public/auth/mod.rs - account creation and token acquisition

pub mod login; // POST /api/user/login
pub mod register; // POST /api/user/register

pub use login::login;
pub use register::register;

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub(crate) const EMAIL_EXISTS: &str = "Email already exists.";
