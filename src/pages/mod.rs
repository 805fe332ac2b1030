//! Top-level screens mounted by [`crate::App`].

mod dashboard;
mod login;
mod signup;

pub use dashboard::Dashboard;
pub use login::LoginPage;
pub use signup::SignupPage;
