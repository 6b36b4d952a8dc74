mod auth;
mod dashboard;

pub use auth::{LoginPage, SignupPage};
pub use dashboard::DashboardPage;
