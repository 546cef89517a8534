pub mod user_response;
pub mod auth_response;

pub use user_response::{RegisterResponse, UserSummary};
pub use auth_response::{LoginResponse, RegistrationMethod, RegistrationStatus};
