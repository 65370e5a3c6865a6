pub mod create_user_request;
pub mod update_user_request;
pub mod auth_request;

pub use create_user_request::CreateUserRequest;
pub use update_user_request::UpdateUserRequest;
pub use auth_request::OAuthCallbackQuery;
