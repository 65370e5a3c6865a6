pub mod user_response;
pub mod external_user_response;
pub mod oauth_token_response;

pub use user_response::{UserResponse, CreateUserResponse};
pub use external_user_response::ExternalUserResponse;
pub use oauth_token_response::{GitHubTokenResponse, GoogleTokenResponse, OAuthLoginUrlResponse};
