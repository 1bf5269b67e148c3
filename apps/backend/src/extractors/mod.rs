pub mod auth_token;
pub mod current_agent;
pub mod validated_json;

pub use auth_token::AuthToken;
pub use current_agent::CurrentAgent;
pub use validated_json::ValidatedJson;
