pub mod auth_token;
pub mod current_user;
pub mod record_id;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use record_id::RecordId;
pub use validated_json::ValidatedJson;
