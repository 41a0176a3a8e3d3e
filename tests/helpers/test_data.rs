//! Test data builders

use NewsRelay::models::submission::ContentType;
use NewsRelay::models::user::CreateUserRequest;
use NewsRelay::state::CapturedContent;

pub const ADMIN_ID: i64 = 100_000_001;
pub const USER_ID: i64 = 200_000_002;
pub const OTHER_USER_ID: i64 = 300_000_003;
pub const CHANNEL_ID: i64 = -1_001_234_567_890;
pub const CHANNEL_USERNAME: &str = "@test_news";

pub fn user_profile(user_id: i64, first_name: &str, username: Option<&str>) -> CreateUserRequest {
    CreateUserRequest {
        user_id,
        username: username.map(str::to_string),
        first_name: first_name.to_string(),
    }
}

pub fn text_content(message_id: i32, text: &str) -> CapturedContent {
    CapturedContent {
        message_id,
        content_type: ContentType::Text,
        content: text.to_string(),
    }
}

pub fn photo_content(message_id: i32, caption: &str) -> CapturedContent {
    CapturedContent {
        message_id,
        content_type: ContentType::Photo,
        content: caption.to_string(),
    }
}
