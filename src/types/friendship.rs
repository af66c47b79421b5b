use chrono::NaiveDateTime;
use entity::friendships::FriendshipStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FriendRequest {
    #[serde(rename = "userEmail", alias = "user_email", default)]
    pub user_email: String,
    #[serde(rename = "friendEmail", alias = "friend_email", default)]
    pub friend_email: String,
}

/// A pending request as shown to its recipient.
#[derive(Debug, Serialize)]
pub struct ReceivedFriendRequest {
    pub id: i32,
    pub user_id: i32,
    pub friend_id: i32,
    pub status: FriendshipStatus,
    pub created_at: NaiveDateTime,
    pub sender_email: String,
    pub sender_name: String,
}
