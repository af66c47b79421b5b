use std::collections::HashMap;

use chrono::Utc;
use entity::friendships::{self, FriendshipStatus};
use entity::users;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{users as user_accounts, AccountError};
use crate::types::friendship::{FriendRequest, ReceivedFriendRequest};

pub async fn send_friend_request(
    db: &DatabaseConnection,
    req: &FriendRequest,
) -> Result<friendships::Model, AccountError> {
    if req.user_email.trim().is_empty() || req.friend_email.trim().is_empty() {
        return Err(AccountError::InvalidInput(
            "userEmail and friendEmail are required".into(),
        ));
    }

    let sender = user_accounts::get_user_by_email(db, &req.user_email).await?;
    let recipient = user_accounts::get_user_by_email(db, &req.friend_email).await?;
    if sender.id == recipient.id {
        return Err(AccountError::InvalidInput("cannot befriend yourself".into()));
    }

    // A declined request may be sent again; anything else blocks a new one.
    if let Some(existing) = find_link(db, sender.id, recipient.id).await? {
        if existing.status != FriendshipStatus::Declined {
            return Err(AccountError::Conflict(
                "a friendship or request already exists between these users".into(),
            ));
        }
        friendships::Entity::delete_by_id(existing.id).exec(db).await?;
    }

    let link = friendships::ActiveModel {
        user_id: Set(sender.id),
        friend_id: Set(recipient.id),
        status: Set(FriendshipStatus::Pending),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(link)
}

pub async fn accept_friend_request(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<friendships::Model, AccountError> {
    resolve_request(db, request_id, FriendshipStatus::Accepted).await
}

pub async fn decline_friend_request(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<friendships::Model, AccountError> {
    resolve_request(db, request_id, FriendshipStatus::Declined).await
}

/// Users linked to `email` by an accepted friendship, in either direction.
pub async fn get_friends(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Vec<users::Model>, AccountError> {
    let user = user_accounts::get_user_by_email(db, email).await?;

    let links = friendships::Entity::find()
        .filter(
            Condition::any()
                .add(friendships::Column::UserId.eq(user.id))
                .add(friendships::Column::FriendId.eq(user.id)),
        )
        .filter(friendships::Column::Status.eq(FriendshipStatus::Accepted))
        .all(db)
        .await?;

    let friend_ids: Vec<i32> = links
        .iter()
        .map(|link| {
            if link.user_id == user.id {
                link.friend_id
            } else {
                link.user_id
            }
        })
        .collect();

    Ok(users::Entity::find()
        .filter(users::Column::Id.is_in(friend_ids))
        .order_by_asc(users::Column::Name)
        .all(db)
        .await?)
}

pub async fn remove_friend(
    db: &DatabaseConnection,
    user_id: i32,
    friend_id: i32,
) -> Result<(), AccountError> {
    let result = friendships::Entity::delete_many()
        .filter(pair_condition(user_id, friend_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AccountError::NotFound(format!(
            "friendship between {} and {}",
            user_id, friend_id
        )));
    }
    Ok(())
}

pub async fn get_received_friend_requests(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Vec<ReceivedFriendRequest>, AccountError> {
    let user = user_accounts::get_user_by_email(db, email).await?;

    let rows = friendships::Entity::find()
        .filter(friendships::Column::FriendId.eq(user.id))
        .filter(friendships::Column::Status.eq(FriendshipStatus::Pending))
        .order_by_desc(friendships::Column::CreatedAt)
        .all(db)
        .await?;

    let senders: HashMap<i32, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(rows.iter().map(|link| link.user_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|sender| (sender.id, sender))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|link| {
            let sender = senders.get(&link.user_id)?.clone();
            Some(ReceivedFriendRequest {
                id: link.id,
                user_id: link.user_id,
                friend_id: link.friend_id,
                status: link.status,
                created_at: link.created_at,
                sender_email: sender.email,
                sender_name: sender.name,
            })
        })
        .collect())
}

pub async fn get_friend_request(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<friendships::Model, AccountError> {
    friendships::Entity::find_by_id(request_id)
        .one(db)
        .await?
        .ok_or_else(|| AccountError::NotFound(format!("friend request {}", request_id)))
}

async fn resolve_request(
    db: &DatabaseConnection,
    request_id: i32,
    status: FriendshipStatus,
) -> Result<friendships::Model, AccountError> {
    let link = get_friend_request(db, request_id).await?;
    if link.status != FriendshipStatus::Pending {
        return Err(AccountError::Conflict(format!(
            "friend request {} is no longer pending",
            request_id
        )));
    }

    let mut active: friendships::ActiveModel = link.into();
    active.status = Set(status);
    Ok(active.update(db).await?)
}

async fn find_link(
    db: &DatabaseConnection,
    a: i32,
    b: i32,
) -> Result<Option<friendships::Model>, AccountError> {
    Ok(friendships::Entity::find()
        .filter(pair_condition(a, b))
        .one(db)
        .await?)
}

fn pair_condition(a: i32, b: i32) -> Condition {
    Condition::any()
        .add(
            Condition::all()
                .add(friendships::Column::UserId.eq(a))
                .add(friendships::Column::FriendId.eq(b)),
        )
        .add(
            Condition::all()
                .add(friendships::Column::UserId.eq(b))
                .add(friendships::Column::FriendId.eq(a)),
        )
}
