/**
 * User Model and Database Operations
 *
 * This module handles user records and their persistence. The `username`
 * column carries a UNIQUE constraint, which is what ultimately arbitrates
 * concurrent registrations of the same name.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, case-sensitive)
    pub username: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Avatar image URL, usually one returned by the upload endpoint
    pub avatar_url: Option<String>,
    /// Date of birth
    pub birthdate: Option<NaiveDate>,
    /// Free-form profile text
    pub bio: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields for a user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// Create a new user
///
/// # Returns
/// Created user, or `sqlx::Error::Database` with a unique violation if the
/// username is taken
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, avatar_url, birthdate, bio, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, username, password_hash, avatar_url, birthdate, bio, created_at
        "#,
    )
    .bind(id)
    .bind(&new_user.username)
    .bind(&new_user.password_hash)
    .bind(&new_user.avatar_url)
    .bind(new_user.birthdate)
    .bind(&new_user.bio)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username (exact, case-sensitive match)
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, avatar_url, birthdate, bio, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}
