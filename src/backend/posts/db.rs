/**
 * Post Database Operations
 *
 * Posts reference their author through a nullable `user_id`; rows written
 * before authorship was tracked have no author and can never be deleted
 * through the API.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::posts::types::PostResponse;

/// Post row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

/// Post row joined with its author's username
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_username: Option<String>,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(row: PostWithAuthor) -> Self {
        Self {
            id: row.id,
            content: row.content,
            author_username: row.author_username,
            created_at: row.created_at,
        }
    }
}

/// Insert a post; `author` is `None` only for legacy imports
pub async fn insert_post(
    pool: &SqlitePool,
    content: &str,
    author: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, content, created_at, user_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, content, created_at, user_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(content)
    .bind(Utc::now())
    .bind(author)
    .fetch_one(pool)
    .await
}

/// All posts, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.content, p.created_at, u.username AS author_username
        FROM posts p
        LEFT JOIN users u ON u.id = p.user_id
        ORDER BY julianday(p.created_at) DESC, p.rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_post(pool: &SqlitePool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, content, created_at, user_id
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a post; returns whether a row was removed
pub async fn delete_post(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
