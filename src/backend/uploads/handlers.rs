/**
 * Upload Handler
 *
 * POST /api/uploads, multipart field `file`.
 *
 * # Checks
 *
 * 1. a non-empty `file` field is present
 * 2. its size is within `max_upload_bytes`
 * 3. it declares a Content-Type, and that type is JPEG, PNG or GIF
 * 4. its leading bytes carry the declared type's signature
 *
 * Every failure is a 400. Stored files are named `<uuid>.<ext>` and served
 * by the static `/uploads` service.
 *
 * The endpoint requires no authentication.
 */

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{multipart::{Field, MultipartRejection}, Multipart, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::server::config::ServerConfig;
use crate::backend::uploads::signature::ImageKind;

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "file";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UploadResponse {
    pub url: String,
}

pub async fn upload_image(
    State(config): State<Arc<ServerConfig>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Rejected multipart body: {}", e);
        ApiError::validation("invalid multipart body")
    })? {
        if field.name() == Some(FILE_FIELD) {
            let content_type = field.content_type().map(str::to_string);
            let data = read_limited(field, config.max_upload_bytes).await?;
            upload = Some((content_type, data));
            break;
        }
    }

    let (content_type, data) = match upload {
        Some((content_type, data)) if !data.is_empty() => (content_type, data),
        _ => return Err(ApiError::validation("no file was provided")),
    };

    let content_type = content_type.ok_or_else(|| ApiError::validation("missing content type"))?;
    let kind = ImageKind::from_mime(&content_type)
        .ok_or_else(|| ApiError::validation("file type is not allowed"))?;

    if !kind.matches(&data) {
        tracing::warn!("Upload declared as {} does not carry its signature", content_type);
        return Err(ApiError::validation("file content is not a valid image"));
    }

    let filename = format!("{}.{}", Uuid::new_v4(), kind.extension());
    store(&config.upload_dir, &filename, &data).await?;

    tracing::info!("Stored upload {} ({} bytes)", filename, data.len());

    Ok(Json(UploadResponse {
        url: format!("/uploads/{}", filename),
    }))
}

/// Read a field fully, failing as soon as it exceeds `max` bytes
async fn read_limited(mut field: Field<'_>, max: usize) -> Result<Vec<u8>, ApiError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(|e| {
        tracing::warn!("Upload read error: {}", e);
        ApiError::validation("invalid multipart body")
    })? {
        if data.len() + chunk.len() > max {
            return Err(ApiError::validation(format!(
                "file is too large (max {} bytes)",
                max
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn store(dir: &Path, filename: &str, data: &[u8]) -> Result<(), ApiError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        tracing::error!("Failed to create upload directory {}: {}", dir.display(), e);
        ApiError::internal("upload directory unavailable")
    })?;
    tokio::fs::write(dir.join(filename), data).await.map_err(|e| {
        tracing::error!("Failed to write upload {}: {}", filename, e);
        ApiError::internal("failed to store upload")
    })
}
