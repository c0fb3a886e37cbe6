//! Image Uploads
//!
//! `POST /api/uploads` stores one image under the configured upload directory
//! and returns the public URL it is served from (`/uploads/<name>`).
//!
//! - **`signature`** - allowed MIME types and their magic bytes
//! - **`handlers`** - the multipart upload handler

pub mod handlers;
pub mod signature;

pub use handlers::{upload_image, UploadResponse};
pub use signature::ImageKind;
