/**
 * Image Signatures
 *
 * The declared Content-Type picks the image kind; the file's leading bytes
 * must then carry that kind's signature. A PNG-declared file starting with
 * JPEG bytes is rejected.
 */

/// Accepted image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// Map a declared MIME type (parameters ignored) to an image kind
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn magic(self) -> &'static [u8] {
        match self {
            Self::Jpeg => &[0xFF, 0xD8],
            Self::Png => &[0x89, 0x50, 0x4E, 0x47],
            Self::Gif => &[0x47, 0x49, 0x46],
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    pub fn matches(self, data: &[u8]) -> bool {
        data.starts_with(self.magic())
    }
}
