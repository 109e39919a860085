//! Storage of uploaded images (book covers, author pictures)

use std::path::{Path, PathBuf};

use image::ImageFormat;
use uuid::Uuid;

use crate::{
    config::MediaConfig,
    error::{AppError, AppResult},
};

/// Subdirectory of the media root every upload lands in
pub const IMAGES_DIR: &str = "images";

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

const IMAGE_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

#[derive(Clone)]
pub struct MediaService {
    root: PathBuf,
}

impl MediaService {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
        }
    }

    /// Write an uploaded image under a fresh random name.
    ///
    /// Returns the path relative to the media root, e.g.
    /// `images/3f2a...9c.png`.
    pub async fn store_image(&self, original_name: &str, data: &[u8]) -> AppResult<String> {
        let extension = extension_of(original_name);
        if !is_image_extension(&extension) {
            return Err(AppError::Validation(format!(
                "Unsupported image file: {}",
                original_name
            )));
        }
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        check_image_content(original_name, data).await?;

        let relative = image_path(&extension);
        let target = self.root.join(&relative);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Cannot create {}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&target, data)
            .await
            .map_err(|e| AppError::Internal(format!("Cannot write {}: {}", target.display(), e)))?;

        tracing::info!("Stored upload {} as {}", original_name, relative);
        Ok(relative)
    }
}

/// `images/<random hex><extension>`
fn image_path(extension: &str) -> String {
    format!("{}/{}{}", IMAGES_DIR, Uuid::new_v4().simple(), extension)
}

/// Extension of the file name including the dot, or an empty string.
///
/// Only the last suffix counts, and names starting with a dot
/// (`.hidden`) have none.
fn extension_of(file_name: &str) -> String {
    // Browsers may send Windows paths
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    Path::new(base)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Reject uploads whose bytes are not a decodable image of a supported format
async fn check_image_content(original_name: &str, data: &[u8]) -> AppResult<()> {
    let invalid = || AppError::Validation(format!("Not a valid image: {}", original_name));

    let format = image::guess_format(data).map_err(|_| invalid())?;
    if !IMAGE_FORMATS.contains(&format) {
        return Err(invalid());
    }

    // Decoding is CPU-bound
    let bytes = data.to_vec();
    let decoded = tokio::task::spawn_blocking(move || {
        image::load_from_memory_with_format(&bytes, format).is_ok()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Image check failed: {}", e)))?;

    if !decoded {
        tracing::debug!("Rejected upload {}: {:?} header but undecodable", original_name, format);
        return Err(invalid());
    }
    Ok(())
}

fn is_image_extension(extension: &str) -> bool {
    let bare = extension.trim_start_matches('.').to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&bare.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("cover.jpg"), ".jpg");
        assert_eq!(extension_of("photo.final.PNG"), ".PNG");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".hidden"), "");
        assert_eq!(extension_of("C:\\Users\\me\\scan.jpeg"), ".jpeg");
        assert_eq!(extension_of("dir/sub/pic.gif"), ".gif");
    }

    #[test]
    fn test_image_path_shape() {
        let path = image_path(".png");
        let name = path.strip_prefix("images/").unwrap();
        let (token, ext) = name.split_at(32);
        assert_eq!(ext, ".png");
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_image_paths_are_unique() {
        assert_ne!(image_path(".jpg"), image_path(".jpg"));
    }

    #[test]
    fn test_image_extensions() {
        assert!(is_image_extension(".JPG"));
        assert!(is_image_extension(".webp"));
        assert!(!is_image_extension(".exe"));
        assert!(!is_image_extension(""));
    }

    fn tiny_png() -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(2, 2)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_store_image_writes_under_images() {
        let root = std::env::temp_dir().join(format!("bookshelf-media-{}", Uuid::new_v4().simple()));
        let service = MediaService::new(&MediaConfig {
            root: root.to_string_lossy().into_owned(),
            ..Default::default()
        });

        let png = tiny_png();
        let relative = service.store_image("portrait.png", &png).await.unwrap();
        assert!(relative.starts_with("images/"));
        assert!(relative.ends_with(".png"));

        let written = tokio::fs::read(root.join(&relative)).await.unwrap();
        assert_eq!(written, png);

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_image_rejects_non_images() {
        let service = MediaService::new(&MediaConfig::default());
        let err = service.store_image("notes.txt", b"hello").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_store_image_rejects_disguised_content() {
        let root = std::env::temp_dir().join(format!("bookshelf-media-{}", Uuid::new_v4().simple()));
        let service = MediaService::new(&MediaConfig {
            root: root.to_string_lossy().into_owned(),
            ..Default::default()
        });

        let err = service
            .store_image("evil.png", b"<html><script>alert(1)</script></html>")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // PNG signature followed by garbage
        let err = service
            .store_image("broken.png", b"\x89PNG\r\n\x1a\nnot really a png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(!root.join(IMAGES_DIR).exists());
    }
}
