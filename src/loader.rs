use std::fmt;
use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use futures::FutureExt;
use iced::widget::image::Handle;

#[allow(unused_imports)]
use log::{debug, info, warn, error};

/// Decoded bitmap ready for drawing: a renderer handle plus the pixel
/// dimensions the layout math scales against.
#[derive(Debug, Clone)]
pub struct SlideImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Why a slide image could not be produced. Kept `Clone` so a shared load
/// future can hand the same outcome to every awaiter.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Io(std::io::ErrorKind),
    Decode(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(kind) => write!(f, "read failed: {:?}", kind),
            LoadError::Decode(message) => write!(f, "decode failed: {}", message),
        }
    }
}

/// The image-fetch collaborator: given a source path, produce a future that
/// resolves to a decoded image or to the reason it could not be loaded.
pub trait ImageLoader: Send + Sync {
    fn load(&self, src: &Path) -> BoxFuture<'static, Result<SlideImage, LoadError>>;
}

/// Production loader: async file read, then an in-memory decode.
#[derive(Debug, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, src: &Path) -> BoxFuture<'static, Result<SlideImage, LoadError>> {
        let path = src.to_path_buf();
        async move { read_and_decode(path).await }.boxed()
    }
}

async fn read_and_decode(path: PathBuf) -> Result<SlideImage, LoadError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| LoadError::Io(e.kind()))?;
    debug!("read {} bytes from {:?}", bytes.len(), path);
    decode_bytes(&bytes)
}

fn decode_bytes(bytes: &[u8]) -> Result<SlideImage, LoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    let rgba_image = img.to_rgba8();
    let (width, height) = rgba_image.dimensions();
    let rgba_bytes = rgba_image.into_raw();

    Ok(SlideImage {
        handle: Handle::from_rgba(width, height, rgba_bytes),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgba8(width, height);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_with_dimensions() {
        let image = decode_bytes(&png_bytes(4, 2)).unwrap();
        assert_eq!(image.width, 4);
        assert_eq!(image.height, 2);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let loader = FsImageLoader;
        let result = loader
            .load(Path::new("/nonexistent/slide.png"))
            .await;
        assert_eq!(result.unwrap_err(), LoadError::Io(std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn reads_and_decodes_from_disk() {
        let path = std::env::temp_dir().join(format!("filmstrip-loader-{}.png", std::process::id()));
        std::fs::write(&path, png_bytes(3, 5)).unwrap();

        let loader = FsImageLoader;
        let image = loader.load(&path).await.unwrap();
        assert_eq!((image.width, image.height), (3, 5));

        std::fs::remove_file(&path).ok();
    }
}
