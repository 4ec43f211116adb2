use std::io;
use std::path::{Path, PathBuf};
use base64::Engine as _;
use derive_more::{Display, Error};
use log::debug;
use crate::modules::types::ImageData;

#[derive(Debug, Display, Error)]
pub enum ImageError {
    #[display("cannot read image {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("unsupported image type: {}", path.display())]
    UnsupportedType { path: PathBuf },
}

pub fn mime_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

pub fn encode(mime: &str, bytes: &[u8]) -> ImageData {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    ImageData {
        mime: mime.to_string(),
        data_url: format!("data:{mime};base64,{payload}"),
    }
}

/// Reads an image file and encodes it for inline display.
///
/// The type check happens before any I/O. Dropping the returned future
/// abandons the read; nothing is kept from a partial read.
pub async fn load_image(path: &Path) -> Result<ImageData, ImageError> {
    let mime = mime_for(path).ok_or_else(|| ImageError::UnsupportedType {
        path: path.to_path_buf(),
    })?;
    let bytes = tokio::fs::read(path).await.map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes of {mime} from {}", bytes.len(), path.display());
    Ok(encode(mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn mime_is_picked_from_extension() {
        assert_eq!(mime_for(Path::new("cover.PNG")), Some("image/png"));
        assert_eq!(mime_for(Path::new("a/b/cover.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("notes.txt")), None);
        assert_eq!(mime_for(Path::new("cover")), None);
    }

    #[test]
    fn encode_builds_data_url() {
        let image = encode("image/png", b"abc");
        assert_eq!(image.data_url(), "data:image/png;base64,YWJj");
        assert_eq!(image.mime(), "image/png");
    }

    #[tokio::test]
    async fn load_image_reads_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cover.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.data_url(), "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn load_image_errors() {
        let tmp = tempdir().unwrap();

        let missing = load_image(&tmp.path().join("missing.png")).await;
        assert!(matches!(missing, Err(ImageError::Read { .. })));

        let text = tmp.path().join("notes.txt");
        fs::write(&text, b"hello").unwrap();
        let unsupported = load_image(&text).await;
        assert!(matches!(unsupported, Err(ImageError::UnsupportedType { .. })));
    }
}
