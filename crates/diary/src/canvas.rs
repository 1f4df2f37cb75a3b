use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::NaiveDate;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Storage of diary canvas images.
#[async_trait::async_trait]
pub trait CanvasStore: Send + Sync {
    /// Stores the PNG of a user's day and returns where it was written.
    async fn save(&self, user_id: &str, date: NaiveDate, png: &[u8]) -> anyhow::Result<String>;

    async fn load(&self, path: &str) -> anyhow::Result<Vec<u8>>;

    async fn remove(&self, path: &str) -> anyhow::Result<()>;
}

/// Writes canvases to `<root>/<user_id>/<date>.png`.
#[derive(Debug, Clone)]
pub struct FsCanvasStore {
    root: PathBuf,
}

impl FsCanvasStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
            && path
                .components()
                .all(|c| !matches!(c, std::path::Component::ParentDir))
    }
}

#[async_trait::async_trait]
impl CanvasStore for FsCanvasStore {
    async fn save(&self, user_id: &str, date: NaiveDate, png: &[u8]) -> anyhow::Result<String> {
        check_dir_name(user_id)?;

        let dir = self.root.join(user_id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{date}.png"));
        tokio::fs::write(&path, png).await?;

        Ok(path.to_string_lossy().into_owned())
    }

    async fn load(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let path = Path::new(path);
        if !self.contains(path) {
            anyhow::bail!("canvas path {} is outside of the store", path.display());
        }

        Ok(tokio::fs::read(path).await?)
    }

    async fn remove(&self, path: &str) -> anyhow::Result<()> {
        let path = Path::new(path);
        if !self.contains(path) {
            anyhow::bail!("canvas path {} is outside of the store", path.display());
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Rejects user ids that cannot be used as a single directory name.
pub fn check_dir_name(user_id: &str) -> oneday_shared::Result<()> {
    if user_id.is_empty()
        || !user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        oneday_shared::invalid!("userId `{user_id}` cannot be used as a directory name");
    }

    Ok(())
}

/// Decodes a base64 PNG, optionally wrapped in a `data:image/png;base64,` URL.
pub fn decode_canvas(data: &str) -> oneday_shared::Result<Vec<u8>> {
    let data = data.trim();
    let encoded = match data.strip_prefix("data:") {
        Some(_) => match data.strip_prefix(DATA_URL_PREFIX) {
            Some(encoded) => encoded,
            None => oneday_shared::invalid!("canvas must be a PNG data URL"),
        },
        None => data,
    };

    let Ok(bytes) = STANDARD.decode(encoded) else {
        oneday_shared::invalid!("canvas is not valid base64");
    };

    if !bytes.starts_with(&PNG_SIGNATURE) {
        oneday_shared::invalid!("canvas is not a PNG image");
    }

    Ok(bytes)
}
