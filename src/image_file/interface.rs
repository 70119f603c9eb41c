use crate::error::UploadError;
use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// The user-chosen payload. Bytes are shared so a selection can be cloned
/// into effects without copying the file.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<Vec<u8>>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_for(&name).to_string();
        Self {
            name,
            mime,
            bytes: Arc::new(bytes),
        }
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|extension| extension.to_str())
}

pub fn mime_for(name: &str) -> &'static str {
    extension_of(Path::new(name))
        .and_then(ImageFormat::from_extension)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

pub trait FileReader {
    fn read(&self, path: &Path) -> Result<SelectedFile, UploadError>;
}
