use crate::error::UploadError;
use crate::image_file::interface::SelectedFile;
use image::GenericImageView;
use std::fmt;
use std::sync::Arc;

/// Decoded RGBA8 pixels ready to hand to the screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<Vec<u8>>,
}

impl Preview {
    /// Decodes `file` and shrinks it so neither side exceeds `max_side`,
    /// keeping the aspect ratio.
    pub fn decode(file: &SelectedFile, max_side: u32) -> Result<Self, UploadError> {
        let image = image::load_from_memory(&file.bytes)?;

        let (width, height) = image.dimensions();
        let image = if width > max_side || height > max_side {
            image.thumbnail(max_side, max_side)
        } else {
            image
        };

        let rgba = image.to_rgba8();

        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: Arc::new(rgba.into_raw()),
        })
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preview({}x{})", self.width, self.height)
    }
}

/// A file together with its decoded preview. They are only ever set
/// together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub file: SelectedFile,
    pub preview: Preview,
}
