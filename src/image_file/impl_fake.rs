use crate::error::UploadError;
use crate::image_file::interface::{FileReader, SelectedFile};
use image::{ImageFormat, Rgba, RgbaImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory files keyed by path.
#[derive(Default)]
pub struct FileReaderFake {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    reads: AtomicUsize,
}

impl FileReaderFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), bytes);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl FileReader for FileReaderFake {
    fn read(&self, path: &Path) -> Result<SelectedFile, UploadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let bytes = files
            .get(path)
            .cloned()
            .ok_or_else(|| UploadError::Read(format!("{}: not found", path.display())))?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(SelectedFile::new(name, bytes))
    }
}

/// A small PNG with a gradient so different sizes decode to different pixels.
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 16) as u8, (y * 16) as u8, 128, 255])
    });

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}
