use crate::error::UploadError;
use crate::image_file::interface::{FileReader, SelectedFile};
use crate::library::logger::interface::Logger;
use std::path::Path;
use std::sync::Arc;

pub struct FileReaderFs {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FileReaderFs {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("file_reader").with_namespace("fs"),
        }
    }
}

impl FileReader for FileReaderFs {
    fn read(&self, path: &Path) -> Result<SelectedFile, UploadError> {
        let _ = self.logger.info(&format!("Reading {}", path.display()));

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| UploadError::Read(format!("{} is not a file", path.display())))?;

        let bytes = std::fs::read(path)?;

        let _ = self
            .logger
            .info(&format!("Read {} ({} bytes)", name, bytes.len()));

        Ok(SelectedFile::new(name, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use std::io::Write;
    use tempfile::TempDir;

    fn reader() -> FileReaderFs {
        FileReaderFs::new(Arc::new(LoggerConsole::new(*chrono::Local::now().offset())))
    }

    #[test]
    fn reads_name_and_bytes() {
        let mut temp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        temp.write_all(&[1u8, 2, 3]).unwrap();
        temp.flush().unwrap();

        let file = reader().read(temp.path()).unwrap();

        assert_eq!(file.name, temp.path().file_name().unwrap().to_string_lossy());
        assert_eq!(file.mime, "image/png");
        assert_eq!(*file.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.png");
        assert!(matches!(reader().read(&path), Err(UploadError::Read(_))));
    }
}
