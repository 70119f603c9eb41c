use crate::error::UploadError;
use crate::image_file::interface::SelectedFile;
use serde::Deserialize;

/// Body of a successful `/predict` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub filename: String,
    pub prediction: String,
    /// Probability in `[0, 1]` of the top label.
    pub confidence: f64,
}

pub trait PredictionClient {
    fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, UploadError>;
}
