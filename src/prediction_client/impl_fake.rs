use crate::error::UploadError;
use crate::image_file::interface::SelectedFile;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::{PredictionClient, PredictionResult};
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub enum FakeBehavior {
    /// Random label and confidence, for running without a server.
    Random,
    #[allow(dead_code)]
    Respond(Result<PredictionResult, UploadError>),
}

pub struct PredictionClientFake {
    behavior: FakeBehavior,
    delay: Duration,
    calls: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            logger: logger.with_namespace("prediction_client").with_namespace("fake"),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_prediction(
        &self,
        file: &SelectedFile,
    ) -> Result<PredictionResult, Box<dyn std::error::Error + Send + Sync>> {
        let labels = ["Normal", "Tumor"];

        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, labels.len())?;

        let confidence_dist = Uniform::new(0.5, 1.0)?;

        Ok(PredictionResult {
            filename: file.name.clone(),
            prediction: labels[index_dist.sample(&mut rng)].to_string(),
            confidence: confidence_dist.sample(&mut rng),
        })
    }
}

impl PredictionClient for PredictionClientFake {
    fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!("Predicting {}...", file.name));

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match &self.behavior {
            FakeBehavior::Random => self
                .random_prediction(file)
                .map_err(|e| UploadError::Transport(e.to_string())),
            FakeBehavior::Respond(response) => response.clone(),
        }
    }
}
