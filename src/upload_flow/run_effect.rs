use crate::config::Config;
use crate::error::UploadError;
use crate::image_file::interface::{extension_of, FileReader};
use crate::image_file::preview::{Preview, Selection};
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::{PredictionClient, PredictionResult};
use crate::upload_flow::core::{Effect, Msg};
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    file_reader: Arc<dyn FileReader + Send + Sync>,
    prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    msg_sender: Sender<Msg>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        file_reader: Arc<dyn FileReader + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
        msg_sender: Sender<Msg>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            file_reader,
            prediction_client,
            msg_sender,
        }
    }

    /// Runs one effect to completion on the calling thread and reports the
    /// outcome as a message.
    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::ReadFile { read_id, path } => {
                let result = self.read_selection(&path);
                if let Err(error) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Reading {} failed: {}", path.display(), error));
                }
                let _ = self.msg_sender.send(Msg::FileReadDone { read_id, result });
            }
            Effect::Predict { request_id, file } => {
                let reply = PredictReply::new(self.msg_sender.clone(), request_id);
                let result = self.prediction_client.predict(&file);
                if let Err(error) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Prediction for {} failed: {}", file.name, error));
                }
                reply.send(result);
            }
        }
    }

    fn read_selection(&self, path: &Path) -> Result<Selection, UploadError> {
        let accepted = extension_of(path)
            .map(|extension| self.config.accepts_extension(extension))
            .unwrap_or(false);

        if !accepted {
            return Err(UploadError::UnsupportedFile {
                name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            });
        }

        let file = self.file_reader.read(path)?;
        let preview = Preview::decode(&file, self.config.preview_max_side)?;

        Ok(Selection { file, preview })
    }
}

/// Guarantees a `PredictDone` for its request. If the prediction path
/// unwinds before `send`, the drop reports a transport error so the screen
/// leaves `Loading`.
struct PredictReply {
    msg_sender: Sender<Msg>,
    request_id: u64,
    sent: bool,
}

impl PredictReply {
    fn new(msg_sender: Sender<Msg>, request_id: u64) -> Self {
        Self {
            msg_sender,
            request_id,
            sent: false,
        }
    }

    fn send(mut self, result: Result<PredictionResult, UploadError>) {
        self.sent = true;
        let _ = self.msg_sender.send(Msg::PredictDone {
            request_id: self.request_id,
            result,
        });
    }
}

impl Drop for PredictReply {
    fn drop(&mut self) {
        if !self.sent {
            let _ = self.msg_sender.send(Msg::PredictDone {
                request_id: self.request_id,
                result: Err(UploadError::Transport(
                    "prediction request aborted".to_string(),
                )),
            });
        }
    }
}
