use crate::config::Config;
use crate::error::UploadError;
use crate::image_file::interface::SelectedFile;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::{PredictionClient, PredictionResult};
use reqwest::blocking::{multipart, Client};
use std::sync::Arc;

/// Posts the file as multipart field `file` to the configured endpoint.
pub struct PredictionClientHttp {
    client: Client,
    url: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientHttp {
    pub fn new(config: &Config, logger: Arc<dyn Logger + Send + Sync>) -> Result<Self, UploadError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            url: config.predict_url.clone(),
            logger: logger.with_namespace("prediction_client").with_namespace("http"),
        })
    }
}

impl PredictionClient for PredictionClientHttp {
    fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, UploadError> {
        let _ = self.logger.info(&format!(
            "POST {} file={} ({}, {} bytes)",
            self.url,
            file.name,
            file.mime,
            file.bytes.len()
        ));

        let part = multipart::Part::bytes(file.bytes.as_ref().clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(&self.url).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;

        let _ = self.logger.info(&format!("{} ({} bytes)", status, body.len()));

        if !status.is_success() {
            return Err(UploadError::Server {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Error text from a failed response body. The prediction server answers
/// with `{"error": "..."}`; frameworks in front of it may use `detail`.
/// Anything else is taken as plain text.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        for key in ["error", "detail"] {
            if let Some(serde_json::Value::String(message)) = fields.get(key) {
                return Some(message.clone());
            }
        }
    }

    Some(body.to_string())
}
