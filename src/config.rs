use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub predict_url: String,
    /// `None` leaves the request unbounded; a stalled server keeps the
    /// screen loading until the transport gives up.
    pub request_timeout: Option<Duration>,
    pub fake_predictions: bool,
    pub accepted_extensions: Vec<String>,
    pub preview_max_side: u32,
    pub overlay_precision: usize,
    pub confidence_precision: usize,
    pub window_size: [f32; 2],
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predict_url: "http://127.0.0.1:8000/predict".to_string(),
            request_timeout: None,
            fake_predictions: false,
            accepted_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
            preview_max_side: 512,
            overlay_precision: 1,
            confidence_precision: 2,
            window_size: [560.0, 720.0],
            logger_timezone: local_offset(),
        }
    }
}

impl Config {
    /// Defaults overridden by `PREDICT_URL`, `PREDICT_TIMEOUT_SECS` and
    /// `PREDICT_FAKE`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PREDICT_URL") {
            if !url.trim().is_empty() {
                config.predict_url = url.trim().to_string();
            }
        }

        if let Some(secs) = std::env::var("PREDICT_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(value) = std::env::var("PREDICT_FAKE") {
            config.fake_predictions = matches!(value.trim(), "1" | "true" | "yes");
        }

        config
    }

    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    }
}

fn local_offset() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
