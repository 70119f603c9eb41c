use crate::config::Config;
use crate::image_file::preview::Preview;
use crate::screen::interface::Screen;
use crate::upload_flow::core::{Model, UiState};
use std::sync::Arc;

/// Everything a screen needs to draw, flattened out of the model. Fields
/// that are `None` are hidden.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct View {
    pub preview: Option<Preview>,
    pub file_name: Option<String>,
    /// Text drawn over the preview, e.g. `cat (87.3%)`.
    pub overlay: Option<String>,
    /// Width of the confidence bar, 0 to 100.
    pub bar_percent: Option<f32>,
    pub loading: bool,
    pub reading: bool,
    pub submit_enabled: bool,
    pub result: Option<ResultView>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub filename: String,
    pub prediction: String,
    pub confidence: String,
}

pub fn format_percent(confidence: f64, precision: usize) -> String {
    format!("{:.*}%", precision, confidence * 100.0)
}

pub fn view(config: &Config, model: &Model) -> View {
    let selection = model.ui.selection();

    let mut view = View {
        preview: selection.map(|s| s.preview.clone()),
        file_name: selection.map(|s| s.file.name.clone()),
        loading: matches!(model.ui, UiState::Loading { .. }),
        reading: model.pending_read.is_some(),
        submit_enabled: model.pending_read.is_none()
            && !matches!(model.ui, UiState::Loading { .. }),
        ..View::default()
    };

    match &model.ui {
        UiState::ResultShown { result, .. } => {
            // Overlay, bar and text all show the same clamped value.
            let confidence = result.confidence.clamp(0.0, 1.0);
            view.overlay = Some(format!(
                "{} ({})",
                result.prediction,
                format_percent(confidence, config.overlay_precision)
            ));
            view.bar_percent = Some((confidence * 100.0) as f32);
            view.result = Some(ResultView {
                filename: result.filename.clone(),
                prediction: result.prediction.clone(),
                confidence: format_percent(confidence, config.confidence_precision),
            });
        }
        UiState::ErrorShown { error, .. } => {
            view.error = Some(error.user_message());
        }
        UiState::Idle | UiState::PreviewShown { .. } | UiState::Loading { .. } => {}
    }

    view
}

#[derive(Clone)]
pub struct Render {
    screen: Arc<dyn Screen + Send + Sync>,
    config: Config,
}

impl Render {
    pub fn new(screen: Arc<dyn Screen + Send + Sync>, config: Config) -> Self {
        Self { screen, config }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.screen.show(&view(&self.config, model))
    }
}
