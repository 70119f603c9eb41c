use super::fixture::{cat_result, server_error, Fixture};
use crate::error::UploadError;
use crate::image_file::impl_fake::sample_png;
use crate::image_file::interface::SelectedFile;
use crate::prediction_client::impl_fake::FakeBehavior;
use crate::prediction_client::interface::{PredictionClient, PredictionResult};
use crate::upload_flow::core::UiState;
use std::sync::Arc;

struct PredictionClientPanics;

impl PredictionClient for PredictionClientPanics {
    fn predict(&self, _file: &SelectedFile) -> Result<PredictionResult, UploadError> {
        panic!("backend went away mid-request");
    }
}

#[test]
fn test_selecting_valid_image_shows_preview() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));
    f.file_reader.insert("cat.png", sample_png(32, 16));

    let model = f.select("cat.png");

    assert!(matches!(model.ui, UiState::PreviewShown { .. }));
    for view in f.screen.views() {
        assert!(!view.loading);
        assert!(view.error.is_none());
    }
    let last = f.screen.last().unwrap();
    let preview = last.preview.unwrap();
    assert_eq!((preview.width, preview.height), (32, 16));
    assert!(last.submit_enabled);
    assert_eq!(f.prediction_client.calls(), 0);
}

#[test]
fn test_submit_without_file_never_calls_server() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));

    let model = f.submit();

    assert!(matches!(
        model.ui,
        UiState::ErrorShown {
            error: UploadError::Validation,
            ..
        }
    ));
    assert_eq!(f.prediction_client.calls(), 0);
    assert_eq!(
        f.screen.last().unwrap().error.as_deref(),
        Some("Please select an image first.")
    );
    assert!(f.screen.views().iter().all(|view| !view.loading));
}

#[test]
fn test_successful_prediction_renders_result() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));
    f.file_reader.insert("cat.png", sample_png(8, 8));

    f.select("cat.png");
    let model = f.submit();

    assert!(matches!(model.ui, UiState::ResultShown { .. }));
    assert_eq!(f.prediction_client.calls(), 1);

    let views = f.screen.views();
    assert!(views.iter().any(|view| view.loading && !view.submit_enabled));

    let last = views.last().unwrap();
    assert!(!last.loading);
    assert_eq!(last.overlay.as_deref(), Some("cat (87.3%)"));
    let result = last.result.clone().unwrap();
    assert_eq!(result.filename, "cat.png");
    assert_eq!(result.prediction, "cat");
    assert_eq!(result.confidence, "87.30%");
}

#[test]
fn test_server_error_renders_server_text() {
    let f = Fixture::new(FakeBehavior::Respond(Err(server_error("model unavailable"))));
    f.file_reader.insert("cat.png", sample_png(8, 8));

    f.select("cat.png");
    let model = f.submit();

    assert!(matches!(model.ui, UiState::ErrorShown { .. }));
    let last = f.screen.last().unwrap();
    assert_eq!(last.error.as_deref(), Some("Error: model unavailable"));
    assert!(!last.loading);
    assert!(last.preview.is_some());
}

#[test]
fn test_network_failure_clears_loading() {
    let f = Fixture::new(FakeBehavior::Respond(Err(UploadError::Transport(
        "connection refused".to_string(),
    ))));
    f.file_reader.insert("cat.png", sample_png(8, 8));

    f.select("cat.png");
    f.submit();

    let views = f.screen.views();
    let last = views.last().unwrap();
    assert!(!last.loading);
    assert_eq!(last.error.as_deref(), Some("Error: connection refused"));
    assert!(views.iter().any(|view| view.loading));
}

#[test]
fn test_aborted_request_still_settles() {
    let f = Fixture::with_client(Arc::new(PredictionClientPanics));
    f.file_reader.insert("cat.png", sample_png(8, 8));

    f.select("cat.png");
    let model = f.submit();

    assert_eq!(
        model.ui.clone(),
        UiState::ErrorShown {
            selection: model.ui.selection().cloned(),
            error: UploadError::Transport("prediction request aborted".to_string()),
        }
    );
    assert!(!f.screen.last().unwrap().loading);
}

#[test]
fn test_unsupported_extension_is_rejected_before_reading() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));
    f.file_reader.insert("notes.txt", b"hello".to_vec());

    let model = f.select("notes.txt");

    assert_eq!(
        model.ui,
        UiState::ErrorShown {
            selection: None,
            error: UploadError::UnsupportedFile {
                name: "notes.txt".to_string(),
            },
        }
    );
    assert_eq!(f.file_reader.reads(), 0);
    assert_eq!(
        f.screen.last().unwrap().error.as_deref(),
        Some("Error: Unsupported file type: notes.txt")
    );
}

#[test]
fn test_undecodable_image_shows_error() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));
    f.file_reader.insert("broken.png", b"definitely not a png".to_vec());

    let model = f.select("broken.png");

    assert!(matches!(
        model.ui,
        UiState::ErrorShown {
            selection: None,
            error: UploadError::Decode(_),
        }
    ));
    assert_eq!(f.file_reader.reads(), 1);
}

#[test]
fn test_missing_file_shows_error() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));

    let model = f.select("gone.png");

    assert!(matches!(
        model.ui,
        UiState::ErrorShown {
            error: UploadError::Read(_),
            ..
        }
    ));
}

#[test]
fn test_reselect_after_result_shows_fresh_preview() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));
    f.file_reader.insert("cat.png", sample_png(8, 8));
    f.file_reader.insert("dog.png", sample_png(12, 6));

    f.select("cat.png");
    f.submit();
    let model = f.select("dog.png");

    assert!(matches!(model.ui, UiState::PreviewShown { .. }));
    let last = f.screen.last().unwrap();
    assert_eq!(last.file_name.as_deref(), Some("dog.png"));
    assert!(last.result.is_none());
    assert!(last.overlay.is_none());
    assert!(last.error.is_none());
}

#[test]
fn test_selecting_same_file_twice_renders_same_view() {
    let f = Fixture::new(FakeBehavior::Respond(Ok(cat_result())));
    f.file_reader.insert("cat.png", sample_png(8, 8));

    f.select("cat.png");
    let first = f.screen.last().unwrap();
    f.select("cat.png");
    let second = f.screen.last().unwrap();

    assert_eq!(first, second);
}
