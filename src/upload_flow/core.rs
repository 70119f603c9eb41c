use crate::error::UploadError;
use crate::image_file::interface::SelectedFile;
use crate::image_file::preview::Selection;
use crate::prediction_client::interface::PredictionResult;
use std::path::PathBuf;

//
// Model
//

/// What the screen is showing. States that show a preview carry the
/// selection it came from, and `Loading` can never hold a result or error.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    PreviewShown {
        selection: Selection,
    },
    Loading {
        selection: Selection,
        request_id: u64,
    },
    ResultShown {
        selection: Selection,
        result: PredictionResult,
    },
    ErrorShown {
        selection: Option<Selection>,
        error: UploadError,
    },
}

impl UiState {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            UiState::Idle => None,
            UiState::PreviewShown { selection }
            | UiState::Loading { selection, .. }
            | UiState::ResultShown { selection, .. } => Some(selection),
            UiState::ErrorShown { selection, .. } => selection.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Model {
    pub ui: UiState,
    /// Id of the file read in flight. Completions for any other id are
    /// stale and dropped.
    pub pending_read: Option<u64>,
    last_id: u64,
}

impl Model {
    /// Nothing in flight: no read and no request.
    pub fn is_settled(&self) -> bool {
        self.pending_read.is_none() && !matches!(self.ui, UiState::Loading { .. })
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

//
// Messages and effects
//

#[derive(Debug)]
pub enum Msg {
    /// The picker closed. `None` when the user cancelled.
    FilePicked(Option<PathBuf>),
    FileReadDone {
        read_id: u64,
        result: Result<Selection, UploadError>,
    },
    SubmitPressed,
    PredictDone {
        request_id: u64,
        result: Result<PredictionResult, UploadError>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ReadFile { read_id: u64, path: PathBuf },
    Predict { request_id: u64, file: SelectedFile },
}

//
// Transition
//

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::FilePicked(None) => (model, vec![]),

        Msg::FilePicked(Some(path)) => {
            // A new pick replaces whatever is on screen, including a request
            // in flight; its response will no longer match.
            let mut model = model;
            let read_id = model.next_id();
            model.ui = UiState::Idle;
            model.pending_read = Some(read_id);
            (model, vec![Effect::ReadFile { read_id, path }])
        }

        Msg::FileReadDone { read_id, result } => {
            if model.pending_read != Some(read_id) {
                return (model, vec![]);
            }

            let mut model = model;
            model.pending_read = None;
            model.ui = match result {
                Ok(selection) => UiState::PreviewShown { selection },
                Err(error) => UiState::ErrorShown {
                    selection: None,
                    error,
                },
            };
            (model, vec![])
        }

        Msg::SubmitPressed => transition_submit(model),

        Msg::PredictDone { request_id, result } => match model.ui {
            UiState::Loading {
                selection,
                request_id: current,
            } if current == request_id => {
                let ui = match result {
                    Ok(result) => UiState::ResultShown { selection, result },
                    Err(error) => UiState::ErrorShown {
                        selection: Some(selection),
                        error,
                    },
                };
                (Model { ui, ..model }, vec![])
            }
            ui => (Model { ui, ..model }, vec![]),
        },
    }
}

fn transition_submit(model: Model) -> (Model, Vec<Effect>) {
    // Submit is disabled until the picked file is read and while a request
    // is in flight.
    if model.pending_read.is_some() || matches!(model.ui, UiState::Loading { .. }) {
        return (model, vec![]);
    }

    let mut model = model;
    let selection = model.ui.selection().cloned();

    match selection {
        Some(selection) => {
            let request_id = model.next_id();
            let file = selection.file.clone();
            model.ui = UiState::Loading {
                selection,
                request_id,
            };
            (model, vec![Effect::Predict { request_id, file }])
        }
        None => {
            model.ui = UiState::ErrorShown {
                selection: None,
                error: UploadError::Validation,
            };
            (model, vec![])
        }
    }
}
