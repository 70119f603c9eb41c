use config::Config;
use image_file::impl_fs::FileReaderFs;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use prediction_client::impl_fake::{FakeBehavior, PredictionClientFake};
use prediction_client::impl_http::PredictionClientHttp;
use prediction_client::interface::PredictionClient;
use screen::impl_console::ScreenConsole;
use screen::impl_gui::ScreenGui;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use upload_flow::core::{Msg, UiState};
use upload_flow::main::UploadFlow;

mod config;
mod error;
mod image_file;
mod library;
mod prediction_client;
mod screen;
mod upload_flow;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let file_reader = Arc::new(FileReaderFs::new(logger.clone()));

    let prediction_client: Arc<dyn PredictionClient + Send + Sync> = if config.fake_predictions {
        logger.info("Using fake predictions")?;
        Arc::new(
            PredictionClientFake::new(logger.clone(), FakeBehavior::Random)
                .with_delay(Duration::from_millis(600)),
        )
    } else {
        logger.info(&format!("Predicting with {}", config.predict_url))?;
        Arc::new(PredictionClientHttp::new(&config, logger.clone())?)
    };

    match std::env::args_os().nth(1) {
        Some(path) => run_console(config, logger, file_reader, prediction_client, path.into()),
        None => run_gui(config, logger, file_reader, prediction_client),
    }
}

/// Opens the window. The flow runs on a background thread; the window owns
/// the main thread.
fn run_gui(
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    file_reader: Arc<FileReaderFs>,
    prediction_client: Arc<dyn PredictionClient + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let screen = Arc::new(ScreenGui::new());

    let upload_flow = UploadFlow::new(
        config.clone(),
        logger.clone(),
        file_reader,
        prediction_client,
        screen.clone(),
    );

    let msg_sender = upload_flow.sender();

    std::thread::spawn(move || {
        if let Err(e) = upload_flow.run() {
            let _ = logger.error(&format!("Upload flow stopped: {}", e));
        }
    });

    screen.run(&config, msg_sender)
}

/// Selects `path`, submits it once and prints the outcome.
fn run_console(
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    file_reader: Arc<FileReaderFs>,
    prediction_client: Arc<dyn PredictionClient + Send + Sync>,
    path: PathBuf,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let upload_flow = UploadFlow::new(
        config,
        logger,
        file_reader,
        prediction_client,
        Arc::new(ScreenConsole::new()),
    );

    upload_flow.start()?;

    upload_flow.dispatch(Msg::FilePicked(Some(path)));
    upload_flow.step()?;
    let model = upload_flow.run_until(|model| model.is_settled())?;

    let model = match model.ui {
        UiState::PreviewShown { .. } => {
            upload_flow.dispatch(Msg::SubmitPressed);
            upload_flow.step()?;
            upload_flow.run_until(|model| model.is_settled())?
        }
        _ => model,
    };

    match model.ui {
        UiState::ErrorShown { error, .. } => Err(error.into()),
        _ => Ok(()),
    }
}
