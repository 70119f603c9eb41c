use crate::config::Config;
use crate::image_file::interface::FileReader;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::PredictionClient;
use crate::screen::interface::Screen;
use crate::upload_flow::core::{init, transition, Effect, Model, Msg};
use crate::upload_flow::render::Render;
use crate::upload_flow::run_effect::RunEffect;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

/// Owns the model and is the only place it changes. Effects run on their
/// own threads and come back as messages.
#[derive(Clone)]
pub struct UploadFlow {
    model: Arc<Mutex<Model>>,
    msg_sender: Sender<Msg>,
    msg_receiver: Arc<Mutex<Receiver<Msg>>>,
    logger: Arc<dyn Logger + Send + Sync>,
    render: Render,
    run_effect: RunEffect,
}

impl UploadFlow {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        file_reader: Arc<dyn FileReader + Send + Sync>,
        prediction_client: Arc<dyn PredictionClient + Send + Sync>,
        screen: Arc<dyn Screen + Send + Sync>,
    ) -> Self {
        let logger = logger.with_namespace("upload_flow");
        let (msg_sender, msg_receiver) = channel();
        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            file_reader,
            prediction_client,
            msg_sender.clone(),
        );

        Self {
            model: Arc::new(Mutex::new(Model::default())),
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
            logger,
            render: Render::new(screen, config),
            run_effect,
        }
    }

    /// Where the screen sends user actions.
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_sender.clone()
    }

    pub fn dispatch(&self, msg: Msg) {
        let _ = self.msg_sender.send(msg);
    }

    pub fn model(&self) -> Model {
        self.model
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resets to the initial model and draws it.
    pub fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (model, effects) = init();
        self.render.render(&model)?;
        *self.model.lock().unwrap_or_else(PoisonError::into_inner) = model;
        self.spawn_effects(effects);
        Ok(())
    }

    /// Blocks for the next message and applies it.
    pub fn step(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let msg = self
            .msg_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv()?;

        let current = self.model();

        let _ = self.logger.info(&format!(
            "\nold model:\n\t{:?}\n\nmsg:\n\t{:?}",
            current, msg,
        ));

        let (new_model, effects) = transition(current, msg);

        let _ = self.logger.info(&format!(
            "\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
            new_model, effects
        ));

        self.render.render(&new_model)?;
        *self.model.lock().unwrap_or_else(PoisonError::into_inner) = new_model;

        self.spawn_effects(effects);

        Ok(())
    }

    /// Steps until `done` holds for the model, and returns that model.
    pub fn run_until(
        &self,
        done: impl Fn(&Model) -> bool,
    ) -> Result<Model, Box<dyn std::error::Error + Send + Sync>> {
        loop {
            let model = self.model();
            if done(&model) {
                return Ok(model);
            }
            self.step()?;
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.start()?;
        loop {
            self.step()?;
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }
}
