use crate::screen::interface::Screen;
use crate::upload_flow::render::View;
use std::error::Error;
use std::sync::{Mutex, PoisonError};

/// Records every view it is asked to show.
#[derive(Default)]
pub struct ScreenFake {
    views: Mutex<Vec<View>>,
}

impl ScreenFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> Vec<View> {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<View> {
        self.views().pop()
    }
}

impl Screen for ScreenFake {
    fn show(&self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
        Ok(())
    }
}
