use crate::upload_flow::render::View;
use std::error::Error;

/// The page the upload flow draws on. Implementations only show what they
/// are given; they never decide visibility themselves.
pub trait Screen: Send + Sync {
    fn show(&self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;
}
