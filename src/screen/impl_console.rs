use crate::screen::interface::Screen;
use crate::upload_flow::render::View;
use std::error::Error;
use std::sync::{Mutex, PoisonError};

/// Prints the view as a text panel. Identical consecutive views are printed
/// once.
#[derive(Default)]
pub struct ScreenConsole {
    last: Mutex<Option<View>>,
}

impl ScreenConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn panel_lines(view: &View) -> Vec<String> {
    let mut lines = Vec::new();

    match (&view.file_name, &view.preview) {
        (Some(name), Some(preview)) => {
            lines.push(format!("image:      {} ({}x{})", name, preview.width, preview.height))
        }
        _ if view.reading => lines.push("image:      reading...".to_string()),
        _ => lines.push("image:      none selected".to_string()),
    }

    if let Some(overlay) = &view.overlay {
        lines.push(format!("overlay:    {}", overlay));
    }

    if let Some(percent) = view.bar_percent {
        let filled = ((percent / 100.0) * 20.0).round().clamp(0.0, 20.0) as usize;
        lines.push(format!("confidence: [{}{}]", "#".repeat(filled), "-".repeat(20 - filled)));
    }

    if view.loading {
        lines.push("predicting...".to_string());
    }

    if let Some(result) = &view.result {
        lines.push(format!("filename:   {}", result.filename));
        lines.push(format!("prediction: {}", result.prediction));
        lines.push(format!("confidence: {}", result.confidence));
    }

    if let Some(error) = &view.error {
        lines.push(error.clone());
    }

    lines
}

impl Screen for ScreenConsole {
    fn show(&self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if last.as_ref() == Some(view) {
            return Ok(());
        }

        let lines = panel_lines(view);
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        println!("┌{}┐", "─".repeat(width + 2));
        for line in &lines {
            println!("│ {:<width$} │", line, width = width);
        }
        println!("└{}┘", "─".repeat(width + 2));

        *last = Some(view.clone());
        Ok(())
    }
}
