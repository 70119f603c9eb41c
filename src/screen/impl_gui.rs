use crate::config::Config;
use crate::image_file::preview::Preview;
use crate::screen::interface::Screen;
use crate::upload_flow::core::Msg;
use crate::upload_flow::render::View;
use eframe::egui;
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

struct UploadWindow {
    view: Arc<Mutex<View>>,
    msg_sender: Sender<Msg>,
    extensions: Vec<String>,
    // Pixels the texture was built from, to skip re-uploading the same preview.
    texture: Option<(Arc<Vec<u8>>, egui::TextureHandle)>,
}

impl UploadWindow {
    fn send(&self, msg: Msg) {
        let _ = self.msg_sender.send(msg);
    }

    fn texture_for(
        &mut self,
        ctx: &egui::Context,
        preview: Option<&Preview>,
    ) -> Option<egui::TextureHandle> {
        let Some(preview) = preview else {
            self.texture = None;
            return None;
        };

        if let Some((pixels, texture)) = &self.texture {
            if Arc::ptr_eq(pixels, &preview.rgba) {
                return Some(texture.clone());
            }
        }

        let image = egui::ColorImage::from_rgba_unmultiplied(
            [preview.width as usize, preview.height as usize],
            &preview.rgba,
        );
        let texture = ctx.load_texture("preview", image, egui::TextureOptions::default());
        self.texture = Some((preview.rgba.clone(), texture.clone()));
        Some(texture)
    }

    fn draw_preview(&self, ui: &mut egui::Ui, texture: &egui::TextureHandle, overlay: Option<&str>) {
        let image = egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
            .max_width(ui.available_width())
            .max_height(360.0)
            .maintain_aspect_ratio(true);
        let response = ui.add(image);

        if let Some(overlay) = overlay {
            let painter = ui.painter_at(response.rect);
            let background = painter.add(egui::Shape::Noop);
            let text_rect = painter.text(
                response.rect.left_bottom() + egui::vec2(10.0, -10.0),
                egui::Align2::LEFT_BOTTOM,
                overlay,
                egui::FontId::proportional(18.0),
                egui::Color32::WHITE,
            );
            painter.set(
                background,
                egui::Shape::rect_filled(
                    text_rect.expand(5.0),
                    4.0,
                    egui::Color32::from_black_alpha(170),
                ),
            );
        }
    }
}

impl eframe::App for UploadWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self
            .view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|file| file.path.clone()));
        if dropped.is_some() {
            self.send(Msg::FilePicked(dropped));
        }

        let texture = self.texture_for(ctx, view.preview.as_ref());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Image prediction");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Choose image…").clicked() {
                    let picked = rfd::FileDialog::new()
                        .add_filter("images", self.extensions.as_slice())
                        .set_title("Select Image")
                        .pick_file();
                    self.send(Msg::FilePicked(picked));
                }

                if ui
                    .add_enabled(view.submit_enabled, egui::Button::new("Predict"))
                    .clicked()
                {
                    self.send(Msg::SubmitPressed);
                }

                if view.loading || view.reading {
                    ui.spinner();
                }
            });

            if let Some(name) = &view.file_name {
                ui.label(egui::RichText::new(name.as_str()).weak());
            }

            ui.add_space(8.0);

            if let Some(texture) = &texture {
                self.draw_preview(ui, texture, view.overlay.as_deref());
            }

            if let Some(percent) = view.bar_percent {
                ui.add_space(8.0);
                ui.add(egui::ProgressBar::new(percent / 100.0).text(format!("{:.1}%", percent)));
            }

            if let Some(result) = &view.result {
                ui.add_space(8.0);
                egui::Grid::new("result").num_columns(2).show(ui, |ui| {
                    ui.label("Filename");
                    ui.label(result.filename.as_str());
                    ui.end_row();

                    ui.label("Prediction");
                    ui.strong(result.prediction.as_str());
                    ui.end_row();

                    ui.label("Confidence");
                    ui.label(result.confidence.as_str());
                    ui.end_row();
                });
            }

            if let Some(error) = &view.error {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::from_rgb(210, 60, 60), error.as_str());
            }
        });
    }
}

/// An egui window. `show` only swaps the view and asks for a repaint, so it
/// is safe to call from the flow's thread.
pub struct ScreenGui {
    view: Arc<Mutex<View>>,
    ctx: Arc<Mutex<Option<egui::Context>>>,
}

impl ScreenGui {
    pub fn new() -> Self {
        Self {
            view: Arc::new(Mutex::new(View::default())),
            ctx: Arc::new(Mutex::new(None)),
        }
    }

    /// Opens the window on the calling thread and blocks until it closes.
    pub fn run(
        &self,
        config: &Config,
        msg_sender: Sender<Msg>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(config.window_size)
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let window = UploadWindow {
            view: self.view.clone(),
            msg_sender,
            extensions: config.accepted_extensions.clone(),
            texture: None,
        };

        let ctx_slot = self.ctx.clone();

        eframe::run_native(
            "Image prediction",
            options,
            Box::new(move |cc| {
                *ctx_slot.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(cc.egui_ctx.clone());
                Box::new(window)
            }),
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }
}

impl Screen for ScreenGui {
    fn show(&self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = view.clone();

        if let Some(ctx) = self
            .ctx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            ctx.request_repaint();
        }

        Ok(())
    }
}
