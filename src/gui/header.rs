//! Header Widget
//! Two logos framing the dashboard title and subtitle.

use crate::config::HeaderConfig;
use egui::{Color32, RichText, TextureHandle, TextureOptions};
use std::path::Path;

const LOGO_HEIGHT: f32 = 56.0;
const TITLE_COLOR: Color32 = Color32::from_rgb(0, 0, 128); // Navy
const SUBTITLE_COLOR: Color32 = Color32::from_rgb(0, 112, 192);

/// A logo image, or a text badge when no image is available.
enum Logo {
    Image(TextureHandle),
    Badge(&'static str),
}

pub struct Header {
    title: String,
    subtitle: String,
    left: Logo,
    right: Logo,
}

impl Header {
    pub fn new(ctx: &egui::Context, config: &HeaderConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            left: Self::load_logo(ctx, "left_logo", config.left_logo.as_deref(), "STAT"),
            right: Self::load_logo(ctx, "right_logo", config.right_logo.as_deref(), "ECON"),
        }
    }

    fn load_logo(
        ctx: &egui::Context,
        name: &str,
        path: Option<&Path>,
        badge: &'static str,
    ) -> Logo {
        let Some(path) = path else {
            return Logo::Badge(badge);
        };

        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                Logo::Image(ctx.load_texture(name, color_image, TextureOptions::LINEAR))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "logo not loaded");
                Logo::Badge(badge)
            }
        }
    }

    fn show_logo(ui: &mut egui::Ui, logo: &Logo) {
        match logo {
            Logo::Image(texture) => {
                let [w, h] = texture.size();
                let scale = LOGO_HEIGHT / h.max(1) as f32;
                ui.image((texture.id(), egui::vec2(w as f32 * scale, LOGO_HEIGHT)));
            }
            Logo::Badge(text) => {
                egui::Frame::none()
                    .fill(TITLE_COLOR)
                    .rounding(6.0)
                    .inner_margin(egui::Margin::symmetric(12.0, 14.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(*text).size(18.0).strong().color(Color32::WHITE));
                    });
            }
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.columns(3, |cols| {
            cols[0].vertical_centered(|ui| Self::show_logo(ui, &self.left));
            cols[1].vertical_centered(|ui| {
                ui.label(
                    RichText::new(&self.title)
                        .size(28.0)
                        .strong()
                        .color(TITLE_COLOR),
                );
                ui.label(
                    RichText::new(&self.subtitle)
                        .size(16.0)
                        .italics()
                        .color(SUBTITLE_COLOR),
                );
            });
            cols[2].vertical_centered(|ui| Self::show_logo(ui, &self.right));
        });
        ui.add_space(4.0);
    }
}
