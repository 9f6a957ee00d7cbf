use egui::{Color32, Context, RichText};

use crate::ArcadeApp;
use crate::ui::layout::centered_panel;

pub fn ui_load_error(app: &ArcadeApp, ctx: &Context) {
    centered_panel(ctx, 140.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Error Loading Game").color(Color32::from_rgb(218, 54, 51)));
            ui.add_space(8.0);
            ui.label("The level data could not be loaded. Please refresh the page or restart the game.");
            if let Some(err) = &app.load_error {
                ui.add_space(8.0);
                ui.label(RichText::new(err).monospace().small());
            }
        });
    });
}
