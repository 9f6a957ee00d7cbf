use egui::{Context, RichText};

use crate::ArcadeApp;
use crate::ui::layout::{centered_panel, two_button_row};

pub fn ui_completed(app: &mut ArcadeApp, ctx: &Context) {
    centered_panel(ctx, 160.0, 420.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("🎉 You've completed all levels!").size(24.0));
            ui.add_space(8.0);
            ui.label("Pick any level on the left to play it again.");
            ui.add_space(16.0);

            let width = ui.available_width();
            let (replay, reset) = two_button_row(ui, width, ("Play level 1", true), ("🔄 Reset progress", true));
            if replay {
                app.ir_a_nivel(0);
            }
            if reset {
                app.confirm_reset = true;
            }
        });
    });
}
