use egui::{Context, RichText, ScrollArea, SidePanel};

use crate::ArcadeApp;
use crate::ui::helpers::big_list_button;
use crate::view_models::{LevelInfo, level_infos};

pub fn ui_level_list(app: &mut ArcadeApp, ctx: &Context) {
    let infos: Vec<LevelInfo> = match app.session.as_ref() {
        Some(s) => level_infos(s.levels(), s.tracker(), s.current_index()),
        None => return,
    };
    let busy = app.is_busy();

    SidePanel::left("level_list")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Levels");
            ui.add_space(8.0);
            let width = ui.available_width();

            ScrollArea::vertical().show(ui, |ui| {
                for info in &infos {
                    let mut label = info.label();
                    if info.current {
                        label = format!("▶ {label}");
                    }
                    let resp = big_list_button(ui, label, width, 32.0, info.unlocked && !busy)
                        .on_hover_text(RichText::new(&info.title));
                    if resp.clicked() {
                        app.ir_a_nivel(info.idx);
                    }
                    ui.add_space(4.0);
                }
            });
        });
}
