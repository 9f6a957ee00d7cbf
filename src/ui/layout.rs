use egui::{Button, CentralPanel, Context, Frame, ScrollArea, Ui};
use egui_code_editor::{CodeEditor, ColorTheme, Syntax};

use crate::app::ArcadeApp;
use crate::model::{AppState, Theme};

pub fn top_panel(app: &mut ArcadeApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            ui.heading("🎯 Animation Arcade");
            ui.add_space(16.0);
            if app.state != AppState::LoadError && ui.button("🔄 Reset progress").clicked() {
                app.confirm_reset = true;
            }
        });
    });
}

pub fn bottom_panel(app: &mut ArcadeApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTONES DE TEMA -----------
        ui.with_layout(
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                if ui.button("🌙 Dark mode").clicked() {
                    app.theme = Theme::Dark;
                }
                if ui.button("☀ Light mode").clicked() {
                    app.theme = Theme::Light;
                }
            }
        );
    });
}

/// Panel centrado tanto vertical como horizontalmente,
/// con un tamaño de contenido máximo y un bloque interior `inner`.
pub fn centered_panel(
    ctx: &Context,
    est_height: f32,
    max_width: f32,
    inner: impl FnOnce(&mut Ui),
) {
    CentralPanel::default().show(ctx, |ui| {
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra);
        ui.vertical_centered(|ui| {
            Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_width(w);
                    inner(ui);
                });
        });
        ui.add_space(extra);
    });
}

/// Editor de sólo lectura (solución) con ancho fijo
pub fn code_editor_solution(
    ui: &mut Ui,
    width: f32,
    rows: usize,
    fontsize: f32,
    syntax: Syntax,
    code: &str,
    max_height: f32,
) {
    let mut buf = code.to_owned();
    ScrollArea::vertical()
        .id_salt("solution_scroll")
        .max_height(max_height)
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.set_width(width);
            CodeEditor::default()
                .id_source("solution")
                .with_rows(rows)
                .with_fontsize(fontsize)
                .with_theme(ColorTheme::GITHUB_DARK)
                .with_syntax(syntax)
                .with_numlines(true)
                .vscroll(false)
                .show(ui, &mut buf);
        });
}

/// Dibuja dos botones del mismo tamaño en una fila.
/// Devuelve (clic izquierdo, clic derecho).
pub fn two_button_row(
    ui: &mut Ui,
    panel_width: f32,
    (left_label, left_enabled): (&str, bool),
    (right_label, right_enabled): (&str, bool),
) -> (bool, bool) {
    let btn_w = ((panel_width - 8.0) / 2.0).max(60.0);
    let mut clicked_left = false;
    let mut clicked_right = false;
    ui.horizontal(|ui| {
        clicked_left = ui
            .add_enabled(left_enabled, Button::new(left_label).min_size(egui::vec2(btn_w, 32.0)))
            .clicked();
        clicked_right = ui
            .add_enabled(right_enabled, Button::new(right_label).min_size(egui::vec2(btn_w, 32.0)))
            .clicked();
    });
    (clicked_left, clicked_right)
}
