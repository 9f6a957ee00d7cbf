use std::collections::BTreeMap;
use std::time::Duration;

use egui::{Align, Button, CentralPanel, Context, Key, Layout, RichText, ScrollArea};

use crate::ArcadeApp;
use crate::animation::{BallStyle, find_keyframes};
use crate::description::format_description;
use crate::model::CodeLine;
use crate::session::Direction;
use crate::ui::helpers::{blank_input, css_syntax, paint_ball};
use crate::ui::layout::code_editor_solution;

pub fn ui_game(app: &mut ArcadeApp, ctx: &Context, now: f64) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Some(level) = session.current_level().cloned() else {
        return;
    };
    let number = session.current_index() + 1;
    let total = session.level_count();
    let states: BTreeMap<usize, Option<bool>> = level
        .blanks
        .iter()
        .map(|b| (b.line_index, session.blank_state(b.line_index)))
        .collect();
    let busy = app.is_busy();

    // Ctrl/Cmd + Enter envía
    let submit_shortcut = ctx.input(|i| i.modifiers.command && i.key_pressed(Key::Enter));

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 650.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(24, 16))
                .show(ui, |ui| {
                    ui.set_max_width(panel_width);

                    // ----------- CABECERA -----------
                    ui.horizontal(|ui| {
                        let prev = ui.add_enabled(
                            !busy && app.can_navigate(Direction::Previous),
                            Button::new("◀"),
                        );
                        ui.label(format!("Level {number} / {total}"));
                        let next = ui.add_enabled(
                            !busy && app.can_navigate(Direction::Next),
                            Button::new("▶"),
                        );
                        if prev.clicked() {
                            app.navegar(Direction::Previous);
                        }
                        if next.clicked() {
                            app.navegar(Direction::Next);
                        }
                    });
                    ui.heading(&level.title);
                    ui.add_space(6.0);

                    // ----------- ENUNCIADO -----------
                    let parts = format_description(&level);
                    if let Some(highlight) = &parts.highlight {
                        ui.label(RichText::new(highlight).strong().size(16.0));
                    }
                    if !parts.body.is_empty() {
                        ui.label(&parts.body);
                    }
                    if let Some(question) = &parts.question {
                        ui.label(RichText::new(question).italics());
                    }

                    if let Some(keyword) = &level.keyword {
                        ui.horizontal(|ui| {
                            ui.label("💡 Topic:");
                            let chip = ui.label(RichText::new(keyword).code());
                            if let Some(topic) = &level.topic_description {
                                chip.on_hover_text(topic);
                            }
                        });
                    }
                    ui.add_space(8.0);

                    // @keyframes del nivel, si la bola se anima
                    let keyframes = BallStyle::from_css(&level.expected_declaration)
                        .animation_name()
                        .and_then(find_keyframes);
                    if let Some(frames) = keyframes {
                        ui.label(RichText::new(format!("@keyframes {}", frames.name)).monospace())
                            .on_hover_text(RichText::new(frames.to_css()).monospace());
                    }

                    // ----------- CÓDIGO CON HUECOS -----------
                    let mut first_blank = true;
                    for line in level.code_lines() {
                        match line {
                            CodeLine::Text(text) => {
                                ui.label(RichText::new(text).monospace());
                            }
                            CodeLine::Blank {
                                before,
                                after,
                                line_index,
                            } => {
                                let state = states.get(&line_index).copied().flatten();
                                ui.horizontal(|ui| {
                                    ui.spacing_mut().item_spacing.x = 2.0;
                                    ui.label(RichText::new(before).monospace());
                                    let text = app.view.inputs.entry(line_index).or_default();
                                    let resp = blank_input(ui, text, state, !busy);
                                    if resp.changed() {
                                        app.message.clear();
                                    }
                                    if first_blank && app.view.focus_first_input {
                                        resp.request_focus();
                                        app.view.focus_first_input = false;
                                    }
                                    ui.label(RichText::new(after).monospace());
                                });
                                first_blank = false;
                            }
                        }
                    }
                    ui.add_space(8.0);

                    // ----------- BOTONES -----------
                    ui.horizontal(|ui| {
                        let label = if app.view.success { "Success!" } else { "Submit" };
                        let submit = ui
                            .add_enabled(!busy, Button::new(label).min_size(egui::vec2(120.0, 32.0)))
                            .on_hover_text("Ctrl/Cmd + Enter");
                        if submit.clicked() || (submit_shortcut && !busy) {
                            app.comprobar(Duration::from_secs_f64(now));
                        }

                        if !app.view.solution_revealed
                            && ui.button("💡 Show solution").clicked()
                        {
                            app.pedir_solucion();
                        }
                    });

                    if !app.message.is_empty() {
                        ui.label(&app.message);
                    }

                    if app.view.solution_revealed {
                        ui.add_space(6.0);
                        if !level.solution.is_empty() {
                            ui.label(RichText::new(&level.solution).monospace());
                        }
                        code_editor_solution(
                            ui,
                            panel_width,
                            level.code.len().max(1),
                            14.0,
                            css_syntax(),
                            &level.solved_code(),
                            240.0,
                        );
                    }

                    // ----------- SALIDA -----------
                    ui.add_space(12.0);
                    ui.with_layout(Layout::top_down(Align::Min), |ui| {
                        ui.label(RichText::new("Output").strong());
                        app.view.ball_started.get_or_insert(now);
                        let pose = app.view.ball.sample(app.view.ball_elapsed(now));
                        paint_ball(ui, panel_width, pose);
                    });
                });
        });
    });
}
