mod helpers;
pub mod layout;
pub mod views;

use std::time::Duration;

use crate::app::ArcadeApp;
use crate::config::{PROGRESS_KEY, THEME_KEY};
use crate::model::{AppState, Theme};
use eframe::{App, Frame, set_value};
use egui::{Context, Visuals};
use layout::{bottom_panel, top_panel};

impl App for ArcadeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        ctx.set_visuals(match self.theme {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        });

        // Reloj de egui: segundos desde que arrancó la app
        let now = ctx.input(|i| i.time);
        self.tick(Duration::from_secs_f64(now));

        top_panel(self, ctx);
        bottom_panel(self, ctx);

        // Dispatch por estado
        match self.state {
            AppState::Playing => {
                views::levels::ui_level_list(self, ctx);
                views::game::ui_game(self, ctx, now);
            }
            AppState::Completed => {
                views::levels::ui_level_list(self, ctx);
                views::completed::ui_completed(self, ctx);
            }
            AppState::LoadError => views::load_error::ui_load_error(self, ctx),
        }

        if self.confirm_reset {
            self.confirm_reset(ctx);
        }
        if self.view.confirm_solution {
            self.confirm_solution(ctx);
        }

        // Sigue pintando mientras la bola se mueve o hay un avance pendiente
        if self.view.ball.is_animating(self.view.ball_elapsed(now)) {
            ctx.request_repaint();
        } else if let Some(pending) = self.session.as_ref().and_then(|s| s.pending_advance()) {
            let left = pending.due.saturating_sub(Duration::from_secs_f64(now));
            ctx.request_repaint_after(left);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(payload) = self.progress_payload() {
            storage.set_string(PROGRESS_KEY, payload);
        }
        set_value(storage, THEME_KEY, &self.theme);
    }
}
