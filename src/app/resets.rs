use super::*;

impl ArcadeApp {
    /// Borra todo el progreso y vuelve al primer nivel.
    pub fn reset_progress(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset_progress(&mut self.view);
            log::info!("Progress reset");
        }
        self.confirm_reset = false;
        self.message.clear();
        if self.state != AppState::LoadError {
            self.state = AppState::Playing;
        }
    }

    pub fn confirm_reset(&mut self, ctx: &egui::Context) {
        egui::Window::new("Reset progress")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Do you really want to erase all your progress? This cannot be undone!");
                ui.horizontal(|ui| {
                    if ui.button("Yes, erase").clicked() {
                        self.reset_progress();
                    }
                    if ui.button("No").clicked() {
                        self.confirm_reset = false;
                    }
                });
            });
    }

    pub fn confirm_solution(&mut self, ctx: &egui::Context) {
        egui::Window::new("Show solution")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Do you really want to check the solution?");
                ui.horizontal(|ui| {
                    if ui.button("Show it").clicked() {
                        self.revelar_solucion();
                    }
                    if ui.button("Keep trying").clicked() {
                        self.view.confirm_solution = false;
                    }
                });
            });
    }
}
