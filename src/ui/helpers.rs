// src/ui/helpers.rs
use std::collections::BTreeSet;

use egui::{Color32, CornerRadius, Pos2, Rect, Sense, Stroke, StrokeKind, TextEdit, Ui, Vec2};
use egui_code_editor::Syntax;

use crate::animation::{Pose, keyframe_names};
use crate::config::BLANK_PLACEHOLDER;

pub const BALL_RADIUS: f32 = 20.0;
const STAGE_HEIGHT: f32 = 200.0;
const STAGE_LEFT_PAD: f32 = 60.0;

/// Resaltado para los bloques de CSS del editor.
pub fn css_syntax() -> Syntax {
    Syntax::new("css")
        .with_comment("//")
        .with_comment_multiline(["/*", "*/"])
        .with_keywords([
            "transform", "transition", "animation", "opacity", "translate", "translateX",
            "translateY", "rotate", "scale", "@keyframes", "from", "to", "infinite", "alternate",
            "ease", "ease-in", "ease-out", "ease-in-out", "linear", "cubic-bezier",
        ])
        .with_types(keyframe_names().collect::<BTreeSet<_>>())
}

pub fn big_list_button(ui: &mut Ui, label: String, width: f32, height: f32, enabled: bool) -> egui::Response {
    ui.add_enabled(enabled, egui::Button::new(label).min_size(Vec2::new(width, height)))
}

/// Color de borde de un hueco según su último resultado.
pub fn blank_stroke(ui: &Ui, state: Option<bool>) -> Stroke {
    match state {
        Some(true) => Stroke::new(2.0, Color32::from_rgb(46, 160, 67)),
        Some(false) => Stroke::new(2.0, Color32::from_rgb(218, 54, 51)),
        None => ui.visuals().widgets.inactive.bg_stroke,
    }
}

/// Caja de texto de un hueco. Devuelve la respuesta para poder pedir foco.
pub fn blank_input(ui: &mut Ui, text: &mut String, state: Option<bool>, enabled: bool) -> egui::Response {
    let stroke = blank_stroke(ui, state);
    egui::Frame::default()
        .stroke(stroke)
        .corner_radius(CornerRadius::same(3))
        .show(ui, |ui| {
            ui.add_enabled(
                enabled,
                TextEdit::singleline(text)
                    .code_editor()
                    .hint_text(BLANK_PLACEHOLDER)
                    .desired_width(220.0),
            )
        })
        .inner
}

/// Escenario con la bola dibujada en `pose`.
pub fn paint_ball(ui: &mut Ui, width: f32, pose: Pose) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, STAGE_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();

    painter.rect_filled(rect, CornerRadius::same(6), visuals.extreme_bg_color);
    painter.rect_stroke(
        rect,
        CornerRadius::same(6),
        visuals.widgets.noninteractive.bg_stroke,
        StrokeKind::Inside,
    );

    let origin = ball_rect(rect, Pose::IDENTITY).center();
    let ball = ball_rect(rect, pose);
    let center = ball.center();
    let radius = ball.width() / 2.0;
    let alpha = pose.opacity.clamp(0.0, 1.0);

    // Sitio de reposo
    painter.circle_stroke(origin, BALL_RADIUS, Stroke::new(1.0, Color32::GRAY.gamma_multiply(0.4)));

    painter.circle_filled(center, radius, Color32::from_rgb(255, 107, 107).gamma_multiply(alpha));

    // Marca de giro
    let (sin, cos) = pose.rotation.to_radians().sin_cos();
    let tip = center + Vec2::new(cos, sin) * radius * 0.8;
    painter.line_segment([center, tip], Stroke::new(2.0, Color32::WHITE.gamma_multiply(alpha)));
}

/// Rectángulo ocupado por la bola en `pose`, relativo al escenario.
pub fn ball_rect(stage: Rect, pose: Pose) -> Rect {
    let origin = Pos2::new(stage.left() + STAGE_LEFT_PAD, stage.center().y);
    let center = origin + Vec2::new(pose.dx, pose.dy);
    Rect::from_center_size(center, Vec2::splat(2.0 * BALL_RADIUS * pose.scale.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ball_rect_follows_pose() {
        let stage = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, STAGE_HEIGHT));
        let rest = ball_rect(stage, Pose::IDENTITY);
        assert_eq!(rest.center(), Pos2::new(STAGE_LEFT_PAD, STAGE_HEIGHT / 2.0));

        let moved = ball_rect(stage, Pose::new(200.0, 0.0, 0.0, 2.0, 1.0));
        assert_eq!(moved.center().x, STAGE_LEFT_PAD + 200.0);
        assert_eq!(moved.width(), 4.0 * BALL_RADIUS);
    }
}
