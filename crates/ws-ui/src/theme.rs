//! Chart-first dark chrome, keyed to the story's income-tier palette
//!
//! The marks carry the color story; the chrome stays muted blue-gray so
//! the tier hues are the brightest thing on screen. Interactive accents
//! reuse the high-income tier color, keeping one visual vocabulary
//! between controls and marks.

use egui::{Color32, Context, Rounding, Stroke, Style, Visuals};
use ws_data::IncomeTier;
use ws_views::tier_color;

/// Accent for hover/active/selection states
pub fn accent_color() -> Color32 {
    tier_color(IncomeTier::High)
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context) {
    let mut style = Style::default();
    let mut visuals = Visuals::dark();

    let accent = accent_color();
    // Cool blue-gray ramp; the plot background sits darkest so marks pop
    let plot_bg = Color32::from_rgb(16, 18, 24);
    let panel_bg = Color32::from_rgb(26, 29, 37);
    let widget_bg = Color32::from_rgb(36, 40, 50);
    let outline = Color32::from_rgb(52, 57, 70);
    let text_color = Color32::from_rgb(212, 216, 224);

    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = plot_bg;
    visuals.faint_bg_color = widget_bg;

    visuals.widgets.noninteractive.bg_fill = widget_bg;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, outline);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.noninteractive.rounding = Rounding::same(3.0);

    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, outline);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.inactive.rounding = Rounding::same(3.0);

    visuals.widgets.hovered.bg_fill = outline;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, Color32::WHITE);
    visuals.widgets.hovered.rounding = Rounding::same(3.0);

    visuals.widgets.active.bg_fill = outline;
    visuals.widgets.active.bg_stroke = Stroke::new(1.5, accent);
    visuals.widgets.active.fg_stroke = Stroke::new(1.5, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(3.0);

    visuals.selection.bg_fill = accent.linear_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    style.visuals = visuals;
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_matches_tier_palette() {
        let ctx = Context::default();
        apply_theme(&ctx);
        let visuals = ctx.style().visuals.clone();
        assert!(visuals.dark_mode);
        assert_eq!(visuals.selection.stroke.color, tier_color(IncomeTier::High));
        assert_eq!(visuals.widgets.hovered.bg_stroke.color, accent_color());
    }

    #[test]
    fn test_plot_background_is_darkest_surface() {
        let ctx = Context::default();
        apply_theme(&ctx);
        let visuals = ctx.style().visuals.clone();
        let luma = |c: Color32| c.r() as u16 + c.g() as u16 + c.b() as u16;
        assert!(luma(visuals.extreme_bg_color) < luma(visuals.panel_fill));
        assert!(luma(visuals.panel_fill) < luma(visuals.faint_bg_color));
    }
}
