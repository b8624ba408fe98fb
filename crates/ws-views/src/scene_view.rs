//! Scene view: applies a [`SceneFrame`] to egui_plot with animated marks

use ahash::{AHashMap, AHashSet};
use egui::{Align2, Color32, RichText, Ui};
use egui_plot::{HLine, Line, LineStyle, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text, VLine};

use ws_core::{KeyedDiff, MarkAnim, MarkVisual, SceneFilters, SceneId};
use ws_data::FilterCriteria;

use crate::frame::{build_frame, Mark, SceneFrame};
use crate::scales::{format_compact, tier_color};
use crate::scenes::scene_spec;
use crate::SceneContext;

/// Normalized pick radius for hover
const HOVER_RADIUS: f64 = 0.04;
const GRID_COLOR: Color32 = Color32::from_gray(45);
const AXIS_TEXT_COLOR: Color32 = Color32::from_gray(140);

/// One scene's rendering state: the current frame plus the mark registry
/// driving entrance/update/exit animation.
pub struct SceneView {
    scene: SceneId,
    frame: Option<SceneFrame>,
    /// In-flight animation per mark key; exiting marks stay here until
    /// their shrink-out settles
    anims: AHashMap<String, MarkAnim>,
    /// Target marks of the current frame, for tooltips and hover
    targets: AHashMap<String, Mark>,
    last_signature: Option<Signature>,
}

type Signature = (FilterCriteria, ws_core::EducationMetric);

impl SceneView {
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            frame: None,
            anims: AHashMap::new(),
            targets: AHashMap::new(),
            last_signature: None,
        }
    }

    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn ui(&mut self, ui: &mut Ui, ctx: &SceneContext, filters: &SceneFilters) {
        let now = ui.input(|i| i.time);
        let signature: Signature = (filters.criteria(), filters.metric);
        if self.last_signature.as_ref() != Some(&signature) {
            self.rebind(ctx, &signature, now);
            self.last_signature = Some(signature);
        }

        if self.frame.is_some() {
            self.draw_plot(ui, now);
        } else {
            // Placeholder instead of a broken chart
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("No data for current filters").heading());
                    ui.label(RichText::new("Try a different year or region").weak());
                });
            });
        }
    }

    /// Recompute filtered data + frame and retarget the mark registry
    fn rebind(&mut self, ctx: &SceneContext, signature: &Signature, now: f64) {
        let spec = scene_spec(self.scene, signature.1);
        let filtered = ws_data::apply(ctx.store.observations(), &signature.0);
        let frame = build_frame(&filtered, &spec);
        tracing::debug!(
            scene = ?self.scene,
            filtered = filtered.len(),
            marks = frame.as_ref().map(|f| f.marks.len()).unwrap_or(0),
            "Rebinding scene"
        );

        let Some(frame) = frame else {
            self.frame = None;
            self.anims.clear();
            self.targets.clear();
            return;
        };

        let previous: AHashSet<String> = self
            .anims
            .iter()
            .filter(|(_, anim)| !anim.is_exiting())
            .map(|(key, _)| key.clone())
            .collect();
        let keys: Vec<String> = frame.marks.iter().map(|m| m.key.clone()).collect();
        let diff = KeyedDiff::compute(&previous, keys.iter());

        self.targets = frame
            .marks
            .iter()
            .map(|m| (m.key.clone(), m.clone()))
            .collect();

        for (index, key) in diff.added.iter().enumerate() {
            let target = mark_visual(&self.targets[key]);
            self.anims
                .insert(key.clone(), MarkAnim::appear(target, now, index));
        }
        for key in &diff.retained {
            let target = mark_visual(&self.targets[key]);
            if let Some(anim) = self.anims.get_mut(key) {
                anim.retarget(target, now);
            }
        }
        for key in &diff.removed {
            if let Some(anim) = self.anims.get_mut(key) {
                anim.depart(now);
            }
        }

        self.frame = Some(frame);
    }

    fn draw_plot(&mut self, ui: &mut Ui, now: f64) {
        let frame = match &self.frame {
            Some(frame) => frame,
            None => return,
        };

        // Exiting marks leave the registry once their shrink-out settles
        self.anims
            .retain(|_, anim| !(anim.is_exiting() && anim.is_settled(now)));
        let animating = self.anims.values().any(|anim| !anim.is_settled(now));

        let plot = Plot::new(format!("scene_{}", self.scene.index()))
            .show_axes(egui::Vec2b::new(false, false))
            .show_grid(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .show_x(false)
            .show_y(false);

        let anims = &self.anims;
        let targets = &self.targets;

        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([-0.10, -0.10], [1.06, 1.10]));

            // Gridlines + tick labels in domain values
            for (pos, value) in &frame.x_ticks {
                plot_ui.line(
                    Line::new(PlotPoints::new(vec![[*pos, 0.0], [*pos, 1.0]]))
                        .color(GRID_COLOR)
                        .width(0.5),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(*pos, -0.03), format_compact(*value))
                        .color(AXIS_TEXT_COLOR)
                        .anchor(Align2::CENTER_TOP),
                );
            }
            for (pos, value) in &frame.y_ticks {
                plot_ui.line(
                    Line::new(PlotPoints::new(vec![[0.0, *pos], [1.0, *pos]]))
                        .color(GRID_COLOR)
                        .width(0.5),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(-0.02, *pos), format_compact(*value))
                        .color(AXIS_TEXT_COLOR)
                        .anchor(Align2::RIGHT_CENTER),
                );
            }

            // Axis titles
            plot_ui.text(
                Text::new(PlotPoint::new(0.5, -0.08), frame.x_label)
                    .color(AXIS_TEXT_COLOR)
                    .anchor(Align2::CENTER_CENTER),
            );
            plot_ui.text(
                Text::new(PlotPoint::new(-0.08, 0.5), frame.y_label)
                    .color(AXIS_TEXT_COLOR)
                    .anchor(Align2::CENTER_CENTER),
            );

            if let Some(trend) = &frame.trend {
                plot_ui.line(
                    Line::new(PlotPoints::new(trend.clone()))
                        .color(Color32::from_gray(180))
                        .width(1.5)
                        .style(LineStyle::dashed_loose()),
                );
            }

            // Marks, sampled from their in-flight animations
            for (key, anim) in anims {
                let visual = anim.sample(now);
                if visual.radius <= 0.0 || visual.opacity <= 0.0 {
                    continue;
                }
                let mut points = Points::new(vec![[visual.x, visual.y]])
                    .color(fade(visual.color, visual.opacity))
                    .radius(visual.radius)
                    .filled(true);
                if let Some(mark) = targets.get(key) {
                    points = points.name(&mark.info.country);
                }
                plot_ui.points(points);
            }

            for annotation in &frame.annotations {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(annotation.x, (annotation.y + 0.06).min(1.08)),
                        RichText::new(annotation.text).italics(),
                    )
                    .color(Color32::from_gray(220))
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }

            // Hover: tooltip + crosshair against both axes
            if let Some(pointer) = plot_ui.pointer_coordinate() {
                let hovered = targets.values().min_by(|a, b| {
                    dist2(a, &pointer).total_cmp(&dist2(b, &pointer))
                });
                if let Some(mark) = hovered {
                    if dist2(mark, &pointer).sqrt() < HOVER_RADIUS {
                        draw_crosshair(plot_ui, mark);
                        show_tooltip(plot_ui.ctx(), mark);
                    }
                }
            }
        });

        self.draw_legend(ui);

        if animating {
            ui.ctx().request_repaint();
        }
    }

    fn draw_legend(&self, ui: &mut Ui) {
        let Some(frame) = &self.frame else { return };
        ui.horizontal(|ui| {
            ui.label(RichText::new("Income group:").weak());
            for tier in &frame.tiers {
                ui.label(RichText::new("●").color(tier_color(*tier)));
                ui.label(tier.label());
                ui.add_space(8.0);
            }
        });
    }
}

fn mark_visual(mark: &Mark) -> MarkVisual {
    MarkVisual {
        x: mark.x,
        y: mark.y,
        radius: mark.radius,
        opacity: 1.0,
        color: mark.color,
    }
}

fn fade(color: Color32, opacity: f32) -> Color32 {
    let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn dist2(mark: &Mark, pointer: &PlotPoint) -> f64 {
    let dx = mark.x - pointer.x;
    let dy = mark.y - pointer.y;
    dx * dx + dy * dy
}

fn draw_crosshair(plot_ui: &mut egui_plot::PlotUi, mark: &Mark) {
    let color = Color32::from_gray(160);
    plot_ui.hline(HLine::new(mark.y).color(color).width(0.8));
    plot_ui.vline(VLine::new(mark.x).color(color).width(0.8));
    plot_ui.text(
        Text::new(PlotPoint::new(mark.x, -0.06), format_compact(mark.info.x_value))
            .color(Color32::WHITE)
            .anchor(Align2::CENTER_TOP),
    );
    plot_ui.text(
        Text::new(PlotPoint::new(-0.05, mark.y), format_compact(mark.info.y_value))
            .color(Color32::WHITE)
            .anchor(Align2::RIGHT_CENTER),
    );
}

fn show_tooltip(ctx: &egui::Context, mark: &Mark) {
    egui::show_tooltip_at_pointer(ctx, egui::Id::new("scene_mark_tooltip"), |ui| {
        ui.strong(format!("{} ({})", mark.info.country, mark.info.year));
        ui.label(mark.info.tier.label());
        ui.label(format!("x: {}", format_compact(mark.info.x_value)));
        ui.label(format!("y: {}", format_compact(mark.info.y_value)));
        if let Some(pop) = mark.info.population {
            ui.label(format!("Population: {}", format_compact(pop)));
        }
        if let Some(life) = mark.info.life_exp {
            ui.label(format!("Life expectancy: {:.1} yrs", life));
        }
    });
}
