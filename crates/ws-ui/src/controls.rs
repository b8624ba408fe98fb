//! Per-scene filter controls
//!
//! Discrete inputs (dropdowns, toggles) emit their action immediately; the
//! year slider is debounced so dragging does not rebind the scene on every
//! intermediate value.

use std::time::Duration;

use egui::{ComboBox, Slider, Ui};

use ws_core::{Action, Debouncer, EducationMetric, SceneFilters, SceneId};
use ws_data::{DatasetStore, IncomeTier};
use ws_views::SceneSpec;

const YEAR_DEBOUNCE: Duration = Duration::from_millis(150);

/// Filter controls for one scene; the sticky values live in `StoryState`,
/// this widget only holds the in-flight slider position and its debounce.
pub struct ControlPanel {
    scene: SceneId,
    /// Uncommitted slider position while the user is dragging
    pending_year: Option<u16>,
    debouncer: Debouncer<u16>,
}

impl ControlPanel {
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            pending_year: None,
            debouncer: Debouncer::new(YEAR_DEBOUNCE),
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        store: &DatasetStore,
        spec: &SceneSpec,
        filters: &SceneFilters,
    ) -> Vec<Action> {
        let mut actions = Vec::new();

        ui.horizontal(|ui| {
            self.year_slider(ui, store, filters);
            ui.separator();
            self.region_combo(ui, store, filters, &mut actions);
            if spec.show_metric_toggle {
                ui.separator();
                self.metric_toggle(ui, filters, &mut actions);
            }
            if spec.show_income_filter {
                ui.separator();
                self.income_combo(ui, filters, &mut actions);
            }
        });

        // Commit the slider once it has been quiet long enough
        if let Some(year) = self.debouncer.poll() {
            actions.push(Action::SetYear(self.scene, year));
            self.pending_year = None;
        }
        if self.debouncer.is_pending() {
            ui.ctx().request_repaint();
        }

        actions
    }

    fn year_slider(&mut self, ui: &mut Ui, store: &DatasetStore, filters: &SceneFilters) {
        let (Some(min_year), Some(max_year)) = (store.min_year(), store.max_year()) else {
            return;
        };
        let committed = filters.year.unwrap_or(max_year);
        let mut year = i64::from(self.pending_year.unwrap_or(committed));

        ui.label("Year");
        let response = ui.add(Slider::new(&mut year, i64::from(min_year)..=i64::from(max_year)));
        if response.changed() {
            let year = year as u16;
            self.pending_year = Some(year);
            self.debouncer.submit(year);
        }
    }

    fn region_combo(
        &self,
        ui: &mut Ui,
        store: &DatasetStore,
        filters: &SceneFilters,
        actions: &mut Vec<Action>,
    ) {
        let mut selected = filters.region.clone();
        ComboBox::from_id_source(("region", self.scene.index()))
            .selected_text(selected.as_deref().unwrap_or("All regions"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, None, "All regions");
                for region in store.regions() {
                    ui.selectable_value(&mut selected, Some(region.clone()), region.as_str());
                }
            });
        if selected != filters.region {
            actions.push(Action::SetRegion(self.scene, selected));
        }
    }

    fn metric_toggle(&self, ui: &mut Ui, filters: &SceneFilters, actions: &mut Vec<Action>) {
        let mut metric = filters.metric;
        for option in [EducationMetric::Literacy, EducationMetric::SecondaryEnrollment] {
            ui.selectable_value(&mut metric, option, option.label());
        }
        if metric != filters.metric {
            actions.push(Action::SetMetric(self.scene, metric));
        }
    }

    fn income_combo(&self, ui: &mut Ui, filters: &SceneFilters, actions: &mut Vec<Action>) {
        let mut selected = filters.income;
        ComboBox::from_id_source(("income", self.scene.index()))
            .selected_text(selected.map(IncomeTier::label).unwrap_or("All income groups"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, None, "All income groups");
                for tier in IncomeTier::ALL {
                    ui.selectable_value(&mut selected, Some(tier), tier.label());
                }
            });
        if selected != filters.income {
            actions.push(Action::SetIncome(self.scene, selected));
        }
    }
}
