//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use tracing::{info, warn};

use ws_core::{Action, SceneId, StoryState};
use ws_data::DatasetStore;
use ws_ui::{apply_theme, ControlPanel, NavigationBar};
use ws_views::{scene_spec, SceneContext, SceneView};

/// Default dataset resource, relative to the working directory
const DEFAULT_DATASET: &str = "data/worldbank_hiv.csv";

/// Main application state
struct WorldStoryApp {
    /// Shared context for all scene views
    context: SceneContext,

    /// Controller state: scene pointer + per-scene sticky filters
    state: StoryState,

    /// One view and one control panel per scene; inactive scenes keep
    /// their rendering state so switching back feels continuous
    views: [SceneView; 3],
    controls: [ControlPanel; 3],
}

impl WorldStoryApp {
    fn new(cc: &eframe::CreationContext<'_>, store: Arc<DatasetStore>) -> Self {
        apply_theme(&cc.egui_ctx);

        let state = StoryState::new(store.max_year());
        Self {
            context: SceneContext { store },
            state,
            views: [
                SceneView::new(SceneId::Wealth),
                SceneView::new(SceneId::Education),
                SceneView::new(SceneId::Prevention),
            ],
            controls: [
                ControlPanel::new(SceneId::Wealth),
                ControlPanel::new(SceneId::Education),
                ControlPanel::new(SceneId::Prevention),
            ],
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.state = self.state.clone().reduce(action);
    }
}

impl eframe::App for WorldStoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions: Vec<Action> = Vec::new();

        // Keyboard shortcuts
        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowLeft) {
                actions.push(Action::Previous);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                actions.push(Action::Next);
            }
            if i.key_pressed(egui::Key::Num1) {
                actions.push(Action::JumpTo(0));
            }
            if i.key_pressed(egui::Key::Num2) {
                actions.push(Action::JumpTo(1));
            }
            if i.key_pressed(egui::Key::Num3) {
                actions.push(Action::JumpTo(2));
            }
        });

        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            if let Some(action) = NavigationBar::ui(ui, &self.state) {
                actions.push(action);
            }
        });

        let scene = self.state.scene;
        let filters = self.state.filters(scene).clone();
        let spec = scene_spec(scene, filters.metric);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            let panel = &mut self.controls[scene.index()];
            actions.extend(panel.ui(ui, &self.context.store, &spec, &filters));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(egui::RichText::new(spec.subtitle).weak().italics());
            self.views[scene.index()].ui(ui, &self.context, &filters);
        });

        for action in actions {
            self.dispatch(action);
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

    // The dataset loads exactly once, before the UI loop starts
    let runtime = tokio::runtime::Runtime::new()?;
    let store = match runtime.block_on(DatasetStore::load(path.clone())) {
        Ok(store) => {
            info!(path = %path.display(), rows = store.len(), "Dataset loaded");
            store
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "Dataset load failed, using embedded sample (degraded coverage)"
            );
            DatasetStore::fallback()
        }
    };
    let store = Arc::new(store);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "World Story",
        options,
        Box::new(move |cc| Box::new(WorldStoryApp::new(cc, store))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
