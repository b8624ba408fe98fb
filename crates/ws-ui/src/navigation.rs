//! Scene navigation bar: previous/next plus one indicator per scene

use egui::{Button, Color32, RichText, Ui, Vec2};

use ws_core::{Action, SceneId, StoryState};

const ACTIVE_DOT: Color32 = Color32::from_rgb(100, 150, 250);
const INACTIVE_DOT: Color32 = Color32::from_gray(90);

/// Navigation bar widget; returns the action the user triggered, if any
pub struct NavigationBar;

impl NavigationBar {
    pub fn ui(ui: &mut Ui, state: &StoryState) -> Option<Action> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.style_mut().spacing.button_padding = Vec2::new(8.0, 4.0);

            let prev = ui.add_enabled(
                !state.scene.is_first(),
                Button::new(RichText::new("◀ Previous").size(14.0)),
            );
            if prev.on_hover_text("Previous scene (Left Arrow)").clicked() {
                action = Some(Action::Previous);
            }

            // One clickable indicator per scene, the active one highlighted
            for scene in SceneId::ALL {
                let active = scene == state.scene;
                let color = if active { ACTIVE_DOT } else { INACTIVE_DOT };
                let dot = ui.add(
                    Button::new(RichText::new("●").size(16.0).color(color)).frame(false),
                );
                if dot.on_hover_text(scene.title()).clicked() {
                    action = Some(Action::JumpTo(scene.index()));
                }
            }

            let next = ui.add_enabled(
                !state.scene.is_last(),
                Button::new(RichText::new("Next ▶").size(14.0)),
            );
            if next.on_hover_text("Next scene (Right Arrow)").clicked() {
                action = Some(Action::Next);
            }

            ui.separator();
            ui.heading(state.scene.title());
        });

        action
    }
}
