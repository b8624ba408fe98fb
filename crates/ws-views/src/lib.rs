//! Scene rendering for the story viewer

pub mod annotations;
pub mod frame;
pub mod regression;
pub mod scales;
pub mod scene_view;
pub mod scenes;

pub use annotations::NarrativeAnchor;
pub use frame::{build_frame, Annotation, Mark, MarkInfo, SceneFrame};
pub use regression::{clip_to_band, ols_fit, sample_line, LinearFit};
pub use scales::{format_compact, tier_color, PositionScale, RadiusScale, ScaleKind};
pub use scene_view::SceneView;
pub use scenes::{scene_spec, AxisSpec, Field, SceneSpec};

use std::sync::Arc;

use ws_data::DatasetStore;

/// Context passed to scene views during rendering
#[derive(Clone)]
pub struct SceneContext {
    /// The dataset, loaded once at startup and read-only afterwards
    pub store: Arc<DatasetStore>,
}
