//! Core state management for the story viewer
//!
//! This crate provides the scene state machine, the reducer-style
//! controller state, and the keyed-diff / animation primitives shared
//! by the scene views.

pub mod anim;
pub mod diff;
pub mod scene;
pub mod state;

// Re-export commonly used types
pub use anim::{Debouncer, Ease, MarkAnim, MarkVisual};
pub use diff::KeyedDiff;
pub use scene::SceneId;
pub use state::{Action, EducationMetric, SceneFilters, StoryState};
