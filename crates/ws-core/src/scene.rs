//! The three-scene state machine

/// One of the three fixed narrative steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Wealth,
    Education,
    Prevention,
}

impl SceneId {
    pub const ALL: [SceneId; 3] = [SceneId::Wealth, SceneId::Education, SceneId::Prevention];

    pub fn index(self) -> usize {
        match self {
            SceneId::Wealth => 0,
            SceneId::Education => 1,
            SceneId::Prevention => 2,
        }
    }

    /// Direct jump target; out-of-range indices are rejected
    pub fn from_index(index: usize) -> Option<SceneId> {
        Self::ALL.get(index).copied()
    }

    /// Step forward, clamped at the last scene (no wraparound)
    pub fn next(self) -> SceneId {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Step backward, clamped at the first scene
    pub fn previous(self) -> SceneId {
        match self.index().checked_sub(1) {
            Some(idx) => Self::from_index(idx).unwrap_or(self),
            None => self,
        }
    }

    pub fn is_first(self) -> bool {
        self.index() == 0
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::ALL.len() - 1
    }

    pub fn title(self) -> &'static str {
        match self {
            SceneId::Wealth => "Wealth and the epidemic",
            SceneId::Education => "Education",
            SceneId::Prevention => "Prevention",
        }
    }
}
