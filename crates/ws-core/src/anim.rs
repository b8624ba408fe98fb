//! Mark transitions and input debouncing
//!
//! A render pass never waits for an in-flight animation: it retargets the
//! mark from whatever it currently shows toward the new target, so renders
//! stay idempotent with respect to final state.

use std::time::{Duration, Instant};

use egui::Color32;

/// Easing curves for mark transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    OutQuad,
    OutCubic,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Everything a mark needs to be drawn at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkVisual {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    pub opacity: f32,
    pub color: Color32,
}

impl MarkVisual {
    /// The zero-size, fully transparent version of this visual, used as
    /// the entrance start and the exit target.
    pub fn collapsed(&self) -> MarkVisual {
        MarkVisual {
            radius: 0.0,
            opacity: 0.0,
            ..*self
        }
    }

    fn lerp(a: &MarkVisual, b: &MarkVisual, t: f32) -> MarkVisual {
        MarkVisual {
            x: a.x + (b.x - a.x) * t as f64,
            y: a.y + (b.y - a.y) * t as f64,
            radius: a.radius + (b.radius - a.radius) * t,
            opacity: a.opacity + (b.opacity - a.opacity) * t,
            color: lerp_color(a.color, b.color, t),
        }
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgba_unmultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

/// One mark's in-flight transition, keyed by country in the mark registry
#[derive(Debug, Clone)]
pub struct MarkAnim {
    start: MarkVisual,
    target: MarkVisual,
    start_time: f64,
    duration: f32,
    ease: Ease,
    exiting: bool,
}

impl MarkAnim {
    pub const DEFAULT_DURATION: f32 = 0.6;
    /// Per-item entrance stagger, seconds
    pub const STAGGER: f32 = 0.012;

    /// Entrance lane: grow from nothing, delayed by the stagger index
    pub fn appear(target: MarkVisual, now: f64, stagger_index: usize) -> Self {
        Self {
            start: target.collapsed(),
            target,
            start_time: now + stagger_index as f64 * Self::STAGGER as f64,
            duration: Self::DEFAULT_DURATION,
            ease: Ease::OutCubic,
            exiting: false,
        }
    }

    /// Update lane: ease from whatever is currently shown to the new target
    pub fn retarget(&mut self, target: MarkVisual, now: f64) {
        self.start = self.sample(now);
        self.target = target;
        self.start_time = now;
        self.exiting = false;
    }

    /// Exit lane: shrink to nothing; the registry drops the mark once done
    pub fn depart(&mut self, now: f64) {
        self.start = self.sample(now);
        self.target = self.start.collapsed();
        self.start_time = now;
        self.exiting = true;
    }

    pub fn sample(&self, now: f64) -> MarkVisual {
        let elapsed = (now - self.start_time) as f32;
        if elapsed <= 0.0 {
            return self.start;
        }
        let t = self.ease.apply(elapsed / self.duration);
        MarkVisual::lerp(&self.start, &self.target, t)
    }

    pub fn is_settled(&self, now: f64) -> bool {
        (now - self.start_time) as f32 >= self.duration
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn target(&self) -> &MarkVisual {
        &self.target
    }
}

/// Debounce for continuous inputs (the year slider)
///
/// Values are submitted on every intermediate change; `poll` releases only
/// the latest one, once the input has been quiet for the configured delay.
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<(T, Instant)>,
    delay: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: None,
            delay,
        }
    }

    pub fn submit(&mut self, value: T) {
        self.pending = Some((value, Instant::now()));
    }

    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn poll_at(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, submitted)) if now.duration_since(*submitted) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints_are_stable() {
        for ease in [Ease::Linear, Ease::OutQuad, Ease::OutCubic] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    fn visual(x: f64, radius: f32) -> MarkVisual {
        MarkVisual {
            x,
            y: 0.0,
            radius,
            opacity: 1.0,
            color: Color32::WHITE,
        }
    }

    #[test]
    fn test_entrance_starts_collapsed_and_reaches_target() {
        let anim = MarkAnim::appear(visual(10.0, 8.0), 0.0, 0);
        let begin = anim.sample(0.0);
        assert_eq!(begin.radius, 0.0);
        assert_eq!(begin.opacity, 0.0);

        let end = anim.sample(10.0);
        assert_eq!(end.radius, 8.0);
        assert_eq!(end.opacity, 1.0);
    }

    #[test]
    fn test_stagger_delays_later_marks() {
        let first = MarkAnim::appear(visual(0.0, 5.0), 0.0, 0);
        let tenth = MarkAnim::appear(visual(0.0, 5.0), 0.0, 10);
        let probe = 0.05;
        assert!(first.sample(probe).radius > tenth.sample(probe).radius);
    }

    #[test]
    fn test_retarget_resumes_from_current_sample() {
        let mut anim = MarkAnim::appear(visual(0.0, 10.0), 0.0, 0);
        let mid = anim.sample(0.2);
        anim.retarget(visual(100.0, 4.0), 0.2);
        let resumed = anim.sample(0.2);
        assert_eq!(resumed.radius, mid.radius);
        assert_eq!(anim.target().x, 100.0);
    }

    #[test]
    fn test_depart_collapses() {
        let mut anim = MarkAnim::appear(visual(5.0, 10.0), 0.0, 0);
        anim.depart(10.0);
        assert!(anim.is_exiting());
        let end = anim.sample(20.0);
        assert_eq!(end.radius, 0.0);
        assert_eq!(end.opacity, 0.0);
    }

    #[test]
    fn test_debounce_releases_only_after_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(150));
        let t0 = Instant::now();
        debouncer.submit(2011u16);
        assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(10)), None);
        debouncer.submit(2016u16);
        // Quiet period restarts on every submit; only the latest value lands.
        assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(300)), Some(2016));
        assert_eq!(debouncer.poll_at(t0 + Duration::from_millis(600)), None);
    }
}
