//! Time-based sequences (intro loader, hero reveal) sampled on the frame loop.

use super::pose::{Ease, Pose};
use super::surface::Surface;

#[derive(Debug, Clone)]
pub struct Tween {
    pub target: String,
    pub from: Pose,
    pub to: Pose,
    pub at_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
    /// Delay added per matched element, in document order.
    pub stagger_ms: f64,
}

impl Tween {
    pub fn new(target: &str, from: Pose, to: Pose, duration_ms: f64) -> Self {
        Self {
            target: target.to_string(),
            from,
            to,
            at_ms: 0.0,
            duration_ms,
            ease: Ease::Linear,
            stagger_ms: 0.0,
        }
    }

    /// Animates from `from` to wherever the element rests.
    pub fn from(target: &str, from: Pose, duration_ms: f64) -> Self {
        Self::new(target, from, Pose::IDENTITY, duration_ms)
    }

    pub fn to(target: &str, to: Pose, duration_ms: f64) -> Self {
        Self::new(target, Pose::IDENTITY, to, duration_ms)
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger_ms: f64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn sample(&self, index: usize, elapsed_ms: f64) -> Pose {
        let start = self.at_ms + self.stagger_ms * index as f64;
        let t = if self.duration_ms <= 0.0 {
            if elapsed_ms >= start { 1.0 } else { 0.0 }
        } else {
            ((elapsed_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        };
        self.from.lerp(&self.to, self.ease.apply(t))
    }

    pub fn end_ms(&self, count: usize) -> f64 {
        self.at_ms + self.stagger_ms * count.saturating_sub(1) as f64 + self.duration_ms
    }

    fn touches_opacity(&self) -> bool {
        self.from.opacity != 1.0 || self.to.opacity != 1.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `tween` at `at_ms` on the timeline.
    pub fn at(mut self, at_ms: f64, mut tween: Tween) -> Self {
        tween.at_ms = at_ms.max(0.0);
        self.tweens.push(tween);
        self
    }

    /// Starts `tween` relative to the end of the previous one; a negative
    /// offset overlaps them.
    pub fn then(self, offset_ms: f64, tween: Tween) -> Self {
        let previous_end = self
            .tweens
            .last()
            .map_or(0.0, |last| last.at_ms + last.duration_ms);
        self.at(previous_end + offset_ms, tween)
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn duration(&self, surface: &dyn Surface) -> f64 {
        self.tweens
            .iter()
            .map(|tween| tween.end_ms(surface.count(&tween.target)))
            .fold(0.0, f64::max)
    }

    pub fn render(&self, surface: &dyn Surface, elapsed_ms: f64) {
        for tween in &self.tweens {
            for index in 0..surface.count(&tween.target) {
                let pose = tween.sample(index, elapsed_ms);
                surface.set_style_nth(&tween.target, index, "transform", &pose.transform());
                if tween.touches_opacity() {
                    surface.set_style_nth(&tween.target, index, "opacity", &pose.opacity.to_string());
                }
            }
        }
    }

    /// Drops every inline style the timeline wrote.
    pub fn revert(&self, surface: &dyn Surface) {
        for tween in &self.tweens {
            surface.remove_style(&tween.target, "transform");
            if tween.touches_opacity() {
                surface.remove_style(&tween.target, "opacity");
            }
        }
    }
}

/// A timeline bound to frame timestamps. Time starts at the first frame.
#[derive(Debug)]
pub struct Playback {
    timeline: Timeline,
    started_at: Option<f64>,
    finished: bool,
}

impl Playback {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            started_at: None,
            finished: false,
        }
    }

    /// Renders the frame at `timestamp`. Returns false once the last tween
    /// has been rendered at its end pose.
    pub fn advance(&mut self, surface: &dyn Surface, timestamp: f64) -> bool {
        if self.finished {
            return false;
        }
        let started_at = *self.started_at.get_or_insert(timestamp);
        let elapsed = timestamp - started_at;
        self.timeline.render(surface, elapsed);
        if elapsed >= self.timeline.duration(surface) {
            self.finished = true;
        }
        !self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::surface::Rect;
    use crate::choreography::testing::FakeSurface;

    fn intro() -> Timeline {
        Timeline::new()
            .at(500.0, Tween::to(".loader-text", Pose::IDENTITY.y_px(-100.0), 1_000.0).ease(Ease::Power4In))
            .then(-500.0, Tween::to(".loader-overlay", Pose::IDENTITY.y_percent(-100.0), 1_000.0))
            .then(
                -500.0,
                Tween::from(".hero-title span", Pose::IDENTITY.y_px(200.0).skew_y(10.0), 1_500.0)
                    .ease(Ease::Power4Out)
                    .stagger(100.0),
            )
    }

    fn page() -> FakeSurface {
        FakeSurface::new(1_280.0, 800.0)
            .with_element(".loader-text", Rect::default())
            .with_element(".loader-overlay", Rect::default())
            .with_elements(".hero-title span", vec![Rect::default(); 3])
    }

    #[test]
    fn test_relative_positions() {
        let timeline = intro();
        let starts: Vec<f64> = timeline.tweens().iter().map(|t| t.at_ms).collect();
        assert_eq!(starts, vec![500.0, 1_000.0, 1_500.0]);
    }

    #[test]
    fn test_duration_includes_stagger() {
        assert_eq!(intro().duration(&page()), 1_500.0 + 200.0 + 1_500.0);
    }

    #[test]
    fn test_from_tween_holds_start_pose_before_it_begins() {
        let surface = page();
        intro().render(&surface, 0.0);
        assert_eq!(
            surface.style_nth(".hero-title span", 2, "transform").as_deref(),
            Some("translateY(200px) skewY(10deg)")
        );
        assert_eq!(surface.style(".loader-text", "transform").as_deref(), Some("none"));
    }

    #[test]
    fn test_stagger_offsets_each_element() {
        let tween = Tween::from(".gallery-img", Pose::IDENTITY.y_px(100.0), 1_000.0).stagger(100.0);
        assert_eq!(tween.sample(0, 1_000.0).y_px, 0.0);
        assert!(tween.sample(1, 1_000.0).y_px > 0.0);
        assert_eq!(tween.sample(1, 1_100.0).y_px, 0.0);
    }

    #[test]
    fn test_playback_finishes_on_end_pose() {
        let surface = page();
        let mut playback = Playback::new(intro());
        assert!(playback.advance(&surface, 10_000.0));
        assert!(playback.advance(&surface, 11_000.0));
        assert!(!playback.advance(&surface, 13_200.0));
        assert!(playback.is_finished());
        assert_eq!(surface.style(".loader-overlay", "transform").as_deref(), Some("translate(0%, -100%)"));
        assert_eq!(surface.style_nth(".hero-title span", 2, "transform").as_deref(), Some("none"));
    }

    #[test]
    fn test_revert_clears_styles() {
        let surface = FakeSurface::new(1_280.0, 800.0).with_element(".page-title", Rect::default());
        let timeline = Timeline::new().at(
            0.0,
            Tween::from(".page-title", Pose::IDENTITY.y_px(100.0).opacity(0.0), 1_500.0),
        );
        timeline.render(&surface, 0.0);
        assert_eq!(surface.style(".page-title", "opacity").as_deref(), Some("0"));
        timeline.revert(&surface);
        assert_eq!(surface.style(".page-title", "opacity"), None);
        assert_eq!(surface.style(".page-title", "transform"), None);
    }
}
