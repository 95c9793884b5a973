//! Pinned horizontal gallery: vertical scroll through a window drives the
//! horizontal translation of a strip of panels while the section stays put.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use super::error::{ChoreographyError, Result};
use super::pose::Pose;
use super::surface::Surface;
use super::triggers::{Measure, TriggerHandle, TriggerRegistration, TriggerRegistry};

/// Selectors of the elements a pinned track moves.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedTrackSpec {
    pub track_id: String,
    /// Wrapper that stays in flow and grows by the travel distance.
    pub spacer: String,
    /// Section held at the top of the viewport.
    pub section: String,
    pub panels: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinnedTrackState {
    pub track_id: String,
    pub panel_count: usize,
    /// Strip width minus viewport width; also the scroll distance consumed.
    pub total_travel: f64,
}

impl PinnedTrackState {
    pub fn measure(spec: &PinnedTrackSpec, surface: &dyn Surface) -> Result<Self> {
        let panels = surface.measure_all(&spec.panels);
        if panels.is_empty() {
            return Err(ChoreographyError::Measurement(format!("{}: no panels found", spec.track_id)));
        }
        let track_width: f64 = panels.iter().map(|rect| rect.width).sum();
        let viewport = surface.viewport().width;
        if track_width <= 0.0 || viewport <= 0.0 {
            return Err(ChoreographyError::Measurement(format!("{}: not laid out yet", spec.track_id)));
        }
        let total_travel = track_width - viewport;
        if total_travel <= 0.0 {
            return Err(ChoreographyError::Configuration(format!(
                "{}: panels fit in the viewport, nothing to scroll",
                spec.track_id
            )));
        }
        Ok(Self {
            track_id: spec.track_id.clone(),
            panel_count: panels.len(),
            total_travel,
        })
    }
}

/// Horizontal offset of the strip, in percent of a panel, at `progress`.
pub fn translate_percent(panel_count: usize, progress: f64) -> f64 {
    -100.0 * panel_count.saturating_sub(1) as f64 * progress
}

fn release(spec: &PinnedTrackSpec, surface: &dyn Surface) {
    surface.remove_style(&spec.spacer, "padding-bottom");
    surface.remove_style(&spec.section, "transform");
    surface.remove_style(&spec.panels, "transform");
}

pub struct PinnedTrack {
    spec: PinnedTrackSpec,
    state: Rc<RefCell<Option<PinnedTrackState>>>,
    handle: Option<TriggerHandle>,
}

impl PinnedTrack {
    pub fn new(spec: PinnedTrackSpec) -> Self {
        Self {
            spec,
            state: Rc::new(RefCell::new(None)),
            handle: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> Option<PinnedTrackState> {
        self.state.borrow().clone()
    }

    pub fn handle(&self) -> Option<TriggerHandle> {
        self.handle
    }

    /// Measures the strip and registers the pinned window. A strip that is
    /// not laid out yet fails with a measurement error and registers nothing.
    pub fn setup(&mut self, surface: Rc<dyn Surface>, registry: &mut TriggerRegistry) -> Result<()> {
        let registration = TriggerRegistration::measured(
            format!("pin:{}", self.spec.track_id),
            &*surface,
            self.measure(),
            self.render(surface.clone()),
        )?
        .pinned();

        let handle = registry.register(registration)?;
        self.handle = Some(handle);
        if let Some(state) = self.state.borrow().as_ref() {
            info!(
                "Pinned {} with {} panels over {:.0}px",
                state.track_id, state.panel_count, state.total_travel
            );
        }
        Ok(())
    }

    /// Drops the window and every style the track wrote. Panels go back to
    /// normal flow.
    pub fn teardown(&mut self, surface: &dyn Surface, registry: &mut TriggerRegistry) {
        if let Some(handle) = self.handle.take() {
            registry.unregister(handle);
        }
        release(&self.spec, surface);
        *self.state.borrow_mut() = None;
        debug!("Tore down pinned track {}", self.spec.track_id);
    }

    // Re-run on every resize: travel comes from live panel widths, and the
    // spacer grows by exactly that much so scroll maps 1:1 to pixels.
    fn measure(&self) -> Measure {
        let spec = self.spec.clone();
        let state = self.state.clone();
        Rc::new(move |surface: &dyn Surface| {
            let measured = PinnedTrackState::measure(&spec, surface).and_then(|measured| {
                let spacer = surface
                    .measure(&spec.spacer)
                    .ok_or_else(|| ChoreographyError::Measurement(format!("{}: spacer missing", spec.track_id)))?;
                Ok((measured, spacer.top))
            });
            let (measured, top) = match measured {
                Ok(measured) => measured,
                Err(e) => {
                    // The window goes stale; nothing renders it back to rest.
                    release(&spec, surface);
                    *state.borrow_mut() = None;
                    return Err(e);
                }
            };
            let travel = measured.total_travel;
            surface.set_style(&spec.spacer, "padding-bottom", &format!("{}px", travel));
            *state.borrow_mut() = Some(measured);
            Ok((top, top + travel))
        })
    }

    fn render(&self, surface: Rc<dyn Surface>) -> impl FnMut(f64) + 'static {
        let spec = self.spec.clone();
        let state = self.state.clone();
        move |progress: f64| {
            let state = state.borrow();
            let Some(state) = state.as_ref() else {
                return;
            };
            surface.set_transform(
                &spec.section,
                &format!("translate3d(0, {}px, 0)", progress * state.total_travel),
            );
            let strip = Pose::IDENTITY.x_percent(translate_percent(state.panel_count, progress));
            surface.set_transform(&spec.panels, &strip.transform());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::surface::Rect;
    use crate::choreography::testing::FakeSurface;

    fn spec() -> PinnedTrackSpec {
        PinnedTrackSpec {
            track_id: "gallery".to_string(),
            spacer: ".h-spacer".to_string(),
            section: ".h-section".to_string(),
            panels: ".h-item".to_string(),
        }
    }

    fn gallery(panel_width: f64, viewport: f64) -> Rc<FakeSurface> {
        Rc::new(
            FakeSurface::new(viewport, 800.0)
                .with_element(".h-spacer", Rect::new(2_000.0, 0.0, viewport, 800.0))
                .with_element(".h-section", Rect::new(2_000.0, 0.0, viewport, 800.0))
                .with_elements(".h-item", vec![Rect::new(2_000.0, 0.0, panel_width, 800.0); 3]),
        )
    }

    #[test]
    fn test_travel_is_track_minus_viewport() {
        let surface = gallery(900.0, 1_200.0);
        let state = PinnedTrackState::measure(&spec(), &*surface).unwrap();
        assert_eq!(state.panel_count, 3);
        assert_eq!(state.total_travel, 3.0 * 900.0 - 1_200.0);
    }

    #[test]
    fn test_window_length_matches_travel() {
        let surface = gallery(900.0, 1_200.0);
        let mut registry = TriggerRegistry::new();
        let mut track = PinnedTrack::new(spec());
        track.setup(surface.clone(), &mut registry).unwrap();

        let (start, end) = registry.window(track.handle().unwrap()).unwrap();
        assert_eq!(start, 2_000.0);
        assert_eq!(end - start, 1_500.0);
        assert_eq!(surface.style(".h-spacer", "padding-bottom").as_deref(), Some("1500px"));
    }

    #[test]
    fn test_translation_at_ends() {
        assert_eq!(translate_percent(3, 0.0), 0.0);
        assert_eq!(translate_percent(3, 1.0), -200.0);
        assert_eq!(translate_percent(1, 1.0), 0.0);

        let surface = gallery(900.0, 1_200.0);
        let mut registry = TriggerRegistry::new();
        let mut track = PinnedTrack::new(spec());
        track.setup(surface.clone(), &mut registry).unwrap();

        registry.evaluate(3_500.0);
        assert_eq!(surface.style_nth(".h-item", 2, "transform").as_deref(), Some("translate(-200%, 0%)"));
        assert_eq!(surface.style(".h-section", "transform").as_deref(), Some("translate3d(0, 1500px, 0)"));

        registry.evaluate(2_750.0);
        assert_eq!(surface.style(".h-item", "transform").as_deref(), Some("translate(-100%, 0%)"));
    }

    #[test]
    fn test_hidden_strip_defers_setup() {
        let surface = gallery(0.0, 1_200.0);
        let mut registry = TriggerRegistry::new();
        let mut track = PinnedTrack::new(spec());
        let err = track.setup(surface.clone(), &mut registry).unwrap_err();
        assert!(err.is_measurement());
        assert!(registry.is_empty());
        assert!(!track.is_active());
        assert_eq!(surface.style(".h-spacer", "padding-bottom"), None);
    }

    #[test]
    fn test_strip_narrower_than_viewport_is_rejected() {
        let surface = gallery(300.0, 1_200.0);
        let mut registry = TriggerRegistry::new();
        let err = PinnedTrack::new(spec()).setup(surface, &mut registry).unwrap_err();
        assert!(matches!(err, ChoreographyError::Configuration(_)));
    }

    #[test]
    fn test_resize_recomputes_travel() {
        let surface = gallery(900.0, 1_200.0);
        let mut registry = TriggerRegistry::new();
        let mut track = PinnedTrack::new(spec());
        track.setup(surface.clone(), &mut registry).unwrap();

        surface.resize(1_000.0, 800.0);
        surface.place(".h-item", vec![Rect::new(2_000.0, 0.0, 800.0, 800.0); 3]);
        registry.remeasure(&*surface);

        let (start, end) = registry.window(track.handle().unwrap()).unwrap();
        assert_eq!(end - start, 1_400.0);
        assert_eq!(track.state().unwrap().total_travel, 1_400.0);
    }

    #[test]
    fn test_strip_collapsing_on_resize_restores_flow() {
        let surface = gallery(1_200.0, 1_200.0);
        let mut registry = TriggerRegistry::new();
        let mut track = PinnedTrack::new(spec());
        track.setup(surface.clone(), &mut registry).unwrap();
        registry.evaluate(3_200.0);
        assert_eq!(surface.style(".h-section", "transform").as_deref(), Some("translate3d(0, 1200px, 0)"));

        surface.place(".h-item", vec![Rect::new(2_000.0, 0.0, 0.0, 0.0); 3]);
        assert_eq!(registry.remeasure(&*surface), 1);
        registry.refresh();

        assert_eq!(surface.style(".h-spacer", "padding-bottom"), None);
        assert_eq!(surface.style(".h-section", "transform"), None);
        assert_eq!(surface.style(".h-item", "transform"), None);
        assert!(track.state().is_none());
    }

    #[test]
    fn test_teardown_restores_flow() {
        let surface = gallery(900.0, 1_200.0);
        let mut registry = TriggerRegistry::new();
        let mut track = PinnedTrack::new(spec());
        track.setup(surface.clone(), &mut registry).unwrap();
        registry.evaluate(2_500.0);

        track.teardown(&*surface, &mut registry);
        assert!(registry.is_empty());
        assert_eq!(surface.style(".h-item", "transform"), None);
        assert_eq!(surface.style(".h-section", "transform"), None);
        assert_eq!(surface.style(".h-spacer", "padding-bottom"), None);
    }
}
