//! Wires smooth scroll, triggers and mode rules into one page-lifetime object.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, info, warn};

use super::error::Result;
use super::pinned_track::{PinnedTrack, PinnedTrackSpec};
use super::pose::Pose;
use super::responsive::{BreakpointMode, ModeChange, ModeRules, ModeSwitch, RuleSet};
use super::scheduler::FrameScheduler;
use super::scope::EffectScope;
use super::smooth_scroll::{ScrollState, SmoothScroll};
use super::surface::Surface;
use super::timeline::{Playback, Timeline};
use super::triggers::{anchored, Anchor, TriggerHandle, TriggerRegistration, TriggerRegistry};
use super::ChoreographyConfig;

/// The effects a page wants. `shared` runs once per mount; `for_mode` runs
/// again on every breakpoint crossing after the previous mode is torn down.
pub trait Score {
    fn shared(&self, stage: &mut Stage<'_>) -> Result<()>;

    fn for_mode(&self, _mode: BreakpointMode, _stage: &mut Stage<'_>) -> Result<()> {
        Ok(())
    }
}

// Field order matters: rule scopes must drop while the registry they
// unregister from is still alive.
struct Core {
    rules: RefCell<Option<ModeRules>>,
    shared: RefCell<Option<EffectScope>>,
    registry: Rc<RefCell<TriggerRegistry>>,
    scroll: SmoothScroll,
    surface: Rc<dyn Surface>,
    switch: RefCell<ModeSwitch>,
    score: Box<dyn Score>,
    config: ChoreographyConfig,
    last_written: Cell<Option<f64>>,
    destroyed: Cell<bool>,
}

/// Registration context handed to a [`Score`]. Everything acquired through
/// it lands in one [`EffectScope`].
pub struct Stage<'a> {
    core: &'a Core,
    scope: EffectScope,
    deferred: Vec<PinnedTrackSpec>,
}

impl<'a> Stage<'a> {
    fn new(core: &'a Core) -> Self {
        Self {
            core,
            scope: EffectScope::new(),
            deferred: Vec::new(),
        }
    }

    fn finish(self) -> (EffectScope, Vec<PinnedTrackSpec>) {
        (self.scope, self.deferred)
    }

    pub fn surface(&self) -> Rc<dyn Surface> {
        self.core.surface.clone()
    }

    pub fn defer(&mut self, disposer: impl FnOnce() + 'static) {
        self.scope.defer(disposer);
    }

    pub fn trigger(&mut self, registration: TriggerRegistration) -> Result<TriggerHandle> {
        let handle = self.core.registry.borrow_mut().register(registration)?;
        let registry = Rc::downgrade(&self.core.registry);
        self.scope.defer(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().unregister(handle);
            }
        });
        Ok(handle)
    }

    /// Scrubs `target` from `from` to `to` across the window where `trigger`
    /// passes between the two anchors.
    pub fn scrub(
        &mut self,
        id: &str,
        trigger: &str,
        start: Anchor,
        end: Anchor,
        target: &str,
        from: Pose,
        to: Pose,
    ) -> Result<TriggerHandle> {
        let surface = self.surface();
        let selector = target.to_string();
        let render = move |progress: f64| {
            surface.set_transform(&selector, &from.lerp(&to, progress).transform());
        };
        self.scrub_with(id, trigger, start, end, target, "transform", render)
    }

    /// Like [`Stage::scrub`] but for an arbitrary style property.
    pub fn scrub_style(
        &mut self,
        id: &str,
        trigger: &str,
        start: Anchor,
        end: Anchor,
        target: &str,
        property: &str,
        value: impl Fn(f64) -> String + 'static,
    ) -> Result<TriggerHandle> {
        let surface = self.surface();
        let selector = target.to_string();
        let name = property.to_string();
        let render = move |progress: f64| surface.set_style(&selector, &name, &value(progress));
        self.scrub_with(id, trigger, start, end, target, property, render)
    }

    fn scrub_with(
        &mut self,
        id: &str,
        trigger: &str,
        start: Anchor,
        end: Anchor,
        target: &str,
        property: &str,
        render: impl FnMut(f64) + 'static,
    ) -> Result<TriggerHandle> {
        let surface = self.surface();
        let registration =
            TriggerRegistration::measured(id, &*surface, anchored(trigger, start, end), render)?;
        let handle = self.trigger(registration)?;
        let selector = target.to_string();
        let property = property.to_string();
        self.scope.defer(move || surface.remove_style(&selector, &property));
        Ok(handle)
    }

    /// Pins a horizontal track. A strip that cannot be measured yet is kept
    /// aside and retried on the next resize or layout-ready signal.
    pub fn pin_track(&mut self, spec: PinnedTrackSpec) -> Result<()> {
        let surface = self.surface();
        let mut track = PinnedTrack::new(spec.clone());
        let outcome = track.setup(surface.clone(), &mut self.core.registry.borrow_mut());
        match outcome {
            Ok(()) => {
                let registry = Rc::downgrade(&self.core.registry);
                self.scope.defer(move || {
                    if let Some(registry) = registry.upgrade() {
                        track.teardown(&*surface, &mut registry.borrow_mut());
                    }
                });
                Ok(())
            }
            Err(e) if e.is_measurement() => {
                info!("Deferring {} until layout is ready: {}", spec.track_id, e);
                self.deferred.push(spec);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Plays a time-based sequence on the frame loop, starting next frame.
    pub fn play(&mut self, timeline: Timeline) {
        let surface = self.surface();
        // Hold every target at its starting pose until the first frame.
        timeline.render(&*surface, 0.0);
        let playback = Rc::new(RefCell::new(Playback::new(timeline)));
        let id = {
            let playback = playback.clone();
            let surface = surface.clone();
            self.core.scroll.on_update(move |state: &ScrollState| {
                playback.borrow_mut().advance(&*surface, state.timestamp);
            })
        };
        let scroll = self.core.scroll.clone();
        self.scope.defer(move || {
            scroll.unsubscribe(id);
            playback.borrow().timeline().revert(&*surface);
        });
    }
}

impl Core {
    fn on_frame(&self, state: &ScrollState) {
        if self.last_written.get() != Some(state.smoothed_offset) {
            self.surface.write_scroll(state.smoothed_offset);
            self.last_written.set(Some(state.smoothed_offset));
        }
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => registry.evaluate(state.smoothed_offset),
            Err(_) => warn!("Trigger registry busy, skipping frame"),
        }
    }

    fn build_rules(&self, mode: BreakpointMode) -> ModeRules {
        let mut stage = Stage::new(self);
        let outcome = self.score.for_mode(mode, &mut stage);
        let (scope, deferred) = stage.finish();
        let rules = match outcome {
            Ok(()) => RuleSet::new(scope, deferred),
            Err(e) => {
                // Dropping the scope releases whatever setup got through.
                warn!("{:?} rules failed, staying static: {}", mode, e);
                drop(scope);
                RuleSet::default()
            }
        };
        ModeRules::new(mode, rules)
    }

    fn apply_mode(&self) {
        let width = self.surface.viewport().width;
        let change = self.switch.borrow_mut().observe(width);
        let mode = match change {
            ModeChange::Unchanged(_) => {
                self.retry_deferred();
                return;
            }
            ModeChange::Initial(mode) => mode,
            ModeChange::Switched { from, to } => {
                info!("Breakpoint crossed at {}px: {:?} -> {:?}", width, from, to);
                to
            }
        };
        let previous = self.rules.borrow_mut().take();
        if let Some(previous) = previous {
            previous.teardown();
        }
        let rules = self.build_rules(mode);
        *self.rules.borrow_mut() = Some(rules);
    }

    fn retry_deferred(&self) {
        let pending = match self.rules.borrow_mut().as_mut() {
            Some(rules) => rules.rules_mut().take_deferred(),
            None => return,
        };
        if pending.is_empty() {
            return;
        }
        let mut stage = Stage::new(self);
        for spec in pending {
            if let Err(e) = stage.pin_track(spec) {
                warn!("Dropping pinned track: {}", e);
            }
        }
        let (scope, deferred) = stage.finish();
        if let Some(rules) = self.rules.borrow_mut().as_mut() {
            rules.rules_mut().absorb(scope, deferred);
        }
    }

    fn relayout(&self) {
        if self.destroyed.get() {
            return;
        }
        self.apply_mode();
        let stale = self.registry.borrow_mut().remeasure(&*self.surface);
        if stale > 0 {
            debug!("{} triggers waiting for layout", stale);
        }
        self.scroll.set_limit(self.surface.scroll_limit());
        self.registry.borrow_mut().refresh();
    }
}

/// One page's scroll choreography. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct Choreography {
    core: Rc<Core>,
}

impl Choreography {
    pub fn mount(
        config: ChoreographyConfig,
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn FrameScheduler>,
        score: impl Score + 'static,
    ) -> Self {
        let scroll = SmoothScroll::new(
            config.smooth_duration_secs,
            surface.native_scroll(),
            surface.scroll_limit(),
            scheduler,
        );
        let core = Rc::new(Core {
            rules: RefCell::new(None),
            shared: RefCell::new(None),
            registry: Rc::new(RefCell::new(TriggerRegistry::new())),
            scroll,
            surface,
            switch: RefCell::new(ModeSwitch::new(config.breakpoint_px)),
            score: Box::new(score),
            config,
            last_written: Cell::new(None),
            destroyed: Cell::new(false),
        });

        let weak: Weak<Core> = Rc::downgrade(&core);
        core.scroll.on_update(move |state: &ScrollState| {
            if let Some(core) = weak.upgrade() {
                core.on_frame(state);
            }
        });

        let mut stage = Stage::new(&core);
        let outcome = core.score.shared(&mut stage);
        let (scope, _) = stage.finish();
        match outcome {
            Ok(()) => *core.shared.borrow_mut() = Some(scope),
            Err(e) => {
                warn!("Shared effects failed, staying static: {}", e);
                drop(scope);
            }
        }

        core.relayout();
        core.scroll.activate();
        info!(
            "Choreography mounted ({:?}, {} triggers)",
            core.switch.borrow().current(),
            core.registry.borrow().len()
        );
        Self { core }
    }

    /// Re-evaluates the breakpoint and re-measures every window. Callers
    /// debounce; calling it repeatedly on one side of the breakpoint only
    /// re-measures.
    pub fn on_resize(&self) {
        self.core.relayout();
    }

    /// Retries deferred setup once late content (images, fonts) has laid out.
    pub fn layout_ready(&self) {
        self.core.relayout();
    }

    pub fn wheel(&self, delta: f64) {
        self.core.scroll.scroll_by(delta * self.core.config.wheel_multiplier);
    }

    pub fn native_scroll(&self, offset: f64) {
        if self.core.scroll.sync_native(offset) {
            self.core.last_written.set(Some(offset));
        }
    }

    pub fn scroll_to(&self, offset: f64) {
        self.core.scroll.scroll_to(offset, false);
    }

    /// Smoothly scrolls until the top of `selector` reaches the top of the viewport.
    pub fn scroll_to_element(&self, selector: &str) {
        match self.core.surface.measure(selector) {
            Some(rect) => self.scroll_to(rect.top),
            None => debug!("scroll target {} not found", selector),
        }
    }

    pub fn pause(&self) {
        self.core.scroll.stop();
    }

    pub fn resume(&self) {
        self.core.scroll.start();
    }

    pub fn mode(&self) -> Option<BreakpointMode> {
        self.core.rules.borrow().as_ref().map(ModeRules::mode)
    }

    pub fn state(&self) -> ScrollState {
        self.core.scroll.state()
    }

    pub fn trigger_count(&self) -> usize {
        self.core.registry.borrow().len()
    }

    pub fn deferred_count(&self) -> usize {
        self.core
            .rules
            .borrow()
            .as_ref()
            .map_or(0, |rules| rules.rules().deferred().len())
    }

    pub fn is_destroyed(&self) -> bool {
        self.core.destroyed.get()
    }

    /// Cancels the frame loop, releases every effect and drops all windows.
    pub fn destroy(&self) {
        if self.core.destroyed.replace(true) {
            return;
        }
        self.core.scroll.destroy();
        let rules = self.core.rules.borrow_mut().take();
        if let Some(rules) = rules {
            rules.teardown();
        }
        let shared = self.core.shared.borrow_mut().take();
        if let Some(mut shared) = shared {
            shared.dispose();
        }
        self.core.registry.borrow_mut().clear();
        info!("Choreography destroyed");
    }
}
