//! Smoothed page scrolling.
//!
//! Wheel input moves a raw target; every frame the smoothed offset closes a
//! fraction of the remaining gap (`smoothed += (raw - smoothed) * (1 - decay)`)
//! and the new [`ScrollState`] is broadcast to subscribers, in subscription
//! order, from inside the single frame callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use super::scheduler::FrameScheduler;

/// ln(1000): the gap shrinks to 0.1% after one configured duration.
const SETTLE: f64 = 6.907_755_278_982_137;
const SNAP_PX: f64 = 0.5;
/// Native positions further than this from the smoothed offset did not come
/// from us (keyboard, scrollbar drag, anchor jump).
const NATIVE_TOLERANCE_PX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub raw_offset: f64,
    pub smoothed_offset: f64,
    /// px per second, signed
    pub velocity: f64,
    /// Frame timestamp in ms.
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type ScrollListener = Rc<dyn Fn(&ScrollState)>;

/// Fraction of the gap left after `dt_ms` for a given settle duration.
pub fn decay_factor(duration_secs: f64, dt_ms: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    (-SETTLE * (dt_ms.max(0.0) / 1000.0) / duration_secs).exp()
}

struct Adapter {
    duration_secs: f64,
    state: ScrollState,
    limit: f64,
    last_frame: Option<f64>,
    listeners: Vec<(SubscriptionId, ScrollListener)>,
    next_id: u64,
    paused: bool,
    destroyed: bool,
}

impl Adapter {
    fn advance(&mut self, timestamp: f64) {
        let dt = self.last_frame.map_or(0.0, |prev| (timestamp - prev).max(0.0));
        self.last_frame = Some(timestamp);

        let previous = self.state.smoothed_offset;
        let raw = self.state.raw_offset;
        let mut next = previous + (raw - previous) * (1.0 - decay_factor(self.duration_secs, dt));
        if (raw - next).abs() < SNAP_PX {
            next = raw;
        }

        self.state.smoothed_offset = next;
        self.state.velocity = if dt > 0.0 { (next - previous) / dt * 1000.0 } else { 0.0 };
        self.state.timestamp = timestamp;
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.limit)
    }
}

#[derive(Clone)]
pub struct SmoothScroll {
    adapter: Rc<RefCell<Adapter>>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl SmoothScroll {
    pub fn new(duration_secs: f64, start_offset: f64, limit: f64, scheduler: Rc<dyn FrameScheduler>) -> Self {
        let limit = limit.max(0.0);
        let offset = start_offset.clamp(0.0, limit);
        Self {
            adapter: Rc::new(RefCell::new(Adapter {
                duration_secs,
                state: ScrollState {
                    raw_offset: offset,
                    smoothed_offset: offset,
                    ..ScrollState::default()
                },
                limit,
                last_frame: None,
                listeners: Vec::new(),
                next_id: 0,
                paused: false,
                destroyed: false,
            })),
            scheduler,
        }
    }

    /// Starts the frame loop on the injected scheduler.
    pub fn activate(&self) {
        if self.adapter.borrow().destroyed {
            return;
        }
        let adapter: Weak<RefCell<Adapter>> = Rc::downgrade(&self.adapter);
        self.scheduler.start(Box::new(move |timestamp| {
            if let Some(adapter) = adapter.upgrade() {
                run_frame(&adapter, timestamp);
            }
        }));
        debug!("smooth scroll activated");
    }

    pub fn on_update(&self, listener: impl Fn(&ScrollState) + 'static) -> SubscriptionId {
        let mut adapter = self.adapter.borrow_mut();
        adapter.next_id += 1;
        let id = SubscriptionId(adapter.next_id);
        if !adapter.destroyed {
            adapter.listeners.push((id, Rc::new(listener)));
        }
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut adapter = self.adapter.borrow_mut();
        let before = adapter.listeners.len();
        adapter.listeners.retain(|(existing, _)| *existing != id);
        adapter.listeners.len() != before
    }

    pub fn scroll_by(&self, delta: f64) {
        let mut adapter = self.adapter.borrow_mut();
        if adapter.paused || adapter.destroyed {
            return;
        }
        adapter.state.raw_offset = adapter.clamp(adapter.state.raw_offset + delta);
    }

    pub fn scroll_to(&self, offset: f64, immediate: bool) {
        let mut adapter = self.adapter.borrow_mut();
        if adapter.destroyed {
            return;
        }
        let target = adapter.clamp(offset);
        adapter.state.raw_offset = target;
        if immediate {
            adapter.state.smoothed_offset = target;
            adapter.state.velocity = 0.0;
        }
    }

    /// Adopts a native scroll position that did not come from this adapter.
    /// Returns true when the state jumped.
    pub fn sync_native(&self, offset: f64) -> bool {
        let mut adapter = self.adapter.borrow_mut();
        if adapter.destroyed || (offset - adapter.state.smoothed_offset).abs() <= NATIVE_TOLERANCE_PX {
            return false;
        }
        let offset = adapter.clamp(offset);
        adapter.state.raw_offset = offset;
        adapter.state.smoothed_offset = offset;
        adapter.state.velocity = 0.0;
        true
    }

    pub fn set_limit(&self, limit: f64) {
        let mut adapter = self.adapter.borrow_mut();
        adapter.limit = limit.max(0.0);
        adapter.state.raw_offset = adapter.clamp(adapter.state.raw_offset);
    }

    /// Ignores wheel input until [`SmoothScroll::start`].
    pub fn stop(&self) {
        self.adapter.borrow_mut().paused = true;
    }

    pub fn start(&self) {
        self.adapter.borrow_mut().paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.adapter.borrow().paused
    }

    pub fn state(&self) -> ScrollState {
        self.adapter.borrow().state
    }

    pub fn is_active(&self) -> bool {
        !self.adapter.borrow().destroyed && self.scheduler.is_running()
    }

    /// Cancels the frame loop and drops every subscriber.
    pub fn destroy(&self) {
        self.scheduler.cancel();
        let mut adapter = self.adapter.borrow_mut();
        adapter.destroyed = true;
        adapter.listeners.clear();
        debug!("smooth scroll destroyed");
    }
}

fn run_frame(adapter: &Rc<RefCell<Adapter>>, timestamp: f64) {
    let (state, listeners) = {
        let mut adapter = adapter.borrow_mut();
        if adapter.destroyed {
            return;
        }
        adapter.advance(timestamp);
        let listeners: Vec<ScrollListener> = adapter.listeners.iter().map(|(_, l)| l.clone()).collect();
        (adapter.state, listeners)
    };

    for listener in listeners {
        if adapter.borrow().destroyed {
            break;
        }
        listener(&state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choreography::testing::ManualScheduler;
    use std::cell::Cell;

    fn adapter(duration: f64) -> (SmoothScroll, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::default());
        let scroll = SmoothScroll::new(duration, 0.0, 5_000.0, scheduler.clone());
        scroll.activate();
        (scroll, scheduler)
    }

    #[test]
    fn test_decay_factor_bounds() {
        assert!((decay_factor(1.2, 0.0) - 1.0).abs() < 1e-9);
        assert!(decay_factor(1.2, 16.0) < 1.0);
        assert!((decay_factor(1.0, 1000.0) - 0.001).abs() < 1e-6);
        assert_eq!(decay_factor(0.0, 16.0), 0.0);
    }

    #[test]
    fn test_smoothed_offset_approaches_target() {
        let (scroll, scheduler) = adapter(1.2);
        scroll.scroll_by(1000.0);
        scheduler.frame(0.0);
        scheduler.frame(16.0);
        let early = scroll.state().smoothed_offset;
        assert!(early > 0.0 && early < 1000.0);
        assert!(scroll.state().velocity > 0.0);

        scheduler.run(16.0, 200);
        assert_eq!(scroll.state().smoothed_offset, 1000.0);
    }

    #[test]
    fn test_raw_target_is_clamped() {
        let (scroll, _) = adapter(1.2);
        scroll.scroll_by(-300.0);
        assert_eq!(scroll.state().raw_offset, 0.0);
        scroll.scroll_by(99_999.0);
        assert_eq!(scroll.state().raw_offset, 5_000.0);
        scroll.set_limit(2_000.0);
        assert_eq!(scroll.state().raw_offset, 2_000.0);
    }

    #[test]
    fn test_native_jump_resyncs_without_animation() {
        let (scroll, _) = adapter(1.2);
        assert!(!scroll.sync_native(1.0));
        assert!(scroll.sync_native(800.0));
        let state = scroll.state();
        assert_eq!(state.raw_offset, 800.0);
        assert_eq!(state.smoothed_offset, 800.0);
    }

    #[test]
    fn test_paused_ignores_wheel() {
        let (scroll, _) = adapter(1.2);
        scroll.stop();
        assert!(scroll.is_paused());
        scroll.scroll_by(400.0);
        assert_eq!(scroll.state().raw_offset, 0.0);
        scroll.start();
        assert!(!scroll.is_paused());
        scroll.scroll_by(400.0);
        assert_eq!(scroll.state().raw_offset, 400.0);
    }

    #[test]
    fn test_destroy_stops_updates() {
        let (scroll, scheduler) = adapter(1.2);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        scroll.on_update(move |_| counter.set(counter.get() + 1));

        scheduler.run(0.0, 3);
        assert_eq!(calls.get(), 3);

        scroll.destroy();
        assert!(!scheduler.frame(100.0));
        assert_eq!(calls.get(), 3);
        assert!(!scroll.is_active());
    }

    #[test]
    fn test_reactivation_keeps_one_loop() {
        let (scroll, scheduler) = adapter(1.2);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        scroll.on_update(move |_| counter.set(counter.get() + 1));

        scroll.activate();
        scheduler.frame(16.0);
        assert_eq!(scheduler.starts(), 2);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let (scroll, scheduler) = adapter(1.2);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = scroll.on_update(move |_| counter.set(counter.get() + 1));
        assert!(scroll.unsubscribe(id));
        assert!(!scroll.unsubscribe(id));
        scheduler.run(0.0, 2);
        assert_eq!(calls.get(), 0);
    }
}
