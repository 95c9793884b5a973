//! Scroll-offset windows and the registry that evaluates them every frame.

use std::rc::Rc;

use log::{debug, warn};

use super::error::{ChoreographyError, Result};
use super::surface::{Rect, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// The scroll offset at which an element edge meets a horizontal line of
/// the viewport. `Anchor::top(0.8)` reads "top of the element at 80% of the
/// viewport height".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub edge: Edge,
    pub viewport: f64,
}

impl Anchor {
    pub const fn top(viewport: f64) -> Self {
        Self { edge: Edge::Top, viewport }
    }

    pub const fn bottom(viewport: f64) -> Self {
        Self { edge: Edge::Bottom, viewport }
    }

    pub fn resolve(&self, rect: &Rect, viewport_height: f64) -> f64 {
        let edge = match self.edge {
            Edge::Top => rect.top,
            Edge::Bottom => rect.bottom(),
        };
        edge - self.viewport * viewport_height
    }
}

/// Recomputes a window `(start, end)` from live layout.
pub type Measure = Rc<dyn Fn(&dyn Surface) -> Result<(f64, f64)>>;

pub fn anchored(target: &str, start: Anchor, end: Anchor) -> Measure {
    let target = target.to_string();
    Rc::new(move |surface: &dyn Surface| {
        let rect = surface
            .measure(&target)
            .ok_or_else(|| ChoreographyError::Measurement(format!("{} is not in the document", target)))?;
        let height = surface.viewport().height;
        Ok((start.resolve(&rect, height), end.resolve(&rect, height)))
    })
}

/// Normalised position of `offset` inside `[start, end]`.
pub fn progress(offset: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if offset >= end { 1.0 } else { 0.0 };
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}

pub struct TriggerRegistration {
    pub id: String,
    pub start_offset: f64,
    pub end_offset: f64,
    pub pinned: bool,
    pub on_progress: Box<dyn FnMut(f64)>,
    pub on_enter: Option<Box<dyn FnMut()>>,
    pub on_leave: Option<Box<dyn FnMut()>>,
    measure: Option<Measure>,
}

impl TriggerRegistration {
    pub fn new(
        id: impl Into<String>,
        start_offset: f64,
        end_offset: f64,
        on_progress: impl FnMut(f64) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            start_offset,
            end_offset,
            pinned: false,
            on_progress: Box::new(on_progress),
            on_enter: None,
            on_leave: None,
            measure: None,
        }
    }

    /// Builds a registration whose window is measured now and again on
    /// every [`TriggerRegistry::remeasure`].
    pub fn measured(
        id: impl Into<String>,
        surface: &dyn Surface,
        measure: Measure,
        on_progress: impl FnMut(f64) + 'static,
    ) -> Result<Self> {
        let (start, end) = measure(surface)?;
        let mut registration = Self::new(id, start, end, on_progress);
        registration.measure = Some(measure);
        Ok(registration)
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn on_enter(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_enter = Some(Box::new(callback));
        self
    }

    pub fn on_leave(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_leave = Some(Box::new(callback));
        self
    }

    pub fn progress_at(&self, offset: f64) -> f64 {
        progress(offset, self.start_offset, self.end_offset)
    }

    fn validate(&self) -> Result<()> {
        // Written so NaN bounds are rejected too.
        if !(self.start_offset < self.end_offset) {
            return Err(ChoreographyError::Configuration(format!(
                "trigger {}: end {} must be after start {}",
                self.id, self.end_offset, self.start_offset
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerHandle(u64);

struct Entry {
    handle: TriggerHandle,
    registration: TriggerRegistration,
    inside: bool,
    last_progress: Option<f64>,
    stale: bool,
}

impl Entry {
    fn evaluate(&mut self, offset: f64) {
        let registration = &mut self.registration;
        let inside = offset >= registration.start_offset && offset <= registration.end_offset;
        let value = registration.progress_at(offset);

        match (self.inside, inside) {
            (false, true) => {
                if let Some(on_enter) = registration.on_enter.as_mut() {
                    on_enter();
                }
                (registration.on_progress)(value);
            }
            (true, true) => (registration.on_progress)(value),
            (true, false) => {
                // Settle on the boundary before leaving so fast flings don't
                // strand an effect mid-way.
                (registration.on_progress)(value);
                if let Some(on_leave) = registration.on_leave.as_mut() {
                    on_leave();
                }
            }
            (false, false) => {
                if self.last_progress != Some(value) {
                    (registration.on_progress)(value);
                }
            }
        }

        self.inside = inside;
        self.last_progress = Some(value);
    }
}

#[derive(Default)]
pub struct TriggerRegistry {
    entries: Vec<Entry>,
    next_handle: u64,
    last_offset: Option<f64>,
    dirty: bool,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, registration: TriggerRegistration) -> Result<TriggerHandle> {
        if let Err(e) = registration.validate() {
            warn!("Rejected trigger: {}", e);
            return Err(e);
        }
        self.next_handle += 1;
        let handle = TriggerHandle(self.next_handle);
        debug!(
            "Registered trigger {} [{:.0}, {:.0}]{}",
            registration.id,
            registration.start_offset,
            registration.end_offset,
            if registration.pinned { " pinned" } else { "" }
        );
        self.entries.push(Entry {
            handle,
            registration,
            inside: false,
            last_progress: None,
            stale: false,
        });
        self.dirty = true;
        Ok(handle)
    }

    pub fn unregister(&mut self, handle: TriggerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn contains(&self, handle: TriggerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn window(&self, handle: TriggerHandle) -> Option<(f64, f64)> {
        self.entries
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| (entry.registration.start_offset, entry.registration.end_offset))
    }

    /// Runs every live registration against `offset`, in registration order.
    /// A pass at an unchanged offset is skipped unless something was added
    /// or re-measured since.
    pub fn evaluate(&mut self, offset: f64) {
        if !self.dirty && self.last_offset == Some(offset) {
            return;
        }
        self.last_offset = Some(offset);
        self.dirty = false;
        for entry in self.entries.iter_mut().filter(|entry| !entry.stale) {
            entry.evaluate(offset);
        }
    }

    /// Recomputes every measured window from current layout. Entries that can
    /// no longer be measured are kept but skipped until a later pass succeeds.
    /// Returns how many entries are left stale.
    pub fn remeasure(&mut self, surface: &dyn Surface) -> usize {
        let mut stale = 0;
        for entry in self.entries.iter_mut() {
            let Some(measure) = entry.registration.measure.clone() else {
                continue;
            };
            match measure(surface) {
                Ok((start, end)) if start < end => {
                    entry.registration.start_offset = start;
                    entry.registration.end_offset = end;
                    entry.stale = false;
                }
                Ok((start, end)) => {
                    warn!("Trigger {} collapsed to [{}, {}], skipping", entry.registration.id, start, end);
                    entry.stale = true;
                }
                Err(e) => {
                    debug!("Trigger {} not measurable yet: {}", entry.registration.id, e);
                    entry.stale = true;
                }
            }
            if entry.stale {
                stale += 1;
            }
        }
        self.dirty = true;
        stale
    }

    /// Re-evaluates at the last seen offset, e.g. after a re-measure.
    pub fn refresh(&mut self) {
        if let Some(offset) = self.last_offset {
            self.dirty = true;
            self.evaluate(offset);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
