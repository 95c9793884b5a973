//! In-memory page and frame clock for driving the choreography in tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::scheduler::{FrameCallback, FrameScheduler};
use super::surface::{Rect, Surface, Viewport};

#[derive(Default)]
pub struct ManualScheduler {
    callback: RefCell<Option<FrameCallback>>,
    generation: Cell<u64>,
    starts: Cell<usize>,
}

impl ManualScheduler {
    /// Fires one frame. Returns false when no loop is running.
    pub fn frame(&self, timestamp: f64) -> bool {
        let generation = self.generation.get();
        let Some(mut callback) = self.callback.borrow_mut().take() else {
            return false;
        };
        callback(timestamp);
        if self.generation.get() == generation {
            *self.callback.borrow_mut() = Some(callback);
        }
        true
    }

    /// Fires `count` frames 16 ms apart starting at `from`; returns the last timestamp.
    pub fn run(&self, from: f64, count: usize) -> f64 {
        let mut now = from;
        for _ in 0..count {
            now += 16.0;
            self.frame(now);
        }
        now
    }

    pub fn starts(&self) -> usize {
        self.starts.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(&self, callback: FrameCallback) {
        self.generation.set(self.generation.get() + 1);
        self.starts.set(self.starts.get() + 1);
        *self.callback.borrow_mut() = Some(callback);
    }

    fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
        self.callback.borrow_mut().take();
    }

    fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

type Styles = HashMap<String, String>;

pub struct FakeSurface {
    viewport: Cell<Viewport>,
    elements: RefCell<HashMap<String, Vec<Rect>>>,
    styles: RefCell<HashMap<String, Vec<Styles>>>,
    scroll_limit: Cell<f64>,
    scroll: Cell<f64>,
}

impl FakeSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Cell::new(Viewport { width, height }),
            elements: RefCell::new(HashMap::new()),
            styles: RefCell::new(HashMap::new()),
            scroll_limit: Cell::new(10_000.0),
            scroll: Cell::new(0.0),
        }
    }

    pub fn with_element(self, selector: &str, rect: Rect) -> Self {
        self.place(selector, vec![rect]);
        self
    }

    pub fn with_elements(self, selector: &str, rects: Vec<Rect>) -> Self {
        self.place(selector, rects);
        self
    }

    pub fn place(&self, selector: &str, rects: Vec<Rect>) {
        let count = rects.len();
        self.elements.borrow_mut().insert(selector.to_string(), rects);
        self.styles
            .borrow_mut()
            .entry(selector.to_string())
            .or_default()
            .resize_with(count, HashMap::new);
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.viewport.set(Viewport { width, height });
    }

    pub fn set_scroll_limit(&self, limit: f64) {
        self.scroll_limit.set(limit);
    }

    pub fn set_native_scroll(&self, offset: f64) {
        self.scroll.set(offset);
    }

    pub fn style(&self, selector: &str, property: &str) -> Option<String> {
        self.style_nth(selector, 0, property)
    }

    pub fn style_nth(&self, selector: &str, index: usize, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .get(selector)
            .and_then(|all| all.get(index))
            .and_then(|styles| styles.get(property).cloned())
    }
}

impl Surface for FakeSurface {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn measure(&self, selector: &str) -> Option<Rect> {
        self.elements.borrow().get(selector).and_then(|rects| rects.first().copied())
    }

    fn measure_all(&self, selector: &str) -> Vec<Rect> {
        self.elements.borrow().get(selector).cloned().unwrap_or_default()
    }

    fn set_style(&self, selector: &str, property: &str, value: &str) {
        if let Some(all) = self.styles.borrow_mut().get_mut(selector) {
            for styles in all.iter_mut() {
                styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn set_style_nth(&self, selector: &str, index: usize, property: &str, value: &str) {
        if let Some(styles) = self.styles.borrow_mut().get_mut(selector).and_then(|all| all.get_mut(index)) {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&self, selector: &str, property: &str) {
        if let Some(all) = self.styles.borrow_mut().get_mut(selector) {
            for styles in all.iter_mut() {
                styles.remove(property);
            }
        }
    }

    fn scroll_limit(&self) -> f64 {
        self.scroll_limit.get()
    }

    fn native_scroll(&self) -> f64 {
        self.scroll.get()
    }

    fn write_scroll(&self, offset: f64) {
        self.scroll.set(offset);
    }
}
