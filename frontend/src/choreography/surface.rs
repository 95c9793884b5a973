/// Page-absolute box of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Everything the choreography needs from the page: measuring elements,
/// writing inline styles and moving the native scroll position.
///
/// Selectors follow `querySelectorAll` semantics. Style writes apply to every
/// matching element unless an index is given.
pub trait Surface {
    fn viewport(&self) -> Viewport;

    /// Box of the first element matching `selector`, offset by the current
    /// scroll so it is stable while scrolling.
    fn measure(&self, selector: &str) -> Option<Rect>;

    fn measure_all(&self, selector: &str) -> Vec<Rect>;

    fn count(&self, selector: &str) -> usize {
        self.measure_all(selector).len()
    }

    fn set_style(&self, selector: &str, property: &str, value: &str);

    fn set_style_nth(&self, selector: &str, index: usize, property: &str, value: &str);

    fn remove_style(&self, selector: &str, property: &str);

    fn set_transform(&self, selector: &str, transform: &str) {
        self.set_style(selector, "transform", transform);
    }

    /// Largest reachable scroll offset (document height minus viewport).
    fn scroll_limit(&self) -> f64;

    fn native_scroll(&self) -> f64;

    fn write_scroll(&self, offset: f64);
}
