//! Browser bindings: DOM surface, requestAnimationFrame loop and the window
//! listeners that feed the engine.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, WheelEvent, Window};

use super::engine::{Choreography, Score};
use super::scheduler::{FrameCallback, FrameScheduler};
use super::surface::{Rect, Surface, Viewport};
use super::ChoreographyConfig;

const LINE_HEIGHT_PX: f64 = 16.0;
const SMOOTH_SCROLL_ATTR: &str = "data-smooth-scroll";

pub struct WebSurface {
    window: Window,
    document: Document,
}

impl WebSurface {
    pub fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn elements(&self, selector: &str) -> Vec<HtmlElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect(),
            Err(_) => {
                warn!("Invalid selector {}", selector);
                Vec::new()
            }
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

fn rect_of(element: &Element, scroll_y: f64) -> Rect {
    let bounds = element.get_bounding_client_rect();
    Rect::new(bounds.top() + scroll_y, bounds.left(), bounds.width(), bounds.height())
}

impl Surface for WebSurface {
    fn viewport(&self) -> Viewport {
        let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport {
            width: read(self.window.inner_width()),
            height: read(self.window.inner_height()),
        }
    }

    fn measure(&self, selector: &str) -> Option<Rect> {
        let element = self.document.query_selector(selector).ok().flatten()?;
        Some(rect_of(&element, self.scroll_y()))
    }

    fn measure_all(&self, selector: &str) -> Vec<Rect> {
        let scroll_y = self.scroll_y();
        self.elements(selector)
            .iter()
            .map(|element| rect_of(element, scroll_y))
            .collect()
    }

    fn count(&self, selector: &str) -> usize {
        self.document
            .query_selector_all(selector)
            .map(|list| list.length() as usize)
            .unwrap_or(0)
    }

    fn set_style(&self, selector: &str, property: &str, value: &str) {
        for element in self.elements(selector) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn set_style_nth(&self, selector: &str, index: usize, property: &str, value: &str) {
        if let Some(element) = self.elements(selector).get(index) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn remove_style(&self, selector: &str, property: &str) {
        for element in self.elements(selector) {
            let _ = element.style().remove_property(property);
        }
    }

    fn scroll_limit(&self) -> f64 {
        let height = self
            .document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0);
        (height - self.viewport().height).max(0.0)
    }

    fn native_scroll(&self) -> f64 {
        self.scroll_y()
    }

    fn write_scroll(&self, offset: f64) {
        self.window.scroll_to_with_x_and_y(0.0, offset);
    }
}

#[derive(Default)]
struct FrameLoop {
    request_id: Option<i32>,
    tick: Option<Closure<dyn FnMut(f64)>>,
}

/// `requestAnimationFrame` loop owning at most one pending request.
pub struct RafScheduler {
    window: Window,
    frame: Rc<RefCell<FrameLoop>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            frame: Rc::new(RefCell::new(FrameLoop::default())),
        }
    }

    fn request(window: &Window, frame: &RefCell<FrameLoop>) {
        let mut state = frame.borrow_mut();
        let requested = match state.tick.as_ref() {
            Some(tick) => window.request_animation_frame(tick.as_ref().unchecked_ref()),
            None => return,
        };
        match requested {
            Ok(id) => state.request_id = Some(id),
            Err(_) => warn!("requestAnimationFrame refused, frame loop stopped"),
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn start(&self, mut callback: FrameCallback) {
        self.cancel();
        let frame: Weak<RefCell<FrameLoop>> = Rc::downgrade(&self.frame);
        let window = self.window.clone();
        let tick = Closure::wrap(Box::new(move |timestamp: f64| {
            callback(timestamp);
            // A cancel from inside the callback leaves no tick to re-request.
            if let Some(frame) = frame.upgrade() {
                RafScheduler::request(&window, &frame);
            }
        }) as Box<dyn FnMut(f64)>);
        self.frame.borrow_mut().tick = Some(tick);
        Self::request(&self.window, &self.frame);
    }

    fn cancel(&self) {
        let mut state = self.frame.borrow_mut();
        if let Some(id) = state.request_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        state.tick = None;
    }

    fn is_running(&self) -> bool {
        self.frame.borrow().tick.is_some()
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Window event listener removed on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, passive: bool, callback: impl FnMut(Event) + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        match target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                callback,
            }),
            Err(_) => {
                warn!("Could not listen for {}", event);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

fn wheel_delta(event: &WheelEvent, viewport_height: f64) -> f64 {
    match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => event.delta_y() * LINE_HEIGHT_PX,
        WheelEvent::DOM_DELTA_PAGE => event.delta_y() * viewport_height,
        _ => event.delta_y(),
    }
}

fn load_already_fired(ready_state: &str) -> bool {
    ready_state == "complete"
}

/// The engine plus the window listeners that drive it in a browser.
pub struct WebChoreography {
    engine: Choreography,
    root: Option<Element>,
    _listeners: Vec<Listener>,
    _resize_timer: Rc<RefCell<Option<Timeout>>>,
}

impl WebChoreography {
    /// Returns `None` without a window, leaving the page static.
    pub fn mount(config: ChoreographyConfig, score: impl Score + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let surface = Rc::new(WebSurface::new(window.clone())?);
        let root = surface.document.document_element();
        let scheduler = Rc::new(RafScheduler::new(window.clone()));
        let engine = Choreography::mount(config, surface.clone(), scheduler, score);

        if let Some(root) = root.as_ref() {
            let _ = root.set_attribute(SMOOTH_SCROLL_ATTR, "");
        }

        let target: &EventTarget = window.as_ref();
        let resize_timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let mut listeners = Vec::new();

        listeners.extend(Listener::attach(target, "wheel", false, {
            let engine = engine.clone();
            let surface = surface.clone();
            move |event: Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                // Leave pinch-zoom to the browser.
                if wheel.ctrl_key() {
                    return;
                }
                event.prevent_default();
                engine.wheel(wheel_delta(wheel, surface.viewport().height));
            }
        }));

        listeners.extend(Listener::attach(target, "scroll", true, {
            let engine = engine.clone();
            let surface = surface.clone();
            move |_| engine.native_scroll(surface.native_scroll())
        }));

        listeners.extend(Listener::attach(target, "resize", true, {
            let engine = engine.clone();
            let timer = resize_timer.clone();
            let delay = config.resize_debounce_ms;
            move |_| {
                let engine = engine.clone();
                // Replacing the timeout drops (and cancels) the pending one.
                *timer.borrow_mut() = Some(Timeout::new(delay, move || engine.on_resize()));
            }
        }));

        listeners.extend(Listener::attach(target, "load", true, {
            let engine = engine.clone();
            move |_| engine.layout_ready()
        }));

        // `load` fires once per document. After a client-side navigation
        // the retry comes from a timeout once the new route has laid out.
        if load_already_fired(&surface.document.ready_state()) {
            let engine = engine.clone();
            *resize_timer.borrow_mut() = Some(Timeout::new(0, move || engine.layout_ready()));
        }

        info!("Smooth scrolling enabled with {} listeners", listeners.len());
        Some(Self {
            engine,
            root,
            _listeners: listeners,
            _resize_timer: resize_timer,
        })
    }

    pub fn engine(&self) -> &Choreography {
        &self.engine
    }

    /// Tears the engine down and hands scrolling back to the browser.
    pub fn destroy(self) {
        self.engine.destroy();
        if let Some(root) = self.root.as_ref() {
            let _ = root.remove_attribute(SMOOTH_SCROLL_ATTR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remount_after_load_schedules_layout_pass() {
        assert!(load_already_fired("complete"));
        assert!(!load_already_fired("interactive"));
        assert!(!load_already_fired("loading"));
    }
}
