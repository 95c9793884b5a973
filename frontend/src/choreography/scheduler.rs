/// Per-frame callback. Receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnMut(f64)>;

/// Owner of the one frame loop a page is allowed to have.
///
/// `start` replaces any running loop, so repeated mount/unmount cycles can
/// never stack two loops on the same scheduler.
pub trait FrameScheduler {
    fn start(&self, callback: FrameCallback);

    fn cancel(&self);

    fn is_running(&self) -> bool;
}
