use log::Level;

/// Viewport width (px) at and above which the desktop choreography runs.
pub const BREAKPOINT_PX: f64 = 768.0;

/// How long the smoothed scroll offset takes to catch up with the wheel.
pub const SMOOTH_SCROLL_DURATION_SECS: f64 = 1.2;

pub const WHEEL_MULTIPLIER: f64 = 1.0;

pub const RESIZE_DEBOUNCE_MS: u32 = 150;

/// Time the booking confirmation stays on screen before the form comes back.
pub const CONFIRMATION_MS: u32 = 3000;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose choreography logs while developing
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub fn contact_email() -> &'static str {
    "contact@venox.com"
}

pub fn instagram_url() -> &'static str {
    "https://www.instagram.com/venoxalacam"
}
