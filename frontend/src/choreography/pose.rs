use std::fmt::Write;

/// Transform and opacity of one element at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x_percent: f64,
    pub y_percent: f64,
    pub y_px: f64,
    pub skew_y: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        x_percent: 0.0,
        y_percent: 0.0,
        y_px: 0.0,
        skew_y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn x_percent(mut self, value: f64) -> Self {
        self.x_percent = value;
        self
    }

    pub fn y_percent(mut self, value: f64) -> Self {
        self.y_percent = value;
        self
    }

    pub fn y_px(mut self, value: f64) -> Self {
        self.y_px = value;
        self
    }

    pub fn skew_y(mut self, degrees: f64) -> Self {
        self.skew_y = degrees;
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = value;
        self
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = value;
        self
    }

    pub fn lerp(&self, to: &Pose, t: f64) -> Pose {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Pose {
            x_percent: mix(self.x_percent, to.x_percent),
            y_percent: mix(self.y_percent, to.y_percent),
            y_px: mix(self.y_px, to.y_px),
            skew_y: mix(self.skew_y, to.skew_y),
            scale: mix(self.scale, to.scale),
            opacity: mix(self.opacity, to.opacity),
        }
    }

    /// CSS `transform` value. Identity components are left out.
    pub fn transform(&self) -> String {
        let mut css = String::new();
        if self.x_percent != 0.0 || self.y_percent != 0.0 {
            let _ = write!(css, "translate({}%, {}%) ", round(self.x_percent), round(self.y_percent));
        }
        if self.y_px != 0.0 {
            let _ = write!(css, "translateY({}px) ", round(self.y_px));
        }
        if self.skew_y != 0.0 {
            let _ = write!(css, "skewY({}deg) ", round(self.skew_y));
        }
        if self.scale != 1.0 {
            let _ = write!(css, "scale({}) ", round(self.scale));
        }
        let css = css.trim_end();
        if css.is_empty() {
            "none".to_string()
        } else {
            css.to_string()
        }
    }
}

fn round(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// GSAP-style curves; powerN raises to the N+1th power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power3Out,
    Power4In,
    Power4Out,
    Power4InOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power4In => t.powi(5),
            Ease::Power4Out => 1.0 - (1.0 - t).powi(5),
            Ease::Power4InOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        assert_eq!(Pose::IDENTITY.transform(), "none");
    }

    #[test]
    fn test_transform_composition() {
        let pose = Pose::IDENTITY.y_percent(30.0).scale(1.1);
        assert_eq!(pose.transform(), "translate(0%, 30%) scale(1.1)");
        let pose = Pose::IDENTITY.y_px(200.0).skew_y(10.0);
        assert_eq!(pose.transform(), "translateY(200px) skewY(10deg)");
    }

    #[test]
    fn test_lerp_midpoint() {
        let from = Pose::IDENTITY.y_px(100.0).opacity(0.0);
        let mid = from.lerp(&Pose::IDENTITY, 0.5);
        assert_eq!(mid.y_px, 50.0);
        assert_eq!(mid.opacity, 0.5);
    }

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::Power3Out, Ease::Power4In, Ease::Power4Out, Ease::Power4InOut] {
            assert!(ease.apply(0.0).abs() < 1e-9, "{:?}", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{:?}", ease);
        }
        assert!((Ease::Power4InOut.apply(0.5) - 0.5).abs() < 1e-9);
        assert!(Ease::Power4Out.apply(0.2) > Ease::Power4In.apply(0.2));
    }
}
