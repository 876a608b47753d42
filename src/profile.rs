//! Visual profiles.
//!
//! Each component resolves its styling and motion configuration from the
//! current [`PerformanceMode`] in exactly one place. Descriptors for the
//! interactive components live beside their state machines; the page
//! chrome descriptors live here.

use std::time::Duration;

use crate::mode::PerformanceMode;

pub trait Profile: Sized {
    fn resolve(mode: PerformanceMode) -> Self;
}

/// One drifting, blurred colour blob behind the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    pub class: &'static str,
    pub cycle: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackdropProfile {
    pub blur_px: u32,
    pub solid_color: Option<&'static str>,
    pub blobs: Vec<Blob>,
}

impl BackdropProfile {
    pub fn style(&self) -> String {
        match self.solid_color {
            Some(color) => format!("backdrop-filter: none; background-color: {color};"),
            None => format!("backdrop-filter: blur({}px);", self.blur_px),
        }
    }
}

impl Blob {
    pub fn style(&self) -> String {
        format!("animation-duration: {}s;", self.cycle.as_secs())
    }
}

impl Profile for BackdropProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self {
                blur_px: 100,
                solid_color: None,
                blobs: vec![
                    Blob {
                        class: "blob blob-blue",
                        cycle: Duration::from_secs(20),
                    },
                    Blob {
                        class: "blob blob-purple",
                        cycle: Duration::from_secs(15),
                    },
                    Blob {
                        class: "blob blob-pink",
                        cycle: Duration::from_secs(25),
                    },
                ],
            },
            PerformanceMode::Light => Self {
                blur_px: 0,
                solid_color: Some("rgba(30, 41, 59, 0.95)"),
                blobs: Vec::new(),
            },
        }
    }
}

/// Panels (hero card, section cards, connect panel).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceProfile {
    pub panel_class: &'static str,
    pub entrance: Duration,
    pub press_feedback: bool,
}

impl SurfaceProfile {
    pub fn entrance_style(&self) -> String {
        format!("animation-duration: {}ms;", self.entrance.as_millis())
    }

    pub fn button_class(&self) -> Option<&'static str> {
        self.press_feedback.then_some("press-feedback")
    }
}

impl Profile for SurfaceProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self {
                panel_class: "panel panel-glass",
                entrance: Duration::from_millis(800),
                press_feedback: true,
            },
            PerformanceMode::Light => Self {
                panel_class: "panel panel-solid",
                entrance: Duration::from_millis(300),
                press_feedback: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavProfile {
    pub entrance: Duration,
    pub hover_glow: bool,
}

impl NavProfile {
    pub fn bar_class(&self) -> &'static str {
        if self.hover_glow {
            "nav-bar nav-glow"
        } else {
            "nav-bar"
        }
    }

    pub fn entrance_style(&self) -> String {
        format!("animation-duration: {}ms;", self.entrance.as_millis())
    }
}

impl Profile for NavProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self {
                entrance: Duration::from_millis(500),
                hover_glow: true,
            },
            PerformanceMode::Light => Self {
                entrance: Duration::from_millis(200),
                hover_glow: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectProfile {
    pub panel_class: &'static str,
    pub stagger: Duration,
    pub hover_lift: bool,
}

impl ConnectProfile {
    /// Entrance delay for the social tile at `position`.
    pub fn tile_style(&self, position: usize, accent: &str) -> String {
        let delay = self.stagger.as_millis() * position as u128;
        format!("animation-delay: {delay}ms; --accent: {accent};")
    }

    pub fn tile_class(&self) -> &'static str {
        if self.hover_lift {
            "social-tile lift"
        } else {
            "social-tile"
        }
    }
}

impl Profile for ConnectProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self {
                panel_class: "panel panel-glass",
                stagger: Duration::from_millis(100),
                hover_lift: true,
            },
            PerformanceMode::Light => Self {
                panel_class: "panel panel-dim",
                stagger: Duration::from_millis(50),
                hover_lift: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_backdrop_is_static_and_solid() {
        let backdrop = BackdropProfile::resolve(PerformanceMode::Light);

        assert!(backdrop.blobs.is_empty());
        assert_eq!(
            backdrop.style(),
            "backdrop-filter: none; background-color: rgba(30, 41, 59, 0.95);"
        );
    }

    #[test]
    fn full_backdrop_runs_three_blob_cycles() {
        let backdrop = BackdropProfile::resolve(PerformanceMode::Full);
        let cycles: Vec<u64> = backdrop.blobs.iter().map(|blob| blob.cycle.as_secs()).collect();

        assert_eq!(cycles, vec![20, 15, 25]);
        assert_eq!(backdrop.style(), "backdrop-filter: blur(100px);");
    }

    #[test]
    fn connect_tiles_stagger_by_position() {
        let connect = ConnectProfile::resolve(PerformanceMode::Full);
        assert_eq!(
            connect.tile_style(3, "#0077B5"),
            "animation-delay: 300ms; --accent: #0077B5;"
        );
        assert_eq!(ConnectProfile::resolve(PerformanceMode::Light).tile_class(), "social-tile");
    }

    #[test]
    fn light_surfaces_drop_press_feedback() {
        assert_eq!(SurfaceProfile::resolve(PerformanceMode::Light).button_class(), None);
        assert_eq!(
            SurfaceProfile::resolve(PerformanceMode::Full).entrance_style(),
            "animation-duration: 800ms;"
        );
        assert_eq!(NavProfile::resolve(PerformanceMode::Light).bar_class(), "nav-bar");
    }
}
