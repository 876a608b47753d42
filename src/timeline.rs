use std::time::Duration;

use crate::{mode::PerformanceMode, profile::Profile};

/// At most one entry open at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accordion<K> {
    expanded: Option<K>,
}

impl<K> Default for Accordion<K> {
    fn default() -> Self {
        Self { expanded: None }
    }
}

impl<K: Copy + PartialEq> Accordion<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `key`, closing whatever was open; toggling the open entry
    /// closes everything.
    pub fn toggle(&mut self, key: K) {
        self.expanded = if self.expanded == Some(key) {
            None
        } else {
            Some(key)
        };
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    pub fn expanded(&self) -> Option<K> {
        self.expanded
    }

    pub fn is_expanded(&self, key: K) -> bool {
        self.expanded == Some(key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineProfile {
    pub body_transition: Option<Duration>,
    pub hover_scale: bool,
}

impl TimelineProfile {
    pub fn body_style(&self, expanded: bool) -> String {
        let (max_height, opacity) = if expanded { ("60rem", 1) } else { ("0", 0) };
        let transition = match self.body_transition {
            Some(duration) => {
                let ms = duration.as_millis();
                format!("max-height {ms}ms ease, opacity {ms}ms ease")
            }
            None => "none".to_string(),
        };
        format!("max-height: {max_height}; opacity: {opacity}; transition: {transition};")
    }

    pub fn card_class(&self, expanded: bool) -> String {
        let mut class = String::from("timeline-card");
        if self.hover_scale {
            class.push_str(" hover-scale");
        }
        if expanded {
            class.push_str(" is-expanded");
        }
        class
    }

    pub fn toggle_label(expanded: bool) -> &'static str {
        if expanded {
            "Show Less"
        } else {
            "Show More"
        }
    }
}

impl Profile for TimelineProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self {
                body_transition: Some(Duration::from_millis(300)),
                hover_scale: true,
            },
            PerformanceMode::Light => Self {
                body_transition: None,
                hover_scale: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ExperienceId;

    const A: ExperienceId = ExperienceId(1);
    const B: ExperienceId = ExperienceId(2);

    #[test]
    fn opening_another_entry_closes_the_first() {
        let mut accordion = Accordion::new();

        accordion.toggle(A);
        accordion.toggle(B);

        assert_eq!(accordion.expanded(), Some(B));
        assert!(!accordion.is_expanded(A));
    }

    #[test]
    fn toggling_open_entry_closes_it() {
        let mut accordion = Accordion::new();

        accordion.toggle(A);
        accordion.toggle(A);

        assert_eq!(accordion.expanded(), None);
    }

    #[test]
    fn collapse_clears_any_open_entry() {
        let mut accordion = Accordion::new();
        accordion.toggle(B);

        accordion.collapse();
        assert_eq!(accordion, Accordion::default());
    }

    #[test]
    fn body_style_follows_expanded_flag_only() {
        let full = TimelineProfile::resolve(PerformanceMode::Full);
        let light = TimelineProfile::resolve(PerformanceMode::Light);

        assert_eq!(
            full.body_style(true),
            "max-height: 60rem; opacity: 1; transition: max-height 300ms ease, opacity 300ms ease;"
        );
        assert_eq!(light.body_style(false), "max-height: 0; opacity: 0; transition: none;");
        assert_eq!(light.card_class(true), "timeline-card is-expanded");
        assert_eq!(TimelineProfile::toggle_label(false), "Show More");
    }
}
