//! Technology scroller.
//!
//! Full profile: two strips of the duplicated item list drifting back and
//! forth in opposite directions. Light profile: a static grid of the first
//! few items with a fade at the bottom.

use std::time::Duration;

use crate::{content::TechItem, mode::PerformanceMode, profile::Profile};

pub const DRIFT_CYCLE: Duration = Duration::from_secs(40);
pub const GRID_ITEM_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarqueeProfile {
    Strips { cycle: Duration },
    Grid { limit: usize },
}

impl Profile for MarqueeProfile {
    fn resolve(mode: PerformanceMode) -> Self {
        match mode {
            PerformanceMode::Full => Self::Strips { cycle: DRIFT_CYCLE },
            PerformanceMode::Light => Self::Grid {
                limit: GRID_ITEM_LIMIT,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
    Upper,
    Lower,
}

/// Identifies one rendered tile. The same item appears several times across
/// the strips, so identity alone is ambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HoverKey {
    pub lane: Lane,
    pub position: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Strip<'a> {
    pub lane: Lane,
    pub items: Vec<&'a TechItem>,
    pub from_percent: i32,
    pub to_percent: i32,
    pub cycle: Duration,
}

impl Strip<'_> {
    pub fn style(&self) -> String {
        format!(
            "--drift-from: {}%; --drift-to: {}%; animation-duration: {}s;",
            self.from_percent,
            self.to_percent,
            self.cycle.as_secs()
        )
    }

    pub fn hover_key(&self, position: usize) -> HoverKey {
        HoverKey {
            lane: self.lane,
            position,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MarqueeLayout<'a> {
    Strips([Strip<'a>; 2]),
    Grid { items: &'a [TechItem], fade: bool },
}

impl<'a> MarqueeLayout<'a> {
    pub fn build(items: &'a [TechItem], profile: MarqueeProfile) -> Self {
        match profile {
            MarqueeProfile::Strips { cycle } => {
                let doubled: Vec<&TechItem> = items.iter().chain(items.iter()).collect();
                let mut reversed = doubled.clone();
                reversed.reverse();

                Self::Strips([
                    Strip {
                        lane: Lane::Upper,
                        items: doubled,
                        from_percent: -10,
                        to_percent: -60,
                        cycle,
                    },
                    Strip {
                        lane: Lane::Lower,
                        items: reversed,
                        from_percent: -60,
                        to_percent: -10,
                        cycle,
                    },
                ])
            }
            MarqueeProfile::Grid { limit } => Self::Grid {
                items: &items[..limit.min(items.len())],
                fade: true,
            },
        }
    }
}

/// Which tile the pointer is over, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarqueeHover {
    current: Option<HoverKey>,
}

impl MarqueeHover {
    pub fn enter(&mut self, key: HoverKey) {
        self.current = Some(key);
    }

    /// Clears the hover only if `key` is still the hovered tile, so a late
    /// leave from a neighbour cannot clear a fresh enter.
    pub fn leave(&mut self, key: HoverKey) {
        if self.current == Some(key) {
            self.current = None;
        }
    }

    pub fn is_hovered(&self, key: HoverKey) -> bool {
        self.current == Some(key)
    }
}

pub fn tile_style(item: &TechItem, hovered: bool) -> String {
    let glow = if hovered {
        format!("0 0 15px {}80", item.accent)
    } else {
        "none".to_string()
    };
    format!(
        "background-color: {}20; box-shadow: {glow}; transition: box-shadow 0.3s ease;",
        item.accent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TECH_STACK;

    #[test]
    fn full_profile_builds_two_opposed_strips() {
        let layout = MarqueeLayout::build(TECH_STACK, MarqueeProfile::resolve(PerformanceMode::Full));
        let MarqueeLayout::Strips([upper, lower]) = layout else {
            panic!("expected strips");
        };

        assert_eq!(upper.items.len(), TECH_STACK.len() * 2);
        assert_eq!(lower.items.first(), upper.items.last());
        assert_eq!((upper.from_percent, upper.to_percent), (-10, -60));
        assert_eq!((lower.from_percent, lower.to_percent), (-60, -10));
        assert_eq!(
            upper.style(),
            "--drift-from: -10%; --drift-to: -60%; animation-duration: 40s;"
        );
    }

    #[test]
    fn light_profile_builds_reduced_static_grid() {
        let layout = MarqueeLayout::build(TECH_STACK, MarqueeProfile::resolve(PerformanceMode::Light));

        match layout {
            MarqueeLayout::Grid { items, fade } => {
                assert_eq!(items.len(), GRID_ITEM_LIMIT);
                assert_eq!(items[0].name, "JavaScript");
                assert!(fade);
            }
            MarqueeLayout::Strips(_) => panic!("light profile must not animate"),
        }
    }

    #[test]
    fn grid_limit_never_exceeds_item_count() {
        let layout = MarqueeLayout::build(&TECH_STACK[..3], MarqueeProfile::Grid { limit: 10 });
        assert!(matches!(layout, MarqueeLayout::Grid { items, .. } if items.len() == 3));
    }

    #[test]
    fn duplicate_items_hover_independently() {
        let mut hover = MarqueeHover::default();
        let first = HoverKey { lane: Lane::Upper, position: 0 };
        let duplicate = HoverKey {
            lane: Lane::Upper,
            position: TECH_STACK.len(),
        };

        hover.enter(first);
        assert!(hover.is_hovered(first));
        assert!(!hover.is_hovered(duplicate));

        hover.enter(duplicate);
        hover.leave(first);
        assert!(hover.is_hovered(duplicate));

        hover.leave(duplicate);
        assert_eq!(hover, MarqueeHover::default());
    }

    #[test]
    fn hovered_tile_glows_in_its_accent() {
        let react = &TECH_STACK[2];

        assert!(tile_style(react, true).contains("box-shadow: 0 0 15px #61DAFB80;"));
        assert!(tile_style(react, false).contains("box-shadow: none;"));
        assert!(tile_style(react, false).starts_with("background-color: #61DAFB20;"));
    }
}
