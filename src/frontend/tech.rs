use std::rc::Rc;

use yew::prelude::*;

use super::use_performance_mode;
use crate::{
    content::{TechItem, TECH_STACK},
    marquee::{tile_style, HoverKey, Lane, MarqueeHover, MarqueeLayout, MarqueeProfile},
    profile::Profile,
};

/// Hover enters and leaves can interleave between renders, so they are
/// applied to the latest state through a reducer.
#[derive(Clone, Copy, Default, PartialEq)]
struct HoverState(MarqueeHover);

enum HoverAction {
    Enter(HoverKey),
    Leave(HoverKey),
}

impl Reducible for HoverState {
    type Action = HoverAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0;
        match action {
            HoverAction::Enter(key) => next.enter(key),
            HoverAction::Leave(key) => next.leave(key),
        }
        Rc::new(Self(next))
    }
}

fn lane_class(lane: Lane) -> &'static str {
    match lane {
        Lane::Upper => "marquee-strip lane-upper",
        Lane::Lower => "marquee-strip lane-lower",
    }
}

fn tech_tile(item: &TechItem, hovered: bool) -> Html {
    html! {
        <>
            <div class="tech-badge" style={tile_style(item, hovered)}>
                <img src={item.icon} alt={item.name} loading="lazy" />
            </div>
            <span class="tech-name">{item.name}</span>
        </>
    }
}

#[function_component(TechStack)]
pub fn tech_stack() -> Html {
    let profile = MarqueeProfile::resolve(use_performance_mode());
    let hover = use_reducer_eq(HoverState::default);

    let body = match MarqueeLayout::build(TECH_STACK, profile) {
        MarqueeLayout::Strips(strips) => html! {
            <div class="marquee">
                { for strips.iter().map(|strip| html! {
                    <div class={lane_class(strip.lane)} style={strip.style()}>
                        { for strip.items.iter().enumerate().map(|(position, item)| {
                            let key = strip.hover_key(position);
                            let onmouseenter = {
                                let hover = hover.dispatcher();
                                Callback::from(move |_: MouseEvent| hover.dispatch(HoverAction::Enter(key)))
                            };
                            let onmouseleave = {
                                let hover = hover.dispatcher();
                                Callback::from(move |_: MouseEvent| hover.dispatch(HoverAction::Leave(key)))
                            };
                            html! {
                                <div class="tech-tile" {onmouseenter} {onmouseleave}>
                                    { tech_tile(item, hover.0.is_hovered(key)) }
                                </div>
                            }
                        }) }
                    </div>
                }) }
            </div>
        },
        MarqueeLayout::Grid { items, fade } => html! {
            <div class={classes!("tech-grid", fade.then_some("has-fade"))}>
                { for items.iter().map(|item| html! {
                    <div class="tech-tile">{ tech_tile(item, false) }</div>
                }) }
            </div>
        },
    };

    html! {
        <div class="tech-stack">
            <h2 class="section-heading">{"Tech Stack"}</h2>
            { body }
        </div>
    }
}
