use yew::prelude::*;

use super::use_performance_mode;
use crate::{
    content::{ExperienceId, EXPERIENCE},
    profile::{Profile, SurfaceProfile},
    timeline::{Accordion, TimelineProfile},
};

fn detail_list(heading: &'static str, entries: &'static [&'static str]) -> Html {
    if entries.is_empty() {
        return html! {};
    }

    html! {
        <div class="timeline-detail">
            <h4>{heading}</h4>
            <ul>
                { for entries.iter().map(|entry| html! { <li>{*entry}</li> }) }
            </ul>
        </div>
    }
}

#[function_component(ExperienceTimeline)]
pub fn experience_timeline() -> Html {
    let mode = use_performance_mode();
    let profile = TimelineProfile::resolve(mode);
    let surface = SurfaceProfile::resolve(mode);
    let accordion = use_state(Accordion::<ExperienceId>::new);

    let last = EXPERIENCE.len().saturating_sub(1);

    html! {
        <div class={classes!(surface.panel_class, "timeline-panel")}>
            <h2 class="section-heading">{"Experience"}</h2>
            <ol class="timeline">
                { for EXPERIENCE.iter().enumerate().map(|(position, entry)| {
                    let expanded = accordion.is_expanded(entry.id);
                    let toggle = {
                        let accordion = accordion.clone();
                        let id = entry.id;
                        Callback::from(move |event: MouseEvent| {
                            event.stop_propagation();
                            let mut next = *accordion;
                            next.toggle(id);
                            accordion.set(next);
                        })
                    };

                    html! {
                        <li class="timeline-entry" key={entry.id.0}>
                            <span class="timeline-marker" aria-hidden="true" />
                            if position < last {
                                <span class="timeline-connector" aria-hidden="true" />
                            }
                            <div class={profile.card_class(expanded)} onclick={toggle.clone()}>
                                <h3>{entry.role}</h3>
                                <p class="timeline-company">{entry.company}</p>
                                <p class="muted">{entry.duration}</p>
                                <div
                                    class="timeline-body"
                                    style={profile.body_style(expanded)}
                                    aria-hidden={(!expanded).to_string()}
                                >
                                    { detail_list("Responsibilities", entry.responsibilities) }
                                    { detail_list("Projects", entry.projects) }
                                    { detail_list("Technologies", entry.technologies) }
                                </div>
                                <button
                                    class={classes!("link-button", surface.button_class())}
                                    type="button"
                                    aria-expanded={expanded.to_string()}
                                    onclick={toggle}
                                >
                                    {TimelineProfile::toggle_label(expanded)}
                                </button>
                            </div>
                        </li>
                    }
                }) }
            </ol>
        </div>
    }
}
