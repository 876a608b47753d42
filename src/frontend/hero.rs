use std::rc::Rc;

use yew::prelude::*;

use super::{browser, browser::BrowserScheduler, use_performance_mode};
use crate::{
    config::SiteConfig,
    content::{ABOUT, CONNECT_SECTION, HERO_GREETING},
    profile::{Profile, SurfaceProfile},
    typewriter::{Typewriter, TypewriterDriver, TypewriterProfile, TypewriterTiming, CURSOR_GLYPH},
};

#[derive(Properties, PartialEq)]
pub struct TypewriterTextProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub timing: TypewriterTiming,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(TypewriterText)]
pub fn typewriter_text(props: &TypewriterTextProps) -> Html {
    let mode = use_performance_mode();
    let view = {
        let text = props.text.to_string();
        use_state(move || {
            if TypewriterProfile::resolve(mode).animate {
                Typewriter::animated(text)
            } else {
                Typewriter::settled(text)
            }
        })
    };
    let driver = use_mut_ref(|| None::<TypewriterDriver<BrowserScheduler>>);

    {
        let view = view.clone();
        use_effect_with(
            (props.text.clone(), props.timing, mode),
            move |(text, timing, mode)| {
                let sink = view.clone();
                let next = TypewriterDriver::start(
                    text.to_string(),
                    *timing,
                    *mode,
                    BrowserScheduler,
                    move |snapshot| sink.set(snapshot),
                );
                view.set(next.snapshot());
                *driver.borrow_mut() = Some(next);

                move || {
                    driver.borrow_mut().take();
                }
            },
        );
    }

    html! {
        <span class={props.class.clone()} aria-label={props.text.clone()}>
            <span aria-hidden="true">{view.displayed().to_string()}</span>
            if let Some(visible) = view.cursor() {
                <span
                    class={classes!("type-cursor", (!visible).then_some("is-off"))}
                    aria-hidden="true"
                >
                    {CURSOR_GLYPH}
                </span>
            }
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub site: Rc<SiteConfig>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let surface = SurfaceProfile::resolve(use_performance_mode());
    let site = &props.site;

    let on_contact = Callback::from(|_: MouseEvent| browser::scroll_to_section(CONNECT_SECTION));

    html! {
        <div class={classes!(surface.panel_class, "hero-panel", "entrance")} style={surface.entrance_style()}>
            <h1 class="hero-title">
                {HERO_GREETING}
                <TypewriterText
                    text={site.owner_name.clone()}
                    timing={TypewriterTiming::hero()}
                    class="hero-name"
                />
            </h1>
            <h2 class="section-heading">{"About Me"}</h2>
            <p class="hero-about">{ABOUT}</p>
            <div class="hero-actions">
                <a
                    class={classes!("btn", "btn-outline", surface.button_class())}
                    href={site.resume_path.clone()}
                    download={site.resume_filename.clone()}
                >
                    {"Resume"}
                </a>
                <button
                    class={classes!("btn", "btn-solid", surface.button_class())}
                    type="button"
                    onclick={on_contact}
                >
                    {"Get in touch"}
                </button>
            </div>
        </div>
    }
}
