//! Browser entry point: the Yew component tree over the core state
//! machines.

mod browser;
mod connect;
mod experience;
mod hero;
mod projects;
mod tech;

use web_sys::window;
use yew::prelude::*;

use crate::{
    config::SiteConfig,
    content::{CONNECT_SECTION, EXPERIENCE_SECTION, HOME_SECTION, NAV_SECTIONS, PROJECTS_SECTION},
    mode::{PerformanceMode, PerformanceStore},
    profile::{BackdropProfile, NavProfile, Profile},
};

use self::{
    connect::Connect, experience::ExperienceTimeline, hero::Hero, projects::Projects,
    tech::TechStack,
};

const SCROLL_TOP_THRESHOLD: f64 = 300.0;

/// Shared performance state. Every component reads the mode from here and
/// the nav toggle flips it through `toggle`.
#[derive(Clone, PartialEq)]
pub struct PerformanceContext {
    pub mode: PerformanceMode,
    pub toggle: Callback<()>,
}

#[hook]
fn use_performance_mode() -> PerformanceMode {
    use_context::<PerformanceContext>()
        .map(|context| context.mode)
        .unwrap_or_default()
}

#[function_component(Backdrop)]
fn backdrop() -> Html {
    let profile = BackdropProfile::resolve(use_performance_mode());

    html! {
        <div class="backdrop" aria-hidden="true">
            { for profile.blobs.iter().map(|blob| html! {
                <div class={blob.class} style={blob.style()} />
            }) }
            <div class="backdrop-veil" style={profile.style()} />
        </div>
    }
}

#[function_component(NavBar)]
fn nav_bar() -> Html {
    let context = use_context::<PerformanceContext>();
    let mode = context.as_ref().map(|c| c.mode).unwrap_or_default();
    let profile = NavProfile::resolve(mode);

    let on_toggle = {
        let toggle = context.map(|c| c.toggle);
        Callback::from(move |_: MouseEvent| {
            if let Some(toggle) = toggle.as_ref() {
                toggle.emit(());
            }
        })
    };

    html! {
        <nav class={profile.bar_class()} style={profile.entrance_style()} aria-label="Sections">
            { for NAV_SECTIONS.iter().map(|section| {
                let id = section.id;
                let onclick = Callback::from(move |_: MouseEvent| browser::scroll_to_section(id));
                html! {
                    <button class="nav-item" type="button" aria-label={section.label} {onclick}>
                        <span class="nav-glyph" aria-hidden="true">{section.glyph}</span>
                        <span class="nav-label">{section.label}</span>
                    </button>
                }
            }) }
            <button
                class={classes!("nav-item", "mode-toggle", (!mode.is_full()).then_some("is-light"))}
                type="button"
                title={mode.toggle_title()}
                aria-pressed={(!mode.is_full()).to_string()}
                onclick={on_toggle}
            >
                <span class="nav-glyph" aria-hidden="true">{"⚡"}</span>
                <span class="nav-label">{mode.label()}</span>
            </button>
        </nav>
    }
}

#[function_component(ScrollTopButton)]
fn scroll_top_button() -> Html {
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let listener =
                browser::listen_scroll(move |offset| visible.set(offset > SCROLL_TOP_THRESHOLD));
            move || drop(listener)
        });
    }

    if !*visible {
        return html! {};
    }

    html! {
        <button
            class="scroll-top"
            type="button"
            aria-label="Scroll to top"
            onclick={Callback::from(|_: MouseEvent| browser::scroll_to_top())}
        >
            {"↑"}
        </button>
    }
}

#[function_component(App)]
fn app() -> Html {
    let store = use_memo((), |_| {
        PerformanceStore::initialize(&browser::device_signals(), browser::LocalStorage)
    });
    let site = use_memo((), |_| SiteConfig::from_build_env());
    let mode = use_state(|| store.mode());

    {
        let store = store.clone();
        let mode = mode.clone();
        use_effect_with((), move |_| {
            browser::apply_mode(store.mode());
            let subscription = store.subscribe(move |next| {
                browser::apply_mode_with_transition(next);
                mode.set(next);
            });
            move || drop(subscription)
        });
    }

    let toggle = {
        let store = store.clone();
        Callback::from(move |_| {
            store.toggle();
        })
    };

    let context = PerformanceContext {
        mode: *mode,
        toggle,
    };

    html! {
        <ContextProvider<PerformanceContext> {context}>
            <a class="skip-link" href={format!("#{HOME_SECTION}")}>{"Skip to main content"}</a>
            <Backdrop />
            <NavBar />
            <main class="page-shell">
                <section id={HOME_SECTION} class="section-block">
                    <Hero site={site.clone()} />
                </section>
                <section id={PROJECTS_SECTION} class="section-block">
                    <Projects />
                </section>
                <section class="section-block" aria-label="Tech stack">
                    <TechStack />
                </section>
                <section id={EXPERIENCE_SECTION} class="section-block">
                    <ExperienceTimeline />
                </section>
                <section id={CONNECT_SECTION} class="section-block">
                    <Connect site={site.clone()} />
                </section>
            </main>
            <ScrollTopButton />
        </ContextProvider<PerformanceContext>>
    }
}

pub fn run() {
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
