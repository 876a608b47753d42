use std::rc::Rc;

use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::{html::TargetCast, prelude::*};

use super::{
    browser::{BrowserScheduler, FetchTransport},
    use_performance_mode,
};
use crate::{
    config::SiteConfig,
    contact::{ContactDriver, ContactField, ContactState, SubmitStatus},
    content::SOCIAL_LINKS,
    profile::{ConnectProfile, Profile, SurfaceProfile},
};

type FormDriver = ContactDriver<BrowserScheduler, FetchTransport>;

fn input_handler(driver: &Rc<FormDriver>, field: ContactField) -> Callback<InputEvent> {
    let driver = driver.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        driver.update(field, input.value());
    })
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub site: Rc<SiteConfig>,
}

#[function_component(ContactFormPanel)]
fn contact_form_panel(props: &ContactFormProps) -> Html {
    let surface = SurfaceProfile::resolve(use_performance_mode());
    let state = use_state(ContactState::default);

    let driver = {
        let state = state.clone();
        let site = props.site.clone();
        use_memo((), move |_| {
            ContactDriver::new(site.form_url(), FetchTransport, BrowserScheduler, move |snapshot| {
                state.set(snapshot)
            })
        })
    };

    let on_message = {
        let driver = driver.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            driver.update(ContactField::Message, input.value());
        })
    };

    let on_submit = {
        let driver = driver.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let driver = driver.clone();
            spawn_local(async move {
                if let Err(error) = driver.submit().await {
                    debug!(%error, "contact submission ended without delivery");
                }
            });
        })
    };

    let submitting = state.status == SubmitStatus::Submitting;

    html! {
        <form class="contact-form" novalidate={true} onsubmit={on_submit}>
            <label class="field">
                <span>{"Name"}</span>
                <input
                    type="text"
                    name="name"
                    value={state.form.name.clone()}
                    oninput={input_handler(&driver, ContactField::Name)}
                />
            </label>
            <label class="field">
                <span>{"Email"}</span>
                <input
                    type="email"
                    name="email"
                    value={state.form.email.clone()}
                    oninput={input_handler(&driver, ContactField::Email)}
                />
            </label>
            <label class="field">
                <span>{"Message"}</span>
                <textarea
                    name="message"
                    rows="5"
                    value={state.form.message.clone()}
                    oninput={on_message}
                />
            </label>
            if let Some(error) = state.validation {
                <p class="form-error" role="alert">{error.to_string()}</p>
            }
            <button
                class={classes!("btn", "btn-solid", surface.button_class())}
                type="submit"
                disabled={submitting}
            >
                {state.status.button_label()}
            </button>
            if let Some(message) = state.status.message() {
                <p
                    class={classes!("form-status", (state.status == SubmitStatus::Failed).then_some("is-error"))}
                    role="status"
                >
                    {message}
                </p>
            }
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConnectProps {
    pub site: Rc<SiteConfig>,
}

#[function_component(Connect)]
pub fn connect(props: &ConnectProps) -> Html {
    let profile = ConnectProfile::resolve(use_performance_mode());

    html! {
        <div class={classes!(profile.panel_class, "connect-panel")}>
            <h2 class="section-heading">{"Let's Connect"}</h2>
            <div class="connect-layout">
                <ul class="social-grid">
                    { for SOCIAL_LINKS.iter().enumerate().map(|(position, link)| html! {
                        <li key={link.name}>
                            <a
                                class={profile.tile_class()}
                                style={profile.tile_style(position, link.accent)}
                                href={link.url}
                                target="_blank"
                                rel="noopener noreferrer"
                                aria-label={link.name}
                            >
                                <span class="social-glyph" aria-hidden="true">{link.glyph}</span>
                                <span class="social-name">{link.name}</span>
                            </a>
                        </li>
                    }) }
                </ul>
                <ContactFormPanel site={props.site.clone()} />
            </div>
        </div>
    }
}
