//! Browser bindings for the core state machines: storage, timers, fetch,
//! scrolling and the root `data-performance` attribute.

use std::time::Duration;

use gloo_net::http::Request;
use js_sys::{Function, Reflect};
use url::Url;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Storage};

use crate::{
    contact::{ContactSubmission, FormTransport},
    error::{StorageError, SubmitError},
    mode::{DeviceSignals, ModeStorage, PerformanceMode},
    schedule::{Scheduler, TaskHandle},
};

const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;
const MODE_ATTRIBUTE: &str = "data-performance";

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `window.localStorage`, looked up on every access so a storage that
/// disappears mid-session just starts failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl ModeStorage for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|error| StorageError::Read(describe(&error)))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|error| StorageError::Write(describe(&error)))
    }
}

pub fn device_signals() -> DeviceSignals {
    let Some(win) = window() else {
        return DeviceSignals {
            viewport_width: FALLBACK_VIEWPORT_WIDTH,
            user_agent: String::new(),
        };
    };

    let viewport_width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH);
    let user_agent = win.navigator().user_agent().unwrap_or_default();

    DeviceSignals {
        viewport_width,
        user_agent,
    }
}

pub fn apply_mode(mode: PerformanceMode) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute(MODE_ATTRIBUTE, mode.as_str());
        }
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Swaps the root attribute inside a View Transition when the browser has
/// one and the visitor allows motion; otherwise swaps it directly.
pub fn apply_mode_with_transition(mode: PerformanceMode) {
    if prefers_reduced_motion() || !mode.is_full() {
        apply_mode(mode);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_mode(mode);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_mode(mode);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_mode(mode);
        return;
    };

    let callback = Closure::once_into_js(move || apply_mode(mode));

    if start_view_transition
        .call1(&document_js, &callback)
        .is_err()
    {
        apply_mode(mode);
    }
}

pub fn scroll_to_section(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn scroll_to_top() {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

/// Window scroll subscription; removed from the window when dropped.
pub struct ScrollListener {
    callback: Closure<dyn FnMut()>,
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win
                .remove_event_listener_with_callback("scroll", self.callback.as_ref().unchecked_ref());
        }
    }
}

pub fn listen_scroll(mut on_scroll: impl FnMut(f64) + 'static) -> Option<ScrollListener> {
    let win = window()?;
    let callback = Closure::<dyn FnMut()>::new(move || {
        let offset = window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0);
        on_scroll(offset);
    });

    win.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
        .ok()?;
    Some(ScrollListener { callback })
}

fn timer_millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

/// `setTimeout` / `setInterval` on the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn after<F>(&self, delay: Duration, task: F) -> TaskHandle
    where
        F: FnOnce() + 'static,
    {
        let Some(win) = window() else {
            return TaskHandle::detached();
        };

        let callback = Closure::once(task);
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timer_millis(delay),
        ) {
            Ok(id) => TaskHandle::new(move || {
                if let Some(win) = window() {
                    win.clear_timeout_with_handle(id);
                }
                drop(callback);
            }),
            Err(_) => TaskHandle::detached(),
        }
    }

    fn every<F>(&self, period: Duration, task: F) -> TaskHandle
    where
        F: FnMut() + 'static,
    {
        let Some(win) = window() else {
            return TaskHandle::detached();
        };

        let callback = Closure::<dyn FnMut()>::new(task);
        match win.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timer_millis(period),
        ) {
            Ok(id) => TaskHandle::new(move || {
                if let Some(win) = window() {
                    win.clear_interval_with_handle(id);
                }
                drop(callback);
            }),
            Err(_) => TaskHandle::detached(),
        }
    }
}

/// JSON POST through `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl FormTransport for FetchTransport {
    async fn post_json(
        &self,
        endpoint: &Url,
        submission: &ContactSubmission,
    ) -> Result<u16, SubmitError> {
        let request = Request::post(endpoint.as_str())
            .header("Accept", "application/json")
            .json(submission)
            .map_err(|error| SubmitError::Network(error.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|error| SubmitError::Network(error.to_string()))?;

        Ok(response.status())
    }
}
