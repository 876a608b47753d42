//! Personal portfolio site: the page state machines, the Yew front end that
//! drives them in the browser, and a small static host.

pub mod carousel;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod marquee;
pub mod mode;
pub mod profile;
pub mod schedule;
pub mod timeline;
pub mod typewriter;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
