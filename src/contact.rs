//! Contact form: required-field validation, one fire-and-forget POST to
//! the form service, and a status banner that clears itself.

use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::{
    error::{ContactError, SubmitError, ValidationError},
    schedule::{Scheduler, TaskHandle},
};

pub const STATUS_DISPLAY: Duration = Duration::from_millis(5_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Whitespace-only values count as empty. Reports the first missing
    /// field in form order.
    pub fn validate(&self) -> Result<ContactSubmission, ValidationError> {
        if let Some(field) = ContactField::ALL
            .into_iter()
            .find(|field| self.value(*field).trim().is_empty())
        {
            return Err(ValidationError::MissingField(field));
        }

        Ok(ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }
}

/// Body posted to the form service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Sent,
    Failed,
}

impl SubmitStatus {
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Sent => Some("Thank you for your message! I'll get back to you soon."),
            Self::Failed => Some("Failed to send message. Please try again later."),
            Self::Idle | Self::Submitting => None,
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Submitting => "Sending...",
            _ => "Send Message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactState {
    pub form: ContactForm,
    pub status: SubmitStatus,
    pub validation: Option<ValidationError>,
}

/// Delivers a submission and reports the HTTP status code.
#[allow(async_fn_in_trait)]
pub trait FormTransport {
    async fn post_json(&self, endpoint: &Url, submission: &ContactSubmission)
        -> Result<u16, SubmitError>;
}

struct Core<S> {
    state: RefCell<ContactState>,
    reset: RefCell<Option<TaskHandle>>,
    scheduler: S,
    on_change: Box<dyn Fn(ContactState)>,
}

pub struct ContactDriver<S: Scheduler, T: FormTransport> {
    core: Rc<Core<S>>,
    transport: T,
    endpoint: Result<Url, SubmitError>,
}

impl<S: Scheduler, T: FormTransport> ContactDriver<S, T> {
    pub fn new(
        endpoint: Result<Url, SubmitError>,
        transport: T,
        scheduler: S,
        on_change: impl Fn(ContactState) + 'static,
    ) -> Self {
        Self {
            core: Rc::new(Core {
                state: RefCell::new(ContactState::default()),
                reset: RefCell::new(None),
                scheduler,
                on_change: Box::new(on_change),
            }),
            transport,
            endpoint,
        }
    }

    pub fn snapshot(&self) -> ContactState {
        self.core.state.borrow().clone()
    }

    pub fn update(&self, field: ContactField, value: impl Into<String>) {
        {
            let mut state = self.core.state.borrow_mut();
            state.form.set(field, value);
            if state.validation == Some(ValidationError::MissingField(field)) {
                state.validation = None;
            }
        }
        notify(&self.core);
    }

    /// Validates, posts once, and schedules the status banner to clear
    /// after [`STATUS_DISPLAY`]. Never retries.
    pub async fn submit(&self) -> Result<(), ContactError> {
        let submission = {
            let mut state = self.core.state.borrow_mut();
            if state.status == SubmitStatus::Submitting {
                return Err(ContactError::Busy);
            }

            match state.form.validate() {
                Ok(submission) => {
                    state.validation = None;
                    state.status = SubmitStatus::Submitting;
                    submission
                }
                Err(error) => {
                    state.validation = Some(error);
                    drop(state);
                    notify(&self.core);
                    return Err(error.into());
                }
            }
        };
        // A banner from an earlier attempt must not clear this one.
        self.core.reset.borrow_mut().take();
        notify(&self.core);

        let outcome = match &self.endpoint {
            Ok(endpoint) => match self.transport.post_json(endpoint, &submission).await {
                Ok(status) if (200..300).contains(&status) => Ok(()),
                Ok(status) => Err(SubmitError::Rejected { status }),
                Err(error) => Err(error),
            },
            Err(error) => Err(error.clone()),
        };

        {
            let mut state = self.core.state.borrow_mut();
            match &outcome {
                Ok(()) => {
                    info!("contact message delivered");
                    state.status = SubmitStatus::Sent;
                    state.form = ContactForm::default();
                }
                Err(error) => {
                    warn!(%error, "contact message not delivered");
                    state.status = SubmitStatus::Failed;
                }
            }
        }
        schedule_reset(&self.core);
        notify(&self.core);

        outcome.map_err(ContactError::from)
    }
}

fn schedule_reset<S: Scheduler>(core: &Rc<Core<S>>) {
    let weak = Rc::downgrade(core);
    let handle = core.scheduler.after(STATUS_DISPLAY, move || {
        let Some(core) = weak.upgrade() else {
            return;
        };
        core.state.borrow_mut().status = SubmitStatus::Idle;
        notify(&core);
    });
    *core.reset.borrow_mut() = Some(handle);
}

fn notify<S>(core: &Rc<Core<S>>) {
    let snapshot = core.state.borrow().clone();
    (core.on_change)(snapshot);
}
