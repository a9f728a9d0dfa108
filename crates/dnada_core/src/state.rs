//! crates/dnada_core/src/state.rs
//!
//! The single state object behind the store. Reads go through the getters in
//! `getters.rs`; writes go only through `Mutation`s applied in `mutations.rs`.

use uuid::Uuid;

use crate::domain::{Banner, Design, Experiment, Instruction, Run, UserProfile, Workflow};

/// Whether the session has been confirmed against the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginStatus {
    /// Not checked yet (fresh process).
    #[default]
    Unknown,
    LoggedIn,
    LoggedOut,
}

impl From<bool> for LoginStatus {
    fn from(logged_in: bool) -> Self {
        if logged_in {
            LoginStatus::LoggedIn
        } else {
            LoginStatus::LoggedOut
        }
    }
}

/// Identity of a queued notification; removal matches on this, never on content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationColor {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub content: String,
    pub color: Option<NotificationColor>,
    pub show_progress: bool,
    pub indefinite: bool,
}

impl Notification {
    /// A progress indicator that stays until explicitly removed.
    pub fn loading(content: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            content: content.into(),
            color: None,
            show_progress: true,
            indefinite: true,
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            content: content.into(),
            color: Some(NotificationColor::Success),
            show_progress: false,
            indefinite: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            content: content.into(),
            color: Some(NotificationColor::Error),
            show_progress: false,
            indefinite: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MainState {
    pub(crate) token: String,
    pub(crate) login_status: LoginStatus,
    pub(crate) log_in_error: bool,
    pub(crate) user_profile: Option<UserProfile>,
    pub(crate) users: Vec<UserProfile>,
    pub(crate) experiments: Vec<Experiment>,
    pub(crate) designs: Vec<Design>,
    pub(crate) workflows: Vec<Workflow>,
    /// At most one per experiment.
    pub(crate) active_workflows: Vec<Workflow>,
    /// At most one per workflow after an upsert.
    pub(crate) active_instructions: Vec<Instruction>,
    pub(crate) runs: Vec<Run>,
    pub(crate) dashboard_mini_drawer: bool,
    pub(crate) dashboard_show_drawer: bool,
    pub(crate) dashboard_experiments_drawer: bool,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) banner: Option<Banner>,
}

impl MainState {
    pub fn new() -> Self {
        Self::default()
    }
}
