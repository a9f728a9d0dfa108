//! services/client/src/store/actions/mod.rs
//!
//! Asynchronous orchestration on top of the store. An action calls the
//! backend through the `LabApi` port, commits the result, keeps the user
//! informed with notifications and hands failures to the `ErrorInspector`.
//! Actions never return errors: a failed action leaves an error notification
//! behind and returns `None` (or `false`).

mod experiments;
mod session;
mod standalone;
mod workflows;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dnada_core::ports::{LabApi, Navigator, PortError, PortResult, TokenStorage};
use dnada_core::{Id, Mutation, Notification, NotificationId};
use dnada_core::{DesignUpdate, ExperimentUpdate, UserProfileUpdate};
use tracing::{debug, error};

use super::progress::with_minimum_duration;
use super::Store;
use crate::inspector::{ErrorInspector, Reaction};

//=========================================================================================
// Action Payloads
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExperiment {
    pub experiment_id: Id,
    pub changes: ExperimentUpdate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDesign {
    pub design_id: Id,
    pub changes: DesignUpdate,
}

/// Admin edit of another user's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUser {
    pub user_id: Id,
    pub changes: UserProfileUpdate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatePcrTrials {
    pub workflow_id: Id,
    pub plating_scheme: String,
}

//=========================================================================================
// Notification Choreography
//=========================================================================================

/// The notification texts of one tracked action.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Feedback {
    /// Name reported to the inspector and in logs.
    pub action: &'static str,
    pub loading: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
    /// Status-specific failure messages, checked before `failure`.
    pub by_status: &'static [(u16, &'static str)],
}

impl Feedback {
    pub(crate) const fn new(
        action: &'static str,
        loading: &'static str,
        success: &'static str,
        failure: &'static str,
    ) -> Self {
        Self {
            action,
            loading,
            success,
            failure,
            by_status: &[],
        }
    }

    pub(crate) const fn with_statuses(self, by_status: &'static [(u16, &'static str)]) -> Self {
        Self { by_status, ..self }
    }

    fn failure_message(&self, error: &PortError) -> &'static str {
        error
            .status()
            .and_then(|status| {
                self.by_status
                    .iter()
                    .find(|(code, _)| *code == status)
                    .map(|(_, message)| *message)
            })
            .unwrap_or(self.failure)
    }
}

/// Shown when a J5 backed job is rejected for bad J5 credentials.
pub(crate) const J5_CREDENTIALS: &[(u16, &str)] = &[(403, "Invalid J5 Username or Password")];

/// Whether the loading indicator waits for the minimum display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pacing {
    Padded,
    Immediate,
}

//=========================================================================================
// The Actions Handle
//=========================================================================================

/// Every action the host UI can dispatch. Cheap to clone.
#[derive(Clone)]
pub struct Actions {
    store: Store,
    api: Arc<dyn LabApi>,
    tokens: Arc<dyn TokenStorage>,
    navigator: Arc<dyn Navigator>,
    inspector: ErrorInspector,
    min_loading: Duration,
}

impl Actions {
    pub fn new(
        store: Store,
        api: Arc<dyn LabApi>,
        tokens: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
        inspector: ErrorInspector,
        min_loading: Duration,
    ) -> Self {
        Self {
            store,
            api,
            tokens,
            navigator,
            inspector,
            min_loading,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    fn token(&self) -> String {
        self.store.read(|state| state.token().to_string())
    }

    fn notify(&self, notification: Notification) -> NotificationId {
        let id = notification.id;
        self.store.commit(Mutation::AddNotification(notification));
        id
    }

    /// Pops the notification `id` after `timeout`.
    pub async fn remove_notification_after(&self, id: NotificationId, timeout: Duration) {
        tokio::time::sleep(timeout).await;
        self.store.commit(Mutation::RemoveNotification(id));
    }

    /// Runs `call` behind a loading notification.
    ///
    /// On success the mutations built by `commit` are applied before the
    /// loading notification is replaced by the success one. On failure the
    /// loading notification is replaced by an error one and the error goes
    /// to the inspector.
    pub(crate) async fn tracked<T, Fut, C>(
        &self,
        feedback: Feedback,
        pacing: Pacing,
        call: Fut,
        commit: C,
    ) -> Option<T>
    where
        Fut: Future<Output = PortResult<T>>,
        C: FnOnce(&T) -> Vec<Mutation>,
    {
        let loading = self.notify(Notification::loading(feedback.loading));

        let result = match pacing {
            Pacing::Padded => with_minimum_duration(self.min_loading, call).await,
            Pacing::Immediate => call.await,
        };

        match result {
            Ok(value) => {
                for mutation in commit(&value) {
                    self.store.commit(mutation);
                }
                self.store.commit(Mutation::RemoveNotification(loading));
                self.notify(Notification::success(feedback.success));
                debug!(action = feedback.action, "Action succeeded");
                Some(value)
            }
            Err(err) => {
                self.store.commit(Mutation::RemoveNotification(loading));
                self.notify(Notification::error(feedback.failure_message(&err)));
                self.check_api_error(feedback.action, &err).await;
                None
            }
        }
    }

    /// The quiet path for reads: no notifications, failures only go to the inspector.
    pub(crate) async fn fetched<T>(&self, action: &'static str, result: PortResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.check_api_error(action, &err).await;
                None
            }
        }
    }

    /// The shared failure funnel.
    pub(crate) async fn check_api_error(&self, action: &str, err: &PortError) {
        error!(action, status = ?err.status(), error = %err, "Action failed");
        if self.inspector.inspect(action, err) == Reaction::ForceLogout {
            self.log_out().await;
        }
    }
}
