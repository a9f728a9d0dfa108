//! crates/dnada_core/src/getters.rs
//!
//! Read accessors over `MainState`. Parameterized lookups return owned copies
//! so callers can't hold references into the store across a commit.

use crate::domain::{Banner, Design, Experiment, Id, Instruction, Run, UserProfile, Workflow};
use crate::state::{LoginStatus, MainState, Notification};

impl MainState {
    /// Active superusers only.
    pub fn has_admin_access(&self) -> bool {
        self.user_profile
            .as_ref()
            .is_some_and(|p| p.is_superuser && p.is_active)
    }

    pub fn login_error(&self) -> bool {
        self.log_in_error
    }

    pub fn dashboard_show_drawer(&self) -> bool {
        self.dashboard_show_drawer
    }

    pub fn dashboard_mini_drawer(&self) -> bool {
        self.dashboard_mini_drawer
    }

    pub fn dashboard_experiments_drawer(&self) -> bool {
        self.dashboard_experiments_drawer
    }

    pub fn user_profile(&self) -> Option<&UserProfile> {
        self.user_profile.as_ref()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn login_status(&self) -> LoginStatus {
        self.login_status
    }

    pub fn is_logged_in(&self) -> bool {
        self.login_status == LoginStatus::LoggedIn
    }

    /// The notification a snackbar should show next.
    pub fn first_notification(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn user(&self, user_id: Id) -> Option<UserProfile> {
        self.users.iter().find(|u| u.id == user_id).cloned()
    }

    pub fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }

    pub fn experiment(&self, experiment_id: Id) -> Option<Experiment> {
        self.experiments
            .iter()
            .find(|e| e.id == experiment_id)
            .cloned()
    }

    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    pub fn design(&self, design_id: Id) -> Option<Design> {
        self.designs.iter().find(|d| d.id == design_id).cloned()
    }

    /// Designs attached to one experiment, in store order.
    pub fn designs_for_experiment(&self, experiment_id: Id) -> Vec<Design> {
        self.designs
            .iter()
            .filter(|d| d.experiment_id == experiment_id)
            .cloned()
            .collect()
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    pub fn workflow(&self, workflow_id: Id) -> Option<Workflow> {
        self.workflows.iter().find(|w| w.id == workflow_id).cloned()
    }

    pub fn active_workflows(&self) -> &[Workflow] {
        &self.active_workflows
    }

    /// The active workflow is looked up by its experiment, not its own id.
    pub fn active_workflow(&self, experiment_id: Id) -> Option<Workflow> {
        self.active_workflows
            .iter()
            .find(|w| w.experiment_id == experiment_id)
            .cloned()
    }

    pub fn active_instructions(&self) -> &[Instruction] {
        &self.active_instructions
    }

    pub fn active_instruction(&self, instruction_id: Id) -> Option<Instruction> {
        self.active_instructions
            .iter()
            .find(|i| i.id == instruction_id)
            .cloned()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn run(&self, run_id: Id) -> Option<Run> {
        self.runs.iter().find(|r| r.id == run_id).cloned()
    }
}
