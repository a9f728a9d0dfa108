//! crates/dnada_core/src/mutations.rs
//!
//! Synchronous state transitions. Applying a `Mutation` is the only way to
//! change a `MainState`; none of them perform I/O.

use crate::domain::{Banner, Design, Experiment, Id, Instruction, Run, UserProfile, Workflow};
use crate::state::{MainState, Notification, NotificationId};

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetToken(String),
    SetLoggedIn(bool),
    SetLogInError(bool),
    SetUserProfile(UserProfile),
    SetBanner(Banner),
    SetDashboardMiniDrawer(bool),
    SetDashboardShowDrawer(bool),
    SetDashboardShowExperiments(bool),
    AddNotification(Notification),
    RemoveNotification(NotificationId),
    SetUsers(Vec<UserProfile>),
    SetUser(UserProfile),
    SetExperiments(Vec<Experiment>),
    SetExperiment(Experiment),
    DeleteExperiment(Id),
    SetDesigns(Vec<Design>),
    SetDesign(Design),
    DeleteDesign(Id),
    SetWorkflows(Vec<Workflow>),
    SetWorkflow(Workflow),
    DeleteWorkflow(Id),
    SetActiveWorkflows(Vec<Workflow>),
    /// Replaces the active workflow of the same experiment.
    SetActiveWorkflow(Workflow),
    SetRuns(Vec<Run>),
    SetRun(Run),
    SetActiveInstructions(Vec<Instruction>),
    /// Replaces the active instruction of the same workflow.
    SetActiveInstruction(Instruction),
}

impl Mutation {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetToken(_) => "set_token",
            Mutation::SetLoggedIn(_) => "set_logged_in",
            Mutation::SetLogInError(_) => "set_log_in_error",
            Mutation::SetUserProfile(_) => "set_user_profile",
            Mutation::SetBanner(_) => "set_banner",
            Mutation::SetDashboardMiniDrawer(_) => "set_dashboard_mini_drawer",
            Mutation::SetDashboardShowDrawer(_) => "set_dashboard_show_drawer",
            Mutation::SetDashboardShowExperiments(_) => "set_dashboard_show_experiments",
            Mutation::AddNotification(_) => "add_notification",
            Mutation::RemoveNotification(_) => "remove_notification",
            Mutation::SetUsers(_) => "set_users",
            Mutation::SetUser(_) => "set_user",
            Mutation::SetExperiments(_) => "set_experiments",
            Mutation::SetExperiment(_) => "set_experiment",
            Mutation::DeleteExperiment(_) => "delete_experiment",
            Mutation::SetDesigns(_) => "set_designs",
            Mutation::SetDesign(_) => "set_design",
            Mutation::DeleteDesign(_) => "delete_design",
            Mutation::SetWorkflows(_) => "set_workflows",
            Mutation::SetWorkflow(_) => "set_workflow",
            Mutation::DeleteWorkflow(_) => "delete_workflow",
            Mutation::SetActiveWorkflows(_) => "set_active_workflows",
            Mutation::SetActiveWorkflow(_) => "set_active_workflow",
            Mutation::SetRuns(_) => "set_runs",
            Mutation::SetRun(_) => "set_run",
            Mutation::SetActiveInstructions(_) => "set_active_instructions",
            Mutation::SetActiveInstruction(_) => "set_active_instruction",
        }
    }
}

/// Removes every entry sharing `item`'s key, then appends `item`.
fn upsert_by<T, K, F>(items: &mut Vec<T>, item: T, key: F)
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let new_key = key(&item);
    items.retain(|existing| key(existing) != new_key);
    items.push(item);
}

/// Removes the first entry whose key matches; no-op otherwise.
fn remove_by<T, K, F>(items: &mut Vec<T>, target: K, key: F)
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    if let Some(pos) = items.iter().position(|existing| key(existing) == target) {
        items.remove(pos);
    }
}

impl MainState {
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::SetToken(token) => self.token = token,
            Mutation::SetLoggedIn(logged_in) => self.login_status = logged_in.into(),
            Mutation::SetLogInError(flag) => self.log_in_error = flag,
            Mutation::SetUserProfile(profile) => self.user_profile = Some(profile),
            Mutation::SetBanner(banner) => self.banner = Some(banner),
            Mutation::SetDashboardMiniDrawer(flag) => self.dashboard_mini_drawer = flag,
            Mutation::SetDashboardShowDrawer(flag) => self.dashboard_show_drawer = flag,
            Mutation::SetDashboardShowExperiments(flag) => {
                self.dashboard_experiments_drawer = flag
            }
            Mutation::AddNotification(notification) => self.notifications.push(notification),
            Mutation::RemoveNotification(id) => self.notifications.retain(|n| n.id != id),
            Mutation::SetUsers(users) => self.users = users,
            Mutation::SetUser(user) => upsert_by(&mut self.users, user, |u| u.id),
            Mutation::SetExperiments(experiments) => self.experiments = experiments,
            Mutation::SetExperiment(experiment) => {
                upsert_by(&mut self.experiments, experiment, |e| e.id)
            }
            Mutation::DeleteExperiment(id) => remove_by(&mut self.experiments, id, |e| e.id),
            Mutation::SetDesigns(designs) => self.designs = designs,
            Mutation::SetDesign(design) => upsert_by(&mut self.designs, design, |d| d.id),
            Mutation::DeleteDesign(id) => remove_by(&mut self.designs, id, |d| d.id),
            Mutation::SetWorkflows(workflows) => self.workflows = workflows,
            Mutation::SetWorkflow(workflow) => upsert_by(&mut self.workflows, workflow, |w| w.id),
            Mutation::DeleteWorkflow(id) => remove_by(&mut self.workflows, id, |w| w.id),
            Mutation::SetActiveWorkflows(workflows) => self.active_workflows = workflows,
            Mutation::SetActiveWorkflow(workflow) => {
                upsert_by(&mut self.active_workflows, workflow, |w| w.experiment_id)
            }
            Mutation::SetRuns(runs) => self.runs = runs,
            Mutation::SetRun(run) => upsert_by(&mut self.runs, run, |r| r.id),
            Mutation::SetActiveInstructions(instructions) => {
                self.active_instructions = instructions
            }
            Mutation::SetActiveInstruction(instruction) => {
                upsert_by(&mut self.active_instructions, instruction, |i| i.workflow_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LoginStatus;

    fn experiment(id: Id, name: &str) -> Experiment {
        Experiment {
            id,
            owner_id: 1,
            name: name.to_string(),
            description: None,
        }
    }

    fn instruction(id: Id, workflow_id: Id) -> Instruction {
        Instruction {
            id,
            owner_id: 1,
            workflow_id,
            category: "pcr_worksheet".to_string(),
            trial: 1,
            data: String::new(),
        }
    }

    fn workflow(id: Id, experiment_id: Id) -> Workflow {
        Workflow {
            id,
            owner_id: 1,
            experiment_id,
            design_id: 1,
            created_time: "2021-03-04 10:00:00".to_string(),
            resultzip_id: Some(id),
        }
    }

    #[test]
    fn upsert_replaces_entry_with_same_id() {
        let mut state = MainState::new();
        state.apply(Mutation::SetExperiments(vec![
            experiment(1, "a"),
            experiment(2, "b"),
            experiment(3, "c"),
        ]));

        state.apply(Mutation::SetExperiment(experiment(2, "renamed")));

        assert_eq!(state.experiments.len(), 3);
        let twos: Vec<_> = state.experiments.iter().filter(|e| e.id == 2).collect();
        assert_eq!(twos.len(), 1);
        assert_eq!(twos[0].name, "renamed");
    }

    #[test]
    fn upsert_appends_unknown_id() {
        let mut state = MainState::new();
        state.apply(Mutation::SetExperiment(experiment(1, "a")));
        state.apply(Mutation::SetExperiment(experiment(7, "b")));

        let ids: Vec<_> = state.experiments.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 7]);
    }

    #[test]
    fn delete_removes_only_matching_entry() {
        let mut state = MainState::new();
        state.apply(Mutation::SetExperiments(vec![
            experiment(1, "a"),
            experiment(2, "b"),
            experiment(3, "c"),
        ]));

        state.apply(Mutation::DeleteExperiment(2));
        let ids: Vec<_> = state.experiments.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);

        state.apply(Mutation::DeleteExperiment(42));
        assert_eq!(state.experiments.len(), 2);
    }

    #[test]
    fn delete_removes_at_most_one_duplicate() {
        let mut state = MainState::new();
        state.apply(Mutation::SetExperiments(vec![experiment(5, "x"), experiment(5, "y")]));

        state.apply(Mutation::DeleteExperiment(5));

        assert_eq!(state.experiments.len(), 1);
        assert_eq!(state.experiments[0].name, "y");
    }

    #[test]
    fn active_instruction_upsert_is_keyed_by_workflow() {
        let mut state = MainState::new();
        state.apply(Mutation::SetActiveInstructions(vec![
            instruction(10, 5),
            instruction(11, 6),
        ]));

        state.apply(Mutation::SetActiveInstruction(instruction(12, 5)));

        let for_five: Vec<_> = state
            .active_instructions
            .iter()
            .filter(|i| i.workflow_id == 5)
            .collect();
        assert_eq!(for_five.len(), 1);
        assert_eq!(for_five[0].id, 12);
        assert!(state.active_instructions.iter().any(|i| i.id == 11));
    }

    #[test]
    fn active_workflow_upsert_is_keyed_by_experiment() {
        let mut state = MainState::new();
        state.apply(Mutation::SetActiveWorkflow(workflow(1, 100)));
        state.apply(Mutation::SetActiveWorkflow(workflow(2, 200)));
        state.apply(Mutation::SetActiveWorkflow(workflow(3, 100)));

        assert_eq!(state.active_workflows.len(), 2);
        let ids: Vec<_> = state.active_workflows.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn notification_push_pop_restores_depth() {
        let mut state = MainState::new();
        state.apply(Mutation::AddNotification(Notification::success("kept")));
        let before = state.notifications.len();

        let loading: Vec<_> = (0..4).map(|i| Notification::loading(format!("job {i}"))).collect();
        for n in &loading {
            state.apply(Mutation::AddNotification(n.clone()));
        }
        for idx in [2, 0, 3, 1] {
            state.apply(Mutation::RemoveNotification(loading[idx].id));
        }

        assert_eq!(state.notifications.len(), before);
        assert_eq!(state.notifications[0].content, "kept");
    }

    #[test]
    fn removal_is_by_identity_not_content() {
        let mut state = MainState::new();
        let first = Notification::loading("Saving");
        let second = Notification::loading("Saving");
        state.apply(Mutation::AddNotification(first.clone()));
        state.apply(Mutation::AddNotification(second.clone()));

        state.apply(Mutation::RemoveNotification(first.id));

        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].id, second.id);
    }

    #[test]
    fn logged_in_flag_maps_to_status() {
        let mut state = MainState::new();
        assert_eq!(state.login_status, LoginStatus::Unknown);
        state.apply(Mutation::SetLoggedIn(true));
        assert_eq!(state.login_status, LoginStatus::LoggedIn);
        state.apply(Mutation::SetLoggedIn(false));
        assert_eq!(state.login_status, LoginStatus::LoggedOut);
    }
}
