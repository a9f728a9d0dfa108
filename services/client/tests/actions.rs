//! End-to-end action scenarios against a mocked backend.

use std::sync::Arc;
use std::time::Duration;

use client_lib::adapters::{HttpLabApi, MemoryTokenStorage};
use client_lib::config::Config;
use client_lib::{
    ClientApp, ConsolidatePcrTrials, ErrorInspector, LogoutOnUnauthorized, UpdateDesign,
    UpdateExperiment,
};
use dnada_core::ports::{Navigator, TokenStorage};
use dnada_core::{
    AutomateSettings, Design, DesignUpdate, Experiment, ExperimentUpdate, LoginStatus, MainState,
    Mutation, NotificationColor, UploadForm,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    app: ClientApp,
    tokens: Arc<MemoryTokenStorage>,
}

impl Harness {
    async fn start(inspector: ErrorInspector, tokens: MemoryTokenStorage) -> Self {
        Self::with_min_loading(inspector, tokens, 5).await
    }

    async fn with_min_loading(
        inspector: ErrorInspector,
        tokens: MemoryTokenStorage,
        min_loading_ms: u64,
    ) -> Self {
        let server = MockServer::start().await;
        let uri = server.uri();
        let config = Config::from_lookup(|key| match key {
            "API_URL" => Some(uri.clone()),
            "MIN_LOADING_MS" => Some(min_loading_ms.to_string()),
            _ => None,
        })
        .unwrap();

        let api = Arc::new(HttpLabApi::new(
            reqwest::Client::new(),
            config.api_base(),
            config.list_limit,
        ));
        let tokens = Arc::new(tokens);
        let app = ClientApp::with_parts(config, api, tokens.clone(), inspector).unwrap();

        Self { server, app, tokens }
    }

    async fn default() -> Self {
        Self::start(ErrorInspector::new(), MemoryTokenStorage::new()).await
    }

    /// Puts the store into an authenticated session without calling the backend.
    fn sign_in(&self, token: &str) {
        self.app.store.commit(Mutation::SetToken(token.to_string()));
        self.app.store.commit(Mutation::SetLoggedIn(true));
    }

    fn state(&self) -> MainState {
        self.app.store.snapshot()
    }
}

fn profile_json() -> Value {
    json!({
        "id": 1,
        "email": "ada@lab.example.org",
        "full_name": "Ada",
        "is_active": true,
        "is_superuser": false
    })
}

fn experiment(id: i64) -> Experiment {
    Experiment {
        id,
        owner_id: 1,
        name: format!("exp {id}"),
        description: None,
    }
}

fn experiment_json(id: i64) -> Value {
    serde_json::to_value(experiment(id)).unwrap()
}

fn design(id: i64, name: &str) -> Design {
    Design {
        id,
        owner_id: 1,
        experiment_id: 7,
        name: name.to_string(),
        description: None,
        zip_file_name: "design.zip".to_string(),
        condensed: false,
    }
}

fn run_json(id: i64, run_type: &str) -> Value {
    json!({
        "id": id, "owner_id": 1, "instruction_id": 3, "date": "2024-03-02",
        "instrument": "zag", "raw_data": "data", "run_type": run_type
    })
}

fn plate_form() -> UploadForm {
    UploadForm::new().file("file", "plate.csv", b"A1,B1".to_vec())
}

fn notification_texts(state: &MainState) -> Vec<String> {
    state
        .notifications()
        .iter()
        .map(|n| n.content.clone())
        .collect()
}

fn has_loading(state: &MainState) -> bool {
    state.notifications().iter().any(|n| n.show_progress)
}

//=========================================================================================
// Session
//=========================================================================================

#[tokio::test]
async fn login_with_valid_credentials_opens_the_session() {
    let h = Harness::default().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "jwt-1", "token_type": "bearer"})),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .mount(&h.server)
        .await;

    assert!(h.app.actions.log_in("ada", "pw").await);

    let state = h.state();
    assert_eq!(h.tokens.load().unwrap().as_deref(), Some("jwt-1"));
    assert_eq!(state.token(), "jwt-1");
    assert_eq!(state.login_status(), LoginStatus::LoggedIn);
    assert!(!state.login_error());
    assert_eq!(
        state.user_profile().map(|p| p.email.as_str()),
        Some("ada@lab.example.org")
    );
    assert_eq!(h.app.navigator.current_path(), "/main");
    assert_eq!(notification_texts(&state), vec!["Logged in"]);
}

#[tokio::test]
async fn login_with_an_empty_token_logs_out_and_flags_the_error() {
    let h = Harness::start(ErrorInspector::new(), MemoryTokenStorage::with_token("stale")).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "", "token_type": "bearer"})),
        )
        .mount(&h.server)
        .await;

    assert!(!h.app.actions.log_in("ada", "wrong").await);

    let state = h.state();
    assert_eq!(h.tokens.load().unwrap(), None);
    assert_eq!(state.token(), "");
    assert_eq!(state.login_status(), LoginStatus::LoggedOut);
    assert!(state.login_error());
    assert_eq!(h.app.navigator.current_path(), "/login");
}

#[tokio::test]
async fn rejected_login_logs_out_and_flags_the_error() {
    let h = Harness::default().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Incorrect email or password"})))
        .mount(&h.server)
        .await;

    assert!(!h.app.actions.log_in("ada", "wrong").await);

    let state = h.state();
    assert!(state.login_error());
    assert!(!state.is_logged_in());
}

#[tokio::test]
async fn login_fails_when_the_profile_fetch_ends_the_session() {
    let inspector = ErrorInspector::new().with(LogoutOnUnauthorized);
    let h = Harness::start(inspector, MemoryTokenStorage::new()).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "jwt-2", "token_type": "bearer"})),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    assert!(!h.app.actions.log_in("ada", "pw").await);

    let state = h.state();
    assert_eq!(state.login_status(), LoginStatus::LoggedOut);
    assert_eq!(state.token(), "");
    assert_eq!(h.tokens.load().unwrap(), None);
    assert_eq!(h.app.navigator.current_path(), "/login");
    assert!(!notification_texts(&state).contains(&"Logged in".to_string()));
}

#[tokio::test]
async fn stored_token_restores_the_session_without_logging_in_again() {
    let h =
        Harness::start(ErrorInspector::new(), MemoryTokenStorage::with_token("persisted")).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login/access-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
        .expect(1)
        .mount(&h.server)
        .await;

    h.app.actions.check_logged_in().await;

    let state = h.state();
    assert_eq!(state.login_status(), LoginStatus::LoggedIn);
    assert_eq!(state.token(), "persisted");
    assert!(state.user_profile().is_some());
}

#[tokio::test]
async fn expired_stored_token_ends_the_session() {
    let h = Harness::start(ErrorInspector::new(), MemoryTokenStorage::with_token("expired")).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    h.app.actions.check_logged_in().await;

    let state = h.state();
    assert_eq!(state.login_status(), LoginStatus::LoggedOut);
    assert_eq!(state.token(), "");
    assert_eq!(h.tokens.load().unwrap(), None);
}

#[tokio::test]
async fn without_any_token_the_session_is_logged_out() {
    let h = Harness::default().await;

    h.app.actions.check_logged_in().await;

    assert_eq!(h.state().login_status(), LoginStatus::LoggedOut);
}

#[tokio::test]
async fn user_logout_notifies_and_routes_to_login() {
    let h = Harness::default().await;
    h.sign_in("tok");
    h.app.navigator.push("/main/dashboard").unwrap();

    h.app.actions.user_log_out().await;

    let state = h.state();
    assert!(!state.is_logged_in());
    assert_eq!(h.app.navigator.current_path(), "/login");
    assert_eq!(notification_texts(&state), vec!["Logged out"]);
}

//=========================================================================================
// Notification choreography
//=========================================================================================

#[tokio::test]
async fn deleting_an_experiment_removes_exactly_that_entry() {
    let h = Harness::default().await;
    h.sign_in("tok");
    h.app.store.commit(Mutation::SetExperiments(vec![
        experiment(1),
        experiment(2),
        experiment(3),
    ]));
    Mock::given(method("DELETE"))
        .and(path("/api/v1/experiments/2"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(experiment_json(2)))
        .expect(1)
        .mount(&h.server)
        .await;

    let deleted = h.app.actions.delete_experiment(2).await;

    assert_eq!(deleted.map(|e| e.id), Some(2));
    let state = h.state();
    let ids: Vec<i64> = state.experiments().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(notification_texts(&state), vec!["Experiment successfully deleted"]);
    assert!(!has_loading(&state));
}

#[tokio::test]
async fn failed_update_replaces_loading_with_an_error() {
    let h = Harness::default().await;
    h.sign_in("tok");
    h.app.store.commit(Mutation::SetExperiments(vec![experiment(1)]));
    Mock::given(method("PUT"))
        .and(path("/api/v1/experiments/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&h.server)
        .await;

    let updated = h
        .app
        .actions
        .update_experiment(UpdateExperiment {
            experiment_id: 1,
            changes: ExperimentUpdate {
                name: Some("renamed".into()),
                description: None,
            },
        })
        .await;

    assert!(updated.is_none());
    let state = h.state();
    assert!(!has_loading(&state));
    assert_eq!(notification_texts(&state), vec!["Error Updating Experiment"]);
    assert_eq!(
        state.notifications()[0].color,
        Some(NotificationColor::Error)
    );
    assert_eq!(state.experiments()[0].name, "exp 1");
}

#[tokio::test]
async fn loading_notification_is_visible_while_the_request_runs() {
    let h = Harness::default().await;
    h.sign_in("tok");
    Mock::given(method("POST"))
        .and(path("/api/v1/experiments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(experiment_json(9))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&h.server)
        .await;

    let observe = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        h.state()
    };
    let (created, during) = tokio::join!(
        h.app.actions.create_experiment(dnada_core::ExperimentCreate {
            name: "exp 9".into(),
            description: "new".into(),
        }),
        observe
    );

    assert_eq!(created.map(|e| e.id), Some(9));
    assert_eq!(notification_texts(&during), vec!["Saving"]);
    assert!(during.notifications()[0].show_progress);
    assert!(during.notifications()[0].indefinite);

    let after = h.state();
    assert_eq!(notification_texts(&after), vec!["Experiment successfully created"]);
    assert_eq!(after.experiment(9).map(|e| e.id), Some(9));
}

#[tokio::test]
async fn rejected_j5_credentials_get_a_specific_message() {
    let h = Harness::default().await;
    h.sign_in("tok");
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;

    let workflow = h
        .app
        .actions
        .execute_automation(AutomateSettings { experiment_id: 4 })
        .await;

    assert!(workflow.is_none());
    assert_eq!(
        notification_texts(&h.state()),
        vec!["Invalid J5 Username or Password"]
    );
}

#[tokio::test]
async fn automation_marks_the_workflow_active_for_its_experiment() {
    let h = Harness::default().await;
    h.sign_in("tok");
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "owner_id": 1, "experiment_id": 4, "design_id": 2,
            "created_time": "2024-03-01T10:00:00", "resultzip_id": null
        })))
        .mount(&h.server)
        .await;

    h.app
        .actions
        .execute_automation(AutomateSettings { experiment_id: 4 })
        .await
        .unwrap();

    let state = h.state();
    assert_eq!(state.workflow(11).map(|w| w.design_id), Some(2));
    assert_eq!(state.active_workflow(4).map(|w| w.id), Some(11));
    assert_eq!(
        notification_texts(&state),
        vec!["Downstream automation successful"]
    );
}

#[tokio::test]
async fn consolidation_without_results_explains_itself() {
    let h = Harness::default().await;
    h.sign_in("tok");
    Mock::given(method("POST"))
        .and(path("/api/v1/workflow/5/consolidatepcrs"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&h.server)
        .await;

    let download = h
        .app
        .actions
        .consolidate_pcr_trials(ConsolidatePcrTrials {
            workflow_id: 5,
            plating_scheme: "by_column".into(),
        })
        .await;

    assert!(download.is_none());
    let state = h.state();
    assert!(!has_loading(&state));
    assert_eq!(
        notification_texts(&state),
        vec!["Error: please report pcr results"]
    );
}

#[tokio::test]
async fn pcr_instructions_replace_the_active_set() {
    let h = Harness::default().await;
    h.sign_in("tok");
    Mock::given(method("GET"))
        .and(path("/api/v1/instructions/pcr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "owner_id": 1, "workflow_id": 5, "category": "pcr", "trial": 1, "data": "a"},
            {"id": 2, "owner_id": 1, "workflow_id": 6, "category": "pcr", "trial": 1, "data": "b"}
        ])))
        .mount(&h.server)
        .await;

    let instructions = h.app.actions.get_pcr_instructions(5).await.unwrap();

    assert_eq!(instructions.len(), 2);
    assert_eq!(h.state().active_instructions().len(), 2);
    // Reads stay quiet.
    assert!(h.state().notifications().is_empty());
}

//=========================================================================================
// Designs & runs
//=========================================================================================

#[tokio::test]
async fn design_update_and_delete_keep_the_cache_in_step() {
    let h = Harness::default().await;
    h.sign_in("tok");
    h.app.store.commit(Mutation::SetDesigns(vec![
        design(1, "first"),
        design(2, "second"),
    ]));
    let mut renamed = serde_json::to_value(design(2, "renamed")).unwrap();
    renamed["description"] = json!("golden gate");
    Mock::given(method("PUT"))
        .and(path("/api/v1/designs/2"))
        .and(body_string_contains("renamed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(renamed))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/designs/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(design(1, "first")))
        .expect(1)
        .mount(&h.server)
        .await;

    h.app
        .actions
        .update_design(UpdateDesign {
            design_id: 2,
            changes: DesignUpdate {
                name: Some("renamed".into()),
                ..DesignUpdate::default()
            },
        })
        .await
        .unwrap();
    h.app.actions.delete_design(1).await.unwrap();

    let state = h.state();
    let names: Vec<&str> = state.designs().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["renamed"]);
    assert_eq!(
        state.design(2).and_then(|d| d.description),
        Some("golden gate".to_string())
    );
    assert_eq!(
        notification_texts(&state),
        vec!["Design successfully updated", "Design successfully deleted"]
    );
}

#[tokio::test]
async fn reported_runs_are_upserted_into_the_cache() {
    let h = Harness::default().await;
    h.sign_in("tok");
    let mut stale: dnada_core::Run = serde_json::from_value(run_json(8, "pcr")).unwrap();
    stale.raw_data = "old".into();
    h.app.store.commit(Mutation::SetRuns(vec![stale]));
    Mock::given(method("POST"))
        .and(path("/api/v1/runs/pcr"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_json(8, "pcr")))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/runs/sequencing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_json(9, "sequencing")))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/runs/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_json(10, "assembly")))
        .expect(1)
        .mount(&h.server)
        .await;

    h.app.actions.analyze_pcrs(plate_form()).await.unwrap();
    h.app
        .actions
        .report_sequencing_results(plate_form())
        .await
        .unwrap();
    h.app.actions.get_run(10).await.unwrap();

    let state = h.state();
    let ids: Vec<i64> = state.runs().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![8, 9, 10]);
    assert_eq!(state.run(8).map(|r| r.raw_data), Some("data".to_string()));
    assert_eq!(
        notification_texts(&state),
        vec![
            "ZAG data successfully analyzed",
            "Sequencing results successfully reported"
        ]
    );
}

//=========================================================================================
// Downloads & standalone tools
//=========================================================================================

#[tokio::test]
async fn missing_possible_assembly_explains_itself() {
    let h = Harness::default().await;
    h.sign_in("tok");
    Mock::given(method("GET"))
        .and(path("/api/v1/workflow/5/possibleassembly"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&h.server)
        .await;

    assert!(h.app.actions.get_possible_assembly(5).await.is_none());

    let state = h.state();
    assert!(!has_loading(&state));
    assert_eq!(
        notification_texts(&state),
        vec!["Error: possible assembly instructions not found"]
    );
}

#[tokio::test]
async fn downloads_are_not_held_for_the_loading_floor() {
    let h = Harness::with_min_loading(ErrorInspector::new(), MemoryTokenStorage::new(), 5_000)
        .await;
    h.sign_in("tok");
    Mock::given(method("GET"))
        .and(path("/api/v1/workflow/5/possibleassembly"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"assembly.csv\"")
                .set_body_raw(b"well,volume".to_vec(), "text/csv"),
        )
        .mount(&h.server)
        .await;

    let download = tokio::time::timeout(
        Duration::from_millis(2_000),
        h.app.actions.get_possible_assembly(5),
    )
    .await
    .expect("download waited for the loading floor")
    .unwrap();

    assert_eq!(download.file_name.as_deref(), Some("assembly.csv"));
    assert_eq!(
        notification_texts(&h.state()),
        vec!["Possible Assembly Downloading"]
    );
}

#[tokio::test]
async fn standalone_plating_returns_the_backend_json() {
    let h = Harness::default().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/plating"))
        .and(body_string_contains("plate.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plates": [{"well": "A1"}]})))
        .expect(1)
        .mount(&h.server)
        .await;

    let result = h
        .app
        .actions
        .standalone_create_plating_instructions(plate_form())
        .await
        .unwrap();

    assert_eq!(result["plates"][0]["well"], "A1");
    let state = h.state();
    assert_eq!(
        notification_texts(&state),
        vec!["Plating Instructions successfully created"]
    );
    // Standalone tools never touch the entity cache.
    assert!(state.experiments().is_empty());
    assert!(state.runs().is_empty());
}

#[tokio::test]
async fn standalone_j5_automation_reports_rejected_credentials() {
    let h = Harness::default().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/condenseandautomatej5"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;

    let form = plate_form()
        .text("j5_username", "ada")
        .text("j5_password", "nope");
    let download = h.app.actions.standalone_condense_automate_j5(form).await;

    assert!(download.is_none());
    let state = h.state();
    assert!(!has_loading(&state));
    assert_eq!(
        notification_texts(&state),
        vec!["Invalid J5 Username or Password"]
    );
    assert_eq!(
        state.notifications()[0].color,
        Some(NotificationColor::Error)
    );
}

//=========================================================================================
// Error inspector
//=========================================================================================

#[tokio::test]
async fn unauthorized_is_ignored_by_default() {
    let h = Harness::default().await;
    h.sign_in("tok");
    h.app.navigator.push("/main/dashboard").unwrap();
    Mock::given(method("GET"))
        .and(path("/api/v1/experiments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    assert!(h.app.actions.get_experiments().await.is_none());

    assert!(h.state().is_logged_in());
    assert_eq!(h.app.navigator.current_path(), "/main/dashboard");
}

#[tokio::test]
async fn registered_unauthorized_interceptor_forces_logout() {
    let inspector = ErrorInspector::new().with(LogoutOnUnauthorized);
    let h = Harness::start(inspector, MemoryTokenStorage::with_token("tok")).await;
    h.sign_in("tok");
    h.app.navigator.push("/main/dashboard").unwrap();
    Mock::given(method("GET"))
        .and(path("/api/v1/experiments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    assert!(h.app.actions.get_experiments().await.is_none());

    let state = h.state();
    assert_eq!(state.login_status(), LoginStatus::LoggedOut);
    assert_eq!(state.token(), "");
    assert_eq!(h.tokens.load().unwrap(), None);
    assert_eq!(h.app.navigator.current_path(), "/login");
}

#[tokio::test]
async fn notifications_can_be_dismissed_after_a_timeout() {
    let h = Harness::default().await;
    h.app.actions.user_log_out().await;
    let id = h.state().first_notification().map(|n| n.id).unwrap();

    h.app
        .actions
        .remove_notification_after(id, Duration::from_millis(10))
        .await;

    assert!(h.state().notifications().is_empty());
}
