//! crates/dnada_core/src/ports.rs
//!
//! Defines the service contracts (traits) the store's actions depend on.
//! These traits form the boundary of the hexagonal architecture: the backend
//! REST API, the persisted credential and the navigation history are all
//! reached through them, so the core stays independent of reqwest, the
//! filesystem or any UI shell.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    AccessToken, AutomateSettings, Banner, BannerUpdate, Design, DesignUpdate, Experiment,
    ExperimentCreate, ExperimentUpdate, FileDownload, Id, Instruction, Msg, RedoPcrInstructions,
    Run, UploadForm, UserProfile, UserProfileCreate, UserProfileUpdate, Workflow,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    /// The backend answered with a non-success status. The body is kept verbatim.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Token storage error: {0}")]
    Storage(String),
    #[error("Navigation error: {0}")]
    Navigation(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The HTTP status code, if this error came from a backend response.
    pub fn status(&self) -> Option<u16> {
        match self {
            PortError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Backend API Ports (Traits)
//=========================================================================================

/// Login, profile and user administration endpoints.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn log_in_get_token(&self, username: &str, password: &str) -> PortResult<AccessToken>;

    async fn get_me(&self, token: &str) -> PortResult<UserProfile>;

    async fn update_me(&self, token: &str, data: &UserProfileUpdate) -> PortResult<UserProfile>;

    async fn get_users(&self, token: &str) -> PortResult<Vec<UserProfile>>;

    async fn update_user(
        &self,
        token: &str,
        user_id: Id,
        data: &UserProfileUpdate,
    ) -> PortResult<UserProfile>;

    async fn create_user(&self, token: &str, data: &UserProfileCreate) -> PortResult<UserProfile>;

    async fn password_recovery(&self, email: &str) -> PortResult<Msg>;

    /// `token` here is the one-time reset token from the recovery email.
    async fn reset_password(&self, new_password: &str, token: &str) -> PortResult<Msg>;
}

#[async_trait]
pub trait ExperimentApi: Send + Sync {
    // --- Experiments ---
    async fn create_experiment(&self, token: &str, data: &ExperimentCreate)
        -> PortResult<Experiment>;

    async fn get_experiments(&self, token: &str) -> PortResult<Vec<Experiment>>;

    async fn get_experiment(&self, token: &str, experiment_id: Id) -> PortResult<Experiment>;

    async fn update_experiment(
        &self,
        token: &str,
        experiment_id: Id,
        data: &ExperimentUpdate,
    ) -> PortResult<Experiment>;

    async fn delete_experiment(&self, token: &str, experiment_id: Id) -> PortResult<Experiment>;

    // --- Designs ---
    async fn create_design(&self, token: &str, form: UploadForm) -> PortResult<Design>;

    async fn get_designs(&self, token: &str) -> PortResult<Vec<Design>>;

    async fn get_design(&self, token: &str, design_id: Id) -> PortResult<Design>;

    async fn update_design(
        &self,
        token: &str,
        design_id: Id,
        data: &DesignUpdate,
    ) -> PortResult<Design>;

    async fn delete_design(&self, token: &str, design_id: Id) -> PortResult<Design>;
}

/// Automation, run reporting and instruction endpoints tied to a workflow.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn execute_automation(&self, token: &str, data: &AutomateSettings)
        -> PortResult<Workflow>;

    async fn get_workflows(&self, token: &str) -> PortResult<Vec<Workflow>>;

    async fn get_workflow(&self, token: &str, workflow_id: Id) -> PortResult<Workflow>;

    async fn get_result_zip(&self, token: &str, resultzip_id: Id) -> PortResult<FileDownload>;

    async fn analyze_pcrs(&self, token: &str, form: UploadForm) -> PortResult<Run>;

    async fn report_assembly_results(&self, token: &str, form: UploadForm) -> PortResult<Run>;

    async fn report_sequencing_results(&self, token: &str, form: UploadForm) -> PortResult<Run>;

    async fn get_runs(&self, token: &str) -> PortResult<Vec<Run>>;

    async fn get_run(&self, token: &str, run_id: Id) -> PortResult<Run>;

    async fn create_redo_pcr_workflow(
        &self,
        token: &str,
        run_id: Id,
    ) -> PortResult<RedoPcrInstructions>;

    async fn create_consolidate_pcr_workflow(
        &self,
        token: &str,
        workflow_id: Id,
        plating_scheme: &str,
    ) -> PortResult<FileDownload>;

    async fn get_possible_assembly(&self, token: &str, workflow_id: Id)
        -> PortResult<FileDownload>;

    async fn get_pcr_instructions(&self, token: &str, workflow_id: Id)
        -> PortResult<Vec<Instruction>>;

    async fn get_pcr_instruction_runs(&self, token: &str, instruction_id: Id)
        -> PortResult<Vec<Run>>;
}

/// Document-generation endpoints usable without an experiment context.
/// Methods without a `token` argument are unauthenticated.
#[async_trait]
pub trait StandaloneApi: Send + Sync {
    async fn upload_file(&self, form: UploadForm) -> PortResult<Value>;

    async fn condense_automate_j5(&self, form: UploadForm) -> PortResult<FileDownload>;

    async fn analyze_zag(&self, form: UploadForm) -> PortResult<Value>;

    async fn create_pcr_redo(&self, form: UploadForm) -> PortResult<Value>;

    async fn consolidate_pcr_trials(&self, form: UploadForm) -> PortResult<FileDownload>;

    async fn create_equivolume_assembly(&self, form: UploadForm) -> PortResult<FileDownload>;

    async fn equimolar_assembly_and_water(&self, form: UploadForm) -> PortResult<FileDownload>;

    async fn create_colony_pcr_instructions(
        &self,
        token: &str,
        form: UploadForm,
    ) -> PortResult<FileDownload>;

    async fn create_glycerol_stock_worksheet(&self, form: UploadForm) -> PortResult<Value>;

    async fn create_plating_instructions(&self, form: UploadForm) -> PortResult<Value>;

    async fn create_ngs_form(&self, token: &str, form: UploadForm) -> PortResult<FileDownload>;

    async fn create_cherry_picking(&self, token: &str, form: UploadForm)
        -> PortResult<FileDownload>;

    async fn condense_plate_reader_data(&self, token: &str, form: UploadForm) -> PortResult<Value>;
}

#[async_trait]
pub trait BannerApi: Send + Sync {
    async fn get_banner(&self, token: &str) -> PortResult<Banner>;

    async fn update_banner(&self, token: &str, data: &BannerUpdate) -> PortResult<Banner>;
}

/// The whole backend surface. Implemented for anything that implements every part.
pub trait LabApi: SessionApi + ExperimentApi + WorkflowApi + StandaloneApi + BannerApi {}

impl<T> LabApi for T where T: SessionApi + ExperimentApi + WorkflowApi + StandaloneApi + BannerApi {}

//=========================================================================================
// Local Ports
//=========================================================================================

/// Persists the bearer token across restarts under a single fixed key.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> PortResult<Option<String>>;

    fn save(&self, token: &str) -> PortResult<()>;

    fn remove(&self) -> PortResult<()>;
}

/// The navigation history the actions route through.
pub trait Navigator: Send + Sync {
    /// The path currently shown, after redirects.
    fn current_path(&self) -> String;

    fn push(&self, path: &str) -> PortResult<()>;
}
