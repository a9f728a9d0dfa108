pub mod domain;
pub mod getters;
pub mod mutations;
pub mod ports;
pub mod state;

pub use domain::{
    AccessToken, AutomateSettings, Banner, BannerUpdate, Design, DesignUpdate, Experiment,
    ExperimentCreate, ExperimentUpdate, FileDownload, FormPart, Id, Instruction, LoginRequest,
    Msg, PasswordReset, RedoPcrInstructions, Run, UploadForm, UserProfile, UserProfileCreate,
    UserProfileUpdate, Workflow,
};
pub use mutations::Mutation;
pub use ports::{
    BannerApi, ExperimentApi, LabApi, Navigator, PortError, PortResult, SessionApi,
    StandaloneApi, TokenStorage, WorkflowApi,
};
pub use state::{LoginStatus, MainState, Notification, NotificationColor, NotificationId};
