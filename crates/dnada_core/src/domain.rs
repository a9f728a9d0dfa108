//! crates/dnada_core/src/domain.rs
//!
//! Defines the plain records mirrored from the backend resources, plus the
//! request payloads the client sends. The client never derives business state
//! from these beyond simple boolean gates.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Backend primary keys are plain integers.
pub type Id = i64;

//=========================================================================================
// Users & Session
//=========================================================================================

/// The profile of a platform user (also the element of the admin user list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfileCreate {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
}

/// Credentials submitted to the token endpoint.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of the token endpoint. An empty `access_token` is a failed login.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccessToken {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub new_password: String,
    pub token: String,
}

/// Generic `{"msg": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Msg {
    pub msg: String,
}

//=========================================================================================
// Experiments & Designs
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: Id,
    pub owner_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentCreate {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub id: Id,
    pub owner_id: Id,
    pub experiment_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub zip_file_name: String,
    pub condensed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condensed: Option<bool>,
}

//=========================================================================================
// Workflows, Runs & Instructions
//=========================================================================================

/// Settings for triggering downstream automation on an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomateSettings {
    pub experiment_id: Id,
}

/// One automation run over an experiment's design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Id,
    pub owner_id: Id,
    pub experiment_id: Id,
    pub design_id: Id,
    pub created_time: String,
    #[serde(default)]
    pub resultzip_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: Id,
    pub owner_id: Id,
    pub instruction_id: Id,
    pub date: String,
    pub instrument: String,
    pub raw_data: String,
    pub run_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: Id,
    pub owner_id: Id,
    pub workflow_id: Id,
    pub category: String,
    pub trial: i64,
    pub data: String,
}

/// Worksheet and echo transfer files produced for a PCR redo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RedoPcrInstructions {
    #[serde(default)]
    pub worksheet: Option<String>,
    #[serde(default)]
    pub echo_instructions: Option<String>,
}

//=========================================================================================
// Banner
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: Id,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerUpdate {
    pub text: String,
}

//=========================================================================================
// Uploads & Downloads
//=========================================================================================

/// One part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        data: Bytes,
    },
}

/// An ordered multipart form, built field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    parts: Vec<FormPart>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        });
        self
    }

    /// Like [`UploadForm::file`] but with an explicit MIME type.
    pub fn typed_file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: Some(content_type.into()),
            data: data.into(),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }
}

/// A binary response body, e.g. a result zip or a generated worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDownload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}
