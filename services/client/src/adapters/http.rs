//! services/client/src/adapters/http.rs
//!
//! The REST adapter: the concrete implementation of the `LabApi` ports using
//! `reqwest`. Every call is a pass-through: no retries, no caching, no
//! client-side validation. Non-success statuses become `PortError::Http`
//! carrying the status and the raw body.

use async_trait::async_trait;
use dnada_core::domain::{
    AccessToken, AutomateSettings, Banner, BannerUpdate, Design, DesignUpdate, Experiment,
    ExperimentCreate, ExperimentUpdate, FileDownload, FormPart, Id, Instruction, Msg,
    PasswordReset, RedoPcrInstructions, Run, UploadForm, UserProfile, UserProfileCreate,
    UserProfileUpdate, Workflow,
};
use dnada_core::ports::{
    BannerApi, ExperimentApi, PortError, PortResult, SessionApi, StandaloneApi, WorkflowApi,
};
use percent_encoding::percent_decode_str;
use reqwest::{header, multipart, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements every backend port over HTTP.
#[derive(Clone, Debug)]
pub struct HttpLabApi {
    client: Client,
    base_url: String,
    list_limit: u32,
}

impl HttpLabApi {
    /// Creates a new `HttpLabApi` rooted at `base_url` (the backend origin).
    pub fn new(client: Client, base_url: impl Into<String>, list_limit: u32) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            list_limit,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Appends `segment` to `path` as a single, percent-encoded path segment.
    fn segment_url(&self, path: &str, segment: &str) -> PortResult<Url> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| PortError::Unexpected(format!("invalid backend url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected("backend url cannot take a path".to_string()))?
            .push(segment);
        Ok(url)
    }

    fn authed_get(&self, token: &str, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    fn authed_post(&self, token: &str, path: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token)
    }

    fn authed_put(&self, token: &str, path: &str) -> RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(token)
    }

    fn authed_delete(&self, token: &str, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(token)
    }

    fn with_limit(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[("limit", self.list_limit)])
    }
}

//=========================================================================================
// Request Helpers
//=========================================================================================

async fn send(request: RequestBuilder) -> PortResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| PortError::Transport(e.to_string()))?;

    let status = response.status();
    debug!(status = %status, url = %response.url(), "backend response received");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = %status, body = %body, "backend returned an error status");
    Err(PortError::Http {
        status: status.as_u16(),
        body,
    })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> PortResult<T> {
    let response = send(request).await?;
    let body = response
        .bytes()
        .await
        .map_err(|e| PortError::Transport(e.to_string()))?;
    serde_json::from_slice(&body).map_err(|e| PortError::Decode(e.to_string()))
}

async fn send_blob(request: RequestBuilder) -> PortResult<FileDownload> {
    let response = send(request).await?;
    let headers = response.headers();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let file_name = headers
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(disposition_file_name);

    let data = response
        .bytes()
        .await
        .map_err(|e| PortError::Transport(e.to_string()))?;

    Ok(FileDownload {
        file_name,
        content_type,
        data,
    })
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// Prefers the RFC 5987 `filename*=charset''value` form, which carries
/// non-ASCII names percent-encoded, over the plain `filename=`.
fn disposition_file_name(disposition: &str) -> Option<String> {
    let params: Vec<&str> = disposition.split(';').map(str::trim).collect();

    let extended = params
        .iter()
        .find_map(|p| p.strip_prefix("filename*="))
        .and_then(|value| value.splitn(3, '\'').nth(2))
        .and_then(|encoded| percent_decode_str(encoded).decode_utf8().ok())
        .map(|name| name.into_owned());

    extended
        .or_else(|| {
            params
                .iter()
                .find_map(|p| p.strip_prefix("filename="))
                .map(|name| name.trim_matches('"').to_string())
        })
        .filter(|name| !name.is_empty())
}

fn to_multipart(form: UploadForm) -> PortResult<multipart::Form> {
    let mut out = multipart::Form::new();
    for part in form.into_parts() {
        out = match part {
            FormPart::Text { name, value } => out.text(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let mut file = multipart::Part::bytes(data.to_vec()).file_name(file_name);
                if let Some(content_type) = content_type {
                    file = file.mime_str(&content_type).map_err(|e| {
                        PortError::Unexpected(format!("invalid content type '{content_type}': {e}"))
                    })?;
                }
                out.part(name, file)
            }
        };
    }
    Ok(out)
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl SessionApi for HttpLabApi {
    async fn log_in_get_token(&self, username: &str, password: &str) -> PortResult<AccessToken> {
        let request = self
            .client
            .post(self.url("/login/access-token"))
            .form(&[("username", username), ("password", password)]);
        send_json(request).await
    }

    async fn get_me(&self, token: &str) -> PortResult<UserProfile> {
        send_json(self.authed_get(token, "/users/me")).await
    }

    async fn update_me(&self, token: &str, data: &UserProfileUpdate) -> PortResult<UserProfile> {
        send_json(self.authed_put(token, "/users/me").json(data)).await
    }

    async fn get_users(&self, token: &str) -> PortResult<Vec<UserProfile>> {
        send_json(self.with_limit(self.authed_get(token, "/users/"))).await
    }

    async fn update_user(
        &self,
        token: &str,
        user_id: Id,
        data: &UserProfileUpdate,
    ) -> PortResult<UserProfile> {
        send_json(self.authed_put(token, &format!("/users/{user_id}")).json(data)).await
    }

    async fn create_user(&self, token: &str, data: &UserProfileCreate) -> PortResult<UserProfile> {
        send_json(self.authed_post(token, "/users/").json(data)).await
    }

    async fn password_recovery(&self, email: &str) -> PortResult<Msg> {
        let url = self.segment_url("/password-recovery", email)?;
        send_json(self.client.post(url)).await
    }

    async fn reset_password(&self, new_password: &str, token: &str) -> PortResult<Msg> {
        let body = PasswordReset {
            new_password: new_password.to_string(),
            token: token.to_string(),
        };
        send_json(self.client.post(self.url("/reset-password")).json(&body)).await
    }
}

#[async_trait]
impl ExperimentApi for HttpLabApi {
    async fn create_experiment(
        &self,
        token: &str,
        data: &ExperimentCreate,
    ) -> PortResult<Experiment> {
        send_json(self.authed_post(token, "/experiments").json(data)).await
    }

    async fn get_experiments(&self, token: &str) -> PortResult<Vec<Experiment>> {
        send_json(self.with_limit(self.authed_get(token, "/experiments"))).await
    }

    async fn get_experiment(&self, token: &str, experiment_id: Id) -> PortResult<Experiment> {
        send_json(self.authed_get(token, &format!("/experiments/{experiment_id}"))).await
    }

    async fn update_experiment(
        &self,
        token: &str,
        experiment_id: Id,
        data: &ExperimentUpdate,
    ) -> PortResult<Experiment> {
        let path = format!("/experiments/{experiment_id}");
        send_json(self.authed_put(token, &path).json(data)).await
    }

    async fn delete_experiment(&self, token: &str, experiment_id: Id) -> PortResult<Experiment> {
        send_json(self.authed_delete(token, &format!("/experiments/{experiment_id}"))).await
    }

    async fn create_design(&self, token: &str, form: UploadForm) -> PortResult<Design> {
        let form = to_multipart(form)?;
        send_json(self.authed_post(token, "/designs").multipart(form)).await
    }

    async fn get_designs(&self, token: &str) -> PortResult<Vec<Design>> {
        send_json(self.authed_get(token, "/designs")).await
    }

    async fn get_design(&self, token: &str, design_id: Id) -> PortResult<Design> {
        send_json(self.authed_get(token, &format!("/designs/{design_id}"))).await
    }

    async fn update_design(
        &self,
        token: &str,
        design_id: Id,
        data: &DesignUpdate,
    ) -> PortResult<Design> {
        send_json(self.authed_put(token, &format!("/designs/{design_id}")).json(data)).await
    }

    async fn delete_design(&self, token: &str, design_id: Id) -> PortResult<Design> {
        send_json(self.authed_delete(token, &format!("/designs/{design_id}"))).await
    }
}

#[async_trait]
impl WorkflowApi for HttpLabApi {
    async fn execute_automation(
        &self,
        token: &str,
        data: &AutomateSettings,
    ) -> PortResult<Workflow> {
        send_json(self.authed_post(token, "/workflows").json(data)).await
    }

    async fn get_workflows(&self, token: &str) -> PortResult<Vec<Workflow>> {
        send_json(self.with_limit(self.authed_get(token, "/workflows"))).await
    }

    async fn get_workflow(&self, token: &str, workflow_id: Id) -> PortResult<Workflow> {
        send_json(self.authed_get(token, &format!("/workflows/{workflow_id}"))).await
    }

    async fn get_result_zip(&self, token: &str, resultzip_id: Id) -> PortResult<FileDownload> {
        send_blob(self.authed_get(token, &format!("/resultzips/{resultzip_id}"))).await
    }

    async fn analyze_pcrs(&self, token: &str, form: UploadForm) -> PortResult<Run> {
        let form = to_multipart(form)?;
        send_json(self.authed_post(token, "/runs/pcr").multipart(form)).await
    }

    async fn report_assembly_results(&self, token: &str, form: UploadForm) -> PortResult<Run> {
        let form = to_multipart(form)?;
        send_json(self.authed_post(token, "/runs/assembly").multipart(form)).await
    }

    async fn report_sequencing_results(&self, token: &str, form: UploadForm) -> PortResult<Run> {
        let form = to_multipart(form)?;
        send_json(self.authed_post(token, "/runs/sequencing").multipart(form)).await
    }

    async fn get_runs(&self, token: &str) -> PortResult<Vec<Run>> {
        send_json(self.with_limit(self.authed_get(token, "/runs"))).await
    }

    async fn get_run(&self, token: &str, run_id: Id) -> PortResult<Run> {
        send_json(self.authed_get(token, &format!("/runs/{run_id}"))).await
    }

    async fn create_redo_pcr_workflow(
        &self,
        token: &str,
        run_id: Id,
    ) -> PortResult<RedoPcrInstructions> {
        let request = self
            .authed_post(token, &format!("/redopcr/{run_id}"))
            .json(&json!({}));
        send_json(request).await
    }

    async fn create_consolidate_pcr_workflow(
        &self,
        token: &str,
        workflow_id: Id,
        plating_scheme: &str,
    ) -> PortResult<FileDownload> {
        let request = self
            .authed_post(token, &format!("/workflow/{workflow_id}/consolidatepcrs"))
            .query(&[("plating_scheme", plating_scheme)])
            .json(&json!({}));
        send_blob(request).await
    }

    async fn get_possible_assembly(
        &self,
        token: &str,
        workflow_id: Id,
    ) -> PortResult<FileDownload> {
        let path = format!("/workflow/{workflow_id}/possibleassembly");
        send_blob(self.authed_get(token, &path)).await
    }

    async fn get_pcr_instructions(
        &self,
        token: &str,
        workflow_id: Id,
    ) -> PortResult<Vec<Instruction>> {
        let request = self
            .with_limit(self.authed_get(token, "/instructions/pcr"))
            .query(&[("workflow_id", workflow_id)]);
        send_json(request).await
    }

    async fn get_pcr_instruction_runs(
        &self,
        token: &str,
        instruction_id: Id,
    ) -> PortResult<Vec<Run>> {
        send_json(self.authed_get(token, &format!("/instructions/{instruction_id}/run"))).await
    }
}

#[async_trait]
impl StandaloneApi for HttpLabApi {
    async fn upload_file(&self, form: UploadForm) -> PortResult<Value> {
        let form = to_multipart(form)?;
        send_json(self.client.post(self.url("/uploadfile/")).multipart(form)).await
    }

    async fn condense_automate_j5(&self, form: UploadForm) -> PortResult<FileDownload> {
        let form = to_multipart(form)?;
        send_blob(self.client.post(self.url("/condenseandautomatej5")).multipart(form)).await
    }

    async fn analyze_zag(&self, form: UploadForm) -> PortResult<Value> {
        let form = to_multipart(form)?;
        send_json(self.client.post(self.url("/analyzezag")).multipart(form)).await
    }

    async fn create_pcr_redo(&self, form: UploadForm) -> PortResult<Value> {
        let form = to_multipart(form)?;
        send_json(self.client.post(self.url("/createpcrredo")).multipart(form)).await
    }

    async fn consolidate_pcr_trials(&self, form: UploadForm) -> PortResult<FileDownload> {
        let form = to_multipart(form)?;
        send_blob(self.client.post(self.url("/consolidatepcrtrials")).multipart(form)).await
    }

    async fn create_equivolume_assembly(&self, form: UploadForm) -> PortResult<FileDownload> {
        let form = to_multipart(form)?;
        send_blob(self.client.post(self.url("/createequivolumeassembly")).multipart(form)).await
    }

    async fn equimolar_assembly_and_water(&self, form: UploadForm) -> PortResult<FileDownload> {
        let form = to_multipart(form)?;
        let url = self.url("/standalone_equimolar_assembly_and_water_transfer");
        send_blob(self.client.post(url).multipart(form)).await
    }

    async fn create_colony_pcr_instructions(
        &self,
        token: &str,
        form: UploadForm,
    ) -> PortResult<FileDownload> {
        let form = to_multipart(form)?;
        send_blob(self.authed_post(token, "/createcolonypcrinstructions").multipart(form)).await
    }

    async fn create_glycerol_stock_worksheet(&self, form: UploadForm) -> PortResult<Value> {
        let form = to_multipart(form)?;
        send_json(self.client.post(self.url("/glycerolstock")).multipart(form)).await
    }

    async fn create_plating_instructions(&self, form: UploadForm) -> PortResult<Value> {
        let form = to_multipart(form)?;
        send_json(self.client.post(self.url("/plating")).multipart(form)).await
    }

    async fn create_ngs_form(&self, token: &str, form: UploadForm) -> PortResult<FileDownload> {
        let form = to_multipart(form)?;
        send_blob(self.authed_post(token, "/ngsform").multipart(form)).await
    }

    async fn create_cherry_picking(
        &self,
        token: &str,
        form: UploadForm,
    ) -> PortResult<FileDownload> {
        let form = to_multipart(form)?;
        send_blob(self.authed_post(token, "/cherrypicking").multipart(form)).await
    }

    async fn condense_plate_reader_data(&self, token: &str, form: UploadForm) -> PortResult<Value> {
        let form = to_multipart(form)?;
        send_json(self.authed_post(token, "/condenseplatereaderdata").multipart(form)).await
    }
}

#[async_trait]
impl BannerApi for HttpLabApi {
    async fn get_banner(&self, token: &str) -> PortResult<Banner> {
        send_json(self.authed_get(token, "/banner")).await
    }

    async fn update_banner(&self, token: &str, data: &BannerUpdate) -> PortResult<Banner> {
        send_json(self.authed_put(token, "/banner").json(data)).await
    }
}
