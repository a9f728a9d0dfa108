//! Automation, run reporting and PCR instruction actions.

use dnada_core::ports::WorkflowApi;
use dnada_core::{
    AutomateSettings, FileDownload, Id, Instruction, Mutation, RedoPcrInstructions, Run,
    UploadForm, Workflow,
};

use super::{Actions, ConsolidatePcrTrials, Feedback, Pacing, J5_CREDENTIALS};

const EXECUTE_AUTOMATION: Feedback = Feedback::new(
    "execute_automation",
    "Running downstream automation",
    "Downstream automation successful",
    "Error with downstream automation",
)
.with_statuses(J5_CREDENTIALS);
const GET_RESULT_ZIP: Feedback = Feedback::new(
    "get_result_zip",
    "Fetching Result Zip File",
    "Result Zip Downloading",
    "Error fetching result zip file",
);
const ANALYZE_PCRS: Feedback = Feedback::new(
    "analyze_pcrs",
    "Analyzing ZAG data",
    "ZAG data successfully analyzed",
    "Error analyzing ZAG data",
);
const REPORT_ASSEMBLY: Feedback = Feedback::new(
    "report_assembly_results",
    "Reporting Assembly Results",
    "Assembly results successfully reported",
    "Error reporting assembly results",
);
const REPORT_SEQUENCING: Feedback = Feedback::new(
    "report_sequencing_results",
    "Reporting Sequencing Results",
    "Sequencing results successfully reported",
    "Error reporting sequencing results",
);
const CONSOLIDATE_PCR_TRIALS: Feedback = Feedback::new(
    "consolidate_pcr_trials",
    "Consolidating PCR Trials",
    "Successfully consolidated PCR Trials",
    "Error consolidating PCR Trials",
)
.with_statuses(&[(422, "Error: please report pcr results")]);
const REDO_PCR: Feedback = Feedback::new(
    "create_redo_pcr_workflow",
    "Creating Redo PCR Instructions",
    "Successfully created Redo PCR Instructions",
    "Error Creating Redo PCR Instructions",
);
const POSSIBLE_ASSEMBLY: Feedback = Feedback::new(
    "get_possible_assembly",
    "Fetching Possible Assembly Instructions",
    "Possible Assembly Downloading",
    "Error fetching possible assembly instructions",
)
.with_statuses(&[(422, "Error: possible assembly instructions not found")]);

fn upsert_run(run: &Run) -> Vec<Mutation> {
    vec![Mutation::SetRun(run.clone())]
}

impl Actions {
    //=====================================================================================
    // Workflows
    //=====================================================================================

    /// Starts downstream automation for an experiment. The new workflow
    /// becomes the experiment's active one.
    pub async fn execute_automation(&self, settings: AutomateSettings) -> Option<Workflow> {
        let token = self.token();
        self.tracked(
            EXECUTE_AUTOMATION,
            Pacing::Padded,
            self.api.execute_automation(&token, &settings),
            |workflow: &Workflow| {
                vec![
                    Mutation::SetWorkflow(workflow.clone()),
                    Mutation::SetActiveWorkflow(workflow.clone()),
                ]
            },
        )
        .await
    }

    pub async fn get_workflows(&self) -> Option<Vec<Workflow>> {
        let token = self.token();
        let workflows = self
            .fetched("get_workflows", self.api.get_workflows(&token).await)
            .await?;
        self.store.commit(Mutation::SetWorkflows(workflows.clone()));
        Some(workflows)
    }

    pub async fn get_workflow(&self, workflow_id: Id) -> Option<Workflow> {
        let token = self.token();
        let workflow = self
            .fetched(
                "get_workflow",
                self.api.get_workflow(&token, workflow_id).await,
            )
            .await?;
        self.store.commit(Mutation::SetWorkflow(workflow.clone()));
        Some(workflow)
    }

    /// Downloads a workflow's result archive. Not padded: the download is the feedback.
    pub async fn get_result_zip(&self, resultzip_id: Id) -> Option<FileDownload> {
        let token = self.token();
        self.tracked(
            GET_RESULT_ZIP,
            Pacing::Immediate,
            self.api.get_result_zip(&token, resultzip_id),
            |_| Vec::new(),
        )
        .await
    }

    //=====================================================================================
    // Runs
    //=====================================================================================

    pub async fn analyze_pcrs(&self, form: UploadForm) -> Option<Run> {
        let token = self.token();
        self.tracked(
            ANALYZE_PCRS,
            Pacing::Padded,
            self.api.analyze_pcrs(&token, form),
            upsert_run,
        )
        .await
    }

    pub async fn report_assembly_results(&self, form: UploadForm) -> Option<Run> {
        let token = self.token();
        self.tracked(
            REPORT_ASSEMBLY,
            Pacing::Padded,
            self.api.report_assembly_results(&token, form),
            upsert_run,
        )
        .await
    }

    pub async fn report_sequencing_results(&self, form: UploadForm) -> Option<Run> {
        let token = self.token();
        self.tracked(
            REPORT_SEQUENCING,
            Pacing::Padded,
            self.api.report_sequencing_results(&token, form),
            upsert_run,
        )
        .await
    }

    pub async fn get_runs(&self) -> Option<Vec<Run>> {
        let token = self.token();
        let runs = self
            .fetched("get_runs", self.api.get_runs(&token).await)
            .await?;
        self.store.commit(Mutation::SetRuns(runs.clone()));
        Some(runs)
    }

    pub async fn get_run(&self, run_id: Id) -> Option<Run> {
        let token = self.token();
        let run = self
            .fetched("get_run", self.api.get_run(&token, run_id).await)
            .await?;
        self.store.commit(Mutation::SetRun(run.clone()));
        Some(run)
    }

    //=====================================================================================
    // PCR Instructions
    //=====================================================================================

    /// Replaces the active instructions with the workflow's PCR instructions.
    pub async fn get_pcr_instructions(&self, workflow_id: Id) -> Option<Vec<Instruction>> {
        let token = self.token();
        let instructions = self
            .fetched(
                "get_pcr_instructions",
                self.api.get_pcr_instructions(&token, workflow_id).await,
            )
            .await?;
        self.store
            .commit(Mutation::SetActiveInstructions(instructions.clone()));
        Some(instructions)
    }

    pub async fn get_pcr_instruction_runs(&self, instruction_id: Id) -> Option<Vec<Run>> {
        let token = self.token();
        self.fetched(
            "get_pcr_instruction_runs",
            self.api.get_pcr_instruction_runs(&token, instruction_id).await,
        )
        .await
    }

    /// Merges the reported PCR trials of a workflow into one plate.
    pub async fn consolidate_pcr_trials(
        &self,
        payload: ConsolidatePcrTrials,
    ) -> Option<FileDownload> {
        let token = self.token();
        self.tracked(
            CONSOLIDATE_PCR_TRIALS,
            Pacing::Padded,
            self.api.create_consolidate_pcr_workflow(
                &token,
                payload.workflow_id,
                &payload.plating_scheme,
            ),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn create_redo_pcr_workflow(&self, run_id: Id) -> Option<RedoPcrInstructions> {
        let token = self.token();
        self.tracked(
            REDO_PCR,
            Pacing::Padded,
            self.api.create_redo_pcr_workflow(&token, run_id),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn get_possible_assembly(&self, workflow_id: Id) -> Option<FileDownload> {
        let token = self.token();
        self.tracked(
            POSSIBLE_ASSEMBLY,
            Pacing::Immediate,
            self.api.get_possible_assembly(&token, workflow_id),
            |_| Vec::new(),
        )
        .await
    }
}
