//! Experiment and design actions.

use dnada_core::ports::ExperimentApi;
use dnada_core::{Design, Experiment, ExperimentCreate, Id, Mutation, UploadForm};

use super::{Actions, Feedback, Pacing, UpdateDesign, UpdateExperiment};

const CREATE_EXPERIMENT: Feedback = Feedback::new(
    "create_experiment",
    "Saving",
    "Experiment successfully created",
    "Error Creating Experiment",
);
const UPDATE_EXPERIMENT: Feedback = Feedback::new(
    "update_experiment",
    "Saving",
    "Experiment successfully updated",
    "Error Updating Experiment",
);
const DELETE_EXPERIMENT: Feedback = Feedback::new(
    "delete_experiment",
    "Deleting",
    "Experiment successfully deleted",
    "Error Deleting Experiment",
);
const CREATE_DESIGN: Feedback = Feedback::new(
    "create_design",
    "Creating Design",
    "Design Created",
    "Error Creating Design",
);
const UPDATE_DESIGN: Feedback = Feedback::new(
    "update_design",
    "Saving",
    "Design successfully updated",
    "Error Updating Design",
);
const DELETE_DESIGN: Feedback = Feedback::new(
    "delete_design",
    "Deleting",
    "Design successfully deleted",
    "Error Deleting Design",
);

impl Actions {
    //=====================================================================================
    // Experiments
    //=====================================================================================

    pub async fn create_experiment(&self, experiment: ExperimentCreate) -> Option<Experiment> {
        let token = self.token();
        self.tracked(
            CREATE_EXPERIMENT,
            Pacing::Padded,
            self.api.create_experiment(&token, &experiment),
            |created: &Experiment| vec![Mutation::SetExperiment(created.clone())],
        )
        .await
    }

    /// Replaces the cached experiment list.
    pub async fn get_experiments(&self) -> Option<Vec<Experiment>> {
        let token = self.token();
        let experiments = self
            .fetched("get_experiments", self.api.get_experiments(&token).await)
            .await?;
        self.store.commit(Mutation::SetExperiments(experiments.clone()));
        Some(experiments)
    }

    /// Fetches one experiment for the caller; the cache is left alone.
    pub async fn get_experiment(&self, experiment_id: Id) -> Option<Experiment> {
        let token = self.token();
        self.fetched(
            "get_experiment",
            self.api.get_experiment(&token, experiment_id).await,
        )
        .await
    }

    pub async fn update_experiment(&self, payload: UpdateExperiment) -> Option<Experiment> {
        let token = self.token();
        self.tracked(
            UPDATE_EXPERIMENT,
            Pacing::Padded,
            self.api
                .update_experiment(&token, payload.experiment_id, &payload.changes),
            |updated: &Experiment| vec![Mutation::SetExperiment(updated.clone())],
        )
        .await
    }

    pub async fn delete_experiment(&self, experiment_id: Id) -> Option<Experiment> {
        let token = self.token();
        self.tracked(
            DELETE_EXPERIMENT,
            Pacing::Padded,
            self.api.delete_experiment(&token, experiment_id),
            |deleted: &Experiment| vec![Mutation::DeleteExperiment(deleted.id)],
        )
        .await
    }

    //=====================================================================================
    // Designs
    //=====================================================================================

    /// Uploads a design archive. The form carries the file and its metadata.
    pub async fn create_design(&self, form: UploadForm) -> Option<Design> {
        let token = self.token();
        self.tracked(
            CREATE_DESIGN,
            Pacing::Padded,
            self.api.create_design(&token, form),
            |created: &Design| vec![Mutation::SetDesign(created.clone())],
        )
        .await
    }

    pub async fn get_designs(&self) -> Option<Vec<Design>> {
        let token = self.token();
        let designs = self
            .fetched("get_designs", self.api.get_designs(&token).await)
            .await?;
        self.store.commit(Mutation::SetDesigns(designs.clone()));
        Some(designs)
    }

    pub async fn get_design(&self, design_id: Id) -> Option<Design> {
        let token = self.token();
        self.fetched("get_design", self.api.get_design(&token, design_id).await)
            .await
    }

    pub async fn update_design(&self, payload: UpdateDesign) -> Option<Design> {
        let token = self.token();
        self.tracked(
            UPDATE_DESIGN,
            Pacing::Padded,
            self.api
                .update_design(&token, payload.design_id, &payload.changes),
            |updated: &Design| vec![Mutation::SetDesign(updated.clone())],
        )
        .await
    }

    pub async fn delete_design(&self, design_id: Id) -> Option<Design> {
        let token = self.token();
        self.tracked(
            DELETE_DESIGN,
            Pacing::Padded,
            self.api.delete_design(&token, design_id),
            |deleted: &Design| vec![Mutation::DeleteDesign(deleted.id)],
        )
        .await
    }
}
