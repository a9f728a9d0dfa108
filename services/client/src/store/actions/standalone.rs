//! Standalone document-generation tools. None of them touch cached
//! entities; the generated file or JSON is handed back to the caller.

use dnada_core::ports::StandaloneApi;
use dnada_core::{FileDownload, UploadForm};
use serde_json::Value;

use super::{Actions, Feedback, Pacing, J5_CREDENTIALS};

const CONDENSE_AUTOMATE_J5: Feedback = Feedback::new(
    "standalone_condense_automate_j5",
    "Condensing + Automating J5 Design(s)",
    "J5 Design(s) successfully condensed/automated",
    "Error condensing + automating J5 Design(s)",
)
.with_statuses(J5_CREDENTIALS);
const ANALYZE_ZAG: Feedback = Feedback::new(
    "standalone_analyze_zag",
    "Analyzing ZAG data",
    "ZAG data successfully analyzed",
    "Error analyzing ZAG data",
);
const CREATE_PCR_REDO: Feedback = Feedback::new(
    "standalone_create_pcr_redo",
    "Creating PCR Redo Instructions",
    "PCR Redo Instructions successfully created",
    "Error creating PCR Redo Instructions",
);
const CONSOLIDATE_PCR_TRIALS: Feedback = Feedback::new(
    "standalone_consolidate_pcr_trials",
    "Consolidating PCR Trials",
    "PCR Trials successfully consolidated",
    "Error consolidating PCR Trial files",
);
const EQUIVOLUME_ASSEMBLY: Feedback = Feedback::new(
    "standalone_create_equivolume_assembly",
    "Creating Equivolume Assembly Instructions",
    "Equivolume Assembly Instructions successfully created",
    "Error Creating Equivolume Assembly Instructions",
);
const COLONY_PCR: Feedback = Feedback::new(
    "standalone_create_colony_pcr_instructions",
    "Creating Colony PCR Instructions",
    "Colony PCR Instructions successfully created",
    "Error Creating Colony PCR Instructions",
);
const EQUIMOLAR_ASSEMBLY: Feedback = Feedback::new(
    "standalone_equimolar_assembly_and_water",
    "Creating Equimolar Assembly and Water Transfer Instructions",
    "Equimolar Assembly and Water Transfer Instructions successfully created",
    "Error creating Equimolar Assembly and Water Transfer Instructions",
);
const GLYCEROL_STOCK: Feedback = Feedback::new(
    "standalone_create_glycerol_stock_worksheet",
    "Creating Glycerol Stock Worksheet",
    "Glycerol Stock Worksheet successfully created",
    "Error creating glycerol stock worksheet",
);
const PLATING: Feedback = Feedback::new(
    "standalone_create_plating_instructions",
    "Creating Plating Instructions",
    "Plating Instructions successfully created",
    "Error creating Plating Instructions",
);
const NGS_FORM: Feedback = Feedback::new(
    "standalone_create_ngs_form",
    "Creating NGS Submission Form",
    "NGS Submission Form successfully created",
    "Error creating NGS Submission Form",
);
const CHERRY_PICKING: Feedback = Feedback::new(
    "standalone_create_cherry_picking",
    "Creating Cherry Picking Instructions",
    "Cherry Picking Instructions successfully created",
    "Error creating Cherry Picking Instructions",
);
const PLATE_READER: Feedback = Feedback::new(
    "standalone_condense_plate_reader_data",
    "Condensing Plate Reader Data",
    "Plate Reader Data Successfully Condensed",
    "Error Condensing Plate Reader Data",
);
const UPLOAD_FILE: Feedback = Feedback::new(
    "upload_file",
    "Uploading file",
    "File successfully uploaded",
    "Error uploading file",
);

impl Actions {
    /// Condenses J5 designs and runs automation on them. J5 credentials travel in the form.
    pub async fn standalone_condense_automate_j5(&self, form: UploadForm) -> Option<FileDownload> {
        self.tracked(
            CONDENSE_AUTOMATE_J5,
            Pacing::Padded,
            self.api.condense_automate_j5(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_analyze_zag(&self, form: UploadForm) -> Option<Value> {
        self.tracked(
            ANALYZE_ZAG,
            Pacing::Padded,
            self.api.analyze_zag(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_create_pcr_redo(&self, form: UploadForm) -> Option<Value> {
        self.tracked(
            CREATE_PCR_REDO,
            Pacing::Padded,
            self.api.create_pcr_redo(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_consolidate_pcr_trials(
        &self,
        form: UploadForm,
    ) -> Option<FileDownload> {
        self.tracked(
            CONSOLIDATE_PCR_TRIALS,
            Pacing::Padded,
            self.api.consolidate_pcr_trials(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_create_equivolume_assembly(
        &self,
        form: UploadForm,
    ) -> Option<FileDownload> {
        self.tracked(
            EQUIVOLUME_ASSEMBLY,
            Pacing::Padded,
            self.api.create_equivolume_assembly(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_create_colony_pcr_instructions(
        &self,
        form: UploadForm,
    ) -> Option<FileDownload> {
        let token = self.token();
        self.tracked(
            COLONY_PCR,
            Pacing::Padded,
            self.api.create_colony_pcr_instructions(&token, form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_equimolar_assembly_and_water(
        &self,
        form: UploadForm,
    ) -> Option<FileDownload> {
        self.tracked(
            EQUIMOLAR_ASSEMBLY,
            Pacing::Padded,
            self.api.equimolar_assembly_and_water(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_create_glycerol_stock_worksheet(
        &self,
        form: UploadForm,
    ) -> Option<Value> {
        self.tracked(
            GLYCEROL_STOCK,
            Pacing::Padded,
            self.api.create_glycerol_stock_worksheet(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_create_plating_instructions(&self, form: UploadForm) -> Option<Value> {
        self.tracked(
            PLATING,
            Pacing::Padded,
            self.api.create_plating_instructions(form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_create_ngs_form(&self, form: UploadForm) -> Option<FileDownload> {
        let token = self.token();
        self.tracked(
            NGS_FORM,
            Pacing::Padded,
            self.api.create_ngs_form(&token, form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_create_cherry_picking(&self, form: UploadForm) -> Option<FileDownload> {
        let token = self.token();
        self.tracked(
            CHERRY_PICKING,
            Pacing::Padded,
            self.api.create_cherry_picking(&token, form),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn standalone_condense_plate_reader_data(&self, form: UploadForm) -> Option<Value> {
        let token = self.token();
        self.tracked(
            PLATE_READER,
            Pacing::Padded,
            self.api.condense_plate_reader_data(&token, form),
            |_| Vec::new(),
        )
        .await
    }

    /// Generic file upload; the backend answers with a JSON summary.
    pub async fn upload_file(&self, form: UploadForm) -> Option<Value> {
        self.tracked(
            UPLOAD_FILE,
            Pacing::Padded,
            self.api.upload_file(form),
            |_| Vec::new(),
        )
        .await
    }
}
