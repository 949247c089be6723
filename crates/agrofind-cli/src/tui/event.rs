use agrofind_core::model::{Category, HealthState, SearchRequest, SearchResponse, SelectedFile};

/// Operations the UI asks the async worker to perform. These are the only
/// suspension points; every state transition around them is synchronous.
#[derive(Debug)]
pub enum AsyncAction {
    /// One health probe per authenticated session start.
    CheckHealth,
    /// Run a search; `seq` identifies the submission that issued it.
    Search { seq: u64, request: SearchRequest },
    /// Upload the selected PDF with its category.
    Upload {
        file: SelectedFile,
        category: Category,
    },
}

/// Results the worker sends back to the UI.
#[derive(Debug)]
pub enum AsyncResult {
    Health(HealthState),
    SearchDone { seq: u64, response: SearchResponse },
    SearchFailed { seq: u64, message: String },
    UploadDone { message: String },
    UploadFailed { message: String },
}
