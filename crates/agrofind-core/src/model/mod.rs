mod category;
mod outcome;
mod search;
mod upload;

pub use category::{Category, ALL_CATEGORIES};
pub use outcome::{HealthState, SearchOutcome, UploadState};
pub use search::{
    HealthResponse, IngestRequest, SearchRequest, SearchResponse, SearchResult, UploadResponse,
    SEARCH_TOP_K,
};
pub use upload::{SelectedFile, INVALID_FILE_TYPE, NO_FILE_SELECTED};
