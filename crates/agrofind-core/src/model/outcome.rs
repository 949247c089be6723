use super::search::SearchResult;
use super::upload::SelectedFile;

/// Mutually exclusive states of the current search.
///
/// `Loading` resolves to exactly one of `Success`/`Failure`, and no outcome
/// survives a logout.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchOutcome {
    #[default]
    Idle,
    Loading,
    Success {
        results: Vec<SearchResult>,
        processing_time_ms: f64,
    },
    Failure {
        message: String,
    },
}

impl SearchOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Result list in service order; empty for every non-success state.
    pub fn results(&self) -> &[SearchResult] {
        match self {
            Self::Success { results, .. } => results,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { message } => Some(message),
            _ => None,
        }
    }
}

/// Mutually exclusive states of the file-selection-and-upload flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Empty,
    Selected {
        file: SelectedFile,
    },
    Uploading {
        file: SelectedFile,
    },
    Succeeded {
        message: String,
    },
    Failed {
        message: String,
    },
}

impl UploadState {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match self {
            Self::Selected { file } | Self::Uploading { file } => Some(file),
            _ => None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading { .. })
    }
}

/// Remote service health as shown by the header indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthState {
    #[default]
    Checking,
    Healthy,
    Unhealthy,
}

impl HealthState {
    /// Any status string other than the healthy sentinel is unhealthy; the
    /// client does not enumerate the service's degraded states.
    pub fn from_status(status: &str) -> Self {
        if status == "healthy" {
            Self::Healthy
        } else {
            Self::Unhealthy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Checking => "Verificando...",
            Self::Healthy => "Sistema operacional",
            Self::Unhealthy => "Sistema offline",
        }
    }
}
