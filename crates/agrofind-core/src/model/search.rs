use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Fixed number of results requested per search.
pub const SEARCH_TOP_K: usize = 10;

/// Request body for `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            query: query.into(),
            category,
            top_k: Some(SEARCH_TOP_K),
            date_from: None,
            date_to: None,
        }
    }
}

/// A single ranked hit. Field names are the wire contract; the order inside
/// `SearchResponse.results` is the service's ranking and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document_id: String,
    pub filename: String,
    /// Raw category tag. Values outside the known set still deserialize and
    /// display with the fallback classification (see `present`).
    pub category: String,
    pub chunk_text: String,
    pub similarity_score: f32,
    pub upload_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    pub gcs_url: String,
}

/// Response body for `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    pub processing_time_ms: f64,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub vector_db: String,
    pub total_vectors: u64,
    pub timestamp: String,
}

/// Response body for `POST /upload`. Opaque beyond the optional message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for `POST /ingest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub gcs_path: String,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::new("etanol 2025", Some(Category::Organico));
        assert_eq!(request.top_k, Some(SEARCH_TOP_K));
        assert!(request.date_from.is_none());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "etanol 2025");
        assert_eq!(json["category"], "organico");
        assert_eq!(json["top_k"], 10);
        // Absent optionals must not appear on the wire
        assert!(json.get("date_from").is_none());
    }

    #[test]
    fn test_search_request_no_category_omitted() {
        let request = SearchRequest::new("milho", None);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_search_result_wire_fields() {
        let json = r#"{
            "document_id": "abc-123",
            "filename": "safra.pdf",
            "category": "anuncio",
            "chunk_text": "tendências do etanol",
            "similarity_score": 0.82,
            "upload_date": "2025-03-05",
            "page_number": 4,
            "gcs_url": "https://storage.example.com/pdfs/safra.pdf"
        }"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.document_id, "abc-123");
        assert_eq!(result.category, "anuncio");
        assert_eq!(result.page_number, Some(4));
        assert!((result.similarity_score - 0.82).abs() < f32::EPSILON);
    }

    #[test]
    fn test_search_result_unknown_category_deserializes() {
        let json = r#"{
            "document_id": "d1",
            "filename": "relatorio.pdf",
            "category": "relatorio",
            "chunk_text": "texto",
            "similarity_score": 0.4,
            "upload_date": "2025-01-01",
            "gcs_url": "https://storage.example.com/relatorio.pdf"
        }"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.category, "relatorio");
        assert!(result.page_number.is_none());
    }

    #[test]
    fn test_search_response_order_preserved() {
        let json = r#"{
            "query": "soja",
            "results": [
                {"document_id": "b", "filename": "b.pdf", "category": "organico",
                 "chunk_text": "b", "similarity_score": 0.5, "upload_date": "2025-01-01",
                 "gcs_url": "gs://b"},
                {"document_id": "a", "filename": "a.pdf", "category": "anuncio",
                 "chunk_text": "a", "similarity_score": 0.9, "upload_date": "2025-01-02",
                 "gcs_url": "gs://a"}
            ],
            "total_results": 2,
            "processing_time_ms": 12.5
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        // The service's order wins even when scores are out of order
        assert_eq!(response.results[0].document_id, "b");
        assert_eq!(response.results[1].document_id, "a");
    }

    #[test]
    fn test_upload_response_tolerates_extra_fields() {
        let json = r#"{"success": true, "gcs_path": "pdfs/x.pdf", "message": "ok"}"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.as_deref(), Some("ok"));

        let bare: UploadResponse = serde_json::from_str("{}").unwrap();
        assert!(bare.message.is_none());
    }
}
