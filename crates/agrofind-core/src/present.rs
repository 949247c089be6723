//! Display-only derivations from search results and operation errors.
//!
//! Everything here is a pure function: no state, no I/O, and the underlying
//! result records are never mutated.

use chrono::NaiveDate;

use crate::error::AgrofindError;

/// Maximum characters of chunk text shown on a result card.
pub const CHUNK_PREVIEW_CHARS: usize = 300;

/// Fallback message when a search fails without a structured detail.
pub const SEARCH_FAILURE_FALLBACK: &str = "Erro ao realizar busca. Tente novamente.";

/// Terminal-agnostic badge colors; the CLI maps these onto its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Blue,
    Green,
    Yellow,
    Gray,
    Magenta,
}

/// Display attributes for a category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryBadge {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: BadgeColor,
}

/// Fixed lookup over the known categories. Anything else renders as the
/// report classification instead of failing.
pub fn category_badge(category: &str) -> CategoryBadge {
    match category {
        "anuncio" => CategoryBadge {
            label: "Anúncio",
            icon: "📢",
            color: BadgeColor::Blue,
        },
        "organico" => CategoryBadge {
            label: "Orgânico",
            icon: "🌱",
            color: BadgeColor::Green,
        },
        _ => CategoryBadge {
            label: "Relatório",
            icon: "📊",
            color: BadgeColor::Magenta,
        },
    }
}

/// Three-level relevance classification derived from a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceTier {
    High,
    Medium,
    Low,
}

/// Boundaries are inclusive: exactly 0.70 is High and exactly 0.50 is Medium.
pub fn relevance_tier(similarity_score: f32) -> RelevanceTier {
    let percentage = similarity_score * 100.0;
    if percentage >= 70.0 {
        RelevanceTier::High
    } else if percentage >= 50.0 {
        RelevanceTier::Medium
    } else {
        RelevanceTier::Low
    }
}

impl RelevanceTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Média",
            Self::Low => "Baixa",
        }
    }

    pub fn color(&self) -> BadgeColor {
        match self {
            Self::High => BadgeColor::Green,
            Self::Medium => BadgeColor::Yellow,
            Self::Low => BadgeColor::Gray,
        }
    }
}

/// Percent string shown on the relevance badge.
pub fn relevance_percent(similarity_score: f32) -> String {
    format!("{:.0}%", similarity_score * 100.0)
}

/// Whitespace-delimited token count; a display metric, not authoritative.
pub fn word_count(chunk_text: &str) -> usize {
    chunk_text.split_whitespace().count()
}

/// Truncate for preview, appending `...` when text was cut. Counts chars,
/// not bytes, so multibyte text never splits mid-character.
pub fn truncate_chunk(chunk_text: &str, max_chars: usize) -> String {
    if chunk_text.chars().count() <= max_chars {
        chunk_text.to_string()
    } else {
        let cut: String = chunk_text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// Render an upload date in short form (`05 Mar 2025`). Unparseable input is
/// returned unchanged rather than erroring.
pub fn format_upload_date(raw: &str) -> String {
    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(raw) {
        return date.format("%d %b %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d %b %Y").to_string();
    }
    raw.to_string()
}

/// User-facing message for a failed search: the service's structured detail
/// when present, else a fixed fallback.
pub fn search_failure_message(err: &AgrofindError) -> String {
    err.api_detail()
        .map(str::to_string)
        .unwrap_or_else(|| SEARCH_FAILURE_FALLBACK.to_string())
}

/// User-facing message for a failed upload; falls back to the raw error text.
pub fn upload_failure_message(err: &AgrofindError) -> String {
    let detail = err
        .api_detail()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());
    format!("Erro ao fazer upload: {detail}")
}

/// Success message for an upload: the service's message when it sent one,
/// else a generated confirmation naming the file.
pub fn upload_success_message(service_message: Option<&str>, filename: &str) -> String {
    match service_message {
        Some(msg) if !msg.is_empty() => msg.to_string(),
        _ => format!("✅ {filename} enviado e indexado com sucesso!"),
    }
}
