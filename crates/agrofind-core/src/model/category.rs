use serde::{Deserialize, Serialize};

/// Document classification tag attached to uploaded and retrieved documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anuncio,
    Organico,
}

/// All known categories, in upload-form order.
pub const ALL_CATEGORIES: &[Category] = &[Category::Anuncio, Category::Organico];

impl Category {
    /// Wire string used by the remote service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anuncio => "anuncio",
            Self::Organico => "organico",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anuncio" => Ok(Self::Anuncio),
            "organico" => Ok(Self::Organico),
            _ => Err(format!(
                "categoria desconhecida: {s} (esperado 'anuncio' ou 'organico')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings() {
        assert_eq!(Category::Anuncio.to_string(), "anuncio");
        assert_eq!(Category::Organico.to_string(), "organico");
        assert_eq!(
            serde_json::to_string(&Category::Organico).unwrap(),
            "\"organico\""
        );
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("ANUNCIO".parse::<Category>().unwrap(), Category::Anuncio);
        assert_eq!("organico".parse::<Category>().unwrap(), Category::Organico);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "relatorio".parse::<Category>().unwrap_err();
        assert!(err.contains("categoria desconhecida"));
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let parsed: Category = serde_json::from_str("\"anuncio\"").unwrap();
        assert_eq!(parsed, Category::Anuncio);
    }
}
