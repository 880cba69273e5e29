//! Loading stores and object graphs from YAML/JSON

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from a file extension, defaulting to YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Deserialize from a YAML string
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    serde_yaml::from_str(yaml).map_err(|e| Error::parse(e.to_string()))
}

/// Deserialize from a JSON string
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::parse(e.to_string()))
}

/// Deserialize from a string in the given format
pub fn from_str<T: DeserializeOwned>(content: &str, format: Format) -> Result<T> {
    match format {
        Format::Yaml => from_yaml(content),
        Format::Json => from_json(content),
    }
}

/// Load a file (JSON or YAML based on extension)
pub fn from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    log::debug!("Loading {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(path.display().to_string(), e.to_string()))?;

    from_str(&content, Format::from_path(path)).map_err(|e| {
        e.with_help(format!("Check the syntax of '{}'", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::{IntOrTextStore, TextStore};
    use crate::typed::IntOrText;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("noext")), Format::Yaml);
    }

    #[test]
    fn test_from_yaml_and_json() {
        let store: TextStore = from_yaml("direct: localhost").unwrap();
        assert_eq!(store, TextStore::direct("localhost"));

        let store: IntOrTextStore = from_json(r#"{"direct": 5432}"#).unwrap();
        assert_eq!(store.direct, Some(IntOrText::Int(5432)));
    }

    #[test]
    fn test_invalid_input_is_parse_error() {
        let err = from_yaml::<TextStore>("direct: [unclosed").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);

        let err = from_json::<Value>("{").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = std::env::temp_dir().join("valstore_loader_test");
        std::fs::create_dir_all(&temp_dir).unwrap();
        let path = temp_dir.join("store.json");
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, r#"{{"direct": "web"}}"#).unwrap();
        }

        let store: TextStore = from_file(&path).unwrap();
        assert_eq!(store, TextStore::direct("web"));

        std::fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_file::<TextStore>("/nonexistent/valstore/store.yaml").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
