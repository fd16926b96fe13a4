//! CLI command implementations.

pub mod analyze;
pub mod inspect;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use datalens::{AnalysisConfig, AnalysisContext, AnalysisError};

/// Read an analysis request from a JSON file.
pub fn read_context(path: &Path) -> Result<AnalysisContext, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load the configuration file, or defaults when none is given.
pub fn load_config(path: Option<PathBuf>) -> Result<AnalysisConfig, AnalysisError> {
    match path {
        Some(p) => AnalysisConfig::load(p),
        None => Ok(AnalysisConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_context() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"researchQuestion": "Why?", "datasets": [{{"columns": ["a"], "rows": [{{"a": 1}}]}}]}}"#
        )
        .unwrap();

        let context = read_context(file.path()).unwrap();
        assert_eq!(context.question(), "Why?");
        assert_eq!(context.datasets.len(), 1);
    }

    #[test]
    fn test_read_context_missing_file() {
        let err = read_context(Path::new("/nonexistent/request.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn test_read_context_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            read_context(file.path()),
            Err(AnalysisError::Json(_))
        ));
    }

    #[test]
    fn test_default_config() {
        assert_eq!(load_config(None).unwrap(), AnalysisConfig::default());
    }
}
