//! Value parsers for CLI arguments that clap cannot check on its own

use std::fs;
use std::path::PathBuf;

use crate::models::ConfigForm;

/// Settings file given with `--config` must exist and be readable
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.is_file() {
        return Err(format!("Settings file does not exist or is not a file: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read settings file '{}': {}", path_str, e))
}

/// `--form` takes the configuration form as a JSON object
pub fn parse_form_json(raw: &str) -> Result<ConfigForm, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("Form is not valid JSON: {}", e))?;

    if !value.is_object() {
        return Err("Form must be a JSON object".to_string());
    }

    ConfigForm::from_json(&value).map_err(|e| format!("Form does not match the configuration fields: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_file_path_missing() {
        let err = validate_config_file_path("/definitely/not/here.toml").unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_config_file_path_existing() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());
    }

    #[test]
    fn test_config_file_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_parse_form_json() {
        let form = parse_form_json(
            r#"{"serverUrl": "https://status.example.com/api", "checkSSL": true, "includeUrl": true}"#,
        )
        .unwrap();
        assert_eq!(form.server_url.as_deref(), Some("https://status.example.com/api"));
        assert_eq!(form.check_ssl, Some(true));
        assert_eq!(form.include_url, Some(true));
        assert_eq!(form.only_on_failure_or_recovery, None);
    }

    #[test]
    fn test_parse_form_json_rejects_non_objects() {
        assert!(parse_form_json("[1, 2]").is_err());
        assert!(parse_form_json("{not json").is_err());
        assert!(parse_form_json(r#"{"includeUrl": "yes please"}"#).is_err());
    }
}
