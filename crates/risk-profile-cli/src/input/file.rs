use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file and deserialise into a typed struct.
///
/// `.yaml` and `.yml` files are parsed as YAML; everything else as JSON.
pub fn read_structured<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: T = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_profile_core::questionnaire::{AnswerSet, Choice, QuestionId};

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_reads_yaml_answers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "answers.yaml", "answers:\n  q1: 3\n  q3: Good\nplan: Plan C\n");
        let answers: AnswerSet = read_structured(&path).unwrap();
        assert_eq!(answers.get(QuestionId::Q1), Some(&Choice::Index(3)));
        assert_eq!(answers.get(QuestionId::Q3), Some(&Choice::Label("Good".into())));
        assert_eq!(answers.plan, Some(Choice::Label("Plan C".into())));
    }

    #[test]
    fn test_reads_json_answers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "answers.json", r#"{"answers":{"q2":"2–5 years"}}"#);
        let answers: AnswerSet = read_structured(&path).unwrap();
        assert_eq!(
            answers.get(QuestionId::Q2),
            Some(&Choice::Label("2–5 years".into()))
        );
        assert!(answers.plan.is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_structured::<AnswerSet>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
