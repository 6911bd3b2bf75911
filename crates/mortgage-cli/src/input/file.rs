use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML document (chosen by extension) into a typed struct.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
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

/// Resolve and validate the path, preventing directory traversal.
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
    use mortgage_core::amortization::LoanTerms;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mortgage-cli-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_yaml_loan_document() {
        let path = write_temp(
            "loan.yaml",
            "principal: \"80000\"\nperiodic_rate: \"0.004\"\nperiod_count: 12\nstart:\n  month: 1\n  year: 2025\n",
        );
        let terms: LoanTerms = read_document(path.to_str().unwrap()).unwrap();
        assert_eq!(terms.period_count, 12);
        assert_eq!(terms.start.year, 2025);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_reads_json_loan_document() {
        let path = write_temp(
            "loan.json",
            r#"{"principal":"1000","periodic_rate":"0.01","period_count":3,"start":{"month":5,"year":2026}}"#,
        );
        let terms: LoanTerms = read_document(path.to_str().unwrap()).unwrap();
        assert_eq!(terms.period_count, 3);
        assert_eq!(terms.start.month, 5);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_document::<LoanTerms>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
