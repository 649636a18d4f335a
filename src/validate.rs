// src/validate.rs
use serde_json::Value;
use std::{fmt, fs, path::Path};
use tracing::{info, warn};

use crate::error::Result;
use crate::process::utils::preview;

/// Characters of `prompt` shown per sampled record.
pub const PROMPT_PREVIEW_CHARS: usize = 100;

pub const DEFAULT_SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample {
    Record {
        /// 1-based line number in the output file.
        line: usize,
        prompt: String,
        reference_response: String,
    },
    Invalid {
        line: usize,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub total_lines: usize,
    pub samples: Vec<Sample>,
}

impl ValidationReport {
    pub fn invalid_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| matches!(s, Sample::Invalid { .. }))
            .count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Results:")?;
        writeln!(f, "Total records in JSONL: {}", self.total_lines)?;
        writeln!(f)?;
        writeln!(f, "Sample records (first {}):", self.samples.len())?;
        writeln!(f, "{:-<80}", "")?;
        for sample in &self.samples {
            match sample {
                Sample::Record {
                    line,
                    prompt,
                    reference_response,
                } => {
                    writeln!(f, "Record {}:", line)?;
                    writeln!(f, "  Prompt: {}", prompt)?;
                    writeln!(f, "  Reference Response: {}", reference_response)?;
                    writeln!(f)?;
                }
                Sample::Invalid { line, error } => {
                    writeln!(f, "  Invalid JSON in line {}: {}", line, error)?;
                }
            }
        }
        Ok(())
    }
}

/// Re-read a produced JSONL file, count its lines and preview the first
/// `sample_size` records. A bad sampled line is reported inline and does not
/// stop the rest.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn validate<P: AsRef<Path>>(path: P, sample_size: usize) -> Result<ValidationReport> {
    let text = fs::read_to_string(path.as_ref())?;
    let lines: Vec<&str> = text.lines().collect();

    let samples: Vec<Sample> = lines
        .iter()
        .take(sample_size)
        .enumerate()
        .map(|(i, raw)| match preview_line(raw) {
            Ok((prompt, reference_response)) => Sample::Record {
                line: i + 1,
                prompt,
                reference_response,
            },
            Err(error) => {
                warn!(line = i + 1, %error, "invalid sampled record");
                Sample::Invalid { line: i + 1, error }
            }
        })
        .collect();

    let report = ValidationReport {
        total_lines: lines.len(),
        samples,
    };
    info!(
        total = report.total_lines,
        invalid = report.invalid_count(),
        "validated output"
    );
    Ok(report)
}

fn preview_line(raw: &str) -> std::result::Result<(String, String), String> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(|e| e.to_string())?;
    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| format!("missing string field '{}'", key))
    };

    let prompt = field("prompt")?;
    let reference_response = field("referenceResponse")?;
    Ok((
        preview(prompt, PROMPT_PREVIEW_CHARS),
        reference_response.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::NamedTempFile;

    fn jsonl(lines: &[&str]) -> Result<NamedTempFile> {
        let tmp = NamedTempFile::new()?;
        fs::write(tmp.path(), lines.join("\n") + "\n")?;
        Ok(tmp)
    }

    #[test]
    fn samples_only_leading_lines() -> Result<()> {
        let long_prompt = "p".repeat(150);
        let first = format!(r#"{{"prompt":"{}","referenceResponse":"Billing"}}"#, long_prompt);
        let tmp = jsonl(&[
            first.as_str(),
            r#"{"prompt":"short","referenceResponse":"Shipping"}"#,
            r#"{"prompt":"c","referenceResponse":"x"}"#,
            r#"{"prompt":"d","referenceResponse":"y"}"#,
            r#"{"prompt":"e","referenceResponse":"z"}"#,
        ])?;

        let report = validate(tmp.path(), 2)?;
        assert_eq!(report.total_lines, 5);
        assert_eq!(
            report.samples,
            vec![
                Sample::Record {
                    line: 1,
                    prompt: format!("{}...", "p".repeat(100)),
                    reference_response: "Billing".into(),
                },
                Sample::Record {
                    line: 2,
                    prompt: "short".into(),
                    reference_response: "Shipping".into(),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn bad_lines_reported_inline() -> Result<()> {
        let tmp = jsonl(&[
            "not json",
            r#"{"prompt":"only prompt"}"#,
            r#"{"prompt":"ok","referenceResponse":"Done"}"#,
        ])?;

        let report = validate(tmp.path(), 5)?;
        assert_eq!(report.total_lines, 3);
        assert_eq!(report.samples.len(), 3);
        assert_eq!(report.invalid_count(), 2);
        assert!(matches!(report.samples[0], Sample::Invalid { line: 1, .. }));
        assert!(matches!(
            &report.samples[1],
            Sample::Invalid { line: 2, error } if error.contains("referenceResponse")
        ));
        assert!(matches!(report.samples[2], Sample::Record { line: 3, .. }));

        let shown = report.to_string();
        assert!(shown.contains("Total records in JSONL: 3"));
        assert!(shown.contains("Invalid JSON in line 1"));
        assert!(shown.contains("  Reference Response: Done"));
        Ok(())
    }

    #[test]
    fn empty_output_has_no_samples() -> Result<()> {
        let tmp = NamedTempFile::new()?;
        let report = validate(tmp.path(), 5)?;
        assert_eq!(report.total_lines, 0);
        assert!(report.samples.is_empty());
        Ok(())
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(validate("/definitely/not/here.jsonl", 5).is_err());
    }
}
