// src/process/record.rs
use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::error::RowError;
use crate::process::utils::{clean_multiline_text, is_separator};

/// Columns every input file must carry, in the order they are reported.
pub const REQUIRED_COLUMNS: [&str; 5] = ["case_id", "prompt", "channel", "flag", "completion"];

/// Positions of the required columns within one file's header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
    case_id: usize,
    prompt: usize,
    channel: usize,
    flag: usize,
    completion: usize,
}

impl ColumnIndex {
    /// Resolve every required column against `headers`.
    ///
    /// On failure returns the missing names. A duplicated name resolves to
    /// its last occurrence.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, Vec<String>> {
        let mut found = [None; REQUIRED_COLUMNS.len()];
        for (pos, header) in headers.iter().enumerate() {
            if let Some(slot) = REQUIRED_COLUMNS.iter().position(|name| *name == header) {
                found[slot] = Some(pos);
            }
        }

        match found {
            [Some(case_id), Some(prompt), Some(channel), Some(flag), Some(completion)] => {
                Ok(Self {
                    case_id,
                    prompt,
                    channel,
                    flag,
                    completion,
                })
            }
            _ => Err(REQUIRED_COLUMNS
                .iter()
                .zip(found)
                .filter(|(_, pos)| pos.is_none())
                .map(|(name, _)| name.to_string())
                .collect()),
        }
    }
}

/// One data row of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub case_id: String,
    pub prompt: String,
    pub channel: String,
    pub flag: String,
    pub completion: String,
}

impl InputRecord {
    /// Pull the named fields out of one row.
    ///
    /// Only `prompt` and `completion` must be present; a short row leaves the
    /// other fields empty.
    pub fn from_row(row: &StringRecord, idx: &ColumnIndex) -> Result<Self, RowError> {
        let required = |pos: usize, name: &'static str| {
            row.get(pos)
                .map(str::to_string)
                .ok_or(RowError::MissingField(name))
        };
        let optional = |pos: usize| row.get(pos).unwrap_or_default().to_string();

        Ok(Self {
            case_id: optional(idx.case_id),
            prompt: required(idx.prompt, "prompt")?,
            channel: optional(idx.channel),
            flag: optional(idx.flag),
            completion: required(idx.completion, "completion")?,
        })
    }
}

/// The JSONL line emitted for an accepted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub prompt: String,
    #[serde(rename = "referenceResponse")]
    pub reference_response: String,
}

impl TryFrom<&InputRecord> for OutputRecord {
    type Error = RowError;

    fn try_from(rec: &InputRecord) -> Result<Self, Self::Error> {
        let prompt = rec.prompt.trim_matches(is_separator);
        if prompt.is_empty() {
            return Err(RowError::EmptyPrompt);
        }
        let completion = rec.completion.trim_matches(is_separator);
        if completion.is_empty() {
            return Err(RowError::EmptyCompletion);
        }

        Ok(Self {
            prompt: clean_multiline_text(prompt),
            reference_response: completion.to_string(),
        })
    }
}
