//! Convert support-case CSV exports into line-delimited JSON evaluation
//! datasets of `{"prompt", "referenceResponse"}` records.

pub mod error;
pub mod process;
pub mod validate;

pub use error::{ConvertError, Result, RowError};
pub use process::{convert, utils::clean_multiline_text, ConversionReport};
pub use validate::{validate, ValidationReport};
