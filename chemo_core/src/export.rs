//! RTF document export for clinicians and patients.
//!
//! Both documents are landscape US Letter with half-inch margins in a
//! monospaced font so the calendar grid lines up. The provider document is
//! ASCII-only; the patient document uses larger type and plain language.

use crate::calendar::render_calendar;
use crate::config::ExportConfig;
use crate::report::{ascii_sanitize, patient_intro, provider_summary};
use crate::{Calculation, Error, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const RTF_HEADER: &str = concat!(
    r"{\rtf1\ansi\deff0",
    r"{\fonttbl{\f0\fmodern Courier New;}{\f1\fmodern Consolas;}}",
    r"\paperw15840\paperh12240\margl720\margr720\margt720\margb720 "
);

/// Which audience a document is written for
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Provider,
    Patient,
}

impl DocumentKind {
    /// Suggested file name when the caller does not pick one
    pub fn default_file_name(&self) -> &'static str {
        match self {
            DocumentKind::Provider => "Chemo_Provider_Order.rtf",
            DocumentKind::Patient => "Chemo_Patient_Handout.rtf",
        }
    }

    /// Render the document body for this audience
    pub fn render(&self, calc: &Calculation, config: &ExportConfig, prepared_on: NaiveDate) -> String {
        match self {
            DocumentKind::Provider => provider_document(calc, config, prepared_on),
            DocumentKind::Patient => patient_document(calc, config, prepared_on),
        }
    }
}

/// Clinician document: summary, Sig, dispense total and calendar, ASCII only
pub fn provider_document(calc: &Calculation, config: &ExportConfig, prepared_on: NaiveDate) -> String {
    let calendar = render_calendar(&calc.schedule, calc.inputs.tablet_strength_mg(), config.columns);

    let mut body = String::new();
    body.push_str(r"\f0\fs20 \b ");
    body.push_str(&rtf_escape(&ascii_sanitize(&config.title)));
    body.push_str(r"\b0\line ");
    body.push_str(&format!("Prepared {}", prepared_on.format("%Y-%m-%d")));
    body.push_str(r"\line\line ");

    body.push_str(r"\b Provider Summary\b0\line ");
    body.push_str(&rtf_lines(&ascii_sanitize(&provider_summary(calc))));
    body.push_str(r"\line ");
    body.push_str(&format!(
        "Total tablets to dispense: {}",
        calc.total_tablets
    ));
    body.push_str(r"\line\line ");

    body.push_str(r"\b Pharmacy Sig\b0\line ");
    body.push_str(&rtf_escape(&ascii_sanitize(&calc.sig)));
    body.push_str(r"\line\line ");

    body.push_str(r"\b Calendar\b0\line ");
    body.push_str(&rtf_lines(&ascii_sanitize(&calendar)));

    format!("{}{}}}", RTF_HEADER, body)
}

/// Patient handout: plain-language intro, tablet total and calendar
pub fn patient_document(calc: &Calculation, config: &ExportConfig, prepared_on: NaiveDate) -> String {
    let calendar = render_calendar(&calc.schedule, calc.inputs.tablet_strength_mg(), config.columns);

    let mut body = String::new();
    body.push_str(r"\f0\fs24 \b Your Chemotherapy Tablet Schedule\b0\line ");
    body.push_str(&format!("Prepared {}", prepared_on.format("%Y-%m-%d")));
    body.push_str(r"\line ");
    body.push_str(&rtf_escape(&patient_intro(calc)));
    body.push_str(r"\line ");
    body.push_str(&format!(
        "Total tablets for the course: {}",
        calc.total_tablets
    ));
    body.push_str(r"\line\line ");
    body.push_str(r"\b Daily Plan\b0\line ");
    body.push_str(&rtf_lines(&calendar));

    format!("{}{}}}", RTF_HEADER, body)
}

/// Escape RTF control characters; non-ASCII becomes a `\uN?` escape
pub fn rtf_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!(r"\u{}?", *unit as i16));
                }
            }
        }
    }
    out
}

/// Escape a multi-line block and join its lines with RTF line breaks
fn rtf_lines(text: &str) -> String {
    text.lines()
        .map(rtf_escape)
        .collect::<Vec<_>>()
        .join(r"\line ")
}

/// Write a document atomically
///
/// The contents go to a temp file in the destination directory which is
/// locked, synced and then renamed over `path`.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if path.file_name().is_none() {
        return Err(Error::Export(format!(
            "export path {:?} does not name a file",
            path
        )));
    }
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported document to {:?}", path);
    Ok(())
}
