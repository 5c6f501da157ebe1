//! Seed catalog commands.

use std::io::Write;
use std::path::Path;

use frosteva_storefront::seed::{self, CatalogIssue};

use crate::error::CliError;

/// Validate a seed catalog file offline.
///
/// Every invalid entry is reported before failing.
pub fn validate(path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let forms = seed::parse_catalog(&json)?;
    let issues = seed::validate_catalog(&forms);

    write_report(forms.len(), &issues, out)?;
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidCatalog(issues.len()))
    }
}

fn write_report(
    total: usize,
    issues: &[CatalogIssue],
    out: &mut impl Write,
) -> std::io::Result<()> {
    for issue in issues {
        let name = issue.name.as_deref().unwrap_or("<unnamed>");
        writeln!(out, "entry {} ({name}):", issue.index)?;
        for field in issue.errors.fields() {
            writeln!(out, "  {}: {}", field.field, field.message)?;
        }
    }
    writeln!(out, "{} of {total} entries valid", total - issues.len())
}
