// NetMotive IP Switcher - CSV Import/Export
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Bulk import and export of profiles as CSV.
//!
//! The exported header is `name,ip_address,subnet_mask,gateway,dns` with DNS
//! servers joined by `;`. Import matches headers case-insensitively and also
//! accepts the PascalCase columns `ProfileName,IP,Subnet,Gateway,DNS1,DNS2`.
//!
//! Rows are reported by spreadsheet line number: the header is line 1.

use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{info, warn};

use crate::models::{Error, Profile, ProfileDraft, Result};
use crate::profile_store::ProfileStore;

/// Header written by [`export_csv`].
pub const CSV_HEADER: [&str; 5] = ["name", "ip_address", "subnet_mask", "gateway", "dns"];

/// Suggested file name for the example CSV.
pub const TEMPLATE_FILE_NAME: &str = "ip-profiles-example.csv";

/// Example row written by [`export_template_csv`].
const TEMPLATE_ROW: [&str; 5] = [
    "OfficeLAN",
    "192.168.1.100",
    "255.255.255.0",
    "192.168.1.1",
    "8.8.8.8;1.1.1.1",
];

/// A row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Spreadsheet line number (header is line 1).
    pub line: usize,
    /// Why the row was skipped.
    pub reason: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Outcome of a CSV import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Names of the profiles that were created, in file order.
    pub imported: Vec<String>,
    /// Rows that were rejected or collided with an existing name.
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    /// One-line summary for notifications.
    pub fn summary(&self) -> String {
        if self.skipped.is_empty() {
            format!("Imported {} profile(s)", self.imported.len())
        } else {
            format!(
                "Imported {} profile(s), skipped {} row(s)",
                self.imported.len(),
                self.skipped.len()
            )
        }
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct Columns {
    name: Option<usize>,
    ip_address: Option<usize>,
    subnet_mask: Option<usize>,
    gateway: Option<usize>,
    dns: Vec<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let mut columns = Self::default();
        for (index, raw) in header.iter().enumerate() {
            let key = raw.trim().trim_start_matches('\u{feff}').to_ascii_lowercase();
            let slot = match key.as_str() {
                "name" | "profilename" | "profile_name" | "profile" => &mut columns.name,
                "ip_address" | "ip" | "ipaddress" | "address" => &mut columns.ip_address,
                "subnet_mask" | "subnet" | "mask" | "netmask" => &mut columns.subnet_mask,
                "gateway" | "default_gateway" => &mut columns.gateway,
                "dns" | "dns_servers" | "dns1" | "dns2" => {
                    columns.dns.push(index);
                    continue;
                }
                _ => continue,
            };
            slot.get_or_insert(index);
        }

        let missing: Vec<&str> = [
            ("name", columns.name),
            ("ip_address", columns.ip_address),
            ("subnet_mask", columns.subnet_mask),
            ("gateway", columns.gateway),
        ]
        .iter()
        .filter(|(_, index)| index.is_none())
        .map(|(label, _)| *label)
        .collect();

        if !missing.is_empty() {
            return Err(Error::ImportFailed(format!(
                "CSV header is missing required column(s): {}",
                missing.join(", ")
            )));
        }
        Ok(columns)
    }

    fn draft(&self, record: &StringRecord) -> std::result::Result<ProfileDraft, String> {
        let field = |index: Option<usize>, label: &str| -> std::result::Result<String, String> {
            index
                .and_then(|i| record.get(i))
                .map(str::to_string)
                .ok_or_else(|| format!("missing value for column '{}'", label))
        };

        let dns = self
            .dns
            .iter()
            .filter_map(|&i| record.get(i))
            .filter(|value| !value.trim().is_empty())
            .collect::<Vec<_>>()
            .join(";");

        Ok(ProfileDraft {
            name: field(self.name, "name")?,
            ip_address: field(self.ip_address, "ip_address")?,
            subnet_mask: field(self.subnet_mask, "subnet_mask")?,
            gateway: field(self.gateway, "gateway")?,
            dns,
        })
    }
}

/// Parse CSV rows lazily into profiles.
///
/// Yields `(line, Ok(profile))` for valid rows and `(line, Err(reason))` for
/// rows that could not be read or failed validation. Fails only when the
/// header is unreadable or lacks a required column.
pub fn read_csv<R: Read>(
    reader: R,
) -> Result<impl Iterator<Item = (usize, std::result::Result<Profile, String>)>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::from_header(reader.headers()?)?;

    let mut last_line = 1;
    Ok(reader.into_records().map(move |record| {
        let line = match &record {
            Ok(r) => r.position().map(|p| p.line() as usize),
            Err(e) => e.position().map(|p| p.line() as usize),
        }
        .unwrap_or(last_line + 1);
        last_line = line;

        let parsed = record
            .map_err(|e| e.to_string())
            .and_then(|r| columns.draft(&r))
            .and_then(|draft| draft.validate().map_err(|e| e.to_string()));
        (line, parsed)
    }))
}

/// Import profiles from a CSV file into `store`.
///
/// Invalid rows and names that already exist are skipped and reported. A
/// persistence failure stops the import; rows created before it stay.
pub fn import_csv(store: &mut ProfileStore, path: &Path) -> Result<ImportReport> {
    let file = File::open(path)
        .map_err(|e| Error::ImportFailed(format!("{}: {}", path.display(), e)))?;

    let mut report = ImportReport::default();

    for (line, row) in read_csv(file)? {
        let profile = match row {
            Ok(profile) => profile,
            Err(reason) => {
                warn!("Skipping CSV line {}: {}", line, reason);
                report.skipped.push(SkippedRow { line, reason });
                continue;
            }
        };

        let name = profile.name.clone();
        match store.create(profile) {
            Ok(()) => report.imported.push(name),
            Err(Error::ProfileAlreadyExists(existing)) => {
                warn!("Skipping CSV line {}: profile '{}' already exists", line, existing);
                report.skipped.push(SkippedRow {
                    line,
                    reason: format!("a profile named '{}' already exists", existing),
                });
            }
            Err(e @ Error::PersistenceFailed { .. }) => return Err(e),
            Err(e) => report.skipped.push(SkippedRow {
                line,
                reason: e.to_string(),
            }),
        }
    }

    info!("CSV import from {:?}: {}", path, report.summary());
    Ok(report)
}

/// Write profiles as CSV to any writer.
pub fn write_csv<W: Write>(profiles: &[Profile], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(CSV_HEADER).map_err(export_error)?;
    for profile in profiles {
        writer
            .write_record([
                profile.name.clone(),
                profile.ip_address.to_string(),
                profile.subnet_mask.to_string(),
                profile.gateway.to_string(),
                profile.dns_joined(";"),
            ])
            .map_err(export_error)?;
    }
    writer.flush().map_err(|e| Error::ExportFailed(e.to_string()))
}

/// Export every profile in store order to a CSV file.
pub fn export_csv(store: &ProfileStore, path: &Path) -> Result<usize> {
    let file = File::create(path)
        .map_err(|e| Error::ExportFailed(format!("{}: {}", path.display(), e)))?;
    write_csv(store.list(), file)?;
    info!("Exported {} profile(s) to {:?}", store.len(), path);
    Ok(store.len())
}

/// Write a CSV file with the header and one example row.
pub fn export_template_csv(path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::ExportFailed(format!("{}: {}", path.display(), e)))?;
    let mut writer = WriterBuilder::new().from_writer(file);
    writer.write_record(CSV_HEADER).map_err(export_error)?;
    writer.write_record(TEMPLATE_ROW).map_err(export_error)?;
    writer.flush().map_err(|e| Error::ExportFailed(e.to_string()))?;
    info!("Wrote example CSV to {:?}", path);
    Ok(())
}

fn export_error(err: csv::Error) -> Error {
    Error::ExportFailed(err.to_string())
}
