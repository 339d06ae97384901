// NetMotive IP Switcher - Profile Store
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Persistent collection of profiles.
//!
//! Profiles are kept in insertion order and keyed by name (exact,
//! case-sensitive match after trimming). Every mutation rewrites the whole
//! JSON file through a sibling temp file and a rename; if the write fails the
//! in-memory collection is left as it was.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::models::profile::LegacyProfileRecord;
use crate::models::validation::validate_profile_name;
use crate::models::{Error, Profile, ProfileChanges, ProfileDraft, Result};

/// Ordered, file-backed collection of profiles.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
    load_warnings: Vec<String>,
}

impl ProfileStore {
    /// Load the store from `path`.
    ///
    /// Never fails: a missing file gives an empty store. An unreadable or
    /// malformed file, or one with records that had to be skipped, is copied
    /// to `<file>.corrupt` before anything can overwrite it; the reasons are
    /// kept in [`ProfileStore::load_warnings`].
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut load_warnings = Vec::new();

        let profiles = match fs::read(&path) {
            Ok(bytes) => match parse_profiles(&bytes) {
                Ok(parsed) => {
                    info!("Loaded {} profile(s) from {:?}", parsed.profiles.len(), path);
                    if !parsed.skipped.is_empty() {
                        load_warnings.extend(parsed.skipped);
                        load_warnings.push(backup_notice(&path));
                    }
                    parsed.profiles
                }
                Err(e) => {
                    error!("Profiles file {:?} is malformed: {}", path, e);
                    load_warnings.push(e.to_string());
                    load_warnings.push(backup_notice(&path));
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No profiles file at {:?}, starting empty", path);
                Vec::new()
            }
            Err(e) => {
                error!("Failed to read profiles file {:?}: {}", path, e);
                load_warnings.push(format!("Could not read {}: {}", path.display(), e));
                load_warnings.push(backup_notice(&path));
                Vec::new()
            }
        };

        Self {
            path,
            profiles,
            load_warnings,
        }
    }

    /// Problems found while loading, in the order they were met.
    ///
    /// Empty when the file was missing or every record loaded.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All profiles in insertion order.
    pub fn list(&self) -> &[Profile] {
        &self.profiles
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the store has no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.position(name).map(|i| &self.profiles[i])
    }

    /// Check if a profile with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Add a new profile and persist.
    pub fn create(&mut self, mut profile: Profile) -> Result<()> {
        profile.name = validate_profile_name(&profile.name)?;
        if self.contains(&profile.name) {
            return Err(Error::ProfileAlreadyExists(profile.name));
        }

        let name = profile.name.clone();
        let mut updated = self.profiles.clone();
        updated.push(profile);
        self.commit(updated)?;

        info!("Created profile '{}'", name);
        Ok(())
    }

    /// Apply `changes` to the profile named `name` and persist.
    ///
    /// A changed name is checked for collisions with other profiles.
    pub fn update(&mut self, name: &str, changes: &ProfileChanges) -> Result<Profile> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::ProfileNotFound(name.trim().to_string()))?;

        let mut draft = self.profiles[index].to_draft();
        draft.apply_changes(changes);
        let profile = draft.validate()?;

        if let Some(other) = self.position(&profile.name) {
            if other != index {
                return Err(Error::ProfileAlreadyExists(profile.name));
            }
        }

        let mut updated = self.profiles.clone();
        updated[index] = profile.clone();
        self.commit(updated)?;

        if profile.name != name.trim() {
            info!("Updated profile '{}' (renamed to '{}')", name.trim(), profile.name);
        } else {
            info!("Updated profile '{}'", profile.name);
        }
        Ok(profile)
    }

    /// Remove the profile named `name` and persist.
    pub fn delete(&mut self, name: &str) -> Result<Profile> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::ProfileNotFound(name.trim().to_string()))?;

        let mut updated = self.profiles.clone();
        let removed = updated.remove(index);
        self.commit(updated)?;

        info!("Deleted profile '{}'", removed.name);
        Ok(removed)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.profiles.iter().position(|p| p.name == name)
    }

    /// Write `profiles` to disk, then make them the current collection.
    fn commit(&mut self, profiles: Vec<Profile>) -> Result<()> {
        write_profiles(&self.path, &profiles).map_err(|e| {
            error!("Failed to save profiles to {:?}: {}", self.path, e);
            Error::persistence(&self.path, e)
        })?;
        self.profiles = profiles;
        Ok(())
    }
}

/// Records read from the profiles file, plus why any were left out.
#[derive(Debug, Default)]
struct ParsedProfiles {
    profiles: Vec<Profile>,
    skipped: Vec<String>,
}

/// Parse the profiles file, accepting both the current and the PascalCase layout.
fn parse_profiles(bytes: &[u8]) -> Result<ParsedProfiles> {
    let content = std::str::from_utf8(bytes)
        .map_err(|e| Error::MalformedProfiles(format!("not valid UTF-8: {}", e)))?;
    if content.trim().is_empty() {
        return Ok(ParsedProfiles::default());
    }

    let records: Vec<Value> = serde_json::from_str(content)?;
    let mut parsed = ParsedProfiles {
        profiles: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };

    for (index, record) in records.into_iter().enumerate() {
        let profile = match parse_record(record) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Skipping profile record #{}: {}", index + 1, e);
                parsed.skipped.push(format!("Record #{} was skipped: {}", index + 1, e));
                continue;
            }
        };

        if parsed.profiles.iter().any(|p| p.name == profile.name) {
            warn!("Skipping duplicate profile name '{}' in profiles file", profile.name);
            parsed.skipped.push(format!(
                "Record #{} was skipped: duplicate profile name '{}'",
                index + 1,
                profile.name
            ));
            continue;
        }
        parsed.profiles.push(profile);
    }

    Ok(parsed)
}

fn parse_record(record: Value) -> Result<Profile> {
    if record.get("ProfileName").is_some() {
        let legacy: LegacyProfileRecord = serde_json::from_value(record)?;
        return ProfileDraft::from(legacy).validate();
    }

    let profile: Profile = serde_json::from_value(record)?;
    // Re-check the name; addresses are already typed.
    let name = validate_profile_name(&profile.name)?;
    Ok(Profile { name, ..profile })
}

/// Copy the profiles file aside so the next save does not destroy it.
fn backup_corrupt_file(path: &Path) -> Option<PathBuf> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".corrupt");
    let backup = PathBuf::from(backup);

    match fs::copy(path, &backup) {
        Ok(_) => {
            warn!("Copied profiles file to {:?}", backup);
            Some(backup)
        }
        Err(e) => {
            error!("Failed to back up profiles file {:?}: {}", path, e);
            None
        }
    }
}

/// Back up `path` and describe where the original content went.
fn backup_notice(path: &Path) -> String {
    match backup_corrupt_file(path) {
        Some(backup) => format!("The original file was saved as {}", backup.display()),
        None => format!(
            "The original file could not be backed up; saving will overwrite {}",
            path.display()
        ),
    }
}

/// Write profiles through a sibling temp file and rename it into place.
fn write_profiles(path: &Path, profiles: &[Profile]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = (|| -> std::io::Result<()> {
        let file = File::create(&tmp)?;
        // Set restrictive permissions on the profiles file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, profiles)?;
        writer.write_all(b"\n")?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn profile(name: &str, last_octet: u8) -> Profile {
        Profile::new(
            name,
            Ipv4Addr::new(10, 0, 0, last_octet),
            Ipv4Addr::new(255, 255, 255, 0),
            Ipv4Addr::new(10, 0, 0, 1),
        )
    }

    fn temp_store() -> (tempfile::TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::load(dir.path().join("profiles.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_persists_in_insertion_order() {
        let (dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();
        store.create(profile("Home", 6)).unwrap();
        store.create(profile("Lab", 7)).unwrap();

        let reloaded = ProfileStore::load(dir.path().join("profiles.json"));
        let names: Vec<_> = reloaded.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Office", "Home", "Lab"]);
        assert_eq!(reloaded.get("Home"), Some(&profile("Home", 6)));
    }

    #[test]
    fn test_duplicate_create_leaves_store_unchanged() {
        let (_dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();

        let err = store.create(profile("Office", 99)).unwrap_err();
        assert!(matches!(err, Error::ProfileAlreadyExists(ref n) if n == "Office"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Office").unwrap().ip_address, Ipv4Addr::new(10, 0, 0, 5));
    }

    #[test]
    fn test_names_are_trimmed_and_case_sensitive() {
        let (_dir, mut store) = temp_store();
        store.create(profile("  Office ", 5)).unwrap();
        assert!(store.contains("Office"));
        assert!(store.get(" Office").is_some());
        store.create(profile("office", 6)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_changes_fields() {
        let (dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();

        let updated = store
            .update(
                "Office",
                &ProfileChanges {
                    dns: Some("8.8.8.8".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.dns, vec![Ipv4Addr::new(8, 8, 8, 8)]);

        let reloaded = ProfileStore::load(dir.path().join("profiles.json"));
        assert_eq!(reloaded.get("Office").unwrap().dns, vec![Ipv4Addr::new(8, 8, 8, 8)]);
    }

    #[test]
    fn test_update_rename_and_collision() {
        let (_dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();
        store.create(profile("Home", 6)).unwrap();

        let err = store
            .update(
                "Office",
                &ProfileChanges {
                    name: Some("Home".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::ProfileAlreadyExists(_)));

        store
            .update(
                "Office",
                &ProfileChanges {
                    name: Some("Office 2".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        let names: Vec<_> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Office 2", "Home"]);
    }

    #[test]
    fn test_update_invalid_value_is_rejected() {
        let (_dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();

        let err = store
            .update(
                "Office",
                &ProfileChanges {
                    gateway: Some("10.0.0.300".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(store.get("Office").unwrap().gateway, Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn test_update_and_delete_missing() {
        let (_dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();

        assert!(matches!(
            store.update("Nope", &ProfileChanges::default()),
            Err(Error::ProfileNotFound(_))
        ));
        assert!(matches!(store.delete("Nope"), Err(Error::ProfileNotFound(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete() {
        let (dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();
        store.create(profile("Home", 6)).unwrap();

        let removed = store.delete("Office").unwrap();
        assert_eq!(removed.name, "Office");

        let reloaded = ProfileStore::load(dir.path().join("profiles.json"));
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get("Office").is_none());
    }

    #[test]
    fn test_malformed_file_loads_empty_and_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(&path, "{ not json").unwrap();

        let store = ProfileStore::load(&path);
        assert!(store.is_empty());
        assert!(!store.load_warnings().is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("profiles.json.corrupt")).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn test_non_utf8_file_is_backed_up_before_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let original = b"[{\"name\": \"Caf\xe9\"}]".to_vec();
        fs::write(&path, &original).unwrap();

        let mut store = ProfileStore::load(&path);
        assert!(store.is_empty());
        assert!(store.load_warnings()[0].contains("UTF-8"));

        store.create(profile("Office", 5)).unwrap();
        assert_eq!(fs::read(dir.path().join("profiles.json.corrupt")).unwrap(), original);
        assert_eq!(ProfileStore::load(&path).len(), 1);
    }

    #[test]
    fn test_skipped_record_survives_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(
            &path,
            r#"[
                {"ProfileName": "Lab", "IP": "", "Subnet": "", "Gateway": ""},
                {"name": "Home", "ip_address": "192.168.0.20", "subnet_mask": "255.255.255.0",
                 "gateway": "192.168.0.1"}
            ]"#,
        )
        .unwrap();

        let mut store = ProfileStore::load(&path);
        assert_eq!(store.len(), 1);
        assert!(store.load_warnings()[0].starts_with("Record #1 was skipped"));

        store.create(profile("Office", 5)).unwrap();
        let backup = fs::read_to_string(dir.path().join("profiles.json.corrupt")).unwrap();
        assert!(backup.contains("\"Lab\""));
        assert!(!fs::read_to_string(&path).unwrap().contains("\"Lab\""));
    }

    #[test]
    fn test_clean_file_has_no_warnings_or_backup() {
        let (dir, mut store) = temp_store();
        store.create(profile("Office", 5)).unwrap();

        let reloaded = ProfileStore::load(dir.path().join("profiles.json"));
        assert!(reloaded.load_warnings().is_empty());
        assert!(!dir.path().join("profiles.json.corrupt").exists());
    }

    #[test]
    fn test_legacy_file_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(
            &path,
            r#"[
                {"ProfileName": "OfficeLAN", "IP": "192.168.1.100", "Subnet": "255.255.255.0",
                 "Gateway": "192.168.1.1", "DNS1": "8.8.8.8", "DNS2": "1.1.1.1"},
                {"name": "Home", "ip_address": "192.168.0.20", "subnet_mask": "255.255.255.0",
                 "gateway": "192.168.0.1"},
                {"name": "Home", "ip_address": "192.168.0.99", "subnet_mask": "255.255.255.0",
                 "gateway": "192.168.0.1"},
                {"name": "Broken", "ip_address": "999.0.0.1", "subnet_mask": "255.255.255.0",
                 "gateway": "192.168.0.1"}
            ]"#,
        )
        .unwrap();

        let store = ProfileStore::load(&path);
        let names: Vec<_> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["OfficeLAN", "Home"]);
        assert_eq!(store.get("OfficeLAN").unwrap().dns.len(), 2);
        assert_eq!(store.get("Home").unwrap().ip_address, Ipv4Addr::new(192, 168, 0, 20));

        // One duplicate and one invalid record, then where the backup went.
        assert_eq!(store.load_warnings().len(), 3);
        assert!(store.load_warnings()[0].contains("duplicate profile name 'Home'"));
        assert!(dir.path().join("profiles.json.corrupt").exists());
    }

    #[test]
    fn test_failed_save_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be makes every write fail.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut store = ProfileStore::load(blocker.join("profiles.json"));

        let err = store.create(profile("Office", 5)).unwrap_err();
        assert!(matches!(err, Error::PersistenceFailed { .. }));
        assert!(store.is_empty());
    }
}
