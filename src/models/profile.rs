// NetMotive IP Switcher - Profile Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Profile data model and serialization.
//!
//! A [`Profile`] is a named static IPv4 configuration: address, subnet mask,
//! gateway and an ordered list of DNS servers. Address fields are typed, so a
//! profile that exists is always valid.
//!
//! [`ProfileDraft`] is the unvalidated string form used at the editor form
//! and CSV boundaries; [`ProfileDraft::validate`] turns it into a profile.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::validation::{subnet_to_prefix, validate_dns_list, validate_ipv4, validate_profile_name};

/// A named static IPv4 network profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique, user-visible profile name.
    pub name: String,
    /// Static IPv4 address.
    pub ip_address: Ipv4Addr,
    /// Subnet mask in dotted-quad form.
    pub subnet_mask: Ipv4Addr,
    /// Default gateway.
    pub gateway: Ipv4Addr,
    /// DNS servers, primary first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<Ipv4Addr>,
}

impl Profile {
    /// Create a new profile without DNS servers.
    pub fn new(
        name: impl Into<String>,
        ip_address: Ipv4Addr,
        subnet_mask: Ipv4Addr,
        gateway: Ipv4Addr,
    ) -> Self {
        Self {
            name: name.into(),
            ip_address,
            subnet_mask,
            gateway,
            dns: Vec::new(),
        }
    }

    /// Builder-style helper to set the DNS servers.
    pub fn with_dns(mut self, dns: Vec<Ipv4Addr>) -> Self {
        self.dns = dns;
        self
    }

    /// Get the profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix length of the subnet mask, if the mask is contiguous.
    pub fn prefix_len(&self) -> Option<u8> {
        subnet_to_prefix(self.subnet_mask)
    }

    /// Check if the profile configures DNS servers.
    pub fn has_dns(&self) -> bool {
        !self.dns.is_empty()
    }

    /// DNS servers joined with the given separator.
    pub fn dns_joined(&self, separator: &str) -> String {
        self.dns
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// One-line summary for list rows, e.g. `10.0.0.5/24 via 10.0.0.1`.
    pub fn summary(&self) -> String {
        let address = match self.prefix_len() {
            Some(prefix) => format!("{}/{}", self.ip_address, prefix),
            None => format!("{} mask {}", self.ip_address, self.subnet_mask),
        };
        if self.has_dns() {
            format!("{} via {} · DNS {}", address, self.gateway, self.dns_joined(", "))
        } else {
            format!("{} via {}", address, self.gateway)
        }
    }

    /// Convert back into the editable string form.
    pub fn to_draft(&self) -> ProfileDraft {
        ProfileDraft {
            name: self.name.clone(),
            ip_address: self.ip_address.to_string(),
            subnet_mask: self.subnet_mask.to_string(),
            gateway: self.gateway.to_string(),
            dns: self.dns_joined("; "),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.summary())
    }
}

/// Unvalidated profile fields as entered by the user or read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub ip_address: String,
    pub subnet_mask: String,
    pub gateway: String,
    /// DNS servers separated by `;`, `,` or whitespace.
    pub dns: String,
}

impl ProfileDraft {
    /// Validate every field and build a [`Profile`].
    ///
    /// The first invalid field is reported.
    pub fn validate(&self) -> Result<Profile> {
        Ok(Profile {
            name: validate_profile_name(&self.name)?,
            ip_address: validate_ipv4("ip_address", &self.ip_address)?,
            subnet_mask: validate_ipv4("subnet_mask", &self.subnet_mask)?,
            gateway: validate_ipv4("gateway", &self.gateway)?,
            dns: validate_dns_list(&self.dns)?,
        })
    }

    /// Overlay the fields present in `changes`.
    pub fn apply_changes(&mut self, changes: &ProfileChanges) {
        if let Some(ref name) = changes.name {
            self.name = name.clone();
        }
        if let Some(ref ip) = changes.ip_address {
            self.ip_address = ip.clone();
        }
        if let Some(ref mask) = changes.subnet_mask {
            self.subnet_mask = mask.clone();
        }
        if let Some(ref gateway) = changes.gateway {
            self.gateway = gateway.clone();
        }
        if let Some(ref dns) = changes.dns {
            self.dns = dns.clone();
        }
    }
}

/// A partial update to an existing profile. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub gateway: Option<String>,
    pub dns: Option<String>,
}

impl ProfileChanges {
    /// Changes that replace every field with the values of `draft`.
    pub fn replace_all(draft: ProfileDraft) -> Self {
        Self {
            name: Some(draft.name),
            ip_address: Some(draft.ip_address),
            subnet_mask: Some(draft.subnet_mask),
            gateway: Some(draft.gateway),
            dns: Some(draft.dns),
        }
    }
}

/// Profile record in the older PascalCase layout (`ProfileName`, `IP`, ...).
///
/// Kept so that existing `profiles.json` files and CSV exports still load.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyProfileRecord {
    #[serde(rename = "ProfileName")]
    pub profile_name: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Subnet")]
    pub subnet: String,
    #[serde(rename = "Gateway")]
    pub gateway: String,
    #[serde(rename = "DNS1", default)]
    pub dns1: Option<String>,
    #[serde(rename = "DNS2", default)]
    pub dns2: Option<String>,
}

impl From<LegacyProfileRecord> for ProfileDraft {
    fn from(record: LegacyProfileRecord) -> Self {
        let dns = [record.dns1, record.dns2]
            .into_iter()
            .flatten()
            .filter(|d| !d.trim().is_empty())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            name: record.profile_name,
            ip_address: record.ip,
            subnet_mask: record.subnet,
            gateway: record.gateway,
            dns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office_draft() -> ProfileDraft {
        ProfileDraft {
            name: "Office".into(),
            ip_address: "10.0.0.5".into(),
            subnet_mask: "255.255.255.0".into(),
            gateway: "10.0.0.1".into(),
            dns: "8.8.8.8; 1.1.1.1".into(),
        }
    }

    #[test]
    fn test_draft_validation() {
        let profile = office_draft().validate().expect("draft should be valid");
        assert_eq!(profile.name(), "Office");
        assert_eq!(profile.ip_address, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(profile.dns, vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(1, 1, 1, 1)]);
        assert_eq!(profile.prefix_len(), Some(24));
    }

    #[test]
    fn test_draft_rejects_bad_gateway() {
        let mut draft = office_draft();
        draft.gateway = "999.1.1.1".into();
        let err = draft.validate().unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("gateway"));
    }

    #[test]
    fn test_draft_requires_name() {
        let mut draft = office_draft();
        draft.name = "  ".into();
        assert!(draft.validate().unwrap_err().is_validation_error());
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = office_draft().validate().unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Office");
        assert_eq!(json["ip_address"], "10.0.0.5");
        assert_eq!(json["dns"][1], "1.1.1.1");
    }

    #[test]
    fn test_profile_json_rejects_invalid_address() {
        let json =
            r#"{"name":"X","ip_address":"abc","subnet_mask":"255.0.0.0","gateway":"10.0.0.1"}"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn test_profile_without_dns_omits_field() {
        let profile = Profile::new(
            "Lab",
            Ipv4Addr::new(192, 168, 5, 10),
            Ipv4Addr::new(255, 255, 255, 0),
            Ipv4Addr::new(192, 168, 5, 1),
        );
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("dns"));
        let restored: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn test_apply_changes_keeps_untouched_fields() {
        let mut draft = office_draft();
        draft.apply_changes(&ProfileChanges {
            gateway: Some("10.0.0.254".into()),
            ..Default::default()
        });
        let profile = draft.validate().unwrap();
        assert_eq!(profile.gateway, Ipv4Addr::new(10, 0, 0, 254));
        assert_eq!(profile.ip_address, Ipv4Addr::new(10, 0, 0, 5));
    }

    #[test]
    fn test_legacy_record_conversion() {
        let json = r#"{
            "ProfileName": "OfficeLAN", "IP": "192.168.1.100", "Subnet": "255.255.255.0",
            "Gateway": "192.168.1.1", "DNS1": "8.8.8.8", "DNS2": ""
        }"#;
        let record: LegacyProfileRecord = serde_json::from_str(json).unwrap();
        let profile = ProfileDraft::from(record).validate().unwrap();
        assert_eq!(profile.name(), "OfficeLAN");
        assert_eq!(profile.dns, vec![Ipv4Addr::new(8, 8, 8, 8)]);
    }

    #[test]
    fn test_summary() {
        let profile = office_draft().validate().unwrap();
        assert_eq!(profile.summary(), "10.0.0.5/24 via 10.0.0.1 · DNS 8.8.8.8, 1.1.1.1");
    }
}
