// NetMotive IP Switcher - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation utilities for profiles and adapter names.

use std::net::Ipv4Addr;
use std::str::FromStr;

use super::error::{Error, Result};

/// Maximum length of a profile name, in characters.
pub const MAX_PROFILE_NAME_LEN: usize = 100;

/// Validate an IPv4 address string for the named field.
pub fn validate_ipv4(field: &'static str, s: &str) -> Result<Ipv4Addr> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::ValidationFailed(format!("{} is required", field)));
    }
    Ipv4Addr::from_str(s).map_err(|_| Error::invalid_ip(field, s))
}

/// Validate a DNS server address.
pub fn validate_dns_server(s: &str) -> Result<Ipv4Addr> {
    let s = s.trim();
    Ipv4Addr::from_str(s).map_err(|_| Error::InvalidDnsServer(s.to_string()))
}

/// Split free-form DNS text into server entries.
///
/// Accepts `;`, `,` and whitespace as separators; empty entries are ignored.
pub fn split_dns_list(s: &str) -> Vec<&str> {
    s.split(|c: char| c == ';' || c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Validate a list of DNS servers written as free-form text.
pub fn validate_dns_list(s: &str) -> Result<Vec<Ipv4Addr>> {
    split_dns_list(s).into_iter().map(validate_dns_server).collect()
}

/// Validate a profile name.
pub fn validate_profile_name(s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::ValidationFailed(
            "Profile name cannot be empty".to_string(),
        ));
    }
    if s.chars().count() > MAX_PROFILE_NAME_LEN {
        return Err(Error::ValidationFailed(format!(
            "Profile name must be {} characters or less",
            MAX_PROFILE_NAME_LEN
        )));
    }
    Ok(s.to_string())
}

/// Validate an adapter name before it is handed to an OS command.
pub fn validate_adapter_name(s: &str) -> Result<&str> {
    if s.trim().is_empty() {
        return Err(Error::ValidationFailed(
            "No network adapter selected".to_string(),
        ));
    }
    if s.chars().any(|c| c.is_control()) {
        return Err(Error::ValidationFailed(format!(
            "Adapter name contains control characters: {:?}",
            s
        )));
    }
    Ok(s)
}

/// Convert a dotted-quad subnet mask to a prefix length.
///
/// Returns `None` for masks whose one-bits are not contiguous.
pub fn subnet_to_prefix(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    if bits.checked_shl(ones).unwrap_or(0) == 0 {
        Some(ones as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ipv4() {
        assert!(validate_ipv4("ip_address", "192.168.1.1").is_ok());
        assert!(validate_ipv4("ip_address", " 10.0.0.5 ").is_ok());
        assert!(validate_ipv4("ip_address", "0.0.0.0").is_ok());
        assert!(validate_ipv4("ip_address", "255.255.255.255").is_ok());
    }

    #[test]
    fn test_validate_ipv4_rejects_non_ipv4() {
        let bad_values = [
            "999.1.1.1",
            "abc",
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "::1",
            "",
            "10.0.0.1/24",
        ];
        for bad in bad_values {
            let err = validate_ipv4("gateway", bad).unwrap_err();
            assert!(err.is_validation_error(), "{bad} should be a validation error");
        }
    }

    #[test]
    fn test_validate_ipv4_names_field() {
        let err = validate_ipv4("subnet_mask", "abc").unwrap_err();
        assert!(err.to_string().contains("subnet_mask"));
    }

    #[test]
    fn test_dns_list_separators() {
        let servers = validate_dns_list("8.8.8.8; 1.1.1.1,9.9.9.9  4.4.4.4").unwrap();
        assert_eq!(servers.len(), 4);
        assert_eq!(servers[0], Ipv4Addr::new(8, 8, 8, 8));
        assert!(validate_dns_list("").unwrap().is_empty());
        assert!(validate_dns_list("8.8.8.8;dns.google").is_err());
    }

    #[test]
    fn test_validate_profile_name() {
        assert_eq!(validate_profile_name("  Office ").unwrap(), "Office");
        assert!(validate_profile_name("   ").is_err());
        assert!(validate_profile_name(&"x".repeat(101)).is_err());
        assert!(validate_profile_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_adapter_name() {
        assert!(validate_adapter_name("Ethernet 2").is_ok());
        assert!(validate_adapter_name("").is_err());
        assert!(validate_adapter_name("eth0\n").is_err());
    }

    #[test]
    fn test_subnet_prefix_conversion() {
        assert_eq!(subnet_to_prefix(Ipv4Addr::new(255, 255, 255, 0)), Some(24));
        assert_eq!(subnet_to_prefix(Ipv4Addr::new(255, 255, 255, 255)), Some(32));
        assert_eq!(subnet_to_prefix(Ipv4Addr::new(0, 0, 0, 0)), Some(0));
        assert_eq!(subnet_to_prefix(Ipv4Addr::new(255, 0, 255, 0)), None);
    }
}
