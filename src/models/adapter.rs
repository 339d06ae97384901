// NetMotive IP Switcher - Adapter Information
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network adapters as reported by the operating system.
//!
//! Adapters are enumerated on demand and never persisted; a profile does not
//! remember which adapter it was applied to.

use serde::{Deserialize, Serialize};

/// Type of network adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterType {
    /// Wired Ethernet adapter.
    Ethernet,
    /// Wireless (WiFi) adapter.
    Wifi,
    /// Virtual adapter (bridges, tunnels, VPN, etc.).
    Virtual,
    /// Loopback interface.
    Loopback,
    /// Unknown or other type.
    Other,
}

impl AdapterType {
    /// Get icon name for this adapter type.
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Ethernet => "network-wired-symbolic",
            Self::Wifi => "network-wireless-symbolic",
            Self::Virtual => "network-vpn-symbolic",
            Self::Loopback => "network-workgroup-symbolic",
            Self::Other => "network-wired-symbolic",
        }
    }

    /// Get human-readable name for this adapter type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ethernet => "Ethernet",
            Self::Wifi => "Wi-Fi",
            Self::Virtual => "Virtual",
            Self::Loopback => "Loopback",
            Self::Other => "Network",
        }
    }

    /// Guess the adapter type from an interface or service name.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower == "lo" || lower.starts_with("loopback") {
            Self::Loopback
        } else if lower.contains("wi-fi")
            || lower.contains("wifi")
            || lower.contains("wireless")
            || lower.contains("wlan")
            || lower.starts_with("wl")
            || lower.contains("airport")
        {
            Self::Wifi
        } else if is_virtual_name(&lower) {
            Self::Virtual
        } else if lower.contains("ethernet")
            || lower.contains("lan")
            || lower.starts_with("en")
            || lower.starts_with("eth")
        {
            Self::Ethernet
        } else {
            Self::Other
        }
    }
}

/// Check if a lowercase name suggests a virtual/tunnel interface.
fn is_virtual_name(name: &str) -> bool {
    name.starts_with("veth")
        || name.starts_with("br")
        || name.starts_with("virbr")
        || name.starts_with("docker")
        || name.starts_with("vnet")
        || name.starts_with("tun")
        || name.starts_with("tap")
        || name.starts_with("utun")
        || name.contains("vpn")
        || name.contains("bridge")
        || name.contains("vethernet")
        || name.contains("podman")
}

/// Information about a detected network adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Name passed to configuration commands (interface or network service).
    pub name: String,
    /// Type of adapter.
    pub adapter_type: AdapterType,
    /// Whether the adapter is currently connected / enabled.
    pub is_connected: bool,
    /// State text as reported by the OS, if any.
    pub description: Option<String>,
}

impl AdapterInfo {
    /// Create a new AdapterInfo.
    pub fn new(name: impl Into<String>, adapter_type: AdapterType) -> Self {
        Self {
            name: name.into(),
            adapter_type,
            is_connected: false,
            description: None,
        }
    }

    /// Get a display label for the adapter.
    pub fn display_label(&self) -> String {
        if let Some(desc) = &self.description {
            format!("{} ({})", self.name, desc)
        } else {
            format!("{} - {}", self.name, self.adapter_type.display_name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_name() {
        assert_eq!(AdapterType::from_name("Wi-Fi"), AdapterType::Wifi);
        assert_eq!(AdapterType::from_name("wlp2s0"), AdapterType::Wifi);
        assert_eq!(AdapterType::from_name("Ethernet 2"), AdapterType::Ethernet);
        assert_eq!(AdapterType::from_name("USB 10/100/1000 LAN"), AdapterType::Ethernet);
        assert_eq!(AdapterType::from_name("enp3s0"), AdapterType::Ethernet);
        assert_eq!(AdapterType::from_name("Thunderbolt Bridge"), AdapterType::Virtual);
        assert_eq!(AdapterType::from_name("lo"), AdapterType::Loopback);
        assert_eq!(AdapterType::from_name("iPhone USB"), AdapterType::Other);
    }

    #[test]
    fn test_display_label() {
        let mut info = AdapterInfo::new("Ethernet", AdapterType::Ethernet);
        assert_eq!(info.display_label(), "Ethernet - Ethernet");
        info.description = Some("Connected".into());
        assert_eq!(info.display_label(), "Ethernet (Connected)");
    }
}
