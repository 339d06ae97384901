// NetMotive IP Switcher - Linux Adapter Operations
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Adapter operations backed by NetworkManager's `nmcli`.
//!
//! Changes are made with `nmcli device modify`, which updates the active
//! device configuration without rewriting the saved connection profile.
//! NetworkManager authorizes each request through polkit, so there is no
//! up-front privilege probe.

use super::{AdapterOps, CommandOutput, CommandSpec};
use crate::models::validation::validate_adapter_name;
use crate::models::{AdapterInfo, AdapterType, Error, Profile, Result};

/// Linux adapter operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxAdapterOps;

impl AdapterOps for LinuxAdapterOps {
    fn platform(&self) -> &'static str {
        "Linux"
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("List devices", "nmcli").args([
            "-t",
            "-f",
            "DEVICE,TYPE,STATE",
            "device",
            "status",
        ])
    }

    fn parse_adapters(&self, stdout: &str) -> Vec<AdapterInfo> {
        let mut adapters: Vec<AdapterInfo> = stdout
            .lines()
            .filter_map(|line| {
                let fields = split_terse(line);
                let [device, kind, state] = fields.as_slice() else {
                    return None;
                };
                if device.is_empty() {
                    return None;
                }

                let adapter_type = type_from_nmcli(kind, device);
                if adapter_type == AdapterType::Loopback || kind == "wifi-p2p" {
                    return None;
                }

                let mut info = AdapterInfo::new(device.as_str(), adapter_type);
                info.is_connected = state.starts_with("connected");
                info.description = Some(state.clone());
                Some(info)
            })
            .collect();

        adapters.sort_by_cached_key(|a| (natural_sort_key(&a.name), a.name.clone()));
        adapters
    }

    fn privilege_hint(&self) -> &'static str {
        "NetworkManager refused the change. Make sure your user may modify network \
         settings (polkit) or run IP Switcher with sudo."
    }

    fn apply_commands(&self, profile: &Profile, adapter: &str) -> Result<Vec<CommandSpec>> {
        let device = validate_adapter_name(adapter)?;
        let prefix = profile.prefix_len().ok_or_else(|| {
            Error::ValidationFailed(format!(
                "Subnet mask {} is not contiguous and cannot be written as a prefix length",
                profile.subnet_mask
            ))
        })?;

        let mut commands = vec![CommandSpec::new("Set static address", "nmcli")
            .args(["device", "modify"])
            .arg(device)
            .args(["ipv4.method", "manual", "ipv4.addresses"])
            .arg(format!("{}/{}", profile.ip_address, prefix))
            .arg("ipv4.gateway")
            .arg(profile.gateway.to_string())];

        if profile.has_dns() {
            commands.push(
                CommandSpec::new("Set DNS servers", "nmcli")
                    .args(["device", "modify"])
                    .arg(device)
                    .arg("ipv4.dns")
                    .arg(profile.dns_joined(","))
                    .args(["ipv4.ignore-auto-dns", "yes"]),
            );
        }

        Ok(commands)
    }

    fn unexpected_output(&self, output: &CommandOutput) -> Option<String> {
        output
            .combined()
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with("Error:"))
            .map(str::to_string)
    }
}

/// Split an `nmcli -t` line on unescaped colons, unescaping `\:` and `\\`.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = vec![String::new()];
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let (Some(next), Some(field)) = (chars.next(), fields.last_mut()) {
                    field.push(next);
                }
            }
            ':' => fields.push(String::new()),
            _ => {
                if let Some(field) = fields.last_mut() {
                    field.push(c);
                }
            }
        }
    }
    fields
}

/// Map an nmcli device type to an adapter type.
fn type_from_nmcli(kind: &str, device: &str) -> AdapterType {
    match kind {
        "ethernet" => AdapterType::Ethernet,
        "wifi" => AdapterType::Wifi,
        "loopback" => AdapterType::Loopback,
        "bridge" | "bond" | "team" | "vlan" | "tun" | "veth" | "wireguard" | "vpn"
        | "macvlan" | "vxlan" | "dummy" => AdapterType::Virtual,
        _ => AdapterType::from_name(device),
    }
}

/// One run of a device name: digits compare by value, everything else as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NameChunk {
    Number(u64),
    Text(String),
}

/// Split a device name into chunks so `eth2` sorts before `eth10`.
fn natural_sort_key(s: &str) -> Vec<NameChunk> {
    let mut chunks = Vec::new();
    let mut rest = s;

    while let Some(first) = rest.chars().next() {
        let is_digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);

        chunks.push(match run.parse::<u64>() {
            Ok(n) if is_digit => NameChunk::Number(n),
            _ => NameChunk::Text(run.to_string()),
        });
        rest = tail;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const DEVICE_STATUS: &str = "wlp2s0:wifi:connected\n\
eth10:ethernet:unavailable\n\
eth2:ethernet:connected\n\
lo:loopback:connected (externally)\n\
docker0:bridge:connected (externally)\n\
p2p-dev-wlp2s0:wifi-p2p:disconnected\n";

    fn lab() -> Profile {
        Profile::new(
            "Lab",
            Ipv4Addr::new(172, 16, 4, 20),
            Ipv4Addr::new(255, 255, 252, 0),
            Ipv4Addr::new(172, 16, 4, 1),
        )
    }

    #[test]
    fn test_natural_sort_key() {
        assert_eq!(
            natural_sort_key("enp3s0"),
            vec![
                NameChunk::Text("enp".into()),
                NameChunk::Number(3),
                NameChunk::Text("s".into()),
                NameChunk::Number(0),
            ]
        );
        assert_ne!(natural_sort_key("enp3s0"), natural_sort_key("enp3f0"));
        assert!(natural_sort_key("eth2") < natural_sort_key("eth10"));

        let mut names = vec!["eth10", "enp3s0", "eth2", "enp10s0", "enp3f0"];
        names.sort_by_key(|n| natural_sort_key(n));
        assert_eq!(names, vec!["enp3f0", "enp3s0", "enp10s0", "eth2", "eth10"]);
    }

    #[test]
    fn test_natural_sort_key_long_digit_run() {
        let key = natural_sort_key("veth99999999999999999999999");
        assert_eq!(key[1], NameChunk::Text("99999999999999999999999".into()));
    }

    #[test]
    fn test_split_terse_unescapes() {
        assert_eq!(
            split_terse(r"my\:dev:ethernet:connected"),
            vec!["my:dev", "ethernet", "connected"]
        );
    }

    #[test]
    fn test_parse_device_status() {
        let adapters = LinuxAdapterOps.parse_adapters(DEVICE_STATUS);
        let names: Vec<_> = adapters.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["docker0", "eth2", "eth10", "wlp2s0"]);

        let eth2 = &adapters[1];
        assert!(eth2.is_connected);
        assert_eq!(eth2.adapter_type, AdapterType::Ethernet);
        assert!(!adapters[2].is_connected);
        assert_eq!(adapters[0].adapter_type, AdapterType::Virtual);
        assert_eq!(adapters[3].adapter_type, AdapterType::Wifi);
    }

    #[test]
    fn test_commands() {
        let profile = lab().with_dns(vec![Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(8, 8, 4, 4)]);
        let commands = LinuxAdapterOps.apply_commands(&profile, "eth2").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0].command_line(),
            "nmcli device modify eth2 ipv4.method manual \
             ipv4.addresses 172.16.4.20/22 ipv4.gateway 172.16.4.1"
        );
        assert_eq!(
            commands[1].command_line(),
            "nmcli device modify eth2 ipv4.dns 1.1.1.1,8.8.4.4 ipv4.ignore-auto-dns yes"
        );
        assert!(LinuxAdapterOps.privilege_probe().is_none());
    }

    #[test]
    fn test_non_contiguous_mask_is_rejected() {
        let mut profile = lab();
        profile.subnet_mask = Ipv4Addr::new(255, 0, 255, 0);
        let err = LinuxAdapterOps.apply_commands(&profile, "eth2").unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_unexpected_output() {
        let output = CommandOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: "Error: Device 'eth9' not found.\n".into(),
        };
        assert_eq!(
            LinuxAdapterOps.unexpected_output(&output).as_deref(),
            Some("Error: Device 'eth9' not found.")
        );
    }
}
