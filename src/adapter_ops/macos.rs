// NetMotive IP Switcher - macOS Adapter Operations
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Adapter operations backed by `networksetup`.
//!
//! `networksetup` addresses network *services* ("Wi-Fi", "USB 10/100/1000 LAN"),
//! not BSD interface names, so the service name is what gets listed and applied.

use super::{AdapterOps, CommandOutput, CommandSpec, Elevation};
use crate::models::validation::validate_adapter_name;
use crate::models::{AdapterInfo, AdapterType, Profile, Result};

/// macOS adapter operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacAdapterOps;

impl AdapterOps for MacAdapterOps {
    fn platform(&self) -> &'static str {
        "macOS"
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("List network services", "networksetup").arg("-listallnetworkservices")
    }

    fn parse_adapters(&self, stdout: &str) -> Vec<AdapterInfo> {
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.contains("asterisk (*)"))
            .map(|line| {
                let (name, enabled) = match line.strip_prefix('*') {
                    Some(rest) => (rest.trim(), false),
                    None => (line, true),
                };
                let mut info = AdapterInfo::new(name, AdapterType::from_name(name));
                info.is_connected = enabled;
                info.description = Some(if enabled { "Enabled" } else { "Disabled" }.to_string());
                info
            })
            .collect()
    }

    fn privilege_probe(&self) -> Option<CommandSpec> {
        Some(CommandSpec::new("Check root privileges", "id").arg("-u"))
    }

    fn elevation(&self, output: &CommandOutput) -> Elevation {
        match output.stdout.trim() {
            _ if !output.success() => Elevation::Unknown(output.combined()),
            "0" => Elevation::Elevated,
            _ => Elevation::NotElevated,
        }
    }

    fn privilege_hint(&self) -> &'static str {
        "Changing network services requires root privileges. Start IP Switcher with sudo."
    }

    fn apply_commands(&self, profile: &Profile, adapter: &str) -> Result<Vec<CommandSpec>> {
        let service = validate_adapter_name(adapter)?;

        let mut commands = vec![CommandSpec::new("Set static address", "networksetup")
            .arg("-setmanual")
            .arg(service)
            .arg(profile.ip_address.to_string())
            .arg(profile.subnet_mask.to_string())
            .arg(profile.gateway.to_string())];

        if profile.has_dns() {
            commands.push(
                CommandSpec::new("Set DNS servers", "networksetup")
                    .arg("-setdnsservers")
                    .arg(service)
                    .args(profile.dns.iter().map(|d| d.to_string())),
            );
        }

        Ok(commands)
    }

    fn unexpected_output(&self, output: &CommandOutput) -> Option<String> {
        // networksetup reports most failures on stdout with exit code 0.
        output
            .combined()
            .lines()
            .map(str::trim)
            .find(|line| {
                line.starts_with("** Error")
                    || line.contains("is not a recognized network service")
                    || line.contains("is not a valid")
            })
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const SERVICES: &str = "An asterisk (*) denotes that a network service is disabled.\n\
USB 10/100/1000 LAN\n\
Wi-Fi\n\
*Thunderbolt Bridge\n";

    fn home() -> Profile {
        Profile::new(
            "Home",
            Ipv4Addr::new(192, 168, 1, 50),
            Ipv4Addr::new(255, 255, 255, 0),
            Ipv4Addr::new(192, 168, 1, 1),
        )
    }

    #[test]
    fn test_parse_services() {
        let adapters = MacAdapterOps.parse_adapters(SERVICES);
        let names: Vec<_> = adapters.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["USB 10/100/1000 LAN", "Wi-Fi", "Thunderbolt Bridge"]);
        assert!(adapters[1].is_connected);
        assert_eq!(adapters[1].adapter_type, AdapterType::Wifi);
        assert!(!adapters[2].is_connected);
        assert_eq!(adapters[2].description.as_deref(), Some("Disabled"));
    }

    #[test]
    fn test_root_probe() {
        let root = CommandOutput {
            exit_code: Some(0),
            stdout: "0\n".into(),
            stderr: String::new(),
        };
        let user = CommandOutput {
            exit_code: Some(0),
            stdout: "501\n".into(),
            stderr: String::new(),
        };
        assert_eq!(MacAdapterOps.elevation(&root), Elevation::Elevated);
        assert_eq!(MacAdapterOps.elevation(&user), Elevation::NotElevated);
    }

    #[test]
    fn test_commands() {
        let profile = home().with_dns(vec![Ipv4Addr::new(9, 9, 9, 9), Ipv4Addr::new(1, 1, 1, 1)]);
        let commands = MacAdapterOps.apply_commands(&profile, "Wi-Fi").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0].command_line(),
            "networksetup -setmanual Wi-Fi 192.168.1.50 255.255.255.0 192.168.1.1"
        );
        assert_eq!(
            commands[1].command_line(),
            "networksetup -setdnsservers Wi-Fi 9.9.9.9 1.1.1.1"
        );
    }

    #[test]
    fn test_commands_without_dns_skip_dns_step() {
        let commands = MacAdapterOps.apply_commands(&home(), "Wi-Fi").unwrap();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_unexpected_output() {
        let output = CommandOutput {
            exit_code: Some(0),
            stdout: "Ethernet 9 is not a recognized network service.\n\
                     ** Error: The parameters were not valid.\n"
                .into(),
            stderr: String::new(),
        };
        assert_eq!(
            MacAdapterOps.unexpected_output(&output).as_deref(),
            Some("Ethernet 9 is not a recognized network service.")
        );
        assert!(MacAdapterOps.unexpected_output(&CommandOutput::default()).is_none());
    }
}
