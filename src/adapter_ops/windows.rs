// NetMotive IP Switcher - Windows Adapter Operations
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Adapter operations backed by `netsh`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{AdapterOps, CommandOutput, CommandSpec, Elevation};
use crate::models::validation::validate_adapter_name;
use crate::models::{AdapterInfo, AdapterType, Profile, Result};

/// `Admin State  State  Type  Interface Name`; the name may contain spaces.
static INTERFACE_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)\s+(\S.*?)\s*$")
        .expect("interface row pattern is valid")
});

/// Messages `netsh` prints for rejected commands, sometimes with exit code 0.
static NETSH_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        concat!(
            r"(?im)^\s*(the syntax supplied for this command is not valid",
            r"|the following command was not found|element not found|the parameter is incorrect",
            r"|the filename, directory name, or volume label syntax is incorrect)",
        ),
    )
    .expect("netsh error pattern is valid")
});

/// `net session` output when the process is not elevated.
static ACCESS_DENIED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)system error 5\b|access is denied").expect("access denied pattern is valid")
});

/// Windows adapter operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsAdapterOps;

impl AdapterOps for WindowsAdapterOps {
    fn platform(&self) -> &'static str {
        "Windows"
    }

    fn list_command(&self) -> CommandSpec {
        CommandSpec::new("List adapters", "netsh").args(["interface", "show", "interface"])
    }

    fn parse_adapters(&self, stdout: &str) -> Vec<AdapterInfo> {
        stdout
            .lines()
            .skip_while(|line| !is_separator(line))
            .skip(1)
            .filter_map(|line| INTERFACE_ROW.captures(line))
            .filter_map(|caps| {
                let state = caps[2].to_string();
                let kind = &caps[3];
                let name = caps[4].to_string();

                let adapter_type = if kind.eq_ignore_ascii_case("loopback") {
                    AdapterType::Loopback
                } else {
                    AdapterType::from_name(&name)
                };
                if adapter_type == AdapterType::Loopback {
                    return None;
                }

                let mut info = AdapterInfo::new(name, adapter_type);
                info.is_connected = state.eq_ignore_ascii_case("connected");
                info.description = Some(state);
                Some(info)
            })
            .collect()
    }

    fn privilege_probe(&self) -> Option<CommandSpec> {
        // `net session` only succeeds in an elevated process.
        Some(CommandSpec::new("Check administrator rights", "net").arg("session"))
    }

    fn elevation(&self, output: &CommandOutput) -> Elevation {
        let text = output.combined();
        if output.success() {
            Elevation::Elevated
        } else if ACCESS_DENIED.is_match(&text) {
            Elevation::NotElevated
        } else {
            // e.g. the Server service is stopped, which says nothing about rights.
            Elevation::Unknown(text)
        }
    }

    fn privilege_hint(&self) -> &'static str {
        "Changing adapter settings requires administrator rights. \
         Restart IP Switcher with \"Run as administrator\"."
    }

    fn apply_commands(&self, profile: &Profile, adapter: &str) -> Result<Vec<CommandSpec>> {
        let adapter = validate_adapter_name(adapter)?;

        let mut commands = vec![CommandSpec::new("Set static address", "netsh")
            .args(["interface", "ipv4", "set", "address"])
            .arg(adapter)
            .arg("static")
            .arg(profile.ip_address.to_string())
            .arg(profile.subnet_mask.to_string())
            .arg(profile.gateway.to_string())];

        for (index, server) in profile.dns.iter().enumerate() {
            let command = if index == 0 {
                CommandSpec::new("Set primary DNS server", "netsh")
                    .args(["interface", "ipv4", "set", "dnsservers"])
                    .arg(adapter)
                    .arg("static")
                    .arg(server.to_string())
                    .arg("primary")
            } else {
                CommandSpec::new(format!("Add DNS server {}", index + 1), "netsh")
                    .args(["interface", "ipv4", "add", "dnsservers"])
                    .arg(adapter)
                    .arg(server.to_string())
                    .arg(format!("index={}", index + 1))
            };
            commands.push(command);
        }

        Ok(commands)
    }

    fn unexpected_output(&self, output: &CommandOutput) -> Option<String> {
        NETSH_ERROR
            .find(&output.combined())
            .map(|m| m.as_str().trim().to_string())
    }
}

fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const SHOW_INTERFACE: &str = "\r\n\
Admin State    State          Type             Interface Name\r\n\
-------------------------------------------------------------------------\r\n\
Enabled        Connected      Dedicated        Ethernet\r\n\
Enabled        Disconnected   Dedicated        Wi-Fi 2\r\n\
Disabled       Disconnected   Dedicated        vEthernet (Default Switch)\r\n\
Enabled        Connected      Loopback         Loopback Pseudo-Interface 1\r\n\
\r\n";

    fn office() -> Profile {
        Profile::new(
            "Office",
            Ipv4Addr::new(10, 0, 0, 5),
            Ipv4Addr::new(255, 255, 255, 0),
            Ipv4Addr::new(10, 0, 0, 1),
        )
    }

    #[test]
    fn test_parse_show_interface() {
        let adapters = WindowsAdapterOps.parse_adapters(SHOW_INTERFACE);
        let names: Vec<_> = adapters.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ethernet", "Wi-Fi 2", "vEthernet (Default Switch)"]);

        assert!(adapters[0].is_connected);
        assert_eq!(adapters[0].adapter_type, AdapterType::Ethernet);
        assert!(!adapters[1].is_connected);
        assert_eq!(adapters[1].adapter_type, AdapterType::Wifi);
        assert_eq!(adapters[1].description.as_deref(), Some("Disconnected"));
        assert_eq!(adapters[2].adapter_type, AdapterType::Virtual);
    }

    #[test]
    fn test_parse_without_table_is_empty() {
        assert!(WindowsAdapterOps.parse_adapters("No interfaces.\r\n").is_empty());
    }

    #[test]
    fn test_commands_without_dns() {
        let commands = WindowsAdapterOps.apply_commands(&office(), "Ethernet").unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0].command_line(),
            "netsh interface ipv4 set address Ethernet static 10.0.0.5 255.255.255.0 10.0.0.1"
        );
    }

    #[test]
    fn test_commands_with_dns() {
        let profile = office().with_dns(vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(1, 1, 1, 1)]);
        let commands = WindowsAdapterOps.apply_commands(&profile, "Wi-Fi 2").unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[1].args,
            vec![
                "interface",
                "ipv4",
                "set",
                "dnsservers",
                "Wi-Fi 2",
                "static",
                "8.8.8.8",
                "primary"
            ]
        );
        assert_eq!(
            commands[2].args,
            vec!["interface", "ipv4", "add", "dnsservers", "Wi-Fi 2", "1.1.1.1", "index=2"]
        );
    }

    #[test]
    fn test_elevation_from_net_session() {
        let denied = CommandOutput {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "System error 5 has occurred.\r\n\r\nAccess is denied.\r\n".into(),
        };
        let server_stopped = CommandOutput {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "The Server service is not started.\r\n".into(),
        };
        let elevated = CommandOutput {
            exit_code: Some(0),
            stdout: "There are no entries in the list.\r\n".into(),
            stderr: String::new(),
        };

        assert_eq!(WindowsAdapterOps.elevation(&denied), Elevation::NotElevated);
        assert!(matches!(
            WindowsAdapterOps.elevation(&server_stopped),
            Elevation::Unknown(ref text) if text.contains("Server service")
        ));
        assert_eq!(WindowsAdapterOps.elevation(&elevated), Elevation::Elevated);
    }

    #[test]
    fn test_rejects_empty_adapter() {
        assert!(WindowsAdapterOps
            .apply_commands(&office(), "  ")
            .unwrap_err()
            .is_validation_error());
    }

    #[test]
    fn test_unexpected_output() {
        let output = CommandOutput {
            exit_code: Some(0),
            stdout: "Element not found.\r\n".into(),
            stderr: String::new(),
        };
        assert_eq!(
            WindowsAdapterOps.unexpected_output(&output).as_deref(),
            Some("Element not found")
        );
        assert!(WindowsAdapterOps.unexpected_output(&CommandOutput::default()).is_none());
    }
}
