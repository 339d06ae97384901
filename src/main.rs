// NetMotive IP Switcher - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # IP Switcher
//!
//! A GTK4/libadwaita switcher for static IPv4 network profiles.
//!
//! This is the main entry point for the GUI application.

use gtk4::glib;
use gtk4::prelude::*;
use std::env;

mod application;
mod ui;

use application::Application;

/// Application ID for GNOME/Freedesktop.
pub const APP_ID: &str = ip_switcher::models::APP_ID;

/// Human-readable application name.
pub const APP_NAME: &str = "IP Switcher";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line description shared by `--help` and `--version`.
const ABOUT: &str =
    "Save static IPv4 configurations as named profiles and apply them to a network adapter.";

/// Print version information and exit.
fn print_version() {
    println!("{} {}", APP_NAME, VERSION);
    println!("Copyright (C) 2026 Christos A. Daggas");
    println!("License: MIT");
    println!();
    println!("{}", ABOUT);
}

/// Print help information and exit.
fn print_help() {
    println!(
        "Usage: {} [OPTIONS]",
        env::args().next().unwrap_or_else(|| "ip-switcher".to_string())
    );
    println!();
    println!("{}", ABOUT);
    println!();
    println!("Options:");
    println!("  -h, --help       Show this help message and exit");
    println!("  -v, --version    Show version information and exit");
    println!("  -d, --debug      Enable debug logging");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG         Set log level (trace, debug, info, warn, error)");
    println!();
    println!("Applying a profile needs administrator rights on Windows and root on macOS.");
    println!("On Linux, NetworkManager asks for authorization through polkit.");
}

fn main() -> glib::ExitCode {
    // Parse command-line arguments before GTK initialization
    let args: Vec<String> = env::args().collect();
    let mut debug_mode = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return glib::ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return glib::ExitCode::SUCCESS;
            }
            "-d" | "--debug" => {
                debug_mode = true;
            }
            _ => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Try '--help' for more information.");
                return glib::ExitCode::FAILURE;
            }
        }
    }

    // Set the program name to match StartupWMClass in the .desktop file
    glib::set_prgname(Some(APP_ID));
    glib::set_application_name(APP_NAME);

    // Initialize logging with appropriate level
    let log_level = if debug_mode {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Initialize GTK and Libadwaita
    if let Err(e) = libadwaita::init() {
        eprintln!("Failed to initialize libadwaita: {}", e);
        eprintln!("This application requires a graphical environment.");
        return glib::ExitCode::FAILURE;
    }

    if gtk4::gdk::Display::default().is_none() {
        eprintln!("No display found. This application requires a graphical environment.");
        return glib::ExitCode::FAILURE;
    }

    // Create and run the application
    let app = Application::new();
    app.run_with_args::<&str>(&[])
}
