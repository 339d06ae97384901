// NetMotive IP Switcher - UI Module
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! User interface components.

mod main_window;
pub mod pages;
mod profile_dialog;
pub mod widgets;

pub use main_window::MainWindow;
pub use profile_dialog::ProfileDialog;
