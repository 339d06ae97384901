// NetMotive IP Switcher - UI Widgets
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Reusable GTK4 widget components.

mod status_pill;

pub use status_pill::{PillStatus, StatusPill};
