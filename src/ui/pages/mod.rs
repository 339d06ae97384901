// NetMotive IP Switcher - UI Pages Module
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Main content pages for the application.

mod activity_page;
mod profiles_page;

pub use activity_page::ActivityPage;
pub use profiles_page::ProfilesPage;
