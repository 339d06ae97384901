// NetMotive IP Switcher - Library
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Core of the IP Switcher: profiles, their storage, CSV transfer and the
//! platform commands that apply a profile to a network adapter.
//!
//! Everything here is GUI-free so it can be tested headless; the GTK shell
//! lives in the binary behind the `gui` feature.

pub mod adapter_ops;
pub mod apply;
pub mod csv_transfer;
pub mod models;
pub mod profile_store;
pub mod storage;

pub use apply::ApplyEngine;
pub use csv_transfer::{export_csv, export_template_csv, import_csv, read_csv, ImportReport};
pub use models::{Error, Result};
pub use profile_store::ProfileStore;
pub use storage::DataStore;
