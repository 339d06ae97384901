// NetMotive IP Switcher - Status Pill Widget
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! A small pill-shaped status indicator, used for the selected adapter's
//! state and the most recently applied profile.

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use std::cell::{Cell, RefCell};

use ip_switcher::models::AdapterInfo;

/// Status variants for the pill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PillStatus {
    #[default]
    Inactive,
    Active,
    Pending,
    Error,
    Warning,
}

impl PillStatus {
    fn css_class(&self) -> &'static str {
        match self {
            PillStatus::Inactive => "dim-label",
            PillStatus::Active => "success",
            PillStatus::Pending => "accent",
            PillStatus::Error => "error",
            PillStatus::Warning => "warning",
        }
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct StatusPill {
        pub label: RefCell<Option<gtk::Label>>,
        pub status: Cell<PillStatus>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for StatusPill {
        const NAME: &'static str = "CdIpSwitcherStatusPill";
        type Type = super::StatusPill;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for StatusPill {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }
    }

    impl WidgetImpl for StatusPill {}
    impl BoxImpl for StatusPill {}
}

glib::wrapper! {
    pub struct StatusPill(ObjectSubclass<imp::StatusPill>)
        @extends gtk::Widget, gtk::Box;
}

impl StatusPill {
    pub fn new(text: &str, status: PillStatus) -> Self {
        let this: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Horizontal)
            .build();

        this.set_text(text);
        this.set_status(status);
        this
    }

    fn setup_ui(&self) {
        self.add_css_class("status-pill");
        self.set_halign(gtk::Align::Start);
        self.set_valign(gtk::Align::Center);

        let label = gtk::Label::new(None);
        label.add_css_class("caption");
        self.append(&label);

        *self.imp().label.borrow_mut() = Some(label);
    }

    /// Set the pill text.
    pub fn set_text(&self, text: &str) {
        if let Some(label) = self.imp().label.borrow().as_ref() {
            label.set_text(text);
        }
    }

    /// Set the status (changes styling).
    pub fn set_status(&self, status: PillStatus) {
        let imp = self.imp();
        self.remove_css_class(imp.status.get().css_class());
        self.add_css_class(status.css_class());
        imp.status.set(status);
    }

    /// Show an adapter's connection state.
    pub fn show_adapter(&self, adapter: Option<&AdapterInfo>) {
        match adapter {
            Some(adapter) if adapter.is_connected => {
                self.set_text("Connected");
                self.set_status(PillStatus::Active);
            }
            Some(adapter) => {
                let text = adapter.description.as_deref().unwrap_or("Disconnected");
                self.set_text(text);
                self.set_status(PillStatus::Warning);
            }
            None => {
                self.set_text("No adapter");
                self.set_status(PillStatus::Inactive);
            }
        }
    }
}

impl Default for StatusPill {
    fn default() -> Self {
        Self::new("", PillStatus::Inactive)
    }
}
