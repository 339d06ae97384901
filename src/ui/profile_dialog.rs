// NetMotive IP Switcher - Profile Dialog
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Create/Edit dialog for a single profile.
//!
//! Fields are checked as the user types; the save callback runs only for a
//! draft that validates, and the dialog stays open when it returns an error.

use adw::prelude::*;
use gtk4 as gtk;
use libadwaita as adw;
use std::rc::Rc;

use ip_switcher::models::validation::{validate_dns_list, validate_ipv4, validate_profile_name};
use ip_switcher::models::{Error, ProfileDraft, Result};

/// Which entry row an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    IpAddress,
    SubnetMask,
    Gateway,
    Dns,
}

impl Field {
    fn for_error(error: &Error) -> Option<Self> {
        match error {
            Error::InvalidIpAddress { field, .. } => match *field {
                "ip_address" => Some(Self::IpAddress),
                "subnet_mask" => Some(Self::SubnetMask),
                "gateway" => Some(Self::Gateway),
                _ => None,
            },
            Error::InvalidDnsServer(_) => Some(Self::Dns),
            Error::ProfileAlreadyExists(_) | Error::ValidationFailed(_) => Some(Self::Name),
            _ => None,
        }
    }
}

struct Fields {
    name: adw::EntryRow,
    ip_address: adw::EntryRow,
    subnet_mask: adw::EntryRow,
    gateway: adw::EntryRow,
    dns: adw::EntryRow,
}

impl Fields {
    fn row(&self, field: Field) -> &adw::EntryRow {
        match field {
            Field::Name => &self.name,
            Field::IpAddress => &self.ip_address,
            Field::SubnetMask => &self.subnet_mask,
            Field::Gateway => &self.gateway,
            Field::Dns => &self.dns,
        }
    }

    fn all(&self) -> [&adw::EntryRow; 5] {
        [&self.name, &self.ip_address, &self.subnet_mask, &self.gateway, &self.dns]
    }

    fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            name: self.name.text().to_string(),
            ip_address: self.ip_address.text().to_string(),
            subnet_mask: self.subnet_mask.text().to_string(),
            gateway: self.gateway.text().to_string(),
            dns: self.dns.text().to_string(),
        }
    }

    /// Check one field as typed. Empty required fields are not flagged until save.
    fn check(&self, field: Field) -> bool {
        let text = self.row(field).text();
        let text = text.trim();
        if text.is_empty() {
            return true;
        }
        match field {
            Field::Name => validate_profile_name(text).is_ok(),
            Field::IpAddress => validate_ipv4("ip_address", text).is_ok(),
            Field::SubnetMask => validate_ipv4("subnet_mask", text).is_ok(),
            Field::Gateway => validate_ipv4("gateway", text).is_ok(),
            Field::Dns => validate_dns_list(text).is_ok(),
        }
    }

    fn mark(&self, field: Field, valid: bool) {
        let row = self.row(field);
        if valid {
            row.remove_css_class("error");
        } else {
            row.add_css_class("error");
        }
    }
}

/// Modal form for creating or editing a profile.
pub struct ProfileDialog {
    dialog: adw::Dialog,
    fields: Rc<Fields>,
    save_btn: gtk::Button,
    error_label: gtk::Label,
}

impl ProfileDialog {
    /// Build the dialog, pre-filled from `draft`.
    pub fn new(title: &str, save_label: &str, draft: &ProfileDraft) -> Self {
        let dialog = adw::Dialog::new();
        dialog.set_title(title);
        dialog.set_content_width(460);

        let toolbar_view = adw::ToolbarView::new();

        let header = adw::HeaderBar::new();
        header.set_show_end_title_buttons(false);
        header.set_show_start_title_buttons(false);

        let cancel_btn = gtk::Button::with_label("Cancel");
        let save_btn = gtk::Button::with_label(save_label);
        save_btn.add_css_class("suggested-action");

        header.pack_start(&cancel_btn);
        header.pack_end(&save_btn);
        toolbar_view.add_top_bar(&header);

        let content = gtk::Box::new(gtk::Orientation::Vertical, 16);
        content.set_margin_top(16);
        content.set_margin_bottom(16);
        content.set_margin_start(16);
        content.set_margin_end(16);

        // === Profile ===
        let name_group = adw::PreferencesGroup::new();
        let name = Self::entry_row("Name", &draft.name);
        name_group.add(&name);
        content.append(&name_group);

        // === IPv4 ===
        let ipv4_group = adw::PreferencesGroup::new();
        ipv4_group.set_title("IPv4");

        let ip_address = Self::entry_row("IP Address", &draft.ip_address);
        let subnet_mask = Self::entry_row("Subnet Mask", &draft.subnet_mask);
        let gateway = Self::entry_row("Gateway", &draft.gateway);
        ipv4_group.add(&ip_address);
        ipv4_group.add(&subnet_mask);
        ipv4_group.add(&gateway);
        content.append(&ipv4_group);

        // === DNS ===
        let dns_group = adw::PreferencesGroup::new();
        dns_group.set_title("DNS");
        dns_group.set_description(Some(
            "Optional. Separate servers with semicolons, e.g. 8.8.8.8; 1.1.1.1",
        ));
        let dns = Self::entry_row("DNS Servers", &draft.dns);
        dns_group.add(&dns);
        content.append(&dns_group);

        let error_label = gtk::Label::new(None);
        error_label.add_css_class("form-error");
        error_label.set_wrap(true);
        error_label.set_xalign(0.0);
        error_label.set_selectable(true);
        error_label.set_visible(false);
        content.append(&error_label);

        toolbar_view.set_content(Some(&content));
        dialog.set_child(Some(&toolbar_view));
        dialog.set_default_widget(Some(&save_btn));
        dialog.set_focus(Some(&name));

        let fields = Rc::new(Fields {
            name,
            ip_address,
            subnet_mask,
            gateway,
            dns,
        });

        for field in [
            Field::Name,
            Field::IpAddress,
            Field::SubnetMask,
            Field::Gateway,
            Field::Dns,
        ] {
            let fields_weak = Rc::downgrade(&fields);
            let error_label = error_label.clone();
            fields.row(field).connect_changed(move |_| {
                if let Some(fields) = fields_weak.upgrade() {
                    fields.mark(field, fields.check(field));
                    error_label.set_visible(false);
                }
            });
        }

        let dialog_weak = dialog.downgrade();
        cancel_btn.connect_clicked(move |_| {
            if let Some(dialog) = dialog_weak.upgrade() {
                dialog.close();
            }
        });

        Self {
            dialog,
            fields,
            save_btn,
            error_label,
        }
    }

    fn entry_row(title: &str, text: &str) -> adw::EntryRow {
        let row = adw::EntryRow::new();
        row.set_title(title);
        row.set_text(text);
        row.set_activates_default(true);
        row
    }

    /// Run `on_save` with the validated draft; close on success, show the error otherwise.
    pub fn connect_save<F>(&self, on_save: F)
    where
        F: Fn(ProfileDraft) -> Result<()> + 'static,
    {
        let fields = self.fields.clone();
        let error_label = self.error_label.clone();
        let dialog_weak = self.dialog.downgrade();

        self.save_btn.connect_clicked(move |_| {
            let draft = fields.draft();
            for row in fields.all() {
                row.remove_css_class("error");
            }

            let result = match draft.validate() {
                Ok(_) => on_save(draft),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {
                    if let Some(dialog) = dialog_weak.upgrade() {
                        dialog.close();
                    }
                }
                Err(e) => {
                    if let Some(field) = Field::for_error(&e) {
                        fields.mark(field, false);
                        fields.row(field).grab_focus();
                    }
                    error_label.set_text(&e.to_string());
                    error_label.set_visible(true);
                }
            }
        });
    }

    pub fn present(&self, parent: &impl IsA<gtk::Widget>) {
        self.dialog.present(Some(parent));
    }
}
