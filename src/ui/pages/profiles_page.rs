// NetMotive IP Switcher - Profiles Page
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Adapter selector and the list of saved profiles.

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk4 as gtk;
use gtk4::glib;
use libadwaita as adw;
use std::cell::{Cell, RefCell};

use ip_switcher::models::{AdapterInfo, Profile};

use crate::ui::widgets::{PillStatus, StatusPill};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ProfilesPage {
        pub platform_banner: RefCell<Option<adw::Banner>>,
        pub adapter_row: RefCell<Option<adw::ComboRow>>,
        pub adapter_pill: RefCell<Option<StatusPill>>,
        pub refresh_btn: RefCell<Option<gtk::Button>>,
        pub adapters: RefCell<Vec<AdapterInfo>>,
        pub updating_adapters: Cell<bool>,
        pub profiles_list: RefCell<Option<gtk::ListBox>>,
        pub stack: RefCell<Option<gtk::Stack>>,
        pub last_applied: RefCell<Option<String>>,
        pub apply_enabled: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ProfilesPage {
        const NAME: &'static str = "CdIpSwitcherProfilesPage";
        type Type = super::ProfilesPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for ProfilesPage {
        fn constructed(&self) {
            self.parent_constructed();
            self.apply_enabled.set(true);
            self.obj().setup_ui();
        }
    }

    impl WidgetImpl for ProfilesPage {}
    impl BoxImpl for ProfilesPage {}
}

glib::wrapper! {
    pub struct ProfilesPage(ObjectSubclass<imp::ProfilesPage>)
        @extends gtk::Widget, gtk::Box;
}

impl ProfilesPage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 0)
            .build()
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        let banner = adw::Banner::new("");
        banner.set_revealed(false);
        self.append(&banner);

        let scroll = gtk::ScrolledWindow::new();
        scroll.set_policy(gtk::PolicyType::Never, gtk::PolicyType::Automatic);
        scroll.set_vexpand(true);

        let clamp = adw::Clamp::new();
        clamp.set_maximum_size(720);

        let content = gtk::Box::new(gtk::Orientation::Vertical, 18);
        content.set_margin_top(18);
        content.set_margin_bottom(18);
        content.set_margin_start(12);
        content.set_margin_end(12);

        // === Adapter ===
        let adapter_group = adw::PreferencesGroup::new();
        adapter_group.set_title("Network Adapter");
        adapter_group.set_description(Some("Profiles are applied to this adapter"));

        let refresh_btn = gtk::Button::from_icon_name("view-refresh-symbolic");
        refresh_btn.set_tooltip_text(Some("Refresh Adapters"));
        refresh_btn.add_css_class("flat");
        refresh_btn.set_valign(gtk::Align::Center);
        refresh_btn.set_action_name(Some("win.refresh-adapters"));
        adapter_group.set_header_suffix(Some(&refresh_btn));

        let adapter_row = adw::ComboRow::builder()
            .title("Adapter")
            .model(&gtk::StringList::new(&[]))
            .build();
        adapter_row.set_sensitive(false);

        let adapter_pill = StatusPill::new("No adapter", PillStatus::Inactive);
        adapter_row.add_suffix(&adapter_pill);
        adapter_group.add(&adapter_row);

        content.append(&adapter_group);

        // === Profiles ===
        let stack = gtk::Stack::new();
        stack.set_vexpand(true);

        let profiles_group = adw::PreferencesGroup::new();
        profiles_group.set_title("Profiles");

        let create_btn = gtk::Button::from_icon_name("list-add-symbolic");
        create_btn.set_tooltip_text(Some("New Profile"));
        create_btn.add_css_class("flat");
        create_btn.set_valign(gtk::Align::Center);
        create_btn.set_action_name(Some("win.new-profile"));
        profiles_group.set_header_suffix(Some(&create_btn));

        let profiles_list = gtk::ListBox::new();
        profiles_list.set_selection_mode(gtk::SelectionMode::None);
        profiles_list.add_css_class("boxed-list");
        profiles_group.add(&profiles_list);

        stack.add_named(&profiles_group, Some("list"));

        let empty_state = adw::StatusPage::new();
        empty_state.set_icon_name(Some("network-wired-symbolic"));
        empty_state.set_title("No Profiles Yet");
        empty_state.set_description(Some(
            "Create a profile or import a CSV file to get started",
        ));
        empty_state.add_css_class("compact");

        let empty_buttons = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        empty_buttons.set_halign(gtk::Align::Center);

        let empty_create_btn = gtk::Button::with_label("Create Profile");
        empty_create_btn.add_css_class("suggested-action");
        empty_create_btn.add_css_class("pill");
        empty_create_btn.set_action_name(Some("win.new-profile"));
        empty_buttons.append(&empty_create_btn);

        let empty_import_btn = gtk::Button::with_label("Import CSV…");
        empty_import_btn.add_css_class("pill");
        empty_import_btn.set_action_name(Some("win.import-csv"));
        empty_buttons.append(&empty_import_btn);

        empty_state.set_child(Some(&empty_buttons));
        stack.add_named(&empty_state, Some("empty"));
        stack.set_visible_child_name("empty");

        content.append(&stack);

        clamp.set_child(Some(&content));
        scroll.set_child(Some(&clamp));
        self.append(&scroll);

        *imp.platform_banner.borrow_mut() = Some(banner);
        *imp.adapter_row.borrow_mut() = Some(adapter_row);
        *imp.adapter_pill.borrow_mut() = Some(adapter_pill);
        *imp.refresh_btn.borrow_mut() = Some(refresh_btn);
        *imp.profiles_list.borrow_mut() = Some(profiles_list);
        *imp.stack.borrow_mut() = Some(stack);
    }

    /// Disable applying and explain why (e.g. unsupported platform).
    pub fn set_apply_unavailable(&self, reason: &str) {
        let imp = self.imp();
        imp.apply_enabled.set(false);

        if let Some(banner) = imp.platform_banner.borrow().as_ref() {
            banner.set_title(reason);
            banner.set_revealed(true);
        }
        if let Some(btn) = imp.refresh_btn.borrow().as_ref() {
            btn.set_sensitive(false);
        }
    }

    /// Replace the adapter list, selecting `preferred` when present.
    pub fn set_adapters(&self, adapters: Vec<AdapterInfo>, preferred: Option<&str>) {
        let imp = self.imp();
        let Some(row) = imp.adapter_row.borrow().clone() else {
            return;
        };

        let labels: Vec<String> = adapters.iter().map(|a| a.display_label()).collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();

        let selected = preferred
            .and_then(|name| adapters.iter().position(|a| a.name == name))
            .or_else(|| adapters.iter().position(|a| a.is_connected))
            .unwrap_or(0);

        imp.updating_adapters.set(true);
        row.set_model(Some(&gtk::StringList::new(&label_refs)));
        if adapters.is_empty() {
            row.set_subtitle("No adapters found");
            row.set_sensitive(false);
        } else {
            row.set_subtitle("");
            row.set_sensitive(true);
            row.set_selected(selected as u32);
        }
        *imp.adapters.borrow_mut() = adapters;
        imp.updating_adapters.set(false);

        self.update_adapter_pill();
    }

    /// Name of the currently selected adapter.
    pub fn selected_adapter(&self) -> Option<String> {
        let imp = self.imp();
        let index = imp.adapter_row.borrow().as_ref()?.selected();
        imp.adapters
            .borrow()
            .get(index as usize)
            .map(|a| a.name.clone())
    }

    /// Call `f` with the new adapter name when the user picks a different adapter.
    pub fn connect_adapter_changed<F: Fn(Option<String>) + 'static>(&self, f: F) {
        let Some(row) = self.imp().adapter_row.borrow().clone() else {
            return;
        };

        let page_weak = self.downgrade();
        row.connect_selected_notify(move |_| {
            if let Some(page) = page_weak.upgrade() {
                if page.imp().updating_adapters.get() {
                    return;
                }
                page.update_adapter_pill();
                f(page.selected_adapter());
            }
        });
    }

    fn update_adapter_pill(&self) {
        let imp = self.imp();
        let Some(pill) = imp.adapter_pill.borrow().clone() else {
            return;
        };
        let index = imp
            .adapter_row
            .borrow()
            .as_ref()
            .map(|row| row.selected())
            .unwrap_or(gtk::INVALID_LIST_POSITION);
        let adapters = imp.adapters.borrow();
        pill.show_adapter(adapters.get(index as usize));
    }

    /// Mark adapter enumeration as running.
    pub fn set_busy(&self, busy: bool) {
        let imp = self.imp();
        if let Some(btn) = imp.refresh_btn.borrow().as_ref() {
            btn.set_sensitive(!busy && imp.apply_enabled.get());
        }
        if busy {
            if let Some(pill) = imp.adapter_pill.borrow().as_ref() {
                pill.set_text("Scanning…");
                pill.set_status(PillStatus::Pending);
            }
        }
    }

    /// Remember which profile was applied last so its row is highlighted.
    pub fn set_last_applied(&self, name: Option<&str>) {
        *self.imp().last_applied.borrow_mut() = name.map(str::to_string);
    }

    /// Name of the profile applied last in this session.
    pub fn last_applied(&self) -> Option<String> {
        self.imp().last_applied.borrow().clone()
    }

    /// Rebuild the profile rows.
    pub fn update_profiles(&self, profiles: &[Profile]) {
        let imp = self.imp();
        let last_applied = imp.last_applied.borrow().clone();

        if let Some(list) = imp.profiles_list.borrow().as_ref() {
            list.remove_all();

            for profile in profiles {
                let is_applied = last_applied.as_deref() == Some(profile.name());
                list.append(&self.create_profile_row(profile, is_applied));
            }
        }

        if let Some(stack) = imp.stack.borrow().as_ref() {
            stack.set_visible_child_name(if profiles.is_empty() { "empty" } else { "list" });
        }
    }

    fn create_profile_row(&self, profile: &Profile, is_applied: bool) -> adw::ActionRow {
        let name = profile.name().to_variant();

        let row = adw::ActionRow::new();
        row.set_use_markup(false);
        row.set_title(profile.name());
        row.set_subtitle(&profile.summary());
        row.set_subtitle_lines(2);
        row.add_css_class("profile-row");

        if is_applied {
            row.add_css_class("applied-profile");
            row.add_suffix(&StatusPill::new("Applied", PillStatus::Active));
        }

        let btn_box = gtk::Box::new(gtk::Orientation::Horizontal, 4);
        btn_box.set_valign(gtk::Align::Center);

        let apply_btn = gtk::Button::from_icon_name("media-playback-start-symbolic");
        apply_btn.set_tooltip_text(Some("Apply Profile"));
        apply_btn.add_css_class("flat");
        apply_btn.set_sensitive(self.imp().apply_enabled.get());
        apply_btn.set_action_name(Some("win.apply-profile"));
        apply_btn.set_action_target_value(Some(&name));
        btn_box.append(&apply_btn);

        let edit_btn = gtk::Button::from_icon_name("document-edit-symbolic");
        edit_btn.set_tooltip_text(Some("Edit Profile"));
        edit_btn.add_css_class("flat");
        edit_btn.set_action_name(Some("win.edit-profile"));
        edit_btn.set_action_target_value(Some(&name));
        btn_box.append(&edit_btn);

        let delete_btn = gtk::Button::from_icon_name("user-trash-symbolic");
        delete_btn.set_tooltip_text(Some("Delete Profile"));
        delete_btn.add_css_class("flat");
        delete_btn.add_css_class("destructive-action");
        delete_btn.set_action_name(Some("win.delete-profile"));
        delete_btn.set_action_target_value(Some(&name));
        btn_box.append(&delete_btn);

        row.add_suffix(&btn_box);

        row
    }
}

impl Default for ProfilesPage {
    fn default() -> Self {
        Self::new()
    }
}
