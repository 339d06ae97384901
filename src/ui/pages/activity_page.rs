// NetMotive IP Switcher - Activity Page
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! History of applied profiles, imports and profile changes.

use adw::subclass::prelude::*;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::error;

use ip_switcher::storage::{DataStore, LogEntry};

/// Level filter offered in the toolbar dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LevelFilter {
    #[default]
    All,
    Info,
    Warning,
    Error,
}

impl LevelFilter {
    fn from_index(index: u32) -> Self {
        match index {
            1 => Self::Info,
            2 => Self::Warning,
            3 => Self::Error,
            _ => Self::All,
        }
    }

    fn matches(&self, level: &str) -> bool {
        match self {
            Self::All => true,
            Self::Info => level == "INFO",
            Self::Warning => level == "WARNING" || level == "WARN",
            Self::Error => level == "ERROR",
        }
    }
}

fn entry_matches(entry: &LogEntry, filter: LevelFilter, search: &str) -> bool {
    filter.matches(&entry.level)
        && (search.is_empty()
            || entry.message.to_lowercase().contains(search)
            || entry.level.to_lowercase().contains(search))
}

fn format_entry(entry: &LogEntry) -> String {
    format!("[{}] {}: {}", entry.timestamp, entry.level, entry.message)
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ActivityPage {
        pub data_store: RefCell<Option<Arc<DataStore>>>,
        pub entries_list: RefCell<Option<gtk::ListBox>>,
        pub stack: RefCell<Option<gtk::Stack>>,
        pub filter: RefCell<LevelFilter>,
        pub search_text: RefCell<String>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ActivityPage {
        const NAME: &'static str = "CdIpSwitcherActivityPage";
        type Type = super::ActivityPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for ActivityPage {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }
    }

    impl WidgetImpl for ActivityPage {}
    impl BoxImpl for ActivityPage {}
}

glib::wrapper! {
    pub struct ActivityPage(ObjectSubclass<imp::ActivityPage>)
        @extends gtk::Widget, gtk::Box;
}

impl ActivityPage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 0)
            .build()
    }

    /// Initialize with data store.
    pub fn init_with_store(&self, store: Arc<DataStore>) {
        *self.imp().data_store.borrow_mut() = Some(store);
        self.refresh();
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        // Toolbar
        let toolbar = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        toolbar.set_margin_top(12);
        toolbar.set_margin_bottom(12);
        toolbar.set_margin_start(12);
        toolbar.set_margin_end(12);

        let search_entry = gtk::SearchEntry::new();
        search_entry.set_placeholder_text(Some("Search activity…"));
        search_entry.set_hexpand(true);
        toolbar.append(&search_entry);

        let filter_dropdown = gtk::DropDown::from_strings(&["All", "Info", "Warning", "Error"]);
        filter_dropdown.set_selected(0);
        toolbar.append(&filter_dropdown);

        let clear_btn = gtk::Button::from_icon_name("edit-clear-all-symbolic");
        clear_btn.set_tooltip_text(Some("Clear Activity"));
        toolbar.append(&clear_btn);

        let export_btn = gtk::Button::from_icon_name("document-save-symbolic");
        export_btn.set_tooltip_text(Some("Export Activity"));
        toolbar.append(&export_btn);

        self.append(&toolbar);

        let stack = gtk::Stack::new();
        stack.set_vexpand(true);

        let scroll = gtk::ScrolledWindow::new();
        scroll.set_policy(gtk::PolicyType::Never, gtk::PolicyType::Automatic);

        let entries_list = gtk::ListBox::new();
        entries_list.set_selection_mode(gtk::SelectionMode::None);
        entries_list.add_css_class("boxed-list");
        entries_list.set_valign(gtk::Align::Start);
        entries_list.set_margin_start(12);
        entries_list.set_margin_end(12);
        entries_list.set_margin_bottom(12);

        scroll.set_child(Some(&entries_list));
        stack.add_named(&scroll, Some("list"));

        let empty_state = adw::StatusPage::new();
        empty_state.set_icon_name(Some("document-open-recent-symbolic"));
        empty_state.set_title("No Activity");
        empty_state.set_description(Some("Applied profiles and profile changes show up here"));
        empty_state.add_css_class("compact");
        stack.add_named(&empty_state, Some("empty"));
        stack.set_visible_child_name("empty");

        self.append(&stack);

        *imp.entries_list.borrow_mut() = Some(entries_list);
        *imp.stack.borrow_mut() = Some(stack);

        let page_weak = self.downgrade();
        search_entry.connect_search_changed(move |entry| {
            if let Some(page) = page_weak.upgrade() {
                *page.imp().search_text.borrow_mut() = entry.text().to_lowercase();
                page.refresh();
            }
        });

        let page_weak = self.downgrade();
        filter_dropdown.connect_selected_notify(move |dropdown| {
            if let Some(page) = page_weak.upgrade() {
                *page.imp().filter.borrow_mut() = LevelFilter::from_index(dropdown.selected());
                page.refresh();
            }
        });

        let page_weak = self.downgrade();
        clear_btn.connect_clicked(move |_| {
            if let Some(page) = page_weak.upgrade() {
                page.clear();
            }
        });

        let page_weak = self.downgrade();
        export_btn.connect_clicked(move |_| {
            if let Some(page) = page_weak.upgrade() {
                page.export();
            }
        });
    }

    /// Reload entries from the data store, newest first.
    pub fn refresh(&self) {
        let imp = self.imp();
        let Some(store) = imp.data_store.borrow().clone() else {
            return;
        };
        let filter = *imp.filter.borrow();
        let search = imp.search_text.borrow().clone();

        let mut shown = 0;
        if let Some(list) = imp.entries_list.borrow().as_ref() {
            list.remove_all();
            for entry in store
                .logs()
                .iter()
                .rev()
                .filter(|e| entry_matches(e, filter, &search))
            {
                list.append(&Self::create_entry_row(entry));
                shown += 1;
            }
        }

        if let Some(stack) = imp.stack.borrow().as_ref() {
            stack.set_visible_child_name(if shown == 0 { "empty" } else { "list" });
        }
    }

    fn create_entry_row(entry: &LogEntry) -> gtk::ListBoxRow {
        let hbox = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        hbox.set_margin_top(8);
        hbox.set_margin_bottom(8);
        hbox.set_margin_start(12);
        hbox.set_margin_end(12);

        let level = gtk::Label::new(Some(&entry.level));
        level.add_css_class("activity-level");
        level.add_css_class(match entry.level.as_str() {
            "ERROR" => "level-error",
            "WARNING" | "WARN" => "level-warning",
            _ => "level-info",
        });
        level.set_valign(gtk::Align::Start);
        level.set_xalign(0.0);
        hbox.append(&level);

        let text_box = gtk::Box::new(gtk::Orientation::Vertical, 2);
        text_box.set_hexpand(true);

        let message = gtk::Label::new(Some(&entry.message));
        message.set_xalign(0.0);
        message.set_wrap(true);
        message.set_wrap_mode(gtk::pango::WrapMode::WordChar);
        message.set_selectable(true);
        text_box.append(&message);

        let time = gtk::Label::new(Some(&entry.timestamp));
        time.add_css_class("activity-time");
        time.add_css_class("dim-label");
        time.set_xalign(0.0);
        text_box.append(&time);

        hbox.append(&text_box);

        let row = gtk::ListBoxRow::new();
        row.set_activatable(false);
        row.add_css_class("activity-row");
        row.set_child(Some(&hbox));
        row
    }

    /// Clear all activity from storage and the list.
    pub fn clear(&self) {
        if let Some(store) = self.imp().data_store.borrow().as_ref() {
            store.clear_logs();
        }
        self.refresh();
    }

    /// Save the full activity history as a text file.
    fn export(&self) {
        let text = match self.imp().data_store.borrow().as_ref() {
            Some(store) => store
                .logs()
                .iter()
                .map(|entry| format_entry(entry) + "\n")
                .collect::<String>(),
            None => String::new(),
        };

        if text.is_empty() {
            return;
        }

        let window = self.root().and_downcast::<gtk::Window>();
        let dialog = gtk::FileDialog::builder()
            .title("Export Activity")
            .initial_name("ip-switcher-activity.txt")
            .build();

        dialog.save(
            window.as_ref(),
            None::<&gtk::gio::Cancellable>,
            move |result| {
                if let Ok(file) = result {
                    if let Some(path) = file.path() {
                        if let Err(e) = std::fs::write(&path, &text) {
                            error!("Failed to export activity: {}", e);
                        }
                    }
                }
            },
        );
    }
}

impl Default for ActivityPage {
    fn default() -> Self {
        Self::new()
    }
}
