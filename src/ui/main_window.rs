// NetMotive IP Switcher - Main Window
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Main Application Window.
//!
//! A single toolbar view with a Profiles page and an Activity page. The
//! window owns the profile store and the apply engine; every operation runs
//! on the GTK main thread.

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk4 as gtk;
use gtk4::{gio, glib};
use libadwaita as adw;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use ip_switcher::csv_transfer::{self, TEMPLATE_FILE_NAME};
use ip_switcher::models::{Error, Profile, ProfileChanges, ProfileDraft};
use ip_switcher::storage::DataStore;
use ip_switcher::{ApplyEngine, ProfileStore};

use crate::application::Application;
use crate::ui::pages::{ActivityPage, ProfilesPage};
use crate::ui::ProfileDialog;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct MainWindow {
        pub toast_overlay: RefCell<Option<adw::ToastOverlay>>,

        // Data store for settings and activity
        pub data_store: RefCell<Option<Arc<DataStore>>>,

        // Saved profiles, loaded in init_with_store
        pub profiles: RefCell<Option<Rc<RefCell<ProfileStore>>>>,

        // None when this OS has no adapter backend
        pub engine: RefCell<Option<Rc<ApplyEngine>>>,

        // Views
        pub profiles_page: RefCell<Option<ProfilesPage>>,
        pub activity_page: RefCell<Option<ActivityPage>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for MainWindow {
        const NAME: &'static str = "CdIpSwitcherMainWindow";
        type Type = super::MainWindow;
        type ParentType = adw::ApplicationWindow;
    }

    impl ObjectImpl for MainWindow {
        fn constructed(&self) {
            self.parent_constructed();
            let obj = self.obj();
            obj.setup_ui();
            obj.setup_actions();
        }
    }

    impl WidgetImpl for MainWindow {}
    impl WindowImpl for MainWindow {}
    impl ApplicationWindowImpl for MainWindow {}
    impl AdwApplicationWindowImpl for MainWindow {}
}

glib::wrapper! {
    pub struct MainWindow(ObjectSubclass<imp::MainWindow>)
        @extends gtk::Widget, gtk::Window, gtk::ApplicationWindow, adw::ApplicationWindow,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl MainWindow {
    pub fn new(app: &Application) -> Self {
        let config = app.config();

        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("default-width", config.window_width)
            .property("default-height", config.window_height)
            .build();

        if config.window_maximized {
            window.maximize();
        }

        window.set_title(Some(crate::APP_NAME));

        // Save window state and the selected adapter on close
        window.connect_close_request(move |win| {
            let maximized = win.is_maximized();
            let (width, height) = win.default_size();
            let adapter = win.selected_adapter();

            if let Some(store) = win.imp().data_store.borrow().as_ref() {
                store.edit_settings(|config| {
                    config.window_maximized = maximized;
                    if !maximized {
                        config.window_width = width;
                        config.window_height = height;
                    }
                    if adapter.is_some() {
                        config.last_adapter = adapter;
                    }
                });
            }
            glib::Propagation::Proceed
        });

        window
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        let toolbar_view = adw::ToolbarView::new();

        // Header bar
        let header = adw::HeaderBar::new();

        let new_btn = gtk::Button::from_icon_name("list-add-symbolic");
        new_btn.set_tooltip_text(Some("New Profile"));
        new_btn.set_action_name(Some("win.new-profile"));
        header.pack_start(&new_btn);

        let menu_btn = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .tooltip_text("Main Menu")
            .menu_model(&Self::create_main_menu())
            .primary(true)
            .build();
        header.pack_end(&menu_btn);

        let view_stack = adw::ViewStack::new();
        view_stack.set_vexpand(true);

        let view_switcher = adw::ViewSwitcher::builder()
            .stack(&view_stack)
            .policy(adw::ViewSwitcherPolicy::Wide)
            .build();
        header.set_title_widget(Some(&view_switcher));

        toolbar_view.add_top_bar(&header);

        // Pages
        let profiles_page = ProfilesPage::new();
        view_stack.add_titled_with_icon(
            &profiles_page,
            Some("profiles"),
            "Profiles",
            "network-wired-symbolic",
        );

        let activity_page = ActivityPage::new();
        view_stack.add_titled_with_icon(
            &activity_page,
            Some("activity"),
            "Activity",
            "document-open-recent-symbolic",
        );

        let toast_overlay = adw::ToastOverlay::new();
        toast_overlay.set_child(Some(&view_stack));
        toolbar_view.set_content(Some(&toast_overlay));

        self.set_content(Some(&toolbar_view));

        // Refresh activity when it becomes visible
        let window_weak = self.downgrade();
        view_stack.connect_visible_child_name_notify(move |stack| {
            if stack.visible_child_name().as_deref() == Some("activity") {
                if let Some(window) = window_weak.upgrade() {
                    if let Some(page) = window.imp().activity_page.borrow().as_ref() {
                        page.refresh();
                    }
                }
            }
        });

        *imp.toast_overlay.borrow_mut() = Some(toast_overlay);
        *imp.profiles_page.borrow_mut() = Some(profiles_page);
        *imp.activity_page.borrow_mut() = Some(activity_page);
    }

    fn create_main_menu() -> gio::Menu {
        let menu = gio::Menu::new();

        let transfer_section = gio::Menu::new();
        transfer_section.append(Some("Import CSV…"), Some("win.import-csv"));
        transfer_section.append(Some("Export CSV…"), Some("win.export-csv"));
        transfer_section.append(Some("Export Example CSV…"), Some("win.export-template"));
        menu.append_section(None, &transfer_section);

        let app_section = gio::Menu::new();
        app_section.append(Some("Preferences"), Some("app.preferences"));
        app_section.append(Some("About IP Switcher"), Some("app.about"));
        app_section.append(Some("Quit"), Some("app.quit"));
        menu.append_section(None, &app_section);

        menu
    }

    fn setup_actions(&self) {
        // New Profile action - shows create profile dialog
        let new_profile_action = gio::SimpleAction::new("new-profile", None);
        let window_weak = self.downgrade();
        new_profile_action.connect_activate(move |_, _| {
            if let Some(window) = window_weak.upgrade() {
                window.show_create_profile_dialog();
            }
        });
        self.add_action(&new_profile_action);

        // Edit Profile action
        let edit_profile_action =
            gio::SimpleAction::new("edit-profile", Some(&String::static_variant_type()));
        let window_weak = self.downgrade();
        edit_profile_action.connect_activate(move |_, param| {
            if let Some(window) = window_weak.upgrade() {
                if let Some(name) = param.and_then(|p| p.get::<String>()) {
                    window.show_edit_profile_dialog(&name);
                }
            }
        });
        self.add_action(&edit_profile_action);

        // Delete Profile action
        let delete_profile_action =
            gio::SimpleAction::new("delete-profile", Some(&String::static_variant_type()));
        let window_weak = self.downgrade();
        delete_profile_action.connect_activate(move |_, param| {
            if let Some(window) = window_weak.upgrade() {
                if let Some(name) = param.and_then(|p| p.get::<String>()) {
                    window.show_delete_profile_dialog(&name);
                }
            }
        });
        self.add_action(&delete_profile_action);

        // Apply Profile action
        let apply_profile_action =
            gio::SimpleAction::new("apply-profile", Some(&String::static_variant_type()));
        let window_weak = self.downgrade();
        apply_profile_action.connect_activate(move |_, param| {
            if let Some(window) = window_weak.upgrade() {
                if let Some(name) = param.and_then(|p| p.get::<String>()) {
                    window.apply_profile(&name);
                }
            }
        });
        self.add_action(&apply_profile_action);

        // Refresh Adapters action
        let refresh_action = gio::SimpleAction::new("refresh-adapters", None);
        let window_weak = self.downgrade();
        refresh_action.connect_activate(move |_, _| {
            if let Some(window) = window_weak.upgrade() {
                window.refresh_adapters();
            }
        });
        self.add_action(&refresh_action);

        // Import CSV action
        let import_action = gio::SimpleAction::new("import-csv", None);
        let window_weak = self.downgrade();
        import_action.connect_activate(move |_, _| {
            if let Some(window) = window_weak.upgrade() {
                window.show_import_csv_dialog();
            }
        });
        self.add_action(&import_action);

        // Export CSV action
        let export_action = gio::SimpleAction::new("export-csv", None);
        let window_weak = self.downgrade();
        export_action.connect_activate(move |_, _| {
            if let Some(window) = window_weak.upgrade() {
                window.show_export_csv_dialog();
            }
        });
        self.add_action(&export_action);

        // Export Example CSV action
        let template_action = gio::SimpleAction::new("export-template", None);
        let window_weak = self.downgrade();
        template_action.connect_activate(move |_, _| {
            if let Some(window) = window_weak.upgrade() {
                window.show_export_template_dialog();
            }
        });
        self.add_action(&template_action);
    }

    fn set_action_enabled(&self, name: &str, enabled: bool) {
        if let Some(action) = self
            .lookup_action(name)
            .and_downcast::<gio::SimpleAction>()
        {
            action.set_enabled(enabled);
        }
    }

    /// Initialize with the data store: load profiles and enumerate adapters.
    pub fn init_with_store(&self, store: Arc<DataStore>) {
        let imp = self.imp();

        *imp.data_store.borrow_mut() = Some(store.clone());

        let profiles = ProfileStore::load(store.profiles_path());
        info!(
            "Loaded {} profile(s) from {}",
            profiles.len(),
            profiles.path().display()
        );
        let load_warnings = profiles.load_warnings().join("\n");
        *imp.profiles.borrow_mut() = Some(Rc::new(RefCell::new(profiles)));

        if let Some(activity_page) = imp.activity_page.borrow().as_ref() {
            activity_page.init_with_store(store.clone());
        }

        if !load_warnings.is_empty() {
            self.log_activity("WARNING", &format!("Profiles file problems:\n{}", load_warnings));
            // Wait until the window is mapped so the dialog has a parent.
            let window_weak = self.downgrade();
            glib::idle_add_local_once(move || {
                if let Some(window) = window_weak.upgrade() {
                    window.show_error_dialog("Some Profiles Could Not Be Loaded", &load_warnings);
                }
            });
        }

        if let Some(profiles_page) = imp.profiles_page.borrow().as_ref() {
            let store_for_adapter = store.clone();
            profiles_page.connect_adapter_changed(move |adapter| {
                debug!("Adapter selected: {:?}", adapter);
                store_for_adapter.edit_settings(|config| config.last_adapter = adapter);
            });
        }

        store.append_log("INFO", "Application started");

        match ApplyEngine::for_current_platform() {
            Ok(engine) => {
                info!("Using {} adapter commands", engine.platform());
                *imp.engine.borrow_mut() = Some(Rc::new(engine));
            }
            Err(e) => {
                warn!("Applying profiles is unavailable: {}", e);
                self.set_action_enabled("apply-profile", false);
                self.set_action_enabled("refresh-adapters", false);
                if let Some(profiles_page) = imp.profiles_page.borrow().as_ref() {
                    profiles_page.set_apply_unavailable(&e.to_string());
                }
            }
        }

        self.refresh_profiles();
        self.refresh_adapters();
    }

    fn profile_store(&self) -> Option<Rc<RefCell<ProfileStore>>> {
        self.imp().profiles.borrow().clone()
    }

    fn engine(&self) -> Option<Rc<ApplyEngine>> {
        self.imp().engine.borrow().clone()
    }

    fn selected_adapter(&self) -> Option<String> {
        self.imp()
            .profiles_page
            .borrow()
            .as_ref()
            .and_then(|page| page.selected_adapter())
    }

    fn confirm_before_apply(&self) -> bool {
        self.imp()
            .data_store
            .borrow()
            .as_ref()
            .map(|store| store.settings().confirm_before_apply)
            .unwrap_or(true)
    }

    /// Rebuild the profile list from the store.
    fn refresh_profiles(&self) {
        let Some(profiles) = self.profile_store() else {
            return;
        };
        if let Some(page) = self.imp().profiles_page.borrow().as_ref() {
            page.update_profiles(profiles.borrow().list());
        }
    }

    /// Enumerate adapters; on failure show the error and leave the list empty.
    fn refresh_adapters(&self) {
        let imp = self.imp();
        let Some(engine) = self.engine() else {
            return;
        };
        let Some(page) = imp.profiles_page.borrow().clone() else {
            return;
        };

        let preferred = self.selected_adapter().or_else(|| {
            imp.data_store
                .borrow()
                .as_ref()
                .and_then(|store| store.settings().last_adapter)
        });

        page.set_busy(true);
        match engine.list_adapters() {
            Ok(adapters) => {
                debug!("Found {} adapter(s)", adapters.len());
                page.set_adapters(adapters, preferred.as_deref());
            }
            Err(e) => {
                warn!("Adapter enumeration failed: {}", e);
                page.set_adapters(Vec::new(), None);
                self.log_activity("WARNING", &e.to_string());
                self.show_toast(&e.to_string());
            }
        }
        page.set_busy(false);
    }

    // ========================================
    // Profile dialogs
    // ========================================

    fn show_create_profile_dialog(&self) {
        let dialog = ProfileDialog::new("New Profile", "Create", &ProfileDraft::default());

        let window_weak = self.downgrade();
        dialog.connect_save(move |draft| {
            let Some(window) = window_weak.upgrade() else {
                return Ok(());
            };
            window.create_profile(draft.validate()?)
        });

        dialog.present(self);
    }

    fn show_edit_profile_dialog(&self, name: &str) {
        let Some(profiles) = self.profile_store() else {
            return;
        };
        let Some(draft) = profiles.borrow().get(name).map(Profile::to_draft) else {
            self.show_toast(&format!("Profile '{}' not found", name));
            return;
        };

        let dialog = ProfileDialog::new("Edit Profile", "Save", &draft);

        let window_weak = self.downgrade();
        let original_name = name.to_string();
        dialog.connect_save(move |draft| {
            let Some(window) = window_weak.upgrade() else {
                return Ok(());
            };
            window.update_profile(&original_name, ProfileChanges::replace_all(draft))
        });

        dialog.present(self);
    }

    fn create_profile(&self, profile: Profile) -> ip_switcher::Result<()> {
        let Some(profiles) = self.profile_store() else {
            return Ok(());
        };
        let name = profile.name().to_string();

        profiles.borrow_mut().create(profile)?;

        self.log_activity("INFO", &format!("Profile '{}' created", name));
        self.refresh_profiles();
        self.show_toast(&format!("Profile '{}' created", name));
        Ok(())
    }

    fn update_profile(&self, name: &str, changes: ProfileChanges) -> ip_switcher::Result<()> {
        let Some(profiles) = self.profile_store() else {
            return Ok(());
        };

        let updated = profiles.borrow_mut().update(name, &changes)?;

        let message = if updated.name() == name {
            format!("Profile '{}' updated", name)
        } else {
            if let Some(page) = self.imp().profiles_page.borrow().as_ref() {
                if page.last_applied().as_deref() == Some(name) {
                    page.set_last_applied(Some(updated.name()));
                }
            }
            format!("Profile '{}' renamed to '{}'", name, updated.name())
        };
        self.log_activity("INFO", &message);
        self.refresh_profiles();
        self.show_toast(&message);
        Ok(())
    }

    fn show_delete_profile_dialog(&self, name: &str) {
        let Some(profiles) = self.profile_store() else {
            return;
        };
        let exists = profiles.borrow().contains(name);
        if !exists {
            self.show_toast(&format!("Profile '{}' not found", name));
            return;
        }

        let dialog = adw::AlertDialog::new(
            Some("Delete Profile?"),
            Some(&format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                name
            )),
        );

        dialog.add_response("cancel", "Cancel");
        dialog.add_response("delete", "Delete");
        dialog.set_response_appearance("delete", adw::ResponseAppearance::Destructive);
        dialog.set_default_response(Some("cancel"));
        dialog.set_close_response("cancel");

        let window_weak = self.downgrade();
        let name = name.to_string();
        dialog.connect_response(None, move |_, response| {
            if response == "delete" {
                if let Some(window) = window_weak.upgrade() {
                    window.delete_profile(&name);
                }
            }
        });

        dialog.present(Some(self));
    }

    fn delete_profile(&self, name: &str) {
        let Some(profiles) = self.profile_store() else {
            return;
        };

        let result = profiles.borrow_mut().delete(name);
        match result {
            Ok(_) => {
                self.log_activity("INFO", &format!("Profile '{}' deleted", name));
                self.refresh_profiles();
                self.show_toast(&format!("Profile '{}' deleted", name));
            }
            Err(e) => {
                error!("Failed to delete profile '{}': {}", name, e);
                self.log_activity("ERROR", &e.to_string());
                self.show_error_dialog("Could Not Delete Profile", &e.to_string());
            }
        }
    }

    // ========================================
    // Apply
    // ========================================

    /// Apply a profile to the selected adapter, asking first when configured to.
    pub fn apply_profile(&self, name: &str) {
        let Some(profiles) = self.profile_store() else {
            return;
        };
        let found = profiles.borrow().get(name).cloned();
        let Some(profile) = found else {
            self.show_toast(&format!("Profile '{}' not found", name));
            return;
        };

        let Some(adapter) = self.selected_adapter() else {
            self.show_toast("Select a network adapter first");
            return;
        };

        if self.confirm_before_apply() {
            self.show_apply_confirmation_dialog(profile, adapter);
        } else {
            self.do_apply_profile(&profile, &adapter);
        }
    }

    fn show_apply_confirmation_dialog(&self, profile: Profile, adapter: String) {
        let dialog = adw::AlertDialog::builder()
            .heading(format!("Apply '{}'?", profile.name()))
            .body(format!(
                "The IPv4 settings of \"{}\" will be replaced with:\n\n{}",
                adapter,
                profile.summary()
            ))
            .build();

        dialog.add_response("cancel", "Cancel");
        dialog.add_response("apply", "Apply");
        dialog.set_response_appearance("apply", adw::ResponseAppearance::Suggested);
        dialog.set_default_response(Some("apply"));
        dialog.set_close_response("cancel");

        let window_weak = self.downgrade();
        dialog.connect_response(None, move |_, response| {
            if response == "apply" {
                if let Some(window) = window_weak.upgrade() {
                    window.do_apply_profile(&profile, &adapter);
                }
            }
        });

        dialog.present(Some(self));
    }

    fn do_apply_profile(&self, profile: &Profile, adapter: &str) {
        let Some(engine) = self.engine() else {
            return;
        };

        info!("Applying profile '{}' to '{}'", profile.name(), adapter);

        match engine.apply(profile, adapter) {
            Ok(result) => {
                self.log_activity("INFO", &result.summary());
                if let Some(page) = self.imp().profiles_page.borrow().as_ref() {
                    page.set_last_applied(Some(profile.name()));
                }
                self.refresh_profiles();
                self.show_toast(&format!("Applied '{}' to {}", profile.name(), adapter));
            }
            Err(e) => {
                error!("Failed to apply profile '{}': {}", profile.name(), e);
                self.log_activity(
                    "ERROR",
                    &format!("Applying '{}' to {} failed: {}", profile.name(), adapter, e),
                );

                let heading = match &e {
                    Error::PrivilegeRequired(_) => "Administrator Privileges Required",
                    e if e.is_partial_apply() => "Profile Partially Applied",
                    Error::ApplyFailed { .. } => "Could Not Apply Profile",
                    _ if e.is_validation_error() => "Invalid Profile",
                    _ => "Could Not Apply Profile",
                };
                self.show_error_dialog(heading, &e.to_string());
            }
        }
    }

    // ========================================
    // CSV import / export
    // ========================================

    fn csv_filters() -> gio::ListStore {
        let csv_filter = gtk::FileFilter::new();
        csv_filter.set_name(Some("CSV Files"));
        csv_filter.add_pattern("*.csv");
        csv_filter.add_mime_type("text/csv");

        let all_filter = gtk::FileFilter::new();
        all_filter.set_name(Some("All Files"));
        all_filter.add_pattern("*");

        let filters = gio::ListStore::new::<gtk::FileFilter>();
        filters.append(&csv_filter);
        filters.append(&all_filter);
        filters
    }

    fn show_import_csv_dialog(&self) {
        let dialog = gtk::FileDialog::builder()
            .title("Import Profiles")
            .filters(&Self::csv_filters())
            .build();

        let window_weak = self.downgrade();
        dialog.open(Some(self), gio::Cancellable::NONE, move |result| {
            if let Ok(file) = result {
                if let Some(path) = file.path() {
                    if let Some(window) = window_weak.upgrade() {
                        window.import_csv_file(&path);
                    }
                }
            }
        });
    }

    fn import_csv_file(&self, path: &Path) {
        let Some(profiles) = self.profile_store() else {
            return;
        };

        let result = csv_transfer::import_csv(&mut profiles.borrow_mut(), path);
        self.refresh_profiles();

        match result {
            Ok(report) => {
                let summary = report.summary();
                self.log_activity(
                    if report.skipped.is_empty() { "INFO" } else { "WARNING" },
                    &format!("Import from {}: {}", path.display(), summary),
                );

                if report.skipped.is_empty() {
                    self.show_toast(&summary);
                } else {
                    let details = report
                        .skipped
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("\n");
                    self.show_error_dialog(&summary, &details);
                }
            }
            Err(e) => {
                error!("Import from {} failed: {}", path.display(), e);
                self.log_activity("ERROR", &e.to_string());
                self.show_error_dialog("Import Failed", &e.to_string());
            }
        }
    }

    fn show_export_csv_dialog(&self) {
        let Some(profiles) = self.profile_store() else {
            return;
        };
        let is_empty = profiles.borrow().is_empty();
        if is_empty {
            self.show_toast("No profiles to export");
            return;
        }

        let dialog = gtk::FileDialog::builder()
            .title("Export Profiles")
            .initial_name("ip-profiles.csv")
            .filters(&Self::csv_filters())
            .build();

        let window_weak = self.downgrade();
        dialog.save(Some(self), gio::Cancellable::NONE, move |result| {
            if let Ok(file) = result {
                if let Some(path) = file.path() {
                    if let Some(window) = window_weak.upgrade() {
                        window.export_csv_file(&path);
                    }
                }
            }
        });
    }

    fn export_csv_file(&self, path: &Path) {
        let Some(profiles) = self.profile_store() else {
            return;
        };

        let result = csv_transfer::export_csv(&profiles.borrow(), path);
        match result {
            Ok(count) => {
                let message = format!("Exported {} profile(s) to {}", count, path.display());
                self.log_activity("INFO", &message);
                self.show_toast(&format!("Exported {} profile(s)", count));
            }
            Err(e) => {
                error!("{}", e);
                self.log_activity("ERROR", &e.to_string());
                self.show_error_dialog("Export Failed", &e.to_string());
            }
        }
    }

    fn show_export_template_dialog(&self) {
        let dialog = gtk::FileDialog::builder()
            .title("Export Example CSV")
            .initial_name(TEMPLATE_FILE_NAME)
            .filters(&Self::csv_filters())
            .build();

        let window_weak = self.downgrade();
        dialog.save(Some(self), gio::Cancellable::NONE, move |result| {
            if let Ok(file) = result {
                if let Some(path) = file.path() {
                    if let Some(window) = window_weak.upgrade() {
                        match csv_transfer::export_template_csv(&path) {
                            Ok(()) => window.show_toast("Example CSV saved"),
                            Err(e) => window.show_error_dialog("Export Failed", &e.to_string()),
                        }
                    }
                }
            }
        });
    }

    // ========================================
    // Feedback
    // ========================================

    /// Record an entry in the activity history.
    fn log_activity(&self, level: &str, message: &str) {
        let imp = self.imp();
        if let Some(store) = imp.data_store.borrow().as_ref() {
            store.append_log(level, message);
        }
        if let Some(page) = imp.activity_page.borrow().as_ref() {
            page.refresh();
        }
    }

    /// Show a toast notification.
    pub fn show_toast(&self, message: &str) {
        if let Some(toast_overlay) = self.imp().toast_overlay.borrow().as_ref() {
            let toast = adw::Toast::new(message);
            toast.set_timeout(3);
            toast_overlay.add_toast(toast);
        }
    }

    /// Show a failure with its full text, including any captured command output.
    fn show_error_dialog(&self, heading: &str, details: &str) {
        let dialog = adw::AlertDialog::new(Some(heading), None);

        let label = gtk::Label::new(Some(details));
        label.set_wrap(true);
        label.set_wrap_mode(gtk::pango::WrapMode::WordChar);
        label.set_selectable(true);
        label.set_xalign(0.0);

        let scroll = gtk::ScrolledWindow::new();
        scroll.set_policy(gtk::PolicyType::Never, gtk::PolicyType::Automatic);
        scroll.set_propagate_natural_height(true);
        scroll.set_max_content_height(320);
        scroll.set_child(Some(&label));
        dialog.set_extra_child(Some(&scroll));

        dialog.add_response("close", "Close");
        dialog.set_default_response(Some("close"));
        dialog.set_close_response("close");
        dialog.set_prefer_wide_layout(true);

        dialog.present(Some(self));
    }
}
