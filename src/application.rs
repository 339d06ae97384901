// NetMotive IP Switcher - Application
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Adwaita application root object and lifecycle wiring.

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk4 as gtk;
use gtk4::{gio, glib};
use libadwaita as adw;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::{info, warn};

use ip_switcher::models::{AppConfig, ThemePreference};
use ip_switcher::storage::DataStore;

use crate::ui::MainWindow;
use crate::{APP_ID, APP_NAME, VERSION};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct Application {
        pub data_store: RefCell<Option<Arc<DataStore>>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Application {
        const NAME: &'static str = "CdIpSwitcherApplication";
        type Type = super::Application;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for Application {
        fn constructed(&self) {
            self.parent_constructed();
            let obj = self.obj();
            obj.setup_actions();
            obj.set_accels_for_action("app.quit", &["<primary>q"]);
            obj.set_accels_for_action("app.preferences", &["<primary>comma"]);
            obj.set_accels_for_action("win.new-profile", &["<primary>n"]);
            obj.set_accels_for_action("win.import-csv", &["<primary>o"]);
            obj.set_accels_for_action("win.refresh-adapters", &["F5"]);
        }
    }

    impl ApplicationImpl for Application {
        fn activate(&self) {
            let application = self.obj();

            let window = if let Some(window) = application.active_window() {
                window
            } else {
                let window = MainWindow::new(&application);

                if let Some(store) = self.data_store.borrow().clone() {
                    window.init_with_store(store);
                }

                window.upcast()
            };

            window.present();
        }

        fn startup(&self) {
            self.parent_startup();
            let obj = self.obj();

            info!("{} {} starting up", APP_NAME, VERSION);

            gtk::Window::set_default_icon_name(APP_ID);

            let data_store = Arc::new(DataStore::new());
            obj.apply_theme(data_store.settings().theme);
            *self.data_store.borrow_mut() = Some(data_store);

            obj.load_css();
        }
    }

    impl GtkApplicationImpl for Application {}
    impl AdwApplicationImpl for Application {}
}

glib::wrapper! {
    pub struct Application(ObjectSubclass<imp::Application>)
        @extends gio::Application, gtk::Application, adw::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl Application {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("application-id", APP_ID)
            .property("flags", gio::ApplicationFlags::FLAGS_NONE)
            .build()
    }

    fn setup_actions(&self) {
        let action_quit = gio::ActionEntry::builder("quit")
            .activate(move |app: &Self, _, _| {
                app.quit();
            })
            .build();

        let action_about = gio::ActionEntry::builder("about")
            .activate(move |app: &Self, _, _| {
                app.show_about();
            })
            .build();

        let action_preferences = gio::ActionEntry::builder("preferences")
            .activate(move |app: &Self, _, _| {
                app.show_preferences();
            })
            .build();

        self.add_action_entries([action_quit, action_about, action_preferences]);
    }

    fn load_css(&self) {
        let Some(display) = gtk::gdk::Display::default() else {
            warn!("No default display available; skipping CSS provider installation");
            return;
        };

        let provider = gtk::CssProvider::new();
        provider.load_from_string(include_str!("../data/style.css"));

        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    /// Apply the theme preference.
    pub fn apply_theme(&self, theme: ThemePreference) {
        let style_manager = adw::StyleManager::default();
        let scheme = match theme {
            ThemePreference::System => adw::ColorScheme::Default,
            ThemePreference::Light => adw::ColorScheme::ForceLight,
            ThemePreference::Dark => adw::ColorScheme::ForceDark,
        };
        style_manager.set_color_scheme(scheme);
    }

    fn show_about(&self) {
        let window = self.active_window();

        let about = adw::AboutDialog::builder()
            .application_name(APP_NAME)
            .application_icon(APP_ID)
            .developer_name("Christos A. Daggas")
            .version(VERSION)
            .copyright("© 2026 Christos A. Daggas")
            .license_type(gtk::License::MitX11)
            .website("https://chrisdaggas.com")
            .issue_url("https://github.com/christosdaggas/ip-switcher/issues")
            .developers(vec!["Christos A. Daggas"])
            .comments("Switch a network adapter between saved static IPv4 configurations")
            .release_notes(concat!(
                "<p>Version 1.0.0</p><ul>",
                "<li>Named static IPv4 profiles with address, subnet mask, gateway ",
                "and DNS servers</li>",
                "<li>Apply a profile to an adapter with netsh (Windows), networksetup (macOS) ",
                "or nmcli (Linux)</li>",
                "<li>CSV import and export, plus an example CSV to start from</li>",
                "<li>Activity log of applied profiles and profile changes</li></ul>",
            ))
            .build();

        about.present(window.as_ref());
    }

    fn show_preferences(&self) {
        let window = self.active_window();
        let config = self.config();

        let dialog = adw::PreferencesDialog::new();
        dialog.set_title("Preferences");

        let page = adw::PreferencesPage::new();
        page.set_title("General");
        page.set_icon_name(Some("preferences-system-symbolic"));

        // === Appearance ===
        let theme_group = adw::PreferencesGroup::new();
        theme_group.set_title("Appearance");

        let theme_model = gtk::StringList::new(&["Follow System", "Light", "Dark"]);
        let theme_row = adw::ComboRow::builder()
            .title("Color Scheme")
            .subtitle("Choose the application's appearance")
            .model(&theme_model)
            .build();
        theme_row.set_selected(match config.theme {
            ThemePreference::System => 0,
            ThemePreference::Light => 1,
            ThemePreference::Dark => 2,
        });

        let app_weak = self.downgrade();
        theme_row.connect_selected_notify(move |row| {
            if let Some(app) = app_weak.upgrade() {
                let theme = match row.selected() {
                    1 => ThemePreference::Light,
                    2 => ThemePreference::Dark,
                    _ => ThemePreference::System,
                };
                app.apply_theme(theme);
                app.edit_config(|c| c.theme = theme);
            }
        });

        theme_group.add(&theme_row);
        page.add(&theme_group);

        // === Profiles ===
        let profile_group = adw::PreferencesGroup::new();
        profile_group.set_title("Profiles");

        let confirm_row = adw::SwitchRow::builder()
            .title("Confirm Before Applying")
            .subtitle("Ask for confirmation before changing adapter settings")
            .active(config.confirm_before_apply)
            .build();

        let app_weak = self.downgrade();
        confirm_row.connect_active_notify(move |row| {
            if let Some(app) = app_weak.upgrade() {
                let enabled = row.is_active();
                app.edit_config(|c| c.confirm_before_apply = enabled);
            }
        });
        profile_group.add(&confirm_row);

        if let Some(store) = self.data_store() {
            let location_row = adw::ActionRow::builder()
                .title("Profiles File")
                .subtitle(store.profiles_path().display().to_string())
                .subtitle_selectable(true)
                .build();
            location_row.add_css_class("property");
            profile_group.add(&location_row);
        }

        page.add(&profile_group);
        dialog.add(&page);

        dialog.present(window.as_ref());
    }

    /// Get the data store.
    pub fn data_store(&self) -> Option<Arc<DataStore>> {
        self.imp().data_store.borrow().clone()
    }

    /// Get the current configuration.
    pub fn config(&self) -> AppConfig {
        self.data_store()
            .map(|store| store.settings())
            .unwrap_or_default()
    }

    /// Modify and save the configuration.
    pub fn edit_config<F: FnOnce(&mut AppConfig)>(&self, edit: F) {
        if let Some(store) = self.data_store() {
            store.edit_settings(edit);
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
