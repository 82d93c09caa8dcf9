//! Module template — a self-contained feature unit with pages, a dashboard
//! card and a role-based permission check.

use serde_json::{Map, Value};

use clinikit_domain::error::ClinikitError;
use clinikit_domain::id::RoleId;
use clinikit_domain::manifest::Manifest;
use clinikit_domain::role::Grant;

use crate::page::{Card, CardIcon, CardLink, Page, PageKind, Property};
use crate::ports::{ModuleRoute, RoleRepository, RouteRegistrar};

/// A pluggable module described by its [`Manifest`].
///
/// The manifest is injected by the host; the module never looks for it on
/// disk. The role repository is the module's only dependency.
pub struct TemplateModule<R> {
    manifest: Manifest,
    roles: R,
}

impl<R> TemplateModule<R> {
    /// Create a module from an already validated manifest.
    pub fn new(manifest: Manifest, roles: R) -> Self {
        Self { manifest, roles }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.manifest.module_id()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.manifest.module_name()
    }

    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Root path of every route this module owns, `/<moduleID>`.
    #[must_use]
    pub fn root_path(&self) -> String {
        format!("/{}", self.id())
    }

    /// Register the main, config, settings and help pages.
    ///
    /// Meant to be called once during startup.
    pub fn register_routes(&self, registrar: &mut impl RouteRegistrar) {
        let root = self.root_path();
        for page in PageKind::ALL {
            let path = format!("{root}{}", page.path_suffix());
            tracing::debug!(module_id = %self.id(), %path, ?page, "registering module route");
            registrar.register(
                path,
                ModuleRoute {
                    module_id: self.id().to_string(),
                    page,
                },
            );
        }
    }

    /// The manifest exactly as it was loaded.
    #[must_use]
    pub fn get_properties(&self) -> &Map<String, Value> {
        self.manifest.raw()
    }

    /// Build the dashboard tile.
    ///
    /// Title and icon only appear when the manifest declares them.
    #[must_use]
    pub fn draw_card(&self) -> Card {
        let root = self.root_path();
        let card = self.manifest.card();
        Card {
            module_id: self.id().to_string(),
            href: root.clone(),
            title: card.title.clone(),
            description: card.description.clone(),
            icon: card.icon.as_ref().map(|name| CardIcon {
                name: name.clone(),
                color: card.icon_color.clone(),
            }),
            menu: vec![
                CardLink {
                    label: "Settings",
                    href: format!("{root}{}", PageKind::Settings.path_suffix()),
                },
                CardLink {
                    label: "Configure",
                    href: format!("{root}{}", PageKind::Config.path_suffix()),
                },
                CardLink {
                    label: "Help",
                    href: format!("{root}{}", PageKind::Help.path_suffix()),
                },
            ],
        }
    }

    /// Build the page registered for `kind`.
    #[must_use]
    pub fn render_page(&self, kind: PageKind) -> Page {
        match kind {
            PageKind::Main => self.draw_main_page(),
            PageKind::Config => self.draw_config_page(),
            PageKind::Settings => self.draw_settings_page(),
            PageKind::Help => self.draw_help_page(),
        }
    }

    #[must_use]
    pub fn draw_main_page(&self) -> Page {
        self.placeholder(
            PageKind::Main,
            "Main Page",
            "This is the main page for the module.",
        )
    }

    #[must_use]
    pub fn draw_config_page(&self) -> Page {
        self.placeholder(
            PageKind::Config,
            "Configuration Page",
            "This is the configuration page for the module.",
        )
    }

    #[must_use]
    pub fn draw_settings_page(&self) -> Page {
        self.placeholder(
            PageKind::Settings,
            "Settings Page",
            "This is the settings page for the module.",
        )
    }

    /// Help page listing every top-level manifest key and its value.
    #[must_use]
    pub fn draw_help_page(&self) -> Page {
        let mut page = self.placeholder(
            PageKind::Help,
            "Help Page",
            "This is the help page for the module.",
        );
        page.properties = self
            .get_properties()
            .iter()
            .map(|(key, value)| Property {
                key: key.clone(),
                value: display_value(value),
            })
            .collect();
        page
    }

    fn placeholder(&self, kind: PageKind, heading: &'static str, body: &'static str) -> Page {
        Page {
            kind,
            title: self.name().to_string(),
            sub_page: kind.sub_page(),
            heading,
            body,
            properties: Vec::new(),
        }
    }
}

impl<R: RoleRepository> TemplateModule<R> {
    /// Decide whether any of `role_ids` grants access to this module.
    ///
    /// `None` and an empty slice are never permitted. Role ids that resolve
    /// to no document are skipped. An `"admin"` role, an entry naming this
    /// module's id, the `"all"` wildcard, or this module's display name all
    /// grant access.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the role repository.
    #[tracing::instrument(skip(self, role_ids), fields(module_id = %self.id()))]
    pub async fn user_permitted(&self, role_ids: Option<&[RoleId]>) -> Result<bool, ClinikitError> {
        let Some(role_ids) = role_ids else {
            return Ok(false);
        };

        for role_id in role_ids {
            let Some(role) = self.roles.get_by_id(role_id.clone()).await? else {
                tracing::debug!(%role_id, "role not found, skipping");
                continue;
            };

            match role.grants(self.id(), self.manifest.declared_name()) {
                Some(Grant::DisplayName) => {
                    tracing::warn!(
                        %role_id,
                        module_name = %self.name(),
                        "access granted through display name match"
                    );
                    return Ok(true);
                }
                Some(grant) => {
                    tracing::debug!(%role_id, ?grant, "access granted");
                    return Ok(true);
                }
                None => {}
            }
        }

        Ok(false)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
