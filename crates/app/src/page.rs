//! View models handed to rendering adapters.
//!
//! Nothing here knows about HTML. An adapter decides how a [`Page`] or a
//! [`Card`] looks; this module decides what they contain.

use serde::Serialize;

/// The four pages every module exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Main,
    Config,
    Settings,
    Help,
}

impl PageKind {
    /// Every page kind, in registration order.
    pub const ALL: [Self; 4] = [Self::Main, Self::Config, Self::Settings, Self::Help];

    /// Path suffix appended to the module root.
    #[must_use]
    pub fn path_suffix(self) -> &'static str {
        match self {
            Self::Main => "",
            Self::Config => "/config",
            Self::Settings => "/settings",
            Self::Help => "/help",
        }
    }

    /// Label shown next to the module name in the page header.
    #[must_use]
    pub fn sub_page(self) -> Option<&'static str> {
        match self {
            Self::Main => None,
            Self::Config => Some("Configuration"),
            Self::Settings => Some("Settings"),
            Self::Help => Some("Help"),
        }
    }
}

/// A rendered module page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub kind: PageKind,
    /// Header title, the module's display name.
    pub title: String,
    pub sub_page: Option<&'static str>,
    /// Panel heading.
    pub heading: &'static str,
    /// Panel body text.
    pub body: &'static str,
    /// Key/value lines listed below the body (help page only).
    pub properties: Vec<Property>,
}

/// One manifest key with its value rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

/// Dashboard tile for a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub module_id: String,
    /// Where clicking the title navigates.
    pub href: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<CardIcon>,
    /// Dropdown entries.
    pub menu: Vec<CardLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardIcon {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLink {
    pub label: &'static str,
    pub href: String,
}
