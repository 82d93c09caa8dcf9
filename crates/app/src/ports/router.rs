//! Routing port — the host's route table.
//!
//! Modules never touch a global router. The host hands a registrar to
//! [`TemplateModule::register_routes`](crate::module::TemplateModule::register_routes)
//! once during startup and turns the collected routes into real handlers.

use crate::page::PageKind;

/// Which page of which module a registered path renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRoute {
    pub module_id: String,
    pub page: PageKind,
}

/// Capability to bind a path to a module page.
pub trait RouteRegistrar {
    /// Bind `path` to `route`.
    fn register(&mut self, path: String, route: ModuleRoute);
}

impl RouteRegistrar for Vec<(String, ModuleRoute)> {
    fn register(&mut self, path: String, route: ModuleRoute) {
        self.push((path, route));
    }
}
