//! # clinikit-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RoleRepository` — lookup and administration of role documents
//!   - `RouteRegistrar` — the host's route table modules register pages into
//! - Define the **module template**:
//!   - `TemplateModule` — manifest, pages, dashboard card, permission check
//!   - `ModuleRegistry` — host-side collection of modules keyed by id
//! - Define **view models** (`Page`, `Card`) that rendering adapters turn into markup
//! - Provide the `RoleService` use-cases for role administration
//!
//! ## Dependency rule
//! Depends on `clinikit-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod module;
pub mod page;
pub mod ports;
pub mod registry;
pub mod services;
