//! # clinikit-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Turn the routes modules register into real `GET` handlers
//!   (`/<moduleID>`, `/<moduleID>/config`, `/<moduleID>/settings`, `/<moduleID>/help`)
//! - Serve a **server-side-rendered HTML dashboard** of module cards
//! - Serve a **JSON API** for module manifests, permission checks and role administration
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Caller roles
//! The caller's role ids travel in the `x-clinikit-roles` header as a
//! comma-separated list. Module pages and manifests answer `403 Forbidden`
//! when none of the roles grants access; the dashboard only shows permitted
//! cards. The `/api/roles` endpoints require an `"admin"` role.
//!
//! ## Dependency rule
//! Depends on `clinikit-app` (for port traits and services) and `clinikit-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod route_table;
pub mod router;
pub mod state;
