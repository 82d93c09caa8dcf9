//! # clinikit-domain
//!
//! Pure domain model for clinikit modules.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Manifests** (per-module metadata: id, display name, dashboard card, storage table)
//! - Define **Roles** (permission bundles fetched from the role store)
//! - Define **Permission entries** and the rules that decide whether a role grants
//!   access to a module
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod manifest;
pub mod role;
