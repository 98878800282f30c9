//! Procedural macros for `pool_reclaim`.
//!
//! Rust has no runtime reflection over a value's fields, so the member
//! enumeration a reclaim pass needs is generated at compile time instead.
//!
//! # Reclaim Derive
//!
//! ```text
//! #[derive(Reclaim)]
//! #[reclaim(static_members = mission_statics)]
//! pub struct Mission {
//!     pub escort: Option<Vehicle>,
//!     pub props: Vec<Prop>,
//!     pub spawns: HashMap<Ped, SpawnPoint>,
//!     #[reclaim(flatten)]
//!     pub base: ScriptBase,
//!     #[reclaim(skip)]
//!     pub title: String,
//! }
//! ```
//!
//! This generates a `Members` implementation yielding `escort`, `props`,
//! `spawns`, then every member of `base`, then the static members, plus a
//! `Reclaim` implementation.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod attrs;
mod reclaim;
mod utils;

use proc_macro::TokenStream;

/// Derive `Members` and `Reclaim` for a struct, or `Reclaim` for an enum.
///
/// # Attributes
///
/// ## Struct-level
/// - `#[reclaim(handle)]` - The struct is itself a resource handle and must
///   implement `ResourceHandle`. Only `Reclaim` is generated.
/// - `#[reclaim(tuple)]` - When nested, expose the fields as a fixed tuple
///   (positional slots in declaration order).
/// - `#[reclaim(static_members = path)]` - After the instance members, call
///   `path(visit)` to yield process-wide members.
///
/// Without `handle` or `tuple` the struct is opaque when nested inside
/// another value; it is only walked as a root.
///
/// ## Field-level
/// - `#[reclaim(skip)]` - Not a member slot.
/// - `#[reclaim(flatten)]` - Yield the field's own members in place, as if
///   they were declared here.
///
/// ## Enums
/// Each variant carries at most one field. The enum's shape is the shape of
/// the active variant's payload, and detaching it detaches the payload.
/// Unit variants and `#[reclaim(skip)]` payloads are opaque. Enums take no
/// struct-level attributes and do not get a `Members` implementation.
///
/// # Example
///
/// ```text
/// #[derive(Reclaim)]
/// #[reclaim(handle)]
/// pub struct Vehicle(u32);
///
/// impl ResourceHandle for Vehicle { ... }
/// ```
#[proc_macro_derive(Reclaim, attributes(reclaim))]
pub fn derive_reclaim(input: TokenStream) -> TokenStream {
    reclaim::derive_reclaim(input)
}
