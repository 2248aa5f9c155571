// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Explode-view state manager for hierarchical 3D assemblies.
//!
//! Splay finds the explodable parts of a scene graph, remembers where each
//! one started, and animates parts away from and back to those positions.
//! It also tracks the single highlighted part and derives the part tree a
//! UI shows.
//!
//! # Key entry points
//!
//! - [`manager::PartManager`] - owner of all part state, driven directly or
//!   through [`manager::PartCommand`]
//! - [`scene::SceneGraph`] - the seam to the host scene, with
//!   [`scene::Scene`] as an in-memory implementation
//! - [`animation::TweenScheduler`] - frame-driven tween playback
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Setup flows one way: traversal fills the [`parts::Registry`], and the
//! display tree is derived from it on demand. At runtime the manager turns
//! commands into tweens; the host advances the scheduler once per frame and
//! the scheduler writes positions back into the scene.

pub mod animation;
pub mod error;
pub mod explode;
pub mod manager;
pub mod options;
pub mod parts;
pub mod scene;
pub mod selection;
pub mod util;
