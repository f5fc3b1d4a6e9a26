#![forbid(unsafe_code)]

//! Authored game content and the metadata lookup.
//!
//! Games are data files, not code: each JSON pack under `data/` defines one
//! game (title, rewards, pacing, confetti policy, questions or prompts) and
//! is embedded into the binary at compile time. The registry validates the
//! packs once at startup; after that, lookups are infallible — an unknown
//! slug resolves to the fallback game with a logged warning.

mod def;
mod registry;

pub use def::{GameContent, GameDef};
pub use registry::{CatalogError, GameCatalog, ResolvedGame};
