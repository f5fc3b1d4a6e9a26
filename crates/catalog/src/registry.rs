use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use games_core::model::{GameKind, GameSlug};

use crate::def::GameDef;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Authoring-time pack validation failures, surfaced once at startup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("pack '{pack}' failed to parse: {source}")]
    Parse {
        pack: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate game slug '{0}'")]
    DuplicateSlug(GameSlug),

    #[error("game '{slug}' ({kind:?}) has content that does not match its kind")]
    ContentKindMismatch { slug: GameSlug, kind: GameKind },

    #[error("game '{slug}' points to unknown next game '{next}'")]
    UnknownNextGame { slug: GameSlug, next: GameSlug },

    #[error("game '{slug}' has an invalid completion policy")]
    InvalidCompletionPolicy { slug: GameSlug },

    #[error("builtin packs are missing the fallback game '{0}'")]
    MissingFallback(&'static str),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Result of a metadata lookup that can never fail: unknown slugs land on
/// the fallback game so play proceeds unaffected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGame<'a> {
    pub def: &'a GameDef,
    pub fallback_used: bool,
}

/// The game registry. Built once from embedded packs, then read-only.
#[derive(Debug)]
pub struct GameCatalog {
    games: Vec<GameDef>,
    index: HashMap<GameSlug, usize>,
}

/// One embedded pack file per topic.
const BUILTIN_PACKS: &[(&str, &str)] = &[
    ("animal-sounds", include_str!("../data/animal_sounds.json")),
    ("ocean-friends", include_str!("../data/ocean_friends.json")),
    ("space-explorer", include_str!("../data/space_explorer.json")),
    ("brave-knight", include_str!("../data/brave_knight.json")),
    ("gratitude-journal", include_str!("../data/gratitude_journal.json")),
    ("feelings-journal", include_str!("../data/feelings_journal.json")),
    ("free-play", include_str!("../data/free_play.json")),
];

impl GameCatalog {
    /// Slug substituted when a lookup misses.
    pub const FALLBACK_SLUG: &'static str = "free-play";

    /// Parses and validates all embedded packs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for malformed packs, duplicate slugs, content
    /// that does not match the declared kind, dangling `next_game` targets,
    /// or a missing fallback game.
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Self::from_packs(BUILTIN_PACKS.iter().copied())?;
        if catalog.fallback_index().is_none() {
            return Err(CatalogError::MissingFallback(Self::FALLBACK_SLUG));
        }
        Ok(catalog)
    }

    /// Builds a catalog from `(pack_name, json)` pairs. Exposed for tests
    /// that author their own packs.
    ///
    /// # Errors
    ///
    /// Same validation as `builtin`, minus the fallback requirement.
    pub fn from_packs<'a>(
        packs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CatalogError> {
        let mut games = Vec::new();
        let mut index = HashMap::new();

        for (pack, json) in packs {
            let def: GameDef = serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                pack: pack.to_string(),
                source,
            })?;

            if !def.content_matches_kind() {
                return Err(CatalogError::ContentKindMismatch {
                    slug: def.slug().clone(),
                    kind: def.kind(),
                });
            }
            if def.completion().validate().is_err() {
                return Err(CatalogError::InvalidCompletionPolicy {
                    slug: def.slug().clone(),
                });
            }
            if index.insert(def.slug().clone(), games.len()).is_some() {
                return Err(CatalogError::DuplicateSlug(def.slug().clone()));
            }
            games.push(def);
        }

        for def in &games {
            if let Some(next) = def.next_game()
                && !index.contains_key(next)
            {
                return Err(CatalogError::UnknownNextGame {
                    slug: def.slug().clone(),
                    next: next.clone(),
                });
            }
        }

        Ok(Self { games, index })
    }

    /// The fallback slug as a typed value.
    ///
    /// # Panics
    ///
    /// Never panics: the constant is a valid slug.
    #[must_use]
    pub fn fallback_slug() -> GameSlug {
        GameSlug::new(Self::FALLBACK_SLUG).expect("fallback slug constant is valid")
    }

    /// Number of games in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games in catalog order, for the home screen.
    #[must_use]
    pub fn games(&self) -> &[GameDef] {
        &self.games
    }

    /// Exact lookup.
    #[must_use]
    pub fn get(&self, slug: &GameSlug) -> Option<&GameDef> {
        self.index.get(slug).map(|&i| &self.games[i])
    }

    /// Lookup with the fallback semantics: a miss substitutes the fallback
    /// game and logs a warning, but never fails.
    ///
    /// # Panics
    ///
    /// Panics if the catalog has no fallback game; `builtin()` guarantees
    /// one, and `from_packs` callers resolving slugs must include it.
    #[must_use]
    pub fn resolve(&self, slug: &GameSlug) -> ResolvedGame<'_> {
        if let Some(def) = self.get(slug) {
            return ResolvedGame {
                def,
                fallback_used: false,
            };
        }
        warn!(game = %slug, fallback = Self::FALLBACK_SLUG, "unknown game id, substituting fallback");
        let index = self
            .fallback_index()
            .expect("catalog must contain the fallback game");
        ResolvedGame {
            def: &self.games[index],
            fallback_used: true,
        }
    }

    fn fallback_index(&self) -> Option<usize> {
        let slug = GameSlug::new(Self::FALLBACK_SLUG).ok()?;
        self.index.get(&slug).copied()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
