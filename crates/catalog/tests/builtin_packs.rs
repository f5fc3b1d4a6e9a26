use catalog::GameCatalog;
use games_core::model::{GameKind, GameSlug};

#[test]
fn builtin_packs_parse_and_validate() {
    let catalog = GameCatalog::builtin().expect("builtin packs must be valid");
    assert!(catalog.len() >= 5);

    // Every authored game carries content for its kind.
    for def in catalog.games() {
        match def.kind() {
            GameKind::Quiz | GameKind::Story => assert!(!def.questions().is_empty()),
            GameKind::Journal => assert!(!def.prompts().is_empty()),
        }
    }
}

#[test]
fn story_questions_carry_passages() {
    let catalog = GameCatalog::builtin().unwrap();
    let slug = GameSlug::new("brave-knight").unwrap();
    let story = catalog.get(&slug).unwrap();
    assert_eq!(story.kind(), GameKind::Story);
    assert!(story.questions().iter().all(|q| q.passage().is_some()));
}

#[test]
fn known_slug_resolves_without_fallback() {
    let catalog = GameCatalog::builtin().unwrap();
    let slug = GameSlug::new("animal-sounds").unwrap();
    let resolved = catalog.resolve(&slug);
    assert!(!resolved.fallback_used);
    assert_eq!(resolved.def.slug(), &slug);
}

#[test]
fn unknown_slug_falls_back_to_free_play() {
    let catalog = GameCatalog::builtin().unwrap();
    let slug = GameSlug::new("no-such-game").unwrap();
    let resolved = catalog.resolve(&slug);
    assert!(resolved.fallback_used);
    assert_eq!(resolved.def.slug().as_str(), GameCatalog::FALLBACK_SLUG);
    assert_eq!(resolved.def.rewards().coins, 10);
    assert_eq!(resolved.def.rewards().xp, 5);
}

#[test]
fn next_game_chain_stays_inside_the_catalog() {
    let catalog = GameCatalog::builtin().unwrap();
    for def in catalog.games() {
        if let Some(next) = def.next_game() {
            assert!(catalog.get(next).is_some(), "{} -> {next} dangles", def.slug());
        }
    }
}
