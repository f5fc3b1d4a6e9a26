use serde::Deserialize;

use games_core::model::{
    CompletionPolicy, GameKind, GameRewards, GameSlug, JournalPrompt, Pacing, Question,
};

/// The playable content of a game, matching its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GameContent {
    /// Quiz and story games run over multiple-choice questions; story
    /// questions carry their narrative passages.
    Questions(Vec<Question>),
    /// Journal games run over free-text prompts.
    Prompts(Vec<JournalPrompt>),
}

impl GameContent {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            GameContent::Questions(questions) => questions.len(),
            GameContent::Prompts(prompts) => prompts.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One authored game, deserialized from a pack file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameDef {
    slug: GameSlug,
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    kind: GameKind,
    rewards: GameRewards,
    #[serde(default)]
    pacing: Pacing,
    completion: CompletionPolicy,
    #[serde(default)]
    next_game: Option<GameSlug>,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    prompts: Vec<JournalPrompt>,
}

impl GameDef {
    #[must_use]
    pub fn slug(&self) -> &GameSlug {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    #[must_use]
    pub fn rewards(&self) -> GameRewards {
        self.rewards
    }

    #[must_use]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    #[must_use]
    pub fn completion(&self) -> CompletionPolicy {
        self.completion
    }

    /// Hardcoded "next game" navigation target, when the author chose one.
    #[must_use]
    pub fn next_game(&self) -> Option<&GameSlug> {
        self.next_game.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn prompts(&self) -> &[JournalPrompt] {
        &self.prompts
    }

    /// The content this game's kind actually runs over.
    #[must_use]
    pub fn content(&self) -> GameContent {
        match self.kind {
            GameKind::Quiz | GameKind::Story => GameContent::Questions(self.questions.clone()),
            GameKind::Journal => GameContent::Prompts(self.prompts.clone()),
        }
    }

    /// Whether the pack carries content for its declared kind and nothing
    /// for the other runner.
    #[must_use]
    pub(crate) fn content_matches_kind(&self) -> bool {
        match self.kind {
            GameKind::Quiz | GameKind::Story => !self.questions.is_empty() && self.prompts.is_empty(),
            GameKind::Journal => !self.prompts.is_empty() && self.questions.is_empty(),
        }
    }
}
