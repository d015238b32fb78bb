//! Sentinel marker vocabulary
//!
//! The bracketed tokens the model is instructed to emit. These are embedded
//! verbatim in the system prompt, so changing one is a wire-protocol change
//! and must bump [`PROTOCOL_VERSION`].

/// Version of the marker vocabulary below
pub const PROTOCOL_VERSION: u32 = 1;

/// Reward tokens awarded in order, one per correct answer
pub const REWARD_POOL: [&str; 5] = ["🌟", "🏆", "💫", "🎯", "🎮"];

/// Number of rewards that wins the game
pub const MAX_REWARDS: usize = REWARD_POOL.len();

/// Difficulty of a fresh game
pub const MIN_DIFFICULTY: u8 = 1;

/// Difficulty never rises past this
pub const MAX_DIFFICULTY: u8 = 5;

/// Number of categories a player must pick
pub const REQUIRED_CATEGORIES: usize = 6;

/// Categories offered on the start screen
pub const CATEGORY_CHOICES: [&str; 6] = [
    "History",
    "Science",
    "Pop Culture",
    "Geography",
    "Sports",
    "Literature",
];

/// One sentinel marker of the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Host asks the player to pick categories
    Categories,
    /// Host confirms the chosen categories, listed as bracketed tokens
    CategoriesSelected,
    /// Host poses a question
    Question,
    /// Previous answer was right
    Correct,
    /// Previous answer was wrong
    Incorrect,
    /// Game has ended
    GameOver,
}

impl Marker {
    /// Every marker, in the order their rules are evaluated
    pub const ALL: [Marker; 6] = [
        Marker::Categories,
        Marker::CategoriesSelected,
        Marker::Correct,
        Marker::Incorrect,
        Marker::GameOver,
        Marker::Question,
    ];

    /// Bare marker name, without brackets
    pub fn name(self) -> &'static str {
        match self {
            Marker::Categories => "CATEGORIES",
            Marker::CategoriesSelected => "CATEGORIES_SELECTED",
            Marker::Question => "QUESTION",
            Marker::Correct => "CORRECT",
            Marker::Incorrect => "INCORRECT",
            Marker::GameOver => "GAME_OVER",
        }
    }

    /// Literal token as it appears in model output
    pub fn token(self) -> &'static str {
        match self {
            Marker::Categories => "[CATEGORIES]",
            Marker::CategoriesSelected => "[CATEGORIES_SELECTED]",
            Marker::Question => "[QUESTION]",
            Marker::Correct => "[CORRECT]",
            Marker::Incorrect => "[INCORRECT]",
            Marker::GameOver => "[GAME_OVER]",
        }
    }

    /// Look up a marker by its bare name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Whether the marker's literal token occurs anywhere in `text`
    pub fn occurs_in(self, text: &str) -> bool {
        text.contains(self.token())
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
