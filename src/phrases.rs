//! Category phrase lists
//!
//! The phrase book is static for the lifetime of the process: either the
//! built-in lists or a JSON file of the form `{"world": ["..."], ...}`.

use crate::types::Category;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PhraseBookError {
    #[error("Failed to read phrase file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse phrase file: {0}")]
    Parse(#[from] serde_json::Error),
}

const WORLD: &[&str] = &[
    "Eiffel Tower",
    "Great Wall of China",
    "Amazon Rainforest",
    "Mount Everest",
    "Sahara Desert",
    "Statue of Liberty",
    "Northern Lights",
    "Grand Canyon",
    "Machu Picchu",
    "Niagara Falls",
    "Taj Mahal",
    "Great Barrier Reef",
    "Leaning Tower of Pisa",
    "Panama Canal",
    "Dead Sea",
    "Mount Kilimanjaro",
    "Venice",
    "Big Ben",
    "Sydney Opera House",
    "Pyramids of Giza",
    "Times Square",
    "Golden Gate Bridge",
    "Antarctica",
    "Mediterranean Sea",
    "Colosseum",
];

const SPORTS: &[&str] = &[
    "Slam Dunk",
    "Hat Trick",
    "Penalty Kick",
    "Home Run",
    "Touchdown",
    "Hole in One",
    "Marathon",
    "Photo Finish",
    "Offside",
    "Free Throw",
    "Grand Slam",
    "Yellow Card",
    "Pole Vault",
    "Relay Race",
    "Knockout",
    "Stolen Base",
    "Power Play",
    "Tour de France",
    "Olympic Torch",
    "Super Bowl",
    "Figure Skating",
    "Match Point",
    "Bicycle Kick",
    "Checkered Flag",
    "Half Time",
];

const SCIENCE: &[&str] = &[
    "Black Hole",
    "Photosynthesis",
    "Periodic Table",
    "Gravity",
    "DNA",
    "Solar System",
    "Microscope",
    "Volcano",
    "Electricity",
    "Magnet",
    "Telescope",
    "Dinosaur Fossil",
    "Big Bang",
    "Speed of Light",
    "Evolution",
    "Atom",
    "Chemical Reaction",
    "Vaccine",
    "Earthquake",
    "Rainbow",
    "Oxygen",
    "Test Tube",
    "Satellite",
    "Global Warming",
    "Lightning",
];

/// Ordered, de-duplicated phrase lists for every category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseBook {
    lists: BTreeMap<Category, Vec<String>>,
}

impl PhraseBook {
    /// Build a phrase book, dropping duplicates and blank entries while keeping order.
    /// Categories missing from `lists` end up empty.
    pub fn new<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = (Category, Vec<S>)>,
        S: Into<String>,
    {
        let mut book: BTreeMap<Category, Vec<String>> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for (category, phrases) in lists {
            let mut seen = HashSet::new();
            let cleaned = phrases
                .into_iter()
                .map(|p| p.into().trim().to_string())
                .filter(|p| !p.is_empty() && seen.insert(p.clone()))
                .collect();
            book.insert(category, cleaned);
        }

        Self { lists: book }
    }

    /// The lists shipped with the game
    pub fn builtin() -> Self {
        Self::new([
            (Category::World, WORLD.to_vec()),
            (Category::Sports, SPORTS.to_vec()),
            (Category::Science, SCIENCE.to_vec()),
        ])
    }

    pub fn from_json_str(json: &str) -> Result<Self, PhraseBookError> {
        let lists: BTreeMap<Category, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::new(lists))
    }

    pub fn from_file(path: &Path) -> Result<Self, PhraseBookError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Phrases for a category (empty slice if none were configured)
    pub fn phrases(&self, category: Category) -> &[String] {
        self.lists
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Categories that can actually be played
    pub fn playable_categories(&self) -> Vec<Category> {
        self.lists
            .iter()
            .filter(|(_, phrases)| !phrases.is_empty())
            .map(|(category, _)| *category)
            .collect()
    }
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self::builtin()
    }
}
