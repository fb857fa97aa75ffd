use super::{GameError, GameResult};
use crate::phrases::PhraseBook;
use crate::types::Category;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

/// Non-repeating random draw over one category's phrases
#[derive(Debug, Clone, PartialEq)]
pub struct PhrasePool {
    category: Category,
    used: HashSet<String>,
}

impl PhrasePool {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            used: HashSet::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Phrases already drawn since the last reset
    pub fn used(&self) -> &HashSet<String> {
        &self.used
    }

    /// Draw a phrase that has not come up yet. Once every phrase has been used
    /// the used-set is cleared first, so the whole list is available again.
    pub fn draw<R: Rng + ?Sized>(&mut self, book: &PhraseBook, rng: &mut R) -> GameResult<String> {
        let phrases = book.phrases(self.category);
        if phrases.is_empty() {
            return Err(GameError::EmptyCategory(self.category));
        }

        if phrases.iter().all(|p| self.used.contains(p)) {
            tracing::debug!("Phrase pool for {} exhausted, starting over", self.category);
            self.used.clear();
        }

        let available: Vec<&String> = phrases.iter().filter(|p| !self.used.contains(*p)).collect();
        let phrase = available
            .choose(rng)
            .map(|p| (*p).clone())
            .ok_or(GameError::EmptyCategory(self.category))?;

        self.used.insert(phrase.clone());
        Ok(phrase)
    }
}
