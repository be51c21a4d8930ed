//! Evacuation procedure deck and emergency checklist catalog.

use muster_types::{EmergencyChecklist, ProcedureCard};

/// Carousel over evacuation procedure cards.
///
/// Navigation wraps in both directions. An empty deck has no current card
/// and ignores navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDeck {
    cards: Vec<ProcedureCard>,
    current: usize,
}

impl ProcedureDeck {
    /// Create a deck positioned on the first card.
    pub const fn new(cards: Vec<ProcedureCard>) -> Self {
        Self { cards, current: 0 }
    }

    /// The card currently shown.
    pub fn current(&self) -> Option<&ProcedureCard> {
        self.cards.get(self.current)
    }

    /// Zero-based position and deck size.
    pub const fn position(&self) -> (usize, usize) {
        (self.current, self.cards.len())
    }

    /// All cards in deck order.
    pub fn cards(&self) -> &[ProcedureCard] {
        &self.cards
    }

    /// Advance to the next card, wrapping to the first.
    pub fn next_card(&mut self) -> Option<&ProcedureCard> {
        self.current = self
            .current
            .saturating_add(1)
            .checked_rem(self.cards.len())
            .unwrap_or(0);
        self.current()
    }

    /// Go back to the previous card, wrapping to the last.
    pub fn previous_card(&mut self) -> Option<&ProcedureCard> {
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or_else(|| self.cards.len().saturating_sub(1));
        self.current()
    }
}

/// Lookup over emergency do/don't checklists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChecklistCatalog {
    checklists: Vec<EmergencyChecklist>,
}

impl ChecklistCatalog {
    /// Wrap a list of checklists, keeping their order.
    pub const fn new(checklists: Vec<EmergencyChecklist>) -> Self {
        Self { checklists }
    }

    /// All checklists in catalog order.
    pub fn all(&self) -> &[EmergencyChecklist] {
        &self.checklists
    }

    /// Find a checklist by catalog id.
    pub fn by_id(&self, id: &str) -> Option<&EmergencyChecklist> {
        self.checklists.iter().find(|c| c.id == id)
    }

    /// Every checklist for an emergency category, ignoring case, in
    /// catalog order.
    pub fn by_category(&self, category: &str) -> Vec<&EmergencyChecklist> {
        let wanted = category.trim();
        self.checklists
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(wanted))
            .collect()
    }

    /// Distinct emergency categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for checklist in &self.checklists {
            if !categories.contains(&checklist.category.as_str()) {
                categories.push(&checklist.category);
            }
        }
        categories
    }
}
