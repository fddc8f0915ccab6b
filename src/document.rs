//! In-memory render target for the card grid.
//!
//! Each card keeps its type badge container separate from the surrounding
//! markup so it can be looked up by `types-{id}` and patched in place after
//! the grid has been painted.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardMarkup {
    pub id: String,
    pub head: String,
    pub types: String,
    pub tail: String,
}

impl CardMarkup {
    pub fn to_html(&self) -> String {
        format!("{}{}{}", self.head, self.types, self.tail)
    }
}

pub fn type_slot_id(id: &str) -> String {
    format!("types-{id}")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridContainer {
    cards: Vec<CardMarkup>,
}

impl GridContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites everything previously painted.
    pub fn replace(&mut self, cards: Vec<CardMarkup>) {
        self.cards = cards;
    }

    pub fn cards(&self) -> &[CardMarkup] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn inner_html(&self) -> String {
        self.cards.iter().map(CardMarkup::to_html).collect()
    }

    pub fn type_slot(&self, id: &str) -> Option<&str> {
        self.card(id).map(|card| card.types.as_str())
    }

    pub fn slot_is_populated(&self, id: &str) -> bool {
        self.type_slot(id).is_some_and(|markup| !markup.trim().is_empty())
    }

    /// Returns false when no card with this id is mounted.
    pub fn fill_type_slot(&mut self, id: &str, markup: String) -> bool {
        match self.cards.iter_mut().find(|card| card.id == id) {
            Some(card) => {
                card.types = markup;
                true
            }
            None => false,
        }
    }

    fn card(&self, id: &str) -> Option<&CardMarkup> {
        self.cards.iter().find(|card| card.id == id)
    }
}
