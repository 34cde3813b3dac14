//! Participant registry
//!
//! Name-keyed participant state owned by a single rating run. Lookups never
//! fail: unknown names are registered on first reference.

use crate::types::{Participant, ParticipantName};
use std::collections::HashMap;
use tracing::debug;

/// Registry of participants keyed by trimmed name
#[derive(Debug, Clone)]
pub struct ParticipantRegistry {
    participants: HashMap<ParticipantName, Participant>,
    /// Names in first-seen order
    order: Vec<ParticipantName>,
    initial_rating: i64,
}

impl ParticipantRegistry {
    /// Create an empty registry handing out `initial_rating` to new participants
    pub fn new(initial_rating: i64) -> Self {
        Self {
            participants: HashMap::new(),
            order: Vec::new(),
            initial_rating,
        }
    }

    /// Insert known participants. Blank names are skipped and a repeated
    /// name replaces the earlier entry.
    pub fn seed<I>(&mut self, known: I)
    where
        I: IntoIterator<Item = Participant>,
    {
        for participant in known {
            let participant =
                Participant::new(&participant.name, participant.rating, participant.game_count);
            if participant.name.is_empty() {
                debug!("Skipping seed participant with blank name");
                continue;
            }
            self.insert(participant);
        }
    }

    /// Get the participant with this name, registering a default one if absent.
    ///
    /// A blank name is a valid key here and registers like any other.
    pub fn resolve(&mut self, name: &str) -> &mut Participant {
        let name = name.trim();
        let initial_rating = self.initial_rating;
        let order = &mut self.order;

        self.participants
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Registering new participant '{}'", name);
                order.push(name.to_string());
                Participant::new(name, initial_rating, 0)
            })
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.participants.get(name.trim())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.participants.contains_key(name.trim())
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.order.iter().filter_map(|name| self.participants.get(name))
    }

    fn insert(&mut self, participant: Participant) {
        if !self.participants.contains_key(&participant.name) {
            self.order.push(participant.name.clone());
        }
        self.participants
            .insert(participant.name.clone(), participant);
    }
}
