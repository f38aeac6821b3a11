use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::info;

use crate::sequence::{sequence_distance, sequence_greater_than, sequence_less_than};
use crate::types::{ParticipantId, SequenceIndex};

/// Ids further than this behind a sender's newest index are treated as
/// already applied and their bookkeeping is dropped. Must stay well under
/// half the `u16` range so wrap-around comparisons remain unambiguous.
const APPLIED_WINDOW: u16 = 1024;

/// Receiver-side filter guaranteeing at-most-once application of broadcast
/// one-shot events under at-least-once, unordered delivery.
///
/// For any fixed `(sender, sequence)` pair, [`should_apply`] answers true at
/// most once for the lifetime of the session. Bookkeeping per sender is a
/// sliding window keyed off the newest index seen; anything that falls out
/// of the window is considered applied, which keeps memory bounded for
/// arbitrarily long sessions.
///
/// [`should_apply`]: SequencedEventDeduplicator::should_apply
pub struct SequencedEventDeduplicator {
    senders: HashMap<ParticipantId, SenderWindow>,
}

struct SenderWindow {
    newest: SequenceIndex,
    /// Applied ids within the window, sorted ascending in wrap order.
    applied: Vec<SequenceIndex>,
}

impl SequencedEventDeduplicator {
    pub fn new() -> Self {
        Self {
            senders: HashMap::new(),
        }
    }

    /// Returns true exactly once per unique `(sender, sequence)` pair;
    /// duplicates and ids that have slid out of the window return false.
    pub fn should_apply(&mut self, sender: ParticipantId, sequence: SequenceIndex) -> bool {
        let window = match self.senders.entry(sender) {
            Entry::Vacant(vacant) => {
                vacant.insert(SenderWindow {
                    newest: sequence,
                    applied: vec![sequence],
                });
                return true;
            }
            Entry::Occupied(occupied) => occupied.into_mut(),
        };

        if sequence_greater_than(sequence, window.newest) {
            window.newest = sequence;
            window.insert(sequence);
            window.prune();
            return true;
        }

        if sequence_distance(window.newest, sequence) > APPLIED_WINDOW {
            // Too old to track; assume applied rather than risk a repeat.
            return false;
        }

        if window.contains(sequence) {
            return false;
        }

        window.insert(sequence);
        true
    }

    /// Drops all bookkeeping for a departed participant.
    pub fn remove_sender(&mut self, sender: ParticipantId) {
        if self.senders.remove(&sender).is_some() {
            info!("Dropped dedup state for departed sender {:?}", sender);
        }
    }

    pub fn tracked_senders(&self) -> usize {
        self.senders.len()
    }
}

impl Default for SequencedEventDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl SenderWindow {
    /// Recent ids arrive near the tail, so scan from the back.
    fn contains(&self, id: SequenceIndex) -> bool {
        for old_id in self.applied.iter().rev() {
            if *old_id == id {
                return true;
            }
            if sequence_less_than(*old_id, id) {
                return false;
            }
        }
        false
    }

    fn insert(&mut self, id: SequenceIndex) {
        let mut index = self.applied.len();
        while index > 0 {
            let old_id = self.applied[index - 1];
            if sequence_less_than(old_id, id) {
                break;
            }
            index -= 1;
        }
        self.applied.insert(index, id);
    }

    fn prune(&mut self) {
        let newest = self.newest;
        self.applied
            .retain(|id| sequence_distance(newest, *id) <= APPLIED_WINDOW);
    }
}
