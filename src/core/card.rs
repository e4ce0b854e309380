//! Per-card state machine.
//!
//! A card moves FaceDown -> FaceUp -> (FaceDown | Matched); Matched is
//! terminal within a round. Interactability is an independent axis so the
//! coordinator can freeze the whole grid during resolution without touching
//! face state.
//!
//! Animated flips model the visual collaborator: the flip takes
//! [`CARD_FLIP_MS`](crate::types::CARD_FLIP_MS) of game time and the logical
//! face changes at the midpoint of the animation, which is the moment other
//! components may observe the new orientation.

use crate::types::{CardId, Face, CARD_FLIP_MS};

#[derive(Debug, Clone)]
pub struct Card {
    id: CardId,
    face: Face,
    matched: bool,
    interactable: bool,
    /// Remaining animation time; zero means not animating
    flip_timer_ms: u32,
    /// The face swap has not happened yet for the in-flight flip
    midpoint_pending: bool,
}

impl Card {
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            face: Face::Down,
            matched: false,
            interactable: true,
            flip_timer_ms: 0,
            midpoint_pending: false,
        }
    }

    /// Rebuild a card from a save record entry. Matched cards display
    /// face-up permanently, regardless of the saved flip flag.
    pub fn from_saved(id: CardId, flipped: bool, matched: bool) -> Self {
        let mut card = Self::new(id);
        if matched {
            card.mark_matched();
        } else if flipped {
            card.face = Face::Up;
        }
        card
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_face_up(&self) -> bool {
        self.face == Face::Up
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    pub fn is_animating(&self) -> bool {
        self.flip_timer_ms > 0
    }

    /// Whether a selection on this card should be considered at all.
    pub fn accepts_input(&self) -> bool {
        self.interactable && !self.is_animating() && !self.matched
    }

    /// Flip toward face-up. No-op on a matched, already-up, or animating card.
    pub fn flip_to_front(&mut self, animated: bool) {
        if self.matched || self.face == Face::Up || self.is_animating() {
            return;
        }
        if animated {
            self.begin_flip();
        } else {
            self.face = Face::Up;
        }
    }

    /// Flip toward face-down. No-op on a matched, already-down, or animating card.
    pub fn flip_to_back(&mut self, animated: bool) {
        if self.matched || self.face == Face::Down || self.is_animating() {
            return;
        }
        if animated {
            self.begin_flip();
        } else {
            self.face = Face::Down;
        }
    }

    fn begin_flip(&mut self) {
        self.flip_timer_ms = CARD_FLIP_MS;
        self.midpoint_pending = true;
    }

    /// Idempotent and irreversible within a round. Completes any in-flight
    /// flip immediately so the matched card settles face-up.
    pub fn mark_matched(&mut self) {
        if self.matched {
            return;
        }
        self.matched = true;
        self.face = Face::Up;
        self.interactable = false;
        self.flip_timer_ms = 0;
        self.midpoint_pending = false;
    }

    /// A matched card can never be made interactable again.
    pub fn set_interactable(&mut self, interactable: bool) {
        if self.matched {
            return;
        }
        self.interactable = interactable;
    }

    /// Advance any in-flight flip animation.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.flip_timer_ms == 0 {
            return;
        }
        self.flip_timer_ms = self.flip_timer_ms.saturating_sub(elapsed_ms);
        if self.midpoint_pending && self.flip_timer_ms <= CARD_FLIP_MS / 2 {
            self.face = match self.face {
                Face::Down => Face::Up,
                Face::Up => Face::Down,
            };
            self.midpoint_pending = false;
        }
    }

    /// Return the card to its spawn state.
    pub fn reset(&mut self) {
        self.face = Face::Down;
        self.matched = false;
        self.interactable = true;
        self.flip_timer_ms = 0;
        self.midpoint_pending = false;
    }
}
