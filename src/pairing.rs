//! Pairwise compatibility wizard.
//!
//! The engine walks every `(direction, anchor, candidate)` triple in the
//! order directions `down, up, right, left`, then anchors, then candidates.
//! Triples whose answer is already implied are skipped without asking:
//!
//! * the anchor's mask for the direction does not want a neighbor of the
//!   candidate's solidity (mask `1` wants solid, `2` wants non-solid, any
//!   other mask wants nothing),
//! * the pair is already recorded as allowed or forbidden in that direction,
//! * the candidate is a placeholder tile (id 0).
//!
//! Everything else is presented to the user, and the answer is recorded on
//! both tiles before moving on. All state lives in the cursor and in the
//! tiles, so the engine can be left and resumed at any time.

use derive_more::IsVariant;

use crate::{
    adjacency,
    direction::CardinalDirs::{self, Down, Left, Right, Up},
    tile::{Tile, TileIndex},
};

pub const PAIRING_ORDER: [CardinalDirs; 4] = [Down, Up, Right, Left];

/// A candidate placed next to an anchor, waiting for a yes/no
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub direction: CardinalDirs,
    pub anchor: TileIndex,
    pub candidate: TileIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Step {
    Prompt(Pairing),
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingEngine {
    // index into PAIRING_ORDER, PAIRING_ORDER.len() once exhausted
    pass: usize,
    anchor: TileIndex,
    candidate: TileIndex,
}

impl PairingEngine {
    /// Positions a fresh engine on the first pair that needs an answer
    pub fn start(tiles: &[Tile]) -> (Self, Step) {
        let mut engine = Self::default();
        let step = engine.resume(tiles);
        return (engine, step);
    }

    pub fn is_complete(&self) -> bool {
        return self.pass >= PAIRING_ORDER.len();
    }

    /// The triple under the cursor, presentable or not
    pub fn current(&self) -> Option<Pairing> {
        if self.is_complete() {
            return None;
        }
        return Some(Pairing {
            direction: PAIRING_ORDER[self.pass],
            anchor: self.anchor,
            candidate: self.candidate,
        });
    }

    /// Re-applies the skip rule to the triple under the cursor.
    ///
    /// Called when returning to a frozen engine, since masks may have been
    /// edited in the meantime.
    pub fn resume(&mut self, tiles: &[Tile]) -> Step {
        if tiles.is_empty() || self.anchor >= tiles.len() || self.candidate >= tiles.len() {
            self.finish();
        }
        return self.settle(tiles);
    }

    /// Moves past the current triple to the next one that needs an answer
    pub fn next(&mut self, tiles: &[Tile]) -> Step {
        if self.is_complete() {
            return Step::Complete;
        }
        self.advance(tiles.len());
        return self.settle(tiles);
    }

    /// The current candidate may sit next to the anchor
    pub fn confirm(&mut self, tiles: &mut [Tile]) -> Step {
        return self.decide(tiles, true);
    }

    /// The current candidate must not sit next to the anchor
    pub fn deny(&mut self, tiles: &mut [Tile]) -> Step {
        return self.decide(tiles, false);
    }

    /// `(triples passed, total triples)`
    pub fn progress(&self, count: usize) -> (usize, usize) {
        let per_pass = count * count;
        let total = PAIRING_ORDER.len() * per_pass;
        if self.is_complete() {
            return (total, total);
        }
        return (self.pass * per_pass + self.anchor * count + self.candidate, total);
    }

    fn decide(&mut self, tiles: &mut [Tile], allowed: bool) -> Step {
        let Some(pairing) = self.current() else {
            return Step::Complete;
        };
        adjacency::record(
            tiles,
            pairing.anchor,
            pairing.candidate,
            pairing.direction,
            allowed,
        );
        return self.next(tiles);
    }

    fn settle(&mut self, tiles: &[Tile]) -> Step {
        while let Some(pairing) = self.current() {
            if !Self::is_skipped(tiles, &pairing) {
                return Step::Prompt(pairing);
            }
            log::trace!("skipping {pairing:?}");
            self.advance(tiles.len());
        }
        return Step::Complete;
    }

    fn advance(&mut self, count: usize) {
        self.candidate += 1;
        if self.candidate < count {
            return;
        }
        self.candidate = 0;
        self.anchor += 1;
        if self.anchor < count {
            return;
        }
        self.anchor = 0;
        if self.pass + 1 >= PAIRING_ORDER.len() {
            self.finish();
        } else {
            self.pass += 1;
            log::debug!("pairing direction {}", PAIRING_ORDER[self.pass].name());
        }
    }

    fn finish(&mut self) {
        if !self.is_complete() {
            log::info!("pairing complete");
        }
        self.pass = PAIRING_ORDER.len();
        self.anchor = 0;
        self.candidate = 0;
    }

    fn is_skipped(tiles: &[Tile], pairing: &Pairing) -> bool {
        let anchor = &tiles[pairing.anchor];
        let candidate = &tiles[pairing.candidate];
        return candidate.is_ignored()
            || !anchor.masks[pairing.direction].accepts(candidate.non_solid)
            || anchor
                .neighbors
                .is_decided(pairing.candidate, pairing.direction);
    }
}
