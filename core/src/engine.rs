use alloc::boxed::Box;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of flipping a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipResult {
    /// Nothing happened: out of range, busy, or the tile was already showing.
    Ignored,
    /// First tile of a turn is now face-up.
    FirstRevealed,
    MatchFound,
    /// Both tiles stay face-up until someone turns them back.
    MismatchFound { first: usize, second: usize },
    /// The last pair was matched.
    LevelComplete,
}

impl FlipResult {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Everything needed to render and continue a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) level: Level,
    pub(crate) moves: u32,
    pub(crate) tiles: Vec<Tile>,
    pub(crate) first_selection: Option<usize>,
    pub(crate) busy: bool,
}

impl GameState {
    pub fn level(&self) -> Level {
        self.level
    }

    /// Completed two-tile attempts, the opening flip of a turn does not count.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn first_selection(&self) -> Option<usize> {
        self.first_selection
    }

    /// Whether taps are currently refused.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn total_pairs(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn matched_pairs(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_matched()).count() / 2
    }

    pub fn is_cleared(&self) -> bool {
        self.tiles.iter().all(Tile::is_matched)
    }

    /// Face-up tiles that still wait for a partner or for a mismatch to be resolved.
    pub fn pending_tiles(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_face_up() && !tile.is_matched())
            .map(|(index, _)| index)
    }

    pub(crate) fn set_all_face_up(&mut self, face_up: bool) {
        for tile in &mut self.tiles {
            tile.set_face_up(face_up);
        }
    }

    /// Turn a tile back down, matched tiles are left alone.
    pub(crate) fn hide(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            if !tile.is_matched() {
                tile.set_face_up(false);
            }
        }
    }

    pub(crate) fn shake(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.shake();
        }
    }
}

/// Pure rules of the game: builds levels and applies flips, no timers involved.
pub struct RulesEngine {
    content: Box<dyn ContentProvider>,
    entropy: Box<dyn Entropy>,
    schedule: Box<dyn LevelSchedule>,
    next_tile_id: u32,
}

impl RulesEngine {
    pub fn new(
        content: impl ContentProvider + 'static,
        entropy: impl Entropy + 'static,
        schedule: impl LevelSchedule + 'static,
    ) -> Self {
        Self {
            content: Box::new(content),
            entropy: Box::new(entropy),
            schedule: Box::new(schedule),
            next_tile_id: 0,
        }
    }

    /// Emoji content, default step schedule and entropy seeded from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            EmojiProvider,
            SeededEntropy::new(seed),
            StepSchedule::default(),
        )
    }

    pub fn side(&self, level: Level) -> Side {
        even_side(self.schedule.side(level))
    }

    pub fn pairs(&self, level: Level) -> TileCount {
        area(self.side(level)) / 2
    }

    /// Last level the configured content can build, `None` if not even the first.
    pub fn max_supported_level(&self) -> Option<Level> {
        self.schedule.max_supported_level(self.content.capacity())
    }

    /// Lay out a fresh level: every symbol twice, shuffled, all face-down.
    pub fn new_level(&mut self, level: Level) -> Result<GameState> {
        let level = level.max(1);
        let pairs = usize::from(self.pairs(level).max(1));

        let symbols = self.content.supply(pairs, self.entropy.as_mut())?;
        if symbols.len() != pairs {
            // a short or padded supply would silently change the grid shape
            log::warn!(
                "Content provider returned {} symbols, {} requested",
                symbols.len(),
                pairs
            );
            return Err(GameError::NotEnoughContent {
                requested: pairs,
                available: symbols.len(),
            });
        }

        let mut contents: Vec<Symbol> = symbols.iter().chain(symbols.iter()).cloned().collect();
        self.entropy.shuffle(&mut contents);

        let tiles = contents
            .into_iter()
            .map(|symbol| {
                let id = TileId(self.next_tile_id);
                self.next_tile_id = self.next_tile_id.wrapping_add(1);
                Tile::new(id, symbol)
            })
            .collect();

        log::debug!(
            "Built level {} with {} pairs on a {}x{} grid",
            level,
            pairs,
            self.side(level),
            self.side(level)
        );

        Ok(GameState {
            level,
            moves: 0,
            tiles,
            first_selection: None,
            busy: false,
        })
    }

    pub fn flip(&self, index: usize, state: &mut GameState) -> FlipResult {
        use FlipResult::*;

        if state.busy {
            return Ignored;
        }
        match state.tiles.get(index) {
            Some(tile) if tile.is_hidden() => {}
            _ => return Ignored,
        }

        let selection = state.first_selection.filter(|&first| {
            state
                .tiles
                .get(first)
                .is_some_and(|tile| tile.is_face_up() && !tile.is_matched())
        });
        if selection.is_none() && state.first_selection.is_some() {
            log::warn!(
                "Dropping selection {:?} that is not a face-up tile",
                state.first_selection
            );
        }

        let Some(first) = selection else {
            state.tiles[index].set_face_up(true);
            state.first_selection = Some(index);
            log::trace!("Flip {}: first of the turn", index);
            return FirstRevealed;
        };

        if first == index {
            return Ignored;
        }

        state.tiles[index].set_face_up(true);
        state.moves = state.moves.saturating_add(1);
        state.first_selection = None;

        if state.tiles[first].symbol() == state.tiles[index].symbol() {
            state.tiles[first].mark_matched();
            state.tiles[index].mark_matched();
            log::trace!("Flip {}: matches {}", index, first);

            if state.is_cleared() {
                LevelComplete
            } else {
                MatchFound
            }
        } else {
            log::trace!("Flip {}: mismatch with {}", index, first);
            MismatchFound {
                first,
                second: index,
            }
        }
    }
}

impl core::fmt::Debug for RulesEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RulesEngine")
            .field("capacity", &self.content.capacity())
            .field("next_tile_id", &self.next_tile_id)
            .finish_non_exhaustive()
    }
}
