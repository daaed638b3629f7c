use clap::Args;
use flipside_core::{FlipResult, GamePhase, GameState, Level, Scheduler, Session, Side, Symbol};
use std::collections::HashMap;
use std::fmt;

#[derive(Args, Debug, Clone, PartialEq)]
pub(crate) struct AutoArgs {
    /// How many levels to play
    #[arg(short, long, default_value_t = 3)]
    levels: Level,

    /// Let the bot memorize the preview instead of discovering tiles by flipping
    #[arg(long)]
    peek: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LevelReport {
    pub level: Level,
    pub side: Side,
    pub moves: u32,
}

impl fmt::Display for LevelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = u32::from(self.side) * u32::from(self.side) / 2;
        write!(
            f,
            "level {:>3} | {}x{} | {} moves for {} pairs",
            self.level, self.side, self.side, self.moves, pairs
        )
    }
}

/// Player that never forgets a face it has seen on the current level.
#[derive(Debug, Default)]
struct MemoryBot {
    peek: bool,
    level: Level,
    seen: HashMap<usize, Symbol>,
}

impl MemoryBot {
    fn new(peek: bool) -> Self {
        Self {
            peek,
            level: 0,
            seen: HashMap::new(),
        }
    }

    fn observe(&mut self, state: &GameState, phase: GamePhase) {
        if state.level() != self.level {
            self.level = state.level();
            self.seen.clear();
        }
        if phase.shows_all_faces() && !self.peek {
            return;
        }
        for (index, tile) in state.tiles().iter().enumerate() {
            if tile.is_face_up() || phase.shows_all_faces() {
                self.seen.insert(index, tile.symbol().clone());
            }
        }
    }

    fn known_partner(&self, state: &GameState, of: usize) -> Option<usize> {
        let symbol = self.seen.get(&of)?;
        Self::hidden(state)
            .find(|&index| index != of && self.seen.get(&index) == Some(symbol))
    }

    fn hidden(state: &GameState) -> impl Iterator<Item = usize> + '_ {
        state
            .tiles()
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_hidden())
            .map(|(index, _)| index)
    }

    fn next_tap(&self, state: &GameState) -> Option<usize> {
        let unknown = || Self::hidden(state).find(|index| !self.seen.contains_key(index));

        if let Some(first) = state.first_selection() {
            return self
                .known_partner(state, first)
                .or_else(unknown)
                .or_else(|| Self::hidden(state).find(|&index| index != first));
        }

        Self::hidden(state)
            .find(|&index| self.known_partner(state, index).is_some())
            .or_else(unknown)
            .or_else(|| Self::hidden(state).next())
    }
}

/// Play `levels` levels on the session's simulated clock.
pub(crate) fn run(mut session: Session, args: &AutoArgs) -> anyhow::Result<Vec<LevelReport>> {
    let mut target = args.levels.max(1);
    if let Some(max_level) = session.engine().max_supported_level() {
        if target > max_level {
            log::warn!("Content only covers {} levels, stopping there", max_level);
            target = max_level;
        }
    }

    let mut bot = MemoryBot::new(args.peek);
    let mut reports = Vec::new();
    session.start_game()?;

    loop {
        bot.observe(session.state(), session.phase());

        if session.phase().accepts_taps() && !session.state().is_busy() {
            let Some(index) = bot.next_tap(session.state()) else {
                anyhow::bail!("Bot found nothing to flip on level {}", session.state().level());
            };
            let result = session.on_tile_tap(index);
            log::trace!("bot tap {}: {:?}", index, result);
            bot.observe(session.state(), session.phase());
            if result == FlipResult::LevelComplete {
                let report = LevelReport {
                    level: session.state().level(),
                    side: session.grid_side(),
                    moves: session.state().moves(),
                };
                log::info!("{}", report);
                reports.push(report);
                if session.state().level() >= target {
                    break;
                }
            }
            continue;
        }

        let Some(wait) = session.scheduler().next_deadline() else {
            anyhow::bail!("Session stalled in {:?}", session.phase());
        };
        session.advance(wait)?;
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipside_core::{FixedProvider, RulesEngine, SeededEntropy, StepSchedule, Timings};

    fn session(seed: u64) -> Session {
        let symbols: Vec<String> = (0..32).map(|i| format!("s{i}")).collect();
        let engine = RulesEngine::new(
            FixedProvider::new(symbols).unwrap(),
            SeededEntropy::new(seed),
            StepSchedule::default(),
        );
        Session::new(engine, Default::default(), Default::default()).unwrap()
    }

    #[test]
    fn peeking_bot_never_misses() {
        let args = AutoArgs {
            levels: 4,
            peek: true,
        };

        let reports = run(session(5), &args).unwrap();

        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].moves, 2);
        assert_eq!(reports[3].side, 4);
        assert_eq!(reports[3].moves, 8);
    }

    #[test]
    fn blind_bot_still_clears_levels() {
        let args = AutoArgs {
            levels: 6,
            peek: false,
        };

        let reports = run(session(11), &args).unwrap();

        assert_eq!(reports.len(), 6);
        for report in &reports {
            let pairs = u32::from(report.side) * u32::from(report.side) / 2;
            assert!(report.moves >= pairs);
            // each tile is misread at most once before its partner is known
            assert!(report.moves <= 2 * pairs);
        }
    }

    #[test]
    fn report_line_counts_pairs_from_the_side() {
        let report = LevelReport {
            level: 4,
            side: 4,
            moves: 11,
        };

        assert_eq!(report.to_string(), "level   4 | 4x4 | 11 moves for 8 pairs");
    }

    #[test]
    fn target_is_clamped_to_content() {
        let engine = RulesEngine::new(
            FixedProvider::new(["A", "B"]).unwrap(),
            SeededEntropy::new(1),
            StepSchedule::default(),
        );
        let session = Session::new(engine, Timings::instant(), Default::default()).unwrap();
        let args = AutoArgs {
            levels: 10,
            peek: true,
        };

        let reports = run(session, &args).unwrap();

        assert_eq!(reports.len(), 3);
    }
}
