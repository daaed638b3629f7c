use flipside_core::{FlipResult, GamePhase, GameState, Side, Tile};
use std::fmt::Write;

fn cell(index: usize, tile: &Tile, phase: GamePhase) -> String {
    if tile.is_matched() {
        format!("[{}]", tile.symbol())
    } else if tile.is_face_up() || phase.shows_all_faces() {
        format!(" {} ", tile.symbol())
    } else {
        format!("{index:>3} ")
    }
}

fn phase_label(phase: GamePhase) -> &'static str {
    use GamePhase::*;
    match phase {
        Idle => "ready",
        Interstitial => "next level",
        Previewing => "memorize",
        Playing => "playing",
        LevelComplete => "level complete",
    }
}

/// Text view of the board, hidden tiles show the number to type.
pub(crate) fn board(state: &GameState, phase: GamePhase, side: Side) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Level {} ({side}x{side}) | moves {} | pairs {}/{} | {}",
        state.level(),
        state.moves(),
        state.matched_pairs(),
        state.total_pairs(),
        phase_label(phase),
    );

    if phase == GamePhase::Interstitial {
        let _ = writeln!(out, "  Get ready for level {}!", state.level());
        return out;
    }

    let width = usize::from(side.max(1));
    for (row_index, row) in state.tiles().chunks(width).enumerate() {
        out.push(' ');
        for (column, tile) in row.iter().enumerate() {
            out.push_str(&cell(row_index * width + column, tile, phase));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn outcome(result: FlipResult) -> Option<&'static str> {
    use FlipResult::*;
    match result {
        Ignored => Some("That tile can't be flipped right now."),
        FirstRevealed => None,
        MatchFound => Some("Match!"),
        MismatchFound { .. } => Some("No match."),
        LevelComplete => Some("Level cleared!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipside_core::{FixedEntropy, FixedProvider, RulesEngine, Session, StepSchedule, Timings};

    fn session() -> Session {
        let engine = RulesEngine::new(
            FixedProvider::new(["A", "B"]).unwrap(),
            FixedEntropy,
            StepSchedule::default(),
        );
        Session::new(engine, Timings::instant(), Default::default()).unwrap()
    }

    #[test]
    fn hidden_tiles_show_their_number() {
        let session = session();

        let text = board(session.state(), session.phase(), session.grid_side());

        assert!(text.starts_with("Level 1 (2x2) | moves 0 | pairs 0/2 | ready"));
        assert!(text.contains("  0   1 \n"));
        assert!(text.contains("  2   3 \n"));
    }

    #[test]
    fn preview_shows_every_face() {
        let mut session = session();
        session.start_game().unwrap();

        let text = board(session.state(), session.phase(), session.grid_side());

        assert!(text.contains(" A  B \n"));
        assert!(text.contains("memorize"));
    }

    #[test]
    fn matched_tiles_are_bracketed() {
        let mut session = session();
        session.start_game().unwrap();
        session.run_due().unwrap();
        session.on_tile_tap(0);
        session.on_tile_tap(2);

        let text = board(session.state(), session.phase(), session.grid_side());

        assert!(text.contains("[A]  1 \n"));
        assert!(text.contains("pairs 1/2"));
    }
}
