use flipside_core::{Scheduler, Session};
use std::io::{BufRead, Write};
use web_time::Instant;

use crate::render;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Tap(usize),
    Restart,
    Quit,
    Unknown,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "r" | "restart" => Self::Restart,
            "q" | "quit" => Self::Quit,
            other => other.parse().map_or(Self::Unknown, Self::Tap),
        }
    }
}

fn show<W: Write>(session: &Session, out: &mut W) -> anyhow::Result<()> {
    let text = render::board(session.state(), session.phase(), session.grid_side());
    writeln!(out, "{text}")?;
    Ok(())
}

/// Sleep through timed phases in real time, redrawing whenever a follow-up ran.
fn wait_for_turn<W: Write>(session: &mut Session, out: &mut W) -> anyhow::Result<()> {
    while !session.phase().accepts_taps() || session.state().is_busy() {
        let Some(wait) = session.scheduler().next_deadline() else {
            log::warn!("Waiting on {:?} with nothing scheduled", session.phase());
            break;
        };
        let started = Instant::now();
        std::thread::sleep(wait);
        if session.advance(started.elapsed())? > 0 {
            show(session, out)?;
        }
    }
    Ok(())
}

pub(crate) fn run<R: BufRead, W: Write>(
    mut session: Session,
    input: R,
    mut out: W,
) -> anyhow::Result<()> {
    writeln!(out, "Type a tile number to flip it, 'r' to restart the level, 'q' to quit.")?;
    session.start_game()?;
    show(&session, &mut out)?;

    let mut lines = input.lines();
    loop {
        wait_for_turn(&mut session, &mut out)?;
        write!(out, "flip> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match Command::parse(&line?) {
            Command::Tap(index) => {
                let result = session.on_tile_tap(index);
                log::debug!("tap {}: {:?}", index, result);
                show(&session, &mut out)?;
                if let Some(message) = render::outcome(result) {
                    writeln!(out, "{message}")?;
                }
            }
            Command::Restart => {
                session.restart_level()?;
                show(&session, &mut out)?;
            }
            Command::Quit => break,
            Command::Unknown => writeln!(out, "Expected a tile number, 'r' or 'q'.")?,
        }
    }

    writeln!(
        out,
        "Reached level {} after {} moves on it.",
        session.state().level(),
        session.state().moves()
    )?;
    Ok(())
}
