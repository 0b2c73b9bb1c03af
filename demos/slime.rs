//! Terminal slime mould demo using crossterm.
//!
//! Run: cargo run --bin slime [config.toml]

use std::error::Error;
use std::time::Instant;

use slime_demos::{Control, Input, Session, SlimeConfig};
use slime_term::Terminal;

fn run() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slime.toml".to_string());
    let config = SlimeConfig::load_or_default(&path)?;
    let frame = config.animation.frame_duration();
    let mut session = Session::new(config)?;

    let mut term = Terminal::new();
    term.init()?;
    let (w, h) = term.size()?;
    session.update(Input::Resize(w, h));
    session.draw(&mut term);
    term.flush()?;

    let mut next_tick = Instant::now() + frame;
    loop {
        let mut dirty = false;
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if let Some(input) = term.poll_input(timeout)? {
            if let Input::Resize(..) = input {
                term.clear()?;
            }
            if session.update(input) == Control::Quit {
                break;
            }
            dirty = true;
        }
        if Instant::now() >= next_tick {
            dirty |= session.tick()?;
            next_tick = Instant::now() + frame;
        }
        if dirty {
            session.draw(&mut term);
            term.flush()?;
        }
    }

    term.close();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
