//! Crossterm terminal driver for the slime demos.
//!
//! Provides a [`Terminal`] that paints [`Glyph`]s at grid [`Cell`]s (one
//! terminal character per cell) and translates crossterm events into
//! [`Input`]s.

mod style;

pub use style::{Color, Glyph};

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use slime_core::Cell;

/// A user action relevant to the demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Main (left) button pressed at a cell.
    Click(Cell),
    /// Secondary (right) button pressed at a cell.
    RightClick(Cell),
    /// A printable key.
    Key(char),
    Enter,
    Escape,
    /// The terminal was resized to (width, height).
    Resize(i32, i32),
}

/// Maps a [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

/// Maps a crossterm event to an [`Input`], dropping everything the demos
/// do not use.
fn to_input(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            match code {
                KeyCode::Char(c) => Some(Input::Key(c)),
                KeyCode::Enter => Some(Input::Enter),
                KeyCode::Esc => Some(Input::Escape),
                _ => None,
            }
        }
        Event::Mouse(me) => {
            let pos = Cell::new(me.column as i32, me.row as i32);
            match me.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Input::Click(pos)),
                MouseEventKind::Down(MouseButton::Right) => Some(Input::RightClick(pos)),
                _ => None,
            }
        }
        Event::Resize(w, h) => Some(Input::Resize(w as i32, h as i32)),
        _ => None,
    }
}

/// Full-screen crossterm terminal with mouse capture.
///
/// Drawing is buffered: [`put`](Self::put) and [`print`](Self::print)
/// queue cells and [`flush`](Self::flush) writes them out.
#[derive(Default)]
pub struct Terminal {
    active: bool,
    pending: Vec<(Cell, Glyph)>,
}

impl Terminal {
    /// Nothing touches the terminal until [`init`](Self::init).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter raw mode and the alternate screen, hide the cursor and start
    /// capturing the mouse.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    /// Undo [`init`](Self::init). Does nothing if the terminal is not
    /// active, so it may be called more than once.
    pub fn close(&mut self) {
        if !std::mem::take(&mut self.active) {
            return;
        }
        let mut stdout = io::stdout();
        let screen = execute!(
            stdout,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let raw = terminal::disable_raw_mode();
        if let Err(e) = screen.and(raw) {
            log::warn!("could not restore the terminal: {e}");
        }
    }

    /// Current terminal size as (width, height).
    pub fn size(&self) -> io::Result<(i32, i32)> {
        let (w, h) = terminal::size()?;
        Ok((w as i32, h as i32))
    }

    /// Queue a glyph at `cell`. Cells with negative coordinates are ignored.
    pub fn put(&mut self, cell: Cell, glyph: Glyph) {
        if cell.x < 0 || cell.y < 0 {
            return;
        }
        self.pending.push((cell, glyph));
    }

    /// Queue a string starting at `cell`, one character per column.
    pub fn print(&mut self, cell: Cell, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(cell.shift(i as i32, 0), Glyph::new(ch, fg, bg));
        }
    }

    /// Clear the whole screen immediately and drop queued cells.
    pub fn clear(&mut self) -> io::Result<()> {
        self.pending.clear();
        let mut stdout = io::stdout();
        execute!(stdout, ResetColor, terminal::Clear(ClearType::All))
    }

    /// Write every queued cell.
    pub fn flush(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        let mut last: Option<(Color, Color)> = None;
        for (cell, glyph) in self.pending.drain(..) {
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            if last != Some((glyph.fg, glyph.bg)) {
                queue!(
                    stdout,
                    SetForegroundColor(to_ct_color(glyph.fg)),
                    SetBackgroundColor(to_ct_color(glyph.bg))
                )?;
                last = Some((glyph.fg, glyph.bg));
            }
            queue!(stdout, Print(glyph.ch))?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    /// Wait up to `timeout` for the next relevant input.
    ///
    /// Irrelevant events are consumed; `Ok(None)` means the timeout expired
    /// without anything the demos care about.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        while event::poll(Duration::ZERO)? {
            if let Some(input) = to_input(event::read()?) {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn default_colour_maps_to_reset() {
        assert_eq!(to_ct_color(Color::Default), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::Rgb(10, 20, 30)),
            CtColor::Rgb {
                r: 10,
                g: 20,
                b: 30
            }
        );
    }

    #[test]
    fn mouse_buttons_map_to_cells() {
        assert_eq!(
            to_input(mouse(MouseEventKind::Down(MouseButton::Left), 4, 7)),
            Some(Input::Click(Cell::new(4, 7)))
        );
        assert_eq!(
            to_input(mouse(MouseEventKind::Down(MouseButton::Right), 0, 1)),
            Some(Input::RightClick(Cell::new(0, 1)))
        );
        assert_eq!(to_input(mouse(MouseEventKind::Moved, 1, 1)), None);
    }

    #[test]
    fn keys_map_and_releases_are_ignored() {
        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(to_input(Event::Key(press)), Some(Input::Key('q')));
        assert_eq!(
            to_input(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))),
            Some(Input::Enter)
        );
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(to_input(Event::Key(release)), None);
    }

    #[test]
    fn resize_is_reported() {
        assert_eq!(to_input(Event::Resize(80, 24)), Some(Input::Resize(80, 24)));
    }

    #[test]
    fn put_ignores_negative_cells_and_print_spreads() {
        let mut t = Terminal::new();
        t.put(Cell::new(-1, 0), Glyph::block(Color::Default));
        assert!(t.pending.is_empty());
        t.print(Cell::new(2, 3), "ab", Color::Default, Color::Default);
        assert_eq!(t.pending.len(), 2);
        assert_eq!(t.pending[1].0, Cell::new(3, 3));
        assert_eq!(t.pending[1].1.ch, 'b');
    }
}
