//! Frame-by-frame replay of a finished search.
//!
//! The search itself never pauses; animations replay
//! [`SearchResult::visit_order`] here at whatever pace the caller wants.

use std::collections::VecDeque;

use slime_core::Cell;

use crate::error::SearchError;
use crate::search::SearchResult;

/// Pacing knobs for [`Playback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Visited cells revealed per frame. Zero is treated as one.
    pub cells_per_frame: usize,
    /// After the n-th cell the live trail holds at most `n / trail_divisor`
    /// older cells; one cell decays per step beyond that. Zero is treated
    /// as one.
    pub trail_divisor: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            cells_per_frame: 100,
            trail_divisor: 15,
        }
    }
}

/// One animation step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// 0-based frame number.
    pub index: usize,
    /// Cells finalized during this frame, in visit order.
    pub explored: Vec<Cell>,
    /// Cells that dropped off the live trail during this frame.
    pub decayed: Vec<Cell>,
    /// Predecessor chain from the source to the last explored cell.
    pub vein: Vec<Cell>,
}

/// Iterator of [`Frame`]s over a [`SearchResult`] it owns.
#[derive(Debug, Clone)]
pub struct Playback {
    result: SearchResult,
    config: PlaybackConfig,
    pos: usize,
    frame: usize,
    trail: VecDeque<Cell>,
}

impl Playback {
    pub fn new(result: SearchResult, config: PlaybackConfig) -> Self {
        Self {
            result,
            config,
            pos: 0,
            frame: 0,
            trail: VecDeque::new(),
        }
    }

    /// The result being replayed.
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    /// Give the result back, e.g. to keep it after the replay.
    pub fn into_result(self) -> SearchResult {
        self.result
    }

    /// Number of visited cells replayed so far.
    pub fn progress(&self) -> usize {
        self.pos
    }

    /// Whether every visited cell has been replayed.
    pub fn is_finished(&self) -> bool {
        self.pos >= self.result.visit_order.len()
    }

    /// Frames left to produce.
    pub fn frames_remaining(&self) -> usize {
        let left = self.result.visit_order.len() - self.pos;
        left.div_ceil(self.config.cells_per_frame.max(1))
    }

    /// Cells currently on the live trail, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = Cell> + '_ {
        self.trail.iter().copied()
    }

    /// The shortest path to draw once the replay is over.
    pub fn final_path(&self) -> Result<Vec<Cell>, SearchError> {
        self.result.path()
    }

    fn step(&mut self) -> Result<Frame, SearchError> {
        let order = &self.result.visit_order;
        let end = (self.pos + self.config.cells_per_frame.max(1)).min(order.len());
        let divisor = self.config.trail_divisor.max(1);

        let mut frame = Frame {
            index: self.frame,
            ..Frame::default()
        };
        for (i, &cell) in order[self.pos..end].iter().enumerate() {
            let iteration = self.pos + i + 1;
            if self.trail.len() > iteration / divisor {
                if let Some(old) = self.trail.pop_front() {
                    frame.decayed.push(old);
                }
            }
            self.trail.push_back(cell);
            frame.explored.push(cell);
        }

        if let Some(&last) = frame.explored.last() {
            frame.vein = self.result.trace(last)?;
        }

        self.pos = end;
        self.frame += 1;
        log::trace!(
            "playback frame {}: {} explored, {} decayed",
            frame.index,
            frame.explored.len(),
            frame.decayed.len()
        );
        Ok(frame)
    }
}

impl Iterator for Playback {
    type Item = Result<Frame, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }
        Some(self.step())
    }
}
