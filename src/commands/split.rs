//! Split command implementation.
//!
//! Cuts every line into consecutive fragments of `split_size` bases starting
//! at the original start. Fragments are inclusive on both ends, so
//! `[1,100]` with size 24 becomes `[1,25] [26,50] [51,75] [76,100]`.

use crate::bed::BedError;
use crate::interval::Line;

/// Split command configuration.
#[derive(Debug, Clone, Copy)]
pub struct SplitCommand {
    split_size: i64,
}

impl SplitCommand {
    /// Create a split command. The size must be positive.
    pub fn new(split_size: i64) -> Result<Self, BedError> {
        if split_size <= 0 {
            return Err(BedError::Config(format!(
                "split size must be > 0: {}",
                split_size
            )));
        }
        Ok(Self { split_size })
    }

    /// Split one line into fragments.
    pub fn split_line(&self, line: &Line) -> Vec<Line> {
        let mut parts = Vec::new();
        let mut start = line.start;
        while line.stop.saturating_sub(start) > self.split_size {
            let stop = start + self.split_size;
            parts.push(line.with_bounds(start, stop));
            start = stop + 1;
        }
        parts.push(line.with_bounds(start, line.stop));
        parts
    }

    /// Split every line, keeping line order.
    pub fn split(&self, lines: Vec<Line>) -> Vec<Line> {
        lines.iter().flat_map(|line| self.split_line(line)).collect()
    }
}
