//! Pipeline stages for bedfusion.

pub mod dedupe;
pub mod merge;
pub mod pad;
pub mod sort;
pub mod split;

pub use dedupe::{dedupe_seen, dedupe_sorted};
pub use merge::MergeCommand;
pub use pad::{pad_line, FirstBase, PadCommand, PaddingPolicy, PaddingWarning};
pub use sort::{SortCommand, SortType};
pub use split::SplitCommand;
