pub mod overlap;
pub mod profile;
pub mod shift;
pub mod similarity;

pub use overlap::{find_overlap, find_overlap_with, OverlapResult};
pub use shift::{compare_frames, compare_frames_with, Motion, ShiftResult};
