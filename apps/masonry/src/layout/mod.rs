// Masonry layout: breakpoint bucketing and greedy column balancing.
// Both are pure and synchronous; height resolution happens before they run.

pub mod balancer;
pub mod breakpoints;

pub use balancer::ColumnState;
pub use breakpoints::column_count_for_width;
