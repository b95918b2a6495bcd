pub mod duration;
pub mod task;

pub use duration::format_duration;
pub use task::Task;
