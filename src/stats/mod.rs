pub mod aggregate;
pub mod exec;
pub mod grid;
pub mod output;
pub mod window;

pub use aggregate::{load_authors, Aggregation, CommitAggregator};
pub use exec::exec;
pub use grid::build_grid;
pub use output::{cell_text, day_label, format_cell, Renderer};
pub use window::Window;
