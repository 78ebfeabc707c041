#![forbid(unsafe_code)]

mod rendering;
mod report;

pub use rendering::{init_tracing, render_evaluation_to_png, render_plot_to_png, RenderConfig};
pub use report::{print_summary, radial_table};
