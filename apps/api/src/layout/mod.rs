// Board layout: font metrics, cell text fitting and page geometry.
// Pure and CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod fit;
pub mod font_metrics;
pub mod grid;

// Re-export the public API consumed by the renderer and handlers.
pub use font_metrics::{
    default_page_config, encode_win_ansi, helvetica_bold, FontMetricTable, PageConfig,
};
pub use grid::{layout_board, BoardLayout};
