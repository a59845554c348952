//! Row-partitioned task execution and a dedicated render thread.

pub mod render_pool;
pub mod row_pool;

pub use render_pool::RenderPool;
pub use row_pool::{run_rows, RowWorkerPool};
