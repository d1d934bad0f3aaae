//! Real-world scenario benchmarks.

mod catch_up;
mod render;

pub use catch_up::bench_catch_up;
pub use render::bench_render;
