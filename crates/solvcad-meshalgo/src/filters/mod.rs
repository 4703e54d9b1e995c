use crate::*;

mod normal_filters;
mod optimizing;
mod structuring;

pub use normal_filters::NormalFilters;
pub use optimizing::OptimizingFilter;
pub use structuring::StructuringFilter;
