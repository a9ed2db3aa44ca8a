pub mod color;
pub mod context;
pub mod defaults;
pub mod evaluator;
pub mod extractor;
pub mod fluid;
pub mod output;
pub mod primitives;
pub mod resolver;
pub mod tokens;
pub mod units;

#[cfg(test)]
mod tests_resolution;

#[cfg(test)]
mod tests_extraction;

#[cfg(test)]
mod tests_edge_cases;

pub use color::{to_oklch, ColorError, ColorResult, Oklch, Rgba};
pub use context::{CompileContext, CompileOptions, ThemeMode};
pub use evaluator::{EvalError, EvalResult, Evaluator, RunSummary, ThemeModel};
pub use fluid::{fluid, fluid_between, FluidPoint, FluidWindow};
pub use primitives::{Origin, Primitive, PrimitiveSet};
pub use tokens::{Token, TokenOrigin, TokenSet};
pub use units::{compare_property_names, format_decimal, px_to_rem};
