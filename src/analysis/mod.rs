mod colocation;
mod interpretation;

pub use colocation::{ColocationResult, estimate};
pub use interpretation::Interpretation;
