// Text handling: everything that happens to a sentence before it becomes a vector.

pub mod normalize;
pub mod preprocess;
pub mod segment;
