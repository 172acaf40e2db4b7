pub mod headache;
pub mod mood;
pub mod nutrition;
pub mod sleep;
pub mod stats;
pub mod water;
