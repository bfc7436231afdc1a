pub mod miller_math;
pub mod operations;
