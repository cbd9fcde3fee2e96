pub mod backtrack;
pub mod passages;
