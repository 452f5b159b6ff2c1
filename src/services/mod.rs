pub mod claude;
pub mod generation;
pub mod journal;
