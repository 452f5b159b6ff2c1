pub mod sentiment;
pub mod stress;
pub mod suggestions;
pub mod trends;
