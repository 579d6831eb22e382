pub mod load;
pub mod paths;
pub mod types;
