pub mod records;
pub mod tabular;
