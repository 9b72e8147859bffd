pub mod fields;
pub mod pagination;
