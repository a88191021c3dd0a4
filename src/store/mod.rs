pub mod group;
pub mod summary;
