pub mod collection;
pub mod repository;
pub mod todo;
pub mod validate;
