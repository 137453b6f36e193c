pub mod sparse;
pub mod sqlite_repo;
