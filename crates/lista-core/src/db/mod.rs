//! Database layer for lista

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{
    CategoryRepository, ItemRepository, ListRepository, SqliteCategoryRepository,
    SqliteItemRepository, SqliteListRepository,
};
