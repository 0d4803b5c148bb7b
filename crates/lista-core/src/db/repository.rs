//! Repository implementations for lists, categories, and items

use crate::conflict::CategoryStore;
use crate::error::{Error, Result};
use crate::models::{Category, CategoryId, GroceryItem, GroceryList, ItemId, ListId};
use rusqlite::{params, Connection};

/// Trait for grocery list storage operations
pub trait ListRepository {
    /// Persist a new list
    fn create(&self, list: &GroceryList) -> Result<GroceryList>;

    /// Get a list by ID
    fn get(&self, id: &ListId) -> Result<Option<GroceryList>>;

    /// All lists, newest first
    fn list(&self) -> Result<Vec<GroceryList>>;
}

/// Trait for category storage operations
pub trait CategoryRepository {
    /// Persist a new category
    fn create(&self, category: &Category) -> Result<Category>;

    /// Get a category by ID
    fn get(&self, id: &CategoryId) -> Result<Option<Category>>;

    /// All categories of a list, in creation order
    fn list(&self, list_id: &ListId) -> Result<Vec<Category>>;

    /// Find a category by case-insensitive name within a list
    fn find_by_name(&self, list_id: &ListId, name: &str) -> Result<Option<Category>>;

    /// Persist new field values for an existing category
    fn update(&self, category: &Category) -> Result<Category>;

    /// Delete a category
    fn delete(&self, id: &CategoryId) -> Result<()>;
}

/// Trait for grocery item storage operations
pub trait ItemRepository {
    /// Persist a new item
    fn create(&self, item: &GroceryItem) -> Result<GroceryItem>;

    /// Get an item by ID
    fn get(&self, id: &ItemId) -> Result<Option<GroceryItem>>;

    /// All items of a list, most recently updated first
    fn list(&self, list_id: &ListId) -> Result<Vec<GroceryItem>>;

    /// Persist new field values for an existing item
    fn update(&self, item: &GroceryItem) -> Result<GroceryItem>;
}

/// `SQLite` implementation of `ListRepository`
pub struct SqliteListRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteListRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a list from a database row
    fn parse_list(row: &rusqlite::Row<'_>) -> rusqlite::Result<GroceryList> {
        let id: String = row.get(0)?;
        Ok(GroceryList {
            id: id.parse().unwrap_or_default(),
            name: row.get(1)?,
            created_at: row.get(2)?,
        })
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn create(&self, list: &GroceryList) -> Result<GroceryList> {
        self.conn.execute(
            "INSERT INTO lists (id, name, created_at) VALUES (?, ?, ?)",
            params![list.id.as_str(), list.name, list.created_at],
        )?;
        Ok(list.clone())
    }

    fn get(&self, id: &ListId) -> Result<Option<GroceryList>> {
        let result = self.conn.query_row(
            "SELECT id, name, created_at FROM lists WHERE id = ?",
            params![id.as_str()],
            Self::parse_list,
        );

        match result {
            Ok(list) => Ok(Some(list)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<GroceryList>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM lists ORDER BY created_at DESC")?;

        let lists = stmt
            .query_map([], Self::parse_list)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(lists)
    }
}

/// `SQLite` implementation of `CategoryRepository`
pub struct SqliteCategoryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteCategoryRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a category from a database row
    fn parse_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
        let id: String = row.get(0)?;
        let list_id: String = row.get(1)?;
        Ok(Category {
            id: id.parse().unwrap_or_default(),
            list_id: list_id.parse().unwrap_or_default(),
            name: row.get(2)?,
            color: row.get(3)?,
            icon: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create(&self, category: &Category) -> Result<Category> {
        self.conn.execute(
            "INSERT INTO categories (id, list_id, name, color, icon, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                category.id.as_str(),
                category.list_id.as_str(),
                category.name,
                category.color,
                category.icon,
                category.created_at
            ],
        )?;

        Ok(category.clone())
    }

    fn get(&self, id: &CategoryId) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, list_id, name, color, icon, created_at FROM categories WHERE id = ?",
            params![id.as_str()],
            Self::parse_category,
        );

        match result {
            Ok(category) => Ok(Some(category)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, list_id: &ListId) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, list_id, name, color, icon, created_at
             FROM categories
             WHERE list_id = ?
             ORDER BY created_at ASC",
        )?;

        let categories = stmt
            .query_map(params![list_id.as_str()], Self::parse_category)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(categories)
    }

    fn find_by_name(&self, list_id: &ListId, name: &str) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, list_id, name, color, icon, created_at
             FROM categories
             WHERE list_id = ? AND name = ? COLLATE NOCASE",
            params![list_id.as_str(), name.trim()],
            Self::parse_category,
        );

        match result {
            Ok(category) => Ok(Some(category)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, category: &Category) -> Result<Category> {
        let rows = self.conn.execute(
            "UPDATE categories SET name = ?, color = ?, icon = ? WHERE id = ?",
            params![
                category.name,
                category.color,
                category.icon,
                category.id.as_str()
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(category.id.to_string()));
        }

        Ok(category.clone())
    }

    fn delete(&self, id: &CategoryId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?", params![id.as_str()])?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}

impl CategoryStore for SqliteCategoryRepository<'_> {
    fn create(&self, category: &Category) -> Result<Category> {
        CategoryRepository::create(self, category)
    }

    fn update(&self, category: &Category) -> Result<Category> {
        CategoryRepository::update(self, category)
    }
}

/// `SQLite` implementation of `ItemRepository`
pub struct SqliteItemRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteItemRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse an item from a database row
    fn parse_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<GroceryItem> {
        let id: String = row.get(0)?;
        let list_id: String = row.get(1)?;
        Ok(GroceryItem {
            id: id.parse().unwrap_or_default(),
            list_id: list_id.parse().unwrap_or_default(),
            user_id: row.get(2)?,
            name: row.get(3)?,
            quantity: row.get(4)?,
            category: row.get(5)?,
            notes: row.get(6)?,
            gotten: row.get::<_, i32>(7)? != 0,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create(&self, item: &GroceryItem) -> Result<GroceryItem> {
        self.conn.execute(
            "INSERT INTO items (id, list_id, user_id, name, quantity, category, notes, gotten, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                item.id.as_str(),
                item.list_id.as_str(),
                item.user_id,
                item.name,
                item.quantity,
                item.category,
                item.notes,
                i32::from(item.gotten),
                item.created_at,
                item.updated_at
            ],
        )?;

        Ok(item.clone())
    }

    fn get(&self, id: &ItemId) -> Result<Option<GroceryItem>> {
        let result = self.conn.query_row(
            "SELECT id, list_id, user_id, name, quantity, category, notes, gotten, created_at, updated_at
             FROM items WHERE id = ?",
            params![id.as_str()],
            Self::parse_item,
        );

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, list_id: &ListId) -> Result<Vec<GroceryItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, list_id, user_id, name, quantity, category, notes, gotten, created_at, updated_at
             FROM items
             WHERE list_id = ?
             ORDER BY updated_at DESC",
        )?;

        let items = stmt
            .query_map(params![list_id.as_str()], Self::parse_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    fn update(&self, item: &GroceryItem) -> Result<GroceryItem> {
        let rows = self.conn.execute(
            "UPDATE items SET list_id = ?, user_id = ?, name = ?, quantity = ?, category = ?, notes = ?, gotten = ?, updated_at = ?
             WHERE id = ?",
            params![
                item.list_id.as_str(),
                item.user_id,
                item.name,
                item.quantity,
                item.category,
                item.notes,
                i32::from(item.gotten),
                item.updated_at,
                item.id.as_str()
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(item.id.to_string()));
        }

        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup() -> (Database, GroceryList) {
        let db = Database::open_in_memory().unwrap();
        let list = GroceryList::new("Weekly shop");
        SqliteListRepository::new(db.connection())
            .create(&list)
            .unwrap();
        (db, list)
    }

    fn category(list_id: ListId, name: &str) -> Category {
        Category::new(list_id, name, Some("#fff".to_string()), None).unwrap()
    }

    #[test]
    fn test_create_and_get_category() {
        let (db, list) = setup();
        let repo = SqliteCategoryRepository::new(db.connection());

        let created = CategoryRepository::create(&repo, &category(list.id, "Produce")).unwrap();
        let fetched = repo.get(&created.id).unwrap().unwrap();

        assert_eq!(fetched.name, "Produce");
        assert_eq!(fetched.color.as_deref(), Some("#fff"));
        assert_eq!(fetched.list_id, list.id);
    }

    #[test]
    fn test_list_categories_in_creation_order() {
        let (db, list) = setup();
        let repo = SqliteCategoryRepository::new(db.connection());

        let mut first = category(list.id, "Produce");
        first.created_at = 100;
        let mut second = category(list.id, "Dairy");
        second.created_at = 200;
        CategoryRepository::create(&repo, &second).unwrap();
        CategoryRepository::create(&repo, &first).unwrap();

        let categories = repo.list(&list.id).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Produce");
        assert_eq!(categories[1].name, "Dairy");
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let (db, list) = setup();
        let repo = SqliteCategoryRepository::new(db.connection());
        CategoryRepository::create(&repo, &category(list.id, "Produce")).unwrap();

        let found = repo.find_by_name(&list.id, "pRODUCE").unwrap();
        assert!(found.is_some());

        let missing = repo.find_by_name(&list.id, "Dairy").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_duplicate_name_rejected_by_unique_constraint() {
        let (db, list) = setup();
        let repo = SqliteCategoryRepository::new(db.connection());
        CategoryRepository::create(&repo, &category(list.id, "Produce")).unwrap();

        let duplicate = CategoryRepository::create(&repo, &category(list.id, "produce"));
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_update_category() {
        let (db, list) = setup();
        let repo = SqliteCategoryRepository::new(db.connection());
        let mut created = CategoryRepository::create(&repo, &category(list.id, "Produce")).unwrap();

        created.color = Some("#000".to_string());
        CategoryRepository::update(&repo, &created).unwrap();

        let fetched = repo.get(&created.id).unwrap().unwrap();
        assert_eq!(fetched.color.as_deref(), Some("#000"));
    }

    #[test]
    fn test_update_missing_category_is_not_found() {
        let (db, list) = setup();
        let repo = SqliteCategoryRepository::new(db.connection());

        let ghost = category(list.id, "Ghost");
        let error = CategoryRepository::update(&repo, &ghost).unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[test]
    fn test_delete_category() {
        let (db, list) = setup();
        let repo = SqliteCategoryRepository::new(db.connection());
        let created = CategoryRepository::create(&repo, &category(list.id, "Produce")).unwrap();

        repo.delete(&created.id).unwrap();
        assert!(repo.get(&created.id).unwrap().is_none());
    }

    #[test]
    fn test_item_round_trip() {
        let (db, list) = setup();
        let repo = SqliteItemRepository::new(db.connection());

        let item = GroceryItem::new(list.id, "user-1", "Milk")
            .unwrap()
            .with_quantity(2)
            .with_category(Some("Dairy".to_string()))
            .with_notes(Some("2%".to_string()));
        repo.create(&item).unwrap();

        let fetched = repo.get(&item.id).unwrap().unwrap();
        assert_eq!(fetched, item);

        let mut updated = fetched;
        updated.gotten = true;
        updated.updated_at += 1;
        repo.update(&updated).unwrap();

        let listed = repo.list(&list.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].gotten);
    }
}
