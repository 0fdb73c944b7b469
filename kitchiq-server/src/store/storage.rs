//! redb-based storage layer — the persistence collaborator
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `users` | `user_id` | `User` | Accounts (email unique) |
//! | `restaurants` | `restaurant_id` | `Restaurant` | Tenants |
//! | `menu_items` | `item_id` | `MenuItem` | Per-restaurant menu |
//! | `orders` | `order_id` | `Order` | Per-restaurant orders |
//! | `inventory_items` | `item_id` | `InventoryItem` | Per-restaurant stock |
//!
//! Values are JSON-serialized. Scoped reads and writes take the tenant id
//! resolved by the scope guard and refuse to see records from any other
//! restaurant; a cross-tenant key probe is indistinguishable from a miss.
//!
//! # Consistency
//!
//! redb commits are atomic per write transaction; concurrent staff updates
//! to the same order resolve last-write-wins, which this engine accepts.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use shared::models::{InventoryItem, MenuItem, Order, Restaurant, User};
use shared::{AppError, TenantId};

use crate::orders::OrderFilter;

type JsonTable = TableDefinition<'static, &'static str, &'static [u8]>;

const USERS_TABLE: JsonTable = TableDefinition::new("users");
const RESTAURANTS_TABLE: JsonTable = TableDefinition::new("restaurants");
const MENU_ITEMS_TABLE: JsonTable = TableDefinition::new("menu_items");
const ORDERS_TABLE: JsonTable = TableDefinition::new("orders");
const INVENTORY_TABLE: JsonTable = TableDefinition::new("inventory_items");

const ALL_TABLES: [JsonTable; 5] = [
    USERS_TABLE,
    RESTAURANTS_TABLE,
    MENU_ITEMS_TABLE,
    ORDERS_TABLE,
    INVENTORY_TABLE,
];

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate: {0}")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(msg) => {
                AppError::with_message(shared::ErrorCode::AlreadyExists, msg)
            }
            other => AppError::database(other.to_string()),
        }
    }
}

/// Embedded store backed by redb
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    /// Open or create the database at the given path
    ///
    /// redb commits are persistent as soon as `commit()` returns and the
    /// file is always left in a consistent state, which matters on small
    /// restaurant boxes that get power-cycled without warning.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for tests and ephemeral tooling)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn init_tables(db: &Database) -> StoreResult<()> {
        let write_txn = db.begin_write()?;
        {
            for table in ALL_TABLES {
                let _ = write_txn.open_table(table)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Generic JSON record operations ==========

    fn put_json<T: Serialize>(&self, table: JsonTable, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(table)?;
            table.insert(key, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, table: JsonTable, key: &str) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;
        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn scan_json<T: DeserializeOwned>(&self, table: JsonTable) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;

        let mut records = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    /// Remove a record if the stored value passes the scope check.
    ///
    /// Returns false for both a missing key and a cross-tenant record, so
    /// callers cannot distinguish the two.
    fn remove_scoped<T: DeserializeOwned>(
        &self,
        table: JsonTable,
        key: &str,
        in_scope: impl Fn(&T) -> bool,
    ) -> StoreResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(table)?;
            let matches = match table.get(key)? {
                Some(value) => {
                    let record: T = serde_json::from_slice(value.value())?;
                    in_scope(&record)
                }
                None => false,
            };
            if matches {
                table.remove(key)?;
            }
            matches
        };
        txn.commit()?;
        Ok(removed)
    }

    // ========== Users ==========

    /// Insert a new user; fails on a duplicate email
    pub fn create_user(&self, user: &User) -> StoreResult<()> {
        let bytes = serde_json::to_vec(user)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(USERS_TABLE)?;

            for result in table.iter()? {
                let (_key, value) = result?;
                let existing: User = serde_json::from_slice(value.value())?;
                if existing.email == user.email {
                    return Err(StoreError::Duplicate(format!(
                        "Email {} already in use",
                        user.email
                    )));
                }
            }

            table.insert(user.id.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.get_json(USERS_TABLE, id)
    }

    pub fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users: Vec<User> = self.scan_json(USERS_TABLE)?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Overwrite an existing user (role/restaurant mutation)
    pub fn put_user(&self, user: &User) -> StoreResult<()> {
        self.put_json(USERS_TABLE, &user.id, user)
    }

    pub fn list_users(&self) -> StoreResult<Vec<User>> {
        self.scan_json(USERS_TABLE)
    }

    // ========== Restaurants ==========

    pub fn put_restaurant(&self, restaurant: &Restaurant) -> StoreResult<()> {
        self.put_json(RESTAURANTS_TABLE, &restaurant.id, restaurant)
    }

    pub fn restaurant_by_id(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        self.get_json(RESTAURANTS_TABLE, id)
    }

    // ========== Menu items ==========

    pub fn put_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        self.put_json(MENU_ITEMS_TABLE, &item.id, item)
    }

    pub fn menu_item_scoped(&self, id: &str, tenant: &TenantId) -> StoreResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.get_json(MENU_ITEMS_TABLE, id)?;
        Ok(item.filter(|i| &i.restaurant_id == tenant))
    }

    pub fn list_menu_items(&self, tenant: &TenantId) -> StoreResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self.scan_json(MENU_ITEMS_TABLE)?;
        Ok(items
            .into_iter()
            .filter(|i| &i.restaurant_id == tenant)
            .collect())
    }

    pub fn delete_menu_item(&self, id: &str, tenant: &TenantId) -> StoreResult<bool> {
        self.remove_scoped(MENU_ITEMS_TABLE, id, |item: &MenuItem| {
            &item.restaurant_id == tenant
        })
    }

    // ========== Orders ==========

    pub fn put_order(&self, order: &Order) -> StoreResult<()> {
        self.put_json(ORDERS_TABLE, &order.id, order)
    }

    /// Orders in one restaurant, filtered by the caller's visibility
    /// predicate. No ordering guarantee.
    pub fn list_orders(&self, tenant: &TenantId, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        let orders: Vec<Order> = self.scan_json(ORDERS_TABLE)?;
        Ok(orders
            .into_iter()
            .filter(|o| &o.restaurant_id == tenant && filter.matches(o))
            .collect())
    }

    /// An order by id, only if it belongs to the given restaurant
    pub fn order_scoped(&self, id: &str, tenant: &TenantId) -> StoreResult<Option<Order>> {
        let order: Option<Order> = self.get_json(ORDERS_TABLE, id)?;
        Ok(order.filter(|o| &o.restaurant_id == tenant))
    }

    pub fn delete_order(&self, id: &str, tenant: &TenantId) -> StoreResult<bool> {
        self.remove_scoped(ORDERS_TABLE, id, |order: &Order| {
            &order.restaurant_id == tenant
        })
    }

    // ========== Inventory ==========

    pub fn put_inventory_item(&self, item: &InventoryItem) -> StoreResult<()> {
        self.put_json(INVENTORY_TABLE, &item.id, item)
    }

    pub fn inventory_item_scoped(
        &self,
        id: &str,
        tenant: &TenantId,
    ) -> StoreResult<Option<InventoryItem>> {
        let item: Option<InventoryItem> = self.get_json(INVENTORY_TABLE, id)?;
        Ok(item.filter(|i| &i.restaurant_id == tenant))
    }

    pub fn list_inventory(&self, tenant: &TenantId) -> StoreResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self.scan_json(INVENTORY_TABLE)?;
        Ok(items
            .into_iter()
            .filter(|i| &i.restaurant_id == tenant)
            .collect())
    }

    /// Every inventory item across all restaurants (scheduled scan only)
    pub fn list_inventory_all(&self) -> StoreResult<Vec<InventoryItem>> {
        self.scan_json(INVENTORY_TABLE)
    }

    pub fn delete_inventory_item(&self, id: &str, tenant: &TenantId) -> StoreResult<bool> {
        self.remove_scoped(INVENTORY_TABLE, id, |item: &InventoryItem| {
            &item.restaurant_id == tenant
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderLine, OrderStatus, OrderType, Role};
    use shared::util::now_millis;

    fn test_user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            name: "Test".to_string(),
            password_hash: "$argon2id$test".to_string(),
            role: Role::Customer,
            restaurant_id: None,
            created_at: now_millis(),
        }
    }

    fn test_order(id: &str, restaurant: &str, table: Option<&str>) -> Order {
        Order {
            id: id.to_string(),
            restaurant_id: TenantId::from(restaurant),
            items: vec![OrderLine {
                menu_item: "M1".into(),
                quantity: 1,
            }],
            order_type: OrderType::DineIn,
            status: OrderStatus::Pending,
            customer_id: None,
            customer_email: None,
            customer_name: Some("Guest".into()),
            table_number: table.map(String::from),
            delivery_address: None,
            total: None,
            created_at: now_millis(),
        }
    }

    fn test_inventory(id: &str, restaurant: &str, quantity: u32) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: "Milk".to_string(),
            quantity,
            unit: Some("l".to_string()),
            expiry_date: now_millis(),
            restaurant_id: TenantId::from(restaurant),
            created_at: now_millis(),
        }
    }

    #[test]
    fn test_user_email_uniqueness() {
        let store = Store::open_in_memory().unwrap();
        store.create_user(&test_user("u1", "a@b.c")).unwrap();

        let err = store.create_user(&test_user("u2", "a@b.c")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        store.create_user(&test_user("u3", "c@b.c")).unwrap();
        assert_eq!(store.list_users().unwrap().len(), 2);
    }

    #[test]
    fn test_user_lookup_by_email() {
        let store = Store::open_in_memory().unwrap();
        store.create_user(&test_user("u1", "a@b.c")).unwrap();

        let found = store.user_by_email("a@b.c").unwrap().unwrap();
        assert_eq!(found.id, "u1");
        assert!(store.user_by_email("missing@b.c").unwrap().is_none());
    }

    #[test]
    fn test_order_tenant_isolation() {
        let store = Store::open_in_memory().unwrap();
        store.put_order(&test_order("o1", "R1", Some("5"))).unwrap();
        store.put_order(&test_order("o2", "R2", Some("5"))).unwrap();

        let r1 = TenantId::from("R1");
        let r2 = TenantId::from("R2");

        let orders = store.list_orders(&r1, &OrderFilter::All).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "o1");

        // A foreign order id reads as absent in the wrong scope
        assert!(store.order_scoped("o2", &r1).unwrap().is_none());
        assert!(store.order_scoped("o2", &r2).unwrap().is_some());
    }

    #[test]
    fn test_order_table_filter() {
        let store = Store::open_in_memory().unwrap();
        store.put_order(&test_order("o1", "R1", Some("5"))).unwrap();
        store.put_order(&test_order("o2", "R1", Some("7"))).unwrap();

        let r1 = TenantId::from("R1");
        let orders = store
            .list_orders(&r1, &OrderFilter::Table("5".into()))
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "o1");
    }

    #[test]
    fn test_scoped_delete_conflates_missing_and_foreign() {
        let store = Store::open_in_memory().unwrap();
        store.put_order(&test_order("o1", "R1", None)).unwrap();

        let r2 = TenantId::from("R2");
        // Foreign-tenant delete looks exactly like a miss
        assert!(!store.delete_order("o1", &r2).unwrap());
        assert!(!store.delete_order("missing", &r2).unwrap());

        // The order survived the foreign attempt
        let r1 = TenantId::from("R1");
        assert!(store.order_scoped("o1", &r1).unwrap().is_some());
        assert!(store.delete_order("o1", &r1).unwrap());
        assert!(store.order_scoped("o1", &r1).unwrap().is_none());
    }

    #[test]
    fn test_menu_item_scoping() {
        let store = Store::open_in_memory().unwrap();
        let item = MenuItem {
            id: "m1".into(),
            name: "Ramen".into(),
            price: rust_decimal::Decimal::new(1250, 2),
            available: true,
            description: None,
            image: None,
            restaurant_id: TenantId::from("R1"),
            created_at: now_millis(),
        };
        store.put_menu_item(&item).unwrap();

        assert!(
            store
                .menu_item_scoped("m1", &TenantId::from("R1"))
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .menu_item_scoped("m1", &TenantId::from("R2"))
                .unwrap()
                .is_none()
        );
        assert_eq!(store.list_menu_items(&TenantId::from("R2")).unwrap().len(), 0);
    }

    #[test]
    fn test_inventory_global_vs_scoped_listing() {
        let store = Store::open_in_memory().unwrap();
        store.put_inventory_item(&test_inventory("i1", "R1", 5)).unwrap();
        store.put_inventory_item(&test_inventory("i2", "R2", 3)).unwrap();

        assert_eq!(store.list_inventory_all().unwrap().len(), 2);
        assert_eq!(store.list_inventory(&TenantId::from("R1")).unwrap().len(), 1);
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kitchiq.redb");

        {
            let store = Store::open(&path).unwrap();
            store.put_order(&test_order("o1", "R1", None)).unwrap();
        }

        // Reopen and read back
        let store = Store::open(&path).unwrap();
        assert!(
            store
                .order_scoped("o1", &TenantId::from("R1"))
                .unwrap()
                .is_some()
        );
    }
}
