//! A store owning one table in its own SQLite database.

use crate::error::StoreError;
use crate::location::{StoreLocation, StoreOptions};
use crate::schema::{
    generate_create_table, generate_drop_table, generate_insert, generate_select_all,
    SqliteEntity,
};
use record_core::{EntityKind, Record, ValidationError};
use rusqlite::{params_from_iter, Connection};
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

/// Result of a single [`EntityStore::insert`] call.
#[derive(Debug)]
pub enum InsertOutcome {
    /// The record was written.
    Inserted,
    /// The record was rejected before reaching storage.
    ValidationFailed(ValidationError),
    /// Storage refused a valid record, e.g. because its id already exists.
    InsertFailed(StoreError),
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }

    pub fn is_validation_failed(&self) -> bool {
        matches!(self, InsertOutcome::ValidationFailed(_))
    }

    pub fn is_insert_failed(&self) -> bool {
        matches!(self, InsertOutcome::InsertFailed(_))
    }
}

/// Owner of the table for entity kind `E`.
///
/// All writes go through a mutex held by this store, so at most one insert is
/// in flight per store. Stores never share a lock or a connection.
pub struct EntityStore<E> {
    location: StoreLocation,
    connection: Mutex<Connection>,
    insert_sql: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: SqliteEntity> EntityStore<E> {
    /// Open the database at `location` and recreate the table empty.
    ///
    /// Fails if the database cannot be opened or the table cannot be
    /// recreated. No store is returned in that case.
    pub fn open(location: StoreLocation, options: &StoreOptions) -> Result<Self, StoreError> {
        let connection = open_connection(&location, options)?;
        let store = Self {
            location,
            connection: Mutex::new(connection),
            insert_sql: generate_insert(E::KIND.table_name(), E::COLUMNS),
            _entity: PhantomData,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Drop and recreate the table.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let table = E::KIND.table_name();
        let sql = format!(
            "BEGIN; {}; {}; COMMIT;",
            generate_drop_table(table),
            generate_create_table(table, E::COLUMNS)
        );

        let connection = self.lock()?;
        debug!("DDL: {}", sql);
        connection
            .execute_batch(&sql)
            .map_err(|source| StoreError::Initialize { table, source })?;

        info!("Created table '{}' at {}", table, self.location);
        Ok(())
    }

    /// Validate `record` and, if it is valid, write it.
    ///
    /// Per-record failures are reported through the returned outcome and the
    /// log; they never poison the store for later inserts.
    pub fn insert(&self, record: &Record) -> InsertOutcome {
        let entity = match E::from_record(record) {
            Ok(entity) => entity,
            Err(e) => {
                warn!("{}", e);
                return InsertOutcome::ValidationFailed(e);
            }
        };

        match self.write(&entity) {
            Ok(()) => {
                info!("Inserted {}: {:?}", E::KIND, entity);
                InsertOutcome::Inserted
            }
            Err(e) => {
                error!("Error inserting {} {}: {}", E::KIND, entity.id(), e);
                InsertOutcome::InsertFailed(e)
            }
        }
    }

    fn write(&self, entity: &E) -> Result<(), StoreError> {
        let connection = self.lock()?;
        connection.execute(&self.insert_sql, params_from_iter(entity.to_values()))?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::LockPoisoned(E::KIND.table_name()))
    }

    /// Entity kind stored here.
    pub fn kind(&self) -> EntityKind {
        E::KIND
    }

    /// Where the table lives.
    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::KIND.table_name());
        let connection = self.lock()?;
        let count: i64 = connection.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Whether a row with `id` exists.
    pub fn contains(&self, id: i64) -> Result<bool, StoreError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)",
            E::KIND.table_name()
        );
        let connection = self.lock()?;
        let exists: bool = connection.query_row(&sql, [id], |row| row.get(0))?;
        Ok(exists)
    }

    /// Every row in the table, ordered by id.
    pub fn load_all(&self) -> Result<Vec<E>, StoreError> {
        let sql = generate_select_all(E::KIND.table_name(), E::COLUMNS);
        let connection = self.lock()?;
        let mut statement = connection.prepare(&sql)?;
        let rows = statement
            .query_map([], E::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn open_connection(
    location: &StoreLocation,
    options: &StoreOptions,
) -> Result<Connection, StoreError> {
    let opened = match location {
        StoreLocation::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open(path)
        }
        StoreLocation::Memory => Connection::open_in_memory(),
    };

    let connection = opened.map_err(|source| StoreError::Open {
        location: location.clone(),
        source,
    })?;
    connection
        .busy_timeout(options.busy_timeout)
        .map_err(|source| StoreError::Open {
            location: location.clone(),
            source,
        })?;

    Ok(connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_core::{Order, Product, User, Violation};
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn record(value: serde_json::Value) -> Record {
        Record::try_from(value).unwrap()
    }

    fn memory_store<E: SqliteEntity>() -> EntityStore<E> {
        EntityStore::open(StoreLocation::Memory, &StoreOptions::default()).unwrap()
    }

    #[test]
    fn test_insert_valid_user() {
        let store = memory_store::<User>();

        let outcome = store.insert(&record(
            json!({"id": 1, "name": "Alice", "email": "alice@example.com"}),
        ));

        assert!(outcome.is_inserted());
        assert_eq!(store.row_count().unwrap(), 1);
        assert!(store.contains(1).unwrap());
        assert_eq!(
            store.load_all().unwrap(),
            vec![User {
                id: 1,
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejected_record_never_reaches_storage() {
        let store = memory_store::<User>();

        let outcome = store.insert(&record(
            json!({"id": 10, "name": null, "email": "jane@example.com"}),
        ));

        match outcome {
            InsertOutcome::ValidationFailed(e) => assert_eq!(e.field, "name"),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(store.row_count().unwrap(), 0);
        assert!(!store.contains(10).unwrap());
    }

    fn expect_rejection(outcome: InsertOutcome) -> ValidationError {
        match outcome {
            InsertOutcome::ValidationFailed(e) => e,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_rejected_product_and_orders_leave_tables_unchanged() {
        let products = memory_store::<Product>();
        let err = expect_rejection(
            products.insert(&record(json!({"id": 3, "name": "Phone", "price": "700"}))),
        );
        assert_eq!(err.field, "price");
        assert_eq!(
            err.violation,
            Violation::WrongType {
                expected: "number",
                found: "string"
            }
        );
        assert_eq!(products.row_count().unwrap(), 0);

        let orders = memory_store::<Order>();
        assert!(orders
            .insert(&record(json!({"id": 1, "user_id": 1, "product_id": 1, "quantity": 1})))
            .is_inserted());

        let err = expect_rejection(orders.insert(&record(
            json!({"id": 2, "user_id": 1, "product_id": 1, "quantity": 2.0}),
        )));
        assert_eq!(err.field, "quantity");

        let err = expect_rejection(orders.insert(&record(
            json!({"id": "3", "user_id": 1, "product_id": 1, "quantity": 2}),
        )));
        assert_eq!(err.field, "id");
        assert_eq!(
            err.violation,
            Violation::WrongType {
                expected: "integer",
                found: "string"
            }
        );
        assert_eq!(err.to_string(), "Invalid id for order ID 3 (expected integer, found string)");

        assert_eq!(orders.row_count().unwrap(), 1);
    }

    #[test]
    fn test_nan_price_reads_back() {
        let store = memory_store::<Product>();
        let odd = Record::builder()
            .field("id", 1i64)
            .field("name", "Gadget")
            .field("price", f64::NAN)
            .build();

        assert!(store.insert(&odd).is_inserted());
        assert!(store
            .insert(&record(json!({"id": 2, "name": "Mouse", "price": 30.0})))
            .is_inserted());

        let rows = store.load_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].price.is_nan());
        assert_eq!(rows[1].price, 30.0);
    }

    #[test]
    fn test_duplicate_id_fails_at_storage() {
        let store = memory_store::<Product>();
        let laptop = record(json!({"id": 7, "name": "Laptop", "price": 1000.00}));

        assert!(store.insert(&laptop).is_inserted());

        match store.insert(&laptop) {
            InsertOutcome::InsertFailed(e) => assert!(e.is_constraint_violation()),
            other => panic!("expected insert failure, got {other:?}"),
        }
        assert_eq!(store.row_count().unwrap(), 1);

        // The store keeps accepting writes after a failure
        let mouse = record(json!({"id": 6, "name": "Mouse", "price": 30}));
        assert!(store.insert(&mouse).is_inserted());
        assert_eq!(store.row_count().unwrap(), 2);
    }

    #[test]
    fn test_negative_quantity_is_inserted() {
        let store = memory_store::<Order>();

        let outcome = store.insert(&record(
            json!({"id": 9, "user_id": 9, "product_id": 1, "quantity": -1}),
        ));

        assert!(outcome.is_inserted());
        assert_eq!(store.load_all().unwrap()[0].quantity, -1);
    }

    #[test]
    fn test_open_recreates_table_empty() {
        let temp_dir = TempDir::new().unwrap();
        let location = StoreLocation::in_dir(temp_dir.path(), EntityKind::User);

        let store = EntityStore::<User>::open(location.clone(), &StoreOptions::default()).unwrap();
        store.insert(&record(json!({"id": 1, "name": "Alice", "email": "a@example.com"})));
        assert_eq!(store.row_count().unwrap(), 1);
        drop(store);

        let reopened = EntityStore::<User>::open(location, &StoreOptions::default()).unwrap();
        assert_eq!(reopened.row_count().unwrap(), 0);
        assert!(temp_dir.path().join("users.db").exists());
    }

    #[test]
    fn test_open_creates_missing_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let location = StoreLocation::in_dir(&nested, EntityKind::Order);

        let store = EntityStore::<Order>::open(location, &StoreOptions::default()).unwrap();
        assert_eq!(store.kind(), EntityKind::Order);
        assert!(nested.join("orders.db").exists());
    }

    #[test]
    fn test_open_fails_for_unusable_path() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened as a database file
        let location = StoreLocation::File(temp_dir.path().to_path_buf());

        let err = EntityStore::<User>::open(location, &StoreOptions::default())
            .err()
            .unwrap();
        assert!(err.is_startup_error());
    }

    #[test]
    fn test_concurrent_writers_share_one_store() {
        let store = Arc::new(memory_store::<Order>());

        std::thread::scope(|scope| {
            for worker in 0..4i64 {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for i in 0..25i64 {
                        let id = worker * 100 + i;
                        let outcome = store.insert(&record(
                            json!({"id": id, "user_id": 1, "product_id": 1, "quantity": 1}),
                        ));
                        assert!(outcome.is_inserted());
                    }
                });
            }
        });

        assert_eq!(store.row_count().unwrap(), 100);
    }
}
