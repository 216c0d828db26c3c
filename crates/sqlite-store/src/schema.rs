//! Table layouts and SQL generation for each entity kind.

use record_core::{Entity, Order, Product, User};
use rusqlite::types::Value;
use rusqlite::Row;
use std::fmt;

/// SQLite column affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqliteType {
    Integer,
    Real,
    Text,
}

impl SqliteType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqliteType::Integer => "INTEGER",
            SqliteType::Real => "REAL",
            SqliteType::Text => "TEXT",
        }
    }
}

/// A single column definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqliteType,
    pub primary_key: bool,
}

impl Column {
    /// An `INTEGER PRIMARY KEY` column.
    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            sql_type: SqliteType::Integer,
            primary_key: true,
        }
    }

    pub const fn new(name: &'static str, sql_type: SqliteType) -> Self {
        Self {
            name,
            sql_type,
            primary_key: false,
        }
    }
}

/// An entity that maps onto one SQLite table.
pub trait SqliteEntity: Entity + fmt::Debug {
    /// Table columns, in insert order.
    const COLUMNS: &'static [Column];

    /// Values to bind, in the same order as [`Self::COLUMNS`].
    fn to_values(&self) -> Vec<Value>;

    /// Decode a row selected with [`Self::COLUMNS`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl SqliteEntity for User {
    const COLUMNS: &'static [Column] = &[
        Column::primary_key("id"),
        Column::new("name", SqliteType::Text),
        Column::new("email", SqliteType::Text),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Text(self.name.clone()),
            Value::Text(self.email.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
        })
    }
}

impl SqliteEntity for Product {
    const COLUMNS: &'static [Column] = &[
        Column::primary_key("id"),
        Column::new("name", SqliteType::Text),
        Column::new("price", SqliteType::Real),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Text(self.name.clone()),
            Value::Real(self.price),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            // SQLite stores NaN as NULL
            price: row.get::<_, Option<f64>>(2)?.unwrap_or(f64::NAN),
        })
    }
}

impl SqliteEntity for Order {
    const COLUMNS: &'static [Column] = &[
        Column::primary_key("id"),
        Column::new("user_id", SqliteType::Integer),
        Column::new("product_id", SqliteType::Integer),
        Column::new("quantity", SqliteType::Integer),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Integer(self.user_id),
            Value::Integer(self.product_id),
            Value::Integer(self.quantity),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            product_id: row.get(2)?,
            quantity: row.get(3)?,
        })
    }
}

fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generate CREATE TABLE statement.
pub fn generate_create_table(table_name: &str, columns: &[Column]) -> String {
    let definitions: Vec<String> = columns
        .iter()
        .map(|c| {
            if c.primary_key {
                format!("{} {} PRIMARY KEY", c.name, c.sql_type.as_sql())
            } else {
                format!("{} {}", c.name, c.sql_type.as_sql())
            }
        })
        .collect();

    format!("CREATE TABLE {table_name} ({})", definitions.join(", "))
}

/// Generate DROP TABLE statement.
pub fn generate_drop_table(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {table_name}")
}

/// Generate a single-row INSERT statement with numbered placeholders.
pub fn generate_insert(table_name: &str, columns: &[Column]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {table_name} ({}) VALUES ({})",
        column_list(columns),
        placeholders.join(", ")
    )
}

/// Generate a SELECT of every row, ordered by primary key.
pub fn generate_select_all(table_name: &str, columns: &[Column]) -> String {
    let key = columns
        .iter()
        .find(|c| c.primary_key)
        .map_or("rowid", |c| c.name);
    format!(
        "SELECT {} FROM {table_name} ORDER BY {key}",
        column_list(columns)
    )
}
