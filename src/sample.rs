//! Built-in sample datasets.
//!
//! The datasets deliberately include records that exercise the edges of
//! validation: a user without a name, a product re-using a name and price, a
//! negative price, zero and negative quantities, and an order referencing a
//! product that does not exist.

use crate::coordinator::Datasets;
use record_core::Record;

fn user(id: i64, name: Option<&str>, email: &str) -> Record {
    Record::builder()
        .field("id", id)
        .field("name", name)
        .field("email", email)
        .build()
}

fn product(id: i64, name: &str, price: f64) -> Record {
    Record::builder()
        .field("id", id)
        .field("name", name)
        .field("price", price)
        .build()
}

fn order(id: i64, user_id: i64, product_id: i64, quantity: i64) -> Record {
    Record::builder()
        .field("id", id)
        .field("user_id", user_id)
        .field("product_id", product_id)
        .field("quantity", quantity)
        .build()
}

/// Sample users. The last one has no name and is rejected.
pub fn users() -> Vec<Record> {
    vec![
        user(1, Some("Alice"), "alice@example.com"),
        user(2, Some("Bob"), "bob@example.com"),
        user(3, Some("Charlie"), "charlie@example.com"),
        user(4, Some("David"), "david@example.com"),
        user(5, Some("Eve"), "eve@example.com"),
        user(6, Some("Frank"), "frank@example.com"),
        user(7, Some("Grace"), "grace@example.com"),
        user(8, Some("Alice"), "alice@example.com"),
        user(9, Some("Henry"), "henry@example.com"),
        user(10, None, "jane@example.com"),
    ]
}

/// Sample products.
pub fn products() -> Vec<Record> {
    vec![
        product(1, "Laptop", 1000.00),
        product(2, "Smartphone", 700.00),
        product(3, "Headphones", 150.00),
        product(4, "Monitor", 300.00),
        product(5, "Keyboard", 50.00),
        product(6, "Mouse", 30.00),
        product(7, "Laptop", 1000.00),
        product(8, "Smartwatch", 250.00),
        product(9, "Gaming Chair", 500.00),
        product(10, "Earbuds", -50.00),
    ]
}

/// Sample orders.
pub fn orders() -> Vec<Record> {
    vec![
        order(1, 1, 1, 2),
        order(2, 2, 2, 1),
        order(3, 3, 3, 5),
        order(4, 4, 4, 1),
        order(5, 5, 5, 3),
        order(6, 6, 6, 4),
        order(7, 7, 7, 2),
        order(8, 8, 8, 0),
        order(9, 9, 1, -1),
        order(10, 10, 11, 2),
    ]
}

/// All three sample datasets.
pub fn datasets() -> Datasets {
    Datasets {
        users: users(),
        products: products(),
        orders: orders(),
    }
}
