//! Concurrent loading of all three entity kinds.

use crate::config::LoaderConfig;
use crate::loader::{load_batch, validate_batch, LoadSummary};
use anyhow::Context;
use record_core::{EntityKind, Order, Product, Record, User};
use serde::Serialize;
use sqlite_store::{EntityStore, SqliteEntity, StoreError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// The batches supplied by the caller, one per entity kind.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub users: Vec<Record>,
    pub products: Vec<Record>,
    pub orders: Vec<Record>,
}

/// Per-kind summaries of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub users: LoadSummary,
    pub products: LoadSummary,
    pub orders: LoadSummary,
}

impl RunReport {
    /// Summaries in load order.
    pub fn summaries(&self) -> [&LoadSummary; 3] {
        [&self.users, &self.products, &self.orders]
    }

    pub fn total_inserted(&self) -> u64 {
        self.summaries().iter().map(|s| s.inserted).sum()
    }

    pub fn total_rejected(&self) -> u64 {
        self.summaries().iter().map(|s| s.rejected).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.summaries().iter().map(|s| s.failed).sum()
    }

    /// Whether every record of every batch was accepted.
    pub fn is_clean(&self) -> bool {
        self.summaries().iter().all(|s| s.is_clean())
    }
}

/// Owns the three stores and runs one loader task per store.
pub struct Coordinator {
    users: Arc<EntityStore<User>>,
    products: Arc<EntityStore<Product>>,
    orders: Arc<EntityStore<Order>>,
}

impl Coordinator {
    /// Open and initialize all three stores.
    ///
    /// The first store that fails to open aborts construction, so no load can
    /// ever start against an uninitialized table.
    pub fn open(config: &LoaderConfig) -> Result<Self, StoreError> {
        Ok(Self {
            users: Arc::new(open_store(config)?),
            products: Arc::new(open_store(config)?),
            orders: Arc::new(open_store(config)?),
        })
    }

    pub fn users(&self) -> &EntityStore<User> {
        &self.users
    }

    pub fn products(&self) -> &EntityStore<Product> {
        &self.products
    }

    pub fn orders(&self) -> &EntityStore<Order> {
        &self.orders
    }

    /// Load the three batches concurrently and wait for all of them.
    ///
    /// Each batch runs on its own blocking thread. Rejected or failed records
    /// only show up in the report; an error is returned only if a loader task
    /// itself died, and only after the other tasks have finished.
    pub async fn run(&self, datasets: Datasets) -> anyhow::Result<RunReport> {
        let Datasets {
            users,
            products,
            orders,
        } = datasets;

        info!("Starting concurrent insertions");
        let users_task = spawn_loader(Arc::clone(&self.users), users);
        let products_task = spawn_loader(Arc::clone(&self.products), products);
        let orders_task = spawn_loader(Arc::clone(&self.orders), orders);

        let (users, products, orders) = tokio::join!(users_task, products_task, orders_task);

        let report = RunReport {
            users: users.with_context(|| task_failed(EntityKind::User))?,
            products: products.with_context(|| task_failed(EntityKind::Product))?,
            orders: orders.with_context(|| task_failed(EntityKind::Order))?,
        };

        info!(
            "All insertions completed: {} inserted, {} rejected, {} failed",
            report.total_inserted(),
            report.total_rejected(),
            report.total_failed()
        );
        Ok(report)
    }

    /// Validate the three batches without opening any store.
    pub fn dry_run(datasets: &Datasets) -> RunReport {
        RunReport {
            users: validate_batch::<User>(&datasets.users),
            products: validate_batch::<Product>(&datasets.products),
            orders: validate_batch::<Order>(&datasets.orders),
        }
    }
}

fn open_store<E: SqliteEntity>(config: &LoaderConfig) -> Result<EntityStore<E>, StoreError> {
    EntityStore::open(config.location(E::KIND), &config.store_options)
}

fn spawn_loader<E>(store: Arc<EntityStore<E>>, records: Vec<Record>) -> JoinHandle<LoadSummary>
where
    E: SqliteEntity + 'static,
{
    tokio::task::spawn_blocking(move || load_batch(&store, &records))
}

fn task_failed(kind: EntityKind) -> String {
    format!("Loader task for '{}' did not complete", kind.table_name())
}
