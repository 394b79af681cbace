//! Unit of Work: repository access plus transaction management.
//!
//! Plain reads go through the shared `Arc` repositories. Anything that must
//! commit or roll back as a whole runs inside `transaction`, where the
//! closure receives a `TransactionContext` whose repositories borrow the
//! open transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::{oil, sale, sale_item};
use super::repositories::{
    into_oils, OilRepository, OilStore, ReportRepository, ReportStore, UserRepository, UserStore,
};
use crate::domain::{NewSale, Oil, Sale, SnapshotItem};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// Tests wrap mocked repositories in their own implementation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn oils(&self) -> Arc<dyn OilRepository>;

    fn reports(&self) -> Arc<dyn ReportRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn oils(&self) -> TxOilRepository<'_> {
        TxOilRepository { txn: self.txn }
    }

    pub fn sales(&self) -> TxSaleRepository<'_> {
        TxSaleRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    oil_repo: Arc<OilStore>,
    report_repo: Arc<ReportStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            oil_repo: Arc::new(OilStore::new(db.clone())),
            report_repo: Arc::new(ReportStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn oils(&self) -> Arc<dyn OilRepository> {
        self.oil_repo.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.report_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Oil lookups inside a transaction
pub struct TxOilRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxOilRepository<'a> {
    /// Single `IN (...)` lookup; missing ids are absent from the result
    pub async fn find_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Oil>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = oil::Entity::find()
            .filter(oil::Column::Id.is_in(ids.iter().copied()))
            .all(self.txn)
            .await?;

        into_oils(models)
    }
}

/// Sale writes inside a transaction
pub struct TxSaleRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxSaleRepository<'a> {
    /// Insert the header, then all lines in one statement.
    pub async fn insert(
        &self,
        new_sale: &NewSale,
        items: Vec<SnapshotItem>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Sale> {
        let header = sale::ActiveModel {
            total_amount: Set(new_sale.total_amount),
            total_quantity: Set(new_sale.total_quantity),
            sale_type: Set(new_sale.sale_type.as_str().to_string()),
            note: Set(new_sale.note.clone()),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;

        let lines = items.into_iter().map(|item| sale_item::ActiveModel {
            sale_id: Set(header.id),
            oil_id: Set(item.oil_id),
            oil_name_snapshot: Set(item.oil_name_snapshot),
            quantity: Set(item.quantity),
            line_amount: Set(item.line_amount),
            ..Default::default()
        });
        sale_item::Entity::insert_many(lines).exec(self.txn).await?;

        Sale::try_from(header)
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
