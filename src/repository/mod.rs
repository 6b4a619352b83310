use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::pagination::Pagination;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::product::{AffiliateProduct, NewAffiliateProduct};
use crate::domain::types::{ExternalProductId, ProductId};
use crate::domain::update_policy::ProductChanges;

pub mod product;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be moved into blocking import jobs.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing imported products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Case-insensitive title filter.
    pub search: Option<String>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for imported products.
pub trait AffiliateProductReader {
    /// Find the product imported under `external_id`.
    ///
    /// Should several rows ever match, the one with the lowest local id wins.
    fn find_product_by_external_id(
        &self,
        external_id: &ExternalProductId,
    ) -> RepositoryResult<Option<AffiliateProduct>>;
    /// List products matching the supplied query parameters.
    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<AffiliateProduct>)>;
}

/// Write operations for imported products.
pub trait AffiliateProductWriter {
    /// Persist a new product and return the stored record.
    fn create_product(&self, product: &NewAffiliateProduct) -> RepositoryResult<AffiliateProduct>;
    /// Apply `changes` to the product `id` in a single write.
    ///
    /// Returns the number of rows written, `0` when `id` does not exist.
    fn update_product(&self, id: ProductId, changes: &ProductChanges) -> RepositoryResult<usize>;
}
