use chrono::Utc;
use diesel::prelude::*;
use pushkind_common::pagination::Pagination;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::product::{AffiliateProduct, NewAffiliateProduct};
use crate::domain::types::{ExternalProductId, ProductId};
use crate::domain::update_policy::ProductChanges;
use crate::models::product::{
    AffiliateProduct as DbAffiliateProduct, AffiliateProductChangeset,
    NewAffiliateProduct as DbNewAffiliateProduct,
};
use crate::repository::{
    AffiliateProductReader, AffiliateProductWriter, DieselRepository, ProductListQuery,
};

/// SQL `(offset, limit)` of a page, or `None` when the page lies beyond any
/// representable offset.
fn page_window(pagination: &Pagination) -> Option<(i64, i64)> {
    let offset = pagination
        .page
        .saturating_sub(1)
        .checked_mul(pagination.per_page)?;
    let offset = i64::try_from(offset).ok()?;
    let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
    Some((offset, limit))
}

impl AffiliateProductReader for DieselRepository {
    fn find_product_by_external_id(
        &self,
        external_id: &ExternalProductId,
    ) -> RepositoryResult<Option<AffiliateProduct>> {
        use crate::schema::affiliates_products;

        let mut conn = self.conn()?;

        let product = affiliates_products::table
            .filter(affiliates_products::external_id.eq(external_id.as_str()))
            .order(affiliates_products::id.asc())
            .first::<DbAffiliateProduct>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<AffiliateProduct>)> {
        use crate::schema::affiliates_products;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = affiliates_products::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(search) = &query.search {
                items = items.filter(affiliates_products::title.like(format!("%{search}%")));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            let Some((offset, limit)) = page_window(pagination) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order(affiliates_products::title.asc())
            .load::<DbAffiliateProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<AffiliateProduct>, _>>()?;

        Ok((total, items))
    }
}

impl AffiliateProductWriter for DieselRepository {
    fn create_product(&self, product: &NewAffiliateProduct) -> RepositoryResult<AffiliateProduct> {
        use crate::schema::affiliates_products;

        let mut conn = self.conn()?;
        let db_product: DbNewAffiliateProduct = product.clone().into();

        let created = diesel::insert_into(affiliates_products::table)
            .values(&db_product)
            .get_result::<DbAffiliateProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_product(&self, id: ProductId, changes: &ProductChanges) -> RepositoryResult<usize> {
        use crate::schema::affiliates_products;

        let mut conn = self.conn()?;
        let changeset = AffiliateProductChangeset::new(changes, Utc::now().naive_utc());

        let affected = diesel::update(
            affiliates_products::table.filter(affiliates_products::id.eq(id.get())),
        )
        .set(&changeset)
        .execute(&mut conn)?;

        Ok(affected)
    }
}
