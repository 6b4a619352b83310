use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::product::AffiliateProduct;
use crate::repository::{AffiliateProductReader, ProductListQuery};

use super::{ServiceError, ServiceResult};

/// Query for one overview page. Blank searches are ignored.
fn overview_query(page: usize, search: Option<&str>) -> ProductListQuery {
    let query = ProductListQuery::default().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(search) => query.search(search),
        None => query,
    }
}

/// Core business logic for rendering the overview page.
///
/// Validates the access role and fetches one page of imported products,
/// optionally filtered by title. Repository errors are translated into
/// `ServiceError` so that the HTTP route can remain a thin wrapper.
pub fn show_products<R>(
    page: usize,
    search: Option<&str>,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Paginated<AffiliateProduct>>
where
    R: AffiliateProductReader,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = page.max(1);
    match repo.list_products(overview_query(page, search)) {
        Ok((total, products)) => Ok(Paginated::new(
            products,
            page,
            total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        )),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(ServiceError::Internal)
        }
    }
}
