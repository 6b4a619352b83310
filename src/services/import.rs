//! Marketplace catalog import.
//!
//! An import fetches the category directory once, plans one
//! [`CategoryUnit`] per selected category and drives the units sequentially.
//! Each unit fetches its listing and upserts every product. A failing
//! product is logged and counted; a failing unit is recorded in the
//! [`ImportReport`] and the run moves on to the next one.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::repository::errors::RepositoryError;
use pushkind_common::routes::check_role;
use thiserror::Error;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::listing::ListedProduct;
use crate::domain::types::{CategoryKey, ListingUrl, TypeConstraintError, UserId};
use crate::domain::update_policy::{ProductChanges, UpdateToggles};
use crate::dto::flipkart::ProductEntry;
use crate::forms::import::ImportFormPayload;
use crate::marketplace::flipkart::FlipkartClient;
use crate::marketplace::{AffiliateApi, MarketplaceResult};
use crate::models::config::FlipkartConfig;
use crate::repository::{AffiliateProductReader, AffiliateProductWriter};

use super::{ServiceError, ServiceResult};

/// One category's fetch-and-upsert unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUnit {
    pub category: CategoryKey,
    pub listing_url: ListingUrl,
}

/// What happened to a single product entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    /// The product exists and no enabled toggle selected a field to refresh.
    Unchanged,
}

/// Failure to import a single product entry.
#[derive(Debug, Error)]
pub enum UpsertError {
    #[error("malformed product entry: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid product data: {0}")]
    Invalid(#[from] TypeConstraintError),
    #[error("failed to store product: {0}")]
    Repository(#[from] RepositoryError),
}

/// Product counters of one imported category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: CategoryKey,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Entries skipped because they could not be decoded or stored.
    pub failed: usize,
}

impl CategoryReport {
    fn new(category: CategoryKey) -> Self {
        Self {
            category,
            created: 0,
            updated: 0,
            unchanged: 0,
            failed: 0,
        }
    }

    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// Result of one category unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    Imported(CategoryReport),
    Failed(String),
}

/// Progress notification sent after every category unit.
#[derive(Debug)]
pub struct ImportProgress<'a> {
    /// Units completed so far, including this one.
    pub processed: usize,
    pub total: usize,
    pub category: &'a CategoryKey,
    pub outcome: &'a CategoryOutcome,
}

impl ImportProgress<'_> {
    /// Human-readable progress line.
    pub fn message(&self) -> String {
        match self.outcome {
            CategoryOutcome::Imported(_) => format!(
                "Completed importing category {} ({}/{})",
                self.category, self.processed, self.total
            ),
            CategoryOutcome::Failed(error) => format!(
                "Failed importing category {} ({}/{}): {error}",
                self.category, self.processed, self.total
            ),
        }
    }
}

/// A category unit that could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFailure {
    pub category: CategoryKey,
    pub message: String,
}

/// Aggregate outcome of an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub title: String,
    pub total: usize,
    pub processed: usize,
    pub imported: Vec<CategoryReport>,
    pub failures: Vec<CategoryFailure>,
    /// Set when the run was stopped before every unit was processed.
    pub cancelled: bool,
}

impl ImportReport {
    fn new(title: String, total: usize) -> Self {
        Self {
            title,
            total,
            processed: 0,
            imported: Vec::new(),
            failures: Vec::new(),
            cancelled: false,
        }
    }

    fn record(&mut self, category: CategoryKey, outcome: CategoryOutcome) {
        match outcome {
            CategoryOutcome::Imported(report) => self.imported.push(report),
            CategoryOutcome::Failed(message) => {
                self.failures.push(CategoryFailure { category, message })
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    /// Total number of products created across all categories.
    pub fn created(&self) -> usize {
        self.imported.iter().map(|r| r.created).sum()
    }

    /// Total number of products updated across all categories.
    pub fn updated(&self) -> usize {
        self.imported.iter().map(|r| r.updated).sum()
    }

    /// Completion message shown to the administrator.
    pub fn summary(&self) -> String {
        if !self.failures.is_empty() {
            return self
                .failures
                .iter()
                .map(|f| {
                    format!(
                        "An error occurred while processing {}: {}",
                        f.category, f.message
                    )
                })
                .collect::<Vec<_>>()
                .join("; ");
        }
        if self.cancelled {
            return format!(
                "Import stopped after {} of {} categories.",
                self.processed, self.total
            );
        }
        format!(
            "The products are successfully imported from flipkart: {} created, {} updated.",
            self.created(),
            self.updated()
        )
    }
}

/// Title of an import run over `total` units.
pub fn import_title(filter: Option<&CategoryKey>, total: usize) -> String {
    match filter {
        Some(category) => format!("Importing products from {category}"),
        None => format!("Importing products from {total} categories"),
    }
}

/// Select the category units to run.
///
/// A filter naming an unknown category is rejected before any listing is
/// requested.
pub fn plan_import(
    categories: BTreeMap<CategoryKey, ListingUrl>,
    filter: Option<&CategoryKey>,
) -> ServiceResult<Vec<CategoryUnit>> {
    match filter {
        Some(category) => {
            let listing_url = categories
                .get(category)
                .cloned()
                .ok_or(ServiceError::NotFound)?;
            Ok(vec![CategoryUnit {
                category: category.clone(),
                listing_url,
            }])
        }
        None => Ok(categories
            .into_iter()
            .map(|(category, listing_url)| CategoryUnit {
                category,
                listing_url,
            })
            .collect()),
    }
}

/// Create the product described by `entry`, or refresh the fields of the
/// existing one selected by `toggles`.
pub fn upsert_product<R>(
    entry: serde_json::Value,
    toggles: &UpdateToggles,
    owner_id: UserId,
    repo: &R,
) -> Result<UpsertOutcome, UpsertError>
where
    R: AffiliateProductReader + AffiliateProductWriter + ?Sized,
{
    let entry: ProductEntry = serde_json::from_value(entry)?;
    let listed = ListedProduct::try_from(entry)?;

    let Some(existing) = repo.find_product_by_external_id(&listed.external_id)? else {
        let product = listed.into_new_product(owner_id, Utc::now().naive_utc());
        repo.create_product(&product)?;
        return Ok(UpsertOutcome::Created);
    };

    let changes = ProductChanges::collect(toggles, &listed);
    if changes.is_empty() {
        return Ok(UpsertOutcome::Unchanged);
    }

    repo.update_product(existing.id, &changes)?;
    Ok(UpsertOutcome::Updated)
}

/// Fetch one category listing and upsert all of its products.
///
/// Only a failure of the listing request itself fails the unit.
pub fn import_category<A, R>(
    unit: &CategoryUnit,
    toggles: &UpdateToggles,
    owner_id: UserId,
    api: &A,
    repo: &R,
) -> MarketplaceResult<CategoryReport>
where
    A: AffiliateApi + ?Sized,
    R: AffiliateProductReader + AffiliateProductWriter + ?Sized,
{
    let entries = api.fetch_products(&unit.listing_url)?;
    let mut report = CategoryReport::new(unit.category.clone());

    for entry in entries {
        match upsert_product(entry, toggles, owner_id, repo) {
            Ok(outcome) => report.record(outcome),
            Err(e) => {
                log::error!("Skipping product in category {}: {e}", unit.category);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Run an import over the selected categories.
///
/// `on_progress` is called after every unit; returning
/// [`ControlFlow::Break`] stops the run before the next unit starts.
pub fn run_import<A, R, F>(
    filter: Option<&CategoryKey>,
    toggles: &UpdateToggles,
    owner_id: UserId,
    api: &A,
    repo: &R,
    mut on_progress: F,
) -> ServiceResult<ImportReport>
where
    A: AffiliateApi + ?Sized,
    R: AffiliateProductReader + AffiliateProductWriter + ?Sized,
    F: FnMut(&ImportProgress<'_>) -> ControlFlow<()>,
{
    let categories = api.fetch_categories().map_err(|e| {
        log::error!("Failed to fetch marketplace categories: {e}");
        ServiceError::from(e)
    })?;

    let units = plan_import(categories, filter)?;
    let title = import_title(filter, units.len());
    log::info!("{title}");

    let mut report = ImportReport::new(title, units.len());

    for unit in units {
        let outcome = match import_category(&unit, toggles, owner_id, api, repo) {
            Ok(category_report) => CategoryOutcome::Imported(category_report),
            Err(e) => {
                log::error!("Failed to import category {}: {e}", unit.category);
                CategoryOutcome::Failed(e.to_string())
            }
        };
        report.processed += 1;

        let flow = on_progress(&ImportProgress {
            processed: report.processed,
            total: report.total,
            category: &unit.category,
            outcome: &outcome,
        });
        report.record(unit.category, outcome);

        if flow.is_break() {
            report.cancelled = report.processed < report.total;
            if report.cancelled {
                log::warn!(
                    "Import stopped after {} of {} categories",
                    report.processed,
                    report.total
                );
            }
            break;
        }
    }

    Ok(report)
}

/// Admin entry point: import from the configured Flipkart account.
///
/// Checks the caller's role and the marketplace settings before any network
/// call is made.
pub fn start_import<R>(
    payload: ImportFormPayload,
    user: &AuthenticatedUser,
    config: &FlipkartConfig,
    repo: &R,
) -> ServiceResult<ImportReport>
where
    R: AffiliateProductReader + AffiliateProductWriter,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    // Imported records are owned by the signed-in user, whose id is the token subject.
    let owner_id = match user.sub.parse().ok().and_then(|uid| UserId::new(uid).ok()) {
        Some(owner_id) => owner_id,
        None => {
            log::error!("Invalid user id in user context: {}", user.sub);
            return Err(ServiceError::Internal);
        }
    };

    let settings = config.import_settings();
    let Some(credentials) = settings.active_credentials() else {
        log::warn!("Flipkart import requested but the native api is not configured");
        return Err(ServiceError::NotConfigured);
    };

    let client = FlipkartClient::new(
        credentials,
        &config.api_base_url,
        config.timeout(),
    )?;

    run_import(
        payload.category.as_ref(),
        &settings.toggles,
        owner_id,
        &client,
        repo,
        |progress| {
            log::info!("{}", progress.message());
            ControlFlow::Continue(())
        },
    )
}
