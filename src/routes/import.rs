use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

use crate::forms::import::{ImportForm, ImportFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::import::start_import as start_import_service;

/// Run a marketplace import and report the outcome as a flash message.
///
/// The import talks to the marketplace with a blocking client, so it runs on
/// the blocking thread pool.
#[post("/import")]
pub async fn start_import(
    user: AuthenticatedUser,
    form: web::Form<ImportForm>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let payload = match ImportFormPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(ServiceError::from(err).to_string()).send();
            return redirect("/");
        }
    };

    let repo = repo.get_ref().clone();
    let config = server_config.flipkart.clone();
    let result =
        web::block(move || start_import_service(payload, &user, &config, &repo)).await;

    let result = match result {
        Ok(result) => result,
        Err(err) => {
            log::error!("Import job did not complete: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match result {
        Ok(report) => {
            if report.is_success() {
                FlashMessage::success(report.summary()).send();
            } else {
                FlashMessage::error(report.summary()).send();
            }
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotConfigured) => {
            FlashMessage::warning("Configure flipkart native api to import data").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category does not exist").send();
            redirect("/")
        }
        Err(err @ (ServiceError::Upstream(_) | ServiceError::Form(_))) => {
            FlashMessage::error(err.to_string()).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to import products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
