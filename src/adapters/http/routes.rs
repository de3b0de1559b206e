use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceUseCase, ListInvoicesUseCase,
  UpdateInvoiceUseCase,
};
use crate::domain::invoice::ViewCache;

use super::handlers::invoices_web;
use super::templates::TemplateEngine;

/// Everything the invoice dashboard routes hand to their handlers
#[derive(Clone)]
pub struct InvoiceRouteDependencies {
  pub templates: TemplateEngine,
  pub view_cache: Arc<dyn ViewCache>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub get_invoice_use_case: Arc<GetInvoiceUseCase>,
  pub create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  pub update_invoice_use_case: Arc<UpdateInvoiceUseCase>,
  pub delete_invoice_use_case: Arc<DeleteInvoiceUseCase>,
}

/// Configure invoice dashboard routes
///
/// # Routes
///
/// - GET /dashboard/invoices - Invoice list (cached view)
/// - GET /dashboard/invoices/create - Create form
/// - POST /dashboard/invoices/create - Create an invoice
/// - GET /dashboard/invoices/{id}/edit - Edit form
/// - POST /dashboard/invoices/{id}/edit - Update an invoice
/// - DELETE /dashboard/invoices/{id} - Delete an invoice
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: InvoiceRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.templates))
    .app_data(web::Data::new(deps.view_cache))
    .app_data(web::Data::new(deps.list_invoices_use_case))
    .app_data(web::Data::new(deps.get_invoice_use_case))
    .app_data(web::Data::new(deps.create_invoice_use_case))
    .app_data(web::Data::new(deps.update_invoice_use_case))
    .app_data(web::Data::new(deps.delete_invoice_use_case))
    .service(
      web::resource("/dashboard/invoices").route(web::get().to(invoices_web::invoices_page)),
    )
    .service(
      web::resource("/dashboard/invoices/create")
        .route(web::get().to(invoices_web::invoice_create_page))
        .route(web::post().to(invoices_web::create_invoice_submit)),
    )
    .service(
      web::resource("/dashboard/invoices/{id}/edit")
        .route(web::get().to(invoices_web::invoice_edit_page))
        .route(web::post().to(invoices_web::update_invoice_submit)),
    )
    .service(
      web::resource("/dashboard/invoices/{id}")
        .route(web::delete().to(invoices_web::delete_invoice)),
    );
}
