use actix_web::{HttpResponse, http::header, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{dtos::InvoiceForm, errors::ApiError, templates::TemplateEngine};
use crate::application::invoice::{
  CreateInvoiceCommand, CreateInvoiceUseCase, DeleteInvoiceCommand, DeleteInvoiceUseCase,
  FormActionOutcome, GetInvoiceCommand, GetInvoiceUseCase, INVOICES_PATH, ListInvoicesUseCase,
  UpdateInvoiceCommand, UpdateInvoiceUseCase,
};
use crate::domain::invoice::ViewCache;

/// Translates a form action outcome into the HTTP response the form expects.
fn outcome_response(outcome: FormActionOutcome) -> HttpResponse {
  match outcome {
    FormActionOutcome::Redirect(path) => HttpResponse::SeeOther()
      .insert_header((header::LOCATION, path))
      .finish(),
    FormActionOutcome::Refreshed => HttpResponse::Ok().finish(),
    FormActionOutcome::Failed(message) => HttpResponse::InternalServerError().json(message),
  }
}

fn render_html(
  templates: &TemplateEngine,
  template: &str,
  context: &tera::Context,
) -> Result<String, ApiError> {
  templates
    .render(template, context)
    .map_err(|e| ApiError::Internal(format!("Template error: {}", e)))
}

// GET /dashboard/invoices - List all invoices, served from the view cache when warm
pub async fn invoices_page(
  templates: web::Data<TemplateEngine>,
  list_invoices_use_case: web::Data<Arc<ListInvoicesUseCase>>,
  view_cache: web::Data<Arc<dyn ViewCache>>,
) -> Result<HttpResponse, ApiError> {
  match view_cache.get(INVOICES_PATH).await {
    Ok(Some(html)) => {
      return Ok(
        HttpResponse::Ok()
          .content_type("text/html")
          .insert_header(("X-Cache", "HIT"))
          .body(html),
      );
    }
    Ok(None) => {}
    Err(e) => tracing::warn!(error = %e, "View cache read failed, rendering fresh"),
  }

  // Taken before the store read so a concurrent invalidation voids this render.
  let generation = match view_cache.generation(INVOICES_PATH).await {
    Ok(generation) => Some(generation),
    Err(e) => {
      tracing::warn!(error = %e, "View cache generation unavailable, not caching");
      None
    }
  };

  let response = list_invoices_use_case.execute().await?;

  let mut context = tera::Context::new();
  context.insert("invoices", &response.invoices);
  let html = render_html(&templates, "pages/invoices.html.tera", &context)?;

  if let Some(generation) = generation {
    if let Err(e) = view_cache.put(INVOICES_PATH, html.clone(), generation).await {
      tracing::warn!(error = %e, "Failed to cache invoices view");
    }
  }

  Ok(
    HttpResponse::Ok()
      .content_type("text/html")
      .insert_header(("X-Cache", "MISS"))
      .body(html),
  )
}

// GET /dashboard/invoices/create - Show invoice creation form
pub async fn invoice_create_page(
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let html = render_html(
    &templates,
    "pages/invoice_form.html.tera",
    &tera::Context::new(),
  )?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// POST /dashboard/invoices/create - Create a new invoice
pub async fn create_invoice_submit(
  form: web::Form<InvoiceForm>,
  create_invoice_use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  form.validate()?;
  let (customer_id, amount, status) = form.into_inner().into_values();

  let outcome = create_invoice_use_case
    .execute(CreateInvoiceCommand {
      customer_id,
      amount,
      status,
    })
    .await?;

  Ok(outcome_response(outcome))
}

// GET /dashboard/invoices/{id}/edit - Show invoice edit form
pub async fn invoice_edit_page(
  path: web::Path<Uuid>,
  templates: web::Data<TemplateEngine>,
  get_invoice_use_case: web::Data<Arc<GetInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = get_invoice_use_case
    .execute(GetInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await?;

  let mut context = tera::Context::new();
  context.insert("invoice", &invoice);
  let html = render_html(&templates, "pages/invoice_form.html.tera", &context)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// POST /dashboard/invoices/{id}/edit - Update an invoice
pub async fn update_invoice_submit(
  path: web::Path<Uuid>,
  form: web::Form<InvoiceForm>,
  update_invoice_use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  form.validate()?;
  let (customer_id, amount, status) = form.into_inner().into_values();

  let outcome = update_invoice_use_case
    .execute(UpdateInvoiceCommand {
      invoice_id: path.into_inner(),
      customer_id,
      amount,
      status,
    })
    .await?;

  Ok(outcome_response(outcome))
}

// DELETE /dashboard/invoices/{id} - Delete an invoice
pub async fn delete_invoice(
  path: web::Path<Uuid>,
  delete_invoice_use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> HttpResponse {
  let outcome = delete_invoice_use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await;

  outcome_response(outcome)
}
