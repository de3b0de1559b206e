use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  AmountInCents, Invoice, InvoiceFields, InvoiceStatus, NewInvoice, errors::InvoiceError,
  ports::InvoiceRepository,
};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  customer_id: Uuid,
  amount: i64,
  status: String,
  date: NaiveDate,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let status = InvoiceStatus::from_str(&row.status)?;

    Ok(Invoice {
      id: row.id,
      customer_id: row.customer_id,
      amount: AmountInCents::from_cents(row.amount),
      status,
      date: row.date,
    })
  }
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    let (id,): (Uuid,) = sqlx::query_as(
      r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
    )
    .bind(invoice.fields.customer_id)
    .bind(invoice.fields.amount.cents())
    .bind(invoice.fields.status.as_str())
    .bind(invoice.date)
    .fetch_one(&self.pool)
    .await?;

    Ok(Invoice::from_new(id, invoice))
  }

  async fn update(&self, id: Uuid, fields: InvoiceFields) -> Result<u64, InvoiceError> {
    let result = sqlx::query(
      r#"
            UPDATE invoices
            SET customer_id = $2, amount = $3, status = $4
            WHERE id = $1
            "#,
    )
    .bind(id)
    .bind(fields.customer_id)
    .bind(fields.amount.cents())
    .bind(fields.status.as_str())
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected())
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    sqlx::query(
      r#"
      DELETE FROM invoices
      WHERE id = $1
      "#,
    )
    .bind(id)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, customer_id, amount::BIGINT AS amount, status, date
            FROM invoices
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, customer_id, amount::BIGINT AS amount, status, date
            FROM invoices
            ORDER BY date DESC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    // The table is owned elsewhere; mirror its shape for the tests
    sqlx::query(
      r#"
      CREATE TABLE invoices (
        id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
        customer_id UUID NOT NULL,
        amount INT NOT NULL,
        status VARCHAR(255) NOT NULL,
        date DATE NOT NULL
      )
      "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create invoices table");

    (pool, container)
  }

  fn fields(amount: &str, status: &str) -> InvoiceFields {
    InvoiceFields::parse(&Uuid::new_v4().to_string(), amount, status).unwrap()
  }

  async fn count_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
      .fetch_one(pool)
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_create_invoice() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool.clone());
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let created = repo
      .create(NewInvoice::new(fields("156.78", "pending"), date))
      .await
      .unwrap();

    let stored: (i32, String, NaiveDate) =
      sqlx::query_as("SELECT amount, status, date FROM invoices WHERE id = $1")
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(stored, (15678, "pending".to_string(), date));
    assert_eq!(count_rows(&pool).await, 1);
  }

  #[tokio::test]
  async fn test_update_only_target_row() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool);
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

    let target = repo
      .create(NewInvoice::new(fields("10", "pending"), date))
      .await
      .unwrap();
    let other = repo
      .create(NewInvoice::new(fields("20", "pending"), date))
      .await
      .unwrap();

    let replacement = fields("30.5", "paid");
    let affected = repo.update(target.id, replacement.clone()).await.unwrap();
    assert_eq!(affected, 1);

    let updated = repo.find_by_id(target.id).await.unwrap().unwrap();
    assert_eq!(updated.fields(), replacement);
    assert_eq!(updated.date, date);

    let untouched = repo.find_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(untouched, other);
  }

  #[tokio::test]
  async fn test_update_missing_row_affects_nothing() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool);

    let affected = repo
      .update(Uuid::new_v4(), fields("1", "paid"))
      .await
      .unwrap();

    assert_eq!(affected, 0);
  }

  #[tokio::test]
  async fn test_delete_invoice() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool.clone());
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();

    let doomed = repo
      .create(NewInvoice::new(fields("5", "paid"), date))
      .await
      .unwrap();
    repo
      .create(NewInvoice::new(fields("6", "paid"), date))
      .await
      .unwrap();

    repo.delete(doomed.id).await.unwrap();

    assert!(repo.find_by_id(doomed.id).await.unwrap().is_none());
    assert_eq!(count_rows(&pool).await, 1);
  }

  #[tokio::test]
  async fn test_find_all_newest_first() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresInvoiceRepository::new(pool);

    let old = repo
      .create(NewInvoice::new(
        fields("1", "paid"),
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
      ))
      .await
      .unwrap();
    let new = repo
      .create(NewInvoice::new(
        fields("2", "pending"),
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
      ))
      .await
      .unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all, vec![new, old]);
  }
}
