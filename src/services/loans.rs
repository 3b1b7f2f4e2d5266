//! Loan listing and renewal service

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, LoanedCopy},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: CatalogConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Copies on loan to one user
    pub async fn borrowed_by(&self, user_id: i32) -> AppResult<Vec<LoanedCopy>> {
        self.repository.instances_list_on_loan(Some(user_id)).await
    }

    /// Every copy on loan
    pub async fn all_borrowed(&self) -> AppResult<Vec<LoanedCopy>> {
        self.repository.instances_list_on_loan(None).await
    }

    /// Date pre-filled on the renewal form
    pub fn proposed_renewal_date(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::weeks(self.config.renewal_default_weeks)
    }

    /// Reject dates in the past or beyond the allowed window
    pub fn check_renewal_date(&self, date: NaiveDate, today: NaiveDate) -> AppResult<NaiveDate> {
        check_renewal_date(date, today, self.config.renewal_max_weeks)
    }

    /// Set a new due date on a copy
    pub async fn renew(&self, id: Uuid, date: NaiveDate, today: NaiveDate) -> AppResult<BookInstance> {
        let date = self.check_renewal_date(date, today)?;
        let copy = self.repository.instances_set_due_back(id, date).await?;
        tracing::info!("Renewed copy {} until {}", id, date);
        Ok(copy)
    }
}

fn check_renewal_date(date: NaiveDate, today: NaiveDate, max_weeks: i64) -> AppResult<NaiveDate> {
    if date < today {
        return Err(AppError::Validation("Invalid date - renewal in past".to_string()));
    }
    if date > today + Duration::weeks(max_weeks) {
        return Err(AppError::Validation(format!(
            "Invalid date - renewal more than {} weeks ahead",
            max_weeks
        )));
    }
    Ok(date)
}
