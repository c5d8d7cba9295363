//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assets::FixedAsset;
use crate::types::*;

/// Explicit tenant context for every storage call.
///
/// The hosted product is multi-tenant; the organization a call operates on is
/// always passed in, never read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgContext {
    pub org_id: Uuid,
}

impl OrgContext {
    pub fn new(org_id: Uuid) -> Self {
        Self { org_id }
    }

    /// Context with a fresh random organization id, for tests and demos
    pub fn ephemeral() -> Self {
        Self {
            org_id: Uuid::new_v4(),
        }
    }
}

/// Storage abstraction for the books.
///
/// Lets the accounting core run against any backend (PostgreSQL, SQLite,
/// in-memory) by implementing these methods. Every method is scoped to one
/// organization through [`OrgContext`].
#[async_trait]
pub trait BooksStorage: Send + Sync {
    /// Save an account
    async fn save_account(&mut self, org: &OrgContext, account: &Account) -> BooksResult<()>;

    /// Get an account by id
    async fn get_account(&self, org: &OrgContext, account_id: &str)
        -> BooksResult<Option<Account>>;

    /// List accounts, optionally filtered by type
    async fn list_accounts(
        &self,
        org: &OrgContext,
        account_type: Option<AccountType>,
    ) -> BooksResult<Vec<Account>>;

    /// Update an account
    async fn update_account(&mut self, org: &OrgContext, account: &Account) -> BooksResult<()>;

    /// Delete an account (if no journal entries reference it)
    async fn delete_account(&mut self, org: &OrgContext, account_id: &str) -> BooksResult<()>;

    /// Save a journal entry
    async fn save_entry(&mut self, org: &OrgContext, entry: &JournalEntry) -> BooksResult<()>;

    /// Get a journal entry by id
    async fn get_entry(
        &self,
        org: &OrgContext,
        entry_id: &str,
    ) -> BooksResult<Option<JournalEntry>>;

    /// List journal entries touching a specific account
    async fn get_account_entries(
        &self,
        org: &OrgContext,
        account_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>>;

    /// List all journal entries within a date range
    async fn get_entries(
        &self,
        org: &OrgContext,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>>;

    /// Update a journal entry
    async fn update_entry(&mut self, org: &OrgContext, entry: &JournalEntry) -> BooksResult<()>;

    /// Delete a journal entry
    async fn delete_entry(&mut self, org: &OrgContext, entry_id: &str) -> BooksResult<()>;

    /// Account balance as of a specific date (current balance when `None`)
    async fn get_account_balance(
        &self,
        org: &OrgContext,
        account_id: &str,
        as_of_date: Option<NaiveDate>,
    ) -> BooksResult<BigDecimal>;

    /// Trial balance as of a specific date
    async fn get_trial_balance(
        &self,
        org: &OrgContext,
        as_of_date: NaiveDate,
    ) -> BooksResult<TrialBalance>;

    /// Save a fixed asset
    async fn save_asset(&mut self, org: &OrgContext, asset: &FixedAsset) -> BooksResult<()>;

    /// Get a fixed asset by id
    async fn get_asset(&self, org: &OrgContext, asset_id: &str)
        -> BooksResult<Option<FixedAsset>>;

    /// List all fixed assets
    async fn list_assets(&self, org: &OrgContext) -> BooksResult<Vec<FixedAsset>>;

    /// Update a fixed asset
    async fn update_asset(&mut self, org: &OrgContext, asset: &FixedAsset) -> BooksResult<()>;
}

/// Custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate an account before saving
    fn validate_account(&self, account: &Account) -> BooksResult<()>;

    /// Validate account deletion (e.g. check for existing entries)
    fn validate_account_deletion(&self, account_id: &str) -> BooksResult<()>;
}

/// Custom journal entry validation rules
pub trait JournalValidator: Send + Sync {
    /// Validate an entry before posting
    fn validate_entry(&self, entry: &JournalEntry) -> BooksResult<()>;

    /// Validate that all referenced accounts exist
    fn validate_account_references(&self, entry: &JournalEntry) -> BooksResult<()>;
}

/// Default account validator with basic rules
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_account(&self, account: &Account) -> BooksResult<()> {
        if account.id.trim().is_empty() {
            return Err(BooksError::Validation(
                "account id cannot be empty".to_string(),
            ));
        }

        if account.name.trim().is_empty() {
            return Err(BooksError::Validation(
                "account name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_account_deletion(&self, _account_id: &str) -> BooksResult<()> {
        // Referencing-entry checks live in storage-aware validators
        Ok(())
    }
}

/// Default journal validator applying the double-entry rules
pub struct DefaultJournalValidator;

impl JournalValidator for DefaultJournalValidator {
    fn validate_entry(&self, entry: &JournalEntry) -> BooksResult<()> {
        entry.validate()
    }

    fn validate_account_references(&self, _entry: &JournalEntry) -> BooksResult<()> {
        // Existence checks against storage happen in JournalManager
        Ok(())
    }
}
