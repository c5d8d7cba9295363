//! Books orchestrator coordinating accounts and journal entries

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ledger::{AccountManager, JournalManager};
use crate::traits::*;
use crate::types::*;

/// The books of one organization, over a pluggable storage backend
pub struct Books<S: BooksStorage> {
    account_manager: AccountManager<S>,
    journal_manager: JournalManager<S>,
    org: OrgContext,
}

impl<S: BooksStorage + Clone> Books<S> {
    pub fn new(storage: S, org: OrgContext) -> Self {
        Self {
            account_manager: AccountManager::new(storage.clone(), org),
            journal_manager: JournalManager::new(storage, org),
            org,
        }
    }

    pub fn with_validators(
        storage: S,
        org: OrgContext,
        account_validator: Box<dyn AccountValidator>,
        journal_validator: Box<dyn JournalValidator>,
    ) -> Self {
        Self {
            account_manager: AccountManager::with_validator(
                storage.clone(),
                org,
                account_validator,
            ),
            journal_manager: JournalManager::with_validator(storage, org, journal_validator),
            org,
        }
    }

    pub fn org(&self) -> &OrgContext {
        &self.org
    }

    // Account operations

    pub async fn create_account(
        &mut self,
        id: String,
        name: String,
        account_type: AccountType,
        parent_id: Option<String>,
    ) -> BooksResult<Account> {
        self.account_manager
            .create_account(id, name, account_type, parent_id)
            .await
    }

    pub async fn get_account(&self, account_id: &str) -> BooksResult<Option<Account>> {
        self.account_manager.get_account(account_id).await
    }

    pub async fn list_accounts(&self) -> BooksResult<Vec<Account>> {
        self.account_manager.list_accounts().await
    }

    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> BooksResult<Vec<Account>> {
        self.account_manager
            .list_accounts_by_type(account_type)
            .await
    }

    pub async fn update_account(&mut self, account: &Account) -> BooksResult<()> {
        self.account_manager.update_account(account).await
    }

    pub async fn delete_account(&mut self, account_id: &str) -> BooksResult<()> {
        self.account_manager.delete_account(account_id).await
    }

    // Journal operations

    pub async fn post_entry(&mut self, entry: JournalEntry) -> BooksResult<()> {
        self.journal_manager.post_entry(entry).await
    }

    pub async fn get_entry(&self, entry_id: &str) -> BooksResult<Option<JournalEntry>> {
        self.journal_manager.get_entry(entry_id).await
    }

    pub async fn get_account_entries(
        &self,
        account_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>> {
        self.journal_manager
            .get_account_entries(account_id, start_date, end_date)
            .await
    }

    pub async fn get_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>> {
        self.journal_manager.get_entries(start_date, end_date).await
    }

    pub async fn update_entry(&mut self, entry: &JournalEntry) -> BooksResult<()> {
        self.journal_manager.update_entry(entry).await
    }

    pub async fn delete_entry(&mut self, entry_id: &str) -> BooksResult<()> {
        self.journal_manager.delete_entry(entry_id).await
    }

    // Balances and reporting

    pub async fn get_account_balance(
        &self,
        account_id: &str,
        as_of_date: Option<NaiveDate>,
    ) -> BooksResult<BigDecimal> {
        self.account_manager
            .get_balance(account_id, as_of_date)
            .await
    }

    pub async fn trial_balance(&self, as_of_date: NaiveDate) -> BooksResult<TrialBalance> {
        self.account_manager
            .storage
            .get_trial_balance(&self.org, as_of_date)
            .await
    }

    /// Set up the standard workshop chart of accounts
    pub async fn setup_garage_chart(&mut self) -> BooksResult<HashMap<String, Account>> {
        crate::ledger::account::chart::create_garage_chart(&mut self.account_manager).await
    }

    /// Check the books: debits must equal credits in the trial balance
    pub async fn check_integrity(&self, as_of_date: NaiveDate) -> BooksResult<IntegrityReport> {
        let trial_balance = self.trial_balance(as_of_date).await?;

        let mut issues = Vec::new();

        if !trial_balance.is_balanced {
            issues.push(format!(
                "trial balance is not balanced: debits = {}, credits = {}",
                trial_balance.total_debits, trial_balance.total_credits
            ));
        }

        Ok(IntegrityReport {
            as_of_date,
            is_valid: issues.is_empty(),
            issues,
            total_debits: trial_balance.total_debits,
            total_credits: trial_balance.total_credits,
        })
    }
}

/// Outcome of an integrity check over the books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub as_of_date: NaiveDate,
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
}
