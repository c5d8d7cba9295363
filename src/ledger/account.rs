//! Account management functionality

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Account manager for chart-of-accounts operations within one organization
pub struct AccountManager<S: BooksStorage> {
    pub(crate) storage: S,
    pub(crate) org: OrgContext,
    validator: Box<dyn AccountValidator>,
}

impl<S: BooksStorage> AccountManager<S> {
    pub fn new(storage: S, org: OrgContext) -> Self {
        Self {
            storage,
            org,
            validator: Box::new(DefaultAccountValidator),
        }
    }

    pub fn with_validator(storage: S, org: OrgContext, validator: Box<dyn AccountValidator>) -> Self {
        Self {
            storage,
            org,
            validator,
        }
    }

    /// Create a new account
    pub async fn create_account(
        &mut self,
        id: String,
        name: String,
        account_type: AccountType,
        parent_id: Option<String>,
    ) -> BooksResult<Account> {
        let account = Account::new(id, name, account_type, parent_id);

        self.validator.validate_account(&account)?;

        if self.storage.get_account(&self.org, &account.id).await?.is_some() {
            return Err(BooksError::Validation(format!(
                "account with id '{}' already exists",
                account.id
            )));
        }

        if let Some(ref parent_id) = account.parent_id {
            if self.storage.get_account(&self.org, parent_id).await?.is_none() {
                return Err(BooksError::Validation(format!(
                    "parent account '{}' does not exist",
                    parent_id
                )));
            }
        }

        self.storage.save_account(&self.org, &account).await?;

        Ok(account)
    }

    pub async fn get_account(&self, account_id: &str) -> BooksResult<Option<Account>> {
        self.storage.get_account(&self.org, account_id).await
    }

    /// Get an account by id, erroring when it does not exist
    pub async fn get_account_required(&self, account_id: &str) -> BooksResult<Account> {
        self.storage
            .get_account(&self.org, account_id)
            .await?
            .ok_or_else(|| BooksError::AccountNotFound(account_id.to_string()))
    }

    pub async fn list_accounts(&self) -> BooksResult<Vec<Account>> {
        self.storage.list_accounts(&self.org, None).await
    }

    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> BooksResult<Vec<Account>> {
        self.storage.list_accounts(&self.org, Some(account_type)).await
    }

    pub async fn update_account(&mut self, account: &Account) -> BooksResult<()> {
        self.validator.validate_account(account)?;

        if self.storage.get_account(&self.org, &account.id).await?.is_none() {
            return Err(BooksError::AccountNotFound(account.id.clone()));
        }

        self.storage.update_account(&self.org, account).await
    }

    pub async fn delete_account(&mut self, account_id: &str) -> BooksResult<()> {
        self.validator.validate_account_deletion(account_id)?;

        if self.storage.get_account(&self.org, account_id).await?.is_none() {
            return Err(BooksError::AccountNotFound(account_id.to_string()));
        }

        self.storage.delete_account(&self.org, account_id).await
    }

    pub async fn get_balance(
        &self,
        account_id: &str,
        as_of_date: Option<chrono::NaiveDate>,
    ) -> BooksResult<BigDecimal> {
        self.storage
            .get_account_balance(&self.org, account_id, as_of_date)
            .await
    }
}

/// Utility functions for working with accounts
pub mod chart {
    use super::*;
    use std::collections::HashMap;

    /// The standard chart of accounts for a service workshop.
    ///
    /// Accumulated depreciation is modelled as an asset account that carries
    /// a negative (credit-side) balance; the trial balance flips it into the
    /// credit column.
    const GARAGE_CHART: &[(&str, &str, &str, AccountType)] = &[
        ("cash", "1000", "Cash", AccountType::Asset),
        ("bank", "1100", "Bank", AccountType::Asset),
        (
            "accounts_receivable",
            "1200",
            "Accounts Receivable",
            AccountType::Asset,
        ),
        (
            "gst_recoverable",
            "1400",
            "GST Recoverable",
            AccountType::Asset,
        ),
        (
            "workshop_equipment",
            "1500",
            "Workshop Equipment",
            AccountType::Asset,
        ),
        (
            "accumulated_depreciation",
            "1510",
            "Accumulated Depreciation",
            AccountType::Asset,
        ),
        (
            "accounts_payable",
            "2000",
            "Accounts Payable",
            AccountType::Liability,
        ),
        ("gst_payable", "2200", "GST Payable", AccountType::Liability),
        ("owners_equity", "3000", "Owner's Equity", AccountType::Equity),
        (
            "service_revenue",
            "4000",
            "Service Revenue",
            AccountType::Income,
        ),
        ("parts_revenue", "4100", "Parts Revenue", AccountType::Income),
        (
            "consumables_expense",
            "5000",
            "Consumables Expense",
            AccountType::Expense,
        ),
        ("rent_expense", "6000", "Rent Expense", AccountType::Expense),
        (
            "depreciation_expense",
            "6200",
            "Depreciation Expense",
            AccountType::Expense,
        ),
    ];

    /// Create the standard workshop chart, returning accounts keyed by role
    pub async fn create_garage_chart<S: BooksStorage>(
        account_manager: &mut AccountManager<S>,
    ) -> BooksResult<HashMap<String, Account>> {
        let mut accounts = HashMap::new();

        for (key, id, name, account_type) in GARAGE_CHART {
            let account = account_manager
                .create_account(id.to_string(), name.to_string(), account_type.clone(), None)
                .await?;
            accounts.insert(key.to_string(), account);
        }

        Ok(accounts)
    }
}
