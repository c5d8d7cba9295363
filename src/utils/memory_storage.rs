//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::assets::FixedAsset;
use crate::traits::*;
use crate::types::*;

type OrgKeyed<T> = Arc<RwLock<HashMap<(Uuid, String), T>>>;

/// In-memory storage, namespaced by organization
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    accounts: OrgKeyed<Account>,
    entries: OrgKeyed<JournalEntry>,
    assets: OrgKeyed<FixedAsset>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all data across all organizations (test helper)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
        self.entries.write().unwrap().clear();
        self.assets.write().unwrap().clear();
    }

    fn key(org: &OrgContext, id: &str) -> (Uuid, String) {
        (org.org_id, id.to_string())
    }
}

#[async_trait]
impl BooksStorage for MemoryStorage {
    async fn save_account(&mut self, org: &OrgContext, account: &Account) -> BooksResult<()> {
        self.accounts
            .write()
            .unwrap()
            .insert(Self::key(org, &account.id), account.clone());
        Ok(())
    }

    async fn get_account(
        &self,
        org: &OrgContext,
        account_id: &str,
    ) -> BooksResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .get(&Self::key(org, account_id))
            .cloned())
    }

    async fn list_accounts(
        &self,
        org: &OrgContext,
        account_type: Option<AccountType>,
    ) -> BooksResult<Vec<Account>> {
        let accounts = self.accounts.read().unwrap();
        let filtered = accounts
            .iter()
            .filter(|((org_id, _), _)| *org_id == org.org_id)
            .map(|(_, account)| account)
            .filter(|account| {
                account_type
                    .as_ref()
                    .is_none_or(|t| &account.account_type == t)
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn update_account(&mut self, org: &OrgContext, account: &Account) -> BooksResult<()> {
        let key = Self::key(org, &account.id);
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&key) {
            accounts.insert(key, account.clone());
            Ok(())
        } else {
            Err(BooksError::AccountNotFound(account.id.clone()))
        }
    }

    async fn delete_account(&mut self, org: &OrgContext, account_id: &str) -> BooksResult<()> {
        if self
            .accounts
            .write()
            .unwrap()
            .remove(&Self::key(org, account_id))
            .is_some()
        {
            Ok(())
        } else {
            Err(BooksError::AccountNotFound(account_id.to_string()))
        }
    }

    async fn save_entry(&mut self, org: &OrgContext, entry: &JournalEntry) -> BooksResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(Self::key(org, &entry.id), entry.clone());
        Ok(())
    }

    async fn get_entry(
        &self,
        org: &OrgContext,
        entry_id: &str,
    ) -> BooksResult<Option<JournalEntry>> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .get(&Self::key(org, entry_id))
            .cloned())
    }

    async fn get_account_entries(
        &self,
        org: &OrgContext,
        account_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>> {
        let entries = self.entries.read().unwrap();
        let filtered = entries
            .iter()
            .filter(|((org_id, _), _)| *org_id == org.org_id)
            .map(|(_, entry)| entry)
            .filter(|entry| {
                let touches_account = entry.lines.iter().any(|l| l.account_id == account_id);
                if !touches_account {
                    return false;
                }
                in_date_range(entry.date, start_date, end_date)
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn get_entries(
        &self,
        org: &OrgContext,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>> {
        let entries = self.entries.read().unwrap();
        let filtered = entries
            .iter()
            .filter(|((org_id, _), _)| *org_id == org.org_id)
            .map(|(_, entry)| entry)
            .filter(|entry| in_date_range(entry.date, start_date, end_date))
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn update_entry(&mut self, org: &OrgContext, entry: &JournalEntry) -> BooksResult<()> {
        let key = Self::key(org, &entry.id);
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(&key) {
            entries.insert(key, entry.clone());
            Ok(())
        } else {
            Err(BooksError::EntryNotFound(entry.id.clone()))
        }
    }

    async fn delete_entry(&mut self, org: &OrgContext, entry_id: &str) -> BooksResult<()> {
        if self
            .entries
            .write()
            .unwrap()
            .remove(&Self::key(org, entry_id))
            .is_some()
        {
            Ok(())
        } else {
            Err(BooksError::EntryNotFound(entry_id.to_string()))
        }
    }

    async fn get_account_balance(
        &self,
        org: &OrgContext,
        account_id: &str,
        as_of_date: Option<NaiveDate>,
    ) -> BooksResult<BigDecimal> {
        let account = self
            .get_account(org, account_id)
            .await?
            .ok_or_else(|| BooksError::AccountNotFound(account_id.to_string()))?;

        // Without a date the running balance is authoritative
        if as_of_date.is_none() {
            return Ok(account.balance);
        }

        let mut balance = BigDecimal::from(0);
        let entries = self
            .get_account_entries(org, account_id, None, as_of_date)
            .await?;

        for entry in entries {
            for line in entry.lines {
                if line.account_id == account_id {
                    match account.account_type.normal_side() {
                        Side::Debit => balance += &line.debit - &line.credit,
                        Side::Credit => balance += &line.credit - &line.debit,
                    }
                }
            }
        }

        Ok(balance)
    }

    async fn get_trial_balance(
        &self,
        org: &OrgContext,
        as_of_date: NaiveDate,
    ) -> BooksResult<TrialBalance> {
        let accounts = self.list_accounts(org, None).await?;
        let mut rows = HashMap::new();
        let mut total_debits = BigDecimal::from(0);
        let mut total_credits = BigDecimal::from(0);

        for account in accounts {
            let balance = self
                .get_account_balance(org, &account.id, Some(as_of_date))
                .await?;

            // A negative balance on the normal side lands in the opposite
            // column (accumulated depreciation is the usual case)
            let positive = balance >= BigDecimal::from(0);
            let row = match (account.account_type.normal_side(), positive) {
                (Side::Debit, true) | (Side::Credit, false) => {
                    total_debits += balance.abs();
                    TrialBalanceRow {
                        account,
                        debit: Some(balance.abs()),
                        credit: None,
                    }
                }
                (Side::Credit, true) | (Side::Debit, false) => {
                    total_credits += balance.abs();
                    TrialBalanceRow {
                        account,
                        debit: None,
                        credit: Some(balance.abs()),
                    }
                }
            };

            rows.insert(row.account.id.clone(), row);
        }

        let is_balanced = (&total_debits - &total_credits).abs() <= balance_tolerance();

        Ok(TrialBalance {
            as_of_date,
            rows,
            total_debits,
            total_credits,
            is_balanced,
        })
    }

    async fn save_asset(&mut self, org: &OrgContext, asset: &FixedAsset) -> BooksResult<()> {
        self.assets
            .write()
            .unwrap()
            .insert(Self::key(org, &asset.id), asset.clone());
        Ok(())
    }

    async fn get_asset(
        &self,
        org: &OrgContext,
        asset_id: &str,
    ) -> BooksResult<Option<FixedAsset>> {
        Ok(self
            .assets
            .read()
            .unwrap()
            .get(&Self::key(org, asset_id))
            .cloned())
    }

    async fn list_assets(&self, org: &OrgContext) -> BooksResult<Vec<FixedAsset>> {
        let assets = self.assets.read().unwrap();
        Ok(assets
            .iter()
            .filter(|((org_id, _), _)| *org_id == org.org_id)
            .map(|(_, asset)| asset.clone())
            .collect())
    }

    async fn update_asset(&mut self, org: &OrgContext, asset: &FixedAsset) -> BooksResult<()> {
        let key = Self::key(org, &asset.id);
        let mut assets = self.assets.write().unwrap();
        if assets.contains_key(&key) {
            assets.insert(key, asset.clone());
            Ok(())
        } else {
            Err(BooksError::Storage(format!(
                "asset not found: {}",
                asset.id
            )))
        }
    }
}

fn in_date_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}
