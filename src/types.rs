//! Core types and data structures for the garage accounting system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Absolute tolerance for debit/credit equality checks.
///
/// All money in this crate is `BigDecimal`, so the crate itself never drifts;
/// the tolerance absorbs rounding already baked into figures imported from
/// upstream systems (bank feeds, migrated invoices).
pub fn balance_tolerance() -> BigDecimal {
    BigDecimal::from(1) / BigDecimal::from(100)
}

/// Account types following standard accounting principles
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// What the workshop owns (cash, bank, receivables, equipment)
    Asset,
    /// What the workshop owes (payables, GST payable, loans)
    Liability,
    /// Owner's interest in the business
    Equity,
    /// Money earned (service revenue, parts sales)
    Income,
    /// Costs incurred (rent, consumables, depreciation)
    Expense,
}

impl AccountType {
    /// The side on which this account type normally carries its balance.
    /// Assets and Expenses are debit-normal; the rest are credit-normal.
    pub fn normal_side(&self) -> Side {
        match self {
            AccountType::Asset | AccountType::Expense => Side::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Income => Side::Credit,
        }
    }
}

/// The two sides of a double-entry posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Debit,
    Credit,
}

/// An account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
    /// Optional parent for a hierarchical chart of accounts
    pub parent_id: Option<String>,
    /// Running balance on the account's normal side
    pub balance: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    pub fn new(
        id: String,
        name: String,
        account_type: AccountType,
        parent_id: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            name,
            account_type,
            parent_id,
            balance: BigDecimal::from(0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply one journal line to the running balance.
    ///
    /// A debit-normal account grows by `debit - credit`; a credit-normal
    /// account grows by `credit - debit`. Reversing a posting is the same
    /// call with the columns swapped.
    pub fn apply_line(&mut self, debit: &BigDecimal, credit: &BigDecimal) {
        match self.account_type.normal_side() {
            Side::Debit => self.balance += debit - credit,
            Side::Credit => self.balance += credit - debit,
        }
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// One line of a journal entry.
///
/// Both columns are present and non-negative in normal use; a line usually
/// carries a value in only one of them, but the data model does not force
/// that (imported documents sometimes carry both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_id: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JournalLine {
    /// A line debiting `account_id` by `amount`
    pub fn debit(account_id: String, amount: BigDecimal, description: Option<String>) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: BigDecimal::from(0),
            description,
        }
    }

    /// A line crediting `account_id` by `amount`
    pub fn credit(account_id: String, amount: BigDecimal, description: Option<String>) -> Self {
        Self {
            account_id,
            debit: BigDecimal::from(0),
            credit: amount,
            description,
        }
    }
}

/// Result of summing the debit and credit columns of a set of lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub balanced: bool,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    /// `total_debit - total_credit`, signed
    pub difference: BigDecimal,
}

/// Sum both columns and compare within [`balance_tolerance`].
///
/// Pure and total: an empty slice is balanced with zero totals. Account ids
/// are not inspected here; that is [`JournalEntry::validate`]'s concern.
pub fn check_balance(lines: &[JournalLine]) -> BalanceCheck {
    let total_debit: BigDecimal = lines.iter().map(|l| &l.debit).sum();
    let total_credit: BigDecimal = lines.iter().map(|l| &l.credit).sum();
    let difference = &total_debit - &total_credit;
    let balanced = difference.abs() <= balance_tolerance();
    BalanceCheck {
        balanced,
        total_debit,
        total_credit,
        difference,
    }
}

/// A complete journal entry with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub lines: Vec<JournalLine>,
    /// Human-readable narration shown in the day book
    pub narration: String,
    /// Optional document reference (invoice number, bill number)
    pub reference: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl JournalEntry {
    pub fn new(id: String, date: NaiveDate, narration: String, reference: Option<String>) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            date,
            lines: Vec::new(),
            narration,
            reference,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_line(&mut self, line: JournalLine) {
        self.lines.push(line);
        self.updated_at = chrono::Utc::now().naive_utc();
    }

    pub fn total_debits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.debit).sum()
    }

    pub fn total_credits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.credit).sum()
    }

    /// Column totals and balanced flag for this entry
    pub fn balance_check(&self) -> BalanceCheck {
        check_balance(&self.lines)
    }

    pub fn is_balanced(&self) -> bool {
        self.balance_check().balanced
    }

    /// Validate the entry for posting.
    ///
    /// Rejects entries with fewer than two lines, lines without an account,
    /// negative column values, and unbalanced columns. All failures come
    /// back as values; nothing panics.
    pub fn validate(&self) -> BooksResult<()> {
        if self.lines.len() < 2 {
            return Err(BooksError::InvalidEntry(
                "journal entry needs at least two lines for double entry".to_string(),
            ));
        }

        if self.lines.iter().any(|l| l.account_id.trim().is_empty()) {
            return Err(BooksError::Validation(
                "select an account for all lines".to_string(),
            ));
        }

        let zero = BigDecimal::from(0);
        for line in &self.lines {
            if line.debit < zero || line.credit < zero {
                return Err(BooksError::InvalidEntry(
                    "debit and credit amounts cannot be negative".to_string(),
                ));
            }
        }

        let check = self.balance_check();
        if !check.balanced {
            return Err(BooksError::InvalidEntry(format!(
                "entry is not balanced: debits = {}, credits = {}",
                check.total_debit, check.total_credit
            )));
        }

        Ok(())
    }
}

/// Trial balance: every account's closing balance in its debit or credit column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub as_of_date: NaiveDate,
    pub rows: HashMap<String, TrialBalanceRow>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    pub is_balanced: bool,
}

/// One account's row in a trial balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account: Account,
    pub debit: Option<BigDecimal>,
    pub credit: Option<BigDecimal>,
}

impl TrialBalanceRow {
    /// The row's amount regardless of which column holds it
    pub fn column_amount(&self) -> BigDecimal {
        self.debit
            .clone()
            .or_else(|| self.credit.clone())
            .unwrap_or_else(|| BigDecimal::from(0))
    }
}

/// Errors produced by the books
#[derive(Debug, thiserror::Error)]
pub enum BooksError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid journal entry: {0}")]
    InvalidEntry(String),
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("journal entry not found: {0}")]
    EntryNotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for book-keeping operations
pub type BooksResult<T> = Result<T, BooksError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> BigDecimal {
        BigDecimal::from(v)
    }

    #[test]
    fn check_balance_detects_balanced_and_unbalanced() {
        let balanced = check_balance(&[
            JournalLine::debit("cash".into(), d(100), None),
            JournalLine::credit("revenue".into(), d(100), None),
        ]);
        assert!(balanced.balanced);
        assert_eq!(balanced.difference, d(0));

        let off_by_one = check_balance(&[
            JournalLine::debit("cash".into(), d(100), None),
            JournalLine::credit("revenue".into(), d(99), None),
        ]);
        assert!(!off_by_one.balanced);
        assert_eq!(off_by_one.total_debit, d(100));
        assert_eq!(off_by_one.total_credit, d(99));
        assert_eq!(off_by_one.difference, d(1));
    }

    #[test]
    fn check_balance_tolerates_sub_paisa_drift() {
        let lines = [
            JournalLine::debit("cash".into(), d(100), None),
            JournalLine::credit(
                "revenue".into(),
                d(100) - BigDecimal::from(1) / BigDecimal::from(100),
                None,
            ),
        ];
        assert!(check_balance(&lines).balanced);
    }

    #[test]
    fn check_balance_on_empty_lines_is_balanced_zero() {
        let check = check_balance(&[]);
        assert!(check.balanced);
        assert_eq!(check.total_debit, d(0));
        assert_eq!(check.total_credit, d(0));
    }

    #[test]
    fn entry_validation_requires_accounts_on_every_line() {
        let mut entry = JournalEntry::new(
            "je1".into(),
            chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            "Missing account".into(),
            None,
        );
        entry.add_line(JournalLine::debit("cash".into(), d(500), None));
        entry.add_line(JournalLine::credit("  ".into(), d(500), None));

        let err = entry.validate().unwrap_err();
        assert!(matches!(err, BooksError::Validation(_)));
    }

    #[test]
    fn entry_validation_rejects_single_line_and_imbalance() {
        let mut entry = JournalEntry::new(
            "je2".into(),
            chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            "One-legged".into(),
            None,
        );
        entry.add_line(JournalLine::debit("cash".into(), d(500), None));
        assert!(entry.validate().is_err());

        entry.add_line(JournalLine::credit("revenue".into(), d(400), None));
        assert!(matches!(
            entry.validate().unwrap_err(),
            BooksError::InvalidEntry(_)
        ));
    }

    #[test]
    fn apply_line_moves_balances_along_normal_sides() {
        let mut cash = Account::new("cash".into(), "Cash".into(), AccountType::Asset, None);
        let mut revenue = Account::new(
            "revenue".into(),
            "Service Revenue".into(),
            AccountType::Income,
            None,
        );

        cash.apply_line(&d(1000), &d(0));
        revenue.apply_line(&d(0), &d(1000));
        assert_eq!(cash.balance, d(1000));
        assert_eq!(revenue.balance, d(1000));

        // reversal restores both
        cash.apply_line(&d(0), &d(1000));
        revenue.apply_line(&d(1000), &d(0));
        assert_eq!(cash.balance, d(0));
        assert_eq!(revenue.balance, d(0));
    }

    #[test]
    fn journal_line_wire_shape_uses_debit_credit_columns() {
        let line = JournalLine::debit("cash".into(), d(100), None);
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("account_id").is_some());
        assert!(json.get("debit").is_some());
        assert!(json.get("credit").is_some());
    }
}
