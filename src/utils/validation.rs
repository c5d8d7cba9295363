//! Validation utilities

use crate::tax::GstSlab;
use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(amount: &BigDecimal) -> BooksResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(BooksError::Validation(
            "amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate an account id: non-empty, bounded, safe charset
pub fn validate_account_id(account_id: &str) -> BooksResult<()> {
    if account_id.trim().is_empty() {
        return Err(BooksError::Validation(
            "account id cannot be empty".to_string(),
        ));
    }

    if account_id.len() > 50 {
        return Err(BooksError::Validation(
            "account id cannot exceed 50 characters".to_string(),
        ));
    }

    if !account_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(BooksError::Validation(
            "account id can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate an account name
pub fn validate_account_name(name: &str) -> BooksResult<()> {
    if name.trim().is_empty() {
        return Err(BooksError::Validation(
            "account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(BooksError::Validation(
            "account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a journal entry narration
pub fn validate_narration(narration: &str) -> BooksResult<()> {
    if narration.trim().is_empty() {
        return Err(BooksError::Validation(
            "narration cannot be empty".to_string(),
        ));
    }

    if narration.len() > 500 {
        return Err(BooksError::Validation(
            "narration cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a payment does not exceed the balance due on a document
pub fn validate_within_balance_due(
    amount: &BigDecimal,
    balance_due: &BigDecimal,
) -> BooksResult<()> {
    if amount > balance_due {
        return Err(BooksError::Validation(format!(
            "amount {} exceeds balance due {}",
            amount, balance_due
        )));
    }
    Ok(())
}

/// Validate that a GST percentage is one of the standard slabs (0/5/12/18/28)
pub fn validate_gst_rate(rate: &BigDecimal) -> BooksResult<()> {
    if GstSlab::from_rate(rate).is_none() {
        return Err(BooksError::Validation(format!(
            "{} is not a standard GST rate",
            rate
        )));
    }
    Ok(())
}

/// Strict journal validator for user-entered entries
pub struct StrictJournalValidator;

impl JournalValidator for StrictJournalValidator {
    fn validate_entry(&self, entry: &JournalEntry) -> BooksResult<()> {
        entry.validate()?;

        validate_narration(&entry.narration)?;

        for line in &entry.lines {
            validate_account_id(&line.account_id)?;
        }

        // The same account must not appear twice on the same side
        let mut seen = std::collections::HashSet::new();
        let zero = BigDecimal::from(0);
        for line in &entry.lines {
            let side = if line.debit > zero {
                Side::Debit
            } else {
                Side::Credit
            };
            if !seen.insert((&line.account_id, side)) {
                return Err(BooksError::Validation(format!(
                    "account '{}' appears more than once on the same side",
                    line.account_id
                )));
            }
        }

        Ok(())
    }

    fn validate_account_references(&self, _entry: &JournalEntry) -> BooksResult<()> {
        // Existence is checked against storage by JournalManager
        Ok(())
    }
}

/// Strict account validator for user-entered accounts
pub struct StrictAccountValidator;

impl AccountValidator for StrictAccountValidator {
    fn validate_account(&self, account: &Account) -> BooksResult<()> {
        validate_account_id(&account.id)?;
        validate_account_name(&account.name)?;
        Ok(())
    }

    fn validate_account_deletion(&self, _account_id: &str) -> BooksResult<()> {
        Ok(())
    }
}
