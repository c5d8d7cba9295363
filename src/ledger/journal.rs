//! Journal entry posting and management

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::traits::*;
use crate::types::*;

/// Parameters for posting a service invoice with GST
pub struct ServiceInvoiceParams {
    pub id: String,
    pub date: NaiveDate,
    pub narration: String,
    pub receivable_account_id: String,
    pub revenue_account_id: String,
    pub gst_payable_account_id: String,
    pub base_amount: BigDecimal,
    pub gst_amount: BigDecimal,
}

/// Parameters for posting a vendor bill with GST
pub struct VendorBillParams {
    pub id: String,
    pub date: NaiveDate,
    pub narration: String,
    pub expense_account_id: String,
    pub gst_recoverable_account_id: String,
    pub payable_account_id: String,
    pub base_amount: BigDecimal,
    pub gst_amount: BigDecimal,
}

/// Journal manager handling posting, updates, and reversals
pub struct JournalManager<S: BooksStorage> {
    storage: S,
    org: OrgContext,
    validator: Box<dyn JournalValidator>,
}

impl<S: BooksStorage> JournalManager<S> {
    pub fn new(storage: S, org: OrgContext) -> Self {
        Self {
            storage,
            org,
            validator: Box::new(DefaultJournalValidator),
        }
    }

    pub fn with_validator(storage: S, org: OrgContext, validator: Box<dyn JournalValidator>) -> Self {
        Self {
            storage,
            org,
            validator,
        }
    }

    /// Post a journal entry: validate, persist, and apply to account balances
    pub async fn post_entry(&mut self, mut entry: JournalEntry) -> BooksResult<()> {
        self.validator.validate_entry(&entry)?;
        self.validator.validate_account_references(&entry)?;

        for line in &entry.lines {
            if self.storage.get_account(&self.org, &line.account_id).await?.is_none() {
                return Err(BooksError::AccountNotFound(line.account_id.clone()));
            }
        }

        entry.updated_at = chrono::Utc::now().naive_utc();

        self.storage.save_entry(&self.org, &entry).await?;
        self.apply_lines(&entry).await
    }

    pub async fn get_entry(&self, entry_id: &str) -> BooksResult<Option<JournalEntry>> {
        self.storage.get_entry(&self.org, entry_id).await
    }

    pub async fn get_entry_required(&self, entry_id: &str) -> BooksResult<JournalEntry> {
        self.storage
            .get_entry(&self.org, entry_id)
            .await?
            .ok_or_else(|| BooksError::EntryNotFound(entry_id.to_string()))
    }

    pub async fn get_account_entries(
        &self,
        account_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>> {
        self.storage
            .get_account_entries(&self.org, account_id, start_date, end_date)
            .await
    }

    pub async fn get_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<JournalEntry>> {
        self.storage.get_entries(&self.org, start_date, end_date).await
    }

    /// Update a posted entry by reversing the old lines and applying the new
    pub async fn update_entry(&mut self, entry: &JournalEntry) -> BooksResult<()> {
        let old_entry = self.get_entry_required(&entry.id).await?;

        self.validator.validate_entry(entry)?;
        self.validator.validate_account_references(entry)?;

        self.reverse_lines(&old_entry).await?;
        self.apply_lines(entry).await?;

        self.storage.update_entry(&self.org, entry).await
    }

    /// Delete a posted entry, reversing its effect on account balances
    pub async fn delete_entry(&mut self, entry_id: &str) -> BooksResult<()> {
        let entry = self.get_entry_required(entry_id).await?;

        self.reverse_lines(&entry).await?;

        self.storage.delete_entry(&self.org, entry_id).await
    }

    async fn apply_lines(&mut self, entry: &JournalEntry) -> BooksResult<()> {
        for line in &entry.lines {
            if let Some(mut account) = self.storage.get_account(&self.org, &line.account_id).await? {
                account.apply_line(&line.debit, &line.credit);
                self.storage.update_account(&self.org, &account).await?;
            }
        }
        Ok(())
    }

    async fn reverse_lines(&mut self, entry: &JournalEntry) -> BooksResult<()> {
        // Reversal is the same posting with the columns swapped
        for line in &entry.lines {
            if let Some(mut account) = self.storage.get_account(&self.org, &line.account_id).await? {
                account.apply_line(&line.credit, &line.debit);
                self.storage.update_account(&self.org, &account).await?;
            }
        }
        Ok(())
    }
}

/// Builder for composing journal entries line by line
#[derive(Debug)]
pub struct JournalEntryBuilder {
    entry: JournalEntry,
}

impl JournalEntryBuilder {
    pub fn new(id: String, date: NaiveDate, narration: String) -> Self {
        Self {
            entry: JournalEntry::new(id, date, narration, None),
        }
    }

    /// Set the document reference (invoice number, bill number)
    pub fn reference(mut self, reference: String) -> Self {
        self.entry.reference = Some(reference);
        self
    }

    /// Add a debit line
    pub fn debit(
        mut self,
        account_id: String,
        amount: BigDecimal,
        description: Option<String>,
    ) -> Self {
        self.entry
            .add_line(JournalLine::debit(account_id, amount, description));
        self
    }

    /// Add a credit line
    pub fn credit(
        mut self,
        account_id: String,
        amount: BigDecimal,
        description: Option<String>,
    ) -> Self {
        self.entry
            .add_line(JournalLine::credit(account_id, amount, description));
        self
    }

    /// Add a raw line
    pub fn line(mut self, line: JournalLine) -> Self {
        self.entry.add_line(line);
        self
    }

    /// Validate and produce the entry
    pub fn build(self) -> BooksResult<JournalEntry> {
        self.entry.validate()?;
        Ok(self.entry)
    }
}

/// Common posting patterns for workshop documents
pub mod patterns {
    use super::*;

    /// Service invoice: debit receivables for the gross amount, credit
    /// revenue for the base and GST payable for the tax
    pub fn service_invoice(params: ServiceInvoiceParams) -> BooksResult<JournalEntry> {
        let gross = &params.base_amount + &params.gst_amount;

        JournalEntryBuilder::new(params.id, params.date, params.narration)
            .debit(
                params.receivable_account_id,
                gross,
                Some("Invoice total including GST".to_string()),
            )
            .credit(
                params.revenue_account_id,
                params.base_amount,
                Some("Service revenue".to_string()),
            )
            .credit(
                params.gst_payable_account_id,
                params.gst_amount,
                Some("GST payable".to_string()),
            )
            .build()
    }

    /// Vendor bill: debit the expense and recoverable GST, credit payables
    pub fn vendor_bill(params: VendorBillParams) -> BooksResult<JournalEntry> {
        let gross = &params.base_amount + &params.gst_amount;

        JournalEntryBuilder::new(params.id, params.date, params.narration)
            .debit(
                params.expense_account_id,
                params.base_amount,
                Some("Expense amount".to_string()),
            )
            .debit(
                params.gst_recoverable_account_id,
                params.gst_amount,
                Some("GST recoverable".to_string()),
            )
            .credit(
                params.payable_account_id,
                gross,
                Some("Bill total".to_string()),
            )
            .build()
    }

    /// Monthly depreciation: debit the expense head, credit the
    /// accumulated depreciation contra account
    pub fn depreciation_posting(
        id: String,
        date: NaiveDate,
        narration: String,
        depreciation_expense_account_id: String,
        accumulated_depreciation_account_id: String,
        amount: BigDecimal,
    ) -> BooksResult<JournalEntry> {
        JournalEntryBuilder::new(id, date, narration)
            .debit(depreciation_expense_account_id, amount.clone(), None)
            .credit(accumulated_depreciation_account_id, amount, None)
            .build()
    }

    /// Owner contribution: debit cash/bank, credit equity
    pub fn owner_contribution(
        id: String,
        date: NaiveDate,
        narration: String,
        cash_account_id: String,
        equity_account_id: String,
        amount: BigDecimal,
    ) -> BooksResult<JournalEntry> {
        JournalEntryBuilder::new(id, date, narration)
            .debit(
                cash_account_id,
                amount.clone(),
                Some("Cash introduced".to_string()),
            )
            .credit(
                equity_account_id,
                amount,
                Some("Owner's contribution".to_string()),
            )
            .build()
    }

    /// Customer payment against an invoice: debit bank, credit receivables
    pub fn customer_payment(
        id: String,
        date: NaiveDate,
        narration: String,
        bank_account_id: String,
        receivable_account_id: String,
        amount: BigDecimal,
    ) -> BooksResult<JournalEntry> {
        JournalEntryBuilder::new(id, date, narration)
            .debit(bank_account_id, amount.clone(), None)
            .credit(receivable_account_id, amount, None)
            .build()
    }
}
