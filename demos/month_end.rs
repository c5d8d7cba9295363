//! Month-end close: depreciation postings and bank reconciliation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use garage_books::utils::MemoryStorage;
use garage_books::{
    format_inr, patterns, Books, DepreciationMethod, FixedAsset, OrgContext,
    ReconciliationSession, StatementTxn, TxnDirection,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Garage Books - Month End Example\n");

    let storage = MemoryStorage::new();
    let mut books = Books::new(storage, OrgContext::ephemeral());
    let accounts = books.setup_garage_chart().await?;

    // Fund the bank account so there is something to reconcile
    let seed = patterns::owner_contribution(
        "je-seed".to_string(),
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        "Opening capital".to_string(),
        accounts["bank"].id.clone(),
        accounts["owners_equity"].id.clone(),
        BigDecimal::from(300000),
    )?;
    books.post_entry(seed).await?;

    // Depreciate the two-post lift for April
    let lift = FixedAsset::new(
        "lift-01".to_string(),
        "Two-post lift".to_string(),
        BigDecimal::from(120000),
        BigDecimal::from(0),
        5,
        DepreciationMethod::StraightLine,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )?;

    let (entry, lift) =
        lift.record_depreciation(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), None)?;
    println!(
        "Depreciation for April: {} (book value now {})",
        format_inr(Some(&entry.amount)),
        format_inr(Some(&lift.book_value()))
    );

    let posting = patterns::depreciation_posting(
        "je-dep-04".to_string(),
        NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
        "Depreciation for 2025-04".to_string(),
        accounts["depreciation_expense"].id.clone(),
        accounts["accumulated_depreciation"].id.clone(),
        entry.amount.clone(),
    )?;
    books.post_entry(posting).await?;

    // Reconcile the bank account against the April statement
    let book_balance = books
        .get_account_balance(&accounts["bank"].id, None)
        .await?;

    let mut session = ReconciliationSession::start(
        book_balance.clone(),
        BigDecimal::from(300125),
        vec![
            StatementTxn::new(
                "stmt-1".to_string(),
                BigDecimal::from(300000),
                TxnDirection::Deposit,
            ),
            StatementTxn::new(
                "stmt-2".to_string(),
                BigDecimal::from(125),
                TxnDirection::Deposit,
            ),
        ],
    );

    session.mark_reconciled("stmt-1");
    println!(
        "\nReconciling bank: book {} vs statement {}",
        format_inr(Some(&book_balance)),
        format_inr(Some(&session.statement_balance))
    );
    println!("Unreconciled transactions: {}", session.unreconciled_count());

    let outcome = session.complete();
    println!(
        "Completed with difference {} (balanced: {})",
        format_inr(Some(&outcome.difference)),
        outcome.balanced
    );

    Ok(())
}
