//! Integration tests for garage-books

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use garage_books::{
    compute_totals, format_inr, patterns,
    utils::{MemoryStorage, StrictAccountValidator, StrictJournalValidator},
    AccountType, AssetStatus, Books, BooksStorage, DepreciationMethod, FixedAsset, GstSlab,
    JournalEntryBuilder, LineItem, OrgContext, ReconciliationSession, ServiceInvoiceParams,
    StatementTxn, TxnDirection, VendorBillParams,
};

fn d(v: i64) -> BigDecimal {
    BigDecimal::from(v)
}

fn date(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn complete_workshop_workflow() {
    let storage = MemoryStorage::new();
    let mut books = Books::new(storage, OrgContext::ephemeral());

    let accounts = books.setup_garage_chart().await.unwrap();
    assert!(accounts.contains_key("cash"));
    assert!(accounts.contains_key("service_revenue"));
    assert!(accounts.contains_key("gst_payable"));

    // Owner funds the workshop
    let seed = patterns::owner_contribution(
        "je-seed".into(),
        date(2025, 4, 1),
        "Opening capital".into(),
        accounts["cash"].id.clone(),
        accounts["owners_equity"].id.clone(),
        d(500000),
    )
    .unwrap();
    books.post_entry(seed).await.unwrap();

    assert_eq!(
        books
            .get_account_balance(&accounts["cash"].id, None)
            .await
            .unwrap(),
        d(500000)
    );

    // Invoice a service job: totals come straight from the GST calculator
    let items = vec![
        LineItem::with_slab("Motor service".into(), d(1), d(4000), GstSlab::Higher, false),
        LineItem::with_slab("Coolant".into(), d(2), d(500), GstSlab::Standard, false),
    ];
    let totals = compute_totals(&items);
    assert_eq!(totals.subtotal, d(5000));

    let invoice = patterns::service_invoice(ServiceInvoiceParams {
        id: "je-inv-001".into(),
        date: date(2025, 4, 5),
        narration: "Job card #118".into(),
        receivable_account_id: accounts["accounts_receivable"].id.clone(),
        revenue_account_id: accounts["service_revenue"].id.clone(),
        gst_payable_account_id: accounts["gst_payable"].id.clone(),
        base_amount: totals.subtotal.clone(),
        gst_amount: totals.total_tax(),
    })
    .unwrap();
    books.post_entry(invoice).await.unwrap();

    // 18% of 4000 + 12% of 1000 = 720 + 120
    assert_eq!(
        books
            .get_account_balance(&accounts["gst_payable"].id, None)
            .await
            .unwrap(),
        d(840)
    );
    assert_eq!(
        books
            .get_account_balance(&accounts["accounts_receivable"].id, None)
            .await
            .unwrap(),
        d(5840)
    );

    // Customer settles by bank transfer
    let payment = patterns::customer_payment(
        "je-pay-001".into(),
        date(2025, 4, 9),
        "UPI settlement for job card #118".into(),
        accounts["bank"].id.clone(),
        accounts["accounts_receivable"].id.clone(),
        d(5840),
    )
    .unwrap();
    books.post_entry(payment).await.unwrap();

    assert_eq!(
        books
            .get_account_balance(&accounts["accounts_receivable"].id, None)
            .await
            .unwrap(),
        d(0)
    );

    let trial_balance = books.trial_balance(date(2025, 4, 30)).await.unwrap();
    assert!(trial_balance.is_balanced);

    let report = books.check_integrity(date(2025, 4, 30)).await.unwrap();
    assert!(report.is_valid);
    assert_eq!(report.total_debits, report.total_credits);
}

#[tokio::test]
async fn vendor_bill_splits_expense_and_recoverable_gst() {
    let storage = MemoryStorage::new();
    let mut books = Books::new(storage, OrgContext::ephemeral());
    let accounts = books.setup_garage_chart().await.unwrap();

    let bill = patterns::vendor_bill(VendorBillParams {
        id: "je-bill-001".into(),
        date: date(2025, 4, 12),
        narration: "Consumables restock".into(),
        expense_account_id: accounts["consumables_expense"].id.clone(),
        gst_recoverable_account_id: accounts["gst_recoverable"].id.clone(),
        payable_account_id: accounts["accounts_payable"].id.clone(),
        base_amount: d(10000),
        gst_amount: d(1800),
    })
    .unwrap();
    books.post_entry(bill).await.unwrap();

    assert_eq!(
        books
            .get_account_balance(&accounts["consumables_expense"].id, None)
            .await
            .unwrap(),
        d(10000)
    );
    assert_eq!(
        books
            .get_account_balance(&accounts["gst_recoverable"].id, None)
            .await
            .unwrap(),
        d(1800)
    );
    assert_eq!(
        books
            .get_account_balance(&accounts["accounts_payable"].id, None)
            .await
            .unwrap(),
        d(11800)
    );
}

#[tokio::test]
async fn month_end_depreciation_keeps_the_books_balanced() {
    let storage = MemoryStorage::new();
    let org = OrgContext::ephemeral();
    let mut books = Books::new(storage.clone(), org);
    let accounts = books.setup_garage_chart().await.unwrap();

    // Equipment purchased with owner funds so the books start balanced
    let seed = patterns::owner_contribution(
        "je-seed".into(),
        date(2025, 1, 1),
        "Opening capital".into(),
        accounts["workshop_equipment"].id.clone(),
        accounts["owners_equity"].id.clone(),
        d(120000),
    )
    .unwrap();
    books.post_entry(seed).await.unwrap();

    let mut asset = FixedAsset::new(
        "lift-01".into(),
        "Two-post lift".into(),
        d(120000),
        d(0),
        5,
        DepreciationMethod::StraightLine,
        date(2025, 1, 1),
    )
    .unwrap();

    let mut storage_handle = storage.clone();
    storage_handle.save_asset(&org, &asset).await.unwrap();

    // Six months of auto-calculated postings
    for month in 1..=6u32 {
        let (entry, updated) = asset
            .record_depreciation(date(2025, month, 1), None)
            .unwrap();

        let posting = patterns::depreciation_posting(
            format!("je-dep-{month:02}"),
            date(2025, month, 28),
            format!("Depreciation for 2025-{month:02}"),
            accounts["depreciation_expense"].id.clone(),
            accounts["accumulated_depreciation"].id.clone(),
            entry.amount.clone(),
        )
        .unwrap();
        books.post_entry(posting).await.unwrap();

        storage_handle.update_asset(&org, &updated).await.unwrap();
        asset = updated;
    }

    assert_eq!(asset.accumulated_depreciation, d(12000));
    assert_eq!(asset.book_value(), d(108000));
    assert_eq!(asset.status, AssetStatus::Active);

    // The contra account carries a credit-side balance
    let trial_balance = books.trial_balance(date(2025, 6, 30)).await.unwrap();
    assert!(trial_balance.is_balanced);
    let contra_row = &trial_balance.rows[&accounts["accumulated_depreciation"].id];
    assert_eq!(contra_row.credit, Some(d(12000)));

    let stored = storage_handle.get_asset(&org, "lift-01").await.unwrap().unwrap();
    assert_eq!(stored.book_value(), d(108000));
}

#[tokio::test]
async fn bank_reconciliation_against_posted_balances() {
    let storage = MemoryStorage::new();
    let mut books = Books::new(storage, OrgContext::ephemeral());
    let accounts = books.setup_garage_chart().await.unwrap();

    let deposit = patterns::owner_contribution(
        "je-dep".into(),
        date(2025, 4, 1),
        "Bank deposit".into(),
        accounts["bank"].id.clone(),
        accounts["owners_equity"].id.clone(),
        d(50000),
    )
    .unwrap();
    books.post_entry(deposit).await.unwrap();

    let book_balance = books
        .get_account_balance(&accounts["bank"].id, None)
        .await
        .unwrap();

    // Statement shows one extra credit the books have not captured yet
    let mut session = ReconciliationSession::start(
        book_balance,
        d(50250),
        vec![
            StatementTxn::new("stmt-1".into(), d(50000), TxnDirection::Deposit),
            StatementTxn::new("stmt-2".into(), d(250), TxnDirection::Deposit),
        ],
    );

    assert!(session.mark_reconciled("stmt-1"));
    assert!(!session.mark_reconciled("stmt-1"));
    assert_eq!(session.unreconciled_count(), 1);

    let outcome = session.complete();
    assert!(!outcome.balanced);
    assert_eq!(outcome.difference, d(250));
    assert_eq!(outcome.unreconciled_count, 1);
}

#[tokio::test]
async fn strict_validators_reject_sloppy_entries() {
    let storage = MemoryStorage::new();
    let mut books = Books::with_validators(
        storage,
        OrgContext::ephemeral(),
        Box::new(StrictAccountValidator),
        Box::new(StrictJournalValidator),
    );

    books
        .create_account("cash".into(), "Cash".into(), AccountType::Asset, None)
        .await
        .unwrap();
    books
        .create_account(
            "service_revenue".into(),
            "Service Revenue".into(),
            AccountType::Income,
            None,
        )
        .await
        .unwrap();

    let valid = JournalEntryBuilder::new(
        "je-ok".into(),
        date(2025, 4, 1),
        "Cash sale".into(),
    )
    .debit("cash".into(), d(1000), None)
    .credit("service_revenue".into(), d(1000), None)
    .build()
    .unwrap();
    assert!(books.post_entry(valid).await.is_ok());

    // Builder itself refuses an unbalanced entry
    let unbalanced = JournalEntryBuilder::new(
        "je-bad".into(),
        date(2025, 4, 1),
        "Unbalanced".into(),
    )
    .debit("cash".into(), d(1000), None)
    .credit("service_revenue".into(), d(500), None)
    .build();
    assert!(unbalanced.is_err());
}

#[tokio::test]
async fn entries_filter_by_date_and_balances_respect_as_of() {
    let storage = MemoryStorage::new();
    let mut books = Books::new(storage, OrgContext::ephemeral());

    books
        .create_account("bank".into(), "Bank".into(), AccountType::Asset, None)
        .await
        .unwrap();
    books
        .create_account(
            "service_revenue".into(),
            "Service Revenue".into(),
            AccountType::Income,
            None,
        )
        .await
        .unwrap();

    for (id, month, amount) in [("je-apr", 4u32, 1000), ("je-may", 5u32, 2000)] {
        let entry = JournalEntryBuilder::new(
            id.to_string(),
            date(2025, month, 10),
            format!("Sale in month {month}"),
        )
        .debit("bank".into(), d(amount), None)
        .credit("service_revenue".into(), d(amount), None)
        .build()
        .unwrap();
        books.post_entry(entry).await.unwrap();
    }

    let april_entries = books
        .get_entries(Some(date(2025, 4, 1)), Some(date(2025, 4, 30)))
        .await
        .unwrap();
    assert_eq!(april_entries.len(), 1);
    assert_eq!(april_entries[0].id, "je-apr");

    assert_eq!(
        books
            .get_account_balance("bank", Some(date(2025, 4, 30)))
            .await
            .unwrap(),
        d(1000)
    );
    assert_eq!(
        books
            .get_account_balance("bank", Some(date(2025, 5, 31)))
            .await
            .unwrap(),
        d(3000)
    );
}

#[tokio::test]
async fn organizations_are_isolated_in_shared_storage() {
    let storage = MemoryStorage::new();
    let org_a = OrgContext::ephemeral();
    let org_b = OrgContext::ephemeral();

    let mut books_a = Books::new(storage.clone(), org_a);
    let mut books_b = Books::new(storage, org_b);

    books_a
        .create_account("cash".into(), "Cash".into(), AccountType::Asset, None)
        .await
        .unwrap();

    assert!(books_b.get_account("cash").await.unwrap().is_none());
    assert!(books_a.get_account("cash").await.unwrap().is_some());

    // Same id can exist independently per organization
    books_b
        .create_account("cash".into(), "Cash".into(), AccountType::Asset, None)
        .await
        .unwrap();
    assert_eq!(books_a.list_accounts().await.unwrap().len(), 1);
    assert_eq!(books_b.list_accounts().await.unwrap().len(), 1);
}

#[test]
fn invoice_math_and_display_formatting() {
    let items = vec![
        LineItem::with_slab("Labour".into(), d(3), d(800), GstSlab::Higher, false),
        LineItem::with_slab("Charger unit".into(), d(1), d(12000), GstSlab::Luxury, true),
    ];

    let totals = compute_totals(&items);
    assert_eq!(totals.subtotal, d(14400));
    assert_eq!(totals.cgst, totals.sgst);
    assert_eq!(totals.igst, d(3360));

    assert_eq!(format_inr(Some(&totals.subtotal)), "₹14,400.00");
    assert_eq!(format_inr(None), "₹0.00");
}

#[test]
fn wire_shapes_round_trip_through_json() {
    let asset = FixedAsset::new(
        "lift-01".into(),
        "Two-post lift".into(),
        d(120000),
        d(0),
        5,
        DepreciationMethod::StraightLine,
        date(2025, 1, 1),
    )
    .unwrap();

    let json = serde_json::to_string(&asset).unwrap();
    assert!(json.contains("\"accumulated_depreciation\""));
    assert!(json.contains("\"straight_line\""));

    let back: FixedAsset = serde_json::from_str(&json).unwrap();
    assert_eq!(back, asset);

    let txn = StatementTxn::new("stmt-1".into(), d(250), TxnDirection::Withdrawal);
    let value = serde_json::to_value(&txn).unwrap();
    assert_eq!(value["type"], "withdrawal");
}
