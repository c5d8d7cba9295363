//! Invoice a service job and post it to the books

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use garage_books::utils::MemoryStorage;
use garage_books::{
    compute_totals, format_inr, patterns, Books, GstSlab, LineItem, OrgContext,
    ServiceInvoiceParams,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Garage Books - Service Invoice Example\n");

    let storage = MemoryStorage::new();
    let mut books = Books::new(storage, OrgContext::ephemeral());
    let accounts = books.setup_garage_chart().await?;

    // Build the invoice line items for a job card
    let items = vec![
        LineItem::with_slab(
            "Battery pack inspection".to_string(),
            BigDecimal::from(1),
            BigDecimal::from(2500),
            GstSlab::Higher,
            false,
        ),
        LineItem::with_slab(
            "Brake pads (pair)".to_string(),
            BigDecimal::from(2),
            BigDecimal::from(1200),
            GstSlab::Luxury,
            false,
        ),
    ];

    let totals = compute_totals(&items);
    println!("Invoice for job card #118:");
    for item in &items {
        println!(
            "  {} x{} @ {} = {}",
            item.description,
            item.quantity,
            format_inr(Some(&item.rate)),
            format_inr(Some(&item.amount()))
        );
    }
    println!("  Subtotal: {}", format_inr(Some(&totals.subtotal)));
    println!("  CGST:     {}", format_inr(Some(&totals.cgst)));
    println!("  SGST:     {}", format_inr(Some(&totals.sgst)));
    println!("  IGST:     {}", format_inr(Some(&totals.igst)));
    println!("  Total:    {}\n", format_inr(Some(&totals.total)));

    // Post it
    let invoice = patterns::service_invoice(ServiceInvoiceParams {
        id: "je-inv-118".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
        narration: "Job card #118".to_string(),
        receivable_account_id: accounts["accounts_receivable"].id.clone(),
        revenue_account_id: accounts["service_revenue"].id.clone(),
        gst_payable_account_id: accounts["gst_payable"].id.clone(),
        base_amount: totals.subtotal.clone(),
        gst_amount: totals.total_tax(),
    })?;
    books.post_entry(invoice).await?;

    let receivable = books
        .get_account_balance(&accounts["accounts_receivable"].id, None)
        .await?;
    let gst_payable = books
        .get_account_balance(&accounts["gst_payable"].id, None)
        .await?;

    println!("Posted. Receivable: {}", format_inr(Some(&receivable)));
    println!("GST payable:        {}", format_inr(Some(&gst_payable)));

    let trial_balance = books
        .trial_balance(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap())
        .await?;
    println!(
        "Trial balance: debits {} / credits {} (balanced: {})",
        format_inr(Some(&trial_balance.total_debits)),
        format_inr(Some(&trial_balance.total_credits)),
        trial_balance.is_balanced
    );

    Ok(())
}
