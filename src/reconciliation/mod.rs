//! Bank reconciliation sessions
//!
//! A session compares the book balance of a bank account against the bank
//! statement balance while the accountant ticks off statement transactions.
//! Completion is deliberately lenient: a session may be completed with a
//! nonzero difference (manual override), and the returned outcome carries the
//! discrepancy so the caller can warn or record it.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::balance_tolerance;

/// Direction of a bank statement transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxnDirection {
    Deposit,
    Withdrawal,
}

/// One transaction from the bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTxn {
    pub id: String,
    pub amount: BigDecimal,
    #[serde(rename = "type")]
    pub direction: TxnDirection,
    pub reconciled: bool,
}

impl StatementTxn {
    pub fn new(id: String, amount: BigDecimal, direction: TxnDirection) -> Self {
        Self {
            id,
            amount,
            direction,
            reconciled: false,
        }
    }
}

/// Lifecycle state of a reconciliation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

/// An in-progress or completed reconciliation of one bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSession {
    pub id: Uuid,
    pub book_balance: BigDecimal,
    pub statement_balance: BigDecimal,
    pub transactions: Vec<StatementTxn>,
    pub status: SessionStatus,
    pub started_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

/// Result of completing a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// `statement_balance - book_balance` at completion, signed
    pub difference: BigDecimal,
    /// Whether the difference was within tolerance
    pub balanced: bool,
    /// Statement transactions still unmatched at completion
    pub unreconciled_count: usize,
}

impl ReconciliationSession {
    /// Start a reconciliation over a statement's transactions
    pub fn start(
        book_balance: BigDecimal,
        statement_balance: BigDecimal,
        transactions: Vec<StatementTxn>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_balance,
            statement_balance,
            transactions,
            status: SessionStatus::InProgress,
            started_at: chrono::Utc::now().naive_utc(),
            completed_at: None,
        }
    }

    /// `statement_balance - book_balance`, signed
    pub fn difference(&self) -> BigDecimal {
        &self.statement_balance - &self.book_balance
    }

    /// Transactions not yet ticked off
    pub fn unreconciled(&self) -> Vec<&StatementTxn> {
        self.transactions.iter().filter(|t| !t.reconciled).collect()
    }

    pub fn unreconciled_count(&self) -> usize {
        self.transactions.iter().filter(|t| !t.reconciled).count()
    }

    pub fn is_fully_reconciled(&self) -> bool {
        self.unreconciled_count() == 0
    }

    /// Tick off one statement transaction.
    ///
    /// Idempotent: marking an already-reconciled or unknown id changes
    /// nothing. Returns whether the call changed anything.
    pub fn mark_reconciled(&mut self, txn_id: &str) -> bool {
        match self
            .transactions
            .iter_mut()
            .find(|t| t.id == txn_id && !t.reconciled)
        {
            Some(txn) => {
                txn.reconciled = true;
                true
            }
            None => false,
        }
    }

    /// Finalize the session.
    ///
    /// Never fails on a nonzero difference; the outcome reports it instead.
    pub fn complete(&mut self) -> ReconciliationOutcome {
        self.status = SessionStatus::Completed;
        self.completed_at = Some(chrono::Utc::now().naive_utc());

        let difference = self.difference();
        ReconciliationOutcome {
            balanced: difference.abs() <= balance_tolerance(),
            difference,
            unreconciled_count: self.unreconciled_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> BigDecimal {
        BigDecimal::from(v)
    }

    fn session() -> ReconciliationSession {
        ReconciliationSession::start(
            d(10000),
            d(10500),
            vec![
                StatementTxn::new("t1".into(), d(500), TxnDirection::Deposit),
                StatementTxn::new("t2".into(), d(200), TxnDirection::Withdrawal),
            ],
        )
    }

    #[test]
    fn difference_is_statement_minus_book() {
        assert_eq!(session().difference(), d(500));
    }

    #[test]
    fn mark_reconciled_is_idempotent() {
        let mut once = session();
        once.mark_reconciled("t1");

        let mut twice = session();
        twice.id = once.id;
        twice.started_at = once.started_at;
        assert!(twice.mark_reconciled("t1"));
        assert!(!twice.mark_reconciled("t1"));

        assert_eq!(once.transactions, twice.transactions);
        assert_eq!(once.unreconciled_count(), 1);
    }

    #[test]
    fn marking_unknown_id_is_a_no_op() {
        let mut s = session();
        assert!(!s.mark_reconciled("ghost"));
        assert_eq!(s.unreconciled_count(), 2);
    }

    #[test]
    fn lenient_completion_reports_discrepancy() {
        let mut s = session();
        s.mark_reconciled("t1");

        let outcome = s.complete();
        assert_eq!(s.status, SessionStatus::Completed);
        assert!(s.completed_at.is_some());
        assert!(!outcome.balanced);
        assert_eq!(outcome.difference, d(500));
        assert_eq!(outcome.unreconciled_count, 1);
    }

    #[test]
    fn matched_session_completes_balanced() {
        let mut s = ReconciliationSession::start(
            d(10000),
            d(10000),
            vec![StatementTxn::new("t1".into(), d(300), TxnDirection::Deposit)],
        );
        s.mark_reconciled("t1");

        let outcome = s.complete();
        assert!(outcome.balanced);
        assert_eq!(outcome.unreconciled_count, 0);
        assert!(s.is_fully_reconciled());
    }

    #[test]
    fn statement_txn_wire_shape_uses_type_field() {
        let txn = StatementTxn::new("t1".into(), d(500), TxnDirection::Deposit);
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(
            json.get("type"),
            Some(&serde_json::Value::String("deposit".into()))
        );
        assert_eq!(json.get("reconciled"), Some(&serde_json::Value::Bool(false)));
    }
}
