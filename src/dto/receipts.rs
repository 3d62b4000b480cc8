use crate::domain::receipt::{Receipt, ReceiptKind};
use crate::pagination::Paginated;

/// Query parameters accepted by the receipts register.
#[derive(Debug, Default)]
pub struct ReceiptsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub student_id: Option<i32>,
    pub kind: Option<String>,
    pub issued_from: Option<String>,
    pub issued_to: Option<String>,
}

/// Totals over the filtered receipt set, voided receipts excluded.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReceiptTotals {
    pub payments_minor: i64,
    pub charges_minor: i64,
    pub refunds_minor: i64,
}

impl ReceiptTotals {
    /// Accumulates receipt amounts by kind.
    pub fn tally<'a>(receipts: impl IntoIterator<Item = &'a Receipt>) -> Self {
        let mut totals = Self::default();
        for receipt in receipts {
            if receipt.voided {
                continue;
            }
            match receipt.kind {
                ReceiptKind::Payment => totals.payments_minor += receipt.amount_minor,
                ReceiptKind::Charge => totals.charges_minor += receipt.amount_minor,
                ReceiptKind::Refund => totals.refunds_minor += receipt.amount_minor,
            }
        }
        totals
    }
}

/// Data required to render the receipts register.
pub struct ReceiptsPageData {
    pub receipts: Paginated<Receipt>,
    pub totals: ReceiptTotals,
    pub search_query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(kind: ReceiptKind, amount: i64, voided: bool) -> Receipt {
        Receipt {
            kind,
            amount_minor: amount,
            voided,
            ..Receipt::default()
        }
    }

    #[test]
    fn test_tally_groups_by_kind_and_skips_voided() {
        let receipts = vec![
            receipt(ReceiptKind::Payment, 100, false),
            receipt(ReceiptKind::Payment, 50, false),
            receipt(ReceiptKind::Charge, 30, false),
            receipt(ReceiptKind::Refund, 20, false),
            receipt(ReceiptKind::Payment, 999, true),
        ];

        let totals = ReceiptTotals::tally(&receipts);
        assert_eq!(
            totals,
            ReceiptTotals {
                payments_minor: 150,
                charges_minor: 30,
                refunds_minor: 20,
            }
        );
    }
}
