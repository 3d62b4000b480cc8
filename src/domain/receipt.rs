use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a financial receipt.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    /// Money received from a student.
    #[default]
    Payment,
    /// A service charge added to a student's balance.
    Charge,
    /// Money returned to a student.
    Refund,
}

impl Display for ReceiptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiptKind::Payment => write!(f, "payment"),
            ReceiptKind::Charge => write!(f, "charge"),
            ReceiptKind::Refund => write!(f, "refund"),
        }
    }
}

impl TryFrom<&str> for ReceiptKind {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "payment" => Ok(ReceiptKind::Payment),
            "charge" => Ok(ReceiptKind::Charge),
            "refund" => Ok(ReceiptKind::Refund),
            other => Err(format!("unknown receipt kind: {other}")),
        }
    }
}

/// A financial record of a student payment or service charge.
///
/// Receipts are never deleted; `delete` voids and `restore` unvoids them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Receipt {
    pub id: i32,
    pub academy_id: i32,
    pub number: String,
    pub student_id: i32,
    pub enrollment_id: Option<i32>,
    pub kind: ReceiptKind,
    pub amount_minor: i64,
    pub method: Option<String>,
    pub notes: Option<String>,
    pub voided: bool,
    pub issued_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewReceipt {
    pub academy_id: i32,
    pub number: String,
    pub student_id: i32,
    pub enrollment_id: Option<i32>,
    pub kind: ReceiptKind,
    pub amount_minor: i64,
    pub method: Option<String>,
    pub notes: Option<String>,
}

impl NewReceipt {
    /// Builds a receipt with a freshly generated receipt number.
    #[must_use]
    pub fn new(
        academy_id: i32,
        student_id: i32,
        enrollment_id: Option<i32>,
        kind: ReceiptKind,
        amount_minor: i64,
        method: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            academy_id,
            number: Uuid::new_v4().to_string(),
            student_id,
            enrollment_id,
            kind,
            amount_minor,
            method: method
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_kind_round_trip() {
        for kind in [ReceiptKind::Payment, ReceiptKind::Charge, ReceiptKind::Refund] {
            assert_eq!(ReceiptKind::try_from(kind.to_string().as_str()).unwrap(), kind);
        }
        assert!(ReceiptKind::try_from("iou").is_err());
    }

    #[test]
    fn test_new_receipt_generates_unique_numbers() {
        let a = NewReceipt::new(1, 2, None, ReceiptKind::Payment, 1000, None, None);
        let b = NewReceipt::new(1, 2, None, ReceiptKind::Payment, 1000, None, None);
        assert_ne!(a.number, b.number);
    }
}
