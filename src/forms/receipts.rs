use serde::Deserialize;
use validator::Validate;

use crate::domain::receipt::{NewReceipt, ReceiptKind};
use crate::forms::{FormError, none_if_blank, optional_id};

#[derive(Deserialize, Validate)]
/// Form data for issuing a receipt.
pub struct AddReceiptForm {
    pub student_id: i32,
    pub enrollment_id: Option<i32>,
    pub kind: String,
    #[validate(range(min = 1))]
    pub amount_minor: i64,
    pub method: Option<String>,
    pub notes: Option<String>,
}

impl AddReceiptForm {
    pub fn to_new_receipt(&self, academy_id: i32) -> Result<NewReceipt, FormError> {
        let kind = ReceiptKind::try_from(self.kind.as_str()).map_err(FormError::InvalidChoice)?;

        Ok(NewReceipt::new(
            academy_id,
            self.student_id,
            optional_id(self.enrollment_id),
            kind,
            self.amount_minor,
            none_if_blank(self.method.clone()),
            none_if_blank(self.notes.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_new_receipt_parses_kind() {
        let form = AddReceiptForm {
            student_id: 3,
            enrollment_id: Some(8),
            kind: "payment".to_string(),
            amount_minor: 50_000,
            method: Some(" cash ".to_string()),
            notes: None,
        };

        let receipt = form.to_new_receipt(1).unwrap();
        assert_eq!(receipt.kind, ReceiptKind::Payment);
        assert_eq!(receipt.method.as_deref(), Some("cash"));
        assert!(!receipt.number.is_empty());
    }

    #[test]
    fn test_to_new_receipt_rejects_unknown_kind() {
        let form = AddReceiptForm {
            student_id: 3,
            enrollment_id: None,
            kind: "loan".to_string(),
            amount_minor: 100,
            method: None,
            notes: None,
        };

        assert!(matches!(
            form.to_new_receipt(1),
            Err(FormError::InvalidChoice(_))
        ));
    }
}
