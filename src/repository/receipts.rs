use async_trait::async_trait;

use crate::domain::receipt::{NewReceipt, Receipt};
use crate::domain::types::{AcademyId, ReceiptId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{ReceiptListQuery, ReceiptReader, ReceiptWriter};

const RESOURCE: &str = "receipts";

#[async_trait]
impl ReceiptReader for RestRepository {
    async fn get_receipt_by_id(
        &self,
        id: ReceiptId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Receipt>> {
        let receipt = self.api().get_one::<Receipt>(RESOURCE, id.get()).await?;
        Ok(receipt.filter(|r| r.academy_id == academy_id.get()))
    }

    async fn list_receipts(
        &self,
        query: ReceiptListQuery,
    ) -> RepositoryResult<(usize, Vec<Receipt>)> {
        let mut params = base_params(&query.base);
        if let Some(student_id) = query.student_id {
            params.push(("student_id".to_string(), student_id.get().to_string()));
        }
        if let Some(kind) = query.kind {
            params.push(("kind".to_string(), kind.to_string()));
        }
        if let Some(from) = query.issued_from {
            params.push((
                "issued_from".to_string(),
                from.format("%Y-%m-%d").to_string(),
            ));
        }
        if let Some(to) = query.issued_to {
            params.push(("issued_to".to_string(), to.format("%Y-%m-%d").to_string()));
        }

        let page = self.api().get_page::<Receipt>(RESOURCE, &params).await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl ReceiptWriter for RestRepository {
    async fn create_receipt(&self, new_receipt: &NewReceipt) -> RepositoryResult<Receipt> {
        self.api().post(RESOURCE, new_receipt).await
    }

    // Receipts are financial records: deletion voids, restore unvoids.
    async fn void_receipt(&self, id: ReceiptId) -> RepositoryResult<()> {
        self.api().delete(RESOURCE, id.get()).await
    }

    async fn restore_receipt(&self, id: ReceiptId) -> RepositoryResult<()> {
        self.api().restore(RESOURCE, id.get()).await
    }
}
