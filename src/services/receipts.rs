//! Services handling the financial receipts register.

use validator::Validate;

use crate::domain::receipt::ReceiptKind;
use crate::domain::types::{AcademyId, ReceiptId, StudentId};
use crate::dto::receipts::{ReceiptTotals, ReceiptsPageData, ReceiptsQuery};
use crate::forms::receipts::AddReceiptForm;
use crate::forms::{FormError, parse_date};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ReceiptListQuery, ReceiptReader, ReceiptWriter, StudentReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

fn build_query(academy_id: AcademyId, query: &ReceiptsQuery) -> ServiceResult<ReceiptListQuery> {
    let mut list_query = ReceiptListQuery::new(academy_id);

    if let Some(student_id) = query.student_id {
        list_query = list_query.student(StudentId::new(student_id)?);
    }
    if let Some(kind) = &query.kind {
        let kind = ReceiptKind::try_from(kind.as_str())
            .map_err(|e| ServiceError::Form(FormError::InvalidChoice(e).to_string()))?;
        list_query = list_query.kind(kind);
    }
    if let (Some(from), Some(to)) = (&query.issued_from, &query.issued_to) {
        list_query = list_query.issued_between(
            parse_date(from).map_err(ServiceError::from)?,
            parse_date(to).map_err(ServiceError::from)?,
        );
    }
    if let Some(term) = query
        .search
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        list_query = list_query.search(term);
    }

    Ok(list_query)
}

/// Loads one page of the receipts register plus totals over the whole
/// filtered set.
pub async fn load_receipts_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ReceiptsQuery,
) -> ServiceResult<ReceiptsPageData>
where
    R: ReceiptReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let page = query.page.unwrap_or(1);

    let list_query = build_query(academy_id, &query)?.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, receipts) = repo.list_receipts(list_query).await?;

    // A second unpaginated pass feeds the totals row.
    let (_, all_receipts) = repo.list_receipts(build_query(academy_id, &query)?).await?;
    let totals = ReceiptTotals::tally(&all_receipts);

    Ok(ReceiptsPageData {
        receipts: Paginated::from_total(receipts, page, total),
        totals,
        search_query: query.search.filter(|s| !s.trim().is_empty()),
    })
}

/// Issues a receipt after checking the student belongs to the academy.
pub async fn add_receipt<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddReceiptForm,
) -> ServiceResult<()>
where
    R: StudentReader + ReceiptWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let academy_id = AcademyId::new(user.academy_id)?;

    repo.get_student_by_id(StudentId::new(form.student_id)?, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let new_receipt = form.to_new_receipt(user.academy_id)?;

    repo.create_receipt(&new_receipt).await.map_err(|err| {
        log::error!("Failed to create receipt: {err}");
        err
    })?;

    Ok(())
}

/// Voids a receipt. Financial records are never hard-deleted.
pub async fn void_receipt<R>(
    repo: &R,
    user: &AuthenticatedUser,
    receipt_id: i32,
) -> ServiceResult<()>
where
    R: ReceiptReader + ReceiptWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let academy_id = AcademyId::new(user.academy_id)?;
    let receipt_id = ReceiptId::new(receipt_id)?;

    repo.get_receipt_by_id(receipt_id, academy_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    repo.void_receipt(receipt_id).await?;
    Ok(())
}

/// Unvoids a previously voided receipt.
pub async fn restore_receipt<R>(
    repo: &R,
    user: &AuthenticatedUser,
    receipt_id: i32,
) -> ServiceResult<()>
where
    R: ReceiptWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    repo.restore_receipt(ReceiptId::new(receipt_id)?).await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::receipt::Receipt;
    use crate::repository::mock::MockRepository;

    fn staff_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "staff@academy.example".to_string(),
            name: "Staff".to_string(),
            academy_id: 42,
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    #[actix_web::test]
    async fn totals_come_from_unpaginated_pass() {
        let mut repo = MockRepository::new();
        // Paginated pass for the table.
        repo.expect_list_receipts()
            .withf(|query| query.base.pagination.is_some())
            .times(1)
            .returning(|_| Ok((1, vec![])));
        // Unpaginated pass for the totals.
        repo.expect_list_receipts()
            .withf(|query| query.base.pagination.is_none())
            .times(1)
            .returning(|_| {
                Ok((
                    1,
                    vec![Receipt {
                        amount_minor: 500,
                        ..Receipt::default()
                    }],
                ))
            });

        let data = load_receipts_page(&repo, &staff_user(), ReceiptsQuery::default())
            .await
            .expect("should load");
        assert_eq!(data.totals.payments_minor, 500);
    }
}
