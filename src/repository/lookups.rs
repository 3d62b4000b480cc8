use async_trait::async_trait;

use crate::domain::lookup::{Lookup, LookupKind, NewLookup, UpdateLookup};
use crate::domain::types::{AcademyId, LookupId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{ListQuery, LookupReader, LookupWriter};

#[async_trait]
impl LookupReader for RestRepository {
    async fn get_lookup_by_id(
        &self,
        id: LookupId,
        kind: LookupKind,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<Lookup>> {
        let lookup = self
            .api()
            .get_one::<Lookup>(kind.resource(), id.get())
            .await?;
        Ok(lookup.filter(|l| l.academy_id == academy_id.get()))
    }

    async fn list_lookups(
        &self,
        kind: LookupKind,
        query: ListQuery,
    ) -> RepositoryResult<(usize, Vec<Lookup>)> {
        let params = base_params(&query);
        let page = self.api().get_page::<Lookup>(kind.resource(), &params).await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl LookupWriter for RestRepository {
    async fn create_lookup(&self, new_lookup: &NewLookup) -> RepositoryResult<Lookup> {
        self.api().post(new_lookup.kind.resource(), new_lookup).await
    }

    async fn update_lookup(
        &self,
        id: LookupId,
        kind: LookupKind,
        updates: &UpdateLookup,
    ) -> RepositoryResult<Lookup> {
        self.api().put(kind.resource(), id.get(), updates).await
    }

    async fn delete_lookup(&self, id: LookupId, kind: LookupKind) -> RepositoryResult<()> {
        self.api().delete(kind.resource(), id.get()).await
    }

    async fn restore_lookup(&self, id: LookupId, kind: LookupKind) -> RepositoryResult<()> {
        self.api().restore(kind.resource(), id.get()).await
    }
}
