use async_trait::async_trait;

use crate::domain::message::{
    Message, MessageTemplate, NewMessage, NewMessageTemplate, UpdateMessageTemplate,
};
use crate::domain::types::{AcademyId, TemplateId};
use crate::repository::errors::RepositoryResult;
use crate::repository::rest::{RestRepository, base_params};
use crate::repository::{ListQuery, MessageListQuery, MessageReader, MessageWriter};

const TEMPLATE_RESOURCE: &str = "message-templates";
const MESSAGE_RESOURCE: &str = "messages";

#[async_trait]
impl MessageReader for RestRepository {
    async fn get_template_by_id(
        &self,
        id: TemplateId,
        academy_id: AcademyId,
    ) -> RepositoryResult<Option<MessageTemplate>> {
        let template = self
            .api()
            .get_one::<MessageTemplate>(TEMPLATE_RESOURCE, id.get())
            .await?;
        Ok(template.filter(|t| t.academy_id == academy_id.get()))
    }

    async fn list_templates(
        &self,
        query: ListQuery,
    ) -> RepositoryResult<(usize, Vec<MessageTemplate>)> {
        let params = base_params(&query);
        let page = self
            .api()
            .get_page::<MessageTemplate>(TEMPLATE_RESOURCE, &params)
            .await?;
        Ok((page.total, page.data))
    }

    async fn list_messages(
        &self,
        query: MessageListQuery,
    ) -> RepositoryResult<(usize, Vec<Message>)> {
        let mut params = base_params(&query.base);
        if let Some(student_id) = query.student_id {
            params.push(("student_id".to_string(), student_id.get().to_string()));
        }

        let page = self
            .api()
            .get_page::<Message>(MESSAGE_RESOURCE, &params)
            .await?;
        Ok((page.total, page.data))
    }
}

#[async_trait]
impl MessageWriter for RestRepository {
    async fn create_template(
        &self,
        new_template: &NewMessageTemplate,
    ) -> RepositoryResult<MessageTemplate> {
        self.api().post(TEMPLATE_RESOURCE, new_template).await
    }

    async fn update_template(
        &self,
        id: TemplateId,
        updates: &UpdateMessageTemplate,
    ) -> RepositoryResult<MessageTemplate> {
        self.api().put(TEMPLATE_RESOURCE, id.get(), updates).await
    }

    async fn delete_template(&self, id: TemplateId) -> RepositoryResult<()> {
        self.api().delete(TEMPLATE_RESOURCE, id.get()).await
    }

    async fn restore_template(&self, id: TemplateId) -> RepositoryResult<()> {
        self.api().restore(TEMPLATE_RESOURCE, id.get()).await
    }

    async fn create_messages(&self, new_messages: &[NewMessage]) -> RepositoryResult<usize> {
        for new_message in new_messages {
            self.api()
                .post::<_, Message>(MESSAGE_RESOURCE, new_message)
                .await?;
        }
        Ok(new_messages.len())
    }
}
