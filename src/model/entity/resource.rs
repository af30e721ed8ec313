use crate::generation::ResourceKind;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct LearningResource {
    id: Uuid,
    module_id: Uuid,
    title: String,
    url: String,
    source: String,
    #[sqlx(try_from = "String")]
    resource_type: ResourceKind,
    tag: String,
}

#[derive(Debug, Clone)]
pub struct LearningResourceCreate {
    pub module_id: Uuid,
    pub title: String,
    pub url: String,
    pub source: String,
    pub resource_type: ResourceKind,
    pub tag: String,
}

impl ResourceTyped for LearningResource {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Resource
    }
}

impl LearningResource {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn module_id(&self) -> Uuid {
        self.module_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn resource_type(&self) -> ResourceKind {
        self.resource_type
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Inserts a module's whole batch in one transaction.
    pub async fn create_many(
        mm: &ModelManager,
        items: Vec<LearningResourceCreate>,
    ) -> DatabaseResult<Vec<Self>> {
        let mut tx = mm.executor().begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for (position, data) in items.into_iter().enumerate() {
            let id = Uuid::new_v4();
            sqlx::query(
                "INSERT INTO learning_resources (id, module_id, title, url, source, resource_type, tag, position) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)",
            )
            .bind(id)
            .bind(data.module_id)
            .bind(&data.title)
            .bind(&data.url)
            .bind(&data.source)
            .bind(data.resource_type.as_str())
            .bind(&data.tag)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;

            created.push(LearningResource {
                id,
                module_id: data.module_id,
                title: data.title,
                url: data.url,
                source: data.source,
                resource_type: data.resource_type,
                tag: data.tag,
            });
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn list_for_module(
        mm: &ModelManager,
        module_id: Uuid,
        kind: Option<ResourceKind>,
    ) -> DatabaseResult<Vec<Self>> {
        let rows: Vec<Self> = sqlx::query_as(
            r#"
            SELECT id, module_id, title, url, source, resource_type, tag
            FROM learning_resources
            WHERE module_id = $1
            AND ($2::text IS NULL OR resource_type = $2)
            ORDER BY position
            "#,
        )
        .bind(module_id)
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}
