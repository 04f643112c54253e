//! Resources service
//!
//! Bookmarked learning resources with free-form tags. Opening a
//! resource goes through `touch`, which stamps `last_accessed`.

use crate::config::collections;
use crate::error::Result;
use crate::models::{NewResource, Resource, ResourceType};
use crate::store::Store;
use chrono::Utc;

#[derive(Clone)]
pub struct ResourcesService {
    store: Store,
}

impl ResourcesService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn add_resource(&self, new: NewResource) -> Result<Resource> {
        new.validate()?;

        let id = self.store.next_id(collections::RESOURCES).await?;
        let resource = Resource {
            id,
            title: new.title.clone(),
            kind: new.kind,
            url: new.url.clone(),
            description: new.description.clone(),
            tags: new.normalized_tags(),
            date_added: Utc::now(),
            last_accessed: None,
        };

        let stored = resource.clone();
        self.store
            .mutate::<Resource, _, _>(collections::RESOURCES, move |resources| {
                resources.push(stored)
            })
            .await?;

        tracing::info!("Created resource {}: {}", resource.id, resource.title);
        Ok(resource)
    }

    /// Replace a resource, keyed by id; `date_added` and
    /// `last_accessed` survive the edit. Unknown ids are a silent no-op.
    pub async fn update_resource(&self, id: u64, new: NewResource) -> Result<Option<Resource>> {
        new.validate()?;

        let tags = new.normalized_tags();
        self.store
            .mutate::<Resource, _, _>(collections::RESOURCES, move |resources| {
                let resource = resources.iter_mut().find(|r| r.id == id)?;
                resource.title = new.title;
                resource.kind = new.kind;
                resource.url = new.url;
                resource.description = new.description;
                resource.tags = tags;
                Some(resource.clone())
            })
            .await
    }

    pub async fn delete_resource(&self, id: u64) -> Result<()> {
        self.store
            .mutate::<Resource, _, _>(collections::RESOURCES, move |resources| {
                resources.retain(|r| r.id != id);
            })
            .await?;

        tracing::info!("Deleted resource {}", id);
        Ok(())
    }

    /// All resources, optionally narrowed to one type.
    pub async fn list_resources(&self, kind: Option<ResourceType>) -> Result<Vec<Resource>> {
        let resources: Vec<Resource> = self.store.load_or_default(collections::RESOURCES).await?;
        Ok(match kind {
            None => resources,
            Some(k) => resources.into_iter().filter(|r| r.kind == k).collect(),
        })
    }

    /// Stamp a resource as accessed now. Unknown ids are a silent no-op.
    pub async fn touch(&self, id: u64) -> Result<Option<Resource>> {
        self.store
            .mutate::<Resource, _, _>(collections::RESOURCES, move |resources| {
                let resource = resources.iter_mut().find(|r| r.id == id)?;
                resource.last_accessed = Some(Utc::now());
                Some(resource.clone())
            })
            .await
    }
}
