use crate::domain::{
    CreateWikiSpaceInput, DomainError, DomainResult, ListWikiSpacesPageInput, Page,
    UpdateWikiSpaceInput, WikiSpace, WikiSpaceRepository, WikiSpaceResourceType,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Default)]
struct SpaceTable {
    next_id: i64,
    spaces: BTreeMap<i64, WikiSpace>,
}

impl SpaceTable {
    fn find_by_name(
        &self,
        resource_id: i64,
        resource_type: WikiSpaceResourceType,
        name: &str,
    ) -> Option<&WikiSpace> {
        self.spaces.values().find(|space| {
            space.resource_id == resource_id
                && space.resource_type == resource_type
                && space.name == name
        })
    }

    fn insert(&mut self, input: CreateWikiSpaceInput) -> WikiSpace {
        self.next_id += 1;
        let now = Utc::now();
        let space = WikiSpace {
            id: self.next_id,
            resource_id: input.resource_id,
            resource_type: input.resource_type,
            name: input.name,
            icon: input.icon,
            path: input.path,
            status: input.status,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.spaces.insert(space.id, space.clone());
        space
    }
}

/// In-memory implementation of WikiSpaceRepository using a BTreeMap keyed by id
#[derive(Clone, Default)]
pub struct InMemoryWikiSpaceRepository {
    table: Arc<RwLock<SpaceTable>>,
}

impl InMemoryWikiSpaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WikiSpaceRepository for InMemoryWikiSpaceRepository {
    async fn get_wiki_space_list(
        &self,
        resource_id: i64,
        resource_type: WikiSpaceResourceType,
    ) -> DomainResult<Vec<WikiSpace>> {
        let table = self.table.read().await;
        Ok(table
            .spaces
            .values()
            .filter(|space| {
                space.resource_id == resource_id && space.resource_type == resource_type
            })
            .cloned()
            .collect())
    }

    async fn delete_space_by_id(&self, id: i64) -> DomainResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.spaces.remove(&id).is_some())
    }

    #[instrument(skip(self, input), fields(resource_id = input.resource_id, name = %input.name))]
    async fn insert(&self, input: CreateWikiSpaceInput) -> DomainResult<WikiSpace> {
        let mut table = self.table.write().await;
        if table
            .find_by_name(input.resource_id, input.resource_type, &input.name)
            .is_some()
        {
            return Err(DomainError::SpaceAlreadyExists(input.name));
        }

        let space = table.insert(input);
        debug!(space_id = space.id, "wiki space inserted");
        Ok(space)
    }

    #[instrument(skip(self, input), fields(resource_id = input.resource_id, name = %input.name))]
    async fn insert_if_not_exist(&self, input: CreateWikiSpaceInput) -> DomainResult<WikiSpace> {
        let mut table = self.table.write().await;
        if let Some(existing) =
            table.find_by_name(input.resource_id, input.resource_type, &input.name)
        {
            debug!(space_id = existing.id, "wiki space already present");
            return Ok(existing.clone());
        }

        Ok(table.insert(input))
    }

    async fn list_wiki_space_by_page(
        &self,
        input: ListWikiSpacesPageInput,
    ) -> DomainResult<Page<WikiSpace>> {
        let size = input.page_request.size;
        if size == 0 {
            return Err(DomainError::ValidationError(
                "page size must be greater than zero".to_string(),
            ));
        }

        let needle = input
            .search_param
            .as_deref()
            .map(str::trim)
            .filter(|param| !param.is_empty())
            .map(str::to_lowercase);

        let table = self.table.read().await;
        let matching: Vec<&WikiSpace> = table
            .spaces
            .values()
            .filter(|space| {
                space.resource_id == input.resource_id
                    && space.resource_type == input.resource_type
            })
            .filter(|space| match &needle {
                Some(needle) => space.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect();

        let total_elements = matching.len();
        // pages past the end, including ones whose offset overflows, are empty
        let offset = input
            .page_request
            .page
            .checked_mul(size)
            .unwrap_or(total_elements);
        let content = matching
            .into_iter()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();

        Ok(Page {
            content,
            page: input.page_request.page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        })
    }

    async fn select_by_id(&self, id: i64) -> DomainResult<Option<WikiSpace>> {
        let table = self.table.read().await;
        Ok(table.spaces.get(&id).cloned())
    }

    async fn check_name(
        &self,
        resource_id: i64,
        name: &str,
        resource_type: WikiSpaceResourceType,
    ) -> DomainResult<bool> {
        let table = self.table.read().await;
        Ok(table.find_by_name(resource_id, resource_type, name).is_none())
    }

    #[instrument(skip(self, input), fields(space_id = input.id))]
    async fn update(&self, input: UpdateWikiSpaceInput) -> DomainResult<WikiSpace> {
        let mut table = self.table.write().await;

        if let Some(name) = &input.name {
            let current = table
                .spaces
                .get(&input.id)
                .ok_or(DomainError::SpaceNotFound(input.id))?;
            if let Some(other) =
                table.find_by_name(current.resource_id, current.resource_type, name)
            {
                if other.id != input.id {
                    return Err(DomainError::SpaceAlreadyExists(name.clone()));
                }
            }
        }

        let space = table
            .spaces
            .get_mut(&input.id)
            .ok_or(DomainError::SpaceNotFound(input.id))?;

        if let Some(name) = input.name {
            space.name = name;
        }
        if let Some(icon) = input.icon {
            space.icon = Some(icon);
        }
        if let Some(status) = input.status {
            space.status = status;
        }
        space.updated_at = Some(Utc::now());

        debug!("wiki space updated");
        Ok(space.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageRequest, WikiSpaceStatus};

    fn space_input(resource_id: i64, name: &str) -> CreateWikiSpaceInput {
        CreateWikiSpaceInput {
            resource_id,
            resource_type: WikiSpaceResourceType::Organization,
            name: name.to_string(),
            icon: None,
            path: format!("O-{}", name),
            status: WikiSpaceStatus::Operating,
        }
    }

    fn page_input(
        resource_id: i64,
        page: usize,
        size: usize,
        search: Option<&str>,
    ) -> ListWikiSpacesPageInput {
        ListWikiSpacesPageInput {
            resource_id,
            resource_type: WikiSpaceResourceType::Organization,
            page_request: PageRequest { page, size },
            search_param: search.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_rejects_duplicate_names() {
        let repo = InMemoryWikiSpaceRepository::new();

        let first = repo.insert(space_input(1, "Handbook")).await.unwrap();
        let second = repo.insert(space_input(1, "Runbooks")).await.unwrap();
        assert_ne!(first.id, second.id);

        let duplicate = repo.insert(space_input(1, "Handbook")).await;
        assert!(matches!(duplicate, Err(DomainError::SpaceAlreadyExists(_))));

        // same name under another resource is fine
        assert!(repo.insert(space_input(2, "Handbook")).await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_if_not_exist_returns_existing() {
        let repo = InMemoryWikiSpaceRepository::new();

        let created = repo
            .insert_if_not_exist(space_input(1, "Handbook"))
            .await
            .unwrap();
        let again = repo
            .insert_if_not_exist(space_input(1, "Handbook"))
            .await
            .unwrap();

        assert_eq!(created.id, again.id);
        assert_eq!(
            repo.get_wiki_space_list(1, WikiSpaceResourceType::Organization)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_check_name() {
        let repo = InMemoryWikiSpaceRepository::new();
        repo.insert(space_input(1, "Handbook")).await.unwrap();

        assert!(
            !repo
                .check_name(1, "Handbook", WikiSpaceResourceType::Organization)
                .await
                .unwrap()
        );
        assert!(
            repo.check_name(1, "Handbook", WikiSpaceResourceType::Project)
                .await
                .unwrap()
        );
        assert!(
            repo.check_name(1, "Other", WikiSpaceResourceType::Organization)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_pagination_and_search() {
        let repo = InMemoryWikiSpaceRepository::new();
        for name in ["Alpha", "Beta", "Gamma", "alphabet", "Delta"] {
            repo.insert(space_input(1, name)).await.unwrap();
        }
        repo.insert(space_input(2, "Alpha")).await.unwrap();

        let first_page = repo
            .list_wiki_space_by_page(page_input(1, 0, 2, None))
            .await
            .unwrap();
        assert_eq!(first_page.total_elements, 5);
        assert_eq!(first_page.total_pages, 3);
        assert_eq!(first_page.content.len(), 2);
        assert_eq!(first_page.content[0].name, "Alpha");

        let last_page = repo
            .list_wiki_space_by_page(page_input(1, 2, 2, None))
            .await
            .unwrap();
        assert_eq!(last_page.content.len(), 1);
        assert_eq!(last_page.content[0].name, "Delta");

        let searched = repo
            .list_wiki_space_by_page(page_input(1, 0, 10, Some("ALPHA")))
            .await
            .unwrap();
        assert_eq!(searched.total_elements, 2);
    }

    #[tokio::test]
    async fn test_zero_page_size_rejected() {
        let repo = InMemoryWikiSpaceRepository::new();
        let result = repo
            .list_wiki_space_by_page(page_input(1, 0, 0, None))
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_page_beyond_range_is_empty() {
        let repo = InMemoryWikiSpaceRepository::new();
        repo.insert(space_input(1, "Handbook")).await.unwrap();

        let past_end = repo
            .list_wiki_space_by_page(page_input(1, 5, 2, None))
            .await
            .unwrap();
        assert!(past_end.content.is_empty());
        assert_eq!(past_end.total_elements, 1);

        let huge_page = usize::MAX / 2 + 1;
        let overflowing = repo
            .list_wiki_space_by_page(page_input(1, huge_page, 2, None))
            .await
            .unwrap();
        assert!(overflowing.content.is_empty());
        assert_eq!(overflowing.page, huge_page);
        assert_eq!(overflowing.total_elements, 1);
        assert_eq!(overflowing.total_pages, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryWikiSpaceRepository::new();
        let space = repo.insert(space_input(1, "Handbook")).await.unwrap();
        repo.insert(space_input(1, "Runbooks")).await.unwrap();

        let updated = repo
            .update(UpdateWikiSpaceInput {
                id: space.id,
                name: None,
                icon: Some("book".to_string()),
                status: Some(WikiSpaceStatus::Success),
            })
            .await
            .unwrap();
        assert_eq!(updated.icon.as_deref(), Some("book"));
        assert_eq!(updated.status, WikiSpaceStatus::Success);

        let rename_clash = repo
            .update(UpdateWikiSpaceInput {
                id: space.id,
                name: Some("Runbooks".to_string()),
                icon: None,
                status: None,
            })
            .await;
        assert!(matches!(rename_clash, Err(DomainError::SpaceAlreadyExists(_))));

        assert!(repo.delete_space_by_id(space.id).await.unwrap());
        assert!(!repo.delete_space_by_id(space.id).await.unwrap());
        assert!(repo.select_by_id(space.id).await.unwrap().is_none());

        let missing = repo
            .update(UpdateWikiSpaceInput {
                id: space.id,
                name: None,
                icon: None,
                status: None,
            })
            .await;
        assert!(matches!(missing, Err(DomainError::SpaceNotFound(_))));
    }
}
