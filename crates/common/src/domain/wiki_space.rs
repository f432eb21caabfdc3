use crate::domain::result::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Kind of platform resource a wiki space belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WikiSpaceResourceType {
    /// Home space of an organization
    Organization,
    /// Home space of a project
    Project,
    /// Additional space created under an organization
    OrganizationSpace,
    /// Additional space created under a project
    ProjectSpace,
}

impl WikiSpaceResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Project => "project",
            Self::OrganizationSpace => "organization-s",
            Self::ProjectSpace => "project-s",
        }
    }
}

/// Synchronization state of a space with the remote wiki
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WikiSpaceStatus {
    Operating,
    Success,
    Failed,
}

/// Wiki space metadata record
#[derive(Debug, Clone, PartialEq)]
pub struct WikiSpace {
    pub id: i64,
    pub resource_id: i64,
    pub resource_type: WikiSpaceResourceType,
    pub name: String,
    pub icon: Option<String>,
    pub path: String,
    pub status: WikiSpaceStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository input for creating a space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWikiSpaceInput {
    pub resource_id: i64,
    pub resource_type: WikiSpaceResourceType,
    pub name: String,
    pub icon: Option<String>,
    pub path: String,
    pub status: WikiSpaceStatus,
}

/// Repository input for updating a space; `None` leaves a field unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateWikiSpaceInput {
    pub id: i64,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub status: Option<WikiSpaceStatus>,
}

/// Zero-based page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

/// Repository input for paging through a resource's spaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWikiSpacesPageInput {
    pub resource_id: i64,
    pub resource_type: WikiSpaceResourceType,
    pub page_request: PageRequest,
    /// Case-insensitive substring match on the space name
    pub search_param: Option<String>,
}

/// Repository trait for wiki space metadata
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait WikiSpaceRepository: Send + Sync {
    /// All spaces of a resource
    async fn get_wiki_space_list(
        &self,
        resource_id: i64,
        resource_type: WikiSpaceResourceType,
    ) -> DomainResult<Vec<WikiSpace>>;

    /// Delete a space, returning whether it existed
    async fn delete_space_by_id(&self, id: i64) -> DomainResult<bool>;

    /// Insert a space; fails if the resource already has a space with that name
    async fn insert(&self, input: CreateWikiSpaceInput) -> DomainResult<WikiSpace>;

    /// Insert a space, or return the existing one with the same resource and name
    async fn insert_if_not_exist(&self, input: CreateWikiSpaceInput) -> DomainResult<WikiSpace>;

    /// Page through a resource's spaces, ordered by id
    async fn list_wiki_space_by_page(
        &self,
        input: ListWikiSpacesPageInput,
    ) -> DomainResult<Page<WikiSpace>>;

    /// Get a space by ID
    async fn select_by_id(&self, id: i64) -> DomainResult<Option<WikiSpace>>;

    /// Whether `name` is still free for the resource
    async fn check_name(
        &self,
        resource_id: i64,
        name: &str,
        resource_type: WikiSpaceResourceType,
    ) -> DomainResult<bool>;

    /// Update a space's mutable fields
    async fn update(&self, input: UpdateWikiSpaceInput) -> DomainResult<WikiSpace>;
}
