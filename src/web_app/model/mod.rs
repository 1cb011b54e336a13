// web_app/model/mod.rs - Shared data models for client and server
//
// These structs are used throughout the application for type-safe
// communication between frontend and backend: the role/group/user
// entities, the audit rows shown on the role audit page, and the request
// shapes the list pages send to the server functions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::web_app::state::{SortColumn, SortDirection, ViewState};

/// Kind of group a membership points at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    #[default]
    OktaGroup,
    RoleGroup,
    AppGroup,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::OktaGroup => "okta_group",
            GroupType::RoleGroup => "role_group",
            GroupType::AppGroup => "app_group",
        }
    }

    /// Lenient parse used when reading the `type` column.
    pub fn from_db(value: &str) -> Self {
        match value {
            "role_group" => GroupType::RoleGroup,
            "app_group" => GroupType::AppGroup,
            _ => GroupType::OktaGroup,
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupType::OktaGroup => write!(f, "Group"),
            GroupType::RoleGroup => write!(f, "Role"),
            GroupType::AppGroup => write!(f, "App Group"),
        }
    }
}

/// A role: a group whose members are themselves groups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleGroup {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RoleGroup {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A group that holds (or held) a role
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub group_type: GroupType,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Group {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// The actor who created or ended a membership
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Display name, falling back to "first last".
    pub fn name(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("{} {}", self.first_name, self.last_name).trim().to_string(),
        }
    }
}

/// One row of a role's membership audit history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleMembership {
    pub id: String,
    pub role_group_id: String,
    pub group: Option<Group>,
    pub is_owner: bool,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_actor: Option<User>,
    pub ended_actor: Option<User>,
    pub created_reason: String,
}

impl RoleMembership {
    /// Active when it never ends or ends in the future.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.ended_at {
            None => true,
            Some(ended_at) => now < ended_at,
        }
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        !self.is_active(now)
    }

    /// The actor who removed the membership, only once it has actually ended.
    pub fn removed_by(&self, now: DateTime<Utc>) -> Option<&User> {
        if self.has_ended(now) {
            self.ended_actor.as_ref()
        } else {
            None
        }
    }

    pub fn role_label(&self) -> &'static str {
        if self.is_owner {
            "Owner"
        } else {
            "Member"
        }
    }
}

/// One page of a paginated server response
///
/// `total` is the full server-side match count, independent of page size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    pub results: Vec<T>,
    pub total: u64,
}

impl<T> ResultPage<T> {
    pub fn empty() -> Self {
        ResultPage {
            results: Vec::new(),
            total: 0,
        }
    }

    /// The only result, when the server reports exactly one match.
    pub fn single(&self) -> Option<&T> {
        if self.total == 1 {
            self.results.first()
        } else {
            None
        }
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sortable columns of the role list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleOrderBy {
    #[default]
    Name,
    CreatedAt,
}

impl SortColumn for RoleOrderBy {
    const ALL: &'static [Self] = &[RoleOrderBy::Name, RoleOrderBy::CreatedAt];

    fn as_param(&self) -> &'static str {
        match self {
            RoleOrderBy::Name => "name",
            RoleOrderBy::CreatedAt => "created_at",
        }
    }
}

/// Sortable columns of the role audit table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOrderBy {
    /// Member group name
    Moniker,
    #[default]
    CreatedAt,
    EndedAt,
}

impl SortColumn for AuditOrderBy {
    const ALL: &'static [Self] = &[
        AuditOrderBy::Moniker,
        AuditOrderBy::CreatedAt,
        AuditOrderBy::EndedAt,
    ];

    fn as_param(&self) -> &'static str {
        match self {
            AuditOrderBy::Moniker => "moniker",
            AuditOrderBy::CreatedAt => "created_at",
            AuditOrderBy::EndedAt => "ended_at",
        }
    }
}

impl AuditOrderBy {
    /// Column header text
    pub fn label(&self) -> &'static str {
        match self {
            AuditOrderBy::Moniker => "Group Name",
            AuditOrderBy::CreatedAt => "Started",
            AuditOrderBy::EndedAt => "Ending",
        }
    }
}

/// Request for one page of the role list
///
/// Unset optionals are left out of the serialized request entirely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleListQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<RoleOrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_desc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl RoleListQuery {
    pub fn from_view(view: &ViewState<RoleOrderBy>) -> Self {
        RoleListQuery {
            page: view.page_index,
            per_page: view.page_size.get(),
            order_by: Some(view.sort_field),
            order_desc: Some(view.sort_direction == SortDirection::Descending),
            q: view.search_query.clone(),
        }
    }
}

impl From<SuggestionQuery> for RoleListQuery {
    fn from(query: SuggestionQuery) -> Self {
        RoleListQuery {
            page: query.page,
            per_page: query.per_page,
            order_by: Some(RoleOrderBy::Name),
            order_desc: Some(false),
            q: Some(query.q),
        }
    }
}

/// Request for one page of a role's membership audit
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleAuditQuery {
    pub role_id: String,
    pub page: u32,
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<AuditOrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_desc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,
}

impl RoleAuditQuery {
    pub fn from_view(role_id: &str, view: &ViewState<AuditOrderBy>) -> Self {
        RoleAuditQuery {
            role_id: role_id.to_string(),
            page: view.page_index,
            per_page: view.page_size.get(),
            order_by: Some(view.sort_field),
            order_desc: Some(view.sort_direction == SortDirection::Descending),
            q: view.search_query.clone(),
            active: view.facets.active,
            owner: view.facets.owner,
        }
    }
}

/// Autocomplete lookup: always the first page of a small fixed size
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionQuery {
    pub page: u32,
    pub per_page: u32,
    pub q: String,
}

impl SuggestionQuery {
    pub const PAGE_SIZE: u32 = 10;

    pub fn for_input(input: &str) -> Self {
        SuggestionQuery {
            page: 0,
            per_page: Self::PAGE_SIZE,
            q: input.to_string(),
        }
    }
}
