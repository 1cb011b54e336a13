// web_app/links.rs - Detail-view links for roles, groups, and users
//
// Live entities link by their human-readable slug (name or email);
// soft-deleted ones link by id and are rendered struck through.

use crate::web_app::model::{Group, RoleGroup, User};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailLink {
    pub path: String,
    pub label: String,
    pub deleted: bool,
}

impl DetailLink {
    pub fn role(role: &RoleGroup) -> Self {
        DetailLink {
            path: role_path(role),
            label: role.name.clone(),
            deleted: role.is_deleted(),
        }
    }

    pub fn group(group: &Group) -> Self {
        let slug = if group.is_deleted() { &group.id } else { &group.name };
        DetailLink {
            path: format!("/groups/{slug}"),
            label: group.name.clone(),
            deleted: group.is_deleted(),
        }
    }

    /// Group type label; linked to the group only while it is live.
    pub fn group_type(group: &Group) -> Option<Self> {
        if group.is_deleted() {
            return None;
        }
        Some(DetailLink {
            path: format!("/groups/{}", group.name),
            label: group.group_type.to_string(),
            deleted: false,
        })
    }

    pub fn user(user: &User) -> Self {
        let path = if user.is_deleted() {
            format!("/users/{}", user.id)
        } else {
            format!("/users/{}", user.email.to_lowercase())
        };
        DetailLink {
            path,
            label: user.name(),
            deleted: user.is_deleted(),
        }
    }

    /// CSS text decoration for the rendered link.
    pub fn decoration(&self) -> &'static str {
        if self.deleted {
            "line-through"
        } else {
            "none"
        }
    }
}

/// Canonical detail path for a role; also the redirect target for a
/// single search match.
pub fn role_path(role: &RoleGroup) -> String {
    if role.is_deleted() {
        format!("/roles/{}", role.id)
    } else {
        format!("/roles/{}", role.name)
    }
}
