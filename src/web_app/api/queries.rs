// web_app/api/queries.rs - Database query implementations
//
// Paginated lookups behind the server functions: the role list, a role's
// membership audit, and the group/role name suggestions.
//
// Philosophy: Pure functions that take a pool and a request struct,
// return typed results. The SQL fragments that depend on the request
// (ordering, paging, search patterns) are built by small pure helpers so
// they can be tested without a database.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::web_app::model::*;

/// Flat row for one audit entry with its joined group and actors
#[derive(Clone, sqlx::FromRow)]
struct AuditRow {
    id: String,
    role_group_id: String,
    is_owner: bool,
    created_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    created_reason: String,

    group_id: Option<String>,
    group_name: Option<String>,
    group_type: Option<String>,
    group_deleted_at: Option<DateTime<Utc>>,

    created_actor_id: Option<String>,
    created_actor_email: Option<String>,
    created_actor_first_name: Option<String>,
    created_actor_last_name: Option<String>,
    created_actor_display_name: Option<String>,
    created_actor_deleted_at: Option<DateTime<Utc>>,

    ended_actor_id: Option<String>,
    ended_actor_email: Option<String>,
    ended_actor_first_name: Option<String>,
    ended_actor_last_name: Option<String>,
    ended_actor_display_name: Option<String>,
    ended_actor_deleted_at: Option<DateTime<Utc>>,
}

fn actor(
    id: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    display_name: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
) -> Option<User> {
    Some(User {
        id: id?,
        email: email.unwrap_or_default(),
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        display_name,
        deleted_at,
    })
}

impl From<AuditRow> for RoleMembership {
    fn from(row: AuditRow) -> Self {
        let group = row.group_id.map(|id| Group {
            id,
            name: row.group_name.unwrap_or_default(),
            group_type: GroupType::from_db(row.group_type.as_deref().unwrap_or_default()),
            deleted_at: row.group_deleted_at,
        });

        RoleMembership {
            id: row.id,
            role_group_id: row.role_group_id,
            group,
            is_owner: row.is_owner,
            created_at: row.created_at,
            ended_at: row.ended_at,
            created_actor: actor(
                row.created_actor_id,
                row.created_actor_email,
                row.created_actor_first_name,
                row.created_actor_last_name,
                row.created_actor_display_name,
                row.created_actor_deleted_at,
            ),
            ended_actor: actor(
                row.ended_actor_id,
                row.ended_actor_email,
                row.ended_actor_first_name,
                row.ended_actor_last_name,
                row.ended_actor_display_name,
                row.ended_actor_deleted_at,
            ),
            created_reason: row.created_reason,
        }
    }
}

#[derive(Clone, sqlx::FromRow)]
struct GroupRow {
    id: String,
    name: String,
    group_type: String,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
            group_type: GroupType::from_db(&row.group_type),
            deleted_at: row.deleted_at,
        }
    }
}

/// LIMIT and OFFSET for a zero-based page
pub fn limit_offset(page: u32, per_page: u32) -> (i64, i64) {
    let limit = per_page as i64;
    (limit, page as i64 * limit)
}

/// Case-insensitive substring pattern for ILIKE, with wildcards escaped
pub fn like_pattern(q: Option<&str>) -> Option<String> {
    q.map(|q| {
        let escaped = q
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

fn direction(desc: Option<bool>) -> &'static str {
    // The list pages treat a missing order_desc as descending.
    if desc.unwrap_or(true) {
        "DESC"
    } else {
        "ASC"
    }
}

/// ORDER BY clause for the role list
pub fn role_order_clause(order_by: Option<RoleOrderBy>, desc: Option<bool>) -> String {
    let column = match order_by.unwrap_or_default() {
        RoleOrderBy::Name => "r.name",
        RoleOrderBy::CreatedAt => "r.created_at",
    };
    format!("{column} {}, r.id", direction(desc))
}

/// ORDER BY clause for a role's membership audit
pub fn audit_order_clause(order_by: Option<AuditOrderBy>, desc: Option<bool>) -> String {
    let column = match order_by.unwrap_or_default() {
        AuditOrderBy::Moniker => "g.name",
        AuditOrderBy::CreatedAt => "m.created_at",
        AuditOrderBy::EndedAt => "m.ended_at",
    };
    format!("{column} {}, m.id", direction(desc))
}

/// Look up a role by id or name, preferring a live role over a deleted one
pub async fn find_role(pool: &PgPool, id_or_name: &str) -> Result<Option<RoleGroup>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, created_at, updated_at, deleted_at
        FROM role_groups
        WHERE id = $1 OR name = $1
        ORDER BY deleted_at IS NOT NULL, created_at DESC
        LIMIT 1
        "#,
    )
    .bind(id_or_name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| RoleGroup {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }))
}

/// One page of live roles, optionally filtered by name/description
pub async fn list_roles(pool: &PgPool, query: &RoleListQuery) -> Result<ResultPage<RoleGroup>, sqlx::Error> {
    let (limit, offset) = limit_offset(query.page, query.per_page);
    let pattern = like_pattern(query.q.as_deref());

    let sql = format!(
        r#"
        SELECT r.id, r.name, r.description, r.created_at, r.updated_at, r.deleted_at
        FROM role_groups r
        WHERE r.deleted_at IS NULL
          AND ($1::text IS NULL OR r.name ILIKE $1 OR r.description ILIKE $1)
        ORDER BY {}
        LIMIT $2 OFFSET $3
        "#,
        role_order_clause(query.order_by, query.order_desc)
    );

    let rows = sqlx::query(&sql)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let total_row = sqlx::query(
        r#"
        SELECT COUNT(*)
        FROM role_groups r
        WHERE r.deleted_at IS NULL
          AND ($1::text IS NULL OR r.name ILIKE $1 OR r.description ILIKE $1)
        "#,
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await?;
    let total: i64 = total_row.get(0);

    let results = rows
        .into_iter()
        .map(|row| RoleGroup {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            deleted_at: row.get("deleted_at"),
        })
        .collect();

    Ok(ResultPage {
        results,
        total: total.max(0) as u64,
    })
}

const AUDIT_FILTERS: &str = r#"
        WHERE m.role_group_id = (
                SELECT id FROM role_groups
                WHERE id = $1 OR name = $1
                ORDER BY deleted_at IS NOT NULL, created_at DESC
                LIMIT 1
            )
          AND ($2::text IS NULL OR g.name ILIKE $2)
          AND ($3::bool IS NULL OR $3 = (m.ended_at IS NULL OR m.ended_at > now()))
          AND ($4::bool IS NULL OR m.is_owner = $4)
"#;

/// One page of a role's membership audit history
pub async fn list_role_audits(
    pool: &PgPool,
    query: &RoleAuditQuery,
) -> Result<ResultPage<RoleMembership>, sqlx::Error> {
    let (limit, offset) = limit_offset(query.page, query.per_page);
    let pattern = like_pattern(query.q.as_deref());

    let sql = format!(
        r#"
        SELECT
            m.id, m.role_group_id, m.is_owner, m.created_at, m.ended_at, m.created_reason,
            g.id AS group_id, g.name AS group_name, g.type AS group_type,
            g.deleted_at AS group_deleted_at,
            ca.id AS created_actor_id, ca.email AS created_actor_email,
            ca.first_name AS created_actor_first_name, ca.last_name AS created_actor_last_name,
            ca.display_name AS created_actor_display_name, ca.deleted_at AS created_actor_deleted_at,
            ea.id AS ended_actor_id, ea.email AS ended_actor_email,
            ea.first_name AS ended_actor_first_name, ea.last_name AS ended_actor_last_name,
            ea.display_name AS ended_actor_display_name, ea.deleted_at AS ended_actor_deleted_at
        FROM role_group_memberships m
        LEFT JOIN groups g ON g.id = m.group_id
        LEFT JOIN users ca ON ca.id = m.created_actor_id
        LEFT JOIN users ea ON ea.id = m.ended_actor_id
        {AUDIT_FILTERS}
        ORDER BY {}
        LIMIT $5 OFFSET $6
        "#,
        audit_order_clause(query.order_by, query.order_desc)
    );

    let rows = sqlx::query_as::<_, AuditRow>(&sql)
        .bind(&query.role_id)
        .bind(&pattern)
        .bind(query.active)
        .bind(query.owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let count_sql = format!(
        r#"
        SELECT COUNT(*)
        FROM role_group_memberships m
        LEFT JOIN groups g ON g.id = m.group_id
        {AUDIT_FILTERS}
        "#
    );

    let total_row = sqlx::query(&count_sql)
        .bind(&query.role_id)
        .bind(&pattern)
        .bind(query.active)
        .bind(query.owner)
        .fetch_one(pool)
        .await?;
    let total: i64 = total_row.get(0);

    Ok(ResultPage {
        results: rows.into_iter().map(|r| r.into()).collect(),
        total: total.max(0) as u64,
    })
}

/// Group names matching the audit page's search box
pub async fn list_groups(pool: &PgPool, query: &SuggestionQuery) -> Result<ResultPage<Group>, sqlx::Error> {
    let (limit, offset) = limit_offset(query.page, query.per_page);
    let pattern = like_pattern(Some(&query.q));

    let rows = sqlx::query_as::<_, GroupRow>(
        r#"
        SELECT id, name, type AS group_type, deleted_at
        FROM groups
        WHERE deleted_at IS NULL AND name ILIKE $1
        ORDER BY name ASC, id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total_row = sqlx::query("SELECT COUNT(*) FROM groups WHERE deleted_at IS NULL AND name ILIKE $1")
        .bind(&pattern)
        .fetch_one(pool)
        .await?;
    let total: i64 = total_row.get(0);

    Ok(ResultPage {
        results: rows.into_iter().map(Group::from).collect(),
        total: total.max(0) as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_offset() {
        assert_eq!(limit_offset(0, 20), (20, 0));
        assert_eq!(limit_offset(3, 5), (5, 15));
        assert_eq!(limit_offset(u32::MAX, 20), (20, u32::MAX as i64 * 20));
    }

    #[test]
    fn test_direction_defaults_to_desc() {
        assert_eq!(direction(None), "DESC");
        assert_eq!(direction(Some(true)), "DESC");
        assert_eq!(direction(Some(false)), "ASC");
    }

    #[test]
    fn test_audit_row_without_joins() {
        let row = AuditRow {
            id: "m1".into(),
            role_group_id: "r1".into(),
            is_owner: true,
            created_at: Utc::now(),
            ended_at: None,
            created_reason: "onboarding".into(),
            group_id: None,
            group_name: None,
            group_type: None,
            group_deleted_at: None,
            created_actor_id: Some("u1".into()),
            created_actor_email: Some("a@example.com".into()),
            created_actor_first_name: None,
            created_actor_last_name: None,
            created_actor_display_name: None,
            created_actor_deleted_at: None,
            ended_actor_id: None,
            ended_actor_email: Some("orphan@example.com".into()),
            ended_actor_first_name: None,
            ended_actor_last_name: None,
            ended_actor_display_name: None,
            ended_actor_deleted_at: None,
        };
        let membership = RoleMembership::from(row);
        assert!(membership.group.is_none());
        assert_eq!(membership.created_actor.clone().map(|u| u.email), Some("a@example.com".to_string()));
        assert!(membership.ended_actor.is_none());
        assert_eq!(membership.role_label(), "Owner");
    }
}
