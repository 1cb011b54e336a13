// web_app/api/schema.rs - Table definitions for the role audit store
//
// Each table knows the SQL that creates it. `ensure_schema` runs them in
// dependency order at server start; every statement is idempotent.

use sqlx::PgPool;

/// A table the application owns
pub trait Table {
    const NAME: &'static str;

    /// Statements that create the table and its indexes, in order
    fn setup_sql() -> &'static [&'static str];
}

pub struct UsersTable;

impl Table for UsersTable {
    const NAME: &'static str = "users";

    fn setup_sql() -> &'static [&'static str] {
        &[r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                display_name TEXT,
                deleted_at TIMESTAMPTZ
            )
            "#]
    }
}

pub struct GroupsTable;

impl Table for GroupsTable {
    const NAME: &'static str = "groups";

    fn setup_sql() -> &'static [&'static str] {
        &[
            r#"
            CREATE TABLE IF NOT EXISTS groups (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                type TEXT NOT NULL DEFAULT 'okta_group',
                deleted_at TIMESTAMPTZ
            )
            "#,
            "CREATE INDEX IF NOT EXISTS groups_name_idx ON groups (name)",
        ]
    }
}

pub struct RoleGroupsTable;

impl Table for RoleGroupsTable {
    const NAME: &'static str = "role_groups";

    fn setup_sql() -> &'static [&'static str] {
        &[
            r#"
            CREATE TABLE IF NOT EXISTS role_groups (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                deleted_at TIMESTAMPTZ
            )
            "#,
            "CREATE INDEX IF NOT EXISTS role_groups_name_idx ON role_groups (name)",
        ]
    }
}

pub struct MembershipsTable;

impl Table for MembershipsTable {
    const NAME: &'static str = "role_group_memberships";

    fn setup_sql() -> &'static [&'static str] {
        &[
            r#"
            CREATE TABLE IF NOT EXISTS role_group_memberships (
                id TEXT PRIMARY KEY,
                role_group_id TEXT NOT NULL REFERENCES role_groups (id),
                group_id TEXT REFERENCES groups (id),
                is_owner BOOLEAN NOT NULL DEFAULT false,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                ended_at TIMESTAMPTZ,
                created_actor_id TEXT REFERENCES users (id),
                ended_actor_id TEXT REFERENCES users (id),
                created_reason TEXT NOT NULL DEFAULT ''
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS role_group_memberships_role_idx
                ON role_group_memberships (role_group_id, created_at DESC)
            "#,
        ]
    }
}

/// Create every table that does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let tables: [(&str, &[&str]); 4] = [
        (UsersTable::NAME, UsersTable::setup_sql()),
        (GroupsTable::NAME, GroupsTable::setup_sql()),
        (RoleGroupsTable::NAME, RoleGroupsTable::setup_sql()),
        (MembershipsTable::NAME, MembershipsTable::setup_sql()),
    ];

    for (name, statements) in tables {
        for sql in statements {
            sqlx::query(sql).execute(pool).await?;
        }
        tracing::debug!(table = name, "table ready");
    }
    Ok(())
}
