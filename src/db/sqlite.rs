//! SQLite-backed store implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::store::{EntityStore, ResponsibilityStore};
use crate::db::DbPool;
use crate::models::{Employee, NewTender, Organization, Tender, TenderStatus, TenderVersion};

#[derive(Debug, sqlx::FromRow)]
struct TenderRow {
    id: String,
    name: String,
    description: String,
    service_type: String,
    status: String,
    organization_id: String,
    creator_username: String,
    version: i64,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, sqlx::FromRow)]
struct TenderVersionRow {
    tender_id: String,
    version: i64,
    name: String,
    description: String,
    service_type: String,
    status: String,
    organization_id: String,
    creator_username: String,
    created_at: String,
}

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    username: String,
    first_name: String,
    last_name: String,
    created_at: String,
}

#[derive(Debug, sqlx::FromRow)]
struct OrganizationRow {
    id: String,
    name: String,
    description: String,
    organization_type: String,
    created_at: String,
}

/// Production [`EntityStore`] + [`ResponsibilityStore`] backed by SQLite
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let rows = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, description, organization_type, created_at
            FROM organizations
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list organizations")?;

        Ok(rows.into_iter().map(row_to_organization).collect())
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, username, first_name, last_name, created_at
            FROM employees
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list employees")?;

        Ok(rows.into_iter().map(row_to_employee).collect())
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn employee_by_username(&self, username: &str) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, username, first_name, last_name, created_at
            FROM employees
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get employee")?;

        Ok(row.map(row_to_employee))
    }

    async fn organization_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, description, organization_type, created_at
            FROM organizations
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get organization")?;

        Ok(row.map(row_to_organization))
    }

    async fn tender_by_id(&self, id: Uuid) -> Result<Option<Tender>> {
        let row = sqlx::query_as::<_, TenderRow>(
            r#"
            SELECT id, name, description, service_type, status,
                   organization_id, creator_username, version,
                   created_at, updated_at
            FROM tenders
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get tender")?;

        Ok(row.map(row_to_tender))
    }

    async fn create_tender(&self, tender: &NewTender) -> Result<Tender> {
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO tenders (id, name, description, service_type, status,
                                 organization_id, creator_username, version,
                                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&tender.name)
        .bind(&tender.description)
        .bind(&tender.service_type)
        .bind(tender.status.as_str())
        .bind(tender.organization_id.to_string())
        .bind(&tender.creator_username)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .context("Failed to create tender")?;

        sqlx::query(
            r#"
            INSERT INTO tender_versions (tender_id, version, name, description,
                                         service_type, status, organization_id,
                                         creator_username, created_at)
            VALUES (?, 1, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&tender.name)
        .bind(&tender.description)
        .bind(&tender.service_type)
        .bind(tender.status.as_str())
        .bind(tender.organization_id.to_string())
        .bind(&tender.creator_username)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .context("Failed to write initial tender snapshot")?;

        tx.commit().await.context("Failed to commit tender create")?;

        self.tender_by_id(id)
            .await?
            .context("Failed to retrieve created tender")
    }

    async fn update_tender(&self, tender: &Tender) -> Result<Tender> {
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            UPDATE tenders
            SET name = ?, description = ?, service_type = ?, status = ?,
                organization_id = ?, creator_username = ?, version = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&tender.name)
        .bind(&tender.description)
        .bind(&tender.service_type)
        .bind(tender.status.as_str())
        .bind(tender.organization_id.to_string())
        .bind(&tender.creator_username)
        .bind(tender.version)
        .bind(&now)
        .bind(tender.id.to_string())
        .execute(&mut *tx)
        .await
        .context("Failed to update tender")?;

        sqlx::query(
            r#"
            INSERT INTO tender_versions (tender_id, version, name, description,
                                         service_type, status, organization_id,
                                         creator_username, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tender.id.to_string())
        .bind(tender.version)
        .bind(&tender.name)
        .bind(&tender.description)
        .bind(&tender.service_type)
        .bind(tender.status.as_str())
        .bind(tender.organization_id.to_string())
        .bind(&tender.creator_username)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .context("Failed to append tender snapshot")?;

        tx.commit().await.context("Failed to commit tender update")?;

        self.tender_by_id(tender.id)
            .await?
            .context("Failed to retrieve updated tender")
    }

    async fn find_version(&self, tender_id: Uuid, version: i32) -> Result<Option<TenderVersion>> {
        let row = sqlx::query_as::<_, TenderVersionRow>(
            r#"
            SELECT tender_id, version, name, description, service_type, status,
                   organization_id, creator_username, created_at
            FROM tender_versions
            WHERE tender_id = ? AND version = ?
            "#,
        )
        .bind(tender_id.to_string())
        .bind(version)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get tender version")?;

        Ok(row.map(row_to_version))
    }

    async fn list_tenders(&self, service_type: Option<&str>) -> Result<Vec<Tender>> {
        let rows = match service_type {
            Some(service_type) => {
                sqlx::query_as::<_, TenderRow>(
                    r#"
                    SELECT id, name, description, service_type, status,
                           organization_id, creator_username, version,
                           created_at, updated_at
                    FROM tenders
                    WHERE service_type = ?
                    ORDER BY created_at
                    "#,
                )
                .bind(service_type)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TenderRow>(
                    r#"
                    SELECT id, name, description, service_type, status,
                           organization_id, creator_username, version,
                           created_at, updated_at
                    FROM tenders
                    ORDER BY created_at
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("Failed to list tenders")?;

        Ok(rows.into_iter().map(row_to_tender).collect())
    }

    async fn list_tenders_by_creator(&self, username: &str) -> Result<Vec<Tender>> {
        let rows = sqlx::query_as::<_, TenderRow>(
            r#"
            SELECT id, name, description, service_type, status,
                   organization_id, creator_username, version,
                   created_at, updated_at
            FROM tenders
            WHERE creator_username = ?
            ORDER BY created_at
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tenders by creator")?;

        Ok(rows.into_iter().map(row_to_tender).collect())
    }
}

#[async_trait]
impl ResponsibilityStore for SqliteStore {
    async fn is_responsible(&self, employee_id: Uuid, organization_id: Uuid) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1 FROM organization_responsibles
            WHERE employee_id = ? AND organization_id = ?
            "#,
        )
        .bind(employee_id.to_string())
        .bind(organization_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to check responsibility")?;

        Ok(row.is_some())
    }
}

fn parse_db_timestamp(ts: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc);
    }
    Utc::now()
}

fn parse_db_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_db_status(s: &str) -> TenderStatus {
    TenderStatus::from_str(s).unwrap_or(TenderStatus::Created)
}

fn row_to_tender(row: TenderRow) -> Tender {
    Tender {
        id: parse_db_uuid(&row.id),
        name: row.name,
        description: row.description,
        service_type: row.service_type,
        status: parse_db_status(&row.status),
        organization_id: parse_db_uuid(&row.organization_id),
        creator_username: row.creator_username,
        version: row.version as i32,
        created_at: parse_db_timestamp(&row.created_at),
        updated_at: parse_db_timestamp(&row.updated_at),
    }
}

fn row_to_version(row: TenderVersionRow) -> TenderVersion {
    TenderVersion {
        tender_id: parse_db_uuid(&row.tender_id),
        version: row.version as i32,
        name: row.name,
        description: row.description,
        service_type: row.service_type,
        status: parse_db_status(&row.status),
        organization_id: parse_db_uuid(&row.organization_id),
        creator_username: row.creator_username,
        created_at: parse_db_timestamp(&row.created_at),
    }
}

fn row_to_employee(row: EmployeeRow) -> Employee {
    Employee {
        id: parse_db_uuid(&row.id),
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
        created_at: parse_db_timestamp(&row.created_at),
    }
}

fn row_to_organization(row: OrganizationRow) -> Organization {
    Organization {
        id: parse_db_uuid(&row.id),
        name: row.name,
        description: row.description,
        organization_type: row.organization_type,
        created_at: parse_db_timestamp(&row.created_at),
    }
}
