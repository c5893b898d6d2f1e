//! Database repository for CRUD operations.
//!
//! Every write runs in a transaction together with the revision bump, and a
//! [`TableChange`] is published only after the commit succeeded.

use std::future::Future;

use chrono::Utc;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::errors::AppError;
use crate::models::{
    Client, ClientInput, Content, ContentInput, ContentStatus, Gear, GearInput, TeamMember,
    TeamMemberInput, TimeEntry, TimeEntryInput, Trip, TripInput, UserNotes,
};
use crate::realtime::{ChangeFeed, ChangeKind, RosterSource, Table, TableChange};
use crate::rows::{ClientRow, ContentRow, GearRow, TeamRow, TimeEntryRow, TripRow};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl Repository {
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        Self { pool, changes }
    }

    /// Feed that receives a notification after every committed write.
    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Bump the revision inside `tx`, commit, then notify listeners.
    async fn commit_change(
        &self,
        mut tx: Transaction<'_, Sqlite>,
        table: Table,
        kind: ChangeKind,
        row_id: &str,
    ) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        let revision_id: i64 = sqlx::query_scalar(
            "UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1 RETURNING revision_id",
        )
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.changes.publish(TableChange {
            table,
            kind,
            row_id: row_id.to_string(),
            revision_id,
        });
        Ok(revision_id)
    }

    /// Delete one row by key, failing with `NotFound` when nothing matched.
    async fn delete_row(
        &self,
        table: Table,
        key_column: &str,
        id: &str,
        label: &str,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!("DELETE FROM {} WHERE {} = ?", table.name(), key_column);
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", label, id)));
        }

        self.commit_change(tx, table, ChangeKind::Delete, id).await?;
        Ok(())
    }

    // ==================== TEAM OPERATIONS ====================

    /// List the whole roster.
    pub async fn list_team(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, email, phone, role, assignedclients, hourlyrate, photourl, notes FROM team ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TeamMember::from).collect())
    }

    /// Get a member by ID.
    pub async fn get_member(&self, id: &str) -> Result<Option<TeamMember>, AppError> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, email, phone, role, assignedclients, hourlyrate, photourl, notes FROM team WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TeamMember::from))
    }

    /// Create a new member. The id comes from the request or is generated.
    pub async fn create_member(&self, request: &TeamMemberInput) -> Result<TeamMember, AppError> {
        let id = request
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        if self.get_member(&id).await?.is_some() {
            return Err(AppError::Validation(format!(
                "Team member {} already exists",
                id
            )));
        }

        let row = TeamRow::from(&request.clone().into_member(id));
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, TeamRow>(
            r#"INSERT INTO team (id, name, email, phone, role, assignedclients, hourlyrate, photourl, notes)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id, name, email, phone, role, assignedclients, hourlyrate, photourl, notes"#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.role)
        .bind(&row.assignedclients)
        .bind(row.hourlyrate)
        .bind(&row.photourl)
        .bind(&row.notes)
        .fetch_one(&mut *tx)
        .await?;

        self.commit_change(tx, Table::Team, ChangeKind::Insert, &inserted.id)
            .await?;
        Ok(inserted.into())
    }

    /// Replace a member's row.
    pub async fn update_member(
        &self,
        id: &str,
        request: &TeamMemberInput,
    ) -> Result<TeamMember, AppError> {
        let member = request.clone().into_member(id.to_string());
        self.replace_member(&member).await
    }

    async fn replace_member(&self, member: &TeamMember) -> Result<TeamMember, AppError> {
        let row = TeamRow::from(member);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, TeamRow>(
            r#"UPDATE team SET name = ?, email = ?, phone = ?, role = ?, assignedclients = ?,
                      hourlyrate = ?, photourl = ?, notes = ?
               WHERE id = ?
               RETURNING id, name, email, phone, role, assignedclients, hourlyrate, photourl, notes"#,
        )
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.role)
        .bind(&row.assignedclients)
        .bind(row.hourlyrate)
        .bind(&row.photourl)
        .bind(&row.notes)
        .bind(&row.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", member.id)))?;

        self.commit_change(tx, Table::Team, ChangeKind::Update, &updated.id)
            .await?;
        Ok(updated.into())
    }

    /// Insert or fully replace a member keyed by id.
    pub async fn upsert_member(&self, member: &TeamMember) -> Result<TeamMember, AppError> {
        let row = TeamRow::from(member);
        let mut tx = self.pool.begin().await?;

        let existed = sqlx::query("SELECT 1 FROM team WHERE id = ?")
            .bind(&row.id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();

        let stored = sqlx::query_as::<_, TeamRow>(
            r#"INSERT INTO team (id, name, email, phone, role, assignedclients, hourlyrate, photourl, notes)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   name = excluded.name,
                   email = excluded.email,
                   phone = excluded.phone,
                   role = excluded.role,
                   assignedclients = excluded.assignedclients,
                   hourlyrate = excluded.hourlyrate,
                   photourl = excluded.photourl,
                   notes = excluded.notes
               RETURNING id, name, email, phone, role, assignedclients, hourlyrate, photourl, notes"#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.role)
        .bind(&row.assignedclients)
        .bind(row.hourlyrate)
        .bind(&row.photourl)
        .bind(&row.notes)
        .fetch_one(&mut *tx)
        .await?;

        let kind = if existed {
            ChangeKind::Update
        } else {
            ChangeKind::Insert
        };
        self.commit_change(tx, Table::Team, kind, &stored.id).await?;
        Ok(stored.into())
    }

    /// Overwrite the notes on a member's roster record.
    pub async fn update_member_notes(&self, id: &str, notes: &str) -> Result<TeamMember, AppError> {
        let mut member = self
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))?;
        member.notes = notes.to_string();
        self.replace_member(&member).await
    }

    /// Delete a member.
    pub async fn delete_member(&self, id: &str) -> Result<(), AppError> {
        self.delete_row(Table::Team, "id", id, "Team member").await
    }

    // ==================== CONTENT OPERATIONS ====================

    /// List all tasks.
    pub async fn list_content(&self) -> Result<Vec<Content>, AppError> {
        let rows = sqlx::query_as::<_, ContentRow>(
            "SELECT id, title, owner, client, status, deadline, description FROM content ORDER BY deadline",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Content::try_from).collect()
    }

    /// Get a task by ID.
    pub async fn get_content(&self, id: &str) -> Result<Option<Content>, AppError> {
        let row = sqlx::query_as::<_, ContentRow>(
            "SELECT id, title, owner, client, status, deadline, description FROM content WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Content::try_from).transpose()
    }

    /// Create a task owned by `owner`.
    pub async fn create_content(
        &self,
        request: &ContentInput,
        owner: &str,
    ) -> Result<Content, AppError> {
        let content = content_from_input(uuid::Uuid::new_v4().to_string(), request, owner);
        let row = ContentRow::from(&content);
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, ContentRow>(
            r#"INSERT INTO content (id, title, owner, client, status, deadline, description)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING id, title, owner, client, status, deadline, description"#,
        )
        .bind(&row.id)
        .bind(&row.title)
        .bind(&row.owner)
        .bind(&row.client)
        .bind(&row.status)
        .bind(&row.deadline)
        .bind(&row.description)
        .fetch_one(&mut *tx)
        .await?;

        self.commit_change(tx, Table::Content, ChangeKind::Insert, &inserted.id)
            .await?;
        Content::try_from(inserted)
    }

    /// Replace a task's row.
    pub async fn update_content(
        &self,
        id: &str,
        request: &ContentInput,
        owner: &str,
    ) -> Result<Content, AppError> {
        let content = content_from_input(id.to_string(), request, owner);
        self.replace_content(&content).await
    }

    /// Change only a task's status.
    pub async fn update_content_status(
        &self,
        id: &str,
        status: ContentStatus,
    ) -> Result<Content, AppError> {
        let mut content = self
            .get_content(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;
        content.status = status;
        self.replace_content(&content).await
    }

    async fn replace_content(&self, content: &Content) -> Result<Content, AppError> {
        let row = ContentRow::from(content);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, ContentRow>(
            r#"UPDATE content SET title = ?, owner = ?, client = ?, status = ?, deadline = ?, description = ?
               WHERE id = ?
               RETURNING id, title, owner, client, status, deadline, description"#,
        )
        .bind(&row.title)
        .bind(&row.owner)
        .bind(&row.client)
        .bind(&row.status)
        .bind(&row.deadline)
        .bind(&row.description)
        .bind(&row.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", content.id)))?;

        self.commit_change(tx, Table::Content, ChangeKind::Update, &updated.id)
            .await?;
        Content::try_from(updated)
    }

    /// Delete a task.
    pub async fn delete_content(&self, id: &str) -> Result<(), AppError> {
        self.delete_row(Table::Content, "id", id, "Content").await
    }

    // ==================== TIME ENTRY OPERATIONS ====================

    /// List dated time entries, newest first.
    pub async fn list_time_entries(&self) -> Result<Vec<TimeEntry>, AppError> {
        let rows = sqlx::query_as::<_, TimeEntryRow>(
            r#"SELECT id, date, name, client, task, duration FROM time_entries
               WHERE date IS NOT NULL AND date <> ''
               ORDER BY date DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TimeEntry::from).collect())
    }

    /// Log time for `team_member`.
    pub async fn create_time_entry(
        &self,
        request: &TimeEntryInput,
        team_member: &str,
    ) -> Result<TimeEntry, AppError> {
        let entry = time_entry_from_input(uuid::Uuid::new_v4().to_string(), request, team_member);
        let row = TimeEntryRow::from(&entry);
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, TimeEntryRow>(
            r#"INSERT INTO time_entries (id, date, name, client, task, duration)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING id, date, name, client, task, duration"#,
        )
        .bind(&row.id)
        .bind(&row.date)
        .bind(&row.name)
        .bind(&row.client)
        .bind(&row.task)
        .bind(row.duration)
        .fetch_one(&mut *tx)
        .await?;

        self.commit_change(tx, Table::TimeEntries, ChangeKind::Insert, &inserted.id)
            .await?;
        Ok(inserted.into())
    }

    /// Replace a time entry's row.
    pub async fn update_time_entry(
        &self,
        id: &str,
        request: &TimeEntryInput,
        team_member: &str,
    ) -> Result<TimeEntry, AppError> {
        let entry = time_entry_from_input(id.to_string(), request, team_member);
        let row = TimeEntryRow::from(&entry);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, TimeEntryRow>(
            r#"UPDATE time_entries SET date = ?, name = ?, client = ?, task = ?, duration = ?
               WHERE id = ?
               RETURNING id, date, name, client, task, duration"#,
        )
        .bind(&row.date)
        .bind(&row.name)
        .bind(&row.client)
        .bind(&row.task)
        .bind(row.duration)
        .bind(&row.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Time entry {} not found", id)))?;

        self.commit_change(tx, Table::TimeEntries, ChangeKind::Update, &updated.id)
            .await?;
        Ok(updated.into())
    }

    /// Delete a time entry.
    pub async fn delete_time_entry(&self, id: &str) -> Result<(), AppError> {
        self.delete_row(Table::TimeEntries, "id", id, "Time entry")
            .await
    }

    // ==================== TRIP OPERATIONS ====================

    /// List trips, newest first.
    pub async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        let rows = sqlx::query_as::<_, TripRow>(
            "SELECT id, start_location, destination, distance, team_member, date, purpose FROM trips ORDER BY date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Trip::from).collect())
    }

    /// Create a trip.
    pub async fn create_trip(&self, request: &TripInput) -> Result<Trip, AppError> {
        let trip = request.clone().into_trip(uuid::Uuid::new_v4().to_string());
        let row = TripRow::from(&trip);
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, TripRow>(
            r#"INSERT INTO trips (id, start_location, destination, distance, team_member, date, purpose)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING id, start_location, destination, distance, team_member, date, purpose"#,
        )
        .bind(&row.id)
        .bind(&row.start_location)
        .bind(&row.destination)
        .bind(row.distance)
        .bind(&row.team_member)
        .bind(&row.date)
        .bind(&row.purpose)
        .fetch_one(&mut *tx)
        .await?;

        self.commit_change(tx, Table::Trips, ChangeKind::Insert, &inserted.id)
            .await?;
        Ok(inserted.into())
    }

    /// Replace a trip's row.
    pub async fn update_trip(&self, id: &str, request: &TripInput) -> Result<Trip, AppError> {
        let trip = request.clone().into_trip(id.to_string());
        let row = TripRow::from(&trip);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, TripRow>(
            r#"UPDATE trips SET start_location = ?, destination = ?, distance = ?, team_member = ?, date = ?, purpose = ?
               WHERE id = ?
               RETURNING id, start_location, destination, distance, team_member, date, purpose"#,
        )
        .bind(&row.start_location)
        .bind(&row.destination)
        .bind(row.distance)
        .bind(&row.team_member)
        .bind(&row.date)
        .bind(&row.purpose)
        .bind(&row.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", id)))?;

        self.commit_change(tx, Table::Trips, ChangeKind::Update, &updated.id)
            .await?;
        Ok(updated.into())
    }

    /// Delete a trip.
    pub async fn delete_trip(&self, id: &str) -> Result<(), AppError> {
        self.delete_row(Table::Trips, "id", id, "Trip").await
    }

    // ==================== GEAR OPERATIONS ====================

    /// List gear, newest first.
    pub async fn list_gear(&self) -> Result<Vec<Gear>, AppError> {
        let rows = sqlx::query_as::<_, GearRow>(
            "SELECT id, name, assigned_to, status, created_at, updated_at FROM gear ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Gear::try_from).collect()
    }

    /// Get a piece of gear by ID.
    pub async fn get_gear(&self, id: &str) -> Result<Option<Gear>, AppError> {
        let row = sqlx::query_as::<_, GearRow>(
            "SELECT id, name, assigned_to, status, created_at, updated_at FROM gear WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Gear::try_from).transpose()
    }

    /// Create a piece of gear.
    pub async fn create_gear(&self, request: &GearInput) -> Result<Gear, AppError> {
        let now = Utc::now().to_rfc3339();
        let gear = Gear {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            assigned_to: request.assigned_to.clone(),
            status: request.status,
            created_at: now.clone(),
            updated_at: now,
        };
        let row = GearRow::from(&gear);
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, GearRow>(
            r#"INSERT INTO gear (id, name, assigned_to, status, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING id, name, assigned_to, status, created_at, updated_at"#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.assigned_to)
        .bind(&row.status)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        self.commit_change(tx, Table::Gear, ChangeKind::Insert, &inserted.id)
            .await?;
        Gear::try_from(inserted)
    }

    /// Replace a piece of gear, keeping its creation time.
    pub async fn update_gear(&self, id: &str, request: &GearInput) -> Result<Gear, AppError> {
        let existing = self
            .get_gear(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gear {} not found", id)))?;
        let gear = Gear {
            id: existing.id,
            name: request.name.clone(),
            assigned_to: request.assigned_to.clone(),
            status: request.status,
            created_at: existing.created_at,
            updated_at: Utc::now().to_rfc3339(),
        };
        let row = GearRow::from(&gear);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, GearRow>(
            r#"UPDATE gear SET name = ?, assigned_to = ?, status = ?, created_at = ?, updated_at = ?
               WHERE id = ?
               RETURNING id, name, assigned_to, status, created_at, updated_at"#,
        )
        .bind(&row.name)
        .bind(&row.assigned_to)
        .bind(&row.status)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .bind(&row.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gear {} not found", id)))?;

        self.commit_change(tx, Table::Gear, ChangeKind::Update, &updated.id)
            .await?;
        Gear::try_from(updated)
    }

    /// Delete a piece of gear.
    pub async fn delete_gear(&self, id: &str) -> Result<(), AppError> {
        self.delete_row(Table::Gear, "id", id, "Gear").await
    }

    // ==================== CLIENT OPERATIONS ====================

    /// List all clients.
    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"SELECT id, name, contactperson, email, phone, status, joindate, monthlyvideos, documentation
               FROM client ORDER BY name"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Create a client.
    pub async fn create_client(&self, request: &ClientInput) -> Result<Client, AppError> {
        let client = request.clone().into_client(uuid::Uuid::new_v4().to_string());
        let row = ClientRow::from(&client);
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, ClientRow>(
            r#"INSERT INTO client (id, name, contactperson, email, phone, status, joindate, monthlyvideos, documentation)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id, name, contactperson, email, phone, status, joindate, monthlyvideos, documentation"#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.contactperson)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.status)
        .bind(&row.joindate)
        .bind(row.monthlyvideos)
        .bind(&row.documentation)
        .fetch_one(&mut *tx)
        .await?;

        self.commit_change(tx, Table::Clients, ChangeKind::Insert, &inserted.id)
            .await?;
        Ok(inserted.into())
    }

    /// Replace a client's row.
    pub async fn update_client(&self, id: &str, request: &ClientInput) -> Result<Client, AppError> {
        let client = request.clone().into_client(id.to_string());
        let row = ClientRow::from(&client);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, ClientRow>(
            r#"UPDATE client SET name = ?, contactperson = ?, email = ?, phone = ?, status = ?,
                      joindate = ?, monthlyvideos = ?, documentation = ?
               WHERE id = ?
               RETURNING id, name, contactperson, email, phone, status, joindate, monthlyvideos, documentation"#,
        )
        .bind(&row.name)
        .bind(&row.contactperson)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.status)
        .bind(&row.joindate)
        .bind(row.monthlyvideos)
        .bind(&row.documentation)
        .bind(&row.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;

        self.commit_change(tx, Table::Clients, ChangeKind::Update, &updated.id)
            .await?;
        Ok(updated.into())
    }

    /// Delete a client.
    pub async fn delete_client(&self, id: &str) -> Result<(), AppError> {
        self.delete_row(Table::Clients, "id", id, "Client").await
    }

    // ==================== NOTES OPERATIONS ====================

    /// Get a user's notes document, if any.
    pub async fn get_notes(&self, user_id: &str) -> Result<Option<UserNotes>, AppError> {
        let row = sqlx::query("SELECT user_id, notes FROM notes WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| UserNotes {
            user_id: row.get("user_id"),
            notes: row.get("notes"),
        }))
    }

    /// Create or overwrite a user's notes document.
    pub async fn save_notes(&self, user_id: &str, notes: &str) -> Result<UserNotes, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"INSERT INTO notes (user_id, notes) VALUES (?, ?)
               ON CONFLICT(user_id) DO UPDATE SET notes = excluded.notes"#,
        )
        .bind(user_id)
        .bind(notes)
        .execute(&mut *tx)
        .await?;

        self.commit_change(tx, Table::Notes, ChangeKind::Update, user_id)
            .await?;

        Ok(UserNotes {
            user_id: user_id.to_string(),
            notes: notes.to_string(),
        })
    }
}

impl RosterSource for Repository {
    fn fetch_roster(&self) -> impl Future<Output = Result<Vec<TeamMember>, AppError>> + Send {
        self.list_team()
    }
}

fn content_from_input(id: String, request: &ContentInput, owner: &str) -> Content {
    Content {
        id,
        title: request.title.clone(),
        owner: owner.to_string(),
        client: request.client.clone(),
        status: request.status,
        deadline: request.deadline.clone(),
        description: request.description.clone().filter(|d| !d.is_empty()),
    }
}

fn time_entry_from_input(id: String, request: &TimeEntryInput, team_member: &str) -> TimeEntry {
    TimeEntry {
        id,
        date: request.date.clone(),
        team_member: team_member.to_string(),
        client: request.client.clone(),
        task: request.task.clone(),
        duration: request.duration,
    }
}
