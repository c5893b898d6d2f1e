//! Integration tests for the agency ops backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::{Config, DEFAULT_HOURLY_RATE, DEFAULT_ROLE};
use crate::db::{init_database, Repository};
use crate::models::TeamMember;
use crate::realtime::ChangeFeed;
use crate::{create_router, AppState};

const API_KEY: &str = "test-api-key";

/// A signed-in user as forwarded by the identity provider.
struct Caller {
    id: &'static str,
    email: &'static str,
    full_name: &'static str,
}

const ANNA: Caller = Caller {
    id: "idp-anna",
    email: "anna@agency.se",
    full_name: "Anna Andersson",
};

const BOSS: Caller = Caller {
    id: "idp-boss",
    email: "boss@agency.se",
    full_name: "Bea Boss",
};

/// A different person who happens to share Anna's display name.
const NAMESAKE: Caller = Caller {
    id: "idp-namesake",
    email: "anna@elsewhere.com",
    full_name: "Anna Andersson",
};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    state: AppState,
    pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_psk(Some(API_KEY.to_string())).await
    }

    async fn with_psk(psk: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool.clone(), ChangeFeed::new()));

        // Create config
        let config = Config {
            api_psk: psk.clone(),
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            default_hourly_rate: DEFAULT_HOURLY_RATE,
            default_role: DEFAULT_ROLE.to_string(),
            admin_emails: vec![BOSS.email.to_string()],
        };

        let state = AppState::new(repo, config);
        state.roster.wait_loaded().await;

        let app = create_router(state.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            state,
            pool,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, caller: &Caller, path: &str) -> RequestBuilder {
        as_caller(self.client.get(self.url(path)), caller)
    }

    fn post(&self, caller: &Caller, path: &str) -> RequestBuilder {
        as_caller(self.client.post(self.url(path)), caller)
    }

    fn put(&self, caller: &Caller, path: &str) -> RequestBuilder {
        as_caller(self.client.put(self.url(path)), caller)
    }

    fn patch(&self, caller: &Caller, path: &str) -> RequestBuilder {
        as_caller(self.client.patch(self.url(path)), caller)
    }

    fn delete(&self, caller: &Caller, path: &str) -> RequestBuilder {
        as_caller(self.client.delete(self.url(path)), caller)
    }

    /// Wait until the live roster satisfies `pred`.
    async fn wait_for_roster(&self, pred: impl Fn(&[TeamMember]) -> bool) {
        let mut rx = self.state.roster.watch();
        let waited = tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|roster| roster.as_deref().is_some_and(|r| pred(r.as_slice()))),
        )
        .await;
        assert!(matches!(waited, Ok(Ok(_))), "roster never reached expected state");
    }

    /// Provision `caller` and wait until the roster knows them.
    async fn provision(&self, caller: &Caller) -> Value {
        let resp = self.post(caller, "/api/me/provision").send().await.unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        let id = body["data"]["id"].as_str().unwrap().to_string();
        self.wait_for_roster(|roster| roster.iter().any(|m| m.id == id))
            .await;
        body["data"].clone()
    }
}

fn as_caller(builder: RequestBuilder, caller: &Caller) -> RequestBuilder {
    builder
        .header("x-user-id", caller.id)
        .header("x-user-email", caller.email)
        .header("x-user-full-name", caller.full_name)
}

async fn json_of(resp: reqwest::Response) -> Value {
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_auth_missing_psk() {
    let fixture = TestFixture::new().await;

    // Request without API key
    let resp = as_caller(Client::new().get(fixture.url("/api/team")), &ANNA)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let body = json_of(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_disabled_without_psk() {
    let fixture = TestFixture::with_psk(None).await;

    let resp = fixture.get(&ANNA, "/api/team").send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    assert_eq!(json_of(resp).await["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_provision_creates_member_with_defaults() {
    let fixture = TestFixture::new().await;

    let resp = fixture.get(&ANNA, "/api/me").send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(json_of(resp).await["data"].is_null());

    let member = fixture.provision(&ANNA).await;
    assert_eq!(member["id"], ANNA.id);
    assert_eq!(member["name"], "Anna Andersson");
    assert_eq!(member["email"], ANNA.email);
    assert_eq!(member["role"], "Kreatör");
    assert_eq!(member["hourlyRate"], 150.0);

    let body = json_of(fixture.get(&ANNA, "/api/me").send().await.unwrap()).await;
    assert_eq!(body["data"]["id"], ANNA.id);

    // Signing in again keeps a single roster row
    fixture.provision(&ANNA).await;
    let body = json_of(fixture.get(&ANNA, "/api/team").send().await.unwrap()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_provision_adopts_precreated_roster_row() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post(&BOSS, "/api/team")
        .json(&json!({ "name": "Anna Andersson", "email": "ANNA@agency.se", "hourlyRate": 220.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let precreated = json_of(resp).await["data"]["id"].as_str().unwrap().to_string();

    let member = fixture.provision(&ANNA).await;
    assert_eq!(member["id"], precreated.as_str());
    assert_eq!(member["hourlyRate"], 220.0);
}

#[tokio::test]
async fn test_provision_never_adopts_by_name() {
    let fixture = TestFixture::new().await;
    fixture.provision(&ANNA).await;

    let namesake = fixture.provision(&NAMESAKE).await;
    assert_eq!(namesake["id"], NAMESAKE.id);
    assert_eq!(namesake["email"], NAMESAKE.email);

    let body = json_of(fixture.get(&BOSS, "/api/team").send().await.unwrap()).await;
    let team = body["data"].as_array().unwrap();
    assert_eq!(team.len(), 2);
    let anna = team.iter().find(|m| m["id"] == ANNA.id).unwrap();
    assert_eq!(anna["email"], ANNA.email);

    let body = json_of(fixture.get(&NAMESAKE, "/api/me").send().await.unwrap()).await;
    assert_eq!(body["data"]["id"], NAMESAKE.id);
}

#[tokio::test]
async fn test_member_cannot_rename_self() {
    let fixture = TestFixture::new().await;
    fixture.provision(&ANNA).await;

    let resp = fixture
        .put(&ANNA, &format!("/api/team/{}", ANNA.id))
        .json(&json!({ "name": "Someone Else", "email": "other@elsewhere.com", "phone": "070-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    assert_eq!(body["data"]["name"], "Anna Andersson");
    assert_eq!(body["data"]["email"], ANNA.email);
    assert_eq!(body["data"]["phone"], "070-1");
}

#[tokio::test]
async fn test_team_edits_are_admin_gated() {
    let fixture = TestFixture::new().await;
    let anna = fixture.provision(&ANNA).await;
    let path = format!("/api/team/{}", ANNA.id);

    // Own profile edit without touching rate or role
    let resp = fixture
        .put(&ANNA, &path)
        .json(&json!({ "name": anna["name"], "email": anna["email"], "phone": "070-1234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    assert_eq!(body["data"]["phone"], "070-1234567");
    assert_eq!(body["data"]["hourlyRate"], 150.0);
    assert_eq!(body["data"]["role"], "Kreatör");

    // Raising one's own rate is for admins
    let resp = fixture
        .put(&ANNA, &path)
        .json(&json!({ "name": anna["name"], "hourlyRate": 999.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(json_of(resp).await["error"]["code"], "FORBIDDEN");

    let resp = fixture
        .post(&ANNA, "/api/team")
        .json(&json!({ "name": "Someone" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .put(&BOSS, &path)
        .json(&json!({ "name": anna["name"], "hourlyRate": 200.0, "role": "Editor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    assert_eq!(body["data"]["hourlyRate"], 200.0);
    assert_eq!(body["data"]["role"], "Editor");
}

#[tokio::test]
async fn test_team_crud_and_revision() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post(&BOSS, "/api/team")
        .json(&json!({ "name": "Bo Ek", "assignedClients": ["Acme"], "photoURL": "https://cdn/bo.png" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let revision = body["revisionId"].as_i64().unwrap();
    assert!(revision > 0);
    assert_eq!(body["data"]["assignedClients"], json!(["Acme"]));
    assert_eq!(body["data"]["photoURL"], "https://cdn/bo.png");

    let body = json_of(
        fixture
            .get(&BOSS, &format!("/api/team/{}", id))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["name"], "Bo Ek");

    let resp = fixture
        .post(&BOSS, "/api/team")
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(json_of(resp).await["error"]["code"], "VALIDATION_ERROR");

    let resp = fixture
        .delete(&BOSS, &format!("/api/team/{}", id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(json_of(resp).await["revisionId"].as_i64().unwrap() > revision);

    let resp = fixture
        .get(&BOSS, &format!("/api/team/{}", id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_content_lifecycle() {
    let fixture = TestFixture::new().await;

    // No profile yet: owner cannot be defaulted
    let resp = fixture
        .post(&ANNA, "/api/content")
        .json(&json!({ "title": "Reel", "deadline": "2024-05-14" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    fixture.provision(&ANNA).await;

    let resp = fixture
        .post(&ANNA, "/api/content")
        .json(&json!({ "title": "Reel", "client": "Acme", "deadline": "2024-05-14" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["owner"], "Anna Andersson");
    assert_eq!(body["data"]["status"], "To Do");

    let resp = fixture
        .patch(&ANNA, &format!("/api/content/{}/status", id))
        .json(&json!({ "status": "In Review" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_of(resp).await["data"]["status"], "In Review");

    let resp = fixture
        .patch(&ANNA, &format!("/api/content/{}/status", id))
        .json(&json!({ "status": "Blocked" }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());

    // Replace without owner keeps the stored one
    let resp = fixture
        .put(&BOSS, &format!("/api/content/{}", id))
        .json(&json!({ "title": "Reel v2", "deadline": "2024-05-16", "status": "Done" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    assert_eq!(body["data"]["owner"], "Anna Andersson");
    assert_eq!(body["data"]["title"], "Reel v2");

    let resp = fixture
        .delete(&ANNA, &format!("/api/content/{}", id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .get(&ANNA, &format!("/api/content/{}", id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_time_entries_resolve_member_and_sort() {
    let fixture = TestFixture::new().await;
    fixture.provision(&ANNA).await;

    for (date, hours) in [("2024-05-01", 2.0), ("2024-05-20", 1.5)] {
        let resp = fixture
            .post(&ANNA, "/api/time-entries")
            .json(&json!({ "date": date, "client": "Acme", "task": "Edit", "duration": hours }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(json_of(resp).await["data"]["teamMember"], "Anna Andersson");
    }

    // Logged on someone's behalf by roster id
    let resp = fixture
        .post(&BOSS, "/api/time-entries")
        .json(&json!({ "date": "2024-05-10", "teamMember": ANNA.id, "duration": 3.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let id = json_of(resp).await["data"]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .post(&ANNA, "/api/time-entries")
        .json(&json!({ "date": "", "duration": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body = json_of(fixture.get(&ANNA, "/api/time-entries").send().await.unwrap()).await;
    let dates: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-05-20", "2024-05-10", "2024-05-01"]);

    let resp = fixture
        .put(&ANNA, &format!("/api/time-entries/{}", id))
        .json(&json!({ "date": "2024-05-11", "duration": 4.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_of(resp).await["data"]["duration"], 4.0);

    let resp = fixture
        .delete(&ANNA, &format!("/api/time-entries/{}", id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_trips_crud() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post(&ANNA, "/api/trips")
        .json(&json!({
            "startLocation": "Stockholm",
            "destination": "Uppsala",
            "distance": 71.5,
            "teamMember": "Anna Andersson",
            "date": "2024-05-03",
            "purpose": "Shoot"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let id = json_of(resp).await["data"]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .put(&ANNA, &format!("/api/trips/{}", id))
        .json(&json!({
            "startLocation": "Stockholm",
            "destination": "Västerås",
            "distance": 110.0,
            "date": "2024-05-03"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_of(resp).await["data"]["destination"], "Västerås");

    let body = json_of(fixture.get(&ANNA, "/api/trips").send().await.unwrap()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let resp = fixture
        .post(&ANNA, "/api/trips")
        .json(&json!({ "startLocation": "", "destination": "X", "distance": 1.0, "date": "2024-05-03" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let path = format!("/api/trips/{}", id);
    assert_eq!(fixture.delete(&ANNA, &path).send().await.unwrap().status(), 200);
    assert_eq!(fixture.delete(&ANNA, &path).send().await.unwrap().status(), 404);
}

#[tokio::test]
async fn test_negative_numbers_pass_through() {
    let fixture = TestFixture::new().await;
    fixture.provision(&ANNA).await;

    let resp = fixture
        .post(&ANNA, "/api/time-entries")
        .json(&json!({ "date": "2024-05-02", "duration": -1.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_of(resp).await["data"]["duration"], -1.5);

    let resp = fixture
        .post(&ANNA, "/api/trips")
        .json(&json!({
            "startLocation": "Stockholm",
            "destination": "Uppsala",
            "distance": -5.0,
            "date": "2024-05-03"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_of(fixture.get(&ANNA, "/api/time-entries").send().await.unwrap()).await;
    assert_eq!(body["data"][0]["duration"], -1.5);
    let body = json_of(fixture.get(&ANNA, "/api/trips").send().await.unwrap()).await;
    assert_eq!(body["data"][0]["distance"], -5.0);
}

#[tokio::test]
async fn test_gear_crud() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post(&ANNA, "/api/gear")
        .json(&json!({ "name": "Sony A7" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "available");
    assert!(body["data"]["assignedTo"].is_null());

    let resp = fixture
        .put(&ANNA, &format!("/api/gear/{}", id))
        .json(&json!({ "name": "Sony A7", "assignedTo": ANNA.id, "status": "in_use" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    assert_eq!(body["data"]["status"], "in_use");
    assert_eq!(body["data"]["assignedTo"], ANNA.id);

    let resp = fixture
        .put(&ANNA, "/api/gear/missing")
        .json(&json!({ "name": "Tripod" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .delete(&ANNA, &format!("/api/gear/{}", id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_clients_crud() {
    let fixture = TestFixture::new().await;

    for name in ["Zeta AB", "Acme"] {
        let resp = fixture
            .post(&ANNA, "/api/clients")
            .json(&json!({ "name": name, "contactPerson": "Eva", "monthlyVideos": 4 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let body = json_of(fixture.get(&ANNA, "/api/clients").send().await.unwrap()).await;
    let clients = body["data"].as_array().unwrap();
    assert_eq!(clients[0]["name"], "Acme");
    assert_eq!(clients[1]["name"], "Zeta AB");
    assert_eq!(clients[0]["monthlyVideos"], 4);

    let id = clients[0]["id"].as_str().unwrap().to_string();
    let resp = fixture
        .put(&ANNA, &format!("/api/clients/{}", id))
        .json(&json!({ "name": "Acme Group", "monthlyVideos": 6 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_of(resp).await["data"]["monthlyVideos"], 6);

    let resp = fixture
        .delete(&ANNA, &format!("/api/clients/{}", id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_personal_notes() {
    let fixture = TestFixture::new().await;

    let body = json_of(fixture.get(&ANNA, "/api/notes").send().await.unwrap()).await;
    assert_eq!(body["data"]["notes"], "");
    assert_eq!(body["data"]["userId"], ANNA.id);

    let resp = fixture
        .put(&ANNA, "/api/notes")
        .json(&json!({ "notes": "Call Acme on Friday" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_of(fixture.get(&ANNA, "/api/notes").send().await.unwrap()).await;
    assert_eq!(body["data"]["notes"], "Call Acme on Friday");

    // Someone else's notes are separate
    let body = json_of(fixture.get(&BOSS, "/api/notes").send().await.unwrap()).await;
    assert_eq!(body["data"]["notes"], "");
}

#[tokio::test]
async fn test_member_notes_need_profile() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .put(&ANNA, "/api/me/notes")
        .json(&json!({ "notes": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    fixture.provision(&ANNA).await;

    let resp = fixture
        .put(&ANNA, "/api/me/notes")
        .json(&json!({ "notes": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_of(resp).await["data"]["notes"], "hello");
}

#[tokio::test]
async fn test_dashboard_end_to_end() {
    let fixture = TestFixture::new().await;
    fixture.provision(&ANNA).await;

    for (title, status, deadline) in [
        ("Reel", "Done", "2024-05-14"),
        ("Story", "To Do", "2024-05-20"),
        ("Old", "Done", "2024-04-30"),
        ("Broken", "To Do", "soon"),
    ] {
        let resp = fixture
            .post(&ANNA, "/api/content")
            .json(&json!({ "title": title, "status": status, "deadline": deadline }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    for (date, hours) in [("2024-05-02", 3.0), ("2024-05-10", 2.5), ("2024-04-30", 4.0)] {
        let resp = fixture
            .post(&ANNA, "/api/time-entries")
            .json(&json!({ "date": date, "duration": hours }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = fixture
        .get(&ANNA, "/api/dashboard?period=week&date=2024-05-15")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    let data = &body["data"];
    assert_eq!(data["profileProvisioned"], true);
    assert_eq!(data["subject"]["id"], ANNA.id);
    assert_eq!(data["referenceDate"], "2024-05-15");
    assert_eq!(data["stale"], false);

    let weekly: Vec<&str> = data["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(weekly, vec!["Reel"]);

    let aggregate = &data["aggregate"];
    assert_eq!(aggregate["totalCount"], 2);
    assert_eq!(aggregate["completedCount"], 1);
    assert_eq!(aggregate["completionPercent"], 50.0);
    assert_eq!(aggregate["monthlyHours"], 5.5);
    assert_eq!(aggregate["monthlySalary"], 825.0);

    // Viewing another member's dashboard
    let body = json_of(
        fixture
            .get(&BOSS, &format!("/api/dashboard?userId={}&date=2024-05-15", ANNA.id))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["profileProvisioned"], false);
    assert_eq!(body["data"]["subject"]["id"], ANNA.id);
    assert_eq!(body["data"]["aggregate"]["monthlyHours"], 5.5);
}

#[tokio::test]
async fn test_dashboard_serves_last_good_data_when_a_read_fails() {
    let fixture = TestFixture::new().await;
    fixture.provision(&ANNA).await;

    let resp = fixture
        .post(&ANNA, "/api/content")
        .json(&json!({ "title": "Reel", "status": "Done", "deadline": "2024-05-14" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let path = "/api/dashboard?period=week&date=2024-05-15";
    let body = json_of(fixture.get(&ANNA, path).send().await.unwrap()).await;
    assert_eq!(body["data"]["stale"], false);
    assert!(body["data"]["notice"].is_null());
    assert_eq!(body["data"]["aggregate"]["totalCount"], 1);

    // A status the mapper does not know makes every content read fail.
    sqlx::query(
        "INSERT INTO content (id, title, owner, status, deadline) VALUES ('bad', 'Teaser', 'Anna Andersson', 'Blocked', '2024-05-15')",
    )
    .execute(&fixture.pool)
    .await
    .unwrap();

    let resp = fixture.get(&ANNA, path).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    assert_eq!(body["data"]["stale"], true);
    assert!(body["data"]["notice"]
        .as_str()
        .unwrap()
        .starts_with("Showing the last loaded data"));
    assert_eq!(body["data"]["aggregate"]["totalCount"], 1);
    assert_eq!(body["data"]["aggregate"]["completedCount"], 1);
}

#[tokio::test]
async fn test_dashboard_without_profile_and_bad_input() {
    let fixture = TestFixture::new().await;

    let resp = fixture.get(&ANNA, "/api/dashboard").send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = json_of(resp).await;
    assert_eq!(body["data"]["profileProvisioned"], false);
    assert!(body["data"]["subject"].is_null());
    assert!(body["data"]["aggregate"].is_null());
    assert_eq!(body["data"]["period"], "month");

    let resp = fixture
        .get(&ANNA, "/api/dashboard?userId=ghost")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .get(&ANNA, "/api/dashboard?date=not-a-date")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_roster_follows_team_writes() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .post(&BOSS, "/api/team")
        .json(&json!({ "id": "m1", "name": "Cecilia" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    fixture
        .wait_for_roster(|roster| roster.iter().any(|m| m.id == "m1"))
        .await;

    let resp = fixture.delete(&BOSS, "/api/team/m1").send().await.unwrap();
    assert_eq!(resp.status(), 200);
    fixture
        .wait_for_roster(|roster| roster.iter().all(|m| m.id != "m1"))
        .await;
}
