use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

/// GitHub's own default and ceiling for `per_page`.
pub const DEFAULT_PER_PAGE: usize = 30;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Follower {
    pub fn new(login: &str, id: u64) -> Self {
        Self {
            login: login.to_string(),
            id,
            avatar_url: format!("https://avatars.githubusercontent.com/u/{id}?v=4"),
            kind: "User".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub per_page: Option<usize>,
    pub page: Option<usize>,
}

pub type Db = Arc<RwLock<HashMap<String, Vec<Follower>>>>;

/// Router seeded with `octocat` (three followers) and `loner` (none).
pub fn app() -> Router {
    let mut users = HashMap::new();
    users.insert(
        "octocat".to_string(),
        vec![
            Follower::new("mojombo", 1),
            Follower::new("defunkt", 2),
            Follower::new("pjhyett", 3),
        ],
    );
    users.insert("loner".to_string(), Vec::new());
    app_with(Arc::new(RwLock::new(users)))
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/users/{username}/followers", get(list_followers))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_followers(
    State(db): State<Db>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Follower>>, (StatusCode, Json<Value>)> {
    let users = db.read().await;
    let followers = users.get(&username).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Not Found" })),
        )
    })?;

    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let page = params.page.unwrap_or(1).max(1);
    debug!(%username, per_page, page, "listing followers");

    let slice = followers
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();
    Ok(Json(slice))
}
