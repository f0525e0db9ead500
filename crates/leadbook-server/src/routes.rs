use crate::db::Database;
use crate::handlers::{agents, comments, leads, reports, tags};
use axum::routing::{delete, get};
use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Source of "now" in Unix seconds; fixed in tests.
    pub clock: fn() -> i64,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            clock: leadbook_core::time::now_utc,
        }
    }

    pub fn now(&self) -> i64 {
        (self.clock)()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/leads", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/leads/:id",
            get(leads::get_lead)
                .post(leads::update_lead)
                .patch(leads::update_lead)
                .delete(leads::delete_lead),
        )
        .route(
            "/leads/:id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/agents", get(agents::list_agents).post(agents::create_agent))
        .route("/agents/:id", delete(agents::delete_agent))
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/report/last-week", get(reports::closed_last_week))
        .route("/report/pipeline", get(reports::pipeline))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
