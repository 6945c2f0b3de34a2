use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::models::business_date::PingResponse;

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
