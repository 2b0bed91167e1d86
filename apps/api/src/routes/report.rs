//! `GET /api/report/today`: sales summary for today, or for an inclusive
//! `start_date`..`end_date` range when both are given.
//!
//! Calendar days are taken in the server's local time zone.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::AppState;
use kasir_core::validation::parse_report_date;
use kasir_core::{ReportWindow, SalesSummary};

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

impl ReportQuery {
    /// Resolves the window. A missing or empty date on either side falls
    /// back to today.
    fn window(&self) -> ApiResult<ReportWindow> {
        let start = self.start_date.as_deref().filter(|s| !s.is_empty());
        let end = self.end_date.as_deref().filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => {
                let start = parse_report_date("start_date", start)?;
                let end = parse_report_date("end_date", end)?;
                Ok(ReportWindow::for_range(start, end, &Local)?)
            }
            _ => Ok(ReportWindow::today(&Local::now())),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/report/today", get(sales_report))
}

async fn sales_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<SalesSummary>> {
    let window = query.window()?;
    debug!(start = %window.start, end = %window.end, "Building sales summary");

    let summary = state.db.reports().summary(&window).await?;
    Ok(Json(summary))
}
