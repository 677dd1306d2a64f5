use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::model::time_record::{
    self, NewTimeRecord, RecordStatus, TimeInterval, TimeRecord, TimeRecordPatch,
};
use crate::store::StoreClient;
use crate::utils::{format::round_hours, paging::paginate};
use crate::config::Config;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct ClockOutRequest {
    #[schema(example = 1)]
    pub record_id: u64,

    /// Must reference the currently open interval.
    #[schema(example = 0)]
    pub interval_index: usize,
}

#[derive(Serialize, ToSchema)]
pub struct TimeRecordResponse {
    pub id: u64,
    pub employee_id: u64,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub time_ins: Vec<TimeInterval>,

    /// Rounded to two decimals for display.
    #[schema(example = 8.5)]
    pub total_work_hours: f64,

    pub status: RecordStatus,
}

impl From<TimeRecord> for TimeRecordResponse {
    fn from(record: TimeRecord) -> Self {
        Self {
            id: record.id,
            employee_id: record.employee_id,
            date: record.date,
            time_ins: record.time_ins,
            total_work_hours: round_hours(record.total_work_hours),
            status: record.status,
        }
    }
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct TimeRecordQuery {
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u32>,

    #[schema(example = 10)]
    /// Items per page
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct TimeRecordListResponse {
    pub data: Vec<TimeRecordResponse>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 25)]
    pub total: usize,
}

/// Clock-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "Clocked in", body = TimeRecordResponse),
        (status = 400, description = "Already clocked in today", body = Object, example = json!({
            "error": "Already clocked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Store unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn clock_in(
    auth: AuthUser,
    store: web::Data<StoreClient>,
) -> Result<HttpResponse, AppError> {
    // "today" is the local calendar date at the moment of the check
    let today = Local::now().date_naive();
    let now = Utc::now();

    let records = store
        .time_records(auth.user_id)
        .await
        .map_err(AppError::network)?;

    if time_record::has_open_interval(&records, today) {
        return Err(AppError::InvalidState(
            "Already clocked in today".to_string(),
        ));
    }

    let record = match time_record::record_for_date(&records, today) {
        // First clock-in of the day
        None => {
            let new = NewTimeRecord {
                employee_id: auth.user_id,
                date: today,
                time_ins: vec![TimeInterval::open(now)],
                total_work_hours: 0.0,
                status: RecordStatus::Pending,
            };
            store
                .create_time_record(&new)
                .await
                .map_err(AppError::network)?
        }
        // Re-clock-in: last interval is closed, append a fresh open one
        Some(existing) => {
            let mut time_ins = existing.time_ins.clone();
            time_ins.push(TimeInterval::open(now));

            let patch = TimeRecordPatch {
                time_ins,
                total_work_hours: existing.total_work_hours,
                status: RecordStatus::Pending,
            };
            store
                .update_time_record(existing.id, &patch)
                .await
                .map_err(AppError::network)?
        }
    };

    tracing::info!(
        employee_id = auth.user_id,
        record_id = record.id,
        date = %record.date,
        "Clocked in"
    );

    Ok(HttpResponse::Ok().json(TimeRecordResponse::from(record)))
}

/// Clock-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance",
    request_body = ClockOutRequest,
    responses(
        (status = 200, description = "Clocked out", body = TimeRecordResponse),
        (status = 400, description = "No active clock-in for today", body = Object, example = json!({
            "error": "No active clock-in found for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Store unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn clock_out(
    auth: AuthUser,
    store: web::Data<StoreClient>,
    body: web::Json<ClockOutRequest>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();

    let mut record = store
        .time_record(body.record_id)
        .await
        .map_err(AppError::network)?;

    if record.employee_id != auth.user_id {
        return Err(AppError::InvalidState(
            "Record does not belong to the current user".to_string(),
        ));
    }

    if record.date != today {
        return Err(AppError::InvalidState(
            "No active clock-in found for today".to_string(),
        ));
    }

    let open_index = record.open_interval_index().ok_or_else(|| {
        AppError::InvalidState("No active clock-in found for today".to_string())
    })?;

    if open_index != body.interval_index {
        return Err(AppError::InvalidState(
            "interval_index does not reference the open interval".to_string(),
        ));
    }

    record.time_ins[open_index].time_out = Some(Utc::now());

    let patch = TimeRecordPatch {
        time_ins: record.time_ins.clone(),
        // exact elapsed hours over all closed intervals, stored unrounded
        total_work_hours: record.closed_hours(),
        status: RecordStatus::Completed,
    };

    let updated = store
        .update_time_record(record.id, &patch)
        .await
        .map_err(AppError::network)?;

    tracing::info!(
        employee_id = auth.user_id,
        record_id = updated.id,
        status = %updated.status,
        total_work_hours = updated.total_work_hours,
        "Clocked out"
    );

    Ok(HttpResponse::Ok().json(TimeRecordResponse::from(updated)))
}

/// Attendance history, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/attendance/records",
    params(TimeRecordQuery),
    responses(
        (status = 200, description = "Paginated time records", body = TimeRecordListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Store unreachable")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_time_records(
    auth: AuthUser,
    store: web::Data<StoreClient>,
    config: web::Data<Config>,
    query: web::Query<TimeRecordQuery>,
) -> Result<HttpResponse, AppError> {
    let mut records = store
        .time_records(auth.user_id)
        .await
        .map_err(AppError::network)?;

    time_record::sort_by_date_desc(&mut records);
    records.truncate(config.list_limit as usize);

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(config.page_size).max(1);
    let total = records.len();

    let data = paginate(records, page as usize, per_page as usize)
        .into_iter()
        .map(TimeRecordResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(TimeRecordListResponse {
        data,
        page,
        per_page,
        total,
    }))
}
