//! Handlers for shifts: drafts, the publish cycle, and week duplication.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use shiftboard_core::availability::DayStatus;
use shiftboard_core::error::CoreError;
use shiftboard_core::shift::{is_week_start, week_start_of, ShiftStatus};
use shiftboard_core::types::{Area, Assignee, DocId};
use shiftboard_store::models::shift::{CreateShift, ShiftDoc};
use shiftboard_store::repositories::{AvailabilityRepo, ShiftRepo, StaffRepo, TimeOffRepo};

use crate::error::AppResult;
use crate::handlers::require_manager;
use crate::middleware::auth::AuthUser;
use crate::notifications::{self, EmailAction};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateShiftBody {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub area: Area,
    pub role: String,
    /// Directory entry to assign. When absent, `assignee_name` creates an
    /// unassigned-account shift (name only, no mailbox).
    pub staff_id: Option<DocId>,
    pub assignee_name: Option<String>,
    pub note: Option<String>,
}

/// Advisory conflicts reported back to the manager at creation time.
/// They never block the shift (approved time off and availability are
/// consulted, not enforced, at the store level).
#[derive(Debug, Default, Serialize)]
pub struct ShiftWarnings {
    pub approved_time_off: bool,
    pub unavailable_weekday: bool,
}

#[derive(Debug, Serialize)]
pub struct CreatedShift {
    pub shift: ShiftDoc,
    pub warnings: ShiftWarnings,
}

/// POST /api/v1/shifts
///
/// Create a draft shift. Always legal, even for future weeks; the
/// response carries advisory warnings when the assignee has approved time
/// off that date or an unavailable weekday in their effective pattern.
pub async fn create_shift(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateShiftBody>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;

    let assignee = match &input.staff_id {
        Some(staff_id) => {
            let staff = StaffRepo::find_by_id(&state.store, staff_id)
                .await
                .ok_or_else(|| CoreError::NotFound {
                    entity: "StaffMember",
                    id: staff_id.clone(),
                })?;
            Assignee {
                uid: staff.claimed_by_uid,
                name: staff.name,
                email: staff.email,
            }
        }
        None => {
            let name = input
                .assignee_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| {
                    CoreError::Validation(
                        "Either staff_id or assignee_name must be provided".into(),
                    )
                })?;
            Assignee {
                uid: String::new(),
                name: name.to_string(),
                email: String::new(),
            }
        }
    };

    let mut warnings = ShiftWarnings::default();
    if !assignee.uid.is_empty() {
        warnings.approved_time_off =
            !TimeOffRepo::approved_for(&state.store, &assignee.uid, input.date)
                .await
                .is_empty();
        if let Some(effective) = AvailabilityRepo::effective_for(&state.store, &assignee.uid).await
        {
            warnings.unavailable_weekday =
                effective.days.day(input.date.weekday()) == DayStatus::Unavailable;
        }
    }

    let shift = ShiftRepo::create(
        &state.store,
        CreateShift {
            week_start: week_start_of(input.date),
            date: input.date,
            start: input.start,
            end: input.end,
            area: input.area,
            role: input.role,
            assignee,
            note: input.note,
        },
    )
    .await;
    tracing::info!(shift_id = %shift.id, date = %shift.date, area = %shift.area, "Draft shift created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedShift { shift, warnings },
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week_start: NaiveDate,
    pub area: Area,
}

/// GET /api/v1/shifts?week_start=&area=
///
/// The week's schedule. Managers see drafts and published shifts;
/// employees only ever see the published schedule.
pub async fn list_shifts(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<impl IntoResponse> {
    let is_manager = require_manager(&state, &user).await.is_ok();
    let status = if is_manager {
        None
    } else {
        Some(ShiftStatus::Published)
    };
    let shifts =
        ShiftRepo::list_week_area(&state.store, query.week_start, query.area, status).await;
    Ok(Json(DataResponse { data: shifts }))
}

/// DELETE /api/v1/shifts/{id}
///
/// Manager deletes a draft. Published shifts are only replaced via
/// publish, never deleted here (409).
pub async fn delete_shift(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    ShiftRepo::delete_draft(&state.store, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct WeekBody {
    pub week_start: NaiveDate,
    pub area: Area,
}

/// Publish and duplicate operate on whole weeks, keyed by their Monday.
fn require_monday(week_start: NaiveDate) -> Result<(), CoreError> {
    if !is_week_start(week_start) {
        return Err(CoreError::Validation(format!(
            "week_start {week_start} is not a Monday"
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct PublishOutcome {
    pub published: usize,
    /// Distinct employees emailed their share of the new schedule.
    pub notified: usize,
}

/// POST /api/v1/shifts/publish
///
/// Replace the live week wholesale: prior published shifts for the
/// week + area are deleted, drafts flip to published. Afterwards each
/// affected employee is mailed their own shifts (best-effort; delivery
/// problems never undo the publish).
pub async fn publish_week(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<WeekBody>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    require_monday(input.week_start)?;

    let published = ShiftRepo::publish_week(&state.store, input.week_start, input.area).await?;
    tracing::info!(
        week_start = %input.week_start,
        area = %input.area,
        published = published.len(),
        "Week published"
    );

    // Post-commit notification fan-out; the publish has already succeeded.
    let notified = match notifications::dispatch(
        &state.store,
        state.mailer.as_ref(),
        EmailAction::SchedulePublishedWeek {
            week_start: input.week_start,
            area: input.area,
        },
    )
    .await
    {
        Ok(outcome) => outcome.notified,
        Err(err) => {
            tracing::warn!(error = %err, "Publish notifications failed; schedule stays published");
            0
        }
    };

    Ok(Json(DataResponse {
        data: PublishOutcome {
            published: published.len(),
            notified,
        },
    }))
}

/// POST /api/v1/shifts/duplicate
///
/// Seed the week from the previous one: clones the previous week's
/// published shifts (or its drafts when nothing was published) into
/// drafts dated one week later.
pub async fn duplicate_week(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<WeekBody>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    require_monday(input.week_start)?;
    let shifts =
        ShiftRepo::duplicate_from_previous_week(&state.store, input.week_start, input.area).await?;
    tracing::info!(
        week_start = %input.week_start,
        area = %input.area,
        created = shifts.len(),
        "Week duplicated from previous"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: shifts })))
}
