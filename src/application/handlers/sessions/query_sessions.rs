//! QuerySessionsHandler - expands schedules into sessions for clients.
//!
//! The client window is in wall-clock dates; expansion runs over an
//! absolute range widened past every possible zone offset, and the results
//! are filtered back down by their local date.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, SessionId, TenantId};
use crate::domain::scheduling::{
    materialize, validate_window, widened_range, ScheduleException, Session, SessionFilter,
};
use crate::ports::{ExceptionRepository, ScheduleRepository, SummaryReader};

/// Summaries are batch-fetched in chunks of this size.
const SUMMARY_BATCH_SIZE: usize = 100;

/// A range query over a tenant's sessions.
#[derive(Debug, Clone)]
pub struct SessionQuery {
    pub tenant_id: TenantId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub filter: SessionFilter,
}

/// Handler for the session read path.
pub struct QuerySessionsHandler {
    schedules: Arc<dyn ScheduleRepository>,
    exceptions: Arc<dyn ExceptionRepository>,
    summaries: Arc<dyn SummaryReader>,
}

impl QuerySessionsHandler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        exceptions: Arc<dyn ExceptionRepository>,
        summaries: Arc<dyn SummaryReader>,
    ) -> Self {
        Self {
            schedules,
            exceptions,
            summaries,
        }
    }

    /// Materializes all sessions in the window, merged, filtered, and
    /// sorted ascending by absolute start.
    pub async fn query(&self, q: SessionQuery) -> Result<Vec<Session>, DomainError> {
        validate_window(q.start_date, q.end_date)?;

        let schedules = match &q.filter.program_ids {
            Some(programs) => self.schedules.list_by_programs(&q.tenant_id, programs).await?,
            None => self.schedules.list(&q.tenant_id).await?,
        };

        let (range_start, range_end) = widened_range(q.start_date, q.end_date);
        let no_summaries = HashMap::new();

        let mut sessions = Vec::new();
        for schedule in &schedules {
            let exceptions = self
                .exceptions
                .list_in_range(&q.tenant_id, &schedule.schedule_id, q.start_date, q.end_date)
                .await?;
            let by_date: HashMap<NaiveDate, ScheduleException> = exceptions
                .into_iter()
                .map(|e| (e.occurrence_date, e))
                .collect();

            sessions.extend(materialize(
                schedule,
                range_start,
                range_end,
                &by_date,
                &no_summaries,
            )?);
        }

        let ids: Vec<SessionId> = sessions.iter().map(|s| s.session_id.clone()).collect();
        let mut summaries = HashMap::new();
        for chunk in ids.chunks(SUMMARY_BATCH_SIZE) {
            summaries.extend(self.summaries.get_many(&q.tenant_id, chunk).await?);
        }

        let mut sessions: Vec<Session> = sessions
            .into_iter()
            .filter(|s| s.date >= q.start_date && s.date <= q.end_date)
            .filter(|s| q.filter.matches(s))
            .map(|mut s| {
                if let Some(summary) = summaries.get(&s.session_id) {
                    s.booked_count = summary.booked_count;
                    s.waitlist_count = summary.waitlist_count;
                }
                s
            })
            .collect();
        sessions.sort_by_key(|s| s.start);
        Ok(sessions)
    }

    /// Single-session mode: loads one schedule and one date's exception.
    ///
    /// Returns `None` when the schedule is missing, the date is cancelled,
    /// or the date is not an occurrence of the pattern.
    pub async fn get_session(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
    ) -> Result<Option<Session>, DomainError> {
        let Some(schedule) = self.schedules.get(tenant, session_id.schedule_id()).await? else {
            return Ok(None);
        };

        let date = session_id.date();
        let mut by_date = HashMap::new();
        if let Some(exception) = self
            .exceptions
            .get(tenant, session_id.schedule_id(), date)
            .await?
        {
            by_date.insert(date, exception);
        }

        let (range_start, range_end) = widened_range(date, date);
        let mut summaries = HashMap::new();
        if let Some(summary) = self.summaries.get(tenant, session_id).await? {
            summaries.insert(session_id.clone(), summary);
        }

        let sessions = materialize(&schedule, range_start, range_end, &by_date, &summaries)?;
        Ok(sessions.into_iter().find(|s| s.date == date))
    }
}
