use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_LOG_LIMIT: i64 = 100;
pub const MAX_LOG_LIMIT: i64 = 5000;

pub const STATUS_SENT: &str = "Enviado";
pub const STATUS_FAILED: &str = "Erro";

pub const TYPE_REMINDER: &str = "Lembrete";
pub const TYPE_CERTIFICATE: &str = "Certificado";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Log {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub agent: String,
    pub client: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub status: String,
    pub protocol: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLog {
    pub date: Option<DateTime<Utc>>,
    pub agent: String,
    pub client: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub protocol: String,
}

fn default_status() -> String {
    STATUS_SENT.to_string()
}

impl NewLog {
    pub fn validate(&self) -> Result<(), (&'static str, String)> {
        if self.agent.trim().is_empty() {
            return Err(("agent", "Agent is required".into()));
        }
        if self.client.trim().is_empty() {
            return Err(("client", "Client is required".into()));
        }
        if self.kind != TYPE_REMINDER && self.kind != TYPE_CERTIFICATE {
            return Err(("type", format!("Type must be {} or {}", TYPE_REMINDER, TYPE_CERTIFICATE)));
        }
        if self.status.trim().is_empty() {
            return Err(("status", "Status is required".into()));
        }
        Ok(())
    }
}

/// Raw query string for `GET /api/logs`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

/// Validated log filter: inclusive bounds and a clamped limit
#[derive(Debug, Clone, PartialEq)]
pub struct LogFilter {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl LogQuery {
    pub fn into_filter(self) -> Result<LogFilter, (&'static str, String)> {
        let start = match self.start_date.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_bound(s, false).ok_or(("startDate", format!("Invalid date '{}'", s)))?),
            None => None,
        };
        let end = match self.end_date.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_bound(s, true).ok_or(("endDate", format!("Invalid date '{}'", s)))?),
            None => None,
        };

        let limit = self.limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT);

        Ok(LogFilter { start, end, limit })
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates. A plain end date
/// covers the whole day.
fn parse_bound(value: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?
    } else {
        NaiveTime::MIN
    };
    Utc.from_local_datetime(&date.and_time(time)).single()
}

/// Dispatches on one UTC day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Dashboard analytics over a set of log rows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
    pub total: u64,
    pub successful: u64,
    /// Everything not marked as sent
    pub failed: u64,
    /// Whole percent, 0 when there are no rows
    pub success_rate: u64,
    pub today: u64,
    /// Oldest first, ending with `today`
    pub last_7_days: Vec<DayCount>,
    pub reminders: u64,
    pub certificates: u64,
    /// Today's count minus the count six days ago
    pub weekly_growth: i64,
}

fn count_where(logs: &[Log], pred: impl Fn(&Log) -> bool) -> u64 {
    logs.iter().filter(|l| pred(l)).count() as u64
}

impl LogStats {
    pub fn from_logs(logs: &[Log], today: NaiveDate) -> Self {
        let total = logs.len() as u64;
        let successful = count_where(logs, |l| l.status == STATUS_SENT);
        let success_rate = if total == 0 {
            0
        } else {
            (successful as f64 * 100.0 / total as f64).round() as u64
        };

        let last_7_days: Vec<DayCount> = (0..7u64)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| DayCount {
                date,
                count: count_where(logs, |l| l.date.date_naive() == date),
            })
            .collect();

        let weekly_growth = match (last_7_days.first(), last_7_days.last()) {
            (Some(first), Some(last)) => last.count as i64 - first.count as i64,
            _ => 0,
        };

        LogStats {
            total,
            successful,
            failed: total - successful,
            success_rate,
            today: count_where(logs, |l| l.date.date_naive() == today),
            last_7_days,
            reminders: count_where(logs, |l| l.kind == TYPE_REMINDER),
            certificates: count_where(logs, |l| l.kind == TYPE_CERTIFICATE),
            weekly_growth,
        }
    }
}
