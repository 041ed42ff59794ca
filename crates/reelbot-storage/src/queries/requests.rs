// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operations on the `requests` history table.

use chrono::{DateTime, SecondsFormat, Utc};
use reelbot_core::types::HistoryRecord;
use reelbot_core::{ActorId, ReelbotError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Appends one exchange. Returns the new row id.
pub async fn insert_request(db: &Database, record: &HistoryRecord) -> Result<i64, ReelbotError> {
    let user_id = record.actor_id.0;
    let request = record.request_text.clone();
    let response = record.response_text.clone();
    let created_at = record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true);

    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO requests (user_id, user_request, bot_response, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user_id, request, response, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Up to `limit` exchanges for one actor, newest first.
///
/// Ordered by insertion id so records written within the same clock tick
/// keep their order.
pub async fn recent_requests(
    db: &Database,
    actor_id: ActorId,
    limit: u32,
) -> Result<Vec<HistoryRecord>, ReelbotError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<(String, String, String)>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT user_request, bot_response, created_at
                 FROM requests WHERE user_id = ?1
                 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt
                .query_map(params![actor_id.0, limit], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)?;

    rows.into_iter()
        .map(|(request_text, response_text, created_at)| {
            Ok(HistoryRecord {
                actor_id,
                request_text,
                response_text,
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .collect()
}

/// Total number of exchanges stored for an actor.
pub async fn count_requests(db: &Database, actor_id: ActorId) -> Result<u64, ReelbotError> {
    db.connection()
        .call(move |conn| -> Result<u64, rusqlite::Error> {
            conn.query_row(
                "SELECT COUNT(*) FROM requests WHERE user_id = ?1",
                params![actor_id.0],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n.max(0) as u64)
        })
        .await
        .map_err(map_tr_err)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ReelbotError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| ReelbotError::Storage {
            source: Box::new(e),
        })
}
