use anyhow::Result;
use chrono::NaiveDate;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// true  => the date is a declared holiday
/// false => the date was checked against the table and is not declared
/// A miss means the date is unknown here; callers fall back to the
/// `holidays` table, which stays authoritative.
pub static HOLIDAY_CACHE: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(10_000) // a few years of calendars across branches
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

#[inline]
fn key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Record a table-backed answer for a date
pub async fn remember(date: NaiveDate, is_holiday: bool) {
    HOLIDAY_CACHE.insert(key(date), is_holiday).await;
}

/// Mark a single date as a holiday
pub async fn mark_holiday(date: NaiveDate) {
    remember(date, true).await;
}

/// Fast-path lookup: `None` when the date has not been cached (or the
/// entry expired) and the table must be consulted
pub async fn lookup(date: NaiveDate) -> Option<bool> {
    HOLIDAY_CACHE.get(&key(date)).await
}

/// Batch mark dates as holidays
async fn batch_mark(dates: &[NaiveDate]) {
    let futures: Vec<_> = dates
        .iter()
        .map(|d| HOLIDAY_CACHE.insert(key(*d), true))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load the declared holiday calendar into the in-memory cache (batched)
pub async fn warmup_holiday_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (NaiveDate,)>(
        r#"
        SELECT date
        FROM holidays
        ORDER BY date
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (date,) = row?;
        batch.push(date);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_mark(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining dates
    if !batch.is_empty() {
        batch_mark(&batch).await;
    }

    log::info!("Holiday cache warmup complete: {} dates", total_count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[actix_web::test]
    async fn lookup_distinguishes_unknown_from_known_regular_days() {
        let holiday = d(2031, 1, 26);
        let regular = d(2031, 1, 27);
        let unknown = d(2031, 1, 28);

        mark_holiday(holiday).await;
        remember(regular, false).await;

        assert_eq!(lookup(holiday).await, Some(true));
        assert_eq!(lookup(regular).await, Some(false));
        // An uncached date is unknown, not "no holiday" — the caller has
        // to consult the table before classifying the day.
        assert_eq!(lookup(unknown).await, None);
    }

    #[actix_web::test]
    async fn declaring_overrides_a_remembered_regular_day() {
        let date = d(2031, 3, 14);
        remember(date, false).await;
        mark_holiday(date).await;
        assert_eq!(lookup(date).await, Some(true));
    }
}
