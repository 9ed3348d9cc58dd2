use chrono::Weekday;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Weekdays the institution is open; everything else classifies as Off.
    pub work_week: Vec<Weekday>,

    // Rate limiting
    pub rate_write_per_min: u32,
    pub rate_read_per_min: u32,

    pub api_prefix: String,
}

fn parse_work_week(raw: &str) -> Vec<Weekday> {
    raw.split(',')
        .filter_map(|day| Weekday::from_str(day.trim()).ok())
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            work_week: parse_work_week(
                &env::var("WORK_WEEK").unwrap_or_else(|_| "Mon,Tue,Wed,Thu,Fri,Sat".to_string()),
            ),

            rate_write_per_min: env::var("RATE_WRITE_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_read_per_min: env::var("RATE_READ_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_week_parses_short_and_long_names() {
        let week = parse_work_week("Mon, tuesday ,WED");
        assert_eq!(week, vec![Weekday::Mon, Weekday::Tue, Weekday::Wed]);
    }

    #[test]
    fn unknown_day_names_are_skipped() {
        let week = parse_work_week("Mon,Funday,Fri");
        assert_eq!(week, vec![Weekday::Mon, Weekday::Fri]);
    }
}
