use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Admission lead pipeline state, stored as a lowercase string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Won,
    Lost,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_its_column_form() {
        for status in [
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Won,
            LeadStatus::Lost,
        ] {
            assert_eq!(LeadStatus::from_str(&status.to_string()).unwrap(), status);
        }
        assert!(LeadStatus::from_str("converted").is_err());
    }
}
