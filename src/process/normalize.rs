// src/process/normalize.rs
use anyhow::Result;
use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{date_parser, RecordSet};
use crate::schema::columns::{
    CAMPAIGN_OUTCOME, CREDIT_DEFAULT, DAY, EDUCATION, JOB, LAST_CONTACT_DATE, MONTH, MORTGAGE,
    PREVIOUS_OUTCOME,
};

/// How a categorical column collapses to a 0/1 flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRule {
    /// `yes` in any case → 1; padding or extra characters don't count.
    Yes,
    /// exactly `success` → 1.
    Success,
}

impl FlagRule {
    /// Missing and every unlisted value map to 0.
    pub fn apply(self, value: Option<&str>) -> i64 {
        let hit = match (self, value) {
            (FlagRule::Yes, Some(v)) => v.eq_ignore_ascii_case("yes"),
            (FlagRule::Success, Some(v)) => v == "success",
            (_, None) => false,
        };
        i64::from(hit)
    }
}

/// Per-column cleaning applied to the unified set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Job,
    Education,
    Flag(FlagRule),
}

pub static COLUMN_RULES: &[(&str, Rule)] = &[
    (JOB, Rule::Job),
    (EDUCATION, Rule::Education),
    (CREDIT_DEFAULT, Rule::Flag(FlagRule::Yes)),
    (MORTGAGE, Rule::Flag(FlagRule::Yes)),
    (PREVIOUS_OUTCOME, Rule::Flag(FlagRule::Success)),
    (CAMPAIGN_OUTCOME, Rule::Flag(FlagRule::Yes)),
];

/// `admin.` → `admin`, `blue-collar` → `blue_collar`
pub fn clean_job(value: &str) -> String {
    value.replace('.', "").replace('-', "_")
}

/// `basic.4y` → `basic_4y`; `unknown` becomes missing.
pub fn clean_education(value: &str) -> Option<String> {
    if value == "unknown" {
        None
    } else {
        Some(value.replace('.', "_"))
    }
}

impl Rule {
    fn apply(self, raw: &StringArray) -> ArrayRef {
        match self {
            Rule::Job => {
                let out: StringArray = raw.iter().map(|v| v.map(clean_job)).collect();
                Arc::new(out)
            }
            Rule::Education => {
                let out: StringArray = raw.iter().map(|v| v.and_then(clean_education)).collect();
                Arc::new(out)
            }
            Rule::Flag(flag) => {
                let out: Int64Array = raw.iter().map(|v| Some(flag.apply(v))).collect();
                Arc::new(out)
            }
        }
    }
}

/// Apply every column rule, then derive `last_contact_date`.
///
/// Rules whose column is absent are skipped; the gap surfaces when the
/// output tables are projected.
#[instrument(level = "info", skip(set), fields(rows = set.num_rows()))]
pub fn normalize(set: &mut RecordSet, contact_year: i32) -> Result<()> {
    for &(column, rule) in COLUMN_RULES {
        let Some(raw) = set.string_column(column)? else {
            debug!(column, "column absent, rule skipped");
            continue;
        };
        let cleaned = rule.apply(raw);
        set.set_column(column, cleaned)?;
        debug!(column, ?rule, "normalized");
    }

    derive_last_contact_date(set, contact_year)?;
    info!(columns = set.column_names().len(), "normalization done");
    Ok(())
}

/// Append `last_contact_date` built from `day` and `month`; needs both.
pub fn derive_last_contact_date(set: &mut RecordSet, year: i32) -> Result<()> {
    let (Some(days), Some(months)) = (set.string_column(DAY)?, set.string_column(MONTH)?) else {
        debug!("day/month absent, {} not derived", LAST_CONTACT_DATE);
        return Ok(());
    };

    let dates: StringArray = days
        .iter()
        .zip(months.iter())
        .map(|(day, month)| date_parser::contact_date(year, month, day))
        .collect();
    let missing = dates.null_count();
    if missing > 0 {
        debug!(missing, "rows without a valid contact date");
    }
    set.set_column(LAST_CONTACT_DATE, Arc::new(dates))
}
