// src/schema/columns.rs
//
// Canonical column names of the merged campaign records.

pub const CLIENT_ID: &str = "client_id";

// client
pub const AGE: &str = "age";
pub const JOB: &str = "job";
pub const MARITAL: &str = "marital";
pub const EDUCATION: &str = "education";
pub const CREDIT_DEFAULT: &str = "credit_default";
pub const MORTGAGE: &str = "mortgage";

// campaign
pub const NUMBER_CONTACTS: &str = "number_contacts";
pub const CONTACT_DURATION: &str = "contact_duration";
pub const PREVIOUS_CAMPAIGN_CONTACTS: &str = "previous_campaign_contacts";
pub const PREVIOUS_OUTCOME: &str = "previous_outcome";
pub const CAMPAIGN_OUTCOME: &str = "campaign_outcome";
pub const LAST_CONTACT_DATE: &str = "last_contact_date";
pub const DAY: &str = "day";
pub const MONTH: &str = "month";

// economics
pub const CONS_PRICE_IDX: &str = "cons_price_idx";
pub const EURIBOR_THREE_MONTHS: &str = "euribor_three_months";
