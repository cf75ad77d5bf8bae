// src/schema/types.rs

use super::columns::*;

/// One of the fixed output tables: its file stem and its columns, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSpec {
    /// `client` → `client.csv`
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

pub const CLIENT: TableSpec = TableSpec {
    name: "client",
    columns: &[
        CLIENT_ID,
        AGE,
        JOB,
        MARITAL,
        EDUCATION,
        CREDIT_DEFAULT,
        MORTGAGE,
    ],
};

pub const CAMPAIGN: TableSpec = TableSpec {
    name: "campaign",
    columns: &[
        CLIENT_ID,
        NUMBER_CONTACTS,
        CONTACT_DURATION,
        PREVIOUS_CAMPAIGN_CONTACTS,
        PREVIOUS_OUTCOME,
        CAMPAIGN_OUTCOME,
        LAST_CONTACT_DATE,
    ],
};

pub const ECONOMICS: TableSpec = TableSpec {
    name: "economics",
    columns: &[CLIENT_ID, CONS_PRICE_IDX, EURIBOR_THREE_MONTHS],
};

pub const OUTPUT_TABLES: [TableSpec; 3] = [CLIENT, CAMPAIGN, ECONOMICS];
