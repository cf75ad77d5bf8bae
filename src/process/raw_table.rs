/// One input file as parsed, before it joins the unified record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// `<archive>:<entry>`, used in logs and errors.
    pub source: String,
    /// Column names from the header row, aliases not yet resolved.
    pub headers: Vec<String>,
    /// Data rows, one field per header; `None` where the CSV field was empty.
    pub rows: Vec<Vec<Option<String>>>,
}
