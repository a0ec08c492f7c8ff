use chrono::Utc;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// RFC 3339 timestamp stamped on every written report.
pub fn report_timestamp() -> String {
    Utc::now().to_rfc3339()
}
