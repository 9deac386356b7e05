//! Normalization of raw model output into a single SQL statement.

/// Strip surrounding whitespace and markdown code fences from model output.
///
/// Handles both ```` ```sql ```` and bare ```` ``` ```` fences. No SQL
/// validation happens here; execution downstream is the real check.
pub fn extract_sql(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```sql")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}
