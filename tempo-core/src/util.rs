/// Longest SQL fragment the diagnostics will print before cutting off.
const PRINTABLE_SQL_LIMIT: usize = 500;

/// Bounded copy of a SQL string for log and error messages. Cuts on a char
/// boundary so dumped values never split a multi-byte sequence.
pub fn printable_sql(sql: &str) -> String {
    match sql.char_indices().nth(PRINTABLE_SQL_LIMIT) {
        Some((i, _)) => format!("{}...", sql[..i].trim_end()),
        None => sql.trim_end().to_owned(),
    }
}
