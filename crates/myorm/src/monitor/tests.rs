use super::*;
use tracing::Level;

#[test]
fn detects_dml_types() {
    assert_eq!(QueryType::from_sql("SELECT * FROM t"), QueryType::Select);
    assert_eq!(QueryType::from_sql("  insert into t (a) values (?)"), QueryType::Insert);
    assert_eq!(QueryType::from_sql("UPDATE t SET a = ?"), QueryType::Update);
    assert_eq!(QueryType::from_sql("DELETE FROM t WHERE id = ?"), QueryType::Delete);
    assert_eq!(QueryType::from_sql("REPLACE INTO t (id) VALUES (?)"), QueryType::Replace);
}

#[test]
fn detects_ddl_and_show() {
    assert_eq!(QueryType::from_sql("CREATE TABLE IF NOT EXISTS t (a INT)"), QueryType::Ddl);
    assert_eq!(QueryType::from_sql("TRUNCATE t"), QueryType::Ddl);
    assert_eq!(QueryType::from_sql("DROP TABLE IF EXISTS t"), QueryType::Ddl);
    assert_eq!(QueryType::from_sql("SHOW INDEX FROM t"), QueryType::Show);
    assert_eq!(QueryType::from_sql("DESCRIBE t"), QueryType::Show);
    assert_eq!(QueryType::from_sql("GRANT SELECT ON t TO u"), QueryType::Other);
}

#[test]
fn parenthesised_union_is_select() {
    assert_eq!(QueryType::from_sql("(SELECT 1) UNION (SELECT 2)"), QueryType::Select);
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate_sql_bytes("abc", 10), "abc");
    assert_eq!(truncate_sql_bytes("abcdef", 3), "abc");
    // 'é' is two bytes; cutting inside it backs off.
    assert_eq!(truncate_sql_bytes("aé", 2), "a");
}

#[test]
fn hook_truncates_long_sql() {
    let hook = TracingSqlHook::new().max_sql_length(6);
    assert_eq!(hook.truncate_sql("SELECT * FROM t"), "SELECT...");
    assert_eq!(hook.clone().no_truncate().truncate_sql("SELECT * FROM t"), "SELECT * FROM t");
}

#[test]
fn hook_defaults() {
    let hook = TracingSqlHook::default().level(Level::INFO);
    assert_eq!(hook.level, Level::INFO);
    assert_eq!(hook.max_sql_length, Some(200));
}

#[test]
fn context_classifies_sql() {
    let ctx = StatementContext::new("users", "SELECT * FROM users", 0);
    assert_eq!(ctx.query_type, QueryType::Select);
    assert_eq!(ctx.table, "users");
}
