use super::statement::{self, SortOrder};
use super::*;
use crate::record::Record;
use crate::values;

#[test]
fn builds_placeholders_in_order() {
    let mut q = sql("SELECT * FROM users WHERE a = ");
    q.push_bind(1).push(" AND b = ").push_bind("x");

    assert_eq!(q.to_sql(), "SELECT * FROM users WHERE a = ? AND b = ?");
    assert_eq!(q.params(), &[Value::Int(1), Value::from("x")]);
}

#[test]
fn bind_adds_params_without_placeholders() {
    let mut q = sql("SELECT * FROM users WHERE age > ? AND name = ?");
    q.bind(18).bind("a");
    assert_eq!(q.placeholder_count(), 0);
    assert_eq!(q.params().len(), 2);
    assert!(q.validate().is_ok());
}

#[test]
fn strip_prefix_skips_comments_and_parens() {
    assert_eq!(strip_sql_prefix("  -- c\n/* x */ (SELECT 1)"), "SELECT 1)");
    assert_eq!(strip_sql_prefix("# note\nSHOW INDEX FROM t"), "SHOW INDEX FROM t");
    assert_eq!(strip_sql_prefix("/* unclosed"), "");
}

#[test]
fn keyword_match_requires_word_boundary() {
    assert!(starts_with_keyword("select * from t", "SELECT"));
    assert!(starts_with_keyword("REPLACE INTO t", "REPLACE"));
    assert!(!starts_with_keyword("SELECTED", "SELECT"));
    assert!(!starts_with_keyword("SEL", "SELECT"));
}

// ==================== Statement templates ====================

#[test]
fn simple_templates() {
    assert_eq!(statement::select_all("users").to_sql(), "SELECT * FROM users");
    assert_eq!(statement::truncate("users").to_sql(), "TRUNCATE users");
    assert_eq!(statement::drop_table("users").to_sql(), "DROP TABLE IF EXISTS users");
    assert_eq!(statement::describe_table("users").to_sql(), "DESCRIBE users");
    assert_eq!(statement::show_indexes("users").to_sql(), "SHOW INDEX FROM users");
    assert_eq!(
        statement::alter_table_add_column("users", "age", "INT").to_sql(),
        "ALTER TABLE users ADD COLUMN age INT"
    );
}

#[test]
fn by_id_templates_bind_the_id() {
    let q = statement::select_by_id("users", 5);
    assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id = ?");
    assert_eq!(q.params(), &[Value::Int(5)]);

    let q = statement::delete_by_id("users", 5);
    assert_eq!(q.to_sql(), "DELETE FROM users WHERE id = ?");
    assert_eq!(q.params(), &[Value::Int(5)]);
}

#[test]
fn where_templates_pass_args_verbatim() {
    let q = statement::select_where("users", "age > ? AND name = ?", &values![18, "a"]);
    assert_eq!(q.to_sql(), "SELECT * FROM users WHERE age > ? AND name = ?");
    assert_eq!(q.params(), values![18, "a"].as_slice());

    let q = statement::delete_where("users", "id = ?", &values![3]);
    assert_eq!(q.to_sql(), "DELETE FROM users WHERE id = ?");
    assert_eq!(q.params(), &[Value::Int(3)]);
}

#[test]
fn create_table_joins_definitions() {
    let q = statement::create_table("users", &[("id", "INT PRIMARY KEY"), ("name", "VARCHAR(50)")]);
    assert_eq!(
        q.to_sql(),
        "CREATE TABLE IF NOT EXISTS users (id INT PRIMARY KEY,name VARCHAR(50))"
    );
}

#[test]
fn permission_templates() {
    assert_eq!(
        statement::grant_permission("users", "'bob'@'%'", "SELECT").to_sql(),
        "GRANT SELECT ON users TO 'bob'@'%'"
    );
    assert_eq!(
        statement::revoke_permission("users", "'bob'@'%'", "SELECT").to_sql(),
        "REVOKE SELECT ON users FROM 'bob'@'%'"
    );
}

#[test]
fn join_defaults_to_both_tables() {
    let q = statement::join("users", "orders", "users.id = orders.user_id", None);
    assert_eq!(
        q.to_sql(),
        "SELECT users.*, orders.* FROM users JOIN orders ON users.id = orders.user_id"
    );

    let q = statement::join("users", "orders", "users.id = orders.user_id", Some(&["users.name", "orders.total"][..]));
    assert_eq!(
        q.to_sql(),
        "SELECT users.name, orders.total FROM users JOIN orders ON users.id = orders.user_id"
    );
}

#[test]
fn union_defaults_to_distinct_union() {
    assert_eq!(
        statement::union("a", "b", None, false).to_sql(),
        "SELECT * FROM a UNION SELECT * FROM b"
    );
    assert_eq!(
        statement::union("a", "b", Some(&["id", "name"][..]), true).to_sql(),
        "SELECT id, name FROM a UNION ALL SELECT id, name FROM b"
    );
}

#[test]
fn order_by_defaults_to_asc() {
    assert_eq!(
        statement::order_by("users", "name", SortOrder::default()).to_sql(),
        "SELECT * FROM users ORDER BY name ASC"
    );
    assert_eq!(
        statement::order_by("users", "name", SortOrder::Desc).to_sql(),
        "SELECT * FROM users ORDER BY name DESC"
    );
}

#[test]
fn group_by_with_and_without_having() {
    assert_eq!(
        statement::group_by("orders", &["user_id"], None).to_sql(),
        "SELECT user_id FROM orders GROUP BY user_id"
    );
    assert_eq!(
        statement::group_by("orders", &["user_id", "status"], Some("COUNT(*) > 1")).to_sql(),
        "SELECT user_id, status FROM orders GROUP BY user_id, status HAVING COUNT(*) > 1"
    );
}

#[test]
fn distinct_defaults_to_star() {
    assert_eq!(statement::distinct("users", None).to_sql(), "SELECT DISTINCT * FROM users");
    assert_eq!(
        statement::distinct("users", Some(&["city"][..])).to_sql(),
        "SELECT DISTINCT city FROM users"
    );
}

#[test]
fn limit_renders_offset() {
    assert_eq!(statement::limit("users", 10, 0).to_sql(), "SELECT * FROM users LIMIT 10 OFFSET 0");
    assert_eq!(statement::limit("users", 10, 20).to_sql(), "SELECT * FROM users LIMIT 10 OFFSET 20");
}

#[test]
fn index_templates() {
    assert_eq!(
        statement::create_index("users", "idx_name", &["last", "first"]).to_sql(),
        "CREATE INDEX idx_name ON users (last, first)"
    );
}

#[test]
fn insert_into_select_template() {
    assert_eq!(
        statement::insert_into_select("archive", &["id", "name"], "SELECT id, name FROM users").to_sql(),
        "INSERT INTO archive (id, name) SELECT id, name FROM users"
    );
}

#[test]
fn set_value_with_optional_condition() {
    let q = statement::set_value("users", "active", 0, None);
    assert_eq!(q.to_sql(), "UPDATE users SET active = ?");
    assert_eq!(q.params(), &[Value::Int(0)]);

    let q = statement::set_value("users", "active", 1, Some("id = 3"));
    assert_eq!(q.to_sql(), "UPDATE users SET active = ? WHERE id = 3");
}

#[test]
fn insert_aligns_placeholders_with_record_order() {
    let data = Record::new().set("id", 1).set("name", "a");
    let q = statement::insert("users", &data);
    assert_eq!(q.to_sql(), "INSERT INTO users (id,name) VALUES (?,?)");
    assert_eq!(q.placeholder_count(), q.params().len());
    assert_eq!(q.params(), values![1, "a"].as_slice());
}

#[test]
fn update_where_appends_args_after_values() {
    let data = Record::new().set("name", "b").set("age", 30);
    let q = statement::update_where("users", "id = ?", &data, &values![1]).unwrap();
    assert_eq!(q.to_sql(), "UPDATE users SET name = ?, age = ? WHERE id = ?");
    assert_eq!(q.params(), values!["b", 30, 1].as_slice());
}

#[test]
fn update_where_requires_columns() {
    let err = statement::update_where("users", "id = 1", &Record::new(), &[]).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn replace_binds_id_first() {
    let data = Record::new().set("name", "c");
    let q = statement::replace("users", 7, &data);
    assert_eq!(q.to_sql(), "REPLACE INTO users (id,name) VALUES (?,?)");
    assert_eq!(q.params(), values![7, "c"].as_slice());
}

#[test]
fn probe_is_unscoped_unless_requested() {
    assert_eq!(
        statement::column_types_probe("users", false).to_sql(),
        "SELECT COLUMN_NAME, DATA_TYPE FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_NAME = 'users'"
    );
    assert!(statement::column_types_probe("users", true)
        .to_sql()
        .ends_with("WHERE TABLE_NAME = 'users' AND TABLE_SCHEMA = DATABASE()"));
}
