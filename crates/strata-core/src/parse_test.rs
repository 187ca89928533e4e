use super::*;
use crate::checksum::compute_checksum;
use crate::error::CoreError;

const SAMPLE: &str = "\
CREATE TABLE IF NOT EXISTS page_views (
    tenant_id  UTINYINT,
    account_id USMALLINT,
    site_id    UINTEGER,
    viewed_at  TIMESTAMP,
    created    TIMESTAMP DEFAULT now()
);

/* rollback
DROP TABLE IF EXISTS page_views;
*/
";

#[test]
fn up_and_down_are_separated() {
    let parsed = parse_migration(SAMPLE.as_bytes()).unwrap();
    assert_eq!(parsed.up.len(), 1);
    assert!(parsed.up[0].starts_with("CREATE TABLE IF NOT EXISTS page_views ("));
    assert!(parsed.up[0].ends_with(");"));
    assert_eq!(parsed.down, vec!["DROP TABLE IF EXISTS page_views;"]);
}

#[test]
fn hash_covers_the_raw_file() {
    let parsed = parse_migration(SAMPLE.as_bytes()).unwrap();
    assert_eq!(parsed.content_hash, compute_checksum(SAMPLE.as_bytes()));
    assert_eq!(parsed.content_hash.len(), 64);

    // whitespace-only edits change the identity
    let reformatted = SAMPLE.replace("    ", "  ");
    let other = parse_migration(reformatted.as_bytes()).unwrap();
    assert_ne!(parsed.content_hash, other.content_hash);
}

#[test]
fn missing_rollback_block_yields_empty_down() {
    let input = "ALTER TABLE page_views ADD COLUMN referrer VARCHAR;\n";
    let parsed = parse_migration(input.as_bytes()).unwrap();
    assert_eq!(
        parsed.up,
        vec!["ALTER TABLE page_views ADD COLUMN referrer VARCHAR;"]
    );
    assert!(parsed.down.is_empty());
}

#[test]
fn multi_statement_file() {
    let input = "\
INSERT INTO users (id, username, email)
VALUES
    (1, 'john_doe', 'john@example.com'),
    (2, 'jane_smith', 'jane@example.com');

INSERT INTO posts (id, title, author_id)
VALUES
    (1, 'Introduction to SQL', 1),
    (2, 'Data Modeling Techniques', 2);

INSERT INTO comments (id, post_id, content)
VALUES
    (1, 1, 'Great introduction!');

/* rollback
TRUNCATE TABLE comments;
TRUNCATE TABLE posts;
TRUNCATE TABLE users;
*/";

    let parsed = parse_migration(input.as_bytes()).unwrap();
    assert_eq!(parsed.up.len(), 3);
    assert_eq!(
        parsed.up[0],
        "INSERT INTO users (id, username, email)\nVALUES\n    (1, 'john_doe', 'john@example.com'),\n    (2, 'jane_smith', 'jane@example.com');"
    );
    assert_eq!(
        parsed.up[1],
        "INSERT INTO posts (id, title, author_id)\nVALUES\n    (1, 'Introduction to SQL', 1),\n    (2, 'Data Modeling Techniques', 2);"
    );
    assert_eq!(parsed.down.len(), 3);
    assert_eq!(parsed.down[0], "TRUNCATE TABLE comments;");
    assert_eq!(parsed.down[2], "TRUNCATE TABLE users;");
}

#[test]
fn rollback_block_in_a_single_statement() {
    let input = "CREATE TABLE t (id BIGINT);\n/* rollback\nDROP TABLE t;\n*/\n";
    let parsed = parse_migration(input.as_bytes()).unwrap();
    assert_eq!(parsed.up, vec!["CREATE TABLE t (id BIGINT);"]);
    assert_eq!(parsed.down, vec!["DROP TABLE t;"]);
}

#[test]
fn closer_is_not_a_down_statement() {
    let input = "A;\n/* rollback\nB;\nC;\n*/\n";
    let parsed = parse_migration(input.as_bytes()).unwrap();
    assert_eq!(parsed.up, vec!["A;"]);
    assert_eq!(parsed.down, vec!["B;", "C;"]);
}

#[test]
fn empty_rollback_block() {
    let input = "A;\n/* rollback */\n";
    let parsed = parse_migration(input.as_bytes()).unwrap();
    assert_eq!(parsed.up, vec!["A;"]);
    assert!(parsed.down.is_empty());
}

#[test]
fn multi_statement_line_aborts_the_parse() {
    let input = "CREATE TABLE a (id BIGINT); CREATE TABLE b (id BIGINT);\n";
    let err = parse_migration(input.as_bytes()).unwrap_err();
    assert!(matches!(err, CoreError::MultiStatementLine { .. }));
}
