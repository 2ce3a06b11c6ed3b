//! End-to-end formatting tests: SQL text in, formatted SQL text out.

use indoc::indoc;
use pretty_assertions::assert_eq;

use sqlpress_core::SqlDialect;

use crate::config::FormatterConfig;
use crate::format::{FormatError, SqlFormatter, format_sql, format_sql_with_config};

fn format(sql: &str) -> String {
    format_sql(sql).unwrap()
}

fn format_with(sql: &str, config: FormatterConfig) -> String {
    format_sql_with_config(sql, config).unwrap()
}

mod clause_layout {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_select_lines_up_clauses() {
        assert_eq!(
            format("select id, name from users where id = 1"),
            indoc! {"
                SELECT id, name
                  FROM users
                 WHERE id = 1;
            "}
        );
    }

    #[test]
    fn group_by_widens_the_clause_column() {
        assert_eq!(
            format("select dept, count(*) from emp group by dept having count(*) > 1"),
            indoc! {"
                  SELECT dept, count(*)
                    FROM emp
                GROUP BY dept
                  HAVING count(*) > 1;
            "}
        );
    }

    #[test]
    fn order_by_and_limit_join_the_group() {
        assert_eq!(
            format("select a from t order by a desc limit 10"),
            indoc! {"
                  SELECT a
                    FROM t
                ORDER BY a DESC
                   LIMIT 10;
            "}
        );
    }

    #[test]
    fn joins_continue_under_the_from_clause() {
        assert_eq!(
            format("select * from a join b on a.id = b.id"),
            indoc! {"
                SELECT *
                  FROM a
                       INNER JOIN b ON a.id = b.id;
            "}
        );
    }

    #[test]
    fn union_operands_share_one_alignment_group() {
        assert_eq!(
            format("select a from t union select b from u"),
            indoc! {"
                SELECT a
                  FROM t
                UNION
                SELECT b
                  FROM u;
            "}
        );
    }

    #[test]
    fn subquery_aligns_at_its_own_column() {
        assert_eq!(
            format("select a from t where a in (select b from u)"),
            indoc! {"
                SELECT a
                  FROM t
                 WHERE a IN (SELECT b
                               FROM u);
            "}
        );
    }

    #[test]
    fn cte_body_gets_a_definition_block() {
        assert_eq!(
            format("with x as (select a from t) select a from x"),
            indoc! {"
                WITH x AS (
                    SELECT a
                      FROM t
                )
                SELECT a
                  FROM x;
            "}
        );
    }

    #[test]
    fn case_branches_align_under_the_case_keyword() {
        assert_eq!(
            format("select case when a = 1 then 'x' else 'y' end from t"),
            indoc! {"
                SELECT CASE
                            WHEN a = 1 THEN 'x'
                            ELSE 'y'
                            END
                  FROM t;
            "}
        );
    }

    #[test]
    fn values_rows_stay_inline() {
        assert_eq!(format("values (1, 2), (3, 4)"), "VALUES (1, 2), (3, 4);\n");
    }
}

mod style_options {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowercase_keywords() {
        let config = FormatterConfig::default().with_uppercase_keywords(false);
        assert_eq!(
            format_with("SELECT id FROM users", config),
            indoc! {"
                select id
                  from users;
            "}
        );
    }

    #[test]
    fn break_after_list_comma_resumes_at_the_list_column() {
        let config = FormatterConfig {
            nl_after_comma: true,
            ..FormatterConfig::default()
        };
        assert_eq!(
            format_with("select a, b from t", config),
            indoc! {"
                SELECT a,
                       b
                  FROM t;
            "}
        );
    }

    #[test]
    fn space_before_comma_affects_only_commas() {
        let config = FormatterConfig {
            space_before_comma_in_list: true,
            ..FormatterConfig::default()
        };
        assert_eq!(
            format_with("select a, b from t", config),
            indoc! {"
                SELECT a , b
                  FROM t;
            "}
        );
    }

    #[test]
    fn always_wrap_names_quotes_everything() {
        let config = FormatterConfig::default().with_always_wrap_names(true);
        assert_eq!(
            format_with("select id from users", config),
            indoc! {"
                SELECT \"id\"
                  FROM \"users\";
            "}
        );
    }

    #[test]
    fn statements_are_separated_by_the_configured_gap() {
        assert_eq!(format("select 1; select 2"), "SELECT 1;\n\nSELECT 2;\n");

        let packed = FormatterConfig::default().with_lines_between_queries(0);
        assert_eq!(
            format_with("select 1; select 2", packed),
            "SELECT 1;\nSELECT 2;\n"
        );

        let roomy = FormatterConfig::default().with_lines_between_queries(2);
        assert_eq!(
            format_with("select 1; select 2", roomy),
            "SELECT 1;\n\n\nSELECT 2;\n"
        );
    }
}

mod identifiers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reserved_words_keep_their_quotes() {
        assert_eq!(
            format("select \"order\" from t"),
            indoc! {"
                SELECT \"order\"
                  FROM t;
            "}
        );
    }

    #[test]
    fn gratuitous_quotes_are_dropped() {
        assert_eq!(
            format("select \"id\" from \"users\""),
            indoc! {"
                SELECT id
                  FROM users;
            "}
        );
    }

    #[test]
    fn mysql_dialect_quotes_with_backticks() {
        let formatter = SqlFormatter::default().with_dialect(SqlDialect::MySql);
        assert_eq!(
            formatter.format("select `order` from t").unwrap(),
            indoc! {"
                SELECT `order`
                  FROM t;
            "}
        );
    }

    #[test]
    fn function_names_are_not_quoted() {
        assert_eq!(
            format("select count(*), coalesce(a, 0) from t"),
            indoc! {"
                SELECT count(*), coalesce(a, 0)
                  FROM t;
            "}
        );
    }
}

mod expressions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn between_and_logic_keywords() {
        assert_eq!(
            format("select * from t where a between 1 and 10 and b = 'x'"),
            indoc! {"
                SELECT *
                  FROM t
                 WHERE a BETWEEN 1 AND 10 AND b = 'x';
            "}
        );
    }

    #[test]
    fn placeholders_pass_through() {
        assert_eq!(
            format("select * from t where id = ?"),
            indoc! {"
                SELECT *
                  FROM t
                 WHERE id = ?;
            "}
        );
    }

    #[test]
    fn string_quotes_are_normalized_and_escaped() {
        assert_eq!(
            format("select 'O''Brien' from t"),
            indoc! {"
                SELECT 'O''Brien'
                  FROM t;
            "}
        );
    }

    #[test]
    fn cast_reads_as_a_function_call() {
        assert_eq!(
            format("select cast(a as integer) from t"),
            indoc! {"
                SELECT CAST(a AS INTEGER)
                  FROM t;
            "}
        );
    }
}

mod stability {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Formatting already-formatted SQL must change nothing.
    #[test]
    fn formatting_is_idempotent() {
        let inputs = [
            "select id, name from users where id = 1",
            "select dept, count(*) from emp group by dept having count(*) > 1",
            "select * from a join b on a.id = b.id",
            "select a from t where a in (select b from u)",
            "with x as (select a from t) select a from x",
            "select a from t union select b from u order by a limit 5",
            "select case when a = 1 then 'x' else 'y' end from t",
        ];
        for sql in inputs {
            let once = format(sql);
            let twice = format(&once);
            assert_eq!(once, twice, "reformat drifted for: {sql}");
        }
    }

    #[test]
    fn unsupported_statements_pass_through_intact() {
        assert_eq!(format("DROP TABLE t"), "DROP TABLE t;\n");
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(format_sql(""), Err(FormatError::EmptyInput)));
        assert!(matches!(format_sql("   \n\t"), Err(FormatError::EmptyInput)));
    }

    #[test]
    fn broken_sql_is_rejected_not_guessed() {
        let err = format_sql("selec id from t").unwrap_err();
        assert!(matches!(err, FormatError::InvalidSyntax(_)));
    }

    #[test]
    fn validate_reports_without_formatting() {
        let formatter = SqlFormatter::default();
        assert!(formatter.validate("select 1").is_ok());
        assert!(formatter.validate("select from from").is_err());
    }
}
