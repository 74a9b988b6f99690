//! Fixed-rule SQL highlighting
//!
//! Not a lexer. The text is split on single spaces and each piece is
//! classified against word lists, with a small comment state carried between
//! pieces.

use serde::Serialize;

const KEYWORDS: &[&str] = &[
    // SQL
    "SELECT", "FROM", "WHERE", "DISTINCT", "AND", "OR", "IN", "NOT IN",
    "JOIN", "INNER", "LEFT", "RIGHT", "OUTER", "ON", "AS", "LIKE", "GROUP BY", "ORDER BY",
    "HAVING", "WITH", "EXCLUDE", "UNION", "INTERSECT", "EXCEPT", "CASE",
    "WHEN", "THEN", "ELSE", "END", "BETWEEN", "OVER", "PARTITION BY", "ROWS", "RANGE",
    // Vertica
    "COPY", "MERGE", "ANALYZE", "COLLECT", "STATISTICS", "PROJECTION",
    "SEGMENTED", "UNSEGMENTED", "NODES", "REJECTMAX", "ENFORCELENGTH",
    "TIMEOUT", "LOCAL", "SYSDATE", "SYSTIME", "SYSTIMESTAMP", "CURRENT_DATE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP", "INTERVAL", "LIMIT", "OFFSET",
    "OVERLAPS", "USING", "EXCLUSIVE", "SHARED", "EXPLAIN", "PLAN", "PROFILE",
];

const FUNCTIONS: &[&str] = &[
    // SQL
    "COUNT", "SUM", "AVG", "MIN", "MAX", "ROUND", "UPPER", "LOWER",
    "LENGTH", "LTRIM", "RTRIM", "COALESCE", "CAST", "CONVERT", "CASE",
    "APPROXIMATE_COUNT_DISTINCT", "TO_TIMESTAMP", "DATE_TRUNC", "CASEWHEN",
    "CASE WHEN", "DECODE", "NVL", "NULLIF", "EXTRACT", "POSITION", "SUBSTRING",
    "WHEN", "CHAR_LENGTH", "OCTET_LENGTH", "TO_CHAR", "TO_NUMBER", "TRIM",
    "LEAD", "LAG", "FIRST_VALUE", "LAST_VALUE", "DENSE_RANK", "NTILE",
    "PERCENT_RANK", "PERCENTILE_CONT", "PERCENTILE_DISC", "CUME_DIST",
    "RANK", "ROW_NUMBER", "STDDEV", "STDDEV_POP", "STDDEV_SAMP",
    "VARIANCE", "VAR_POP", "VAR_SAMP",
    // Vertica
    "APPROXIMATE_MEDIAN", "APPROXIMATE_PERCENTILE",
    "AUTO_INCREMENT", "BIT_COUNT", "BTRIM", "CURRENT_DATABASE", "CURRENT_SCHEMA",
    "CURRENT_USER", "ENCODE", "HEX", "INET_ATON", "INET_NTOA",
    "INITCAP", "ISNULL", "LPAD", "RPAD", "MD5", "RANDOM", "REGEXP_INSTR",
    "REGEXP_REPLACE", "REGEXP_SUBSTR", "REPLACE", "SPLIT_PART", "TO_DATE",
    "TO_TIMESTAMP_TZ", "TRANSLATE", "TRUNC", "BINARY", "BOOLEAN", "CHAR",
    "VARCHAR", "DATE", "TIMESTAMP", "TIMESTAMPTZ", "TIMESTAMP_LTZ", "TIME",
    "TIME_TZ", "TIME_LTZ", "INTERVAL_YEAR", "INTERVAL_MONTH", "INTERVAL_DAY",
    "INTERVAL_HOUR", "INTERVAL_MINUTE", "INTERVAL_SECOND", "FLOAT", "REAL",
    "NUMERIC", "INT", "INTEGER", "BIGINT", "SMALLINT", "TINYINT", "BYTEINT",
    "HLL_AGGREGATE", "HLL_COMBINE", "HLL_ESTIMATE", "HLL_SYNTHESIZE", "HLL_UNION_AGG",
    "LISTAGG", "STRING_AGG",
];

const OPERATORS: &[&str] = &["=", "<", ">", "<=", ">=", "<>", "!=", "||", "+", "-", "*", "/", "%"];

/// Highlight class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    Function,
    Operator,
    Comment,
    Plain,
}

impl TokenKind {
    /// CSS color for the class, `None` for plain text
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Self::Keyword => Some("#800080"),
            Self::Function => Some("#008000"),
            Self::Operator => Some("#FF0000"),
            Self::Comment => Some("#808080"),
            Self::Plain => None,
        }
    }
}

/// A piece of SQL text and its class. `text` includes the trailing space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedToken {
    pub text: String,
    pub kind: TokenKind,
}

fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

fn classify(token: &str) -> TokenKind {
    let upper = token.to_uppercase();
    if is_keyword(&upper) {
        TokenKind::Keyword
    } else if FUNCTIONS.contains(&upper.as_str()) {
        TokenKind::Function
    } else if OPERATORS.iter().any(|op| token.contains(op)) {
        TokenKind::Operator
    } else {
        TokenKind::Plain
    }
}

/// Split SQL on spaces and classify each piece.
///
/// - `--` or `/*` at the start of a piece opens a comment; it closes after a
///   piece containing a newline or ending in `*/`.
/// - A piece that forms a multi-word keyword with the next piece
///   (`GROUP BY`, `NOT IN`, ...) is a keyword; the next piece is classified
///   on its own.
pub fn highlight_sql(sql: &str) -> Vec<HighlightedToken> {
    let pieces: Vec<&str> = sql.split(' ').collect();
    let mut tokens = Vec::with_capacity(pieces.len());
    let mut in_comment = false;

    for (i, piece) in pieces.iter().enumerate() {
        let text = format!("{} ", piece);

        if piece.starts_with("--") || piece.starts_with("/*") {
            in_comment = true;
        }

        if in_comment {
            if piece.contains('\n') || piece.ends_with("*/") {
                in_comment = false;
            }
            tokens.push(HighlightedToken { text, kind: TokenKind::Comment });
            continue;
        }

        let kind = match pieces.get(i + 1) {
            Some(next) if is_keyword(&format!("{} {}", piece, next).to_uppercase()) => TokenKind::Keyword,
            _ => classify(piece),
        };

        tokens.push(HighlightedToken { text, kind });
    }

    tokens
}
