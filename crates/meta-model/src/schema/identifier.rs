//! Identifier validation for schema statements

use crate::error::{SchemaError, SchemaResult};

/// Characters allowed in SQL identifiers (alphanumeric, underscore, dollar)
const ALLOWED_IDENTIFIER_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_$";

/// SQL keywords that cannot be used as bare table names
static SQL_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "FROM", "WHERE", "JOIN", "UNION", "DROP", "CREATE",
    "ALTER", "GRANT", "REVOKE", "TRUNCATE", "TABLE", "INDEX", "USER",
];

/// PostgreSQL truncates identifiers past this length
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Validate that an identifier is safe to interpolate into DDL
pub fn validate_identifier(identifier: &str) -> SchemaResult<()> {
    let invalid = |reason: String| SchemaError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason,
    };

    let first = identifier
        .chars()
        .next()
        .ok_or_else(|| invalid("identifier cannot be empty".to_string()))?;

    if identifier.len() > MAX_IDENTIFIER_LENGTH {
        return Err(invalid(format!(
            "too long (max {} characters)",
            MAX_IDENTIFIER_LENGTH
        )));
    }

    if let Some(c) = identifier.chars().find(|c| !ALLOWED_IDENTIFIER_CHARS.contains(*c)) {
        return Err(invalid(format!("contains invalid character '{}'", c)));
    }

    if first.is_ascii_digit() {
        return Err(invalid("cannot start with a number".to_string()));
    }

    if SQL_KEYWORDS.contains(&identifier.to_uppercase().as_str()) {
        return Err(invalid("reserved SQL keyword".to_string()));
    }

    Ok(())
}
