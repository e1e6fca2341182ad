//! Quoting and validation of SQL identifiers.
//!
//! Column names come from user data and can contain spaces, punctuation or
//! upper case letters, so they are always quoted and never rejected. Table
//! names are chosen by the library or its caller and must be plain
//! identifiers.

use crate::error::{Result, SmellError};
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_IDENTIFIER_LENGTH: usize = 128;

static TABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("Hard-coded regex pattern should be valid")
});

/// SQL identifier validation and escaping utilities.
pub struct SqlSecurity;

impl SqlSecurity {
    /// Quotes an identifier for use in a DataFusion query.
    ///
    /// Embedded double quotes are doubled, so the identifier can never end
    /// the quoted section early. Any name a schema can hold is accepted,
    /// including blank and very long ones.
    ///
    /// # Examples
    /// ```rust
    /// use smell_guard::security::SqlSecurity;
    ///
    /// assert_eq!(SqlSecurity::escape_identifier("Age"), "\"Age\"");
    /// assert_eq!(
    ///     SqlSecurity::escape_identifier("say \"hi\""),
    ///     "\"say \"\"hi\"\"\""
    /// );
    /// assert_eq!(SqlSecurity::escape_identifier(" "), "\" \"");
    /// ```
    pub fn escape_identifier(identifier: &str) -> String {
        let escaped = identifier.replace('"', "\"\"");
        format!("\"{escaped}\"")
    }

    /// Validates an identifier chosen by the library or its caller.
    pub fn validate_identifier(identifier: &str) -> Result<()> {
        if identifier.trim().is_empty() {
            return Err(SmellError::SecurityError(
                "SQL identifier cannot be empty or whitespace-only".to_string(),
            ));
        }
        if identifier.len() > MAX_IDENTIFIER_LENGTH {
            return Err(SmellError::SecurityError(format!(
                "SQL identifier too long (max {MAX_IDENTIFIER_LENGTH} characters)"
            )));
        }
        if identifier.contains('\0') {
            return Err(SmellError::SecurityError(
                "SQL identifier cannot contain null bytes".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates a table name used to register a dataset.
    pub fn validate_table_name(table_name: &str) -> Result<()> {
        Self::validate_identifier(table_name)?;
        if !TABLE_NAME.is_match(table_name) {
            return Err(SmellError::SecurityError(format!(
                "Invalid table name '{table_name}': must start with a letter or underscore and contain only letters, numbers and underscores"
            )));
        }
        Ok(())
    }
}
