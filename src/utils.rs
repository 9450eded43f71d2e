// ABOUTME: Utility functions for validation and filesystem naming
// ABOUTME: Provides tool discovery, identifier checks, and display sanitization

use anyhow::{bail, Result};
use which::which;

/// Check that the required MySQL client tooling is available
///
/// Verifies that `mysqldump` is installed and in PATH. The whole point of
/// this command is to drive `mysqldump`, so the check runs before anything
/// touches the database.
///
/// # Returns
///
/// Returns `Ok(())` if the tool is found.
///
/// # Errors
///
/// Returns an error with installation instructions if it is missing.
///
/// # Examples
///
/// ```
/// # use wp_light_db::utils::check_required_tools;
/// # use anyhow::Result;
/// # fn example() -> Result<()> {
/// check_required_tools()?;
/// # Ok(())
/// # }
/// ```
pub fn check_required_tools() -> Result<()> {
    if which("mysqldump").is_err() {
        bail!(
            "Missing required tool: mysqldump\n\
             \n\
             Please install the MySQL client tools:\n\
             - Ubuntu/Debian: sudo apt-get install default-mysql-client\n\
             - macOS: brew install mysql-client\n\
             - RHEL/CentOS: sudo yum install mysql\n\
             - Windows: Download from https://dev.mysql.com/downloads/"
        );
    }

    Ok(())
}

/// Validate a MySQL identifier (database name, table name)
///
/// Validates that an identifier follows MySQL unquoted-identifier rules to
/// prevent SQL injection. Identifiers must:
/// - Be 1-64 characters long (counted in characters, not bytes)
/// - Contain only letters, digits, underscores, dollar signs, or extended
///   characters in the U+0080..U+FFFF range
/// - Not consist solely of digits
///
/// # Arguments
///
/// * `identifier` - The identifier to validate
///
/// # Returns
///
/// Returns `Ok(())` if the identifier is valid.
///
/// # Security
///
/// All database and table names interpolated into SQL statements MUST pass
/// through this function first; row-count queries name tables directly
/// because placeholders cannot bind identifiers.
///
/// # Examples
///
/// ```
/// # use wp_light_db::utils::validate_mysql_identifier;
/// # use anyhow::Result;
/// # fn example() -> Result<()> {
/// // Valid identifiers
/// validate_mysql_identifier("wp_posts")?;
/// validate_mysql_identifier("wp_2_options")?;
/// validate_mysql_identifier("db$archive")?;
/// validate_mysql_identifier("wp_swp_log_журнал")?;
///
/// // Invalid - will return error
/// assert!(validate_mysql_identifier("12345").is_err());
/// assert!(validate_mysql_identifier("wp_posts; DROP TABLE wp_users; --").is_err());
/// # Ok(())
/// # }
/// ```
pub fn validate_mysql_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        bail!("Identifier cannot be empty or whitespace-only");
    }

    // MySQL measures the 64-character limit in characters, not bytes
    let char_count = identifier.chars().count();
    if char_count > 64 {
        bail!(
            "Identifier '{}' exceeds maximum length of 64 characters (got {})",
            sanitize_identifier(identifier),
            char_count
        );
    }

    // Unquoted identifiers also permit the extended U+0080..U+FFFF range
    for (i, c) in identifier.chars().enumerate() {
        let permitted = c.is_ascii_alphanumeric()
            || c == '_'
            || c == '$'
            || matches!(c, '\u{0080}'..='\u{FFFF}');
        if !permitted {
            bail!(
                "Identifier '{}' contains invalid character '{}' at position {}. \
                 Only letters, digits, underscores, dollar signs, and characters \
                 in the U+0080..U+FFFF range are allowed",
                sanitize_identifier(identifier),
                if c.is_control() {
                    format!("\\x{:02x}", c as u32)
                } else {
                    c.to_string()
                },
                i
            );
        }
    }

    // MySQL forbids unquoted identifiers made up of digits alone
    if identifier.chars().all(|c| c.is_ascii_digit()) {
        bail!(
            "Identifier '{}' cannot consist solely of digits",
            sanitize_identifier(identifier)
        );
    }

    Ok(())
}

/// Sanitize an identifier (table name, database name) for display
///
/// Removes control characters and limits length to prevent log injection
/// and keep error messages readable.
///
/// **Note**: This is for display purposes only, never for SQL safety.
///
/// # Examples
///
/// ```
/// # use wp_light_db::utils::sanitize_identifier;
/// assert_eq!(sanitize_identifier("normal_table"), "normal_table");
/// assert_eq!(sanitize_identifier("table\x00name"), "tablename");
/// assert_eq!(sanitize_identifier("table\nname"), "tablename");
/// ```
pub fn sanitize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| !c.is_control())
        .take(100)
        .collect()
}

/// Build the default output filename for a database
///
/// When no output file is given on the command line the export lands in
/// `<database>.sql` in the working directory, with the database name reduced
/// to a filesystem-safe form.
///
/// # Examples
///
/// ```
/// # use wp_light_db::utils::default_output_filename;
/// assert_eq!(default_output_filename("wp_prod"), "wp_prod.sql");
/// assert_eq!(default_output_filename("shop/2024"), "shop_2024.sql");
/// ```
pub fn default_output_filename(database: &str) -> String {
    let safe: String = database
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.sql", safe)
}
