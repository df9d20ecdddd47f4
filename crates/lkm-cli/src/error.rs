/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `lkm` binary. Every
/// variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2** — input failure: the source could not be resolved,
///   fetched, or parsed at all. These terminate before any table exists.
/// - Exit code **1** — logical failure: the run completed but the result
///   is a well-defined failure (no records survived normalization).
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions the `lkm` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A workbook path could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a workbook file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// A shared-spreadsheet URL carries no recognizable document id.
    InvalidUrl {
        /// The URL that was rejected.
        url: String,
    },

    /// The remote host refused access to the workbook (HTTP 401/403).
    AccessDenied {
        /// The URL that was refused.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// The workbook could not be fetched for any other reason.
    FetchFailed {
        /// The URL that failed.
        url: String,
        /// The underlying error message.
        detail: String,
    },

    /// A generic I/O error while reading a source or writing output.
    IoError {
        /// A human-readable label for the source or destination.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The bytes were retrieved but are not a readable workbook.
    ParseFailed {
        /// The underlying ingestion error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// Ingestion completed but no sheet yielded any records.
    NoRecords,
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::InvalidUrl { .. }
            | Self::AccessDenied { .. }
            | Self::FetchFailed { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. } => 2,

            Self::NoRecords => 1,
        }
    }

    /// Returns a human-readable error message suitable for stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::InvalidUrl { url } => {
                format!(
                    "error: invalid spreadsheet link (no /d/<id> segment): {url}"
                )
            }
            Self::AccessDenied { url, status } => {
                format!(
                    "error: access denied (HTTP {status}) fetching {url}; \
                     share the spreadsheet with \"anyone with the link\""
                )
            }
            Self::FetchFailed { url, detail } => {
                format!("error: failed to fetch {url}: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::ParseFailed { detail } => {
                format!("error: {detail}")
            }
            Self::NoRecords => {
                "error: no downtime records found in any matched sheet".to_owned()
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    // ── exit_code ────────────────────────────────────────────────────────────

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("lkm.xlsx"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/lkm.xlsx"),
            },
            CliError::InvalidUrl {
                url: "https://docs.google.com/spreadsheets/abc".to_owned(),
            },
            CliError::AccessDenied {
                url: "https://docs.google.com/spreadsheets/d/x/export".to_owned(),
                status: 401,
            },
            CliError::FetchFailed {
                url: "https://example.com/a.xlsx".to_owned(),
                detail: "connection refused".to_owned(),
            },
            CliError::ParseFailed {
                detail: "cannot open workbook".to_owned(),
            },
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 2, "error: {e}");
        }
    }

    #[test]
    fn no_records_is_exit_1() {
        assert_eq!(CliError::NoRecords.exit_code(), 1);
    }

    // ── message content ──────────────────────────────────────────────────────

    #[test]
    fn file_not_found_message_contains_path() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("rekap-lkm.xlsx"),
        };
        let msg = e.message();
        assert!(msg.contains("rekap-lkm.xlsx"), "message: {msg}");
        assert!(msg.contains("not found"), "message: {msg}");
    }

    #[test]
    fn access_denied_message_is_distinguished() {
        let e = CliError::AccessDenied {
            url: "https://docs.google.com/spreadsheets/d/x/export".to_owned(),
            status: 401,
        };
        let msg = e.message();
        assert!(msg.contains("401"), "message: {msg}");
        assert!(msg.contains("access denied"), "message: {msg}");
    }

    #[test]
    fn invalid_url_message_names_the_pattern() {
        let e = CliError::InvalidUrl {
            url: "https://docs.google.com/spreadsheets/abc".to_owned(),
        };
        assert!(e.message().contains("/d/<id>"), "message: {}", e.message());
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::NoRecords;
        assert_eq!(format!("{e}"), e.message());
    }
}
