//! Platform error classification to severity mapping.
//!
//! Grouping:
//! - fatal class (fatal, core/compile/user/recoverable fatal) → `Error`
//! - warning class → `Warning`
//! - notice and deprecation class → `Notice`
//! - parse/syntax → `Alert`
//!
//! Unknown raw codes map to `Error` in [`classify`], and to `Emergency` in
//! [`classify_fatal`], which is only used on the shutdown path.

use crate::level::Level;

/// Platform error classifications, each with a stable single-bit raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Fatal,
    Warning,
    Parse,
    Notice,
    CoreFatal,
    CoreWarning,
    CompileFatal,
    CompileWarning,
    UserFatal,
    UserWarning,
    UserNotice,
    Strict,
    RecoverableFatal,
    Deprecated,
    UserDeprecated,
}

impl ErrorCode {
    pub const ALL: [Self; 15] = [
        Self::Fatal,
        Self::Warning,
        Self::Parse,
        Self::Notice,
        Self::CoreFatal,
        Self::CoreWarning,
        Self::CompileFatal,
        Self::CompileWarning,
        Self::UserFatal,
        Self::UserWarning,
        Self::UserNotice,
        Self::Strict,
        Self::RecoverableFatal,
        Self::Deprecated,
        Self::UserDeprecated,
    ];

    #[must_use]
    pub const fn raw(self) -> u32 {
        match self {
            Self::Fatal => 1,
            Self::Warning => 1 << 1,
            Self::Parse => 1 << 2,
            Self::Notice => 1 << 3,
            Self::CoreFatal => 1 << 4,
            Self::CoreWarning => 1 << 5,
            Self::CompileFatal => 1 << 6,
            Self::CompileWarning => 1 << 7,
            Self::UserFatal => 1 << 8,
            Self::UserWarning => 1 << 9,
            Self::UserNotice => 1 << 10,
            Self::Strict => 1 << 11,
            Self::RecoverableFatal => 1 << 12,
            Self::Deprecated => 1 << 13,
            Self::UserDeprecated => 1 << 14,
        }
    }

    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.raw() == raw)
    }

    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Fatal
            | Self::CoreFatal
            | Self::CompileFatal
            | Self::UserFatal
            | Self::RecoverableFatal => Level::Error,
            Self::Warning | Self::CoreWarning | Self::CompileWarning | Self::UserWarning => {
                Level::Warning
            }
            Self::Notice
            | Self::UserNotice
            | Self::Strict
            | Self::Deprecated
            | Self::UserDeprecated => Level::Notice,
            Self::Parse => Level::Alert,
        }
    }

    /// Codes that terminate the process and are only observable post mortem,
    /// i.e. by the shutdown hook.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::Fatal | Self::Parse | Self::CoreFatal | Self::CompileFatal
        )
    }
}

/// Severity for a raw code; unknown codes are `Error`.
#[must_use]
pub fn classify(raw: u32) -> Level {
    ErrorCode::from_raw(raw).map_or(Level::Error, ErrorCode::level)
}

/// Severity on the shutdown path; unknown codes are `Emergency`.
#[must_use]
pub fn classify_fatal(raw: u32) -> Level {
    ErrorCode::from_raw(raw).map_or(Level::Emergency, ErrorCode::level)
}

/// Whether `raw` belongs to the fatal subset the shutdown hook reports.
#[must_use]
pub fn is_fatal(raw: u32) -> bool {
    ErrorCode::from_raw(raw).is_some_and(ErrorCode::is_fatal)
}
