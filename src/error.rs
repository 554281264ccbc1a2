//! Error types for schedule construction and template evaluation.

use crate::daytype::DayType;
use thiserror::Error;

/// Errors detected while validating a concrete day schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("schedule has no breakpoints")]
    Empty,

    /// Breakpoint times must be non-decreasing.
    #[error("breakpoint time decreases from {prev} to {next}")]
    Decreasing { prev: f64, next: f64 },

    /// Two breakpoints at one time encode a step jump; three or more are
    /// ambiguous.
    #[error("more than two breakpoints share time {time}")]
    RepeatedTime { time: f64 },

    #[error("breakpoint time {time} lies outside the 0-24 h day")]
    OutOfRange { time: f64 },
}

/// Errors raised while parsing a symbolic time or value expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("unknown token '{fragment}'")]
    UnknownToken { fragment: String },

    #[error("malformed expression near '{fragment}'")]
    Malformed { fragment: String },

    /// Products of two symbolic tokens are not representable; expressions
    /// must stay linear in the tokens.
    #[error("non-linear term near '{fragment}'")]
    NonLinear { fragment: String },
}

/// Errors raised while evaluating a schedule template.
///
/// Every variant names the offending template so the caller can report which
/// of its (possibly overridden) templates failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("template '{template}': {source}")]
    Parse {
        template: String,
        #[source]
        source: ExprError,
    },

    /// A `floor`/`ceiling` value token was left unresolved by the caller.
    #[error("template '{template}' ({day_type}): value token '{token}' has no substitution")]
    UnresolvedValue {
        template: String,
        day_type: DayType,
        token: &'static str,
    },

    /// The resolved breakpoints do not form a valid day schedule, which
    /// indicates an inconsistent template/hours combination.
    #[error("template '{template}' ({day_type}): {source}")]
    InvalidSchedule {
        template: String,
        day_type: DayType,
        #[source]
        source: ScheduleError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_names_template() {
        let err = TemplateError::InvalidSchedule {
            template: "lighting".to_string(),
            day_type: DayType::Saturday,
            source: ScheduleError::Decreasing { prev: 9.0, next: 8.0 },
        };
        let msg = format!("{}", err);
        assert!(msg.contains("lighting"), "got: {msg}");
        assert!(msg.contains("Saturday"), "got: {msg}");
    }

    #[test]
    fn test_expr_error_display() {
        let err = ExprError::UnknownToken {
            fragment: "stort".to_string(),
        };
        assert!(format!("{}", err).contains("stort"));
    }
}
