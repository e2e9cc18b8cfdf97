//! Structured requests.
//!
//! Free text is turned into a `Command` by an external intent resolver.
//! The service consumes the closed set below with an exhaustive match.

use serde::{Deserialize, Serialize};

use super::Weekday;

/// A structured request addressed to the shift service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Command {
    /// Give up a shift; a replacement takes it.
    Leave { employee: String, day: Weekday },
    /// Move a shift from one day to another.
    Swap {
        employee: String,
        from: Weekday,
        to: Weekday,
    },
    /// Read an employee's live week, or a single day of it.
    ScheduleQuery {
        employee: String,
        #[serde(default)]
        day: Option<Weekday>,
    },
    /// Replace an employee's preferred days.
    PreferenceUpdate { employee: String, days: Vec<Weekday> },
    /// The resolver could not classify the request.
    Unrecognized,
}

impl Command {
    /// Name of the employee the command is about, if any.
    pub fn employee(&self) -> Option<&str> {
        match self {
            Command::Leave { employee, .. }
            | Command::Swap { employee, .. }
            | Command::ScheduleQuery { employee, .. }
            | Command::PreferenceUpdate { employee, .. } => Some(employee),
            Command::Unrecognized => None,
        }
    }

    /// Whether handling the command may mutate state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Leave { .. } | Command::Swap { .. } | Command::PreferenceUpdate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_shape() {
        let json = r#"{"intent":"swap","employee":"Maria","from":"mon","to":"thu"}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            Command::Swap {
                employee: "Maria".into(),
                from: Weekday::Mon,
                to: Weekday::Thu,
            }
        );

        let query: Command =
            serde_json::from_str(r#"{"intent":"schedule_query","employee":"Maria"}"#).unwrap();
        assert_eq!(
            query,
            Command::ScheduleQuery {
                employee: "Maria".into(),
                day: None,
            }
        );

        let unknown: Command = serde_json::from_str(r#"{"intent":"unrecognized"}"#).unwrap();
        assert_eq!(unknown, Command::Unrecognized);
    }

    #[test]
    fn test_command_accessors() {
        let leave = Command::Leave {
            employee: "Maria".into(),
            day: Weekday::Wed,
        };
        assert_eq!(leave.employee(), Some("Maria"));
        assert!(leave.is_mutating());

        let query = Command::ScheduleQuery {
            employee: "Sam".into(),
            day: Some(Weekday::Fri),
        };
        assert!(!query.is_mutating());
        assert_eq!(Command::Unrecognized.employee(), None);
    }
}
