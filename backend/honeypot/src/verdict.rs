use thiserror::Error;

/// Why a gate turned a submission away.
///
/// `Display` is the diagnostic reason. It is logged, never sent back to the submitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Honeypot field filled")]
    DecoyFilled { field: String },

    #[error("Form submitted too quickly: {elapsed_ms}ms")]
    TooQuick { elapsed_ms: i64 },

    #[error("Form session expired")]
    SessionExpired { elapsed_ms: i64 },

    #[error("Form timestamp missing")]
    MissingTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Present only for rejections.
    pub fn reason(&self) -> Option<String> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(rejection) => Some(rejection.to_string()),
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(rejection) => Some(rejection),
        }
    }
}

impl From<Rejection> for Verdict {
    fn from(rejection: Rejection) -> Self {
        Verdict::Rejected(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::{Rejection, Verdict};

    #[test]
    fn test_reason_strings() {
        let decoy = Rejection::DecoyFilled {
            field: "website".to_string(),
        };
        assert_eq!(decoy.to_string(), "Honeypot field filled");

        let quick = Rejection::TooQuick { elapsed_ms: 512 };
        assert_eq!(quick.to_string(), "Form submitted too quickly: 512ms");

        let expired = Rejection::SessionExpired {
            elapsed_ms: 3_600_001,
        };
        assert_eq!(expired.to_string(), "Form session expired");
    }

    #[test]
    fn test_accepted_has_no_reason() {
        assert!(Verdict::Accepted.is_valid());
        assert_eq!(Verdict::Accepted.reason(), None);
        assert_eq!(Verdict::Accepted.rejection(), None);
    }

    #[test]
    fn test_rejected_carries_reason() {
        let verdict: Verdict = Rejection::MissingTimestamp.into();

        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason().as_deref(), Some("Form timestamp missing"));
    }
}
