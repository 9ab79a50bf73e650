use crate::error::ElevationError;

/// Outcome of the startup elevation gate.
///
/// Exactly one decision is produced per run. Only `AlreadyElevated`
/// lets the process continue; the other two require it to exit without
/// touching any protected policy path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The process already runs elevated.
    AlreadyElevated,
    /// An elevated instance was started; this process is done.
    Relaunching,
    /// No elevated instance exists. Carries why.
    ElevationDenied(ElevationError),
}

impl GateDecision {
    /// Whether this process may perform protected policy writes.
    pub fn may_proceed(&self) -> bool {
        matches!(self, GateDecision::AlreadyElevated)
    }
}

/// Runs the elevation gate: probe first, relaunch only if needed.
///
/// `relaunch` must start a second, elevated instance of the current
/// executable and is only called when `elevated` reports false.
pub fn ensure_elevated(
    elevated: impl FnOnce() -> bool,
    relaunch: impl FnOnce() -> Result<(), ElevationError>,
) -> GateDecision {
    if elevated() {
        return GateDecision::AlreadyElevated;
    }

    match relaunch() {
        Ok(()) => GateDecision::Relaunching,
        Err(err) => GateDecision::ElevationDenied(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn elevated_process_proceeds_without_relaunch() {
        let relaunched = Cell::new(false);

        let decision = ensure_elevated(
            || true,
            || {
                relaunched.set(true);
                Ok(())
            },
        );

        assert_eq!(decision, GateDecision::AlreadyElevated);
        assert!(decision.may_proceed());
        assert!(!relaunched.get());
    }

    #[test]
    fn unelevated_process_hands_off_to_the_relaunch() {
        let decision = ensure_elevated(|| false, || Ok(()));

        assert_eq!(decision, GateDecision::Relaunching);
        assert!(!decision.may_proceed());
    }

    #[test]
    fn declined_prompt_yields_denied() {
        let decision = ensure_elevated(|| false, || Err(ElevationError::Declined));

        assert_eq!(
            decision,
            GateDecision::ElevationDenied(ElevationError::Declined)
        );
        assert!(!decision.may_proceed());
    }

    #[test]
    fn failed_relaunch_yields_denied_with_the_cause() {
        let decision = ensure_elevated(
            || false,
            || {
                Err(ElevationError::LaunchFailed {
                    detail: "ShellExecuteW returned 2".to_string(),
                })
            },
        );

        match decision {
            GateDecision::ElevationDenied(ElevationError::LaunchFailed { detail }) => {
                assert!(detail.contains("ShellExecuteW"));
            }
            other => panic!("unexpected decision: {other:?}"),
        }
    }
}
