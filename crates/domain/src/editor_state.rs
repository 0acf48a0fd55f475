use serde::{Deserialize, Serialize};
use spaces_core::{AppError, AppResult};

/// Lifecycle of the role assignment editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorState {
    /// Nothing has been requested yet.
    Idle,
    /// The roles API client is being resolved.
    ResolvingClient,
    /// Waiting for user input.
    Ready,
    /// Role saves are in flight.
    Assigning,
    /// The editor was closed.
    Closed,
}

/// Events that drive [`EditorState`] transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// The roles view was opened.
    OpenRequested {
        /// Read-only callers never resolve a client.
        read_only: bool,
    },
    /// A new client resolution attempt was requested.
    ClientResolutionRequested,
    /// The client resolved.
    ClientResolved,
    /// The client could not be resolved.
    ClientResolutionFailed,
    /// The user confirmed the assignment.
    SaveRequested,
    /// Every save call settled.
    SaveSettled {
        /// True when every role saved.
        all_succeeded: bool,
    },
    /// The user dismissed the editor. Saves already issued keep running.
    Cancelled,
}

impl EditorState {
    /// Returns a stable transport value for this state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ResolvingClient => "resolving_client",
            Self::Ready => "ready",
            Self::Assigning => "assigning",
            Self::Closed => "closed",
        }
    }

    /// Computes the next state, rejecting events invalid for this state.
    pub fn transition(self, event: EditorEvent) -> AppResult<Self> {
        let next = match (self, event) {
            (Self::Idle, EditorEvent::OpenRequested { read_only: true }) => Self::Ready,
            (Self::Idle, EditorEvent::OpenRequested { read_only: false }) => {
                Self::ResolvingClient
            }
            (Self::Idle | Self::Ready, EditorEvent::ClientResolutionRequested) => {
                Self::ResolvingClient
            }
            (
                Self::ResolvingClient,
                EditorEvent::ClientResolved | EditorEvent::ClientResolutionFailed,
            ) => Self::Ready,
            (Self::Ready, EditorEvent::SaveRequested) => Self::Assigning,
            (Self::Assigning, EditorEvent::SaveSettled { all_succeeded }) => {
                if all_succeeded {
                    Self::Closed
                } else {
                    Self::Ready
                }
            }
            (
                Self::Idle | Self::ResolvingClient | Self::Ready | Self::Assigning,
                EditorEvent::Cancelled,
            ) => Self::Closed,
            (state, event) => {
                return Err(AppError::InvalidState(format!(
                    "event {event:?} is not valid while the editor is {}",
                    state.as_str()
                )));
            }
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use spaces_core::AppError;

    use super::{EditorEvent, EditorState};

    #[test]
    fn happy_path_reaches_closed() {
        let state = EditorState::Idle
            .transition(EditorEvent::OpenRequested { read_only: false })
            .and_then(|state| state.transition(EditorEvent::ClientResolved))
            .and_then(|state| state.transition(EditorEvent::SaveRequested))
            .and_then(|state| {
                state.transition(EditorEvent::SaveSettled {
                    all_succeeded: true,
                })
            });

        assert!(matches!(state, Ok(EditorState::Closed)));
    }

    #[test]
    fn failed_resolution_still_reaches_ready() {
        let state = EditorState::Idle
            .transition(EditorEvent::OpenRequested { read_only: false })
            .and_then(|state| state.transition(EditorEvent::ClientResolutionFailed));

        assert!(matches!(state, Ok(EditorState::Ready)));
    }

    #[test]
    fn read_only_open_skips_resolution() {
        let state = EditorState::Idle.transition(EditorEvent::OpenRequested { read_only: true });
        assert!(matches!(state, Ok(EditorState::Ready)));
    }

    #[test]
    fn partial_failure_returns_to_ready() {
        let state = EditorState::Assigning.transition(EditorEvent::SaveSettled {
            all_succeeded: false,
        });
        assert!(matches!(state, Ok(EditorState::Ready)));
    }

    #[test]
    fn cancel_while_assigning_closes() {
        let state = EditorState::Assigning.transition(EditorEvent::Cancelled);
        assert!(matches!(state, Ok(EditorState::Closed)));
    }

    #[test]
    fn save_outside_ready_is_rejected() {
        let state = EditorState::Assigning.transition(EditorEvent::SaveRequested);
        assert!(matches!(state, Err(AppError::InvalidState(_))));
    }

    #[test]
    fn closed_editor_accepts_nothing() {
        assert!(
            EditorState::Closed
                .transition(EditorEvent::SaveRequested)
                .is_err()
        );
        assert!(
            EditorState::Closed
                .transition(EditorEvent::OpenRequested { read_only: false })
                .is_err()
        );
    }
}
