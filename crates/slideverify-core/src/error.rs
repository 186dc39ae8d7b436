use crate::options::CallbackError;
use std::fmt;

#[derive(Debug)]
pub enum VerifierError {
    /// The mount target does not exist on the host surface.
    MountTargetMissing(String),
    /// The mount target already hosts a verifier.
    AlreadyMounted(String),
    /// Building the widget subtree inside the target failed.
    Render { target: String, reason: String },
    /// The success callback failed. The widget has already transitioned to
    /// its succeeded state when this is returned.
    Callback(CallbackError),
}

impl fmt::Display for VerifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifierError::MountTargetMissing(target) => {
                write!(f, "mount target '{}' not found", target)
            }
            VerifierError::AlreadyMounted(target) => {
                write!(f, "mount target '{}' already hosts a verifier", target)
            }
            VerifierError::Render { target, reason } => {
                write!(f, "failed to render verifier into '{}': {}", target, reason)
            }
            VerifierError::Callback(err) => write!(f, "success callback failed: {}", err),
        }
    }
}

impl std::error::Error for VerifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VerifierError::Callback(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
