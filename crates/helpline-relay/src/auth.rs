use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{info, warn};

/// Access control for privileged commands.
///
/// Holds the single configured operator identity and the set of callers who
/// have unlocked privileged lookups with the passcode. Session state holds
/// no authority — command handlers consult this before touching the relay
/// or the explorer.
#[derive(Debug)]
pub struct AccessControl {
    operator_id: String,
    passcode: String,
    authorized: RwLock<HashSet<String>>,
}

impl AccessControl {
    /// Creates an access-control table with an empty authorized set.
    pub fn new(operator_id: impl Into<String>, passcode: impl Into<String>) -> Self {
        Self {
            operator_id: operator_id.into(),
            passcode: passcode.into(),
            authorized: RwLock::new(HashSet::new()),
        }
    }

    /// The configured operator identity.
    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    /// True when `user_id` is the configured operator.
    pub fn is_operator(&self, user_id: &str) -> bool {
        user_id == self.operator_id
    }

    /// Attempts to unlock privileged commands for `user_id`.
    ///
    /// A correct code inserts the caller into the authorized set
    /// (idempotent); a wrong code mutates nothing. Every attempt is logged.
    pub fn authorize(&self, user_id: &str, code: &str) -> bool {
        if code != self.passcode {
            warn!(user_id = %user_id, "authorize attempt with wrong passcode");
            return false;
        }
        let inserted = self.authorized.write().insert(user_id.to_string());
        if inserted {
            info!(user_id = %user_id, "caller authorized");
        }
        true
    }

    /// True when `user_id` has unlocked privileged commands.
    pub fn is_authorized(&self, user_id: &str) -> bool {
        self.authorized.read().contains(user_id)
    }

    /// Revokes a caller's authorization. Returns true when one was present.
    pub fn revoke(&self, user_id: &str) -> bool {
        let removed = self.authorized.write().remove(user_id);
        if removed {
            info!(user_id = %user_id, "caller authorization revoked");
        }
        removed
    }

    /// Number of authorized callers.
    pub fn authorized_count(&self) -> usize {
        self.authorized.read().len()
    }
}
