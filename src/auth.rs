//! Admin allow-listing for restricted commands and the send path.

use std::collections::HashSet;

/// Command ids whose denial is spoken back to the user.
const RESTRICTED: &[&str] = &[
    "list.create",
    "list.destroy",
    "list.rename",
    "list.add",
    "list.remove",
];

/// Command id of the mention-expansion send path. Denied silently, so a
/// non-admin mentioning a list just gets no fan-out.
pub const SEND_COMMAND: &str = "list.send";

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Denied; reply telling the user they lack access.
    DenyNotify,
    /// Denied; do nothing visible.
    DenySilent,
}

/// Allow-list of admin identities for restricted commands.
///
/// Informational commands (`list.lists`, `list.dump`, `list.info`,
/// `list.membership`) are open to everyone.
#[derive(Debug, Clone)]
pub struct Authorizer {
    admins: HashSet<String>,
}

impl Authorizer {
    #[must_use]
    pub fn new(admins: HashSet<String>) -> Self {
        Self { admins }
    }

    #[must_use]
    pub fn check(&self, user_id: &str, command_id: &str) -> Access {
        if self.admins.contains(user_id) {
            return Access::Allow;
        }
        if command_id == SEND_COMMAND {
            return Access::DenySilent;
        }
        if RESTRICTED.contains(&command_id) {
            return Access::DenyNotify;
        }
        Access::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorizer() -> Authorizer {
        Authorizer::new(HashSet::from(["42".to_string()]))
    }

    #[test]
    fn admins_pass_every_gate() {
        let auth = authorizer();
        assert_eq!(auth.check("42", "list.destroy"), Access::Allow);
        assert_eq!(auth.check("42", SEND_COMMAND), Access::Allow);
        assert_eq!(auth.check("42", "list.lists"), Access::Allow);
    }

    #[test]
    fn mutating_commands_deny_with_a_reply() {
        let auth = authorizer();
        for id in RESTRICTED {
            assert_eq!(auth.check("7", id), Access::DenyNotify, "{id}");
        }
    }

    #[test]
    fn send_path_denies_silently() {
        let auth = authorizer();
        assert_eq!(auth.check("7", SEND_COMMAND), Access::DenySilent);
    }

    #[test]
    fn informational_commands_are_open() {
        let auth = authorizer();
        for id in ["list.lists", "list.dump", "list.info", "list.membership"] {
            assert_eq!(auth.check("7", id), Access::Allow, "{id}");
        }
    }
}
