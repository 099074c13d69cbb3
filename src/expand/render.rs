//! Decoration of terminal member names into display tokens.

use std::collections::HashSet;

use log::debug;
use strum::EnumString;

use crate::store::{ListStore, list_reference};

/// Wrapping style applied to the first occurrence of each recipient name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString)]
pub enum Decorator {
    /// Bare `@name`.
    #[default]
    #[strum(serialize = "none", serialize = "")]
    None,
    /// `<@name>`.
    #[strum(serialize = "<")]
    Angle,
    /// `(@name)`.
    #[strum(serialize = "(")]
    Paren,
    /// `[@name]`.
    #[strum(serialize = "[")]
    Square,
    /// `{@name}`.
    #[strum(serialize = "{")]
    Curly,
}

impl Decorator {
    #[must_use]
    pub fn wrap(self, name: &str) -> String {
        match self {
            Decorator::None => format!("@{name}"),
            Decorator::Angle => format!("<@{name}>"),
            Decorator::Paren => format!("(@{name})"),
            Decorator::Square => format!("[@{name}]"),
            Decorator::Curly => format!("{{@{name}}}"),
        }
    }
}

/// Per-run decoration cache: each name is decorated at most once.
#[derive(Debug)]
pub struct RenderPass {
    decorator: Decorator,
    decorated: HashSet<String>,
}

impl RenderPass {
    #[must_use]
    pub fn new(decorator: Decorator) -> Self {
        Self {
            decorator,
            decorated: HashSet::new(),
        }
    }

    /// Display token for one member entry.
    ///
    /// List references and names already decorated in this run pass through
    /// unmodified.
    pub fn token(&mut self, entry: &str) -> String {
        if list_reference(entry).is_some() || self.decorated.contains(entry) {
            return entry.to_string();
        }
        self.decorated.insert(entry.to_string());
        self.decorator.wrap(entry)
    }
}

/// A terminal member to deliver to, with its rendered display token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub token: String,
}

/// Walk the tagged lists in discovery order and render their direct terminal
/// members. Reference entries are never dispatched; they were already resolved
/// into `tagged` by the expansion engine.
#[must_use]
pub fn render_recipients(
    store: &ListStore,
    tagged: &[String],
    decorator: Decorator,
) -> Vec<Recipient> {
    let mut pass = RenderPass::new(decorator);
    let mut recipients = Vec::new();

    for list in tagged {
        for member in store.members(list) {
            if list_reference(&member).is_some() {
                debug!("Skipping reference entry {member} in tagged list {list}");
                continue;
            }
            let token = pass.token(&member);
            recipients.push(Recipient {
                name: member,
                token,
            });
        }
    }

    recipients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_names_per_style() {
        assert_eq!(Decorator::None.wrap("amy"), "@amy");
        assert_eq!(Decorator::Angle.wrap("amy"), "<@amy>");
        assert_eq!(Decorator::Paren.wrap("amy"), "(@amy)");
        assert_eq!(Decorator::Square.wrap("amy"), "[@amy]");
        assert_eq!(Decorator::Curly.wrap("amy"), "{@amy}");
    }

    #[test]
    fn parses_configuration_values() {
        assert_eq!("none".parse::<Decorator>(), Ok(Decorator::None));
        assert_eq!("".parse::<Decorator>(), Ok(Decorator::None));
        assert_eq!("<".parse::<Decorator>(), Ok(Decorator::Angle));
        assert_eq!("(".parse::<Decorator>(), Ok(Decorator::Paren));
        assert_eq!("[".parse::<Decorator>(), Ok(Decorator::Square));
        assert_eq!("{".parse::<Decorator>(), Ok(Decorator::Curly));
        assert!("angle".parse::<Decorator>().is_err());
    }

    #[test]
    fn decorates_each_name_once_per_run() {
        let mut pass = RenderPass::new(Decorator::Angle);
        assert_eq!(pass.token("amy"), "<@amy>");
        assert_eq!(pass.token("amy"), "amy");
        assert_eq!(pass.token("zoe"), "<@zoe>");
    }

    #[test]
    fn reference_entries_pass_through_undecorated() {
        let mut pass = RenderPass::new(Decorator::Angle);
        assert_eq!(pass.token("&infra"), "&infra");
        // Passing through does not consume the name's decoration.
        assert_eq!(pass.token("infra"), "<@infra>");
    }

    #[test]
    fn shared_member_is_decorated_once_across_lists() {
        let mut store = ListStore::new();
        store.create("a");
        store.add("a", "user1");
        store.create("b");
        store.add("b", "user1");

        let tagged = vec!["a".to_string(), "b".to_string()];
        let recipients = render_recipients(&store, &tagged, Decorator::Angle);

        let decorated: Vec<_> = recipients
            .iter()
            .filter(|r| r.token == "<@user1>")
            .collect();
        assert_eq!(decorated.len(), 1);
        assert_eq!(recipients[1].token, "user1");
    }

    #[test]
    fn reference_entries_are_never_dispatched() {
        let mut store = ListStore::new();
        store.create("eng");
        store.add("eng", "&infra");
        store.add("eng", "alice");
        store.create("infra");
        store.add("infra", "bob");

        let tagged = vec!["eng".to_string(), "infra".to_string()];
        let recipients = render_recipients(&store, &tagged, Decorator::None);
        let names: Vec<_> = recipients.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }
}
