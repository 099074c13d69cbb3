//! Text command surface for managing lists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::store::ListStore;

macro_rules! command_regex {
    ($pattern:expr) => {
        Lazy::new(|| Regex::new($pattern).expect("static regex"))
    };
}

static LISTS: Lazy<Regex> = command_regex!(r"^[Ll]ist\s+lists\s*$");
static DUMP: Lazy<Regex> = command_regex!(r"^[Ll]ist\s+dump\s*$");
static CREATE: Lazy<Regex> = command_regex!(r"^[Ll]ist\s+create\s+([-._a-zA-Z0-9]+)\s*$");
static DESTROY: Lazy<Regex> = command_regex!(r"^[Ll]ist\s+destroy\s+([-._a-zA-Z0-9]+)\s*$");
static RENAME: Lazy<Regex> =
    command_regex!(r"^[Ll]ist\s+rename\s+([-._a-zA-Z0-9]+)\s+([-._a-zA-Z0-9]+)\s*$");
static ADD: Lazy<Regex> = command_regex!(
    r"^[Ll]ist\s+add\s+([-._a-zA-Z0-9]+)\s+(&?[-._a-zA-Z0-9]+(?:\s+&?[-._a-zA-Z0-9]+)*)\s*$"
);
static REMOVE: Lazy<Regex> = command_regex!(
    r"^[Ll]ist\s+remove\s+([-._a-zA-Z0-9]+)\s+(&?[-._a-zA-Z0-9]+(?:\s+&?[-._a-zA-Z0-9]+)*)\s*$"
);
static INFO: Lazy<Regex> = command_regex!(r"^[Ll]ist\s+info\s+([-._a-zA-Z0-9]+)\s*$");
static MEMBERSHIP: Lazy<Regex> =
    command_regex!(r"^[Ll]ist\s+membership\s+(&?[-._a-zA-Z0-9]+)\s*$");

/// A parsed list-management command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    Lists,
    Dump,
    Create(String),
    Destroy(String),
    Rename { from: String, to: String },
    Add { list: String, names: Vec<String> },
    Remove { list: String, names: Vec<String> },
    Info(String),
    Membership(String),
}

impl ListCommand {
    /// Parse a message body into a command, if it is one.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if LISTS.is_match(text) {
            return Some(Self::Lists);
        }
        if DUMP.is_match(text) {
            return Some(Self::Dump);
        }
        if let Some(caps) = CREATE.captures(text) {
            return Some(Self::Create(caps[1].to_string()));
        }
        if let Some(caps) = DESTROY.captures(text) {
            return Some(Self::Destroy(caps[1].to_string()));
        }
        if let Some(caps) = RENAME.captures(text) {
            return Some(Self::Rename {
                from: caps[1].to_string(),
                to: caps[2].to_string(),
            });
        }
        if let Some(caps) = ADD.captures(text) {
            return Some(Self::Add {
                list: caps[1].to_string(),
                names: split_names(&caps[2]),
            });
        }
        if let Some(caps) = REMOVE.captures(text) {
            return Some(Self::Remove {
                list: caps[1].to_string(),
                names: split_names(&caps[2]),
            });
        }
        if let Some(caps) = INFO.captures(text) {
            return Some(Self::Info(caps[1].to_string()));
        }
        if let Some(caps) = MEMBERSHIP.captures(text) {
            return Some(Self::Membership(caps[1].to_string()));
        }
        None
    }

    /// Stable identifier used by authorization.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Lists => "list.lists",
            Self::Dump => "list.dump",
            Self::Create(_) => "list.create",
            Self::Destroy(_) => "list.destroy",
            Self::Rename { .. } => "list.rename",
            Self::Add { .. } => "list.add",
            Self::Remove { .. } => "list.remove",
            Self::Info(_) => "list.info",
            Self::Membership(_) => "list.membership",
        }
    }

    /// Run the command against the store and produce the chat reply.
    pub fn execute(&self, store: &mut ListStore) -> String {
        match self {
            Self::Lists => format!("Lists: {}", store.lists().join(", ")),
            Self::Dump => {
                let lines: Vec<String> = store
                    .lists()
                    .iter()
                    .map(|list| format!("*@{list}*: {}", store.members(list).join(", ")))
                    .collect();
                lines.join("\n")
            }
            Self::Create(name) => {
                if store.create(name) {
                    format!("Created list {name}.")
                } else {
                    format!("List {name} already exists!")
                }
            }
            Self::Destroy(name) => match store.destroy(name) {
                Ok(old) => format!("Destroyed list {name} ({}).", old.join(", ")),
                Err(_) => format!("List {name} does not exist!"),
            },
            Self::Rename { from, to } => {
                if store.rename(from, to) {
                    format!("Renamed list {from} to {to}.")
                } else {
                    format!("Either list {from} does not exist or {to} already exists!")
                }
            }
            Self::Add { list, names } => {
                if !store.exists(list) {
                    return format!("List {list} does not exist!");
                }
                let lines: Vec<String> = names
                    .iter()
                    .map(|name| {
                        if store.add(list, name) {
                            format!("{name} added to list {list}.")
                        } else {
                            format!("{name} is already in list {list}!")
                        }
                    })
                    .collect();
                lines.join("\n")
            }
            Self::Remove { list, names } => {
                if !store.exists(list) {
                    return format!("List {list} does not exist!");
                }
                let lines: Vec<String> = names
                    .iter()
                    .map(|name| {
                        if store.remove(list, name) {
                            format!("{name} removed from list {list}.")
                        } else {
                            format!("{name} is not in list {list}!")
                        }
                    })
                    .collect();
                lines.join("\n")
            }
            Self::Info(name) => {
                if !store.exists(name) {
                    return format!("List {name} does not exist!");
                }
                format!("*@{name}*: {}", store.members(name).join(", "))
            }
            Self::Membership(name) => {
                let lists = store.membership(name);
                if lists.is_empty() {
                    format!("{name} is not in any lists!")
                } else {
                    format!("{name} is in {}.", lists.join(", "))
                }
            }
        }
    }
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(ToString::to_string).collect()
}
