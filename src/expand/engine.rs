//! Breadth-first expansion of list references into the tagged set.

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::store::{ListStore, list_reference};

/// Grow the directly-mentioned `seeds` into the full tagged set by following
/// `&`-references inside member entries.
///
/// Each list name enters the tagged set at most once, so cycles and repeated
/// references terminate. A reference to a nonexistent list is inert: its
/// member enumeration is simply empty. With `recurse` disabled the seeds are
/// returned untouched. The result is in discovery order — direct mentions
/// first, then breadth-first discovered lists.
#[must_use]
pub fn expand(store: &ListStore, seeds: Vec<String>, recurse: bool) -> Vec<String> {
    if !recurse {
        return seeds;
    }

    let mut tagged = seeds;
    let mut seen: HashSet<String> = tagged.iter().cloned().collect();
    let mut queue: VecDeque<String> = tagged.iter().cloned().collect();

    while let Some(list) = queue.pop_front() {
        for member in store.members(&list) {
            let Some(referenced) = list_reference(&member) else {
                continue;
            };
            if seen.insert(referenced.to_string()) {
                debug!("Expansion discovered list {referenced} via {list}");
                tagged.push(referenced.to_string());
                queue.push_back(referenced.to_string());
            }
        }
    }

    tagged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn follows_nested_references_breadth_first() {
        let mut store = ListStore::new();
        store.create("all");
        store.add("all", "&eng");
        store.add("all", "&sales");
        store.create("eng");
        store.add("eng", "&infra");
        store.create("sales");
        store.create("infra");

        let tagged = expand(&store, seeds(&["all"]), true);
        assert_eq!(tagged, seeds(&["all", "eng", "sales", "infra"]));
    }

    #[test]
    fn cycles_terminate_with_each_list_once() {
        let mut store = ListStore::new();
        store.create("a");
        store.add("a", "&b");
        store.create("b");
        store.add("b", "&a");

        let tagged = expand(&store, seeds(&["a"]), true);
        assert_eq!(tagged, seeds(&["a", "b"]));
    }

    #[test]
    fn self_reference_is_harmless() {
        let mut store = ListStore::new();
        store.create("a");
        store.add("a", "&a");
        store.add("a", "user1");

        assert_eq!(expand(&store, seeds(&["a"]), true), seeds(&["a"]));
    }

    #[test]
    fn nonexistent_references_are_inert() {
        let mut store = ListStore::new();
        store.create("a");
        store.add("a", "&ghost");

        assert_eq!(expand(&store, seeds(&["a"]), true), seeds(&["a", "ghost"]));
        // The ghost list has no members, so the branch simply ends there.
        assert!(store.members("ghost").is_empty());
    }

    #[test]
    fn recursion_disabled_returns_seeds_untouched() {
        let mut store = ListStore::new();
        store.create("a");
        store.add("a", "&b");
        store.add("a", "user1");
        store.create("b");
        store.add("b", "user2");

        assert_eq!(expand(&store, seeds(&["a"]), false), seeds(&["a"]));
    }

    #[test]
    fn expansion_is_idempotent_over_store_state() {
        let mut store = ListStore::new();
        store.create("a");
        store.add("a", "&b");
        store.create("b");
        store.add("b", "&c");
        store.create("c");

        let first = expand(&store, seeds(&["a"]), true);
        let second = expand(&store, seeds(&["a"]), true);
        assert_eq!(first, second);
    }
}
