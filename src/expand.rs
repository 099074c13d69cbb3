//! Mention scanning, recursive list expansion, and recipient rendering.

mod engine;
mod render;
mod scanner;

pub use engine::expand;
pub use render::{Decorator, Recipient, RenderPass, render_recipients};
pub use scanner::scan_mentions;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ListStore;

    #[test]
    fn mention_fans_out_through_nested_lists() {
        let mut store = ListStore::new();
        store.create("eng");
        store.add("eng", "alice");
        store.add("eng", "&infra");
        store.create("infra");
        store.add("infra", "bob");
        store.add("infra", "alice");

        let seeds = scan_mentions("ping @eng", &store.lists());
        let tagged = expand(&store, seeds, true);
        assert_eq!(tagged, vec!["eng", "infra"]);

        let recipients = render_recipients(&store, &tagged, Decorator::Angle);
        let decorated: Vec<&str> = recipients
            .iter()
            .filter(|r| r.token.starts_with('<'))
            .map(|r| r.token.as_str())
            .collect();
        assert_eq!(decorated, vec!["<@alice>", "<@bob>"]);
    }

    #[test]
    fn same_message_expands_the_same_way_twice() {
        let mut store = ListStore::new();
        store.create("eng");
        store.add("eng", "&infra");
        store.create("infra");

        let run = |store: &ListStore| {
            let seeds = scan_mentions("ping @eng and @infra", &store.lists());
            expand(store, seeds, true)
        };
        assert_eq!(run(&store), run(&store));
    }
}
