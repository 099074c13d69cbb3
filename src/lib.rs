//! A Discord bot that manages named member lists and expands `@list`
//! mentions into direct messages to every underlying member, following
//! `&`-references to nested lists.

pub mod auth;
pub mod bot;
pub mod commands;
pub mod config;
pub mod deliver;
pub mod error;
pub mod expand;
pub mod persist;
pub mod store;

pub use bot::run;
