//! Urzędnicy Wikibase SDK
//!
//! Client library for reading and writing items through the MediaWiki
//! Action API of a Wikibase instance.
//!
//! # Example
//!
//! ```no_run
//! use urzednicy_sdk::{WikibaseClient, WikibaseConfig};
//!
//! let config = WikibaseConfig::new("https://wikibase.example.org/api.php");
//! let mut client = WikibaseClient::new(config).expect("Failed to build client");
//! client.login("Bot@importer", "secret").expect("Failed to log in");
//!
//! let hits = client.search_entities("Topór", "pl").expect("Search failed");
//! ```
//!
//! Both [`WikibaseClient`] and [`InMemoryStore`] implement
//! [`urzednicy_domain::EntityStore`], so the importer runs unchanged against
//! a live instance or a dry run.

#![warn(missing_docs)]

mod client;
mod error;
mod memory;
mod session;
pub mod wire;

pub use client::{WikibaseClient, WikibaseConfig};
pub use error::SdkError;
pub use memory::InMemoryStore;
pub use session::Session;
pub use wire::EntitySnapshot;
