//! Portfolio site core: component loading, routing and page data.
//!
//! Nothing in here touches the browser directly. DOM, network and address-bar
//! access go through the [`loader::Fetch`], [`loader::Dom`], [`router::View`]
//! and [`router::AddressBar`] traits, implemented by the wasm front end.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod detail;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod loader;
pub mod route;
pub mod router;
pub mod section;

pub use catalog::{Catalog, ProjectRecord};
pub use config::{SiteConfig, TransportKind};
pub use error::{
    CatalogError, ConfigError, ContactError, FetchError, LoadError, LookupError,
};
pub use loader::{ComponentLoader, ComponentSlot, Dom, Fetch, LoadStatus};
pub use route::{classify_link, LinkAction, Location, NavEvent, NavKind, Route};
pub use router::{AddressBar, Router, View};
