//! Client for the PlayStation Network community APIs: profiles, messages,
//! friends, trophies and the activity feed.
//!
//! [`PsnClient`] turns each call into a request descriptor and hands it to a
//! [`Transport`]; [`HttpTransport`] is the bundled bearer-token implementation.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod sanitize;

pub use api::client::PsnClient;
pub use api::models::{ActivityQuery, Feed, FriendType, FriendsQuery, MessageKind, TrophyTitlesQuery};
pub use api::transport::{HttpTransport, Method, Params, Transport};
pub use config::Config;
pub use error::PsnError;
