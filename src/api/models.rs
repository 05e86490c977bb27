use crate::error::PsnError;
use std::fmt;

pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 32;

/// Which activity stream to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feed {
    #[default]
    News,
    Feed,
}

impl Feed {
    /// Anything other than exactly `"feed"` selects the news stream.
    pub fn from_name(name: &str) -> Self {
        if name == "feed" {
            Feed::Feed
        } else {
            Feed::News
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::News => "news",
            Feed::Feed => "feed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FriendType {
    #[default]
    Friend,
    Requesting,
    Requested,
}

impl FriendType {
    /// Unknown values fall back to `Friend`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "requesting" => FriendType::Requesting,
            "requested" => FriendType::Requested,
            _ => FriendType::Friend,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FriendType::Friend => "friend",
            FriendType::Requesting => "requesting",
            FriendType::Requested => "requested",
        }
    }
}

/// Message kinds with a known content key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Image,
    Voice,
    StoreLink,
}

impl MessageKind {
    pub fn content_key(&self) -> &'static str {
        match self {
            MessageKind::Text => "message",
            MessageKind::Image => "image-data-0",
            MessageKind::Voice => "voice-data-0",
            MessageKind::StoreLink => "store-url-0",
        }
    }
}

impl TryFrom<i64> for MessageKind {
    type Error = PsnError;

    fn try_from(kind: i64) -> Result<Self, Self::Error> {
        match kind {
            1 => Ok(MessageKind::Text),
            3 => Ok(MessageKind::Image),
            1011 => Ok(MessageKind::Voice),
            8 => Ok(MessageKind::StoreLink),
            other => Err(PsnError::UnknownMessageKind(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityQuery {
    pub feed: Feed,
    /// Tokens outside the activity whitelist are dropped before sending.
    pub filters: Vec<String>,
    pub page: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendsQuery {
    pub offset: u32,
    pub limit: u32,
    pub friend_type: FriendType,
}

impl Default for FriendsQuery {
    fn default() -> Self {
        FriendsQuery {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
            friend_type: FriendType::Friend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrophyTitlesQuery {
    pub offset: u32,
    pub limit: u32,
    pub compared_user: Option<String>,
}

impl Default for TrophyTitlesQuery {
    fn default() -> Self {
        TrophyTitlesQuery {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
            compared_user: None,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FriendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_defaults_to_news() {
        assert_eq!(Feed::from_name("feed"), Feed::Feed);
        assert_eq!(Feed::from_name("news"), Feed::News);
        assert_eq!(Feed::from_name("FEED"), Feed::News);
        assert_eq!(Feed::default(), Feed::News);
    }

    #[test]
    fn friend_type_falls_back_to_friend() {
        assert_eq!(FriendType::from_name("requesting"), FriendType::Requesting);
        assert_eq!(FriendType::from_name("requested"), FriendType::Requested);
        assert_eq!(FriendType::from_name("bogus"), FriendType::Friend);
        assert_eq!(FriendType::from_name(""), FriendType::Friend);
    }

    #[test]
    fn message_kind_table() {
        let keys: Vec<_> = [1, 3, 1011, 8]
            .into_iter()
            .map(|k| MessageKind::try_from(k).map(|m| m.content_key()).ok())
            .collect();
        assert_eq!(
            keys,
            vec![
                Some("message"),
                Some("image-data-0"),
                Some("voice-data-0"),
                Some("store-url-0")
            ]
        );
        assert!(matches!(
            MessageKind::try_from(2),
            Err(PsnError::UnknownMessageKind(2))
        ));
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(Feed::Feed.to_string(), "feed");
        assert_eq!(FriendType::Requesting.to_string(), "requesting");
        assert_eq!(format!("{}", FriendType::default()), "friend");
    }

    #[test]
    fn query_defaults() {
        let friends = FriendsQuery::default();
        assert_eq!((friends.offset, friends.limit), (0, 32));
        assert_eq!(friends.friend_type, FriendType::Friend);

        let trophies = TrophyTitlesQuery::default();
        assert_eq!((trophies.offset, trophies.limit), (0, 32));
        assert!(trophies.compared_user.is_none());
    }
}
