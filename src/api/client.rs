use crate::error::PsnError;
use crate::sanitize::clean_story_id;
use serde_json::{json, Value};
use tracing::trace;

use super::endpoints::*;
use super::models::*;
use super::transport::{Params, Transport};

/// PSN endpoint methods layered over an injected [`Transport`].
///
/// Every method issues at most one request and returns the transport's
/// result unchanged.
pub struct PsnClient<T: Transport> {
    transport: T,
}

fn options(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

impl<T: Transport> PsnClient<T> {
    pub fn new(transport: T) -> Self {
        PsnClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get_profile(&self, username: &str) -> Result<Value, PsnError> {
        let url = self.transport.replace_psn_username(PROFILE_ENDPOINT, username);
        trace!(%url, "get_profile");
        self.transport.get(&url, options(json!({ "fields": PROFILE_FIELDS })))
    }

    pub fn get_message_groups(&self) -> Result<Value, PsnError> {
        self.transport
            .get(MESSAGE_GROUPS_ENDPOINT, options(json!({ "fields": MESSAGE_FIELDS })))
    }

    /// Fails with [`PsnError::UnknownMessageKind`] without sending anything
    /// when `message_kind` has no content key.
    pub fn get_message_content(
        &self,
        message_group_id: &str,
        message_uid: i64,
        message_kind: i64,
    ) -> Result<Value, PsnError> {
        let kind = MessageKind::try_from(message_kind)?;

        let url = format!(
            "{}/{}/messages/{}",
            MESSAGE_GROUP_ENDPOINT,
            self.transport.clean_psn_list(message_group_id),
            message_uid
        );
        trace!(%url, content_key = kind.content_key(), "get_message_content");

        self.transport
            .get(&url, options(json!({ "contentKey": kind.content_key() })))
    }

    pub fn get_latest_activity(&self, query: &ActivityQuery) -> Result<Value, PsnError> {
        let filters: Vec<&str> = query
            .filters
            .iter()
            .map(String::as_str)
            .filter(|token| is_activity_type(token))
            .collect();

        let url = format!("{}/{}/{}", ACTIVITY_ENDPOINT, query.feed.as_str(), query.page);
        trace!(%url, feed = %query.feed, ?filters, "get_latest_activity");

        self.transport.get(&url, options(json!({ "filters": filters })))
    }

    pub fn like_activity(&self, story_id: &str) -> Result<Value, PsnError> {
        self.like_activity_with(story_id, false)
    }

    /// Sent as GET even though it changes state; that is the verb the
    /// activity service answers on.
    pub fn like_activity_with(&self, story_id: &str, dislike: bool) -> Result<Value, PsnError> {
        let url = format!(
            "{}/set/{}like/story/{}",
            ACTIVITY_ENDPOINT,
            if dislike { "dis" } else { "" },
            clean_story_id(story_id)
        );
        trace!(%url, "like_activity");
        self.transport.get(&url, Params::new())
    }

    pub fn dislike_activity(&self, story_id: &str) -> Result<Value, PsnError> {
        self.like_activity_with(story_id, true)
    }

    pub fn get_notifications(&self) -> Result<Value, PsnError> {
        self.transport.get(
            NOTIFICATIONS_ENDPOINT,
            options(json!({
                "fields": NOTIFICATION_FIELDS,
                "npLanguage": LANGUAGE_MACRO,
            })),
        )
    }

    /// Accepts a pending friend request from `username`.
    pub fn add_friend(&self, username: &str) -> Result<Value, PsnError> {
        let url = self.transport.replace_psn_username(FRIEND_ENDPOINT, username);
        self.transport.put(&url, Params::new())
    }

    pub fn remove_friend(&self, username: &str) -> Result<Value, PsnError> {
        let url = self.transport.replace_psn_username(FRIEND_ENDPOINT, username);
        self.transport.delete(&url, Params::new())
    }

    pub fn send_friend_request(&self, username: &str, message: &str) -> Result<Value, PsnError> {
        let url = self.transport.replace_psn_username(FRIEND_ENDPOINT, username);
        self.transport
            .post(&url, options(json!({ "requestMessage": message })))
    }

    pub fn get_friends(&self, query: &FriendsQuery) -> Result<Value, PsnError> {
        trace!(friend_type = %query.friend_type, offset = query.offset, "get_friends");
        self.transport.get(
            FRIEND_LIST_ENDPOINT,
            options(json!({
                "fields": FRIEND_FIELDS,
                "sort": "onlineId",
                "avatarSize": "l",
                "limit": query.limit,
                "offset": query.offset,
                "friendStatus": query.friend_type.as_str(),
            })),
        )
    }

    /// Creates a shareable link others can use to send a friend request.
    pub fn generate_friend_url(&self) -> Result<Value, PsnError> {
        self.transport
            .post(FRIEND_URL_ENDPOINT, options(json!({ "type": "ONE" })))
    }

    pub fn get_user_trophies(&self, query: &TrophyTitlesQuery) -> Result<Value, PsnError> {
        let mut params = options(json!({
            "fields": TROPHY_TITLE_FIELDS,
            "npLanguage": LANGUAGE_MACRO,
            "iconSize": "m",
            "platform": TROPHY_PLATFORMS,
            "offset": query.offset,
            "limit": query.limit,
        }));
        self.compare_with(&mut params, query.compared_user.as_deref());

        self.transport.get(TROPHY_TITLES_ENDPOINT, params)
    }

    pub fn get_trophy_groups(
        &self,
        np_communication_id: &str,
        compared_user: Option<&str>,
    ) -> Result<Value, PsnError> {
        let mut params = options(json!({ "npLanguage": LANGUAGE_MACRO }));
        self.compare_with(&mut params, compared_user);

        let url = format!(
            "{}/{}/trophyGroups/",
            TROPHY_TITLES_ENDPOINT,
            self.transport.clean_np_comm_id(np_communication_id)
        );
        self.transport.get(&url, params)
    }

    pub fn get_trophies(
        &self,
        np_communication_id: &str,
        trophy_group_id: &str,
        compared_user: Option<&str>,
    ) -> Result<Value, PsnError> {
        let url = format!(
            "{}/trophies",
            self.trophy_group_url(np_communication_id, trophy_group_id)
        );
        self.transport.get(&url, self.trophy_params(compared_user))
    }

    pub fn get_trophy(
        &self,
        np_communication_id: &str,
        trophy_group_id: &str,
        trophy_id: i64,
        compared_user: Option<&str>,
    ) -> Result<Value, PsnError> {
        let url = format!(
            "{}/trophies/{}",
            self.trophy_group_url(np_communication_id, trophy_group_id),
            trophy_id
        );
        self.transport.get(&url, self.trophy_params(compared_user))
    }

    fn trophy_group_url(&self, np_communication_id: &str, trophy_group_id: &str) -> String {
        format!(
            "{}/{}/trophyGroups/{}",
            TROPHY_TITLES_ENDPOINT,
            self.transport.clean_np_comm_id(np_communication_id),
            self.transport.clean_np_comm_id(trophy_group_id)
        )
    }

    fn trophy_params(&self, compared_user: Option<&str>) -> Params {
        let mut params = options(json!({
            "fields": TROPHY_FIELDS,
            "npLanguage": LANGUAGE_MACRO,
        }));
        self.compare_with(&mut params, compared_user);
        params
    }

    // An empty username counts as absent.
    fn compare_with(&self, params: &mut Params, compared_user: Option<&str>) {
        if let Some(user) = compared_user.filter(|u| !u.is_empty()) {
            params.insert(
                "comparedUser".to_string(),
                Value::String(self.transport.clean_psn(user)),
            );
        }
    }
}
