// URL templates and field selectors for the PSN community APIs.
// `{{region}}`, `{{psn}}`, `{{lang}}` and `{{id}}` are resolved by the transport.

pub const PROFILE_ENDPOINT: &str =
    "https://{{region}}-prof.np.community.playstation.net/userProfile/v1/users/{{id}}/profile";
pub const FRIEND_LIST_ENDPOINT: &str =
    "https://{{region}}-prof.np.community.playstation.net/userProfile/v1/users/{{psn}}/friendList";
pub const FRIEND_ENDPOINT: &str =
    "https://{{region}}-prof.np.community.playstation.net/userProfile/v1/users/{{psn}}/friendList/{{id}}";
pub const FRIEND_URL_ENDPOINT: &str =
    "https://friendme.sonyentertainmentnetwork.com/friendme/api/v1/c2s/users/me/friendrequest";

pub const MESSAGE_GROUPS_ENDPOINT: &str =
    "https://{{region}}-gmsg.np.community.playstation.net/groupMessaging/v1/users/{{psn}}/messageGroups";
pub const MESSAGE_GROUP_ENDPOINT: &str =
    "https://{{region}}-gmsg.np.community.playstation.net/groupMessaging/v1/messageGroups";

pub const ACTIVITY_ENDPOINT: &str =
    "https://activity.api.np.km.playstation.net/activity/api/v1/users/{{psn}}";

pub const NOTIFICATIONS_ENDPOINT: &str =
    "https://{{region}}-ntl.np.community.playstation.net/notificationList/v1/users/{{psn}}/notifications";

pub const TROPHY_TITLES_ENDPOINT: &str =
    "https://{{region}}-tpy.np.community.playstation.net/trophy/v1/trophyTitles";

pub const PROFILE_FIELDS: &str =
    "@default,relation,requestMessageFlag,presence,@personalDetail,trophySummary";
pub const FRIEND_FIELDS: &str =
    "@default,relation,onlineId,avatarUrl,plus,@personalDetail,trophySummary";
pub const MESSAGE_FIELDS: &str =
    "@default,messageGroupId,messageGroupDetail,totalUnseenMessages,totalMessages,latestMessage";
pub const NOTIFICATION_FIELDS: &str = "@default,message,actionUrl";
pub const TROPHY_FIELDS: &str = "@default,trophyRare,trophyEarnedRate";
pub const TROPHY_TITLE_FIELDS: &str = "@default";

pub const TROPHY_PLATFORMS: &str = "PS3,PSVITA,PS4";
pub const LANGUAGE_MACRO: &str = "{{lang}}";

/// Filters accepted by the activity feed.
pub const ACTIVITY_TYPES: [&str; 17] = [
    "PURCHASED",
    "RATED",
    "PLAYED_WITH",
    "VIDEO_UPLOAD",
    "SCREENSHOT_UPLOAD",
    "PLAYED_GAME",
    "LAUNCHED_GAME_FIRST_TIME",
    "WATCHED_VIDEO",
    "TROPHY",
    "BROADCASTING",
    "LIKED",
    "PROFILE_ABOUT_ME",
    "PROFILE_PIC",
    "FRIENDED",
    "CONTENT_SHARE",
    "STORE_PROMO",
    "IN_GAME_POST",
];

pub fn is_activity_type(token: &str) -> bool {
    ACTIVITY_TYPES.contains(&token)
}
