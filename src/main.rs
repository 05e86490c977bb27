use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use psn_feed::display::output::{
    display_error, display_friend_list, display_info, display_json, display_success,
    display_trophy_titles,
};
use psn_feed::sanitize::parse_int;
use psn_feed::{
    ActivityQuery, Config, Feed, FriendType, FriendsQuery, HttpTransport, PsnClient,
    TrophyTitlesQuery,
};
use serde_json::Value;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "psn")]
#[command(about = "Query PlayStation Network profiles, friends, trophies and activity", long_about = None)]
struct Args {
    /// Region used for regional hosts (overrides PSN_REGION)
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Response language (overrides PSN_LANGUAGE)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Print the raw JSON response instead of tables
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a user's profile
    Profile { username: String },

    /// List the signed-in user's message groups
    MessageGroups,

    /// Fetch one message's content
    MessageContent {
        group_id: String,
        message_uid: String,
        /// 1 = text, 3 = image, 8 = store link, 1011 = voice
        kind: String,
    },

    /// Read the activity feed
    Activity {
        /// "feed" or "news"
        #[arg(long, default_value = "news")]
        feed: String,

        /// Activity types to keep, e.g. TROPHY,LIKED
        #[arg(long, value_delimiter = ',')]
        filter: Vec<String>,

        #[arg(long, default_value = "0")]
        page: String,
    },

    /// Like an activity story
    Like { story_id: String },

    /// Dislike an activity story
    Dislike { story_id: String },

    /// List notifications
    Notifications,

    /// Accept a friend request
    AddFriend { username: String },

    /// Remove a friend
    RemoveFriend { username: String },

    /// Send a friend request
    FriendRequest {
        username: String,
        #[arg(short, long, default_value = "")]
        message: String,
    },

    /// List friends
    Friends {
        #[arg(long, default_value = "0")]
        offset: u32,

        #[arg(long, default_value = "32")]
        limit: u32,

        /// friend, requesting or requested
        #[arg(long = "type", default_value = "friend")]
        friend_type: String,
    },

    /// Create a shareable friend link
    FriendUrl,

    /// List trophy titles, optionally compared with another user
    Trophies {
        #[arg(long, default_value = "0")]
        offset: u32,

        #[arg(long, default_value = "32")]
        limit: u32,

        #[arg(long)]
        compare: Option<String>,
    },

    /// List a title's trophy groups
    TrophyGroups {
        np_comm_id: String,
        #[arg(long)]
        compare: Option<String>,
    },

    /// List trophies in a trophy group
    TrophyList {
        np_comm_id: String,
        group_id: String,
        #[arg(long)]
        compare: Option<String>,
    },

    /// Show one trophy
    Trophy {
        np_comm_id: String,
        group_id: String,
        trophy_id: String,
        #[arg(long)]
        compare: Option<String>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn integer(name: &str, raw: &str) -> anyhow::Result<i64> {
    parse_int(raw).ok_or_else(|| anyhow!("{} must be a number, got {:?}", name, raw))
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(region) = args.region {
        config.region = region;
    }
    if let Some(lang) = args.lang {
        config.language = lang;
    }

    display_info(&format!(
        "Using region {} as {}",
        config.region, config.online_id
    ));

    let client = PsnClient::new(HttpTransport::new(config));

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Contacting PSN");

    let result = dispatch(&client, &args.command);
    spinner.finish_and_clear();

    let data = result?;
    match &args.command {
        Command::Friends { .. } if !args.raw => display_friend_list(&data),
        Command::Trophies { .. } if !args.raw => display_trophy_titles(&data),
        Command::AddFriend { .. }
        | Command::RemoveFriend { .. }
        | Command::FriendRequest { .. }
        | Command::Like { .. }
        | Command::Dislike { .. }
            if data.is_null() =>
        {
            display_success("Done");
        }
        _ => display_json(&data),
    }

    Ok(())
}

fn dispatch(client: &PsnClient<HttpTransport>, command: &Command) -> anyhow::Result<Value> {
    let data = match command {
        Command::Profile { username } => client.get_profile(username),
        Command::MessageGroups => client.get_message_groups(),
        Command::MessageContent {
            group_id,
            message_uid,
            kind,
        } => client.get_message_content(
            group_id,
            integer("message_uid", message_uid)?,
            integer("kind", kind)?,
        ),
        Command::Activity { feed, filter, page } => client.get_latest_activity(&ActivityQuery {
            feed: Feed::from_name(feed),
            filters: filter.clone(),
            page: integer("page", page)?,
        }),
        Command::Like { story_id } => client.like_activity(story_id),
        Command::Dislike { story_id } => client.dislike_activity(story_id),
        Command::Notifications => client.get_notifications(),
        Command::AddFriend { username } => client.add_friend(username),
        Command::RemoveFriend { username } => client.remove_friend(username),
        Command::FriendRequest { username, message } => {
            client.send_friend_request(username, message)
        }
        Command::Friends {
            offset,
            limit,
            friend_type,
        } => client.get_friends(&FriendsQuery {
            offset: *offset,
            limit: *limit,
            friend_type: FriendType::from_name(friend_type),
        }),
        Command::FriendUrl => client.generate_friend_url(),
        Command::Trophies {
            offset,
            limit,
            compare,
        } => client.get_user_trophies(&TrophyTitlesQuery {
            offset: *offset,
            limit: *limit,
            compared_user: compare.clone(),
        }),
        Command::TrophyGroups {
            np_comm_id,
            compare,
        } => client.get_trophy_groups(np_comm_id, compare.as_deref()),
        Command::TrophyList {
            np_comm_id,
            group_id,
            compare,
        } => client.get_trophies(np_comm_id, group_id, compare.as_deref()),
        Command::Trophy {
            np_comm_id,
            group_id,
            trophy_id,
            compare,
        } => client.get_trophy(
            np_comm_id,
            group_id,
            integer("trophy_id", trophy_id)?,
            compare.as_deref(),
        ),
    };

    data.context("PSN request failed")
}
