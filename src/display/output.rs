use colored::*;
use serde::Deserialize;
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

// Lenient views over list responses, only used for rendering tables.

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct FriendEntry {
    online_id: String,
    relation: String,
    plus: Value,
    presence: Option<Presence>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Presence {
    primary_info: Option<PrimaryInfo>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PrimaryInfo {
    online_status: String,
    game_title_info: Option<GameTitleInfo>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GameTitleInfo {
    title_name: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct TrophyTitleEntry {
    np_communication_id: String,
    trophy_title_name: String,
    // The service spells it this way.
    #[serde(alias = "trophyTitlePlatfrom")]
    trophy_title_platform: String,
    defined_trophies: TrophyCounts,
    from_user: Option<UserProgress>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TrophyCounts {
    bronze: u32,
    silver: u32,
    gold: u32,
    platinum: u32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct UserProgress {
    progress: u32,
}

#[derive(Tabled)]
struct FriendRow {
    #[tabled(rename = "#")]
    number: String,
    online_id: String,
    status: String,
    playing: String,
    relation: String,
}

#[derive(Tabled)]
struct TrophyTitleRow {
    title: String,
    platform: String,
    trophies: String,
    progress: String,
    np_comm_id: String,
}

fn list_entries<'a, D: Deserialize<'a> + Default>(data: &'a Value, key: &str) -> Vec<D> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| D::deserialize(item).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

pub fn display_json(data: &Value) {
    match serde_json::to_string_pretty(data) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", data),
    }
}

pub fn display_friend_list(data: &Value) {
    let friends: Vec<FriendEntry> = list_entries(data, "friendList");
    let total = data
        .get("totalResults")
        .and_then(Value::as_u64)
        .unwrap_or(friends.len() as u64);

    println!("\n{}", format!("👥 FRIENDS ({} total)", total).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if friends.is_empty() {
        println!("{}", "No friends in this page".yellow());
        return;
    }

    let rows: Vec<FriendRow> = friends
        .into_iter()
        .enumerate()
        .map(|(idx, friend)| {
            let primary = friend.presence.and_then(|p| p.primary_info).unwrap_or_default();
            let status = if primary.online_status == "online" {
                "online".green().to_string()
            } else if primary.online_status.is_empty() {
                "-".to_string()
            } else {
                primary.online_status.dimmed().to_string()
            };
            let plus = matches!(friend.plus, Value::Bool(true)) || friend.plus.as_u64() == Some(1);

            FriendRow {
                number: format!("{}", idx + 1),
                online_id: if plus {
                    format!("{} {}", friend.online_id, "+".yellow())
                } else {
                    friend.online_id
                },
                status,
                playing: primary
                    .game_title_info
                    .map(|g| g.title_name)
                    .unwrap_or_default(),
                relation: friend.relation,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_trophy_titles(data: &Value) {
    let titles: Vec<TrophyTitleEntry> = list_entries(data, "trophyTitles");

    println!("\n{}", "🏆 TROPHY TITLES".bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    if titles.is_empty() {
        println!("{}", "No trophy titles in this page".yellow());
        return;
    }

    let rows: Vec<TrophyTitleRow> = titles
        .into_iter()
        .map(|title| {
            let counts = &title.defined_trophies;
            TrophyTitleRow {
                title: title.trophy_title_name,
                platform: title.trophy_title_platform,
                trophies: format!(
                    "{}P {}G {}S {}B",
                    counts.platinum, counts.gold, counts.silver, counts.bronze
                ),
                progress: title
                    .from_user
                    .map(|u| format!("{}%", u.progress))
                    .unwrap_or_else(|| "-".to_string()),
                np_comm_id: title.np_communication_id,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    eprintln!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}
