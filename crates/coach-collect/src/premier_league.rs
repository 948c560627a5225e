// Premier League stats site scraper.
//
// Reads the top-players leaderboard for a position, follows each player's
// link to their stats page and pulls the stat blocks the processor needs.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use coach_core::config::CollectorConfig;
use coach_core::position::Position;
use coach_core::stats::processor::required_fields;
use coach_core::stats::RawPlayerRecord;

use crate::source::{CollectRequest, StatSource};
use crate::CollectError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const SAVES_LEADERBOARD: &str = "/stats/top/players/saves";
const GOALS_LEADERBOARD: &str = "/stats/top/players/goals";

const PLAYER_LINK: &str = "a.playerName";
const STAT_BLOCK: &str = ".normalStat";
const STAT_LABEL: &str = ".stat";
const STAT_VALUE: &str = ".allStatContainer";

/// Keepers are ranked by saves, everyone else by goals.
pub fn leaderboard_path(position: Position) -> &'static str {
    match position {
        Position::Goalkeeper => SAVES_LEADERBOARD,
        _ => GOALS_LEADERBOARD,
    }
}

/// Query parameters narrowing the leaderboard to a request.
pub fn leaderboard_query(request: &CollectRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("season", request.season.label()),
        ("position", request.position.title().to_string()),
    ];
    if let Some(club) = &request.filters.club {
        query.push(("club", club.clone()));
    }
    if let Some(nationality) = &request.filters.nationality {
        query.push(("nationality", nationality.clone()));
    }
    query
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A leaderboard entry: player name and their stats page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLink {
    pub name: String,
    pub url: String,
}

fn selector(css: &'static str) -> Result<Selector, CollectError> {
    Selector::parse(css).map_err(|e| CollectError::Layout(format!("bad selector `{css}`: {e}")))
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn absolute_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href.trim_start_matches('/'))
    }
}

/// Player links on a leaderboard page, in ranking order, pointed at each
/// player's stats page rather than their overview.
pub fn parse_leaderboard(html: &str, base_url: &str) -> Result<Vec<PlayerLink>, CollectError> {
    let document = Html::parse_document(html);
    let links = selector(PLAYER_LINK)?;

    let mut players: Vec<PlayerLink> = Vec::new();
    for link in document.select(&links) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let name = collapsed_text(link);
        if name.is_empty() || players.iter().any(|p| p.name == name) {
            continue;
        }
        players.push(PlayerLink {
            name,
            url: absolute_url(href, base_url).replace("/overview", "/stats"),
        });
    }
    Ok(players)
}

/// Label of a `.stat` element: its own text, without the nested value.
fn stat_label(stat: ElementRef<'_>) -> String {
    let own: Vec<&str> = stat
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect();
    if own.is_empty() {
        stat.text()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_string()
    } else {
        own.join(" ")
    }
}

/// `(stat name, display value)` pairs from a player stats page, keeping only
/// names in `wanted` (compared ignoring case). An empty `wanted` keeps all.
pub fn parse_player_stats(html: &str, wanted: &[&str]) -> Result<Vec<(String, String)>, CollectError> {
    let document = Html::parse_document(html);
    let blocks = selector(STAT_BLOCK)?;
    let label = selector(STAT_LABEL)?;
    let value = selector(STAT_VALUE)?;
    let wanted: Vec<String> = wanted.iter().map(|w| w.to_lowercase()).collect();

    let mut stats = Vec::new();
    for block in document.select(&blocks) {
        let Some(stat) = block.select(&label).next() else {
            continue;
        };
        let name = stat_label(stat);
        if name.is_empty() || (!wanted.is_empty() && !wanted.contains(&name.to_lowercase())) {
            continue;
        }
        let Some(container) = block.select(&value).next() else {
            continue;
        };
        stats.push((name, collapsed_text(container)));
    }
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Scraper
// ---------------------------------------------------------------------------

/// HTTP scraper for the Premier League stats site.
pub struct PremierLeagueScraper {
    http: reqwest::Client,
    base_url: String,
    request_delay: Duration,
}

impl PremierLeagueScraper {
    pub fn new(config: &CollectorConfig) -> Result<Self, CollectError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<String, CollectError> {
        debug!("GET {url}");
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl StatSource for PremierLeagueScraper {
    async fn collect(&self, request: &CollectRequest) -> Result<Vec<RawPlayerRecord>, CollectError> {
        let url = format!("{}{}", self.base_url, leaderboard_path(request.position));
        let html = self.fetch(&url, &leaderboard_query(request)).await?;
        let players = parse_leaderboard(&html, &self.base_url)?;
        if players.is_empty() {
            return Err(CollectError::Layout(format!("no players found on {url}")));
        }
        info!(
            "found {} {} on the leaderboard, collecting {}",
            players.len(),
            request.position,
            request.limit.min(players.len())
        );

        let wanted = required_fields(request.position);
        let season_query = [("season", request.season.label())];
        let mut records = Vec::new();
        for player in players.into_iter().take(request.limit) {
            tokio::time::sleep(self.request_delay).await;
            let page = self.fetch(&player.url, &season_query).await?;
            let stats = parse_player_stats(&page, &wanted)?;
            if stats.is_empty() {
                return Err(CollectError::Layout(format!(
                    "no stats found for {} at {}",
                    player.name, player.url
                )));
            }
            debug!("collected {} stats for {}", stats.len(), player.name);

            let mut record = RawPlayerRecord::new(player.name);
            for (name, value) in stats {
                record.insert(name, value);
            }
            records.push(record);
        }
        Ok(records)
    }
}
