//! Client-side search over the content library
//!
//! This module provides the relevance scoring and ranking behind the
//! `search` command. Scoring is pure and synchronous; the `SearchClient`
//! gathers the library collections through the cached library client, so
//! repeated searches inside a TTL window never touch the network.

use futures::join;

use crate::data::{Game, LibraryClient, LibraryError, MediaItem, SignVideo};

/// Score for a query term equal to a title word
const TITLE_EXACT_WEIGHT: u32 = 12;

/// Score for a query term that prefixes a title word
const TITLE_PREFIX_WEIGHT: u32 = 6;

/// Score for a query term found inside a title word
const TITLE_PARTIAL_WEIGHT: u32 = 3;

/// Score for a query term equal to a curator keyword
const KEYWORD_WEIGHT: u32 = 8;

/// Score for a query term matching a video category
const CATEGORY_WEIGHT: u32 = 4;

/// Score for a query term matching a game's subject label
const SUBJECT_WEIGHT: u32 = 4;

/// What kind of library content a search hit points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    SignVideo,
    Game,
    Media,
}

impl SearchKind {
    /// Returns a human-readable display label for the result kind.
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::SignVideo => "Sign video",
            SearchKind::Game => "Game",
            SearchKind::Media => "Media",
        }
    }
}

/// A single ranked search result
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// What kind of content this is
    pub kind: SearchKind,
    /// Identifier of the underlying document
    pub id: String,
    /// Title shown in the result list
    pub title: String,
    /// Relevance score; higher is better
    pub score: u32,
}

/// Splits a raw query into lowercase search terms.
///
/// Whitespace separates terms; empty input yields no terms.
pub fn normalize_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Scores the terms against the words of a title.
///
/// Each term contributes its single best word match: exact beats prefix
/// beats substring. Terms that match nothing contribute zero.
fn score_title(title: &str, terms: &[String]) -> u32 {
    let words: Vec<String> = title
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut score = 0;
    for term in terms {
        let mut best = 0;
        for word in &words {
            let candidate = if word == term {
                TITLE_EXACT_WEIGHT
            } else if word.starts_with(term.as_str()) {
                TITLE_PREFIX_WEIGHT
            } else if word.contains(term.as_str()) {
                TITLE_PARTIAL_WEIGHT
            } else {
                0
            };
            best = best.max(candidate);
        }
        score += best;
    }
    score
}

/// Scores a sign video against the query terms.
///
/// Title words dominate; curator keywords and the category add to the
/// score so "alphabet" surfaces the whole alphabet category even when no
/// title contains the word.
pub fn score_sign_video(video: &SignVideo, terms: &[String]) -> u32 {
    let mut score = score_title(&video.title, terms);

    let category = video.category.to_lowercase();
    for term in terms {
        if video
            .keywords
            .iter()
            .any(|k| k.to_lowercase() == *term)
        {
            score += KEYWORD_WEIGHT;
        }
        if category == *term {
            score += CATEGORY_WEIGHT;
        }
    }
    score
}

/// Scores a learning game against the query terms.
pub fn score_game(game: &Game, terms: &[String]) -> u32 {
    let mut score = score_title(&game.title, terms);

    let subject = game.subject.label().to_lowercase();
    for term in terms {
        if subject == *term {
            score += SUBJECT_WEIGHT;
        }
    }
    score
}

/// Scores a gallery item against the query terms.
pub fn score_media_item(item: &MediaItem, terms: &[String]) -> u32 {
    score_title(&item.title, terms)
}

/// Orders hits by descending score, dropping non-matches.
///
/// Ties break alphabetically by title so result order is stable across
/// runs.
pub fn rank(mut hits: Vec<SearchHit>) -> Vec<SearchHit> {
    hits.retain(|hit| hit.score > 0);
    hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.title.cmp(&b.title)));
    hits
}

/// Search front end over the cached library client
#[derive(Debug, Clone)]
pub struct SearchClient {
    library: LibraryClient,
}

impl SearchClient {
    /// Creates a search client over the given library client
    pub fn new(library: LibraryClient) -> Self {
        Self { library }
    }

    /// Searches sign videos and games, plus one classroom's gallery if
    /// requested
    ///
    /// # Arguments
    /// * `query` - Raw user query; whitespace-separated terms
    /// * `classroom_id` - When given, that classroom's gallery is searched
    ///   too
    ///
    /// # Returns
    /// * `Ok(Vec<SearchHit>)` - Matching results, best first
    /// * `Err(LibraryError)` - If a required fetch fails
    pub async fn search(
        &self,
        query: &str,
        classroom_id: Option<&str>,
    ) -> Result<Vec<SearchHit>, LibraryError> {
        let terms = normalize_query(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let (videos, games) = join!(
            self.library.fetch_sign_videos(),
            self.library.fetch_games()
        );
        let videos = videos?;
        let games = games?;

        let mut hits: Vec<SearchHit> = Vec::new();

        hits.extend(videos.iter().map(|v| SearchHit {
            kind: SearchKind::SignVideo,
            id: v.id.clone(),
            title: v.title.clone(),
            score: score_sign_video(v, &terms),
        }));
        hits.extend(games.iter().map(|g| SearchHit {
            kind: SearchKind::Game,
            id: g.id.clone(),
            title: g.title.clone(),
            score: score_game(g, &terms),
        }));

        if let Some(classroom_id) = classroom_id {
            let gallery = self.library.fetch_gallery(classroom_id).await?;
            hits.extend(gallery.iter().map(|m| SearchHit {
                kind: SearchKind::Media,
                id: m.id.clone(),
                title: m.title.clone(),
                score: score_media_item(m, &terms),
            }));
        }

        Ok(rank(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Subject;

    fn video(id: &str, title: &str, category: &str, keywords: &[&str]) -> SignVideo {
        SignVideo {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            video_file_id: format!("blob-{}", id),
            duration_seconds: 10,
        }
    }

    fn game(id: &str, title: &str, subject: Subject) -> Game {
        Game {
            id: id.to_string(),
            title: title.to_string(),
            subject,
            min_grade: 1,
            max_grade: 6,
            plays: 0,
        }
    }

    #[test]
    fn test_normalize_query_lowercases_and_splits() {
        assert_eq!(
            normalize_query("  Good   MORNING "),
            vec!["good".to_string(), "morning".to_string()]
        );
    }

    #[test]
    fn test_normalize_empty_query() {
        assert!(normalize_query("   ").is_empty());
        assert!(normalize_query("").is_empty());
    }

    #[test]
    fn test_exact_title_match_beats_prefix_match() {
        let terms = normalize_query("sign");
        let exact = video("sv-1", "Sign", "everyday", &[]);
        let prefix = video("sv-2", "Signature", "everyday", &[]);

        assert!(score_sign_video(&exact, &terms) > score_sign_video(&prefix, &terms));
    }

    #[test]
    fn test_prefix_beats_substring() {
        let terms = normalize_query("read");
        let prefix = video("sv-1", "Reading", "school", &[]);
        let partial = video("sv-2", "Bread", "food", &[]);

        assert!(score_sign_video(&prefix, &terms) > score_sign_video(&partial, &terms));
    }

    #[test]
    fn test_keyword_match_scores_without_title_hit() {
        let terms = normalize_query("greeting");
        let v = video("sv-1", "Hello", "everyday", &["greeting", "wave"]);

        assert_eq!(score_sign_video(&v, &terms), KEYWORD_WEIGHT);
    }

    #[test]
    fn test_category_match_scores_without_title_hit() {
        let terms = normalize_query("alphabet");
        let v = video("sv-1", "A", "alphabet", &[]);

        assert_eq!(score_sign_video(&v, &terms), CATEGORY_WEIGHT);
    }

    #[test]
    fn test_game_subject_label_matches() {
        let terms = normalize_query("math");
        let g = game("gm-1", "Fraction Frenzy", Subject::Math);

        assert_eq!(score_game(&g, &terms), SUBJECT_WEIGHT);
    }

    #[test]
    fn test_multi_term_scores_accumulate() {
        let terms = normalize_query("good morning");
        let both = video("sv-1", "Good morning", "everyday", &[]);
        let one = video("sv-2", "Good night", "everyday", &[]);

        assert!(score_sign_video(&both, &terms) > score_sign_video(&one, &terms));
    }

    #[test]
    fn test_rank_drops_non_matches_and_sorts() {
        let hits = vec![
            SearchHit {
                kind: SearchKind::Game,
                id: "gm-1".to_string(),
                title: "Zeros".to_string(),
                score: 3,
            },
            SearchHit {
                kind: SearchKind::SignVideo,
                id: "sv-1".to_string(),
                title: "Hello".to_string(),
                score: 12,
            },
            SearchHit {
                kind: SearchKind::Media,
                id: "md-1".to_string(),
                title: "Field trip".to_string(),
                score: 0,
            },
        ];

        let ranked = rank(hits);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "sv-1");
        assert_eq!(ranked[1].id, "gm-1");
    }

    #[test]
    fn test_rank_ties_break_alphabetically() {
        let hits = vec![
            SearchHit {
                kind: SearchKind::Game,
                id: "gm-1".to_string(),
                title: "Bravo".to_string(),
                score: 6,
            },
            SearchHit {
                kind: SearchKind::Game,
                id: "gm-2".to_string(),
                title: "Alpha".to_string(),
                score: 6,
            },
        ];

        let ranked = rank(hits);
        assert_eq!(ranked[0].title, "Alpha");
        assert_eq!(ranked[1].title, "Bravo");
    }

    #[tokio::test]
    async fn test_search_serves_entirely_from_cache() {
        use crate::cache::DataCache;
        use crate::data::{BackendClient, LibraryClient};
        use chrono::Duration;

        let cache = DataCache::new();
        cache
            .write(
                "sign-videos-all",
                &vec![video("sv-1", "Good morning", "everyday", &["greeting"])],
                Duration::minutes(30),
            )
            .expect("seed write should succeed");
        cache
            .write(
                "games-all",
                &vec![game("gm-1", "Morning math", Subject::Math)],
                Duration::minutes(30),
            )
            .expect("seed write should succeed");

        // The backend is unreachable; both collections come from cache
        let backend = BackendClient::new("proj", "key").with_base_url("http://127.0.0.1:9");
        let client = SearchClient::new(LibraryClient::with_cache(backend, cache));

        let hits = client.search("morning", None).await.expect("cached search");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
    }

    #[tokio::test]
    async fn test_search_with_empty_query_is_empty_without_fetching() {
        use crate::data::{BackendClient, LibraryClient};

        let backend = BackendClient::new("proj", "key").with_base_url("http://127.0.0.1:9");
        let client = SearchClient::new(LibraryClient::new(backend));

        // No terms means no fetch; an unreachable backend cannot fail this
        let hits = client.search("   ", None).await.expect("empty query");
        assert!(hits.is_empty());
    }
}
