use std::collections::HashSet;

use crate::clients::youtube::{SearchError, VideoCandidate, VideoSearch, YoutubeClient};
use crate::models::episode::{VideoKind, VideoMatch};

/// Attaches a best-effort video link to newly discovered episodes via
/// the bounded video search.
pub struct Enricher<S> {
    search: S,
}

impl<S: VideoSearch> Enricher<S> {
    #[must_use]
    pub const fn new(search: S) -> Self {
        Self { search }
    }

    pub async fn enrich(
        &self,
        show_name: &str,
        number: i32,
    ) -> Result<Option<VideoMatch>, SearchError> {
        let query = format!("{show_name} Episode {number}");
        let candidates = self.search.search(&query).await?;

        Ok(classify_first_match(&candidates, show_name, number))
    }
}

/// The first candidate (in API order) whose title matches the episode is
/// accepted and classified; later candidates are never considered, even
/// if one of them would classify differently.
///
/// A title matches when its lower-cased whitespace tokens contain every
/// token of the show name, the token "episode", and the episode number.
fn classify_first_match(
    candidates: &[VideoCandidate],
    show_name: &str,
    number: i32,
) -> Option<VideoMatch> {
    let lowered_name = show_name.to_lowercase();
    let name_tokens: Vec<&str> = lowered_name.split_whitespace().collect();
    let number_token = number.to_string();

    for candidate in candidates {
        let lowered = candidate.title.to_lowercase();
        let tokens: HashSet<&str> = lowered.split_whitespace().collect();

        let matches = name_tokens.iter().all(|t| tokens.contains(t))
            && tokens.contains("episode")
            && tokens.contains(number_token.as_str());

        if !matches {
            continue;
        }

        let kind = if tokens.contains("trailer")
            || (tokens.contains("sneak") && tokens.contains("peek"))
        {
            VideoKind::Trailer
        } else {
            VideoKind::Related
        };

        return Some(VideoMatch {
            kind,
            link: YoutubeClient::watch_url(&candidate.video_id),
            title: candidate.title.clone(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, title: &str) -> VideoCandidate {
        VideoCandidate {
            video_id: id.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn first_matching_candidate_wins_over_later_trailer() {
        let candidates = vec![
            candidate("a", "Totally unrelated clip"),
            candidate("b", "Pluribus Episode 3 breakdown"),
            candidate("c", "Pluribus Episode 3 official trailer"),
        ];

        let result = classify_first_match(&candidates, "Pluribus", 3).unwrap();
        assert_eq!(result.kind, VideoKind::Related);
        assert_eq!(result.link, "https://www.youtube.com/watch?v=b");
        assert_eq!(result.title, "Pluribus Episode 3 breakdown");
    }

    #[test]
    fn trailer_token_classifies_as_trailer() {
        let candidates = vec![candidate("a", "Pluribus Episode 2 Trailer")];

        let result = classify_first_match(&candidates, "Pluribus", 2).unwrap();
        assert_eq!(result.kind, VideoKind::Trailer);
    }

    #[test]
    fn sneak_peek_classifies_as_trailer() {
        let candidates = vec![candidate("a", "Pluribus Episode 2 Sneak Peek")];

        let result = classify_first_match(&candidates, "Pluribus", 2).unwrap();
        assert_eq!(result.kind, VideoKind::Trailer);
    }

    #[test]
    fn all_show_name_tokens_must_appear() {
        let candidates = vec![
            candidate("a", "Breaking Episode 1 clip"),
            candidate("b", "Breaking Bad Episode 1 clip"),
        ];

        let result = classify_first_match(&candidates, "Breaking Bad", 1).unwrap();
        assert_eq!(result.link, "https://www.youtube.com/watch?v=b");
    }

    #[test]
    fn episode_number_must_match_as_a_whole_token() {
        let candidates = vec![candidate("a", "Pluribus Episode 13 recap")];

        assert!(classify_first_match(&candidates, "Pluribus", 1).is_none());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let candidates = vec![candidate("a", "PLURIBUS EPISODE 4 REVIEW")];

        assert!(classify_first_match(&candidates, "Pluribus", 4).is_some());
    }

    #[test]
    fn no_candidates_means_no_match() {
        assert!(classify_first_match(&[], "Pluribus", 1).is_none());
    }
}
