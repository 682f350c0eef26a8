use chrono::NaiveDate;

use crate::clients::imdb::RawEpisode;
use crate::models::episode::PendingEpisode;

/// Result of scanning one batch of feed entries.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub episodes: Vec<PendingEpisode>,
    /// Counter value after the scan; the next batch continues from here.
    pub counter: i32,
    /// True when the scan stopped at a future-dated entry. The caller
    /// should stop paging: everything after it is not released yet.
    pub hit_future: bool,
}

/// Walk feed entries in order and emit released, numbered episodes with
/// locally assigned sequential numbers.
///
/// Entries without a release date are skipped. Missing date components
/// default to 1; a date that cannot be constructed at all is treated
/// like a missing one. The first entry dated strictly after `today` ends
/// the scan — the feed is assumed chronologically ascending. Entries
/// without an episode-number marker are skipped and do not consume a
/// sequence slot.
pub fn scan_released(entries: &[RawEpisode], counter: i32, today: NaiveDate) -> FilterOutcome {
    let mut episodes = Vec::new();
    let mut counter = counter;
    let mut hit_future = false;

    for entry in entries {
        let Some(release) = &entry.release_date else {
            continue;
        };

        let Some(date) = NaiveDate::from_ymd_opt(
            release.year.unwrap_or(1),
            release.month.unwrap_or(1),
            release.day.unwrap_or(1),
        ) else {
            continue;
        };

        if date > today {
            hit_future = true;
            break;
        }

        if entry.episode_number.is_none() {
            continue;
        }

        counter += 1;
        episodes.push(PendingEpisode {
            number: counter,
            title: entry
                .title
                .clone()
                .unwrap_or_else(|| format!("Episode {counter}")),
            plot: entry.plot.clone().unwrap_or_default(),
            rating: entry
                .rating
                .as_ref()
                .and_then(|r| r.aggregate_rating)
                .unwrap_or(0.0),
        });
    }

    FilterOutcome {
        episodes,
        counter,
        hit_future,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::imdb::{AggregateRating, ReleaseDate};
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
    }

    fn entry(date: Option<NaiveDate>, number: Option<i32>) -> RawEpisode {
        RawEpisode {
            release_date: date.map(|d| {
                use chrono::Datelike;
                ReleaseDate {
                    year: Some(d.year()),
                    month: Some(d.month()),
                    day: Some(d.day()),
                }
            }),
            episode_number: number,
            ..Default::default()
        }
    }

    #[test]
    fn first_future_date_ends_the_scan() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        let day_after = today().checked_add_days(Days::new(2)).unwrap();

        let entries = vec![
            entry(Some(yesterday), Some(1)),
            entry(Some(today()), Some(2)),
            entry(Some(tomorrow), Some(3)),
            entry(Some(day_after), Some(4)),
        ];

        let outcome = scan_released(&entries, 0, today());

        assert!(outcome.hit_future);
        assert_eq!(outcome.counter, 2);
        assert_eq!(
            outcome.episodes.iter().map(|e| e.number).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn entries_without_release_date_are_skipped() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();

        let entries = vec![
            entry(None, Some(1)),
            entry(Some(yesterday), Some(2)),
        ];

        let outcome = scan_released(&entries, 0, today());

        assert!(!outcome.hit_future);
        assert_eq!(outcome.episodes.len(), 1);
        assert_eq!(outcome.episodes[0].number, 1);
    }

    #[test]
    fn entries_without_number_marker_do_not_consume_a_slot() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();

        let entries = vec![
            entry(Some(yesterday), Some(7)),
            entry(Some(yesterday), None),
            entry(Some(yesterday), Some(9)),
        ];

        let outcome = scan_released(&entries, 0, today());

        // Local numbering is sequential, independent of upstream markers.
        assert_eq!(
            outcome.episodes.iter().map(|e| e.number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(outcome.counter, 2);
    }

    #[test]
    fn missing_date_components_default_to_one() {
        let entries = vec![RawEpisode {
            release_date: Some(ReleaseDate {
                year: Some(2020),
                month: None,
                day: None,
            }),
            episode_number: Some(1),
            ..Default::default()
        }];

        let outcome = scan_released(&entries, 0, today());
        assert_eq!(outcome.episodes.len(), 1);
    }

    #[test]
    fn unconstructible_date_is_treated_as_missing() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();

        let entries = vec![
            RawEpisode {
                release_date: Some(ReleaseDate {
                    year: Some(2020),
                    month: Some(13),
                    day: Some(1),
                }),
                episode_number: Some(1),
                ..Default::default()
            },
            entry(Some(yesterday), Some(2)),
        ];

        let outcome = scan_released(&entries, 0, today());
        assert_eq!(outcome.episodes.len(), 1);
        assert_eq!(outcome.episodes[0].number, 1);
    }

    #[test]
    fn defaults_fill_missing_title_plot_and_rating() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();

        let entries = vec![entry(Some(yesterday), Some(1))];
        let outcome = scan_released(&entries, 4, today());

        let episode = &outcome.episodes[0];
        assert_eq!(episode.number, 5);
        assert_eq!(episode.title, "Episode 5");
        assert_eq!(episode.plot, "");
        assert!(episode.rating.abs() < f32::EPSILON);
    }

    #[test]
    fn counter_continues_from_given_value() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();

        let mut entries = vec![entry(Some(yesterday), Some(1))];
        entries[0].title = Some("The One After the Resume".to_string());
        entries[0].rating = Some(AggregateRating {
            aggregate_rating: Some(8.5),
        });

        let outcome = scan_released(&entries, 41, today());
        assert_eq!(outcome.counter, 42);
        assert_eq!(outcome.episodes[0].number, 42);
        assert_eq!(outcome.episodes[0].title, "The One After the Resume");
    }
}
