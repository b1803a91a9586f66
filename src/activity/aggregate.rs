//! Filtering and counting over an activity list

use serde::Serialize;

use super::{Activity, ActivityFilter, ActivityType};

/// Per-type activity counts
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ActivityCounts {
    pub all: usize,
    pub success: usize,
    pub warning: usize,
    pub danger: usize,
    pub info: usize,
}

impl ActivityCounts {
    /// Count shown next to a filter button
    pub fn get(&self, filter: &ActivityFilter) -> usize {
        match filter {
            ActivityFilter::All => self.all,
            ActivityFilter::Only(kind) => self.of_type(*kind),
            ActivityFilter::Unrecognized(_) => 0,
        }
    }

    pub fn of_type(&self, kind: ActivityType) -> usize {
        match kind {
            ActivityType::Success => self.success,
            ActivityType::Warning => self.warning,
            ActivityType::Danger => self.danger,
            ActivityType::Info => self.info,
        }
    }
}

/// Activities matching `filter`, in their original order
pub fn filter_by_type<'a>(activities: &'a [Activity], filter: &ActivityFilter) -> Vec<&'a Activity> {
    activities.iter().filter(|a| filter.matches(a)).collect()
}

/// Count activities per type
pub fn count_by_type(activities: &[Activity]) -> ActivityCounts {
    activities.iter().fold(
        ActivityCounts {
            all: activities.len(),
            ..Default::default()
        },
        |mut counts, activity| {
            match activity.kind {
                ActivityType::Success => counts.success += 1,
                ActivityType::Warning => counts.warning += 1,
                ActivityType::Danger => counts.danger += 1,
                ActivityType::Info => counts.info += 1,
            }
            counts
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<Activity> {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let kinds = [
            ActivityType::Success,
            ActivityType::Info,
            ActivityType::Warning,
            ActivityType::Success,
            ActivityType::Info,
            ActivityType::Danger,
            ActivityType::Success,
        ];
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Activity::new(i.to_string(), *kind, format!("t{}", i), "", t))
            .collect()
    }

    fn all_filters() -> Vec<ActivityFilter> {
        let mut filters = ActivityFilter::buttons().to_vec();
        filters.push(ActivityFilter::Unrecognized("critical".to_string()));
        filters
    }

    #[test]
    fn test_all_returns_everything() {
        let activities = sample();
        let filtered = filter_by_type(&activities, &ActivityFilter::All);
        assert_eq!(filtered.len(), activities.len());
        assert!(filtered.iter().zip(&activities).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_filter_preserves_order() {
        let activities = sample();
        let ids: Vec<&str> = filter_by_type(&activities, &ActivityType::Success.into())
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "3", "6"]);
    }

    #[test]
    fn test_unrecognized_filter_is_empty() {
        let activities = sample();
        let filter = ActivityFilter::Unrecognized("critical".to_string());
        assert!(filter_by_type(&activities, &filter).is_empty());
    }

    #[test]
    fn test_counts() {
        let counts = count_by_type(&sample());
        assert_eq!(
            counts,
            ActivityCounts {
                all: 7,
                success: 3,
                warning: 1,
                danger: 1,
                info: 2,
            }
        );
        assert_eq!(
            counts.success + counts.warning + counts.danger + counts.info,
            counts.all
        );
    }

    #[test]
    fn test_filtered_length_matches_count() {
        let activities = sample();
        let counts = count_by_type(&activities);
        for filter in all_filters() {
            assert_eq!(
                filter_by_type(&activities, &filter).len(),
                counts.get(&filter),
                "filter {}",
                filter
            );
        }
    }

    #[test]
    fn test_filtered_items_come_from_input() {
        let activities = sample();
        for filter in all_filters() {
            for item in filter_by_type(&activities, &filter) {
                assert!(activities.iter().any(|a| std::ptr::eq(a, item)));
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let counts = count_by_type(&[]);
        assert_eq!(counts, ActivityCounts::default());
        assert!(filter_by_type(&[], &ActivityFilter::All).is_empty());
    }
}
