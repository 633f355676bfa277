use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{Item, ItemId, PreferenceSet, ScoredItem, Strategy, SyntheticPeer};

/// Maximum number of items any strategy returns
pub const RECOMMENDATION_LIMIT: usize = 6;

/// Weight of the genre overlap in the content score
pub const GENRE_WEIGHT: f64 = 0.7;

/// Weight of the rescaled rating in the content score
pub const RATING_WEIGHT: f64 = 0.3;

/// Rating that maps to a zero boost
const NEUTRAL_RATING: f64 = 5.0;

/// Ranks catalog items against a preference set
///
/// Every strategy is a pure function of the catalog, the peer table and the
/// preferences: identical inputs yield identical output, and nothing is
/// mutated. Results never exceed [`RECOMMENDATION_LIMIT`] items.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    items: &'a [Item],
    peers: &'a [SyntheticPeer],
}

impl<'a> Recommender<'a> {
    /// Creates a recommender over a catalog and a synthetic peer table
    pub fn new(items: &'a [Item], peers: &'a [SyntheticPeer]) -> Self {
        Self { items, peers }
    }

    /// Runs the selected strategy
    pub fn recommend(&self, strategy: Strategy, preferences: &PreferenceSet) -> Vec<&'a Item> {
        match strategy {
            Strategy::Content => self.content_based(preferences),
            Strategy::Collaborative => self.collaborative(preferences),
            Strategy::Hybrid => self.hybrid(preferences),
        }
    }

    /// Highest rated items, ties kept in catalog order
    pub fn popular(&self) -> Vec<&'a Item> {
        let mut ranked: Vec<&'a Item> = self.items.iter().collect();
        // sort_by is stable, which keeps equal ratings in catalog order
        ranked.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(RECOMMENDATION_LIMIT);
        ranked
    }

    /// Genre overlap blended with rating
    ///
    /// `0.7 * matched / |preferences| + 0.3 * (rating - 5) / 5`, keeping only
    /// strictly positive scores.
    pub fn content_based(&self, preferences: &PreferenceSet) -> Vec<&'a Item> {
        // Must stay ahead of content_score, which divides by the preference count
        if preferences.is_empty() {
            return self.popular();
        }

        let mut scored: Vec<ScoredItem<'a>> = self
            .items
            .iter()
            .map(|item| ScoredItem {
                item,
                score: content_score(item, preferences),
            })
            .filter(|scored| scored.score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .take(RECOMMENDATION_LIMIT)
            .map(|scored| scored.item)
            .collect()
    }

    /// Items liked by peers who share at least one preferred tag
    ///
    /// Returned in catalog order, not by rating. No matching peer means an
    /// empty result rather than the popular fallback.
    pub fn collaborative(&self, preferences: &PreferenceSet) -> Vec<&'a Item> {
        if preferences.is_empty() {
            return self.popular();
        }

        let candidates: HashSet<ItemId> = self
            .peers
            .iter()
            .filter(|peer| peer.shares_taste(preferences))
            .flat_map(|peer| peer.liked_items())
            .collect();

        self.items
            .iter()
            .filter(|item| candidates.contains(&item.id))
            .take(RECOMMENDATION_LIMIT)
            .collect()
    }

    /// Content results first, then collaborative results not already present
    pub fn hybrid(&self, preferences: &PreferenceSet) -> Vec<&'a Item> {
        let mut combined = self.content_based(preferences);
        let collaborative = self.collaborative(preferences);

        for item in collaborative {
            if combined.len() >= RECOMMENDATION_LIMIT {
                break;
            }
            if !combined.iter().any(|existing| existing.id == item.id) {
                combined.push(item);
            }
        }

        combined.truncate(RECOMMENDATION_LIMIT);
        combined
    }
}

/// Content score of one item; `preferences` must be non-empty
pub fn content_score(item: &Item, preferences: &PreferenceSet) -> f64 {
    let matched = preferences.iter().filter(|tag| item.has_tag(*tag)).count();
    let genre_score = matched as f64 / preferences.len() as f64;
    let rating_boost = (item.quality_score - NEUTRAL_RATING) / NEUTRAL_RATING;

    GENRE_WEIGHT * genre_score + RATING_WEIGHT * rating_boost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::embedded::{reference_peers, sample_items};

    fn ids(items: &[&Item]) -> Vec<ItemId> {
        items.iter().map(|item| item.id).collect()
    }

    fn prefs(tags: &[u32]) -> PreferenceSet {
        tags.iter().copied().collect()
    }

    #[test]
    fn test_popular_orders_by_rating_with_stable_ties() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        // Interstellar and Sholay are both 8.6; catalog order decides
        assert_eq!(ids(&recommender.popular()), vec![5, 6, 2, 1, 3, 12]);
    }

    #[test]
    fn test_empty_preferences_fall_back_to_popular() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);
        let empty = PreferenceSet::new();
        let popular = ids(&recommender.popular());

        assert_eq!(ids(&recommender.content_based(&empty)), popular);
        assert_eq!(ids(&recommender.collaborative(&empty)), popular);
        assert_eq!(ids(&recommender.hybrid(&empty)), popular);
    }

    #[test]
    fn test_content_score_for_inception() {
        let items = sample_items();
        let inception = items.iter().find(|item| item.id == 2).unwrap();

        let score = content_score(inception, &prefs(&[28, 878]));
        assert!((score - 0.928).abs() < 1e-9);
    }

    #[test]
    fn test_content_score_divides_by_preference_count() {
        let item = Item::new(1, "Single Tag", [28], 5.0);
        // One of four preferences matched, neutral rating
        let score = content_score(&item, &prefs(&[28, 18, 35, 12]));
        assert!((score - 0.175).abs() < 1e-9);
    }

    #[test]
    fn test_content_based_ranking_for_action_sci_fi() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        let result = recommender.content_based(&prefs(&[28, 878]));
        assert_eq!(ids(&result), vec![2, 1, 5, 3, 12, 4]);
    }

    #[test]
    fn test_content_based_scores_are_positive_and_bounded() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        for tags in [vec![35], vec![18, 80], vec![10751, 36, 99], vec![16]] {
            let preferences = prefs(&tags);
            let result = recommender.content_based(&preferences);
            assert!(result.len() <= RECOMMENDATION_LIMIT);
            for item in result {
                assert!(content_score(item, &preferences) > 0.0);
            }
        }
    }

    #[test]
    fn test_content_based_threshold_is_strict() {
        let items = vec![
            Item::new(1, "Neutral", [18], 5.0),
            Item::new(2, "Poor", [18], 4.0),
            Item::new(3, "Good", [18], 5.5),
        ];
        let recommender = Recommender::new(&items, &[]);

        // No tag matches; 5.0 scores exactly zero and is dropped
        assert_eq!(ids(&recommender.content_based(&prefs(&[28]))), vec![3]);
    }

    #[test]
    fn test_content_based_low_rating_can_sink_partial_match() {
        let items = vec![Item::new(1, "Dud", [28], 0.0)];
        let recommender = Recommender::new(&items, &[]);

        assert!(recommender.content_based(&prefs(&[28, 18, 35, 12])).is_empty());
        assert_eq!(ids(&recommender.content_based(&prefs(&[28]))), vec![1]);
    }

    #[test]
    fn test_unknown_tags_never_match() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        // Only the rating boost remains, so this is the popular order
        let result = recommender.content_based(&prefs(&[424242]));
        assert_eq!(ids(&result), vec![5, 6, 2, 1, 3, 12]);
        assert!(recommender.collaborative(&prefs(&[424242])).is_empty());
    }

    #[test]
    fn test_collaborative_sci_fi_selects_peers_one_and_three() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        let result = recommender.collaborative(&prefs(&[878]));
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_collaborative_keeps_catalog_order() {
        let items = sample_items();
        let peers = vec![SyntheticPeer::new(1, [18], [(9, 10), (2, 7), (6, 8)])];
        let recommender = Recommender::new(&items, &peers);

        assert_eq!(ids(&recommender.collaborative(&prefs(&[18]))), vec![2, 6, 9]);
    }

    #[test]
    fn test_collaborative_drama_uses_peer_two_only() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        // Peer 2 rated The Matrix 6, below the like threshold
        assert_eq!(ids(&recommender.collaborative(&prefs(&[18]))), vec![5, 6]);
    }

    #[test]
    fn test_collaborative_without_matching_peers_is_empty() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        assert!(recommender.collaborative(&prefs(&[35])).is_empty());
    }

    #[test]
    fn test_collaborative_ignores_ids_missing_from_catalog() {
        let items = vec![Item::new(2, "Inception", [28, 878, 53], 8.8)];
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        assert_eq!(ids(&recommender.collaborative(&prefs(&[878]))), vec![2]);
    }

    #[test]
    fn test_hybrid_appends_unseen_collaborative_items() {
        let items = vec![
            Item::new(1, "Hit", [28], 9.0),
            Item::new(2, "Cult Classic", [18], 4.0),
            Item::new(3, "Forgettable", [18], 5.0),
        ];
        let peers = vec![SyntheticPeer::new(1, [28], [(1, 8), (2, 8), (3, 6)])];
        let recommender = Recommender::new(&items, &peers);
        let preferences = prefs(&[28]);

        assert_eq!(ids(&recommender.content_based(&preferences)), vec![1]);
        assert_eq!(ids(&recommender.collaborative(&preferences)), vec![1, 2]);
        assert_eq!(ids(&recommender.hybrid(&preferences)), vec![1, 2]);
    }

    #[test]
    fn test_hybrid_content_can_fill_every_slot() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);
        let preferences = prefs(&[35]);

        let content = recommender.content_based(&preferences);
        assert_eq!(ids(&content), vec![7, 11, 9, 5, 6, 2]);
        assert_eq!(ids(&recommender.hybrid(&preferences)), ids(&content));
    }

    #[test]
    fn test_hybrid_is_a_merge_of_both_strategies() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);

        for tags in [vec![878], vec![18], vec![28, 878], vec![14, 12], vec![9648]] {
            let preferences = prefs(&tags);
            let content = ids(&recommender.content_based(&preferences));
            let collaborative = ids(&recommender.collaborative(&preferences));
            let hybrid = ids(&recommender.hybrid(&preferences));

            assert!(hybrid.len() <= RECOMMENDATION_LIMIT);
            for id in &hybrid {
                assert!(content.contains(id) || collaborative.contains(id));
            }
            let content_prefix: Vec<ItemId> = content.iter().take(hybrid.len()).copied().collect();
            assert_eq!(&hybrid[..content_prefix.len()], &content_prefix[..]);
        }
    }

    #[test]
    fn test_strategies_are_deterministic() {
        let items = sample_items();
        let peers = reference_peers();
        let recommender = Recommender::new(&items, &peers);
        let preferences = prefs(&[28, 18, 878]);

        for strategy in Strategy::ALL {
            let first = ids(&recommender.recommend(strategy, &preferences));
            let second = ids(&recommender.recommend(strategy, &preferences));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_catalog_yields_empty_results() {
        let peers = reference_peers();
        let recommender = Recommender::new(&[], &peers);

        for strategy in Strategy::ALL {
            assert!(recommender.recommend(strategy, &PreferenceSet::new()).is_empty());
            assert!(recommender.recommend(strategy, &prefs(&[878])).is_empty());
        }
    }
}
