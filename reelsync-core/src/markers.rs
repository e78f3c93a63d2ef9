//! De-duplicated marker set for the mounted video.
//!
//! The store owns the canonical marker list; renderers only read it and
//! trigger refreshes. Refresh responses race freely (two in-flight fetches
//! may resolve in either order), so applications are guarded by a monotonic
//! request generation: the last refresh *issued* wins, never merely the
//! last response to resolve.

use reelsync_model::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Pure grouping of markers by rounded-second timestamp.
///
/// Deterministic and order-independent: two markers land in the same group
/// iff their rounded timestamps are equal, regardless of insertion order.
/// Cheap enough to re-derive on every render; never cached or persisted.
pub fn group_markers(markers: &[ReactionMarker]) -> BTreeMap<u32, MarkerGroup> {
    let mut groups: BTreeMap<u32, MarkerGroup> = BTreeMap::new();
    for marker in markers {
        let key = marker.group_key();
        groups
            .entry(key)
            .or_insert_with(|| MarkerGroup::new(key))
            .markers
            .push(marker.clone());
    }
    groups
}

/// Canonical reaction-marker set for one mounted video.
#[derive(Debug)]
pub struct MarkerStore {
    video_id: VideoID,
    markers: Vec<ReactionMarker>,
    next_generation: u64,
    applied_generation: u64,
}

impl MarkerStore {
    pub fn new(video_id: VideoID) -> Self {
        Self {
            video_id,
            markers: Vec::new(),
            next_generation: 0,
            applied_generation: 0,
        }
    }

    pub fn markers(&self) -> &[ReactionMarker] {
        &self.markers
    }

    /// Allocate the request generation for a refresh about to be issued.
    pub fn begin_refresh(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Replace the set atomically with the response of `generation`.
    ///
    /// Returns `false` when the response is stale (a newer refresh already
    /// applied); the current set is left untouched.
    pub fn apply_refresh(
        &mut self,
        generation: u64,
        markers: Vec<ReactionMarker>,
    ) -> bool {
        if generation <= self.applied_generation {
            debug!(
                video_id = %self.video_id,
                generation,
                applied = self.applied_generation,
                "discarding stale marker refresh"
            );
            return false;
        }
        self.applied_generation = generation;
        self.markers = markers;
        true
    }

    /// Derived glyph clusters, keyed by rounded second.
    pub fn groups(&self) -> BTreeMap<u32, MarkerGroup> {
        group_markers(&self.markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(video_id: VideoID, ts: f64) -> ReactionMarker {
        ReactionMarker {
            id: MarkerID::new(),
            video_id,
            user_id: UserID::new(),
            username: "viewer".into(),
            avatar_url: None,
            timestamp_seconds: ts,
        }
    }

    #[test]
    fn grouping_partitions_by_rounded_second() {
        let vid = VideoID::new();
        let markers = vec![
            marker(vid, 30.2),
            marker(vid, 30.6),
            marker(vid, 29.4),
            marker(vid, 31.5),
        ];
        let groups = group_markers(&markers);

        // 30.2 and 30.6 both round to 30; 29.4 to 29; 31.5 rounds up to 32.
        assert_eq!(
            groups.keys().copied().collect::<Vec<_>>(),
            vec![29, 30, 32]
        );
        assert_eq!(groups[&30].len(), 2);
    }

    #[test]
    fn grouping_is_order_independent() {
        let vid = VideoID::new();
        let mut markers = vec![
            marker(vid, 10.0),
            marker(vid, 10.4),
            marker(vid, 44.9),
            marker(vid, 45.2),
            marker(vid, 9.6),
        ];

        let baseline: Vec<(u32, Vec<MarkerID>)> = group_markers(&markers)
            .into_iter()
            .map(|(k, g)| {
                let mut ids: Vec<_> = g.markers.iter().map(|m| m.id).collect();
                ids.sort();
                (k, ids)
            })
            .collect();

        for _ in 0..markers.len() {
            markers.rotate_left(1);
            markers.reverse();
            let permuted: Vec<(u32, Vec<MarkerID>)> = group_markers(&markers)
                .into_iter()
                .map(|(k, g)| {
                    let mut ids: Vec<_> =
                        g.markers.iter().map(|m| m.id).collect();
                    ids.sort();
                    (k, ids)
                })
                .collect();
            assert_eq!(baseline, permuted);
        }
    }

    #[test]
    fn cluster_caps_avatars_with_overflow() {
        let vid = VideoID::new();
        let markers: Vec<_> = (0..5).map(|i| marker(vid, 30.0 + i as f64 * 0.05)).collect();
        let groups = group_markers(&markers);
        let group = &groups[&30];
        assert_eq!(group.visible_markers(3).len(), 3);
        assert_eq!(group.overflow(3), 2);
    }

    #[test]
    fn stale_refresh_is_discarded() {
        let vid = VideoID::new();
        let mut store = MarkerStore::new(vid);

        let slow = store.begin_refresh();
        let fast = store.begin_refresh();

        assert!(store.apply_refresh(fast, vec![marker(vid, 5.0)]));
        // The earlier-issued request resolves last: discarded.
        assert!(!store.apply_refresh(slow, vec![]));
        assert_eq!(store.markers().len(), 1);
    }
}
