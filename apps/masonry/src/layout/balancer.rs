//! Column Balancer: greedy shortest-column assignment.
//!
//! Each post goes to the column whose running height total is currently the
//! smallest; ties go to the lowest column index. Posts are processed in the
//! order given, so the outcome depends on batch order as well as on the
//! heights. The pass is deterministic: same totals + same heights + same
//! order always yields the same columns.
//!
//! A post whose height is unknown (or resolved to 0 after a failed load)
//! contributes nothing to its column's total but still occupies a slot.

use std::collections::HashMap;

use crate::models::Post;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Per-column posts plus the running height total of each column.
///
/// `columns.len() == heights.len()` at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    columns: Vec<Vec<Post>>,
    heights: Vec<u64>,
}

impl ColumnState {
    /// Creates `column_count` empty columns. A count of 0 is treated as 1.
    pub fn new(column_count: usize) -> Self {
        let column_count = column_count.max(1);
        Self {
            columns: vec![Vec::new(); column_count],
            heights: vec![0; column_count],
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Vec<Post>] {
        &self.columns
    }

    pub fn heights(&self) -> &[u64] {
        &self.heights
    }

    /// Total number of posts placed across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Appends each post of `posts` (in order) to the currently shortest column.
    ///
    /// `heights` maps image URL → resolved pixel height. URLs missing from the
    /// map count as height 0.
    pub fn distribute(&mut self, posts: &[Post], heights: &HashMap<String, u32>) {
        for post in posts {
            let height = heights.get(&post.image).copied().unwrap_or(0);
            let target = self.shortest_column();
            self.columns[target].push(post.clone());
            self.heights[target] += u64::from(height);
        }
    }

    /// Index of the column with the smallest running total.
    /// `min_by_key` keeps the first minimum, which gives the lowest-index tie-break.
    fn shortest_column(&self) -> usize {
        self.heights
            .iter()
            .enumerate()
            .min_by_key(|(_, h)| **h)
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_posts(heights: &[u32]) -> (Vec<Post>, HashMap<String, u32>) {
        let posts: Vec<Post> = heights
            .iter()
            .enumerate()
            .map(|(i, _)| Post::new(i as u64, format!("Post {i}"), format!("https://img/{i}.jpg")))
            .collect();
        let map = posts
            .iter()
            .zip(heights)
            .map(|(p, h)| (p.image.clone(), *h))
            .collect();
        (posts, map)
    }

    fn column_ids(state: &ColumnState) -> Vec<Vec<u64>> {
        state
            .columns()
            .iter()
            .map(|c| c.iter().map(|p| p.id).collect())
            .collect()
    }

    #[test]
    fn test_five_posts_two_columns_trace() {
        let (posts, heights) = make_posts(&[100, 200, 50, 300, 10]);
        let mut state = ColumnState::new(2);
        state.distribute(&posts, &heights);

        // 100→c0, 200→c1, 50→c0 (150), 300→c0 (150 < 200), 10→c1
        assert_eq!(column_ids(&state), vec![vec![0, 2, 3], vec![1, 4]]);
        assert_eq!(state.heights(), &[450, 210]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let (posts, heights) = make_posts(&[10, 10, 10, 10]);
        let mut state = ColumnState::new(4);
        state.distribute(&posts, &heights);

        assert_eq!(column_ids(&state), vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_missing_height_counts_as_zero_but_is_placed() {
        let posts = vec![
            Post::new(0, "a", "https://img/a.jpg"),
            Post::new(1, "broken", "https://img/broken.jpg"),
            Post::new(2, "b", "https://img/b.jpg"),
        ];
        let heights = HashMap::from([
            ("https://img/a.jpg".to_string(), 100),
            ("https://img/b.jpg".to_string(), 100),
        ]);
        let mut state = ColumnState::new(2);
        state.distribute(&posts, &heights);

        // broken lands in column 1 (total 0), then b still sees column 1 at 0.
        assert_eq!(column_ids(&state), vec![vec![0], vec![1, 2]]);
        assert_eq!(state.heights(), &[100, 100]);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_distribute_appends_onto_existing_totals() {
        let (first, mut heights) = make_posts(&[300, 100]);
        let mut state = ColumnState::new(2);
        state.distribute(&first, &heights);

        let extra = vec![Post::new(9, "late", "https://img/late.jpg")];
        heights.insert("https://img/late.jpg".to_string(), 50);
        state.distribute(&extra, &heights);

        assert_eq!(column_ids(&state), vec![vec![0], vec![1, 9]]);
        assert_eq!(state.heights(), &[300, 150]);
    }

    #[test]
    fn test_empty_batch_changes_nothing() {
        let (posts, heights) = make_posts(&[40, 60]);
        let mut state = ColumnState::new(2);
        state.distribute(&posts, &heights);
        let before = state.clone();

        state.distribute(&[], &heights);
        assert_eq!(state, before);
    }

    #[test]
    fn test_zero_columns_clamped_to_one() {
        let state = ColumnState::new(0);
        assert_eq!(state.column_count(), 1);
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn test_single_column_keeps_input_order() {
        let (posts, heights) = make_posts(&[5, 500, 50]);
        let mut state = ColumnState::new(1);
        state.distribute(&posts, &heights);
        assert_eq!(column_ids(&state), vec![vec![0, 1, 2]]);
        assert_eq!(state.heights(), &[555]);
    }

    #[test]
    fn test_last_post_lands_where_spread_is_smallest() {
        // Pseudo-random but fixed heights; checked for several column counts.
        let raw: Vec<u32> = (0..37u32).map(|i| (i * 7919 + 13) % 487 + 1).collect();
        for n in 1..=5 {
            let (posts, heights) = make_posts(&raw);
            let (head, last) = posts.split_at(posts.len() - 1);

            let mut state = ColumnState::new(n);
            state.distribute(head, &heights);
            let totals_before: Vec<u64> = state.heights().to_vec();
            state.distribute(last, &heights);

            let last_height = u64::from(heights[&last[0].image]);
            let chosen = state
                .columns()
                .iter()
                .position(|c| c.last().map(|p| p.id) == Some(last[0].id))
                .unwrap();
            let spread = |totals: &[u64]| {
                totals.iter().max().unwrap() - totals.iter().min().unwrap()
            };
            let actual = spread(state.heights());

            for alt in 0..n {
                let mut alt_totals = totals_before.clone();
                alt_totals[alt] += last_height;
                assert!(
                    actual <= spread(&alt_totals[..]),
                    "n={n}: column {chosen} spread {actual} beaten by column {alt}"
                );
            }
        }
    }
}
