use crate::game::config::HIGH_SCORE_CAPACITY;

/// Best final scores, highest first, at most five entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<u32>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from loaded data, restoring order and capacity
    pub fn from_vec(mut entries: Vec<u32>) -> Self {
        // sort_by is stable, so equal scores keep their stored order
        entries.sort_by(|a, b| b.cmp(a));
        entries.truncate(HIGH_SCORE_CAPACITY);
        Self { entries }
    }

    /// Insert a final score. Ties rank behind the scores already present.
    pub fn add(&mut self, score: u32) {
        let slot = self.entries.partition_point(|&existing| existing >= score);
        if slot < HIGH_SCORE_CAPACITY {
            self.entries.insert(slot, score);
            self.entries.truncate(HIGH_SCORE_CAPACITY);
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.entries
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_descending(scores: &[u32]) -> bool {
        scores.windows(2).all(|pair| pair[0] >= pair[1])
    }

    #[test]
    fn test_add_keeps_order_and_capacity() {
        let mut table = HighScores::new();
        for score in [30, 120, 0, 50, 80, 10, 200, 50] {
            table.add(score);
            assert!(table.len() <= HIGH_SCORE_CAPACITY);
            assert!(is_descending(table.as_slice()));
        }
        assert_eq!(table.as_slice(), &[200, 120, 80, 50, 50]);
        assert_eq!(table.best(), Some(200));
    }

    #[test]
    fn test_low_score_dropped_when_full() {
        let mut table = HighScores::from_vec(vec![100, 90, 80, 70, 60]);
        table.add(10);
        assert_eq!(table.as_slice(), &[100, 90, 80, 70, 60]);

        table.add(60);
        assert_eq!(table.as_slice(), &[100, 90, 80, 70, 60]);

        table.add(65);
        assert_eq!(table.as_slice(), &[100, 90, 80, 70, 65]);
    }

    #[test]
    fn test_from_vec_sanitizes() {
        let table = HighScores::from_vec(vec![5, 40, 10, 70, 20, 90, 0]);
        assert_eq!(table.as_slice(), &[90, 70, 40, 20, 10]);

        assert!(HighScores::from_vec(Vec::new()).is_empty());
    }

    #[test]
    fn test_zero_scores_recorded() {
        let mut table = HighScores::new();
        table.add(0);
        table.add(0);
        assert_eq!(table.as_slice(), &[0, 0]);
    }
}
