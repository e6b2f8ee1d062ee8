use crate::domain::model::{DrawSettings, Participant};
use crate::utils::error::{Result, TeamError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

const DEFAULT_ROLL_DURATION: Duration = Duration::from_secs(3);
const DEFAULT_ROLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    Idle,
    Rolling,
}

/// 抽獎引擎：維護中獎歷史與目前顯示文字，一次 draw 產生一批得獎者
///
/// The rolling preview only affects what the caller displays; the real
/// winners are sampled once, after the roll settles.
pub struct DrawEngine {
    settings: DrawSettings,
    state: DrawState,
    /// Winner history, newest batch first.
    winners: Vec<Participant>,
    display: String,
    rng: StdRng,
    roll_duration: Duration,
    roll_interval: Duration,
}

impl DrawEngine {
    pub fn new(settings: DrawSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Deterministic engine for tests.
    pub fn with_seed(settings: DrawSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: DrawSettings, rng: StdRng) -> Self {
        Self {
            settings: DrawSettings::clamped(settings.allow_duplicates, settings.number_of_winners),
            state: DrawState::Idle,
            winners: Vec::new(),
            display: String::new(),
            rng,
            roll_duration: DEFAULT_ROLL_DURATION,
            roll_interval: DEFAULT_ROLL_INTERVAL,
        }
    }

    pub fn with_timing(mut self, duration: Duration, interval: Duration) -> Self {
        self.roll_duration = duration;
        self.roll_interval = interval;
        self
    }

    pub fn settings(&self) -> DrawSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: DrawSettings) {
        self.settings =
            DrawSettings::clamped(settings.allow_duplicates, settings.number_of_winners);
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Winner history, newest batch first.
    pub fn winners(&self) -> &[Participant] {
        &self.winners
    }

    /// Winners paired with their rank; rank 1 is the first ever drawn.
    pub fn ranked_winners(&self) -> impl Iterator<Item = (usize, &Participant)> {
        let total = self.winners.len();
        self.winners
            .iter()
            .enumerate()
            .map(move |(idx, winner)| (total - idx, winner))
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// 清空中獎歷史，所有人重新取得抽獎資格
    pub fn reset(&mut self) {
        self.winners.clear();
        self.display.clear();
    }

    /// The subset of the roster allowed to win in the next batch. With
    /// `allow_duplicates` the whole roster qualifies; otherwise past
    /// winners are excluded by id.
    pub fn eligible_pool(&self, roster: &[Participant]) -> Vec<Participant> {
        if self.settings.allow_duplicates {
            return roster.to_vec();
        }
        let winner_ids: HashSet<_> = self.winners.iter().map(|w| w.id).collect();
        roster
            .iter()
            .filter(|p| !winner_ids.contains(&p.id))
            .cloned()
            .collect()
    }

    pub fn remaining(&self, roster: &[Participant]) -> usize {
        self.eligible_pool(roster).len()
    }

    /// One draw batch without the rolling preview.
    pub fn draw_now(&mut self, roster: &[Participant]) -> Result<Vec<Participant>> {
        let pool = self.eligible_pool(roster);
        if pool.is_empty() {
            return Err(TeamError::EmptyPool);
        }
        Ok(self.settle(pool))
    }

    /// One draw batch with the rolling preview: while rolling, a ticker
    /// hands one uniformly random pool member per tick to `preview`.
    pub async fn draw_with_preview<F>(
        &mut self,
        roster: &[Participant],
        mut preview: F,
    ) -> Result<Vec<Participant>>
    where
        F: FnMut(&Participant),
    {
        let pool = self.eligible_pool(roster);
        if pool.is_empty() {
            return Err(TeamError::EmptyPool);
        }

        self.state = DrawState::Rolling;
        let interval_ms = self.roll_interval.as_millis().max(1);
        let ticks = (self.roll_duration.as_millis() / interval_ms).max(1);
        let mut ticker = tokio::time::interval(self.roll_interval);
        for _ in 0..ticks {
            ticker.tick().await;
            if let Some(pick) = pool.choose(&mut self.rng) {
                preview(pick);
            }
        }

        Ok(self.settle(pool))
    }

    /// Sample the actual winners from a shrinking copy of the pool and
    /// record them. A single batch never contains the same participant
    /// twice; `allow_duplicates` only re-admits past winners to later
    /// batches.
    fn settle(&mut self, mut pool: Vec<Participant>) -> Vec<Participant> {
        let count = self.settings.number_of_winners.min(pool.len());
        let mut batch = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self.rng.gen_range(0..pool.len());
            batch.push(pool.swap_remove(index));
        }

        self.state = DrawState::Idle;
        for winner in batch.iter().rev() {
            self.winners.insert(0, winner.clone());
        }
        self.display = batch
            .iter()
            .map(|w| w.name.as_str())
            .collect::<Vec<_>>()
            .join(" & ");

        tracing::info!("🎁 Drew {} winner(s): {}", batch.len(), self.display);
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::roster::Roster;

    fn engine(allow_duplicates: bool, winners: usize) -> DrawEngine {
        DrawEngine::with_seed(DrawSettings::clamped(allow_duplicates, winners), 7)
    }

    #[test]
    fn test_empty_roster_fails_without_state_change() {
        let mut engine = engine(false, 1);
        let result = engine.draw_now(&[]);
        assert!(matches!(result, Err(TeamError::EmptyPool)));
        assert_eq!(engine.state(), DrawState::Idle);
        assert!(engine.winners().is_empty());
        assert_eq!(engine.display(), "");
    }

    #[test]
    fn test_batch_is_capped_by_pool_size_and_has_no_duplicates() {
        let roster = Roster::from_text("a\nb\nc");
        let mut engine = engine(true, 10);

        let batch = engine.draw_now(roster.participants()).unwrap();
        assert_eq!(batch.len(), 3);
        let ids: HashSet<_> = batch.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_no_duplicates_across_batches_until_pool_exhausted() {
        let roster = Roster::from_text("a\nb\nc\nd\ne");
        let mut engine = engine(false, 2);

        let mut all_ids = HashSet::new();
        for expected in [2, 2, 1] {
            let batch = engine.draw_now(roster.participants()).unwrap();
            assert_eq!(batch.len(), expected);
            for winner in &batch {
                assert!(all_ids.insert(winner.id), "participant won twice");
            }
        }

        assert_eq!(engine.remaining(roster.participants()), 0);
        let result = engine.draw_now(roster.participants());
        assert!(matches!(result, Err(TeamError::EmptyPool)));
    }

    #[test]
    fn test_allow_duplicates_keeps_everyone_eligible() {
        let roster = Roster::from_text("a\nb");
        let mut engine = engine(true, 2);

        for _ in 0..4 {
            let batch = engine.draw_now(roster.participants()).unwrap();
            assert_eq!(batch.len(), 2);
            let ids: HashSet<_> = batch.iter().map(|w| w.id).collect();
            assert_eq!(ids.len(), 2, "duplicate inside one batch");
        }
        assert_eq!(engine.winners().len(), 8);
        assert_eq!(engine.remaining(roster.participants()), 2);
    }

    #[test]
    fn test_history_is_newest_first_with_oldest_rank_one() {
        let roster = Roster::from_text("a\nb\nc");
        let mut engine = engine(false, 1);

        let first = engine.draw_now(roster.participants()).unwrap();
        let second = engine.draw_now(roster.participants()).unwrap();

        assert_eq!(engine.winners()[0].id, second[0].id);
        assert_eq!(engine.winners()[1].id, first[0].id);

        let ranked: Vec<_> = engine.ranked_winners().collect();
        assert_eq!(ranked[0].0, 2);
        assert_eq!(ranked[1].0, 1);
        assert_eq!(ranked[1].1.id, first[0].id);
    }

    #[test]
    fn test_display_joins_batch_names() {
        let roster = Roster::from_text("only");
        let mut engine = engine(false, 1);
        engine.draw_now(roster.participants()).unwrap();
        assert_eq!(engine.display(), "only");
    }

    #[test]
    fn test_reset_restores_eligibility() {
        let roster = Roster::from_text("a\nb");
        let mut engine = engine(false, 2);
        engine.draw_now(roster.participants()).unwrap();
        assert_eq!(engine.remaining(roster.participants()), 0);

        engine.reset();
        assert!(engine.winners().is_empty());
        assert_eq!(engine.remaining(roster.participants()), 2);
    }

    #[test]
    fn test_winner_count_clamped_to_minimum_one() {
        let roster = Roster::from_text("a\nb");
        let mut engine = engine(false, 0);
        let batch = engine.draw_now(roster.participants()).unwrap();
        assert_eq!(batch.len(), 1);
    }
}
