use std::collections::HashSet;
use std::time::Duration;
use team_tools::{DrawEngine, DrawSettings, DrawState, Roster, TeamError};

/// 連續抽到名單耗盡為止，中獎歷史不得出現重複 id
#[test]
fn test_exhausting_draws_never_repeat_a_winner() {
    let roster = Roster::from_text("a\nb\nc\nd\ne\nf\ng");
    let mut engine = DrawEngine::with_seed(DrawSettings::clamped(false, 3), 11);

    let mut seen = HashSet::new();
    loop {
        match engine.draw_now(roster.participants()) {
            Ok(batch) => {
                for winner in batch {
                    assert!(seen.insert(winner.id), "{} won twice", winner.name);
                }
            }
            Err(TeamError::EmptyPool) => break,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(seen.len(), roster.len());
}

#[test]
fn test_allow_duplicates_reuses_winners_across_batches_only() {
    let roster = Roster::from_text("a\nb\nc");
    let mut engine = DrawEngine::with_seed(DrawSettings::clamped(true, 2), 5);

    for _ in 0..6 {
        let batch = engine.draw_now(roster.participants()).unwrap();
        let ids: HashSet<_> = batch.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), batch.len(), "duplicate inside a single batch");
    }

    // With three participants and twelve wins recorded, someone repeated
    // across batches.
    assert_eq!(engine.winners().len(), 12);
}

#[tokio::test]
async fn test_rolling_preview_only_shows_eligible_members() {
    let roster = Roster::from_text("a\nb\nc\nd");
    let mut engine = DrawEngine::with_seed(DrawSettings::clamped(false, 2), 3)
        .with_timing(Duration::from_millis(40), Duration::from_millis(5));

    // Burn two winners so the pool shrinks.
    let first_batch = engine.draw_now(roster.participants()).unwrap();
    let burned: HashSet<_> = first_batch.iter().map(|w| w.id).collect();

    let mut previewed = Vec::new();
    let batch = engine
        .draw_with_preview(roster.participants(), |candidate| {
            previewed.push(candidate.id);
        })
        .await
        .unwrap();

    assert!(!previewed.is_empty());
    assert!(previewed.iter().all(|id| !burned.contains(id)));
    assert_eq!(batch.len(), 2);
    assert_eq!(engine.state(), DrawState::Idle);
}

#[tokio::test]
async fn test_preview_draw_fails_cleanly_on_empty_pool() {
    let mut engine = DrawEngine::with_seed(DrawSettings::default(), 1)
        .with_timing(Duration::from_millis(10), Duration::from_millis(5));

    let mut ticks = 0;
    let result = engine
        .draw_with_preview(&[], |_| {
            ticks += 1;
        })
        .await;

    assert!(matches!(result, Err(TeamError::EmptyPool)));
    assert_eq!(ticks, 0);
    assert_eq!(engine.state(), DrawState::Idle);
}
