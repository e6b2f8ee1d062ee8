use crate::domain::model::{Group, Participant};
use crate::domain::ports::GroupNamer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use uuid::Uuid;

/// 最小每組人數，低於下限時直接夾到下限
pub const MIN_GROUP_SIZE: usize = 2;

/// Placeholder names used whenever the naming service fails in any way.
pub fn fallback_names(count: usize) -> Vec<String> {
    (1..=count).map(|k| format!("Team {}", k)).collect()
}

/// 分組引擎：每次 partition 整批重算，舊分組全數丟棄
///
/// Each run bumps a generation counter; naming responses carry the
/// generation they were requested for and are dropped when the groups
/// have been regenerated in the meantime.
pub struct Grouping {
    groups: Vec<Group>,
    generation: u64,
    rng: StdRng,
}

impl Default for Grouping {
    fn default() -> Self {
        Self::new()
    }
}

impl Grouping {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic engine for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            groups: Vec::new(),
            generation: 0,
            rng,
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shuffle the roster uniformly and cut it into consecutive chunks
    /// of `group_size` (the last chunk keeps the remainder). Groups get
    /// sequential default names in permutation order. An empty roster
    /// produces zero groups. Returns the new generation.
    pub fn partition(&mut self, roster: &[Participant], group_size: usize) -> u64 {
        let group_size = group_size.max(MIN_GROUP_SIZE);
        self.generation += 1;
        self.groups.clear();

        if roster.is_empty() {
            return self.generation;
        }

        let mut shuffled = roster.to_vec();
        shuffled.shuffle(&mut self.rng);

        for (index, chunk) in shuffled.chunks(group_size).enumerate() {
            self.groups.push(Group {
                id: Uuid::new_v4(),
                name: format!("Group {}", index + 1),
                members: chunk.to_vec(),
            });
        }

        tracing::info!(
            "👥 Partitioned {} participants into {} group(s) of up to {}",
            roster.len(),
            self.groups.len(),
            group_size
        );
        self.generation
    }

    /// Membership by name only, in group order: the naming request payload.
    pub fn member_name_lists(&self) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .map(|g| g.members.iter().map(|m| m.name.clone()).collect())
            .collect()
    }

    /// Ask the naming service for one creative name per group. Strictly
    /// best-effort: a transport error, a wrong-length payload or any
    /// other failure degrades to the placeholder scheme. Returns the
    /// generation the names belong to, to be passed to `apply_names`.
    pub async fn request_creative_names(&self, namer: &dyn GroupNamer) -> (u64, Vec<String>) {
        let generation = self.generation;
        let membership = self.member_name_lists();

        let names = match namer.suggest_names(&membership).await {
            Ok(names) if names.len() == membership.len() => names,
            Ok(names) => {
                tracing::warn!(
                    "Naming service returned {} name(s) for {} group(s), using placeholders",
                    names.len(),
                    membership.len()
                );
                fallback_names(membership.len())
            }
            Err(e) => {
                tracing::warn!("Naming service failed, using placeholders: {}", e);
                fallback_names(membership.len())
            }
        };

        (generation, names)
    }

    /// Apply a naming response. A response for a stale generation is
    /// discarded without touching the current groups.
    pub fn apply_names(&mut self, generation: u64, names: Vec<String>) -> bool {
        if generation != self.generation {
            tracing::warn!(
                "Discarding naming response for generation {} (current is {})",
                generation,
                self.generation
            );
            return false;
        }

        for (group, name) in self.groups.iter_mut().zip(names) {
            group.name = name;
        }
        true
    }
}
