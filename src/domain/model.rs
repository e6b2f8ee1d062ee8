use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 參加者：名單中的一筆資料，id 每次加入時重新產生，姓名允許重複
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// 分組結果中的一組，成員是名單參加者的複本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Participant>,
}

/// Settings for one invocation of the draw engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrawSettings {
    pub allow_duplicates: bool,
    pub number_of_winners: usize,
}

impl DrawSettings {
    /// Out-of-range input is clamped rather than rejected: the winner
    /// count is always at least 1.
    pub fn clamped(allow_duplicates: bool, number_of_winners: usize) -> Self {
        Self {
            allow_duplicates,
            number_of_winners: number_of_winners.max(1),
        }
    }
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            number_of_winners: 1,
        }
    }
}
