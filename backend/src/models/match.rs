use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One game between two two-player teams within a round. `round_number`
/// is 1-indexed within the owning tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub round_number: i32,
    pub team1_player1: Uuid,
    pub team1_player2: Uuid,
    pub team2_player1: Uuid,
    pub team2_player2: Uuid,
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn new(
        tournament_id: Uuid,
        round_number: i32,
        team1: (Uuid, Uuid),
        team2: (Uuid, Uuid),
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round_number,
            team1_player1: team1.0,
            team1_player2: team1.1,
            team2_player1: team2.0,
            team2_player2: team2.1,
            team1_score: None,
            team2_score: None,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn player_ids(&self) -> [Uuid; 4] {
        [
            self.team1_player1,
            self.team1_player2,
            self.team2_player1,
            self.team2_player2,
        ]
    }

    pub fn involves(&self, player_id: Uuid) -> bool {
        self.player_ids().contains(&player_id)
    }

    pub fn is_on_team1(&self, player_id: Uuid) -> bool {
        self.team1_player1 == player_id || self.team1_player2 == player_id
    }

    /// Score pair from the given player's perspective: (own, opposing).
    /// `None` for players not in this match or before completion.
    pub fn scores_for(&self, player_id: Uuid) -> Option<(i32, i32)> {
        let (s1, s2) = (self.team1_score?, self.team2_score?);
        if self.is_on_team1(player_id) {
            Some((s1, s2))
        } else if self.involves(player_id) {
            Some((s2, s1))
        } else {
            None
        }
    }

}
