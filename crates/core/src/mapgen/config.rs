//! Generation parameters and the precondition checks run before any room is placed.

use serde::{Deserialize, Serialize};

use crate::error::InfeasibleReason;
use crate::types::Pos;

/// Branches can only leave Home through its four doors.
pub const MAX_BRANCHES: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// World width in grid cells.
    pub width: u32,
    /// World height in grid cells.
    pub height: u32,
    /// World-space distance between neighboring rooms.
    pub room_size: u32,
    pub branch_lengths: Vec<usize>,
    pub max_same_direction: u32,
    pub collectibles: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            room_size: 1,
            branch_lengths: vec![7, 5, 5],
            max_same_direction: 2,
            collectibles: 3,
        }
    }
}

impl DungeonConfig {
    pub fn requested_rooms(&self) -> usize {
        self.branch_lengths.iter().sum()
    }

    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Normal rooms a fully grown dungeon would have: every branch step except the tips.
    pub fn interior_rooms(&self) -> usize {
        self.requested_rooms().saturating_sub(self.branch_lengths.len())
    }

    pub fn validate(&self) -> Result<(), InfeasibleReason> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("room_size", self.room_size),
            ("max_same_direction", self.max_same_direction),
        ] {
            if value == 0 {
                return Err(InfeasibleReason::ZeroDimension { field });
            }
        }

        if self.extent(self.width).is_none() || self.extent(self.height).is_none() {
            return Err(InfeasibleReason::WorldTooLarge {
                width: self.width,
                height: self.height,
                room_size: self.room_size,
            });
        }

        let count = self.branch_lengths.len();
        if !(1..=MAX_BRANCHES).contains(&count) {
            return Err(InfeasibleReason::BranchCount { count });
        }

        let requested = self.requested_rooms();
        let capacity = self.capacity();
        if requested >= capacity {
            return Err(InfeasibleReason::WorldTooSmall { requested, capacity });
        }

        let available = self.interior_rooms();
        if self.collectibles > available {
            return Err(InfeasibleReason::TooManyCollectibles {
                requested: self.collectibles,
                available,
            });
        }
        Ok(())
    }

    /// World-space length of `cells` rooms, if it fits the coordinate range.
    fn extent(&self, cells: u32) -> Option<i32> {
        i32::try_from(cells).ok()?.checked_mul(i32::try_from(self.room_size).ok()?)
    }

    /// Only meaningful for a config that passed `validate`.
    pub(super) fn home_pos(&self) -> Pos {
        let size = self.room_size as i32;
        Pos::new((self.width / 2) as i32 * size, (self.height / 2) as i32 * size)
    }

    pub(super) fn in_bounds(&self, pos: Pos) -> bool {
        let (Some(width), Some(height)) = (self.extent(self.width), self.extent(self.height)) else {
            return false;
        };
        pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_feasible() {
        assert_eq!(DungeonConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_branch_counts_outside_one_to_four() {
        let none = DungeonConfig { branch_lengths: vec![], ..DungeonConfig::default() };
        assert_eq!(none.validate(), Err(InfeasibleReason::BranchCount { count: 0 }));

        let five = DungeonConfig {
            branch_lengths: vec![1; 5],
            collectibles: 0,
            ..DungeonConfig::default()
        };
        assert_eq!(five.validate(), Err(InfeasibleReason::BranchCount { count: 5 }));
    }

    #[test]
    fn requested_rooms_must_be_strictly_below_capacity() {
        let full = DungeonConfig {
            width: 3,
            height: 3,
            branch_lengths: vec![5, 4],
            collectibles: 0,
            ..DungeonConfig::default()
        };
        assert_eq!(
            full.validate(),
            Err(InfeasibleReason::WorldTooSmall { requested: 9, capacity: 9 })
        );

        let fits = DungeonConfig { branch_lengths: vec![4, 4], ..full };
        assert_eq!(fits.validate(), Ok(()));
    }

    #[test]
    fn collectibles_cannot_exceed_interior_rooms() {
        let config = DungeonConfig {
            branch_lengths: vec![3, 2],
            collectibles: 4,
            ..DungeonConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InfeasibleReason::TooManyCollectibles { requested: 4, available: 3 })
        );
    }

    #[test]
    fn zero_room_size_is_rejected() {
        let config = DungeonConfig { room_size: 0, ..DungeonConfig::default() };
        assert_eq!(config.validate(), Err(InfeasibleReason::ZeroDimension { field: "room_size" }));
    }

    #[test]
    fn world_beyond_the_coordinate_range_is_rejected() {
        let config = DungeonConfig {
            width: 1 << 20,
            height: 1 << 20,
            room_size: 1 << 12,
            branch_lengths: vec![3],
            collectibles: 0,
            ..DungeonConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InfeasibleReason::WorldTooLarge { width: 1 << 20, height: 1 << 20, room_size: 1 << 12 })
        );

        let wide = DungeonConfig { width: u32::MAX, room_size: 1, ..DungeonConfig::default() };
        assert!(matches!(wide.validate(), Err(InfeasibleReason::WorldTooLarge { .. })));

        let edge = DungeonConfig { width: 1 << 15, height: 1 << 15, room_size: 1 << 16, ..config };
        assert!(matches!(edge.validate(), Err(InfeasibleReason::WorldTooLarge { .. })));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: DungeonConfig =
            serde_json::from_str(r#"{ "width": 30, "branch_lengths": [4] }"#).expect("valid json");
        assert_eq!(config.width, 30);
        assert_eq!(config.branch_lengths, vec![4]);
        assert_eq!(config.height, DungeonConfig::default().height);
        assert_eq!(config.collectibles, DungeonConfig::default().collectibles);
    }

    #[test]
    fn home_sits_at_scaled_world_center() {
        let config = DungeonConfig { width: 9, height: 6, room_size: 4, ..DungeonConfig::default() };
        assert_eq!(config.home_pos(), Pos::new(16, 12));
        assert!(config.in_bounds(Pos::new(32, 20)));
        assert!(!config.in_bounds(Pos::new(36, 20)));
        assert!(!config.in_bounds(Pos::new(-4, 0)));
    }
}
