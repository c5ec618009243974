//! Sparse room graph keyed by grid position.
//! This module exists to own every room and keep doors paired in both directions.
//! It does not decide where rooms go or how agents move between them.

use std::collections::HashMap;
use std::ops::Index;

use slotmap::SlotMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::DungeonError;
use crate::types::{Direction, Pos, RoomId, RoomTag};

/// Set of door directions on one room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Doors(u8);

impl Doors {
    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |direction| self.contains(*direction))
    }

    fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    fn bits(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    pos: Pos,
    doors: Doors,
    tag: RoomTag,
}

impl Room {
    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn doors(&self) -> Doors {
        self.doors
    }

    pub fn tag(&self) -> RoomTag {
        self.tag
    }

    pub fn has_door(&self, direction: Direction) -> bool {
        self.doors.contains(direction)
    }
}

#[derive(Clone, Debug)]
pub struct RoomGraph {
    room_size: i32,
    rooms: SlotMap<RoomId, Room>,
    by_pos: HashMap<Pos, RoomId>,
    home: Option<RoomId>,
}

impl RoomGraph {
    /// `room_size` is the distance between adjacent room positions; values below 1 are raised to 1.
    pub fn new(room_size: i32) -> Self {
        Self {
            room_size: room_size.max(1),
            rooms: SlotMap::with_key(),
            by_pos: HashMap::new(),
            home: None,
        }
    }

    pub fn room_size(&self) -> i32 {
        self.room_size
    }

    pub fn step(&self, pos: Pos, direction: Direction) -> Pos {
        pos.offset(direction, self.room_size)
    }

    pub fn add(&mut self, pos: Pos, tag: RoomTag) -> Result<RoomId, DungeonError> {
        if self.by_pos.contains_key(&pos) {
            return Err(DungeonError::DuplicateNode { pos });
        }
        let id = self.rooms.insert_with_key(|id| Room { id, pos, doors: Doors::default(), tag });
        self.by_pos.insert(pos, id);
        if tag == RoomTag::Home && self.home.is_none() {
            self.home = Some(id);
        }
        Ok(id)
    }

    /// Adds the door pair between `a` and its neighbor `b` lying in `direction`.
    pub fn connect(&mut self, a: RoomId, b: RoomId, direction: Direction) -> Result<(), DungeonError> {
        let from = self.rooms[a].pos;
        let to = self.rooms[b].pos;
        if self.step(from, direction) != to {
            return Err(DungeonError::NotAdjacent { from, to, direction });
        }
        self.rooms[a].doors.insert(direction);
        self.rooms[b].doors.insert(direction.opposite());
        Ok(())
    }

    pub fn try_get(&self, pos: Pos) -> Option<&Room> {
        self.by_pos.get(&pos).map(|id| &self.rooms[*id])
    }

    pub fn id_at(&self, pos: Pos) -> Option<RoomId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.by_pos.contains_key(&pos)
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Room behind the door of `id` in `direction`, if that door exists.
    ///
    /// # Panics
    ///
    /// Panics when a door leads to a position with no room, which means the door-pair
    /// invariant was broken.
    pub fn neighbor(&self, id: RoomId, direction: Direction) -> Option<RoomId> {
        let room = &self.rooms[id];
        if !room.has_door(direction) {
            return None;
        }
        let target = self.step(room.pos, direction);
        let neighbor = self.id_at(target).unwrap_or_else(|| {
            panic!("door at {:?} going {direction:?} leads to a missing room", room.pos)
        });
        Some(neighbor)
    }

    pub fn neighbors(&self, id: RoomId) -> impl Iterator<Item = &Room> + '_ {
        self.rooms[id]
            .doors
            .iter()
            .filter_map(move |direction| self.neighbor(id, direction))
            .map(|neighbor| &self.rooms[neighbor])
    }

    pub fn set_tag(&mut self, id: RoomId, tag: RoomTag) {
        self.rooms[id].tag = tag;
    }

    pub fn home(&self) -> Option<RoomId> {
        self.home
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in creation order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.values()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().collect()
    }

    pub fn count_tagged(&self, tag: RoomTag) -> usize {
        self.rooms.values().filter(|room| room.tag == tag).count()
    }

    /// First door whose neighbor is missing or lacks the reciprocal door.
    pub fn first_door_violation(&self) -> Option<(Pos, Direction)> {
        let mut rooms: Vec<&Room> = self.rooms.values().collect();
        rooms.sort_by_key(|room| room.pos);
        for room in rooms {
            for direction in room.doors.iter() {
                let reciprocal = self
                    .try_get(self.step(room.pos, direction))
                    .is_some_and(|neighbor| neighbor.has_door(direction.opposite()));
                if !reciprocal {
                    return Some((room.pos, direction));
                }
            }
        }
        None
    }

    /// Position-ordered encoding of every room, its doors and tag.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut rooms: Vec<&Room> = self.rooms.values().collect();
        rooms.sort_by_key(|room| room.pos);

        let mut bytes = Vec::with_capacity(8 + rooms.len() * 10);
        bytes.extend(self.room_size.to_le_bytes());
        bytes.extend((rooms.len() as u32).to_le_bytes());
        for room in rooms {
            bytes.extend(room.pos.y.to_le_bytes());
            bytes.extend(room.pos.x.to_le_bytes());
            bytes.push(room.doors.bits());
            bytes.push(match room.tag {
                RoomTag::Normal => 0,
                RoomTag::Home => 1,
                RoomTag::Exit => 2,
                RoomTag::Collectible => 3,
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl Index<RoomId> for RoomGraph {
    type Output = Room;

    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id]
    }
}
