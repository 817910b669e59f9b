//! Initiative-ordered roster with a turn cursor
//!
//! Removal and cursor correction happen in one call so the turn order never
//! skips or repeats a ship when one is destroyed mid-round.

use crate::combat::combat_ship::{CombatShip, CombatShipKey, Side};

#[derive(Debug, Clone, Default)]
pub struct Roster {
    ships: Vec<CombatShip>,
    cursor: usize,
    /// The head ship was removed while it held the cursor; the next
    /// advance must land on the new head instead of stepping past it.
    head_vacated: bool,
}

impl Roster {
    /// Build the roster sorted by descending initiative.
    ///
    /// The sort is stable: equal initiative keeps the order ships were
    /// given in (attacker fleet first, then defender fleet).
    pub fn new(mut ships: Vec<CombatShip>) -> Self {
        ships.sort_by(|a, b| b.initiative().cmp(&a.initiative()));
        Self {
            ships,
            cursor: 0,
            head_vacated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatShip> {
        self.ships.iter()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn index_of(&self, key: CombatShipKey) -> Option<usize> {
        self.ships.iter().position(|s| s.key() == key)
    }

    pub fn get(&self, key: CombatShipKey) -> Option<&CombatShip> {
        self.ships.iter().find(|s| s.key() == key)
    }

    pub fn get_mut(&mut self, key: CombatShipKey) -> Option<&mut CombatShip> {
        self.ships.iter_mut().find(|s| s.key() == key)
    }

    /// Index of the ship whose turn it is; a cursor past the end reads as 0
    fn current_index(&self) -> Option<usize> {
        if self.ships.is_empty() {
            None
        } else if self.cursor >= self.ships.len() {
            Some(0)
        } else {
            Some(self.cursor)
        }
    }

    pub fn current(&self) -> Option<&CombatShip> {
        self.current_index().and_then(|i| self.ships.get(i))
    }

    pub fn current_mut(&mut self) -> Option<&mut CombatShip> {
        self.current_index().and_then(|i| self.ships.get_mut(i))
    }

    /// Move the cursor to the next ship.
    ///
    /// Returns the key of the new current ship and whether the cursor
    /// wrapped back to the start (a round ended).
    pub fn advance(&mut self) -> Option<(CombatShipKey, bool)> {
        if self.ships.is_empty() {
            return None;
        }

        let mut wrapped = false;
        if self.head_vacated {
            self.head_vacated = false;
            self.cursor = 0;
        } else if self.cursor + 1 >= self.ships.len() {
            self.cursor = 0;
            wrapped = true;
        } else {
            self.cursor += 1;
        }

        Some((self.ships[self.cursor].key(), wrapped))
    }

    /// Remove a ship, keeping the cursor on the same logical position.
    ///
    /// Removing at or before the cursor pulls the cursor back by one
    /// (never below zero).
    pub fn remove(&mut self, key: CombatShipKey) -> Option<CombatShip> {
        let index = self.index_of(key)?;
        let removed = self.ships.remove(index);

        if index <= self.cursor {
            if self.cursor > 0 {
                self.cursor -= 1;
            } else {
                self.head_vacated = true;
            }
        }

        Some(removed)
    }

    pub fn side_count(&self, side: Side) -> usize {
        self.ships.iter().filter(|s| s.side() == side).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::grid::GridCoord;
    use crate::core::types::{PlayerId, ShipId};
    use crate::fleet::ship::Ship;

    fn entry(id: u32, side: Side, initiative: i32) -> CombatShip {
        let ship = Ship::new(ShipId(id), "s", "Hull", 5, vec![]).with_initiative(initiative);
        CombatShip::new(&ship, side, PlayerId(1), GridCoord::new(id as i32 % 9, 4), 0)
    }

    fn key(id: u32, side: Side) -> CombatShipKey {
        CombatShipKey {
            side,
            ship: ShipId(id),
        }
    }

    fn order(roster: &Roster) -> Vec<u32> {
        roster.iter().map(|s| s.ship_id().0).collect()
    }

    #[test]
    fn test_sorted_by_initiative_ties_keep_insertion() {
        let roster = Roster::new(vec![
            entry(1, Side::Attacker, 3),
            entry(2, Side::Attacker, 5),
            entry(3, Side::Defender, 3),
            entry(4, Side::Defender, 5),
        ]);
        assert_eq!(order(&roster), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_advance_wraps() {
        let mut roster = Roster::new(vec![
            entry(1, Side::Attacker, 0),
            entry(2, Side::Defender, 0),
        ]);
        assert_eq!(roster.advance(), Some((key(2, Side::Defender), false)));
        assert_eq!(roster.advance(), Some((key(1, Side::Attacker), true)));
    }

    #[test]
    fn test_remove_before_cursor_decrements() {
        let mut roster = Roster::new((1..=4).map(|i| entry(i, Side::Attacker, 0)).collect());
        roster.advance();
        roster.advance();
        assert_eq!(roster.cursor(), 2);
        roster.remove(key(1, Side::Attacker));
        assert_eq!(roster.cursor(), 1);
        assert_eq!(roster.current().map(|s| s.ship_id()), Some(ShipId(3)));
    }

    #[test]
    fn test_remove_after_cursor_leaves_cursor() {
        let mut roster = Roster::new((1..=4).map(|i| entry(i, Side::Attacker, 0)).collect());
        roster.advance();
        roster.remove(key(4, Side::Attacker));
        assert_eq!(roster.cursor(), 1);
    }

    #[test]
    fn test_removing_current_ship_does_not_skip_next() {
        let mut roster = Roster::new((1..=4).map(|i| entry(i, Side::Attacker, 0)).collect());
        roster.advance();
        roster.remove(key(2, Side::Attacker));
        assert_eq!(roster.cursor(), 0);
        assert_eq!(roster.advance().map(|(k, _)| k.ship), Some(ShipId(3)));
    }

    #[test]
    fn test_removing_head_at_cursor_zero() {
        let mut roster = Roster::new((1..=3).map(|i| entry(i, Side::Attacker, 0)).collect());
        roster.remove(key(1, Side::Attacker));
        assert_eq!(roster.cursor(), 0);
        assert_eq!(roster.advance(), Some((key(2, Side::Attacker), false)));
        assert_eq!(roster.advance(), Some((key(3, Side::Attacker), false)));
    }

    #[test]
    fn test_empty_roster_has_no_current() {
        let mut roster = Roster::new(vec![entry(1, Side::Attacker, 0)]);
        roster.remove(key(1, Side::Attacker));
        assert!(roster.current().is_none());
        assert!(roster.advance().is_none());
    }
}
