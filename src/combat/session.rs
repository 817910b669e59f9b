//! Combat session - one tactical battle between two fleets
//!
//! The session borrows both players for its whole lifetime. Ships stay in
//! their fleets and are addressed by `CombatShipKey`; the roster only holds
//! combat-time state. Flow per action:
//! select component -> check shot -> resolve damage -> apply outcome ->
//! `is_combat_over` -> `advance_turn`.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::combat_ship::{CombatShip, CombatShipKey, Side};
use crate::combat::damage::{DamageResolver, Shot, ShotOutcome, StandardDamage};
use crate::combat::deployment::DeploymentTable;
use crate::combat::events::{CombatEventKind, CombatLog};
use crate::combat::grid::GridCoord;
use crate::combat::line_of_fire::{trace_line_of_fire, LineOfFire};
use crate::combat::roster::Roster;
use crate::core::config::CombatConfig;
use crate::core::error::{Result, TacticsError};
use crate::core::types::{FleetId, PlayerId, ShipId};
use crate::fleet::fleet::Fleet;
use crate::fleet::player::Player;
use crate::fleet::ship::Ship;

/// Why an action was refused. Refused actions change nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    NoShip,
    NoComponentSelected,
    NotAWeapon,
    ComponentBroken,
    ComponentUsed,
    FriendlyTarget,
    SameCell,
    OutOfRange,
    LineBlocked,
    NoMovesLeft,
    NotAdjacent,
    OffBoard,
    CellOccupied,
}

/// One side of the battle: the owning player and the fleet it committed
#[derive(Debug)]
struct Belligerent<'a> {
    player: &'a mut Player,
    fleet: FleetId,
}

impl Belligerent<'_> {
    fn fleet(&self) -> Option<&Fleet> {
        self.player.fleets.get(self.fleet)
    }

    fn fleet_mut(&mut self) -> Option<&mut Fleet> {
        self.player.fleets.get_mut(self.fleet)
    }

    fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.fleet().and_then(|f| f.ship(id))
    }

    fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.fleet_mut().and_then(|f| f.ship_mut(id))
    }

    /// Build combat state for every participating ship of this side
    fn deploy(
        &mut self,
        side: Side,
        table: DeploymentTable,
        cap: usize,
        bonus_accuracy: i32,
    ) -> Result<Vec<CombatShip>> {
        let Player {
            id,
            fleets,
            statistics,
            ..
        } = &mut *self.player;
        let fleet = fleets
            .get(self.fleet)
            .ok_or(TacticsError::FleetNotFound(self.fleet))?;

        let mut deployed = Vec::with_capacity(fleet.len().min(cap));
        for (index, ship) in fleet.ships.iter().take(cap).enumerate() {
            let position = table.coordinate(index)?;
            statistics.add_combat(&ship.design);
            deployed.push(CombatShip::new(ship, side, *id, position, bonus_accuracy));
        }
        Ok(deployed)
    }
}

/// What `handle_end_combat` hands back once the session is closed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSummary {
    pub winner: Option<PlayerId>,
    pub winning_side: Option<Side>,
    pub rounds: u32,
    pub attacker_survivors: usize,
    pub defender_survivors: usize,
    pub log: CombatLog,
}

enum Verdict {
    Ongoing,
    Won(Side),
    NoWinner,
}

pub struct Combat<'a> {
    attacker: Belligerent<'a>,
    defender: Belligerent<'a>,
    roster: Roster,
    component_in_use: Option<usize>,
    cursor: GridCoord,
    winner: Option<Side>,
    ended: bool,
    round: u32,
    config: CombatConfig,
    resolver: Box<dyn DamageResolver>,
    log: CombatLog,
}

impl<'a> Combat<'a> {
    /// Deploy both fleets and build the initiative-ordered roster.
    ///
    /// The attacker deploys bottom, the defender top (or in the starbase
    /// rank if its fleet is all starbases). Fleets holding a defensive
    /// posture get the configured accuracy bonus.
    pub fn new(
        attacker: &'a mut Player,
        attacker_fleet: FleetId,
        defender: &'a mut Player,
        defender_fleet: FleetId,
        config: CombatConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut attacker = Belligerent {
            player: attacker,
            fleet: attacker_fleet,
        };
        let mut defender = Belligerent {
            player: defender,
            fleet: defender_fleet,
        };

        let bonus_for = |side: &Belligerent<'_>| -> Result<i32> {
            let fleet = side.fleet().ok_or(TacticsError::FleetNotFound(side.fleet))?;
            Ok(if fleet.is_defending() {
                config.defend_bonus_accuracy
            } else {
                0
            })
        };
        let attacker_bonus = bonus_for(&attacker)?;
        let defender_bonus = bonus_for(&defender)?;

        let starbase = defender.fleet().is_some_and(Fleet::is_starbase_fleet);
        let (defender_table, defender_cap) = if starbase {
            (DeploymentTable::Starbase, config.max_starbase_ships)
        } else {
            (DeploymentTable::Top, config.max_fleet_ships)
        };

        let mut ships = attacker.deploy(
            Side::Attacker,
            DeploymentTable::Bottom,
            config.max_fleet_ships,
            attacker_bonus,
        )?;
        ships.extend(defender.deploy(
            Side::Defender,
            defender_table,
            defender_cap,
            defender_bonus,
        )?);

        let roster = Roster::new(ships);
        info!(
            attacker = attacker.player.id.0,
            defender = defender.player.id.0,
            ships = roster.len(),
            starbase,
            "Combat started"
        );

        let mut log = CombatLog::new();
        log.push(
            1,
            CombatEventKind::CombatStarted {
                ships: roster.len(),
            },
            format!(
                "{} attacks {} with {} ships on the board",
                attacker.player.name,
                defender.player.name,
                roster.len()
            ),
        );

        Ok(Self {
            attacker,
            defender,
            roster,
            component_in_use: None,
            cursor: GridCoord::default(),
            winner: None,
            ended: false,
            round: 1,
            resolver: Box::new(StandardDamage::from_config(&config)),
            config,
            log,
        })
    }

    /// Swap the damage model (e.g. for scripted tests or mods)
    pub fn with_resolver(mut self, resolver: Box<dyn DamageResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    fn side(&self, side: Side) -> &Belligerent<'a> {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Belligerent<'a> {
        match side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Current round, starting at 1
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn owner(&self, side: Side) -> PlayerId {
        self.side(side).player.id
    }

    /// The ship behind a roster entry
    pub fn ship(&self, key: CombatShipKey) -> Option<&Ship> {
        self.side(key.side).ship(key.ship)
    }

    pub fn combat_ship(&self, key: CombatShipKey) -> Option<&CombatShip> {
        self.roster.get(key)
    }

    pub fn current_ship(&self) -> Option<&CombatShip> {
        self.roster.current()
    }

    pub fn current_key(&self) -> Option<CombatShipKey> {
        self.roster.current().map(CombatShip::key)
    }

    pub fn component_in_use(&self) -> Option<usize> {
        self.component_in_use
    }

    pub fn select_component(&mut self, slot: Option<usize>) {
        self.component_in_use = slot;
    }

    /// Target-selection cursor on the board
    pub fn cursor(&self) -> GridCoord {
        self.cursor
    }

    pub fn set_cursor(&mut self, coord: GridCoord) {
        self.cursor = coord;
    }

    pub fn ship_at(&self, coord: GridCoord) -> Option<&CombatShip> {
        self.roster.iter().find(|s| s.position == coord)
    }

    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.ship_at(coord).is_some()
    }

    /// Hand the turn to the next ship in initiative order.
    ///
    /// The new current ship regenerates shields one step and gets its
    /// moves, slot flags and AI shot budget refreshed. Call
    /// `is_combat_over` first; an empty roster yields `None`.
    pub fn advance_turn(&mut self) -> Option<CombatShipKey> {
        let (key, wrapped) = self.roster.advance()?;

        if wrapped {
            self.log.push(
                self.round,
                CombatEventKind::RoundEnded,
                format!("Round {} ended", self.round),
            );
            self.round += 1;
            debug!(round = self.round, "Combat round started");
        }

        let side = match key.side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        };
        if let (Some(combat_ship), Some(ship)) = (self.roster.get_mut(key), side.ship_mut(key.ship))
        {
            combat_ship.begin_turn(ship);
        }

        self.component_in_use = None;
        let name = self.ship(key).map(|s| s.name.clone()).unwrap_or_default();
        self.log.push(
            self.round,
            CombatEventKind::TurnStarted { ship: key },
            format!("{name}'s turn"),
        );
        Some(key)
    }

    /// Full legality check for firing `slot` of `shooter` at `target`.
    ///
    /// Returns the shot distance when the shot is legal.
    pub fn check_shot(
        &self,
        shooter: CombatShipKey,
        slot: usize,
        target: CombatShipKey,
    ) -> std::result::Result<u32, Rejection> {
        let from = self.roster.get(shooter).ok_or(Rejection::NoShip)?;
        let to = self.roster.get(target).ok_or(Rejection::NoShip)?;
        if shooter.side == target.side {
            return Err(Rejection::FriendlyTarget);
        }

        let ship = self.ship(shooter).ok_or(Rejection::NoShip)?;
        let component = ship.component(slot).ok_or(Rejection::NotAWeapon)?;
        let weapon = component.weapon_stats().ok_or(Rejection::NotAWeapon)?;
        if !component.is_working() {
            return Err(Rejection::ComponentBroken);
        }
        if from.is_component_used(slot) {
            return Err(Rejection::ComponentUsed);
        }

        let occupied = |cell: GridCoord| {
            self.roster
                .iter()
                .any(|s| s.position == cell && s.key() != shooter && s.key() != target)
        };
        match trace_line_of_fire(from.position, to.position, weapon.range, occupied) {
            LineOfFire::Clear => Ok(from.position.distance(&to.position)),
            LineOfFire::SameCell => Err(Rejection::SameCell),
            LineOfFire::OutOfRange { .. } => Err(Rejection::OutOfRange),
            LineOfFire::Blocked { .. } => Err(Rejection::LineBlocked),
        }
    }

    /// Can `shooter` hit `target` with the component currently in use?
    pub fn is_clear_shot(&self, shooter: &CombatShip, target: &CombatShip) -> bool {
        self.component_in_use
            .is_some_and(|slot| self.check_shot(shooter.key(), slot, target.key()).is_ok())
    }

    /// Enemies the current ship can hit with the component in use
    pub fn clear_targets(&self) -> Vec<CombatShipKey> {
        let (Some(shooter), Some(slot)) = (self.current_key(), self.component_in_use) else {
            return Vec::new();
        };
        self.roster
            .iter()
            .map(CombatShip::key)
            .filter(|&target| self.check_shot(shooter, slot, target).is_ok())
            .collect()
    }

    /// Free cells the current ship can step into this turn
    pub fn legal_moves(&self) -> Vec<GridCoord> {
        match self.roster.current() {
            Some(ship) if ship.moves_left > 0 => ship
                .position
                .neighbors()
                .into_iter()
                .filter(|c| c.is_on_board() && !self.is_occupied(*c))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Step the current ship into an adjacent free cell
    pub fn move_current(&mut self, to: GridCoord) -> std::result::Result<(), Rejection> {
        let (key, from, moves_left) = self
            .roster
            .current()
            .map(|s| (s.key(), s.position, s.moves_left))
            .ok_or(Rejection::NoShip)?;

        if moves_left == 0 {
            return Err(Rejection::NoMovesLeft);
        }
        if from.distance(&to) != 1 {
            return Err(Rejection::NotAdjacent);
        }
        if !to.is_on_board() {
            return Err(Rejection::OffBoard);
        }
        if self.is_occupied(to) {
            return Err(Rejection::CellOccupied);
        }

        if let Some(ship) = self.roster.current_mut() {
            ship.consume_move();
            ship.position = to;
        }
        self.log.push(
            self.round,
            CombatEventKind::ShipMoved { ship: key, from, to },
            format!("Moved from ({}, {}) to ({}, {})", from.x, from.y, to.x, to.y),
        );
        Ok(())
    }

    /// Fire the current ship's selected component at `target`.
    ///
    /// Rolls with the caller's generator, applies the outcome and marks
    /// the slot used for the rest of this turn.
    pub fn fire<R: RngCore>(
        &mut self,
        target: CombatShipKey,
        rng: &mut R,
    ) -> std::result::Result<ShotOutcome, Rejection> {
        let shooter = self.current_key().ok_or(Rejection::NoShip)?;
        let slot = self.component_in_use.ok_or(Rejection::NoComponentSelected)?;
        let distance = self.check_shot(shooter, slot, target)?;

        let (weapon_name, weapon, targeting) = {
            let ship = self.ship(shooter).ok_or(Rejection::NoShip)?;
            let component = ship.component(slot).ok_or(Rejection::NotAWeapon)?;
            let weapon = *component.weapon_stats().ok_or(Rejection::NotAWeapon)?;
            (component.name.clone(), weapon, ship.targeting_bonus())
        };
        let bonus_accuracy = self.roster.get(shooter).map_or(0, |s| s.bonus_accuracy);
        let shot = Shot {
            weapon_name: &weapon_name,
            weapon,
            bonus_accuracy,
            targeting,
            distance,
        };

        let target_side = match target.side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        };
        let target_ship = target_side.ship_mut(target.ship).ok_or(Rejection::NoShip)?;
        let outcome = self.resolver.resolve(&shot, target_ship, rng);

        if let Some(combat_ship) = self.roster.get_mut(shooter) {
            combat_ship.mark_component_used(slot);
        }
        self.log.push(
            self.round,
            CombatEventKind::WeaponFired {
                shooter,
                slot,
                target,
                severity: outcome.severity,
            },
            outcome.message.clone(),
        );

        self.apply_outcome(shooter, target, &outcome);
        Ok(outcome)
    }

    /// Act on a resolved shot. Only destruction changes the session.
    ///
    /// Returns true if the target was removed.
    pub fn apply_outcome(
        &mut self,
        shooter: CombatShipKey,
        target: CombatShipKey,
        outcome: &ShotOutcome,
    ) -> bool {
        if !outcome.is_destroyed() {
            return false;
        }
        self.destroy_ship(target, shooter)
    }

    /// Take a ship off the roster and out of its fleet, and book the kill
    fn destroy_ship(&mut self, victim: CombatShipKey, by: CombatShipKey) -> bool {
        if self.roster.remove(victim).is_none() {
            return false;
        }

        let killer_design = self.ship(by).map(|s| s.design.clone());

        let losers = self.side_mut(victim.side);
        let fleet = losers.fleet;
        let removed = losers
            .player
            .fleets
            .get_mut(fleet)
            .and_then(|f| f.remove_ship(victim.ship));
        let victim_name = match &removed {
            Some(ship) => {
                losers.player.statistics.add_loss(&ship.design);
                ship.name.clone()
            }
            None => String::from("unknown ship"),
        };

        if let Some(design) = killer_design {
            self.side_mut(by.side).player.statistics.add_kill(&design);
        }

        info!(
            ship = victim.ship.0,
            side = ?victim.side,
            remaining = self.roster.len(),
            "Ship destroyed"
        );
        self.log.push(
            self.round,
            CombatEventKind::ShipDestroyed { ship: victim, by },
            format!("{victim_name} destroyed"),
        );
        true
    }

    fn judge(&self) -> Verdict {
        let mut sides = self.roster.iter().map(CombatShip::side);
        let Some(first) = sides.next() else {
            return Verdict::NoWinner;
        };
        if sides.all(|side| side == first) {
            return Verdict::Won(first);
        }

        let anyone_armed = self
            .roster
            .iter()
            .any(|s| self.ship(s.key()).is_some_and(Ship::has_military_power));
        if !anyone_armed {
            return Verdict::NoWinner;
        }

        Verdict::Ongoing
    }

    /// Judge the roster as it stands now.
    ///
    /// One side left: that side wins. Two sides but nobody armed: over with
    /// no winner. Safe to call after every action.
    pub fn is_combat_over(&mut self) -> bool {
        let winner = match self.judge() {
            Verdict::Ongoing => return false,
            Verdict::Won(side) => Some(side),
            Verdict::NoWinner => None,
        };
        self.winner = winner;

        if !self.ended {
            self.ended = true;
            let winner_id = self.winner();
            info!(winner = ?winner_id, round = self.round, "Combat decided");
            let description = match winner {
                Some(side) => format!("{} wins", self.side(side).player.name),
                None => String::from("Combat ended without a winner"),
            };
            self.log.push(
                self.round,
                CombatEventKind::CombatEnded { winner: winner_id },
                description,
            );
        }
        true
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner.map(|side| self.owner(side))
    }

    pub fn winning_side(&self) -> Option<Side> {
        self.winner
    }

    /// Reconcile fleets once combat is over and close the session.
    ///
    /// Judges the roster first, so a decided session reconciles even if the
    /// caller never polled `is_combat_over`.
    ///
    /// Surviving ships of the winner get a victory. A winning attacker
    /// takes the defender's sector and the defending fleet is struck from
    /// its player's list; a winning defender strikes the attacking fleet
    /// instead. Without a winner nothing moves.
    pub fn handle_end_combat(mut self) -> CombatSummary {
        self.is_combat_over();
        if let Some(side) = self.winner {
            let winners = self.side_mut(side);
            let designs: Vec<String> = winners
                .fleet()
                .map(|f| f.ships.iter().map(|s| s.design.clone()).collect())
                .unwrap_or_default();
            for design in &designs {
                winners.player.statistics.add_victory(design);
            }

            match side {
                Side::Attacker => {
                    let taken = self.defender.fleet().map(|f| f.coordinate);
                    if let (Some(coordinate), Some(fleet)) = (taken, self.attacker.fleet_mut()) {
                        fleet.coordinate = coordinate;
                    }
                    let fleet = self.defender.fleet;
                    self.defender.player.fleets.remove(fleet);
                }
                Side::Defender => {
                    let fleet = self.attacker.fleet;
                    self.attacker.player.fleets.remove(fleet);
                }
            }
            info!(winner = ?side, credited = designs.len(), "Fleets reconciled");
        }

        CombatSummary {
            winner: self.winner(),
            winning_side: self.winner,
            rounds: self.round,
            attacker_survivors: self.roster.side_count(Side::Attacker),
            defender_survivors: self.roster.side_count(Side::Defender),
            log: self.log,
        }
    }
}
