use super::*;

fn place(grid: &mut Grid, kind: UnitKind, owner: Player, x: i8, y: i8) {
    grid.set(Pos::new(x, y), Some(Unit::new(kind, owner)));
}

#[test]
fn test_cannon_damage_falls_off() {
    let cannon = Unit::new(UnitKind::Cannon, Player::One);
    let from = Pos::new(0, 4);
    assert_eq!(damage(&cannon, from, from), 0);
    assert_eq!(damage(&cannon, from, Pos::new(1, 4)), 10);
    assert_eq!(damage(&cannon, from, Pos::new(2, 4)), 7);
    assert_eq!(damage(&cannon, from, Pos::new(3, 4)), 5);
}

#[test]
fn test_flat_damage_for_other_kinds() {
    let archer = Unit::new(UnitKind::Archer, Player::One);
    assert_eq!(damage(&archer, Pos::new(0, 0), Pos::new(3, 3)), 6);
}

#[test]
fn test_attack_reduces_hp_without_kill() {
    let mut grid = Grid::empty();
    let mut castles = [100, 100];
    place(&mut grid, UnitKind::Pawn, Player::One, 3, 6);
    place(&mut grid, UnitKind::Pawn, Player::Two, 3, 5);

    let report = attack_target(&mut grid, &mut castles, Pos::new(3, 6), Pos::new(3, 5));

    assert!(report.casualties.is_empty());
    assert!(report.ended.is_none());
    assert_eq!(grid.get(Pos::new(3, 5)).unwrap().hp, 5);
    // Attacker stays put.
    assert!(grid.get(Pos::new(3, 6)).is_some());
}

#[test]
fn test_kill_removes_unit_and_king_kill_ends_match() {
    let mut grid = Grid::empty();
    let mut castles = [100, 100];
    place(&mut grid, UnitKind::Cannon, Player::One, 3, 3);
    place(&mut grid, UnitKind::Pawn, Player::Two, 3, 2);

    let report = attack_target(&mut grid, &mut castles, Pos::new(3, 3), Pos::new(3, 2));
    assert_eq!(report.casualties.len(), 1);
    assert!(grid.get(Pos::new(3, 2)).is_none());
    assert!(report.ended.is_none());

    place(&mut grid, UnitKind::King, Player::Two, 3, 2);
    grid.get_mut(Pos::new(3, 2)).unwrap().hp = 10;
    let report = attack_target(&mut grid, &mut castles, Pos::new(3, 3), Pos::new(3, 2));
    assert_eq!(
        report.ended,
        Some(MatchOutcome {
            winner: Player::One,
            cause: EndCause::KingSlain
        })
    );
}

#[test]
fn test_castle_takes_flat_damage() {
    let mut grid = Grid::empty();
    let mut castles = [100, 100];
    // Cannon adjacent to player 2's castle still deals only flat damage to it.
    place(&mut grid, UnitKind::Cannon, Player::One, 4, 1);

    let report = attack_target(&mut grid, &mut castles, Pos::new(4, 1), castle_pos(Player::Two));
    assert_eq!(report.castle_damage, 5);
    assert_eq!(castles, [100, 95]);
    assert!(report.ended.is_none());

    castles[Player::Two.idx()] = 5;
    let report = attack_target(&mut grid, &mut castles, Pos::new(4, 1), castle_pos(Player::Two));
    assert_eq!(report.ended.map(|o| o.cause), Some(EndCause::CastleDestroyed));
}

#[test]
fn test_unit_on_castle_shields_it() {
    let mut grid = Grid::empty();
    let mut castles = [100, 100];
    place(&mut grid, UnitKind::Pawn, Player::One, 4, 1);
    place(&mut grid, UnitKind::King, Player::Two, 4, 0);

    attack_target(&mut grid, &mut castles, Pos::new(4, 1), Pos::new(4, 0));
    assert_eq!(castles, [100, 100]);
    assert_eq!(grid.get(Pos::new(4, 0)).unwrap().hp, 25);
}

#[test]
fn test_mage_splash_hits_cross() {
    let mut grid = Grid::empty();
    let mut castles = [100, 100];
    place(&mut grid, UnitKind::Mage, Player::One, 3, 6);
    place(&mut grid, UnitKind::Pawn, Player::Two, 3, 3);
    place(&mut grid, UnitKind::Pawn, Player::Two, 4, 3);
    place(&mut grid, UnitKind::Pawn, Player::Two, 3, 2);
    // Diagonal neighbour is outside the cross.
    place(&mut grid, UnitKind::Pawn, Player::Two, 4, 2);
    // Friendly units in the cross are untouched.
    place(&mut grid, UnitKind::Pawn, Player::One, 2, 3);

    let report = attack_target(&mut grid, &mut castles, Pos::new(3, 6), Pos::new(3, 3));
    assert!(report.casualties.is_empty());
    assert_eq!(grid.get(Pos::new(3, 3)).unwrap().hp, 7);
    assert_eq!(grid.get(Pos::new(4, 3)).unwrap().hp, 7);
    assert_eq!(grid.get(Pos::new(3, 2)).unwrap().hp, 7);
    assert_eq!(grid.get(Pos::new(4, 2)).unwrap().hp, 10);
    assert_eq!(grid.get(Pos::new(2, 3)).unwrap().hp, 10);
}

#[test]
fn test_mage_splash_reaches_castle_and_kills_king() {
    let mut grid = Grid::empty();
    let mut castles = [100, 3];
    place(&mut grid, UnitKind::Mage, Player::One, 3, 3);
    place(&mut grid, UnitKind::King, Player::Two, 3, 0);
    grid.get_mut(Pos::new(3, 0)).unwrap().hp = 2;

    // Target (3,0); its right neighbour is player 2's castle at (4,0).
    let report = attack_target(&mut grid, &mut castles, Pos::new(3, 3), Pos::new(3, 0));
    assert_eq!(report.casualties.len(), 1);
    assert_eq!(castles[Player::Two.idx()], 0);
    // King dies first in splash order, so that is the recorded cause.
    assert_eq!(report.ended.map(|o| o.cause), Some(EndCause::KingSlain));
}

#[test]
fn test_splash_cells_clipped_at_edges() {
    assert_eq!(splash_cells(Pos::new(0, 0)).len(), 3);
    assert_eq!(splash_cells(Pos::new(3, 3)).len(), 5);
}
