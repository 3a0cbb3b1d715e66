//! Power-up integration tests.
//!
//! Resolution against boards built by hand, and the loadout rules that
//! decide when a use is spent.

use block_merge::board::{Board, CellState, Piece, PieceId};
use block_merge::catalog::{Color, ShapeKind};
use block_merge::core::{EngineConfig, Position, PowerUpGrant};
use block_merge::powerups::{
    placement_score, suggest_placement, PowerUpContext, PowerUpKind, PowerUpOutcome,
    PowerUpResolver, PowerUpTarget, PowerUps,
};

fn piece(kind: ShapeKind) -> Piece {
    Piece::new(PieceId::new(0), kind, Color::Orange)
}

fn never_reroll() -> Piece {
    panic!("reroll source should not be used")
}

/// The default loadout is one Reroll and one Blast.
#[test]
fn test_default_loadout() {
    let loadout = PowerUps::from_grants(&EngineConfig::default().starting_power_ups);
    let kinds: Vec<_> = loadout.iter().map(|p| (p.kind(), p.uses_remaining())).collect();
    assert_eq!(kinds, vec![(PowerUpKind::Reroll, 1), (PowerUpKind::Blast, 1)]);
}

/// Every kind parses from its stored id and carries display text.
#[test]
fn test_catalog_ids() {
    let ids: Vec<_> = PowerUpKind::ALL.iter().map(|k| k.id()).collect();
    assert_eq!(ids, ["reroll", "blast", "freeze", "target", "colorBomb"]);
    for kind in PowerUpKind::ALL {
        assert!(!kind.name().is_empty());
        assert!(!kind.description().is_empty());
    }
    assert!("superBomb".parse::<PowerUpKind>().is_err());
}

/// Blast near an edge only touches on-board blocks and leaves gems.
#[test]
fn test_blast_at_corner() {
    let board = Board::from_ascii(&[
        "....R",
        "...Rg",
        ".....",
        ".....",
        ".....",
    ])
    .unwrap();
    let (after, cells) = PowerUpResolver::blast(&board, Position::new(0, 4)).unwrap();
    assert_eq!(cells, vec![Position::new(0, 4), Position::new(1, 3)]);
    assert_eq!(after.count_occupied(), 0);
    assert_eq!(after.get(1, 4), Some(CellState::Gem(Color::Green)));
}

/// Color Bomb with a color absent from the board still spends the use.
#[test]
fn test_color_bomb_on_missing_color() {
    let board = Board::from_ascii(&["BB...", ".....", ".....", ".....", "....."]).unwrap();
    let mut loadout = PowerUps::from_grants(&[PowerUpGrant::new(PowerUpKind::ColorBomb, 1)]);
    let mut ctx = PowerUpContext::new(&board, &[], never_reroll);

    let outcome = PowerUpResolver::activate(
        &mut loadout,
        PowerUpKind::ColorBomb,
        PowerUpTarget::Color(Color::Purple),
        &mut ctx,
    );
    match outcome {
        PowerUpOutcome::Cleared { cells, score, board } => {
            assert!(cells.is_empty());
            assert_eq!(score, 0);
            assert_eq!(board.count_occupied(), 2);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(loadout.uses(PowerUpKind::ColorBomb), 0);
}

/// Color Bomb score uses the configured points with no multiplier.
#[test]
fn test_color_bomb_scoring_uses_configured_points() {
    let board = Board::from_ascii(&["YYY..", "..Y..", ".....", ".....", "....."]).unwrap();
    let mut loadout = PowerUps::from_grants(&[PowerUpGrant::new(PowerUpKind::ColorBomb, 2)]);
    let mut ctx = PowerUpContext::new(&board, &[], never_reroll).with_line_clear_points(25);

    let outcome = PowerUpResolver::activate(
        &mut loadout,
        PowerUpKind::ColorBomb,
        PowerUpTarget::Color(Color::Yellow),
        &mut ctx,
    );
    assert!(matches!(outcome, PowerUpOutcome::Cleared { score: 100, .. }));
    assert_eq!(loadout.uses(PowerUpKind::ColorBomb), 1);
}

/// Target returns the first best anchor in row-major order.
#[test]
fn test_target_ties_break_row_major() {
    let board = Board::from_ascii(&[
        "BBB..",
        ".....",
        ".....",
        ".....",
        "BBB..",
    ])
    .unwrap();
    let i2 = piece(ShapeKind::I2);
    // Both (0, 3) and (4, 3) complete a row; the first scanned wins.
    assert_eq!(placement_score(&board, &i2, Position::new(0, 3)), 102);
    assert_eq!(placement_score(&board, &i2, Position::new(4, 3)), 102);
    assert_eq!(suggest_placement(&board, &i2), Some(Position::new(0, 3)));
}

/// Target suggests without touching the board or the piece set.
#[test]
fn test_target_activation() {
    let board = Board::from_ascii(&[".....", ".....", ".....", ".....", "GGG.."]).unwrap();
    let pieces = vec![piece(ShapeKind::I3), piece(ShapeKind::I2)];
    let mut loadout = PowerUps::from_grants(&[PowerUpGrant::new(PowerUpKind::Target, 1)]);
    let mut ctx = PowerUpContext::new(&board, &pieces, never_reroll);

    let outcome = PowerUpResolver::activate(
        &mut loadout,
        PowerUpKind::Target,
        PowerUpTarget::Piece(1),
        &mut ctx,
    );
    assert_eq!(
        outcome,
        PowerUpOutcome::Suggested {
            index: 1,
            position: Position::new(4, 3)
        }
    );
    assert!(outcome.consumed_use());
    assert_eq!(loadout.uses(PowerUpKind::Target), 0);
}

/// An absent kind is inert.
#[test]
fn test_ungranted_kind_is_inert() {
    let board = Board::create_empty(5);
    let mut loadout = PowerUps::new();
    let mut ctx = PowerUpContext::new(&board, &[], never_reroll);
    let outcome =
        PowerUpResolver::activate(&mut loadout, PowerUpKind::Freeze, PowerUpTarget::None, &mut ctx);
    assert_eq!(outcome, PowerUpOutcome::Inert);
    assert!(!outcome.consumed_use());
}
