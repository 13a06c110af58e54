use std::collections::BTreeSet;

use minelogic::{
    Board, Cell, EngineConfig, Game, GameConfig, GridBounds, HazardOracle, KnowledgeBase,
    MoveKind, Outcome, Step,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_sound(kb: &KnowledgeBase, board: &Board) {
    for statement in kb.statements() {
        assert!(statement.count() > 0, "unresolved zero statement {statement}");
        assert!(statement.count() < statement.len(), "unresolved full statement {statement}");
        for cell in statement.cells() {
            assert!(!kb.facts().is_resolved(*cell), "{cell} resolved but still in {statement}");
        }
        let actual = statement.cells().iter().filter(|c| board.is_hazard(**c)).count();
        assert_eq!(actual, statement.count(), "{statement} is false on the board");
    }
    assert!(kb.safe_cells().is_disjoint(kb.hazard_cells()));
    assert!(kb.hazard_cells().is_subset(board.hazards()));
    assert!(kb.safe_cells().is_disjoint(board.hazards()));
    assert!(kb.moves_made().is_subset(kb.safe_cells()));
}

fn play_checked(bounds: GridBounds, hazards: usize, seed: u64) -> Outcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let board = Board::random(bounds, hazards, &mut rng).unwrap();
    let mut game = Game::new(board, EngineConfig::default(), rng);

    let mut steps = 0;
    loop {
        let moved: BTreeSet<Cell> = game.knowledge().moves_made().clone();
        let flagged: BTreeSet<Cell> = game.knowledge().hazard_cells().clone();
        let step = game.step().unwrap();
        steps += 1;
        assert!(steps <= bounds.cell_count() + 1, "game did not terminate");

        match step {
            Step::Observed { mv, count, .. } => {
                assert!(!moved.contains(&mv.cell));
                assert!(!flagged.contains(&mv.cell));
                assert_eq!(count, game.oracle().query(mv.cell).unwrap());
                assert_sound(game.knowledge(), game.oracle());
            }
            Step::Detonated { mv } => {
                assert_eq!(mv.kind, MoveKind::Guess, "a proven-safe move detonated");
                assert!(!flagged.contains(&mv.cell));
                break;
            }
            Step::Finished => break,
        }
    }

    let summary = game.summary();
    assert_eq!(summary.moves, summary.safe_moves + summary.guesses);
    if summary.outcome == Outcome::Won {
        let opened = game.knowledge().moves_made().len();
        assert_eq!(opened + game.oracle().hazard_count(), bounds.cell_count());
    }
    summary.outcome
}

#[test]
fn random_games_stay_sound() {
    let bounds = GridBounds::new(8, 8).unwrap();
    let mut won = 0;
    for seed in 0..100 {
        if play_checked(bounds, 8, seed) == Outcome::Won {
            won += 1;
        }
    }
    assert!(won > 0, "no game out of 100 was won");
}

#[test]
fn dense_and_narrow_boards_stay_sound() {
    for seed in 0..40 {
        play_checked(GridBounds::new(6, 6).unwrap(), 12, seed);
        play_checked(GridBounds::new(1, 12).unwrap(), 3, seed);
        play_checked(GridBounds::new(9, 3).unwrap(), 5, seed);
    }
}

#[test]
fn seeded_games_replay_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    std::fs::write(&path, r#"{ "height": 10, "width": 10, "hazards": 12, "seed": 42 }"#).unwrap();
    let config = GameConfig::from_path(&path).unwrap();
    assert_eq!(config.engine, EngineConfig::default());

    let run = || {
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap());
        let board = Board::random(config.bounds().unwrap(), config.hazards, &mut rng).unwrap();
        let mut game = Game::new(board, config.engine, rng);
        let summary = game.play().unwrap();
        (summary, game.knowledge().snapshot())
    };
    assert_eq!(run(), run());
}

#[test]
fn direct_resolution_alone_is_still_sound() {
    let config = EngineConfig {
        subsumption: false,
        record_derivations: false,
    };
    let bounds = GridBounds::new(8, 8).unwrap();
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::random(bounds, 10, &mut rng).unwrap();
        let mut game = Game::new(board, config, rng);
        game.play().unwrap();
        assert_sound(game.knowledge(), game.oracle());
        assert!(game.knowledge().derivations().is_empty());
    }
}
