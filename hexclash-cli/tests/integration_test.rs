//! Integration tests for HEX CLASH
//!
//! Tests the full stack: board and captures, AI players, game flow and the
//! persisted league ladder

use hexclash_core::{
    shape_id_to_index, AiConfig, Board, FileStore, GameConfig, GameResult, GameRunner, GameState,
    Hex, HexAi, Layout, Owner, Playstyle, Progress, Side, LEAGUES,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn ringed_center() -> Board {
    let mut board = Board::generate(1);
    for n in Hex::ORIGIN.neighbors() {
        board.set(n, Owner::Player);
    }
    board.set(Hex::ORIGIN, Owner::Ai);
    board
}

// ============================================================================
// CAPTURE ENGINE
// ============================================================================

#[test]
fn test_capture_then_execute() {
    let mut board = ringed_center();
    let captures = board.find_captures(1, Side::Player);
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].size, 1);

    board.execute_captures(&captures, Owner::Player);
    assert_eq!(board.count(Owner::Ai), 0);
    assert!(board.find_captures(1, Side::Player).is_empty());
}

#[test]
fn test_empty_neighbor_prevents_capture() {
    let mut board = ringed_center();
    board.set(Hex::new(-1, 1), Owner::Empty);
    assert!(board.find_captures(1, Side::Player).is_empty());
}

// ============================================================================
// INPUT TO PLACEMENT
// ============================================================================

#[test]
fn test_click_places_piece_under_cursor() {
    let layout = Layout::new(24.0, (400.0, 300.0));
    let mut state = GameState::new(GameConfig::fixed(3).with_seed(17));
    let target = Hex::new(1, -2);
    let (x, y) = layout.hex_to_pixel(target);

    let anchor = layout.pixel_to_hex(x + 3.0, y + 2.0);
    assert_eq!(anchor, target);

    // Find a slot and rotation that fits at the clicked hex
    let (slot, rotation) = (0..state.offer(Side::Player).len())
        .flat_map(|slot| (0..6u8).map(move |rot| (slot, rot)))
        .find(|&(slot, rot)| {
            let shape = state.offer(Side::Player)[slot];
            hexclash_core::Placement::new(shape, rot, anchor).is_valid(state.board(), 3)
        })
        .expect("some offered piece fits on an empty board");

    let outcome = state.place(slot, rotation, anchor).unwrap();
    assert_eq!(state.board().get(anchor), Some(Owner::Player));
    assert!(outcome.placed.contains(&anchor));
}

// ============================================================================
// AI GAMES
// ============================================================================

#[test]
fn test_ai_game_on_growing_board() {
    let config = GameConfig {
        start_radius: 2,
        max_radius: 3,
        grow_every: 2,
        offer_size: 3,
        max_rounds: 12,
        seed: Some(5),
    };
    let mut runner = GameRunner::new(
        AiConfig::new(3, Playstyle::Sneaky).with_seed(1),
        AiConfig::new(3, Playstyle::Aggressive).with_seed(2),
    );

    let mut max_radius_seen = 0;
    let outcome = runner
        .play_with(GameState::new(config), |state, _| {
            max_radius_seen = max_radius_seen.max(state.active_radius());
        })
        .unwrap();

    assert_ne!(outcome.result, GameResult::Ongoing);
    assert!(outcome.rounds <= 12);
    // Growth happens at round 2 unless the game already ended
    if outcome.rounds >= 2 {
        assert_eq!(max_radius_seen, 3);
    }
}

#[test]
fn test_final_scores_match_board() {
    let mut runner = GameRunner::new(
        AiConfig::new(1, Playstyle::Aggressive).with_seed(21),
        AiConfig::new(4, Playstyle::Aggressive).with_seed(22),
    );
    let mut final_state = None;
    let outcome = runner
        .play_with(GameState::new(GameConfig::fixed(3).with_seed(23)), |state, _| {
            let board = state.board();
            final_state = Some((board.count(Owner::Player), board.count(Owner::Ai)));
        })
        .unwrap();

    assert_eq!(final_state, Some((outcome.player_score, outcome.ai_score)));
    match outcome.winner() {
        Some(Side::Player) => assert!(outcome.player_score > outcome.ai_score),
        Some(Side::Ai) => assert!(outcome.ai_score > outcome.player_score),
        None => assert_eq!(outcome.player_score, outcome.ai_score),
    }
}

#[test]
fn test_ai_with_no_legal_move_passes() {
    // Neither bar nor triangle fits on a one-cell board
    let bar = shape_id_to_index("Q1").unwrap();
    let triangle = shape_id_to_index("T3").unwrap();
    let mut state = GameState::new(GameConfig::fixed(0).with_seed(3))
        .with_offers(vec![bar, triangle], vec![triangle]);
    let mut player = HexAi::new(AiConfig::new(5, Playstyle::Aggressive).with_seed(8));
    let mut opponent = HexAi::new(AiConfig::new(1, Playstyle::Sneaky).with_seed(9));

    assert_eq!(player.play_turn(&mut state), Ok(None));
    assert_eq!(state.current_side(), Side::Ai);
    assert_eq!(state.result(), GameResult::Ongoing);

    assert_eq!(opponent.play_turn(&mut state), Ok(None));
    assert_eq!(state.result(), GameResult::Draw);
    assert_eq!((state.score(Side::Player), state.score(Side::Ai)), (0, 0));
}

// ============================================================================
// LEAGUE
// ============================================================================

#[test]
fn test_league_progress_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = FileStore::new(dir.path());
        let mut progress = Progress::load_or_default(&store);
        for _ in 0..LEAGUES[0].rivals.len() {
            progress.record_win();
        }
        progress.record_loss();
        progress.save(&mut store).unwrap();
    }

    let store = FileStore::new(dir.path());
    let progress = Progress::load_or_default(&store);
    assert_eq!(progress.league_index, 1);
    assert_eq!(progress.rival_index, 0);
    assert_eq!(progress.losses, 1);
    assert_eq!(progress.total_games, LEAGUES[0].rivals.len() as u32 + 1);
    assert_eq!(progress.current_rival().name, LEAGUES[1].rivals[0].name);
}

#[test]
fn test_corrupt_progress_file_resets() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("hexclash.progress.json"), "{{{{").unwrap();

    let store = FileStore::new(dir.path());
    assert!(Progress::load(&store).is_err());
    assert_eq!(Progress::load_or_default(&store), Progress::default());
}

#[test]
fn test_rival_plays_a_full_game() {
    let rival = &LEAGUES[2].rivals[0];
    let mut runner = GameRunner::new(
        AiConfig::new(3, Playstyle::Defensive).with_seed(4),
        rival.ai_config().with_seed(5),
    );
    let outcome = runner.play(GameConfig::fixed(2).with_seed(6)).unwrap();
    assert_ne!(outcome.result, GameResult::Ongoing);
}
