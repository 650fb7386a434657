mod test {
    use Direction::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::core::*;
    use crate::models::GameMessage;
    use crate::test::test_util::{GameTestState, grid, render_without_new_tiles};

    fn new_game(seed: u64, settings: GameSettings) -> GameManager<StdRng, RecordingActuator> {
        GameManager::new(settings, StdRng::seed_from_u64(seed), RecordingActuator::new()).expect("valid settings")
    }

    #[test]
    fn new_game_starts_with_two_tiles_and_one_frame() {
        let game = new_game(1, GameSettings::default());
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(game.score(), 0);
        assert!(!game.is_over());
        assert!(!game.is_won());
        assert!(!game.is_end());
        assert!(game.grid().tiles().all(|tile| tile.value == 2 || tile.value == 4));

        let frames = &game.actuator().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0].0, game.grid());
        assert_eq!(frames[0].1, GameMetadata { score: 0, over: false, won: false, end: false });
    }

    #[test]
    fn same_seed_plays_the_same_game() {
        let mut first = new_game(42, GameSettings::default());
        let mut second = new_game(42, GameSettings::default());
        for direction in [Left, Up, Right, Down, Left, Left, Up] {
            assert_eq!(first.handle_move(direction), second.handle_move(direction));
        }
        assert_eq!(first.grid(), second.grid());
        assert_eq!(first.score(), second.score());
    }

    #[test]
    fn successful_move_spawns_one_tile_and_actuates() {
        let mut game = GameTestState::new(r#"
. . . .
. 2 . .
. . . .
. . . 4
"#);
        assert_eq!(game.frame_count(), 1);
        game.assert_move(Left, r#"
. . . .
2 . . .
. . . .
4 . . .
"#);
        assert_eq!(game.game.grid().tile_count(), 3);
        assert_eq!(game.frame_count(), 2);

        let spawned: Vec<&Tile> = game.game.grid().tiles().filter(|tile| tile.previous_position.is_none()).collect();
        assert_eq!(spawned.len(), 1);
        assert!(spawned[0].value == 2 || spawned[0].value == 4);
        assert!(spawned[0].position != Position::new(0, 1) && spawned[0].position != Position::new(0, 3));
    }

    #[test]
    fn unproductive_move_changes_nothing() {
        let mut game = GameTestState::new(r#"
2 . . .
4 . . .
. . . .
. . . .
"#);
        assert!(game.game.can_move(), "a board with empty cells can always move somewhere");
        game.assert_no_move(Left);
        game.assert_no_move(Up);
        game.assert_matches(r#"
2 . . .
4 . . .
. . . .
. . . .
"#);
    }

    #[test]
    fn deadlocked_board_ignores_every_move() {
        let mut game = GameTestState::new(r#"
2 4
4 2
"#);
        assert!(!game.game.can_continue());
        assert!(!game.game.can_move());
        for direction in Direction::ALL {
            game.assert_no_move(direction);
        }
        assert_eq!(game.frame_count(), 1);
    }

    #[test]
    fn score_accumulates_merged_values() {
        let mut game = GameTestState::new(r#"
2 2 4 4
. . . .
. . . .
. . . .
"#);
        game.assert_move(Left, r#"
4 8 . .
. . . .
. . . .
. . . .
"#);
        assert_eq!(game.game.score(), 12);
        assert_eq!(game.game.actuator().last_frame().map(|frame| frame.1.score), Some(12));
    }

    #[test]
    fn reaching_2048_wins_and_freezes_the_game() {
        let mut game = GameTestState::new(r#"
1024 1024 . .
. . . .
. . . .
. . . .
"#);
        game.assert_move(Left, r#"
2048 . . .
. . . .
. . . .
. . . .
"#);
        assert!(game.game.is_won());
        assert!(game.game.is_end());
        assert!(!game.game.is_over());
        let last = game.game.actuator().last_frame().expect("frame").1;
        assert_eq!(last, GameMetadata { score: 2048, over: false, won: true, end: true });

        for direction in Direction::ALL {
            game.assert_no_move(direction);
        }
    }

    #[test]
    fn win_threshold_follows_settings() {
        let settings = GameSettings { size: 2, win_value: 16, ..GameSettings::default() };
        let mut game = GameTestState::with_settings(r#"
8 8
. .
"#, settings);
        game.assert_move(Left, r#"
16 .
. .
"#);
        assert!(game.game.is_won());
    }

    #[test]
    fn filling_the_board_without_pairs_ends_the_game() {
        let settings = GameSettings { size: 2, four_probability: 0.0, ..GameSettings::default() };
        let mut game = GameTestState::with_settings(r#"
4 8
. 16
"#, settings);
        game.assert_move(Left, r#"
4 8
16 .
"#);
        game.assert_matches(r#"
4 8
16 2
"#);
        assert!(game.game.is_over());
        assert!(!game.game.is_won());
        assert!(game.game.is_end());
        let last = game.game.actuator().last_frame().expect("frame").1;
        assert_eq!(last, GameMetadata { score: 0, over: true, won: false, end: true });

        game.assert_no_move(Up);
    }

    #[test]
    fn winning_merge_that_fills_the_board_is_both_won_and_over() {
        let settings = GameSettings { size: 2, win_value: 8, four_probability: 0.0, ..GameSettings::default() };
        let mut game = GameTestState::with_settings(r#"
4 4
2 16
"#, settings);
        game.assert_move(Left, r#"
8 .
2 16
"#);
        game.assert_matches(r#"
8 2
2 16
"#);
        let last = game.game.actuator().last_frame().expect("frame").1;
        assert_eq!(last, GameMetadata { score: 8, over: true, won: true, end: true });
        assert_eq!(GameMessage::from_metadata(&last), Some(GameMessage::Over));

        game.assert_no_move(Right);
    }

    #[test]
    fn full_board_with_pair_is_not_over() {
        let settings = GameSettings { size: 2, four_probability: 0.0, ..GameSettings::default() };
        let mut game = GameTestState::with_settings(r#"
4 8
. 4
"#, settings);
        game.assert_move(Left, r#"
4 8
4 .
"#);
        game.assert_matches(r#"
4 8
4 2
"#);
        assert!(game.game.grid().is_full());
        assert!(game.game.can_continue());
        assert!(!game.game.is_over());
    }

    #[test]
    fn restart_clears_everything() {
        let mut game = GameTestState::new(r#"
1024 1024 . .
. . . .
. . 8 .
. . . .
"#);
        game.game.handle_move(Left);
        assert!(game.game.is_end());
        let frames_before = game.frame_count();

        game.game.handle_restart();

        assert_eq!(game.game.score(), 0);
        assert!(!game.game.is_won());
        assert!(!game.game.is_over());
        assert_eq!(game.game.grid().tile_count(), 2);
        assert_eq!(game.game.actuator().continue_calls, 1);
        assert_eq!(game.frame_count(), frames_before + 1);
        assert_eq!(
            game.game.actuator().last_frame().expect("frame").1,
            GameMetadata { score: 0, over: false, won: false, end: false }
        );
    }

    #[test]
    fn restart_respects_start_tile_setting() {
        let settings = GameSettings { start_tiles: 5, ..GameSettings::default() };
        let mut game = new_game(3, settings);
        assert_eq!(game.grid().tile_count(), 5);
        game.handle_action(UserAction::Restart);
        assert_eq!(game.grid().tile_count(), 5);
    }

    #[test]
    fn moves_work_again_after_restart() {
        let mut game = GameTestState::new(r#"
2 4
4 2
"#);
        game.game.handle_restart();
        let moved = Direction::ALL.iter().any(|&direction| game.game.handle_move(direction));
        assert!(moved, "a fresh 2x2 board with two tiles always has a move");
    }

    #[test]
    fn direction_codes_drive_moves() {
        let mut game = GameTestState::new(r#"
. . 2
. . .
. . .
"#);
        assert_eq!(game.game.handle_move_code(3), Ok(true));
        assert_eq!(game.game.grid().cell_content(&Position::new(0, 0)).map(|tile| tile.value), Some(2));
    }

    #[test]
    fn bad_direction_code_is_rejected_without_side_effects() {
        let mut game = GameTestState::new(r#"
. . 2
. . .
. . .
"#);
        let before = game.game.grid().clone();
        assert_eq!(game.game.handle_move_code(4), Err(GameError::InvalidDirection(4)));
        assert_eq!(game.game.grid(), &before);
        assert_eq!(game.frame_count(), 1);
    }

    #[test]
    fn spawn_value_follows_four_probability() {
        let settings = GameSettings { four_probability: 1.0, start_tiles: 6, ..GameSettings::default() };
        let game = new_game(11, settings);
        assert!(game.grid().tiles().all(|tile| tile.value == 4));

        let settings = GameSettings { four_probability: 0.0, start_tiles: 6, ..GameSettings::default() };
        let game = new_game(11, settings);
        assert!(game.grid().tiles().all(|tile| tile.value == 2));
    }

    #[test]
    fn spawn_lands_on_an_empty_cell() {
        let mut game = GameTestState::new(r#"
2 4 8
16 32 .
64 128 256
"#);
        assert_eq!(game.game.add_random_tile(), Some(Position::new(2, 1)));
        assert!(game.game.grid().is_full());
        assert_eq!(game.game.add_random_tile(), None);
    }

    #[test]
    fn spawn_on_one_by_one_board_fills_it() {
        let settings = GameSettings { size: 1, start_tiles: 1, ..GameSettings::default() };
        let mut game = new_game(5, settings);
        assert!(game.grid().is_full());
        for direction in Direction::ALL {
            assert!(!game.handle_move(direction));
        }
    }

    #[test]
    fn grid_size_must_match_settings() {
        let result = GameManager::with_grid(
            GameSettings::default(),
            grid("2 .\n. ."),
            StdRng::seed_from_u64(0),
            RecordingActuator::new(),
        );
        assert!(matches!(result, Err(GameError::GridSizeMismatch { expected: 4, actual: 2 })));
    }

    #[test]
    fn invalid_settings_are_rejected_before_play() {
        let settings = GameSettings { size: 0, ..GameSettings::default() };
        let result = GameManager::new(settings, StdRng::seed_from_u64(0), RecordingActuator::new());
        assert!(matches!(result, Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn random_play_keeps_board_invariants() {
        let mut game = new_game(99, GameSettings::default());
        let mut rng = StdRng::seed_from_u64(100);
        let mut last_score = 0;
        for _ in 0..500 {
            let direction = Direction::ALL[rand::Rng::random_range(&mut rng, 0..4)];
            let tiles_before = game.grid().tile_count();
            let frames_before = game.actuator().frames.len();
            let moved = game.handle_move(direction);

            assert!(game.score() >= last_score);
            last_score = game.score();
            assert_eq!(game.grid().empty_cells().len() + game.grid().tile_count(), 16);
            for pos in game.grid().positions() {
                if let Some(tile) = game.grid().cell_content(&pos) {
                    assert_eq!(tile.position, pos);
                    assert!(tile.value.is_power_of_two() && tile.value >= 2);
                }
            }
            if moved {
                assert_eq!(game.actuator().frames.len(), frames_before + 1);
                assert!(game.grid().tile_count() <= tiles_before + 1);
                let new_tiles = render_without_new_tiles(game.grid());
                assert_eq!(new_tiles.matches('.').count(), 16 - game.grid().tile_count() + 1);
            } else {
                assert_eq!(game.actuator().frames.len(), frames_before);
            }
            let metadata = game.metadata();
            assert_eq!(metadata.end, metadata.over || metadata.won);
            if game.is_end() {
                break;
            }
        }
    }
}
