mod test_game_manager;
