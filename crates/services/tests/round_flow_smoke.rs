use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{LeaderboardStore, QuizSession, RoundBuilder, Stage};
use storage::repository::Storage;
use trivia_core::model::{ANONYMOUS, Answer, QuestionRecord, UserScores};

fn temp_leaderboard() -> PathBuf {
    std::env::temp_dir()
        .join(format!("trivia-flow-{}", uuid::Uuid::new_v4()))
        .join("leaderboard.json")
}

fn bank() -> Vec<QuestionRecord> {
    (0..15)
        .map(|i| QuestionRecord::new(format!("Statement {i}"), "True"))
        .collect()
}

fn play_round(session: &mut QuizSession, store: &mut LeaderboardStore, correct: usize) -> u32 {
    session
        .start_round_with_rng(&bank(), &mut StdRng::seed_from_u64(3))
        .unwrap();
    let mut answered = 0;
    while session.next_question().unwrap().is_some() {
        let answer = if answered < correct { Answer::True } else { Answer::False };
        session.answer(answer).unwrap();
        answered += 1;
    }
    assert_eq!(session.stage(), Stage::End);
    session.finish(store).unwrap().score
}

#[test]
fn rounds_persist_across_store_reopen() {
    let path = temp_leaderboard();

    {
        let mut store = LeaderboardStore::open(Storage::json_file(&path).leaderboard);
        let mut session = QuizSession::new(RoundBuilder::new());
        session.set_username("alice");
        assert_eq!(play_round(&mut session, &mut store, 7), 7);
        assert_eq!(play_round(&mut session, &mut store, 3), 3);
    }

    let store = LeaderboardStore::open(Storage::json_file(&path).leaderboard);
    assert_eq!(
        store.user_stats("alice"),
        Some(UserScores {
            high_score: 7,
            cumulative_score: 10
        })
    );
    assert_eq!(store.user_rank("alice"), 1);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn corrupt_leaderboard_file_starts_empty_and_is_replaced() {
    let path = temp_leaderboard();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json at all").unwrap();

    let mut store = LeaderboardStore::open(Storage::json_file(&path).leaderboard);
    assert!(store.sorted_scores().is_empty());

    store.update_score("", 5);
    let reopened = LeaderboardStore::open(Storage::json_file(&path).leaderboard);
    assert_eq!(reopened.user_stats(ANONYMOUS).unwrap().high_score, 5);

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn two_players_share_one_board() {
    let mut store = LeaderboardStore::open(Storage::in_memory().leaderboard);

    let mut first = QuizSession::new(RoundBuilder::new());
    first.set_username("bea");
    play_round(&mut first, &mut store, 4);

    let mut second = QuizSession::new(RoundBuilder::new());
    second.set_username("cal");
    play_round(&mut second, &mut store, 9);

    let names: Vec<&str> = store.sorted_scores().iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["cal", "bea"]);

    let stats = store.leaderboard_stats();
    assert_eq!(stats.total_players, 2);
    assert_eq!(stats.total_points, 13);
    assert_eq!(stats.max_high_score, 9);
}

#[test]
fn unwritable_leaderboard_path_keeps_round_in_memory() {
    let dir = temp_leaderboard();
    fs::create_dir_all(&dir).unwrap();

    let mut store = LeaderboardStore::open(Storage::json_file(&dir).leaderboard);
    assert!(store.sorted_scores().is_empty());

    let mut session = QuizSession::new(RoundBuilder::new());
    session.set_username("dora");
    assert_eq!(play_round(&mut session, &mut store, 6), 6);

    assert_eq!(store.user_stats("dora").unwrap().cumulative_score, 6);
    assert!(dir.is_dir());

    let _ = fs::remove_dir_all(dir.parent().unwrap());
}
