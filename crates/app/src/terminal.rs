use std::error::Error;
use std::io::{self, BufRead, Write};

use services::{LeaderboardStore, PerformanceTier, QuizSession, RoundSummary};
use storage::QuestionSource;
use trivia_core::model::Answer;

const PODIUM: [&str; 3] = ["1st", "2nd", "3rd"];

enum Reply {
    Answer(Answer),
    Quit,
}

fn parse_reply(raw: &str) -> Option<Reply> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "t" | "true" => Some(Reply::Answer(Answer::True)),
        "f" | "false" => Some(Reply::Answer(Answer::False)),
        "q" | "quit" => Some(Reply::Quit),
        _ => None,
    }
}

fn tier_message(tier: PerformanceTier) -> &'static str {
    match tier {
        PerformanceTier::Perfect => "PERFECT SCORE! Every answer was right.",
        PerformanceTier::Excellent => "Excellent work! You're mastering the concepts!",
        PerformanceTier::Good => "Good job! Keep learning and improving!",
        PerformanceTier::KeepLearning => {
            "Great effort! Every wrong answer is a learning opportunity!"
        }
    }
}

/// Line-oriented front end: username entry, rounds of questions, end screen.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message} ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Run a full session until the player declines another round, quits, or
    /// input ends. Only finished rounds reach the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the question bank cannot be read, a round cannot
    /// be built, or the terminal cannot be written.
    pub fn play(
        &mut self,
        session: &mut QuizSession,
        store: &mut LeaderboardStore,
        bank: &dyn QuestionSource,
    ) -> Result<(), Box<dyn Error>> {
        writeln!(self.output, "Quiz Game")?;
        loop {
            let Some(raw) = self.prompt("Enter your username to start the quiz:")? else {
                return Ok(());
            };
            if session.set_username(&raw) {
                break;
            }
            writeln!(self.output, "Please enter a username!")?;
        }

        let records = bank.records()?;
        loop {
            session.start_round(&records)?;
            if !self.play_round(session)? {
                return Ok(());
            }

            let summary = session.finish(store)?;
            self.render_summary(&summary)?;
            render_leaderboard(&mut self.output, store, Some(&summary.username))?;

            match self.prompt("Play again? [y/N]")? {
                Some(reply) if reply.trim().eq_ignore_ascii_case("y") => {}
                _ => return Ok(()),
            }
        }
    }

    /// Returns `false` if the player quit before the round ended.
    fn play_round(&mut self, session: &mut QuizSession) -> Result<bool, Box<dyn Error>> {
        loop {
            let Some(text) = session.next_question()?.map(|q| q.text().to_string()) else {
                return Ok(true);
            };
            if let Some(progress) = session.progress() {
                writeln!(self.output)?;
                writeln!(
                    self.output,
                    "Player: {}    Score: {}    Question {}/{}",
                    session.username(),
                    progress.score,
                    progress.presented,
                    progress.total
                )?;
            }
            writeln!(self.output, "{text}")?;

            let answer = loop {
                let Some(raw) = self.prompt("[t]rue / [f]alse (q to quit):")? else {
                    return Ok(false);
                };
                match parse_reply(&raw) {
                    Some(Reply::Answer(answer)) => break answer,
                    Some(Reply::Quit) => return Ok(false),
                    None => writeln!(self.output, "Please answer t or f.")?,
                }
            };

            let feedback = session.answer(answer)?;
            let verdict = if feedback.correct { "Correct!" } else { "Incorrect!" };
            writeln!(self.output, "{verdict}")?;
            if feedback.explanation.is_empty() {
                writeln!(self.output, "No explanation available")?;
            } else {
                writeln!(self.output, "Explanation: {}", feedback.explanation)?;
            }
        }
    }

    fn render_summary(&mut self, summary: &RoundSummary) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        writeln!(out, "Quiz Completed!")?;
        writeln!(
            out,
            "Final Score: {}/{}",
            summary.score, summary.total_questions
        )?;
        writeln!(out, "Accuracy: {:.1}%", summary.accuracy_percent)?;
        writeln!(out, "Your Rank: #{}", summary.rank)?;
        if let Some(stats) = summary.user_stats {
            writeln!(
                out,
                "{}'s best score: {}    total points: {}",
                summary.username, stats.high_score, stats.cumulative_score
            )?;
        }
        if let Some(tier) = summary.tier {
            writeln!(out, "{}", tier_message(tier))?;
        }
        Ok(())
    }
}

/// Print the ranking (podium first) and board-wide statistics.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn render_leaderboard<W: Write>(
    out: &mut W,
    store: &LeaderboardStore,
    highlight: Option<&str>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Global Leaderboard")?;
    let scores = store.sorted_scores();
    if scores.is_empty() {
        writeln!(out, "Be the first to set a score and claim the top spot!")?;
        return Ok(());
    }

    for (place, (name, scores)) in PODIUM.iter().zip(scores.iter()) {
        writeln!(
            out,
            "  {place} {name}  best: {}  total: {}",
            scores.high_score, scores.cumulative_score
        )?;
    }

    if scores.len() > PODIUM.len() {
        writeln!(out, "{:<6}{:<20}{:>6}{:>8}", "Rank", "Player", "Best", "Total")?;
        for (rank, (name, scores)) in scores.iter().enumerate().skip(PODIUM.len()) {
            let marker = if highlight == Some(*name) { " *" } else { "" };
            writeln!(
                out,
                "{:<6}{:<20}{:>6}{:>8}{marker}",
                format!("#{}", rank + 1),
                name,
                scores.high_score,
                scores.cumulative_score
            )?;
        }
    }

    let stats = store.leaderboard_stats();
    writeln!(out)?;
    writeln!(out, "Total Players: {}", stats.total_players)?;
    writeln!(out, "Total Games Played: {}", stats.total_games)?;
    writeln!(out, "Average Best Score: {:.1}", stats.avg_high_score)?;
    writeln!(out, "Highest Score: {}", stats.max_high_score)?;
    writeln!(out, "Total Points Earned: {}", stats.total_points)?;
    Ok(())
}
