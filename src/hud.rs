//! HUD text lines

/// Score line refreshed every tick while playing
pub fn score_line(score: i64) -> String {
    format!("Score: {}", score)
}

/// Terminal message. Winning and losing read the same.
pub fn game_over_line(score: i64) -> String {
    format!("Game Over! Final Score: {}", score)
}
