//! Plain text tables for the terminal

use crate::report::{GameRow, Report};
use crate::types::Seat;
use chrono::{DateTime, FixedOffset, Utc};

const LEADERBOARD_HEADERS: [&str; 5] = ["Rank", "Name", "Elo", "Wins", "Losses"];
const GAME_HEADERS: [&str; 4] = ["Player 1", "Score 1", "Player 2", "Score 2"];

/// Game date as shown in the history table, e.g. `3/4 at 6:30 PM`
pub fn format_game_date(date: &DateTime<Utc>, offset: &FixedOffset) -> String {
    date.with_timezone(offset)
        .format("%-m/%-d at %-I:%M %p")
        .to_string()
}

/// Date column header naming the zone the dates are shown in
pub fn date_header(offset: &FixedOffset) -> String {
    if offset.local_minus_utc() == 0 {
        "Date (UTC)".to_string()
    } else {
        format!("Date (UTC{offset})")
    }
}

/// Player cell: name with pre-game rating, winner marked with `*`
fn player_cell(game: &GameRow, seat: Seat) -> String {
    let (name, rating) = match seat {
        Seat::Player1 => (&game.player1, game.player1_rating_before),
        Seat::Player2 => (&game.player2, game.player2_rating_before),
    };
    let marker = if game.winner == Some(seat) { "*" } else { "" };
    format!("{marker}{name} ({rating})")
}

/// Lay out rows under headers with every column padded to its widest cell
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

/// Render both sections of the report
pub fn render_text(report: &Report, offset: FixedOffset) -> String {
    let leaderboard: Vec<Vec<String>> = report
        .leaderboard
        .iter()
        .map(|row| {
            vec![
                row.rank.to_string(),
                row.name.clone(),
                row.rating.to_string(),
                row.wins.to_string(),
                row.losses.to_string(),
            ]
        })
        .collect();

    let games: Vec<Vec<String>> = report
        .games
        .iter()
        .map(|game| {
            vec![
                format_game_date(&game.date, &offset),
                player_cell(game, Seat::Player1),
                game.score1.to_string(),
                player_cell(game, Seat::Player2),
                game.score2.to_string(),
            ]
        })
        .collect();

    let date_column = date_header(&offset);
    let mut game_headers = vec![date_column.as_str()];
    game_headers.extend(GAME_HEADERS);

    format!(
        "Player stats\n\n{}\nPast games\n\n{}",
        render_table(&LEADERBOARD_HEADERS, &leaderboard),
        render_table(&game_headers, &games)
    )
}
