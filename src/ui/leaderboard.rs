use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::{
    model::{leaderboard::Leaderboard, player::PlayerQueueRecord, ranked::Tier},
    service::ranking::winrate_percent,
};

pub fn tier_color(tier: Tier) -> Color {
    let (r, g, b) = match tier {
        Tier::Iron => (0xA1, 0x9D, 0x94),
        Tier::Bronze => (0xCD, 0x7F, 0x32),
        Tier::Silver => (0xC0, 0xC0, 0xC0),
        Tier::Gold => (0xFF, 0xD7, 0x00),
        Tier::Platinum => (0x00, 0xE6, 0xE6),
        Tier::Emerald => (0x2E, 0xCC, 0x71),
        Tier::Diamond => (0xB3, 0x66, 0xFF),
        Tier::Master => (0xE6, 0xB8, 0x00),
        Tier::Grandmaster => (0xFF, 0x33, 0x33),
        Tier::Challenger => (0x1A, 0x1A, 0xFF),
        Tier::Unranked => (0x66, 0x66, 0x66),
    };
    Color::Rgb { r, g, b }
}

pub fn rank_label(record: &PlayerQueueRecord) -> String {
    match record.division {
        Some(division) if record.tier.is_ranked() => format!("{} {}", record.tier, division),
        _ => record.tier.to_string(),
    }
}

pub fn format_row(position: usize, record: &PlayerQueueRecord) -> String {
    let mut row = format!(
        "{:>3}. {:<24} {:<14} {:>3} LP  {:>3}W {:>3}L ({:>3.0}%)  Lv {:<4} {:>5} pts",
        position,
        format!("{}#{}", record.name, record.tag_line),
        rank_label(record),
        record.league_points,
        record.wins,
        record.losses,
        winrate_percent(record.wins, record.losses),
        record.level,
        record.score,
    );
    if record.hot_streak {
        row.push_str("  hot streak");
    }
    row
}

/// Writes the leaderboard, one section per queue. Colors follow the tier when `color` is set.
pub fn print_leaderboard<W: Write>(out: &mut W, board: &Leaderboard, color: bool) -> io::Result<()> {
    if board.all_failed() {
        writeln!(
            out,
            "No players loaded, {} roster entries failed. Check the log for errors.",
            board.skipped
        )?;
        return Ok(());
    }
    if board.is_empty() {
        writeln!(
            out,
            "No ranked placements to show. Add players to the roster or use --queue-mode solo to list unranked players."
        )?;
        return Ok(());
    }

    for group in &board.groups {
        if color {
            queue!(out, SetAttribute(Attribute::Bold), Print(group.title()), SetAttribute(Attribute::Reset))?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", group.title())?;
        }
        writeln!(out, "{}", "=".repeat(group.title().len()))?;

        for (index, record) in group.players.iter().enumerate() {
            let row = format_row(index + 1, record);
            if color {
                queue!(out, SetForegroundColor(tier_color(record.tier)), Print(row), ResetColor)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", row)?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "Last update: {}", board.generated_at.format("%Y-%m-%d %H:%M UTC"))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::{
        ids::{Puuid, QueueType},
        ranked::Division,
    };

    fn gold() -> PlayerQueueRecord {
        PlayerQueueRecord {
            name: "Fartinete".into(),
            tag_line: "EUW".into(),
            puuid: Puuid::from("p"),
            level: 100,
            icon_id: 1,
            queue_type: Some(QueueType::solo_duo()),
            tier: Tier::Gold,
            division: Some(Division::II),
            league_points: 40,
            wins: 30,
            losses: 20,
            hot_streak: true,
            veteran: false,
            fresh_blood: false,
            score: 670,
        }
    }

    #[test]
    fn row_shows_rank_winrate_and_score() {
        let row = format_row(1, &gold());
        assert!(row.starts_with("  1. Fartinete#EUW"));
        assert!(row.contains("GOLD II"));
        assert!(row.contains("( 60%)"));
        assert!(row.contains("670 pts"));
        assert!(row.ends_with("hot streak"));
    }

    #[test]
    fn unranked_label_has_no_division() {
        let mut record = gold();
        record.tier = Tier::Unranked;
        assert_eq!(rank_label(&record), "UNRANKED");
    }

    #[test]
    fn plain_output_lists_groups() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 20, 15, 0).unwrap();
        let board = Leaderboard::from_records(at, vec![gold()]);

        let mut out = Vec::new();
        print_leaderboard(&mut out, &board, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Solo 5v5\n========\n"));
        assert!(text.contains("Last update: 2025-06-01 20:15 UTC"));
    }

    fn render(board: &Leaderboard) -> String {
        let mut out = Vec::new();
        print_leaderboard(&mut out, board, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_board_without_failures_mentions_placements() {
        let board = Leaderboard::from_records(Utc::now(), Vec::new());
        assert!(render(&board).starts_with("No ranked placements"));
    }

    #[test]
    fn empty_board_after_failures_points_to_the_log() {
        let board = Leaderboard {
            skipped: 3,
            ..Leaderboard::from_records(Utc::now(), Vec::new())
        };
        assert_eq!(render(&board), "No players loaded, 3 roster entries failed. Check the log for errors.\n");
    }

    #[test]
    fn tier_colors_match_palette() {
        assert_eq!(tier_color(Tier::Gold), Color::Rgb { r: 255, g: 215, b: 0 });
        assert_eq!(tier_color(Tier::Unranked), Color::Rgb { r: 102, g: 102, b: 102 });
    }
}
