//! Presentation snapshots of the boards.
use leaderboard_core::Category;
use leaderboard_runtime::{BoardStatus, Leaderboard};

/// One ranked line of a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardRow {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub company: String,
    pub lap_time: String,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub category: Category,
    pub title: &'static str,
    pub status: BoardStatus,
    pub rows: Vec<BoardRow>,
    /// Entries not shown because of the row limit.
    pub hidden: usize,
}

impl BoardView {
    /// Snapshot of `board` showing at most `limit` rows.
    pub fn from_board(board: &Leaderboard, limit: usize) -> Self {
        let rows = board
            .ranked()
            .take(limit)
            .map(|(rank, entry)| BoardRow {
                rank,
                name: entry.name.clone(),
                company: entry.company.clone(),
                lap_time: entry.lap_time.to_string(),
                date: entry.date.clone(),
            })
            .collect::<Vec<_>>();

        Self {
            category: board.category,
            title: board.category.title(),
            status: board.status.clone(),
            hidden: board.entries.len().saturating_sub(rows.len()),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_core::{Entry, EntryId, EntryRecord, LapTime};

    fn board(laps: &[&str]) -> Leaderboard {
        let mut board = Leaderboard::new(Category::Staff);
        board.entries = laps
            .iter()
            .enumerate()
            .map(|(i, lap)| {
                Entry::new(
                    EntryId::new(format!("id{i}")),
                    EntryRecord {
                        name: format!("driver {i}"),
                        company: "Acme".into(),
                        lap_time: LapTime::from_text(*lap).unwrap(),
                        date: "2024-01-01".into(),
                    },
                )
            })
            .collect();
        board
    }

    #[test]
    fn rows_are_ranked_from_one() {
        let view = BoardView::from_board(&board(&["1:05.000", "1:50.000"]), 10);

        assert_eq!(view.title, "Staff Leaderboard");
        assert_eq!(view.rows[0].rank, 1);
        assert_eq!(view.rows[1].rank, 2);
        assert_eq!(view.rows[1].lap_time, "1:50.000");
        assert_eq!(view.hidden, 0);
    }

    #[test]
    fn limit_hides_trailing_rows() {
        let view = BoardView::from_board(&board(&["1:00.000", "1:01.000", "1:02.000"]), 2);

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.hidden, 1);
    }
}
