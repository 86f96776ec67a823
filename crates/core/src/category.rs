//! Leaderboard categories and the collections that hold them.

/// Which leaderboard an entry belongs to.
///
/// The category is never stored on an entry; it selects the collection the
/// entry is written to, so membership in a collection *is* the category.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    /// Internal staff.
    #[default]
    Staff,
    /// Clients and suppliers.
    Clients,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Staff, Category::Clients];

    /// Name of the storage collection backing this category.
    pub const fn collection(self) -> &'static str {
        match self {
            Category::Staff => "staff",
            Category::Clients => "clients",
        }
    }

    /// Maps a raw form selection onto a category.
    ///
    /// Only the exact value `staff` selects [`Category::Staff`]; every other
    /// selection, including an empty one, routes to [`Category::Clients`].
    pub fn from_selection(selection: &str) -> Self {
        if selection == Category::Staff.collection() {
            Category::Staff
        } else {
            Category::Clients
        }
    }

    /// Heading shown above the board.
    pub const fn title(self) -> &'static str {
        match self {
            Category::Staff => "Staff Leaderboard",
            Category::Clients => "Client & Supplier Leaderboard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_routes_everything_but_staff_to_clients() {
        assert_eq!(Category::from_selection("staff"), Category::Staff);
        assert_eq!(Category::from_selection("clients"), Category::Clients);
        assert_eq!(Category::from_selection("supplier"), Category::Clients);
        assert_eq!(Category::from_selection("Staff"), Category::Clients);
        assert_eq!(Category::from_selection(""), Category::Clients);
    }

    #[test]
    fn collection_names_match_display() {
        for category in Category::ALL {
            assert_eq!(category.collection(), category.to_string());
        }
    }
}
