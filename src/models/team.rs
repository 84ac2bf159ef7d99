//! Team colours, ranks and rankings.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three competing teams, identified by map colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Red,
    Blue,
    Green,
}

impl TeamColor {
    /// Canonical colour order. Also the tie-break order for equal scores.
    pub const ALL: [TeamColor; 3] = [TeamColor::Red, TeamColor::Blue, TeamColor::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamColor::Red => "red",
            TeamColor::Blue => "blue",
            TeamColor::Green => "green",
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TeamColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(TeamColor::Red),
            "blue" => Ok(TeamColor::Blue),
            "green" => Ok(TeamColor::Green),
            other => Err(format!(
                "unknown team colour '{}' (expected red, blue or green)",
                other
            )),
        }
    }
}

/// A value per team colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    pub red: T,
    pub blue: T,
    pub green: T,
}

impl<T> TeamMap<T> {
    pub fn new(red: T, blue: T, green: T) -> Self {
        Self { red, blue, green }
    }

    /// Build a map by evaluating `f` for every colour.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(TeamColor) -> T,
    {
        Self {
            red: f(TeamColor::Red),
            blue: f(TeamColor::Blue),
            green: f(TeamColor::Green),
        }
    }

    /// Iterate `(colour, value)` pairs in canonical colour order.
    pub fn iter(&self) -> impl Iterator<Item = (TeamColor, &T)> {
        TeamColor::ALL.into_iter().map(move |team| (team, &self[team]))
    }

    pub fn map<U, F>(&self, mut f: F) -> TeamMap<U>
    where
        F: FnMut(TeamColor, &T) -> U,
    {
        TeamMap::from_fn(|team| f(team, &self[team]))
    }
}

impl<T: Clone> TeamMap<T> {
    /// Same value for every team.
    pub fn splat(value: T) -> Self {
        Self {
            red: value.clone(),
            blue: value.clone(),
            green: value,
        }
    }
}

impl<T> Index<TeamColor> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: TeamColor) -> &T {
        match team {
            TeamColor::Red => &self.red,
            TeamColor::Blue => &self.blue,
            TeamColor::Green => &self.green,
        }
    }
}

impl<T> IndexMut<TeamColor> for TeamMap<T> {
    fn index_mut(&mut self, team: TeamColor) -> &mut T {
        match team {
            TeamColor::Red => &mut self.red,
            TeamColor::Blue => &mut self.blue,
            TeamColor::Green => &mut self.green,
        }
    }
}

/// Finishing position within a skirmish or a match. Serialized as `1`, `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rank {
    First,
    Second,
    Third,
}

impl Rank {
    pub const ALL: [Rank; 3] = [Rank::First, Rank::Second, Rank::Third];

    /// Numeric position (1 = winner).
    pub fn position(&self) -> u8 {
        match self {
            Rank::First => 1,
            Rank::Second => 2,
            Rank::Third => 3,
        }
    }

    /// The rank directly above this one, if any.
    pub fn above(&self) -> Option<Rank> {
        match self {
            Rank::First => None,
            Rank::Second => Some(Rank::First),
            Rank::Third => Some(Rank::Second),
        }
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.position()
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rank::First),
            2 => Ok(Rank::Second),
            3 => Ok(Rank::Third),
            other => Err(format!("rank must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::First => write!(f, "1st"),
            Rank::Second => write!(f, "2nd"),
            Rank::Third => write!(f, "3rd"),
        }
    }
}

/// An ordering of the three teams from first to third.
///
/// Describes a desired final outcome or a concrete skirmish finish. Only a
/// ranking where all three colours differ is meaningful; see [`Ranking::is_bijection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ranking {
    pub first: TeamColor,
    pub second: TeamColor,
    pub third: TeamColor,
}

impl Ranking {
    pub fn new(first: TeamColor, second: TeamColor, third: TeamColor) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// True when every colour appears exactly once.
    pub fn is_bijection(&self) -> bool {
        self.first != self.second && self.second != self.third && self.first != self.third
    }

    pub fn team_at(&self, rank: Rank) -> TeamColor {
        match rank {
            Rank::First => self.first,
            Rank::Second => self.second,
            Rank::Third => self.third,
        }
    }

    pub fn rank_of(&self, team: TeamColor) -> Option<Rank> {
        Rank::ALL.into_iter().find(|rank| self.team_at(*rank) == team)
    }

    /// Team-to-rank view of this ranking.
    pub fn placements(&self) -> TeamMap<Rank> {
        let mut placements = TeamMap::splat(Rank::Third);
        placements[self.second] = Rank::Second;
        placements[self.first] = Rank::First;
        placements
    }

    /// Rank teams by descending score. Equal scores keep canonical colour order.
    pub fn from_scores(scores: &TeamMap<i64>) -> Self {
        let mut order = TeamColor::ALL;
        order.sort_by(|a, b| scores[*b].cmp(&scores[*a]));
        Self::new(order[0], order[1], order[2])
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {} > {}", self.first, self.second, self.third)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_team_color_from_str() {
        assert_eq!("red".parse::<TeamColor>(), Ok(TeamColor::Red));
        assert_eq!(" Blue ".parse::<TeamColor>(), Ok(TeamColor::Blue));
        assert_eq!("GREEN".parse::<TeamColor>(), Ok(TeamColor::Green));
        assert!("purple".parse::<TeamColor>().is_err());
    }

    #[test]
    fn test_team_color_serialization() {
        let json = serde_json::to_string(&TeamColor::Green).unwrap();
        assert_eq!(json, "\"green\"");
    }

    #[test]
    fn test_team_map_index() {
        let mut vp = TeamMap::new(10, 20, 30);
        assert_eq!(vp[TeamColor::Blue], 20);

        vp[TeamColor::Green] += 5;
        assert_eq!(vp.green, 35);
    }

    #[test]
    fn test_team_map_iter_order() {
        let vp = TeamMap::new(1, 2, 3);
        let teams: Vec<_> = vp.iter().map(|(team, _)| team).collect();
        assert_eq!(teams, TeamColor::ALL.to_vec());
    }

    #[test]
    fn test_team_map_serialization_shape() {
        let vp = TeamMap::new(1000u32, 950, 900);
        let json = serde_json::to_value(vp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "red": 1000, "blue": 950, "green": 900 })
        );
    }

    #[test]
    fn test_rank_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Rank::Second).unwrap(), "2");
        let rank: Rank = serde_json::from_str("3").unwrap();
        assert_eq!(rank, Rank::Third);
        assert!(serde_json::from_str::<Rank>("4").is_err());
        assert!(serde_json::from_str::<Rank>("0").is_err());
    }

    #[test]
    fn test_rank_above() {
        assert_eq!(Rank::First.above(), None);
        assert_eq!(Rank::Second.above(), Some(Rank::First));
        assert_eq!(Rank::Third.above(), Some(Rank::Second));
    }

    #[test]
    fn test_ranking_bijection() {
        let valid = Ranking::new(TeamColor::Red, TeamColor::Blue, TeamColor::Green);
        assert!(valid.is_bijection());

        let duplicate = Ranking::new(TeamColor::Red, TeamColor::Red, TeamColor::Green);
        assert!(!duplicate.is_bijection());

        let wrapped = Ranking::new(TeamColor::Blue, TeamColor::Green, TeamColor::Blue);
        assert!(!wrapped.is_bijection());
    }

    #[test]
    fn test_ranking_placements() {
        let ranking = Ranking::new(TeamColor::Green, TeamColor::Red, TeamColor::Blue);
        let placements = ranking.placements();

        assert_eq!(placements.green, Rank::First);
        assert_eq!(placements.red, Rank::Second);
        assert_eq!(placements.blue, Rank::Third);
        assert_eq!(ranking.rank_of(TeamColor::Blue), Some(Rank::Third));
        assert_eq!(ranking.team_at(Rank::Second), TeamColor::Red);
    }

    #[test]
    fn test_ranking_from_scores() {
        let scores = TeamMap::new(150, 100, 75);
        let ranking = Ranking::from_scores(&scores);
        assert_eq!(
            ranking,
            Ranking::new(TeamColor::Red, TeamColor::Blue, TeamColor::Green)
        );

        let scores = TeamMap::new(10, 300, 200);
        let ranking = Ranking::from_scores(&scores);
        assert_eq!(
            ranking,
            Ranking::new(TeamColor::Blue, TeamColor::Green, TeamColor::Red)
        );
    }

    #[test]
    fn test_ranking_from_tied_scores_uses_color_order() {
        let scores = TeamMap::new(100, 100, 100);
        assert_eq!(
            Ranking::from_scores(&scores),
            Ranking::new(TeamColor::Red, TeamColor::Blue, TeamColor::Green)
        );

        let scores = TeamMap::new(50, 80, 80);
        assert_eq!(
            Ranking::from_scores(&scores),
            Ranking::new(TeamColor::Blue, TeamColor::Green, TeamColor::Red)
        );
    }

    #[test]
    fn test_ranking_display() {
        let ranking = Ranking::new(TeamColor::Red, TeamColor::Blue, TeamColor::Green);
        assert_eq!(format!("{}", ranking), "red > blue > green");
    }
}
