//! Reference lists offered by the team and league pickers.

use serde::Serialize;

use crate::models::KitType;

pub const LEAGUES: &[&str] = &[
    "Premier League",
    "La Liga",
    "Serie A",
    "Bundesliga",
    "Ligue 1",
    "Eredivisie",
    "Primeira Liga",
    "MLS",
    "Championship",
    "Scottish Premiership",
];

/// Teams grouped by league, in display order.
pub const TEAMS: &[(&str, &[&str])] = &[
    (
        "Premier League",
        &[
            "Arsenal",
            "Aston Villa",
            "Chelsea",
            "Liverpool",
            "Manchester City",
            "Manchester United",
            "Tottenham Hotspur",
        ],
    ),
    ("La Liga", &["Barcelona", "Real Madrid", "Atletico Madrid"]),
    (
        "Serie A",
        &["AC Milan", "Inter Milan", "Juventus", "Napoli", "Roma"],
    ),
    (
        "Bundesliga",
        &["Bayern Munich", "Borussia Dortmund", "RB Leipzig"],
    ),
];

pub fn all_teams() -> impl Iterator<Item = &'static str> {
    TEAMS.iter().flat_map(|(_, teams)| teams.iter().copied())
}

pub fn league_of(team: &str) -> Option<&'static str> {
    TEAMS
        .iter()
        .find(|(_, teams)| teams.contains(&team))
        .map(|(league, _)| *league)
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamGroup {
    pub league: &'static str,
    pub teams: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct KitTypeOption {
    pub value: KitType,
    pub label: &'static str,
}

/// Everything the metadata pickers offer, in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub leagues: &'static [&'static str],
    pub teams: Vec<TeamGroup>,
    pub kit_types: Vec<KitTypeOption>,
}

pub fn reference_data() -> ReferenceData {
    ReferenceData {
        leagues: LEAGUES,
        teams: TEAMS
            .iter()
            .map(|&(league, teams)| TeamGroup { league, teams })
            .collect(),
        kit_types: KitType::ALL
            .into_iter()
            .map(|value| KitTypeOption {
                value,
                label: value.display_name(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_grouped_league_is_listed() {
        for (league, _) in TEAMS {
            assert!(LEAGUES.contains(league), "{league} missing from LEAGUES");
        }
    }

    #[test]
    fn teams_map_back_to_their_league() {
        assert_eq!(all_teams().count(), 18);
        assert_eq!(league_of("Napoli"), Some("Serie A"));
        assert_eq!(league_of("Celtic"), None);
    }

    #[test]
    fn reference_data_labels_kit_types() {
        let data = reference_data();
        assert_eq!(data.teams.len(), TEAMS.len());
        let special = data
            .kit_types
            .iter()
            .find(|option| option.value == KitType::Special)
            .unwrap();
        assert_eq!(special.label, "Special Edition");

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["kitTypes"][0]["value"], "home");
        assert_eq!(json["teams"][1]["league"], "La Liga");
    }
}
