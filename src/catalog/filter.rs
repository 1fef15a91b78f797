//! Client-side marketplace filtering.
//!
//! A [`ShirtFilter`] is a conjunction of a free-text query and optional
//! equality facets. Filtering never reorders and never carries state between
//! calls: it is a pure function of the full record list and the filter.

use serde::{Deserialize, Serialize};

use crate::models::{KitType, ShirtRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShirtFilter {
    pub query: String,
    pub team: Option<String>,
    pub league: Option<String>,
    pub season: Option<String>,
    pub kit_type: Option<KitType>,
}

impl ShirtFilter {
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of criteria currently narrowing the results.
    pub fn active_count(&self) -> usize {
        [
            !self.query.is_empty(),
            facet(&self.team).is_some(),
            facet(&self.league).is_some(),
            facet(&self.season).is_some(),
            self.kit_type.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, shirt: &ShirtRecord) -> bool {
        self.matches_query(shirt)
            && facet_matches(facet(&self.team), shirt.metadata.team.as_deref())
            && facet_matches(facet(&self.league), shirt.metadata.league.as_deref())
            && facet_matches(facet(&self.season), shirt.metadata.season.as_deref())
            && self
                .kit_type
                .map_or(true, |kit| shirt.metadata.kit_type == Some(kit))
    }

    /// The matching records, in input order.
    pub fn apply<'a>(&self, shirts: &'a [ShirtRecord]) -> Vec<&'a ShirtRecord> {
        shirts.iter().filter(|shirt| self.matches(shirt)).collect()
    }

    pub fn apply_owned(&self, shirts: Vec<ShirtRecord>) -> Vec<ShirtRecord> {
        shirts.into_iter().filter(|shirt| self.matches(shirt)).collect()
    }

    fn matches_query(&self, shirt: &ShirtRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        shirt.name.to_lowercase().contains(&needle)
            || shirt.description.to_lowercase().contains(&needle)
    }
}

/// A blank facet is the same as an absent one.
fn facet(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn facet_matches(expected: Option<&str>, actual: Option<&str>) -> bool {
    match expected {
        Some(expected) => actual == Some(expected),
        None => true,
    }
}

/// Distinct seasons present in `shirts`, in first-seen order.
pub fn unique_seasons(shirts: &[ShirtRecord]) -> Vec<String> {
    let mut seasons: Vec<String> = Vec::new();
    for season in shirts
        .iter()
        .filter_map(|shirt| shirt.metadata.season.as_deref())
        .filter(|season| !season.is_empty())
    {
        if !seasons.iter().any(|seen| seen == season) {
            seasons.push(season.to_string());
        }
    }
    seasons
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::ShirtMetadata;

    fn shirt(name: &str, description: &str, kit_type: Option<KitType>) -> ShirtRecord {
        ShirtRecord {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.into(),
            description: description.into(),
            image_url: String::new(),
            back_image_url: None,
            label_image_url: None,
            user_id: "u1".into(),
            user_display_name: "Fan".into(),
            created_at: Utc::now(),
            metadata: ShirtMetadata {
                kit_type,
                ..Default::default()
            },
        }
    }

    fn with_meta(mut record: ShirtRecord, team: &str, league: &str, season: &str) -> ShirtRecord {
        record.metadata.team = Some(team.into());
        record.metadata.league = Some(league.into());
        record.metadata.season = Some(season.into());
        record
    }

    fn names(records: &[&ShirtRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn query_and_kit_type_are_conjoined() {
        let shirts = vec![
            shirt("Man United Home", "", Some(KitType::Home)),
            shirt("Man United Away", "", Some(KitType::Away)),
            shirt("Liverpool Home", "", Some(KitType::Home)),
        ];
        let filter = ShirtFilter {
            query: "united".into(),
            kit_type: Some(KitType::Home),
            ..Default::default()
        };

        assert_eq!(names(&filter.apply(&shirts)), vec!["Man United Home"]);
    }

    #[test]
    fn empty_filter_is_identity() {
        let shirts = vec![
            shirt("B", "", None),
            shirt("A", "", Some(KitType::Third)),
            shirt("C", "", None),
        ];
        let filter = ShirtFilter::default();
        assert!(filter.is_empty());
        assert_eq!(names(&filter.apply(&shirts)), vec!["B", "A", "C"]);
    }

    #[test]
    fn query_matches_name_or_description_case_insensitively() {
        let shirts = vec![
            shirt("Arsenal 1989", "Classic BRUISED banana away", None),
            shirt("Barcelona", "home kit", None),
            shirt("Banana Republic", "",  None),
        ];
        let filter = ShirtFilter {
            query: "BaNaNa".into(),
            ..Default::default()
        };

        let result = filter.apply(&shirts);
        assert_eq!(names(&result), vec!["Arsenal 1989", "Banana Republic"]);
        for record in result {
            let needle = filter.query.to_lowercase();
            assert!(
                record.name.to_lowercase().contains(&needle)
                    || record.description.to_lowercase().contains(&needle)
            );
        }
    }

    #[test]
    fn facets_require_exact_equality() {
        let shirts = vec![
            with_meta(shirt("One", "", None), "Liverpool", "Premier League", "2022-2023"),
            with_meta(shirt("Two", "", None), "Liverpool", "Premier League", "2021-2022"),
            with_meta(shirt("Three", "", None), "Napoli", "Serie A", "2022-2023"),
            shirt("Four", "", None),
        ];

        let by_season = ShirtFilter {
            season: Some("2022-2023".into()),
            ..Default::default()
        };
        assert_eq!(names(&by_season.apply(&shirts)), vec!["One", "Three"]);

        let by_team_and_season = ShirtFilter {
            team: Some("Liverpool".into()),
            season: Some("2022-2023".into()),
            ..Default::default()
        };
        assert_eq!(names(&by_team_and_season.apply(&shirts)), vec!["One"]);

        let case_differs = ShirtFilter {
            team: Some("liverpool".into()),
            ..Default::default()
        };
        assert!(case_differs.apply(&shirts).is_empty());
    }

    #[test]
    fn blank_facets_impose_no_constraint() {
        let shirts = vec![shirt("Only", "", None)];
        let filter = ShirtFilter {
            team: Some(String::new()),
            league: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.active_count(), 0);
        assert_eq!(filter.apply(&shirts).len(), 1);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let shirts = vec![shirt("Only", "", None)];
        let filter = ShirtFilter {
            query: "zzz".into(),
            ..Default::default()
        };
        assert!(filter.apply(&shirts).is_empty());
        assert!(filter.apply_owned(shirts).is_empty());
    }

    #[test]
    fn refiltering_depends_only_on_inputs() {
        let shirts = vec![
            shirt("Home One", "", Some(KitType::Home)),
            shirt("Away One", "", Some(KitType::Away)),
        ];
        let mut filter = ShirtFilter {
            kit_type: Some(KitType::Away),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&shirts)), vec!["Away One"]);

        filter.kit_type = Some(KitType::Home);
        assert_eq!(names(&filter.apply(&shirts)), vec!["Home One"]);

        filter.clear();
        assert_eq!(filter.apply(&shirts).len(), 2);
    }

    #[test]
    fn active_count_tracks_each_criterion() {
        let filter = ShirtFilter {
            query: "x".into(),
            team: Some("Roma".into()),
            league: None,
            season: Some("1999-2000".into()),
            kit_type: Some(KitType::Goalkeeper),
        };
        assert_eq!(filter.active_count(), 4);
    }

    #[test]
    fn seasons_are_unique_in_first_seen_order() {
        let shirts = vec![
            with_meta(shirt("A", "", None), "T", "L", "2022-2023"),
            with_meta(shirt("B", "", None), "T", "L", "2019-2020"),
            with_meta(shirt("C", "", None), "T", "L", "2022-2023"),
            shirt("D", "", None),
        ];
        assert_eq!(unique_seasons(&shirts), vec!["2022-2023", "2019-2020"]);
    }
}
