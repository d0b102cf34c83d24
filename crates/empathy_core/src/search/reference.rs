//! Lookup helpers over the static needs/emotions catalog.
//!
//! # Invariants
//! - Every helper filters by language first; entries in other languages are
//!   never returned.
//! - Name lookups are case-insensitive exact matches; searches are
//!   case-insensitive substring matches.

use super::{fold_text, TextQuery};
use crate::model::favorite::{FavoriteItem, ItemType};
use crate::model::reference::{Emotion, Need, NeedCategory, NeedState};
use crate::model::settings::Language;
use std::cmp::Reverse;

/// Supplier of the immutable reference lists, for every language.
pub trait ReferenceCatalog {
    fn needs(&self) -> &[Need];
    fn emotions(&self) -> &[Emotion];
}

/// Catalog held in memory, typically decoded from bundled JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    pub needs: Vec<Need>,
    pub emotions: Vec<Emotion>,
}

impl StaticCatalog {
    pub fn new(needs: Vec<Need>, emotions: Vec<Emotion>) -> Self {
        Self { needs, emotions }
    }

    /// Decodes catalog tables from JSON arrays.
    pub fn from_json(needs: &str, emotions: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            needs: serde_json::from_str(needs)?,
            emotions: serde_json::from_str(emotions)?,
        })
    }
}

impl ReferenceCatalog for StaticCatalog {
    fn needs(&self) -> &[Need] {
        &self.needs
    }

    fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }
}

pub fn needs_in(needs: &[Need], language: Language) -> impl Iterator<Item = &Need> {
    needs.iter().filter(move |need| need.language == language)
}

pub fn emotions_in(emotions: &[Emotion], language: Language) -> impl Iterator<Item = &Emotion> {
    emotions
        .iter()
        .filter(move |emotion| emotion.language == language)
}

pub fn needs_by_category(needs: &[Need], category: NeedCategory, language: Language) -> Vec<&Need> {
    needs_in(needs, language)
        .filter(|need| need.category == category)
        .collect()
}

pub fn emotions_by_need_state(
    emotions: &[Emotion],
    need_state: NeedState,
    language: Language,
) -> Vec<&Emotion> {
    emotions_in(emotions, language)
        .filter(|emotion| emotion.need_state == need_state)
        .collect()
}

pub fn find_need_by_name<'a>(
    needs: &'a [Need],
    name: &str,
    language: Language,
) -> Option<&'a Need> {
    let wanted = fold_text(name);
    needs_in(needs, language).find(|need| fold_text(&need.name) == wanted)
}

pub fn find_emotion_by_name<'a>(
    emotions: &'a [Emotion],
    name: &str,
    language: Language,
) -> Option<&'a Emotion> {
    let wanted = fold_text(name);
    emotions_in(emotions, language).find(|emotion| fold_text(&emotion.name) == wanted)
}

/// Needs whose name, definition or any example contains `query`.
pub fn search_needs<'a>(needs: &'a [Need], query: &str, language: Language) -> Vec<&'a Need> {
    let query = TextQuery::new(query);
    needs_in(needs, language)
        .filter(|need| {
            query.matches_any(
                [need.name.as_str(), need.definition.as_str()]
                    .into_iter()
                    .chain(need.examples.iter().map(String::as_str)),
            )
        })
        .collect()
}

/// Emotions whose name or description contains `query`.
pub fn search_emotions<'a>(
    emotions: &'a [Emotion],
    query: &str,
    language: Language,
) -> Vec<&'a Emotion> {
    let query = TextQuery::new(query);
    emotions_in(emotions, language)
        .filter(|emotion| query.matches_any([emotion.name.as_str(), emotion.description.as_str()]))
        .collect()
}

/// Reference item a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteTarget<'a> {
    Need(&'a Need),
    Emotion(&'a Emotion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFavorite<'a> {
    pub favorite: &'a FavoriteItem,
    pub target: FavoriteTarget<'a>,
}

/// Joins favorites with catalog entries in `language`, newest first.
///
/// Favorites with no entry in that language are skipped, not reported.
pub fn resolve_favorites<'a, C: ReferenceCatalog + ?Sized>(
    favorites: &'a [FavoriteItem],
    catalog: &'a C,
    language: Language,
) -> Vec<ResolvedFavorite<'a>> {
    let mut resolved: Vec<ResolvedFavorite<'a>> = favorites
        .iter()
        .filter_map(|favorite| {
            let target = match favorite.item_type {
                ItemType::Need => needs_in(catalog.needs(), language)
                    .find(|need| need.id == favorite.item_id)
                    .map(FavoriteTarget::Need),
                ItemType::Emotion => emotions_in(catalog.emotions(), language)
                    .find(|emotion| emotion.id == favorite.item_id)
                    .map(FavoriteTarget::Emotion),
            }?;
            Some(ResolvedFavorite { favorite, target })
        })
        .collect();
    resolved.sort_by_key(|entry| Reverse(entry.favorite.date_added));
    resolved
}

#[cfg(test)]
mod tests {
    use super::{
        emotions_by_need_state, find_need_by_name, needs_by_category, resolve_favorites,
        search_needs, FavoriteTarget, StaticCatalog,
    };
    use crate::model::favorite::{FavoriteItem, ItemType};
    use crate::model::reference::{Emotion, EmotionCategory, Need, NeedCategory, NeedState, Source};
    use crate::model::settings::Language;
    use chrono::{TimeZone, Utc};

    fn need(id: &str, name: &str, category: NeedCategory, language: Language) -> Need {
        Need {
            id: id.to_string(),
            name: name.to_string(),
            definition: format!("{name} as a universal need"),
            examples: vec!["being heard".to_string()],
            category,
            synonyms: None,
            language,
            source: Source::Cnvc,
        }
    }

    fn emotion(id: &str, name: &str, need_state: NeedState, language: Language) -> Emotion {
        Emotion {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("feeling {name}"),
            related_feelings: Vec::new(),
            category: EmotionCategory::Joyful,
            need_state,
            intensity: Some(5),
            context: None,
            language,
            source: Source::Cnvc,
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(
            vec![
                need("trust-en", "Trust", NeedCategory::Connection, Language::En),
                need("rest-en", "Rest", NeedCategory::PhysicalWellBeing, Language::En),
                need("trust-lt", "Pasitikėjimas", NeedCategory::Rysys, Language::Lt),
            ],
            vec![
                emotion("glad-en", "Glad", NeedState::Met, Language::En),
                emotion("tired-en", "Tired", NeedState::Unmet, Language::En),
                emotion("glad-lt", "Linksmas", NeedState::Met, Language::Lt),
            ],
        )
    }

    #[test]
    fn helpers_only_return_entries_in_language() {
        let catalog = catalog();

        let connection = needs_by_category(&catalog.needs, NeedCategory::Connection, Language::En);
        assert_eq!(connection.len(), 1);
        assert_eq!(connection[0].id, "trust-en");

        let met = emotions_by_need_state(&catalog.emotions, NeedState::Met, Language::Lt);
        assert_eq!(met.len(), 1);
        assert_eq!(met[0].id, "glad-lt");

        assert!(find_need_by_name(&catalog.needs, "Trust", Language::Lt).is_none());
    }

    #[test]
    fn find_by_name_ignores_case() {
        let catalog = catalog();
        let found = find_need_by_name(&catalog.needs, "  pasitikėjimas ", Language::Lt)
            .expect("need should be found");
        assert_eq!(found.id, "trust-lt");
    }

    #[test]
    fn search_matches_definition_and_examples() {
        let catalog = catalog();
        assert_eq!(search_needs(&catalog.needs, "HEARD", Language::En).len(), 2);
        let hits = search_needs(&catalog.needs, "rest as", Language::En);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "rest-en");
        assert_eq!(search_needs(&catalog.needs, "", Language::Lt).len(), 1);
    }

    #[test]
    fn resolve_favorites_sorts_newest_first_and_skips_other_language() {
        let catalog = catalog();
        let favorites = vec![
            FavoriteItem::new(
                "trust-en",
                ItemType::Need,
                Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            ),
            FavoriteItem::new(
                "tired-en",
                ItemType::Emotion,
                Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
            ),
            FavoriteItem::new(
                "trust-lt",
                ItemType::Need,
                Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            ),
            // Same id under the wrong kind resolves to nothing.
            FavoriteItem::new(
                "glad-en",
                ItemType::Need,
                Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap(),
            ),
        ];

        let resolved = resolve_favorites(&favorites, &catalog, Language::En);
        assert_eq!(resolved.len(), 2);
        assert!(matches!(
            resolved[0].target,
            FavoriteTarget::Emotion(found) if found.id == "tired-en"
        ));
        assert!(matches!(
            resolved[1].target,
            FavoriteTarget::Need(found) if found.id == "trust-en"
        ));
    }

    #[test]
    fn catalog_decodes_from_json() {
        let needs = r#"[{"id":"n1","name":"Trust","definition":"d","examples":[],
            "category":"Connection","language":"en","source":"CNVC"}]"#;
        let emotions = r#"[{"id":"e1","name":"Glad","description":"d","relatedFeelings":[],
            "category":"Joyful","needState":"met","intensity":3,"language":"en","source":"IEVA"}]"#;
        let catalog = StaticCatalog::from_json(needs, emotions).expect("catalog should decode");
        assert_eq!(catalog.needs[0].category, NeedCategory::Connection);
        assert_eq!(catalog.emotions[0].source, Source::Ieva);
    }
}
