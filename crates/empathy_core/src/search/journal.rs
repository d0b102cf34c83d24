//! Filtering and ordering for the statement and gratitude lists.

use super::TextQuery;
use crate::model::gratitude::{GratitudeEntry, GratitudeKind};
use crate::model::statement::NvcStatement;
use crate::repo::Record;
use std::cmp::Reverse;

/// Gratitude list filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GratitudeFilter {
    #[default]
    All,
    Personal,
    Other,
}

impl GratitudeFilter {
    pub fn accepts(self, kind: GratitudeKind) -> bool {
        match self {
            GratitudeFilter::All => true,
            GratitudeFilter::Personal => kind == GratitudeKind::Personal,
            GratitudeFilter::Other => kind == GratitudeKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GratitudeCounts {
    pub personal: usize,
    pub other: usize,
}

/// Statements whose text fields contain `query`, in input order.
pub fn search_statements<'a>(items: &'a [NvcStatement], query: &str) -> Vec<&'a NvcStatement> {
    let query = TextQuery::new(query);
    items
        .iter()
        .filter(|statement| {
            query.matches_any(
                [
                    statement.title.as_str(),
                    statement.observation.as_str(),
                    statement.feeling.as_str(),
                    statement.need.as_str(),
                    statement.request.as_str(),
                ]
                .into_iter()
                .chain(statement.context.as_deref()),
            )
        })
        .collect()
}

/// Entries passing `filter` whose text fields contain `query`, in input order.
pub fn search_gratitude<'a>(
    items: &'a [GratitudeEntry],
    filter: GratitudeFilter,
    query: &str,
) -> Vec<&'a GratitudeEntry> {
    let query = TextQuery::new(query);
    items
        .iter()
        .filter(|entry| filter.accepts(entry.kind))
        .filter(|entry| {
            query.matches_any(
                [
                    entry.title.as_str(),
                    entry.action.as_str(),
                    entry.feeling.as_str(),
                    entry.need.as_str(),
                ]
                .into_iter()
                .chain(entry.context.as_deref())
                .chain(entry.person_name.as_deref()),
            )
        })
        .collect()
}

pub fn gratitude_counts(items: &[GratitudeEntry]) -> GratitudeCounts {
    items
        .iter()
        .fold(GratitudeCounts::default(), |mut counts, entry| {
            match entry.kind {
                GratitudeKind::Personal => counts.personal += 1,
                GratitudeKind::Other => counts.other += 1,
            }
            counts
        })
}

/// Sorts a copy by `date_modified`, newest first. Ties keep input order;
/// records without timestamps sort last.
pub fn most_recent_first<'a, T: Record>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a T> {
    let mut sorted: Vec<&T> = items.into_iter().collect();
    sorted.sort_by_key(|record| Reverse(record.timestamps().map(|(_, modified)| modified)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::{gratitude_counts, most_recent_first, search_gratitude, GratitudeFilter};
    use crate::model::gratitude::{GratitudeEntry, GratitudeKind};
    use crate::model::settings::Language;
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, kind: GratitudeKind, person: Option<&str>, minute: u32) -> GratitudeEntry {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, minute, 0).unwrap();
        GratitudeEntry {
            id: id.to_string(),
            kind,
            title: format!("Entry {id}"),
            action: "Walked the dog".to_string(),
            feeling: "relaxed".to_string(),
            need: "rest".to_string(),
            context: None,
            person_name: person.map(str::to_string),
            date_created: at,
            date_modified: at,
            language: Language::En,
            tags: Vec::new(),
        }
    }

    #[test]
    fn filter_and_query_combine() {
        let items = vec![
            entry("1", GratitudeKind::Personal, None, 0),
            entry("2", GratitudeKind::Other, Some("Rūta"), 1),
            entry("3", GratitudeKind::Other, Some("Jonas"), 2),
        ];

        let others = search_gratitude(&items, GratitudeFilter::Other, "");
        assert_eq!(others.len(), 2);

        let ruta = search_gratitude(&items, GratitudeFilter::All, "rūta");
        assert_eq!(ruta.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), ["2"]);

        let counts = gratitude_counts(&items);
        assert_eq!((counts.personal, counts.other), (1, 2));
    }

    #[test]
    fn most_recent_first_is_newest_first() {
        let items = vec![
            entry("old", GratitudeKind::Personal, None, 0),
            entry("new", GratitudeKind::Personal, None, 30),
            entry("mid", GratitudeKind::Personal, None, 15),
        ];
        let ids: Vec<&str> = most_recent_first(&items)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }
}
