//! Immutable NVC reference data shapes.
//!
//! The bilingual content tables live outside this crate; these types only
//! describe what a catalog hands to the core.

use super::settings::Language;
use super::validation::ValidationError;
use serde::{Deserialize, Serialize};

pub const INTENSITY_MIN: u8 = 1;
pub const INTENSITY_MAX: u8 = 10;

/// Where a reference entry was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Source {
    Cnvc,
    Ieva,
    Roland,
    Custom,
}

/// Whether an emotion arises when needs are met or unmet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedState {
    Met,
    Unmet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedCategory {
    Connection,
    #[serde(rename = "Physical Well-Being")]
    PhysicalWellBeing,
    Autonomy,
    Meaning,
    Peace,
    Play,
    Honesty,
    #[serde(rename = "Ryšys")]
    Rysys,
    #[serde(rename = "Fizinė gerovė")]
    FizineGerove,
    Prisilietimas,
    Harmonija,
    #[serde(rename = "Prasmė")]
    Prasme,
    Atvirumas,
    #[serde(rename = "Žaidimas")]
    Zaidimas,
    #[serde(rename = "Autentiškumas")]
    Autentiskumas,
    Taika,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionCategory {
    // Needs met.
    Affectionate,
    Engaged,
    Hopeful,
    Confident,
    Excited,
    Grateful,
    Inspired,
    Joyful,
    Exhilarated,
    Peaceful,
    Refreshed,
    // Needs unmet.
    Afraid,
    Annoyed,
    Angry,
    Aversion,
    Confused,
    Disconnected,
    Disquiet,
    Embarrassed,
    Fatigue,
    Pain,
    Sad,
    Tense,
    Vulnerable,
    Yearning,
    // Lithuanian, needs met.
    #[serde(rename = "Ramybė")]
    Ramybe,
    #[serde(rename = "Laimė")]
    Laime,
    Smalsumas,
    #[serde(rename = "Pasitikėjimas")]
    Pasitikejimas,
    Atjauta,
    Atgaiva,
    Gyvybingumas,
    #[serde(rename = "Dėkingumas")]
    Dekingumas,
    Mylintis,
    Palaima,
    #[serde(rename = "Džiaugsmas")]
    Dziaugsmas,
    #[serde(rename = "Įsitraukęs")]
    Isitraukes,
    #[serde(rename = "Atsigavęs")]
    Atsigaves,
    Taikus,
    #[serde(rename = "Įkvėptas")]
    Ikveptas,
    Viltingas,
    Sujaudintas,
    // Lithuanian, needs unmet.
    Nuovargis,
    #[serde(rename = "Sumišimas")]
    Sumisimas,
    #[serde(rename = "Pažeidžiamumas")]
    Pazeidziamumas,
    #[serde(rename = "Liūdesys")]
    Liudesys,
    #[serde(rename = "Baimė")]
    Baime,
    Skausmas,
    Nerimas,
    Susierzinimas,
    Agitacija,
    Pavydas,
    #[serde(rename = "Gėda")]
    Geda,
    Pyktis,
    Neapykanta,
    Nuobodulys,
    #[serde(rename = "Sumišęs")]
    Sumises,
    #[serde(rename = "Įtampa")]
    Itampa,
    Neramus,
    #[serde(rename = "Išsigandęs")]
    Issigandes,
    #[serde(rename = "Susigėdęs")]
    Susigedes,
    #[serde(rename = "Atsiskyręs")]
    Atsiskyres,
    #[serde(rename = "Susierzinęs")]
    Susierzines,
    Antipatija,
    Piktas,
    Ilgesys,
}

/// A universal human need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Need {
    pub id: String,
    pub name: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub category: NeedCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    pub language: Language,
    pub source: Source,
}

/// A feeling linked to met or unmet needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emotion {
    pub id: String,
    pub name: String,
    pub description: String,
    pub related_feelings: Vec<String>,
    pub category: EmotionCategory,
    pub need_state: NeedState,
    /// 1 (faint) to 10 (overwhelming) when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub language: Language,
    pub source: Source,
}

impl Emotion {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.intensity {
            Some(value) if !(INTENSITY_MIN..=INTENSITY_MAX).contains(&value) => {
                Err(ValidationError::OutOfRange {
                    entity: "emotion",
                    field: "intensity",
                    value: i64::from(value),
                    min: i64::from(INTENSITY_MIN),
                    max: i64::from(INTENSITY_MAX),
                })
            }
            _ => Ok(()),
        }
    }
}
