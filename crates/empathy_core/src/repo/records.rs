//! [`Record`] bindings for the persisted journal types.

use super::collection::Record;
use crate::model::empathy_map::EmpathyMap;
use crate::model::exercise::CompletedExercise;
use crate::model::gratitude::GratitudeEntry;
use crate::model::statement::NvcStatement;
use crate::model::Timestamp;

macro_rules! dated_record {
    ($ty:ty) => {
        impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn timestamps(&self) -> Option<(Timestamp, Timestamp)> {
                Some((self.date_created, self.date_modified))
            }

            fn timestamps_mut(&mut self) -> Option<(&mut Timestamp, &mut Timestamp)> {
                Some((&mut self.date_created, &mut self.date_modified))
            }
        }
    };
}

dated_record!(NvcStatement);
dated_record!(GratitudeEntry);
dated_record!(EmpathyMap);

// Completion time is set once by the caller; re-completing replaces it as-is.
impl Record for CompletedExercise {
    fn id(&self) -> &str {
        &self.exercise_id
    }
}
