use crate::model::EntityDetail;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadRoster { limit: u16 },
    LoadCategories,
    /// `cached` is the roster's copy of the detail, when there is one
    LoadDetail {
        name: String,
        cached: Option<EntityDetail>,
    },
    StartTransition { ticket: u64 },
    PlayCry { name: String, url: String },
}
