use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateEntryParams {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddLineParams {
    pub line_order: i64,
    pub language: String, // "ko", "en", ... not constrained
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLineParams {
    pub new_content: String,
}
