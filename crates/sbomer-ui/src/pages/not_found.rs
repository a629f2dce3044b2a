use serde::Serialize;

use crate::table::TableAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundView {
    pub title: String,
    pub message: String,
    pub action_text: String,
    pub action: TableAction,
}

pub fn view(path: &str) -> NotFoundView {
    NotFoundView {
        title: "Page not found".to_string(),
        message: format!("Nothing lives at {}.", path),
        action_text: "Take me home".to_string(),
        action: TableAction::Navigate("/".to_string()),
    }
}
