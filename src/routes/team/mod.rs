use crate::types::error::{AppError, ErrorCategory};
use crate::types::response::{RedirectResult, StatusRedirect};

pub mod accept_invite;
pub mod create;
pub mod decline_invite;
pub mod delete;
pub mod detail;
pub mod edit;
pub mod join;
pub mod leave;
pub mod list;

pub(crate) fn team_page(team_id: i32) -> String {
    format!("/teams/{team_id}")
}

pub(crate) const TEAM_LIST_PAGE: &str = "/teams";

fn form_message(err: &AppError) -> String {
    match err {
        AppError::NotAMember => "You are not a member of this team".to_string(),
        AppError::NotLeader => "Only the team leader can manage join requests".to_string(),
        other => other.public_message(),
    }
}

/// Expected refusals go back to the page as an error status. Unknown ids,
/// missing auth and storage failures stay errors.
pub(crate) fn redirect_on_failure(err: AppError, location: &str) -> RedirectResult {
    match err.category() {
        ErrorCategory::Internal | ErrorCategory::NotFound | ErrorCategory::Authentication => Err(err),
        _ => Ok(StatusRedirect::error(location, form_message(&err))),
    }
}
