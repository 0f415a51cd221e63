//! Widget view models.
//!
//! State machines behind the interactive dialogs. They hold no I/O of their
//! own beyond the ports or callbacks handed to them, so the HTTP layer and
//! tests can drive them directly.

mod add_members_dialog;
mod check_in_dialog;

pub use add_members_dialog::{
    AddMembersDialog, MemberSubmission, NO_MATCH_MESSAGE, SEARCH_PROMPT_MESSAGE,
};
pub use check_in_dialog::{CheckInDialog, CheckInDraft, DialogSubmission, DEFAULT_INTENSITY};
