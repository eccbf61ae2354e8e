//! Invitation content for one guest.
//!
//! Only the text is produced here. Page layout, fonts and QR image rendering
//! belong to whatever renders the document.

use crate::{
    core::{guest::get_guest, wedding::get_wedding},
    entities::{guest, wedding},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Serialize;

const HEADING: &str = "WEDDING INVITATION";
const BODY: &str = "We would be delighted to see you among the guests of honour at our celebration!";

/// Every piece of text printed on an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationContent {
    /// Title line
    pub heading: String,
    /// The couple, i.e. the wedding name
    pub couple: String,
    /// `dd.mm.yyyy`, when the wedding is dated
    pub date_line: Option<String>,
    /// Personal greeting
    pub greeting: String,
    /// Invitation text
    pub body: String,
    /// Text encoded in the QR code
    pub qr_payload: String,
    /// Suggested file name for the rendered document
    pub file_name: String,
}

/// Formats a date the way invitations print it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Builds the invitation text of `guest` for `wedding`.
///
/// The QR payload is `"{wedding} | {guest} | {dd.mm.yyyy}"`; the date part is
/// left out for an undated wedding.
#[must_use]
pub fn invitation_content(wedding: &wedding::Model, guest: &guest::Model) -> InvitationContent {
    let guest_name = guest.display_name();
    let date_line = wedding.date.map(format_date);

    let mut qr_payload = format!("{} | {guest_name}", wedding.name);
    if let Some(date) = &date_line {
        qr_payload.push_str(" | ");
        qr_payload.push_str(date);
    }

    InvitationContent {
        heading: HEADING.to_string(),
        couple: wedding.name.clone(),
        greeting: format!("Dear {guest_name}!"),
        body: BODY.to_string(),
        file_name: format!("Invitation_{guest_name}.pdf"),
        date_line,
        qr_payload,
    }
}

/// Loads a wedding and one of its guests and builds the invitation.
///
/// # Errors
/// `GuestNotFound` if the guest belongs to another wedding.
pub async fn load_invitation(
    db: &DatabaseConnection,
    wedding_id: i64,
    guest_id: i64,
) -> Result<InvitationContent> {
    let wedding = get_wedding(db, wedding_id).await?;
    let guest = get_guest(db, guest_id).await?;
    if guest.wedding_id != wedding.id {
        return Err(Error::GuestNotFound { id: guest_id });
    }
    Ok(invitation_content(&wedding, &guest))
}
