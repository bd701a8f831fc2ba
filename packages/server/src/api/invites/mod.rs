pub mod recover;

#[cfg(test)]
mod recover_test;

/// Cookie carrying an invite intent across the sign-up redirect boundary.
/// Written by the sign-up flow, consumed (read once, then deleted) by the
/// recovery endpoint. JSON: `{"houseId": ..., "email": ...}`.
pub const PENDING_INVITE_COOKIE: &str = "pending_house_invite";
