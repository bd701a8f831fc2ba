pub mod credential;
pub mod expense;
pub mod house;
pub mod invitation;
pub mod stay;
pub mod user;

pub use credential::{AuthCode, OneTimeCode, OtpKind};
pub use expense::Expense;
pub use house::House;
pub use invitation::{Invitation, InviteStatus};
pub use stay::Stay;
pub use user::User;
