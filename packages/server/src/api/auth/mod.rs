pub mod confirm;
pub mod login;
pub mod logout;
pub mod magic_link;
pub mod signup;
pub mod whoami;
