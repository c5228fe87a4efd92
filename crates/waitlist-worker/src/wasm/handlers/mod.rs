pub mod admin;
pub mod admin_auth;
pub mod migrations;
pub mod referrals;
