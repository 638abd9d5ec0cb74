pub mod download_auth;
