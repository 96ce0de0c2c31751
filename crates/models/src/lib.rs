pub mod errors;
pub mod db;
pub mod user;
pub mod profile;
pub mod profile_experience;
pub mod profile_education;
pub mod post;
pub mod post_like;
pub mod post_comment;

#[cfg(test)]
mod tests;
