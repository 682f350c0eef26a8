pub mod imdb;
pub mod youtube;
