pub use super::new_episode::Entity as NewEpisode;
pub use super::show::Entity as Show;
