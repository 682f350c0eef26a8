mod add;
mod catalog;
mod list;
mod remove;
mod sync;
mod update;

pub use add::cmd_add_show;
pub use catalog::cmd_catalog;
pub use list::cmd_list_episodes;
pub use remove::cmd_remove_show;
pub use sync::cmd_sync;
pub use update::cmd_update_show;

use crate::clients::imdb::ImdbClient;
use crate::clients::youtube::YoutubeClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{Enricher, SyncService};

/// Build the sync engine for a command. Fails before any sync work when
/// the video search credential is missing.
async fn sync_service(
    config: &Config,
) -> anyhow::Result<(Store, SyncService<ImdbClient, YoutubeClient>)> {
    let store = Store::new(&config.general.database_path).await?;
    let feed = ImdbClient::new(&config.feed);
    let videos = YoutubeClient::from_config(&config.youtube)?;

    let service = SyncService::new(store.clone(), feed, Enricher::new(videos));
    Ok((store, service))
}
