use crate::config::Config;
use crate::db::Store;

pub async fn cmd_remove_show(config: &Config, name: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(show) = store.get_show_by_name(name).await? else {
        println!("Show '{name}' not found in watchlist.");
        return Ok(());
    };

    println!("Remove '{}' (ID: {}) and its pending episodes?", show.name, show.id);
    println!("Enter 'y' to confirm, anything else to cancel:");

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim().eq_ignore_ascii_case("y") {
        if store.remove_show(name).await? {
            println!("✓ Removed: {}", show.name);
        } else {
            println!("Failed to remove show.");
        }
    } else {
        println!("Cancelled.");
    }

    Ok(())
}
