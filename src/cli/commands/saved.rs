//! List a user's saved recipes

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_saved(config: &Config, email: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(user) = store.get_user_by_email(email).await? else {
        println!("No user registered with {email}.");
        return Ok(());
    };

    let recipes = store.list_saved_recipes(user.id).await?;
    if recipes.is_empty() {
        println!("{} has no saved recipes.", user.name);
        return Ok(());
    }

    println!("Saved recipes for {} ({} total)", user.name, recipes.len());
    println!("{:-<70}", "");

    for recipe in recipes {
        println!("• {}", recipe.dish_name);
        println!(
            "  ID: {} | {} ingredients | {} steps",
            recipe.id,
            recipe.ingredients.len(),
            recipe.instructions.len()
        );
        if let Some(photo) = recipe.dish_photo {
            println!("  {photo}");
        }
    }

    Ok(())
}
