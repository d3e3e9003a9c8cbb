use std::env;
use std::sync::Arc;

use recetario::client::{RecipeDraft, RecipePatch};
use recetario::{CatalogState, LogNotifier, RecipeCatalog, RecipeClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_page(state: &CatalogState) {
    println!(
        "Page {}/{} - {} recipe(s) total",
        state.page, state.total_pages, state.total
    );
    for recipe in &state.recipes {
        println!("  {}  {}", recipe.id, recipe.title);
    }
}

fn usage() -> ! {
    eprintln!("usage: recetario <command> [args]");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  list [page]                 show one page of the catalog");
    eprintln!("  search <term>               search by title, description or ingredient");
    eprintln!("  show <id>                   show one recipe in full");
    eprintln!("  add <title> [ingredient]... create a recipe");
    eprintln!("  rename <id> <title>         change a recipe's title");
    eprintln!("  remove <id>                 delete a recipe");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        env::var("RECIPES_API_URL").unwrap_or_else(|_| "http://localhost:3000/api".to_string());

    let api = Arc::new(RecipeClient::new(base_url));
    let catalog = Arc::new(RecipeCatalog::new(api, Arc::new(LogNotifier)));

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else { usage() };

    match command.as_str() {
        "list" => {
            if let Some(page) = args.get(1) {
                let Ok(page) = page.parse() else {
                    eprintln!("list: '{}' is not a page number", page);
                    std::process::exit(2);
                };
                catalog.set_page_number(page).await;
            } else {
                catalog.reload().await;
            }
            print_page(&catalog.snapshot());
        }
        "search" => {
            let Some(term) = args.get(1) else { usage() };
            catalog.set_search_term(term.clone()).await;
            print_page(&catalog.snapshot());
        }
        "show" => {
            let Some(id) = args.get(1) else { usage() };
            match catalog.get_by_id(id).await {
                Some(recipe) => {
                    println!("{}", recipe.title);
                    if let Some(description) = &recipe.description {
                        println!("{}", description);
                    }
                    for ingredient in &recipe.ingredients {
                        println!("  - {}", ingredient);
                    }
                    if let Some(instructions) = &recipe.instructions {
                        println!("{}", instructions);
                    }
                }
                None => std::process::exit(1),
            }
        }
        "add" => {
            let Some(title) = args.get(1) else { usage() };
            let draft = RecipeDraft {
                title: title.clone(),
                description: None,
                ingredients: args[2..].to_vec(),
                instructions: None,
            };
            match catalog.create(draft).await {
                Some(recipe) => println!("created {}", recipe.id),
                None => std::process::exit(1),
            }
        }
        "rename" => {
            let (Some(id), Some(title)) = (args.get(1), args.get(2)) else {
                usage()
            };
            let patch = RecipePatch {
                title: Some(title.clone()),
                ..Default::default()
            };
            match catalog.update(id, patch).await {
                Some(recipe) => println!("updated {}", recipe.id),
                None => std::process::exit(1),
            }
        }
        "remove" => {
            let Some(id) = args.get(1) else { usage() };
            if catalog.delete(id).await {
                println!("deleted {}", id);
            } else {
                std::process::exit(1);
            }
        }
        _ => usage(),
    }

    if catalog.snapshot().last_error.is_some() {
        std::process::exit(1);
    }

    Ok(())
}
