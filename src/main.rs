use log::error;
use recipe_browser::{
    AppCoordinator, BrowserConfig, FileStorage, ForkifyCatalog, Intent, Presenter, ViewModel,
};
use std::env;
use std::sync::Arc;

/// Prints every view-model as JSON
struct StdoutPresenter;

impl Presenter for StdoutPresenter {
    fn render(&mut self, view: ViewModel) {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to render view: {}", e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let query = args
        .get(1)
        .ok_or("Please provide a search query as an argument")?;
    let page = args
        .get(2)
        .map(|p| p.parse::<usize>())
        .transpose()?
        .unwrap_or(1);

    let config = BrowserConfig::load()?;
    let catalog = Arc::new(ForkifyCatalog::from_config(&config)?);
    let storage = Arc::new(FileStorage::new(&config.storage_dir));
    let mut app = AppCoordinator::new(catalog, storage, StdoutPresenter, &config);

    app.dispatch(Intent::SubmitQuery(query.clone())).await?;
    if page > 1 {
        app.dispatch(Intent::GotoPage(page)).await?;
    }

    Ok(())
}
