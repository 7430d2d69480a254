pub use mediator::DefaultAsyncMediator;

use crate::catalog::Catalog;

pub type AppMediator = DefaultAsyncMediator;

/// Register every document command and query against `catalog`
pub fn build_mediator(catalog: Catalog) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Commands
        .add_handler({
            let catalog = catalog.clone();
            move |cmd| {
                let catalog = catalog.clone();
                async move { crate::features::documents::commands::ingest::handle(catalog, cmd).await }
            }
        })
        .add_handler({
            let catalog = catalog.clone();
            move |cmd| {
                let catalog = catalog.clone();
                async move { crate::features::documents::commands::update::handle(catalog, cmd).await }
            }
        })
        .add_handler({
            let catalog = catalog.clone();
            move |cmd| {
                let catalog = catalog.clone();
                async move { crate::features::documents::commands::delete::handle(catalog, cmd).await }
            }
        })
        // Queries
        .add_handler({
            let catalog = catalog.clone();
            move |query| {
                let catalog = catalog.clone();
                async move { crate::features::documents::queries::list::handle(catalog, query).await }
            }
        })
        .add_handler({
            let catalog = catalog.clone();
            move |query| {
                let catalog = catalog.clone();
                async move { crate::features::documents::queries::get::handle(catalog, query).await }
            }
        })
        .add_handler({
            let catalog = catalog.clone();
            move |query| {
                let catalog = catalog.clone();
                async move { crate::features::documents::queries::content::handle(catalog, query).await }
            }
        })
        .build()
}
