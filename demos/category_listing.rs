//! Category Listing
//!
//! This example mounts a category listing against an in-memory router and
//! content source, pages through it and prints what the presentation layer
//! would render.
//!
//! Key concepts:
//! - Environment pattern: router and content source are injected
//! - Commands update the page immediately; fetches settle afterwards
//! - The URL is written back through the router on every page change
//!
//! Run with: cargo run --example category_listing

use async_trait::async_trait;
use pagesync::config::{ListingConfig, Settings};
use pagesync::core::{FetchOutcome, Item, ResultSet, RouteState, Surface};
use pagesync::effects::{
    ContentSource, FetchRequest, ListingController, ListingEnv, NavigateRequest, NavigationError,
    Router,
};
use pagesync::ListingBuilder;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const POSTS: u64 = 23;

// Router that keeps the current route in memory
struct MemoryRouter {
    route: Mutex<RouteState>,
}

impl Router for MemoryRouter {
    fn route(&self) -> RouteState {
        self.route.lock().unwrap().clone()
    }

    fn set_query(&self, query: BTreeMap<String, String>) -> Result<(), NavigationError> {
        println!("  router: set query {query:?}");
        self.route.lock().unwrap().query.extend(query);
        Ok(())
    }

    fn navigate(&self, request: NavigateRequest) -> Result<(), NavigationError> {
        println!("  router: navigate to {} {:?}", request.route_id, request.params);
        self.route.lock().unwrap().params = request.params;
        Ok(())
    }
}

// Content source serving a fixed number of generated posts
struct MemorySource;

#[async_trait]
impl ContentSource for MemorySource {
    async fn query(&self, request: &FetchRequest) -> FetchOutcome {
        println!("  source: query {}", request.variables());
        let size = u64::from(request.page_size);
        let first = u64::from(request.page_index - 1) * size + 1;
        let last = (first + size - 1).min(POSTS);
        let items = (first..=last)
            .map(|id| Item {
                id,
                title: format!("Post {id}"),
                ..Item::default()
            })
            .collect();
        Ok(Some(ResultSet::new(items, POSTS)))
    }
}

#[derive(Clone)]
struct MemoryEnv {
    router: Arc<MemoryRouter>,
    source: Arc<MemorySource>,
}

impl ListingEnv for MemoryEnv {
    fn router(&self) -> &dyn Router {
        self.router.as_ref()
    }

    fn source(&self) -> Arc<dyn ContentSource> {
        self.source.clone()
    }
}

fn print_view(listing: &ListingController<MemoryEnv>) {
    let view = listing.view();
    let titles: Vec<&str> = view.items.iter().map(|item| item.title.as_str()).collect();
    println!(
        "  page {} ({}-{} of {}), rows options {:?}, loading: {}",
        view.current_page,
        view.item_from,
        view.item_to,
        view.total_count,
        view.rows_options,
        view.loading
    );
    println!("  items: {titles:?}");
}

#[tokio::main]
async fn main() {
    println!("=== Category Listing Example ===\n");

    let route = RouteState::new("blog-category", "/blog/:categoryslug/page/:page")
        .with_param("categoryslug", "news");
    let env = MemoryEnv {
        router: Arc::new(MemoryRouter {
            route: Mutex::new(route),
        }),
        source: Arc::new(MemorySource),
    };

    let config = ListingConfig::from_json(r#"{"postsPerPage": 5, "mediaSize": ""}"#).unwrap();
    let mut listing = ListingBuilder::new()
        .env(env)
        .surface(Surface::Category)
        .config(config)
        .settings(Settings::default())
        .mount()
        .unwrap();

    println!("Mounted listing {}", listing.id());
    listing.settle_next().await;
    print_view(&listing);

    println!("\nNext page:");
    listing.next().await;
    listing.settle_next().await;
    print_view(&listing);

    println!("\nTen rows per page:");
    listing.set_page_size(10).await.unwrap();
    listing.settle_next().await;
    print_view(&listing);

    println!("\nPrevious on the first page is a no-op: {}", !listing.previous().await);
    println!("Pages visited: {:?}", listing.pager().history().get_path());

    println!("\n=== Example Complete ===");
}
