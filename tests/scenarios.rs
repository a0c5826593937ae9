//! End-to-end listing scenarios against fake host capabilities.

use pagesync::config::{ListingConfig, Settings};
use pagesync::core::{
    FetchError, FetchOutcome, FetchPhase, Item, ListingFilter, MergePolicy, Resolution,
    ResultSet, RouteState, Surface, PAGE_KEY,
};
use pagesync::effects::{
    ContentSource, FetchRequest, ListingController, ListingEnv, NavigateRequest, NavigationCall,
    NavigationError, Router, ScrollBehavior, Viewport,
};
use pagesync::ListingBuilder;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

const TOTAL: u64 = 100;

struct TestRouter {
    route: Mutex<RouteState>,
    calls: Mutex<Vec<NavigationCall>>,
    reject: bool,
}

impl TestRouter {
    fn new(route: RouteState) -> Self {
        Self {
            route: Mutex::new(route),
            calls: Mutex::new(Vec::new()),
            reject: false,
        }
    }

    fn calls(&self) -> Vec<NavigationCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Router for TestRouter {
    fn route(&self) -> RouteState {
        self.route.lock().unwrap().clone()
    }

    fn set_query(&self, query: BTreeMap<String, String>) -> Result<(), NavigationError> {
        self.calls
            .lock()
            .unwrap()
            .push(NavigationCall::SetQuery(query.clone()));
        if self.reject {
            return Err(NavigationError::Rejected {
                route_id: self.route().route_id,
                reason: "blocked".to_string(),
            });
        }
        self.route.lock().unwrap().query.extend(query);
        Ok(())
    }

    fn navigate(&self, request: NavigateRequest) -> Result<(), NavigationError> {
        self.calls
            .lock()
            .unwrap()
            .push(NavigationCall::Navigate(request.clone()));
        if self.reject {
            return Err(NavigationError::Rejected {
                route_id: request.route_id,
                reason: "blocked".to_string(),
            });
        }
        self.route.lock().unwrap().params = request.params;
        Ok(())
    }
}

/// Answers every page with generated items unless a page is scripted or
/// gated. Gated pages wait until the test releases them.
#[derive(Default)]
struct TestSource {
    requests: Mutex<Vec<FetchRequest>>,
    scripted: Mutex<HashMap<u32, FetchOutcome>>,
    gates: Mutex<HashMap<u32, oneshot::Receiver<FetchOutcome>>>,
}

impl TestSource {
    fn script(&self, page: u32, outcome: FetchOutcome) {
        self.scripted.lock().unwrap().insert(page, outcome);
    }

    fn gate(&self, page: u32) -> oneshot::Sender<FetchOutcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(page, rx);
        tx
    }

    fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for TestSource {
    async fn query(&self, request: &FetchRequest) -> FetchOutcome {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gates.lock().unwrap().remove(&request.page_index);
        if let Some(gate) = gate {
            return gate.await.unwrap_or(Err(FetchError::Dropped));
        }

        let scripted = self.scripted.lock().unwrap().remove(&request.page_index);
        scripted.unwrap_or_else(|| Ok(Some(page_of(request.page_index, request.page_size))))
    }
}

#[derive(Default)]
struct TestViewport {
    scrolls: Mutex<Vec<(f64, ScrollBehavior)>>,
}

impl Viewport for TestViewport {
    fn container_top(&self) -> Option<f64> {
        Some(-250.0)
    }

    fn scroll_offset(&self) -> f64 {
        900.0
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.lock().unwrap().push((top, behavior));
    }
}

#[derive(Clone)]
struct TestEnv {
    router: Arc<TestRouter>,
    source: Arc<TestSource>,
    viewport: Option<Arc<TestViewport>>,
}

impl TestEnv {
    fn new(route: RouteState) -> Self {
        Self {
            router: Arc::new(TestRouter::new(route)),
            source: Arc::new(TestSource::default()),
            viewport: None,
        }
    }

    fn with_viewport(mut self) -> Self {
        self.viewport = Some(Arc::new(TestViewport::default()));
        self
    }
}

impl ListingEnv for TestEnv {
    fn router(&self) -> &dyn Router {
        self.router.as_ref()
    }

    fn source(&self) -> Arc<dyn ContentSource> {
        self.source.clone()
    }

    fn viewport(&self) -> Option<&dyn Viewport> {
        self.viewport.as_deref().map(|v| v as &dyn Viewport)
    }
}

fn page_of(page: u32, size: u32) -> ResultSet {
    let first = u64::from(page - 1) * u64::from(size) + 1;
    let last = (u64::from(page) * u64::from(size)).min(TOTAL);
    let items = (first..=last)
        .map(|id| Item {
            id,
            title: format!("Post {id}"),
            ..Item::default()
        })
        .collect();
    ResultSet::new(items, TOTAL)
}

fn category_route(template: &str) -> RouteState {
    RouteState::new("blog-category", template).with_param("categoryslug", "news")
}

fn mount(env: &TestEnv, surface: Surface) -> ListingController<TestEnv> {
    ListingBuilder::new()
        .env(env.clone())
        .surface(surface)
        .mount()
        .unwrap()
}

fn first_item_id(controller: &ListingController<TestEnv>) -> Option<u64> {
    controller.view().items.first().map(|item| item.id)
}

#[tokio::test]
async fn path_template_navigates_with_page_param() {
    let env = TestEnv::new(category_route("/blog/page/:page"));
    let mut listing = mount(&env, Surface::Category);

    assert_eq!(listing.pagination().page(), 1);
    assert!(env.router.calls().is_empty());
    assert_eq!(listing.settle_next().await, Some(Resolution::Applied));

    assert!(listing.next().await);
    assert_eq!(listing.pagination().page(), 2);

    let calls = env.router.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        NavigationCall::Navigate(request) => {
            assert_eq!(request.params.get(PAGE_KEY).map(String::as_str), Some("2"));
            assert_eq!(
                request.params.get("categoryslug").map(String::as_str),
                Some("news")
            );
            assert!(!request.scroll);
        }
        other => panic!("expected path navigation, got {other:?}"),
    }

    assert_eq!(listing.settle_next().await, Some(Resolution::Applied));
    let requests = env.source.requests();
    assert!(requests.iter().any(|r| r.page_index == 2 && r.page_size == 10));
    assert_eq!(first_item_id(&listing), Some(11));
}

#[tokio::test]
async fn query_page_resize_resets_to_first_page() {
    let route = RouteState::new("search", "/search")
        .with_param("term", "boots")
        .with_query(PAGE_KEY, "2");
    let env = TestEnv::new(route);
    let mut listing = mount(&env, Surface::Search);

    assert_eq!(listing.pagination().page(), 2);
    assert_eq!(
        listing.filter(),
        &ListingFilter::Search {
            terms: "boots".to_string()
        }
    );
    listing.settle_next().await;

    listing.set_page_size(20).await.unwrap();
    let view = listing.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.page_size, 20);
    assert_eq!(view.selected_option, 20);

    assert_eq!(
        env.router.calls(),
        vec![NavigationCall::SetQuery(BTreeMap::from([(
            PAGE_KEY.to_string(),
            "1".to_string()
        )]))]
    );

    listing.settle_next().await;
    let last = env.source.requests().pop().unwrap();
    assert_eq!((last.page_index, last.page_size), (1, 20));
}

#[tokio::test]
async fn absent_result_keeps_previous_page_visible() {
    let env = TestEnv::new(category_route("/blog/:categoryslug"));
    env.source.script(2, Ok(None));
    let mut listing = mount(&env, Surface::Category);
    listing.settle_next().await;

    listing.next().await;
    assert_eq!(listing.settle_next().await, Some(Resolution::Retained));

    let view = listing.view();
    assert_eq!(view.current_page, 2);
    assert_eq!(view.items.first().map(|item| item.id), Some(1));
    assert!(view.stale);
    assert!(!view.loading);
    assert_eq!(view.phase, &FetchPhase::Loaded { page: 1 });
}

#[tokio::test]
async fn late_response_for_superseded_page_is_discarded() {
    let env = TestEnv::new(category_route("/blog/:categoryslug"));
    let mut listing = mount(&env, Surface::Category);
    listing.settle_next().await;

    let page_two = env.source.gate(2);
    let page_three = env.source.gate(3);
    listing.next().await;
    listing.next().await;
    assert_eq!(listing.in_flight(), 2);

    page_three.send(Ok(Some(page_of(3, 10)))).unwrap();
    assert_eq!(listing.settle_next().await, Some(Resolution::Applied));

    page_two.send(Ok(Some(page_of(2, 10)))).unwrap();
    assert_eq!(listing.settle_next().await, Some(Resolution::Discarded));

    assert_eq!(first_item_id(&listing), Some(21));
    assert!(!listing.view().stale);
    assert_eq!(listing.settle_next().await, None);
}

#[tokio::test]
async fn last_write_wins_lets_late_response_overwrite() {
    let env = TestEnv::new(category_route("/blog/:categoryslug"));
    let config = ListingConfig {
        merge_policy: MergePolicy::LastWriteWins,
        ..ListingConfig::default()
    };
    let mut listing = ListingBuilder::new()
        .env(env.clone())
        .surface(Surface::Category)
        .config(config)
        .mount()
        .unwrap();
    listing.settle_next().await;

    let page_two = env.source.gate(2);
    let page_three = env.source.gate(3);
    listing.next().await;
    listing.next().await;

    page_three.send(Ok(Some(page_of(3, 10)))).unwrap();
    listing.settle_next().await;
    page_two.send(Ok(Some(page_of(2, 10)))).unwrap();
    assert_eq!(listing.settle_next().await, Some(Resolution::Applied));

    assert_eq!(listing.pagination().page(), 3);
    assert_eq!(first_item_id(&listing), Some(11));
    assert!(listing.view().stale);
}

#[tokio::test]
async fn fetch_failure_is_surfaced() {
    let env = TestEnv::new(category_route("/blog/:categoryslug"));
    env.source
        .script(2, Err(FetchError::Source("timeout".to_string())));
    let mut listing = mount(&env, Surface::Category);
    listing.settle_next().await;

    listing.next().await;
    assert_eq!(listing.settle_next().await, Some(Resolution::Failed));

    let view = listing.view();
    assert_eq!(
        view.error,
        Some(&FetchError::Source("timeout".to_string()))
    );
    assert_eq!(view.items.first().map(|item| item.id), Some(1));

    listing.next().await;
    assert_eq!(listing.settle_next().await, Some(Resolution::Applied));
    assert!(listing.view().error.is_none());
}

#[tokio::test]
async fn previous_on_first_page_does_nothing() {
    let env = TestEnv::new(category_route("/blog/:categoryslug")).with_viewport();
    let mut listing = mount(&env, Surface::Category);
    listing.settle_next().await;

    assert!(!listing.previous().await);
    assert_eq!(listing.pagination().page(), 1);
    assert_eq!(listing.in_flight(), 0);
    assert!(env.router.calls().is_empty());
    assert_eq!(env.source.requests().len(), 1);
    assert!(env.viewport.as_ref().unwrap().scrolls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn page_changes_scroll_list_into_view() {
    let env = TestEnv::new(category_route("/blog/:categoryslug")).with_viewport();
    let mut listing = mount(&env, Surface::Category);
    let viewport = env.viewport.clone().unwrap();
    assert!(viewport.scrolls.lock().unwrap().is_empty());

    listing.next().await;
    listing.previous().await;

    assert_eq!(
        *viewport.scrolls.lock().unwrap(),
        vec![
            (550.0, ScrollBehavior::Smooth),
            (550.0, ScrollBehavior::Smooth)
        ]
    );
}

#[tokio::test]
async fn resize_on_first_page_does_not_scroll() {
    let env = TestEnv::new(category_route("/blog/:categoryslug")).with_viewport();
    let mut listing = mount(&env, Surface::Category);

    listing.set_page_size(30).await.unwrap();

    assert_eq!(env.router.calls().len(), 1);
    assert!(env.viewport.as_ref().unwrap().scrolls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn zero_page_size_is_rejected() {
    let env = TestEnv::new(category_route("/blog/:categoryslug"));
    let mut listing = mount(&env, Surface::Category);

    assert!(listing.set_page_size(0).await.is_err());
    assert_eq!(listing.pagination().page_size(), 10);
    assert!(env.router.calls().is_empty());
}

#[tokio::test]
async fn rejected_navigation_keeps_page_state() {
    let mut env = TestEnv::new(category_route("/blog/:categoryslug"));
    env.router = Arc::new(TestRouter {
        reject: true,
        ..TestRouter::new(category_route("/blog/:categoryslug"))
    });
    let mut listing = mount(&env, Surface::Category);
    listing.settle_next().await;

    assert!(listing.next().await);
    assert_eq!(listing.pagination().page(), 2);
    assert_eq!(listing.settle_next().await, Some(Resolution::Applied));
}

#[tokio::test]
async fn custom_domain_is_forwarded_to_source() {
    let route = category_route("/:customdomainslug/blog/:categoryslug")
        .with_param("customdomainslug", "shop");
    let env = TestEnv::new(route);
    let config = ListingConfig::from_json(
        r#"{"customDomains": "{\"shop\": \"shop.example.com\"}", "postsPerPage": 12}"#,
    )
    .unwrap();
    let mut listing = ListingBuilder::new()
        .env(env.clone())
        .surface(Surface::Category)
        .config(config)
        .settings(Settings::default())
        .mount()
        .unwrap();
    listing.settle_next().await;

    assert_eq!(listing.custom_domain(), Some("shop.example.com"));
    let request = env.source.requests().pop().unwrap();
    assert_eq!(request.custom_domain.as_deref(), Some("shop.example.com"));
    assert_eq!(request.page_size, 12);
    assert_eq!(listing.view().rows_options, vec![12, 24, 36, 48]);
}

#[tokio::test]
async fn unsettled_fetch_leaves_listing_loading() {
    let env = TestEnv::new(category_route("/blog/:categoryslug"));
    let _first = env.source.gate(1);
    let mut listing = mount(&env, Surface::Category);

    assert!(listing.drain_completions().is_empty());
    let view = listing.view();
    assert!(view.loading);
    assert!(view.items.is_empty());
    assert_eq!(view.item_from, 1);
    assert_eq!(view.item_to, 10);
}

#[tokio::test]
async fn drain_folds_in_every_finished_fetch() {
    let env = TestEnv::new(category_route("/blog/:categoryslug"));
    let mut listing = mount(&env, Surface::Category);
    listing.settle_next().await;

    let page_two = env.source.gate(2);
    let page_three = env.source.gate(3);
    listing.next().await;
    listing.next().await;

    page_two.send(Ok(Some(page_of(2, 10)))).unwrap();
    page_three.send(Ok(Some(page_of(3, 10)))).unwrap();
    for _ in 0..64 {
        tokio::task::yield_now().await;
    }

    let mut resolved = listing.drain_completions();
    resolved.sort_by_key(|resolution| format!("{resolution:?}"));
    assert_eq!(resolved, vec![Resolution::Applied, Resolution::Discarded]);
    assert_eq!(listing.in_flight(), 0);
    assert_eq!(first_item_id(&listing), Some(21));
    assert!(listing.drain_completions().is_empty());
}
