//! Listing controller: runs a [`Pager`] against a host environment.

use super::env::ListingEnv;
use super::fetch::{FetchCompletion, FetchRequest};
use super::navigation::navigate_to;
use super::scroll::restore_scroll;
use crate::config::{ListingConfig, MediaSize, Settings};
use crate::core::{
    custom_domain, initial_page, rows_options, FetchError, FetchPhase, FetchTicket, Item,
    ListingFilter, PageCommand, Pager, PaginationError, PaginationState, Resolution,
    ScrollTrigger, State, Surface,
};
use crate::error::{ListingError, Result};
use std::num::NonZeroU32;
use stillwater::effect::Effect;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Everything the presentation layer needs to render one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<'a> {
    pub surface: Surface,
    pub items: &'a [Item],
    pub total_count: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub selected_option: u32,
    pub rows_options: Vec<u32>,
    pub item_from: u64,
    pub item_to: u64,
    pub phase: &'a FetchPhase,
    pub loading: bool,
    /// Displayed items belong to another page or page size.
    pub stale: bool,
    pub error: Option<&'a FetchError>,
    pub show_rows_text: bool,
    pub show_category_filter: bool,
    pub show_tag_filter: bool,
    pub media_size: Option<MediaSize>,
    pub subcategory_urls: bool,
}

/// One mounted listing.
///
/// Commands update the page state right away, write the new page back to
/// the router and start a fetch without waiting for it. Finished fetches are
/// queued and folded in by [`settle_next`](Self::settle_next) or
/// [`drain_completions`](Self::drain_completions).
pub struct ListingController<Env: ListingEnv> {
    id: Uuid,
    env: Env,
    surface: Surface,
    filter: ListingFilter,
    custom_domain: Option<String>,
    config: ListingConfig,
    settings: Settings,
    pager: Pager,
    scroll: ScrollTrigger,
    in_flight: usize,
    completion_tx: mpsc::UnboundedSender<FetchCompletion>,
    completion_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl<Env: ListingEnv> ListingController<Env> {
    /// Read the route, set up the page state and start the initial fetch.
    ///
    /// Must be called from within a tokio runtime. No navigation is issued.
    pub(crate) fn mount(
        env: Env,
        surface: Surface,
        config: ListingConfig,
        settings: Settings,
    ) -> Result<Self> {
        let route = env.router().route();
        let page = initial_page(&route)?;
        let filter = surface
            .filter_from(&route)
            .ok_or(ListingError::MissingFilter { surface })?;
        let custom_domain = custom_domain(&route, config.custom_domain_map().as_ref());
        let pagination = PaginationState::new(page, config.posts_per_page)?;

        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            id: Uuid::new_v4(),
            pager: Pager::new(pagination, config.policy()),
            env,
            surface,
            filter,
            custom_domain,
            config,
            settings,
            scroll: ScrollTrigger::new(),
            in_flight: 0,
            completion_tx,
            completion_rx,
        };

        tracing::info!(
            listing = %controller.id,
            %surface,
            route = %route.route_id,
            page,
            page_size = pagination.page_size(),
            "listing mounted"
        );

        controller.scroll.observe(page);
        let ticket = controller.pager.load();
        controller.spawn_fetch(ticket);
        Ok(controller)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn custom_domain(&self) -> Option<&str> {
        self.custom_domain.as_deref()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pagination(&self) -> &PaginationState {
        self.pager.pagination()
    }

    /// Fetches started but not yet folded in.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Switch page size and return to page 1.
    pub async fn set_page_size(&mut self, size: u32) -> Result<()> {
        let size = NonZeroU32::new(size).ok_or(PaginationError::ZeroPageSize)?;
        self.run_command(PageCommand::SetPageSize(size)).await;
        Ok(())
    }

    /// Go back one page. Returns `false` on the first page, where nothing
    /// happens.
    pub async fn previous(&mut self) -> bool {
        self.run_command(PageCommand::Previous).await
    }

    /// Go forward one page. Returns `false` only when a `clamp_to_total`
    /// bound blocks the move.
    pub async fn next(&mut self) -> bool {
        self.run_command(PageCommand::Next).await
    }

    /// Wait for the next finished fetch and fold it in. Returns `None` when
    /// nothing is in flight.
    pub async fn settle_next(&mut self) -> Option<Resolution> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completion_rx.recv().await?;
        Some(self.apply_completion(completion))
    }

    /// Fold in every fetch that has already finished, without waiting.
    pub fn drain_completions(&mut self) -> Vec<Resolution> {
        let mut resolved = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            resolved.push(self.apply_completion(completion));
        }
        resolved
    }

    pub fn view(&self) -> ListingView<'_> {
        let pagination = self.pager.pagination();
        let phase = self.pager.phase();
        ListingView {
            surface: self.surface,
            items: self
                .pager
                .results()
                .map_or(&[][..], |results| results.items.as_slice()),
            total_count: self.pager.total_count(),
            current_page: pagination.page(),
            page_size: pagination.page_size(),
            selected_option: pagination.selected_option(),
            rows_options: rows_options(self.config.posts_per_page)
                .map(Vec::from)
                .unwrap_or_default(),
            item_from: pagination.item_from(),
            item_to: pagination.item_to(),
            phase,
            loading: !phase.is_settled(),
            stale: self.pager.is_stale(),
            error: self.pager.error(),
            show_rows_text: self.settings.show_rows_text(),
            show_category_filter: self.settings.filter_by_categories,
            show_tag_filter: self.settings.filter_by_tags,
            media_size: self.config.media_size,
            subcategory_urls: self.config.subcategory_urls,
        }
    }

    async fn run_command(&mut self, command: PageCommand) -> bool {
        let Some(ticket) = self.pager.dispatch(command) else {
            return false;
        };

        tracing::debug!(
            listing = %self.id,
            command = command.name(),
            page = ticket.page,
            page_size = ticket.page_size,
            seq = ticket.seq,
            "page command applied"
        );

        if let Err(err) = navigate_to::<Env>(ticket.page).run(&self.env).await {
            tracing::warn!(listing = %self.id, error = %err, "navigation failed; page state kept");
        }
        self.spawn_fetch(ticket);
        self.after_render();
        true
    }

    fn request_for(&self, ticket: FetchTicket) -> FetchRequest {
        FetchRequest {
            filter: self.filter.clone(),
            page_index: ticket.page,
            page_size: ticket.page_size,
            custom_domain: self.custom_domain.clone(),
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let request = self.request_for(ticket);
        let source = self.env.source();
        let tx = self.completion_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let query = tokio::spawn(async move { source.query(&request).await });
            let outcome = match query.await {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Dropped),
            };
            tx.send(FetchCompletion { ticket, outcome }).ok();
        });
    }

    fn apply_completion(&mut self, completion: FetchCompletion) -> Resolution {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Err(err) = &completion.outcome {
            tracing::warn!(
                listing = %self.id,
                seq = completion.ticket.seq,
                page = completion.ticket.page,
                error = %err,
                "fetch failed"
            );
        }
        self.pager.resolve(completion.ticket, completion.outcome)
    }

    fn after_render(&mut self) {
        if !self.scroll.observe(self.pager.pagination().page()) {
            return;
        }
        if let Some(top) = self.env.viewport().and_then(|viewport| restore_scroll(viewport)) {
            tracing::debug!(listing = %self.id, top, "scrolled list into view");
        }
    }
}
