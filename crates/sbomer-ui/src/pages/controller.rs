//! Resolves a location, drives the matching loaders and builds the page view.

use serde::Serialize;

use crate::api::{Page, SbomerClient};
use crate::config::DashboardConfig;
use crate::model::{Enhancement, Event, Generation, Manifest, SbomerStats};
use crate::resource::{
    self, AsyncState, DetailLoader, ListLoader, PageQuery, ResourceLoader,
};
use crate::routes::{app_routes, navigation, resolve, Location, NavItem, PageKind, RouteEntry, RouteMatch};
use crate::table::{PaginationEvent, TableAction, TablePage, TableState};

use super::{dashboard, enhancements, events, generations, help, manifests, not_found, PageView};

/// Everything needed to show one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    /// Canonical location; list pages carry their full page query.
    pub location: Location,
    pub route: RouteMatch,
    pub title: String,
    pub navigation: Vec<NavItem>,
    pub view: PageView,
}

/// Browser-style document title for a matched route.
pub fn document_title(route: &RouteMatch) -> String {
    let id = route.id.as_deref().unwrap_or_default();
    let suffix = match route.page {
        PageKind::Dashboard => "Dashboard".to_string(),
        PageKind::Events => "Events".to_string(),
        PageKind::Event => "Event details".to_string(),
        PageKind::Generations => "Generations".to_string(),
        PageKind::Generation => format!("Generations | {}", id),
        PageKind::Enhancements => "Enhancements".to_string(),
        PageKind::Enhancement => format!("Enhancements | {}", id),
        PageKind::Manifests => "Manifests".to_string(),
        PageKind::Manifest => format!("Manifests | {}", id),
        PageKind::Help => "Help".to_string(),
        PageKind::NotFound => "Not Found".to_string(),
    };
    format!("SBOMer | {}", suffix)
}

async fn fetch<P, T>(loader: &ResourceLoader<P, T>, params: P, force: bool) -> AsyncState<T>
where
    P: Clone + PartialEq + Send + 'static,
    T: Clone + Send + 'static,
{
    if force {
        loader.load(params).await
    } else {
        loader.set_params(params).await
    }
}

/// Owns one loader per resource, so repeated visits reuse loaded state.
pub struct PageController {
    routes: Vec<RouteEntry>,
    default_page_size: u32,
    stats: ResourceLoader<(), SbomerStats>,
    events: ListLoader<Event>,
    event: DetailLoader<Event>,
    event_generations: ResourceLoader<String, Page<Generation>>,
    generations: ListLoader<Generation>,
    generation: DetailLoader<Generation>,
    generation_enhancements: ResourceLoader<String, Page<Enhancement>>,
    enhancements: ListLoader<Enhancement>,
    enhancement: DetailLoader<Enhancement>,
    manifests: ListLoader<Manifest>,
    manifest: DetailLoader<Manifest>,
    events_table: TablePage<Event>,
    generations_table: TablePage<Generation>,
    enhancements_table: TablePage<Enhancement>,
    manifests_table: TablePage<Manifest>,
}

impl PageController {
    pub fn new(client: SbomerClient, config: &DashboardConfig) -> Self {
        Self {
            routes: app_routes(),
            default_page_size: config.default_page_size,
            stats: resource::stats(client.clone()),
            events: resource::events(client.clone()),
            event: resource::event(client.clone()),
            event_generations: resource::event_generations(client.clone()),
            generations: resource::generations(client.clone()),
            generation: resource::generation(client.clone()),
            generation_enhancements: resource::generation_enhancements(client.clone()),
            enhancements: resource::enhancements(client.clone()),
            enhancement: resource::enhancement(client.clone()),
            manifests: resource::manifests(client.clone()),
            manifest: resource::manifest(client),
            events_table: events::table_page(),
            generations_table: generations::table_page(),
            enhancements_table: enhancements::table_page(),
            manifests_table: manifests::table_page(),
        }
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    fn page_query(&self, location: &Location) -> PageQuery {
        PageQuery::parse(&location.query, self.default_page_size)
    }

    /// Shows `location`, fetching only what changed since the last visit.
    pub async fn open(&self, location: &Location) -> RenderedPage {
        self.render(location, false).await
    }

    /// Shows `location`, re-fetching everything it needs.
    pub async fn refresh(&self, location: &Location) -> RenderedPage {
        self.render(location, true).await
    }

    async fn list<T>(
        &self,
        loader: &ListLoader<T>,
        table: &TablePage<T>,
        query: &PageQuery,
        force: bool,
    ) -> PageView
    where
        T: Clone + Send + 'static,
    {
        let state = fetch(loader, query.clone(), force).await;
        PageView::Table(table.view(&TableState::from_loader(&state, query)))
    }

    async fn render(&self, location: &Location, force: bool) -> RenderedPage {
        let route = resolve(&self.routes, &location.path);
        let id = route.id.clone().unwrap_or_default();
        let query = self.page_query(location);
        tracing::debug!("Rendering {} as {:?}", location, route.page);

        let mut location = location.clone();
        let view = match route.page {
            PageKind::Dashboard => {
                PageView::Dashboard(dashboard::view(&fetch(&self.stats, (), force).await))
            }
            PageKind::Events => {
                self.list(&self.events, &self.events_table, &query, force).await
            }
            PageKind::Generations => {
                self.list(&self.generations, &self.generations_table, &query, force)
                    .await
            }
            PageKind::Enhancements => {
                self.list(&self.enhancements, &self.enhancements_table, &query, force)
                    .await
            }
            PageKind::Manifests => {
                self.list(&self.manifests, &self.manifests_table, &query, force)
                    .await
            }
            PageKind::Event => {
                let (event, related) = futures_util::join!(
                    fetch(&self.event, id.clone(), force),
                    fetch(&self.event_generations, id.clone(), force)
                );
                PageView::Detail(events::detail(&id, &event, &related))
            }
            PageKind::Generation => {
                let (generation, related) = futures_util::join!(
                    fetch(&self.generation, id.clone(), force),
                    fetch(&self.generation_enhancements, id.clone(), force)
                );
                PageView::Detail(generations::detail(&id, &generation, &related))
            }
            PageKind::Enhancement => {
                let enhancement = fetch(&self.enhancement, id.clone(), force).await;
                PageView::Detail(enhancements::detail(&id, &enhancement))
            }
            PageKind::Manifest => {
                let manifest = fetch(&self.manifest, id.clone(), force).await;
                PageView::Detail(manifests::detail(&id, &manifest))
            }
            PageKind::Help => PageView::Help(help::view()),
            PageKind::NotFound => PageView::NotFound(not_found::view(&location.path)),
        };

        if matches!(
            route.page,
            PageKind::Events | PageKind::Generations | PageKind::Enhancements | PageKind::Manifests
        ) {
            location = location.with_query(query.to_query_string());
        }

        RenderedPage {
            title: document_title(&route),
            navigation: navigation(&self.routes, &location.path),
            location,
            route,
            view,
        }
    }

    /// Location after a pagination control change.
    pub fn navigate_pagination(&self, location: &Location, event: PaginationEvent) -> Location {
        let query = self.page_query(location);
        let next = match event {
            PaginationEvent::Page(page) => query.with_page(page),
            PaginationEvent::PageSize(page_size) => query.with_page_size(page_size),
        };
        location.with_query(next.to_query_string())
    }

    /// Location after submitting a search.
    pub fn navigate_search(&self, location: &Location, search: &str) -> Location {
        let next = self.page_query(location).with_query(search);
        location.with_query(next.to_query_string())
    }

    /// Location after a table or empty-state action.
    pub fn navigate_action(&self, location: &Location, action: &TableAction) -> Location {
        match action {
            TableAction::ClearFilters => {
                location.with_query(PageQuery::parse("", self.default_page_size).to_query_string())
            }
            TableAction::Navigate(to) => Location::parse(to),
        }
    }
}
