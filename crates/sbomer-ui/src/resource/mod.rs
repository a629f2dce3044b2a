//! Data-fetch hooks: one loader per resource, backed by [`SbomerClient`].

mod loader;
mod pagination;

pub use loader::{AsyncState, ResourceLoader};
pub use pagination::{PageQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

use serde_json::Value;

use crate::api::{Page, SbomerClient};
use crate::model::{Enhancement, Event, Generation, Manifest, SbomerStats};

pub type ListLoader<T> = ResourceLoader<PageQuery, Page<T>>;
pub type DetailLoader<T> = ResourceLoader<String, T>;

pub fn stats(client: SbomerClient) -> ResourceLoader<(), SbomerStats> {
    ResourceLoader::new("stats", move |()| {
        let client = client.clone();
        async move { client.stats().await }
    })
}

pub fn generations(client: SbomerClient) -> ListLoader<Generation> {
    ResourceLoader::new("generations", move |query: PageQuery| {
        let client = client.clone();
        async move { client.get_generations(query.page_request()).await }
    })
}

pub fn generation(client: SbomerClient) -> DetailLoader<Generation> {
    ResourceLoader::new("generation", move |id: String| {
        let client = client.clone();
        async move { client.get_generation(&id).await }
    })
}

pub fn generation_enhancements(client: SbomerClient) -> ResourceLoader<String, Page<Enhancement>> {
    ResourceLoader::new("generation enhancements", move |id: String| {
        let client = client.clone();
        async move { client.get_generation_enhancements(&id).await }
    })
}

pub fn enhancements(client: SbomerClient) -> ListLoader<Enhancement> {
    ResourceLoader::new("enhancements", move |query: PageQuery| {
        let client = client.clone();
        async move { client.get_enhancements(query.page_request()).await }
    })
}

pub fn enhancement(client: SbomerClient) -> DetailLoader<Enhancement> {
    ResourceLoader::new("enhancement", move |id: String| {
        let client = client.clone();
        async move { client.get_enhancement(&id).await }
    })
}

/// Events honor the free-text query in addition to pagination.
pub fn events(client: SbomerClient) -> ListLoader<Event> {
    ResourceLoader::new("events", move |query: PageQuery| {
        let client = client.clone();
        async move { client.get_events(query.page_request(), &query.query).await }
    })
}

pub fn event(client: SbomerClient) -> DetailLoader<Event> {
    ResourceLoader::new("event", move |id: String| {
        let client = client.clone();
        async move { client.get_event(&id).await }
    })
}

pub fn event_generations(client: SbomerClient) -> ResourceLoader<String, Page<Generation>> {
    ResourceLoader::new("event generations", move |id: String| {
        let client = client.clone();
        async move { client.get_event_generations(&id).await }
    })
}

pub fn manifests(client: SbomerClient) -> ListLoader<Manifest> {
    ResourceLoader::new("manifests", move |query: PageQuery| {
        let client = client.clone();
        async move { client.get_manifests(query.page_request()).await }
    })
}

pub fn manifest(client: SbomerClient) -> DetailLoader<Manifest> {
    ResourceLoader::new("manifest", move |id: String| {
        let client = client.clone();
        async move { client.get_manifest(&id).await }
    })
}

pub fn manifest_json(client: SbomerClient) -> DetailLoader<Value> {
    ResourceLoader::new("manifest json", move |id: String| {
        let client = client.clone();
        async move { client.get_manifest_json(&id).await }
    })
}
